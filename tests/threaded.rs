use std::sync::Arc;
use std::thread;

use restruct::{RecordHandle, RuleSet, RuleSetBuilder};

#[derive(Debug, Default, Clone, PartialEq)]
struct Status {
    host: String,
    load: f64,
    up: bool,
}

restruct::impl_record!(Status { host, load, up });

fn status_rules(record: &RecordHandle<Status>) -> RuleSet {
    RuleSetBuilder::new()
        .rule("load", r"(?P<host>\w+) load=(?P<load>[\d.]+)", record)
        .rule("up", r"(?P<host>\w+) up=(?P<up>\w+)", record)
        .compile()
        .unwrap()
}

#[test]
fn one_set_per_thread() {
    let mut handles = vec![];

    for (i, input) in ["alpha load=0.5", "beta up=true", "gamma down"]
        .into_iter()
        .enumerate()
    {
        handles.push(thread::spawn(move || {
            let record = RecordHandle::<Status>::default();
            let mut ruleset = status_rules(&record);
            let label = ruleset
                .match_str(input)
                .unwrap()
                .and_then(|m| m.label().map(str::to_owned));
            (i, label, record.get())
        }));
    }

    let mut results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort_by_key(|(i, _, _)| *i);

    assert_eq!(results[0].1.as_deref(), Some("load"));
    assert_eq!(results[0].2.load, 0.5);
    assert_eq!(results[1].1.as_deref(), Some("up"));
    assert!(results[1].2.up);
    assert_eq!(results[2].1, None);
    assert_eq!(results[2].2, Status::default());
}

#[test]
fn compiled_set_is_shared_by_reference() {
    let records: Vec<RecordHandle<Status>> = (0..4).map(|_| RecordHandle::default()).collect();
    let mut builder = RuleSetBuilder::new();
    for (i, record) in records.iter().enumerate() {
        builder = builder.rule(
            &format!("host{i}"),
            &format!(r"(?P<host>host{i}) load=(?P<load>[\d.]+)"),
            record,
        );
    }
    let ruleset = Arc::new(builder.compile().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ruleset = Arc::clone(&ruleset);
            thread::spawn(move || {
                let input = format!("host{i} load={i}.25");
                ruleset.find(&input).unwrap().map(|m| m.index())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i));
    }
    for (i, record) in records.iter().enumerate() {
        let status = record.get();
        assert_eq!(status.host, format!("host{i}"));
        assert_eq!(status.load, i as f64 + 0.25);
    }
}
