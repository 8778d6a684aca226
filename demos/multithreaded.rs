use std::sync::Arc;
use std::thread;

use restruct::{RecordHandle, RuleSetBuilder};

#[derive(Debug, Default, Clone)]
struct Request {
    method: String,
    path: String,
    status: u16,
}

restruct::impl_record!(Request { method, path, status });

fn main() {
    // One record per worker, so concurrent fills never share a target.
    let records: Vec<RecordHandle<Request>> = (0..4).map(|_| RecordHandle::default()).collect();
    let mut builder = RuleSetBuilder::new();
    for (i, record) in records.iter().enumerate() {
        builder = builder.rule(
            &format!("worker{i}"),
            &format!(r"w{i} (?P<method>[A-Z]+) (?P<path>\S+) (?P<status>\d{{3}})"),
            record,
        );
    }
    let ruleset = Arc::new(builder.compile().expect("patterns are valid"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ruleset = Arc::clone(&ruleset);
            thread::spawn(move || {
                let line = format!("w{i} GET /item/{i} 200");
                ruleset.find(&line).map(|m| m.map(|m| m.index()))
            })
        })
        .collect();

    for handle in handles {
        println!("{:?}", handle.join().expect("worker panicked"));
    }
    for record in &records {
        println!("{:?}", record.get());
    }
}
