use restruct::{MatchMode, RecordHandle, Rule, RuleSetBuilder};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Reading {
    sensor: String,
    celsius: f32,
    humidity: Option<f64>,
    ok: bool,
    raw: Vec<u8>,
}

restruct::impl_record!(Reading {
    sensor,
    celsius => "temp",
    humidity => "rh",
    ok,
    raw => opaque,
});

fn main() {
    // RUST_LOG=restruct=trace shows every rule attempt.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let reading = RecordHandle::<Reading>::default();
    let mut ruleset = RuleSetBuilder::new()
        .rule(
            "full",
            r"(?P<sensor>\w+): (?P<temp>-?[\d.]+)C (?P<rh>[\d.]+)% ok=(?P<ok>\w+)",
            &reading,
        )
        .rule("temp", r"(?P<sensor>\w+): (?P<temp>-?[\d.]+)C", &reading)
        .push(
            Rule::new(r"sensor (?P<sensor>\w+) ok=(?P<ok>\w+)", &reading)
                .labeled("status")
                .mode(MatchMode::Search),
        )
        .build();

    for line in [
        "kitchen: 21.5C 40.2% ok=t",
        "garage: -3.0C",
        "[12:00] sensor attic ok=FALSE (polled)",
        "cellar: coldC",
        "cellar: 10C 50% ok=maybe",
    ] {
        match ruleset.match_str(line) {
            Ok(Some(matched)) => println!("{line:?} -> {matched}: {:?}", reading.lock()),
            Ok(None) => println!("{line:?} -> no match"),
            Err(err) => println!("{line:?} -> error: {err}"),
        }
    }
}
