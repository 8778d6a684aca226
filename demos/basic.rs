use restruct::{RecordHandle, RuleSetBuilder};

#[derive(Debug, Default)]
struct Human {
    name: String,
    age: i64,
    height: Option<i64>,
}

restruct::impl_record!(Human { name, age, height });

fn main() {
    let human = RecordHandle::<Human>::default();

    // Rules are tried in order; the first one matching the whole input wins.
    let mut ruleset = RuleSetBuilder::new()
        .rule(
            "age",
            r"(?P<name>\w+) is ((?P<age>\d+)( years old)?|old|great)",
            &human,
        )
        .rule("height", r"(?P<name>\w+) is (?P<height>\d+) cm tall", &human)
        .build();

    println!("{ruleset}");

    for input in [
        "John is 42 years old",
        "John is 178 cm tall",
        "John is great",
        "John was 42",
    ] {
        match ruleset.match_str(input) {
            Ok(Some(matched)) => println!("{input:?} -> {matched}: {:?}", human.lock()),
            Ok(None) => println!("{input:?} -> no match"),
            Err(err) => println!("{input:?} -> error: {err}"),
        }
    }
}
