use crate::command::assert_cmd_snapshot;

fn options() -> crate::command::Command {
    crate::cadence(["rule", "options"])
}

#[test]
fn generic() {
    assert_cmd_snapshot!(
        options(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    none	Does not repeat
    weekly	Every week
    monthly	Every month
    quarterly	Every quarter

    ----- stderr -----
    ",
    );
}

#[test]
fn anchored() {
    assert_cmd_snapshot!(
        options().arg("2024-07-08"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    none	Does not repeat
    weekly	Every Monday
    monthly	The second Monday of each month
    quarterly	The second Monday of each quarter

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        options().arg("today"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    none	Does not repeat
    weekly	Every Saturday
    monthly	The third Saturday of each month
    quarterly	The third Saturday of each quarter

    ----- stderr -----
    ",
    );
}

#[test]
fn json() {
    assert_cmd_snapshot!(
        options().args(["2024-07-26", "--json"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"frequency":null,"label":"Does not repeat"}
    {"frequency":"weekly","label":"Every Friday"}
    {"frequency":"monthly","label":"The last Friday of each month"}
    {"frequency":"quarterly","label":"The last Friday of each quarter"}

    ----- stderr -----
    "#,
    );
}
