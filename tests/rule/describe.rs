use crate::command::assert_cmd_snapshot;

fn describe() -> crate::command::Command {
    crate::cadence(["rule", "describe"])
}

#[test]
fn rules() {
    assert_cmd_snapshot!(
        describe().args([
            "FREQ=WEEKLY;BYDAY=FR",
            "FREQ=MONTHLY;BYDAY=1MO",
            "FREQ=MONTHLY;BYDAY=2TU",
            "FREQ=MONTHLY;BYDAY=3WE",
            "FREQ=MONTHLY;BYDAY=-1SU",
            "RRULE:FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH",
            "FREQ=MONTHLY;BYDAY=MO;BYSETPOS=2",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Every Friday
    The first Monday of each month
    The second Tuesday of each month
    The third Wednesday of each month
    The last Sunday of each month
    The last Thursday of each quarter
    The second Monday of each month

    ----- stderr -----
    ",
    );
}

#[test]
fn records() {
    assert_cmd_snapshot!(
        describe().args([
            r#"{"rrule":"FREQ=WEEKLY;BYDAY=TU","frequency":"weekly","dataRangeDays":7}"#,
            r#"{"rrule":"FREQ=MONTHLY;BYDAY=3FR","frequency":"none","dataRangeDays":30}"#,
            r#"{"rrule":"FREQ=WEEKLY;BYDAY=TU","frequency":"monthly","dataRangeDays":30}"#,
            r#"{"rrule":"FREQ=WEEKLY;BYDAY=TU""#,
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Every Tuesday
    Does not repeat
    Does not repeat
    Does not repeat

    ----- stderr -----
    ",
    );
}

#[test]
fn interval_rules() {
    assert_cmd_snapshot!(
        describe().args([
            "FREQ=MONTHLY;INTERVAL=3;BYDAY=MO;BYSETPOS=1",
            "DTSTART:20240101T000000Z\nRRULE:FREQ=MONTHLY;INTERVAL=3;BYDAY=MO;BYSETPOS=1",
            r#"{"rrule":"DTSTART:20240101T000000Z\nRRULE:FREQ=MONTHLY;INTERVAL=3;BYDAY=MO;BYSETPOS=1","frequency":"quarterly","dataRangeDays":90}"#,
            "FREQ=MONTHLY;INTERVAL=3;BYMONTHDAY=1",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    The first Monday of each quarter
    The first Monday of each quarter
    The first Monday of each quarter
    Does not repeat

    ----- stderr -----
    ",
    );
}

#[test]
fn never_fails() {
    assert_cmd_snapshot!(
        describe().args([
            "FREQ=WEEKLY",
            "FREQ=MONTHLY;BYDAY=FR",
            "FREQ=DAILY;BYDAY=FR",
            "FREQ=MONTHLY;BYDAY=4FR",
            "",
            "not a rule",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Does not repeat
    Does not repeat
    Does not repeat
    Does not repeat
    Does not repeat
    Does not repeat

    ----- stderr -----
    ",
    );
}

#[test]
fn stdin() {
    assert_cmd_snapshot!(
        describe().stdin("FREQ=WEEKLY;BYDAY=SA\n\nFREQ=MONTHLY;BYDAY=2SA\r\n"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Every Saturday
    Does not repeat
    The second Saturday of each month

    ----- stderr -----
    ",
    );
}

#[test]
fn pipeline() {
    assert_cmd_snapshot!(
        crate::cadence(["rule", "build", "quarterly", "2024-07-25", "--json"])
            .pipe(describe()),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    The last Thursday of each quarter

    ----- stderr -----
    ",
    );
}
