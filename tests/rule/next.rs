use crate::command::assert_cmd_snapshot;

fn next() -> crate::command::Command {
    crate::cadence(["rule", "next"])
}

// Today is Saturday, July 20, 2024.

#[test]
fn weekly() {
    // A weekly schedule fires today if today is the right weekday.
    assert_cmd_snapshot!(
        next().arg("FREQ=WEEKLY;BYDAY=SA"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20

    ----- stderr -----
    ",
    );
    // From a Monday, the Friday of the same week.
    assert_cmd_snapshot!(
        next().args(["FREQ=WEEKLY;BYDAY=FR", "2024-07-22"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-26

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly() {
    assert_cmd_snapshot!(
        next().args(["FREQ=MONTHLY;BYDAY=2MO", "2024-08-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-08-12

    ----- stderr -----
    ",
    );
    // The third Friday of July has already passed.
    assert_cmd_snapshot!(
        next().arg("FREQ=MONTHLY;BYDAY=3FR"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-08-16

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().args(["FREQ=MONTHLY;BYDAY=3FR", "yesterday"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-19

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().arg("FREQ=MONTHLY;BYDAY=-1FR"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-26

    ----- stderr -----
    ",
    );
}

#[test]
fn quarterly() {
    let rule = "FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH";
    // Still upcoming in the first month of the quarter.
    assert_cmd_snapshot!(
        next().arg(rule),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-25

    ----- stderr -----
    ",
    );
    // Already passed, so it rolls over to the next quarter.
    assert_cmd_snapshot!(
        next().args([rule, "2024-07-26"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-10-31

    ----- stderr -----
    ",
    );
    // Mid-quarter, in a month where the schedule never fires.
    assert_cmd_snapshot!(
        next().args([rule, "2024-08-15"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-10-31

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().args([rule, "2024-11-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2025-01-30

    ----- stderr -----
    ",
    );
}

#[test]
fn record() {
    assert_cmd_snapshot!(
        next().args([
            r#"{"rrule":"FREQ=WEEKLY;BYDAY=TU","frequency":"weekly","dataRangeDays":7}"#,
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-23

    ----- stderr -----
    ",
    );
}

#[test]
fn format() {
    assert_cmd_snapshot!(
        next().args(["FREQ=WEEKLY;BYDAY=FR", "-f", "display"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    July 26, 2024

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().args(["FREQ=WEEKLY;BYDAY=FR", "-f", "%a %b %-d"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Fri Jul 26

    ----- stderr -----
    ",
    );
}

#[test]
fn quarterly_interval() {
    // The first Monday of July has passed, so it's the one in October.
    assert_cmd_snapshot!(
        next().arg("FREQ=MONTHLY;INTERVAL=3;BYDAY=MO;BYSETPOS=1"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-10-07

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().args([
            "DTSTART:20240101T000000Z\nRRULE:FREQ=MONTHLY;INTERVAL=3;BYDAY=MO;BYSETPOS=1",
            "2025-01-01",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2025-01-06

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        next().arg("FREQ=MONTHLY;BYMONTHDAY=1"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    malformed recurrence rule `FREQ=MONTHLY;BYMONTHDAY=1`: day-of-month rules (BYMONTHDAY) are not supported, only weekday rules are
    ",
    );
}

#[test]
fn errors() {
    assert_cmd_snapshot!(
        next().arg("FREQ=WEEKLY"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    recurrence rule `FREQ=WEEKLY` has no anchor day, so no concrete dates can be computed from it (build it from an anchor date first)
    ",
    );
    assert_cmd_snapshot!(
        next().arg("FREQ=DAILY;BYDAY=FR"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    malformed recurrence rule `FREQ=DAILY;BYDAY=FR`: unsupported frequency `DAILY` (expected WEEKLY or MONTHLY)
    ",
    );
    assert_cmd_snapshot!(
        next().arg("FREQ=MONTHLY;BYDAY=4FR"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    malformed recurrence rule `FREQ=MONTHLY;BYDAY=4FR`: weekday number `4` is not supported (expected 1, 2, 3 or -1)
    ",
    );
    assert_cmd_snapshot!(
        next(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <pattern>
    ",
    );
}
