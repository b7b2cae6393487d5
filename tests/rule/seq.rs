use crate::command::assert_cmd_snapshot;

fn seq() -> crate::command::Command {
    crate::cadence(["rule", "seq"])
}

#[test]
fn default_count() {
    assert_cmd_snapshot!(
        seq().arg("FREQ=WEEKLY;BYDAY=SA"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-20
    2024-07-27
    2024-08-03
    2024-08-10
    2024-08-17
    2024-08-24
    2024-08-31
    2024-09-07
    2024-09-14
    2024-09-21
    2024-09-28
    2024-10-05

    ----- stderr -----
    ",
    );
}

#[test]
fn count() {
    assert_cmd_snapshot!(
        seq().args(["FREQ=MONTHLY;BYDAY=3FR", "2024-07-01", "-c4"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-19
    2024-08-16
    2024-09-20
    2024-10-18

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=MONTHLY;BYDAY=-1SU", "--count", "3"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-28
    2024-08-25
    2024-09-29

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args([
            "FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH",
            "2024-07-26",
            "-c",
            "4",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-10-31
    2025-01-30
    2025-04-24
    2025-07-31

    ----- stderr -----
    ",
    );
}

#[test]
fn until() {
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "2024-08-01", "-u", "2024-08-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-08-02
    2024-08-09
    2024-08-16
    2024-08-23
    2024-08-30

    ----- stderr -----
    ",
    );
    // The end date is inclusive.
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "2024-08-01", "--until=2024-08-16"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-08-02
    2024-08-09
    2024-08-16

    ----- stderr -----
    ",
    );
    // Relative dates work too.
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=MO", "-u", "next sat"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-22

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=MO", "-u", "yesterday"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ",
    );
}

#[test]
fn data_window() {
    assert_cmd_snapshot!(
        seq().args([
            "FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH",
            "-c2",
            "-r90",
            "--data-window",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-25	2024-04-26	2024-07-24
    2024-10-31	2024-08-02	2024-10-30

    ----- stderr -----
    ",
    );
    // The default data range is 30 days.
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "-c2", "--data-window"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    2024-07-26	2024-06-26	2024-07-25
    2024-08-02	2024-07-03	2024-08-01

    ----- stderr -----
    ",
    );
    // A record carries its own data range.
    assert_cmd_snapshot!(
        seq().args([
            r#"{"rrule":"FREQ=WEEKLY;BYDAY=MO","frequency":"weekly","dataRangeDays":7}"#,
            "-c2",
            "--data-window",
            "-f",
            "%b %-d",
        ]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Jul 22	Jul 15	Jul 21
    Jul 29	Jul 22	Jul 28

    ----- stderr -----
    ",
    );
}

#[test]
fn end_of_time() {
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "9999-12-25", "-c3"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    9999-12-31

    ----- stderr -----
    calendar arithmetic starting at 9999-12-31 went outside the supported range of dates
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "9999-12-20", "-u", "9999-12-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    9999-12-24
    9999-12-31

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=MONTHLY;BYDAY=1MO", "9999-11-02", "-u", "9999-12-31"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    9999-12-06

    ----- stderr -----
    ",
    );
}

#[test]
fn errors() {
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "-c2", "-u", "2024-08-01"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    the -u/--until flag cannot be used with -c/--count
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "-u", "2024-08-01", "-c2"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    the -c/--count flag cannot be used with -u/--until
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=WEEKLY;BYDAY=FR", "-c0"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -c/--count: number of occurrences must be greater than 0
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=QUARTERLY;BYDAY=FR"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    malformed recurrence rule `FREQ=QUARTERLY;BYDAY=FR`: unsupported frequency `QUARTERLY` (expected WEEKLY or MONTHLY)
    ",
    );
    assert_cmd_snapshot!(
        seq().args(["FREQ=MONTHLY", "-c2"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    recurrence rule `FREQ=MONTHLY` has no anchor day, so no concrete dates can be computed from it (build it from an anchor date first)
    ",
    );
}
