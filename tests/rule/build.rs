use crate::command::assert_cmd_snapshot;

fn build() -> crate::command::Command {
    crate::cadence(["rule", "build"])
}

#[test]
fn weekly() {
    assert_cmd_snapshot!(
        build().args(["weekly", "2024-07-26"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=WEEKLY;BYDAY=FR

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        build().args(["w", "next tue"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=WEEKLY;BYDAY=TU

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly_ordinals() {
    assert_cmd_snapshot!(
        build().args(["monthly", "2024-07-01"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=1MO

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        build().args(["monthly", "2024-07-08"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=2MO

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        build().args(["monthly", "2024-07-19"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=3FR

    ----- stderr -----
    ",
    );
    // The 22nd is in the fourth week, which is always treated as the last.
    assert_cmd_snapshot!(
        build().args(["monthly", "2024-07-22"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=-1MO

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        build().args(["monthly", "2024-07-29"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=-1MO

    ----- stderr -----
    ",
    );
}

#[test]
fn monthly_today() {
    assert_cmd_snapshot!(
        build().args(["monthly", "today"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYDAY=3SA

    ----- stderr -----
    ",
    );
}

#[test]
fn quarterly() {
    assert_cmd_snapshot!(
        build().args(["quarterly", "2024-07-25"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH

    ----- stderr -----
    ",
    );
}

#[test]
fn unanchored() {
    assert_cmd_snapshot!(
        build().arg("monthly"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        build().arg("Q"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    FREQ=MONTHLY;BYMONTH=1,4,7,10

    ----- stderr -----
    ",
    );
}

#[test]
fn json() {
    assert_cmd_snapshot!(
        build().args(["quarterly", "2024-07-25", "-r", "90", "--json"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"rrule":"FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH","frequency":"quarterly","dataRangeDays":90}

    ----- stderr -----
    "#,
    );
    assert_cmd_snapshot!(
        build().args(["weekly", "--json"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {"rrule":"FREQ=WEEKLY","frequency":"weekly","dataRangeDays":30}

    ----- stderr -----
    "#,
    );
}

#[test]
fn json_record_is_readable() {
    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Record {
        rrule: String,
        frequency: String,
        data_range_days: u16,
    }

    let snap = build().args(["monthly", "2024-07-08", "--json"]).snapshot();
    let record: Record = serde_json::from_slice(snap.stdout()).unwrap();
    assert_eq!(record.rrule, "FREQ=MONTHLY;BYDAY=2MO");
    assert_eq!(record.frequency, "monthly");
    assert_eq!(record.data_range_days, 30);
}

#[test]
fn errors() {
    assert_cmd_snapshot!(
        build().args(["yearly", "2024-07-19"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized frequency `yearly` (expected weekly, monthly or quarterly)
    ",
    );
    assert_cmd_snapshot!(
        build(),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    missing required <frequency>
    ",
    );
    assert_cmd_snapshot!(
        build().args(["weekly", "someday"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    unrecognized date `someday`
    ",
    );
    assert_cmd_snapshot!(
        build().args(["weekly", "-r", "0"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -r/--data-range: data range must be at least 1 day
    ",
    );
    assert_cmd_snapshot!(
        build().args(["weekly", "-r", "month"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    -r/--data-range: failed to parse `month` as a number of days
    ",
    );
}
