use crate::command::assert_cmd_snapshot;

fn ranges() -> crate::command::Command {
    crate::cadence(["rule", "ranges"])
}

#[test]
fn presets() {
    assert_cmd_snapshot!(
        ranges(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    7	Data from the previous week
    30	Data from the previous month
    60	Data from the previous 2 months
    90	Data from the previous quarter
    180	Data from the previous 2 quarters
    365	Data from the previous year

    ----- stderr -----
    ",
    );
}

#[test]
fn days() {
    assert_cmd_snapshot!(
        ranges().args(["--days", "90"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Data from the previous quarter

    ----- stderr -----
    ",
    );
    assert_cmd_snapshot!(
        ranges().args(["--days", "45"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    a data range of 45 days has no label
    ",
    );
    assert_cmd_snapshot!(
        ranges().args(["--days", "0"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    --days: data range must be at least 1 day
    ",
    );
}
