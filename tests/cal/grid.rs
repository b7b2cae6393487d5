use bstr::ByteSlice;

use crate::command::assert_cmd_snapshot;

fn grid() -> crate::command::Command {
    crate::cadence(["cal", "grid"])
}

#[test]
fn current_month() {
    assert_cmd_snapshot!(
        grid(),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    July 2024
    Sun Mon Tue Wed Thu Fri Sat
     30   1   2   3   4   5   6
      7   8   9  10  11  12  13
     14  15  16  17  18  19  20
     21  22  23  24  25  26  27
     28  29  30  31   1   2   3
      4   5   6   7   8   9  10

    ----- stderr -----
    ",
    );
}

#[test]
fn month_starting_on_sunday() {
    assert_cmd_snapshot!(
        grid().arg("2015-02-14"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    February 2015
    Sun Mon Tue Wed Thu Fri Sat
      1   2   3   4   5   6   7
      8   9  10  11  12  13  14
     15  16  17  18  19  20  21
     22  23  24  25  26  27  28
      1   2   3   4   5   6   7
      8   9  10  11  12  13  14

    ----- stderr -----
    ",
    );
}

#[test]
fn relative_date() {
    assert_cmd_snapshot!(
        grid().arg("next fri"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    July 2024
    Sun Mon Tue Wed Thu Fri Sat
     30   1   2   3   4   5   6
      7   8   9  10  11  12  13
     14  15  16  17  18  19  20
     21  22  23  24  25  26  27
     28  29  30  31   1   2   3
      4   5   6   7   8   9  10

    ----- stderr -----
    ",
    );
}

#[test]
fn json() {
    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Cell {
        date: String,
        date_key: String,
        in_current_month: bool,
        is_today: bool,
    }

    let snap = grid().args(["2024-07-01", "--json"]).snapshot();
    let cells: Vec<Cell> = snap
        .stdout()
        .lines()
        .map(|line| serde_json::from_slice(line).unwrap())
        .collect();
    assert_eq!(cells.len(), 42);
    assert_eq!(cells[0].date_key, "2024-06-30");
    assert_eq!(cells[41].date_key, "2024-08-10");
    assert!(cells.iter().all(|c| c.date == c.date_key));
    assert_eq!(cells.iter().filter(|c| c.in_current_month).count(), 31);

    let today: Vec<&str> = cells
        .iter()
        .filter(|c| c.is_today)
        .map(|c| c.date_key.as_str())
        .collect();
    assert_eq!(today, ["2024-07-20"]);
}

#[test]
fn today_outside_grid() {
    let snap = grid().args(["2024-01-15", "--json"]).snapshot();
    assert!(!snap.stdout().contains_str(r#""isToday":true"#));
}

#[test]
fn errors() {
    assert_cmd_snapshot!(
        grid().arg("9999-12-01"),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    calendar arithmetic starting at 9999-12-01 went outside the supported range of dates
    ",
    );
}
