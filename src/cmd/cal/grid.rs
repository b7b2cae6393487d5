use std::io::Write;

use jiff::fmt::strtime;

use crate::{
    args::{self, Usage},
    calendar::{self, CalendarCell},
    day::Day,
    parse::OsStrExt,
    style::Theme,
};

const USAGE: &'static str = r#"
Print the six week calendar grid for a month.

The grid always has 42 days, starting on the Sunday on or before the first of
the month containing the given date. When a date isn't given, today is used.

When printing to a terminal, today's date is highlighted and days outside of
the month are dimmed. Colors can be disabled by setting `NO_COLOR`.

USAGE:
    cadence cal grid [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the grid for July 2024:

        $ cadence cal grid 2024-07-20
        July 2024
        Sun Mon Tue Wed Thu Fri Sat
         30   1   2   3   4   5   6
          7   8   9  10  11  12  13
         14  15  16  17  18  19  20
         21  22  23  24  25  26  27
         28  29  30  31   1   2   3
          4   5   6   7   8   9  10

    %snip-start%

    Print each cell of the grid as a JSON object, and select the ones in the
    current month with `jq`:

        $ cadence cal grid --json | jq -r 'select(.inCurrentMonth) | .dateKey' | head -n2
        2024-07-01
        2024-07-02

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let reference = config.reference.unwrap_or_else(Day::today);
    let grid = calendar::month_grid(reference.get(), Day::today().get())?;

    let mut wtr = std::io::stdout().lock();
    if config.json {
        for cell in grid.cells() {
            serde_json::to_writer(&mut wtr, cell)?;
            writeln!(wtr)?;
        }
        return Ok(());
    }

    let theme = Theme::stdout();
    let heading = strtime::format("%B %Y", grid.first_of_month())?;
    writeln!(wtr, "{}", theme.heading(heading))?;
    writeln!(wtr, "{}", calendar::weekday_labels().join(" "))?;
    for week in grid.weeks() {
        for (i, cell) in week.iter().enumerate() {
            if i > 0 {
                write!(wtr, " ")?;
            }
            write_cell(&mut wtr, theme, cell)?;
        }
        writeln!(wtr)?;
    }
    Ok(())
}

fn write_cell<W: Write>(
    mut wtr: W,
    theme: &Theme,
    cell: &CalendarCell,
) -> anyhow::Result<()> {
    let day = format!("{:>3}", cell.date.day());
    if cell.is_today {
        write!(wtr, "{}", theme.today(day))?;
    } else if !cell.in_current_month {
        write!(wtr, "{}", theme.dim(day))?;
    } else {
        write!(wtr, "{day}")?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    reference: Option<Day>,
    json: bool,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.reference.is_none() {
                    self.reference = Some(v.parse()?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Long("json") => {
                self.json = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const JSON: Usage = Usage::flag(
            "--json",
            "Print each cell of the grid as a JSON object.",
            r#"
Print each cell of the grid as a JSON object, one per line.

Each object has a `date` and a `dateKey` (both `YYYY-MM-DD`), along with the
booleans `inCurrentMonth` and `isToday`.
"#,
        );
        &[Day::ARG, JSON]
    }
}
