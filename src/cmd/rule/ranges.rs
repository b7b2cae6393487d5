use std::io::Write;

use crate::{
    args::{self, Usage},
    pattern::DataRange,
};

const USAGE: &'static str = r#"
List the data ranges commonly offered for a schedule.

Each range is printed on its own line as a number of days and a label,
separated by a tab. Any positive number of days may be used with
`-r/--data-range`, but these are the ones with labels.

USAGE:
    cadence rule ranges

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    List the ranges:

        $ cadence rule ranges
        7	Data from the previous week
        30	Data from the previous month
        60	Data from the previous 2 months
        90	Data from the previous quarter
        180	Data from the previous 2 quarters
        365	Data from the previous year

    %snip-start%

    Print only the label for a particular range:

        $ cadence rule ranges --days 90
        Data from the previous quarter

    %snip-end%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let mut wtr = std::io::stdout().lock();
    if let Some(range) = config.days {
        let Some(label) = range.label() else {
            anyhow::bail!("a data range of {range} days has no label")
        };
        writeln!(wtr, "{label}")?;
        return Ok(());
    }
    for (days, label) in DataRange::PRESETS {
        writeln!(wtr, "{days}\t{label}")?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    days: Option<DataRange>,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Long("days") => {
                self.days = Some(args::parse(p, "--days")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const DAYS: Usage = Usage::flag(
            "--days <days>",
            "Print only the label for this number of days.",
            r#"
Print only the label for this number of days.

It is an error if the number of days given isn't one of the common ranges.
"#,
        );
        &[DAYS]
    }
}
