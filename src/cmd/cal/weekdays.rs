use std::io::Write;

use crate::{args, calendar};

const USAGE: &'static str = r#"
Print the weekday labels heading each column of a calendar grid.

Labels are printed one per line, in column order. Weeks always start on
Sunday.

USAGE:
    cadence cal weekdays

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the labels on a single line:

        $ cadence cal weekdays | paste -sd' '
        Sun Mon Tue Wed Thu Fri Sat

OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let mut wtr = std::io::stdout().lock();
    for label in calendar::weekday_labels() {
        writeln!(wtr, "{label}")?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        _: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        Ok(false)
    }
}
