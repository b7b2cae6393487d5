use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage, flags},
    day::Day,
    occurrence,
    parse::OsStrExt,
    pattern::RecurrencePattern,
};

const USAGE: &'static str = r#"
Print the next date a schedule fires on.

The date printed is the first one on or after the given date. When a date
isn't given, today is used. So if a weekly schedule fires on Saturdays and
today is a Saturday, then today is printed.

The schedule must be anchored to a particular day. That is, a rule with only a
frequency, like `FREQ=WEEKLY`, is an error.

USAGE:
    cadence rule next <pattern> [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Find the next third Friday of a month:

        $ cadence rule next 'FREQ=MONTHLY;BYDAY=3FR' 2024-07-20
        2024-08-16

    %snip-start%

    Find the next last Thursday of a quarter, in a friendlier format:

        $ cadence rule next 'FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH' -f display
        July 25, 2024

    A JSON record works too:

        $ cadence rule next '{"rrule":"FREQ=WEEKLY;BYDAY=TU","frequency":"weekly","dataRangeDays":7}' 2024-07-20
        2024-07-23

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let pattern = config.pattern.context("missing required <pattern>")?;
    let reference = config.reference.unwrap_or_else(Day::today);
    let next = occurrence::next_occurrence(&pattern, reference.get())?;

    let mut wtr = std::io::stdout().lock();
    writeln!(wtr, "{}", config.format.format(next)?)?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    pattern: Option<RecurrencePattern>,
    reference: Option<Day>,
    format: flags::Format,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.pattern.is_none() {
                    self.pattern = Some(v.parse()?);
                    return Ok(true);
                }
                if self.reference.is_none() {
                    self.reference = Some(v.parse()?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('f') | Long("format") => {
                self.format = args::parse(p, "-f/--format")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[RecurrencePattern::ARG, Day::ARG, flags::Format::USAGE]
    }
}
