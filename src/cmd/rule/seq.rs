use std::io::Write;

use {anyhow::Context, jiff::civil::Date};

use crate::{
    args::{self, Usage, flags},
    day::Day,
    error::ScheduleError,
    occurrence::{self, Occurrences},
    parse::OsStrExt,
    pattern::{DataRange, RecurrencePattern},
};

const USAGE: &'static str = r#"
Generate the dates a schedule fires on.

Dates are generated in chronological order, starting with the first one on or
after the given date. When a date isn't given, today is used.

Unless the `-c/--count` or `-u/--until` flags are used, this command prints
12 dates.

With `--data-window`, each date is followed by the first and last day of the
data that the occurrence on that date covers, separated by tabs. The number of
days covered comes from the schedule's JSON record, or else from
`-r/--data-range`.

USAGE:
    cadence rule seq <pattern> [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print the next 4 third Fridays:

        $ cadence rule seq 'FREQ=MONTHLY;BYDAY=3FR' 2024-07-01 -c 4
        2024-07-19
        2024-08-16
        2024-09-20
        2024-10-18

    %snip-start%

    Print every Friday until the end of August:

        $ cadence rule seq 'FREQ=WEEKLY;BYDAY=FR' 2024-08-01 -u 2024-08-31
        2024-08-02
        2024-08-09
        2024-08-16
        2024-08-23
        2024-08-30

    Print the next 2 quarterly reports along with the 90 days of data each
    one covers:

        $ cadence rule seq 'FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH' 2024-07-20 -c 2 -r 90 --data-window
        2024-07-25	2024-04-26	2024-07-24
        2024-10-31	2024-08-02	2024-10-30

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let mut pattern = config.pattern.context("missing required <pattern>")?;
    if let Some(data_range) = config.data_range {
        pattern = pattern.with_data_range(data_range);
    }
    let start = config.start.unwrap_or_else(Day::today).get();
    let count = match config.terminates {
        Termination::Unset => flags::Count::default(),
        Termination::Count(count) => count,
        Termination::Until(until) => {
            let until = until.get();
            let occurrences = Occurrences::new(&pattern, start)?.until(until);
            return config.emit(&pattern, occurrences);
        }
    };
    config.emit(&pattern, occurrence::expand(&pattern, start, count.get())?)
}

#[derive(Debug, Default)]
struct Config {
    pattern: Option<RecurrencePattern>,
    start: Option<Day>,
    terminates: Termination,
    data_range: Option<DataRange>,
    data_window: bool,
    format: flags::Format,
}

impl Config {
    fn emit(
        &self,
        pattern: &RecurrencePattern,
        occurrences: impl Iterator<Item = Result<Date, ScheduleError>>,
    ) -> anyhow::Result<()> {
        let mut wtr = std::io::stdout().lock();
        for result in occurrences {
            let date = result?;
            write!(wtr, "{}", self.format.format(date)?)?;
            if self.data_window {
                let (first, last) = pattern.data_window(date)?;
                write!(
                    wtr,
                    "\t{}\t{}",
                    self.format.format(first)?,
                    self.format.format(last)?,
                )?;
            }
            writeln!(wtr)?;
        }
        Ok(())
    }
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
                if self.start.is_none() {
                    self.start = Some(v.parse()?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('u') | Long("until") => {
                anyhow::ensure!(
                    !matches!(self.terminates, Termination::Count(_)),
                    "the -u/--until flag cannot be used with -c/--count",
                );
                self.terminates =
                    Termination::Until(args::parse_bytes(p, "-u/--until")?);
            }
            Short('c') | Long("count") => {
                anyhow::ensure!(
                    !matches!(self.terminates, Termination::Until(_)),
                    "the -c/--count flag cannot be used with -u/--until",
                );
                self.terminates =
                    Termination::Count(args::parse(p, "-c/--count")?);
            }
            Short('r') | Long("data-range") => {
                self.data_range = Some(args::parse(p, "-r/--data-range")?);
            }
            Long("data-window") => {
                self.data_window = true;
            }
            Short('f') | Long("format") => {
                self.format = args::parse(p, "-f/--format")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const DATA_WINDOW: Usage = Usage::flag(
            "--data-window",
            "Print the days of data covered by each occurrence.",
            r#"
Print the days of data covered by each occurrence.

Each date is followed by the first and last day of its data window, separated
by tabs. The window is the `-r/--data-range` days immediately preceding the
occurrence, so the last day is always the day before the occurrence.
"#,
        );

        &[
            RecurrencePattern::ARG,
            Day::ARG,
            flags::Count::USAGE,
            Termination::USAGE_UNTIL,
            DataRange::USAGE,
            DATA_WINDOW,
            flags::Format::USAGE,
        ]
    }
}

/// When a sequence of occurrences stops.
#[derive(Clone, Copy, Debug, Default)]
enum Termination {
    /// Stop after `flags::Count::default()` occurrences.
    #[default]
    Unset,
    Count(flags::Count),
    Until(Day),
}

impl Termination {
    const USAGE_UNTIL: Usage = Usage::flag(
        "-u/--until <date>",
        "Stop generating dates after this date (inclusive).",
        r#"
Stop generating dates after this date (inclusive).

This accepts the same formats as `<date>`.

This flag conflicts with `-c/--count`. That is, one or the other can be set
(or neither), but not both.
"#,
    );
}
