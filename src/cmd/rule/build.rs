use std::io::Write;

use anyhow::Context;

use crate::{
    args::{self, Usage},
    day::Day,
    parse::OsStrExt,
    pattern::{DataRange, RecurrencePattern},
    rule::Frequency,
};

const USAGE: &'static str = r#"
Build a recurring schedule from a frequency and an anchor date.

The schedule fires on the anchor date's weekday. For monthly and quarterly
schedules, it also fires on the same occurrence of that weekday within the
month. For example, an anchor date on the second Monday of a month builds a
schedule for the second Monday of each month. Anchor dates after the 21st of
a month always build a schedule for the last such weekday of the month.

When no anchor date is given, the schedule only records its frequency. No
concrete dates can be computed from such a schedule.

The schedule is printed as a recurrence rule, or with `--json`, as a record
suitable for storage.

USAGE:
    cadence rule build <frequency> [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Build a schedule for the third Friday of each month:

        $ cadence rule build monthly 2024-07-19
        FREQ=MONTHLY;BYDAY=3FR

    %snip-start%

    Build a schedule for every week, anchored on next Tuesday:

        $ cadence rule build weekly 'next tue'
        FREQ=WEEKLY;BYDAY=TU

    Build a quarterly schedule covering the previous 90 days of data, as a
    JSON record:

        $ cadence rule build quarterly 2024-07-25 -r 90 --json
        {"rrule":"FREQ=MONTHLY;BYMONTH=1,4,7,10;BYDAY=-1TH","frequency":"quarterly","dataRangeDays":90}

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let freq = config.freq.context("missing required <frequency>")?;
    let anchor = config.anchor.map(|day| day.get());
    let pattern = RecurrencePattern::build(freq, anchor)
        .with_data_range(config.data_range);
    log::debug!(
        "built {freq} schedule `{pattern}` covering {days} days of data",
        days = pattern.data_range(),
    );

    let mut wtr = std::io::stdout().lock();
    if config.json {
        serde_json::to_writer(&mut wtr, &pattern.to_record())?;
        writeln!(wtr)?;
    } else {
        writeln!(wtr, "{pattern}")?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    freq: Option<Frequency>,
    anchor: Option<Day>,
    data_range: DataRange,
    json: bool,
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
                if self.freq.is_none() {
                    self.freq = Some(v.to_str()?.parse()?);
                    return Ok(true);
                }
                if self.anchor.is_none() {
                    self.anchor = Some(v.parse()?);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('r') | Long("data-range") => {
                self.data_range = args::parse(p, "-r/--data-range")?;
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
            "Print the schedule as a JSON record.",
            r#"
Print the schedule as a JSON record.

The record has three fields: `rrule` (the recurrence rule), `frequency` (one of
`weekly`, `monthly` or `quarterly`) and `dataRangeDays`. Every command that
accepts a `<pattern>` also accepts a record in this format.
"#,
        );

        &[Frequency::USAGE, Day::ARG, DataRange::USAGE, JSON]
    }
}
