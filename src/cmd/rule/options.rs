use std::io::Write;

use crate::{
    args::{self, Usage},
    day::Day,
    parse::OsStrExt,
    pattern,
};

const USAGE: &'static str = r#"
List the repeat choices to offer for a date.

Each choice is printed on its own line as a frequency and a label, separated
by a tab. The first choice is always `none`, which means the schedule does not
repeat.

When a date is given, each label describes the schedule that choosing it would
build for that date. Otherwise, the labels are generic. Unlike other commands,
a missing date does not mean today.

USAGE:
    cadence rule options [<date>]

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    List the choices for the fourth Friday of a month:

        $ cadence rule options 2024-07-26
        none	Does not repeat
        weekly	Every Friday
        monthly	The last Friday of each month
        quarterly	The last Friday of each quarter

    %snip-start%

    List the generic choices:

        $ cadence rule options
        none	Does not repeat
        weekly	Every week
        monthly	Every month
        quarterly	Every quarter

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    args::configure(p, USAGE, &mut [&mut config])?;

    let anchor = config.anchor.map(|day| day.get());
    let mut wtr = std::io::stdout().lock();
    for option in pattern::repeat_options(anchor) {
        if config.json {
            serde_json::to_writer(&mut wtr, &option)?;
            writeln!(wtr)?;
            continue;
        }
        let freq = option.frequency.map_or("none", |freq| freq.as_str());
        writeln!(wtr, "{freq}\t{label}", label = option.label)?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    anchor: Option<Day>,
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
                if self.anchor.is_none() {
                    self.anchor = Some(v.parse()?);
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
        const DATE: Usage = Usage::arg(
            "<date>",
            "The date a schedule would be anchored to.",
            r#"
The date a schedule would be anchored to.

This accepts the same formats as the `<date>` argument of other commands, like
`cadence rule build`. When absent, generic labels are printed.
"#,
        );
        const JSON: Usage = Usage::flag(
            "--json",
            "Print each choice as a JSON object.",
            r#"
Print each choice as a JSON object, one per line.

Each object has a `frequency` field, which is `null` for the choice that does
not repeat, and a `label` field.
"#,
        );
        &[DATE, JSON]
    }
}
