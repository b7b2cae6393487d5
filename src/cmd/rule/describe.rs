use std::io::Write;

use crate::{
    args::{self, Usage, positional},
    pattern,
};

const USAGE: &'static str = r#"
Describe schedules in plain English.

Each schedule given is described on its own line. When no schedules are given
as arguments, they are read from stdin, one per line.

This command never fails on a bad schedule. Anything that can't be understood
as a schedule that fires on a particular day, including blank lines, is
described as "Does not repeat".

USAGE:
    cadence rule describe <pattern> ...

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Describe a few schedules:

        $ cadence rule describe 'FREQ=WEEKLY;BYDAY=FR' 'FREQ=MONTHLY;BYDAY=-1MO'
        Every Friday
        The last Monday of each month

    %snip-start%

    Describe a JSON record:

        $ cadence rule build quarterly 2024-07-25 --json | cadence rule describe
        The last Thursday of each quarter

    Schedules without an anchor day don't repeat on any particular day:

        $ cadence rule describe 'FREQ=MONTHLY'
        Does not repeat

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut patterns = positional::Arguments::default();
    args::configure(p, USAGE, &mut [&mut config, &mut patterns])?;

    let mut wtr = std::io::stdout().lock();
    patterns.try_map(|arg| {
        let description = if arg.is_blank() {
            pattern::describe(None)
        } else {
            pattern::describe_bytes(arg.raw())
        };
        writeln!(wtr, "{description}")?;
        Ok(true)
    })?;
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

    fn usage(&self) -> &[Usage] {
        const PATTERN: Usage = Usage::arg(
            "<pattern>",
            "A recurrence rule or a JSON record to describe.",
            r#"
A recurrence rule or a JSON record to describe.

This accepts the same formats as the `<pattern>` argument of other commands,
like `cadence rule next`. Unlike those commands, a schedule here doesn't need
to be valid.

When no schedules are given, they are read from stdin, one per line.
"#,
        );
        &[PATTERN]
    }
}
