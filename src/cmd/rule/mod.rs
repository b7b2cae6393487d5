mod build;
mod describe;
mod next;
mod options;
mod ranges;
mod seq;

const USAGE: &'static str = "\
Commands for working with recurring schedules.

USAGE:
    cadence rule <command> ...

COMMANDS:
    build     Build a schedule from a frequency and an anchor date
    describe  Describe a schedule in plain English
    next      Find the next date a schedule fires on
    options   List the repeat choices for a date
    ranges    List the common data ranges
    seq       Generate the dates a schedule fires on
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "build" => build::run(p),
        "describe" => describe::run(p),
        "next" => next::run(p),
        "options" => options::run(p),
        "ranges" => ranges::run(p),
        "seq" => seq::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
