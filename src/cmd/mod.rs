mod cal;
mod rule;

const USAGE: &'static str = "\
A calculator for recurring weekly, monthly and quarterly schedules.

USAGE:
    cadence <command> ...

COMMANDS:
    cal   Month grids for calendar display
    rule  Build, describe and expand recurring schedules
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "cal" => cal::run(p),
        "rule" => rule::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
