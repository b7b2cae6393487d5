mod grid;
mod weekdays;

const USAGE: &'static str = "\
Commands for laying out calendars.

USAGE:
    cadence cal <command> ...

COMMANDS:
    grid      Print the six week grid for a month
    weekdays  Print the weekday labels heading each grid column
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "grid" => grid::run(p),
        "weekdays" => weekdays::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
