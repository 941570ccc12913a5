use clap::{ArgMatches, Command};

pub fn cli() -> Vec<Command> {
    vec![
        completions::cli(),
        export::cli(),
        info::cli(),
        list::cli(),
        lookup::cli(),
        plot::cli(),
    ]
}

pub fn dispatch(matches: ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("completions", args)) => completions::exec(args),
        Some(("export", args)) => export::exec(args),
        Some(("info", args)) => info::exec(args),
        Some(("list", args)) => list::exec(args),
        Some(("lookup", args)) => lookup::exec(args),
        Some(("plot", args)) => plot::exec(args),
        _ => unreachable!(),
    }
}

pub mod completions;
pub mod export;
pub mod info;
pub mod list;
pub mod lookup;
pub mod plot;
