use clap::{Command, crate_version};
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod commands;

const LOG_ENV_VAR: &str = "GRIBVIEW_LOG";

fn app() -> Command {
    Command::new(env!("CARGO_BIN_NAME"))
        .version(crate_version!())
        .about("Inspect parameters of GRIB data: list, look up, export and plot")
        .arg_required_else_help(true)
        .subcommands(commands::cli())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn real_main() -> anyhow::Result<()> {
    let matches = app().get_matches();
    init_logging();

    commands::dispatch(matches)
}

fn main() {
    if let Err(ref e) = real_main() {
        let red = console::Style::new().red();
        eprintln!("{}: {}", red.apply_to("error"), e);
        std::process::exit(1);
    }
}
