use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Export the grid of a parameter as a comma-delimited table")
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(<PARAM> "Parameter name, or message index 'N.M' as shown by `list`"))
        .arg(
            arg!(<OUT_FILE> "Output file name (or a single dash (`-`) for standard output)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let param = args.get_one::<String>("PARAM").unwrap();
    let out_path = args.get_one::<PathBuf>("OUT_FILE").unwrap();

    let grib = cli::grib(file_name)?;
    let (_, view) = cli::select(&grib, param)?;
    if cli::is_dash(out_path) {
        view.export_to_writer(std::io::stdout().lock())?;
    } else {
        view.export(out_path)?;
    }
    Ok(())
}
