use std::path::PathBuf;

use clap::{ArgMatches, Command, arg};
use gribview::MASKED_CELL;

use crate::cli::{self, CliCoordinate};

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Print the value at a grid coordinate of a parameter")
        .long_about(
            "Print the value at a grid coordinate of a parameter.

Coordinates must match grid points of the parameter after rounding to 4
decimal places; there is no interpolation. Masked cells are printed as `--`.",
        )
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(<PARAM> "Parameter name, or message index 'N.M' as shown by `list`"))
        .arg(
            arg!(<LAT> "Latitude in degrees, e.g. `35.5`, `-10` or `10S`")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(CliCoordinate)),
        )
        .arg(
            arg!(<LON> "Longitude in degrees, e.g. `139.75`, `-75` or `75W`")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(CliCoordinate)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let param = args.get_one::<String>("PARAM").unwrap();
    let lat = args.get_one::<CliCoordinate>("LAT").unwrap().latitude()?;
    let lon = args.get_one::<CliCoordinate>("LON").unwrap().longitude()?;

    let grib = cli::grib(file_name)?;
    let (_, view) = cli::select(&grib, param)?;
    match view.value_at(lat, lon)? {
        Some(value) => println!("{value:?}"),
        None => println!("{MASKED_CELL}"),
    }
    Ok(())
}
