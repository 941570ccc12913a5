use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::{ArgMatches, Command, arg, builder::PossibleValuesParser};
use gribview::{
    ColorBarOrientation, RenderOptions,
    render::{MAX_SIZE, MIN_SIZE},
};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Plot a parameter on a Miller cylindrical map as a PNG image")
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(<PARAM> "Parameter name, or message index 'N.M' as shown by `list`"))
        .arg(
            arg!(<OUT_FILE> "Output PNG file name (or a single dash (`-`) for standard output)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-o --orientation <ORIENTATION> "Orientation of the colour bar")
                .value_parser(PossibleValuesParser::new(["horizontal", "vertical"]))
                .default_value("horizontal"),
        )
        .arg(
            arg!(--width <PIXELS> "Image width")
                .value_parser(clap::value_parser!(u32).range(image_size_range()))
                .default_value("800"),
        )
        .arg(
            arg!(--height <PIXELS> "Image height")
                .value_parser(clap::value_parser!(u32).range(image_size_range()))
                .default_value("600"),
        )
}

fn image_size_range() -> std::ops::RangeInclusive<i64> {
    i64::from(MIN_SIZE)..=i64::from(MAX_SIZE)
}

pub fn exec(args: &ArgMatches) -> Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let param = args.get_one::<String>("PARAM").unwrap();
    let out_path = args.get_one::<PathBuf>("OUT_FILE").unwrap();
    let orientation = args
        .get_one::<String>("orientation")
        .unwrap()
        .parse::<ColorBarOrientation>()
        .map_err(anyhow::Error::msg)?;
    let options = RenderOptions {
        width: *args.get_one::<u32>("width").unwrap(),
        height: *args.get_one::<u32>("height").unwrap(),
        orientation,
    };

    let grib = cli::grib(file_name)?;
    let (_, view) = cli::select(&grib, param)?;
    let map = view.render(&options)?;
    let png = map.to_png()?;

    let mut stream = cli::WriteStream::new(out_path)?;
    stream.write_all(&png)?;
    stream.flush()?;
    Ok(())
}
