use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgMatches, Command, arg};
use gribview::{ParameterEntry, ParameterView};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("Show dates, axes and value range of a parameter")
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(<PARAM> "Parameter name, or message index 'N.M' as shown by `list`"))
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let param = args.get_one::<String>("PARAM").unwrap();
    let grib = cli::grib(file_name)?;
    let (entry, view) = cli::select(&grib, param)?;

    let collected_at = view.collected_at()?;
    let forecast_datetime = view.forecast_datetime()?;
    print!(
        "{}",
        InfoView {
            entry,
            view: &view,
            collected_at: collected_at.to_string(),
            forecast: forecast_datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    );
    Ok(())
}

struct InfoView<'i> {
    entry: &'i ParameterEntry,
    view: &'i ParameterView,
    collected_at: String,
    forecast: String,
}

impl Display for InfoView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            entry,
            view,
            collected_at,
            forecast,
        } = self;
        let (message, submessage) = entry.message_index;
        let (rows, cols) = view.shape();
        let extent = view.extent();
        let value_range = view
            .value_range()
            .map(|(min, max)| format!("{min:?} - {max:?}"))
            .unwrap_or_else(|| "all cells masked".to_owned());
        write!(
            f,
            "\
Parameter:          {}
Message index:      {}.{}
Collected at:       {}
Forecast time:      {} ({:+} hours)
Grid:               {} latitudes x {} longitudes ({} masked)
Latitude range:     {:?} - {:?}
Longitude range:    {:?} - {:?}
Value range:        {}
",
            view.name(),
            message,
            submessage,
            collected_at,
            forecast,
            view.forecast_offset_hours(),
            rows,
            cols,
            view.num_masked(),
            extent.lat_min,
            extent.lat_max,
            extent.lon_min,
            extent.lon_max,
            value_range,
        )
    }
}
