use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use clap::{ArgAction, ArgMatches, Command, arg};
use console::Style;
use gribview::{GribFile, ParameterView};

use crate::cli;

pub fn cli() -> Command {
    Command::new(crate::cli::module_component!())
        .about("List parameters contained in the data")
        .arg(
            arg!(-d --detail "Decode each parameter and show its dates and grid")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(<FILE> "Target file name (or a single dash (`-`) for standard input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

pub fn exec(args: &ArgMatches) -> anyhow::Result<()> {
    let file_name = args.get_one::<PathBuf>("FILE").unwrap();
    let grib = cli::grib(file_name)?;

    let mode = if args.get_flag("detail") {
        let views = grib
            .entries()
            .iter()
            .map(|entry| {
                grib.select_nth(entry.position)
                    .inspect_err(|e| {
                        tracing::warn!(parameter = %entry, error = %e, "failed to decode")
                    })
                    .ok()
            })
            .collect();
        ListViewMode::Detail(views)
    } else {
        ListViewMode::OneLine
    };
    let view = ListView::new(&grib, mode);
    cli::display_in_pager(view);

    Ok(())
}

struct ListView<'g> {
    grib: &'g GribFile,
    mode: ListViewMode,
}

impl<'g> ListView<'g> {
    fn new(grib: &'g GribFile, mode: ListViewMode) -> Self {
        Self { grib, mode }
    }
}

impl cli::PredictableNumLines for ListView<'_> {
    fn num_lines(&self) -> usize {
        let header_height = 1;
        header_height + self.grib.len()
    }
}

impl Display for ListView<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let style = Style::new().bold();
        match &self.mode {
            ListViewMode::OneLine => {
                let header = format!("{:>8} │ {}", "id", "Parameter");
                writeln!(f, "{}", style.apply_to(header.trim_end()))?;

                for entry in self.grib.entries() {
                    let (message, submessage) = entry.message_index;
                    let id = format!("{message}.{submessage}");
                    writeln!(f, "{:>8} │ {}", id, entry.name)?;
                }
            }
            ListViewMode::Detail(views) => {
                let header = format!(
                    "{:>8} │ {:<52} {:>10} {:>19} │ {:>13} {:>8}",
                    "id", "Parameter", "Collected", "Forecast time", "grid (lat/lon)", "#masked",
                );
                writeln!(f, "{}", style.apply_to(header.trim_end()))?;

                for (entry, view) in self.grib.entries().iter().zip(views) {
                    let (message, submessage) = entry.message_index;
                    let id = format!("{message}.{submessage}");
                    let (collected, forecast, grid, masked) = match view {
                        Some(view) => {
                            let (rows, cols) = view.shape();
                            (
                                format_collected(view),
                                format_forecast(view),
                                format!("{rows}x{cols}"),
                                view.num_masked().to_string(),
                            )
                        }
                        None => ("-".to_owned(), "-".to_owned(), "-".to_owned(), "-".to_owned()),
                    };
                    writeln!(
                        f,
                        "{:>8} │ {:<52} {:>10} {:>19} │ {:>13} {:>8}",
                        id,
                        entry.name,
                        collected,
                        forecast,
                        grid,
                        masked,
                    )?;
                }
            }
        }

        Ok(())
    }
}

enum ListViewMode {
    OneLine,
    Detail(Vec<Option<ParameterView>>),
}

fn format_collected(view: &ParameterView) -> String {
    view.collected_at()
        .map(|date| date.to_string())
        .unwrap_or_else(|_| "-".to_owned())
}

fn format_forecast(view: &ParameterView) -> String {
    view.forecast_datetime()
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| "-".to_owned())
}
