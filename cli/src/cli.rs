use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    str::FromStr,
    sync::LazyLock,
};

use gribview::{GribFile, ParameterEntry, ParameterView};
#[cfg(unix)]
use pager::Pager;
use regex::Regex;
#[cfg(unix)]
use which::which;

pub fn grib<P>(path: P) -> anyhow::Result<GribFile>
where
    P: AsRef<Path>,
{
    let grib = GribFile::open(path)?;
    Ok(grib)
}

/// Selects a parameter given either as its name or as its message index
/// `N.M`; a name selects the first record with that name.
pub(crate) fn select<'g>(
    grib: &'g GribFile,
    param: &str,
) -> anyhow::Result<(&'g ParameterEntry, ParameterView)> {
    let (entry, view) = match param.parse::<CliMessageIndex>() {
        Ok(CliMessageIndex(index)) => {
            let entry = grib
                .entries()
                .iter()
                .find(|e| e.message_index == index)
                .ok_or_else(|| anyhow::anyhow!("no such index: {}.{}", index.0, index.1))?;
            (entry, grib.select_nth(entry.position)?)
        }
        Err(_) => (grib.entry(param)?, grib.select(param)?),
    };
    tracing::debug!(parameter = %entry, "selected parameter");
    Ok((entry, view))
}

pub(crate) fn display_in_pager<V>(view: V)
where
    V: PredictableNumLines + std::fmt::Display,
{
    let user_attended = console::user_attended();

    let term = console::Term::stdout();
    let (height, _width) = term.size();
    if view.num_lines() > height.into() {
        start_pager();
    }

    if user_attended {
        console::set_colors_enabled(true);
    }

    print!("{view}");
}

pub(crate) trait PredictableNumLines {
    fn num_lines(&self) -> usize;
}

#[cfg(unix)]
fn start_pager() {
    if which("less").is_ok() {
        Pager::with_pager("less -R").setup();
    } else {
        Pager::new().setup();
    }
}

#[cfg(not(unix))]
fn start_pager() {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliMessageIndex(pub(crate) (usize, usize));

impl FromStr for CliMessageIndex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
            Regex::new(
                r"(?x)      # insignificant whitespace mode
                ^
                ([0-9]+)    # message index
                \.         # separator
                ([0-9]+)    # submessage index
                $",
            )
            .ok()
        });
        let cap = RE.as_ref().and_then(|re| re.captures(s));
        let index = cap.and_then(|cap| {
            let message_index = cap.get(1)?.as_str().parse::<usize>().ok()?;
            let submessage_index = cap.get(2)?.as_str().parse::<usize>().ok()?;
            Some((message_index, submessage_index))
        });
        index.map(Self).ok_or_else(|| {
            anyhow::anyhow!(
                "message index must be specified as 'N.M' where N and M are both integers"
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hemisphere {
    North,
    South,
    East,
    West,
}

/// A coordinate in degrees given as a signed decimal number, optionally
/// followed by a hemisphere letter (`10.5N`, `20S`, `140.25E`, `-75W`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CliCoordinate {
    degrees: f64,
    hemisphere: Option<Hemisphere>,
}

impl CliCoordinate {
    pub(crate) fn latitude(&self) -> anyhow::Result<f64> {
        match self.hemisphere {
            None | Some(Hemisphere::North) => Ok(self.degrees),
            Some(Hemisphere::South) => Ok(-self.degrees),
            Some(_) => anyhow::bail!("latitude must be suffixed with 'N' or 'S'"),
        }
    }

    pub(crate) fn longitude(&self) -> anyhow::Result<f64> {
        match self.hemisphere {
            None | Some(Hemisphere::East) => Ok(self.degrees),
            Some(Hemisphere::West) => Ok(-self.degrees),
            Some(_) => anyhow::bail!("longitude must be suffixed with 'E' or 'W'"),
        }
    }
}

impl FromStr for CliCoordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
            Regex::new(
                r"(?x)                          # insignificant whitespace mode
                ^
                ([+-]?[0-9]+(?:\.[0-9]*)?)      # degrees
                ([NSEWnsew])?                   # hemisphere
                $",
            )
            .ok()
        });
        let cap = RE
            .as_ref()
            .and_then(|re| re.captures(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "coordinate must be a decimal number of degrees, optionally followed by N, S, E or W"
                )
            })?;
        let degrees = cap
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .parse::<f64>()?;
        let hemisphere = match cap.get(2).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
            Some("N") => Some(Hemisphere::North),
            Some("S") => Some(Hemisphere::South),
            Some("E") => Some(Hemisphere::East),
            Some("W") => Some(Hemisphere::West),
            _ => None,
        };
        if hemisphere.is_some() && degrees.is_sign_negative() {
            anyhow::bail!("coordinate with a hemisphere letter must not be negative");
        }
        Ok(Self {
            degrees,
            hemisphere,
        })
    }
}

pub(crate) enum WriteStream {
    File(BufWriter<std::fs::File>),
    Stdout(io::Stdout),
}

impl WriteStream {
    pub(crate) fn new<P>(out_path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let stream = if is_dash(&out_path) {
            Self::Stdout(io::stdout())
        } else {
            let f = File::create(out_path)?;
            let f = BufWriter::new(f);
            Self::File(f)
        };
        Ok(stream)
    }
}

impl Write for WriteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.write(buf),
            Self::Stdout(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(file) => file.flush(),
            Self::Stdout(stdout) => stdout.flush(),
        }
    }
}

pub(crate) fn is_dash<P: AsRef<Path>>(path: P) -> bool {
    matches!(path.as_ref().to_str(), Some("-"))
}

macro_rules! module_component {
    () => {
        module_path!().split("::").last().unwrap_or("")
    };
}
pub(crate) use module_component;
