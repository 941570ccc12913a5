use std::{
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Display, Formatter},
    fs::File,
    io::{self, BufReader, Cursor, Read},
    path::{Path, PathBuf},
    rc::Rc,
};

use grib::{Grib2, MessageIndex, SeekableGrib2Reader};

use crate::{
    decode,
    error::{FormatError, GribViewError, NotFoundError},
    record::Record,
    view::ParameterView,
};

pub(crate) type GribReader = SeekableGrib2Reader<Cursor<Vec<u8>>>;

const GRIB_MAGIC: &[u8] = b"GRIB";

/// An entry of the parameter listing of a [`GribFile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterEntry {
    /// Position of the submessage in file order.
    pub position: usize,
    /// Message and submessage index of the submessage in the data.
    pub message_index: MessageIndex,
    pub name: String,
}

impl Display for ParameterEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (message, submessage) = self.message_index;
        write!(f, "{message}.{submessage} {}", self.name)
    }
}

/// An open GRIB source.
///
/// The file is read once when it is opened. Each parameter record is decoded
/// the first time it is selected and cached for as long as the `GribFile`
/// lives, so repeated selections of the same parameter do not decode it
/// again.
pub struct GribFile {
    path: PathBuf,
    grib: Grib2<GribReader>,
    entries: Vec<ParameterEntry>,
    cache: RefCell<HashMap<usize, Rc<Record>>>,
}

impl GribFile {
    /// Opens and indexes a GRIB file. A path consisting of a single dash
    /// (`-`) reads standard input.
    ///
    /// # Errors
    ///
    /// [`NotFoundError::File`] if the path does not exist, and a
    /// [`FormatError`] if the data cannot be read as GRIB or holds no
    /// submessages.
    pub fn open<P>(path: P) -> Result<Self, GribViewError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut buf = Vec::with_capacity(4096);
        if is_dash(path) {
            io::stdin().read_to_end(&mut buf)?;
        } else {
            let f = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => GribViewError::from(NotFoundError::File(path.into())),
                _ => GribViewError::from(e),
            })?;
            BufReader::new(f).read_to_end(&mut buf)?;
        }
        tracing::debug!(path = %path.display(), size = buf.len(), "read GRIB source");
        Self::from_bytes(path, buf)
    }

    /// Indexes GRIB data already held in memory; `path` is kept for display
    /// only.
    pub fn from_bytes<P>(path: P, buf: Vec<u8>) -> Result<Self, GribViewError>
    where
        P: AsRef<Path>,
    {
        if buf.is_empty() {
            return Err(FormatError::Empty.into());
        }
        if !buf.starts_with(GRIB_MAGIC) {
            return Err(FormatError::NotGrib.into());
        }
        let grib = grib::from_reader(Cursor::new(buf)).map_err(FormatError::from)?;
        if grib.is_empty() {
            return Err(FormatError::NotGrib.into());
        }

        let entries = grib
            .iter()
            .enumerate()
            .map(|(position, (message_index, submessage))| ParameterEntry {
                position,
                message_index,
                name: decode::parameter_name(&submessage),
            })
            .collect::<Vec<_>>();
        tracing::debug!(num_parameters = entries.len(), "indexed GRIB source");

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            grib,
            entries,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of parameter records in the file.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the file holds no parameter records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    /// Returns the name of every parameter record in file order, duplicates
    /// included.
    pub fn parameter_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Selects the first parameter record whose name equals `name`.
    ///
    /// Names are not unique within a file (the same parameter is often
    /// stored for several levels or forecast times). The first record in
    /// file order always wins; use [`GribFile::select_nth`] to reach the
    /// others.
    ///
    /// # Errors
    ///
    /// [`NotFoundError::Parameter`] if no record has that name.
    pub fn select(&self, name: &str) -> Result<ParameterView, GribViewError> {
        let position = self.entry(name)?.position;
        self.view_at(position)
    }

    /// Returns the listing entry of the record [`GribFile::select`] picks for
    /// `name`.
    pub fn entry(&self, name: &str) -> Result<&ParameterEntry, GribViewError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| NotFoundError::Parameter(name.to_owned()))?;
        Ok(entry)
    }

    /// Selects the parameter record at `position` in file order.
    pub fn select_nth(&self, position: usize) -> Result<ParameterView, GribViewError> {
        if position >= self.entries.len() {
            return Err(NotFoundError::Parameter(format!("#{position}")).into());
        }
        self.view_at(position)
    }

    fn view_at(&self, position: usize) -> Result<ParameterView, GribViewError> {
        if let Some(record) = self.cache.borrow().get(&position) {
            return Ok(ParameterView::new(Rc::clone(record)));
        }

        let entry = &self.entries[position];
        let (_, submessage) = self.grib.iter().nth(position).ok_or_else(|| {
            FormatError::Decode(format!("submessage #{position} is not available"))
        })?;
        let record = Rc::new(decode::decode_record(&entry.name, submessage)?);
        self.cache.borrow_mut().insert(position, Rc::clone(&record));
        Ok(ParameterView::new(record))
    }
}

fn is_dash<P: AsRef<Path>>(path: P) -> bool {
    matches!(path.as_ref().to_str(), Some("-"))
}
