use std::path::Path;

use crate::{
    error::{GribViewError, NotFoundError},
    render::{RenderOptions, RenderedMap},
    source::GribFile,
    view::ParameterView,
};

/// State an interactive front end keeps between user events: the open file
/// and the currently selected parameter.
///
/// Opening a file clears the selection. A failed `open` or `select` leaves
/// the previous state untouched.
#[derive(Default)]
pub struct Session {
    file: Option<GribFile>,
    selected: Option<ParameterView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<P>(&mut self, path: P) -> Result<&GribFile, GribViewError>
    where
        P: AsRef<Path>,
    {
        let file = GribFile::open(path)?;
        self.selected = None;
        Ok(self.file.insert(file))
    }

    /// Replaces the open file with one that has already been opened, e.g.
    /// with [`GribFile::from_bytes`] for data received over a channel other
    /// than the file system.
    pub fn set_file(&mut self, file: GribFile) {
        self.selected = None;
        self.file = Some(file);
    }

    pub fn file(&self) -> Result<&GribFile, GribViewError> {
        self.file.as_ref().ok_or(NotFoundError::NoFileOpen.into())
    }

    pub fn parameter_names(&self) -> Result<Vec<String>, GribViewError> {
        Ok(self.file()?.parameter_names())
    }

    pub fn select(&mut self, name: &str) -> Result<&ParameterView, GribViewError> {
        let view = self.file()?.select(name)?;
        Ok(self.selected.insert(view))
    }

    pub fn select_nth(&mut self, position: usize) -> Result<&ParameterView, GribViewError> {
        let view = self.file()?.select_nth(position)?;
        Ok(self.selected.insert(view))
    }

    pub fn selected(&self) -> Result<&ParameterView, GribViewError> {
        self.selected
            .as_ref()
            .ok_or(NotFoundError::NoParameterSelected.into())
    }

    pub fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f32>, GribViewError> {
        self.selected()?.value_at(lat, lon)
    }

    pub fn export<P>(&self, path: P) -> Result<(), GribViewError>
    where
        P: AsRef<Path>,
    {
        self.selected()?.export(path)
    }

    pub fn render(&self, options: &RenderOptions) -> Result<RenderedMap, GribViewError> {
        self.selected()?.render(options)
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.file = None;
    }
}
