pub mod file_store;

use std::path::PathBuf;

use thiserror::Error;

use crate::layout::{LayoutRenderer, field::FieldEncodeError};

// Sink for the rendered artifacts of one layout
pub trait Store {
    fn write_columns(&self, renderer: &LayoutRenderer) -> Result<PathBuf, StoreError>;
    fn write_meta(&self, renderer: &LayoutRenderer) -> Result<PathBuf, StoreError>;

    /// Writes the meta structure first, so an unencodable layout leaves no column listing behind.
    fn write_all(&self, renderer: &LayoutRenderer) -> Result<(PathBuf, PathBuf), StoreError> {
        let meta_path = self.write_meta(renderer)?;
        let columns_path = self.write_columns(renderer)?;
        Ok((columns_path, meta_path))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("StoreError - I/O Error: {0}")]
    IoError(String),
    #[error("StoreError - Render Error: {0}")]
    RenderError(FieldEncodeError),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err.to_string())
    }
}

impl From<FieldEncodeError> for StoreError {
    fn from(err: FieldEncodeError) -> Self {
        StoreError::RenderError(err)
    }
}
