use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{layout::LayoutRenderer, store::{Store, StoreError}};

pub struct FileStore<'a> {
    base_path: &'a Path,
}

impl<'a> FileStore<'a> {
    pub fn new(base_path: &'a Path) -> Self {
        Self {
            base_path,
        }
    }

    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(self.base_path)?;

        let path = self.base_path.join(file_name);
        std::fs::write(&path, content)?;

        debug!(path = %path.display(), bytes = content.len(), "artifact written");
        Ok(path)
    }
}

impl<'a> Store for FileStore<'a> {
    #[instrument(name = "store::file::write_columns", level = "debug", skip(self, renderer), fields(file = %renderer.file_name()))]
    fn write_columns(&self, renderer: &LayoutRenderer) -> Result<PathBuf, StoreError> {
        self.write(&renderer.columns_file_path(), &renderer.render_column_block())
    }

    #[instrument(name = "store::file::write_meta", level = "debug", skip(self, renderer), fields(file = %renderer.file_name()))]
    fn write_meta(&self, renderer: &LayoutRenderer) -> Result<PathBuf, StoreError> {
        // nothing touches the disk unless the whole block renders
        let block = renderer.render_metadata_block()?;
        self.write(&renderer.meta_file_path(), &block)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::{layout::{LayoutRenderer, field::FieldEncodeError}, schema::{Column, ColumnType, FieldTrait}, store::{Store, StoreError, file_store::FileStore}};

    fn renderer(columns: Vec<Column>) -> LayoutRenderer {
        LayoutRenderer::new("Item", "ABCD", columns).with_file_data_id(5)
    }

    #[test]
    fn should_write_both_artifacts() {
        let base_dir = tempdir().unwrap();
        let store = FileStore::new(base_dir.path());
        let renderer = renderer(vec![
            Column::new("id", ColumnType::Int, FieldTrait::int(32, false).identifier().non_inline()),
            Column::new("name", ColumnType::String, FieldTrait::new()),
        ]);

        let (columns_path, meta_path) = store.write_all(&renderer).unwrap();

        assert_eq!(columns_path, base_dir.path().join("Item.columns.txt"));
        assert_eq!(meta_path, base_dir.path().join("ItemMeta.h"));
        assert_eq!(std::fs::read_to_string(columns_path).unwrap(), renderer.render_column_block());
        assert_eq!(std::fs::read_to_string(meta_path).unwrap(), renderer.render_metadata_block().unwrap());
    }

    #[test]
    fn should_create_missing_base_directory() {
        let base_dir = tempdir().unwrap();
        let nested = base_dir.path().join("generated").join("meta");
        let store = FileStore::new(&nested);

        let path = store.write_columns(&renderer(vec![
            Column::new("name", ColumnType::String, FieldTrait::new()),
        ])).unwrap();

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn should_not_write_anything_when_render_fails() {
        let base_dir = tempdir().unwrap();
        let store = FileStore::new(base_dir.path());
        let renderer = renderer(vec![
            Column::new("price", ColumnType::from("money"), FieldTrait::new()),
        ]);

        let result = store.write_all(&renderer);

        assert!(matches!(
            result,
            Err(StoreError::RenderError(FieldEncodeError::UnsupportedColumnType(name))) if name == "money"
        ));
        assert!(!base_dir.path().join("ItemMeta.h").exists());
        assert!(!base_dir.path().join("Item.columns.txt").exists());
    }
}
