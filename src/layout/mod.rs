pub mod field;

use derive_getters::Getters;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{layout::field::{FieldEncodeError, StorageTag, encode_field}, schema::Column};

/// Counter values written into the `DB2Meta` instance literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaCounters {
    pub field_count: usize,
    pub file_field_count: usize,
    pub index_field: i32,
    pub parent_index_field: i32,
}

#[derive(Debug, PartialEq, Error)]
pub enum LayoutError {
    #[error("LayoutError - non-inline identifier '{0}' is not the first column")]
    NonInlineIdentifierNotFirst(String),
    #[error("LayoutError - more than one relation column: '{0}' and '{1}'")]
    MultipleRelations(String, String),
    #[error("LayoutError - {0}")]
    InvalidField(#[from] FieldEncodeError),
}

/// Renders the column listing and the `<FileName>Meta` structure of one DB2 file.
///
/// Rendering never mutates the layout, so both operations can be called in any
/// order and any number of times with identical results.
#[derive(Debug, Clone, Getters)]
pub struct LayoutRenderer {
    file_name: String,
    layout_hash: String,
    file_data_id: i32,
    columns: Vec<Column>,
}

impl LayoutRenderer {
    const MIN_TYPE_WIDTH: usize = 6;
    const MIN_NAME_WIDTH: usize = 20;
    const INDENT: &'static str = "    ";
    // the meta format reserves an index field, it is never filled in here
    const NO_INDEX_FIELD: i32 = -1;

    pub fn new(file_name: &str, layout_hash: &str, columns: Vec<Column>) -> Self {
        Self {
            file_name: file_name.to_string(),
            layout_hash: layout_hash.to_string(),
            file_data_id: 0,
            columns,
        }
    }

    pub fn with_file_data_id(mut self, file_data_id: i32) -> Self {
        self.file_data_id = file_data_id;
        self
    }

    pub fn columns_file_path(&self) -> String {
        format!("{}.columns.txt", self.file_name)
    }

    pub fn meta_file_path(&self) -> String {
        format!("{}Meta.h", self.file_name)
    }

    /// Returns `(type_width, name_width)` used to align the column listing.
    pub fn padding(&self) -> (usize, usize) {
        let type_width = self.columns.iter()
            .map(|c| c.column_type().as_str().chars().count() + 1)
            .fold(Self::MIN_TYPE_WIDTH, usize::max);
        let name_width = self.columns.iter()
            .map(|c| c.name().chars().count() + 1)
            .fold(Self::MIN_NAME_WIDTH, usize::max);

        (type_width, name_width)
    }

    /// One `<type> <name>; // <comment>` line per column, newline terminated.
    #[instrument(name = "layout::render_column_block", level = "trace", skip(self), fields(file = %self.file_name))]
    pub fn render_column_block(&self) -> String {
        let (type_width, name_width) = self.padding();

        let mut lines = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let column_type = column.column_type().as_str();
            let name = format!("{};", column.name());
            let line = match column.comment() {
                // comments line up behind the widest possible declaration
                Some(comment) => format!(
                    "{:<type_width$} {:<width$}// {}",
                    column_type,
                    name,
                    comment,
                    width = type_width + name_width
                ),
                None => format!("{:<type_width$} {:<name_width$}", column_type, name),
            };
            lines.push(line);
        }

        lines.into_iter().map(|line| line + "\n").collect()
    }

    // The leading non-inline identifier is not a storage field.
    // Positions are still those of the full column list.
    fn stored_columns(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns.iter()
            .enumerate()
            .filter(|(position, column)| !(*position == 0 && column.field().is_non_inline_identifier()))
    }

    /// Relation columns among the stored fields.
    pub fn relation_count(&self) -> usize {
        self.stored_columns()
            .filter(|(_, column)| *column.field().is_relation())
            .count()
    }

    pub fn counters(&self) -> MetaCounters {
        let index_field = Self::NO_INDEX_FIELD;
        let mut parent_index_field = -1;
        let mut field_count = 0;
        let mut file_field_count = 0;

        for (position, column) in self.stored_columns() {
            field_count += 1;
            if *column.field().is_relation() {
                // last relation wins
                parent_index_field = position as i32 + if index_field == -1 { -1 } else { 0 };
            } else {
                file_field_count += 1;
            }
        }

        MetaCounters {
            field_count,
            file_field_count,
            index_field,
            parent_index_field,
        }
    }

    /// Renders the `<FileName>Meta` structure. Fails without output as soon as
    /// one stored column can't be encoded.
    #[instrument(name = "layout::render_metadata_block", level = "debug", skip(self), fields(file = %self.file_name), err)]
    pub fn render_metadata_block(&self) -> Result<String, FieldEncodeError> {
        let fields = self.stored_columns()
            .map(|(_, column)| encode_field(column))
            .collect::<Result<Vec<_>, _>>()?;

        let relations = self.relation_count();
        if relations > 1 {
            warn!(relations, "layout has more than one relation column, using the last one as parent index");
        }

        let counters = self.counters();
        debug!(
            field_count = counters.field_count,
            file_field_count = counters.file_field_count,
            index_field = counters.index_field,
            parent_index_field = counters.parent_index_field,
            "computed meta counters"
        );

        let indent = Self::INDENT;
        let mut lines = vec![
            format!("struct {}Meta", self.file_name),
            "{".to_string(),
            format!("{indent}static DB2Meta const* Instance()"),
            format!("{indent}{{"),
            format!("{indent}{indent}static constexpr DB2MetaField fields[{}] =", counters.field_count),
            format!("{indent}{indent}{{"),
        ];
        lines.extend(fields.iter().map(|field| format!("{indent}{indent}{indent}{field}")));
        lines.push(format!("{indent}{indent}}}"));
        lines.push(format!(
            "{indent}{indent}static constexpr DB2Meta instance({}, {}, {}, {}, 0x{}, fields, {});",
            self.file_data_id,
            counters.index_field,
            counters.field_count,
            counters.file_field_count,
            self.layout_hash,
            counters.parent_index_field
        ));
        lines.push(format!("{indent}{indent}return &instance;"));
        lines.push(format!("{indent}}}"));
        lines.push("};".to_string());

        Ok(lines.join("\n"))
    }

    /// Checks the layout invariants the meta format relies on. Rendering does
    /// not call this and stays permissive.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut relation: Option<&Column> = None;

        for (position, column) in self.columns.iter().enumerate() {
            if position > 0 && column.field().is_non_inline_identifier() {
                return Err(LayoutError::NonInlineIdentifierNotFirst(column.name().clone()));
            }

            if *column.field().is_relation() {
                if let Some(first) = relation {
                    return Err(LayoutError::MultipleRelations(first.name().clone(), column.name().clone()));
                }
                relation = Some(column);
            }

            StorageTag::for_column(column)?;
        }

        Ok(())
    }
}
