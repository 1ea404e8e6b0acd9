use std::fmt;

use thiserror::Error;

use crate::schema::{Column, ColumnType};

/// Storage type of one entry in the generated `DB2MetaField` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTag {
    Byte,
    Short,
    Int,
    Long,
    StringNotLocalized,
    String,
    Float,
}

#[derive(Debug, PartialEq, Error)]
pub enum FieldEncodeError {
    #[error("FieldEncodeError - invalid field size {bit_size} for int column '{column}'")]
    InvalidFieldSize { column: String, bit_size: u32 },
    #[error("FieldEncodeError - unable to construct a field type from '{0}'")]
    UnsupportedColumnType(String),
}

impl StorageTag {
    pub fn for_column(column: &Column) -> Result<Self, FieldEncodeError> {
        match column.column_type() {
            ColumnType::Int => match *column.field().bit_size() {
                8 => Ok(StorageTag::Byte),
                16 => Ok(StorageTag::Short),
                32 => Ok(StorageTag::Int),
                64 => Ok(StorageTag::Long),
                bit_size => Err(FieldEncodeError::InvalidFieldSize {
                    column: column.name().clone(),
                    bit_size,
                }),
            },
            ColumnType::String => Ok(StorageTag::StringNotLocalized),
            ColumnType::LocString => Ok(StorageTag::String),
            ColumnType::Float => Ok(StorageTag::Float),
            ColumnType::Other(name) => Err(FieldEncodeError::UnsupportedColumnType(name.clone())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageTag::Byte => "FT_BYTE",
            StorageTag::Short => "FT_SHORT",
            StorageTag::Int => "FT_INT",
            StorageTag::Long => "FT_LONG",
            StorageTag::StringNotLocalized => "FT_STRING_NOT_LOCALIZED",
            StorageTag::String => "FT_STRING",
            StorageTag::Float => "FT_FLOAT",
        }
    }

    // strings carry no sign in the meta format, a declared signed flag is dropped on purpose
    fn supports_sign(&self) -> bool {
        !matches!(self, StorageTag::StringNotLocalized | StorageTag::String)
    }
}

impl fmt::Display for StorageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders one column as a `{ <tag>, <count>, <signed> },` field descriptor.
pub fn encode_field(column: &Column) -> Result<String, FieldEncodeError> {
    let tag = StorageTag::for_column(column)?;
    let field = column.field();

    let count = match *field.array_length() {
        0 => 1,
        length => length,
    };
    let signed = tag.supports_sign() && *field.is_signed();

    Ok(format!("{{ {}, {}, {} }},", tag, count, signed))
}
