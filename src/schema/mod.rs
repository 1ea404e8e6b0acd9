use derive_getters::Getters;

// Declared type of a DBD column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    String,
    LocString,
    Float,
    // unknown type names from the definition are kept for the column listing
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Int => "int",
            ColumnType::String => "string",
            ColumnType::LocString => "locstring",
            ColumnType::Float => "float",
            ColumnType::Other(name) => name,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        match name {
            "int" => ColumnType::Int,
            "string" => ColumnType::String,
            "locstring" => ColumnType::LocString,
            "float" => ColumnType::Float,
            other => ColumnType::Other(other.to_string()),
        }
    }
}

/// Storage attributes of a single column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct FieldTrait {
    bit_size: u32,           // 8/16/32/64, only read for int columns
    is_signed: bool,
    array_length: u32,       // 0 = scalar
    is_identifier: bool,
    is_non_inline: bool,
    is_relation: bool,
}

impl FieldTrait {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(bit_size: u32, is_signed: bool) -> Self {
        Self {
            bit_size,
            is_signed,
            ..Self::default()
        }
    }

    pub fn with_array_length(mut self, array_length: u32) -> Self {
        self.array_length = array_length;
        self
    }

    pub fn signed(mut self, is_signed: bool) -> Self {
        self.is_signed = is_signed;
        self
    }

    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    pub fn non_inline(mut self) -> Self {
        self.is_non_inline = true;
        self
    }

    pub fn relation(mut self) -> Self {
        self.is_relation = true;
        self
    }

    /// Identifier stored outside of the regular field layout.
    pub fn is_non_inline_identifier(&self) -> bool {
        self.is_identifier && self.is_non_inline
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    comment: Option<String>,
    field: FieldTrait,
}

impl Column {
    pub fn new(name: &str, column_type: ColumnType, field: FieldTrait) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            comment: None,
            field,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = if comment.is_empty() { None } else { Some(comment.to_string()) };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_known_column_types() {
        assert_eq!(ColumnType::from("int"), ColumnType::Int);
        assert_eq!(ColumnType::from("string"), ColumnType::String);
        assert_eq!(ColumnType::from("locstring"), ColumnType::LocString);
        assert_eq!(ColumnType::from("float"), ColumnType::Float);
    }

    #[test]
    fn should_keep_unknown_type_name() {
        let column_type = ColumnType::from("money");
        assert_eq!(column_type, ColumnType::Other("money".to_string()));
        assert_eq!(column_type.as_str(), "money");

        // case matters
        assert!(matches!(ColumnType::from("Int"), ColumnType::Other(_)));
    }

    #[test]
    fn should_treat_empty_comment_as_absent() {
        let column = Column::new("id", ColumnType::Int, FieldTrait::int(32, false)).with_comment("");
        assert!(column.comment().is_none());

        let column = column.with_comment("primary key");
        assert_eq!(column.comment().as_deref(), Some("primary key"));
    }

    #[test]
    fn should_detect_non_inline_identifier() {
        assert!(FieldTrait::int(32, false).identifier().non_inline().is_non_inline_identifier());
        assert!(!FieldTrait::int(32, false).identifier().is_non_inline_identifier());
        assert!(!FieldTrait::int(32, false).non_inline().is_non_inline_identifier());
    }
}
