pub mod layout;
pub mod schema;
pub mod store;

pub use layout::{LayoutError, LayoutRenderer, MetaCounters};
pub use layout::field::{FieldEncodeError, StorageTag, encode_field};
pub use schema::{Column, ColumnType, FieldTrait};
