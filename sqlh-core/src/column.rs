use crate::{Result, SqlhError, Value};

/// Column name excluding a field from every statement.
pub const SKIPPED_NAME: &str = "-";
/// Column name of a placeholder field, only its key text reaches `CREATE TABLE`.
pub const PLACEHOLDER_NAME: &str = "_";

/// Metadata of one record field, produced by `#[derive(Entity)]`.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: &'static str,
    /// Explicit storage type, empty when it must be inferred from `value`.
    pub column_type: &'static str,
    /// Constraints and key declarations, written verbatim after the type.
    pub key: &'static str,
    /// Typed NULL of the field type.
    pub value: Value,
}

impl ColumnDef {
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    pub fn is_auto_increment(&self) -> bool {
        let key = self.key.to_ascii_lowercase();
        key.contains("autoincrement") || key.contains("auto_increment")
    }

    /// SQL type written in `CREATE TABLE`.
    pub fn storage_type(&self) -> Result<&'static str> {
        if !self.column_type.is_empty() {
            return Ok(self.column_type);
        }
        Ok(match self.value {
            Value::Int8(..) | Value::Int16(..) | Value::Int32(..) | Value::Int64(..) => "integer",
            Value::UInt8(..) => "tinyint",
            Value::UInt16(..) | Value::UInt32(..) | Value::UInt64(..) => "bigint",
            Value::Float32(..) | Value::Float64(..) => "double",
            Value::Boolean(..) => "bit",
            Value::Varchar(..) => "text",
            Value::Blob(..) => "blob",
            Value::Timestamp(..) => "timestamp",
            Value::Null => {
                return Err(SqlhError::UnsupportedFieldType {
                    column: self.name.into(),
                }
                .into());
            }
        })
    }
}
