use crate::{AsValue, ColumnDef, Context, Result, SqlhError, Value};

pub type Row = Vec<Value>;

/// Direction of an argument list.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Values bound to `INSERT` and `UPDATE`, auto increment columns are skipped.
    #[default]
    Write,
    /// Slots filled by a `SELECT`, one per column.
    Read,
}

/// Shape that can be read back from a `SELECT`.
///
/// Implemented by `#[derive(Entity)]` for single tables and by `#[derive(Composite)]` for joined
/// results. The order of [`Selectable::slots`] is the order in which the statement writer lists
/// the columns, drivers rely on it positionally.
pub trait Selectable {
    /// Table the shape is selected from.
    fn table_name() -> &'static str;

    /// Columns selected from [`Selectable::table_name`], placeholders excluded.
    fn columns() -> &'static [&'static ColumnDef];

    /// Total number of values consumed by [`Selectable::apply_args`].
    fn slot_count() -> usize {
        Self::columns().len()
    }

    /// Resolved columns, auto increment ones are dropped unless requested.
    fn fields(include_auto_increment: bool) -> Vec<&'static ColumnDef> {
        Self::columns()
            .iter()
            .filter(|c| include_auto_increment || !c.is_auto_increment())
            .copied()
            .collect()
    }

    /// Current values in read order, the scratch slots a driver scans into.
    fn slots(&self) -> Row;

    /// Write a scanned row back into the fields, coercing each value to the field type.
    fn apply_args(&mut self, row: Row) -> Result<()>;
}

/// Record mapped to a single table.
pub trait Entity: Selectable {
    /// Every annotated field in declaration order, placeholders included.
    fn column_defs() -> &'static [ColumnDef];

    /// Positional arguments of the record.
    ///
    /// `Direction::Write` follows `fields(false)`, `Direction::Read` follows `fields(true)`.
    fn to_args(&self, direction: Direction) -> Row {
        let slots = self.slots();
        match direction {
            Direction::Read => slots,
            Direction::Write => Self::columns()
                .iter()
                .zip(slots)
                .filter_map(|(c, v)| if c.is_auto_increment() { None } else { Some(v) })
                .collect(),
        }
    }
}

pub fn check_column_count(expected: usize, row: &Row) -> Result<()> {
    if row.len() != expected {
        return Err(SqlhError::ColumnCountMismatch {
            expected,
            found: row.len(),
        }
        .into());
    }
    Ok(())
}

/// Detach the first `count` values of `row`, leaving the rest in place.
pub fn take_front(row: &mut Row, count: usize) -> Row {
    let tail = row.split_off(count.min(row.len()));
    std::mem::replace(row, tail)
}

/// Decode the next value of a row into a field of type `T`.
pub fn decode_column<T: AsValue>(
    values: &mut impl Iterator<Item = Value>,
    column: &str,
) -> Result<T> {
    let value = values.next().unwrap_or_default();
    T::try_from_value(value).with_context(|| format!("While decoding column `{}`", column))
}

/// Copy the values produced by a driver into the scratch slots.
///
/// An untyped NULL takes the typed NULL of its slot.
pub fn scan_into(slots: &mut Row, row: Row) -> Result<()> {
    check_column_count(slots.len(), &row)?;
    for (slot, value) in slots.iter_mut().zip(row) {
        *slot = match value {
            Value::Null => slot.as_null(),
            v => v,
        };
    }
    Ok(())
}
