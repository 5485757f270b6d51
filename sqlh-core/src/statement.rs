//! One function per statement kind, writing with [`GenericSqlWriter`].
//!
//! Drivers with their own dialect call the [`SqlWriter`] methods directly.

use crate::{
    ColumnDef, Direction, Entity, GenericSqlWriter, Result, Row, SelectSpec, Selectable, SqlWriter,
};

pub fn resolve_table_name<S: Selectable>() -> &'static str {
    S::table_name()
}

pub fn resolve_fields<S: Selectable>(include_auto_increment: bool) -> Vec<&'static ColumnDef> {
    S::fields(include_auto_increment)
}

pub fn build_create_table<E: Entity>() -> Result<String> {
    let mut out = String::with_capacity(256);
    GenericSqlWriter::new().write_create_table::<E>(&mut out)?;
    Ok(out)
}

pub fn build_insert<E: Entity>() -> Result<String> {
    let mut out = String::with_capacity(128);
    GenericSqlWriter::new().write_insert::<E>(&mut out);
    Ok(out)
}

pub fn build_update<E: Entity>(wheres: &[&str]) -> Result<String> {
    let mut out = String::with_capacity(128);
    GenericSqlWriter::new().write_update::<E>(&mut out, wheres)?;
    Ok(out)
}

pub fn build_select<S: Selectable>(spec: &SelectSpec) -> Result<String> {
    let mut out = String::with_capacity(256);
    GenericSqlWriter::new().write_select::<S>(&mut out, spec);
    Ok(out)
}

pub fn build_count<S: Selectable>(spec: &SelectSpec) -> Result<String> {
    let mut out = String::with_capacity(128);
    GenericSqlWriter::new().write_count::<S>(&mut out, spec);
    Ok(out)
}

pub fn build_delete<E: Entity>(wheres: &[&str]) -> Result<String> {
    let mut out = String::with_capacity(64);
    GenericSqlWriter::new().write_delete::<E>(&mut out, wheres);
    Ok(out)
}

pub fn to_args<E: Entity>(record: &E, direction: Direction) -> Row {
    record.to_args(direction)
}

pub fn apply_args<S: Selectable>(record: &mut S, args: Row) -> Result<()> {
    record.apply_args(args)
}
