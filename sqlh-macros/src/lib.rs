mod composite;
mod decode_column;
mod decode_table;
mod entity;

use composite::composite;
use decode_table::decode_table;
use entity::entity;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Map a struct with named fields to a table.
///
/// Field attributes, all optional:
/// - `#[sqlh(name = "column")]`: column name, defaults to the lower cased field name. `"-"` skips
///   the field, `"_"` makes it a placeholder whose `key` is written as a table constraint.
/// - `#[sqlh(type = "varchar(64)")]`: storage type, inferred from the field type otherwise.
/// - `#[sqlh(key = "not null primary key autoincrement")]`: constraints written after the type.
/// - `#[sqlh(table = "name")]`: table name, also accepted on the struct itself.
#[proc_macro_derive(Entity, attributes(sqlh))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    match decode_table(&item) {
        Ok(table) => entity(&item, table),
        Err(e) => e.to_compile_error(),
    }
    .into()
}

/// Result shape made of several `Selectable` components, one per joined table.
///
/// The primary component is the first field unless one is marked `#[sqlh(primary)]`, its table
/// is the one selected from. Values are laid out primary first, then the other components in
/// declaration order.
#[proc_macro_derive(Composite, attributes(sqlh))]
pub fn derive_composite(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);
    composite(&item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
