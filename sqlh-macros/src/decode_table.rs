use crate::decode_column::{ColumnMetadata, decode_column, unraw};
use sqlh_core::SqlhError;
use syn::{Attribute, Data, DeriveInput, Fields, FieldsNamed, LitStr, Result};

pub(crate) struct TableMetadata {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnMetadata>,
}

/// Named fields of a plain struct, anything else is rejected.
pub(crate) fn named_fields(item: &DeriveInput) -> Result<&FieldsNamed> {
    let Data::Struct(data) = &item.data else {
        return Err(not_a_struct(item));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(not_a_struct(item));
    };
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "Generic parameters are not supported on sqlh records",
        ));
    }
    Ok(fields)
}

fn not_a_struct(item: &DeriveInput) -> syn::Error {
    syn::Error::new_spanned(
        &item.ident,
        SqlhError::NotAStructType(item.ident.to_string()).to_string(),
    )
}

/// Value of `#[sqlh(table = "...")]` among the struct attributes.
pub(crate) fn table_attribute(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut result = None;
    for attr in attrs {
        if !attr.path().is_ident("sqlh") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("table") {
                result = Some(arg.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(arg.error("Unknown attribute, use it like: `#[sqlh(table = \"name\")]`"))
            }
        })?;
    }
    Ok(result)
}

pub fn decode_table(item: &DeriveInput) -> Result<TableMetadata> {
    let fields = named_fields(item)?;
    let columns = fields
        .named
        .iter()
        .map(decode_column)
        .collect::<Result<Vec<_>>>()?;
    let name = match table_attribute(&item.attrs)? {
        Some(name) => name,
        None => columns
            .iter()
            .find_map(|c| c.table.clone())
            .unwrap_or_else(|| unraw(&item.ident).to_lowercase()),
    };
    Ok(TableMetadata {
        name,
        columns: columns.into_iter().filter(|c| !c.is_skipped()).collect(),
    })
}
