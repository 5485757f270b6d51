use crate::decode_table::{named_fields, table_attribute};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Field, Result};

fn is_primary(field: &Field) -> Result<bool> {
    let mut result = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("sqlh") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("primary") {
                result = true;
                Ok(())
            } else {
                Err(arg.error("Unknown attribute, use it like: `#[sqlh(primary)]`"))
            }
        })?;
    }
    Ok(result)
}

pub(crate) fn composite(item: &DeriveInput) -> Result<TokenStream> {
    let name = &item.ident;
    let mut fields: Vec<&Field> = named_fields(item)?.named.iter().collect();
    if fields.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "A composite needs at least one component",
        ));
    }
    let mut primary = None;
    for (i, field) in fields.iter().enumerate() {
        if is_primary(field)? {
            if primary.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "Only one component can be marked as `primary`",
                ));
            }
            primary = Some(i);
        }
    }
    let primary = fields.remove(primary.unwrap_or_default());
    fields.insert(0, primary);
    let primary_ty = &primary.ty;
    let table_name = match table_attribute(&item.attrs)? {
        Some(table) => quote!(#table),
        None => quote!(<#primary_ty as ::sqlh::Selectable>::table_name()),
    };
    let idents: Vec<_> = fields.iter().map(|f| &f.ident).collect();
    let types: Vec<_> = fields.iter().map(|f| &f.ty).collect();
    Ok(quote! {
        impl ::sqlh::Selectable for #name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn columns() -> &'static [&'static ::sqlh::ColumnDef] {
                <#primary_ty as ::sqlh::Selectable>::columns()
            }

            fn slot_count() -> usize {
                0 #(+ <#types as ::sqlh::Selectable>::slot_count())*
            }

            fn slots(&self) -> ::sqlh::Row {
                let mut result = ::sqlh::Row::with_capacity(<Self as ::sqlh::Selectable>::slot_count());
                #(result.extend(::sqlh::Selectable::slots(&self.#idents));)*
                result
            }

            fn apply_args(&mut self, row: ::sqlh::Row) -> ::sqlh::Result<()> {
                ::sqlh::check_column_count(<Self as ::sqlh::Selectable>::slot_count(), &row)?;
                let mut row = row;
                #(
                    ::sqlh::Selectable::apply_args(
                        &mut self.#idents,
                        ::sqlh::take_front(&mut row, <#types as ::sqlh::Selectable>::slot_count()),
                    )?;
                )*
                Ok(())
            }
        }
    })
}
