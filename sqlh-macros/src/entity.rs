use crate::decode_table::TableMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub(crate) fn entity(item: &DeriveInput, table: TableMetadata) -> TokenStream {
    let name = &item.ident;
    let table_name = &table.name;
    let column_defs = table.columns.iter().map(|c| {
        let column = &c.name;
        let column_type = &c.column_type;
        let key = &c.key;
        let ty = &c.ty;
        let value = if c.is_placeholder() {
            quote!(::sqlh::Value::Null)
        } else {
            quote!(<#ty as ::sqlh::AsValue>::as_empty_value())
        };
        quote! {
            ::sqlh::ColumnDef {
                name: #column,
                column_type: #column_type,
                key: #key,
                value: #value,
            }
        }
    });
    let selected: Vec<_> = table.columns.iter().filter(|c| !c.is_placeholder()).collect();
    let count = selected.len();
    let slots = selected.iter().map(|c| {
        let field = &c.ident;
        quote!(::sqlh::AsValue::as_value(::std::clone::Clone::clone(&self.#field)))
    });
    let decode = selected.iter().map(|c| {
        let field = &c.ident;
        let ty = &c.ty;
        let column = &c.name;
        quote!(self.#field = ::sqlh::decode_column::<#ty>(&mut values, #column)?;)
    });
    quote! {
        impl ::sqlh::Selectable for #name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn columns() -> &'static [&'static ::sqlh::ColumnDef] {
                static RESULT: ::std::sync::LazyLock<Box<[&'static ::sqlh::ColumnDef]>> =
                    ::std::sync::LazyLock::new(|| {
                        <#name as ::sqlh::Entity>::column_defs()
                            .iter()
                            .filter(|c| !c.is_placeholder())
                            .collect()
                    });
                &RESULT
            }

            fn slot_count() -> usize {
                #count
            }

            fn slots(&self) -> ::sqlh::Row {
                ::std::vec![#(#slots),*]
            }

            fn apply_args(&mut self, row: ::sqlh::Row) -> ::sqlh::Result<()> {
                ::sqlh::check_column_count(#count, &row)?;
                let mut values = row.into_iter();
                #(#decode)*
                Ok(())
            }
        }

        impl ::sqlh::Entity for #name {
            fn column_defs() -> &'static [::sqlh::ColumnDef] {
                static RESULT: ::std::sync::LazyLock<Box<[::sqlh::ColumnDef]>> =
                    ::std::sync::LazyLock::new(|| ::std::vec![#(#column_defs),*].into_boxed_slice());
                &RESULT
            }
        }
    }
}
