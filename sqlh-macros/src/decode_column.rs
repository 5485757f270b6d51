use syn::{Field, Ident, LitStr, Result, Type, spanned::Spanned};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: String,
    pub(crate) column_type: String,
    pub(crate) key: String,
    pub(crate) table: Option<String>,
}

impl ColumnMetadata {
    pub(crate) fn is_placeholder(&self) -> bool {
        self.name == sqlh_core::PLACEHOLDER_NAME
    }

    pub(crate) fn is_skipped(&self) -> bool {
        self.name == sqlh_core::SKIPPED_NAME
    }
}

pub(crate) fn unraw(ident: &Ident) -> String {
    ident.to_string().trim_start_matches("r#").to_string()
}

pub fn decode_column(field: &Field) -> Result<ColumnMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new(field.span(), "Field is expected to have a name"));
    };
    let mut metadata = ColumnMetadata {
        name: unraw(&ident).to_lowercase(),
        ident,
        ty: field.ty.clone(),
        column_type: String::new(),
        key: String::new(),
        table: None,
    };
    for attr in &field.attrs {
        if !attr.path().is_ident("sqlh") {
            continue;
        }
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                metadata.name = arg.value()?.parse::<LitStr>()?.value();
            } else if arg.path.is_ident("type") {
                metadata.column_type = arg.value()?.parse::<LitStr>()?.value();
            } else if arg.path.is_ident("key") {
                metadata.key = arg.value()?.parse::<LitStr>()?.value();
            } else if arg.path.is_ident("table") {
                metadata.table = Some(arg.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(arg.error(
                    "Unknown attribute, use it like: `#[sqlh(name = \"column\", type = \"text\", key = \"unique\", table = \"name\")]`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(metadata)
}
