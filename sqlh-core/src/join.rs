use crate::Selectable;
use std::borrow::Cow;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Default,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinType::Default => "JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinSource {
    Table(Cow<'static, str>),
    /// Inline `SELECT`, written between parentheses.
    SubSelect(String),
}

/// One joined table of a `SELECT` together with the columns it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinType,
    pub source: JoinSource,
    pub alias: Cow<'static, str>,
    pub on: Cow<'static, str>,
    pub fields: Vec<String>,
}

impl Join {
    /// Join the table of `S`, selecting all of its columns.
    pub fn new<S: Selectable>(
        kind: JoinType,
        alias: impl Into<Cow<'static, str>>,
        on: impl Into<Cow<'static, str>>,
    ) -> Self {
        let alias = alias.into();
        Self {
            kind,
            source: JoinSource::Table(S::table_name().into()),
            fields: Self::fields_of::<S>(&alias),
            alias,
            on: on.into(),
        }
    }

    /// Join an inline `SELECT` whose output has the columns of `S`.
    pub fn sub_select<S: Selectable>(
        kind: JoinType,
        sql: impl Into<String>,
        alias: impl Into<Cow<'static, str>>,
        on: impl Into<Cow<'static, str>>,
    ) -> Self {
        let alias = alias.into();
        let mut sql: String = sql.into();
        while sql.ends_with([';', ' ', '\n']) {
            sql.pop();
        }
        Self {
            kind,
            source: JoinSource::SubSelect(sql),
            fields: Self::fields_of::<S>(&alias),
            alias,
            on: on.into(),
        }
    }

    /// Replace the contributed columns.
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    fn fields_of<S: Selectable>(alias: &str) -> Vec<String> {
        S::fields(true)
            .into_iter()
            .map(|c| {
                if alias.is_empty() {
                    c.name.to_string()
                } else {
                    format!("{}.{}", alias, c.name)
                }
            })
            .collect()
    }
}
