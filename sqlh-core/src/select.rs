use crate::Join;
use std::borrow::Cow;

/// Row count used when a page does not specify a limit.
pub const DEFAULT_NUM_ROWS: i64 = 10;

/// Offset and limit of a `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub offset: i64,
    pub limit: i64,
    /// Limit written when `limit` is not positive but `offset` is.
    pub default_limit: i64,
}

impl Paginator {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            default_limit: DEFAULT_NUM_ROWS,
        }
    }

    pub fn with_default_limit(mut self, default_limit: i64) -> Self {
        self.default_limit = default_limit;
        self
    }

    /// Limit and offset to write, `None` when every row is requested.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        if self.limit <= 0 && self.offset <= 0 {
            return None;
        }
        let limit = if self.limit > 0 {
            self.limit
        } else {
            self.default_limit
        };
        Some((limit, self.offset.max(0)))
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Optional clauses of a `SELECT` or `COUNT` statement. Every fragment is written verbatim.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectSpec {
    pub wheres: Vec<Cow<'static, str>>,
    /// Join the where fragments with `OR` instead of `AND`.
    pub or: bool,
    pub order_by: Cow<'static, str>,
    pub group_by: Cow<'static, str>,
    pub distinct: bool,
    pub alias: Cow<'static, str>,
    pub paginator: Option<Paginator>,
    /// Replaces the table name resolved from the type.
    pub table: Cow<'static, str>,
    pub joins: Vec<Join>,
}

impl SelectSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.wheres.push(fragment.into());
        self
    }

    pub fn any(mut self) -> Self {
        self.or = true;
        self
    }

    pub fn order_by(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.order_by = fragment.into();
        self
    }

    pub fn group_by(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.group_by = fragment.into();
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn paginate(mut self, paginator: Paginator) -> Self {
        self.paginator = Some(paginator);
        self
    }

    pub fn table(mut self, table: impl Into<Cow<'static, str>>) -> Self {
        self.table = table.into();
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }
}
