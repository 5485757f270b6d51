use crate::{Row, Value};

/// Statement text with its positional arguments.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub args: Row,
}

impl Query {
    pub fn new(sql: impl Into<String>, args: Row) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

impl From<String> for Query {
    fn from(sql: String) -> Self {
        Self::new(sql, Row::new())
    }
}

impl From<&str> for Query {
    fn from(sql: &str) -> Self {
        Self::new(sql, Row::new())
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_insert_id.is_some() {
                self.last_insert_id = elem.last_insert_id;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Row(Row),
    Affected(RowsAffected),
}
