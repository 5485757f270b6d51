use sqlh_core::SqlWriter;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    /// Take the write lock upfront, a deferred transaction reading before writing can fail with
    /// `SQLITE_BUSY` when another connection writes in between.
    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN IMMEDIATE;");
    }
}
