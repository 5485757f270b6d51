use crate::{Executor, Result};

pub trait Transaction<'c>: Executor {
    /// Make the changes permanent. On failure no transaction is left open on the connection.
    fn commit(self) -> impl Future<Output = Result<()>> + Send;
    fn rollback(self) -> impl Future<Output = Result<()>> + Send;
}
