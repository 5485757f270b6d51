use crate::{Driver, Executor, Result};
use std::future::Future;

pub trait Connection: Executor {
    /// Open a connection to the given URL, e.g. `sqlite://users.db?mode=rwc`.
    fn connect(url: &str) -> impl Future<Output = Result<Self>>;

    /// Start a transaction, close it with `commit` or `rollback`.
    fn begin(
        &mut self,
    ) -> impl Future<Output = Result<<Self::Driver as Driver>::Transaction<'_>>> + Send;
}
