use crate::{SqliteConnection, SqliteDriver};
use sqlh_core::{
    Driver, Executor, Query, QueryResult, Result, SqlWriter, Transaction, stream::Stream,
};

pub struct SqliteTransaction<'c> {
    connection: &'c mut SqliteConnection,
}

impl<'c> SqliteTransaction<'c> {
    pub async fn new(connection: &'c mut SqliteConnection) -> Result<Self> {
        let mut sql = String::new();
        connection
            .driver()
            .sql_writer()
            .write_transaction_begin(&mut sql);
        connection.execute(sql.into()).await?;
        Ok(Self { connection })
    }
}

impl<'c> Executor for SqliteTransaction<'c> {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        self.connection.driver()
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.connection.run(query)
    }
}

impl<'c> Transaction<'c> for SqliteTransaction<'c> {
    /// A `COMMIT` rejected by sqlite (e.g. a deferred foreign key violation) leaves the
    /// transaction open, it is rolled back here before the error is returned.
    fn commit(self) -> impl Future<Output = Result<()>> + Send {
        async move {
            let writer = self.driver().sql_writer();
            let mut sql = String::new();
            writer.write_transaction_commit(&mut sql);
            let Err(e) = self.connection.execute(sql.into()).await else {
                return Ok(());
            };
            let mut sql = String::new();
            writer.write_transaction_rollback(&mut sql);
            if let Err(e) = self.connection.execute(sql.into()).await {
                log::warn!("Could not roll back after the failed commit: {:#}", e);
            }
            Err(e)
        }
    }

    fn rollback(self) -> impl Future<Output = Result<()>> + Send {
        async move {
            let mut sql = String::new();
            self.driver()
                .sql_writer()
                .write_transaction_rollback(&mut sql);
            self.connection.execute(sql.into()).await.map(|_| ())
        }
    }
}
