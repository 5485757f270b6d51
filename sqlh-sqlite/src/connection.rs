use crate::{
    SqliteDriver, SqliteTransaction,
    extract::{bind_value, extract_value},
};
use rusqlite::{OpenFlags, params_from_iter};
use sqlh_core::{
    Connection, Context, Driver, Error, Executor, Query, QueryResult, Result, Row, RowsAffected,
    future::TryFutureExt,
    stream::{self, Stream},
    truncate_long,
};
use std::sync::{Arc, Mutex};
use tokio::task::spawn_blocking;

pub struct SqliteConnection {
    pub(crate) connection: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteConnection {
    fn run_blocking(connection: &Mutex<rusqlite::Connection>, query: Query) -> Result<Vec<QueryResult>> {
        let connection = connection
            .lock()
            .map_err(|e| Error::msg(format!("The sqlite connection is unusable: {}", e)))?;
        let mut statement = connection.prepare(&query.sql)?;
        let is_insert = query
            .sql
            .trim_start()
            .get(..6)
            .is_some_and(|v| v.eq_ignore_ascii_case("INSERT"));
        let args = query
            .args
            .into_iter()
            .map(bind_value)
            .collect::<Result<Vec<_>>>()?;
        let count = statement.column_count();
        if count == 0 {
            let rows_affected = statement.execute(params_from_iter(args))? as u64;
            return Ok(vec![QueryResult::Affected(RowsAffected {
                rows_affected,
                last_insert_id: if is_insert {
                    Some(connection.last_insert_rowid())
                } else {
                    None
                },
            })]);
        }
        let mut rows = statement.query(params_from_iter(args))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..count)
                .map(|i| row.get_ref(i).map(extract_value))
                .collect::<rusqlite::Result<Row>>()?;
            result.push(QueryResult::Row(values));
        }
        Ok(result)
    }
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &Self::Driver {
        &SqliteDriver {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let connection = self.connection.clone();
        let context = format!("While executing the query:\n{}", truncate_long!(query.sql));
        log::debug!("{}", truncate_long!(query.sql));
        async move {
            let result = spawn_blocking(move || Self::run_blocking(&connection, query))
                .await
                .map_err(Error::new)
                .and_then(|v| v)
                .context(context);
            match result {
                Ok(results) => Ok(stream::iter(results.into_iter().map(Ok::<_, Error>))),
                Err(e) => {
                    log::error!("{:#}", e);
                    Err(e)
                }
            }
        }
        .try_flatten_stream()
    }
}

impl Connection for SqliteConnection {
    /// Accepts `sqlite://<path>[?<uri parameters>]`, e.g. `sqlite://:memory:` or
    /// `sqlite://users.db?mode=rwc`.
    async fn connect(url: &str) -> Result<Self> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(path) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let uri = format!("file:{}", path);
        let connection = spawn_blocking(move || {
            rusqlite::Connection::open_with_flags(
                &uri,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
        })
        .await?
        .with_context(|| format!("While opening the connection to `{}`", url))?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn begin(
        &mut self,
    ) -> impl Future<Output = Result<<Self::Driver as Driver>::Transaction<'_>>> + Send {
        SqliteTransaction::new(self)
    }
}
