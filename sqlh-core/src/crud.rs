//! Transactional helpers built on the statement writer and the marshaller.

use crate::{
    AsValue, Config, Connection, Direction, Driver, Entity, Executor, Join,
    Paginator, Query, Result, Row, RowsAffected, SelectSpec, Selectable, SqlWriter, SqlhError,
    Transaction, Value, scan_into,
    stream::{Stream, StreamExt, TryStreamExt},
};
use async_stream::try_stream;
use std::{borrow::Cow, pin::pin};

/// Predicate of a CRUD helper.
///
/// `field` is the fragment in front of the placeholder, e.g. `"name="` or `"age>"`. Without a
/// value the fragment is written as is by the selecting helpers (`list`, `get`, `count`), while
/// `update`, `set` and `delete` always bind it, as NULL when no value is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub field: Cow<'static, str>,
    pub value: Option<Value>,
}

impl Where {
    pub fn new(field: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: Some(value.into()),
        }
    }

    /// Fragment written verbatim, e.g. `"deleted_at IS NULL"`.
    pub fn raw(fragment: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: fragment.into(),
            value: None,
        }
    }
}

/// Row to update and the predicates selecting it.
#[derive(Debug, Clone)]
pub struct UpdateAttr<E> {
    pub row: E,
    pub wheres: Vec<Where>,
}

impl<E> UpdateAttr<E> {
    pub fn new(row: E, wheres: Vec<Where>) -> Self {
        Self { row, wheres }
    }
}

/// Optional clauses of the listing helpers.
#[derive(Default, Debug, Clone)]
pub struct ListAttrs {
    pub wheres: Vec<Where>,
    pub joins: Vec<Join>,
    pub alias: Cow<'static, str>,
}

impl ListAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, condition: Where) -> Self {
        self.wheres.push(condition);
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.alias = alias.into();
        self
    }
}

impl From<Vec<Where>> for ListAttrs {
    fn from(wheres: Vec<Where>) -> Self {
        Self {
            wheres,
            ..Default::default()
        }
    }
}

fn bound_wheres(wheres: &[Where]) -> (Vec<&str>, Row) {
    wheres
        .iter()
        .map(|w| (w.field.as_ref(), w.value.clone().unwrap_or_default()))
        .unzip()
}

fn select_query<S: Selectable>(
    writer: &impl SqlWriter,
    paginator: Paginator,
    order_by: &str,
    attrs: &ListAttrs,
) -> Query {
    let mut spec = SelectSpec {
        order_by: order_by.to_owned().into(),
        alias: attrs.alias.clone(),
        paginator: Some(paginator),
        joins: attrs.joins.clone(),
        ..Default::default()
    };
    let mut args = Row::new();
    for w in &attrs.wheres {
        match &w.value {
            Some(v) => {
                spec.wheres.push(format!("{}?", w.field).into());
                args.push(v.clone());
            }
            None => spec.wheres.push(w.field.clone()),
        }
    }
    let mut sql = String::with_capacity(256);
    writer.write_select::<S>(&mut sql, &spec);
    Query::new(sql, args)
}

fn decode_record<S: Selectable + Default>(row: Row) -> Result<S> {
    let mut record = S::default();
    let mut slots = record.slots();
    scan_into(&mut slots, row)?;
    record.apply_args(slots)?;
    Ok(record)
}

/// Commit on success, roll back and hand the error back otherwise.
async fn finish<'c, T: Transaction<'c>, R>(transaction: T, result: Result<R>) -> Result<R> {
    match result {
        Ok(v) => {
            transaction.commit().await?;
            Ok(v)
        }
        Err(e) => {
            log::warn!("Rolling back the transaction: {:#}", e);
            if let Err(e) = transaction.rollback().await {
                log::error!("{:#}", e);
            }
            Err(e)
        }
    }
}

pub async fn create_table<E: Entity, Exec: Executor>(executor: &mut Exec) -> Result<()> {
    let mut sql = String::with_capacity(256);
    executor
        .driver()
        .sql_writer()
        .write_create_table::<E>(&mut sql)?;
    executor.execute(sql.into()).await.map(|_| ())
}

/// Insert every row inside a single transaction.
pub async fn insert<E: Entity, C: Connection>(connection: &mut C, rows: &[E]) -> Result<()> {
    let mut sql = String::with_capacity(128);
    connection.driver().sql_writer().write_insert::<E>(&mut sql);
    let mut transaction = connection.begin().await?;
    let result: Result<()> = async {
        for row in rows {
            transaction
                .execute(Query::new(sql.clone(), row.to_args(Direction::Write)))
                .await?;
        }
        Ok(())
    }
    .await;
    finish(transaction, result).await
}

/// Update each row with its own predicates inside a single transaction.
pub async fn update<E: Entity, C: Connection>(
    connection: &mut C,
    attrs: &[UpdateAttr<E>],
) -> Result<()> {
    let writer = connection.driver().sql_writer();
    let mut transaction = connection.begin().await?;
    let result: Result<()> = async {
        for attr in attrs {
            let (fields, values) = bound_wheres(&attr.wheres);
            let mut sql = String::with_capacity(128);
            writer.write_update::<E>(&mut sql, &fields)?;
            let mut args = attr.row.to_args(Direction::Write);
            args.extend(values);
            transaction.execute(Query::new(sql, args)).await?;
        }
        Ok(())
    }
    .await;
    finish(transaction, result).await
}

/// Insert `row` when no record matches `wheres`, update the match otherwise.
///
/// Fails with [`SqlhError::MultipleRowsFound`] when more than one record matches.
pub async fn set<E: Entity + Default, C: Connection>(
    connection: &mut C,
    row: &E,
    wheres: Vec<Where>,
) -> Result<()> {
    let writer = connection.driver().sql_writer();
    let mut transaction = connection.begin().await?;
    let result: Result<()> = async {
        let query = select_query::<E>(
            &writer,
            Paginator::new(0, 2),
            "",
            &ListAttrs::from(wheres.clone()),
        );
        let found: Vec<E> = query_range(&mut transaction, query).try_collect().await?;
        let mut sql = String::with_capacity(128);
        let mut args = row.to_args(Direction::Write);
        match found.len() {
            0 => writer.write_insert::<E>(&mut sql),
            1 => {
                let (fields, values) = bound_wheres(&wheres);
                writer.write_update::<E>(&mut sql, &fields)?;
                args.extend(values);
            }
            _ => return Err(SqlhError::MultipleRowsFound.into()),
        }
        transaction.execute(Query::new(sql, args)).await?;
        Ok(())
    }
    .await;
    finish(transaction, result).await
}

/// The single record matching `wheres`.
pub async fn get<S, Exec>(executor: &mut Exec, wheres: Vec<Where>) -> Result<S>
where
    S: Selectable + Default,
    Exec: Executor,
{
    if wheres.is_empty() {
        return Err(SqlhError::MissingWhereClause.into());
    }
    let (mut rows, _) = list_rows::<S, _>(executor, 0, "", 2, &ListAttrs::from(wheres)).await?;
    match rows.len() {
        0 => Err(SqlhError::NoRows.into()),
        1 => Ok(rows.remove(0)),
        _ => Err(SqlhError::MultipleRowsFound.into()),
    }
}

pub async fn delete<E: Entity, C: Connection>(
    connection: &mut C,
    wheres: Vec<Where>,
) -> Result<RowsAffected> {
    let (fields, values) = bound_wheres(&wheres);
    let mut sql = String::with_capacity(64);
    connection
        .driver()
        .sql_writer()
        .write_delete::<E>(&mut sql, &fields);
    let mut transaction = connection.begin().await?;
    let result = transaction.execute(Query::new(sql, values)).await;
    finish(transaction, result).await
}

pub async fn count<S, Exec>(executor: &mut Exec, wheres: Vec<Where>) -> Result<i64>
where
    S: Selectable,
    Exec: Executor,
{
    let mut spec = SelectSpec::new();
    let mut args = Row::new();
    for w in wheres {
        match w.value {
            Some(v) => {
                spec.wheres.push(format!("{}?", w.field).into());
                args.push(v);
            }
            None => spec.wheres.push(w.field),
        }
    }
    let mut sql = String::with_capacity(64);
    executor.driver().sql_writer().write_count::<S>(&mut sql, &spec);
    let row = pin!(executor.fetch(Query::new(sql, args))).try_next().await?;
    match row.and_then(|r| r.into_iter().next()) {
        Some(v) => i64::try_from_value(v),
        None => Ok(0),
    }
}

/// A page of [`Config::num_rows`] records starting after `previous` records.
///
/// Returns the records and the offset of the next page.
pub async fn list<S, Exec>(
    executor: &mut Exec,
    config: &Config,
    previous: i64,
    order_by: &str,
    attrs: &ListAttrs,
) -> Result<(Vec<S>, i64)>
where
    S: Selectable + Default,
    Exec: Executor,
{
    let writer = executor.driver().sql_writer();
    let query = select_query::<S>(
        &writer,
        config.paginator(previous, config.num_rows),
        order_by,
        attrs,
    );
    let rows: Vec<S> = query_range(executor, query).try_collect().await?;
    let next = previous + rows.len() as i64;
    Ok((rows, next))
}

/// Like [`list`] with an explicit page size.
///
/// With neither a page size nor an offset every row is returned.
pub async fn list_rows<S, Exec>(
    executor: &mut Exec,
    previous: i64,
    order_by: &str,
    num_rows: i64,
    attrs: &ListAttrs,
) -> Result<(Vec<S>, i64)>
where
    S: Selectable + Default,
    Exec: Executor,
{
    let rows: Vec<S> = list_range(executor, previous, order_by, num_rows, attrs)
        .try_collect()
        .await?;
    let next = previous + rows.len() as i64;
    Ok((rows, next))
}

/// Stream form of [`list_rows`].
pub fn list_range<'e, S, Exec>(
    executor: &'e mut Exec,
    previous: i64,
    order_by: &str,
    num_rows: i64,
    attrs: &ListAttrs,
) -> impl Stream<Item = Result<S>> + use<'e, S, Exec>
where
    S: Selectable + Default + 'e,
    Exec: Executor,
{
    let paginator = Paginator::new(previous, num_rows);
    let query = select_query::<S>(&executor.driver().sql_writer(), paginator, order_by, attrs);
    query_range(executor, query)
}

/// Run any query and decode every row into `S`, composites included.
pub fn query_range<'e, S, Exec>(
    executor: &'e mut Exec,
    query: Query,
) -> impl Stream<Item = Result<S>> + use<'e, S, Exec>
where
    S: Selectable + Default + 'e,
    Exec: Executor,
{
    try_stream! {
        let mut rows = pin!(executor.fetch(query));
        while let Some(row) = rows.next().await {
            yield decode_record::<S>(row?)?;
        }
    }
}
