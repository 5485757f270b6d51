use crate::{
    ColumnDef, Entity, JoinSource, Result, Selectable, SelectSpec, SqlhError, separated_by,
};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Statement printer. Every method appends to `out`, separating from existing content with a newline.
///
/// The column lists written here and the argument lists produced by [`Entity::to_args`] and
/// [`Selectable::slots`] share the same order, drivers bind them positionally.
pub trait SqlWriter {
    /// Render one column of `CREATE TABLE`, a placeholder contributes its key text only.
    fn write_column_def(&self, out: &mut String, column: &ColumnDef) -> Result<()> {
        let start = out.len();
        if column.is_placeholder() {
            out.push_str(column.key);
        } else {
            out.push_str(column.name);
            out.push(' ');
            out.push_str(column.storage_type()?);
            out.push(' ');
            out.push_str(column.key);
        }
        let len = start + out[start..].trim_end_matches(' ').len();
        out.truncate(len);
        Ok(())
    }

    /// Render the predicates of an `UPDATE` or `DELETE`, each fragment is followed by a placeholder.
    fn write_where_bound(&self, out: &mut String, wheres: &[&str]) {
        if wheres.is_empty() {
            return;
        }
        out.push_str(" WHERE ");
        separated_by(
            out,
            wheres,
            |out, v| {
                out.push_str(v);
                out.push('?');
            },
            " AND ",
        );
    }

    /// Render the predicates of a `SELECT` or `COUNT`, fragments are written verbatim.
    fn write_where(&self, out: &mut String, spec: &SelectSpec) {
        if spec.wheres.is_empty() {
            return;
        }
        out.push_str(" WHERE ");
        separated_by(
            out,
            &spec.wheres,
            |out, v| out.push_str(v),
            if spec.or { " OR " } else { " AND " },
        );
    }

    /// Render the table with its alias and the joins.
    fn write_from(&self, out: &mut String, table: &str, spec: &SelectSpec) {
        out.push_str(" FROM ");
        out.push_str(if spec.table.is_empty() {
            table
        } else {
            &*spec.table
        });
        if !spec.alias.is_empty() {
            out.push(' ');
            out.push_str(&spec.alias);
        }
        for join in &spec.joins {
            out.push(' ');
            out.push_str(join.kind.keyword());
            out.push(' ');
            match &join.source {
                JoinSource::Table(name) => out.push_str(name),
                JoinSource::SubSelect(sql) => {
                    out.push('(');
                    out.push_str(sql);
                    out.push(')');
                }
            }
            if !join.alias.is_empty() {
                out.push(' ');
                out.push_str(&join.alias);
            }
            if !join.on.is_empty() {
                out.push_str(" ON ");
                out.push_str(&join.on);
            }
        }
    }

    fn write_create_table<E>(&self, out: &mut String) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("CREATE TABLE IF NOT EXISTS ");
        out.push_str(E::table_name());
        out.push_str(" (");
        for (i, column) in E::column_defs().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_column_def(out, column)?;
        }
        out.push_str(");");
        Ok(())
    }

    fn write_insert<E>(&self, out: &mut String)
    where
        Self: Sized,
        E: Entity,
    {
        if !out.is_empty() {
            out.push('\n');
        }
        let fields = E::fields(false);
        out.push_str("INSERT INTO ");
        out.push_str(E::table_name());
        out.push('(');
        separated_by(out, &fields, |out, c| out.push_str(c.name), ",");
        out.push_str(") VALUES(");
        separated_by(out, &fields, |out, _| out.push('?'), ",");
        out.push_str(");");
    }

    fn write_update<E>(&self, out: &mut String, wheres: &[&str]) -> Result<()>
    where
        Self: Sized,
        E: Entity,
    {
        if wheres.is_empty() {
            return Err(SqlhError::MissingWhereClause.into());
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("UPDATE ");
        out.push_str(E::table_name());
        out.push_str(" SET ");
        separated_by(
            out,
            E::fields(false),
            |out, c| {
                out.push_str(c.name);
                out.push_str("=?");
            },
            ",",
        );
        self.write_where_bound(out, wheres);
        out.push(';');
        Ok(())
    }

    fn write_select<S>(&self, out: &mut String, spec: &SelectSpec)
    where
        Self: Sized,
        S: Selectable,
    {
        if !out.is_empty() {
            out.push('\n');
        }
        let fields = S::fields(true);
        let joined = spec.joins.iter().map(|j| j.fields.len()).sum::<usize>();
        if fields.len() + joined != S::slot_count() {
            log::warn!(
                "Selecting {} columns from `{}` but the result shape has {} slots",
                fields.len() + joined,
                S::table_name(),
                S::slot_count(),
            );
        }
        out.push_str("SELECT ");
        if spec.distinct {
            out.push_str("DISTINCT ");
        }
        separated_by(
            out,
            fields
                .iter()
                .map(|c| (&*spec.alias, c.name))
                .chain(spec.joins.iter().flat_map(|j| j.fields.iter().map(|f| ("", f.as_str())))),
            |out, (alias, name)| {
                if !alias.is_empty() {
                    out.push_str(alias);
                    out.push('.');
                }
                out.push_str(name);
            },
            ", ",
        );
        self.write_from(out, S::table_name(), spec);
        self.write_where(out, spec);
        if !spec.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&spec.group_by);
        }
        if !spec.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            out.push_str(&spec.order_by);
        }
        if let Some((limit, offset)) = spec.paginator.and_then(|v| v.bounds()) {
            out.push_str(" LIMIT ");
            write_integer!(out, limit);
            out.push_str(" OFFSET ");
            write_integer!(out, offset);
        }
        out.push(';');
    }

    fn write_count<S>(&self, out: &mut String, spec: &SelectSpec)
    where
        Self: Sized,
        S: Selectable,
    {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT count(*)");
        self.write_from(out, S::table_name(), spec);
        self.write_where(out, spec);
        out.push(';');
    }

    fn write_delete<E>(&self, out: &mut String, wheres: &[&str])
    where
        Self: Sized,
        E: Entity,
    {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DELETE FROM ");
        out.push_str(E::table_name());
        self.write_where_bound(out, wheres);
        out.push(';');
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("BEGIN;");
    }

    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }
}

/// Writer producing the `?` placeholder dialect accepted by most drivers.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter {}

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for GenericSqlWriter {}
