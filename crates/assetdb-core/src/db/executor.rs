//! Statement preparation, parameter binding and row stepping.

use log::{debug, error, warn};
use rusqlite::{CachedStatement, ToSql};

use super::{
    columns::{FilterColumns, RowSchema},
    statements::StatementId,
};
use crate::{
    error::{AssetDbError, DatabaseResultExt, Result},
    models::JobFilter,
};

/// A prepared catalog statement waiting for its parameters.
///
/// The underlying statement returns to the connection's cache, reset and
/// with its bindings cleared, when the query is dropped, including on every
/// early return.
pub(crate) struct Query<'c> {
    id: StatementId,
    stmt: CachedStatement<'c>,
}

impl super::AssetDatabaseConnection {
    /// Validates the tables `id` depends on and prepares its statement.
    pub(crate) fn query(&self, id: StatementId) -> Result<Query<'_>> {
        for &table in id.tables() {
            self.validate_table(id.name(), table)?;
        }
        let connection = self.connection_for(id.name())?;
        debug!("Preparing {}", id.name());
        let stmt = connection
            .prepare_cached(id.sql())
            .db_context(&format!("Failed to prepare {}", id.name()))?;
        Ok(Query { id, stmt })
    }
}

impl Query<'_> {
    /// Binds `value` to the named parameter.
    pub(crate) fn bind<T: ToSql>(mut self, parameter: &'static str, value: T) -> Result<Self> {
        let call = self.id.name();
        let index = self
            .stmt
            .parameter_index(parameter)
            .db_context(&format!("Failed to look up {parameter} in {call}"))?
            .ok_or_else(|| {
                error!("Could not find the replacement for {parameter} in the statement {call}");
                AssetDbError::MissingParameter { call, parameter }
            })?;
        self.stmt
            .raw_bind_parameter(index, value)
            .db_context(&format!("Failed to bind {parameter} in {call}"))?;
        Ok(self)
    }

    /// Binds the platform when the statement is a platform variant.
    pub(crate) fn bind_platform(self, platform: Option<&str>) -> Result<Self> {
        match platform {
            Some(platform) => self.bind(":platform", platform),
            None => Ok(self),
        }
    }

    /// Steps every row, handing each decoded entry to `handler`.
    ///
    /// Rows rejected by `filter` are skipped without being decoded. Stepping
    /// stops as soon as `handler` returns `false`; that still counts as
    /// success. A store error while stepping fails the call, but rows already
    /// delivered stay delivered.
    pub(crate) fn rows<S, F>(self, filter: Option<&JobFilter>, mut handler: F) -> Result<()>
    where
        S: RowSchema,
        F: FnMut(&mut S::Entry) -> bool,
    {
        let Query { id, mut stmt } = self;
        let call = id.name();
        let schema = S::resolve(&stmt, call)?;
        let filter_columns = match filter {
            Some(filter) => FilterColumns::resolve(&stmt, call, filter)?,
            None => None,
        };

        let mut rows = stmt.raw_query();
        loop {
            let row = match rows.next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(source) => return Err(step_error(call, source)),
            };

            if let (Some(columns), Some(filter)) = (&filter_columns, filter) {
                match columns.accepts(row, filter) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(source) => return Err(step_error(call, source)),
                }
            }

            let mut entry = schema.read(row).map_err(|source| step_error(call, source))?;
            if !handler(&mut entry) {
                debug!("Handler stopped {call} early");
                break;
            }
        }
        Ok(())
    }

    /// Collects every matching entry.
    pub(crate) fn collect<S: RowSchema>(self, filter: Option<&JobFilter>) -> Result<Vec<S::Entry>>
    where
        S::Entry: Clone,
    {
        let mut entries = Vec::new();
        self.rows::<S, _>(filter, |entry| {
            entries.push(entry.clone());
            true
        })?;
        Ok(entries)
    }

    /// Returns the first matching entry, if any.
    pub(crate) fn first<S: RowSchema>(self, filter: Option<&JobFilter>) -> Result<Option<S::Entry>>
    where
        S::Entry: Clone,
    {
        let mut found = None;
        self.rows::<S, _>(filter, |entry| {
            found = Some(entry.clone());
            false
        })?;
        Ok(found)
    }
}

fn step_error(call: &'static str, source: rusqlite::Error) -> AssetDbError {
    warn!("Error while stepping through {call}: {source}");
    AssetDbError::Step { call, source }
}
