//! Mysql client
//!
//! CRUD helpers over a pooled mysql connection. Mutations that report counts (`update`,
//! `delete`, `prepared_insert`) and all queries swallow their errors: the failure is logged
//! under `Options::log_target` and a zero/empty value is returned.

use async_trait::async_trait;
use crudx_core::{check_row_len, D1Value, Rowmap, Value};
use sqlx::mysql::{MySqlPool, MySqlQueryResult, MySqlRow, MySqlStatement};
use sqlx::{Executor, MySql, Row, Statement as _, Transaction};

use super::types::bind_values;
use super::{ok_or_log, statement_query, SqlRowProcessor};
use crate::sql_adt::{ExecutionResult, Statement};
use crate::{DdlQuery, DmlMutation, DmlQuery, Options, SqlBuilder, SqlError, SqlResult};

#[async_trait]
pub trait SqlHelper {
    /// list all tables of the current database
    async fn list_tables(&self) -> Vec<String>;
}

/// An engine is an interface to describe the client's CRUD logic
#[async_trait]
pub trait SqlEngine: SqlHelper {
    /// multi-row insert, duplicated keys are ignored.
    /// Rows whose length mismatches `fields` are skipped.
    async fn insert(
        &self,
        table: &str,
        fields: &[&str],
        rows: &[D1Value],
    ) -> SqlResult<ExecutionResult>;

    /// prepare a single-row insert once and execute it for every row.
    /// Returns the id of the last inserted row, 0 if none.
    async fn prepared_insert(&self, table: &str, fields: &[&str], rows: &[D1Value]) -> u64;

    async fn select(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Vec<Rowmap>;

    async fn select_distinct(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Vec<Rowmap>;

    async fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Option<Rowmap>;

    /// returns affected rows
    async fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        condition: &str,
        args: &[Value],
    ) -> u64;

    /// returns affected rows
    async fn delete(&self, table: &str, condition: &str, args: &[Value]) -> u64;
}

/// MysqlClient owns a connection pool and the options it was built with.
///
/// Share it behind an `Arc` for concurrent use, the pool itself is thread-safe.
pub struct MysqlClient {
    builder: SqlBuilder,
    options: Options,
    pool: MySqlPool,
}

impl MysqlClient {
    /// validate options and open the pool
    pub async fn connect(options: Options) -> SqlResult<Self> {
        let connect_options = options.connect_options()?;
        let pool = options
            .pool_options()
            .connect_with(connect_options)
            .await?;

        log::info!(target: options.log_target.as_str(), "connected: {}", options);

        Ok(MysqlClient {
            builder: SqlBuilder,
            options,
            pool,
        })
    }

    /// like `connect`, but a bad config or an unreachable server is fatal
    pub async fn new(options: Options) -> Self {
        match Self::connect(options).await {
            Ok(c) => c,
            Err(e) => panic!("mysql client init failed: {e}"),
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn log_target(&self) -> &str {
        &self.options.log_target
    }

    /// close every connection of the pool
    pub async fn close(self) {
        self.pool.close().await;
        log::info!(target: self.log_target(), "closed: {}", self.options);
    }

    // ================================================================================================
    // pass-through
    // ================================================================================================

    pub async fn execute(&self, query: &str, args: &[Value]) -> SqlResult<MySqlQueryResult> {
        Ok(bind_values(sqlx::query(query), args)
            .execute(&self.pool)
            .await?)
    }

    pub async fn query(&self, query: &str, args: &[Value]) -> SqlResult<Vec<MySqlRow>> {
        Ok(bind_values(sqlx::query(query), args)
            .fetch_all(&self.pool)
            .await?)
    }

    /// exactly one row, `sqlx::Error::RowNotFound` otherwise
    pub async fn query_row(&self, query: &str, args: &[Value]) -> SqlResult<MySqlRow> {
        Ok(bind_values(sqlx::query(query), args)
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn begin(&self) -> SqlResult<Transaction<'static, MySql>> {
        Ok(self.pool.begin().await?)
    }

    pub async fn prepare<'q>(&self, query: &'q str) -> SqlResult<MySqlStatement<'q>> {
        Ok(Executor::prepare(&self.pool, query).await?)
    }

    // ================================================================================================
    // helpers
    // ================================================================================================

    async fn execute_statement(&self, stmt: &Statement) -> SqlResult<MySqlQueryResult> {
        Ok(statement_query!(stmt).execute(&self.pool).await?)
    }

    async fn fetch_rowmaps(&self, stmt: &Statement) -> Vec<Rowmap> {
        let rows = match statement_query!(stmt).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_select_error(&e.into(), stmt);
                return vec![];
            }
        };

        let mut srp = SqlRowProcessor::new(self.options.parse_time);
        rows.iter()
            .filter_map(|row| match srp.process(row) {
                Ok(r) => Some(r),
                Err(e) => {
                    log::error!(target: self.log_target(), "skip row: {}, sql: {}", e, stmt);
                    None
                }
            })
            .collect()
    }

    fn log_select_error(&self, e: &SqlError, stmt: &Statement) {
        if e.is_row_not_found() {
            log::debug!(target: self.log_target(), "select: {}, sql: {}", e, stmt);
        } else {
            log::error!(target: self.log_target(), "select: {}, sql: {}", e, stmt);
        }
    }
}

#[async_trait]
impl SqlHelper for MysqlClient {
    async fn list_tables(&self) -> Vec<String> {
        let que = self.builder.list_tables();
        let rows = ok_or_log!(
            self.log_target(),
            sqlx::query(&que).fetch_all(&self.pool).await,
            vec![],
            "list tables"
        );

        rows.iter()
            .filter_map(|row| match row.try_get_unchecked::<String, _>(0) {
                Ok(name) => Some(name),
                Err(e) => {
                    log::error!(target: self.log_target(), "list tables: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl SqlEngine for MysqlClient {
    async fn insert(
        &self,
        table: &str,
        fields: &[&str],
        rows: &[D1Value],
    ) -> SqlResult<ExecutionResult> {
        let rows = rows
            .iter()
            .filter(|row| match check_row_len(fields.len(), row) {
                Ok(()) => true,
                Err(e) => {
                    log::error!(
                        target: self.log_target(),
                        "insert {} skips row: {}, fields: {:?}, row: {:?}",
                        table,
                        e,
                        fields,
                        row
                    );
                    false
                }
            })
            .collect::<Vec<_>>();

        let stmt = self.builder.insert(table, fields, &rows).map_err(|e| {
            log::error!(target: self.log_target(), "insert {}: {}", table, e);
            e
        })?;

        match self.execute_statement(&stmt).await {
            Ok(r) => Ok(r.into()),
            Err(e) => {
                log::error!(target: self.log_target(), "insert: {}, sql: {}", e, stmt);
                Err(e)
            }
        }
    }

    async fn prepared_insert(&self, table: &str, fields: &[&str], rows: &[D1Value]) -> u64 {
        let que = self.builder.prepared_insert(table, fields);
        let target = self.log_target();

        let mut conn = ok_or_log!(target, self.pool.acquire().await, 0, "acquire connection");
        let stmt = ok_or_log!(target, (&mut *conn).prepare(&que).await, 0, "prepare {}", que);

        let mut last_id = 0;
        for row in rows {
            if let Err(e) = check_row_len(fields.len(), row) {
                log::error!(target: target, "prepared insert skips row: {}, row: {:?}", e, row);
                continue;
            }

            match bind_values(stmt.query(), row).execute(&mut *conn).await {
                Ok(r) if r.rows_affected() > 0 => last_id = r.last_insert_id(),
                Ok(_) => log::debug!(target: target, "ignored row: {:?}, sql: {}", row, que),
                Err(e) => log::error!(target: target, "prepared insert: {}, row: {:?}", e, row),
            }
        }

        last_id
    }

    async fn select(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Vec<Rowmap> {
        let stmt = self.builder.select(table, fields, condition, args, false);
        self.fetch_rowmaps(&stmt).await
    }

    async fn select_distinct(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Vec<Rowmap> {
        let stmt = self.builder.select(table, fields, condition, args, true);
        self.fetch_rowmaps(&stmt).await
    }

    async fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
    ) -> Option<Rowmap> {
        let stmt = self.builder.select_one(table, fields, condition, args, false);
        self.fetch_rowmaps(&stmt).await.into_iter().next()
    }

    async fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        condition: &str,
        args: &[Value],
    ) -> u64 {
        let target = self.log_target();
        let stmt = ok_or_log!(
            target,
            self.builder.update(table, data, condition, args),
            0,
            "update {}",
            table
        );
        let res = ok_or_log!(
            target,
            self.execute_statement(&stmt).await,
            0,
            "update, sql: {}",
            stmt
        );

        res.rows_affected()
    }

    async fn delete(&self, table: &str, condition: &str, args: &[Value]) -> u64 {
        let stmt = self.builder.delete(table, condition, args);
        let res = ok_or_log!(
            self.log_target(),
            self.execute_statement(&stmt).await,
            0,
            "delete, sql: {}",
            stmt
        );

        res.rows_affected()
    }
}

#[cfg(test)]
mod test_executor {
    use super::*;

    #[tokio::test]
    async fn test_connect_invalid_options() {
        let options = Options::new("127.0.0.1:3306", "root", "", "test");
        let res = MysqlClient::connect(options).await;

        assert!(matches!(res, Err(SqlError::InvalidConfig(_))));
    }

    #[tokio::test]
    #[should_panic(expected = "mysql client init failed")]
    async fn test_new_is_fatal() {
        MysqlClient::new(Options::default()).await;
    }
}
