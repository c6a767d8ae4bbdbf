//! Mysql client test case
//!
//! Requires a running mysql server, point to it by `CRUDX_DSN`, e.g.
//! `root:secret@tcp(localhost:3306)/dev?charset=utf8mb4`
//!
//! test case:
//! 1. create table
//! 1. test insert & prepared insert
//! 1. test select, select distinct & select one
//! 1. test update
//! 1. test delete
//! 1. test pass-through: query row, transaction, prepare
//!
//! Each test works on a table of its own, so they can run in parallel.

use std::str::FromStr;

use crudx_sql::{values, MysqlClient, Options, SqlEngine, SqlError, SqlHelper, Value};
use sqlx::{Row, Statement};

const DSN: &str = "root:secret@tcp(localhost:3306)/dev?charset=utf8mb4";

fn create_table(table: &str) -> String {
    format!(
        r#"
CREATE TABLE `{table}` (
    `id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
    `name` VARCHAR(20) NOT NULL DEFAULT '',
    `age` INT(11) NOT NULL DEFAULT '0',
    `birthday` DATE NULL,
    `wake` TIME NULL,
    PRIMARY KEY (`id`),
    UNIQUE INDEX `name` (`name`) USING BTREE
) ENGINE=InnoDB AUTO_INCREMENT=1 DEFAULT CHARSET=utf8mb4
"#
    )
}

fn options() -> Options {
    let _ = env_logger::builder().is_test(true).try_init();

    let dsn = std::env::var("CRUDX_DSN").unwrap_or_else(|_| DSN.to_owned());
    Options::from_str(&dsn).unwrap()
}

async fn fresh_client(table: &str) -> MysqlClient {
    let client = MysqlClient::new(options()).await;

    client
        .execute(&format!("DROP TABLE IF EXISTS `{table}`"), &[])
        .await
        .unwrap();
    client.execute(&create_table(table), &[]).await.unwrap();

    client
}

/*
cargo test --package crudx-sql --test client_test -- test_crud --exact --nocapture --ignored
*/
#[tokio::test]
#[ignore = "requires a mysql server"]
async fn test_crud() {
    const TABLE_NAME: &str = "crudx_user_crud";
    let client = fresh_client(TABLE_NAME).await;

    assert!(client
        .list_tables()
        .await
        .contains(&TABLE_NAME.to_owned()));

    // insert
    let rows = vec![values!["Mike", 15], values!["Shine", "28"]];
    let res = client.insert(TABLE_NAME, &["name", "age"], &rows).await;
    assert_eq!(res.unwrap().rows_affected, 2);

    // prepared insert
    let rows = vec![values!["Tom", 19], values!["Jane", "20"]];
    let id = client
        .prepared_insert(TABLE_NAME, &["name", "age"], &rows)
        .await;
    assert_eq!(id, 4);

    // duplicated name is ignored by the server
    let res = client
        .insert(TABLE_NAME, &["name", "age"], &[values!["Mike", 16]])
        .await;
    assert_eq!(res.unwrap().rows_affected, 0);

    // select
    let res = client
        .select(TABLE_NAME, &["name", "age"], "order by id", &[])
        .await;
    assert_eq!(res.len(), 4);
    assert_eq!(&res[1]["name"], "Shine");
    assert_eq!(&res[1]["age"], "28");

    // update
    let affected = client
        .update(
            TABLE_NAME,
            &[("age", Value::from(30))],
            "where name=?",
            &values!["Tom"],
        )
        .await;
    assert_eq!(affected, 1);

    // select one
    let row = client
        .select_one(TABLE_NAME, &["age"], "where name=?", &values!["Tom"])
        .await
        .unwrap();
    assert_eq!(&row["age"], "30");
    assert_eq!(row.get_parsed::<i64>("age").unwrap(), 30);

    // delete
    let affected = client
        .delete(TABLE_NAME, "where age<?", &values![30])
        .await;
    assert_eq!(affected, 3);

    let res = client.select(TABLE_NAME, &["name"], "", &[]).await;
    assert_eq!(res.len(), 1);
    assert_eq!(&res[0]["name"], "Tom");

    client.close().await;
}

/*
cargo test --package crudx-sql --test client_test -- test_insert_malformed_rows --exact --nocapture --ignored
*/
#[tokio::test]
#[ignore = "requires a mysql server"]
async fn test_insert_malformed_rows() {
    const TABLE_NAME: &str = "crudx_user_malformed";
    let client = fresh_client(TABLE_NAME).await;
    let fields = ["name", "age"];

    // the short row is skipped, the rest of the batch goes through
    let rows = vec![values!["Mike", 15], values!["Shine"], values!["Jane", 20]];
    let res = client.insert(TABLE_NAME, &fields, &rows).await.unwrap();
    assert_eq!(res.rows_affected, 2);

    let res = client.insert(TABLE_NAME, &fields, &[values!["Tom"]]).await;
    assert!(matches!(res, Err(SqlError::EmptyValues(_))));

    // all rows fail: id stays 0
    let id = client
        .prepared_insert(TABLE_NAME, &fields, &[values!["Mike", 15], values!["Tom"]])
        .await;
    assert_eq!(id, 0);

    // a good row followed by a duplicate and a short row keeps the good row's id
    let rows = vec![values!["Tom", 19], values!["Mike", 15], values!["Jane"]];
    let id = client.prepared_insert(TABLE_NAME, &fields, &rows).await;
    let tom = client
        .select_one(TABLE_NAME, &["id"], "where name=?", &values!["Tom"])
        .await
        .unwrap();
    assert_ne!(id, 0);
    assert_eq!(tom.get_parsed::<u64>("id").unwrap(), id);

    client.close().await;
}

/*
cargo test --package crudx-sql --test client_test -- test_select_text --exact --nocapture --ignored
*/
#[tokio::test]
#[ignore = "requires a mysql server"]
async fn test_select_text() {
    const TABLE_NAME: &str = "crudx_user_text";
    let client = fresh_client(TABLE_NAME).await;
    let date = chrono::NaiveDate::from_ymd_opt(2020, 12, 17).unwrap();

    let rows = vec![
        values!["Mike", 15, date],
        values!["Shine", 15, None::<chrono::NaiveDate>],
    ];
    client
        .insert(TABLE_NAME, &["name", "age", "birthday"], &rows)
        .await
        .unwrap();

    let res = client
        .select(TABLE_NAME, &["*"], "where age=? order by id", &values![15])
        .await;
    assert_eq!(res.len(), 2);
    assert_eq!(&res[0]["id"], "1");
    assert_eq!(&res[0]["birthday"], "2020-12-17");
    assert_eq!(&res[1]["birthday"], "");

    let res = client
        .select_distinct(TABLE_NAME, &["age"], "", &[])
        .await;
    assert_eq!(res.len(), 1);

    // nothing matched and a broken query are both empty
    let res = client
        .select(TABLE_NAME, &["name"], "where age>?", &values![99])
        .await;
    assert!(res.is_empty());
    let res = client.select("no_such_table", &["name"], "", &[]).await;
    assert!(res.is_empty());
    assert!(client
        .select_one(TABLE_NAME, &["name"], "where age>?", &values![99])
        .await
        .is_none());

    client.close().await;

    // parse time
    let mut options = options();
    options.with_parse_time(true);
    let client = MysqlClient::new(options).await;

    let row = client
        .select_one(TABLE_NAME, &["birthday"], "where name=?", &values!["Mike"])
        .await
        .unwrap();
    assert_eq!(&row["birthday"], "2020-12-17T00:00:00Z");

    client.close().await;
}

/*
cargo test --package crudx-sql --test client_test -- test_select_interval_and_zero_date --exact --nocapture --ignored
*/
#[tokio::test]
#[ignore = "requires a mysql server"]
async fn test_select_interval_and_zero_date() -> anyhow::Result<()> {
    const TABLE_NAME: &str = "crudx_user_interval";
    let client = fresh_client(TABLE_NAME).await;

    // zero dates need a permissive sql_mode, kept on the transaction's connection
    let mut tx = client.begin().await?;
    sqlx::query("SET SESSION sql_mode = ''")
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!(
        "INSERT INTO {TABLE_NAME}(name, age, birthday, wake) VALUES \
         ('Mike', 15, '0000-00-00', '-01:30:00'), \
         ('Tom', 19, '2020-12-17', '25:00:00'), \
         ('Jane', 20, '2020-12-18', '838:59:59')"
    ))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    let res = client
        .select(TABLE_NAME, &["name", "birthday", "wake"], "order by id", &[])
        .await;
    assert_eq!(res.len(), 3);
    assert_eq!(&res[0]["birthday"], "0000-00-00");
    assert_eq!(&res[0]["wake"], "-01:30:00");
    assert_eq!(&res[1]["wake"], "25:00:00");
    assert_eq!(&res[2]["wake"], "838:59:59");

    client.close().await;

    Ok(())
}

/*
cargo test --package crudx-sql --test client_test -- test_pass_through --exact --nocapture --ignored
*/
#[tokio::test]
#[ignore = "requires a mysql server"]
async fn test_pass_through() -> anyhow::Result<()> {
    const TABLE_NAME: &str = "crudx_user_pass";
    let client = fresh_client(TABLE_NAME).await;

    // rolled back transaction leaves nothing behind
    let mut tx = client.begin().await?;
    sqlx::query(&format!("INSERT INTO {TABLE_NAME}(name, age) VALUES (?, ?)"))
        .bind("Mike")
        .bind(15)
        .execute(&mut *tx)
        .await?;
    tx.rollback().await?;

    let res = client
        .query(&format!("SELECT name FROM {TABLE_NAME}"), &[])
        .await?;
    assert!(res.is_empty());

    // prepared statement
    let que = format!("INSERT INTO {TABLE_NAME}(name, age) VALUES (?, ?)");
    let stmt = client.prepare(&que).await?;
    stmt.query()
        .bind("Jane")
        .bind(20)
        .execute(client.pool())
        .await?;

    let row = client
        .query_row(
            &format!("SELECT name, age FROM {TABLE_NAME} WHERE name=?"),
            &values!["Jane"],
        )
        .await?;
    assert_eq!(row.try_get::<String, _>("name")?, "Jane");
    assert_eq!(row.try_get::<i32, _>("age")?, 20);

    let res = client
        .query_row(
            &format!("SELECT name FROM {TABLE_NAME} WHERE name=?"),
            &values!["Tom"],
        )
        .await;
    assert!(matches!(res, Err(e) if e.is_row_not_found()));

    client.close().await;

    Ok(())
}
