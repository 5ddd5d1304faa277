use serde_json::json;
use sqlite_plugin::prelude::*;

fn open_db() -> Result<SqliteClient, SqlitePluginError> {
    let db = SqliteClient::open(SqliteOptions::in_memory())?;
    db.run("CREATE TABLE ledger (id INTEGER PRIMARY KEY, account TEXT UNIQUE, amount INTEGER)")?;
    Ok(db)
}

fn count(db: &SqliteClient) -> Result<i64, SqlitePluginError> {
    let row = db.select("SELECT COUNT(*) AS n FROM ledger")?;
    Ok(row
        .single()
        .and_then(|r| r.get("n"))
        .and_then(RowValues::as_int)
        .copied()
        .unwrap_or(-1))
}

#[test]
fn commits_all_statements_in_order() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    let results = db.transaction(&[
        "INSERT INTO ledger (account, amount) VALUES ('a', 10)",
        "INSERT INTO ledger (account, amount) VALUES ('b', 20)",
        "UPDATE ledger SET amount = amount + 1",
    ])?;

    assert_eq!(
        results,
        vec![
            RunOutcome::new(1, 1),
            RunOutcome::new(1, 2),
            RunOutcome::new(2, 2),
        ]
    );
    assert!(db.connection().is_autocommit());
    assert_eq!(
        db.selects("SELECT account, amount FROM ledger ORDER BY id")?.to_json(),
        json!([
            {"account": "a", "amount": 11},
            {"account": "b", "amount": 21},
        ])
    );
    Ok(())
}

#[test]
fn ddl_inside_batch_reports_zero_changes() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    db.run("INSERT INTO ledger (account, amount) VALUES ('a', 1), ('b', 2), ('c', 3)")?;

    let results = db.transaction(&[
        "CREATE TABLE archive (id INTEGER)",
        "UPDATE ledger SET amount = 0",
        "CREATE INDEX ledger_amount ON ledger (amount)",
    ])?;
    assert_eq!(
        results.iter().map(|r| r.changes).collect::<Vec<_>>(),
        vec![0, 3, 0]
    );
    Ok(())
}

#[test]
fn failing_statement_rolls_back_earlier_writes() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    let statements = vec![
        "INSERT INTO ledger (account, amount) VALUES ('a', 10)".to_string(),
        "INSERT INTO missing_table VALUES (1)".to_string(),
        "INSERT INTO ledger (account, amount) VALUES ('c', 30)".to_string(),
    ];

    let err = db
        .transaction(statements.as_slice())
        .expect_err("second statement fails");

    match &err {
        SqlitePluginError::TransactionError { statements: attempted, source } => {
            assert_eq!(attempted, &statements);
            assert!(matches!(**source, SqlitePluginError::SyntaxError { .. }));
        }
        other => panic!("expected transaction error, got {other:?}"),
    }
    assert_eq!(err.statements(), Some(statements.as_slice()));
    assert_eq!(err.statement(), Some("INSERT INTO missing_table VALUES (1)"));

    assert_eq!(count(&db)?, 0);
    assert!(db.connection().is_autocommit());
    Ok(())
}

#[test]
fn constraint_failure_rolls_back() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    db.insert("INSERT INTO ledger (account, amount) VALUES ('existing', 1)")?;

    let err = db
        .transaction(&[
            "INSERT INTO ledger (account, amount) VALUES ('fresh', 5)",
            "UPDATE ledger SET amount = 99 WHERE account = 'existing'",
            "INSERT INTO ledger (account, amount) VALUES ('existing', 2)",
        ])
        .expect_err("unique violation");

    assert_eq!(err.statements().map(<[String]>::len), Some(3));
    assert!(matches!(
        err,
        SqlitePluginError::TransactionError { ref source, .. }
            if matches!(**source, SqlitePluginError::ExecutionError { .. })
    ));

    let rows = db.selects("SELECT account, amount FROM ledger")?;
    assert_eq!(rows.to_json(), json!([{"account": "existing", "amount": 1}]));
    Ok(())
}

#[test]
fn failing_commit_rolls_back() -> Result<(), SqlitePluginError> {
    let db = SqliteClient::open(SqliteOptions::in_memory())?;
    db.connection().execute_batch(
        "PRAGMA foreign_keys = ON;
         CREATE TABLE parent (id INTEGER PRIMARY KEY);
         CREATE TABLE child (
             id INTEGER PRIMARY KEY,
             parent_id INTEGER REFERENCES parent(id) DEFERRABLE INITIALLY DEFERRED
         );",
    )?;

    let err = db
        .transaction(&["INSERT INTO child (parent_id) VALUES (42)"])
        .expect_err("deferred foreign key fails at commit");
    assert!(matches!(err, SqlitePluginError::TransactionError { .. }));
    assert_eq!(err.statement(), None);

    assert!(db.connection().is_autocommit());
    assert!(db.selects("SELECT * FROM child")?.is_empty());
    Ok(())
}

#[test]
fn nested_transaction_leaves_outer_open() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    db.connection().execute_batch("BEGIN")?;
    db.run("INSERT INTO ledger (account, amount) VALUES ('outer', 1)")?;

    let err = db
        .transaction(&["INSERT INTO ledger (account, amount) VALUES ('inner', 2)"])
        .expect_err("no nested transactions");
    assert!(matches!(
        err,
        SqlitePluginError::TransactionError { ref source, .. }
            if matches!(**source, SqlitePluginError::SqliteError(_))
    ));

    // the outer transaction was not rolled back by the failed call
    assert!(!db.connection().is_autocommit());
    assert_eq!(count(&db)?, 1);

    db.connection().execute_batch("ROLLBACK")?;
    assert_eq!(count(&db)?, 0);
    Ok(())
}

#[test]
fn empty_batch_commits_nothing() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    let none: [&str; 0] = [];
    assert!(db.transaction(&none)?.is_empty());
    assert!(db.connection().is_autocommit());
    Ok(())
}

#[test]
fn client_is_usable_after_rollback() -> Result<(), SqlitePluginError> {
    let db = open_db()?;
    assert!(
        db.transaction(&["INSERT INTO ledger (account) VALUES ('x')", "BOGUS"])
            .is_err()
    );
    let results = db.transaction(&["INSERT INTO ledger (account) VALUES ('x')"])?;
    assert_eq!(results.len(), 1);
    assert_eq!(count(&db)?, 1);
    Ok(())
}
