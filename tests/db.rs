use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;

mod common;

#[derive(QueryableByName)]
struct Flag {
    #[diesel(sql_type = BigInt)]
    foreign_keys: i64,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_db.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_pool_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let mut conn = test_db.pool().get().unwrap();
    let flag: Flag = sql_query("PRAGMA foreign_keys").get_result(&mut conn).unwrap();
    assert_eq!(flag.foreign_keys, 1);
}
