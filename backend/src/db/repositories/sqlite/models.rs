use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};

/// One row of `PRAGMA table_info(<table>)`.
#[derive(Debug, Clone, QueryableByName)]
pub struct ColumnInfo {
    #[diesel(sql_type = Integer)]
    #[allow(dead_code)]
    pub cid: i32,
    #[diesel(sql_type = Text)]
    pub name: String,
}
