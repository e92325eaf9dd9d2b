use rusqlite::{Connection, Result};

/// Initialize the session store schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        create_schema(conn)?;
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Version 1: one row per login kind
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            kind TEXT CHECK(kind IN ('admin', 'user')) PRIMARY KEY,
            session_id TEXT NOT NULL,
            user_json TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS update_sessions_timestamp
         AFTER UPDATE ON sessions
         BEGIN
            UPDATE sessions SET updated_at = CURRENT_TIMESTAMP WHERE kind = NEW.kind;
         END",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let versions: i32 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO sessions (kind, session_id, user_json) VALUES ('guest', 'x', '{}')",
            [],
        );
        assert!(result.is_err());
    }
}
