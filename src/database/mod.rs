pub mod schema;

use crate::error::AppError;
use rusqlite::Connection;

/// Opens the session store in the app data directory
pub fn init_database() -> Result<Connection, AppError> {
    let db_path = crate::filesystem::database_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(&db_path)?;
    schema::init_schema(&conn)?;

    Ok(conn)
}
