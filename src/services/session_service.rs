use crate::error::AppError;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use vipix_auth::{AdminSession, AuthUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Admin,
    User,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Admin => "admin",
            SessionKind::User => "user",
        }
    }
}

/// Signed-in identities restored at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub admin: Option<AdminSession>,
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.admin.is_some()
    }
}

fn save<T: Serialize>(
    conn: &Connection,
    kind: SessionKind,
    session_id: &str,
    value: &T,
) -> Result<(), AppError> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO sessions (kind, session_id, user_json) VALUES (?1, ?2, ?3)
         ON CONFLICT(kind) DO UPDATE SET session_id = excluded.session_id, user_json = excluded.user_json",
        (kind.as_str(), session_id, &json),
    )?;
    Ok(())
}

fn load<T: DeserializeOwned>(conn: &Connection, kind: SessionKind) -> Result<Option<T>, AppError> {
    let json: Option<String> = conn
        .query_row(
            "SELECT user_json FROM sessions WHERE kind = ?1",
            [kind.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Discarding unreadable {} session: {}", kind.as_str(), e);
                clear_session(conn, kind)?;
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// Stores the admin session, replacing any previous one
pub fn save_admin_session(conn: &Connection, session: &AdminSession) -> Result<(), AppError> {
    save(conn, SessionKind::Admin, &session.session_id, session)?;
    log::info!("Stored admin session for {}", session.user.username);
    Ok(())
}

pub fn load_admin_session(conn: &Connection) -> Result<Option<AdminSession>, AppError> {
    load(conn, SessionKind::Admin)
}

pub fn save_user(conn: &Connection, user: &AuthUser) -> Result<(), AppError> {
    save(conn, SessionKind::User, &user.id.to_string(), user)
}

pub fn load_user(conn: &Connection) -> Result<Option<AuthUser>, AppError> {
    load(conn, SessionKind::User)
}

pub fn clear_session(conn: &Connection, kind: SessionKind) -> Result<(), AppError> {
    conn.execute("DELETE FROM sessions WHERE kind = ?1", [kind.as_str()])?;
    Ok(())
}

pub fn load_session(conn: &Connection) -> Result<Session, AppError> {
    Ok(Session {
        admin: load_admin_session(conn)?,
        user: load_user(conn)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;
    use vipix_auth::AdminUser;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn admin(session_id: &str) -> AdminSession {
        AdminSession {
            session_id: session_id.to_string(),
            user: AdminUser {
                id: 1,
                username: "root".to_string(),
                email: "root@vipix.app".to_string(),
            },
        }
    }

    #[test]
    fn test_admin_session_round_trip_and_replace() {
        let conn = setup_test_db();
        assert!(load_admin_session(&conn).unwrap().is_none());

        save_admin_session(&conn, &admin("s1")).unwrap();
        save_admin_session(&conn, &admin("s2")).unwrap();

        let loaded = load_admin_session(&conn).unwrap().unwrap();
        assert_eq!(loaded.session_id, "s2");
        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_logout_clears_only_admin() {
        let conn = setup_test_db();
        save_admin_session(&conn, &admin("s1")).unwrap();
        save_user(
            &conn,
            &AuthUser {
                id: 4,
                username: "sarah@x.io".to_string(),
                email: "sarah@x.io".to_string(),
                first_name: Some("Sarah".to_string()),
                last_name: None,
            },
        )
        .unwrap();

        clear_session(&conn, SessionKind::Admin).unwrap();
        let session = load_session(&conn).unwrap();
        assert!(!session.is_admin());
        assert_eq!(session.user.unwrap().id, 4);
    }

    #[test]
    fn test_corrupt_row_is_discarded() {
        let conn = setup_test_db();
        conn.execute(
            "INSERT INTO sessions (kind, session_id, user_json) VALUES ('admin', 'x', 'not json')",
            [],
        )
        .unwrap();
        assert!(load_admin_session(&conn).unwrap().is_none());
        assert!(load_admin_session(&conn).unwrap().is_none());
    }
}
