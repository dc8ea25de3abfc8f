use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{MedicineRecord, Session};

/// Timestamp column format, matching the original store schema.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert a session and return the id the store assigned.
pub fn insert_session(conn: &Connection, session: &Session) -> Result<i64, DatabaseError> {
    let mentions_json = serde_json::to_string(&session.mentions)?;
    let records_json = serde_json::to_string(&session.records)?;

    conn.execute(
        "INSERT INTO sessions (timestamp, file_name, content_preview, mentions_json, records_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            session.file_name,
            session.content_preview,
            mentions_json,
            records_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All stored sessions, newest first. `limit` of None returns everything.
pub fn list_sessions(
    conn: &Connection,
    limit: Option<usize>,
) -> Result<Vec<Session>, DatabaseError> {
    // A negative bound limit disables the cap in SQLite.
    let limit = limit.map_or(-1, |n| n as i64);

    let mut stmt = conn.prepare(
        "SELECT id, timestamp, file_name, content_preview, mentions_json, records_json
         FROM sessions ORDER BY timestamp DESC, id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(SessionRow {
            id: row.get(0)?,
            timestamp: row.get::<_, String>(1)?,
            file_name: row.get(2)?,
            content_preview: row.get(3)?,
            mentions_json: row.get::<_, String>(4)?,
            records_json: row.get::<_, String>(5)?,
        })
    })?;

    let mut sessions = Vec::new();
    for row in rows {
        sessions.push(session_from_row(row?)?);
    }
    Ok(sessions)
}

struct SessionRow {
    id: i64,
    timestamp: String,
    file_name: String,
    content_preview: String,
    mentions_json: String,
    records_json: String,
}

fn session_from_row(row: SessionRow) -> Result<Session, DatabaseError> {
    let timestamp = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| DatabaseError::CorruptRow {
            id: row.id,
            reason: format!("bad timestamp: {e}"),
        })?;
    let mentions: Vec<String> =
        serde_json::from_str(&row.mentions_json).map_err(|e| DatabaseError::CorruptRow {
            id: row.id,
            reason: format!("bad mentions json: {e}"),
        })?;
    let records: Vec<MedicineRecord> =
        serde_json::from_str(&row.records_json).map_err(|e| DatabaseError::CorruptRow {
            id: row.id,
            reason: format!("bad records json: {e}"),
        })?;

    Ok(Session {
        id: Some(row.id),
        timestamp,
        file_name: row.file_name,
        content_preview: row.content_preview,
        mentions,
        records,
    })
}
