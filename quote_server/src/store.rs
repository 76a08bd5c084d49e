//! Persistence adapter: one bounded-time insert per request.
//!
//! `SqliteQuoteStore` keeps a single SQLite connection behind a mutex and runs
//! every write on tokio's blocking pool. A write that misses its deadline is
//! reported as `Timeout`; if it is still queued behind the connection lock it is
//! abandoned, and if its statement is already running it is aborted by that
//! job's own progress handler, leaving other writes on the connection alone. Either
//! way the caller must treat the record as not persisted.
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use quote_common::{Deadline, QuoteError, QuoteRecord, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::model::stored_quote::StoredQuote;

/// Operation name reported in store timeouts.
pub const STORE_OPERATION: &str = "store write";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS quotes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    code        TEXT NOT NULL,
    codein      TEXT NOT NULL,
    name        TEXT NOT NULL,
    high        TEXT NOT NULL,
    low         TEXT NOT NULL,
    var_bid     TEXT NOT NULL,
    pct_change  TEXT NOT NULL,
    bid         TEXT NOT NULL,
    ask         TEXT NOT NULL,
    timestamp   TEXT NOT NULL,
    create_date TEXT NOT NULL
)";

const INSERT: &str = "INSERT INTO quotes (
    created_at, updated_at, code, codein, name, high, low,
    var_bid, pct_change, bid, ask, timestamp, create_date
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

const SELECT_LATEST: &str = "SELECT id, created_at, updated_at, code, codein, name, high, low,
    var_bid, pct_change, bid, ask, timestamp, create_date
FROM quotes ORDER BY id DESC LIMIT 1";

// Lifecycle of one write job.
const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const DONE: u8 = 2;
const ABANDONED: u8 = 3;

/// VM instructions between checks for an abandoned write.
const PROGRESS_OPS: i32 = 1_000;

/// Durable sink for fetched quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Inserts `record` within `deadline` and returns the id assigned by the store.
    async fn persist(&self, record: &QuoteRecord, deadline: Deadline) -> Result<i64>;
}

/// SQLite-backed store.
pub struct SqliteQuoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteQuoteStore {
    /// Opens (or creates) the database at `path` and makes sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(store_error)?;
        info!("Quote store opened at {}", path.display());
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE).map_err(store_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of persisted quotes.
    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))
            .map_err(store_error)?;
        Ok(count as u64)
    }

    /// Most recently persisted quote, if any.
    pub fn latest(&self) -> Result<Option<StoredQuote>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(SELECT_LATEST, [], read_row)
            .optional()
            .map_err(store_error)?;
        row.map(|(id, created_at, updated_at, record)| {
            Ok(StoredQuote {
                id,
                created_at: parse_time(&created_at)?,
                updated_at: parse_time(&updated_at)?,
                record,
            })
        })
        .transpose()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| QuoteError::Store(format!("connection lock poisoned: {}", e)))
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn persist(&self, record: &QuoteRecord, deadline: Deadline) -> Result<i64> {
        let conn = Arc::clone(&self.conn);
        let record = record.clone();
        let state = Arc::new(AtomicU8::new(PENDING));
        let job_state = Arc::clone(&state);

        let write = async move {
            tokio::task::spawn_blocking(move || {
                let conn = conn
                    .lock()
                    .map_err(|e| QuoteError::Store(format!("connection lock poisoned: {}", e)))?;
                if job_state
                    .compare_exchange(PENDING, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
                {
                    return Err(QuoteError::Store("write abandoned after deadline".into()));
                }
                // Scoped to this job: a later write on the same connection
                // installs its own handler and never sees this state.
                let abort_state = Arc::clone(&job_state);
                conn.progress_handler(
                    PROGRESS_OPS,
                    Some(move || abort_state.load(Ordering::SeqCst) == ABANDONED),
                );
                let result = insert(&conn, &record, Utc::now());
                conn.progress_handler(0, None::<fn() -> bool>);
                let _ = job_state.compare_exchange(RUNNING, DONE, Ordering::SeqCst, Ordering::SeqCst);
                result
            })
            .await
            .map_err(|e| QuoteError::Store(format!("write task failed: {}", e)))?
        };

        let result = deadline.run(STORE_OPERATION, write).await;
        match &result {
            Ok(id) => debug!("Quote persisted with id {}", id),
            Err(e) => {
                if e.is_timeout() {
                    state.swap(ABANDONED, Ordering::SeqCst);
                }
                error!("Error during quote saving: {}", e);
            }
        }
        result
    }
}

fn insert(conn: &Connection, record: &QuoteRecord, now: DateTime<Utc>) -> Result<i64> {
    let stamp = now.to_rfc3339();
    conn.execute(
        INSERT,
        params![
            stamp,
            stamp,
            record.code,
            record.codein,
            record.name,
            record.high,
            record.low,
            record.var_bid,
            record.pct_change,
            record.bid,
            record.ask,
            record.timestamp,
            record.create_date,
        ],
    )
    .map_err(store_error)?;
    Ok(conn.last_insert_rowid())
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, QuoteRecord)> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        QuoteRecord {
            code: row.get(3)?,
            codein: row.get(4)?,
            name: row.get(5)?,
            high: row.get(6)?,
            low: row.get(7)?,
            var_bid: row.get(8)?,
            pct_change: row.get(9)?,
            bid: row.get(10)?,
            ask: row.get(11)?,
            timestamp: row.get(12)?,
            create_date: row.get(13)?,
        },
    ))
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| QuoteError::Store(format!("invalid timestamp {:?}: {}", raw, e)))
}

fn store_error(err: rusqlite::Error) -> QuoteError {
    QuoteError::Store(err.to_string())
}
