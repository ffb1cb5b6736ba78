//! Rate store capability and its SQLite backend.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};
use tracing::debug;

use crate::conf::SpecStoreConfig;
use crate::error::StoreError;
use crate::spec::{SpecRateRecord, SpecTier};

/// Expected `rates` table layout.
pub const C_SQL_CREATE_RATES: &str = r#"
    CREATE TABLE IF NOT EXISTS rates (
        client_id       INTEGER NOT NULL,
        shipping_speed  TEXT    NOT NULL,
        locale          TEXT    NOT NULL,
        start_weight    REAL    NOT NULL,
        end_weight      REAL    NOT NULL,
        zone            TEXT    NOT NULL,
        rate            REAL    NOT NULL
    )
"#;

const C_SQL_SELECT_RATES: &str = r#"
    SELECT start_weight, end_weight, zone, rate
    FROM rates
    WHERE client_id = ?1 AND shipping_speed = ?2 AND locale = ?3
    ORDER BY start_weight, end_weight, zone
"#;

/// Query capability over rate rows.
///
/// Implementations return the rows of one tier sorted by
/// (start_weight, end_weight, zone) ascending.
pub trait RateStore {
    fn query_rates(
        &self,
        client_id: i64,
        shipping_speed: &str,
        locale: &str,
    ) -> Result<Vec<SpecRateRecord>, StoreError>;
}

/// Fetch one tier's records in bracket order.
///
/// The backend is asked to sort; the order is re-established here with a
/// stable sort so grouping never depends on the backend honoring it.
pub fn fetch_rates<S>(
    store: &S,
    client_id: i64,
    tier: &SpecTier,
) -> Result<Vec<SpecRateRecord>, StoreError>
where
    S: RateStore + ?Sized,
{
    let mut l_records = store.query_rates(client_id, &tier.shipping_speed, tier.locale.as_str())?;
    order_rate_records(&mut l_records);
    debug!(
        client_id,
        tier = %tier,
        n_records = l_records.len(),
        "Fetched rate records"
    );
    Ok(l_records)
}

/// Stable sort by (start_weight, end_weight, zone).
pub fn order_rate_records(records: &mut [SpecRateRecord]) {
    records.sort_by(|a, b| {
        a.start_weight
            .total_cmp(&b.start_weight)
            .then_with(|| a.end_weight.total_cmp(&b.end_weight))
            .then_with(|| a.zone.cmp(&b.zone))
    });
}

////////////////////////////////////////////////////////////////////////////////
// #region SqliteBackend

/// Read-only SQLite rate store. Owns its connection for the whole run.
pub struct SqliteRateStore {
    conn: Connection,
    path_db: PathBuf,
}

impl SqliteRateStore {
    /// Open the database named by `config` read-only.
    pub fn open(config: &SpecStoreConfig) -> Result<Self, StoreError> {
        let path_db = config.sqlite_path();
        let conn = Connection::open_with_flags(
            &path_db,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Connection {
            path: path_db.clone(),
            source,
        })?;
        Ok(Self { conn, path_db })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection, path_db: impl Into<PathBuf>) -> Self {
        Self {
            conn,
            path_db: path_db.into(),
        }
    }

    pub fn path_db(&self) -> &Path {
        &self.path_db
    }

    /// Release the connection, surfacing close errors.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn
            .close()
            .map_err(|(_conn, err)| StoreError::Close(err))
    }
}

impl RateStore for SqliteRateStore {
    fn query_rates(
        &self,
        client_id: i64,
        shipping_speed: &str,
        locale: &str,
    ) -> Result<Vec<SpecRateRecord>, StoreError> {
        let c_tier = format!("{locale} {shipping_speed}");
        let to_store_error = |source: rusqlite::Error| StoreError::Query {
            tier: c_tier.clone(),
            source,
        };

        let mut stmt = self
            .conn
            .prepare_cached(C_SQL_SELECT_RATES)
            .map_err(to_store_error)?;
        let l_records = stmt
            .query_map(params![client_id, shipping_speed, locale], |row| {
                Ok(SpecRateRecord {
                    start_weight: row.get(0)?,
                    end_weight: row.get(1)?,
                    zone: derive_zone_text(row.get(2)?),
                    rate: row.get(3)?,
                })
            })
            .map_err(to_store_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(to_store_error)?;

        Ok(l_records)
    }
}

// Integer-affinity zones (`3`) read back as their decimal text.
fn derive_zone_text(value: Value) -> String {
    match value {
        Value::Text(c_zone) => c_zone,
        Value::Integer(n_zone) => n_zone.to_string(),
        Value::Real(x_zone) => x_zone.to_string(),
        Value::Blob(v_zone) => String::from_utf8_lossy(&v_zone).into_owned(),
        Value::Null => String::new(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
