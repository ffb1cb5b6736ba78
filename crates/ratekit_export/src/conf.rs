//! Export constants, tier list and environment-backed configuration.

use std::fmt;
use std::path::PathBuf;

use tracing::warn;

use crate::spec::{EnumLocale, SpecTier, SpecZoneBounds};

/// Client whose rates are exported. Not overridable.
pub const N_CLIENT_ID: i64 = 1240;
/// Output workbook path. Not overridable.
pub const C_FILE_OUT: &str = "uploads/Whitebox-Export.xlsx";

/// Default highest domestic zone (`8` = zones 1-8).
pub const N_ZONE_DOMESTIC_MAX_DEFAULT: i64 = 8;
/// Default highest international zone (`O` = zones A-O).
pub const CHR_ZONE_INTERNATIONAL_MAX_DEFAULT: char = 'O';

/// Leading header labels preceding the zone headings.
pub const TUP_HEADINGS_LEADING: [&str; 2] = ["Start Weight", "End Weight"];

/// Exported tiers as `(shipping_speed, locale)`, in sheet order.
pub const TUP_TIERS_DEFAULT: [(&str, &str); 5] = [
    ("standard", "domestic"),
    ("expedited", "domestic"),
    ("nextDay", "domestic"),
    ("intlEconomy", "international"),
    ("intlExpedited", "international"),
];

/// Shipping speeds whose display text is not the capitalized identifier.
pub const TUP_SHIPPING_SPEED_DISPLAY_OVERRIDES: [(&str, &str); 3] = [
    ("nextDay", "Next Day"),
    ("intlExpedited", "Expedited"),
    ("intlEconomy", "Economy"),
];

pub const C_ENV_ZONE_DOMESTIC_MAX: &str = "MAX_DOMESTIC_ZONE";
pub const C_ENV_ZONE_INTERNATIONAL_MAX: &str = "MAX_INTERNATIONAL_ZONE";
pub const C_ENV_DATABASE_HOST: &str = "DATABASE_HOST";
pub const C_ENV_DATABASE_USER: &str = "DATABASE_USER";
pub const C_ENV_DATABASE_PASS: &str = "DATABASE_PASS";
pub const C_ENV_DATABASE_NAME: &str = "DATABASE_NAME";

/// Build the fixed tier list from [`TUP_TIERS_DEFAULT`].
pub fn derive_default_tiers() -> Vec<SpecTier> {
    TUP_TIERS_DEFAULT
        .iter()
        .map(|(c_speed, c_locale)| SpecTier::new(*c_speed, EnumLocale::from_db_str(c_locale)))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////
// #region StoreConfig

/// Rate store connection parameters.
///
/// The SQLite backend only reads `database`; host and credentials are kept for
/// networked backends behind [`crate::store::RateStore`].
#[derive(Clone, PartialEq, Eq)]
pub struct SpecStoreConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl SpecStoreConfig {
    /// SQLite file for `database`; a bare name gets the `.db` extension.
    pub fn sqlite_path(&self) -> PathBuf {
        let path_db = PathBuf::from(&self.database);
        if path_db.extension().is_none() {
            path_db.with_extension("db")
        } else {
            path_db
        }
    }
}

impl Default for SpecStoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            user: "root".to_string(),
            password: "secret".to_string(),
            database: "whitebox".to_string(),
        }
    }
}

impl fmt::Debug for SpecStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecStoreConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportConfig

/// Everything one export run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportConfig {
    pub client_id: i64,
    pub tiers: Vec<SpecTier>,
    pub zone_bounds: SpecZoneBounds,
    pub store: SpecStoreConfig,
    pub path_file_out: PathBuf,
}

impl Default for SpecExportConfig {
    fn default() -> Self {
        Self {
            client_id: N_CLIENT_ID,
            tiers: derive_default_tiers(),
            zone_bounds: SpecZoneBounds::default(),
            store: SpecStoreConfig::default(),
            path_file_out: PathBuf::from(C_FILE_OUT),
        }
    }
}

impl SpecExportConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`. Unset and empty values keep defaults.
    ///
    /// Zone bounds are taken as given: unreadable text is logged and yields
    /// an empty zone range instead of failing the run.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(value) = read(C_ENV_ZONE_DOMESTIC_MAX) {
            config.zone_bounds.n_zone_domestic_max = parse_zone_domestic_max(&value);
        }
        if let Some(value) = read(C_ENV_ZONE_INTERNATIONAL_MAX) {
            config.zone_bounds.chr_zone_international_max = parse_zone_international_max(&value);
        }

        if let Some(value) = read(C_ENV_DATABASE_HOST) {
            config.store.host = value;
        }
        if let Some(value) = read(C_ENV_DATABASE_USER) {
            config.store.user = value;
        }
        if let Some(value) = read(C_ENV_DATABASE_PASS) {
            config.store.password = value;
        }
        if let Some(value) = read(C_ENV_DATABASE_NAME) {
            config.store.database = value;
        }

        config
    }
}

// Non-integer text resolves to no domestic zones.
fn parse_zone_domestic_max(value: &str) -> i64 {
    match value.trim().parse::<i64>() {
        Ok(n_zone) => n_zone,
        Err(err) => {
            warn!(
                key = C_ENV_ZONE_DOMESTIC_MAX,
                value,
                error = %err,
                "Domestic zone bound is not an integer; no domestic zones"
            );
            0
        }
    }
}

// First character wins; case and range are left untouched.
fn parse_zone_international_max(value: &str) -> char {
    let mut chars = value.chars();
    let chr_zone = chars.next().unwrap_or(CHR_ZONE_INTERNATIONAL_MAX_DEFAULT);
    if chars.next().is_some() {
        warn!(
            key = C_ENV_ZONE_INTERNATIONAL_MAX,
            value,
            "International zone bound has more than one character; using {chr_zone:?}"
        );
    }
    chr_zone
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
