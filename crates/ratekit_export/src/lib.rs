//! `ratekit_export` v1:
//! Shipping-rate workbook export.
//!
//! Pipeline per tier: `store` (fetch) -> `zone` + `title` -> `sheet` (pivot)
//! -> sink; `export` drives the tiers and persists once.
//!
//! - `conf`   : constants, tier list, environment-backed config
//! - `spec`   : records, tiers, zone ranges, sheets, reports
//! - `error`  : layered error types
//! - `zone`   : zone range resolution per locale
//! - `title`  : sheet title formatting
//! - `sheet`  : bracket grouping and sheet construction
//! - `store`  : rate store capability and SQLite backend
//! - `export` : tier loop orchestration
pub mod conf;
pub mod error;
pub mod export;
pub mod sheet;
pub mod spec;
pub mod store;
pub mod title;
pub mod zone;

pub use conf::{SpecExportConfig, SpecStoreConfig, derive_default_tiers};
pub use error::{ExportError, StoreError};
pub use export::{export_all, run_export};
pub use sheet::{
    SheetSink, SpecBracketTable, build_rate_sheet, derive_header_row, group_records_by_bracket,
    project_bracket_row, write_rate_sheet,
};
pub use spec::{
    EnumLocale, SpecExportReport, SpecRateRecord, SpecRateSheet, SpecRateSheetReport,
    SpecTier, SpecTierReport, SpecWeightBracketRow, SpecZone, SpecZoneBounds, SpecZoneRange,
};
pub use store::{RateStore, SqliteRateStore, fetch_rates, order_rate_records};
pub use title::{derive_shipping_speed_display, format_sheet_title};
pub use zone::resolve_zone_range;
