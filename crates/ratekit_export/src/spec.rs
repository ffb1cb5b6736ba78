//! Rate export specification models.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use ratekit_io_xlsx::EnumCellValue;

use crate::conf::{CHR_ZONE_INTERNATIONAL_MAX_DEFAULT, N_ZONE_DOMESTIC_MAX_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region TierSpecification

/// Delivery locale of a tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumLocale {
    /// Numeric zones `1..=N`.
    Domestic,
    /// Lettered zones `A..=L`.
    International,
    /// Any other store value; resolves to no zones.
    Unknown(String),
}

impl EnumLocale {
    /// Text used as the store filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
            Self::Unknown(c_locale) => c_locale,
        }
    }

    /// Parse the store filter text.
    pub fn from_db_str(value: &str) -> Self {
        match value {
            "domestic" => Self::Domestic,
            "international" => Self::International,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for EnumLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (shipping speed, locale) combination; one output sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecTier {
    /// Store identifier of the shipping speed (`standard`, `nextDay`, ...).
    pub shipping_speed: String,
    /// Delivery locale.
    pub locale: EnumLocale,
}

impl SpecTier {
    pub fn new(shipping_speed: impl Into<String>, locale: EnumLocale) -> Self {
        Self {
            shipping_speed: shipping_speed.into(),
            locale,
        }
    }
}

impl fmt::Display for SpecTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.locale, self.shipping_speed)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSpecification

/// Raw rate row as returned by the store, filter columns dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRateRecord {
    /// Inclusive lower bound of the weight bracket.
    pub start_weight: f64,
    /// Inclusive upper bound of the weight bracket.
    pub end_weight: f64,
    /// Zone code, case-insensitive.
    pub zone: String,
    /// Price for this bracket and zone.
    pub rate: f64,
}

impl SpecRateRecord {
    pub fn new(start_weight: f64, end_weight: f64, zone: impl Into<String>, rate: f64) -> Self {
        Self {
            start_weight,
            end_weight,
            zone: zone.into(),
            rate,
        }
    }

    /// Column key of this record's zone (`"zone" + uppercase(zone)`).
    pub fn zone_key(&self) -> String {
        format!("zone{}", self.zone.to_uppercase())
    }
}

/// Wide row for one weight bracket: zone key -> rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecWeightBracketRow {
    /// Bracket lower bound, captured from the first record seen.
    pub start_weight: f64,
    /// Bracket upper bound, captured from the first record seen.
    pub end_weight: f64,
    /// Rates keyed by zone key (`zone1`, `zoneC`, ...).
    pub dict_rates_by_zone: BTreeMap<String, f64>,
}

impl SpecWeightBracketRow {
    pub fn new(start_weight: f64, end_weight: f64) -> Self {
        Self {
            start_weight,
            end_weight,
            dict_rates_by_zone: BTreeMap::new(),
        }
    }

    pub fn rate(&self, zone_key: &str) -> Option<f64> {
        self.dict_rates_by_zone.get(zone_key).copied()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ZoneSpecification

/// One zone column: display heading plus internal key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecZone {
    /// Header text, e.g. `Zone 3`.
    pub heading: String,
    /// Row key, e.g. `zone3`.
    pub key: String,
}

impl SpecZone {
    /// Build heading/key from a zone label (`3` -> `Zone 3` / `zone3`).
    pub fn from_label(label: impl fmt::Display) -> Self {
        Self {
            heading: format!("Zone {label}"),
            key: format!("zone{label}"),
        }
    }
}

/// Ordered zone columns of a locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecZoneRange {
    pub zones: Vec<SpecZone>,
}

impl SpecZoneRange {
    pub fn headings(&self) -> Vec<String> {
        self.zones.iter().map(|zone| zone.heading.clone()).collect()
    }

    pub fn keys(&self) -> Vec<String> {
        self.zones.iter().map(|zone| zone.key.clone()).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.zones.iter().any(|zone| zone.key == key)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<SpecZone> for SpecZoneRange {
    fn from_iter<T: IntoIterator<Item = SpecZone>>(iter: T) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

/// Configured upper bounds of both zone families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecZoneBounds {
    /// Highest domestic zone number; `< 1` yields no domestic zones.
    pub n_zone_domestic_max: i64,
    /// Highest international zone letter; below `A` yields no zones.
    pub chr_zone_international_max: char,
}

impl Default for SpecZoneBounds {
    fn default() -> Self {
        Self {
            n_zone_domestic_max: N_ZONE_DOMESTIC_MAX_DEFAULT,
            chr_zone_international_max: CHR_ZONE_INTERNATIONAL_MAX_DEFAULT,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecification

/// Fully built sheet, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRateSheet {
    pub title: String,
    /// `Start Weight`, `End Weight`, then zone headings.
    pub header: Vec<String>,
    /// One row per weight bracket, first-seen order.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecRateSheet {
    /// Header followed by data rows, as written to the sink.
    pub fn to_cell_rows(&self) -> Vec<Vec<EnumCellValue>> {
        let mut l_rows = Vec::with_capacity(self.rows.len() + 1);
        l_rows.push(
            self.header
                .iter()
                .map(|c_heading| EnumCellValue::String(c_heading.clone()))
                .collect(),
        );
        l_rows.extend(self.rows.iter().cloned());
        l_rows
    }
}

/// Diagnostics from building one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecRateSheetReport {
    pub n_records: usize,
    pub n_brackets: usize,
    /// Zone keys present in the data but outside the zone range (sorted, unique).
    pub zones_dropped: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Outcome of one exported tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTierReport {
    pub tier: SpecTier,
    /// Sheet name actually used in the workbook.
    pub sheet_name: String,
    pub n_records: usize,
    pub n_rows: usize,
    pub zones_dropped: Vec<String>,
}

/// Outcome of a full export run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecExportReport {
    pub tiers: Vec<SpecTierReport>,
    pub path_file_out: PathBuf,
}

impl SpecExportReport {
    pub fn cnt_records(&self) -> usize {
        self.tiers.iter().map(|tier| tier.n_records).sum()
    }

    pub fn cnt_rows(&self) -> usize {
        self.tiers.iter().map(|tier| tier.n_rows).sum()
    }

    pub fn cnt_zones_dropped(&self) -> usize {
        self.tiers.iter().map(|tier| tier.zones_dropped.len()).sum()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheets={} records={} rows={} zones_dropped={} file={}",
            self.tiers.len(),
            self.cnt_records(),
            self.cnt_rows(),
            self.cnt_zones_dropped(),
            self.path_file_out.display()
        )
    }
}

impl fmt::Display for SpecExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[EXPORT]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
