//! Bracket grouping and rate sheet construction.
//!
//! Rates arrive one row per (bracket, zone). A sheet has one row per bracket
//! and one column per zone of the locale's zone range.

use std::collections::{BTreeSet, HashMap};

use ratekit_io_xlsx::{
    EnumCellValue, N_WIDTH_COL_DEFAULT, SpecXlsxSheetWriteOptions, XlsxWriteError, XlsxWriter,
};

use crate::conf::TUP_HEADINGS_LEADING;
use crate::error::ExportError;
use crate::spec::{
    SpecRateRecord, SpecRateSheet, SpecRateSheetReport, SpecTier, SpecWeightBracketRow,
    SpecZoneRange,
};
use crate::title::format_sheet_title;

////////////////////////////////////////////////////////////////////////////////
// #region BracketGrouping

/// Hashable identity of a (start, end) weight pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BracketKey(u64, u64);

impl BracketKey {
    fn new(start_weight: f64, end_weight: f64) -> Self {
        Self(derive_weight_bits(start_weight), derive_weight_bits(end_weight))
    }
}

// `-0.0` and `0.0` name the same bracket bound.
fn derive_weight_bits(weight: f64) -> u64 {
    if weight == 0.0 {
        0.0f64.to_bits()
    } else {
        weight.to_bits()
    }
}

/// Weight bracket rows in first-seen order, indexed by bracket.
#[derive(Debug, Clone, Default)]
pub struct SpecBracketTable {
    l_rows: Vec<SpecWeightBracketRow>,
    dict_idx_by_bracket: HashMap<BracketKey, usize>,
}

impl SpecBracketTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in: the first record of a bracket seeds its row, every
    /// record sets `row[zone_key] = rate` (a repeated zone overwrites).
    pub fn insert_record(&mut self, record: &SpecRateRecord) {
        let key = BracketKey::new(record.start_weight, record.end_weight);
        let n_idx = match self.dict_idx_by_bracket.get(&key) {
            Some(n_idx) => *n_idx,
            None => {
                self.l_rows.push(SpecWeightBracketRow::new(
                    record.start_weight,
                    record.end_weight,
                ));
                self.dict_idx_by_bracket.insert(key, self.l_rows.len() - 1);
                self.l_rows.len() - 1
            }
        };
        self.l_rows[n_idx]
            .dict_rates_by_zone
            .insert(record.zone_key(), record.rate);
    }

    pub fn rows(&self) -> &[SpecWeightBracketRow] {
        &self.l_rows
    }

    pub fn len(&self) -> usize {
        self.l_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l_rows.is_empty()
    }
}

/// Group records by bracket, preserving the order brackets first appear.
pub fn group_records_by_bracket(records: &[SpecRateRecord]) -> SpecBracketTable {
    let mut table = SpecBracketTable::new();
    for record in records {
        table.insert_record(record);
    }
    table
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetProjection

/// `Start Weight`, `End Weight`, then the zone headings in range order.
pub fn derive_header_row(zone_range: &SpecZoneRange) -> Vec<String> {
    TUP_HEADINGS_LEADING
        .iter()
        .map(|c_heading| c_heading.to_string())
        .chain(zone_range.headings())
        .collect()
}

/// Flatten one bracket row: weights, then one cell per zone key (blank if absent).
pub fn project_bracket_row(
    row: &SpecWeightBracketRow,
    zone_range: &SpecZoneRange,
) -> Vec<EnumCellValue> {
    let mut l_cells = Vec::with_capacity(TUP_HEADINGS_LEADING.len() + zone_range.len());
    l_cells.push(EnumCellValue::Number(row.start_weight));
    l_cells.push(EnumCellValue::Number(row.end_weight));
    l_cells.extend(
        zone_range
            .zones
            .iter()
            .map(|zone| EnumCellValue::from(row.rate(&zone.key))),
    );
    l_cells
}

/// Build the sheet for one tier from its (pre-sorted) records.
///
/// Zone keys outside `zone_range` are kept in the grouped rows but never
/// reach the output; they are listed in the returned report.
pub fn build_rate_sheet(
    records: &[SpecRateRecord],
    tier: &SpecTier,
    zone_range: &SpecZoneRange,
) -> (SpecRateSheet, SpecRateSheetReport) {
    let table = group_records_by_bracket(records);

    let set_zones_dropped: BTreeSet<String> = table
        .rows()
        .iter()
        .flat_map(|row| row.dict_rates_by_zone.keys())
        .filter(|c_key| !zone_range.contains_key(c_key))
        .cloned()
        .collect();

    let sheet = SpecRateSheet {
        title: format_sheet_title(&tier.shipping_speed, &tier.locale),
        header: derive_header_row(zone_range),
        rows: table
            .rows()
            .iter()
            .map(|row| project_bracket_row(row, zone_range))
            .collect(),
    };
    let report = SpecRateSheetReport {
        n_records: records.len(),
        n_brackets: table.len(),
        zones_dropped: set_zones_dropped.into_iter().collect(),
    };

    (sheet, report)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSink

/// Spreadsheet sink: named sheets of flat rows, persisted once.
pub trait SheetSink {
    /// Append a sheet; returns the name it was stored under.
    fn append_sheet(
        &mut self,
        title: &str,
        rows: &[Vec<EnumCellValue>],
        width_col_default: f64,
    ) -> Result<String, XlsxWriteError>;

    /// Write every appended sheet to the output target.
    fn persist(&mut self) -> Result<(), XlsxWriteError>;
}

impl SheetSink for XlsxWriter {
    fn append_sheet(
        &mut self,
        title: &str,
        rows: &[Vec<EnumCellValue>],
        width_col_default: f64,
    ) -> Result<String, XlsxWriteError> {
        let options = SpecXlsxSheetWriteOptions {
            width_col_default,
            ..Default::default()
        };
        self.write_sheet_rows(rows, title, &options)
    }

    fn persist(&mut self) -> Result<(), XlsxWriteError> {
        self.close()
    }
}

/// Append `sheet` (header row first) to `sink`.
pub fn write_rate_sheet<K>(sink: &mut K, sheet: &SpecRateSheet) -> Result<String, ExportError>
where
    K: SheetSink + ?Sized,
{
    sink.append_sheet(&sheet.title, &sheet.to_cell_rows(), N_WIDTH_COL_DEFAULT)
        .map_err(|source| ExportError::Sheet {
            sheet_name: sheet.title.clone(),
            source,
        })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
