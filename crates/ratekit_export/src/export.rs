//! Tier loop: fetch, pivot and append one sheet per tier, then persist once.

use ratekit_io_xlsx::XlsxWriter;
use tracing::{error, info, warn};

use crate::conf::SpecExportConfig;
use crate::error::ExportError;
use crate::sheet::{SheetSink, build_rate_sheet, write_rate_sheet};
use crate::spec::{SpecExportReport, SpecTierReport};
use crate::store::{RateStore, SqliteRateStore, fetch_rates};
use crate::zone::resolve_zone_range;

/// Export every configured tier, in order, into `sink`.
///
/// Tiers run strictly one after another. The first failure aborts the run
/// and nothing is persisted.
pub fn export_all<S, K>(
    store: &S,
    sink: &mut K,
    config: &SpecExportConfig,
) -> Result<SpecExportReport, ExportError>
where
    S: RateStore + ?Sized,
    K: SheetSink + ?Sized,
{
    let mut report = SpecExportReport {
        tiers: Vec::with_capacity(config.tiers.len()),
        path_file_out: config.path_file_out.clone(),
    };

    for tier in &config.tiers {
        info!(tier = %tier, "Fetching rates");
        let l_records = fetch_rates(store, config.client_id, tier)?;

        let zone_range = resolve_zone_range(&tier.locale, &config.zone_bounds);
        if zone_range.is_empty() {
            warn!(tier = %tier, "Zone range is empty; sheet has no zone columns");
        }

        let (sheet, sheet_report) = build_rate_sheet(&l_records, tier, &zone_range);
        if !sheet_report.zones_dropped.is_empty() {
            warn!(
                tier = %tier,
                zones = ?sheet_report.zones_dropped,
                "Zones outside the configured range were omitted"
            );
        }

        let sheet_name = write_rate_sheet(sink, &sheet)?;
        info!(
            tier = %tier,
            sheet = %sheet_name,
            n_records = sheet_report.n_records,
            n_rows = sheet.rows.len(),
            "Sheet written"
        );

        report.tiers.push(SpecTierReport {
            tier: tier.clone(),
            sheet_name,
            n_records: sheet_report.n_records,
            n_rows: sheet.rows.len(),
            zones_dropped: sheet_report.zones_dropped,
        });
    }

    sink.persist().map_err(|source| ExportError::Persist {
        path: config.path_file_out.clone(),
        source,
    })?;

    Ok(report)
}

/// Full run against the SQLite store and the XLSX file named in `config`.
///
/// The store is released whether or not the export succeeded.
pub fn run_export(config: &SpecExportConfig) -> Result<SpecExportReport, ExportError> {
    let store = SqliteRateStore::open(&config.store)?;
    info!(path = %store.path_db().display(), "Rate store opened");

    let mut writer = XlsxWriter::with_default_formats(&config.path_file_out);
    let result = export_all(&store, &mut writer, config);

    match (result, store.close()) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(err_close)) => Err(err_close.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(err_close)) => {
            error!(error = %err_close, "Failed to release rate store after export failure");
            Err(err)
        }
    }
}
