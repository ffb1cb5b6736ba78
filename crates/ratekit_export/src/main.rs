use std::process::ExitCode;

use ratekit_export::{ExportError, SpecExportConfig, run_export};
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    ratekit_log::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Export failed");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run() -> Result<(), ExportError> {
    let config = SpecExportConfig::from_env();
    info!(
        client_id = config.client_id,
        n_tiers = config.tiers.len(),
        store = ?config.store,
        "Starting rate export"
    );

    let report = run_export(&config)?;
    info!("{report}");
    info!("Done. Uploaded to {}", report.path_file_out.display());
    Ok(())
}
