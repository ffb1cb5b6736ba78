//! `ratekit_io_xlsx` v1:
//! Rust-side XLSX sink kernel for row-oriented reports.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : cell model, formats, options, reports, errors
//! - `util`   : pure helper functions
//! - `writer` : buffered workbook writer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_COL_DEFAULT,
    TUP_EXCEL_ILLEGAL, derive_default_xlsx_formats,
};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecSheetSummary, SpecXlsxReport, SpecXlsxSheetWriteOptions,
    SpecXlsxValuePolicy, SpecXlsxWriteOptions, XlsxWriteError,
};
pub use util::{
    convert_cell_value, convert_nan_inf_to_str, create_sheet_identifier, sanitize_sheet_name,
    validate_sheet_extent,
};
pub use writer::XlsxWriter;
