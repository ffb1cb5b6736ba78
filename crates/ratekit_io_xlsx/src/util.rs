//! Stateless helper utilities used by the XLSX writer kernel.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, SpecXlsxValuePolicy, XlsxWriteError};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Convert `NaN`/`Inf` to policy string; return `None` for finite values.
pub fn convert_nan_inf_to_str(x: f64, value_policy: &SpecXlsxValuePolicy) -> Option<String> {
    if x.is_nan() {
        return Some(value_policy.nan_str.clone());
    }
    if x.is_infinite() {
        return Some(if x.is_sign_positive() {
            value_policy.posinf_str.clone()
        } else {
            value_policy.neginf_str.clone()
        });
    }
    None
}

/// Normalize cell value according to the value policy.
///
/// Non-finite numbers and missing values become blanks unless
/// `if_keep_missing_values` asks for their policy text.
pub fn convert_cell_value(
    value: &EnumCellValue,
    if_keep_missing_values: bool,
    value_policy: &SpecXlsxValuePolicy,
) -> EnumCellValue {
    match value {
        EnumCellValue::None => {
            if if_keep_missing_values {
                EnumCellValue::String(value_policy.missing_value_str.clone())
            } else {
                EnumCellValue::None
            }
        }
        EnumCellValue::Number(n) => match convert_nan_inf_to_str(*n, value_policy) {
            None => EnumCellValue::Number(*n),
            Some(c_text) if if_keep_missing_values => EnumCellValue::String(c_text),
            Some(_) => EnumCellValue::None,
        },
        EnumCellValue::String(s) => EnumCellValue::String(s.clone()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base_2`, `base_3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

/// Reject row grids that do not fit one Excel worksheet.
pub fn validate_sheet_extent(
    sheet_name: &str,
    n_rows: usize,
    n_cols: usize,
) -> Result<(), XlsxWriteError> {
    if n_rows > N_NROWS_EXCEL_MAX {
        return Err(XlsxWriteError::ExcelLimit {
            sheet_name: sheet_name.to_string(),
            message: format!("{n_rows} rows > {N_NROWS_EXCEL_MAX}"),
        });
    }
    if n_cols > N_NCOLS_EXCEL_MAX {
        return Err(XlsxWriteError::ExcelLimit {
            sheet_name: sheet_name.to_string(),
            message: format!("{n_cols} columns > {N_NCOLS_EXCEL_MAX}"),
        });
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region IndexCasting

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XlsxWriteError> {
    u32::try_from(value).map_err(|_| XlsxWriteError::ExcelLimit {
        sheet_name: String::new(),
        message: format!("row index overflow: {value}"),
    })
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XlsxWriteError> {
    u16::try_from(value).map_err(|_| XlsxWriteError::ExcelLimit {
        sheet_name: String::new(),
        message: format!("column index overflow: {value}"),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
