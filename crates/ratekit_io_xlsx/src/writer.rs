//! XLSX writer kernel that appends row grids as worksheets.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::{EnumFmtKey, derive_default_xlsx_formats};
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecSheetSummary, SpecXlsxReport, SpecXlsxSheetWriteOptions,
    SpecXlsxWriteOptions, XlsxWriteError,
};
use crate::util::{
    cast_col_num, cast_row_num, convert_cell_value, create_sheet_identifier, sanitize_sheet_name,
    validate_sheet_extent,
};

/// Stateful workbook writer.
///
/// Sheets accumulate in memory; nothing touches disk until [`Self::close`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_number: SpecCellFormat,
    fmt_header: SpecCellFormat,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_sheet_names: Vec<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and format/options presets.
    pub fn new(
        path_file_out: PathBuf,
        fmt_text: SpecCellFormat,
        fmt_number: SpecCellFormat,
        fmt_header: SpecCellFormat,
        write_options: SpecXlsxWriteOptions,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text,
            fmt_number,
            fmt_header,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            l_sheet_names: Vec::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Create writer using [`derive_default_xlsx_formats`] and default options.
    pub fn with_default_formats(path_file_out: impl Into<PathBuf>) -> Self {
        let dict_fmt = derive_default_xlsx_formats();
        let fmt_of = |key: EnumFmtKey| dict_fmt.get(key.as_str()).cloned().unwrap_or_default();

        Self::new(
            path_file_out.into(),
            fmt_of(EnumFmtKey::Text),
            fmt_of(EnumFmtKey::Number),
            fmt_of(EnumFmtKey::Header),
            SpecXlsxWriteOptions::default(),
        )
    }

    /// Output file path.
    pub fn path_file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Sheet names in creation order.
    pub fn sheet_names(&self) -> &[String] {
        &self.l_sheet_names
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk, creating the parent directory if needed. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }
        if let Some(path_dir_out) = self.path_file_out.parent()
            && !path_dir_out.as_os_str().is_empty()
        {
            fs::create_dir_all(path_dir_out).map_err(|source| XlsxWriteError::OutputDir {
                path: path_dir_out.to_path_buf(),
                source,
            })?;
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        Ok(())
    }

    /// Append one worksheet holding `rows` in order.
    ///
    /// The first `options.height_header` rows use the header format. Returns the
    /// unique sheet name actually used in the workbook.
    pub fn write_sheet_rows(
        &mut self,
        rows: &[Vec<EnumCellValue>],
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<String, XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::Closed);
        }

        let n_width = rows.iter().map(Vec::len).max().unwrap_or(0);
        validate_sheet_extent(sheet_name, rows.len(), n_width)?;

        let mut report = SpecXlsxReport::default();

        let c_sheet_name_clean = sanitize_sheet_name(sheet_name, "_");
        if c_sheet_name_clean != sheet_name {
            report.warn(format!(
                "Sheet name {sheet_name:?} normalized to {c_sheet_name_clean:?}."
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_clean);
        if sheet_name_unique != c_sheet_name_clean {
            report.warn(format!(
                "Sheet name {c_sheet_name_clean:?} already used; wrote {sheet_name_unique:?}."
            ));
        }

        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);
        let fmt_text =
            derive_rust_xlsx_format(&self.fmt_text.merge(&self.write_options.base_format_patch));
        let fmt_number =
            derive_rust_xlsx_format(&self.fmt_number.merge(&self.write_options.base_format_patch));
        let if_keep_missing_values = self.write_options.keep_missing_values;
        let value_policy = self.write_options.value_policy.clone();

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for n_idx_col in 0..n_width {
            worksheet.set_column_width(cast_col_num(n_idx_col)?, options.width_col_default)?;
        }

        for (n_idx_row, row_values) in rows.iter().enumerate() {
            let if_is_header_row = n_idx_row < options.height_header;
            for (n_idx_col, value_raw) in row_values.iter().enumerate() {
                let value = convert_cell_value(value_raw, if_keep_missing_values, &value_policy);
                let format = match (&value, if_is_header_row) {
                    (_, true) => &fmt_header,
                    (EnumCellValue::Number(_), false) => &fmt_number,
                    (_, false) => &fmt_text,
                };
                write_cell_with_format(worksheet, n_idx_row, n_idx_col, &value, format)?;
            }
        }

        let n_row_freeze = options
            .row_freeze
            .unwrap_or(usize::min(options.height_header, rows.len()));
        if n_row_freeze > 0 || options.col_freeze > 0 {
            worksheet.set_freeze_panes(
                cast_row_num(n_row_freeze)?,
                cast_col_num(options.col_freeze)?,
            )?;
        }

        report.sheets.push(SpecSheetSummary {
            sheet_name: sheet_name_unique.clone(),
            n_rows: rows.len(),
            n_cols: n_width,
        });
        self.l_sheet_names.push(sheet_name_unique.clone());
        self.l_reports.push(report);
        Ok(sheet_name_unique)
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if self.set_sheet_names_existing.insert(name.to_string()) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if self.set_sheet_names_existing.insert(candidate.clone()) {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxWriteError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use calamine::{Data, Reader, Xlsx, open_workbook};

    use super::*;

    fn read_xlsx_part(path_xlsx: &Path, name: &str) -> String {
        let file = fs::File::open(path_xlsx).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut c_xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut c_xml)
            .unwrap();
        c_xml
    }

    fn derive_rows_fixture() -> Vec<Vec<EnumCellValue>> {
        vec![
            vec!["Start Weight".into(), "End Weight".into(), "Zone 1".into()],
            vec![
                EnumCellValue::Number(0.0),
                EnumCellValue::Number(10.0),
                EnumCellValue::Number(5.0),
            ],
            vec![
                EnumCellValue::Number(10.0),
                EnumCellValue::Number(20.0),
                EnumCellValue::None,
            ],
        ]
    }

    #[test]
    fn test_write_sheet_rows_round_trips_through_calamine() {
        let dir_tmp = tempfile::tempdir().unwrap();
        let path_out = dir_tmp.path().join("nested").join("out.xlsx");

        let mut writer = XlsxWriter::with_default_formats(path_out.clone());
        let c_name = writer
            .write_sheet_rows(
                &derive_rows_fixture(),
                "Domestic Standard Rates",
                &SpecXlsxSheetWriteOptions::default(),
            )
            .unwrap();
        assert_eq!(c_name, "Domestic Standard Rates");
        writer.close().unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path_out).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Domestic Standard Rates"]);

        let range = workbook.worksheet_range("Domestic Standard Rates").unwrap();
        let l_rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        assert_eq!(l_rows.len(), 3);
        assert_eq!(l_rows[0][2], Data::String("Zone 1".to_string()));
        assert_eq!(l_rows[1][2], Data::Float(5.0));
        assert_eq!(l_rows[2][2], Data::Empty);
    }

    #[test]
    fn test_body_numbers_keep_full_precision() {
        let dir_tmp = tempfile::tempdir().unwrap();
        let path_out = dir_tmp.path().join("precision.xlsx");
        let l_rows = vec![
            vec!["Start Weight".into(), "End Weight".into(), "Zone 1".into()],
            vec![
                EnumCellValue::Number(0.0625),
                EnumCellValue::Number(0.125),
                EnumCellValue::Number(4.375),
            ],
        ];

        let mut writer = XlsxWriter::with_default_formats(path_out.clone());
        writer
            .write_sheet_rows(&l_rows, "Rates", &SpecXlsxSheetWriteOptions::default())
            .unwrap();
        writer.close().unwrap();

        let c_styles = read_xlsx_part(&path_out, "xl/styles.xml");
        assert!(!c_styles.contains("formatCode=\"0.00\""));

        let mut workbook: Xlsx<_> = open_workbook(&path_out).unwrap();
        let range = workbook.worksheet_range("Rates").unwrap();
        assert_eq!(range.get((1, 0)), Some(&Data::Float(0.0625)));
        assert_eq!(range.get((1, 2)), Some(&Data::Float(4.375)));
    }

    #[test]
    fn test_header_row_is_bold_and_frozen() {
        let dir_tmp = tempfile::tempdir().unwrap();
        let path_out = dir_tmp.path().join("header.xlsx");

        let mut writer = XlsxWriter::with_default_formats(path_out.clone());
        writer
            .write_sheet_rows(
                &derive_rows_fixture(),
                "Rates",
                &SpecXlsxSheetWriteOptions::default(),
            )
            .unwrap();
        writer.close().unwrap();

        let c_sheet = read_xlsx_part(&path_out, "xl/worksheets/sheet1.xml");
        assert!(c_sheet.contains("ySplit=\"1\""));
        assert!(c_sheet.contains("state=\"frozen\""));
        assert!(read_xlsx_part(&path_out, "xl/styles.xml").contains("<b/>"));
    }

    #[test]
    fn test_duplicate_sheet_names_get_suffix_and_warning() {
        let dir_tmp = tempfile::tempdir().unwrap();
        let mut writer = XlsxWriter::with_default_formats(dir_tmp.path().join("dup.xlsx"));
        let options = SpecXlsxSheetWriteOptions::default();

        writer.write_sheet_rows(&[], "Rates", &options).unwrap();
        let c_second = writer.write_sheet_rows(&[], "Rates", &options).unwrap();

        assert_eq!(c_second, "Rates_2");
        assert_eq!(writer.sheet_names(), ["Rates", "Rates_2"]);
        assert_eq!(writer.report()[1].warnings.len(), 1);
    }

    #[test]
    fn test_write_after_close_is_rejected() {
        let dir_tmp = tempfile::tempdir().unwrap();
        let mut writer = XlsxWriter::with_default_formats(dir_tmp.path().join("closed.xlsx"));
        writer
            .write_sheet_rows(&derive_rows_fixture(), "Rates", &Default::default())
            .unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert!(matches!(
            writer.write_sheet_rows(&[], "More", &Default::default()),
            Err(XlsxWriteError::Closed)
        ));
    }
}
