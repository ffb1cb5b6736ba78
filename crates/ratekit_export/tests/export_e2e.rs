use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use ratekit_export::store::C_SQL_CREATE_RATES;
use ratekit_export::{SpecExportConfig, SpecStoreConfig, SpecZoneBounds, run_export};
use rusqlite::{Connection, params};

fn create_rates_db(path_db: &Path) {
    let conn = Connection::open(path_db).unwrap();
    conn.execute_batch(C_SQL_CREATE_RATES).unwrap();

    let l_rows: [(i64, &str, &str, f64, f64, &str, f64); 7] = [
        (1240, "standard", "domestic", 10.0, 20.0, "1", 5.5),
        (1240, "standard", "domestic", 0.0, 10.0, "2", 6.5),
        (1240, "standard", "domestic", 0.0, 10.0, "1", 5.0),
        (1240, "standard", "domestic", 0.0, 10.0, "7", 70.0),
        (1240, "intlEconomy", "international", 0.0, 1.0, "b", 12.0),
        (1240, "intlEconomy", "international", 0.0, 1.0, "A", 11.0),
        (9999, "standard", "domestic", 0.0, 10.0, "1", 1.0),
    ];
    for row in l_rows {
        conn.execute(
            "INSERT INTO rates (client_id, shipping_speed, locale, start_weight, end_weight, zone, rate) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![row.0, row.1, row.2, row.3, row.4, row.5, row.6],
        )
        .unwrap();
    }
}

fn derive_config(dir: &Path) -> SpecExportConfig {
    SpecExportConfig {
        zone_bounds: SpecZoneBounds {
            n_zone_domestic_max: 3,
            chr_zone_international_max: 'C',
        },
        store: SpecStoreConfig {
            database: dir.join("rates.db").to_string_lossy().to_string(),
            ..Default::default()
        },
        path_file_out: dir.join("uploads").join("Whitebox-Export.xlsx"),
        ..Default::default()
    }
}

#[test]
fn test_export_writes_workbook_with_all_tiers() {
    ratekit_log::init_test();
    let dir_tmp = tempfile::tempdir().unwrap();
    create_rates_db(&dir_tmp.path().join("rates.db"));
    let config = derive_config(dir_tmp.path());

    let report = run_export(&config).unwrap();

    assert_eq!(report.tiers.len(), 5);
    assert_eq!(report.cnt_records(), 6);
    assert_eq!(report.tiers[0].zones_dropped, vec!["zone7".to_string()]);

    let mut workbook: Xlsx<_> = open_workbook(&config.path_file_out).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Domestic Standard Rates".to_string(),
            "Domestic Expedited Rates".to_string(),
            "Domestic Next Day Rates".to_string(),
            "International Economy Rates".to_string(),
            "International Expedited Rates".to_string(),
        ]
    );

    let range = workbook.worksheet_range("Domestic Standard Rates").unwrap();
    let l_rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
    assert_eq!(
        l_rows,
        vec![
            vec![
                Data::String("Start Weight".to_string()),
                Data::String("End Weight".to_string()),
                Data::String("Zone 1".to_string()),
                Data::String("Zone 2".to_string()),
                Data::String("Zone 3".to_string()),
            ],
            vec![
                Data::Float(0.0),
                Data::Float(10.0),
                Data::Float(5.0),
                Data::Float(6.5),
                Data::Empty,
            ],
            vec![
                Data::Float(10.0),
                Data::Float(20.0),
                Data::Float(5.5),
                Data::Empty,
                Data::Empty,
            ],
        ]
    );

    let range = workbook
        .worksheet_range("International Economy Rates")
        .unwrap();
    let l_rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
    assert_eq!(l_rows.len(), 2);
    assert_eq!(l_rows[0][4], Data::String("Zone C".to_string()));
    assert_eq!(
        l_rows[1][..4],
        [
            Data::Float(0.0),
            Data::Float(1.0),
            Data::Float(11.0),
            Data::Float(12.0),
        ]
    );

    let range = workbook.worksheet_range("Domestic Expedited Rates").unwrap();
    assert_eq!(range.height(), 1);
}

#[test]
fn test_missing_database_fails_with_store_exit_code() {
    let dir_tmp = tempfile::tempdir().unwrap();
    let config = derive_config(dir_tmp.path());

    let err = run_export(&config).unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!config.path_file_out.exists());
}

#[test]
fn test_query_failure_leaves_no_workbook() {
    let dir_tmp = tempfile::tempdir().unwrap();
    Connection::open(dir_tmp.path().join("rates.db"))
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (id INTEGER)")
        .unwrap();
    let config = derive_config(dir_tmp.path());

    let err = run_export(&config).unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("domestic standard"));
    assert!(!config.path_file_out.exists());
}
