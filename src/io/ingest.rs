//! CSV ingest and validation.
//!
//! This module turns the raw sales CSV into `SalesRecord`s.
//!
//! - **Strict schema**: every required column must be present (extra columns are ignored)
//! - **Strict rows**: the first unparsable cell aborts the load with its line and column
//! - No aggregation logic here

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;

use crate::data::DataError;
use crate::domain::{Column, Month, SalesRecord};

/// Parse the sales CSV from any reader.
pub fn parse_sales_csv<R: Read>(reader: R) -> Result<Vec<SalesRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Quoted fields may span lines, so prefer the reader's own position.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        out.push(parse_row(&record, &header_map, line)?);
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
        .collect()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), DataError> {
    for column in Column::REQUIRED {
        if !header_map.contains_key(column.header()) {
            return Err(DataError::MissingColumn(column.header().to_string()));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    line: usize,
) -> Result<SalesRecord, DataError> {
    let year_raw = get_required(record, header_map, Column::Year, line)?;
    let year = year_raw
        .parse::<i32>()
        .map_err(|e| row_error(line, Column::Year, format!("invalid year '{year_raw}': {e}")))?;

    let month_raw = get_required(record, header_map, Column::Month, line)?;
    let month = Month::parse(month_raw)
        .ok_or_else(|| row_error(line, Column::Month, format!("unknown month '{month_raw}'")))?;

    let vehicle_type = get_required(record, header_map, Column::VehicleType, line)?.to_string();

    let recession_raw = get_required(record, header_map, Column::Recession, line)?;
    let recession = parse_flag(recession_raw).ok_or_else(|| {
        row_error(
            line,
            Column::Recession,
            format!("expected 0 or 1, got '{recession_raw}'"),
        )
    })?;

    Ok(SalesRecord {
        year,
        month,
        vehicle_type,
        automobile_sales: parse_f64(record, header_map, Column::AutomobileSales, line)?,
        advertising_expenditure: parse_f64(record, header_map, Column::AdvertisingExpenditure, line)?,
        unemployment_rate: parse_f64(record, header_map, Column::UnemploymentRate, line)?,
        recession,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: Column,
    line: usize,
) -> Result<&'a str, DataError> {
    let idx = header_map
        .get(column.header())
        .copied()
        .ok_or_else(|| DataError::MissingColumn(column.header().to_string()))?;
    match record.get(idx) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(row_error(line, column, "missing value")),
    }
}

fn parse_f64(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    column: Column,
    line: usize,
) -> Result<f64, DataError> {
    let raw = get_required(record, header_map, column, line)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(row_error(line, column, format!("invalid number '{raw}'"))),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "1.0" | "true" | "True" => Some(true),
        "0" | "0.0" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn row_error(line: usize, column: Column, message: impl Into<String>) -> DataError {
    DataError::Row {
        line,
        column: column.header().to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Month;

    const HEADER: &str =
        "Date,Year,Month,Recession,Consumer_Confidence,Automobile_Sales,Advertising_Expenditure,Vehicle_Type,unemployment_rate";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\n1/31/1980,1980,Jan,1,108.24,456.0,1558,Supperminicar,5.4\n2/29/1980,1980,Feb,0,98.75,555.9,3048,Smallfamiliycar,4.8\n"
        );
        let rows = parse_sales_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 1980);
        assert_eq!(rows[0].month, Month::Jan);
        assert_eq!(rows[0].vehicle_type, "Supperminicar");
        assert!(rows[0].recession);
        assert!(!rows[1].recession);
        assert!((rows[1].automobile_sales - 555.9).abs() < 1e-12);
        assert!((rows[1].unemployment_rate - 4.8).abs() < 1e-12);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let csv = "Year,Month,Recession,Automobile_Sales,Vehicle_Type,unemployment_rate\n1980,Jan,1,1,Sports,5\n";
        let err = parse_sales_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Advertising_Expenditure"));
    }

    #[test]
    fn bad_cell_reports_line_and_column() {
        let csv = format!(
            "{HEADER}\n1/31/1980,1980,Jan,1,108.24,456.0,1558,Sports,5.4\n2/29/1980,1980,Feb,1,98.75,n/a,3048,Sports,4.8\n"
        );
        let err = parse_sales_csv(csv.as_bytes()).unwrap_err();
        match err {
            DataError::Row { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Automobile_Sales");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn recession_flag_must_be_binary() {
        let csv = format!("{HEADER}\n1/31/1980,1980,Jan,2,108.24,456.0,1558,Sports,5.4\n");
        let err = parse_sales_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Row { ref column, .. } if column == "Recession"));
    }

    #[test]
    fn row_line_accounts_for_multiline_quoted_fields() {
        let csv = format!(
            "{HEADER}\n\"1/31/1980\nnote\",1980,Jan,1,108.24,456.0,1558,Sports,5.4\n2/29/1980,1980,Feb,1,98.75,n/a,3048,Sports,4.8\n"
        );
        let err = parse_sales_csv(csv.as_bytes()).unwrap_err();
        match err {
            DataError::Row { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }
}
