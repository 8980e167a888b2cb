//! CSV input and output.
//!
//! Price histories are read from one named column of a headed CSV file.
//! Path sets are written with a `time` column followed by one column per path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use qsim_engine::PathSet;

use crate::{CliError, Result};

/// Reads the numeric column `column` from the CSV file at `path`.
pub fn read_price_column(path: &Path, column: &str) -> Result<Vec<f64>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    read_price_column_from(File::open(path)?, column)
}

/// Reads the numeric column `column` from any CSV source.
pub fn read_price_column_from<R: Read>(reader: R, column: &str) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let index = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| CliError::InvalidArgument(format!("Column '{}' not found", column)))?;

    let mut prices = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = record.get(index).unwrap_or("");
        // Gaps in a price history are skipped.
        if field.is_empty() {
            continue;
        }
        let price = field.parse::<f64>().map_err(|_| {
            CliError::InvalidArgument(format!(
                "Row {}: '{}' in column '{}' is not a number",
                row + 1,
                field,
                column
            ))
        })?;
        prices.push(price);
    }
    Ok(prices)
}

/// Writes `paths` as CSV: `time,path_0,path_1,...`, one row per time point.
pub fn write_paths_csv<W: Write>(paths: &PathSet, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(paths.n_paths() + 1);
    header.push("time".to_string());
    header.extend((0..paths.n_paths()).map(|i| format!("path_{}", i)));
    writer.write_record(&header)?;

    let columns: Vec<&[f64]> = paths.iter().collect();
    for (t_index, t) in paths.time_grid().into_iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(t.to_string());
        record.extend(columns.iter().map(|path| path[t_index].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_named_column() {
        let csv = "date,close,volume\n\
                   2024-01-02,100.0,10\n\
                   2024-01-03, 101.5 ,12\n\
                   2024-01-04,,9\n\
                   2024-01-05,99.25,11\n";
        let prices = read_price_column_from(csv.as_bytes(), "close").unwrap();
        assert_eq!(prices, vec![100.0, 101.5, 99.25]);
    }

    #[test]
    fn test_missing_column() {
        let err = read_price_column_from("date,open\n1,2\n".as_bytes(), "close").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_bad_number_reports_row() {
        let err = read_price_column_from("close\n1.0\nabc\n".as_bytes(), "close").unwrap_err();
        assert!(err.to_string().contains("Row 2"), "{}", err);
    }

    #[test]
    fn test_missing_file() {
        let err = read_price_column(Path::new("/nonexistent/prices.csv"), "close").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_write_paths_layout() {
        let data = vec![0.0, 1.0, 2.0, 0.0, -1.0, 0.0];
        let paths = PathSet::from_row_major(data, 2, 3, 2.0).unwrap();
        let mut buffer = Vec::new();
        write_paths_csv(&paths, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["time,path_0,path_1", "0,0,0", "1,1,-1", "2,2,0"]);
    }
}
