use std::path::Path;

use crate::error::AnalyzerError;
use crate::trade::TradeRecord;

/// Writes `records` as CSV with a `time,buy_id,sell_id,quantity,price`
/// header. An existing file is truncated.
pub fn write_csv(path: impl AsRef<Path>, records: &[TradeRecord]) -> Result<(), AnalyzerError> {
    let path = path.as_ref();
    let export_err = |source| AnalyzerError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(export_err)?;
    for record in records {
        writer.serialize(record).map_err(export_err)?;
    }
    writer.flush().map_err(|e| export_err(e.into()))?;
    Ok(())
}

pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>, AnalyzerError> {
    let path = path.as_ref();
    let export_err = |source| AnalyzerError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(export_err)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<TradeRecord>, _>>()
        .map_err(export_err)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new("2024-01-01T10:00:00", 1, 2, 5, 101.5),
            TradeRecord::new("10:00:01", 10, 20, 3, 99.0),
        ]
    }

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades_parsed.csv");

        write_csv(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,buy_id,sell_id,quantity,price");
        assert_eq!(lines[1], "2024-01-01T10:00:00,1,2,5,101.5");
        assert_eq!(lines[2], "10:00:01,10,20,3,99.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_read_back_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = sample();

        write_csv(&path, &records).unwrap();
        assert_eq!(read_csv(&path).unwrap(), records);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["time", "buy_id", "sell_id", "quantity", "price"]
        );
    }

    #[test]
    fn test_time_with_comma_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let records = vec![TradeRecord::new("Jan 1, 10:00", 1, 2, 3, 4.0)];

        write_csv(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Jan 1, 10:00\",1,2,3,4.0"));
        assert_eq!(read_csv(&path).unwrap(), records);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer than the export\n".repeat(10)).unwrap();

        write_csv(&path, &sample()[..1]).unwrap();
        assert_eq!(read_csv(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");

        assert!(matches!(write_csv(&path, &sample()), Err(AnalyzerError::Export { .. })));
    }
}
