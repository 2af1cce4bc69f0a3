//! Loading alerts from photometry tables and JSON documents.
//!
//! CSV tables hold one datapoint per row, with column headers named after
//! the datapoint keys. Empty cells are read as null values; keys without a
//! column are absent.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::{Alert, Datapoint, TranId};

/// Read datapoints from CSV data.
pub fn read_datapoints_csv_from_reader<R: Read>(reader: R) -> anyhow::Result<Vec<Datapoint>> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize()
        .collect::<Result<Vec<Datapoint>, csv::Error>>()
        .map_err(|e| e.into())
}

/// Read datapoints from a CSV file, in file order.
pub fn read_datapoints_csv<P: AsRef<Path>>(file: P) -> anyhow::Result<Vec<Datapoint>> {
    let file = std::fs::File::open(file)?;
    read_datapoints_csv_from_reader(file)
}

/// Build an alert from a CSV photometry table.
///
/// Rows may come in any order; the alert is sorted most-recent-first.
pub fn load_alert_csv<P: AsRef<Path>>(file: P, tran_id: Option<TranId>) -> anyhow::Result<Alert> {
    let path = file.as_ref();
    let datapoints = read_datapoints_csv(path)?;
    debug!("Read {} datapoints from {}", datapoints.len(), path.display());
    let mut alert = Alert::new(tran_id, datapoints);
    alert.sort_most_recent_first();
    Ok(alert)
}

/// Load an alert document `{"tran_id": .., "datapoints": [..]}`.
///
/// Datapoint order is kept as written.
pub fn load_alert_json<P: AsRef<Path>>(file: P) -> anyhow::Result<Alert> {
    let data = std::fs::read_to_string(file)?;
    Ok(Alert::from_json_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entry;

    #[test]
    fn test_read_csv_nulls_and_absent_columns() {
        let data = "\
jd,magpsf,isdiffpos,rb,candid
2459001.5,18.9,t,0.7,100
2459000.5,,,,
";
        let dps = read_datapoints_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(dps.len(), 2);
        assert_eq!(dps[0].magpsf, Entry::Present(18.9));
        assert_eq!(dps[0].isdiffpos, Entry::Present("t".to_string()));
        assert_eq!(dps[0].candid, Entry::Present(100));
        assert_eq!(dps[1].magpsf, Entry::Null);
        assert_eq!(dps[1].rb, Entry::Null);
        assert_eq!(dps[1].fwhm, Entry::Absent);
        assert!(!dps[1].is_detection());
    }

    #[test]
    fn test_read_csv_float_counts() {
        let data = "jd,nbad\n2459001.5,0.0\n2459000.5,2\n2458999.5,\n";
        let dps = read_datapoints_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(dps[0].nbad, Entry::Present(0));
        assert_eq!(dps[1].nbad, Entry::Present(2));
        assert_eq!(dps[2].nbad, Entry::Null);

        let data = "jd,nbad\n2459001.5,0.5\n";
        assert!(read_datapoints_csv_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_read_csv_bad_number() {
        let data = "jd,rb\n2459001.5,high\n";
        assert!(read_datapoints_csv_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(read_datapoints_csv("does/not/exist.csv").is_err());
        assert!(load_alert_json("does/not/exist.json").is_err());
    }
}
