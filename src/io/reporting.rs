// src/io/reporting.rs

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ReportError;
use crate::simulation::engine::PeriodRecord;

/// Conventional location of a run's history.
pub const DEFAULT_HISTORY_PATH: &str = "artifacts/history.csv";

/// Writes the simulation history to a CSV file, creating parent directories as needed.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "artifacts/history.csv").
/// * `data` - The period records produced by the simulation engine.
pub fn write_history(file_path: impl AsRef<Path>, data: &[PeriodRecord]) -> Result<(), ReportError> {
    let path = file_path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = fs::File::create(path)?;
    write_history_to(file, data)?;

    info!(path = %path.display(), rows = data.len(), "saved history");
    Ok(())
}

/// Serializes the history as CSV onto any writer, header row first.
pub fn write_history_to<W: Write>(writer: W, data: &[PeriodRecord]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: usize) -> PeriodRecord {
        PeriodRecord {
            t,
            demand: 100.0,
            arrivals: 0.0,
            on_hand: 0.0,
            backlog: 0.0,
            order: 100.0,
            holding_cost: 0.0,
            backlog_cost: 0.0,
            purchase_cost: 1000.0,
            total_cost: 1000.0,
            shipped: 100.0,
            inventory_position: -100.0,
        }
    }

    #[test]
    fn writes_contract_columns_only() {
        let mut buf = Vec::new();
        write_history_to(&mut buf, &[record(0), record(1)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "t,demand,arrivals,on_hand,backlog,order,holding_cost,backlog_cost,purchase_cost,total_cost"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0,"));
        assert!(lines[2].starts_with("1,"));
        assert_eq!(lines[1].split(',').count(), 10);
    }

    #[test]
    fn empty_history_writes_nothing() {
        let mut buf = Vec::new();
        write_history_to(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
