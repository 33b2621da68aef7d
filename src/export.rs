use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};
use crate::grid::{Grid, YearMonth};

pub const HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Serializes the grid as CSV: the weekday header followed by one line of
/// day-of-month numbers per week. Empty slots become empty fields.
pub fn to_csv<D: Copy>(grid: &Grid<D>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&HEADER)?;
    for row in grid.rows() {
        writer.write_record(row.slots().iter().map(|slot| {
            slot.map(|day| day.day_of_month.to_string())
                .unwrap_or_default()
        }))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| Error::from(err.into_error()))?;

    String::from_utf8(bytes).map_err(|err| Error::new(ErrorKind::CsvError, &err.to_string()))
}

pub fn export_file_name(year_month: YearMonth) -> String {
    format!(
        "Calendar_{}_{:02}.csv",
        year_month.year(),
        year_month.month()
    )
}

/// Writes the grid into `dir` and returns the path of the created file.
/// An existing file of the same name is overwritten.
pub fn write_csv<D: Copy>(grid: &Grid<D>, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(grid.year_month()));
    let content = to_csv(grid)?;

    fs::write(&path, content)?;
    log::info!("Exported {} to {}", grid.year_month(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compute_grid;

    #[test]
    fn december_2025_csv() {
        let csv = to_csv(&compute_grid(2025, 12).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert!(csv.starts_with("Sun,Mon,Tue,Wed,Thu,Fri,Sat\n"));
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "23,24,25,26,27,28,29");
        assert_eq!(lines[2], "30,1,2,3,4,5,6");
        assert_eq!(lines[6], "28,29,30,31,1,2,3");
        assert_eq!(lines[7], "4,5,6,7,8,9,10");
        assert!(csv.ends_with("10\n"));
        assert!(!csv.ends_with("\n\n"));
    }

    #[test]
    fn every_line_has_seven_fields() {
        let csv = to_csv(&compute_grid(2024, 2).unwrap()).unwrap();
        for line in csv.lines() {
            assert_eq!(line.split(',').count(), 7);
        }
        assert!(csv.contains(",29,"));
    }

    #[test]
    fn file_name_pads_month() {
        let ym = YearMonth::new(2025, 3).unwrap();
        assert_eq!(export_file_name(ym), "Calendar_2025_03.csv");
        let ym = YearMonth::new(2025, 12).unwrap();
        assert_eq!(export_file_name(ym), "Calendar_2025_12.csv");
    }

    #[test]
    fn writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let grid = compute_grid(2025, 12).unwrap();

        let path = write_csv(&grid, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Calendar_2025_12.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), to_csv(&grid).unwrap());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let grid = compute_grid(2025, 12).unwrap();

        let err = write_csv(&grid, &dir.path().join("does-not-exist")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
