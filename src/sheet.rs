// src/sheet.rs
//! Tabular output sink.
//!
//! The sheet always starts with the fixed header row. If the first row is
//! missing or differs in any way, the whole sheet is cleared and the header
//! rewritten before new rows go in.

use std::{
    fs::{File, OpenOptions},
    path::PathBuf,
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::config::consts::SHEET_HEADER;
use crate::error::Result;
use crate::file::ensure_parent;
use crate::job::JobRecord;

/// A spreadsheet-like store: read all rows, wipe, append rows.
pub trait Sheet {
    fn rows(&mut self) -> Result<Vec<Vec<String>>>;
    fn clear(&mut self) -> Result<()>;
    fn append_rows(&mut self, rows: &[Vec<String>]) -> Result<()>;
}

/// A local CSV file standing in for the spreadsheet.
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sheet for CsvSheet {
    fn rows(&mut self) -> Result<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = Vec::new();
        for rec in rdr.records() {
            rows.push(rec?.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    fn clear(&mut self) -> Result<()> {
        ensure_parent(&self.path)?;
        File::create(&self.path)?; // truncate
        Ok(())
    }

    fn append_rows(&mut self, rows: &[Vec<String>]) -> Result<()> {
        ensure_parent(&self.path)?;
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut w = WriterBuilder::new().has_headers(false).from_writer(file);
        for row in rows {
            w.write_record(row)?;
        }
        w.flush()?;
        Ok(())
    }
}

pub fn header_row() -> Vec<String> {
    SHEET_HEADER.iter().map(|h| s!(*h)).collect()
}

/// Clear and rewrite the header unless the first row already matches.
/// Returns true when the sheet was reset.
pub fn ensure_header(sheet: &mut dyn Sheet) -> Result<bool> {
    let rows = sheet.rows()?;
    if rows.first().is_some_and(|first| *first == header_row()) {
        return Ok(false);
    }
    if !rows.is_empty() {
        logw!("Sheet header missing or changed; clearing {} row(s)", rows.len());
    }
    sheet.clear()?;
    sheet.append_rows(&[header_row()])?;
    Ok(true)
}

/// Append `jobs` under a valid header. Nothing is touched for an empty batch.
pub fn publish(sheet: &mut dyn Sheet, jobs: &[JobRecord]) -> Result<usize> {
    if jobs.is_empty() {
        return Ok(0);
    }
    ensure_header(sheet)?;
    let rows: Vec<Vec<String>> = jobs.iter().map(JobRecord::to_row).collect();
    sheet.append_rows(&rows)?;
    Ok(rows.len())
}

/// In-memory sheet for tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemSheet {
    pub data: Vec<Vec<String>>,
    pub clears: usize,
}

#[cfg(test)]
impl Sheet for MemSheet {
    fn rows(&mut self) -> Result<Vec<Vec<String>>> { Ok(self.data.clone()) }
    fn clear(&mut self) -> Result<()> { self.clears += 1; self.data.clear(); Ok(()) }
    fn append_rows(&mut self, rows: &[Vec<String>]) -> Result<()> { self.data.extend_from_slice(rows); Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{RawJob, Source};

    fn job(link: &str) -> JobRecord {
        JobRecord::from_raw(RawJob::new("PM", "Acme", link, "1h"), Source::LinkedIn)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| s!(*c)).collect()
    }

    #[test]
    fn empty_batch_leaves_sheet_alone() {
        let mut sheet = MemSheet { data: vec![row(&["junk"])], clears: 0 };
        assert_eq!(publish(&mut sheet, &[]).unwrap(), 0);
        assert_eq!(sheet.data, vec![row(&["junk"])]);
    }

    #[test]
    fn header_written_on_empty_sheet() {
        let mut sheet = MemSheet::default();
        publish(&mut sheet, &[job("http://a")]).unwrap();
        assert_eq!(sheet.data[0], header_row());
        assert_eq!(sheet.data[1], row(&["PM", "Acme", "http://a", "LinkedIn", "1h"]));
    }

    #[test]
    fn mismatched_header_resets_sheet() {
        let mut sheet = MemSheet {
            data: vec![row(&["Title", "Company", "Link", "Source", "Posted"]), row(&["old"])],
            clears: 0,
        };
        publish(&mut sheet, &[job("http://a")]).unwrap();
        assert_eq!(sheet.clears, 1);
        assert_eq!(sheet.data.len(), 2);
        assert_eq!(sheet.data[0], header_row());
    }

    #[test]
    fn matching_header_appends() {
        let mut sheet = MemSheet { data: vec![header_row(), row(&["x"])], clears: 0 };
        publish(&mut sheet, &[job("http://a"), job("http://b")]).unwrap();
        assert_eq!(sheet.clears, 0);
        assert_eq!(sheet.data.len(), 4);
    }

    #[test]
    fn csv_sheet_quotes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = CsvSheet::new(dir.path().join("out/jobs.csv"));
        let rec = JobRecord::from_raw(
            RawJob::new("PM, Growth", "Acme \"Labs\"", "http://a", "2 hours ago"),
            Source::RemoteRocketship,
        );
        publish(&mut sheet, &[rec]).unwrap();

        let rows = sheet.rows().unwrap();
        assert_eq!(rows[0], header_row());
        assert_eq!(rows[1], row(&["PM, Growth", "Acme \"Labs\"", "http://a", "RemoteRocketship", "2 hours ago"]));
    }
}
