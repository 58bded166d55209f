//! CSV catalog parsing.
//!
//! The catalog has a header row with the columns
//! `type, dir, name, row, col, side, scale, flip`. Every row is validated up
//! front; one bad row rejects the whole catalog.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::dataset::types::DatasetEntry;
use crate::hyperspectral::decode::ImageFormat;

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(rename = "type")]
    kind: String,
    dir: String,
    name: String,
    row: usize,
    col: usize,
    side: usize,
    scale: f64,
    flip: String,
}

fn malformed(line: u64, reason: impl Into<String>) -> HsiError {
    HsiError::MalformedEntry {
        line,
        reason: reason.into(),
    }
}

impl CatalogRecord {
    fn into_entry(self, line: u64) -> Result<DatasetEntry> {
        let format: ImageFormat = self.kind.parse()?;

        if self.name.is_empty() {
            return Err(malformed(line, "empty image name"));
        }
        if self.side == 0 {
            return Err(malformed(line, "side must be positive"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(malformed(line, format!("invalid scale {}", self.scale)));
        }

        let entry = DatasetEntry {
            format,
            dir: PathBuf::from(self.dir),
            name: self.name,
            row: self.row,
            col: self.col,
            side: self.side,
            scale: self.scale,
            flip: !self.flip.is_empty(),
        };
        if entry.window_size() == 0 {
            return Err(malformed(
                line,
                format!("side {} at scale {} selects an empty window", entry.side, entry.scale),
            ));
        }
        Ok(entry)
    }
}

/// Parses catalog rows from any reader.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<DatasetEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| malformed(1, e.to_string()))?
        .clone();

    let mut entries = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            malformed(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Text columns are taken verbatim; numeric ones may be padded
        let record: csv::StringRecord = record
            .iter()
            .zip(headers.iter())
            .map(|(field, header)| match header {
                "dir" | "name" | "flip" => field,
                _ => field.trim(),
            })
            .collect();

        let raw: CatalogRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(line, e.to_string()))?;
        entries.push(raw.into_entry(line)?);
    }

    debug!("Parsed {} catalog entries", entries.len());
    Ok(entries)
}

/// Opens and parses a catalog file.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<DatasetEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| HsiError::InputReadError(format!("{}: {}", path.display(), e)))?;
    parse_catalog(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "type,dir,name,row,col,side,scale,flip\n";

    fn parse(rows: &str) -> Result<Vec<DatasetEntry>> {
        parse_catalog(format!("{}{}", HEADER, rows).as_bytes())
    }

    #[test]
    fn test_parses_both_formats() {
        let entries = parse(
            "exr,/data/kaist,scene01.exr, 10, 20 ,64,1.0,\npng,/data/cave,balloons_ms,0,0,32, 0.5,yes\n",
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].format, ImageFormat::Exr);
        assert_eq!(entries[0].dir, PathBuf::from("/data/kaist"));
        assert_eq!((entries[0].row, entries[0].col, entries[0].side), (10, 20, 64));
        assert!(!entries[0].flip);
        assert_eq!(entries[1].format, ImageFormat::Png);
        assert_eq!(entries[1].dir, PathBuf::from("/data/cave"));
        assert_eq!(entries[1].window_size(), 64);
        assert!(entries[1].flip);
    }

    #[test]
    fn test_any_non_empty_flip_flips() {
        let entries = parse("png,d,a,0,0,4,1.0,False\npng,d,a,0,0,4,1.0,0\n").unwrap();
        assert!(entries.iter().all(|e| e.flip));
    }

    #[test]
    fn test_text_columns_are_verbatim() {
        let entries = parse("exr, /data/kaist ,scene01.exr ,0,0,4,1.0, \n").unwrap();
        assert_eq!(entries[0].dir, PathBuf::from(" /data/kaist "));
        assert_eq!(entries[0].name, "scene01.exr ");
        assert!(entries[0].flip);
    }

    #[test]
    fn test_missing_flip_column_is_malformed() {
        let result = parse_catalog("type,dir,name,row,col,side,scale\nexr,d,a,0,0,4,1.0\n".as_bytes());
        assert!(matches!(result, Err(HsiError::MalformedEntry { line: 2, .. })));
    }

    #[test]
    fn test_window_size_truncates() {
        let entries = parse("png,d,a,0,0,10,3.0,\n").unwrap();
        assert_eq!(entries[0].window_size(), 3);
    }

    #[test]
    fn test_unknown_type() {
        let result = parse("tif,d,a,0,0,4,1.0,\n");
        assert!(matches!(result, Err(HsiError::UnsupportedFormat(t)) if t == "tif"));
    }

    #[test]
    fn test_invalid_numbers_are_malformed() {
        for row in [
            "exr,d,a,x,0,4,1.0,\n",
            "exr,d,a,-1,0,4,1.0,\n",
            "exr,d,a,0,,4,1.0,\n",
            "exr,d,a,0,0,4,abc,\n",
            "exr,d,a,0,0,0,1.0,\n",
            "exr,d,a,0,0,4,0.0,\n",
            "exr,d,a,0,0,4,-2.0,\n",
            "exr,d,a,0,0,4,inf,\n",
            "exr,d,a,0,0,4,8.0,\n",
            "exr,d,,0,0,4,1.0,\n",
        ] {
            let result = parse(row);
            assert!(
                matches!(result, Err(HsiError::MalformedEntry { line: 2, .. })),
                "row {:?} gave {:?}",
                row,
                result
            );
        }
    }

    #[test]
    fn test_short_row_is_malformed() {
        let result = parse("exr,d,a,0,0,4,1.0,\nexr,d,a,0,0\n");
        assert!(matches!(result, Err(HsiError::MalformedEntry { line: 3, .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = read_catalog("/nonexistent/catalog.csv");
        assert!(matches!(result, Err(HsiError::InputReadError(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(parse("").unwrap().is_empty());
    }
}
