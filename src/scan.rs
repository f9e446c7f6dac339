//! Batch decoding of every indexed column.
//!
//! Each record succeeds or fails on its own: a malformed sub-chunk shows up as
//! an `Err` in its column's report and never hides the column's other records.

use shulker_common::{
    Column, ColumnCoordinate, Result, Section, ShulkerError, SurfaceRecord, MAX_SUBCHUNKS,
};
use shulker_logger::log;
use shulker_logger::LogSeverity::{Debug, Info, Warning};
use shulker_store::{list_columns, Columns, KeyValueStore};

use crate::config::{ErrorPolicy, ScanOptions};
use crate::observer::{NoopObserver, RecordObserver};
use crate::world::{get_subchunk_observed, get_surface_observed};

/// Decode outcome of every record of one column.
#[derive(Debug)]
pub struct ColumnReport {
    pub coord: ColumnCoordinate,
    /// `None` when the surface record is missing.
    pub surface: Option<Result<SurfaceRecord>>,
    /// Present sub-chunks in ascending index order.
    pub sections: Vec<Result<Section>>,
}

impl ColumnReport {
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ShulkerError> {
        self.surface
            .iter()
            .filter_map(|result| result.as_ref().err())
            .chain(self.sections.iter().filter_map(|result| result.as_ref().err()))
    }

    /// Collapses the report into a [`Column`], failing on the first error.
    pub fn into_column(self) -> Result<Column> {
        let surface = self.surface.transpose()?;
        let sections = self.sections.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(Column {
            coord: self.coord,
            surface,
            sections,
        })
    }
}

/// Iterator returned by [`scan`].
pub struct ColumnScan<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    columns: Columns<'a>,
    options: ScanOptions,
    observer: Box<dyn RecordObserver + 'a>,
    scanned: usize,
    failed_records: usize,
    finished: bool,
}

impl<'a, S: KeyValueStore + ?Sized> ColumnScan<'a, S> {
    /// Routes every fetched record through `observer`.
    pub fn with_observer(mut self, observer: impl RecordObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    fn report(&mut self, coord: ColumnCoordinate) -> ColumnReport {
        let observer = self.observer.as_mut();
        let surface = get_surface_observed(self.store, coord, observer).transpose();

        let mut sections = Vec::new();
        if self.options.include_subchunks {
            for index in 0..MAX_SUBCHUNKS {
                if let Some(result) =
                    get_subchunk_observed(self.store, coord, index, observer).transpose()
                {
                    sections.push(result);
                }
            }
        }

        ColumnReport {
            coord,
            surface,
            sections,
        }
    }
}

impl<S: KeyValueStore + ?Sized> Iterator for ColumnScan<'_, S> {
    type Item = ColumnReport;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(coord) = self.columns.next() else {
            self.finished = true;
            log(
                format!(
                    "Scan finished: {} columns, {} failed records",
                    self.scanned, self.failed_records
                ),
                Info,
            );
            return None;
        };

        log(format!("Scanning column {}", coord), Debug);
        let report = self.report(coord);
        self.scanned += 1;

        let failures = report.errors().count();
        if failures > 0 {
            self.failed_records += failures;
            match self.options.error_policy {
                ErrorPolicy::Skip => {
                    for err in report.errors() {
                        log(format!("Skipping record: {}", err), Warning);
                    }
                }
                ErrorPolicy::Abort => {
                    log(format!("Aborting scan at column {}", coord), Warning);
                    self.finished = true;
                }
            }
        }

        Some(report)
    }
}

/// Walks every column with a surface record, in store key order, decoding
/// its records.
///
/// `options.log_level` is not applied here; call
/// [`ScanOptions::apply_log_level`] once at startup for it to take effect.
pub fn scan<'a, S: KeyValueStore + ?Sized>(store: &'a S, options: &ScanOptions) -> ColumnScan<'a, S> {
    ColumnScan {
        store,
        columns: list_columns(store),
        options: options.clone(),
        observer: Box::new(NoopObserver),
        scanned: 0,
        failed_records: 0,
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shulker_common::DecodeError;
    use shulker_format::{encode_subchunk_key, encode_surface_key, WordLayout};
    use shulker_store::MemoryStore;

    fn surface_value() -> Vec<u8> {
        vec![0u8; 768]
    }

    fn subchunk_value() -> Vec<u8> {
        let mut bytes = vec![8, 1, 6];
        bytes.extend(vec![0u8; WordLayout::new(3).unwrap().byte_len()]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    fn store_with_bad_subchunk() -> (MemoryStore, ColumnCoordinate, ColumnCoordinate) {
        let good = ColumnCoordinate::new(1, 0);
        let bad = ColumnCoordinate::new(0, 0);
        let mut store = MemoryStore::new();
        for col in [good, bad] {
            store.insert(encode_surface_key(col).to_vec(), surface_value());
            store.insert(encode_subchunk_key(col, 0).unwrap().to_vec(), subchunk_value());
        }
        store.insert(encode_subchunk_key(bad, 1).unwrap().to_vec(), vec![8u8, 1, 7]);
        (store, good, bad)
    }

    #[test]
    fn test_scan_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(scan(&store, &ScanOptions::default()).count(), 0);
    }

    #[test]
    fn test_scan_skip_reports_each_record() {
        let (store, good, bad) = store_with_bad_subchunk();
        let reports: Vec<_> = scan(&store, &ScanOptions::default()).collect();
        assert_eq!(reports.len(), 2);

        // x = 0 sorts before x = 1
        let bad_report = &reports[0];
        assert_eq!(bad_report.coord, bad);
        assert!(!bad_report.is_ok());
        assert_matches!(bad_report.surface, Some(Ok(_)));
        assert_eq!(bad_report.sections.len(), 2);
        assert_matches!(bad_report.sections[0], Ok(Section { index: 0, .. }));
        assert_matches!(
            bad_report.sections[1],
            Err(ShulkerError::Record {
                index: Some(1),
                source: DecodeError::UnsupportedBitWidth(7),
                ..
            })
        );

        assert_eq!(reports[1].coord, good);
        assert!(reports[1].is_ok());
    }

    #[test]
    fn test_scan_abort_stops_after_failure() {
        let (store, _, bad) = store_with_bad_subchunk();
        let options = ScanOptions {
            error_policy: ErrorPolicy::Abort,
            ..ScanOptions::default()
        };
        let reports: Vec<_> = scan(&store, &options).collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].coord, bad);
        assert!(reports.into_iter().next().unwrap().into_column().is_err());
    }

    #[test]
    fn test_scan_without_subchunks() {
        let (store, _, _) = store_with_bad_subchunk();
        let options = ScanOptions {
            include_subchunks: false,
            ..ScanOptions::default()
        };
        let reports: Vec<_> = scan(&store, &options).collect();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.is_ok() && r.sections.is_empty()));
    }

    #[test]
    fn test_report_into_column() {
        let (store, good, _) = store_with_bad_subchunk();
        let column = scan(&store, &ScanOptions::default())
            .find(|r| r.coord == good)
            .unwrap()
            .into_column()
            .unwrap();
        assert!(column.surface.is_some());
        assert_eq!(column.sections.len(), 1);
    }

    #[test]
    fn test_scan_with_observer() {
        struct Counter<'c>(&'c mut usize);
        impl RecordObserver for Counter<'_> {
            fn on_record(&mut self, _key: &[u8], _value: &[u8]) {
                *self.0 += 1;
            }
        }

        let (store, _, _) = store_with_bad_subchunk();
        let mut seen = 0;
        let count = scan(&store, &ScanOptions::default())
            .with_observer(Counter(&mut seen))
            .count();
        assert_eq!(count, 2);
        // 2 surfaces + 3 sub-chunks
        assert_eq!(seen, 5);
    }
}
