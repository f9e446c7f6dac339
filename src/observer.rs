use shulker_logger::log;
use shulker_logger::LogSeverity::{Debug, Error};
use std::fs;
use std::path::{Path, PathBuf};

/// Sees every raw record the caller-facing API fetches, before it is decoded.
pub trait RecordObserver {
    fn on_record(&mut self, key: &[u8], value: &[u8]);
}

/// Observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RecordObserver for NoopObserver {
    fn on_record(&mut self, _key: &[u8], _value: &[u8]) {}
}

/// Writes each fetched record to `raw-<hex key>.dat` under a directory.
///
/// Write failures are logged and otherwise ignored; they never affect decoding.
#[derive(Debug, Clone)]
pub struct DumpObserver {
    dir: PathBuf,
    written: usize,
}

impl DumpObserver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of records dumped so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn path_for(&self, key: &[u8]) -> PathBuf {
        self.dir.join(format!("raw-{}.dat", hex::encode(key)))
    }
}

impl RecordObserver for DumpObserver {
    fn on_record(&mut self, key: &[u8], value: &[u8]) {
        let path = self.path_for(key);
        log(format!("writing contents to {}", path.display()), Debug);
        match fs::write(&path, value) {
            Ok(()) => self.written += 1,
            Err(err) => log(format!("Failed to dump {}: {}", path.display(), err), Error),
        }
    }
}

impl<O: RecordObserver + ?Sized> RecordObserver for &mut O {
    fn on_record(&mut self, key: &[u8], value: &[u8]) {
        (**self).on_record(key, value)
    }
}
