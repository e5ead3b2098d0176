//! Shared utilities for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use ctxlog::logger::fields::collect;
use ctxlog::{FieldValue, Level, Logger};
use slog::{o, OwnedKVList, Record};
use tracing_subscriber::fmt::MakeWriter;

/// One record as a drain saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub level: Level,
    pub msg: String,
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl Captured {
    /// `msg k=v ..` with fields sorted by key.
    pub fn line(&self) -> String {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort_by_key(|(key, _)| *key);

        let mut line = self.msg.clone();
        for (key, value) in fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }

    #[allow(dead_code)]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Drain that keeps every record it receives.
#[derive(Clone, Default)]
pub struct Capture {
    records: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root logger writing into this capture.
    pub fn logger(&self) -> Logger {
        Logger::root(self.clone(), o!())
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.lock().unwrap().iter().map(Captured::line).collect()
    }

    #[allow(dead_code)]
    pub fn levels(&self) -> Vec<Level> {
        self.records.lock().unwrap().iter().map(|r| r.level).collect()
    }

    #[allow(dead_code)]
    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl slog::Drain for Capture {
    type Ok = ();
    type Err = slog::Never;

    fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Never> {
        self.records.lock().unwrap().push(Captured {
            level: record.level(),
            msg: record.msg().to_string(),
            fields: collect(record, values),
        });
        Ok(())
    }
}

/// In-memory writer for a `tracing_subscriber::fmt` subscriber.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl Buffer {
    /// Every line written so far, parsed as JSON.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// JSON subscriber writing into a fresh buffer, every level enabled.
#[allow(dead_code)]
pub fn json_subscriber() -> (Buffer, impl tracing::Subscriber + Send + Sync) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(buffer.clone())
        .finish();
    (buffer, subscriber)
}
