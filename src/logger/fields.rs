//! Flattening `slog` key/value chains into typed fields.
//!
//! A record's fields are the logger's pairs, parents before children, then
//! the call-site pairs. Each key appears once, at the position of its oldest
//! binding, carrying the value of its newest binding.

use std::fmt;
use std::sync::OnceLock;

use slog::{BorrowedKV, Key, Level, OwnedKVList, Record, KV};

use super::record_static;

/// A single structured value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a `tracing` value so it keeps its type in the subscriber.
    pub(crate) fn as_tracing(&self) -> &dyn tracing::Value {
        match self {
            FieldValue::Str(s) => s,
            FieldValue::I64(v) => v,
            FieldValue::U64(v) => v,
            FieldValue::F64(v) => v,
            FieldValue::Bool(v) => v,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::I64(v) => write!(f, "{}", v),
            FieldValue::U64(v) => write!(f, "{}", v),
            FieldValue::F64(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// `slog::Serializer` gathering pairs in serialization order.
#[derive(Debug, Default)]
struct FieldCollector {
    fields: Vec<(Key, FieldValue)>,
}

impl FieldCollector {
    fn push(&mut self, key: Key, value: FieldValue) -> slog::Result {
        self.fields.push((key, value));
        Ok(())
    }
}

impl slog::Serializer for FieldCollector {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments) -> slog::Result {
        self.push(key, FieldValue::Str(val.to_string()))
    }

    fn emit_str(&mut self, key: Key, val: &str) -> slog::Result {
        self.push(key, FieldValue::Str(val.to_string()))
    }

    fn emit_bool(&mut self, key: Key, val: bool) -> slog::Result {
        self.push(key, FieldValue::Bool(val))
    }

    fn emit_usize(&mut self, key: Key, val: usize) -> slog::Result {
        self.push(key, FieldValue::U64(val as u64))
    }

    fn emit_isize(&mut self, key: Key, val: isize) -> slog::Result {
        self.push(key, FieldValue::I64(val as i64))
    }

    fn emit_u8(&mut self, key: Key, val: u8) -> slog::Result {
        self.push(key, FieldValue::U64(val.into()))
    }

    fn emit_i8(&mut self, key: Key, val: i8) -> slog::Result {
        self.push(key, FieldValue::I64(val.into()))
    }

    fn emit_u16(&mut self, key: Key, val: u16) -> slog::Result {
        self.push(key, FieldValue::U64(val.into()))
    }

    fn emit_i16(&mut self, key: Key, val: i16) -> slog::Result {
        self.push(key, FieldValue::I64(val.into()))
    }

    fn emit_u32(&mut self, key: Key, val: u32) -> slog::Result {
        self.push(key, FieldValue::U64(val.into()))
    }

    fn emit_i32(&mut self, key: Key, val: i32) -> slog::Result {
        self.push(key, FieldValue::I64(val.into()))
    }

    fn emit_u64(&mut self, key: Key, val: u64) -> slog::Result {
        self.push(key, FieldValue::U64(val))
    }

    fn emit_i64(&mut self, key: Key, val: i64) -> slog::Result {
        self.push(key, FieldValue::I64(val))
    }

    fn emit_f32(&mut self, key: Key, val: f32) -> slog::Result {
        self.push(key, FieldValue::F64(val.into()))
    }

    fn emit_f64(&mut self, key: Key, val: f64) -> slog::Result {
        self.push(key, FieldValue::F64(val))
    }
}

/// Fields of a record, one entry per key, newest binding winning.
pub fn collect(record: &Record, values: &OwnedKVList) -> Vec<(Key, FieldValue)> {
    let mut pairs = serialize(values, record);
    if children_first() {
        pairs.reverse();
    }
    pairs.extend(serialize(&record.kv(), record));

    let mut fields: Vec<(Key, FieldValue)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        match fields.iter_mut().find(|(k, _)| *k == key) {
            Some(field) => field.1 = value,
            None => fields.push((key, value)),
        }
    }
    fields
}

/// True when `kv` serializes no pairs at all.
pub fn is_empty<T: KV + ?Sized>(kv: &T) -> bool {
    with_empty_record(|record| serialize(kv, record).is_empty())
}

fn serialize<T: KV + ?Sized>(kv: &T, record: &Record) -> Vec<(Key, FieldValue)> {
    let mut collector = FieldCollector::default();
    let _ = kv.serialize(record, &mut collector);
    collector.fields
}

fn with_empty_record<R>(f: impl FnOnce(&Record) -> R) -> R {
    f(&Record::new(
        record_static(Level::Info),
        &format_args!(""),
        BorrowedKV(&()),
    ))
}

/// Whether a logger's chain serializes a child's pairs before its parent's.
fn children_first() -> bool {
    static CHILDREN_FIRST: OnceLock<bool> = OnceLock::new();
    *CHILDREN_FIRST.get_or_init(|| {
        let child = slog::Logger::root(slog::Discard, o!("order" => "parent"))
            .new(o!("order" => "child"));
        let pairs = with_empty_record(|record| serialize(child.list(), record));
        pairs.first().and_then(|(_, value)| value.as_str()) == Some("child")
    })
}
