//! `slog` drain forwarding records to `tracing`.
//!
//! # Responsibilities
//! - Map `slog` levels onto `tracing` levels
//! - Emit every key/value pair as its own `tracing` field, typed
//! - Keep critical records on their own target
//!
//! # Design Decisions
//! - `tracing` field names are static, so one callsite is built (and leaked)
//!   per distinct (level, target, key set) and cached
//! - At most `MAX_FIELDS` fields per event, message included; extra pairs
//!   are dropped
//! - A user key named `message` is dropped in favour of the record message

use std::sync::OnceLock;

use dashmap::DashMap;
use slog::{OwnedKVList, Record};
use tracing_core::callsite::{Callsite, Identifier};
use tracing_core::field::{Field, FieldSet, Value};
use tracing_core::metadata::Kind;
use tracing_core::subscriber::Interest;
use tracing_core::{Event, Level, Metadata};

use super::fields::collect;

/// Target of events below critical.
pub const TRACING_TARGET: &str = "ctxlog";

/// Target of critical events, so filters can single them out.
pub const CRIT_TARGET: &str = "ctxlog::crit";

const MAX_FIELDS: usize = 32;
const MESSAGE: &str = "message";

/// Drain writing each record as one `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDrain;

impl TracingDrain {
    pub fn new() -> Self {
        Self
    }
}

/// `tracing` level and target for a `slog` level.
pub fn tracing_level(level: slog::Level) -> (Level, &'static str) {
    match level {
        slog::Level::Critical => (Level::ERROR, CRIT_TARGET),
        slog::Level::Error => (Level::ERROR, TRACING_TARGET),
        slog::Level::Warning => (Level::WARN, TRACING_TARGET),
        slog::Level::Info => (Level::INFO, TRACING_TARGET),
        slog::Level::Debug => (Level::DEBUG, TRACING_TARGET),
        slog::Level::Trace => (Level::TRACE, TRACING_TARGET),
    }
}

impl slog::Drain for TracingDrain {
    type Ok = ();
    type Err = slog::Never;

    fn log(&self, record: &Record, values: &OwnedKVList) -> Result<(), slog::Never> {
        let (level, target) = tracing_level(record.level());
        let fields: Vec<_> = collect(record, values)
            .into_iter()
            .filter(|(key, _)| *key != MESSAGE)
            .take(MAX_FIELDS - 1)
            .collect();

        let mut names = Vec::with_capacity(fields.len() + 1);
        names.push(MESSAGE);
        names.extend(fields.iter().map(|(key, _)| *key));
        let meta = metadata(level, target, names);

        let message = record.msg().to_string();
        let mut values: Vec<&dyn Value> = Vec::with_capacity(fields.len() + 1);
        values.push(&message);
        values.extend(fields.iter().map(|(_, value)| value.as_tracing()));

        let keys: Vec<Field> = meta.fields().iter().collect();
        let mut entries: [(&Field, Option<&dyn Value>); MAX_FIELDS] =
            [(&keys[0], None); MAX_FIELDS];
        for (entry, (key, value)) in entries.iter_mut().zip(keys.iter().zip(values)) {
            *entry = (key, Some(value));
        }
        let value_set = meta.fields().value_set(&entries);

        tracing_core::dispatcher::get_default(|dispatch| {
            if dispatch.enabled(meta) {
                dispatch.event(&Event::new(meta, &value_set));
            }
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CallsiteKey {
    level: Level,
    target: &'static str,
    names: Vec<&'static str>,
}

struct DynCallsite {
    meta: OnceLock<Metadata<'static>>,
}

impl Callsite for DynCallsite {
    fn set_interest(&self, _interest: Interest) {}

    fn metadata(&self) -> &Metadata<'_> {
        self.meta
            .get()
            .expect("callsite metadata is set before registration")
    }
}

fn callsites() -> &'static DashMap<CallsiteKey, &'static DynCallsite> {
    static CALLSITES: OnceLock<DashMap<CallsiteKey, &'static DynCallsite>> = OnceLock::new();
    CALLSITES.get_or_init(DashMap::new)
}

fn metadata(
    level: Level,
    target: &'static str,
    names: Vec<&'static str>,
) -> &'static Metadata<'static> {
    let key = CallsiteKey { level, target, names };
    let callsite = match callsites().get(&key) {
        Some(entry) => *entry,
        None => {
            let created = register(level, target, key.names.clone());
            *callsites().entry(key).or_insert(created)
        }
    };
    callsite.metadata_static()
}

impl DynCallsite {
    fn metadata_static(&'static self) -> &'static Metadata<'static> {
        self.meta
            .get()
            .expect("callsite metadata is set before registration")
    }
}

fn register(
    level: Level,
    target: &'static str,
    names: Vec<&'static str>,
) -> &'static DynCallsite {
    let names: &'static [&'static str] = Box::leak(names.into_boxed_slice());
    let callsite: &'static DynCallsite = Box::leak(Box::new(DynCallsite {
        meta: OnceLock::new(),
    }));
    let _ = callsite.meta.set(Metadata::new(
        "ctxlog event",
        target,
        level,
        None,
        None,
        None,
        FieldSet::new(names, Identifier(callsite)),
        Kind::EVENT,
    ));
    tracing_core::callsite::register(callsite);
    callsite
}
