//! Table activity events
//!
//! Tables stay free of output. A caller that wants a trace attaches a
//! [`TableObserver`]; [`LogObserver`] forwards every event to the `log` facade.

use std::fmt;

/// Something that happened inside a table operation.
///
/// `hops` counts the chain nodes (or probe slots) visited.
pub enum TableEvent<'a> {
    Inserted {
        key: &'a dyn fmt::Display,
        index: usize,
        chain_len: usize,
    },
    Updated {
        key: &'a dyn fmt::Display,
        index: usize,
        hops: usize,
    },
    Found {
        key: &'a dyn fmt::Display,
        index: usize,
        hops: usize,
    },
    Missed {
        key: &'a dyn fmt::Display,
        hops: usize,
    },
    Deleted {
        key: &'a dyn fmt::Display,
        index: usize,
    },
    DeleteMissed {
        key: &'a dyn fmt::Display,
    },
    Resized {
        from: usize,
        to: usize,
        load_factor: f64,
    },
}

impl fmt::Display for TableEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEvent::Inserted {
                key,
                index,
                chain_len,
            } => write!(
                f,
                "INSERT: key {} into index {} (chain length: {})",
                key, index, chain_len
            ),
            TableEvent::Updated { key, index, hops } => write!(
                f,
                "UPDATE: key {} at index {} updated ({} hops)",
                key, index, hops
            ),
            TableEvent::Found { key, index, hops } => {
                write!(f, "FOUND: key {} at index {} ({} hops)", key, index, hops)
            }
            TableEvent::Missed { key, hops } => {
                write!(f, "SEARCH MISS: key {} not found ({} hops)", key, hops)
            }
            TableEvent::Deleted { key, index } => {
                write!(f, "DELETE: removed key {} from index {}", key, index)
            }
            TableEvent::DeleteMissed { key } => {
                write!(f, "DELETE MISS: key {} not found, nothing to delete", key)
            }
            TableEvent::Resized {
                from,
                to,
                load_factor,
            } => write!(
                f,
                "RESIZE: load factor {:.2}, capacity {} -> {}",
                load_factor, from, to
            ),
        }
    }
}

/// Receives table events as they happen
pub trait TableObserver {
    fn notify(&self, event: &TableEvent<'_>);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl TableObserver for LogObserver {
    fn notify(&self, event: &TableEvent<'_>) {
        match event {
            TableEvent::Found { .. } | TableEvent::Missed { .. } => log::debug!("{}", event),
            TableEvent::Resized { .. } => log::info!("{}", event),
            _ => log::trace!("{}", event),
        }
    }
}

/// Emit an event if an observer is attached; the event is only built when needed
pub(crate) fn emit<'a, F>(observer: &Option<Box<dyn TableObserver>>, make: F)
where
    F: FnOnce() -> TableEvent<'a>,
{
    if let Some(observer) = observer {
        observer.notify(&make());
    }
}
