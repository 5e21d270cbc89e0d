//! Caller-owned audit trail of add operations.

use crate::types::Quantity;
use chrono::{DateTime, Local, Timelike};
use std::fmt;

/// Timestamp layout used when rendering entries.
const AUDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Layout for timestamps that fall on a whole second: the fraction is
/// omitted rather than printed as `.000000`.
const AUDIT_TIME_FORMAT_WHOLE: &str = "%Y-%m-%d %H:%M:%S";

/// One successful add.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub at: DateTime<Local>,
    pub item: String,
    pub quantity: Quantity,
}

impl AuditEntry {
    pub fn added(item: &str, quantity: Quantity) -> Self {
        Self {
            at: Local::now(),
            item: item.to_string(),
            quantity,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = if self.at.nanosecond() / 1_000 == 0 {
            AUDIT_TIME_FORMAT_WHOLE
        } else {
            AUDIT_TIME_FORMAT
        };
        write!(
            f,
            "{}: Added {} of {}",
            self.at.format(layout),
            self.quantity,
            self.item
        )
    }
}

/// Append-only sequence of audit entries.
///
/// The store only ever appends; reading and clearing belong to the caller.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
