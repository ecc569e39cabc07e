//! Compatibility table for reading values from older firmware
//!
//! Some firmware releases return a field with a looser JSON type than the
//! descriptor declares (e.g. an integer sent as a string). Committing such a
//! value into the config tree fails; a matching rule makes that failure
//! tolerable instead of fatal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Firmware version (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FirmwareVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid firmware version '{0}': expected major.minor[.patch]")]
pub struct VersionParseError(pub String);

impl FromStr for FirmwareVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        let parts: Vec<&str> = trimmed.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(VersionParseError(s.to_string()));
        }
        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionParseError(s.to_string()))?;
        }
        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// JSON kind of a raw wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonKind::Null,
            serde_json::Value::Bool(_) => JsonKind::Bool,
            serde_json::Value::Number(_) => JsonKind::Number,
            serde_json::Value::String(_) => JsonKind::String,
            serde_json::Value::Array(_) => JsonKind::Array,
            serde_json::Value::Object(_) => JsonKind::Object,
        }
    }
}

/// One tolerated (field, raw kind, firmware range) combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatRule {
    /// Wire key of the field
    pub field: String,
    pub kind: JsonKind,
    /// Inclusive lower bound; `None` means any earlier version
    pub since: Option<FirmwareVersion>,
    /// Exclusive upper bound; `None` means any later version
    pub until: Option<FirmwareVersion>,
}

impl CompatRule {
    pub fn new(field: impl Into<String>, kind: JsonKind) -> Self {
        Self {
            field: field.into(),
            kind,
            since: None,
            until: None,
        }
    }

    pub fn since(mut self, version: FirmwareVersion) -> Self {
        self.since = Some(version);
        self
    }

    pub fn until(mut self, version: FirmwareVersion) -> Self {
        self.until = Some(version);
        self
    }

    fn covers(&self, version: Option<FirmwareVersion>) -> bool {
        match version {
            Some(v) => {
                self.since.is_none_or(|since| v >= since) && self.until.is_none_or(|until| v < until)
            }
            // Unknown firmware only matches unbounded rules
            None => self.since.is_none() && self.until.is_none(),
        }
    }
}

/// Per-resource compatibility table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatTable {
    rules: Vec<CompatRule>,
}

impl CompatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: CompatRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a failed commit of `raw` into `field` may be ignored
    pub fn tolerates(
        &self,
        field: &str,
        raw: &serde_json::Value,
        version: Option<FirmwareVersion>,
    ) -> bool {
        let kind = JsonKind::of(raw);
        self.rules
            .iter()
            .any(|r| r.field == field && r.kind == kind && r.covers(version))
    }
}
