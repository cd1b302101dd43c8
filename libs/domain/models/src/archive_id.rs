// [libs/domain/models/src/archive_id.rs]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally assigned, globally unique identifier of one ad archive entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveId(pub i64);

impl ArchiveId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ArchiveId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ArchiveId> for i64 {
    fn from(value: ArchiveId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json_as_a_bare_integer() {
        let id = ArchiveId(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: ArchiveId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
