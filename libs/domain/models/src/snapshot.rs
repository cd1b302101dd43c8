// [libs/domain/models/src/snapshot.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ArchiveId;

/// Terminal (or not-yet-terminal) outcome of one fetch attempt against an
/// archive id. Numeric codes are part of the external contract — downstream
/// consumers read them directly from the store, so the discriminants must
/// never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum SnapshotFetchStatus {
    Unknown = 0,
    Success = 1,
    NoContentFound = 2,
    InvalidId = 3,
    AgeRestricted = 4,
    NoCreatives = 5,
    IpViolation = 6,
    PermanentlyUnavailable = 7,
}

impl SnapshotFetchStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, SnapshotFetchStatus::Unknown)
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Unknown,
            1 => Self::Success,
            2 => Self::NoContentFound,
            3 => Self::InvalidId,
            4 => Self::AgeRestricted,
            5 => Self::NoCreatives,
            6 => Self::IpViolation,
            7 => Self::PermanentlyUnavailable,
            _ => return None,
        })
    }
}

/// One row per archive id per fetch pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadataRecord {
    pub archive_id: ArchiveId,
    pub fetch_time: DateTime<Utc>,
    pub fetch_status: SnapshotFetchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_external_contract_verbatim() {
        assert_eq!(SnapshotFetchStatus::Unknown.code(), 0);
        assert_eq!(SnapshotFetchStatus::Success.code(), 1);
        assert_eq!(SnapshotFetchStatus::NoContentFound.code(), 2);
        assert_eq!(SnapshotFetchStatus::InvalidId.code(), 3);
        assert_eq!(SnapshotFetchStatus::AgeRestricted.code(), 4);
        assert_eq!(SnapshotFetchStatus::NoCreatives.code(), 5);
        assert_eq!(SnapshotFetchStatus::IpViolation.code(), 6);
        assert_eq!(SnapshotFetchStatus::PermanentlyUnavailable.code(), 7);
    }

    #[test]
    fn only_unknown_is_non_terminal() {
        assert!(!SnapshotFetchStatus::Unknown.is_terminal());
        assert!(SnapshotFetchStatus::Success.is_terminal());
        assert!(SnapshotFetchStatus::PermanentlyUnavailable.is_terminal());
    }

    #[test]
    fn from_code_rejects_out_of_range_values() {
        assert_eq!(SnapshotFetchStatus::from_code(1), Some(SnapshotFetchStatus::Success));
        assert_eq!(SnapshotFetchStatus::from_code(99), None);
    }
}
