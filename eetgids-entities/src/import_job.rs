use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::{id::Id, time::Timestamp};

pub type ImportJobStatusPrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ImportJobStatus {
    Pending   = 0,
    Running   = 1,
    Completed = 2,
    Failed    = 3,
}

impl ImportJobStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub const fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Jobs move forward only: pending, running, then completed or failed.
    /// A pending job may fail before it ever runs.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Pending)
                | (Self::Pending, Self::Running)
                | (Self::Pending, Self::Failed)
                | (Self::Running, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error)]
#[error("Invalid import job status primitive: {0}")]
pub struct InvalidImportJobStatusPrimitive(ImportJobStatusPrimitive);

impl TryFrom<ImportJobStatusPrimitive> for ImportJobStatus {
    type Error = InvalidImportJobStatusPrimitive;
    fn try_from(from: ImportJobStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidImportJobStatusPrimitive(from))
    }
}

impl From<ImportJobStatus> for ImportJobStatusPrimitive {
    fn from(from: ImportJobStatus) -> Self {
        from.to_i16().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportJobCounters {
    pub processed_cities: u32,
    pub imported_restaurants: u32,
    pub imported_reviews: u32,
    pub skipped_restaurants: u32,
}

/// A long-running bulk import executed by an external worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub id: Id,
    pub status: ImportJobStatus,
    pub counters: ImportJobCounters,
    pub last_city: Option<String>,
    pub errors: Vec<String>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

impl ImportJob {
    pub fn new_pending(now: Timestamp) -> Self {
        Self {
            id: Id::new(),
            status: ImportJobStatus::Pending,
            counters: Default::default(),
            last_city: None,
            errors: vec![],
            created_at: now,
            started_at: None,
            updated_at: now,
            finished_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn terminal_states_accept_no_transitions() {
        for from in [ImportJobStatus::Completed, ImportJobStatus::Failed] {
            for to in ImportJobStatus::iter() {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn forward_transitions() {
        use ImportJobStatus::*;
        assert!(Pending.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Running.can_transition_to(Pending));
    }

    #[test]
    fn status_names() {
        assert_eq!("running", ImportJobStatus::Running.as_str());
        assert_eq!(ImportJobStatus::Failed, "FAILED".parse().unwrap());
    }
}
