use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a cycle as shown in the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    InProgress,
    Interrupted,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub task: String,
    pub minutes_amount: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<DateTime<Utc>>,
}

impl Cycle {
    pub fn new(id: String, task: String, minutes_amount: u32, start_date: DateTime<Utc>) -> Self {
        Self {
            id,
            task,
            minutes_amount,
            start_date,
            interrupted_date: None,
            finished_date: None,
        }
    }

    /// Target duration in seconds.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes_amount) * 60
    }

    /// Whole seconds elapsed between the cycle's start and `now`, floored.
    ///
    /// A start date in the future (clock skew) counts as zero.
    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> u64 {
        now.signed_duration_since(self.start_date)
            .num_seconds()
            .max(0) as u64
    }

    /// Finished and interrupted are terminal; anything else is in progress,
    /// whether or not the cycle is still reachable through the active pointer.
    pub fn status(&self) -> CycleStatus {
        if self.finished_date.is_some() {
            CycleStatus::Finished
        } else if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else {
            CycleStatus::InProgress
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.finished_date.is_some() || self.interrupted_date.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclesState {
    pub cycles: Vec<Cycle>,
    pub active_cycle_id: Option<String>,
}

impl CyclesState {
    /// The cycle the active pointer refers to, derived by id match alone.
    ///
    /// Note this can return a cycle that already carries a finished date:
    /// finishing stamps the date but does not clear the pointer.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let active_id = self.active_cycle_id.as_deref()?;
        self.cycles.iter().find(|cycle| cycle.id == active_id)
    }
}
