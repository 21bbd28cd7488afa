//! The cycle store: the single owner of cycle state and its persistence.
//!
//! Every mutation goes through the reducer and is immediately written back to
//! the state file, so the file always mirrors the in-memory state. Readers get
//! borrowed views; nothing outside this type can mutate the state directly.

use chrono::Utc;

use crate::domain::{reduce, Cycle, CycleAction, CyclesState};
use crate::infrastructure::StateRepository;

/// Input for starting a new cycle, as supplied by the creation form.
///
/// Deliberately unvalidated: a blank task or a zero duration is accepted.
#[derive(Debug, Clone)]
pub struct NewCycleData {
    pub task: String,
    pub minutes_amount: u32,
}

pub struct CyclesStore {
    state: CyclesState,
    amount_seconds_passed: u64,
    repository: StateRepository,
}

impl CyclesStore {
    /// Opens the store over the given repository.
    ///
    /// Restores the persisted state when the file exists; a missing file
    /// yields the empty default. When a cycle is still active, the elapsed
    /// counter resumes from the wall clock so a restart does not reset the
    /// countdown.
    ///
    /// # Errors
    ///
    /// Fails when the state file exists but cannot be read or parsed.
    pub fn open(repository: StateRepository) -> Result<Self, String> {
        let state = repository.load_state()?.unwrap_or_default();

        let amount_seconds_passed = match state.active_cycle() {
            Some(active) => active.elapsed_seconds_at(Utc::now()),
            None => 0,
        };

        Ok(Self {
            state,
            amount_seconds_passed,
            repository,
        })
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.state.cycles
    }

    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    /// The cycle the active pointer currently refers to, if any.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.state.active_cycle()
    }

    pub fn active_cycle_id(&self) -> Option<&str> {
        self.state.active_cycle_id.as_deref()
    }

    /// Latest known elapsed-seconds count for the active cycle.
    pub fn amount_seconds_passed(&self) -> u64 {
        self.amount_seconds_passed
    }

    /// Overwrites the elapsed-seconds counter. Called by the ticking loop;
    /// the store does not drive a timer itself.
    pub fn set_seconds_passed(&mut self, seconds: u64) {
        self.amount_seconds_passed = seconds;
    }

    /// Starts a new cycle with `start_date = now` and an id derived from the
    /// creation time (millisecond epoch), then resets the elapsed counter.
    pub fn create_new_cycle(&mut self, data: NewCycleData) -> Result<(), String> {
        let now = Utc::now();
        let id = now.timestamp_millis().to_string();
        let cycle = Cycle::new(id, data.task, data.minutes_amount, now);

        self.dispatch(CycleAction::AddNewCycle(cycle))?;
        self.amount_seconds_passed = 0;
        Ok(())
    }

    /// Interrupts the active cycle. Silently does nothing when no cycle is
    /// active.
    pub fn interrupt_current_cycle(&mut self) -> Result<(), String> {
        self.dispatch(CycleAction::InterruptCurrentCycle { at: Utc::now() })
    }

    /// Stamps the active cycle as finished. The active pointer is left in
    /// place (see the reducer). Silently does nothing when no cycle is active.
    pub fn mark_current_cycle_as_finished(&mut self) -> Result<(), String> {
        self.dispatch(CycleAction::MarkCurrentCycleAsFinished { at: Utc::now() })
    }

    /// Runs an action through the reducer and persists the resulting state.
    ///
    /// Persistence is write-through: the new state replaces the file before
    /// this returns, last write wins. On a write failure the in-memory state
    /// still advances; the caller decides how to surface the error.
    fn dispatch(&mut self, action: CycleAction) -> Result<(), String> {
        self.state = reduce(&self.state, action);
        self.repository.save_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::STORAGE_FILE;
    use chrono::{Duration, Utc};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn open_store(dir: &TempDir) -> CyclesStore {
        CyclesStore::open(StateRepository::new(dir.path().join(STORAGE_FILE))).unwrap()
    }

    fn study_cycle_data() -> NewCycleData {
        NewCycleData {
            task: "Study".to_string(),
            minutes_amount: 25,
        }
    }

    fn write_state(path: &Path, state: &CyclesState) {
        StateRepository::new(path).save_state(state).unwrap();
    }

    #[test]
    fn test_open_without_state_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        assert!(store.cycles().is_empty());
        assert!(store.active_cycle_id().is_none());
        assert_eq!(store.amount_seconds_passed(), 0);
    }

    #[test]
    fn test_open_with_malformed_state_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, "not json at all").unwrap();

        assert!(CyclesStore::open(StateRepository::new(path)).is_err());
    }

    #[test]
    fn test_create_new_cycle_activates_and_resets_counter() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.set_seconds_passed(42);

        let before = Utc::now();
        store.create_new_cycle(study_cycle_data()).unwrap();
        let after = Utc::now();

        assert_eq!(store.cycles().len(), 1);
        let cycle = store.active_cycle().expect("cycle should be active");
        assert_eq!(cycle.task, "Study");
        assert_eq!(cycle.minutes_amount, 25);
        assert!(cycle.start_date >= before && cycle.start_date <= after);
        assert_eq!(cycle.id, cycle.start_date.timestamp_millis().to_string());
        assert_eq!(store.active_cycle_id(), Some(cycle.id.clone()).as_deref());
        assert_eq!(store.amount_seconds_passed(), 0);
    }

    #[test]
    fn test_created_ids_are_unique() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        store.create_new_cycle(study_cycle_data()).unwrap();
        // Ids come from the millisecond clock, so step past the current tick.
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.create_new_cycle(study_cycle_data()).unwrap();

        assert_ne!(store.cycles()[0].id, store.cycles()[1].id);
    }

    #[test]
    fn test_interrupt_scenario() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        store.create_new_cycle(study_cycle_data()).unwrap();
        assert_eq!(store.cycles().len(), 1);
        assert_eq!(store.active_cycle().unwrap().task, "Study");

        store.interrupt_current_cycle().unwrap();

        assert!(store.active_cycle_id().is_none());
        assert_eq!(store.cycles().len(), 1);
        assert!(store.cycles()[0].interrupted_date.is_some());
        assert!(store.cycles()[0].finished_date.is_none());
    }

    #[test]
    fn test_interrupt_without_active_cycle_leaves_state_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.create_new_cycle(study_cycle_data()).unwrap();
        store.interrupt_current_cycle().unwrap();
        let snapshot = store.state().clone();

        store.interrupt_current_cycle().unwrap();
        assert_eq!(store.state(), &snapshot);

        store.mark_current_cycle_as_finished().unwrap();
        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn test_finish_keeps_active_pointer() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.create_new_cycle(study_cycle_data()).unwrap();

        store.mark_current_cycle_as_finished().unwrap();

        assert!(store.active_cycle_id().is_some());
        let cycle = store.active_cycle().unwrap();
        assert!(cycle.finished_date.is_some());
    }

    #[test]
    fn test_every_change_is_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        let mut store = open_store(&dir);

        store.create_new_cycle(study_cycle_data()).unwrap();
        let on_disk = StateRepository::new(&path).load_state().unwrap().unwrap();
        assert_eq!(&on_disk, store.state());

        store.interrupt_current_cycle().unwrap();
        let on_disk = StateRepository::new(&path).load_state().unwrap().unwrap();
        assert_eq!(&on_disk, store.state());
        assert!(on_disk.active_cycle_id.is_none());
    }

    #[test]
    fn test_reopen_restores_persisted_state() {
        let dir = tempdir().unwrap();
        {
            let mut store = open_store(&dir);
            store.create_new_cycle(study_cycle_data()).unwrap();
            store.interrupt_current_cycle().unwrap();
        }

        let store = open_store(&dir);
        assert_eq!(store.cycles().len(), 1);
        assert_eq!(store.cycles()[0].task, "Study");
        assert!(store.cycles()[0].interrupted_date.is_some());
        assert_eq!(store.amount_seconds_passed(), 0);
    }

    #[test]
    fn test_reload_resumes_elapsed_seconds_from_start_date() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let start = Utc::now() - Duration::seconds(90);
        let cycle = Cycle::new(
            start.timestamp_millis().to_string(),
            "Study".to_string(),
            25,
            start,
        );
        write_state(
            &path,
            &CyclesState {
                active_cycle_id: Some(cycle.id.clone()),
                cycles: vec![cycle],
            },
        );

        let store = CyclesStore::open(StateRepository::new(path)).unwrap();
        // Whole seconds, floored; allow one tick for test runtime.
        assert!((90..=91).contains(&store.amount_seconds_passed()));
    }

    #[test]
    fn test_reload_without_active_cycle_starts_counter_at_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let start = Utc::now() - Duration::seconds(300);
        let mut cycle = Cycle::new("1000".to_string(), "Study".to_string(), 25, start);
        cycle.interrupted_date = Some(start + Duration::seconds(60));
        write_state(
            &path,
            &CyclesState {
                cycles: vec![cycle],
                active_cycle_id: None,
            },
        );

        let store = CyclesStore::open(StateRepository::new(path)).unwrap();
        assert_eq!(store.amount_seconds_passed(), 0);
    }
}
