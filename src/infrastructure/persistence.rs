use crate::domain::CyclesState;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Default state file name. The version suffix names the on-disk schema;
/// bumping it abandons the old slot (there is no migration logic).
pub const STORAGE_FILE: &str = "tomatui-cycles-state-1.0.0.json";

/// JSON file persistence for the cycle state.
///
/// One fixed slot, whole-state writes: every save replaces the entire file.
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save_state(&self, state: &CyclesState) -> Result<(), String> {
        match serde_json::to_string_pretty(state) {
            Ok(json) => match fs::write(&self.path, json) {
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    /// Loads the persisted state, `Ok(None)` when no state has been saved yet.
    ///
    /// A malformed file is an error, not an empty state: silently starting
    /// over would drop the user's history on the next save.
    pub fn load_state(&self) -> Result<Option<CyclesState>, String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<CyclesState>(&content) {
                Ok(state) => Ok(Some(state)),
                Err(e) => Err(format!("Invalid state file format - {}", e)),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Cycle;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_state() -> CyclesState {
        let mut cycle = Cycle::new("1000".to_string(), "Study".to_string(), 25, Utc::now());
        cycle.interrupted_date = Some(Utc::now());
        CyclesState {
            cycles: vec![cycle],
            active_cycle_id: None,
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let repository = StateRepository::new(dir.path().join(STORAGE_FILE));
        let state = sample_state();

        repository.save_state(&state).unwrap();
        let loaded = repository.load_state().unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let repository = StateRepository::new(dir.path().join(STORAGE_FILE));

        assert_eq!(repository.load_state().unwrap(), None);
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let repository = StateRepository::new(path);

        let result = repository.load_state();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid state file format"));
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let repository = StateRepository::new(dir.path().join(STORAGE_FILE));

        repository.save_state(&sample_state()).unwrap();
        repository.save_state(&CyclesState::default()).unwrap();

        assert_eq!(repository.load_state().unwrap(), Some(CyclesState::default()));
    }

    #[test]
    fn test_save_to_unwritable_path_reports_error() {
        let dir = tempdir().unwrap();
        // A directory component that does not exist.
        let repository = StateRepository::new(dir.path().join("missing").join(STORAGE_FILE));

        assert!(repository.save_state(&CyclesState::default()).is_err());
    }
}
