//! Installation gate.
//!
//! Tracks whether a valid server root path is known. While the path is
//! absent the UI renders a blocking modal; nothing else is usable. The
//! folder picker and the persistence step are injected so the dialog stays
//! in the UI layer and both branches are testable.

use std::path::{Path, PathBuf};

use crate::config::AppState;
use crate::error::ConfigError;

pub struct InstallGate {
    path: Option<PathBuf>,
}

impl InstallGate {
    /// Load the gate state once at startup from persisted settings.
    pub fn from_state(state: &AppState) -> Self {
        InstallGate {
            path: state.install_path.as_ref().map(PathBuf::from),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run the folder picker and, on a concrete selection, persist and adopt
    /// the path. Cancellation returns `Ok(None)` and leaves state unchanged.
    ///
    /// Any selected directory is accepted; there is no validation that it
    /// contains a real server installation.
    pub fn select_with<P, S>(&mut self, picker: P, persist: S) -> Result<Option<&Path>, ConfigError>
    where
        P: FnOnce() -> Option<PathBuf>,
        S: FnOnce(&Path) -> Result<(), ConfigError>,
    {
        match picker() {
            Some(selected) => {
                persist(&selected)?;
                log::info!("Install path selected: {}", selected.display());
                self.path = Some(selected);
                Ok(self.path.as_deref())
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_unsatisfied_without_path() {
        let gate = InstallGate::from_state(&AppState::default());
        assert!(!gate.is_satisfied());
        assert!(gate.path().is_none());
    }

    #[test]
    fn test_gate_loads_persisted_path() {
        let mut state = AppState::default();
        state.install_path = Some("/srv/hlds".to_string());
        let gate = InstallGate::from_state(&state);
        assert!(gate.is_satisfied());
        assert_eq!(gate.path(), Some(Path::new("/srv/hlds")));
    }

    #[test]
    fn test_selection_persists_and_satisfies() {
        let mut gate = InstallGate::from_state(&AppState::default());
        let mut persisted = None;
        let result = gate
            .select_with(
                || Some(PathBuf::from("/srv/hlds")),
                |path| {
                    persisted = Some(path.to_path_buf());
                    Ok(())
                },
            )
            .unwrap();
        assert_eq!(result, Some(Path::new("/srv/hlds")));
        assert_eq!(persisted.as_deref(), Some(Path::new("/srv/hlds")));
        assert!(gate.is_satisfied());
    }

    #[test]
    fn test_cancellation_is_a_no_op() {
        let mut gate = InstallGate::from_state(&AppState::default());
        let result = gate
            .select_with(|| None, |_| panic!("must not persist on cancel"))
            .unwrap();
        assert!(result.is_none());
        assert!(!gate.is_satisfied());
    }
}
