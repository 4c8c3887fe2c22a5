use crate::domain::{AppError, Snapshot};
use crate::ports::StateStore;

/// In-memory snapshot store recording every save.
#[derive(Default)]
#[allow(dead_code)]
pub struct MemoryStateStore {
    pub stored: Option<Snapshot>,
    pub saves: Vec<Snapshot>,
    pub fail_load: bool,
    pub fail_save: bool,
}

#[allow(dead_code)]
impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { stored: Some(snapshot), ..Self::default() }
    }

    fn failure(&self) -> AppError {
        AppError::Persistence { path: "memory".to_string(), reason: "mock failure".to_string() }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<Snapshot>, AppError> {
        if self.fail_load {
            return Err(self.failure());
        }
        Ok(self.stored.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
        if self.fail_save {
            return Err(self.failure());
        }
        self.stored = Some(snapshot.clone());
        self.saves.push(snapshot.clone());
        Ok(())
    }
}
