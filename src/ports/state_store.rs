use crate::domain::{AppError, Snapshot};

/// Port for durable form state, keyed by workspace identity.
pub trait StateStore {
    /// Read the last saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Snapshot>, AppError>;

    /// Persist a snapshot, replacing the previous one.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), AppError>;
}
