use log::{info, warn};
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::CoreError;
use crate::models::user::User;

use super::format;

/// Result of trying to restore a saved user.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A valid state file was read.
    Restored(User),
    /// No state file exists yet.
    Missing,
    /// A state file exists but could not be read or decoded.
    Corrupt(CoreError),
}

/// High-level storage operations: save/load user state to/from bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a user into state-file bytes.
    ///
    /// Flow: User → bincode → STSM format bytes
    pub fn save_to_bytes(user: &User) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(user)?;

        Ok(format::write_file(format::CURRENT_VERSION, &payload))
    }

    /// Decode a user from state-file bytes.
    ///
    /// Flow: STSM bytes → parse header → bincode → User
    pub fn load_from_bytes(data: &[u8]) -> Result<User, CoreError> {
        let (_header, payload) = format::read_file(data)?;

        let user: User = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize user: {e}")))?;

        Ok(user)
    }

    /// Save a user to disk, overwriting any previous state.
    pub fn save_to_file(user: &User, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        let bytes = Self::save_to_bytes(user)?;
        std::fs::write(path, bytes)?;
        info!(
            "saved state for {} ({} transactions) to {}",
            user.name(),
            user.portfolio().transaction_count(),
            path.display()
        );
        Ok(())
    }

    /// Load a user from disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<User, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }

    /// Load a user from disk, telling a missing file apart from a damaged one.
    ///
    /// Never fails: every problem is folded into the returned outcome. A
    /// damaged file is logged as a warning.
    pub fn load_user_state(path: impl AsRef<Path>) -> LoadOutcome {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no saved state at {}", path.display());
                return LoadOutcome::Missing;
            }
            Err(e) => {
                warn!("cannot read saved state at {}: {e}", path.display());
                return LoadOutcome::Corrupt(e.into());
            }
        };

        match Self::load_from_bytes(&bytes) {
            Ok(user) => {
                info!("restored state for {} from {}", user.name(), path.display());
                LoadOutcome::Restored(user)
            }
            Err(e) => {
                warn!("saved state at {} is unusable: {e}", path.display());
                LoadOutcome::Corrupt(e)
            }
        }
    }
}
