use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::quiz::Question;

/// Everything needed to pick a quiz back up on the next run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SavedState {
    pub questions: Vec<Question>,
    pub question_no: usize,
    pub score: usize,
}

/// Overwrites whatever is at `path`.
pub fn write(path: &Path, state: &SavedState) -> Result<()> {
    let bytes = serde_json::to_vec(state)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// `Ok(None)` means there is simply nothing saved.
pub fn read(path: &Path) -> Result<Option<SavedState>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let state = serde_json::from_slice(&bytes)?;
    Ok(Some(state))
}

pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}
