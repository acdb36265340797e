//! Save/load of builds
//!
//! A save is a plain JSON array of brick records:
//! `{"id", "type", "position": [x, y, z], "rotation": [x, y, z], "color"}`.
//! `type` and `rotation` may be missing (saves from the fixed-size editor).
//!
//! Loading validates the whole batch up front and rejects it with the first
//! itemized problem; nothing is salvaged from a partially valid list.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::sim::{Brick, BrickId, overlapping_pairs};

/// Why save data was refused
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("save data is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("save data must be a list of bricks, found {found}")]
    NotAList { found: &'static str },

    #[error("brick #{index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("brick #{index} reuses id '{id}'")]
    DuplicateId { index: usize, id: BrickId },

    #[error("could not read save file: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a build could not be written
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not encode build: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write save file: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode bricks as a pretty-printed JSON array
pub fn to_json(bricks: &[Brick]) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(bricks)?)
}

/// Decode and validate a saved build
pub fn from_json(json: &str) -> Result<Vec<Brick>, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(LoadError::Parse)?;
    let Value::Array(records) = value else {
        return Err(LoadError::NotAList {
            found: json_kind(&value),
        });
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut bricks = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let brick: Brick =
            serde_json::from_value(record).map_err(|e| LoadError::InvalidEntry {
                index,
                reason: e.to_string(),
            })?;
        validate_brick(&brick).map_err(|reason| LoadError::InvalidEntry { index, reason })?;
        if !seen.insert(brick.id.clone()) {
            return Err(LoadError::DuplicateId {
                index,
                id: brick.id,
            });
        }
        bricks.push(brick);
    }

    let overlaps = overlapping_pairs(&bricks);
    if !overlaps.is_empty() {
        log::warn!(
            "Save data has {} overlapping brick pairs (first: {} / {})",
            overlaps.len(),
            overlaps[0].0,
            overlaps[0].1
        );
    }

    Ok(bricks)
}

fn validate_brick(brick: &Brick) -> Result<(), String> {
    if brick.id.as_str().trim().is_empty() {
        return Err("id is empty".to_string());
    }
    if !brick.position.is_finite() {
        return Err(format!("position {} is not finite", brick.position));
    }
    if !brick.rotation.is_finite() {
        return Err(format!("rotation {} is not finite", brick.rotation));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Write a build to `path`
pub fn save_to_path(path: &Path, bricks: &[Brick]) -> Result<(), SaveError> {
    std::fs::write(path, to_json(bricks)?)?;
    log::info!("Saved {} bricks to {}", bricks.len(), path.display());
    Ok(())
}

/// Read and validate a build from `path`
pub fn load_from_path(path: &Path) -> Result<Vec<Brick>, LoadError> {
    let json = std::fs::read_to_string(path)?;
    match from_json(&json) {
        Ok(bricks) => {
            log::info!("Read {} bricks from {}", bricks.len(), path.display());
            Ok(bricks)
        }
        Err(e) => {
            log::warn!("Rejected save file {}: {}", path.display(), e);
            Err(e)
        }
    }
}
