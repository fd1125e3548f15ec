use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A YAML document read from the config directory at startup.
///
/// Loading is read-only: toggles changed while the widget runs are never
/// written back.
pub trait Persistable: Sized + Default + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;

    /// Load from `dir`, returning `Default` when the file does not exist.
    fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(Self::filename());
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(&contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))
    }
}
