use crate::calc::DEFAULT_LOCALE;
use crate::data::flags::FeatureFlags;
use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup defaults from the `settings` key of config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub locale: Option<String>,
    pub flags: FeatureFlags,
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl AppSettings {
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }
}

/// Picks the first usable locale tag: explicit CLI value, config file, then the
/// `LC_ALL`/`LANG` environment values, then [`DEFAULT_LOCALE`].
pub fn resolve_locale(
    cli: Option<&str>,
    settings: &AppSettings,
    env: &[Option<String>],
) -> String {
    let usable = |tag: &str| {
        let tag = tag.trim();
        !tag.is_empty() && tag != "C" && tag != "POSIX" && !tag.starts_with("C.")
    };
    cli.map(str::to_string)
        .into_iter()
        .chain(settings.locale.clone())
        .chain(env.iter().flatten().cloned())
        .find(|tag| usable(tag.as_str()))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Locale candidates from the process environment, highest priority first.
pub fn env_locales() -> Vec<Option<String>> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .map(|key| std::env::var(key).ok())
        .collect()
}
