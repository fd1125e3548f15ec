pub mod flags;
pub mod persistence;
pub mod settings;

pub use flags::{FeatureFlags, FlagChange};
pub use settings::{env_locales, resolve_locale, AppSettings};
