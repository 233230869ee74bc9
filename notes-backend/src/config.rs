use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "HOST";
    /// Path of the JSON file mirroring the note collection
    pub const NOTES_DATA_FILE: &str = "NOTES_DATA_FILE";
    /// Set to "true" or "1" to keep notes in memory only (nothing written to disk).
    pub const NOTES_IN_MEMORY: &str = "NOTES_IN_MEMORY";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3001;
    pub const HOST: &str = "0.0.0.0";
    pub const DATA_DIR: &str = "data";
    pub const NOTES_FILE: &str = "notes.json";
}

/// Returns the absolute path to the notes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to notes-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Default persistence file (notes-backend/data/notes.json)
pub fn default_data_file() -> PathBuf {
    backend_dir().join(defaults::DATA_DIR).join(defaults::NOTES_FILE)
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` when the store runs in memory only
    pub data_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid {} '{}', using {}", env_vars::PORT, raw, defaults::PORT);
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        let in_memory = lookup(env_vars::NOTES_IN_MEMORY)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let data_file = if in_memory {
            None
        } else {
            Some(
                lookup(env_vars::NOTES_DATA_FILE)
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_file),
            )
        };

        Self {
            host: lookup(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            data_file,
        }
    }
}
