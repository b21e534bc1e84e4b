//! Package constants and user-adjustable settings.
//!
//! The managed-directory set and the backup store name are fixed constants.
//! Only the remote repository coordinates are configurable, merged from
//! built-in defaults, an `ai-config.toml` in the working directory, and
//! `AI_CONFIG_*` environment variables.

use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Directory names subject to sync, backup, and rollback.
pub const MANAGED_DIRECTORIES: [&str; 2] = [".cursor", ".claude"];

/// Hidden backup store created inside the target project.
pub const BACKUP_ROOT_NAME: &str = ".ai-config-backup";

/// Prefix for the ephemeral clone directory.
pub const TMP_PREFIX: &str = "ai-config-sync-";

/// Remote repository used when neither flag nor configuration names one.
pub const DEFAULT_REPO_URL: &str = "http://gitee.com/xkcyy/ai-config.git";

/// Remote repository coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Repository URL used when --repo is not given
    pub repo: String,

    /// Ref synced when --ref is not given; the remote default branch when
    /// absent
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO_URL.to_string(),
            reference: None,
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `ai-config.toml`, then `AI_CONFIG_*`
    /// environment variables, later sources winning.
    pub fn load() -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("ai-config.toml"))
            .merge(Env::prefixed("AI_CONFIG_"))
            .extract()?;
        Ok(settings)
    }
}
