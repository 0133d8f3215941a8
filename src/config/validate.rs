// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PrefchainError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PrefchainError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.resolver, raw.action))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_actions(cfg)?;
    validate_resolver_section(cfg)?;
    validate_action_dependencies(cfg)?;
    validate_preferences(cfg)?;
    Ok(())
}

fn ensure_has_actions(cfg: &RawConfigFile) -> Result<()> {
    if cfg.action.is_empty() {
        return Err(PrefchainError::ConfigError(
            "config must contain at least one [action.<id>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_resolver_section(cfg: &RawConfigFile) -> Result<()> {
    // `score` is strongly typed and validated during deserialization.

    if cfg.resolver.max_paths == 0 {
        return Err(PrefchainError::ConfigError(
            "[resolver].max_paths must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_action_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, action) in cfg.action.iter() {
        for dep in action.depends.iter() {
            if dep == name {
                return Err(PrefchainError::ConfigError(format!(
                    "action '{}' cannot depend on itself in `depends`",
                    name
                )));
            }
            if !cfg.action.contains_key(dep) {
                return Err(PrefchainError::ConfigError(format!(
                    "action '{}' has unknown dependency '{}' in `depends`",
                    name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_preferences(cfg: &RawConfigFile) -> Result<()> {
    for (name, action) in cfg.action.iter() {
        if let Some(ref after) = action.after {
            if !action.depends.contains(after) {
                return Err(PrefchainError::InvalidPreference {
                    node: name.clone(),
                    after: after.clone(),
                });
            }
        }
    }
    Ok(())
}
