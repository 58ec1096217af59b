// Copyright © 2024 Pathway

use log::warn;

use crate::env::{env_var, Error as EnvError};

pub const TYPE_KEY_VAR: &str = "REPORT_FILTER_TYPE_KEY";
pub const NAME_KEY_VAR: &str = "REPORT_FILTER_NAME_KEY";
pub const MACHINE_KEY_VAR: &str = "REPORT_FILTER_MACHINE_KEY";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("parameter key set by {0} must not be empty")]
    EmptyKey(&'static str),

    #[error(transparent)]
    EnvError(#[from] EnvError),
}

/// Names of the request parameters a filter reads its query from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    pub type_key: String,
    pub name_key: String,
    pub machine_key: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            type_key: "type".to_owned(),
            name_key: "name".to_owned(),
            machine_key: "ip".to_owned(),
        }
    }
}

impl FilterConfig {
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        for (var, key) in [
            (TYPE_KEY_VAR, &mut config.type_key),
            (NAME_KEY_VAR, &mut config.name_key),
            (MACHINE_KEY_VAR, &mut config.machine_key),
        ] {
            if let Some(value) = env_var(var)? {
                if value.trim().is_empty() {
                    warn!("{var} is set but empty, refusing to read parameters from an empty key");
                    return Err(Error::EmptyKey(var));
                }
                *key = value;
            }
        }
        Ok(config)
    }
}
