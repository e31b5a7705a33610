use std::path::Path;

use config::{builder::DefaultState, ConfigBuilder, Environment, File, FileFormat};
use error_stack::{IntoReport, ResultExt};
use serde::Deserialize;

use crate::{
    consts,
    errors::{ApplicationError, CustomResult},
};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub response: ResponseSettings,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseSettings {
    pub unknown_params: UnknownParamPolicy,
    pub duplicate_params: DuplicateParamPolicy,
}

/// What to do with parameters no view claimed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParamPolicy {
    #[default]
    Retain,
    Ignore,
    Reject,
}

/// What to do when a raw response repeats a parameter name.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateParamPolicy {
    #[default]
    KeepLast,
    Reject,
}

impl Settings {
    /// Environment variables only, e.g. `PAYFLOW__RESPONSE__UNKNOWN_PARAMS=reject`.
    pub fn new() -> CustomResult<Self, ApplicationError> {
        Self::build(config::Config::builder())
    }

    /// Reads an optional TOML file, then lets the environment override it.
    pub fn with_config_path(path: impl AsRef<Path>) -> CustomResult<Self, ApplicationError> {
        let builder = config::Config::builder()
            .add_source(File::from(path.as_ref()).required(false).format(FileFormat::Toml));
        Self::build(builder)
    }

    pub fn from_toml_str(contents: &str) -> CustomResult<Self, ApplicationError> {
        let builder =
            config::Config::builder().add_source(File::from_str(contents, FileFormat::Toml));
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> CustomResult<Self, ApplicationError> {
        builder
            .add_source(
                Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator(consts::ENV_SEPARATOR),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(ApplicationError::from)
            .into_report()
            .attach_printable("Unable to load payflow response settings")
    }
}
