//! Configuration structures for the tshub generator.
//!
//! This module provides configuration types for all components of the application:
//!
//! - [`GeneratorConfig`] - Naming and discovery settings for code generation
//! - [`OutputConfig`] - Which optional files the driver emits
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values matching an
//! ASP.NET Core SignalR server and the `@microsoft/signalr` JavaScript client.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::naming::to_camel_case;

/// How wire-level method and event tokens are derived from host method names.
///
/// # Examples
///
/// ```
/// use tshub_core::WireNameCasing;
///
/// assert_eq!(WireNameCasing::Camel.apply("SomethingHappened"), "somethingHappened");
/// assert_eq!(WireNameCasing::Preserve.apply("SomethingHappened"), "SomethingHappened");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum WireNameCasing {
    /// Lower-camel-case the host name (`DoStuff` becomes `doStuff`).
    #[default]
    Camel,
    /// Pass the host name through unmodified.
    Preserve,
}

impl WireNameCasing {
    /// Applies this casing to a host method name.
    #[must_use]
    pub fn apply(self, host_name: &str) -> String {
        match self {
            Self::Camel => to_camel_case(host_name),
            Self::Preserve => host_name.to_owned(),
        }
    }
}

/// Configuration for the code generator.
///
/// # Examples
///
/// ```
/// use tshub_core::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.client_suffix, "Client");
/// assert_eq!(config.types_dir, "types");
/// assert_eq!(config.client_class_name("ChatHub"), "ChatHubClient");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Suffix appended to the hub name to form the proxy class name.
    pub client_suffix: String,

    /// Directory (relative to the proxy file) holding one file per declaration.
    pub types_dir: String,

    /// Module the `HubConnection` type is imported from.
    pub transport_module: String,

    /// Fully-qualified generic base types that mark a type as an RPC hub.
    ///
    /// The single type argument of the base is the client callback interface.
    pub hub_base_types: Vec<String>,

    /// Casing applied to wire-level method and event tokens.
    pub wire_casing: WireNameCasing,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client_suffix: "Client".to_owned(),
            types_dir: "types".to_owned(),
            transport_module: "@microsoft/signalr".to_owned(),
            hub_base_types: vec!["Microsoft.AspNetCore.SignalR.Hub`1".to_owned()],
            wire_casing: WireNameCasing::Camel,
        }
    }
}

impl GeneratorConfig {
    /// Returns the proxy class name generated for a hub.
    #[must_use]
    pub fn client_class_name(&self, hub_name: &str) -> String {
        format!("{hub_name}{}", self.client_suffix)
    }

    /// Returns `true` if `base_type` names one of the configured hub bases.
    #[must_use]
    pub fn is_hub_base(&self, base_type: &str) -> bool {
        self.hub_base_types.iter().any(|b| b == base_type)
    }
}

/// Configuration for the files the driver writes.
///
/// # Examples
///
/// ```
/// use tshub_core::OutputConfig;
///
/// assert!(!OutputConfig::default().create_react_context);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether to emit the React context provider and hook next to each proxy.
    pub create_react_context: bool,
}

/// Root configuration for the tshub generator.
///
/// # Examples
///
/// ```
/// use tshub_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// let parsed: Config = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code generator configuration.
    pub generator: GeneratorConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Loads a configuration file, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// or fails [`Config::validate`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every option holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        if generator.client_suffix.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "generator.client_suffix",
                "must not be empty",
            ));
        }
        if generator.types_dir.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "generator.types_dir",
                "must not be empty",
            ));
        }
        if generator.types_dir.contains("..") || Utf8Path::new(&generator.types_dir).is_absolute()
        {
            return Err(ConfigError::invalid_option(
                "generator.types_dir",
                "must be a relative path inside the output folder",
            ));
        }
        if generator.transport_module.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "generator.transport_module",
                "must not be empty",
            ));
        }
        if generator.hub_base_types.is_empty() {
            return Err(ConfigError::invalid_option(
                "generator.hub_base_types",
                "at least one hub base type is required",
            ));
        }
        Ok(())
    }
}
