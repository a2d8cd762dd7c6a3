//! Configuration management.
//!
//! Every value has a default matching the stock game installation, so a
//! configuration file is optional. Files are TOML; `CLUEDO_*` environment
//! variables override both file values and defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Main configuration for the game setup.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// Name this process registers under and sends as the directive client name.
    pub client_name: String,
    /// Ontology reference every directive applies to.
    pub reference_name: String,
    /// Ontology load settings.
    pub ontology: OntologyConfig,
    /// Reasoning service connection settings.
    pub service: ServiceConfig,
    /// Path of the shared parameter-store file.
    pub params_file: PathBuf,
    /// Fixed seed for hypothesis sampling. Random when unset.
    pub seed: Option<u64>,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Arguments of the ontology LOAD directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyConfig {
    /// Path of the OWL file, as seen by the reasoning service.
    pub path: String,
    /// Ontology IRI.
    pub iri: String,
    /// Whether the service should buffer manipulations.
    pub buffered: bool,
    /// Reasoner the service should attach.
    pub reasoner: String,
    /// Whether the service should reason right after loading.
    pub auto_reason: bool,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            path: "/root/ros_ws/src/exprob_ass1/cluedo_ontology.owl".to_string(),
            iri: "http://www.emarolab.it/cluedo-ontology".to_string(),
            buffered: true,
            reasoner: "PELLET".to_string(),
            auto_reason: true,
        }
    }
}

/// Reasoning service connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service name, used in logs and errors.
    pub name: String,
    /// Base URL of the service.
    pub endpoint: String,
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
    /// Delay between availability probes in milliseconds.
    pub poll_interval_ms: u64,
    /// Upper bound on a single availability probe in milliseconds.
    pub probe_timeout_ms: u64,
    /// Give up waiting for the service after this long (0 waits forever).
    pub wait_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "armor_interface_srv".to_string(),
            endpoint: "http://localhost:9090".to_string(),
            timeout_ms: 0,
            connect_timeout_ms: 3_000,
            poll_interval_ms: 500,
            probe_timeout_ms: 1_000,
            wait_timeout_ms: 0,
        }
    }
}

/// Logging settings as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `cluedo_setup=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Append log lines to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Client name.
    pub client_name: Option<String>,
    /// Ontology reference name.
    pub reference_name: Option<String>,
    /// Parameter-store file.
    pub params_file: Option<String>,
    /// Sampling seed.
    pub seed: Option<u64>,
    /// Ontology section.
    pub ontology: Option<ConfigFileOntology>,
    /// Service section.
    pub service: Option<ConfigFileService>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Ontology section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileOntology {
    /// OWL file path.
    pub path: Option<String>,
    /// Ontology IRI.
    pub iri: Option<String>,
    /// Buffered manipulation.
    pub buffered: Option<bool>,
    /// Reasoner name.
    pub reasoner: Option<String>,
    /// Reason on load.
    pub auto_reason: Option<bool>,
}

/// Service section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileService {
    /// Service name.
    pub name: Option<String>,
    /// Base URL.
    pub endpoint: Option<String>,
    /// Request timeout.
    pub timeout_ms: Option<u64>,
    /// Connect timeout.
    pub connect_timeout_ms: Option<u64>,
    /// Probe interval.
    pub poll_interval_ms: Option<u64>,
    /// Probe timeout.
    pub probe_timeout_ms: Option<u64>,
    /// Wait timeout.
    pub wait_timeout_ms: Option<u64>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            client_name: "menage_ontology".to_string(),
            reference_name: "cluedontology".to_string(),
            ontology: OntologyConfig::default(),
            service: ServiceConfig::default(),
            params_file: PathBuf::from(".cluedo").join("params.json"),
            seed: None,
            logging: LoggingSettings::default(),
        }
    }
}

impl SetupConfig {
    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has mistyped fields.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir (`~/.config/cluedo-setup/config.toml` on
    /// Linux). Returns default configuration if there is no file there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Ok(Self::default());
        };

        Self::load_or_default(&base_dirs.config_dir().join("cluedo-setup").join("config.toml"))
    }

    /// Loads configuration from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Converts a `ConfigFile` to `SetupConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(client_name) = file.client_name {
            config.client_name = client_name;
        }
        if let Some(reference_name) = file.reference_name {
            config.reference_name = reference_name;
        }
        if let Some(params_file) = file.params_file {
            config.params_file = PathBuf::from(params_file);
        }
        config.seed = file.seed;

        if let Some(ontology) = file.ontology {
            if let Some(v) = ontology.path {
                config.ontology.path = v;
            }
            if let Some(v) = ontology.iri {
                config.ontology.iri = v;
            }
            if let Some(v) = ontology.buffered {
                config.ontology.buffered = v;
            }
            if let Some(v) = ontology.reasoner {
                config.ontology.reasoner = v;
            }
            if let Some(v) = ontology.auto_reason {
                config.ontology.auto_reason = v;
            }
        }
        if let Some(service) = file.service {
            if let Some(v) = service.name {
                config.service.name = v;
            }
            if let Some(v) = service.endpoint {
                config.service.endpoint = v;
            }
            if let Some(v) = service.timeout_ms {
                config.service.timeout_ms = v;
            }
            if let Some(v) = service.connect_timeout_ms {
                config.service.connect_timeout_ms = v;
            }
            if let Some(v) = service.poll_interval_ms {
                config.service.poll_interval_ms = v;
            }
            if let Some(v) = service.probe_timeout_ms {
                config.service.probe_timeout_ms = v;
            }
            if let Some(v) = service.wait_timeout_ms {
                config.service.wait_timeout_ms = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies `CLUEDO_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Unparseable numeric values are ignored.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = lookup("CLUEDO_SERVICE_ENDPOINT") {
            self.service.endpoint = v;
        }
        if let Some(v) = lookup("CLUEDO_WAIT_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.service.wait_timeout_ms = v;
        }
        if let Some(v) = lookup("CLUEDO_PARAMS_FILE") {
            self.params_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("CLUEDO_ONTOLOGY_PATH") {
            self.ontology.path = v;
        }
        if let Some(v) = lookup("CLUEDO_SEED").and_then(|v| v.parse().ok()) {
            self.seed = Some(v);
        }
        if let Some(v) = lookup("CLUEDO_LOG_LEVEL") {
            self.logging.level = Some(v);
        }
        if let Some(v) = lookup("CLUEDO_LOG_FORMAT") {
            self.logging.format = Some(v);
        }
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
