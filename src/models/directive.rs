//! Requests to and replies from the ontology reasoning service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Command verb carried by a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    /// Load an ontology from a file.
    Load,
    /// Add an individual to a class.
    Add,
    /// Declare the individuals of a class pairwise distinct.
    Disjoint,
    /// Recompute inferred facts.
    Reason,
}

impl Command {
    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "LOAD",
            Self::Add => "ADD",
            Self::Disjoint => "DISJOINT",
            Self::Reason => "REASON",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single request to the reasoning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Name of the calling client.
    pub client_name: String,
    /// Name of the ontology reference the directive applies to.
    pub reference_name: String,
    /// Command verb.
    pub command: Command,
    /// First command qualifier (e.g. `FILE`, `IND`).
    pub primary_command_spec: String,
    /// Second command qualifier (e.g. `CLASS`).
    pub secondary_command_spec: String,
    /// Command arguments.
    pub args: Vec<String>,
}

impl Directive {
    /// Creates a directive with empty qualifiers and no arguments.
    #[must_use]
    pub fn new(
        client_name: impl Into<String>,
        reference_name: impl Into<String>,
        command: Command,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            reference_name: reference_name.into(),
            command,
            primary_command_spec: String::new(),
            secondary_command_spec: String::new(),
            args: Vec::new(),
        }
    }

    /// Sets both command qualifiers.
    #[must_use]
    pub fn with_specs(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_command_spec = primary.into();
        self.secondary_command_spec = secondary.into();
        self
    }

    /// Sets the argument list.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Reply from the reasoning service.
///
/// The orchestrator only logs this; every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectiveResponse {
    /// Whether the service executed the directive.
    pub success: bool,
    /// Whether the service timed out executing it.
    pub timeout: bool,
    /// Service-specific exit code.
    pub exit_code: i32,
    /// Human-readable error, empty on success.
    pub error_description: String,
    /// Consistency verdict of the ontology after the directive.
    pub is_consistent: bool,
    /// Objects returned by query directives.
    pub queried_objects: Vec<String>,
}

impl DirectiveResponse {
    /// A successful, empty reply.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            is_consistent: true,
            ..Self::default()
        }
    }

    /// A failed reply carrying `description`.
    #[must_use]
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: 1,
            error_description: description.into(),
            ..Self::default()
        }
    }
}
