//! Ontology reasoning service abstraction.
//!
//! [`ReasoningService`] is the transport: it executes one directive and
//! returns the raw reply. [`OntologyHandle`] is the single call handle the
//! setup uses; it stamps every directive with the client and ontology names
//! and exposes the four commands the game needs as typed operations.

mod availability;
mod http;

pub use availability::wait_for_service;
pub use http::HttpReasoningService;

use crate::config::OntologyConfig;
use crate::models::{ClassTag, Command, Directive, DirectiveResponse};
use crate::observability::{DIRECTIVE_DURATION_MS, DIRECTIVE_FAILURES, DIRECTIVES_SENT};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;

/// Trait for ontology reasoning services.
pub trait ReasoningService: Send + Sync {
    /// The service name.
    fn name(&self) -> &str;

    /// Returns `true` if the service currently accepts directives.
    fn is_available(&self) -> bool;

    /// Executes a directive and returns the service reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or its reply cannot
    /// be decoded. A reply with `success == false` is not an error.
    fn execute(&self, directive: &Directive) -> Result<DirectiveResponse>;
}

/// Call handle bound to one client and one ontology reference.
#[derive(Clone)]
pub struct OntologyHandle {
    service: Arc<dyn ReasoningService>,
    client_name: String,
    reference_name: String,
}

impl OntologyHandle {
    /// Creates a handle sending directives as `client_name` against `reference_name`.
    #[must_use]
    pub fn new(
        service: Arc<dyn ReasoningService>,
        client_name: impl Into<String>,
        reference_name: impl Into<String>,
    ) -> Self {
        Self {
            service,
            client_name: client_name.into(),
            reference_name: reference_name.into(),
        }
    }

    /// The client name stamped on every directive.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Loads the ontology file into the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn load(&self, ontology: &OntologyConfig) -> Result<DirectiveResponse> {
        let directive = self
            .directive(Command::Load)
            .with_specs("FILE", "")
            .with_args([
                ontology.path.clone(),
                ontology.iri.clone(),
                ontology.buffered.to_string(),
                ontology.reasoner.clone(),
                ontology.auto_reason.to_string(),
            ]);
        self.send(&directive)
    }

    /// Asserts `label` as an individual of `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn add_individual(&self, label: &str, class: ClassTag) -> Result<DirectiveResponse> {
        let directive = self
            .directive(Command::Add)
            .with_specs("IND", "CLASS")
            .with_args([label, class.as_str()]);
        self.send(&directive)
    }

    /// Declares all known individuals of `class` pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn disjoint_individuals(&self, class: ClassTag) -> Result<DirectiveResponse> {
        let directive = self
            .directive(Command::Disjoint)
            .with_specs("IND", "CLASS")
            .with_args([class.as_str()]);
        self.send(&directive)
    }

    /// Asks the service to recompute inferred facts.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn reason(&self) -> Result<DirectiveResponse> {
        let directive = self.directive(Command::Reason);
        self.send(&directive)
    }

    fn directive(&self, command: Command) -> Directive {
        Directive::new(&self.client_name, &self.reference_name, command)
    }

    /// Sends a directive, logging and counting the outcome.
    ///
    /// The reply is returned as-is; a reply reporting failure is only logged.
    fn send(&self, directive: &Directive) -> Result<DirectiveResponse> {
        let command = directive.command.as_str();
        let start = Instant::now();
        let result = self.service.execute(directive);
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = start.elapsed().as_millis() as f64;

        metrics::counter!(DIRECTIVES_SENT, "command" => command).increment(1);
        metrics::histogram!(DIRECTIVE_DURATION_MS, "command" => command).record(elapsed_ms);

        let response = result.inspect_err(|e| {
            tracing::error!(
                service = self.service.name(),
                command,
                args = ?directive.args,
                error = %e,
                "Directive could not be delivered"
            );
        })?;

        if response.success {
            tracing::debug!(
                service = self.service.name(),
                command,
                args = ?directive.args,
                elapsed_ms,
                "Directive executed"
            );
        } else {
            metrics::counter!(DIRECTIVE_FAILURES, "command" => command).increment(1);
            tracing::warn!(
                service = self.service.name(),
                command,
                args = ?directive.args,
                exit_code = response.exit_code,
                error = %response.error_description,
                "Service reported directive failure"
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Directive>>,
        fail: bool,
    }

    impl ReasoningService for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn execute(&self, directive: &Directive) -> Result<DirectiveResponse> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(directive.clone());
            }
            if self.fail {
                Ok(DirectiveResponse::failed("rejected"))
            } else {
                Ok(DirectiveResponse::ok())
            }
        }
    }

    fn last_sent(recorder: &Recorder) -> Option<Directive> {
        recorder.sent.lock().ok().and_then(|s| s.last().cloned())
    }

    #[test]
    fn test_load_directive() {
        let recorder = Arc::new(Recorder::default());
        let handle = OntologyHandle::new(recorder.clone(), "client", "onto");

        assert!(handle.load(&OntologyConfig::default()).is_ok());

        let sent = last_sent(&recorder).unwrap();
        assert_eq!(sent.client_name, "client");
        assert_eq!(sent.reference_name, "onto");
        assert_eq!(sent.command, Command::Load);
        assert_eq!(sent.primary_command_spec, "FILE");
        assert_eq!(sent.secondary_command_spec, "");
        assert_eq!(
            sent.args,
            vec![
                "/root/ros_ws/src/exprob_ass1/cluedo_ontology.owl",
                "http://www.emarolab.it/cluedo-ontology",
                "true",
                "PELLET",
                "true",
            ]
        );
    }

    #[test]
    fn test_add_and_disjoint_directives() {
        let recorder = Arc::new(Recorder::default());
        let handle = OntologyHandle::new(recorder.clone(), "client", "onto");

        assert!(handle.add_individual("Rope", ClassTag::Weapon).is_ok());
        let add = last_sent(&recorder).map(|d| (d.command, d.args));
        assert_eq!(
            add,
            Some((Command::Add, vec!["Rope".to_string(), "WEAPON".to_string()]))
        );

        assert!(handle.disjoint_individuals(ClassTag::Place).is_ok());
        let disjoint = last_sent(&recorder).map(|d| (d.command, d.args));
        assert_eq!(disjoint, Some((Command::Disjoint, vec!["PLACE".to_string()])));
    }

    #[test]
    fn test_reason_has_no_args() {
        let recorder = Arc::new(Recorder::default());
        let handle = OntologyHandle::new(recorder.clone(), "client", "onto");

        assert!(handle.reason().is_ok());
        let sent = last_sent(&recorder).unwrap();
        assert_eq!(sent.command, Command::Reason);
        assert!(sent.args.is_empty());
        assert!(sent.primary_command_spec.is_empty());
        assert!(sent.secondary_command_spec.is_empty());
    }

    #[test]
    fn test_failed_reply_is_not_an_error() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let handle = OntologyHandle::new(recorder, "client", "onto");

        let response = handle.add_individual("Hall", ClassTag::Place);
        assert!(response.is_ok_and(|r| !r.success));
    }
}
