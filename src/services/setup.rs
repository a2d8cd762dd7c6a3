//! Game setup orchestration.
//!
//! Publishes the catalogs, waits for the reasoning service, loads the
//! ontology, registers the individuals, reasons, declares disjointness,
//! reasons again and finally publishes the generated hypotheses.

use super::HypothesisGenerator;
use crate::config::{OntologyConfig, ServiceConfig, SetupConfig};
use crate::models::{Catalogs, ClassTag, HYPOTHESIS_IDS, HYPOTHESIS_TEMPLATES, Hypothesis};
use crate::observability::PARAMETERS_WRITTEN;
use crate::params::ParameterStore;
use crate::reasoner::{OntologyHandle, ReasoningService, wait_for_service};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Parameter key holding the hypothesis identifiers.
pub const IDS_KEY: &str = "ID";
/// Parameter key holding the generated hypotheses.
pub const HYPOTHESES_KEY: &str = "hypo";

/// Parameters published before the game starts, in publication order: one
/// entry per catalog followed by the hypothesis identifiers.
///
/// # Errors
///
/// Returns an error if a value cannot be serialized.
pub fn catalog_parameters(catalogs: &Catalogs) -> Result<Vec<(&'static str, Value)>> {
    let mut parameters = Vec::with_capacity(4);
    for catalog in catalogs.in_order() {
        parameters.push((catalog.param_key(), to_param_value(catalog.entries())?));
    }
    parameters.push((IDS_KEY, to_param_value(HYPOTHESIS_IDS)?));
    Ok(parameters)
}

fn to_param_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::OperationFailed {
        operation: "serialize_param".to_string(),
        cause: e.to_string(),
    })
}

/// Orchestrates one game setup against a reasoning service and a parameter store.
pub struct GameSetup {
    catalogs: Catalogs,
    ontology: OntologyConfig,
    service_config: ServiceConfig,
    service: Arc<dyn ReasoningService>,
    handle: OntologyHandle,
    store: Arc<dyn ParameterStore>,
    generator: HypothesisGenerator,
}

impl GameSetup {
    /// Creates a setup with the stock catalogs.
    #[must_use]
    pub fn new(
        config: &SetupConfig,
        service: Arc<dyn ReasoningService>,
        store: Arc<dyn ParameterStore>,
    ) -> Self {
        let catalogs = Catalogs::default();
        let handle = OntologyHandle::new(
            Arc::clone(&service),
            &config.client_name,
            &config.reference_name,
        );

        Self {
            generator: HypothesisGenerator::new(catalogs.clone(), config.seed),
            catalogs,
            ontology: config.ontology.clone(),
            service_config: config.service.clone(),
            service,
            handle,
            store,
        }
    }

    /// Runs the whole setup and returns the published hypotheses.
    ///
    /// # Errors
    ///
    /// Returns an error if the service never becomes available, a directive
    /// cannot be delivered, or the parameter store rejects a write.
    #[instrument(skip(self), fields(client = %self.handle.client_name()))]
    pub fn run(&mut self) -> Result<Vec<Hypothesis>> {
        self.publish_catalogs()?;
        wait_for_service(self.service.as_ref(), &self.service_config)?;

        self.load_ontology()?;
        self.register_individuals()?;
        self.reason()?;
        self.declare_disjoint()?;
        self.reason()?;
        self.generate_hypotheses()
    }

    /// Publishes the catalogs and the identifier list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a write.
    pub fn publish_catalogs(&self) -> Result<()> {
        for (key, value) in catalog_parameters(&self.catalogs)? {
            self.publish(key, &value)?;
        }
        Ok(())
    }

    /// Loads the ontology into the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn load_ontology(&self) -> Result<()> {
        self.handle.load(&self.ontology)?;
        tracing::info!(
            path = %self.ontology.path,
            iri = %self.ontology.iri,
            reasoner = %self.ontology.reasoner,
            "Ontology loaded"
        );
        Ok(())
    }

    /// Registers every catalog entry as an individual of its class.
    ///
    /// Individuals the service refuses are logged and skipped. Returns the
    /// number of individuals the service accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if a directive cannot be delivered.
    pub fn register_individuals(&self) -> Result<usize> {
        let mut accepted = 0;
        for catalog in self.catalogs.in_order() {
            let class = catalog.class();
            for label in catalog.entries() {
                if self.handle.add_individual(label, class)?.success {
                    accepted += 1;
                }
            }
            tracing::info!(class = %class, count = catalog.len(), "Individuals uploaded");
        }
        Ok(accepted)
    }

    /// Declares the individuals of each class pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns an error if a directive cannot be delivered.
    pub fn declare_disjoint(&self) -> Result<()> {
        for class in ClassTag::all() {
            self.handle.disjoint_individuals(*class)?;
            tracing::info!(class = %class, "Individuals declared disjoint");
        }
        Ok(())
    }

    /// Runs the reasoner.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive cannot be delivered.
    pub fn reason(&self) -> Result<()> {
        let response = self.handle.reason()?;
        tracing::info!(consistent = response.is_consistent, "Reasoner updated");
        Ok(())
    }

    /// Generates the hypotheses of the game and publishes them.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog is empty or the store rejects the write.
    pub fn generate_hypotheses(&mut self) -> Result<Vec<Hypothesis>> {
        let hypotheses = self.generator.generate()?;
        for (hypothesis, template) in hypotheses.iter().zip(HYPOTHESIS_TEMPLATES.iter()) {
            tracing::debug!(
                id = hypothesis.id(),
                shape = template.shape().as_str(),
                entries = ?hypothesis.entries(),
                "Hypothesis generated"
            );
        }
        self.publish(HYPOTHESES_KEY, &hypotheses)?;
        tracing::info!(count = hypotheses.len(), "Hypotheses published");
        Ok(hypotheses)
    }

    fn publish<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, to_param_value(value)?)?;
        metrics::counter!(PARAMETERS_WRITTEN, "key" => key.to_string()).increment(1);
        tracing::debug!(store = self.store.name(), key, "Parameter set");
        Ok(())
    }
}
