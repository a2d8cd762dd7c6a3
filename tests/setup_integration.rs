//! End-to-end setup tests against a stub reasoning service.
//!
//! The stub echoes every directive back and records it, so the tests can
//! check exactly what the setup sent and in which order.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use cluedo_setup::config::SetupConfig;
use cluedo_setup::models::{Catalogs, ClassTag, Command, Directive, DirectiveResponse};
use cluedo_setup::params::{FileParameterStore, MemoryParameterStore, ParameterStore};
use cluedo_setup::reasoner::ReasoningService;
use cluedo_setup::{Error, GameSetup, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use test_case::test_case;

// ============================================================================
// Test Helpers
// ============================================================================

/// Stub service that echoes arguments back and records every directive.
#[derive(Default)]
struct EchoService {
    sent: Mutex<Vec<Directive>>,
    probes: Mutex<u32>,
    unreachable: AtomicBool,
}

impl EchoService {
    fn sent(&self) -> Vec<Directive> {
        self.sent.lock().unwrap().clone()
    }

    fn commands(&self) -> Vec<Command> {
        self.sent().into_iter().map(|d| d.command).collect()
    }
}

impl ReasoningService for EchoService {
    fn name(&self) -> &str {
        "echo"
    }

    fn is_available(&self) -> bool {
        let mut probes = self.probes.lock().unwrap();
        *probes += 1;
        // Comes up on the third probe.
        *probes >= 3
    }

    fn execute(&self, directive: &Directive) -> Result<DirectiveResponse> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::OperationFailed {
                operation: "reasoner_request".to_string(),
                cause: "connect error".to_string(),
            });
        }
        self.sent.lock().unwrap().push(directive.clone());
        Ok(DirectiveResponse {
            queried_objects: directive.args.clone(),
            ..DirectiveResponse::ok()
        })
    }
}

fn test_config() -> SetupConfig {
    let mut config = SetupConfig::default().with_seed(2022);
    config.service.poll_interval_ms = 1;
    config
}

fn run_setup() -> (Arc<EchoService>, Arc<MemoryParameterStore>) {
    let service = Arc::new(EchoService::default());
    let store = Arc::new(MemoryParameterStore::new());
    GameSetup::new(&test_config(), service.clone(), store.clone())
        .run()
        .expect("setup should succeed against the echo service");
    (service, store)
}

fn count(commands: &[Command], command: Command) -> usize {
    commands.iter().filter(|c| **c == command).count()
}

// ============================================================================
// Directive Stream
// ============================================================================

#[test]
fn test_directive_counts() {
    let (service, _) = run_setup();
    let commands = service.commands();

    assert_eq!(count(&commands, Command::Load), 1);
    assert_eq!(count(&commands, Command::Add), 21);
    assert_eq!(count(&commands, Command::Disjoint), 3);
    assert_eq!(count(&commands, Command::Reason), 2);
    assert_eq!(commands.len(), 27);
}

#[test]
fn test_phase_order() {
    let (service, _) = run_setup();
    let commands = service.commands();

    let mut expected = vec![Command::Load];
    expected.extend(std::iter::repeat_n(Command::Add, 21));
    expected.push(Command::Reason);
    expected.extend(std::iter::repeat_n(Command::Disjoint, 3));
    expected.push(Command::Reason);

    assert_eq!(commands, expected);
}

#[test]
fn test_individuals_follow_catalog_order() {
    let (service, _) = run_setup();
    let catalogs = Catalogs::default();

    let added: Vec<(String, String)> = service
        .sent()
        .into_iter()
        .filter(|d| d.command == Command::Add)
        .map(|d| (d.args[0].clone(), d.args[1].clone()))
        .collect();

    let expected: Vec<(String, String)> = catalogs
        .in_order()
        .iter()
        .flat_map(|catalog| {
            catalog
                .entries()
                .iter()
                .map(move |e| (e.clone(), catalog.class().to_string()))
        })
        .collect();

    assert_eq!(added, expected);
}

#[test]
fn test_disjoint_class_order() {
    let (service, _) = run_setup();

    let classes: Vec<String> = service
        .sent()
        .into_iter()
        .filter(|d| d.command == Command::Disjoint)
        .flat_map(|d| d.args)
        .collect();

    let expected: Vec<String> = ClassTag::all().iter().map(ToString::to_string).collect();
    assert_eq!(classes, expected);
}

#[test]
fn test_every_directive_is_stamped() {
    let (service, _) = run_setup();

    for directive in service.sent() {
        assert_eq!(directive.client_name, "menage_ontology");
        assert_eq!(directive.reference_name, "cluedontology");
    }
}

#[test_case(Command::Load, "FILE", "" ; "load")]
#[test_case(Command::Add, "IND", "CLASS" ; "add")]
#[test_case(Command::Disjoint, "IND", "CLASS" ; "disjoint")]
#[test_case(Command::Reason, "", "" ; "reason")]
fn test_command_qualifiers(command: Command, primary: &str, secondary: &str) {
    let (service, _) = run_setup();

    let matching: Vec<Directive> = service
        .sent()
        .into_iter()
        .filter(|d| d.command == command)
        .collect();
    assert!(!matching.is_empty());
    for directive in matching {
        assert_eq!(directive.primary_command_spec, primary);
        assert_eq!(directive.secondary_command_spec, secondary);
    }
}

// ============================================================================
// Parameter Store
// ============================================================================

#[test]
fn test_five_keys_written() {
    let (_, store) = run_setup();

    assert_eq!(
        store.write_log(),
        vec!["people", "weapons", "places", "ID", "hypo"]
    );
    assert_eq!(store.keys().len(), 5);
}

#[test]
fn test_published_hypotheses_shape() {
    let (_, store) = run_setup();

    let hypo = store.get("hypo").unwrap();
    let hypotheses = hypo.as_array().unwrap();
    assert_eq!(hypotheses.len(), 10);

    let lengths: Vec<usize> = hypotheses
        .iter()
        .map(|h| h.as_array().unwrap().len())
        .collect();
    assert_eq!(lengths, vec![4, 4, 4, 4, 3, 3, 3, 5, 5, 7]);

    // Each hypothesis ends with its identifier, in the published ID order.
    let ids: Vec<Value> = hypotheses
        .iter()
        .map(|h| h.as_array().unwrap().last().unwrap().clone())
        .collect();
    assert_eq!(Value::Array(ids), store.get("ID").unwrap());
}

#[test]
fn test_catalogs_published_before_service_is_up() {
    let service = Arc::new(EchoService {
        unreachable: AtomicBool::new(true),
        ..EchoService::default()
    });
    let store = Arc::new(MemoryParameterStore::new());

    let result = GameSetup::new(&test_config(), service.clone(), store.clone()).run();

    assert!(matches!(result, Err(Error::OperationFailed { .. })));
    assert_eq!(store.write_log(), vec!["people", "weapons", "places", "ID"]);
    assert!(service.sent().is_empty());
}

#[test]
fn test_wait_timeout_aborts_setup() {
    struct Down;

    impl ReasoningService for Down {
        fn name(&self) -> &str {
            "down"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn execute(&self, _directive: &Directive) -> Result<DirectiveResponse> {
            Ok(DirectiveResponse::ok())
        }
    }

    let mut config = test_config();
    config.service.wait_timeout_ms = 10;
    let store = Arc::new(MemoryParameterStore::new());

    let result = GameSetup::new(&config, Arc::new(Down), store.clone()).run();

    assert!(matches!(result, Err(Error::ServiceUnavailable { .. })));
    assert!(store.get("hypo").is_none());
}

#[test]
fn test_file_store_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    let store: Arc<dyn ParameterStore> = Arc::new(FileParameterStore::new(&path).unwrap());

    let hypotheses = GameSetup::new(&test_config(), Arc::new(EchoService::default()), store)
        .run()
        .unwrap();

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let object = document.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["ID", "hypo", "people", "places", "weapons"]);
    assert_eq!(document["hypo"], serde_json::to_value(&hypotheses).unwrap());
    assert_eq!(document["places"].as_array().unwrap().len(), 9);
}

#[test]
fn test_seed_makes_runs_reproducible() {
    let (_, first) = run_setup();
    let (_, second) = run_setup();
    assert_eq!(first.get("hypo"), second.get("hypo"));
}
