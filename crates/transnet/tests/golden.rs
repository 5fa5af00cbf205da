//! Golden tests: build networks from recorded path lists and compare the
//! dump, leaf counts and distances with the expected values in
//! `tests/golden/scenarios.json`.
//!
//! Run: cargo test -p transnet --test golden

use std::path::PathBuf;

use serde::Deserialize;
use transnet::{ConflictPolicy, NetworkConfig, NetworkError, StateId, TransitionNetwork};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Policy {
    Overwrite,
    Reject,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    max_states: usize,
    max_transitions: usize,
    #[serde(default)]
    policy: Option<Policy>,
    paths: Vec<Vec<String>>,
    /// Indices into `paths` whose insertion must fail with a conflict.
    #[serde(default)]
    rejected: Vec<usize>,
    dump: String,
    leaf_counts: Vec<(u32, usize)>,
    distances: Vec<(u32, u32, f64)>,
}

fn load_scenarios() -> Vec<Scenario> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/golden/scenarios.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

fn build(scenario: &Scenario) -> TransitionNetwork {
    let policy = match scenario.policy {
        Some(Policy::Reject) => ConflictPolicy::Reject,
        Some(Policy::Overwrite) | None => ConflictPolicy::Overwrite,
    };
    let config = NetworkConfig::new(scenario.max_states, scenario.max_transitions)
        .with_conflict_policy(policy);
    let mut network = TransitionNetwork::with_config(config)
        .unwrap_or_else(|e| panic!("[{}] invalid config: {}", scenario.name, e));

    for (i, path) in scenario.paths.iter().enumerate() {
        let result = network.add_path(path);
        if scenario.rejected.contains(&i) {
            assert!(
                matches!(result, Err(NetworkError::ConflictingTransition { .. })),
                "[{}] path {} should have been rejected, got {:?}",
                scenario.name,
                i,
                result
            );
        } else if let Err(e) = result {
            panic!("[{}] path {} failed: {}", scenario.name, i, e);
        }
    }
    network
}

#[test]
fn golden_dumps() {
    for scenario in load_scenarios() {
        let network = build(&scenario);
        assert_eq!(network.print(), scenario.dump, "[{}] dump differs", scenario.name);
    }
}

#[test]
fn golden_leaf_counts() {
    for scenario in load_scenarios() {
        let network = build(&scenario);
        for &(state, expected) in &scenario.leaf_counts {
            assert_eq!(
                network.count_sub_states(StateId::new(state)).unwrap(),
                expected,
                "[{}] leaf count of S{}",
                scenario.name,
                state
            );
        }
    }
}

#[test]
fn golden_distances() {
    for scenario in load_scenarios() {
        let network = build(&scenario);
        for &(a, b, expected) in &scenario.distances {
            let actual = network
                .state_distance(StateId::new(a), StateId::new(b))
                .unwrap();
            assert!(
                (actual - expected).abs() < 1e-12,
                "[{}] distance(S{}, S{}) = {}, expected {}",
                scenario.name,
                a,
                b,
                actual,
                expected
            );
        }
    }
}

#[test]
fn golden_paths_are_accepted() {
    for scenario in load_scenarios() {
        let network = build(&scenario);
        // The last inserted path always ends in a terminal edge.
        let last = scenario
            .paths
            .iter()
            .enumerate()
            .rev()
            .find(|(i, _)| !scenario.rejected.contains(i))
            .map(|(_, path)| path);
        if let Some(path) = last {
            assert!(network.contains_path(path), "[{}] last path missing", scenario.name);
        }
    }
}
