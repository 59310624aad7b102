//! Marker determinism and sensitivity tests.

use drone_secrets_core::{derive_marker_name, DesiredSecret, HashConfig};
use rstest::rstest;

fn cheap() -> HashConfig {
    HashConfig::new(1, 64, 1, 16).expect("valid parameters")
}

#[test]
fn same_inputs_give_same_marker() {
    let first = derive_marker_name("API_KEY", "abc", &cheap()).unwrap();
    let second = derive_marker_name("API_KEY", "abc", &cheap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn changing_value_changes_marker() {
    let before = derive_marker_name("API_KEY", "abc", &cheap()).unwrap();
    let after = derive_marker_name("API_KEY", "abd", &cheap()).unwrap();
    assert_ne!(before, after);
}

#[rstest]
#[case("iterations", HashConfig::new(2, 64, 1, 16).unwrap())]
#[case("memory", HashConfig::new(1, 128, 1, 16).unwrap())]
#[case("parallelism", HashConfig::new(1, 64, 2, 16).unwrap())]
#[case("length", HashConfig::new(1, 64, 1, 20).unwrap())]
fn changing_hash_config_changes_marker(#[case] label: &str, #[case] config: HashConfig) {
    let baseline = derive_marker_name("API_KEY", "abc", &cheap()).unwrap();
    let changed = derive_marker_name("API_KEY", "abc", &config).unwrap();
    assert_ne!(baseline, changed, "[{label}] marker should change");
    assert!(changed.starts_with("API_KEY___"), "[{label}] prefix kept");
}

#[test]
fn desired_secret_memoizes_marker() {
    let secret = DesiredSecret::new("API_KEY", "abc", cheap());
    let first = secret.marker_name().unwrap().to_owned();
    let second = secret.marker_name().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, derive_marker_name("API_KEY", "abc", &cheap()).unwrap());
}

#[test]
fn cloned_secret_keeps_cached_marker() {
    let secret = DesiredSecret::new("API_KEY", "abc", cheap());
    let marker = secret.marker_name().unwrap().to_owned();
    let clone = secret.clone();
    assert!(format!("{clone:?}").contains(&marker));
}

