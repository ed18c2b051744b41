use glam::DVec3;

use super::*;

/// Defaults match the documented split policy: 50 entities, 5 units.
#[test]
fn test_default_values() {
  let config = OctreeConfig::default();

  assert_eq!(config.preferred_max_data_per_node, 50);
  assert_eq!(config.minimum_node_size, 5.0);
  assert!(config.validate().is_ok());
}

/// Threshold is inclusive: reaching the preferred count triggers a split.
#[test]
fn test_should_split_is_inclusive() {
  let config = OctreeConfig::new(4, 5.0);

  assert!(!config.should_split(3));
  assert!(config.should_split(4));
  assert!(config.should_split(100));
}

/// Size floor is inclusive and checked on every axis.
#[test]
fn test_can_split_checks_every_axis() {
  let config = OctreeConfig::new(4, 5.0);

  assert!(config.can_split(DVec3::splat(5.0)), "Exactly the floor may split");
  assert!(config.can_split(DVec3::splat(100.0)));
  assert!(!config.can_split(DVec3::new(100.0, 4.9, 100.0)), "Y below floor");
  assert!(!config.can_split(DVec3::new(100.0, 100.0, 2.5)), "Z below floor");
}

/// Builder setters replace only the targeted field.
#[test]
fn test_builder_setters() {
  let config = OctreeConfig::default()
    .with_preferred_max_data_per_node(8)
    .with_minimum_node_size(0.25);

  assert_eq!(config, OctreeConfig::new(8, 0.25));
}

/// Values that would make recursion unbounded are rejected.
#[test]
fn test_validate_rejects_degenerate_values() {
  let zero_threshold = OctreeConfig::new(0, 5.0);
  assert!(matches!(
    zero_threshold.validate(),
    Err(OctreeError::InvalidConfig(_))
  ));

  for floor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
    let config = OctreeConfig::new(10, floor);
    assert!(
      config.validate().is_err(),
      "Floor {} should be rejected",
      floor
    );
  }
}
