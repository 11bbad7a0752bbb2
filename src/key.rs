//! Structural fingerprint of a [`FleetRequest`], excluding total capacity.

use crate::model::FleetRequest;

/// Deterministic fingerprint of a [`FleetRequest`], independent of
/// `total_target_capacity`.
///
/// Two requests produce equal keys iff every field other than total
/// capacity is structurally equal: list order, nested option-vs-empty-string
/// distinctions, and list lengths all contribute. This must never be
/// computed from pointer/reference identity of the request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EquivalenceKey(String);

impl EquivalenceKey {
    /// Compute the key for `request`.
    ///
    /// Implemented as a canonical JSON encoding of the request with
    /// `total_target_capacity` zeroed out. `serde_json` preserves struct
    /// field order and list order, so this is a total, deterministic,
    /// linear-time function of the request's structure.
    pub fn compute(request: &FleetRequest) -> Self {
        let canonical = request.with_total_target_capacity(0);
        let encoded = serde_json::to_string(&canonical)
            .expect("FleetRequest contains no non-JSON-serializable fields");
        Self(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LaunchTemplateConfig, LaunchTemplateSpecification, Override, TargetCapacity};

    fn request(az: &str, capacity: u64) -> FleetRequest {
        FleetRequest {
            launch_template_configs: vec![LaunchTemplateConfig {
                launch_template_specification: LaunchTemplateSpecification {
                    name: Some("my-template".to_string()),
                    version: None,
                    id: None,
                },
                overrides: vec![Override {
                    availability_zone: Some(az.to_string()),
                    ..Default::default()
                }],
            }],
            target_capacity: TargetCapacity {
                total_target_capacity: capacity,
                ..Default::default()
            },
        }
    }

    #[test]
    fn ignores_total_target_capacity() {
        let a = request("us-east-1", 1);
        let b = request("us-east-1", 5);
        assert_eq!(EquivalenceKey::compute(&a), EquivalenceKey::compute(&b));
    }

    #[test]
    fn distinguishes_different_overrides() {
        let a = request("us-east-1", 1);
        let b = request("us-east-2", 1);
        assert_ne!(EquivalenceKey::compute(&a), EquivalenceKey::compute(&b));
    }

    #[test]
    fn is_order_sensitive_over_override_lists() {
        let mut a = request("us-east-1", 1);
        a.launch_template_configs[0].overrides.push(Override {
            availability_zone: Some("us-east-2".to_string()),
            ..Default::default()
        });

        let mut b = request("us-east-2", 1);
        b.launch_template_configs[0].overrides.insert(
            0,
            Override {
                availability_zone: Some("us-east-1".to_string()),
                ..Default::default()
            },
        );

        // a = [east-1, east-2], b = [east-2, east-1] after the insert above.
        assert_ne!(EquivalenceKey::compute(&a), EquivalenceKey::compute(&b));
    }

    #[test]
    fn distinguishes_absent_from_empty_string() {
        let mut absent = request("us-east-1", 1);
        absent.launch_template_configs[0]
            .launch_template_specification
            .version = None;

        let mut empty = request("us-east-1", 1);
        empty.launch_template_configs[0]
            .launch_template_specification
            .version = Some(String::new());

        assert_ne!(EquivalenceKey::compute(&absent), EquivalenceKey::compute(&empty));
    }

    #[test]
    fn is_total_for_minimal_requests() {
        let minimal = FleetRequest::default();
        // Must not panic for a request with no launch template configs.
        let _ = EquivalenceKey::compute(&minimal);
    }
}
