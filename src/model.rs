//! Wire-level types for the fleet-provisioning API.
//!
//! These mirror the shape of a cloud fleet API's request/response bodies
//! closely enough to compute an [`EquivalenceKey`](crate::EquivalenceKey)
//! over them and to split a response across callers, without depending on
//! any particular SDK's concrete types.

use serde::{Deserialize, Serialize};

/// Identifies a launch template, by name, version, id, or some combination.
///
/// `None` and `Some(String::new())` are treated as distinct values by the
/// equivalence key: a caller that omits a field is not equivalent to one
/// that supplies it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTemplateSpecification {
    pub name: Option<String>,
    pub version: Option<String>,
    pub id: Option<String>,
}

/// A single per-instance-type or per-AZ adjustment layered on a launch template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Override {
    pub availability_zone: Option<String>,
    pub instance_type: Option<String>,
    pub subnet_id: Option<String>,
    pub priority: Option<f64>,
}

/// One entry of a [`FleetRequest`]'s launch template configs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchTemplateConfig {
    pub launch_template_specification: LaunchTemplateSpecification,
    pub overrides: Vec<Override>,
}

/// The capacity a caller is asking for.
///
/// `total_target_capacity` is the only field the equivalence key ignores;
/// every other field here still participates in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCapacity {
    pub total_target_capacity: u64,
    pub default_target_capacity_type: Option<String>,
    pub target_capacity_unit_type: Option<String>,
}

impl Default for TargetCapacity {
    fn default() -> Self {
        Self {
            total_target_capacity: 0,
            default_target_capacity_type: None,
            target_capacity_unit_type: None,
        }
    }
}

/// A caller's request for compute capacity.
///
/// `launch_template_configs` must be non-empty and
/// `target_capacity.total_target_capacity` must be at least 1;
/// [`Batcher::submit`](crate::Batcher::submit) rejects requests that violate
/// either before they are ever enqueued.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetRequest {
    pub launch_template_configs: Vec<LaunchTemplateConfig>,
    pub target_capacity: TargetCapacity,
}

impl FleetRequest {
    /// The capacity this single caller is asking for.
    pub fn total_target_capacity(&self) -> u64 {
        self.target_capacity.total_target_capacity
    }

    /// A clone of this request with `total_target_capacity` replaced.
    ///
    /// Used by the dispatcher to turn a bucket's canonical request into the
    /// aggregate request actually sent to the remote API.
    pub(crate) fn with_total_target_capacity(&self, capacity: u64) -> Self {
        let mut cloned = self.clone();
        cloned.target_capacity.total_target_capacity = capacity;
        cloned
    }
}

/// Identifies the launch template and override that produced a reservation
/// or an error, as reported back by the remote API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchTemplateAndOverrides {
    pub launch_template_specification: Option<LaunchTemplateSpecification>,
    pub overrides: Option<Override>,
}

/// One group of instances created by a fleet call, all sharing the same
/// metadata (instance type, lifecycle, platform, the launch template and
/// override that produced them).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub instance_ids: Vec<String>,
    pub instance_type: Option<String>,
    pub lifecycle: Option<String>,
    pub platform: Option<String>,
    pub launch_template_and_overrides: Option<LaunchTemplateAndOverrides>,
}

/// A per-item failure returned alongside (or instead of) instances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetError {
    pub error_code: String,
    pub error_message: String,
    pub launch_template_and_overrides: Option<LaunchTemplateAndOverrides>,
}

/// What the remote fleet API returns, and what each caller ultimately
/// receives from [`Batcher::submit`](crate::Batcher::submit).
///
/// A caller's own copy of this is synthesized by the distributor: it shares
/// `fleet_id` and `errors` with every other caller in the same bucket, but
/// `instances` holds only the slice of identifiers allotted to that caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetResponse {
    pub fleet_id: String,
    pub instances: Vec<Reservation>,
    pub errors: Vec<FleetError>,
}

impl FleetResponse {
    /// Total number of instance identifiers across all reservations.
    pub fn instance_count(&self) -> usize {
        self.instances.iter().map(|r| r.instance_ids.len()).sum()
    }
}
