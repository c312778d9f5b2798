use serde_json::Value;

/// Upgrades a raw payload by exactly one version.
pub type MigrationStep = fn(Value) -> Value;

/// Run `steps[from_version..]` over `payload` in order.
///
/// A payload already at or past the last step comes back untouched.
pub fn migrate(steps: &[MigrationStep], payload: Value, from_version: u64) -> Value {
    let skip = usize::try_from(from_version).unwrap_or(usize::MAX);
    steps
        .iter()
        .skip(skip)
        .fold(payload, |payload, step| step(payload))
}
