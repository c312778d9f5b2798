use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "budgetkeep=info";

/// Install the global subscriber: human-readable lines on stderr, filtered
/// by `BUDGETKEEP_LOG` (falls back to `budgetkeep=info`).
pub fn init() {
    let (filter, notice) = resolve_filter(std::env::var("BUDGETKEEP_LOG").ok().as_deref());
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Parse the user's filter. An invalid one is replaced by the default and
/// comes back with a notice to show before logging starts.
fn resolve_filter(raw: Option<&str>) -> (EnvFilter, Option<String>) {
    match raw {
        Some(raw) if !raw.trim().is_empty() => match EnvFilter::try_new(raw) {
            Ok(filter) => (filter, None),
            Err(err) => (
                EnvFilter::new(DEFAULT_FILTER),
                Some(format!(
                    "budgetkeep: ignoring BUDGETKEEP_LOG={raw:?} ({err}); using {DEFAULT_FILTER}"
                )),
            ),
        },
        _ => (EnvFilter::new(DEFAULT_FILTER), None),
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod logging_tests;
