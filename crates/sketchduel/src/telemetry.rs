//! Log output for binaries embedding Sketchduel.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `sketchduel=info`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    init_tracing_with_default("sketchduel=info")
}

/// Like [`init_tracing`] with a caller-chosen fallback directive.
pub fn init_tracing_with_default(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(default_directive, "tracing initialised");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_second_call_reports_existing() {
        // Another test may have installed one already; either way the
        // second call must not replace it.
        init_tracing();
        assert!(!init_tracing());
    }
}
