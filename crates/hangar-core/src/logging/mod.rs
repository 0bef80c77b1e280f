use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(quiet: bool) {
    let directive = if quiet { "hangar=error" } else { "hangar=info" };
    let core_directive = if quiet {
        "hangar_core=error"
    } else {
        "hangar_core=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for d in [directive, core_directive] {
        if let Ok(parsed) = d.parse() {
            filter = filter.add_directive(parsed);
        }
    }

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(true);
        init_logging(false);
    }
}
