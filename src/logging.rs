// SPDX-License-Identifier: MPL-2.0
//! Logging setup built on `tracing`.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Crates whose info-level chatter drowns out the kiosk's own messages.
const QUIET_TARGETS: &[&str] = &["wgpu_core=warn", "wgpu_hal=warn", "naga=warn", "iced_wgpu=warn"];

/// Initialise logging. The default level is `info`, or `debug` when verbose
/// output was requested on the command line.
///
/// `RUST_LOG` is only honored in verbose mode so a stray variable in the
/// kiosk's environment cannot flood the journal.
pub fn init(verbose: bool) {
    let filter = build_filter(verbose);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .try_init();
}

fn build_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };

    if verbose {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }

    QUIET_TARGETS
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::new(level), |filter, directive| {
            filter.add_directive(directive)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_filter_keeps_own_level() {
        let filter = build_filter(false).to_string();
        assert!(filter.contains("info"));
        assert!(filter.contains("wgpu_core=warn"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
