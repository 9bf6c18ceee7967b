use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// `-v` count. Output goes to stderr so `--json` stays machine readable.
pub fn init(verbose: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init();
    });
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "contactme=warn",
        1 => "contactme=info",
        2 => "contactme=debug",
        _ => "contactme=trace",
    }
}
