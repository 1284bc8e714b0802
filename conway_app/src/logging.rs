// logging.rs - tracing subscriber setup
//
// Filter comes from `RUST_LOG` (default `warn`), output is compact on stderr
// so it never mixes with headless frames on stdout.
//
//   RUST_LOG=conway=debug cargo run -p conway_app -- --headless

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
