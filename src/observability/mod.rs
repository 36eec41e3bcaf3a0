//! Observability
//!
//! Structured logging through `tracing`. Library code only emits events;
//! the binary decides where they go by calling [`init`].
//!
//! # Usage
//!
//! ```ignore
//! use garagenet::observability::{self, Event};
//!
//! observability::init();
//! tracing::info!(event = %Event::SubmitComplete, entity = "Garage", "record created");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a JSON subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Stdout is reserved for command output. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
        tracing::info!(event = %Event::ConfigLoaded, "logged after init");
    }
}
