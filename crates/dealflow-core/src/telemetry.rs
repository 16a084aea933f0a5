//! Log output for the `dealflow` binary.
//!
//! Stdout belongs to command output and `session` stage views (JSON lines
//! under `--json`), so every workflow and conversation event goes to stderr.
//! Only the first call installs a subscriber; later calls are no-ops.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber.
///
/// `level` applies when `RUST_LOG` is unset. With `json`, events such as
/// `workflow.transition` and `conversation.reply_delivered` come out as one
/// JSON object per line, matching the JSON views printed on stdout.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
        tracing::info!("still alive");
    }
}
