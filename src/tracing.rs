//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Environment variable selecting the log format; `json` switches to JSON lines.
pub const LOG_FORMAT_ENV: &str = "CODEX_LOG_FORMAT";

/// Initialize tracing. Safe to call multiple times.
///
/// Output goes to stderr so it never interleaves with the MCP transport on stdout.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        let result = if is_test {
            builder.compact().with_test_writer().try_init()
        } else if wants_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
            builder
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr)
                .try_init()
        } else {
            builder.compact().with_writer(std::io::stderr).try_init()
        };

        if let Err(e) = result {
            if !is_test {
                eprintln!("Failed to initialize tracing: {}", e);
            }
        }
    });
}

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.trim().eq_ignore_ascii_case("json"))
}
