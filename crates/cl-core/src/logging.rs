//! Logging setup for cl-core.
//!
//! stdout is reserved for progress/report payloads; all log output goes to
//! stderr. Verbosity flags map onto a tracing `EnvFilter`, with
//! `CL_LOG` taking precedence when set so operators can target modules
//! (e.g. `CL_LOG=cl_core::dispatch=trace`).

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the verbosity flags.
pub const LOG_ENV: &str = "CL_LOG";

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(verbose: u8, quiet: bool, use_color: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .init();
}

/// Generate a correlation id for this run, attached to log events.
pub fn generate_run_id() -> String {
    format!("cl-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_format() {
        let id = generate_run_id();
        assert!(id.starts_with("cl-"));
        assert_eq!(id.len(), 3 + 32);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(generate_run_id(), generate_run_id());
    }
}
