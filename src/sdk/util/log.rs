use env_logger::{Builder, Env};

// Transport crates are chatty at info; keep them to warnings unless asked.
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Logs to stderr, honouring `RUST_LOG` when set. Safe to call twice.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
}
