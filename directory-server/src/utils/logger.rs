//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise `level` applies to this crate and to
//! the HTTP trace layer.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. JSON output is meant for production.
pub fn init_logger(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn default_directives(level: &str) -> String {
    format!("directory_server={level},tower_http={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives("info");
        assert_eq!(directives, "directory_server=info,tower_http=info");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
