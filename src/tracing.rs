//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging match
//! resolution and menu state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=typeahead=debug` - only state diffs
//! - `RUST_LOG=omnibar::resolution=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/omnibar/logs/omnibar.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::Typeahead;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var for filtering (default `warn`).
/// File logging writes to `~/.config/omnibar/logs/omnibar.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so replay output on stdout stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init: a second call (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of match and menu state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub session: Option<u64>,
    pub query: Option<String>,
    pub items: usize,
    pub highlighted: Option<usize>,
    pub loading: bool,
}

impl MatchSnapshot {
    pub fn from_typeahead(typeahead: &Typeahead) -> Self {
        let active = typeahead.active_match();
        let menu = typeahead.menu();
        Self {
            session: active.map(|a| a.session.0),
            query: active.map(|a| a.leading_text.clone()),
            items: menu.len(),
            highlighted: menu.highlighted_index(),
            loading: menu.is_loading(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &MatchSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.session != other.session {
            changes.push(format!(
                "session: {} → {}",
                fmt_opt(&self.session),
                fmt_opt(&other.session)
            ));
        }
        if self.query != other.query {
            changes.push(format!("query: {:?} → {:?}", self.query, other.query));
        }
        if self.items != other.items {
            changes.push(format!("items: {} → {}", self.items, other.items));
        }
        if self.highlighted != other.highlighted {
            changes.push(format!(
                "highlighted: {} → {}",
                fmt_opt(&self.highlighted),
                fmt_opt(&other.highlighted)
            ));
        }
        if self.loading != other.loading {
            let status = if other.loading { "started" } else { "finished" };
            changes.push(format!("loading {}", status));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MatchSnapshot {
        MatchSnapshot {
            session: Some(1),
            query: Some("a".into()),
            items: 3,
            highlighted: Some(0),
            loading: false,
        }
    }

    #[test]
    fn test_diff_none_when_equal() {
        assert_eq!(snapshot().diff(&snapshot()), None);
    }

    #[test]
    fn test_diff_lists_changes() {
        let after = MatchSnapshot {
            highlighted: Some(2),
            loading: true,
            ..snapshot()
        };
        assert_eq!(
            snapshot().diff(&after).unwrap(),
            "highlighted: 0 → 2; loading started"
        );
    }

    #[test]
    fn test_diff_session_end() {
        let after = MatchSnapshot {
            session: None,
            query: None,
            items: 0,
            highlighted: None,
            loading: false,
        };
        let diff = snapshot().diff(&after).unwrap();
        assert!(diff.starts_with("session: 1 → -"));
    }
}
