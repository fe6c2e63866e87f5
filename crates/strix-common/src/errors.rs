use std::path::PathBuf;
use std::time::Duration;

use crate::id::TabId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by tab lifecycle operations.
///
/// Stale references are intentionally absent: a deferred closure whose target
/// tab no longer exists degrades to a logged no-op, never an error value.
/// Reentrant notification is prevented structurally by the signal-suppression
/// guard and has no runtime representation either.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("browser engine unavailable")]
    EngineUnavailable,

    #[error("engine rejected browser creation: {0}")]
    CreationFailed(String),

    #[error("render surface init failed: {0}")]
    SurfaceInit(String),

    #[error("no tab at index {0}")]
    NoSuchIndex(usize),

    #[error("no tab with id {0}")]
    NoSuchTab(TabId),

    #[error("tab limit reached ({0})")]
    TabLimit(usize),
}

/// Outcome of a bounded wait that did not produce a value.
///
/// `TimedOut` is distinguishable from a successful-but-empty result and
/// carries how long the caller actually waited.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error("wait timed out after {elapsed:?}")]
    TimedOut { elapsed: Duration },

    #[error("wait cancelled")]
    Cancelled,

    #[error("wait target no longer exists")]
    Gone,
}

#[derive(Debug, thiserror::Error)]
pub enum StrixError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("missing field 'homepage'".into());
        assert_eq!(
            err.to_string(),
            "config validation error: missing field 'homepage'"
        );
    }

    #[test]
    fn shell_error_display() {
        let err = ShellError::EngineUnavailable;
        assert_eq!(err.to_string(), "browser engine unavailable");

        let err = ShellError::CreationFailed("out of renderers".into());
        assert_eq!(
            err.to_string(),
            "engine rejected browser creation: out of renderers"
        );

        let err = ShellError::NoSuchTab(TabId(9));
        assert_eq!(err.to_string(), "no tab with id tab-9");

        let err = ShellError::TabLimit(32);
        assert_eq!(err.to_string(), "tab limit reached (32)");
    }

    #[test]
    fn wait_error_timed_out_carries_elapsed() {
        let err = WaitError::TimedOut {
            elapsed: Duration::from_millis(100),
        };
        assert!(matches!(err, WaitError::TimedOut { elapsed } if elapsed.as_millis() >= 100));
    }

    #[test]
    fn wait_error_variants_are_distinguishable() {
        let timed_out = WaitError::TimedOut {
            elapsed: Duration::from_millis(1),
        };
        let cancelled = WaitError::Cancelled;
        assert!(!matches!(timed_out, WaitError::Cancelled));
        assert!(matches!(cancelled, WaitError::Cancelled));
    }

    #[test]
    fn strix_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let strix_err: StrixError = config_err.into();
        assert!(matches!(strix_err, StrixError::Config(_)));
        assert!(strix_err.to_string().contains("bad toml"));
    }

    #[test]
    fn strix_error_from_shell() {
        let shell_err = ShellError::EngineUnavailable;
        let strix_err: StrixError = shell_err.into();
        assert!(matches!(strix_err, StrixError::Shell(_)));
        assert!(strix_err.to_string().contains("engine unavailable"));
    }

    #[test]
    fn strix_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let strix_err: StrixError = io_err.into();
        assert!(matches!(strix_err, StrixError::Io(_)));
        assert!(strix_err.to_string().contains("file missing"));
    }

    #[test]
    fn strix_error_other_variants() {
        let err = StrixError::Engine("browser 3 vanished".into());
        assert_eq!(err.to_string(), "engine error: browser 3 vanished");

        let err = StrixError::Surface("context lost".into());
        assert_eq!(err.to_string(), "surface error: context lost");

        let err = StrixError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
