//! Logger installation for native and browser builds.

use crate::config::LogLevel;

/// Install the platform logger at `level`.
///
/// Native builds log through `env_logger` (`RUST_LOG` still overrides the
/// level); the browser build logs to the devtools console. Returns false
/// if a logger was already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) -> bool {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) -> bool {
    console_log::init_with_level(level.to_level()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Another test may have installed the logger first
        let _ = init(LogLevel::Debug);
        assert!(!init(LogLevel::Trace));
    }
}
