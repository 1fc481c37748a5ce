//! Build metadata emitted by `build.rs`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git SHA, or "unknown" when built outside a git checkout
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(timestamp) => timestamp,
    None => "unknown",
};
