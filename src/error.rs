//! Builder errors
//!
//! All failure modes are programmer errors surfaced at invocation time;
//! rendering a reachable tree never fails.

/// Errors raised by the builder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The root element is created already attached; committing it would
    /// produce a second, detached root.
    #[error("root element cannot be committed")]
    RootCommit,
}
