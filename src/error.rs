use thiserror::Error;

/// Unified error type for loading configuration and rule documents.
///
/// Returned by convenience methods like
/// [`DropConfig::from_file()`](crate::DropConfig::from_file) and
/// [`parse_rule_document()`](crate::config::parse_rule_document). Compiling
/// and exporting never fail as a whole; see [`CompileError`](crate::CompileError)
/// for per-rule failures.
#[derive(Debug, Error)]
pub enum FishdropError {
    #[error("invalid rule configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
