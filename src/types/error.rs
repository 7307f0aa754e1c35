use thiserror::Error;

use super::symbol::Rarity;

/// Failure converting a single declarative rule. The rule is skipped; the
/// rest of the batch still compiles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("rarity '{rarity}' is not exposed by the engine")]
    MissingRarity { rarity: Rarity },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rarity_message() {
        let err = CompileError::MissingRarity {
            rarity: Rarity::Common,
        };
        assert_eq!(err.to_string(), "rarity 'Common' is not exposed by the engine");
    }
}
