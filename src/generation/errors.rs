//! Error types for the generation domain

use thiserror::Error;

/// Fatal errors raised while resolving a document and emitting renderable units.
///
/// None of these are recoverable: the first one aborts the whole run after
/// being wrapped in the diagnostic context frames of the steps it crossed.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Raw input does not match the discriminated schema/service grammar
    #[error("Grammar error: {0}")]
    GrammarError(String),

    /// A named schema or parameter reference has no matching definition
    #[error("Reference resolution error: no definition for `{0}`")]
    ReferenceResolutionError(String),

    /// A schema/parameter combination the generator does not support
    #[error("Unsupported shape: {0}")]
    UnsupportedShapeError(String),

    /// A named schema's declared title disagrees with its registration key
    #[error("Consistency error: {0}")]
    ConsistencyError(String),
}
