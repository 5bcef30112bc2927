use thiserror::Error;

/// Errors emitted by the generation layer.
///
/// "No value producible" is deliberately not represented here: generators
/// signal it as the `Ok(None)` arm of [`crate::Generator::produce`] and the
/// engine leaves the field unset.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A schema field resolved to no generator and tolerant mode was off.
    #[error("field '{0}' has no registered generator")]
    UnresolvedField(String),
    /// A generator was constructed with options outside its domain.
    #[error("invalid generator options: {0}")]
    InvalidOptions(String),
    /// The schema reaching the generation layer is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
