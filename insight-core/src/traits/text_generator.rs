use crate::errors::GenerationError;
use crate::models::EvidenceBundle;

/// External natural-language generation capability.
///
/// The engine treats it as a black box and validates whatever comes back.
/// Implementations should honour `bundle.constraints.temperature`.
pub trait ITextGenerator: Send + Sync {
    /// Produce a theme statement for the bundle.
    fn generate(&self, bundle: &EvidenceBundle) -> Result<String, GenerationError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
