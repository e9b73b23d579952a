//! Error types for model construction and forward passes.

/// Errors reported by construction, weight injection, and forward passes.
///
/// Configuration problems (layer counts, layer indices, state counts) and
/// tensor shape disagreements are detected at the offending call and
/// returned immediately; the computation is deterministic and stateless,
/// so none of these are retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("number of layers must be at least 1")]
    ZeroLayers,
    #[error("hidden size must be at least 1")]
    ZeroHidden,
    #[error("layer index {layer} is out of range for {num_layers} layers")]
    LayerOutOfRange { layer: usize, num_layers: usize },
    #[error("expected {expected} initial hidden states, got {got}")]
    InitStateCount { expected: usize, got: usize },
    #[error("{name} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        name: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
}
