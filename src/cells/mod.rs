//! # RNN Cell Implementations
//!
//! Single-timestep cells. A cell computes one state transition and is
//! wrapped by the higher-level RNN layer in [`crate::rnn`] for sequence
//! processing, layer stacking, and batching.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, input_size]` | Input features |
//! | `hidden_state` | `[batch, hidden_size]` | Previous hidden state |
//! | `output` | `[batch, hidden_size]` | Updated hidden state |
//!
//! ## When to Use Cells Directly
//!
//! Most users should use the higher-level [`Elman`](crate::rnn::Elman)
//! layer, which handles sequence processing automatically. Use the cell
//! directly for custom sequence processing logic or fine-grained control
//! over state management.

pub mod elman_cell;

pub use elman_cell::ElmanCell;
