//! # RNN Layers for Sequence Processing
//!
//! This module provides the complete RNN layer that handles sequence
//! processing, layer stacking, batching, and hidden state management.
//! **This is the primary API most users should use.**
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use elman::rnn::Elman;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let rnn = Elman::<Backend>::new(16, 32, 2, &device).unwrap();
//!
//! // Process sequence: [batch=4, seq_len=10, features=16]
//! let input: Tensor<Backend, 3> = Tensor::zeros([4, 10, 16], &device);
//! let (output, final_states) = rnn.forward(input, None).unwrap();
//!
//! // output: [4, 10, 32] - last layer's outputs at every timestep
//! // final_states: [2, 4, 32] - each layer's last hidden state
//! ```
//!
//! ## Tensor Shapes
//!
//! ### Input Tensor (3D)
//!
//! | Format | Shape | Default |
//! |--------|-------|---------|
//! | Batch-first | `[batch, seq_len, features]` | ✓ Yes |
//! | Sequence-first | `[seq_len, batch, features]` | No |
//!
//! Use `.with_batch_first(false)` to switch to sequence-first input.
//! Outputs are always returned batch-first.
//!
//! ### Initial State Tensor (3D)
//!
//! Shape: `[batch, num_layers, hidden_size]`. When omitted, the state
//! defaults to zeros, with the batch size taken from the input tensor.
//!
//! ### Output Tensors
//!
//! | Setting | Shape | Description |
//! |---------|-------|-------------|
//! | `return_sequences=true` (default) | `[batch, seq_len, hidden_size]` | All timesteps |
//! | `return_sequences=false` | `[batch, 1, hidden_size]` | Last timestep only |
//!
//! Final states are `[num_layers, batch, hidden_size]` in both modes.
//!
//! ## Stateful Processing (preserve hidden state)
//!
//! ```ignore
//! let (output1, state) = rnn.forward(batch1, None)?;
//! let (output2, state) = rnn.forward(batch2, Some(state.swap_dims(0, 1)))?;
//! // State persists across batches
//! ```

mod elman;

pub use elman::Elman;

use serde::{Deserialize, Serialize};

/// Configuration struct for serialization/deserialization of RNN layers.
///
/// Covers construction parameters only; weights are not serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElmanConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub num_layers: usize,
    pub batch_first: bool,
    pub return_sequences: bool,
}
