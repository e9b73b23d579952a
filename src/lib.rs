//! # Elman - Multi-layer Recurrent Network Forward Pass (Rust)
//!
//! A from-scratch forward pass for multi-layer, uni-directional tanh
//! (Elman) recurrent networks, built on the Burn framework. The layer
//! reproduces the shape and numerical contract of a standard batch-first
//! recurrent layer, so its outputs can be checked value-for-value against
//! a reference implementation with injected weights.
//!
//! ## Features
//!
//! - **Elman layer**: stacked tanh RNN with batch-first sequences and
//!   per-layer hidden state management
//! - **Explicit parameter store**: per-layer `W_ih`/`W_hh`/`b_ih`/`b_hh`
//!   tensors, indexed by layer, uniform-initialized over
//!   `[-1/sqrt(hidden), 1/sqrt(hidden)]`
//! - **Weight injection**: overwrite any layer's weights from host
//!   `ndarray` arrays for cross-implementation verification
//! - **Seeded construction**: bit-identical models from a `u64` seed
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use elman::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let rnn = Elman::<Backend>::new(4, 8, 2, &device).unwrap();
//!
//! // [batch=3, seq_len=5, features=4]
//! let input = Tensor::<Backend, 3>::zeros([3, 5, 4], &device);
//! let (output, final_states) = rnn.forward(input, None).unwrap();
//!
//! assert_eq!(output.dims(), [3, 5, 8]);
//! assert_eq!(final_states.dims(), [2, 3, 8]);
//! ```
//!
//! ## Cell-level Usage
//!
//! For direct cell access (single timestep processing):
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use elman::cells::ElmanCell;
//! use elman::params::ParamStore;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let store = ParamStore::<Backend>::new(4, 8, 1, &device).unwrap();
//! let cell = ElmanCell::new(4, 8);
//!
//! let x = Tensor::<Backend, 2>::zeros([2, 4], &device);
//! let h = Tensor::<Backend, 2>::zeros([2, 8], &device);
//! let h_next = cell.forward(store.get(0).unwrap(), x, h).unwrap();
//! assert_eq!(h_next.dims(), [2, 8]);
//! ```

pub mod cells;
pub mod error;
pub mod params;
pub mod rnn;

pub mod prelude {
    pub use crate::cells::ElmanCell;
    pub use crate::error::Error;
    pub use crate::params::{LayerParams, ParamStore};
    pub use crate::rnn::{Elman, ElmanConfig};
}

pub use error::Error;
