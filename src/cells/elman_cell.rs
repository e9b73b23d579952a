//! Elman (tanh) RNN Cell Implementation
//!
//! Single-timestep state transition:
//!
//! `h' = tanh(W_ih @ x + W_hh @ h + b_ih + b_hh)`
//!
//! This is an RNNCell that processes single time-steps. To get a full RNN
//! that can process sequences, see the full RNN layer implementation.

use crate::error::Error;
use crate::params::LayerParams;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// A single-step Elman cell, vectorized over the batch axis.
///
/// The cell carries no weights of its own: parameters are passed
/// explicitly on every call, so the same cell value can be applied with
/// any layer's weights of matching dimensions. Given identical inputs it
/// always produces identical output (no hidden state, no side effects).
#[derive(Module, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElmanCell {
    input_size: usize,
    hidden_size: usize,
}

impl ElmanCell {
    /// Create a new Elman cell
    ///
    /// # Arguments
    /// * `input_size` - Number of input features consumed per step
    /// * `hidden_size` - Number of hidden units
    pub fn new(input_size: usize, hidden_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
        }
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform a forward pass through the cell.
    ///
    /// # Arguments
    /// * `params` - The layer's weights; `w_ih` must be
    ///   `[hidden_size, input_size]` and `w_hh` `[hidden_size, hidden_size]`
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `hx` - Previous hidden state of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// The next hidden state, shape `[batch_size, hidden_size]`
    pub fn forward<B: Backend>(
        &self,
        params: &LayerParams<B>,
        input: Tensor<B, 2>,
        hx: Tensor<B, 2>,
    ) -> Result<Tensor<B, 2>, Error> {
        let [batch_size, features] = input.dims();
        if features != self.input_size {
            return Err(Error::ShapeMismatch {
                name: "input",
                expected: vec![batch_size, self.input_size],
                got: vec![batch_size, features],
            });
        }
        let hx_dims = hx.dims();
        if hx_dims != [batch_size, self.hidden_size] {
            return Err(Error::ShapeMismatch {
                name: "hidden state",
                expected: vec![batch_size, self.hidden_size],
                got: hx_dims.to_vec(),
            });
        }

        let input_contrib = input.matmul(params.w_ih.val().transpose());
        let recurrent_contrib = hx.matmul(params.w_hh.val().transpose());

        // Biases broadcast across the batch axis
        let pre = input_contrib
            + recurrent_contrib
            + params.b_ih.val().unsqueeze::<2>()
            + params.b_hh.val().unsqueeze::<2>();

        Ok(pre.tanh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamStore;
    use burn::backend::NdArray;
    use ndarray::{Array1, Array2};

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_cell_creation() {
        let cell = ElmanCell::new(20, 50);

        assert_eq!(cell.input_size(), 20);
        assert_eq!(cell.hidden_size(), 50);
    }

    #[test]
    fn test_cell_forward_shape() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(20, 50, 1, &device).unwrap();
        let cell = ElmanCell::new(20, 50);

        let batch_size = 4;
        let input = Tensor::<TestBackend, 2>::zeros([batch_size, 20], &device);
        let hx = Tensor::<TestBackend, 2>::zeros([batch_size, 50], &device);

        let out = cell.forward(store.get(0).unwrap(), input, hx).unwrap();
        assert_eq!(out.dims(), [batch_size, 50]);
    }

    #[test]
    fn test_cell_zero_weights_give_zero_state() {
        let device = Default::default();
        let mut store = ParamStore::<TestBackend>::new(3, 2, 1, &device).unwrap();
        store
            .set(0, Array2::zeros((2, 3)), Array2::zeros((2, 2)), Array1::zeros(2), Array1::zeros(2))
            .unwrap();
        let cell = ElmanCell::new(3, 2);

        let input = Tensor::<TestBackend, 2>::random(
            [4, 3],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let hx = Tensor::<TestBackend, 2>::ones([4, 2], &device);

        let out = cell.forward(store.get(0).unwrap(), input, hx).unwrap();

        // tanh(0) = 0 everywhere
        let max_abs = out.abs().max().into_scalar();
        assert_eq!(max_abs, 0.0);
    }

    #[test]
    fn test_cell_identity_weights_apply_tanh() {
        let device = Default::default();
        let mut store = ParamStore::<TestBackend>::new(2, 2, 1, &device).unwrap();
        store
            .set(0, Array2::eye(2), Array2::zeros((2, 2)), Array1::zeros(2), Array1::zeros(2))
            .unwrap();
        let cell = ElmanCell::new(2, 2);

        let input = Tensor::<TestBackend, 1>::from_floats([1.0, -0.5], &device).reshape([1, 2]);
        let hx = Tensor::<TestBackend, 2>::ones([1, 2], &device);

        let out = cell.forward(store.get(0).unwrap(), input, hx).unwrap();

        // W_hh = 0 makes the previous state irrelevant
        let a = out.clone().slice([0..1, 0..1]).into_scalar();
        let b = out.slice([0..1, 1..2]).into_scalar();
        assert!((a - 1.0f32.tanh()).abs() < 1e-6);
        assert!((b - (-0.5f32).tanh()).abs() < 1e-6);
    }

    #[test]
    fn test_cell_rejects_wrong_input_width() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(3, 2, 1, &device).unwrap();
        let cell = ElmanCell::new(3, 2);

        let input = Tensor::<TestBackend, 2>::zeros([4, 5], &device);
        let hx = Tensor::<TestBackend, 2>::zeros([4, 2], &device);

        let result = cell.forward(store.get(0).unwrap(), input, hx);
        assert!(matches!(result, Err(Error::ShapeMismatch { name: "input", .. })));
    }

    #[test]
    fn test_cell_rejects_wrong_hidden_width() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(3, 2, 1, &device).unwrap();
        let cell = ElmanCell::new(3, 2);

        let input = Tensor::<TestBackend, 2>::zeros([4, 3], &device);
        let hx = Tensor::<TestBackend, 2>::zeros([4, 7], &device);

        let result = cell.forward(store.get(0).unwrap(), input, hx);
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch { name: "hidden state", .. })
        ));
    }

    #[test]
    fn test_cell_batch_sizes() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(20, 50, 1, &device).unwrap();
        let cell = ElmanCell::new(20, 50);

        for batch in [1, 8, 32] {
            let input = Tensor::<TestBackend, 2>::zeros([batch, 20], &device);
            let hx = Tensor::<TestBackend, 2>::zeros([batch, 50], &device);

            let out = cell.forward(store.get(0).unwrap(), input, hx).unwrap();
            assert_eq!(out.dims(), [batch, 50]);
        }
    }
}
