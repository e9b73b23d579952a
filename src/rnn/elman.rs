//! Multi-layer Elman (tanh) RNN Layer
//!
//! Full RNN layer that handles sequence processing, layer stacking,
//! batching, and hidden state management for Elman cells.

use crate::cells::ElmanCell;
use crate::error::Error;
use crate::params::{LayerParams, ParamStore};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use ndarray::{Array1, Array2};

use super::ElmanConfig;

/// Multi-layer Elman RNN Layer
///
/// Processes batch-first input sequences through a stack of tanh
/// recurrent layers. Each layer scans the sequence left to right, and
/// each layer's full output sequence becomes the next layer's input.
///
/// The three axes have distinct ordering constraints: batch elements are
/// fully independent, layers are strictly sequential (layer `l+1` needs
/// layer `l`'s complete output sequence), and timesteps are strictly
/// sequential within a layer (step `t` consumes step `t-1`'s state).
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct Elman<B: Backend> {
    /// Per-layer weights, indexed by layer
    params: ParamStore<B>,
    /// One cell per layer, bound to that layer's dimensions
    #[module(skip)]
    cells: Vec<ElmanCell>,
    /// Input size (number of features)
    #[module(skip)]
    input_size: usize,
    /// Hidden/output size
    #[module(skip)]
    hidden_size: usize,
    /// Number of stacked layers
    #[module(skip)]
    num_layers: usize,
    /// Whether input is batch-first
    #[module(skip)]
    batch_first: bool,
    /// Whether to return full sequence or just last timestep
    #[module(skip)]
    return_sequences: bool,
}

impl<B: Backend> Elman<B> {
    /// Create a new Elman RNN layer with randomly initialized weights.
    ///
    /// Every weight and bias entry is drawn from Uniform `[-k, k]` with
    /// `k = 1/sqrt(hidden_size)`.
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Number of hidden units per layer
    /// * `num_layers` - Number of stacked layers (at least 1)
    /// * `device` - Device to create the module on
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        device: &B::Device,
    ) -> Result<Self, Error> {
        let params = ParamStore::new(input_size, hidden_size, num_layers, device)?;
        Ok(Self::from_store(params))
    }

    /// Like [`Elman::new`], with weights drawn from a seeded RNG so two
    /// models built with the same sizes and seed are identical.
    pub fn seeded(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        seed: u64,
        device: &B::Device,
    ) -> Result<Self, Error> {
        let params = ParamStore::seeded(input_size, hidden_size, num_layers, seed, device)?;
        Ok(Self::from_store(params))
    }

    /// Create an Elman RNN layer from a configuration
    pub fn from_config(config: &ElmanConfig, device: &B::Device) -> Result<Self, Error> {
        Ok(Self::new(
            config.input_size,
            config.hidden_size,
            config.num_layers,
            device,
        )?
        .with_batch_first(config.batch_first)
        .with_return_sequences(config.return_sequences))
    }

    fn from_store(params: ParamStore<B>) -> Self {
        let input_size = params.input_size();
        let hidden_size = params.hidden_size();
        let num_layers = params.num_layers();
        let cells = (0..num_layers)
            .map(|layer| ElmanCell::new(params.in_dim(layer), hidden_size))
            .collect();

        Self {
            params,
            cells,
            input_size,
            hidden_size,
            num_layers,
            batch_first: true,
            return_sequences: true,
        }
    }

    /// Set whether input is batch-first (default: true)
    ///
    /// When true: input shape is [batch, seq, features]
    /// When false: input shape is [seq, batch, features]
    pub fn with_batch_first(mut self, batch_first: bool) -> Self {
        self.batch_first = batch_first;
        self
    }

    /// Set whether to return full sequences (default: true)
    ///
    /// When true: returns all timesteps [batch, seq, hidden_size]
    /// When false: returns only the last timestep [batch, 1, hidden_size]
    pub fn with_return_sequences(mut self, return_sequences: bool) -> Self {
        self.return_sequences = return_sequences;
        self
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get number of layers
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Get the configuration this layer was built with
    pub fn config(&self) -> ElmanConfig {
        ElmanConfig {
            input_size: self.input_size,
            hidden_size: self.hidden_size,
            num_layers: self.num_layers,
            batch_first: self.batch_first,
            return_sequences: self.return_sequences,
        }
    }

    /// Read-only view of one layer's parameters.
    pub fn layer_params(&self, layer: usize) -> Result<&LayerParams<B>, Error> {
        self.params.get(layer)
    }

    /// Overwrite one layer's weights with externally supplied host arrays.
    ///
    /// Intended for golden-value verification against a reference
    /// implementation: inject the reference's weights, then compare
    /// forward outputs. Shapes must match the layer's contract exactly.
    pub fn set_layer_params(
        &mut self,
        layer: usize,
        w_ih: Array2<f32>,
        w_hh: Array2<f32>,
        b_ih: Array1<f32>,
        b_hh: Array1<f32>,
    ) -> Result<(), Error> {
        self.params.set(layer, w_ih, w_hh, b_ih, b_hh)
    }

    /// Forward pass through the stacked RNN.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape:
    ///   - [batch, seq, features] if batch_first=true
    ///   - [seq, batch, features] if batch_first=false
    /// * `state` - Optional initial hidden states of shape
    ///   [batch, num_layers, hidden_size]; zeros when omitted, with the
    ///   batch size taken from `input` itself
    ///
    /// # Returns
    /// Tuple of (output, final_states) where:
    /// - output: [batch, seq, hidden_size] from the last layer (or
    ///   [batch, 1, hidden_size] when return_sequences=false)
    /// - final_states: [num_layers, batch, hidden_size], each layer's
    ///   last hidden state
    ///
    /// An empty sequence (seq = 0) yields an empty output and passes the
    /// initial states through unchanged.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<Tensor<B, 3>>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 3>), Error> {
        let device = input.device();

        // Normalize to batch-first; outputs are batch-first either way.
        let input = if self.batch_first {
            input
        } else {
            input.swap_dims(0, 1)
        };

        let [batch_size, seq_len, features] = input.dims();
        if features != self.input_size {
            return Err(Error::ShapeMismatch {
                name: "input",
                expected: vec![batch_size, seq_len, self.input_size],
                got: vec![batch_size, seq_len, features],
            });
        }

        let state = match state {
            Some(state) => {
                let dims = state.dims();
                if dims != [batch_size, self.num_layers, self.hidden_size] {
                    return Err(Error::ShapeMismatch {
                        name: "state",
                        expected: vec![batch_size, self.num_layers, self.hidden_size],
                        got: dims.to_vec(),
                    });
                }
                state
            }
            None => Tensor::zeros([batch_size, self.num_layers, self.hidden_size], &device),
        };

        // state[batch, l, hidden] -> [batch, hidden] per layer
        let h_inits: Vec<Tensor<B, 2>> = (0..self.num_layers)
            .map(|layer| state.clone().narrow(1, layer, 1).squeeze(1))
            .collect();

        let (sequence, finals) = self.stack_layers(input, h_inits)?;

        let final_states: Tensor<B, 3> = Tensor::stack(finals, 0);

        let sequence = if self.return_sequences || seq_len == 0 {
            sequence
        } else {
            sequence.narrow(1, seq_len - 1, 1)
        };

        Ok((sequence, final_states))
    }

    /// Run every layer in index order over the (whole) input sequence.
    ///
    /// Layer `l`'s full output sequence is layer `l+1`'s input sequence;
    /// no layer starts before the previous layer has finished all steps.
    fn stack_layers(
        &self,
        input: Tensor<B, 3>,
        h_inits: Vec<Tensor<B, 2>>,
    ) -> Result<(Tensor<B, 3>, Vec<Tensor<B, 2>>), Error> {
        if h_inits.len() != self.num_layers {
            return Err(Error::InitStateCount {
                expected: self.num_layers,
                got: h_inits.len(),
            });
        }

        let mut sequence = input;
        let mut finals = Vec::with_capacity(self.num_layers);

        for (layer, h_init) in h_inits.into_iter().enumerate() {
            let params = self.params.get(layer)?;
            let (output, last) = self.scan(&self.cells[layer], params, sequence, h_init)?;
            sequence = output;
            finals.push(last);
        }

        Ok((sequence, finals))
    }

    /// Scan one layer left to right over a batch-first sequence.
    ///
    /// Strict left fold: step `t` consumes step `t-1`'s state, so this
    /// loop is inherently serial in `t`.
    fn scan(
        &self,
        cell: &ElmanCell,
        params: &LayerParams<B>,
        input: Tensor<B, 3>,
        h_init: Tensor<B, 2>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 2>), Error> {
        let device = input.device();
        let [batch_size, seq_len, _] = input.dims();

        let mut state = h_init;
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            // input[batch, t, features] -> [batch, features]
            let step_input = input.clone().narrow(1, t, 1).squeeze(1);
            state = cell.forward(params, step_input, state)?;
            outputs.push(state.clone());
        }

        if outputs.is_empty() {
            // Nothing scanned: empty output, initial state passes through
            let empty = Tensor::zeros([batch_size, 0, self.hidden_size], &device);
            return Ok((empty, state));
        }

        let output = Tensor::stack(outputs, 1); // [batch, seq, hidden]
        Ok((output, state))
    }
}
