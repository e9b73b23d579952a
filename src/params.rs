//! Per-layer weight storage for the Elman RNN.
//!
//! Weights live in an ordered collection indexed by layer, one
//! [`LayerParams`] entry per layer. The store is filled once at
//! construction (random or seeded init) and is read-only during forward
//! passes; [`ParamStore::set`] overwrites a whole layer at a time to
//! inject externally computed weights for cross-implementation checks.

use crate::error::Error;
use burn::module::{Module, Param};
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};
use ndarray::{Array1, Array2};
use rand::prelude::*;

/// Weights and biases for a single recurrent layer.
///
/// Shapes follow the batch-first recurrent-layer convention:
/// - `w_ih`: `[hidden_size, in_dim]` where `in_dim` is the feature size
///   for layer 0 and `hidden_size` for every later layer
/// - `w_hh`: `[hidden_size, hidden_size]`
/// - `b_ih`, `b_hh`: `[hidden_size]`
#[derive(Module, Debug)]
pub struct LayerParams<B: Backend> {
    /// Input-to-hidden weights
    pub w_ih: Param<Tensor<B, 2>>,
    /// Hidden-to-hidden weights
    pub w_hh: Param<Tensor<B, 2>>,
    /// Input-to-hidden bias
    pub b_ih: Param<Tensor<B, 1>>,
    /// Hidden-to-hidden bias
    pub b_hh: Param<Tensor<B, 1>>,
}

/// Ordered per-layer parameter store.
#[derive(Module, Debug)]
pub struct ParamStore<B: Backend> {
    layers: Vec<LayerParams<B>>,
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
}

impl<B: Backend> ParamStore<B> {
    /// Allocate and initialize parameters for `num_layers` layers.
    ///
    /// Every entry is drawn independently from Uniform `[-k, k]` with
    /// `k = 1/sqrt(hidden_size)`.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        device: &B::Device,
    ) -> Result<Self, Error> {
        Self::check_sizes(hidden_size, num_layers)?;

        let bound = 1.0 / (hidden_size as f64).sqrt();
        let layers = (0..num_layers)
            .map(|layer| {
                let in_dim = if layer == 0 { input_size } else { hidden_size };
                LayerParams {
                    w_ih: Self::init_param([hidden_size, in_dim], bound, device),
                    w_hh: Self::init_param([hidden_size, hidden_size], bound, device),
                    b_ih: Self::init_param([hidden_size], bound, device),
                    b_hh: Self::init_param([hidden_size], bound, device),
                }
            })
            .collect();

        Ok(Self {
            layers,
            input_size,
            hidden_size,
        })
    }

    /// Like [`ParamStore::new`], with all entries drawn from a seeded RNG.
    ///
    /// Two stores built with the same sizes and seed hold identical
    /// weights, independent of backend RNG state.
    pub fn seeded(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        seed: u64,
        device: &B::Device,
    ) -> Result<Self, Error> {
        Self::check_sizes(hidden_size, num_layers)?;

        let bound = 1.0 / (hidden_size as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(seed);
        let layers = (0..num_layers)
            .map(|layer| {
                let in_dim = if layer == 0 { input_size } else { hidden_size };
                LayerParams {
                    w_ih: Self::seeded_param([hidden_size, in_dim], bound, &mut rng, device),
                    w_hh: Self::seeded_param([hidden_size, hidden_size], bound, &mut rng, device),
                    b_ih: Self::seeded_param([hidden_size], bound, &mut rng, device),
                    b_hh: Self::seeded_param([hidden_size], bound, &mut rng, device),
                }
            })
            .collect();

        Ok(Self {
            layers,
            input_size,
            hidden_size,
        })
    }

    fn check_sizes(hidden_size: usize, num_layers: usize) -> Result<(), Error> {
        if num_layers < 1 {
            return Err(Error::ZeroLayers);
        }
        if hidden_size < 1 {
            return Err(Error::ZeroHidden);
        }
        Ok(())
    }

    fn init_param<const D: usize>(
        shape: [usize; D],
        bound: f64,
        device: &B::Device,
    ) -> Param<Tensor<B, D>> {
        let tensor = Tensor::random(shape, Distribution::Uniform(-bound, bound), device);
        Param::from_tensor(tensor)
    }

    fn seeded_param<const D: usize>(
        shape: [usize; D],
        bound: f64,
        rng: &mut StdRng,
        device: &B::Device,
    ) -> Param<Tensor<B, D>> {
        let len: usize = shape.iter().product();
        let data: Vec<f32> = (0..len).map(|_| rng.gen_range(-bound..bound) as f32).collect();
        let tensor = Tensor::<B, 1>::from_floats(data.as_slice(), device).reshape(shape);
        Param::from_tensor(tensor)
    }

    /// Get input size (feature dimension consumed by layer 0)
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get number of layers
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Input dimension consumed by the given layer.
    pub fn in_dim(&self, layer: usize) -> usize {
        if layer == 0 {
            self.input_size
        } else {
            self.hidden_size
        }
    }

    /// Read-only view of one layer's parameters.
    pub fn get(&self, layer: usize) -> Result<&LayerParams<B>, Error> {
        self.layers.get(layer).ok_or(Error::LayerOutOfRange {
            layer,
            num_layers: self.layers.len(),
        })
    }

    /// Overwrite one layer's parameters with externally supplied weights.
    ///
    /// Host arrays must match the layer's contract shapes exactly; there
    /// is no implicit broadcasting or truncation.
    pub fn set(
        &mut self,
        layer: usize,
        w_ih: Array2<f32>,
        w_hh: Array2<f32>,
        b_ih: Array1<f32>,
        b_hh: Array1<f32>,
    ) -> Result<(), Error> {
        if layer >= self.layers.len() {
            return Err(Error::LayerOutOfRange {
                layer,
                num_layers: self.layers.len(),
            });
        }

        let hidden = self.hidden_size;
        let in_dim = self.in_dim(layer);

        if w_ih.dim() != (hidden, in_dim) {
            return Err(Error::ShapeMismatch {
                name: "w_ih",
                expected: vec![hidden, in_dim],
                got: w_ih.shape().to_vec(),
            });
        }
        if w_hh.dim() != (hidden, hidden) {
            return Err(Error::ShapeMismatch {
                name: "w_hh",
                expected: vec![hidden, hidden],
                got: w_hh.shape().to_vec(),
            });
        }
        if b_ih.len() != hidden {
            return Err(Error::ShapeMismatch {
                name: "b_ih",
                expected: vec![hidden],
                got: b_ih.shape().to_vec(),
            });
        }
        if b_hh.len() != hidden {
            return Err(Error::ShapeMismatch {
                name: "b_hh",
                expected: vec![hidden],
                got: b_hh.shape().to_vec(),
            });
        }

        let device = self.layers[layer].w_ih.val().device();
        self.layers[layer] = LayerParams {
            w_ih: Param::from_tensor(Self::matrix_from_ndarray(&w_ih, &device)),
            w_hh: Param::from_tensor(Self::matrix_from_ndarray(&w_hh, &device)),
            b_ih: Param::from_tensor(Self::vector_from_ndarray(&b_ih, &device)),
            b_hh: Param::from_tensor(Self::vector_from_ndarray(&b_hh, &device)),
        };
        Ok(())
    }

    /// Convert a host matrix to a Burn tensor
    fn matrix_from_ndarray(arr: &Array2<f32>, device: &B::Device) -> Tensor<B, 2> {
        let shape = arr.shape();
        let data: Vec<f32> = arr.iter().copied().collect();
        Tensor::<B, 1>::from_floats(data.as_slice(), device).reshape([shape[0], shape[1]])
    }

    /// Convert a host vector to a Burn tensor
    fn vector_from_ndarray(arr: &Array1<f32>, device: &B::Device) -> Tensor<B, 1> {
        let data: Vec<f32> = arr.iter().copied().collect();
        Tensor::from_floats(data.as_slice(), device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_store_creation_shapes() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(3, 5, 2, &device).unwrap();

        assert_eq!(store.num_layers(), 2);
        assert_eq!(store.input_size(), 3);
        assert_eq!(store.hidden_size(), 5);

        let layer0 = store.get(0).unwrap();
        assert_eq!(layer0.w_ih.val().dims(), [5, 3]);
        assert_eq!(layer0.w_hh.val().dims(), [5, 5]);
        assert_eq!(layer0.b_ih.val().dims(), [5]);
        assert_eq!(layer0.b_hh.val().dims(), [5]);

        // Deeper layers consume the previous layer's hidden vectors
        let layer1 = store.get(1).unwrap();
        assert_eq!(layer1.w_ih.val().dims(), [5, 5]);
    }

    #[test]
    fn test_init_within_bound() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(4, 16, 1, &device).unwrap();

        let bound = 1.0 / (16.0f32).sqrt();
        let layer = store.get(0).unwrap();
        let max_abs = layer.w_ih.val().abs().max().into_scalar();
        assert!(max_abs <= bound, "weight {} outside [-{}, {}]", max_abs, bound, bound);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let device = Default::default();
        assert!(matches!(
            ParamStore::<TestBackend>::new(3, 5, 0, &device),
            Err(Error::ZeroLayers)
        ));
        assert!(matches!(
            ParamStore::<TestBackend>::new(3, 0, 1, &device),
            Err(Error::ZeroHidden)
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        let device = Default::default();
        let store = ParamStore::<TestBackend>::new(3, 5, 2, &device).unwrap();

        assert!(matches!(
            store.get(2),
            Err(Error::LayerOutOfRange { layer: 2, num_layers: 2 })
        ));
    }

    #[test]
    fn test_seeded_stores_identical() {
        let device = Default::default();
        let a = ParamStore::<TestBackend>::seeded(3, 5, 2, 42, &device).unwrap();
        let b = ParamStore::<TestBackend>::seeded(3, 5, 2, 42, &device).unwrap();

        for layer in 0..2 {
            let diff = (a.get(layer).unwrap().w_ih.val() - b.get(layer).unwrap().w_ih.val())
                .abs()
                .max()
                .into_scalar();
            assert_eq!(diff, 0.0);
        }
    }

    #[test]
    fn test_set_round_trip() {
        let device = Default::default();
        let mut store = ParamStore::<TestBackend>::new(2, 2, 1, &device).unwrap();

        let w_ih = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let w_hh = Array2::zeros((2, 2));
        let b_ih = Array1::from_vec(vec![0.5, -0.5]);
        let b_hh = Array1::zeros(2);

        store.set(0, w_ih, w_hh, b_ih, b_hh).unwrap();

        let layer = store.get(0).unwrap();
        let w = layer.w_ih.val();
        assert_eq!(w.clone().slice([0..1, 1..2]).into_scalar(), 2.0);
        assert_eq!(w.slice([1..2, 0..1]).into_scalar(), 3.0);
        assert_eq!(layer.b_ih.val().slice([1..2]).into_scalar(), -0.5);
    }

    #[test]
    fn test_set_rejects_wrong_shapes() {
        let device = Default::default();
        let mut store = ParamStore::<TestBackend>::new(2, 3, 1, &device).unwrap();

        let result = store.set(
            0,
            Array2::zeros((3, 3)), // should be (3, 2) for layer 0
            Array2::zeros((3, 3)),
            Array1::zeros(3),
            Array1::zeros(3),
        );
        assert!(matches!(result, Err(Error::ShapeMismatch { name: "w_ih", .. })));
    }
}
