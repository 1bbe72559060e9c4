use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::activation::activation::ActivationFunction;
use crate::error::{MeshError, Result};
use crate::mesh::record::ModelRecord;

/// A feed-forward network described by an ordered list of layer widths.
///
/// A mesh is in one of two states:
/// - *initialized* — built by [`NetworkMesh::with_layers`] (or repopulated
///   by [`NetworkMesh::load_model`]), holding one weight matrix and one bias
///   vector per layer transition;
/// - *uninitialized* — built by [`NetworkMesh::new`], holding nothing.
///
/// Training, prediction and saving all fail with
/// [`MeshError::UninitializedArchitecture`] on an uninitialized mesh; there
/// is no partially-valid state in between.
pub struct NetworkMesh {
    pub(crate) sizes: Vec<usize>,
    pub(crate) seed: Option<u64>,
    pub(crate) activation: ActivationFunction,
    pub(crate) weights: Vec<Array2<f64>>,
    pub(crate) biases: Vec<Array1<f64>>,
}

impl Default for NetworkMesh {
    fn default() -> Self {
        NetworkMesh::new()
    }
}

impl NetworkMesh {
    /// Creates an uninitialized mesh: no architecture, no parameters.
    /// Populate it with [`NetworkMesh::load_model`].
    pub fn new() -> NetworkMesh {
        NetworkMesh {
            sizes: Vec::new(),
            seed: None,
            activation: ActivationFunction::default(),
            weights: Vec::new(),
            biases: Vec::new(),
        }
    }

    /// Creates a mesh with the given layer widths and standard-normal
    /// initial parameters.
    ///
    /// The same `(sizes, seed)` pair produces bit-identical parameters on
    /// every call, in every process: draws come from a `StdRng` seeded with
    /// `seed` in a fixed order (per transition, weights then biases). When
    /// `seed` is `None` a fresh random seed is drawn once.
    ///
    /// # Panics
    /// Panics if fewer than two widths are given, or any width is zero.
    pub fn with_layers(sizes: &[usize], seed: Option<u64>) -> NetworkMesh {
        assert!(sizes.len() >= 2, "a mesh needs at least an input and an output layer");
        assert!(sizes.iter().all(|&n| n > 0), "layer widths must be non-zero");

        let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);

        for pair in sizes.windows(2) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            weights.push(Array2::random_using((fan_in, fan_out), StandardNormal, &mut rng));
            biases.push(Array1::random_using(fan_out, StandardNormal, &mut rng));
        }

        NetworkMesh {
            sizes: sizes.to_vec(),
            seed,
            activation: ActivationFunction::default(),
            weights,
            biases,
        }
    }

    /// Replaces the activation shared by every layer (sigmoid by default).
    pub fn with_activation(mut self, activation: ActivationFunction) -> NetworkMesh {
        self.activation = activation;
        self
    }

    pub fn is_initialized(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Ordered layer widths; empty while uninitialized.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn activation(&self) -> &ActivationFunction {
        &self.activation
    }

    /// One `(sizes[i], sizes[i + 1])` weight matrix per layer transition.
    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    /// One length-`sizes[i + 1]` bias vector per layer transition.
    pub fn biases(&self) -> &[Array1<f64>] {
        &self.biases
    }

    /// Runs a single forward pass.
    ///
    /// # Errors
    /// [`MeshError::UninitializedArchitecture`] when the mesh has no layers.
    pub fn predict(&self, input: &Array1<f64>) -> Result<Array1<f64>> {
        if !self.is_initialized() {
            return Err(MeshError::UninitializedArchitecture);
        }
        Ok(self.output(input))
    }

    /// Forward pass without bookkeeping. Callers must hold an initialized mesh.
    pub(crate) fn output(&self, input: &Array1<f64>) -> Array1<f64> {
        let mut a = input.clone();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = a.dot(w) + b;
            a = z.mapv(|v| self.activation.function(v));
        }
        a
    }

    /// Forward pass that keeps what backpropagation needs: the
    /// pre-activations `z = aW + b` of every transition and the activations
    /// of every layer, input included (so the second vector is one longer).
    pub(crate) fn forward_trace(&self, input: &Array1<f64>) -> (Vec<Array1<f64>>, Vec<Array1<f64>>) {
        let mut pre_activations = Vec::with_capacity(self.weights.len());
        let mut activations = Vec::with_capacity(self.weights.len() + 1);
        activations.push(input.clone());

        let mut a = input.clone();
        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = a.dot(w) + b;
            a = z.mapv(|v| self.activation.function(v));
            pre_activations.push(z);
            activations.push(a.clone());
        }

        (pre_activations, activations)
    }

    /// Serializes widths, seed, activation and all parameters to `path`,
    /// overwriting any existing file. The handle is flushed and released
    /// before returning, so write failures surface here rather than on drop.
    ///
    /// # Errors
    /// [`MeshError::UninitializedArchitecture`] when there is nothing to
    /// save; [`MeshError::Io`] when the path cannot be written.
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if !self.is_initialized() {
            return Err(MeshError::UninitializedArchitecture);
        }

        let record = ModelRecord {
            sizes: self.sizes.clone(),
            seed: self.seed,
            activation: self.activation.clone(),
            weights: self.weights.clone(),
            biases: self.biases.clone(),
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &record).map_err(std::io::Error::from)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a record written by [`NetworkMesh::save_model`] and repopulates
    /// this mesh from it, whatever its prior state — an uninitialized mesh
    /// becomes a fully trained one. The record's shape chain is validated
    /// before anything is assigned: on any error the mesh is untouched.
    ///
    /// # Errors
    /// [`MeshError::Io`] when the path cannot be read;
    /// [`MeshError::CorruptModel`] when the content does not parse or its
    /// encoded shapes are inconsistent.
    pub fn load_model<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let record: ModelRecord = serde_json::from_reader(reader).map_err(|e| {
            match e.classify() {
                serde_json::error::Category::Io => MeshError::Io(e.into()),
                _ => MeshError::CorruptModel(e.to_string()),
            }
        })?;
        record.validate()?;

        let ModelRecord { sizes, seed, activation, weights, biases } = record;
        self.sizes = sizes;
        self.seed = seed;
        self.activation = activation;
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }
}
