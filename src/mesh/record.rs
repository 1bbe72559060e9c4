use ndarray::{Array1, Array2};
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{MeshError, Result};

/// On-disk form of a trained mesh.
///
/// `ndarray`'s serde encoding stores each tensor's shape next to its data,
/// so a record reconstructs every layer without external hints. `seed` and
/// `activation` are `#[serde(default)]`: files written before those fields
/// existed still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Ordered layer widths, input first.
    pub sizes: Vec<usize>,
    /// Seed the parameters were initialized from, when one was given.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Activation shared by every layer; sigmoid when absent.
    #[serde(default)]
    pub activation: ActivationFunction,
    /// One `(sizes[i], sizes[i + 1])` matrix per layer transition.
    pub weights: Vec<Array2<f64>>,
    /// One length-`sizes[i + 1]` vector per layer transition.
    pub biases: Vec<Array1<f64>>,
}

impl ModelRecord {
    /// Checks that the recorded tensors chain through the recorded widths.
    ///
    /// # Errors
    /// `MeshError::CorruptModel` naming the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.len() < 2 {
            return Err(MeshError::CorruptModel(format!(
                "expected at least 2 layer sizes, found {}",
                self.sizes.len()
            )));
        }

        let transitions = self.sizes.len() - 1;
        if self.weights.len() != transitions {
            return Err(MeshError::CorruptModel(format!(
                "expected {} weight matrices for {} layers, found {}",
                transitions,
                self.sizes.len(),
                self.weights.len()
            )));
        }
        if self.biases.len() != transitions {
            return Err(MeshError::CorruptModel(format!(
                "expected {} bias vectors for {} layers, found {}",
                transitions,
                self.sizes.len(),
                self.biases.len()
            )));
        }

        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            let expected = (self.sizes[i], self.sizes[i + 1]);
            if w.dim() != expected {
                return Err(MeshError::CorruptModel(format!(
                    "weight matrix {} has shape {:?}, expected {:?}",
                    i,
                    w.dim(),
                    expected
                )));
            }
            if b.len() != self.sizes[i + 1] {
                return Err(MeshError::CorruptModel(format!(
                    "bias vector {} has length {}, expected {}",
                    i,
                    b.len(),
                    self.sizes[i + 1]
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chained_record() -> ModelRecord {
        ModelRecord {
            sizes: vec![2, 5, 2],
            seed: Some(100),
            activation: ActivationFunction::Sigmoid,
            weights: vec![Array2::zeros((2, 5)), Array2::zeros((5, 2))],
            biases: vec![Array1::zeros(5), Array1::zeros(2)],
        }
    }

    #[test]
    fn chained_shapes_pass() {
        assert!(chained_record().validate().is_ok());
    }

    #[test]
    fn too_few_sizes_fail() {
        let mut record = chained_record();
        record.sizes = vec![2];
        assert!(matches!(record.validate(), Err(MeshError::CorruptModel(_))));
    }

    #[test]
    fn missing_weight_matrix_fails() {
        let mut record = chained_record();
        record.weights.pop();
        assert!(matches!(record.validate(), Err(MeshError::CorruptModel(_))));
    }

    #[test]
    fn unchained_weight_shape_fails() {
        let mut record = chained_record();
        record.weights[0] = Array2::zeros((2, 4));
        assert!(matches!(record.validate(), Err(MeshError::CorruptModel(_))));
    }

    #[test]
    fn wrong_bias_length_fails() {
        let mut record = chained_record();
        record.biases[1] = Array1::zeros(3);
        assert!(matches!(record.validate(), Err(MeshError::CorruptModel(_))));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        // A record written before `seed` and `activation` existed.
        let json = r#"{
            "sizes": [2, 2],
            "weights": [{"v": 1, "dim": [2, 2], "data": [0.1, 0.2, 0.3, 0.4]}],
            "biases": [{"v": 1, "dim": [2], "data": [0.0, 0.0]}]
        }"#;
        let record: ModelRecord = serde_json::from_str(json).unwrap();
        assert!(record.seed.is_none());
        assert_eq!(record.activation, ActivationFunction::Sigmoid);
        assert!(record.validate().is_ok());
    }
}
