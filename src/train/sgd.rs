use std::time::Instant;

use ndarray::{Array1, Array2, Axis};

use crate::error::{MeshError, Result};
use crate::mesh::mesh::NetworkMesh;
use crate::train::epoch_stats::EpochStats;
use crate::train::sgd_config::SgdConfig;
use crate::train::target::{Sample, Target};

impl NetworkMesh {
    /// Trains the mesh in place with mini-batch stochastic gradient descent.
    ///
    /// Each epoch walks `train_data` in order, split into consecutive
    /// batches of `config.batch_size` (the final batch may be shorter), and
    /// applies one parameter update per batch:
    /// `w -= (lr / batch_len) * summed_gradient`, likewise for biases.
    /// Sample order is taken as given — no shuffling — so two identical runs
    /// produce identical parameters.
    ///
    /// When `test_data` is supplied, classification accuracy over it is
    /// measured after every epoch and logged; evaluation reads the
    /// parameters but never mutates them or alters the course of training.
    ///
    /// Returns one [`EpochStats`] per completed epoch.
    ///
    /// # Errors
    /// [`MeshError::UninitializedArchitecture`] when the mesh has no layers;
    /// the mesh is left untouched in that case.
    ///
    /// # Panics
    /// Panics if `train_data` is empty or `config.batch_size` is zero.
    pub fn sgd(
        &mut self,
        train_data: &[Sample],
        config: &SgdConfig,
        test_data: Option<&[Sample]>,
    ) -> Result<Vec<EpochStats>> {
        if !self.is_initialized() {
            return Err(MeshError::UninitializedArchitecture);
        }
        assert!(!train_data.is_empty(), "train_data must not be empty");
        assert!(config.batch_size > 0, "batch_size must be at least 1");

        let mut history = Vec::with_capacity(config.epochs);

        for epoch in 1..=config.epochs {
            let t_start = Instant::now();

            let train_loss = run_one_epoch(self, train_data, config);
            let test_accuracy = test_data.map(|samples| evaluate_accuracy(self, samples));
            let elapsed_ms = t_start.elapsed().as_millis() as u64;

            match test_accuracy {
                Some(accuracy) => log::info!(
                    "epoch {epoch}/{}: train loss {train_loss:.6}, test accuracy {:.1}%",
                    config.epochs,
                    accuracy * 100.0
                ),
                None => log::debug!("epoch {epoch}/{}: train loss {train_loss:.6}", config.epochs),
            }

            history.push(EpochStats {
                epoch,
                total_epochs: config.epochs,
                train_loss,
                test_accuracy,
                elapsed_ms,
            });
        }

        Ok(history)
    }
}

/// One full pass over `train_data`; returns the mean per-sample loss.
fn run_one_epoch(mesh: &mut NetworkMesh, train_data: &[Sample], config: &SgdConfig) -> f64 {
    let mut total_loss = 0.0;

    for batch in train_data.chunks(config.batch_size) {
        // Zero-initialized gradient accumulators, one pair per transition.
        let mut grad_w: Vec<Array2<f64>> = mesh
            .weights
            .iter()
            .map(|w| Array2::zeros(w.dim()))
            .collect();
        let mut grad_b: Vec<Array1<f64>> = mesh
            .biases
            .iter()
            .map(|b| Array1::zeros(b.dim()))
            .collect();

        for (input, target) in batch {
            total_loss += accumulate_gradients(mesh, input, target, &mut grad_w, &mut grad_b);
        }

        // Single update per batch, averaged over the samples it held.
        let scale = config.lr / batch.len() as f64;
        for (w, gw) in mesh.weights.iter_mut().zip(&grad_w) {
            w.scaled_add(-scale, gw);
        }
        for (b, gb) in mesh.biases.iter_mut().zip(&grad_b) {
            b.scaled_add(-scale, gb);
        }
    }

    total_loss / train_data.len() as f64
}

/// Backpropagates one sample, adding its gradients into the accumulators.
/// Returns the sample's mean squared output error.
fn accumulate_gradients(
    mesh: &NetworkMesh,
    input: &Array1<f64>,
    target: &Target,
    grad_w: &mut [Array2<f64>],
    grad_b: &mut [Array1<f64>],
) -> f64 {
    let (pre_activations, activations) = mesh.forward_trace(input);
    let transitions = mesh.weights.len();

    let error = target.error_signal(&activations[transitions]);
    let loss = error.mapv(|e| e * e).mean().unwrap_or(0.0);

    // Output transition: δ = (a − y) ⊙ f'(z).
    let mut delta =
        &error * &pre_activations[transitions - 1].mapv(|z| mesh.activation.derivative(z));
    grad_w[transitions - 1] += &outer(&activations[transitions - 1], &delta);
    grad_b[transitions - 1] += &delta;

    // Hidden transitions, walking backwards: δ = (W_next · δ_next) ⊙ f'(z).
    for i in (0..transitions - 1).rev() {
        let derivative = pre_activations[i].mapv(|z| mesh.activation.derivative(z));
        delta = mesh.weights[i + 1].dot(&delta) * derivative;
        grad_w[i] += &outer(&activations[i], &delta);
        grad_b[i] += &delta;
    }

    loss
}

/// Outer product `column ⊗ row`, shaped like a `(fan_in, fan_out)` weight
/// matrix.
fn outer(column: &Array1<f64>, row: &Array1<f64>) -> Array2<f64> {
    let column = column.view().insert_axis(Axis(1));
    let row = row.view().insert_axis(Axis(0));
    column.dot(&row)
}

/// Fraction of samples whose output classifies the target correctly.
fn evaluate_accuracy(mesh: &NetworkMesh, samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let correct = samples
        .iter()
        .filter(|(input, target)| target.is_hit(&mesh.output(input)))
        .count();
    correct as f64 / samples.len() as f64
}
