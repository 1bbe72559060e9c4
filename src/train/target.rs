use ndarray::Array1;

/// One training example: an input vector paired with its target.
pub type Sample = (Array1<f64>, Target);

/// What a network output is compared against.
///
/// Datasets hand targets over either as dense vectors (e.g. one-hot rows)
/// or as bare class labels. Both feed the same training path: a label is
/// used directly as the comparison value, broadcast over the output vector,
/// with no one-hot expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A vector with the same width as the output layer.
    Dense(Array1<f64>),
    /// An integer class label.
    Label(usize),
}

impl Target {
    /// Output-layer error: network output minus the desired value.
    pub fn error_signal(&self, output: &Array1<f64>) -> Array1<f64> {
        match self {
            Target::Dense(t) => output - t,
            Target::Label(l) => {
                let l = *l as f64;
                output.mapv(|o| o - l)
            }
        }
    }

    /// Whether `output` classifies this target correctly: its argmax must
    /// match the dense target's argmax, or equal the label.
    pub fn is_hit(&self, output: &Array1<f64>) -> bool {
        match self {
            Target::Dense(t) => argmax(output) == argmax(t),
            Target::Label(l) => argmax(output) == *l,
        }
    }
}

impl From<Array1<f64>> for Target {
    fn from(v: Array1<f64>) -> Target {
        Target::Dense(v)
    }
}

impl From<Vec<f64>> for Target {
    fn from(v: Vec<f64>) -> Target {
        Target::Dense(Array1::from_vec(v))
    }
}

impl From<usize> for Target {
    fn from(label: usize) -> Target {
        Target::Label(label)
    }
}

/// Index of the largest element.
pub(crate) fn argmax(v: &Array1<f64>) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn dense_error_is_elementwise_difference() {
        let target = Target::Dense(array![1.0, 0.0]);
        let error = target.error_signal(&array![0.8, 0.3]);
        assert_eq!(error, array![0.8 - 1.0, 0.3]);
    }

    #[test]
    fn label_error_broadcasts_the_scalar() {
        let target = Target::Label(1);
        let error = target.error_signal(&array![0.25, 0.75]);
        assert_eq!(error, array![-0.75, -0.25]);
    }

    #[test]
    fn dense_hit_compares_argmaxes() {
        let target = Target::Dense(array![0.0, 1.0]);
        assert!(target.is_hit(&array![0.1, 0.9]));
        assert!(!target.is_hit(&array![0.9, 0.1]));
    }

    #[test]
    fn label_hit_compares_against_the_label() {
        let target = Target::Label(0);
        assert!(target.is_hit(&array![0.9, 0.1]));
        assert!(!target.is_hit(&array![0.1, 0.9]));
    }

    #[test]
    fn argmax_picks_the_largest() {
        assert_eq!(argmax(&array![0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&array![3.0]), 0);
    }

    #[test]
    fn conversions_cover_both_shapes() {
        assert_eq!(Target::from(vec![1.0, 0.0]), Target::Dense(array![1.0, 0.0]));
        assert_eq!(Target::from(2usize), Target::Label(2));
    }
}
