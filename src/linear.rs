use ndarray::{Array1, Array2, ArrayView1, Axis};

use train_summary::{NamedParam, NamedParameters};

/// Predictions closer than this to their target count as hits.
const HIT_TOLERANCE: f32 = 0.1;

/// A labeled set of samples.
pub struct Split {
    pub x: Array2<f32>,
    pub y: Array1<f32>,
}

impl Split {
    /// Samples `n` points of `y = 3 x0 - 2 x1 + 0.5`, starting at index `from`.
    pub fn synthetic(from: usize, n: usize) -> Self {
        let x = Array2::from_shape_fn((n, 2), |(i, j)| {
            let i = from + i;
            match j {
                0 => (i % 7) as f32 / 7.,
                _ => ((i * 3) % 5) as f32 / 5.,
            }
        });
        let y = x.map_axis(Axis(1), |row| 3. * row[0] - 2. * row[1] + 0.5);

        Self { x, y }
    }
}

/// Single output linear regression trained with full batch gradient descent.
///
/// Parameters are kept flat so they can be handed out as host slices.
pub struct Linear {
    weight: Vec<f32>,
    bias: Vec<f32>,
    grad_weight: Option<Vec<f32>>,
    grad_bias: Option<Vec<f32>>,
}

impl Linear {
    pub fn new(inputs: usize) -> Self {
        Self {
            weight: vec![0.; inputs],
            bias: vec![0.],
            grad_weight: None,
            grad_bias: None,
        }
    }

    fn forward(&self, x: &Array2<f32>) -> Array1<f32> {
        x.dot(&ArrayView1::from(&self.weight[..])) + self.bias[0]
    }

    /// Computes the mean squared error over `split` and stores its gradient.
    ///
    /// # Returns
    /// The loss.
    pub fn backward(&mut self, split: &Split) -> f32 {
        let n = split.y.len() as f32;
        let err = self.forward(&split.x) - &split.y;

        let grad_weight = split.x.t().dot(&err) * (2. / n);
        self.grad_weight = Some(grad_weight.to_vec());
        self.grad_bias = Some(vec![err.sum() * 2. / n]);

        err.mapv(|e| e * e).sum() / n
    }

    /// Applies the stored gradient and clears it.
    pub fn step(&mut self, lr: f32) {
        if let Some(grad_weight) = self.grad_weight.take() {
            for (w, g) in self.weight.iter_mut().zip(grad_weight) {
                *w -= lr * g;
            }
        }

        if let Some(grad_bias) = self.grad_bias.take() {
            self.bias[0] -= lr * grad_bias[0];
        }
    }

    /// Returns the loss and the fraction of hits over `split`.
    pub fn evaluate(&self, split: &Split) -> (f32, f32) {
        let n = split.y.len() as f32;
        let err = self.forward(&split.x) - &split.y;

        let loss = err.mapv(|e| e * e).sum() / n;
        let hits = err.iter().filter(|e| e.abs() < HIT_TOLERANCE).count();

        (loss, hits as f32 / n)
    }
}

impl NamedParameters for Linear {
    fn named_parameters(&self) -> Vec<NamedParam<'_>> {
        vec![
            NamedParam {
                name: "weight",
                value: &self.weight,
                grad: self.grad_weight.as_deref(),
            },
            NamedParam {
                name: "bias",
                value: &self.bias,
                grad: self.grad_bias.as_deref(),
            },
        ]
    }
}
