use rand::{rngs::StdRng, SeedableRng};

use crate::tensor::{DenseMatrix, Shape, Tensor};

/// State threaded through forward and backward passes: whether the
/// host is training, and the random stream noised layers draw from.
pub struct ExecutionContext {
    training: bool,
    rng: StdRng,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self { training: true, rng: StdRng::from_entropy() }
    }

    /// A context whose random stream replays identically across runs.
    pub fn with_seed(seed: u64) -> Self {
        Self { training: true, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn training(&self) -> bool {
        self.training
    }

    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// A differentiable component a host network can stack.
pub trait Layer {
    /// Shape of the output produced for the given input shape.
    fn output_shape(&self, input: Shape) -> Shape;

    /// Writes the layer's output for `input` into `output`, resizing
    /// the buffer if needed.
    fn forward(&mut self, ctx: &mut ExecutionContext, input: &DenseMatrix, output: &mut DenseMatrix);

    /// Accumulates parameter gradients, and input gradients when a
    /// buffer is supplied, for the pass that produced `output_grad`.
    fn backward(
        &mut self,
        ctx: &mut ExecutionContext,
        input: &DenseMatrix,
        output_grad: &DenseMatrix,
        input_grad: Option<&mut DenseMatrix>,
    );

    fn parameters(&self) -> Vec<&Tensor>;

    fn parameters_mut(&mut self) -> Vec<&mut Tensor>;

    /// Clears every parameter gradient buffer.
    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }
}
