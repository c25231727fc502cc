use crate::{
    coeffs::{self, CoefficientSet},
    error::RationalError,
    layer::{ExecutionContext, Layer},
    rng,
    tensor::{DenseMatrix, Shape, Tensor},
    version::{self, Version},
};

/// Configuration for a [`Rational`] layer.
#[derive(Clone, Debug)]
pub struct RationalConfig {
    /// Function whose tuned coefficients initialise the layer.
    pub approx_func: String,
    /// Numerator and denominator degrees `(n, m)`.
    pub degrees: (usize, usize),
    pub version: Version,
    /// Master switch. When `false` both coefficient sets are frozen
    /// regardless of the individual flags below.
    pub trainable: bool,
    pub train_numerator: bool,
    pub train_denominator: bool,
    /// Spread of the multiplicative noise version `D` draws on its
    /// denominator coefficients while training. Zero disables it.
    pub noise_deviation: f32,
}

impl Default for RationalConfig {
    fn default() -> Self {
        Self {
            approx_func: "leaky_relu".to_string(),
            degrees: (5, 4),
            version: Version::A,
            trainable: true,
            train_numerator: true,
            train_denominator: true,
            noise_deviation: 0.1,
        }
    }
}

/// A rational activation `y = P(x) / Q(x)` applied elementwise, with
/// the numerator and denominator coefficients owned by the layer as
/// trainable parameters and the denominator formula picked by
/// [`Version`].
pub struct Rational {
    version: Version,
    numerator: Tensor,
    denominator: Tensor,
    approx_func: String,
    noise_deviation: f32,
    noise: Option<Vec<f32>>,
}

impl Rational {
    /// Builds a layer initialised from the embedded coefficient table,
    /// failing when no tuned entry exists for the combination.
    pub fn new(config: RationalConfig) -> Result<Self, RationalError> {
        let coeffs = coeffs::lookup(config.version, config.degrees, &config.approx_func)?;
        Ok(Self::build(coeffs, &config))
    }

    /// Builds a layer from explicit coefficients, bypassing the table.
    /// `config.degrees` is ignored; the coefficient lengths define the
    /// parameter shapes.
    pub fn from_coefficients(coeffs: CoefficientSet, config: RationalConfig) -> Self {
        Self::build(coeffs, &config)
    }

    fn build(coeffs: CoefficientSet, config: &RationalConfig) -> Self {
        let num_shape = Shape::new(coeffs.numerator.len(), 1);
        let den_shape = Shape::new(coeffs.denominator.len(), 1);

        Self {
            version: config.version,
            numerator: Tensor::new(
                DenseMatrix::from_slice(num_shape, &coeffs.numerator),
                config.trainable && config.train_numerator,
            ),
            denominator: Tensor::new(
                DenseMatrix::from_slice(den_shape, &coeffs.denominator),
                config.trainable && config.train_denominator,
            ),
            approx_func: config.approx_func.clone(),
            noise_deviation: config.noise_deviation,
            noise: None,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn approx_func(&self) -> &str {
        &self.approx_func
    }

    /// Numerator and denominator degrees `(n, m)`.
    pub fn degrees(&self) -> (usize, usize) {
        (self.numerator.size() - 1, self.denominator.size() - 1)
    }

    pub fn numerator(&self) -> &Tensor {
        &self.numerator
    }

    pub fn denominator(&self) -> &Tensor {
        &self.denominator
    }

    /// Evaluates the activation at a single point without touching any
    /// training state. Version `D` behaves as version `B` here.
    pub fn evaluate(&self, x: f32) -> f32 {
        let num = self.numerator.values.values();
        let den = self.denominator.values.values();
        version::polynomial(num, x) / self.version.denominator(den, x)
    }
}

impl Layer for Rational {
    fn output_shape(&self, input: Shape) -> Shape {
        input
    }

    fn forward(&mut self, ctx: &mut ExecutionContext, input: &DenseMatrix, output: &mut DenseMatrix) {
        output.reshape_if_needed(input.shape());

        self.noise = (self.version == Version::D && ctx.training() && self.noise_deviation > 0.0)
            .then(|| rng::noise_factors(ctx.rng(), self.denominator.size(), self.noise_deviation));

        let num = self.numerator.values.values();
        let den = self.denominator.values.values();

        let noised = self.noise.as_deref().map(|noise| noised_coeffs(den, noise));
        let den = match &noised {
            Some(noised) => noised.as_slice(),
            None => den,
        };

        for (out, &x) in output.values_mut().iter_mut().zip(input.values()) {
            *out = version::polynomial(num, x) / self.version.denominator(den, x);
        }
    }

    fn backward(
        &mut self,
        _ctx: &mut ExecutionContext,
        input: &DenseMatrix,
        output_grad: &DenseMatrix,
        mut input_grad: Option<&mut DenseMatrix>,
    ) {
        assert_eq!(input.shape(), output_grad.shape(), "Must be exactly the same shape!");

        if let Some(grad) = input_grad.as_mut() {
            grad.reshape_if_needed(input.shape());
        }

        let version = self.version;
        let num = self.numerator.values.values();
        let den = self.denominator.values.values();
        let noise = self.noise.as_deref();

        let noised = noise.map(|noise| noised_coeffs(den, noise));
        let den = match &noised {
            Some(noised) => noised.as_slice(),
            None => den,
        };

        let mut num_grads = self.numerator.gradients.as_mut().map(|g| g.values_mut());
        let mut den_grads = self.denominator.gradients.as_mut().map(|g| g.values_mut());

        for (idx, (&x, &g)) in input.values().iter().zip(output_grad.values()).enumerate() {
            let p = version::polynomial(num, x);
            let q = version.denominator(den, x);

            if let Some(grads) = num_grads.as_deref_mut() {
                version::backprop_polynomial(x, g / q, grads);
            }

            if let Some(grads) = den_grads.as_deref_mut() {
                version.backprop_denominator(den, x, -g * p / (q * q), noise, grads);
            }

            if let Some(grad) = input_grad.as_mut() {
                let p_dx = version::polynomial_dx(num, x);
                let q_dx = version.denominator_dx(den, x);
                grad.values_mut()[idx] += g * (p_dx * q - p * q_dx) / (q * q);
            }
        }
    }

    fn parameters(&self) -> Vec<&Tensor> {
        vec![&self.numerator, &self.denominator]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.numerator, &mut self.denominator]
    }
}

fn noised_coeffs(coeffs: &[f32], noise: &[f32]) -> Vec<f32> {
    coeffs.iter().zip(noise).map(|(&b, &n)| b * n).collect()
}
