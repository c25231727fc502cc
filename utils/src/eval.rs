use anyhow::bail;
use structopt::StructOpt;

use rationals::{Rational, RationalConfig, Version};

#[derive(StructOpt)]
pub struct EvalOptions {
    /// Function whose tuned coefficients to evaluate
    #[structopt(long, default_value = "leaky_relu")]
    func: String,
    /// Formula variant (A, B, C or D)
    #[structopt(long, default_value = "A")]
    version: Version,
    /// Numerator degree
    #[structopt(long, default_value = "5")]
    numerator: usize,
    /// Denominator degree
    #[structopt(long, default_value = "4")]
    denominator: usize,
    /// Points to evaluate at
    #[structopt(name = "POINT", allow_hyphen_values = true)]
    points: Vec<f32>,
}

impl EvalOptions {
    pub fn run(&self) -> anyhow::Result<()> {
        if self.points.is_empty() {
            bail!("No points provided! \nUsage: \n $ rationals-utils eval -- 0.0 1.0 -2.5");
        }

        let config = RationalConfig {
            approx_func: self.func.clone(),
            degrees: (self.numerator, self.denominator),
            version: self.version,
            ..Default::default()
        };
        let rational = Rational::new(config)?;

        for &x in &self.points {
            println!("f({x}) = {}", rational.evaluate(x));
        }

        Ok(())
    }
}
