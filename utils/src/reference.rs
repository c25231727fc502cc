/// Closed forms of the functions the embedded table is fitted against,
/// for plotting alongside the rational approximations.
pub fn eval(name: &str) -> Option<fn(f32) -> f32> {
    match name {
        "leaky_relu" => Some(|x| if x >= 0.0 { x } else { 0.01 * x }),
        "relu" => Some(|x| x.max(0.0)),
        "tanh" => Some(f32::tanh),
        "sigmoid" => Some(sigmoid),
        "gelu" => Some(gelu),
        "swish" => Some(swish),
        _ => None,
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn swish(x: f32) -> f32 {
    x * sigmoid(x)
}

fn gelu(x: f32) -> f32 {
    0.5 * x * (1.0 + erf(f64::from(x) / std::f64::consts::SQRT_2) as f32)
}

/// Abramowitz and Stegun 7.1.26, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_functions_resolve() {
        for name in ["leaky_relu", "relu", "tanh", "sigmoid", "gelu", "swish"] {
            assert!(eval(name).is_some(), "{name}");
        }
        assert!(eval("mish").is_none());
    }

    #[test]
    fn gelu_fixed_points() {
        let gelu = eval("gelu").unwrap();
        assert!(gelu(0.0).abs() < 1e-6);
        assert!((gelu(3.0) - 2.9960).abs() < 1e-3);
        assert!(gelu(-3.0).abs() < 5e-3);
    }
}
