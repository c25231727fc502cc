use std::{collections::HashMap, sync::LazyLock};

use serde::Deserialize;

use crate::{error::RationalError, version::Version};

/// Tuned initial coefficients for one (function, version, degrees)
/// combination, fitted against the function on `[-3, 3]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CoefficientSet {
    pub numerator: Vec<f32>,
    pub denominator: Vec<f32>,
}

type Table = HashMap<String, HashMap<String, HashMap<String, CoefficientSet>>>;

static TABLE: LazyLock<Table> = LazyLock::new(|| {
    serde_json::from_str(include_str!("rationals_config.json"))
        .expect("embedded coefficient table must parse")
});

/// Fetches the tuned initialisation for the given combination.
///
/// `degrees` is `(n, m)`: the numerator carries `n + 1` coefficients
/// and the denominator `m + 1`.
pub fn lookup(
    version: Version,
    degrees: (usize, usize),
    approx_func: &str,
) -> Result<CoefficientSet, RationalError> {
    TABLE
        .get(approx_func)
        .and_then(|by_version| by_version.get(version.as_str()))
        .and_then(|by_degrees| by_degrees.get(&format!("{}/{}", degrees.0, degrees.1)))
        .cloned()
        .ok_or_else(|| RationalError::MissingCoefficients {
            approx_func: approx_func.to_string(),
            version,
            degrees,
        })
}

/// Lists every combination present in the embedded table, sorted for
/// stable output.
pub fn available() -> Vec<(String, Version, (usize, usize))> {
    let mut combos = Vec::new();

    for (func, by_version) in TABLE.iter() {
        for (tag, by_degrees) in by_version.iter() {
            if let Ok(version) = tag.parse::<Version>() {
                for key in by_degrees.keys() {
                    if let Some(degrees) = parse_degrees(key) {
                        combos.push((func.clone(), version, degrees));
                    }
                }
            }
        }
    }

    combos.sort_by(|a, b| (&a.0, a.1.as_str(), a.2).cmp(&(&b.0, b.1.as_str(), b.2)));
    combos
}

fn parse_degrees(key: &str) -> Option<(usize, usize)> {
    let (n, m) = key.split_once('/')?;
    Some((n.parse().ok()?, m.parse().ok()?))
}
