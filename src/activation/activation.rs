use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// Slope applied by `SteepenedSigmoid`.
pub const STEEPENED_SLOPE: f64 = 4.9;

/// Transfer function a node applies to its accumulator.
///
/// The discriminants double as the compact wire codes accepted by
/// `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    /// `f(x) = x`
    Direct = 0,
    /// `f(x) = 1 / (1 + e^-x)`
    Sigmoid = 1,
    /// `f(x) = 1 / (1 + e^(-4.9x))`
    SteepenedSigmoid = 2,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 3] = [
        ActivationKind::Direct,
        ActivationKind::Sigmoid,
        ActivationKind::SteepenedSigmoid,
    ];

    /// Element-wise activation.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ActivationKind::Direct => x,
            ActivationKind::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationKind::SteepenedSigmoid => 1.0 / (1.0 + (-STEEPENED_SLOPE * x).exp()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::Direct => "direct",
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::SteepenedSigmoid => "steepened_sigmoid",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ActivationKind {
    type Error = NetworkError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ActivationKind::ALL
            .into_iter()
            .find(|kind| *kind as u8 == code)
            .ok_or_else(|| NetworkError::UnknownActivationKind(code.to_string()))
    }
}

impl FromStr for ActivationKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ActivationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| NetworkError::UnknownActivationKind(s.to_string()))
    }
}
