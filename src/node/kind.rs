use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// Role of a node inside a network.
///
/// The derived ordering (`Bias < Input < Output < Hidden`) is the key the
/// network sorts its evaluation order by, so bias, input and output nodes
/// occupy predictable index ranges and hidden nodes trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Bias = 0,
    Input = 1,
    Output = 2,
    Hidden = 3,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Bias,
        NodeKind::Input,
        NodeKind::Output,
        NodeKind::Hidden,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Bias => "bias",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Hidden => "hidden",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for NodeKind {
    type Error = NetworkError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| *kind as u8 == code)
            .ok_or_else(|| NetworkError::UnknownNodeKind(code.to_string()))
    }
}

impl FromStr for NodeKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| NetworkError::UnknownNodeKind(s.to_string()))
    }
}
