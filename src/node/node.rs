use tracing::trace;

use crate::activation::ActivationKind;
use crate::node::kind::NodeKind;

/// A scalar unit: one accumulator, a role and a transfer function.
///
/// Each activation cycle drives a node through `reset`, zero or more
/// `combine` calls and finally `activate`, which reads without mutating.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    activation: ActivationKind,
    accumulator: f64,
}

impl Node {
    /// Builds a node that is already in its reset state.
    pub fn new(kind: NodeKind, activation: ActivationKind) -> Node {
        Node {
            kind,
            activation,
            accumulator: Node::reset_value(kind),
        }
    }

    fn reset_value(kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Bias => 1.0,
            _ => 0.0,
        }
    }

    /// Clears the accumulator: 1.0 for bias nodes, 0.0 for everything else.
    pub fn reset(&mut self) {
        self.accumulator = Node::reset_value(self.kind);
    }

    /// Feeds a value into the accumulator.
    ///
    /// Bias nodes ignore it and always hold 1.0. Input nodes replace the
    /// accumulator (last write wins). Output and hidden nodes add to it, which
    /// is how fan-in from several connections is summed.
    pub fn combine(&mut self, value: f64) {
        match self.kind {
            NodeKind::Bias => trace!(ignored = value, "combine into bias node"),
            NodeKind::Input => self.accumulator = value,
            NodeKind::Output | NodeKind::Hidden => self.accumulator += value,
        }
    }

    /// The transfer function applied to the current accumulator.
    pub fn activate(&self) -> f64 {
        self.activation.apply(self.accumulator)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn activation(&self) -> ActivationKind {
        self.activation
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}
