use std::fmt;

use crate::node::{Node, NodeId};

/// Position of a connection in its network's activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub(crate) usize);

impl ConnectionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A directed, weighted edge between two nodes of the same network.
///
/// Endpoints are fixed at construction; only the weight may change between
/// activation cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    source: NodeId,
    target: NodeId,
    weight: f64,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId, weight: f64) -> Connection {
        Connection { source, target, weight }
    }

    /// Scales the source node's activation by the weight and combines the
    /// result into the target node.
    ///
    /// `nodes` is the owning network's node storage. `Network::add_connection`
    /// only accepts endpoints inside it, so the indexing cannot go out of range.
    pub(crate) fn activate(&self, nodes: &mut [Node]) {
        let signal = nodes[self.source.index()].activate() * self.weight;
        nodes[self.target.index()].combine(signal);
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}
