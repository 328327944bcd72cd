use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

use crate::activation::ActivationKind;
use crate::connection::Connection;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::node::{Node, NodeId, NodeKind};

/// Describes one node. Its position in `NetworkSpec::nodes` becomes its
/// `NodeId` once the network is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub activation: ActivationKind,
}

/// Describes one weighted edge between two entries of `NetworkSpec::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// A fully serializable description of a topology and its weights.
///
/// Nodes are listed in insertion order (any mix of kinds; the network sorts
/// its evaluation order itself). Connections are listed in the exact order
/// they are activated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

impl NetworkSpec {
    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NetworkSpec> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Network {
    /// Builds a network from its description, validating every connection
    /// endpoint.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        let mut network = Network::new();
        for node in &spec.nodes {
            network.add_node(Node::new(node.kind, node.activation));
        }
        for conn in &spec.connections {
            let source = NodeId(conn.source);
            let target = NodeId(conn.target);
            network.add_connection(Connection::new(source, target, conn.weight))?;
        }
        debug!(
            nodes = network.len(),
            connections = network.connections().len(),
            "built network from spec"
        );
        Ok(network)
    }

    /// Describes the current topology and weights.
    pub fn to_spec(&self) -> NetworkSpec {
        NetworkSpec {
            nodes: self
                .storage()
                .iter()
                .map(|node| NodeSpec {
                    kind: node.kind(),
                    activation: node.activation(),
                })
                .collect(),
            connections: self
                .connections()
                .iter()
                .map(|conn| ConnectionSpec {
                    source: conn.source().index(),
                    target: conn.target().index(),
                    weight: conn.weight(),
                })
                .collect(),
        }
    }

    /// Writes the network's spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_spec().save_json(path)
    }

    /// Loads and validates a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        Network::from_spec(&NetworkSpec::load_json(path)?)
    }
}

impl From<Network> for NetworkSpec {
    fn from(network: Network) -> Self {
        network.to_spec()
    }
}

impl TryFrom<NetworkSpec> for Network {
    type Error = NetworkError;

    fn try_from(spec: NetworkSpec) -> Result<Self> {
        Network::from_spec(&spec)
    }
}
