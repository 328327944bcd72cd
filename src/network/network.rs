use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::activation::ActivationKind;
use crate::connection::{Connection, ConnectionId};
use crate::error::{NetworkError, Result};
use crate::network::spec::NetworkSpec;
use crate::node::{Node, NodeId, NodeKind};

/// Number of nodes of each kind held by a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub bias: usize,
    pub input: usize,
    pub output: usize,
    pub hidden: usize,
}

impl NodeCounts {
    pub fn of(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::Bias => self.bias,
            NodeKind::Input => self.input,
            NodeKind::Output => self.output,
            NodeKind::Hidden => self.hidden,
        }
    }

    pub fn total(&self) -> usize {
        self.bias + self.input + self.output + self.hidden
    }

    fn increment(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Bias => self.bias += 1,
            NodeKind::Input => self.input += 1,
            NodeKind::Output => self.output += 1,
            NodeKind::Hidden => self.hidden += 1,
        }
    }
}

/// An ordered collection of nodes and connections plus the evaluation loop.
///
/// Nodes live in insertion order and are addressed by `NodeId`. A separate
/// evaluation order keeps them stably sorted by `NodeKind`, so the i-th input
/// node added receives `inputs[i]` and the i-th output node added produces
/// `outputs[i]`. Connections are activated exactly in the order they were
/// added; the caller is responsible for that order being a valid layered
/// (acyclic) evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "NetworkSpec", try_from = "NetworkSpec")]
pub struct Network {
    nodes: Vec<Node>,
    order: Vec<NodeId>,
    connections: Vec<Connection>,
    counts: NodeCounts,
}

impl Network {
    /// Builds an empty network.
    pub fn new() -> Network {
        Network::default()
    }

    /// Builds a bias node, `num_input` direct input nodes, `num_hidden`
    /// sigmoid hidden nodes and `num_output` sigmoid output nodes, fully
    /// connected layer to layer.
    ///
    /// Connections are added per hidden node (bias first, then every input)
    /// and then per output node (bias first, then every hidden node). `weights`
    /// is called once per connection in that order.
    pub fn fully_connected<F>(
        num_input: usize,
        num_hidden: usize,
        num_output: usize,
        mut weights: F,
    ) -> Network
    where
        F: FnMut() -> f64,
    {
        let mut network = Network::new();

        let bias = network.add_node(Node::new(NodeKind::Bias, ActivationKind::Direct));
        let inputs: Vec<NodeId> = (0..num_input)
            .map(|_| network.add_node(Node::new(NodeKind::Input, ActivationKind::Direct)))
            .collect();
        let hidden: Vec<NodeId> = (0..num_hidden)
            .map(|_| network.add_node(Node::new(NodeKind::Hidden, ActivationKind::Sigmoid)))
            .collect();
        let outputs: Vec<NodeId> = (0..num_output)
            .map(|_| network.add_node(Node::new(NodeKind::Output, ActivationKind::Sigmoid)))
            .collect();

        // Every id above was just issued by this network, so nothing can dangle.
        for &h in &hidden {
            network.push_connection(Connection::new(bias, h, weights()));
            for &i in &inputs {
                network.push_connection(Connection::new(i, h, weights()));
            }
        }
        for &o in &outputs {
            network.push_connection(Connection::new(bias, o, weights()));
            for &h in &hidden {
                network.push_connection(Connection::new(h, o, weights()));
            }
        }

        debug!(
            num_input = num_input,
            num_hidden = num_hidden,
            num_output = num_output,
            connections = network.connections.len(),
            "built fully connected network"
        );
        network
    }

    /// Adds a node and returns its handle. The evaluation order is re-sorted
    /// by kind with a stable sort, so nodes of equal kind keep the order they
    /// were added in.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let kind = node.kind();
        debug!(%id, %kind, activation = %node.activation(), "adding node");

        self.nodes.push(node);
        self.order.push(id);
        let nodes = &self.nodes;
        self.order.sort_by_key(|id| nodes[id.index()].kind());
        self.counts.increment(kind);

        id
    }

    /// Appends a connection to the activation order.
    ///
    /// Fails with `UnknownNode` when an endpoint lies outside this network's
    /// node storage; the network is left unchanged in that case. Handles are
    /// plain indices, so an in-range handle taken from another network is
    /// accepted and refers to this network's node at that index.
    pub fn add_connection(&mut self, connection: Connection) -> Result<ConnectionId> {
        for endpoint in [connection.source(), connection.target()] {
            if endpoint.index() >= self.nodes.len() {
                return Err(NetworkError::UnknownNode {
                    id: endpoint.index(),
                    len: self.nodes.len(),
                });
            }
        }
        debug!(
            source = %connection.source(),
            target = %connection.target(),
            weight = connection.weight(),
            "adding connection"
        );
        Ok(self.push_connection(connection))
    }

    fn push_connection(&mut self, connection: Connection) -> ConnectionId {
        let id = ConnectionId(self.connections.len());
        self.connections.push(connection);
        id
    }

    /// Runs one activation cycle: reset, inject inputs, propagate every
    /// connection in order, read the output nodes.
    ///
    /// `inputs` must hold exactly one value per input node. The result holds
    /// one value per output node. Identical inputs and weights always produce
    /// bit-identical outputs.
    pub fn activate(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        if inputs.len() != self.counts.input {
            warn!(
                expected = self.counts.input,
                actual = inputs.len(),
                "rejecting input vector"
            );
            return Err(NetworkError::InvalidInputLength {
                expected: self.counts.input,
                actual: inputs.len(),
            });
        }

        for node in &mut self.nodes {
            node.reset();
        }

        let input_offset = self.counts.bias;
        for (slot, &value) in self.order[input_offset..].iter().zip(inputs) {
            self.nodes[slot.index()].combine(value);
        }

        for connection in &self.connections {
            connection.activate(&mut self.nodes);
        }

        let output_offset = input_offset + self.counts.input;
        let outputs: Vec<f64> = self.order[output_offset..output_offset + self.counts.output]
            .iter()
            .map(|id| self.nodes[id.index()].activate())
            .collect();

        trace!(?inputs, ?outputs, "activation cycle complete");
        Ok(outputs)
    }

    /// Nodes in evaluation order (bias, input, output, hidden).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.order.iter().map(move |&id| (id, &self.nodes[id.index()]))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Handles of the input nodes, in the order they map onto `activate`'s
    /// input vector.
    pub fn input_ids(&self) -> &[NodeId] {
        let start = self.counts.bias;
        &self.order[start..start + self.counts.input]
    }

    /// Handles of the output nodes, in the order `activate` reports them.
    pub fn output_ids(&self) -> &[NodeId] {
        let start = self.counts.bias + self.counts.input;
        &self.order[start..start + self.counts.output]
    }

    /// Connections in activation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.index())
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(id.index())
    }

    /// Replaces the weight of one connection between activation cycles.
    pub fn set_weight(&mut self, id: ConnectionId, weight: f64) -> Result<()> {
        let len = self.connections.len();
        let connection = self
            .connections
            .get_mut(id.index())
            .ok_or(NetworkError::UnknownConnection { id: id.index(), len })?;
        connection.set_weight(weight);
        Ok(())
    }

    pub fn counts(&self) -> NodeCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order, indexed by `NodeId`.
    pub(crate) fn storage(&self) -> &[Node] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind) -> Node {
        Node::new(kind, ActivationKind::Direct)
    }

    fn kinds(network: &Network) -> Vec<NodeKind> {
        network.nodes().map(|(_, n)| n.kind()).collect()
    }

    #[test]
    fn new_network_is_empty() {
        let network = Network::new();
        assert!(network.is_empty());
        assert_eq!(network.len(), 0);
        assert!(network.connections().is_empty());
        assert_eq!(network.counts(), NodeCounts::default());
    }

    #[test]
    fn add_node_sorts_by_kind_and_counts() {
        let mut network = Network::new();
        network.add_node(node(NodeKind::Hidden));
        network.add_node(node(NodeKind::Output));
        network.add_node(node(NodeKind::Input));
        network.add_node(node(NodeKind::Bias));
        network.add_node(node(NodeKind::Input));

        assert_eq!(
            kinds(&network),
            vec![
                NodeKind::Bias,
                NodeKind::Input,
                NodeKind::Input,
                NodeKind::Output,
                NodeKind::Hidden
            ]
        );
        let counts = network.counts();
        assert_eq!((counts.bias, counts.input, counts.output, counts.hidden), (1, 2, 1, 1));
        assert_eq!(counts.total(), network.len());
        assert_eq!(counts.of(NodeKind::Input), 2);
    }

    #[test]
    fn equal_kinds_keep_insertion_order() {
        let mut network = Network::new();
        let in1 = network.add_node(node(NodeKind::Input));
        network.add_node(node(NodeKind::Hidden));
        let in2 = network.add_node(node(NodeKind::Input));
        network.add_node(node(NodeKind::Bias));
        let in3 = network.add_node(node(NodeKind::Input));

        assert_eq!(network.input_ids(), &[in1, in2, in3]);
    }

    #[test]
    fn ids_survive_resorting() {
        let mut network = Network::new();
        let hidden = network.add_node(Node::new(NodeKind::Hidden, ActivationKind::Sigmoid));
        network.add_node(node(NodeKind::Bias));
        network.add_node(node(NodeKind::Input));

        let looked_up = network.node(hidden).unwrap();
        assert_eq!(looked_up.kind(), NodeKind::Hidden);
        assert_eq!(looked_up.activation(), ActivationKind::Sigmoid);
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let mut network = Network::new();
        let input = network.add_node(node(NodeKind::Input));

        let err = network
            .add_connection(Connection::new(input, NodeId(7), 1.0))
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode { id: 7, len: 1 }));
        assert!(network.connections().is_empty());
    }

    #[test]
    fn handles_are_checked_by_range_only() {
        let mut larger = Network::new();
        let mut last = larger.add_node(node(NodeKind::Input));
        for _ in 0..3 {
            last = larger.add_node(node(NodeKind::Hidden));
        }

        let mut network = Network::new();
        let input = network.add_node(node(NodeKind::Input));
        let out = network.add_node(node(NodeKind::Output));

        let err = network
            .add_connection(Connection::new(input, last, 1.0))
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode { id: 3, len: 2 }));
        assert!(network.connections().is_empty());

        // An in-range handle from elsewhere addresses this network's node at
        // the same index.
        let foreign = larger.input_ids()[0];
        assert_eq!(foreign, input);
        network.add_connection(Connection::new(foreign, out, 2.0)).unwrap();
        assert_eq!(network.activate(&[0.5]).unwrap(), vec![1.0]);
    }

    #[test]
    fn rejects_wrong_input_length() {
        let mut network = Network::fully_connected(2, 1, 1, || 0.5);
        for bad in [&[][..], &[1.0][..], &[1.0, 2.0, 3.0][..]] {
            let err = network.activate(bad).unwrap_err();
            assert!(matches!(
                err,
                NetworkError::InvalidInputLength { expected: 2, actual } if actual == bad.len()
            ));
        }
    }

    #[test]
    fn failed_activation_does_not_corrupt_state() {
        let mut fresh = Network::fully_connected(2, 2, 1, || 0.3);
        let expected = fresh.activate(&[0.1, 0.9]).unwrap();

        let mut network = Network::fully_connected(2, 2, 1, || 0.3);
        network.activate(&[5.0, 5.0]).unwrap();
        assert!(network.activate(&[1.0]).is_err());
        assert_eq!(network.activate(&[0.1, 0.9]).unwrap(), expected);
    }

    #[test]
    fn input_nodes_pass_values_through_direct_path() {
        let mut network = Network::new();
        let input = network.add_node(node(NodeKind::Input));
        let output = network.add_node(node(NodeKind::Output));
        network.add_connection(Connection::new(input, output, 1.0)).unwrap();

        assert_eq!(network.activate(&[0.75]).unwrap(), vec![0.75]);
        assert_eq!(network.activate(&[-2.0]).unwrap(), vec![-2.0]);
    }

    #[test]
    fn fan_in_sums_before_downstream_read() {
        // out = 2 * hidden, hidden = in1 + in2 + bias
        let mut network = Network::new();
        let bias = network.add_node(node(NodeKind::Bias));
        let in1 = network.add_node(node(NodeKind::Input));
        let in2 = network.add_node(node(NodeKind::Input));
        let hidden = network.add_node(node(NodeKind::Hidden));
        let out = network.add_node(node(NodeKind::Output));
        for source in [bias, in1, in2] {
            network.add_connection(Connection::new(source, hidden, 1.0)).unwrap();
        }
        network.add_connection(Connection::new(hidden, out, 2.0)).unwrap();

        assert_eq!(network.activate(&[0.25, 0.5]).unwrap(), vec![3.5]);
    }

    #[test]
    fn connection_order_is_evaluation_order() {
        // Reading hidden before it is fed sees only its reset value.
        let mut network = Network::new();
        let input = network.add_node(node(NodeKind::Input));
        let hidden = network.add_node(node(NodeKind::Hidden));
        let out = network.add_node(node(NodeKind::Output));
        network.add_connection(Connection::new(hidden, out, 1.0)).unwrap();
        network.add_connection(Connection::new(input, hidden, 1.0)).unwrap();

        assert_eq!(network.activate(&[4.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn output_length_matches_output_count() {
        let mut no_hidden = Network::fully_connected(3, 0, 4, || 1.0);
        assert_eq!(no_hidden.activate(&[0.0, 0.0, 0.0]).unwrap().len(), 4);

        let mut no_outputs = Network::fully_connected(1, 3, 0, || 1.0);
        assert!(no_outputs.activate(&[1.0]).unwrap().is_empty());

        // Unconnected sigmoid outputs sit at their reset activation.
        assert_eq!(no_hidden.activate(&[9.0, 9.0, 9.0]).unwrap().len(), 4);
    }

    #[test]
    fn fully_connected_shape_and_weight_order() {
        let mut next = 0.0;
        let network = Network::fully_connected(2, 3, 2, || {
            next += 1.0;
            next
        });

        assert_eq!(network.len(), 1 + 2 + 3 + 2);
        assert_eq!(network.connections().len(), 3 * (1 + 2) + 2 * (1 + 3));
        let counts = network.counts();
        assert_eq!((counts.bias, counts.input, counts.output, counts.hidden), (1, 2, 2, 3));

        let weights: Vec<f64> = network.connections().iter().map(|c| c.weight()).collect();
        let expected: Vec<f64> = (1..=17).map(|w| w as f64).collect();
        assert_eq!(weights, expected);

        // First edge of each block starts at the bias node.
        let bias = network.nodes().next().unwrap().0;
        assert_eq!(network.connections()[0].source(), bias);
        assert_eq!(network.connections()[9].source(), bias);
        let hidden_target = network.node(network.connections()[0].target()).unwrap();
        assert_eq!(hidden_target.kind(), NodeKind::Hidden);
        let output_target = network.node(network.connections()[9].target()).unwrap();
        assert_eq!(output_target.kind(), NodeKind::Output);
    }

    #[test]
    fn weights_change_between_cycles() {
        let mut network = Network::new();
        let input = network.add_node(node(NodeKind::Input));
        let out = network.add_node(node(NodeKind::Output));
        let edge = network.add_connection(Connection::new(input, out, 1.0)).unwrap();

        assert_eq!(network.activate(&[2.0]).unwrap(), vec![2.0]);
        network.set_weight(edge, -0.5).unwrap();
        assert_eq!(network.activate(&[2.0]).unwrap(), vec![-1.0]);
        network.connection_mut(edge).unwrap().set_weight(3.0);
        assert_eq!(network.connection(edge).unwrap().weight(), 3.0);
        assert_eq!(network.activate(&[2.0]).unwrap(), vec![6.0]);

        assert!(matches!(
            network.set_weight(ConnectionId(4), 1.0),
            Err(NetworkError::UnknownConnection { id: 4, len: 1 })
        ));
    }
}
