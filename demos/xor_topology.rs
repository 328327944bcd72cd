use feedforward_net::{ActivationKind, Connection, Network, Node, NodeKind, Result};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Hand-wired XOR: one OR-like and one NAND-like hidden unit feeding an
/// AND-like output, all with steepened sigmoids.
fn xor_network() -> Result<Network> {
    let mut network = Network::new();
    let bias = network.add_node(Node::new(NodeKind::Bias, ActivationKind::Direct));
    let a = network.add_node(Node::new(NodeKind::Input, ActivationKind::Direct));
    let b = network.add_node(Node::new(NodeKind::Input, ActivationKind::Direct));
    let or = network.add_node(Node::new(NodeKind::Hidden, ActivationKind::SteepenedSigmoid));
    let nand = network.add_node(Node::new(NodeKind::Hidden, ActivationKind::SteepenedSigmoid));
    let out = network.add_node(Node::new(NodeKind::Output, ActivationKind::SteepenedSigmoid));

    // Hidden layer first, then the output layer.
    for (source, target, weight) in [
        (bias, or, -2.0),
        (a, or, 4.0),
        (b, or, 4.0),
        (bias, nand, 6.0),
        (a, nand, -4.0),
        (b, nand, -4.0),
        (bias, out, -6.0),
        (or, out, 4.0),
        (nand, out, 4.0),
    ] {
        network.add_connection(Connection::new(source, target, weight))?;
    }
    Ok(network)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut xor = xor_network()?;
    for input in [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]] {
        let output = xor.activate(&input)?;
        info!("xor {:?} -> {:.4}", input, output[0]);
    }

    let mut rng = rand::thread_rng();
    let mut random = Network::fully_connected(3, 4, 2, || rng.gen::<f64>() * 2.0 - 1.0);
    let output = random.activate(&[0.1, 0.5, 0.9])?;
    info!(
        connections = random.connections().len(),
        "random network -> {:?}", output
    );

    println!("{}", random.to_spec().to_json_string()?);
    Ok(())
}
