pub mod activation;

pub use activation::{ActivationKind, STEEPENED_SLOPE};
