mod edge;
mod network;

pub use edge::Edge;
pub use network::{BrainNetwork, NodeId};
