//! Transmission protocols
//!
//! Each protocol turns one resolved path plus a random stream into a single
//! success/failure outcome. Paths are validated once, before any draw.

pub mod classical;
pub mod error;
pub mod naive;
pub mod purification;
pub mod types;

pub use classical::ClassicalProtocol;
pub use error::{ProtocolError, ProtocolResult};
pub use naive::NaiveProtocol;
pub use purification::PurificationProtocol;
pub use types::{Protocol, ProtocolKind, TransmissionProtocol};

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::mock::StepRng;
    use rand::RngCore;

    use crate::topology::{Edge, Network, Node};

    /// Constant-output RNG that counts how many words were drawn
    pub struct CountingRng {
        inner: StepRng,
        pub draws: usize,
    }

    impl CountingRng {
        /// Every `gen::<f64>()` returns 0.0, so every Bernoulli event fires
        pub fn low() -> Self {
            Self {
                inner: StepRng::new(0, 0),
                draws: 0,
            }
        }

        /// Every `gen::<f64>()` returns just under 1.0, so only certain events fire
        pub fn high() -> Self {
            Self {
                inner: StepRng::new(u64::MAX, 0),
                draws: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    /// a - b - c - d, all quantum, 20 units per hop, plus a classical
    /// detour b - x - d
    pub fn line_network() -> Network {
        let mut network = Network::new();
        for name in ["a", "b", "c", "d"] {
            network.add_node(Node::quantum(name)).unwrap();
        }
        network.add_node(Node::classical("x")).unwrap();
        network.add_edge(Edge::new("a", "b", 20.0)).unwrap();
        network.add_edge(Edge::new("b", "c", 20.0)).unwrap();
        network.add_edge(Edge::new("c", "d", 20.0)).unwrap();
        network.add_edge(Edge::new("b", "x", 5.0)).unwrap();
        network.add_edge(Edge::new("x", "d", 5.0)).unwrap();
        network
    }
}
