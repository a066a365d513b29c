//! Classical packet forwarding
//!
//! Per-hop packet losses add up along the path and the whole transfer is
//! decided by one draw. Hops without their own loss figure fall back to the
//! model's `classical_packet_loss`.

use rand::Rng;

use super::error::ProtocolResult;
use super::types::{draw, ProtocolKind, TransmissionProtocol};
use crate::reliability::ReliabilityModel;
use crate::topology::ResolvedPath;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalProtocol {
    model: ReliabilityModel,
}

impl ClassicalProtocol {
    pub fn new(model: ReliabilityModel) -> ProtocolResult<Self> {
        model.validate()?;
        Ok(Self { model })
    }

    /// Combined loss probability of the path, capped at 1
    pub fn path_loss_probability(&self, path: &ResolvedPath<'_>) -> f64 {
        path.hops()
            .iter()
            .map(|edge| {
                edge.packet_loss_probability
                    .unwrap_or(self.model.classical_packet_loss)
            })
            .sum::<f64>()
            .min(1.0)
    }
}

impl TransmissionProtocol for ClassicalProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Classical
    }

    fn attempt<R: Rng + ?Sized>(&self, path: &ResolvedPath<'_>, rng: &mut R) -> bool {
        !draw(rng, self.path_loss_probability(path))
    }
}
