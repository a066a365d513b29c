//! All-or-nothing transmission
//!
//! One loss draw per hop and one swap draw per intermediate quantum node.
//! The first failure ends the attempt; nothing is retried.

use rand::Rng;

use super::error::ProtocolResult;
use super::types::{draw, ProtocolKind, TransmissionProtocol};
use crate::reliability::ReliabilityModel;
use crate::topology::{NodeKind, ResolvedPath};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaiveProtocol {
    model: ReliabilityModel,
}

impl NaiveProtocol {
    pub fn new(model: ReliabilityModel) -> ProtocolResult<Self> {
        model.validate()?;
        Ok(Self { model })
    }
}

impl TransmissionProtocol for NaiveProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Naive
    }

    fn attempt<R: Rng + ?Sized>(&self, path: &ResolvedPath<'_>, rng: &mut R) -> bool {
        let relays = path.relays();

        for (i, edge) in path.hops().iter().enumerate() {
            if draw(rng, self.model.link_loss_probability(edge.distance)) {
                return false;
            }

            // The node this hop arrives at, unless it is the destination
            match relays.get(i) {
                Some(NodeKind::Classical) => return false,
                Some(NodeKind::Quantum) => {
                    if !draw(rng, self.model.swap_success_probability) {
                        return false;
                    }
                }
                None => {}
            }
        }

        true
    }
}
