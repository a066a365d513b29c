//! Retry-based link establishment ("purification")
//!
//! Phase one establishes every link independently, retrying each up to
//! `max_retries` times. Phase two decides the whole swap chain with a single
//! draw against the joint relay probability, `swap^n` for `n` quantum
//! repeaters. The aggregate draw differs from the naive protocol's per-node
//! swaps and changes the outcome distribution.

use rand::Rng;

use super::error::{ProtocolError, ProtocolResult};
use super::types::{draw, ProtocolKind, TransmissionProtocol};
use crate::reliability::{ReliabilityModel, DEFAULT_MAX_RETRIES};
use crate::topology::ResolvedPath;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurificationProtocol {
    model: ReliabilityModel,
    max_retries: u32,
}

impl PurificationProtocol {
    pub fn new(model: ReliabilityModel, max_retries: u32) -> ProtocolResult<Self> {
        if max_retries == 0 {
            return Err(ProtocolError::InvalidParameter(
                "max_retries must be at least 1".into(),
            ));
        }
        model.validate()?;
        Ok(Self { model, max_retries })
    }

    /// Purification with the default retry budget
    pub fn with_default_retries(model: ReliabilityModel) -> ProtocolResult<Self> {
        Self::new(model, DEFAULT_MAX_RETRIES)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Try to establish one link within the retry budget
    fn establish_link<R: Rng + ?Sized>(&self, distance: f64, rng: &mut R) -> bool {
        let loss = self.model.link_loss_probability(distance);
        (0..self.max_retries).any(|_| !draw(rng, loss))
    }
}

impl TransmissionProtocol for PurificationProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Purification
    }

    fn attempt<R: Rng + ?Sized>(&self, path: &ResolvedPath<'_>, rng: &mut R) -> bool {
        for edge in path.hops() {
            if !self.establish_link(edge.distance, rng) {
                return false;
            }
        }

        let relays = path.relays();
        if relays.is_empty() {
            return true;
        }
        draw(rng, self.model.relay_chain_probability(relays))
    }
}
