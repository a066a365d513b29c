use serde::{Deserialize, Serialize};

use super::error::{ReliabilityError, ReliabilityResult};
use crate::topology::NodeKind;

/// Per-distance-unit qubit loss rate
pub const DEFAULT_QUBIT_LOSS_ALPHA: f64 = 0.05;
/// Probability that a quantum repeater's entanglement swap succeeds
pub const DEFAULT_SWAP_SUCCESS_PROBABILITY: f64 = 0.9;
/// Per-hop loss for classical links that don't carry their own value
pub const DEFAULT_CLASSICAL_PACKET_LOSS: f64 = 0.005;
/// Per-link retry budget of the purification protocol
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Probability that a qubit sent over `distance` never arrives
///
/// `1 - (1 - alpha)^distance`: zero at distance 0, non-decreasing in
/// distance and strictly below 1 for `0 < alpha < 1`.
pub fn link_loss_probability(distance: f64, alpha: f64) -> f64 {
    1.0 - link_success_probability(distance, alpha)
}

/// `(1 - alpha)^distance`
pub fn link_success_probability(distance: f64, alpha: f64) -> f64 {
    (1.0 - alpha).powf(distance)
}

/// Global reliability parameters of the hybrid network
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReliabilityModel {
    /// Qubit loss rate per distance unit, in (0, 1)
    pub alpha: f64,
    /// Entanglement swap success probability of a quantum repeater
    pub swap_success_probability: f64,
    /// Fallback per-hop packet loss for classical links
    pub classical_packet_loss: f64,
}

impl Default for ReliabilityModel {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_QUBIT_LOSS_ALPHA,
            swap_success_probability: DEFAULT_SWAP_SUCCESS_PROBABILITY,
            classical_packet_loss: DEFAULT_CLASSICAL_PACKET_LOSS,
        }
    }
}

impl ReliabilityModel {
    pub fn new(
        alpha: f64,
        swap_success_probability: f64,
        classical_packet_loss: f64,
    ) -> ReliabilityResult<Self> {
        let model = Self {
            alpha,
            swap_success_probability,
            classical_packet_loss,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_alpha(mut self, alpha: f64) -> ReliabilityResult<Self> {
        self.alpha = alpha;
        self.validate()?;
        Ok(self)
    }

    pub fn with_swap_success_probability(mut self, p: f64) -> ReliabilityResult<Self> {
        self.swap_success_probability = p;
        self.validate()?;
        Ok(self)
    }

    pub fn with_classical_packet_loss(mut self, p: f64) -> ReliabilityResult<Self> {
        self.classical_packet_loss = p;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ReliabilityResult<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ReliabilityError::InvalidParameter(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        check_probability("swap_success_probability", self.swap_success_probability)?;
        check_probability("classical_packet_loss", self.classical_packet_loss)?;
        Ok(())
    }

    pub fn link_loss_probability(&self, distance: f64) -> f64 {
        link_loss_probability(distance, self.alpha)
    }

    pub fn link_success_probability(&self, distance: f64) -> f64 {
        link_success_probability(distance, self.alpha)
    }

    /// Loss probability for a caller-supplied distance, rejecting negatives
    pub fn checked_link_loss(&self, distance: f64) -> ReliabilityResult<f64> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(ReliabilityError::InvalidParameter(format!(
                "distance must be non-negative, got {}",
                distance
            )));
        }
        Ok(self.link_loss_probability(distance))
    }

    /// Probability that a node of `kind` relays a quantum signal
    ///
    /// Classical nodes cannot relay at all, so they always break the chain.
    pub fn relay_probability(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Quantum => self.swap_success_probability,
            NodeKind::Classical => 0.0,
        }
    }

    /// Joint probability that every relay in `kinds` succeeds
    pub fn relay_chain_probability(&self, kinds: &[NodeKind]) -> f64 {
        kinds
            .iter()
            .map(|&kind| self.relay_probability(kind))
            .product()
    }
}

fn check_probability(name: &str, value: f64) -> ReliabilityResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ReliabilityError::InvalidParameter(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
