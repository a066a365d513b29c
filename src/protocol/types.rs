use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::classical::ClassicalProtocol;
use super::error::{ProtocolError, ProtocolResult};
use super::naive::NaiveProtocol;
use super::purification::PurificationProtocol;
use crate::reliability::ReliabilityModel;
use crate::topology::{Network, Path, ResolvedPath, TopologyResult};

/// Selector for the available transmission protocols
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    /// All-or-nothing: one draw per link and per swap, no retries
    Naive,
    /// Per-link retries, then one aggregate swap-chain draw
    Purification,
    /// Classical packet forwarding over classical links
    Classical,
}

impl ProtocolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Naive => "naive",
            ProtocolKind::Purification => "purification",
            ProtocolKind::Classical => "classical",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(ProtocolKind::Naive),
            "purification" => Ok(ProtocolKind::Purification),
            "classical" => Ok(ProtocolKind::Classical),
            other => Err(ProtocolError::InvalidParameter(format!(
                "unknown protocol '{}'",
                other
            ))),
        }
    }
}

/// A single-attempt transmission model
pub trait TransmissionProtocol {
    fn kind(&self) -> ProtocolKind;

    /// Simulate one transfer over an already validated path
    fn attempt<R: Rng + ?Sized>(&self, path: &ResolvedPath<'_>, rng: &mut R) -> bool;

    /// Validate `path` against `network`, then simulate one transfer
    ///
    /// Validation errors are returned before any random draw.
    fn transmit<R: Rng + ?Sized>(
        &self,
        network: &Network,
        path: &Path,
        rng: &mut R,
    ) -> TopologyResult<bool> {
        let resolved = network.resolve(path)?;
        Ok(self.attempt(&resolved, rng))
    }
}

/// Bernoulli draw that succeeds with probability `p`
pub(crate) fn draw<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Any of the concrete protocols, dispatched statically
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Protocol {
    Naive(NaiveProtocol),
    Purification(PurificationProtocol),
    Classical(ClassicalProtocol),
}

impl Protocol {
    /// Build the protocol selected by `kind`
    ///
    /// `max_retries` only affects the purification protocol but is checked
    /// for every kind.
    pub fn new(
        kind: ProtocolKind,
        model: ReliabilityModel,
        max_retries: u32,
    ) -> ProtocolResult<Self> {
        if max_retries == 0 {
            return Err(ProtocolError::InvalidParameter(
                "max_retries must be at least 1".into(),
            ));
        }
        Ok(match kind {
            ProtocolKind::Naive => Protocol::Naive(NaiveProtocol::new(model)?),
            ProtocolKind::Purification => {
                Protocol::Purification(PurificationProtocol::new(model, max_retries)?)
            }
            ProtocolKind::Classical => Protocol::Classical(ClassicalProtocol::new(model)?),
        })
    }
}

impl TransmissionProtocol for Protocol {
    fn kind(&self) -> ProtocolKind {
        match self {
            Protocol::Naive(p) => p.kind(),
            Protocol::Purification(p) => p.kind(),
            Protocol::Classical(p) => p.kind(),
        }
    }

    fn attempt<R: Rng + ?Sized>(&self, path: &ResolvedPath<'_>, rng: &mut R) -> bool {
        match self {
            Protocol::Naive(p) => p.attempt(path, rng),
            Protocol::Purification(p) => p.attempt(path, rng),
            Protocol::Classical(p) => p.attempt(path, rng),
        }
    }
}
