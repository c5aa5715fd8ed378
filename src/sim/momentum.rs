//! Discrete lateral momentum carried by a marble between ticks

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Lateral direction of travel. `Zero` means pure vertical fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Momentum {
    #[serde(rename = "+x")]
    PosX,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "+y")]
    PosY,
    #[serde(rename = "-y")]
    NegY,
    #[default]
    #[serde(rename = "0")]
    Zero,
}

impl Momentum {
    /// The four lateral directions, in declaration order
    pub const LATERAL: [Momentum; 4] = [
        Momentum::PosX,
        Momentum::NegX,
        Momentum::PosY,
        Momentum::NegY,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Momentum::PosX => "+x",
            Momentum::NegX => "-x",
            Momentum::PosY => "+y",
            Momentum::NegY => "-y",
            Momentum::Zero => "0",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "+x" | "x" => Some(Momentum::PosX),
            "-x" => Some(Momentum::NegX),
            "+y" | "y" => Some(Momentum::PosY),
            "-y" => Some(Momentum::NegY),
            "0" | "" => Some(Momentum::Zero),
            _ => None,
        }
    }

    /// Parse a momentum symbol, coercing anything unrecognized to `Zero`
    pub fn parse_or_zero(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Malformed momentum {:?}, treating as 0", s);
            Momentum::Zero
        })
    }

    /// Grid step for one tick of travel
    pub fn unit_vector(&self) -> IVec2 {
        match self {
            Momentum::PosX => IVec2::new(1, 0),
            Momentum::NegX => IVec2::new(-1, 0),
            Momentum::PosY => IVec2::new(0, 1),
            Momentum::NegY => IVec2::new(0, -1),
            Momentum::Zero => IVec2::ZERO,
        }
    }

    /// Travelling toward the back of the isometric view
    pub fn is_negative(&self) -> bool {
        matches!(self, Momentum::NegX | Momentum::NegY)
    }

    pub fn is_zero(&self) -> bool {
        *self == Momentum::Zero
    }
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
