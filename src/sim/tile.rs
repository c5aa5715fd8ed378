//! Tile behavior registry
//!
//! Static table of how each tile kind transforms a marble's incoming momentum.
//! Nothing here is mutable; every lookup is a match on a closed enum.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::momentum::Momentum;
use Momentum::{NegX, NegY, PosX, PosY};

/// Output of a behavior rule: a fixed direction or a uniform pick from a set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    One(Momentum),
    AnyOf(&'static [Momentum]),
}

impl Output {
    /// Every momentum this output can produce
    pub fn candidates(&self) -> &[Momentum] {
        match self {
            Output::One(m) => std::slice::from_ref(m),
            Output::AnyOf(set) => set,
        }
    }
}

/// A conditional rule, consulted before the default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub input: Momentum,
    pub output: Output,
}

const fn rule(input: Momentum, output: Momentum) -> Rule {
    Rule {
        input,
        output: Output::One(output),
    }
}

/// How a tile redirects marbles that roll onto it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBehavior {
    pub default: Output,
    /// Checked in order, first exact match on input wins
    pub rules: &'static [Rule],
}

impl BlockBehavior {
    /// Every momentum this tile can ever emit
    pub fn possible_outputs(&self) -> Vec<Momentum> {
        let mut out: Vec<Momentum> = Vec::new();
        let all = self
            .rules
            .iter()
            .flat_map(|r| r.output.candidates())
            .chain(self.default.candidates());
        for &m in all {
            if !out.contains(&m) {
                out.push(m);
            }
        }
        out
    }
}

/// Every placeable tile type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    StraightX,
    StraightY,
    LandingPosX,
    LandingNegX,
    LandingPosY,
    LandingNegY,
    TurnPosXPosY,
    TurnPosXNegY,
    TurnNegXPosY,
    TurnNegXNegY,
    JunctionNoPosX,
    JunctionNoNegX,
    JunctionNoPosY,
    JunctionNoNegY,
    Cross,
}

// Straight pieces keep direction along their axis, pick an end when dropped on
static STRAIGHT_X: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, NegX]),
    rules: &[rule(PosX, PosX), rule(NegX, NegX)],
};
static STRAIGHT_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosY, NegY]),
    rules: &[rule(PosY, PosY), rule(NegY, NegY)],
};

static LANDING_POS_X: BlockBehavior = BlockBehavior {
    default: Output::One(PosX),
    rules: &[],
};
static LANDING_NEG_X: BlockBehavior = BlockBehavior {
    default: Output::One(NegX),
    rules: &[],
};
static LANDING_POS_Y: BlockBehavior = BlockBehavior {
    default: Output::One(PosY),
    rules: &[],
};
static LANDING_NEG_Y: BlockBehavior = BlockBehavior {
    default: Output::One(NegY),
    rules: &[],
};

// A turn with exits a and b sends -a out through b and -b out through a
static TURN_POS_X_POS_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, PosY]),
    rules: &[rule(NegX, PosY), rule(NegY, PosX)],
};
static TURN_POS_X_NEG_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, NegY]),
    rules: &[rule(NegX, NegY), rule(PosY, PosX)],
};
static TURN_NEG_X_POS_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[NegX, PosY]),
    rules: &[rule(PosX, PosY), rule(NegY, NegX)],
};
static TURN_NEG_X_NEG_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[NegX, NegY]),
    rules: &[rule(PosX, NegY), rule(PosY, NegX)],
};

// Junctions pass through any open exit; the walled side falls to the default set
static JUNCTION_NO_POS_X: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[NegX, PosY, NegY]),
    rules: &[rule(NegX, NegX), rule(PosY, PosY), rule(NegY, NegY)],
};
static JUNCTION_NO_NEG_X: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, PosY, NegY]),
    rules: &[rule(PosX, PosX), rule(PosY, PosY), rule(NegY, NegY)],
};
static JUNCTION_NO_POS_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, NegX, NegY]),
    rules: &[rule(PosX, PosX), rule(NegX, NegX), rule(NegY, NegY)],
};
static JUNCTION_NO_NEG_Y: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, NegX, PosY]),
    rules: &[rule(PosX, PosX), rule(NegX, NegX), rule(PosY, PosY)],
};

static CROSS: BlockBehavior = BlockBehavior {
    default: Output::AnyOf(&[PosX, NegX, PosY, NegY]),
    rules: &[],
};

impl TileKind {
    pub const ALL: [TileKind; 15] = [
        TileKind::StraightX,
        TileKind::StraightY,
        TileKind::LandingPosX,
        TileKind::LandingNegX,
        TileKind::LandingPosY,
        TileKind::LandingNegY,
        TileKind::TurnPosXPosY,
        TileKind::TurnPosXNegY,
        TileKind::TurnNegXPosY,
        TileKind::TurnNegXNegY,
        TileKind::JunctionNoPosX,
        TileKind::JunctionNoNegX,
        TileKind::JunctionNoPosY,
        TileKind::JunctionNoNegY,
        TileKind::Cross,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TileKind::StraightX => "straight-x",
            TileKind::StraightY => "straight-y",
            TileKind::LandingPosX => "landing-pos-x",
            TileKind::LandingNegX => "landing-neg-x",
            TileKind::LandingPosY => "landing-pos-y",
            TileKind::LandingNegY => "landing-neg-y",
            TileKind::TurnPosXPosY => "turn-pos-x-pos-y",
            TileKind::TurnPosXNegY => "turn-pos-x-neg-y",
            TileKind::TurnNegXPosY => "turn-neg-x-pos-y",
            TileKind::TurnNegXNegY => "turn-neg-x-neg-y",
            TileKind::JunctionNoPosX => "junction-no-pos-x",
            TileKind::JunctionNoNegX => "junction-no-neg-x",
            TileKind::JunctionNoPosY => "junction-no-pos-y",
            TileKind::JunctionNoNegY => "junction-no-neg-y",
            TileKind::Cross => "cross",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    pub fn behavior(&self) -> &'static BlockBehavior {
        match self {
            TileKind::StraightX => &STRAIGHT_X,
            TileKind::StraightY => &STRAIGHT_Y,
            TileKind::LandingPosX => &LANDING_POS_X,
            TileKind::LandingNegX => &LANDING_NEG_X,
            TileKind::LandingPosY => &LANDING_POS_Y,
            TileKind::LandingNegY => &LANDING_NEG_Y,
            TileKind::TurnPosXPosY => &TURN_POS_X_POS_Y,
            TileKind::TurnPosXNegY => &TURN_POS_X_NEG_Y,
            TileKind::TurnNegXPosY => &TURN_NEG_X_POS_Y,
            TileKind::TurnNegXNegY => &TURN_NEG_X_NEG_Y,
            TileKind::JunctionNoPosX => &JUNCTION_NO_POS_X,
            TileKind::JunctionNoNegX => &JUNCTION_NO_NEG_X,
            TileKind::JunctionNoPosY => &JUNCTION_NO_POS_Y,
            TileKind::JunctionNoNegY => &JUNCTION_NO_NEG_Y,
            TileKind::Cross => &CROSS,
        }
    }

    /// Default sprite for editors that don't pick their own
    pub fn default_sprite_path(&self) -> String {
        format!("sprites/{}.png", self.name())
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Look up the behavior for a block name; `None` for unknown tile types
pub fn lookup(block_name: &str) -> Option<&'static BlockBehavior> {
    TileKind::from_name(block_name).map(|kind| kind.behavior())
}

/// Resolve the momentum a marble leaves a tile with
///
/// Conditional rules win over the default. Sets are re-rolled on every call.
pub fn resolve_output<R: Rng + ?Sized>(
    input: Momentum,
    behavior: &BlockBehavior,
    rng: &mut R,
) -> Momentum {
    let selected = behavior
        .rules
        .iter()
        .find(|r| r.input == input)
        .map(|r| r.output)
        .unwrap_or(behavior.default);

    match selected {
        Output::One(m) => m,
        Output::AnyOf(set) if set.is_empty() => {
            log::warn!("Tile behavior has an empty output set, treating as 0");
            Momentum::Zero
        }
        Output::AnyOf(set) => set[rng.random_range(0..set.len())],
    }
}
