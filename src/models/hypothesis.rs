//! Candidate solutions of the game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ClassTag::{self, Person, Place, Weapon};

/// Structural class of a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisShape {
    /// Exactly one person, one weapon and one place.
    Complete,
    /// One of the three roles is missing.
    Incomplete,
    /// At least one role is filled more than once.
    Contradictory,
}

impl HypothesisShape {
    /// Classifies a slot layout.
    #[must_use]
    pub fn classify(slots: &[ClassTag]) -> Self {
        let counts = ClassTag::all()
            .iter()
            .map(|class| slots.iter().filter(|s| *s == class).count());
        let mut missing = false;
        for count in counts {
            if count > 1 {
                return Self::Contradictory;
            }
            missing |= count == 0;
        }
        if missing {
            Self::Incomplete
        } else {
            Self::Complete
        }
    }

    /// Returns the shape name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
            Self::Contradictory => "contradictory",
        }
    }
}

impl fmt::Display for HypothesisShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Slot layout of one hypothesis, bound to its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypothesisTemplate {
    /// Identifier appended as the last element.
    pub id: &'static str,
    /// Class sampled for each slot, in order.
    pub slots: &'static [ClassTag],
}

impl HypothesisTemplate {
    /// Structural class of the layout.
    #[must_use]
    pub fn shape(&self) -> HypothesisShape {
        HypothesisShape::classify(self.slots)
    }
}

/// Layouts of the ten hypotheses generated per game.
pub const HYPOTHESIS_TEMPLATES: [HypothesisTemplate; 10] = [
    // complete and consistent
    HypothesisTemplate {
        id: "0000",
        slots: &[Person, Weapon, Place],
    },
    HypothesisTemplate {
        id: "0001",
        slots: &[Person, Weapon, Place],
    },
    HypothesisTemplate {
        id: "0002",
        slots: &[Person, Weapon, Place],
    },
    HypothesisTemplate {
        id: "0003",
        slots: &[Person, Weapon, Place],
    },
    // incomplete
    HypothesisTemplate {
        id: "0004",
        slots: &[Person, Place],
    },
    HypothesisTemplate {
        id: "0005",
        slots: &[Weapon, Place],
    },
    HypothesisTemplate {
        id: "0006",
        slots: &[Person, Weapon],
    },
    // complete but inconsistent
    HypothesisTemplate {
        id: "0007",
        slots: &[Person, Weapon, Weapon, Place],
    },
    HypothesisTemplate {
        id: "0008",
        slots: &[Person, Weapon, Place, Place],
    },
    HypothesisTemplate {
        id: "0009",
        slots: &[Person, Person, Person, Weapon, Place, Place],
    },
];

/// A generated hypothesis: sampled entries followed by the identifier.
///
/// Serializes as a flat list of strings, which is what downstream readers of
/// the parameter store expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hypothesis(Vec<String>);

impl Hypothesis {
    /// Builds a hypothesis from its sampled entries and identifier.
    #[must_use]
    pub fn new(entries: Vec<String>, id: &str) -> Self {
        let mut items = entries;
        items.push(id.to_string());
        Self(items)
    }

    /// The identifier (last element).
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// The sampled entries, without the identifier.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        self.0.split_last().map(|(_, rest)| rest).unwrap_or_default()
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id(), self.entries().join(", "))
    }
}
