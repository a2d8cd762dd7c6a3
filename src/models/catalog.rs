//! Game catalogs and ontology class tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suspects of the game, in registration order.
pub const PEOPLE: &[&str] = &[
    "Rev. Green",
    "Prof. Plum",
    "Col. Mustard",
    "Msr. Peacock",
    "Miss. Scarlett",
    "Mrs. White",
];

/// Probable implements, in registration order.
pub const WEAPONS: &[&str] = &[
    "Candlestick",
    "Dagger",
    "Lead Pipe",
    "Revolver",
    "Rope",
    "Spanner",
];

/// Suspected scenes of the murder, in registration order.
pub const PLACES: &[&str] = &[
    "Conservatory",
    "Lounge",
    "Kitchen",
    "Library",
    "Hall",
    "Study",
    "Ballroom",
    "Dining room",
    "Billiard room",
];

/// Identifiers attached to the ten generated hypotheses.
pub const HYPOTHESIS_IDS: &[&str] = &[
    "0000", "0001", "0002", "0003", "0004", "0005", "0006", "0007", "0008", "0009",
];

/// Ontology class an individual is asserted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassTag {
    /// Suspected person.
    Person,
    /// Probable implement.
    Weapon,
    /// Suspected scene of the murder.
    Place,
}

impl ClassTag {
    /// Returns every class tag in registration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Person, Self::Weapon, Self::Place]
    }

    /// Returns the class name as understood by the ontology.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Weapon => "WEAPON",
            Self::Place => "PLACE",
        }
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered, immutable list of individuals belonging to one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    class: ClassTag,
    param_key: &'static str,
    entries: Vec<String>,
}

impl Catalog {
    /// Creates a catalog for `class`, published under `param_key`.
    #[must_use]
    pub fn new<I, S>(class: ClassTag, param_key: &'static str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class,
            param_key,
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The suspects catalog.
    #[must_use]
    pub fn people() -> Self {
        Self::new(ClassTag::Person, "people", PEOPLE.iter().copied())
    }

    /// The weapons catalog.
    #[must_use]
    pub fn weapons() -> Self {
        Self::new(ClassTag::Weapon, "weapons", WEAPONS.iter().copied())
    }

    /// The places catalog.
    #[must_use]
    pub fn places() -> Self {
        Self::new(ClassTag::Place, "places", PLACES.iter().copied())
    }

    /// Class the entries are registered into.
    #[must_use]
    pub const fn class(&self) -> ClassTag {
        self.class
    }

    /// Parameter-store key the catalog is published under.
    #[must_use]
    pub const fn param_key(&self) -> &'static str {
        self.param_key
    }

    /// Entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three catalogs of a game, always in person, weapon, place order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    /// Suspects.
    pub people: Catalog,
    /// Implements.
    pub weapons: Catalog,
    /// Scenes.
    pub places: Catalog,
}

impl Catalogs {
    /// Returns the catalogs in registration order.
    #[must_use]
    pub fn in_order(&self) -> [&Catalog; 3] {
        [&self.people, &self.weapons, &self.places]
    }

    /// Returns the catalog for a class.
    #[must_use]
    pub const fn for_class(&self, class: ClassTag) -> &Catalog {
        match class {
            ClassTag::Person => &self.people,
            ClassTag::Weapon => &self.weapons,
            ClassTag::Place => &self.places,
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            people: Catalog::people(),
            weapons: Catalog::weapons(),
            places: Catalog::places(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        let catalogs = Catalogs::default();
        assert_eq!(catalogs.people.len(), 6);
        assert_eq!(catalogs.weapons.len(), 6);
        assert_eq!(catalogs.places.len(), 9);
    }

    #[test]
    fn test_catalog_order_and_keys() {
        let catalogs = Catalogs::default();
        let keys: Vec<_> = catalogs.in_order().iter().map(|c| c.param_key()).collect();
        assert_eq!(keys, vec!["people", "weapons", "places"]);
        assert_eq!(catalogs.people.entries()[0], "Rev. Green");
        assert_eq!(catalogs.places.entries()[8], "Billiard room");
    }

    #[test]
    fn test_for_class() {
        let catalogs = Catalogs::default();
        for class in ClassTag::all() {
            assert_eq!(catalogs.for_class(*class).class(), *class);
        }
    }

    #[test]
    fn test_class_tag_serde() {
        let json = serde_json::to_string(&ClassTag::Weapon).unwrap_or_default();
        assert_eq!(json, "\"WEAPON\"");
    }

    #[test]
    fn test_hypothesis_ids_are_unique() {
        let mut ids: Vec<_> = HYPOTHESIS_IDS.to_vec();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
