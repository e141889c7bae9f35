use std::fmt;

// ---------------------------------------------------------------------------
// Region – where a creature was introduced
// ---------------------------------------------------------------------------

/// The five regions, in generation order.
///
/// `Ord` follows declaration order, so `BTreeMap<Region, _>` iterates
/// Kanto → Unova.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Kanto,
        Region::Johto,
        Region::Hoenn,
        Region::Sinnoh,
        Region::Unova,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Kanto => "Kanto",
            Region::Johto => "Johto",
            Region::Hoenn => "Hoenn",
            Region::Sinnoh => "Sinnoh",
            Region::Unova => "Unova",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PokeType – elemental type
// ---------------------------------------------------------------------------

/// The closed vocabulary of 18 elemental types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PokeType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dark,
    Dragon,
    Steel,
    Fairy,
}

impl PokeType {
    pub const ALL: [PokeType; 18] = [
        PokeType::Normal,
        PokeType::Fire,
        PokeType::Water,
        PokeType::Electric,
        PokeType::Grass,
        PokeType::Ice,
        PokeType::Fighting,
        PokeType::Poison,
        PokeType::Ground,
        PokeType::Flying,
        PokeType::Psychic,
        PokeType::Bug,
        PokeType::Rock,
        PokeType::Ghost,
        PokeType::Dark,
        PokeType::Dragon,
        PokeType::Steel,
        PokeType::Fairy,
    ];

    /// Lower-case name as it appears in the dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            PokeType::Normal => "normal",
            PokeType::Fire => "fire",
            PokeType::Water => "water",
            PokeType::Electric => "electric",
            PokeType::Grass => "grass",
            PokeType::Ice => "ice",
            PokeType::Fighting => "fighting",
            PokeType::Poison => "poison",
            PokeType::Ground => "ground",
            PokeType::Flying => "flying",
            PokeType::Psychic => "psychic",
            PokeType::Bug => "bug",
            PokeType::Rock => "rock",
            PokeType::Ghost => "ghost",
            PokeType::Dark => "dark",
            PokeType::Dragon => "dragon",
            PokeType::Steel => "steel",
            PokeType::Fairy => "fairy",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single creature entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Display name, when the source file carries one.
    pub name: Option<String>,
    pub region: Region,
    /// One or two types, in source order.
    pub types: Vec<PokeType>,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

impl Record {
    pub fn new(region: Region, types: Vec<PokeType>, height: f64, weight: f64) -> Self {
        Record {
            name: None,
            region,
            types,
            height,
            weight,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All records in file order. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_lookup_ignores_case_and_whitespace() {
        assert_eq!(Region::from_name(" kanto "), Some(Region::Kanto));
        assert_eq!(Region::from_name("UNOVA"), Some(Region::Unova));
        assert_eq!(Region::from_name("Galar"), None);
    }

    #[test]
    fn region_order_is_generation_order() {
        let mut shuffled = vec![Region::Unova, Region::Kanto, Region::Sinnoh];
        shuffled.sort();
        assert_eq!(shuffled, vec![Region::Kanto, Region::Sinnoh, Region::Unova]);
    }

    #[test]
    fn every_type_round_trips_through_its_name() {
        for t in PokeType::ALL {
            assert_eq!(PokeType::from_name(t.as_str()), Some(t));
        }
        assert_eq!(PokeType::from_name("Fire"), Some(PokeType::Fire));
        assert_eq!(PokeType::from_name("shadow"), None);
    }
}
