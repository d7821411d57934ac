//! Read-only lookup tables: display names, personal (base stat) data and species index
//! conversions.
//!
//! The tables are loaded once from a data directory and then shared by reference for the life
//! of the process. Every file is optional; a missing file leaves its table empty (or at its
//! built-in default) and lookups degrade to empty strings and neutral personal data.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use num_traits::FromPrimitive;

use crate::{
    error::DataError,
    format::FormatRegistry,
    rules::RATIO_GENDERLESS,
    stats::{GrowthRate, Stats},
};

pub const SPECIES_FILE: &str = "species.txt";
pub const MOVES_FILE: &str = "moves.txt";
pub const ABILITIES_FILE: &str = "abilities.txt";
pub const NATURES_FILE: &str = "natures.txt";
pub const ITEMS_FILE: &str = "items.txt";
pub const PERSONAL_FILE: &str = "personal.csv";

const PERSONAL_COLUMNS: usize = 11;

const NATURE_NAMES: [&str; 25] = [
    "Hardy", "Lonely", "Brave", "Adamant", "Naughty", "Bold", "Docile", "Relaxed", "Impish",
    "Lax", "Timid", "Hasty", "Serious", "Jolly", "Naive", "Modest", "Mild", "Quiet", "Bashful",
    "Rash", "Calm", "Gentle", "Sassy", "Careful", "Quirky",
];

const GENDER_SYMBOLS: [&str; 3] = ["M", "F", "-"];

/// Per-species data the summary needs beyond the record itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonalEntry {
    pub base: Stats,
    pub gender_ratio: u8,
    pub growth: GrowthRate,
    pub abilities: [u16; 2],
}

impl PersonalEntry {
    /// Used for species the personal table does not cover.
    pub const MISSING: PersonalEntry = PersonalEntry {
        base: Stats::ZERO,
        gender_ratio: RATIO_GENDERLESS,
        growth: GrowthRate::MediumFast,
        abilities: [0, 0],
    };
}

impl Default for PersonalEntry {
    fn default() -> Self {
        PersonalEntry::MISSING
    }
}

#[derive(Clone, Debug)]
pub struct GameData {
    species: Vec<String>,
    moves: Vec<String>,
    abilities: Vec<String>,
    natures: Vec<String>,
    genders: Vec<String>,
    items: Vec<String>,
    keyed_items: HashMap<String, Vec<String>>,
    personal: Vec<PersonalEntry>,
    species_indices: HashMap<String, Vec<u16>>,
}

impl Default for GameData {
    fn default() -> Self {
        GameData::builtin()
    }
}

impl GameData {
    /// Only the tables that never change: English nature names and the gender symbols.
    pub fn builtin() -> Self {
        GameData {
            species: Vec::new(),
            moves: Vec::new(),
            abilities: Vec::new(),
            natures: NATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            genders: GENDER_SYMBOLS.iter().map(|name| name.to_string()).collect(),
            items: Vec::new(),
            keyed_items: HashMap::new(),
            personal: Vec::new(),
            species_indices: HashMap::new(),
        }
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        let mut data = GameData::builtin();

        if let Some(species) = read_table(&dir.join(SPECIES_FILE))? {
            data.species = species;
        }
        if let Some(moves) = read_table(&dir.join(MOVES_FILE))? {
            data.moves = moves;
        }
        if let Some(abilities) = read_table(&dir.join(ABILITIES_FILE))? {
            data.abilities = abilities;
        }
        if let Some(natures) = read_table(&dir.join(NATURES_FILE))? {
            data.natures = natures;
        }
        if let Some(items) = read_table(&dir.join(ITEMS_FILE))? {
            data.items = items;
        }
        for key in FormatRegistry::item_tables() {
            if let Some(items) = read_table(&dir.join(format!("items_{key}.txt")))? {
                data.keyed_items.insert(key.to_owned(), items);
            }
        }
        for key in FormatRegistry::species_tables() {
            let path = dir.join(format!("species_{key}.txt"));
            if let Some(lines) = read_table(&path)? {
                data.species_indices
                    .insert(key.to_owned(), parse_species_index(&path, &lines)?);
            }
        }
        let personal_path = dir.join(PERSONAL_FILE);
        if let Some(lines) = read_table(&personal_path)? {
            data.personal = parse_personal(&personal_path, &lines)?;
        }

        log::info!(
            "Loaded game data from {}: {} species, {} moves, {} personal entries",
            dir.display(),
            data.species.len(),
            data.moves.len(),
            data.personal.len()
        );
        Ok(data)
    }

    pub fn with_species_names(mut self, names: Vec<String>) -> Self {
        self.species = names;
        self
    }

    pub fn with_move_names(mut self, names: Vec<String>) -> Self {
        self.moves = names;
        self
    }

    pub fn with_ability_names(mut self, names: Vec<String>) -> Self {
        self.abilities = names;
        self
    }

    /// Sets the default item table, or a keyed one when `key` is given.
    pub fn with_item_names(mut self, key: Option<&str>, names: Vec<String>) -> Self {
        match key {
            Some(key) => {
                self.keyed_items.insert(key.to_owned(), names);
            }
            None => self.items = names,
        }
        self
    }

    pub fn with_personal(mut self, personal: Vec<PersonalEntry>) -> Self {
        self.personal = personal;
        self
    }

    pub fn with_species_index(mut self, key: &str, national: Vec<u16>) -> Self {
        self.species_indices.insert(key.to_owned(), national);
        self
    }

    pub fn species_names(&self) -> &[String] {
        &self.species
    }

    pub fn move_names(&self) -> &[String] {
        &self.moves
    }

    pub fn ability_names(&self) -> &[String] {
        &self.abilities
    }

    pub fn nature_names(&self) -> &[String] {
        &self.natures
    }

    pub fn gender_symbols(&self) -> &[String] {
        &self.genders
    }

    /// The keyed item table when one was loaded, otherwise the default one.
    pub fn item_names(&self, key: Option<&str>) -> &[String] {
        key.and_then(|key| self.keyed_items.get(key))
            .unwrap_or(&self.items)
    }

    pub fn personal(&self, species: u16) -> &PersonalEntry {
        self.personal
            .get(usize::from(species))
            .unwrap_or(&PersonalEntry::MISSING)
    }

    /// Converts a stored species index to its national number. Without a conversion table, or
    /// for indices the table does not cover, the stored value is returned unchanged.
    pub fn national_species(&self, key: Option<&str>, stored: u16) -> u16 {
        let Some(table) = key.and_then(|key| self.species_indices.get(key)) else {
            return stored;
        };
        match table.get(usize::from(stored)) {
            Some(national) => *national,
            None => {
                log::debug!("Species index {stored} is not covered by the {key:?} table");
                stored
            }
        }
    }
}

/// Reads a file as one entry per line. `Ok(None)` when the file does not exist.
fn read_table(path: &Path) -> Result<Option<Vec<String>>, DataError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No table at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(DataError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    Ok(Some(
        contents
            .lines()
            .map(|line| line.trim_end_matches('\r').to_owned())
            .collect(),
    ))
}

fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> DataError {
    DataError::Parse {
        path: PathBuf::from(path),
        line,
        reason: reason.into(),
    }
}

fn parse_species_index(path: &Path, lines: &[String]) -> Result<Vec<u16>, DataError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            line.trim()
                .parse::<u16>()
                .map_err(|err| parse_error(path, idx + 1, err.to_string()))
        })
        .collect()
}

/// `species,hp,atk,def,spa,spd,spe,gender,growth,ability1,ability2`, with an optional header
/// row. Species not listed keep [`PersonalEntry::MISSING`].
fn parse_personal(path: &Path, lines: &[String]) -> Result<Vec<PersonalEntry>, DataError> {
    let mut personal: Vec<PersonalEntry> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || (idx == 0 && line.starts_with("species"))
        {
            continue;
        }

        let columns = line
            .split(',')
            .map(|column| column.trim().parse::<u16>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| parse_error(path, line_number, err.to_string()))?;
        let [species, hp, atk, def, spa, spd, spe, gender, growth, ability1, ability2] =
            <[u16; PERSONAL_COLUMNS]>::try_from(columns).map_err(|columns| {
                parse_error(
                    path,
                    line_number,
                    format!("expected {PERSONAL_COLUMNS} columns, found {}", columns.len()),
                )
            })?;

        let gender_ratio = u8::try_from(gender)
            .map_err(|_| parse_error(path, line_number, format!("gender ratio {gender}")))?;
        let growth = GrowthRate::from_u16(growth)
            .ok_or_else(|| parse_error(path, line_number, format!("growth rate {growth}")))?;

        let species = usize::from(species);
        if personal.len() <= species {
            personal.resize(species + 1, PersonalEntry::MISSING);
        }
        personal[species] = PersonalEntry {
            base: Stats {
                hp,
                atk,
                def,
                spa,
                spd,
                spe,
            },
            gender_ratio,
            growth,
            abilities: [ability1, ability2],
        };
    }

    Ok(personal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_builtin_tables() {
        let data = GameData::builtin();
        assert_eq!(data.nature_names().len(), 25);
        assert_eq!(data.nature_names()[3], "Adamant");
        assert_eq!(data.gender_symbols(), ["M", "F", "-"]);
        assert!(data.species_names().is_empty());
        assert_eq!(*data.personal(25), PersonalEntry::MISSING);
    }

    #[test]
    fn test_parse_personal() {
        let path = Path::new("personal.csv");
        let csv = "species,hp,atk,def,spa,spd,spe,gender,growth,ability1,ability2\n\
                   25,35,55,40,50,50,90,127,0,9,31\n";
        let personal = parse_personal(path, &lines(csv)).unwrap();
        assert_eq!(personal.len(), 26);
        assert_eq!(personal[0], PersonalEntry::MISSING);
        assert_eq!(personal[25].base.spe, 90);
        assert_eq!(personal[25].base.spa, 50);
        assert_eq!(personal[25].gender_ratio, 127);
        assert_eq!(personal[25].abilities, [9, 31]);
    }

    #[test]
    fn test_parse_personal_rejects_bad_rows() {
        let path = Path::new("personal.csv");
        let err = parse_personal(path, &lines("1,2,3")).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 1, .. }));

        let err = parse_personal(path, &lines("1,45,49,49,65,65,45,31,9,65,0")).unwrap_err();
        assert!(err.to_string().contains("growth rate 9"));

        let err = parse_personal(path, &lines("\n1,45,49,49,65,65,45,300,3,65,0")).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_national_species() {
        let data = GameData::builtin().with_species_index("g1", vec![0, 112, 115, 32]);
        assert_eq!(data.national_species(Some("g1"), 2), 115);
        assert_eq!(data.national_species(Some("g1"), 200), 200);
        assert_eq!(data.national_species(Some("g3"), 2), 2);
        assert_eq!(data.national_species(None, 3), 3);
    }

    #[test]
    fn test_item_table_fallback() {
        let data = GameData::builtin()
            .with_item_names(None, vec!["".into(), "Master Ball".into()])
            .with_item_names(
                Some("g2"),
                vec!["".into(), "Master Ball".into(), "Ultra Ball".into()],
            );
        assert_eq!(data.item_names(Some("g2")).len(), 3);
        assert_eq!(data.item_names(Some("g3")).len(), 2);
        assert_eq!(data.item_names(None).len(), 2);
    }
}
