//! The response model and the pipeline that produces it.

use serde::{Deserialize, Serialize};

use crate::{
    data::GameData,
    decoder::{self, RawRecord},
    error::Result,
    format::FormatRegistry,
    resolver::resolve,
    stats::{compute_stats, Stats},
};

/// Normalized view of a record, serialized with the field names clients expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The species name unless the creature was renamed.
    pub nickname: String,
    /// National dex number.
    pub species: u16,
    pub held_item: String,
    /// `M`, `F` or `-`.
    pub gender: String,
    pub nature: String,
    pub ability: String,
    pub is_egg: bool,
    pub moves: [String; 4],
    pub level: u8,
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
    pub is_shiny: bool,
}

/// Display names already looked up for a record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedStrings {
    pub species: String,
    pub held_item: String,
    pub gender: String,
    pub nature: String,
    pub ability: String,
    pub moves: [String; 4],
}

/// Values derived from the record and personal data rather than read directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryFlags {
    pub species: u16,
    pub level: u8,
    pub is_shiny: bool,
}

pub fn assemble(
    record: &RawRecord,
    stats: Stats,
    strings: ResolvedStrings,
    flags: SummaryFlags,
) -> Summary {
    Summary {
        nickname: if record.nickname.is_empty() {
            strings.species
        } else {
            record.nickname.clone()
        },
        species: flags.species,
        held_item: strings.held_item,
        gender: strings.gender,
        nature: strings.nature,
        ability: strings.ability,
        is_egg: record.is_egg,
        moves: strings.moves,
        level: flags.level,
        hp: stats.hp,
        atk: stats.atk,
        def: stats.def,
        spa: stats.spa,
        spd: stats.spd,
        spe: stats.spe,
        is_shiny: flags.is_shiny,
    }
}

/// Decodes `bytes` as a record of the format named by `tag` and summarizes it.
pub fn summarize(bytes: &[u8], tag: &str, data: &GameData) -> Result<Summary> {
    let descriptor = FormatRegistry::lookup(tag)?;
    let record = decoder::decode(bytes, descriptor)?;

    let species = data.national_species(descriptor.species_table, record.species_id);
    let personal = data.personal(species);
    let level = record
        .level
        .unwrap_or_else(|| personal.growth.level_for_experience(record.experience));
    let stats = compute_stats(&record, level, &personal.base);
    let gender = (descriptor.gender_rule)(&record, personal.gender_ratio);
    let ability = match record.ability_slot {
        Some(slot) => personal.abilities[usize::from(slot & 1)],
        None => record.ability_id,
    };

    let strings = ResolvedStrings {
        species: resolve(data.species_names(), species).to_owned(),
        held_item: resolve(data.item_names(descriptor.item_table), record.held_item_id).to_owned(),
        gender: resolve(data.gender_symbols(), gender.index() as i64).to_owned(),
        nature: resolve(data.nature_names(), record.nature_id).to_owned(),
        ability: resolve(data.ability_names(), ability).to_owned(),
        moves: record
            .move_ids
            .map(|move_id| resolve(data.move_names(), move_id).to_owned()),
    };
    let flags = SummaryFlags {
        species,
        level,
        is_shiny: (descriptor.shiny_rule)(&record),
    };

    log::debug!(
        "Summarized {tag} record: species {species}, level {level}, shiny {}",
        flags.is_shiny
    );
    Ok(assemble(&record, stats, strings, flags))
}
