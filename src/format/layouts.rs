use super::{
    Cipher, Encoding, Endianness, Field, FieldName, Format, FormatDescriptor, LcrngSeed,
    NatureSource,
};
use crate::{rules, text::Charset};

// Gen 1/2 files are single-entry party lists: count, species, terminator, then the party
// struct followed by the OT name and nickname.
const LIST_HEADER: usize = 3;
const GB_NAME_LENGTH: usize = 11;
const PK1_PARTY_SIZE: usize = 44;
const PK2_PARTY_SIZE: usize = 48;
const PK2_EGG_SPECIES: u32 = 0xFD;

const PK1_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Species, Field::uint(LIST_HEADER, 1)),
    (FieldName::Move(0), Field::uint(LIST_HEADER + 0x08, 1)),
    (FieldName::Move(1), Field::uint(LIST_HEADER + 0x09, 1)),
    (FieldName::Move(2), Field::uint(LIST_HEADER + 0x0A, 1)),
    (FieldName::Move(3), Field::uint(LIST_HEADER + 0x0B, 1)),
    (FieldName::Experience, Field::uint(LIST_HEADER + 0x0E, 3)),
    (
        FieldName::Ivs,
        Field::new(LIST_HEADER + 0x1B, 2, Encoding::Dvs),
    ),
    (FieldName::Level, Field::uint(LIST_HEADER + 0x21, 1)),
    (
        FieldName::StoredStats,
        Field::new(LIST_HEADER + 0x22, 10, Encoding::SpecialWordStats),
    ),
    (
        FieldName::Nickname,
        Field::new(
            LIST_HEADER + PK1_PARTY_SIZE + GB_NAME_LENGTH,
            GB_NAME_LENGTH,
            Encoding::Text(Charset::GameBoy),
        ),
    ),
];

const PK2_FIELDS: &[(FieldName, Field)] = &[
    (
        FieldName::Egg,
        Field::new(1, 1, Encoding::Equals(PK2_EGG_SPECIES)),
    ),
    (FieldName::Species, Field::uint(LIST_HEADER, 1)),
    (FieldName::HeldItem, Field::uint(LIST_HEADER + 0x01, 1)),
    (FieldName::Move(0), Field::uint(LIST_HEADER + 0x02, 1)),
    (FieldName::Move(1), Field::uint(LIST_HEADER + 0x03, 1)),
    (FieldName::Move(2), Field::uint(LIST_HEADER + 0x04, 1)),
    (FieldName::Move(3), Field::uint(LIST_HEADER + 0x05, 1)),
    (FieldName::Experience, Field::uint(LIST_HEADER + 0x08, 3)),
    (
        FieldName::Ivs,
        Field::new(LIST_HEADER + 0x15, 2, Encoding::Dvs),
    ),
    (FieldName::Level, Field::uint(LIST_HEADER + 0x1F, 1)),
    (
        FieldName::StoredStats,
        Field::new(LIST_HEADER + 0x24, 12, Encoding::WordStats),
    ),
    (
        FieldName::Nickname,
        Field::new(
            LIST_HEADER + PK2_PARTY_SIZE + GB_NAME_LENGTH,
            GB_NAME_LENGTH,
            Encoding::Text(Charset::GameBoy),
        ),
    ),
];

const PK3_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Personality, Field::uint(0x00, 4)),
    (FieldName::TrainerId, Field::uint(0x04, 4)),
    (
        FieldName::Nickname,
        Field::new(0x08, 10, Encoding::Text(Charset::Gen3)),
    ),
    (FieldName::Species, Field::uint(0x20, 2)),
    (FieldName::HeldItem, Field::uint(0x22, 2)),
    (FieldName::Experience, Field::uint(0x24, 4)),
    (FieldName::Move(0), Field::uint(0x2C, 2)),
    (FieldName::Move(1), Field::uint(0x2E, 2)),
    (FieldName::Move(2), Field::uint(0x30, 2)),
    (FieldName::Move(3), Field::uint(0x32, 2)),
    (FieldName::Evs, Field::new(0x38, 6, Encoding::ByteStats)),
    (FieldName::Ivs, Field::new(0x48, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x48, 4, 30, 1)),
    (FieldName::AbilitySlot, Field::bits(0x48, 4, 31, 1)),
];

const PK4_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Personality, Field::uint(0x00, 4)),
    (FieldName::Species, Field::uint(0x08, 2)),
    (FieldName::HeldItem, Field::uint(0x0A, 2)),
    (FieldName::TrainerId, Field::uint(0x0C, 4)),
    (FieldName::Experience, Field::uint(0x10, 4)),
    (FieldName::Ability, Field::uint(0x15, 1)),
    (FieldName::Evs, Field::new(0x18, 6, Encoding::ByteStats)),
    (FieldName::Move(0), Field::uint(0x28, 2)),
    (FieldName::Move(1), Field::uint(0x2A, 2)),
    (FieldName::Move(2), Field::uint(0x2C, 2)),
    (FieldName::Move(3), Field::uint(0x2E, 2)),
    (FieldName::Ivs, Field::new(0x38, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x38, 4, 30, 1)),
    (FieldName::Gender, Field::bits(0x40, 1, 1, 2)),
    (
        FieldName::Nickname,
        Field::new(0x48, 22, Encoding::Text(Charset::Gen4)),
    ),
];

const PK5_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Personality, Field::uint(0x00, 4)),
    (FieldName::Species, Field::uint(0x08, 2)),
    (FieldName::HeldItem, Field::uint(0x0A, 2)),
    (FieldName::TrainerId, Field::uint(0x0C, 4)),
    (FieldName::Experience, Field::uint(0x10, 4)),
    (FieldName::Ability, Field::uint(0x15, 1)),
    (FieldName::Evs, Field::new(0x18, 6, Encoding::ByteStats)),
    (FieldName::Move(0), Field::uint(0x28, 2)),
    (FieldName::Move(1), Field::uint(0x2A, 2)),
    (FieldName::Move(2), Field::uint(0x2C, 2)),
    (FieldName::Move(3), Field::uint(0x2E, 2)),
    (FieldName::Ivs, Field::new(0x38, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x38, 4, 30, 1)),
    (FieldName::Gender, Field::bits(0x40, 1, 1, 2)),
    (FieldName::Nature, Field::uint(0x41, 1)),
    (
        FieldName::Nickname,
        Field::new(0x48, 22, Encoding::Text(Charset::Utf16)),
    ),
];

// Shared by Gen 6 and Gen 7.
const PK6_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Species, Field::uint(0x08, 2)),
    (FieldName::HeldItem, Field::uint(0x0A, 2)),
    (FieldName::TrainerId, Field::uint(0x0C, 4)),
    (FieldName::Experience, Field::uint(0x10, 4)),
    (FieldName::Ability, Field::uint(0x14, 1)),
    (FieldName::Personality, Field::uint(0x18, 4)),
    (FieldName::Nature, Field::uint(0x1C, 1)),
    (FieldName::Gender, Field::bits(0x1D, 1, 1, 2)),
    (FieldName::Evs, Field::new(0x1E, 6, Encoding::ByteStats)),
    (
        FieldName::Nickname,
        Field::new(0x40, 24, Encoding::Text(Charset::Utf16)),
    ),
    (FieldName::Move(0), Field::uint(0x5A, 2)),
    (FieldName::Move(1), Field::uint(0x5C, 2)),
    (FieldName::Move(2), Field::uint(0x5E, 2)),
    (FieldName::Move(3), Field::uint(0x60, 2)),
    (FieldName::Ivs, Field::new(0x74, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x74, 4, 30, 1)),
];

// The summary shows the stat nature (mints) rather than the original one at 0x20.
const PK8_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Species, Field::uint(0x08, 2)),
    (FieldName::HeldItem, Field::uint(0x0A, 2)),
    (FieldName::TrainerId, Field::uint(0x0C, 4)),
    (FieldName::Experience, Field::uint(0x10, 4)),
    (FieldName::Ability, Field::uint(0x14, 2)),
    (FieldName::Personality, Field::uint(0x1C, 4)),
    (FieldName::Nature, Field::uint(0x21, 1)),
    (FieldName::Gender, Field::bits(0x22, 1, 2, 2)),
    (FieldName::Evs, Field::new(0x26, 6, Encoding::ByteStats)),
    (
        FieldName::Nickname,
        Field::new(0x58, 26, Encoding::Text(Charset::Utf16)),
    ),
    (FieldName::Move(0), Field::uint(0x72, 2)),
    (FieldName::Move(1), Field::uint(0x74, 2)),
    (FieldName::Move(2), Field::uint(0x76, 2)),
    (FieldName::Move(3), Field::uint(0x78, 2)),
    (FieldName::Ivs, Field::new(0x8C, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x8C, 4, 30, 1)),
];

const PK9_FIELDS: &[(FieldName, Field)] = &[
    (FieldName::Species, Field::uint(0x08, 2)),
    (FieldName::HeldItem, Field::uint(0x0A, 2)),
    (FieldName::TrainerId, Field::uint(0x0C, 4)),
    (FieldName::Experience, Field::uint(0x10, 4)),
    (FieldName::Ability, Field::uint(0x14, 2)),
    (FieldName::Personality, Field::uint(0x1C, 4)),
    (FieldName::Nature, Field::uint(0x21, 1)),
    (FieldName::Gender, Field::bits(0x22, 1, 1, 2)),
    (FieldName::Evs, Field::new(0x26, 6, Encoding::ByteStats)),
    (
        FieldName::Nickname,
        Field::new(0x58, 26, Encoding::Text(Charset::Utf16)),
    ),
    (FieldName::Move(0), Field::uint(0x72, 2)),
    (FieldName::Move(1), Field::uint(0x74, 2)),
    (FieldName::Move(2), Field::uint(0x76, 2)),
    (FieldName::Move(3), Field::uint(0x78, 2)),
    (FieldName::Ivs, Field::new(0x8C, 4, Encoding::PackedIvs)),
    (FieldName::Egg, Field::bits(0x8C, 4, 30, 1)),
];

/// Indexed by `generation - 1`.
pub(super) static DESCRIPTORS: [FormatDescriptor; 9] = [
    FormatDescriptor {
        format: Format::Pk1,
        total_len: LIST_HEADER + PK1_PARTY_SIZE + 2 * GB_NAME_LENGTH,
        endianness: Endianness::Big,
        cipher: Cipher::Plain,
        fields: PK1_FIELDS,
        nature_source: NatureSource::Experience,
        species_table: Some("g1"),
        item_table: None,
        shiny_rule: rules::shiny_from_dvs,
        gender_rule: rules::gender_from_dvs,
    },
    FormatDescriptor {
        format: Format::Pk2,
        total_len: LIST_HEADER + PK2_PARTY_SIZE + 2 * GB_NAME_LENGTH,
        endianness: Endianness::Big,
        cipher: Cipher::Plain,
        fields: PK2_FIELDS,
        nature_source: NatureSource::Experience,
        species_table: None,
        item_table: Some("g2"),
        shiny_rule: rules::shiny_from_dvs,
        gender_rule: rules::gender_from_dvs,
    },
    FormatDescriptor {
        format: Format::Pk3,
        total_len: 80,
        endianness: Endianness::Little,
        cipher: Cipher::Gen3,
        fields: PK3_FIELDS,
        nature_source: NatureSource::Personality,
        species_table: Some("g3"),
        item_table: Some("g3"),
        shiny_rule: rules::shiny_below_8,
        gender_rule: rules::gender_from_personality,
    },
    FormatDescriptor {
        format: Format::Pk4,
        total_len: 136,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 32,
            seed: LcrngSeed::Checksum,
        },
        fields: PK4_FIELDS,
        nature_source: NatureSource::Personality,
        species_table: None,
        item_table: None,
        shiny_rule: rules::shiny_below_8,
        gender_rule: rules::gender_from_bits,
    },
    FormatDescriptor {
        format: Format::Pk5,
        total_len: 136,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 32,
            seed: LcrngSeed::Checksum,
        },
        fields: PK5_FIELDS,
        nature_source: NatureSource::Field,
        species_table: None,
        item_table: None,
        shiny_rule: rules::shiny_below_8,
        gender_rule: rules::gender_from_bits,
    },
    FormatDescriptor {
        format: Format::Pk6,
        total_len: 232,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 56,
            seed: LcrngSeed::EncryptionConstant,
        },
        fields: PK6_FIELDS,
        nature_source: NatureSource::Field,
        species_table: None,
        item_table: None,
        shiny_rule: rules::shiny_below_16,
        gender_rule: rules::gender_from_bits,
    },
    FormatDescriptor {
        format: Format::Pk7,
        total_len: 232,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 56,
            seed: LcrngSeed::EncryptionConstant,
        },
        fields: PK6_FIELDS,
        nature_source: NatureSource::Field,
        species_table: None,
        item_table: None,
        shiny_rule: rules::shiny_below_16,
        gender_rule: rules::gender_from_bits,
    },
    FormatDescriptor {
        format: Format::Pk8,
        total_len: 328,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 80,
            seed: LcrngSeed::EncryptionConstant,
        },
        fields: PK8_FIELDS,
        nature_source: NatureSource::Field,
        species_table: None,
        item_table: None,
        shiny_rule: rules::shiny_below_16,
        gender_rule: rules::gender_from_bits,
    },
    FormatDescriptor {
        format: Format::Pk9,
        total_len: 328,
        endianness: Endianness::Little,
        cipher: Cipher::Lcrng {
            block_size: 80,
            seed: LcrngSeed::EncryptionConstant,
        },
        fields: PK9_FIELDS,
        nature_source: NatureSource::Field,
        species_table: Some("g9"),
        item_table: None,
        shiny_rule: rules::shiny_below_16,
        gender_rule: rules::gender_from_bits,
    },
];
