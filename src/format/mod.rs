//! Record formats and the static registry of their byte layouts.

mod layouts;

use std::{fmt, str::FromStr};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{
    error::DecodeError,
    rules::{GenderRule, ShinyRule},
    text::Charset,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Format {
    Pk1 = 1,
    Pk2 = 2,
    Pk3 = 3,
    Pk4 = 4,
    Pk5 = 5,
    Pk6 = 6,
    Pk7 = 7,
    Pk8 = 8,
    Pk9 = 9,
}

impl Format {
    pub fn generation(self) -> u8 {
        self as u8
    }

    pub fn tag(self) -> &'static str {
        match self {
            Format::Pk1 => "pk1",
            Format::Pk2 => "pk2",
            Format::Pk3 => "pk3",
            Format::Pk4 => "pk4",
            Format::Pk5 => "pk5",
            Format::Pk6 => "pk6",
            Format::Pk7 => "pk7",
            Format::Pk8 => "pk8",
            Format::Pk9 => "pk9",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Format {
    type Err = DecodeError;

    /// Accepts `pk3`, `PK3` and `.pk3`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let unsupported = || DecodeError::UnsupportedFormat {
            tag: tag.to_owned(),
        };
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        let generation = match normalized.strip_prefix("pk").map(str::as_bytes) {
            Some([digit @ b'1'..=b'9']) => digit - b'0',
            _ => return Err(unsupported()),
        };
        Format::from_u8(generation).ok_or_else(unsupported)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Reads an unsigned integer of `buf.len()` bytes (1 to 8).
    pub fn read_uint(self, buf: &[u8]) -> u64 {
        match self {
            Endianness::Little => LittleEndian::read_uint(buf, buf.len()),
            Endianness::Big => BigEndian::read_uint(buf, buf.len()),
        }
    }

    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cipher {
    Plain,
    /// XOR with `personality ^ trainer id`, 12 byte blocks shuffled by `personality % 24`.
    Gen3,
    /// Pseudo-random stream over the four blocks, which are shuffled by bits 13..18 of the
    /// first word (personality value in Gen 4/5, encryption constant afterwards).
    Lcrng { block_size: usize, seed: LcrngSeed },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcrngSeed {
    /// Gen 4/5: the checksum at 0x06.
    Checksum,
    /// Gen 6 onwards: the encryption constant at 0x00.
    EncryptionConstant,
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cipher::Plain => f.write_str("none"),
            Cipher::Gen3 => f.write_str("xor"),
            Cipher::Lcrng {
                block_size,
                seed: LcrngSeed::Checksum,
            } => write!(f, "lcrng/{block_size}"),
            Cipher::Lcrng {
                block_size,
                seed: LcrngSeed::EncryptionConstant,
            } => write!(f, "lcrng-ec/{block_size}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldName {
    Species,
    HeldItem,
    Nature,
    Ability,
    AbilitySlot,
    Move(u8),
    Experience,
    Level,
    Ivs,
    Evs,
    StoredStats,
    Egg,
    Personality,
    TrainerId,
    Gender,
    Nickname,
}

/// Interpretation of the bytes of a field. Stat arrays are listed in storage order, which is
/// HP, Atk, Def, Spe, SpA, SpD for every format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Uint,
    Bits { shift: u8, len: u8 },
    /// 1 when the integer equals the value, 0 otherwise.
    Equals(u32),
    /// Six 5-bit values packed into the low 30 bits of a word.
    PackedIvs,
    /// Gen 1/2 determinant values: four nibbles (Atk, Def, Spe, Spc), HP built from their low bits.
    Dvs,
    ByteStats,
    WordStats,
    /// Gen 1 stats, a single Special standing in for both SpA and SpD.
    SpecialWordStats,
    Text(Charset),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub width: usize,
    pub encoding: Encoding,
}

impl Field {
    pub const fn new(offset: usize, width: usize, encoding: Encoding) -> Self {
        Field {
            offset,
            width,
            encoding,
        }
    }

    pub const fn uint(offset: usize, width: usize) -> Self {
        Field::new(offset, width, Encoding::Uint)
    }

    pub const fn bits(offset: usize, width: usize, shift: u8, len: u8) -> Self {
        Field::new(offset, width, Encoding::Bits { shift, len })
    }

    pub fn end(&self) -> usize {
        self.offset + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NatureSource {
    Field,
    Personality,
    /// Gen 1/2 have no natures; transfers derive one from the experience total.
    Experience,
}

pub struct FormatDescriptor {
    pub format: Format,
    pub total_len: usize,
    pub endianness: Endianness,
    pub cipher: Cipher,
    pub fields: &'static [(FieldName, Field)],
    pub nature_source: NatureSource,
    /// Key of the internal → national species table, for formats that store internal indices.
    pub species_table: Option<&'static str>,
    /// Key of the item name table, for formats whose item ids differ from the modern list.
    pub item_table: Option<&'static str>,
    pub shiny_rule: ShinyRule,
    pub gender_rule: GenderRule,
}

impl FormatDescriptor {
    pub fn tag(&self) -> &'static str {
        self.format.tag()
    }

    pub fn field(&self, name: FieldName) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, field)| field)
    }
}

impl fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("format", &self.format)
            .field("total_len", &self.total_len)
            .field("endianness", &self.endianness)
            .field("cipher", &self.cipher)
            .field("fields", &self.fields.len())
            .finish()
    }
}

pub struct FormatRegistry;

impl FormatRegistry {
    pub fn lookup(tag: &str) -> Result<&'static FormatDescriptor, DecodeError> {
        let format = tag.parse::<Format>()?;
        Ok(Self::get(format))
    }

    pub fn get(format: Format) -> &'static FormatDescriptor {
        &layouts::DESCRIPTORS[format as usize - 1]
    }

    pub fn all() -> &'static [FormatDescriptor] {
        &layouts::DESCRIPTORS
    }

    pub fn item_tables() -> impl Iterator<Item = &'static str> {
        Self::all().iter().filter_map(|descriptor| descriptor.item_table)
    }

    pub fn species_tables() -> impl Iterator<Item = &'static str> {
        Self::all()
            .iter()
            .filter_map(|descriptor| descriptor.species_table)
    }
}
