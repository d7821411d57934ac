//! Turns raw record bytes into a [`RawRecord`] by walking a format's field table.

use crate::{
    crypto,
    error::{DecodeError, Result},
    format::{Encoding, Endianness, Field, FieldName, FormatDescriptor, NatureSource},
    stats::{Stats, NATURE_COUNT},
    text::decode_text,
};

/// Every numeric field of a record, before any id is resolved to a name. Ids are kept exactly
/// as stored and may be out of range for the lookup tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub species_id: u16,
    pub held_item_id: u16,
    pub nature_id: u8,
    pub ability_id: u16,
    /// Gen 3 stores which of the species' two abilities is active instead of an id.
    pub ability_slot: Option<u8>,
    pub move_ids: [u16; 4],
    pub experience: u32,
    /// Only present in formats that store the level next to the experience.
    pub level: Option<u8>,
    pub ivs: Option<Stats>,
    pub evs: Option<Stats>,
    pub stored_stats: Option<Stats>,
    pub is_egg: bool,
    pub personality: u32,
    pub trainer_id: u32,
    pub gender_bits: Option<u8>,
    pub nickname: String,
}

enum FieldValue {
    Int(u32),
    Stats(Stats),
    Text(String),
}

pub fn decode(bytes: &[u8], descriptor: &FormatDescriptor) -> Result<RawRecord> {
    let len = descriptor.total_len;
    if bytes.len() < len {
        return Err(DecodeError::TruncatedInput {
            expected: len,
            actual: bytes.len(),
        });
    }

    let extent = crypto::cipher_extent(descriptor.cipher);
    if extent > len {
        return Err(DecodeError::CipherOverflow {
            cipher: descriptor.cipher,
            extent,
            len,
        });
    }

    let data = crypto::decrypt_if_needed(&bytes[..len], descriptor.cipher);
    let mut record = RawRecord::default();
    for (name, field) in descriptor.fields {
        let value = read_field(&data, *name, field, descriptor.endianness)?;
        record.apply(*name, value)?;
    }

    record.nature_id = match descriptor.nature_source {
        NatureSource::Field => record.nature_id,
        NatureSource::Personality => (record.personality % u32::from(NATURE_COUNT)) as u8,
        NatureSource::Experience => (record.experience % u32::from(NATURE_COUNT)) as u8,
    };

    log::debug!(
        "Decoded {} record: species {}, experience {}",
        descriptor.tag(),
        record.species_id,
        record.experience
    );
    Ok(record)
}

fn read_field(
    data: &[u8],
    name: FieldName,
    field: &Field,
    endianness: Endianness,
) -> Result<FieldValue> {
    let bytes = data
        .get(field.offset..field.end())
        .ok_or(DecodeError::FieldDecodeOverflow {
            field: name,
            offset: field.offset,
            width: field.width,
            len: data.len(),
        })?;
    let invalid = || DecodeError::InvalidDescriptor { field: name };

    let read_int = || -> Result<u32> {
        if (1..=4).contains(&bytes.len()) {
            Ok(endianness.read_uint(bytes) as u32)
        } else {
            Err(invalid())
        }
    };

    let value = match field.encoding {
        Encoding::Uint => FieldValue::Int(read_int()?),
        Encoding::Bits { shift, len } => {
            let mask = 1u32.checked_shl(len.into()).map_or(u32::MAX, |bit| bit - 1);
            let word = read_int()?.checked_shr(shift.into()).unwrap_or(0);
            FieldValue::Int(word & mask)
        }
        Encoding::Equals(expected) => FieldValue::Int((read_int()? == expected).into()),
        Encoding::PackedIvs => {
            let word = read_int()?;
            let iv = |idx: u32| ((word >> (5 * idx)) & 0b11111) as u16;
            FieldValue::Stats(Stats::from_storage_order([
                iv(0),
                iv(1),
                iv(2),
                iv(3),
                iv(4),
                iv(5),
            ]))
        }
        Encoding::Dvs => {
            let word = read_int()?;
            let dv = |shift: u32| ((word >> shift) & 0xf) as u16;
            let (atk, def, spe, spc) = (dv(12), dv(8), dv(4), dv(0));
            let hp = (atk & 1) << 3 | (def & 1) << 2 | (spe & 1) << 1 | (spc & 1);
            FieldValue::Stats(Stats {
                hp,
                atk,
                def,
                spa: spc,
                spd: spc,
                spe,
            })
        }
        Encoding::ByteStats => {
            let values: [u8; 6] = bytes.try_into().map_err(|_| invalid())?;
            FieldValue::Stats(Stats::from_storage_order(values.map(u16::from)))
        }
        Encoding::WordStats => {
            if bytes.len() != 12 {
                return Err(invalid());
            }
            let mut values = [0u16; 6];
            for (value, word) in values.iter_mut().zip(bytes.chunks_exact(2)) {
                *value = endianness.read_u16(word);
            }
            FieldValue::Stats(Stats::from_storage_order(values))
        }
        Encoding::SpecialWordStats => {
            if bytes.len() != 10 {
                return Err(invalid());
            }
            let word = |idx: usize| endianness.read_u16(&bytes[2 * idx..2 * idx + 2]);
            FieldValue::Stats(Stats {
                hp: word(0),
                atk: word(1),
                def: word(2),
                spe: word(3),
                spa: word(4),
                spd: word(4),
            })
        }
        Encoding::Text(charset) => FieldValue::Text(decode_text(bytes, charset)),
    };
    Ok(value)
}

impl RawRecord {
    fn apply(&mut self, name: FieldName, value: FieldValue) -> Result<()> {
        // Integer fields are truncated to the width of the record member they land in.
        match (name, value) {
            (FieldName::Species, FieldValue::Int(value)) => self.species_id = value as u16,
            (FieldName::HeldItem, FieldValue::Int(value)) => self.held_item_id = value as u16,
            (FieldName::Nature, FieldValue::Int(value)) => self.nature_id = value as u8,
            (FieldName::Ability, FieldValue::Int(value)) => self.ability_id = value as u16,
            (FieldName::AbilitySlot, FieldValue::Int(value)) => {
                self.ability_slot = Some(value as u8)
            }
            (FieldName::Move(idx), FieldValue::Int(value)) if usize::from(idx) < 4 => {
                self.move_ids[usize::from(idx)] = value as u16
            }
            (FieldName::Experience, FieldValue::Int(value)) => self.experience = value,
            (FieldName::Level, FieldValue::Int(value)) => self.level = Some(value as u8),
            (FieldName::Ivs, FieldValue::Stats(stats)) => self.ivs = Some(stats),
            (FieldName::Evs, FieldValue::Stats(stats)) => self.evs = Some(stats),
            (FieldName::StoredStats, FieldValue::Stats(stats)) => self.stored_stats = Some(stats),
            (FieldName::Egg, FieldValue::Int(value)) => self.is_egg = value != 0,
            (FieldName::Personality, FieldValue::Int(value)) => self.personality = value,
            (FieldName::TrainerId, FieldValue::Int(value)) => self.trainer_id = value,
            (FieldName::Gender, FieldValue::Int(value)) => self.gender_bits = Some(value as u8),
            (FieldName::Nickname, FieldValue::Text(text)) => self.nickname = text,
            (field, _) => return Err(DecodeError::InvalidDescriptor { field }),
        }
        Ok(())
    }
}
