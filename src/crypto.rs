//! Undoes the encryption and block shuffling applied to Gen 3+ records.
//!
//! Files exported by save editors are usually already decrypted, but records pulled straight
//! out of a save are not. A record is treated as plaintext when its stored checksum matches
//! the data; otherwise it is decrypted into an owned copy.

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};

use crate::format::{Cipher, LcrngSeed};

const PK3_HEADER_SIZE: usize = 32;
const PK3_BLOCK_SIZE: usize = 12;
const PK3_CHECKSUM_OFFSET: usize = 0x1C;
const LCRNG_HEADER_SIZE: usize = 8;
const LCRNG_CHECKSUM_OFFSET: usize = 0x06;
const LCRNG_MULTIPLIER: u32 = 0x41C6_4E6D;
const LCRNG_INCREMENT: u32 = 0x6073;

/// For each of the 24 shuffle orders, the stored position of logical blocks A, B, C and D.
const BLOCK_POSITION: [[usize; 4]; 24] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 2, 1, 3],
    [0, 3, 1, 2],
    [0, 2, 3, 1],
    [0, 3, 2, 1],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [2, 0, 1, 3],
    [3, 0, 1, 2],
    [2, 0, 3, 1],
    [3, 0, 2, 1],
    [1, 2, 0, 3],
    [1, 3, 0, 2],
    [2, 1, 0, 3],
    [3, 1, 0, 2],
    [2, 3, 0, 1],
    [3, 2, 0, 1],
    [1, 2, 3, 0],
    [1, 3, 2, 0],
    [2, 1, 3, 0],
    [3, 1, 2, 0],
    [2, 3, 1, 0],
    [3, 2, 1, 0],
];

/// Bytes a record needs for `cipher` to check and decrypt it.
pub fn cipher_extent(cipher: Cipher) -> usize {
    match cipher {
        Cipher::Plain => 0,
        Cipher::Gen3 => PK3_HEADER_SIZE + 4 * PK3_BLOCK_SIZE,
        Cipher::Lcrng { block_size, .. } => LCRNG_HEADER_SIZE + 4 * block_size,
    }
}

/// Returns the record in plaintext, unshuffled form. `data` must be at least
/// [`cipher_extent`] bytes long.
pub fn decrypt_if_needed(data: &[u8], cipher: Cipher) -> Cow<'_, [u8]> {
    match cipher {
        Cipher::Plain => Cow::Borrowed(data),
        Cipher::Gen3 => {
            if pk3_checksum_matches(data) {
                Cow::Borrowed(data)
            } else {
                log::debug!("Checksum mismatch on a Gen 3 record, decrypting");
                let mut owned = data.to_owned();
                decrypt_pk3(&mut owned);
                Cow::Owned(owned)
            }
        }
        Cipher::Lcrng { block_size, seed } => {
            if lcrng_checksum_matches(data, block_size) {
                Cow::Borrowed(data)
            } else {
                log::debug!("Checksum mismatch on a {block_size} byte block record, decrypting");
                let mut owned = data.to_owned();
                decrypt_lcrng(&mut owned, block_size, seed);
                Cow::Owned(owned)
            }
        }
    }
}

/// Index into [`BLOCK_POSITION`] for Gen 4+ records.
pub fn shuffle_value(key: u32) -> usize {
    (((key >> 13) & 0x1F) % 24) as usize
}

pub fn block_positions(shuffle_value: usize) -> [usize; 4] {
    BLOCK_POSITION[shuffle_value % 24]
}

/// Sum of the little endian words of `region`.
pub fn checksum(region: &[u8]) -> u16 {
    region
        .chunks_exact(2)
        .fold(0u16, |sum, word| sum.wrapping_add(LittleEndian::read_u16(word)))
}

/// XORs `region` with the Gen 4+ pseudo-random stream. Applying it twice is a no-op.
pub fn crypt_lcrng(region: &mut [u8], seed: u32) {
    let mut seed = seed;
    for word in region.chunks_exact_mut(2) {
        seed = seed
            .wrapping_mul(LCRNG_MULTIPLIER)
            .wrapping_add(LCRNG_INCREMENT);
        let value = LittleEndian::read_u16(word) ^ (seed >> 16) as u16;
        LittleEndian::write_u16(word, value);
    }
}

/// XORs the Gen 3 data region with `personality ^ trainer id`. Applying it twice is a no-op.
pub fn crypt_pk3(pk3_data: &mut [u8]) {
    let personality_value = LittleEndian::read_u32(&pk3_data[0..4]);
    let original_trainer_id = LittleEndian::read_u32(&pk3_data[4..8]);
    let mut key = [0u8; 4];
    LittleEndian::write_u32(&mut key, personality_value ^ original_trainer_id);

    let region_end = PK3_HEADER_SIZE + 4 * PK3_BLOCK_SIZE;
    for word in pk3_data[PK3_HEADER_SIZE..region_end].chunks_exact_mut(4) {
        for (byte, key_byte) in word.iter_mut().zip(key) {
            *byte ^= key_byte;
        }
    }
}

fn pk3_checksum_matches(data: &[u8]) -> bool {
    let region_end = PK3_HEADER_SIZE + 4 * PK3_BLOCK_SIZE;
    let stored = LittleEndian::read_u16(&data[PK3_CHECKSUM_OFFSET..PK3_CHECKSUM_OFFSET + 2]);
    checksum(&data[PK3_HEADER_SIZE..region_end]) == stored
}

fn lcrng_checksum_matches(data: &[u8], block_size: usize) -> bool {
    let region_end = LCRNG_HEADER_SIZE + 4 * block_size;
    let stored = LittleEndian::read_u16(&data[LCRNG_CHECKSUM_OFFSET..LCRNG_CHECKSUM_OFFSET + 2]);
    checksum(&data[LCRNG_HEADER_SIZE..region_end]) == stored
}

fn decrypt_pk3(pk3_data: &mut [u8]) {
    crypt_pk3(pk3_data);
    let personality_value = LittleEndian::read_u32(&pk3_data[0..4]);
    unshuffle(
        pk3_data,
        PK3_HEADER_SIZE,
        PK3_BLOCK_SIZE,
        (personality_value % 24) as usize,
    );
}

fn decrypt_lcrng(data: &mut [u8], block_size: usize, seed: LcrngSeed) {
    let region_end = LCRNG_HEADER_SIZE + 4 * block_size;
    let key = LittleEndian::read_u32(&data[0..4]);
    let seed = match seed {
        LcrngSeed::Checksum => LittleEndian::read_u16(
            &data[LCRNG_CHECKSUM_OFFSET..LCRNG_CHECKSUM_OFFSET + 2],
        )
        .into(),
        LcrngSeed::EncryptionConstant => key,
    };
    crypt_lcrng(&mut data[LCRNG_HEADER_SIZE..region_end], seed);
    unshuffle(data, LCRNG_HEADER_SIZE, block_size, shuffle_value(key));
}

fn unshuffle(data: &mut [u8], start: usize, block_size: usize, shuffle_value: usize) {
    let shuffled = data[start..start + 4 * block_size].to_vec();
    for (block, position) in block_positions(shuffle_value).into_iter().enumerate() {
        let src = &shuffled[position * block_size..(position + 1) * block_size];
        let dest = start + block * block_size;
        data[dest..dest + block_size].copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_positions_are_permutations() {
        for positions in BLOCK_POSITION {
            let mut sorted = positions;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_zeroed_records_are_plaintext() {
        let data = [0u8; 136];
        assert!(matches!(
            decrypt_if_needed(
                &data,
                Cipher::Lcrng {
                    block_size: 32,
                    seed: LcrngSeed::Checksum
                }
            ),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            decrypt_if_needed(&data[..80], Cipher::Gen3),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_lcrng_stream_is_symmetric() {
        let original: Vec<u8> = (0..64).collect();
        let mut data = original.clone();
        crypt_lcrng(&mut data, 0xBEEF);
        assert_ne!(data, original);
        crypt_lcrng(&mut data, 0xBEEF);
        assert_eq!(data, original);
    }

    #[test]
    fn test_lcrng_keystream() {
        let mut data = [0u8; 8];
        crypt_lcrng(&mut data, 0x1234_5678);
        assert_eq!(data, [0x71, 0x0b, 0xea, 0x84, 0x8a, 0xd9, 0xe0, 0xf4]);
    }

    #[test]
    fn test_gen6_records_are_seeded_by_encryption_constant() {
        let cipher = Cipher::Lcrng {
            block_size: 56,
            seed: LcrngSeed::EncryptionConstant,
        };
        let mut plain = vec![0u8; 232];
        // Shuffle value 0 keeps the block order, so only the stream applies.
        plain[0..4].copy_from_slice(&0x0000_0001u32.to_le_bytes());
        plain[8..10].copy_from_slice(&25u16.to_le_bytes());
        let checksum = checksum(&plain[8..232]);
        plain[6..8].copy_from_slice(&checksum.to_le_bytes());

        let mut encrypted = plain.clone();
        crypt_lcrng(&mut encrypted[8..232], 1);
        assert_eq!(decrypt_if_needed(&encrypted, cipher).as_ref(), &plain[..]);
    }

    #[test]
    fn test_cipher_extent() {
        assert_eq!(cipher_extent(Cipher::Plain), 0);
        assert_eq!(cipher_extent(Cipher::Gen3), 80);
        for (block_size, len) in [(32, 136), (56, 232), (80, 328)] {
            let cipher = Cipher::Lcrng {
                block_size,
                seed: LcrngSeed::Checksum,
            };
            assert_eq!(cipher_extent(cipher), len);
        }
    }

    #[test]
    fn test_unshuffle_restores_block_order() {
        // Shuffle value 3 stores the blocks as A, C, D, B.
        let mut data = vec![0xAA, 0xCC, 0xDD, 0xBB];
        unshuffle(&mut data, 0, 1, 3);
        assert_eq!(data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_checksum_wraps() {
        assert_eq!(checksum(&[0xFF, 0xFF, 0x02, 0x00]), 0x0001);
    }
}
