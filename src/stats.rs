//! Battle stat computation, nature modifiers and experience growth curves.

use num_derive::FromPrimitive;

use crate::decoder::RawRecord;

pub const MAX_LEVEL: u8 = 100;
pub const NATURE_COUNT: u8 = 25;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl Stats {
    pub const ZERO: Stats = Stats {
        hp: 0,
        atk: 0,
        def: 0,
        spa: 0,
        spd: 0,
        spe: 0,
    };

    pub fn from_storage_order([hp, atk, def, spe, spa, spd]: [u16; 6]) -> Self {
        Stats {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }
}

/// Stats a nature can raise or lower, in the order nature ids enumerate them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NatureStat {
    Attack = 0,
    Defense = 1,
    Speed = 2,
    SpAttack = 3,
    SpDefense = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NatureModifier {
    Lowered,
    Neutral,
    Raised,
}

impl NatureModifier {
    pub fn apply(self, value: u32) -> u32 {
        match self {
            NatureModifier::Lowered => value * 9 / 10,
            NatureModifier::Neutral => value,
            NatureModifier::Raised => value * 11 / 10,
        }
    }
}

/// Nature `n` raises stat `n / 5` and lowers stat `n % 5`; when both are the same stat the
/// nature is neutral. Unknown nature ids are neutral.
pub fn nature_modifier(nature_id: u8, stat: NatureStat) -> NatureModifier {
    if nature_id >= NATURE_COUNT {
        return NatureModifier::Neutral;
    }
    let raised = nature_id / 5;
    let lowered = nature_id % 5;
    let stat = stat as u8;
    if raised == lowered {
        NatureModifier::Neutral
    } else if stat == raised {
        NatureModifier::Raised
    } else if stat == lowered {
        NatureModifier::Lowered
    } else {
        NatureModifier::Neutral
    }
}

/// Experience curves, numbered as the games' personal data numbers them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromPrimitive)]
pub enum GrowthRate {
    #[default]
    MediumFast = 0,
    Erratic = 1,
    Fluctuating = 2,
    MediumSlow = 3,
    Fast = 4,
    Slow = 5,
}

impl GrowthRate {
    pub fn experience_for_level(self, level: u8) -> u32 {
        let n = i64::from(level.clamp(1, MAX_LEVEL));
        if n == 1 {
            return 0;
        }
        let cube = n * n * n;
        let experience = match self {
            GrowthRate::MediumFast => cube,
            GrowthRate::Erratic => match n {
                2..=49 => cube * (100 - n) / 50,
                50..=67 => cube * (150 - n) / 100,
                68..=97 => cube * ((1911 - 10 * n) / 3) / 500,
                _ => cube * (160 - n) / 100,
            },
            GrowthRate::Fluctuating => match n {
                2..=14 => cube * ((n + 1) / 3 + 24) / 50,
                15..=35 => cube * (n + 14) / 50,
                _ => cube * (n / 2 + 32) / 50,
            },
            GrowthRate::MediumSlow => 6 * cube / 5 - 15 * n * n + 100 * n - 140,
            GrowthRate::Fast => 4 * cube / 5,
            GrowthRate::Slow => 5 * cube / 4,
        };
        experience.max(0) as u32
    }

    pub fn level_for_experience(self, experience: u32) -> u8 {
        (2..=MAX_LEVEL)
            .take_while(|level| self.experience_for_level(*level) <= experience)
            .last()
            .unwrap_or(1)
    }
}

/// Stored stats win; otherwise derived, with nature applied after the first truncation.
pub fn compute_stats(record: &RawRecord, level: u8, base: &Stats) -> Stats {
    if let Some(stored) = record.stored_stats {
        return stored;
    }

    let ivs = record.ivs.unwrap_or_default();
    let evs = record.evs;
    let level = u32::from(level);
    let scaled = |base: u16, iv: u16, ev: Option<u16>| -> u32 {
        let ev_term = ev.map_or(0, |ev| u32::from(ev) / 4);
        (2 * u32::from(base) + u32::from(iv) + ev_term) * level / 100
    };
    let other = |base: u16, iv: u16, ev: Option<u16>, stat: NatureStat| -> u16 {
        let value = scaled(base, iv, ev) + 5;
        saturate(nature_modifier(record.nature_id, stat).apply(value))
    };

    let hp = if base.hp == 1 {
        // Shedinja
        1
    } else {
        saturate(scaled(base.hp, ivs.hp, evs.map(|evs| evs.hp)) + level + 10)
    };

    Stats {
        hp,
        atk: other(
            base.atk,
            ivs.atk,
            evs.map(|evs| evs.atk),
            NatureStat::Attack,
        ),
        def: other(
            base.def,
            ivs.def,
            evs.map(|evs| evs.def),
            NatureStat::Defense,
        ),
        spa: other(
            base.spa,
            ivs.spa,
            evs.map(|evs| evs.spa),
            NatureStat::SpAttack,
        ),
        spd: other(
            base.spd,
            ivs.spd,
            evs.map(|evs| evs.spd),
            NatureStat::SpDefense,
        ),
        spe: other(base.spe, ivs.spe, evs.map(|evs| evs.spe), NatureStat::Speed),
    }
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(value: u16) -> Stats {
        Stats {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    #[test]
    fn test_hp_at_level_one() {
        let record = RawRecord::default();
        let stats = compute_stats(&record, 1, &base(45));
        assert_eq!(stats.hp, 11);
    }

    #[test]
    fn test_neutral_nature_at_level_100() {
        // Hardy is neutral.
        let record = RawRecord {
            ivs: Some(Stats::ZERO),
            evs: Some(Stats::ZERO),
            ..RawRecord::default()
        };
        let stats = compute_stats(&record, 100, &base(100));
        assert_eq!(stats.atk, 205);
        assert_eq!(stats.spe, 205);
        assert_eq!(stats.hp, 200 + 100 + 10);
    }

    #[test]
    fn test_nature_raises_and_lowers() {
        // Adamant: +Atk -SpA
        let record = RawRecord {
            nature_id: 3,
            ..RawRecord::default()
        };
        let stats = compute_stats(&record, 100, &base(100));
        assert_eq!(stats.atk, 225);
        assert_eq!(stats.spa, 184);
        assert_eq!(stats.def, 205);
        assert_eq!(stats.hp, 310);
    }

    #[test]
    fn test_known_stat_line() {
        // Level 78 Adamant Garchomp, the usual worked example for the formula.
        let record = RawRecord {
            nature_id: 3,
            ivs: Some(Stats {
                hp: 24,
                atk: 12,
                def: 30,
                spa: 16,
                spd: 23,
                spe: 5,
            }),
            evs: Some(Stats {
                hp: 74,
                atk: 190,
                def: 91,
                spa: 48,
                spd: 84,
                spe: 23,
            }),
            ..RawRecord::default()
        };
        let garchomp = Stats {
            hp: 108,
            atk: 130,
            def: 95,
            spa: 80,
            spd: 85,
            spe: 102,
        };
        let stats = compute_stats(&record, 78, &garchomp);
        assert_eq!(
            stats,
            Stats {
                hp: 289,
                atk: 278,
                def: 193,
                spa: 135,
                spd: 171,
                spe: 171,
            }
        );
    }

    #[test]
    fn test_ev_term_only_when_tracked() {
        let with_evs = RawRecord {
            evs: Some(base(252)),
            ..RawRecord::default()
        };
        let without_evs = RawRecord::default();
        let with = compute_stats(&with_evs, 100, &base(100));
        let without = compute_stats(&without_evs, 100, &base(100));
        assert_eq!(with.atk, without.atk + 63);
    }

    #[test]
    fn test_stored_stats_are_returned_unchanged() {
        let stored = Stats {
            hp: 1,
            atk: 2,
            def: 3,
            spa: 4,
            spd: 5,
            spe: 6,
        };
        let record = RawRecord {
            stored_stats: Some(stored),
            nature_id: 3,
            ..RawRecord::default()
        };
        assert_eq!(compute_stats(&record, 100, &base(100)), stored);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let record = RawRecord {
            nature_id: 17,
            ivs: Some(base(31)),
            evs: Some(base(85)),
            ..RawRecord::default()
        };
        let first = compute_stats(&record, 57, &base(77));
        let second = compute_stats(&record, 57, &base(77));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shedinja_hp() {
        let stats = compute_stats(&RawRecord::default(), 100, &base(1));
        assert_eq!(stats.hp, 1);
    }

    #[test]
    fn test_nature_table() {
        // Timid: +Spe -Atk
        assert_eq!(
            nature_modifier(10, NatureStat::Speed),
            NatureModifier::Raised
        );
        assert_eq!(
            nature_modifier(10, NatureStat::Attack),
            NatureModifier::Lowered
        );
        // Serious is neutral
        assert_eq!(
            nature_modifier(12, NatureStat::Speed),
            NatureModifier::Neutral
        );
        assert_eq!(
            nature_modifier(200, NatureStat::Attack),
            NatureModifier::Neutral
        );
    }

    #[test]
    fn test_growth_rate_milestones() {
        assert_eq!(GrowthRate::MediumFast.experience_for_level(100), 1_000_000);
        assert_eq!(GrowthRate::Erratic.experience_for_level(100), 600_000);
        assert_eq!(GrowthRate::Fluctuating.experience_for_level(100), 1_640_000);
        assert_eq!(GrowthRate::MediumSlow.experience_for_level(100), 1_059_860);
        assert_eq!(GrowthRate::Fast.experience_for_level(100), 800_000);
        assert_eq!(GrowthRate::Slow.experience_for_level(100), 1_250_000);

        assert_eq!(GrowthRate::MediumSlow.experience_for_level(2), 9);
        assert_eq!(GrowthRate::Erratic.experience_for_level(2), 15);
        assert_eq!(GrowthRate::Fluctuating.experience_for_level(2), 4);
    }

    #[test]
    fn test_level_for_experience() {
        assert_eq!(GrowthRate::MediumFast.level_for_experience(0), 1);
        assert_eq!(GrowthRate::MediumFast.level_for_experience(7), 1);
        assert_eq!(GrowthRate::MediumFast.level_for_experience(8), 2);
        assert_eq!(GrowthRate::MediumFast.level_for_experience(124_999), 49);
        assert_eq!(GrowthRate::MediumFast.level_for_experience(125_000), 50);
        assert_eq!(GrowthRate::Slow.level_for_experience(u32::MAX), 100);
        assert_eq!(GrowthRate::MediumSlow.level_for_experience(8), 1);
    }
}
