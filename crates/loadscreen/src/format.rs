//! Display-string formatters: date stamps, synthetic readouts, identifiers.
//!
//! Everything here is cosmetic. `imperial_id` is the only formatter that must
//! be stable across runs; the others draw from the injected random source.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use engine_core::RandomSource;

/// Inclusive external temperature range (°C) per calendar month.
const MONTH_TEMPERATURE: [(i32, i32); 12] = [
    (-6, 8),
    (-5, 10),
    (0, 14),
    (6, 18),
    (10, 23),
    (14, 28),
    (17, 32),
    (18, 33),
    (12, 26),
    (7, 19),
    (1, 13),
    (-3, 9),
];

const FALLBACK_TEMPERATURE: (i32, i32) = (0, 20);

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;

/// `CYC-WW.DDMM.YY` with the ISO-8601 week of `date`.
///
/// The week comes from the ISO calendar (the Monday-based week containing the
/// date's Thursday), the year digits from the plain calendar year.
pub fn cycle_date(date: NaiveDate) -> String {
    format!(
        "CYC-{:02}.{:02}{:02}.{:02}",
        date.iso_week().week(),
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Ticker clock stamp: cycle date plus local `HH:MM`.
pub fn feed_clock(now: NaiveDateTime) -> String {
    format!(
        "CYC {} • {:02}:{:02}",
        cycle_date(now.date()),
        now.hour(),
        now.minute()
    )
}

/// Plausible outside temperature for `month` (1–12).
pub fn ambient_temperature(month: u32, rng: &mut dyn RandomSource) -> i32 {
    let (lo, hi) = month
        .checked_sub(1)
        .and_then(|i| MONTH_TEMPERATURE.get(i as usize))
        .copied()
        .unwrap_or(FALLBACK_TEMPERATURE);
    rng.range_inclusive(lo, hi)
}

pub fn format_temperature(celsius: i32) -> String {
    if celsius >= 0 {
        format!("+{}°C", celsius)
    } else {
        format!("{}°C", celsius)
    }
}

/// `TRN-XXXX-XXXX` from four random bytes.
pub fn transport_code(rng: &mut dyn RandomSource) -> String {
    let b = rng.next_u32().to_be_bytes();
    format!("TRN-{:02X}{:02X}-{:02X}{:02X}", b[0], b[1], b[2], b[3])
}

/// 32-bit FNV-1a over UTF-16 code units.
pub fn fnv1a32(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ unit as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Cosmetic `ISB-SSS / REG-RRRRRR` identifier for a player id. An empty id
/// hashes as `"0"`.
pub fn imperial_id(player_id: &str) -> String {
    let source = if player_id.is_empty() { "0" } else { player_id };
    let h = fnv1a32(source);
    let sector = h % 999;
    let registry = (h >> 8) & 0x00FF_FFFF;
    format!("ISB-{:03} / REG-{:06X}", sector, registry)
}

/// Map name as a planet label: separators become spaces, uppercased.
pub fn format_planet(map_name: Option<&str>) -> String {
    match map_name {
        Some(name) if !name.is_empty() => name.replace(['_', '-'], " ").to_uppercase(),
        _ => "UNKNOWN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{ScriptedRandom, SeededRandom};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cycle_date_uses_iso_week() {
        assert_eq!(cycle_date(date(2026, 10, 19)), "CYC-43.1910.26");
        // Sunday 3 Jan 2021 still belongs to week 53 of 2020.
        assert_eq!(cycle_date(date(2021, 1, 3)), "CYC-53.0301.21");
        // Tuesday 31 Dec 2024 is already in week 1 of 2025; year digits stay calendar.
        assert_eq!(cycle_date(date(2024, 12, 31)), "CYC-01.3112.24");
    }

    #[test]
    fn feed_clock_pads_time() {
        let now = date(2026, 3, 2).and_hms_opt(7, 5, 59).unwrap();
        assert_eq!(feed_clock(now), "CYC CYC-10.0203.26 • 07:05");
    }

    #[test]
    fn temperature_stays_in_month_range() {
        let mut rng = SeededRandom::new(11);
        for month in 1..=12u32 {
            let (lo, hi) = MONTH_TEMPERATURE[month as usize - 1];
            for _ in 0..200 {
                let t = ambient_temperature(month, &mut rng);
                assert!((lo..=hi).contains(&t), "month {} gave {}", month, t);
            }
        }
        let t = ambient_temperature(13, &mut rng);
        assert!((0..=20).contains(&t));
        let t = ambient_temperature(0, &mut rng);
        assert!((0..=20).contains(&t));
    }

    #[test]
    fn temperature_sign_formatting() {
        assert_eq!(format_temperature(12), "+12°C");
        assert_eq!(format_temperature(0), "+0°C");
        assert_eq!(format_temperature(-4), "-4°C");
    }

    #[test]
    fn transport_code_is_grouped_hex() {
        let mut rng = ScriptedRandom::new(vec![0xDEAD_BEEF]);
        assert_eq!(transport_code(&mut rng), "TRN-DEAD-BEEF");
        let mut rng = ScriptedRandom::new(vec![0x0000_0A0B]);
        assert_eq!(transport_code(&mut rng), "TRN-0000-0A0B");
    }

    #[test]
    fn imperial_id_is_stable() {
        let id = "76561197960287930";
        let first = imperial_id(id);
        for _ in 0..10 {
            assert_eq!(imperial_id(id), first);
        }
        assert!(first.starts_with("ISB-"));
        assert_eq!(first.len(), "ISB-000 / REG-000000".len());
    }

    #[test]
    fn imperial_id_known_values() {
        assert_eq!(imperial_id("0"), "ISB-975 / REG-350CA8");
        assert_eq!(imperial_id(""), imperial_id("0"));
        assert_eq!(imperial_id("76561197960287930"), "ISB-862 / REG-CA8EC4");
    }

    #[test]
    fn fnv_of_empty_is_offset_basis() {
        assert_eq!(fnv1a32(""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn planet_names() {
        assert_eq!(format_planet(Some("tatooine_dune_sea")), "TATOOINE DUNE SEA");
        assert_eq!(format_planet(Some("rp-coruscant_v2")), "RP CORUSCANT V2");
        assert_eq!(format_planet(None), "UNKNOWN");
        assert_eq!(format_planet(Some("")), "UNKNOWN");
    }
}
