//! Named interval collections for common chord qualities, measured in
//! semitones above the root of the default 12-tone system.

use crate::rooted::RootedIntervalCollection;

pub const MAJOR_TRIAD: &[i64] = &[0, 4, 7];
pub const MINOR_TRIAD: &[i64] = &[0, 3, 7];
pub const MAJOR_SEVENTH: &[i64] = &[0, 4, 7, 11];
pub const DOMINANT_SEVENTH: &[i64] = &[0, 4, 7, 10];
pub const MINOR_SEVENTH: &[i64] = &[0, 3, 7, 10];
pub const HALF_DIMINISHED_SEVENTH: &[i64] = &[0, 3, 6, 10];
pub const DIMINISHED_SEVENTH: &[i64] = &[0, 3, 6, 9];

/// Every named quality with its label, in roughly ascending tension.
pub const COMMON_CHORDS: &[(&str, &[i64])] = &[
    ("major triad", MAJOR_TRIAD),
    ("minor triad", MINOR_TRIAD),
    ("major seventh", MAJOR_SEVENTH),
    ("dominant seventh", DOMINANT_SEVENTH),
    ("minor seventh", MINOR_SEVENTH),
    ("half-diminished seventh", HALF_DIMINISHED_SEVENTH),
    ("diminished seventh", DIMINISHED_SEVENTH),
];

/// Build a chord voicing on the default tuning system.
pub fn voiced_at(root: i64, intervals: &[i64]) -> RootedIntervalCollection {
    RootedIntervalCollection::with_default_tuning(root, intervals.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_common_chord_scores() {
        for (name, intervals) in COMMON_CHORDS {
            let complexity = voiced_at(0, intervals).intervallic_complexity().unwrap();
            assert!(
                complexity.is_finite() && complexity > 0.0,
                "{name} scored {complexity}"
            );
        }
    }

    #[test]
    fn test_triads_score_below_seventh_chords() {
        let triad = voiced_at(0, MAJOR_TRIAD).intervallic_complexity().unwrap();
        for intervals in [MAJOR_SEVENTH, DOMINANT_SEVENTH, HALF_DIMINISHED_SEVENTH] {
            let seventh = voiced_at(0, intervals).intervallic_complexity().unwrap();
            assert!(triad < seventh);
        }
    }

    #[test]
    fn test_score_is_independent_of_root() {
        for (_, intervals) in COMMON_CHORDS {
            let low = voiced_at(0, intervals).intervallic_complexity().unwrap();
            let high = voiced_at(27, intervals).intervallic_complexity().unwrap();
            assert_eq!(low, high);
        }
    }
}
