use crate::error::TheoryError;
use num_rational::Rational32;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::{Arc, LazyLock};

// Musical constants
const SEMITONES_PER_OCTAVE: u8 = 12;
const CENTS_PER_OCTAVE: f64 = 1200.0;
/// Reference pitch of the default system (A4).
pub const CONCERT_A_HZ: f64 = 440.0;

/// Musical intervals that define the distance between two notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Unison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    Tritone,
    PerfectFifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
}

impl Interval {
    /// only handles one octave
    pub fn from_semitone_interval(semitone_interval: u8) -> Self {
        match semitone_interval {
            0 => Self::Unison,
            1 => Self::MinorSecond,
            2 => Self::MajorSecond,
            3 => Self::MinorThird,
            4 => Self::MajorThird,
            5 => Self::PerfectFourth,
            6 => Self::Tritone,
            7 => Self::PerfectFifth,
            8 => Self::MinorSixth,
            9 => Self::MajorSixth,
            10 => Self::MinorSeventh,
            11 => Self::MajorSeventh,
            12 => Self::Octave,
            _ => panic!("Invalid semitone interval: {semitone_interval}"),
        }
    }

    pub fn from_semitone_wrapping(semitone_interval: i64) -> Self {
        Self::from_semitone_interval(
            semitone_interval.rem_euclid(i64::from(SEMITONES_PER_OCTAVE)) as u8,
        )
    }

    /// Returns the just intonation ratio for this interval
    pub fn just_ratio(&self) -> Rational32 {
        match self {
            Self::Unison => Rational32::new(1, 1),
            Self::MinorSecond => Rational32::new(16, 15),
            Self::MajorSecond => Rational32::new(9, 8),
            Self::MinorThird => Rational32::new(6, 5),
            Self::MajorThird => Rational32::new(5, 4),
            Self::PerfectFourth => Rational32::new(4, 3),
            Self::Tritone => Rational32::new(45, 32),
            Self::PerfectFifth => Rational32::new(3, 2),
            Self::MinorSixth => Rational32::new(8, 5),
            Self::MajorSixth => Rational32::new(5, 3),
            Self::MinorSeventh => Rational32::new(9, 5),
            Self::MajorSeventh => Rational32::new(15, 8),
            Self::Octave => Rational32::new(2, 1),
        }
    }

    /// Size of the just intonation ratio in cents
    pub fn just_cents(&self) -> f64 {
        CENTS_PER_OCTAVE * self.just_ratio().to_f64().unwrap().log2()
    }

    /// Complexity weight of this interval: the Tenney height log2(p*q)
    /// of its just intonation ratio p/q. Simpler ratios weigh less.
    pub fn complexity_weight(&self) -> f64 {
        let ratio = self.just_ratio();
        f64::from(ratio.numer() * ratio.denom()).log2()
    }

    /// Get the number of semitones in this interval
    pub fn semitones(&self) -> u8 {
        match self {
            Self::Unison => 0,
            Self::MinorSecond => 1,
            Self::MajorSecond => 2,
            Self::MinorThird => 3,
            Self::MajorThird => 4,
            Self::PerfectFourth => 5,
            Self::Tritone => 6,
            Self::PerfectFifth => 7,
            Self::MinorSixth => 8,
            Self::MajorSixth => 9,
            Self::MinorSeventh => 10,
            Self::MajorSeventh => 11,
            Self::Octave => 12,
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::Unison => "unison",
            Self::MinorSecond => "minor second",
            Self::MajorSecond => "major second",
            Self::MinorThird => "minor third",
            Self::MajorThird => "major third",
            Self::PerfectFourth => "perfect fourth",
            Self::Tritone => "tritone",
            Self::PerfectFifth => "perfect fifth",
            Self::MinorSixth => "minor sixth",
            Self::MajorSixth => "major sixth",
            Self::MinorSeventh => "minor seventh",
            Self::MajorSeventh => "major seventh",
            Self::Octave => "octave",
        };
        write!(f, "{s}")
    }
}

/// A finite cyclic set of pitch classes with a complexity weight per
/// canonical interval.
///
/// The weight table maps intervals in `[0, cardinality)` to non-negative
/// weights. It is allowed to be incomplete; looking up a missing entry
/// fails with [`TheoryError::MissingWeight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningSystem {
    reference_hz: f64,
    cardinality: u32,
    interval_to_complexity: BTreeMap<i64, f64>,
}

impl TuningSystem {
    /// Create a system from a weight table. The cardinality must be positive.
    pub fn new(
        cardinality: u32,
        interval_to_complexity: BTreeMap<i64, f64>,
    ) -> Result<Self, TheoryError> {
        if cardinality == 0 {
            return Err(TheoryError::InvalidCardinality(0));
        }
        Ok(Self {
            reference_hz: CONCERT_A_HZ,
            cardinality,
            interval_to_complexity,
        })
    }

    /// The default 12-tone equal tempered system, weighted by the just
    /// intonation ratio each chromatic step approximates.
    pub fn twelve_tet() -> Self {
        let interval_to_complexity = (0..SEMITONES_PER_OCTAVE)
            .map(|semitones| {
                let interval = Interval::from_semitone_interval(semitones);
                (i64::from(semitones), interval.complexity_weight())
            })
            .collect();
        Self {
            reference_hz: CONCERT_A_HZ,
            cardinality: u32::from(SEMITONES_PER_OCTAVE),
            interval_to_complexity,
        }
    }

    /// Number of pitch classes per period.
    pub fn cardinality(&self) -> u32 {
        self.cardinality
    }

    /// Reference pitch of the system in Hz.
    pub fn reference_hz(&self) -> f64 {
        self.reference_hz
    }

    /// Reduce an arbitrary signed interval into `[0, cardinality)`.
    ///
    /// Infallible because the cardinality is validated at construction.
    pub fn canonicalize(&self, value: i64) -> i64 {
        value.rem_euclid(i64::from(self.cardinality))
    }

    /// Look up the complexity weight of a canonical interval.
    pub fn complexity_of(&self, canonical: i64) -> Result<f64, TheoryError> {
        self.interval_to_complexity
            .get(&canonical)
            .copied()
            .ok_or(TheoryError::MissingWeight {
                interval: canonical,
            })
    }

    /// The full weight table.
    pub fn weights(&self) -> &BTreeMap<i64, f64> {
        &self.interval_to_complexity
    }
}

static DEFAULT_SYSTEM: LazyLock<Arc<TuningSystem>> =
    LazyLock::new(|| Arc::new(TuningSystem::twelve_tet()));

/// The shared process-wide default system: 12-tone equal temperament at
/// reference pitch 440, weighted from just intonation ratios. Constructed
/// once and never mutated.
pub fn default_system() -> Arc<TuningSystem> {
    Arc::clone(&DEFAULT_SYSTEM)
}
