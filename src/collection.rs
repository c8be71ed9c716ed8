use crate::error::TheoryError;
use crate::tuning::{TuningSystem, default_system};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Capability shared by every kind of note collection: a set of absolute
/// pitch values, a duration, and the tuning system the pitches live in.
///
/// Two collections are considered equal when their note sets are equal;
/// duration and tuning system take no part in equality.
pub trait NoteSource: Display {
    /// The absolute pitch values, ascending.
    fn notes(&self) -> &BTreeSet<i64>;

    /// How long the collection is held, in seconds. 0 means unspecified.
    fn duration(&self) -> f64;

    /// The tuning system the notes belong to.
    fn tuning(&self) -> &Arc<TuningSystem>;

    /// Note-set equality across collection variants.
    fn same_notes(&self, other: &dyn NoteSource) -> bool {
        self.notes() == other.notes()
    }

    /// Render the collection as audio samples at the given sample rate.
    ///
    /// Declared capability; no implementation exists yet, so callers fail
    /// fast instead of getting silence.
    fn wave_samples(&self, _sample_rate: u32) -> Result<Vec<f32>, TheoryError> {
        Err(TheoryError::Unsupported("wave function generation"))
    }

    /// How far two collections are apart diatonically.
    ///
    /// Declared capability; no implementation exists yet.
    fn diatonic_distance(&self, _other: &dyn NoteSource) -> Result<f64, TheoryError> {
        Err(TheoryError::Unsupported("diatonic distance"))
    }
}

/// Render a note set as `{n1, n2, ...}` in ascending order.
pub(crate) fn fmt_note_set(f: &mut Formatter<'_>, notes: &BTreeSet<i64>) -> fmt::Result {
    write!(f, "{{")?;
    for (position, note) in notes.iter().enumerate() {
        if position > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{note}")?;
    }
    write!(f, "}}")
}

/// A note collection built from an explicit set of absolute pitches.
#[derive(Debug, Clone)]
pub struct ExplicitNoteCollection {
    notes: BTreeSet<i64>,
    duration: f64,
    tuning: Arc<TuningSystem>,
}

impl ExplicitNoteCollection {
    pub fn new(notes: BTreeSet<i64>, duration: f64, tuning: Arc<TuningSystem>) -> Self {
        Self {
            notes,
            duration,
            tuning,
        }
    }

    /// Indefinite duration, shared default tuning system.
    pub fn with_default_tuning(notes: BTreeSet<i64>) -> Self {
        Self::new(notes, 0.0, default_system())
    }
}

impl NoteSource for ExplicitNoteCollection {
    fn notes(&self) -> &BTreeSet<i64> {
        &self.notes
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn tuning(&self) -> &Arc<TuningSystem> {
        &self.tuning
    }
}

impl PartialEq for ExplicitNoteCollection {
    fn eq(&self, other: &Self) -> bool {
        self.notes == other.notes
    }
}

impl Eq for ExplicitNoteCollection {}

impl Display for ExplicitNoteCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_note_set(f, &self.notes)
    }
}
