use crate::collection::{NoteSource, fmt_note_set};
use crate::error::TheoryError;
use crate::tuning::{TuningSystem, default_system};
use itertools::Itertools;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// A note collection defined by a root pitch and a set of signed intervals
/// measured above it.
///
/// The intervals are stored exactly as given; they may be negative or lie
/// outside the tuning system's period. The absolute note set is derived
/// once at construction and the collection is immutable afterwards.
#[derive(Debug, Clone)]
pub struct RootedIntervalCollection {
    root: i64,
    intervals: BTreeSet<i64>,
    notes: BTreeSet<i64>,
    duration: f64,
    tuning: Arc<TuningSystem>,
}

impl RootedIntervalCollection {
    pub fn new(
        root: i64,
        intervals: BTreeSet<i64>,
        duration: f64,
        tuning: Arc<TuningSystem>,
    ) -> Self {
        let notes = derive_notes(root, &intervals);
        Self {
            root,
            intervals,
            notes,
            duration,
            tuning,
        }
    }

    /// Indefinite duration, shared default tuning system.
    pub fn with_default_tuning(root: i64, intervals: BTreeSet<i64>) -> Self {
        Self::new(root, intervals, 0.0, default_system())
    }

    /// The root pitch the intervals are measured from.
    pub fn root(&self) -> i64 {
        self.root
    }

    /// The interval set, ascending, exactly as supplied.
    pub fn intervals(&self) -> &BTreeSet<i64> {
        &self.intervals
    }

    /// The absolute note set `{root + i}`. Pure and deterministic; equal to
    /// the set derived at construction.
    pub fn generate_notes(&self) -> BTreeSet<i64> {
        derive_notes(self.root, &self.intervals)
    }

    /// Tally every interval between two members of the interval set, reduced
    /// to canonical form.
    ///
    /// Intervals are visited in ascending order, so each pairwise difference
    /// is non-negative before reduction. The tally is keyed by the canonical
    /// interval only. Built fresh on every call.
    pub fn interval_occurrences(&self) -> BTreeMap<i64, u32> {
        let mut tally = BTreeMap::new();
        for (&low, &high) in self.intervals.iter().tuple_combinations() {
            let canonical = self.tuning.canonicalize(high - low);
            *tally.entry(canonical).or_insert(0) += 1;
        }
        tally
    }

    /// The intervallic complexity: the sum over all pairwise canonical
    /// intervals of the interval's weight times its occurrence count.
    ///
    /// A collection with fewer than two intervals has no pairs and scores 0.
    /// Fails if the tuning system's table has no weight for some canonical
    /// interval that occurs.
    pub fn intervallic_complexity(&self) -> Result<f64, TheoryError> {
        let tally = self.interval_occurrences();
        debug!("canonical interval tally for {self}: {tally:?}");
        let mut complexity = 0.0;
        for (canonical, occurrences) in tally {
            let weight = self.tuning.complexity_of(canonical)?;
            complexity += weight * f64::from(occurrences);
        }
        Ok(complexity)
    }

    /// Normalize the collection: the root and every interval reduced into
    /// `[0, cardinality)`.
    ///
    /// Collections that differ only by whole-period shifts of their root or
    /// intervals normalize to the same `(root, intervals)` pair, and the
    /// operation is idempotent. The result keeps this collection's tuning
    /// system and duration.
    pub fn fundamental_representation(&self) -> Self {
        let intervals = self
            .intervals
            .iter()
            .map(|&interval| self.tuning.canonicalize(interval))
            .collect();
        Self::new(
            self.tuning.canonicalize(self.root),
            intervals,
            self.duration,
            Arc::clone(&self.tuning),
        )
    }
}

fn derive_notes(root: i64, intervals: &BTreeSet<i64>) -> BTreeSet<i64> {
    intervals.iter().map(|interval| root + interval).collect()
}

impl NoteSource for RootedIntervalCollection {
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

impl PartialEq for RootedIntervalCollection {
    fn eq(&self, other: &Self) -> bool {
        self.notes == other.notes
    }
}

impl Eq for RootedIntervalCollection {}

impl Display for RootedIntervalCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} | ", self.root)?;
        fmt_note_set(f, &self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooted(root: i64, intervals: &[i64]) -> RootedIntervalCollection {
        RootedIntervalCollection::with_default_tuning(root, intervals.iter().copied().collect())
    }

    /// Every canonical interval of a 12-tone system weighted 1.
    fn all_ones_system() -> Arc<TuningSystem> {
        let table = (0..12).map(|interval| (interval, 1.0)).collect();
        Arc::new(TuningSystem::new(12, table).unwrap())
    }

    #[test]
    fn test_generate_notes() {
        let ric = rooted(5, &[0, 4, 7, 11]);
        let expected: BTreeSet<i64> = [5, 9, 12, 16].into_iter().collect();
        assert_eq!(ric.generate_notes(), expected);
        assert_eq!(ric.notes(), &expected);
    }

    #[test]
    fn test_distinct_intervals_give_distinct_notes() {
        let ric = rooted(-7, &[-12, 0, 3, 16]);
        assert_eq!(ric.notes().len(), ric.intervals().len());
    }

    #[test]
    fn test_interval_occurrences_major_seventh_shape() {
        // Pairwise differences of {0, 4, 7, 11}: 4, 7, 11 from the root
        // member, then 3 (4..7), 7 (4..11), 4 (7..11).
        let tally = rooted(0, &[0, 4, 7, 11]).interval_occurrences();
        let expected: BTreeMap<i64, u32> = [(3, 1), (4, 2), (7, 2), (11, 1)].into_iter().collect();
        assert_eq!(tally, expected);
    }

    #[test]
    fn test_occurrences_reduce_wide_intervals() {
        // 24 - 0 spans two periods and reduces to the unison class.
        let tally = rooted(0, &[0, 24]).interval_occurrences();
        let expected: BTreeMap<i64, u32> = [(0, 1)].into_iter().collect();
        assert_eq!(tally, expected);
    }

    #[test]
    fn test_complexity_with_unit_weights() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ric = RootedIntervalCollection::new(
            0,
            [0, 4, 7, 11].into_iter().collect(),
            0.0,
            all_ones_system(),
        );
        // Six pairs, each weighted 1.
        assert_eq!(ric.intervallic_complexity().unwrap(), 6.0);
    }

    #[test]
    fn test_complexity_of_empty_and_singleton() {
        assert_eq!(rooted(3, &[]).intervallic_complexity().unwrap(), 0.0);
        assert_eq!(rooted(3, &[7]).intervallic_complexity().unwrap(), 0.0);
    }

    #[test]
    fn test_complexity_ignores_supply_order() {
        let forward = rooted(0, &[0, 4, 7, 11]);
        let backward = rooted(0, &[11, 7, 4, 0]);
        assert_eq!(
            forward.intervallic_complexity().unwrap(),
            backward.intervallic_complexity().unwrap()
        );
    }

    #[test]
    fn test_complexity_matches_hand_computed_weights() {
        let system = default_system();
        let tally = [(3_i64, 1_u32), (4, 2), (7, 2), (11, 1)];
        let expected: f64 = tally
            .iter()
            .map(|&(canonical, count)| {
                system.complexity_of(canonical).unwrap() * f64::from(count)
            })
            .sum();
        let actual = rooted(0, &[0, 4, 7, 11]).intervallic_complexity().unwrap();
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_missing_weight_surfaces() {
        let mut table = BTreeMap::new();
        table.insert(0, 0.0);
        let sparse = Arc::new(TuningSystem::new(12, table).unwrap());
        let ric =
            RootedIntervalCollection::new(0, [0, 4].into_iter().collect(), 0.0, sparse);
        assert!(matches!(
            ric.intervallic_complexity(),
            Err(TheoryError::MissingWeight { interval: 4 })
        ));
    }

    #[test]
    fn test_fundamental_representation() {
        let fundamental = rooted(13, &[-3, 1, 2, 24]).fundamental_representation();
        assert_eq!(fundamental.root(), 1);
        let expected: BTreeSet<i64> = [0, 1, 2, 9].into_iter().collect();
        assert_eq!(fundamental.intervals(), &expected);
    }

    #[test]
    fn test_fundamental_representation_is_idempotent() {
        let once = rooted(13, &[-3, 1, 2, 24]).fundamental_representation();
        let twice = once.fundamental_representation();
        assert_eq!(once.root(), twice.root());
        assert_eq!(once.intervals(), twice.intervals());
    }

    #[test]
    fn test_fundamental_representation_idempotent_outside_twelve_tet() {
        let table = (0..30).map(|interval| (interval, 1.0)).collect();
        let wide = Arc::new(TuningSystem::new(30, table).unwrap());
        let ric = RootedIntervalCollection::new(
            55,
            [-4, 25, 61].into_iter().collect(),
            0.0,
            Arc::clone(&wide),
        );
        let once = ric.fundamental_representation();
        let twice = once.fundamental_representation();
        assert_eq!(once.root(), twice.root());
        assert_eq!(once.intervals(), twice.intervals());
        assert!(Arc::ptr_eq(once.tuning(), &wide));
    }

    #[test]
    fn test_period_shifts_normalize_identically() {
        let base = rooted(2, &[0, 4, 7]);
        // Root down two periods, each interval shifted by its own multiple.
        let shifted = rooted(-22, &[12, -8, 43]);
        let a = base.fundamental_representation();
        let b = shifted.fundamental_representation();
        assert_eq!(a.root(), b.root());
        assert_eq!(a.intervals(), b.intervals());
    }

    #[test]
    fn test_display() {
        assert_eq!(rooted(5, &[11, 0, 4, 7]).to_string(), "5 | {0, 4, 7, 11}");
        assert_eq!(rooted(-2, &[]).to_string(), "-2 | {}");
    }

    #[test]
    fn test_equality_is_on_notes_only() {
        // Different roots, same absolute notes.
        let a = rooted(0, &[0, 4]);
        let b = rooted(4, &[-4, 0]);
        assert_eq!(a, b);
        assert_ne!(a, rooted(0, &[0, 3]));
    }
}
