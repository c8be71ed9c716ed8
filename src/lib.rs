#![warn(clippy::all, rust_2018_idioms)]

//! Note collections and intervallic complexity in parameterizable tuning
//! systems.

pub mod chords;
mod collection;
mod error;
pub mod grid;
pub mod pitch_class;
mod rooted;
mod tuning;

pub use collection::{ExplicitNoteCollection, NoteSource};
pub use error::TheoryError;
pub use rooted::RootedIntervalCollection;
pub use tuning::{CONCERT_A_HZ, Interval, TuningSystem, default_system};
