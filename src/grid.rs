use crate::error::TheoryError;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

/// A fretted position: zero-based string index and fret value.
pub type GridPosition = (usize, i64);

/// Shorthand groups: bracket-, paren-, angle- or quote-delimited runs,
/// or a bare whitespace-separated run.
static GROUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[[^\]]*\]|\([^)]*\)|"[^"]*"|<[^>]*>|\S+"#).unwrap());

const DELIMITER_PAIRS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('<', '>'), ('"', '"')];

/// The grid positions named by one shorthand group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridNoteCollection {
    positions: BTreeSet<GridPosition>,
}

impl GridNoteCollection {
    pub fn new(positions: BTreeSet<GridPosition>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &BTreeSet<GridPosition> {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Display for GridNoteCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (position, (string_index, fret)) in self.positions.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({string_index}, {fret})")?;
        }
        write!(f, "}}")
    }
}

/// Parse one shorthand token, a whitespace-separated run of fret values
/// where the literal `X` marks a string with no note.
///
/// Each non-`X` value becomes a `(string_index, fret)` pair; `X` consumes a
/// string index without producing a position.
pub fn parse_positions(token: &str) -> Result<BTreeSet<GridPosition>, TheoryError> {
    let mut positions = BTreeSet::new();
    for (string_index, fret) in token.split_whitespace().enumerate() {
        if fret == "X" {
            continue;
        }
        let fret = fret
            .parse()
            .map_err(|_| TheoryError::Shorthand(format!("invalid fret value `{fret}`")))?;
        positions.insert((string_index, fret));
    }
    Ok(positions)
}

/// Parse a whole shorthand text into an ordered sequence of grid note
/// collections, one per group.
///
/// Groups are delimited by `()`, `[]`, `<>` or `""`, or stand bare between
/// whitespace. Delimiters are stripped before the interior is parsed; a
/// bare group is parsed whole.
///
/// ```
/// use interval_lab::grid;
///
/// let collections = grid::parse_shorthand("(X 5 X 5 5 5) (X X 5 7 6 7)").unwrap();
/// assert_eq!(collections.len(), 2);
/// assert_eq!(collections[0].positions().len(), 4);
/// ```
pub fn parse_shorthand(text: &str) -> Result<Vec<GridNoteCollection>, TheoryError> {
    let mut collections = Vec::new();
    for group in GROUP_PATTERN.find_iter(text) {
        let interior = strip_delimiters(group.as_str());
        collections.push(GridNoteCollection::new(parse_positions(interior)?));
    }
    debug!(
        "parsed {count} grid group(s) from shorthand",
        count = collections.len()
    );
    Ok(collections)
}

fn strip_delimiters(group: &str) -> &str {
    let mut chars = group.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if DELIMITER_PAIRS.contains(&(open, close)) => {
            &group[open.len_utf8()..group.len() - close.len_utf8()]
        }
        _ => group,
    }
}
