//! Most frequent values of a sequence, counted with a [`ChainedMap`]

use crate::{chained::ChainedMap, hash};

/// Bucket count of the counting table before it grows
const INITIAL_BUCKETS: usize = 11;

/// The most frequent values of a sequence and how often they occur
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mode {
    /// Every value reaching the top frequency, in the counting table's bucket order
    pub modes: Vec<String>,
    /// Number of occurrences of each mode; 0 for an empty input
    pub frequency: usize,
}

/// Finds the values occurring most often in `values`, compared by their string form.
///
/// Ties are all reported, in the order their keys are met when scanning the counting table
/// bucket by bucket, not in input order.
///
/// ```rust
/// use primemap::find_mode;
///
/// let mode = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(mode.modes, vec!["apple".to_string()]);
/// assert_eq!(mode.frequency, 2);
/// ```
pub fn find_mode<I>(values: I) -> Mode
where
    I: IntoIterator,
    I::Item: ToString,
{
    let mut counts: ChainedMap<usize, _> =
        ChainedMap::with_hasher(INITIAL_BUCKETS, hash::weighted_char_sum);
    for value in values {
        counts.tally(value.to_string());
    }

    let mut mode = Mode::default();
    for (key, &count) in &counts {
        if count > mode.frequency {
            mode.frequency = count;
            mode.modes.clear();
            mode.modes.push(key.to_string());
        } else if count == mode.frequency {
            mode.modes.push(key.to_string());
        }
    }

    mode
}
