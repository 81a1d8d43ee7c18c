//! Nesting-path identity for instances produced by nested duplication.
//!
//! Every instance emitted by a duplication mechanism carries the index it was
//! assigned at each duplication level it passed through. That index sequence
//! is the instance's stable identity: it survives re-evaluation and does not
//! depend on the order in which instances were generated.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Maximum number of duplication levels an instance can be nested under.
pub const MAX_NESTING_DEPTH: usize = 8;

/// Marks "no nesting beyond this point" inside the backing array. Larger than
/// any legitimate index, so sentinel-terminated prefixes stay ordered.
const UNSET: i32 = i32::MAX;

/// Index data from the evaluation layer that cannot form a well-formed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InstancePathError {
    /// More nesting levels than the crate supports. Truncating instead would
    /// alias distinct instances to one identity, so the input is rejected.
    #[error("instance is nested {depth} levels deep, at most {} are supported", MAX_NESTING_DEPTH)]
    TooDeep { depth: usize },

    /// An index no duplicator can produce: negative, or the reserved
    /// terminator value.
    #[error("index {index} at nesting level {level} is not a valid duplication index")]
    InvalidIndex { index: i32, level: usize },
}

/// The nesting path of one instance: which index it was assigned at each
/// duplication level, innermost level first.
///
/// Paths are immutable values. Equality, ordering and hashing consider only
/// the real indices, never the trailing unset slots, so paths behave as
/// variable-length sequences even though their storage is fixed-size.
#[derive(Clone, Copy)]
pub struct InstancePath {
    levels: [i32; MAX_NESTING_DEPTH],
}

impl InstancePath {
    /// The path of something that is not instanced at all.
    pub const EMPTY: InstancePath = InstancePath {
        levels: [UNSET; MAX_NESTING_DEPTH],
    };

    /// Builds a path from the index assigned at each duplication level,
    /// innermost first.
    pub fn from_indices(indices: &[i32]) -> Result<InstancePath, InstancePathError> {
        if indices.len() > MAX_NESTING_DEPTH {
            return Err(InstancePathError::TooDeep {
                depth: indices.len(),
            });
        }

        let mut levels = [UNSET; MAX_NESTING_DEPTH];
        for (level, &index) in indices.iter().enumerate() {
            if index < 0 || index == UNSET {
                return Err(InstancePathError::InvalidIndex { index, level });
            }
            levels[level] = index;
        }

        Ok(InstancePath { levels })
    }

    /// Builds a path from the raw fixed-size level array attached to an
    /// instance by the evaluation layer. Slots past the first terminator are
    /// uninitialized noise in that array and are discarded here.
    pub fn from_raw_levels(
        raw: [i32; MAX_NESTING_DEPTH],
    ) -> Result<InstancePath, InstancePathError> {
        let depth = raw
            .iter()
            .position(|&value| value == UNSET)
            .unwrap_or(MAX_NESTING_DEPTH);

        InstancePath::from_indices(&raw[..depth])
    }

    /// Number of duplication levels this instance is nested under.
    pub fn depth(&self) -> usize {
        self.levels
            .iter()
            .position(|&value| value == UNSET)
            .unwrap_or(MAX_NESTING_DEPTH)
    }

    /// True for the path of an uninstanced entity.
    pub fn is_empty(&self) -> bool {
        self.levels[0] == UNSET
    }

    /// The real indices of this path, innermost first.
    pub fn indices(&self) -> &[i32] {
        &self.levels[..self.depth()]
    }

    /// Whether two instances were emitted by the same instancer.
    ///
    /// The innermost index is what distinguishes siblings, so level 0 is
    /// deliberately skipped; every level outward must match, including where
    /// the paths terminate. Uninstanced entities share an instancer with
    /// nothing, not even each other.
    pub fn is_from_same_instancer_as(&self, other: &InstancePath) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        for level in 1..MAX_NESTING_DEPTH {
            let ours = self.levels[level];
            let theirs = other.levels[level];

            if ours != theirs {
                return false;
            }
            if ours == UNSET {
                break;
            }
        }
        true
    }

    /// The path of the instancer that emitted this instance: this path with
    /// the innermost level stripped off.
    ///
    /// The empty path is its own instancer path, so repeated application
    /// reaches [`InstancePath::EMPTY`] within [`MAX_NESTING_DEPTH`] steps
    /// from any starting point.
    pub fn instancer_path(&self) -> InstancePath {
        if self.is_empty() {
            return InstancePath::EMPTY;
        }

        let mut levels = [UNSET; MAX_NESTING_DEPTH];
        levels[..MAX_NESTING_DEPTH - 1].copy_from_slice(&self.levels[1..]);
        InstancePath { levels }
    }

    /// Renders the real indices outermost-to-innermost, joined by `-`, for
    /// use as a collision-free suffix on exported object names. The empty
    /// path renders as the empty string.
    pub fn as_object_name_suffix(&self) -> String {
        self.indices()
            .iter()
            .rev()
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Order-sensitive accumulator over the real indices, stable across
    /// processes and platforms. Equal paths always produce equal hashes
    /// because trailing unset slots are never folded in.
    pub fn stable_hash(&self) -> u64 {
        let mut hash: u64 = 5381;
        for &index in self.indices() {
            hash = hash.wrapping_mul(33) ^ index as u64;
        }
        hash
    }
}

impl Default for InstancePath {
    fn default() -> InstancePath {
        InstancePath::EMPTY
    }
}

impl PartialEq for InstancePath {
    fn eq(&self, other: &InstancePath) -> bool {
        for level in 0..MAX_NESTING_DEPTH {
            let ours = self.levels[level];
            let theirs = other.levels[level];

            if ours != theirs {
                return false;
            }
            if ours == UNSET {
                break;
            }
        }
        true
    }
}

impl Eq for InstancePath {}

impl Hash for InstancePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.stable_hash());
    }
}

impl Ord for InstancePath {
    fn cmp(&self, other: &InstancePath) -> Ordering {
        for level in 0..MAX_NESTING_DEPTH {
            let ours = self.levels[level];
            let theirs = other.levels[level];

            match ours.cmp(&theirs) {
                Ordering::Equal if ours == UNSET => return Ordering::Equal,
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for InstancePath {
    fn partial_cmp(&self, other: &InstancePath) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for InstancePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "InstancePath({:?})", self.indices())
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.as_object_name_suffix())
    }
}

impl Serialize for InstancePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.indices())
    }
}

impl<'de> Deserialize<'de> for InstancePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<InstancePath, D::Error> {
        let indices = Vec::<i32>::deserialize(deserializer)?;

        InstancePath::from_indices(&indices).map_err(D::Error::custom)
    }
}
