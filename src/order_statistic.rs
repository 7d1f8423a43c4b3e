/// A zero-based rank into the sorted order of a map.
///
/// Indexing a map by `Rank` returns the value stored under the key of that
/// rank; see [`OSRBTreeMap::select`](crate::OSRBTreeMap::select) for the key
/// itself.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
