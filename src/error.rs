/// Errors returned by [`OSRBTreeMap`](crate::OSRBTreeMap) queries whose answer
/// is undefined for the current contents of the map.
///
/// Every error is raised before any change is made, so a failed call leaves
/// the map exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// A structural query (`min`, `max`, `floor`, `ceiling`, `delete_min`,
    /// `delete_max`) was issued against an empty map.
    #[error("operation requires a non-empty map")]
    EmptyCollection,
    /// A rank passed to `select` was not in `0..len`.
    #[error("rank {rank} is out of range for a map of length {len}")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The length of the map at the time of the call.
        len: usize,
    },
}
