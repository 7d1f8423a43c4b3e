use super::OSRBTreeMap;
use crate::raw::RawOSRBTreeMap;

impl<K, V> OSRBTreeMap<K, V> {
    /// Creates an empty map with node storage for at least `capacity` entries.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating
    /// its node storage.
    ///
    /// Removed entries free their slot for the next insertion, so capacity
    /// never shrinks while the map is in use.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
