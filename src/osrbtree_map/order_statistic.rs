use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OSRBTreeMap;
use crate::{Error, Rank};

impl<K, V> OSRBTreeMap<K, V> {
    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is zero-based: `select(0)` is the smallest key and
    /// `select(len - 1)` the largest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..999).map(|k| (k, ())).collect();
    /// assert_eq!(map.select(500), Ok(&500));
    /// assert_eq!(map.select(999), Err(Error::RankOutOfRange { rank: 999, len: 999 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K, Error> {
        self.raw
            .select(rank)
            .map(|h| self.raw.node(h).key())
            .ok_or_else(|| Error::RankOutOfRange { rank, len: self.len() })
    }

    /// Returns the key-value pair at position `rank` in sorted order, or
    /// `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// break the ordering of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }

    /// Removes the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let mut map = OSRBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(Error::EmptyCollection));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V), Error> {
        self.pop_first().ok_or(Error::EmptyCollection)
    }

    /// Removes the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete_max(&mut self) -> Result<(K, V), Error> {
        self.pop_last().ok_or(Error::EmptyCollection)
    }

    /// Removes and returns the first element in the map.
    /// The key of this element is the minimum key that was in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// while let Some((key, _val)) = map.pop_first() {
    ///     assert!(map.iter().all(|(k, _v)| *k > key));
    /// }
    /// assert!(map.is_empty());
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.pop_first()
    }

    /// Removes and returns the last element in the map.
    /// The key of this element is the maximum key that was in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.pop_last()
    }
}

impl<K: Ord, V> OSRBTreeMap<K, V> {
    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` does not need to be present. For a present key this is its
    /// zero-based position, so `rank(select(i)) == i` for every `i < len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..999).map(|k| (k * 10, ())).collect();
    /// assert_eq!(map.rank(&500), 50);
    /// assert_eq!(map.rank(&503), 51);
    /// assert_eq!(map.rank(&100_000), 999);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the zero-based rank of `key`, or `None` if the key is not
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&25), None);
    /// ```
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }

    /// Returns the largest key less than or equal to `key`, or `None` if every
    /// key in the map is greater.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..999).map(|k| (k * 10, ())).collect();
    /// assert_eq!(map.floor(&503), Ok(Some(&500)));
    /// assert_eq!(map.floor(&500), Ok(Some(&500)));
    ///
    /// let map = OSRBTreeMap::from([(5, ())]);
    /// assert_eq!(map.floor(&4), Ok(None));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.raw.floor(key).map(|h| self.raw.node(h).key()))
    }

    /// Returns the smallest key greater than or equal to `key`, or `None` if
    /// every key in the map is smaller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..999).map(|k| (k * 10, ())).collect();
    /// assert_eq!(map.ceiling(&503), Ok(Some(&510)));
    /// assert_eq!(map.ceiling(&10_000), Ok(None));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<Option<&K>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.raw.ceiling(key).map(|h| self.raw.node(h).key()))
    }
}

impl<K, V> Index<Rank> for OSRBTreeMap<K, V> {
    type Output = V;

    /// Returns a reference to the value at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTreeMap, Rank};
    ///
    /// let map = OSRBTreeMap::from([("b", 2), ("a", 1)]);
    /// assert_eq!(map[Rank(0)], 1);
    /// ```
    fn index(&self, rank: Rank) -> &V {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

impl<K, V> IndexMut<Rank> for OSRBTreeMap<K, V> {
    /// Returns a mutable reference to the value at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{OSRBTreeMap, Rank};
    ///
    /// let mut map = OSRBTreeMap::from([("b", 2), ("a", 1)]);
    /// map[Rank(1)] += 40;
    /// assert_eq!(map[&"b"], 42);
    /// ```
    fn index_mut(&mut self, rank: Rank) -> &mut V {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
