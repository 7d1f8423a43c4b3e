use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{Bound, Index, RangeBounds};

use crate::Error;
use crate::raw::{RawIter, RawOSRBTreeMap};

mod capacity;
mod order_statistic;

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
fn validate_range_bounds<T, R>(range: &R)
where
    T: ?Sized + Ord,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let both_excluded =
            matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_));
        let valid = if both_excluded { start < end } else { start <= end };
        assert!(valid, "range start is greater than range end in OSRBTreeMap");
    }
}

/// An ordered map based on a left-leaning [red-black tree] with subtree sizes.
///
/// Given a key type with a [total order], the map stores its entries in key
/// order. Keys must implement [`Ord`]; lookups accept any borrowed form `Q` of
/// the key that orders the same way.
///
/// Search, insertion and removal take O(log n) worst-case time, and so do the
/// order-statistic queries [`select`], [`rank`], [`floor`] and [`ceiling`].
/// Iterators produce their items in key order in amortized constant time per
/// item and are double-ended.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key changes while it is in the map. The
/// behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `OSRBTreeMap` that observed it and not result in
/// undefined behavior.
///
/// The map is a plain single-owner value: it does no locking, and sharing it
/// across threads requires the usual `Mutex`/`RwLock` wrapping.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// let mut book_reviews = OSRBTreeMap::new();
///
/// book_reviews.insert("Grimms' Fairy Tales", "Masterpiece.");
/// book_reviews.insert("Pride and Prejudice", "Very enjoyable.");
/// book_reviews.insert("The Adventures of Sherlock Holmes", "Eye lyked it alot.");
///
/// if !book_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.", book_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// book_reviews.remove("The Adventures of Sherlock Holmes");
///
/// // The first book alphabetically, and the number of books before "P".
/// assert_eq!(book_reviews.min(), Ok(&"Grimms' Fairy Tales"));
/// assert_eq!(book_reviews.rank("P"), 1);
///
/// for (book, review) in &book_reviews {
///     println!("{book}: \"{review}\"");
/// }
/// ```
///
/// A map with a known list of items can be initialized from an array:
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// let solar_distance = OSRBTreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.select(0), Ok(&"Earth"));
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Left-leaning_red%E2%80%93black_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`select`]: OSRBTreeMap::select
/// [`rank`]: OSRBTreeMap::rank
/// [`floor`]: OSRBTreeMap::floor
/// [`ceiling`]: OSRBTreeMap::ceiling
pub struct OSRBTreeMap<K, V> {
    raw: RawOSRBTreeMap<K, V>,
}

/// An iterator over the entries of an `OSRBTreeMap`, as `(key, value)` pairs.
///
/// This `struct` is created by the [`iter`] method on [`OSRBTreeMap`].
///
/// [`iter`]: OSRBTreeMap::iter
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// An iterator over the entries of an `OSRBTreeMap`, as `(value, key)` pairs.
///
/// This `struct` is created by the [`entries`] method on [`OSRBTreeMap`].
///
/// [`entries`]: OSRBTreeMap::entries
pub struct Entries<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// An iterator over the keys of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`OSRBTreeMap`].
///
/// [`keys`]: OSRBTreeMap::keys
pub struct Keys<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// An iterator over the values of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`values`] method on [`OSRBTreeMap`].
///
/// [`values`]: OSRBTreeMap::values
pub struct Values<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// An iterator over a sub-range of entries in an `OSRBTreeMap`.
///
/// This `struct` is created by the [`range`] method on [`OSRBTreeMap`].
///
/// [`range`]: OSRBTreeMap::range
pub struct Range<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

/// An owning iterator over the entries of an `OSRBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`OSRBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An owning iterator over the keys of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`OSRBTreeMap`].
///
/// [`into_keys`]: OSRBTreeMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `OSRBTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`OSRBTreeMap`].
///
/// [`into_values`]: OSRBTreeMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> OSRBTreeMap<K, V> {
    /// Makes a new, empty `OSRBTreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::new(),
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// Read from the root's subtree size in O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key in the map.
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
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyCollection));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K, Error> {
        self.first_key_value().map(|(k, _)| k).ok_or(Error::EmptyCollection)
    }

    /// Returns the largest key in the map.
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
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.max(), Ok(&2));
    /// ```
    pub fn max(&self) -> Result<&K, Error> {
        self.last_key_value().map(|(k, _)| k).ok_or(Error::EmptyCollection)
    }

    /// Returns the first key-value pair in the map.
    /// The key in this pair is the minimum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.first_key_value(), None);
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.first_key_value(), Some((&1, &"b")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.node(h).entry())
    }

    /// Returns the last key-value pair in the map.
    /// The key in this pair is the maximum key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    /// assert_eq!(map.last_key_value(), Some((&2, &"a")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.node(h).entry())
    }

    /// Returns the number of levels in the tree, zero for an empty map.
    ///
    /// The balance guarantee keeps this at or below `2 * log2(len + 1)`.
    /// Walks the whole tree, O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<u32, ()> = (0..1000).map(|k| (k, ())).collect();
    /// assert!(map.height() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: RawIter::new(&self.raw),
        }
    }

    /// Gets an iterator over the entries of the map as `(value, key)` pairs,
    /// sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// let entries: Vec<_> = map.entries().collect();
    /// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
    /// ```
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            inner: RawIter::new(&self.raw),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// a.insert(2, "b");
    /// a.insert(1, "a");
    ///
    /// let keys: Vec<_> = a.keys().cloned().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: RawIter::new(&self.raw),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut a = OSRBTreeMap::new();
    /// a.insert(1, "hello");
    /// a.insert(2, "goodbye");
    ///
    /// let values: Vec<&str> = a.values().cloned().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: RawIter::new(&self.raw),
        }
    }

    /// Calls `handler` with each value and its key, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, 20), (1, 10)]);
    /// let mut seen = Vec::new();
    /// map.for_each(|value, key| seen.push((*value, *key)));
    /// assert_eq!(seen, [(10, 1), (20, 2)]);
    /// ```
    pub fn for_each<F>(&self, mut handler: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self {
            handler(value, key);
        }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<i32> = map.into_keys().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    /// The map cannot be used after calling this.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(1, "hello"), (2, "goodbye")]);
    /// let values: Vec<&str> = map.into_values().collect();
    /// assert_eq!(values, ["hello", "goodbye"]);
    /// ```
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }
}

impl<K: Ord, V> OSRBTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated.
    ///
    /// # Panics
    ///
    /// Panics if the map already holds `u32::MAX - 1` entries, the number of
    /// node slots its handles can address.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Stores `value` under `key`, or removes `key` when `value` is `None`.
    ///
    /// `None` plays the part of the absent value: putting it is the same as
    /// calling [`remove`](Self::remove). Returns the value previously stored
    /// under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// assert_eq!(map.put(1, Some("a")), None);
    /// assert_eq!(map.put(1, Some("b")), Some("a"));
    /// assert_eq!(map.put(1, None), Some("b"));
    /// assert!(!map.contains_key(&1));
    /// ```
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removing an absent key does not touch the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)`
    /// returns `false`. The elements are visited in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// // Keep only the elements with even-numbered keys.
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert!(map.into_iter().eq(vec![(0, 0), (2, 20), (4, 40), (6, 60)]));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let entries = self.raw.drain_to_vec();
        let mut guard = RetainGuard {
            tree: &mut self.raw,
            current: None,
            rest: entries.into_iter(),
        };

        while let Some(entry) = guard.rest.next() {
            let (key, value) = guard.current.insert(entry);
            if f(&*key, value) {
                if let Some((key, value)) = guard.current.take() {
                    guard.tree.insert(key, value);
                }
            } else {
                guard.current = None;
            }
        }
    }

    /// Constructs a double-ended iterator over a sub-range of elements in the
    /// map. The simplest way is to use the range syntax `min..max`, thus
    /// `range(min..max)` will yield elements from min (inclusive) to max
    /// (exclusive).
    ///
    /// The length of the returned iterator is known up front: it is computed
    /// from the ranks of the two bounds in O(log n).
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use std::ops::Bound::Included;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// assert_eq!(map.range(4..).len(), 2);
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized + Ord,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        validate_range_bounds(&range);
        Range {
            inner: RawIter::range(&self.raw, range.start_bound(), range.end_bound()),
        }
    }
}

/// Entries drained by [`OSRBTreeMap::retain`] that the predicate has not yet
/// rejected.
///
/// Dropping the guard puts the entry under inspection and every unvisited one
/// back into the tree, so a panicking predicate only costs the entries it
/// already rejected.
struct RetainGuard<'a, K: Ord, V> {
    tree: &'a mut RawOSRBTreeMap<K, V>,
    current: Option<(K, V)>,
    rest: alloc::vec::IntoIter<(K, V)>,
}

impl<K: Ord, V> Drop for RetainGuard<'_, K, V> {
    fn drop(&mut self) {
        for (key, value) in self.current.take().into_iter().chain(self.rest.by_ref()) {
            self.tree.insert(key, value);
        }
    }
}

impl<K: Clone, V: Clone> Clone for OSRBTreeMap<K, V> {
    fn clone(&self) -> Self {
        OSRBTreeMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash> Hash for OSRBTreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OSRBTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq> Eq for OSRBTreeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OSRBTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for OSRBTreeMap<K, V> {
    /// Creates an empty `OSRBTreeMap`.
    fn default() -> OSRBTreeMap<K, V> {
        OSRBTreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OSRBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> OSRBTreeMap<K, V> {
        let mut map = OSRBTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OSRBTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for OSRBTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSRBTreeMap<K, V> {
    /// Converts a `[(K, V); N]` into an `OSRBTreeMap<K, V>`.
    ///
    /// If any entries in the array have equal keys, all but one of the
    /// corresponding values will be dropped.
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a OSRBTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for OSRBTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for OSRBTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `OSRBTreeMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

// ─── Borrowing iterators ────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `osrbtree_map::Iter`.
    fn default() -> Self {
        Iter { inner: RawIter::empty() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a V, &'a K);

    fn next(&mut self) -> Option<(&'a V, &'a K)> {
        self.inner.next().map(|(k, v)| (v, k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }
}

impl<K, V> DoubleEndedIterator for Entries<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (v, k))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

impl<K, V> Clone for Entries<'_, K, V> {
    fn clone(&self) -> Self {
        Entries {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Entries<'_, K, V> {
    fn default() -> Self {
        Entries { inner: RawIter::empty() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys { inner: RawIter::empty() }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }

    fn last(mut self) -> Option<&'a V> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values { inner: RawIter::empty() }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }

    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Range<'_, K, V> {
    /// Creates an empty `osrbtree_map::Range`.
    fn default() -> Self {
        Range { inner: RawIter::empty() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Owning iterators ───────────────────────────────────────────────────────

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Default for IntoIter<K, V> {
    /// Creates an empty `osrbtree_map::IntoIter`.
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Default for IntoKeys<K, V> {
    fn default() -> Self {
        IntoKeys {
            inner: IntoIter::default(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for IntoKeys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(k, _)| k)).finish()
    }
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

impl<K, V> Default for IntoValues<K, V> {
    fn default() -> Self {
        IntoValues {
            inner: IntoIter::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for IntoValues<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.inner.as_slice().iter().map(|(_, v)| v)).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn put_none_matches_remove() {
        let mut by_put: OSRBTreeMap<i32, i32> = (0..64).map(|k| (k, k)).collect();
        let mut by_remove = by_put.clone();

        for key in (0..80).step_by(3) {
            assert_eq!(by_put.put(key, None), by_remove.remove(&key));
            by_put.raw.validate_invariants();
        }
        assert_eq!(by_put, by_remove);
    }

    #[test]
    fn retain_rebuilds_valid_tree() {
        let mut map: OSRBTreeMap<i32, i32> = (0..200).map(|k| (k, k)).collect();
        map.retain(|k, v| {
            *v += 1;
            k % 5 != 0
        });
        map.raw.validate_invariants();
        assert_eq!(map.len(), 160);
        assert_eq!(map.get(&1), Some(&2));
        assert!(!map.contains_key(&5));
    }

    #[test]
    fn retain_restores_unvisited_entries_on_panic() {
        extern crate std;
        use std::panic::{AssertUnwindSafe, catch_unwind};

        let mut map: OSRBTreeMap<i32, i32> = (0..100).map(|k| (k, k)).collect();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            map.retain(|&k, _| {
                assert!(k != 50, "predicate gave up");
                k % 2 == 0
            });
        }));

        assert!(outcome.is_err());
        map.raw.validate_invariants();
        // Odd keys below 50 were rejected before the panic; the rest survive.
        assert_eq!(map.len(), 75);
        assert!(!map.contains_key(&49));
        assert!(map.contains_key(&50));
        assert!(map.contains_key(&51));
        assert_eq!(map.select(25), Ok(&50));
    }

    #[test]
    fn debug_formats_as_map() {
        let map = OSRBTreeMap::from([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
        assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
        assert_eq!(format!("{:?}", map.entries()), "[('a', 1), ('b', 2)]");
    }

    #[test]
    fn clone_is_independent() {
        let mut original: OSRBTreeMap<i32, i32> = (0..32).map(|k| (k, k)).collect();
        let copy = original.clone();
        original.remove(&3);
        copy.raw.validate_invariants();
        assert!(copy.contains_key(&3));
        assert_eq!(copy.len(), 32);
    }

    #[test]
    #[should_panic(expected = "range start is greater than range end in OSRBTreeMap")]
    fn inverted_range_panics() {
        let map: OSRBTreeMap<i32, ()> = OSRBTreeMap::new();
        let _ = map.range(5..1);
    }

    #[test]
    fn owning_iterators_are_sorted() {
        let map: OSRBTreeMap<i32, i32> = [5, 1, 4, 2, 3].into_iter().map(|k| (k, -k)).collect();
        let keys: Vec<i32> = map.clone().into_keys().collect();
        let values: Vec<i32> = map.clone().into_values().rev().collect();
        assert_eq!(keys, [1, 2, 3, 4, 5]);
        assert_eq!(values, [-5, -4, -3, -2, -1]);
    }
}
