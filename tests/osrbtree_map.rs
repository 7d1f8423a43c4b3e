use std::collections::BTreeMap;
use std::ops::Bound;

use log::LevelFilter;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simplelog::{Config, TestLogger};

use osrb_tree::osrbtree_map;
use osrb_tree::{Error, OSRBTreeMap, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 4_000;

/// Routes the crate's `trace!` output to the test harness.
fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

fn key_strategy() -> impl Strategy<Value = i64> {
    // Narrower than TEST_SIZE so that keys collide
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn sorted_entries(entries: &[(i64, i64)]) -> Vec<(i64, i64)> {
    BTreeMap::from_iter(entries.iter().copied()).into_iter().collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Put(i64, Option<i64>),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    Min,
    Max,
    DeleteMin,
    DeleteMax,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), proptest::option::of(value_strategy())).prop_map(|(k, v)| MapOp::Put(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
        1 => Just(MapOp::DeleteMin),
        1 => Just(MapOp::DeleteMax),
    ]
}

// ─── Core symbol-table operations ────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OSRBTreeMap and
    /// BTreeMap and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = OSRBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(os_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Put(k, v) => {
                    let bt_result = match v {
                        Some(v) => bt_map.insert(*k, *v),
                        None => bt_map.remove(k),
                    };
                    prop_assert_eq!(os_map.put(*k, *v), bt_result, "put({}, {:?})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(os_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(os_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(os_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::Min => {
                    let expected = bt_map.keys().next().ok_or(Error::EmptyCollection);
                    prop_assert_eq!(os_map.min(), expected);
                }
                MapOp::Max => {
                    let expected = bt_map.keys().next_back().ok_or(Error::EmptyCollection);
                    prop_assert_eq!(os_map.max(), expected);
                }
                MapOp::DeleteMin => {
                    prop_assert_eq!(os_map.delete_min(), bt_map.pop_first().ok_or(Error::EmptyCollection));
                }
                MapOp::DeleteMax => {
                    prop_assert_eq!(os_map.delete_max(), bt_map.pop_last().ok_or(Error::EmptyCollection));
                }
            }
            prop_assert_eq!(os_map.len(), bt_map.len());
            prop_assert_eq!(os_map.is_empty(), bt_map.is_empty());
        }

        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    /// Tests that every traversal yields entries in ascending key order.
    #[test]
    fn traversals_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert!(os_map.keys().eq(bt_map.keys()));
        prop_assert!(os_map.values().eq(bt_map.values()));
        prop_assert!(os_map.entries().eq(bt_map.iter().map(|(k, v)| (v, k))));
        prop_assert!(os_map.iter().rev().eq(bt_map.iter().rev()));

        let mut visited = Vec::with_capacity(os_map.len());
        os_map.for_each(|v, k| visited.push((*k, *v)));
        prop_assert_eq!(visited, bt_map.clone().into_iter().collect::<Vec<_>>());

        prop_assert!(os_map.into_iter().eq(bt_map));
    }

    /// Tests that double-ended iteration meets in the middle with exact sizes.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut iter = os_map.iter();
        let mut seen = 0;

        while iter.len() > 0 {
            prop_assert_eq!(iter.len(), os_map.len() - seen);
            let item = if seen % 2 == 0 { iter.next() } else { iter.next_back() };
            prop_assert!(item.is_some());
            seen += 1;
        }
        prop_assert_eq!(seen, os_map.len());
        prop_assert_eq!(iter.next(), None);
        prop_assert_eq!(iter.next_back(), None);
    }

    /// Tests range() against BTreeMap::range() for random bounds.
    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        lo in key_strategy(),
        span in 0i64..1_000,
        lo_excluded in any::<bool>(),
        hi_excluded in any::<bool>(),
    ) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        // BTreeMap panics on an empty excluded range, as does OSRBTreeMap.
        let hi = if lo_excluded && hi_excluded { lo + span + 1 } else { lo + span };
        let start = if lo_excluded { Bound::Excluded(lo) } else { Bound::Included(lo) };
        let end = if hi_excluded { Bound::Excluded(hi) } else { Bound::Included(hi) };

        let os_range = os_map.range((start, end));
        let bt_range = bt_map.range((start, end));
        prop_assert_eq!(os_range.len(), bt_range.clone().count());
        prop_assert!(os_range.clone().eq(bt_range.clone()));
        prop_assert!(os_range.rev().eq(bt_range.rev()));

        prop_assert!(os_map.range(..lo).eq(bt_map.range(..lo)));
        prop_assert!(os_map.range(lo..).eq(bt_map.range(lo..)));
    }

    /// Tests retain() against BTreeMap::retain().
    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        os_map.retain(|k, _| k % 3 == 0);
        bt_map.retain(|k, _| k % 3 == 0);

        prop_assert!(os_map.iter().eq(bt_map.iter()));
        for rank in 0..os_map.len() {
            prop_assert_eq!(os_map.rank_of(os_map.select(rank).unwrap()), Some(rank));
        }
    }

    /// Tests that clearing leaves an empty map that accepts new entries.
    #[test]
    fn clear_empties_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        os_map.clear();
        prop_assert!(os_map.is_empty());
        prop_assert_eq!(os_map.iter().next(), None);
        prop_assert_eq!(os_map.min(), Err(Error::EmptyCollection));

        os_map.insert(7, 7);
        prop_assert_eq!(os_map.select(0), Ok(&7));
    }

    /// Tests equality against BTreeMap equality.
    #[test]
    fn eq_matches_btreemap(
        entries_a in proptest::collection::vec((0i64..50, 0i64..3), 0..40),
        entries_b in proptest::collection::vec((0i64..50, 0i64..3), 0..40),
    ) {
        let os_a: OSRBTreeMap<i64, i64> = entries_a.iter().copied().collect();
        let os_b: OSRBTreeMap<i64, i64> = entries_b.iter().copied().collect();
        let bt_a: BTreeMap<i64, i64> = entries_a.iter().copied().collect();
        let bt_b: BTreeMap<i64, i64> = entries_b.iter().copied().collect();

        prop_assert_eq!(os_a == os_b, bt_a == bt_b);
        prop_assert_eq!(os_a.clone(), os_a);
    }
}

// ─── Order-statistic operations ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Tests select against a sorted Vec oracle.
    #[test]
    fn select_matches_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted = sorted_entries(&entries);

        prop_assert_eq!(os_map.len(), sorted.len());
        for (rank, (key, value)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.select(rank), Ok(key), "select({})", rank);
            prop_assert_eq!(os_map.get_by_rank(rank), Some((key, value)), "get_by_rank({})", rank);
        }

        let len = sorted.len();
        prop_assert_eq!(os_map.select(len), Err(Error::RankOutOfRange { rank: len, len }));
        prop_assert_eq!(os_map.get_by_rank(len + 100), None);
    }

    /// Tests rank against a sorted Vec oracle, for present and absent keys.
    #[test]
    fn rank_matches_vec(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        probes in proptest::collection::vec(-2_100i64..2_100, 100),
    ) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted = sorted_entries(&entries);

        for probe in probes {
            let expected = sorted.partition_point(|(k, _)| *k < probe);
            prop_assert_eq!(os_map.rank(&probe), expected, "rank({})", probe);

            let present = sorted.binary_search_by_key(&probe, |(k, _)| *k).ok();
            prop_assert_eq!(os_map.rank_of(&probe), present, "rank_of({})", probe);
        }
    }

    /// Tests that rank and select invert each other.
    #[test]
    fn rank_select_roundtrip(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();

        for rank in 0..os_map.len() {
            let key = os_map.select(rank).unwrap();
            prop_assert_eq!(os_map.rank(key), rank, "rank(select({}))", rank);
        }
        for key in os_map.keys() {
            prop_assert_eq!(os_map.select(os_map.rank(key)), Ok(key));
        }
    }

    /// Tests floor and ceiling against a BTreeMap oracle.
    #[test]
    fn floor_and_ceiling_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        probes in proptest::collection::vec(-2_100i64..2_100, 100),
    ) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for probe in probes {
            let floor = bt_map.range(..=probe).next_back().map(|(k, _)| k);
            let ceiling = bt_map.range(probe..).next().map(|(k, _)| k);
            prop_assert_eq!(os_map.floor(&probe), Ok(floor), "floor({})", probe);
            prop_assert_eq!(os_map.ceiling(&probe), Ok(ceiling), "ceiling({})", probe);
        }
        for key in bt_map.keys() {
            prop_assert_eq!(os_map.floor(key), Ok(Some(key)));
            prop_assert_eq!(os_map.ceiling(key), Ok(Some(key)));
        }
    }

    /// Tests Index<Rank> and IndexMut<Rank>.
    #[test]
    fn index_by_rank_matches_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted = sorted_entries(&entries);

        for (rank, (_, value)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map[Rank(rank)], *value, "Index[Rank({})]", rank);
        }

        let last = Rank(sorted.len() - 1);
        os_map[last] = 42;
        prop_assert_eq!(os_map.max().copied().map(|k| os_map[&k]), Ok(42));
    }

    /// Tests order statistics after a mix of inserts, puts and removals.
    #[test]
    fn order_stats_after_mutations(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut os_map: OSRBTreeMap<i64, i64> = OSRBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    os_map.insert(*k, *v);
                    bt_map.insert(*k, *v);
                }
                MapOp::Put(k, v) => {
                    os_map.put(*k, *v);
                    match v {
                        Some(v) => bt_map.insert(*k, *v),
                        None => bt_map.remove(k),
                    };
                }
                MapOp::Remove(k) => {
                    os_map.remove(k);
                    bt_map.remove(k);
                }
                MapOp::DeleteMin => {
                    let _ = os_map.delete_min();
                    bt_map.pop_first();
                }
                _ => {}
            }
        }

        let sorted: Vec<(i64, i64)> = bt_map.into_iter().collect();
        prop_assert_eq!(os_map.len(), sorted.len());

        let check_positions = [0, 1, sorted.len() / 4, sorted.len() / 2, sorted.len() * 3 / 4, sorted.len().saturating_sub(1)];
        for &pos in &check_positions {
            if pos < sorted.len() {
                prop_assert_eq!(os_map.select(pos), Ok(&sorted[pos].0), "select({}) after mutations", pos);
                prop_assert_eq!(os_map.rank(&sorted[pos].0), pos, "rank after mutations at pos {}", pos);
            }
        }
    }

    /// Tests that the tree height stays within the red-black bound.
    #[test]
    fn height_is_logarithmic(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let os_map: OSRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bound = 2 * (os_map.len() + 1).ilog2() as usize + 2;
        prop_assert!(os_map.height() <= bound, "height {} exceeds {}", os_map.height(), bound);
    }
}

// ─── Worked scenarios ────────────────────────────────────────────────────────

#[test]
fn two_entries_in_reverse_order() {
    init_logging();
    let mut map = OSRBTreeMap::new();
    map.put(2, Some("b"));
    map.put(1, Some("a"));

    assert_eq!(map.len(), 2);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(map.entries().collect::<Vec<_>>(), vec![(&"a", &1), (&"b", &2)]);
    assert_eq!(map.get(&2), Some(&"b"));
    assert_eq!(map.min(), Ok(&1));
    assert_eq!(map.max(), Ok(&2));
}

#[test]
fn sequential_keys_have_matching_ranks() {
    init_logging();
    let map: OSRBTreeMap<u32, u32> = (0..=999).map(|k| (k, k * 2)).collect();

    assert_eq!(map.len(), 1000);
    assert_eq!(map.select(5), Ok(&5));
    assert_eq!(map.rank(&5), 5);
    for k in 0..=999u32 {
        let rank = usize::try_from(k).unwrap();
        assert_eq!(map.select(rank), Ok(&k));
        assert_eq!(map.rank(&k), rank);
    }
    assert_eq!(map.select(1000), Err(Error::RankOutOfRange { rank: 1000, len: 1000 }));
}

#[test]
fn floor_and_ceiling_between_keys() {
    let map: OSRBTreeMap<u32, ()> = (0..999).map(|k| (k * 10, ())).collect();

    assert_eq!(map.floor(&503), Ok(Some(&500)));
    assert_eq!(map.ceiling(&503), Ok(Some(&510)));
    assert_eq!(map.floor(&9_980), Ok(Some(&9_980)));
    assert_eq!(map.ceiling(&9_981), Ok(None));
    assert_eq!(map.ceiling(&0), Ok(Some(&0)));
}

/// `f64` ordered by `total_cmp`, so fractional queries can probe integer keys.
#[derive(Clone, Copy, Debug)]
struct Real(f64);

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[test]
fn floor_and_ceiling_of_fractional_query() {
    let map: OSRBTreeMap<Real, u32> = (0..=999u32).map(|k| (Real(f64::from(k)), k)).collect();

    assert_eq!(map.floor(&Real(50.3)), Ok(Some(&Real(50.0))));
    assert_eq!(map.ceiling(&Real(50.3)), Ok(Some(&Real(51.0))));
    assert_eq!(map.rank(&Real(50.3)), 51);
    assert_eq!(map.floor(&Real(-0.5)), Ok(None));
    assert_eq!(map.ceiling(&Real(999.5)), Ok(None));
}

#[test]
fn retain_with_panicking_predicate_matches_btreemap() {
    let mut os_map: OSRBTreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let mut bt_map: BTreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();

    let keep_even_until_five = |k: &i32, _: &mut i32| {
        assert!(*k != 5, "predicate gave up");
        k % 2 == 0
    };
    let os_outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| os_map.retain(keep_even_until_five)));
    let bt_outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| bt_map.retain(keep_even_until_five)));

    assert!(os_outcome.is_err());
    assert!(bt_outcome.is_err());
    assert_eq!(os_map.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4, 5, 6, 7, 8, 9]);
    assert_eq!(os_map.iter().collect::<Vec<_>>(), bt_map.iter().collect::<Vec<_>>());
    assert_eq!(os_map.select(3), Ok(&5));
}

#[test]
fn delete_min_until_empty() {
    init_logging();
    let mut map: OSRBTreeMap<i32, i32> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().map(|k| (k, -k)).collect();

    let mut drained = Vec::new();
    while let Ok((key, value)) = map.delete_min() {
        assert_eq!(value, -key);
        drained.push(key);
    }
    assert_eq!(drained, (1..=9).collect::<Vec<_>>());
    assert_eq!(map.delete_min(), Err(Error::EmptyCollection));
    assert_eq!(map.delete_max(), Err(Error::EmptyCollection));
    assert!(map.is_empty());
}

#[test]
fn put_none_is_delete() {
    let mut by_put: OSRBTreeMap<&str, u32> = OSRBTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    let mut by_remove = by_put.clone();

    assert_eq!(by_put.put("b", None), Some(2));
    assert_eq!(by_remove.remove("b"), Some(2));
    assert_eq!(by_put, by_remove);

    // Putting the absence marker for a missing key changes nothing.
    assert_eq!(by_put.put("z", None), None);
    assert_eq!(by_put, by_remove);
}

#[test]
fn empty_map_queries() {
    let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::new();

    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert_eq!(map.get(&1), None);
    assert!(!map.contains_key(&1));
    assert_eq!(map.min(), Err(Error::EmptyCollection));
    assert_eq!(map.max(), Err(Error::EmptyCollection));
    assert_eq!(map.floor(&1), Err(Error::EmptyCollection));
    assert_eq!(map.ceiling(&1), Err(Error::EmptyCollection));
    assert_eq!(map.rank(&1), 0);
    assert_eq!(map.keys().next(), None);
    assert_eq!(map.range(..).len(), 0);
}

#[test]
fn overwrite_keeps_length() {
    let mut map = OSRBTreeMap::new();
    assert_eq!(map.insert("k", 1), None);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map["k"], 2);
}

#[test]
fn borrowed_key_lookups() {
    let map: OSRBTreeMap<String, usize> = ["pear", "apple", "fig"].into_iter().map(|s| (s.to_owned(), s.len())).collect();

    assert_eq!(map.get("fig"), Some(&3));
    assert_eq!(map.rank("banana"), 1);
    assert_eq!(map.floor("banana"), Ok(Some(&"apple".to_owned())));
    assert_eq!(map.range::<str, _>((Bound::Excluded("apple"), Bound::Unbounded)).count(), 2);
}

#[test]
fn default_iterators_are_empty() {
    assert_eq!(osrbtree_map::Iter::<i32, i32>::default().len(), 0);
    assert_eq!(osrbtree_map::Keys::<i32, i32>::default().next(), None);
    assert_eq!(osrbtree_map::Values::<i32, i32>::default().next_back(), None);
    assert_eq!(osrbtree_map::Entries::<i32, i32>::default().len(), 0);
    assert_eq!(osrbtree_map::Range::<i32, i32>::default().next(), None);
    assert_eq!(osrbtree_map::IntoIter::<i32, i32>::default().len(), 0);
}

#[test]
fn error_displays_context() {
    assert_eq!(Error::RankOutOfRange { rank: 3, len: 2 }.to_string(), "rank 3 is out of range for a map of length 2");
    assert_eq!(Error::EmptyCollection.to_string(), "operation requires a non-empty map");
}
