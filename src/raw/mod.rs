mod arena;
mod handle;
mod iter;
mod node;
mod order_statistic;
mod raw_osrbtree_map;
mod size;

pub(crate) use iter::RawIter;
pub(crate) use raw_osrbtree_map::RawOSRBTreeMap;
