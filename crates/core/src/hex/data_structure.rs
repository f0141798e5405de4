use crate::hex::AxialCoord;
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

/// A set of hexes
pub type HexCoordSet = HashSet<AxialCoord, FnvBuildHasher>;
/// A map of hexes to some `T`
pub type HexCoordMap<T> = HashMap<AxialCoord, T, FnvBuildHasher>;
/// An ORDERED set of hexes. Iteration follows insertion order, which keeps
/// anything derived from the set (e.g. buffer writes) deterministic. This has
/// some extra memory overhead, so only use it when the ordering matters.
pub type HexCoordIndexSet = IndexSet<AxialCoord, FnvBuildHasher>;
