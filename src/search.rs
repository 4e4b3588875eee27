//! A variant of
//! [pathfinding's dijkstra function](https://docs.rs/pathfinding/latest/pathfinding/directed/dijkstra/index.html)
//! that accepts costs which are only [PartialOrd], so that real-valued move costs such as `√2`
//! can be used directly.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Per-node predecessor index and best known cost. Nodes missing from the map have an infinite
/// tentative distance. Lives only for the duration of one search.
pub type SearchState<N, C> = FxIndexMap<N, (usize, C)>;

struct SmallestCostHolder<K> {
    cost: K,
    index: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the max-heap pops the cheapest entry. Incomparable costs (NaN) are
        // treated as equal.
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Uniform-cost search from `start` until a node satisfying `success` is popped from the
/// frontier. Returns the path including both ends and its total cost, or [None] if the frontier
/// runs dry. Move costs must be non-negative.
///
/// Entries with equal cost leave the frontier in an unspecified order, so when several cheapest
/// paths exist any of them may be returned.
pub fn dijkstra<N, C, FN, IN, FS>(
    start: &N,
    mut successors: FN,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: SearchState<N, C> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    while let Some(SmallestCostHolder { cost, index }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            // A node may sit in the heap several times if a cheaper way to it was found later.
            // Only the entry matching the best known cost is expanded.
            if cost > c {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                cost: new_cost,
                index: n,
            });
        }
    }
    debug!("Frontier exhausted after visiting {} nodes", parents.len());
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // Weighted line graph 0 - 1 - 2 - 3 with a costly shortcut 0 - 3.
    fn line_successors(n: &u32) -> Vec<(u32, f64)> {
        let mut succ = Vec::new();
        if *n < 3 {
            succ.push((n + 1, 1.0));
        }
        if *n == 0 {
            succ.push((3, 3.5));
        }
        succ
    }

    #[test]
    fn takes_cheaper_long_route() {
        let (path, cost) = dijkstra(&0u32, line_successors, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = dijkstra(&7u32, |_| Vec::<(u32, f64)>::new(), |n| *n == 7).unwrap();
        assert_eq!(path, vec![7]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn unreachable_goal() {
        assert!(dijkstra(&0u32, line_successors, |n| *n == 9).is_none());
    }

    #[test]
    fn integer_costs() {
        let (path, cost) = dijkstra(
            &0i32,
            |&n| if n < 5 { vec![(n + 1, 2), (n + 2, 5)] } else { vec![] },
            |&n| n == 4,
        )
        .unwrap();
        assert_eq!(cost, 8);
        assert_eq!(path.len(), 5);
    }
}
