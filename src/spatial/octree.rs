use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::geometry::{Aabb, IntersectsAabb, Query, Shape};

/// Hard depth cap: a leading sentinel bit plus 21 octant triplets fill
/// a 64-bit location code.
pub const OCTREE_MAX_DEPTH: u32 = 21;

/// A leaf holding more than this many items is split, depth permitting.
pub const OCTREE_MAX_ITEMS_PER_NODE: usize = 100;

const ROOT_CODE: u64 = 1;

/// Linear octree: a hash map from location code to node plus a flat
/// item arena.
///
/// A node's code carries its whole ancestry. The leading 1 bit is a
/// sentinel and each following group of three bits names the octant
/// taken on the way down from the root, so the children of `c` are
/// `(c << 3) | o` for the eight octants `o`.
///
/// Every leaf whose bounds an item intersects holds that item's index,
/// so queries must deduplicate; [`Octree::query`] reports each id at
/// most once.
#[derive(Clone, Debug)]
pub struct Octree {
    nodes: HashMap<u64, OctreeNode>,
    items: Vec<Shape>,
}

impl Octree {
    /// Octree covering `bounds` with a single root leaf.
    pub fn new(bounds: Aabb) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_CODE, OctreeNode::new(ROOT_CODE, bounds));

        Self {
            nodes,
            items: Vec::new(),
        }
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indexed item by id.
    pub fn item(&self, id: usize) -> &Shape {
        &self.items[id]
    }

    /// Number of nodes, interior and leaf.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index an item, registering it with every leaf whose bounds it
    /// intersects and splitting any leaf that ends up over capacity.
    /// Returns the item id, or `None` when the item does not intersect
    /// the root bounds.
    pub fn insert(&mut self, item: impl Into<Shape>) -> Option<usize> {
        let item = item.into();
        let index = self.items.len();
        let mut queue = VecDeque::from([ROOT_CODE]);
        let mut codes = Vec::new();

        while let Some(code) = queue.pop_front() {
            let Some(node) = self.nodes.get_mut(&code) else {
                continue;
            };

            if item.intersects_aabb(&node.bounds) {
                if node.is_leaf {
                    node.items.push(index);
                    codes.push(code);
                } else {
                    queue.extend(node.children_codes());
                }
            }
        }

        if codes.is_empty() {
            return None;
        }

        self.items.push(item);

        for code in codes {
            if self.nodes.get(&code).is_some_and(OctreeNode::should_split) {
                self.split(code);
            }
        }

        Some(index)
    }

    /// Split a leaf into its eight octants, redistributing its item
    /// indices by box overlap. Unknown codes, interior nodes, and
    /// leaves at the depth cap are left untouched.
    pub fn split(&mut self, code: u64) {
        let (bounds, item_ids, children) = match self.nodes.get(&code) {
            Some(node) if node.can_split() => {
                (node.bounds, node.items.clone(), node.children_codes())
            },
            _ => return,
        };

        for (octant, child_code) in children.into_iter().enumerate() {
            let child_bounds = bounds.octant(octant);
            let mut child = OctreeNode::new(child_code, child_bounds);

            for &id in &item_ids {
                if self.items[id].intersects_aabb(&child_bounds) {
                    child.items.push(id);
                }
            }

            self.nodes.insert(child_code, child);
        }

        if let Some(node) = self.nodes.get_mut(&code) {
            node.is_leaf = false;
            node.items.clear();
        }
    }

    /// Ids of all items matching the query. Traversal descends only
    /// into nodes the query's box test accepts; at leaves, candidates
    /// are refined through [`Query::matches`]. Each id is reported at
    /// most once even when the item spans several leaves.
    pub fn query(&self, query: &Query) -> Vec<usize> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        let mut queue = VecDeque::from([ROOT_CODE]);

        while let Some(code) = queue.pop_front() {
            let Some(node) = self.nodes.get(&code) else {
                continue;
            };

            if !query.intersects_aabb(&node.bounds) {
                continue;
            }

            if node.is_leaf {
                for &id in &node.items {
                    if seen.insert(id) && query.matches(&self.items[id]) {
                        results.push(id);
                    }
                }
            } else {
                queue.extend(node.children_codes());
            }
        }

        results
    }

    /// Answer a batch of queries, one result list per query in input
    /// order.
    #[cfg(not(feature = "parallel"))]
    pub fn query_many(&self, queries: &[Query]) -> Vec<Vec<usize>> {
        queries.iter().map(|query| self.query(query)).collect()
    }
}

/// Node within an octree.
#[derive(Clone, Debug)]
struct OctreeNode {
    bounds: Aabb,
    is_leaf: bool,
    items: Vec<usize>,
    code: u64,
}

impl OctreeNode {
    fn new(code: u64, bounds: Aabb) -> Self {
        Self {
            bounds,
            is_leaf: true,
            items: Vec::new(),
            code,
        }
    }

    /// Depth below the root: the position of the sentinel bit divided
    /// by three.
    fn depth(&self) -> u32 {
        (63 - self.code.leading_zeros()) / 3
    }

    /// Codes of the eight children, whether or not they exist yet.
    fn children_codes(&self) -> [u64; 8] {
        std::array::from_fn(|octant| (self.code << 3) | octant as u64)
    }

    fn can_split(&self) -> bool {
        self.is_leaf && self.depth() < OCTREE_MAX_DEPTH
    }

    fn should_split(&self) -> bool {
        self.can_split() && self.items.len() > OCTREE_MAX_ITEMS_PER_NODE
    }
}
