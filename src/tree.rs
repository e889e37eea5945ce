//! Merges parsed flat entries into one composite tree.

use crate::coerce::coerce;
use crate::error::{JpathError, Result};
use crate::path::{Path, Segment};
use crate::value::FlatValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;

/// Largest array index accepted by default.
pub const DEFAULT_MAX_INDEX: usize = u16::MAX as usize;

/// Most segments a key may have by default. Matches the nesting depth
/// `serde_json` accepts when reading.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Most array slots, placeholders included, one document may allocate by
/// default.
pub const DEFAULT_MAX_SLOTS: usize = 1 << 20;

/// Size limits applied while building one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest array index a key may use.
    pub max_index: usize,
    /// Most segments a key may have.
    pub max_depth: usize,
    /// Most array slots the whole document may hold.
    pub max_slots: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
            max_depth: DEFAULT_MAX_DEPTH,
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }
}

/// Why descending into a node failed.
enum Blocked {
    Kind(NodeKind),
    Slots(usize),
}

/// A location in the tree under construction.
///
/// Once a location is an object, an array or a leaf it stays that kind for
/// the rest of the build.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Node {
    /// Not assigned yet. Renders as `null` inside arrays.
    #[default]
    Vacant,
    Object(BTreeMap<String, Node>),
    Array(Vec<Node>),
    /// A resolved value. Never descended into.
    Leaf(Value),
}

/// The kind of a [`Node`], reported in structural conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Vacant,
    Object,
    Array,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Vacant => "an unassigned location",
            NodeKind::Object => "an object",
            NodeKind::Array => "an array",
            NodeKind::Leaf => "a value",
        };
        write!(f, "{}", label)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Vacant => NodeKind::Vacant,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }

    /// Steps into the child addressed by `segment`, turning a vacant
    /// location into the container the segment demands.
    ///
    /// Array growth is taken from `slots`. Fails with the kind found when the
    /// location cannot hold the segment, or with the growth the budget
    /// cannot cover.
    fn child(
        &mut self,
        segment: &Segment,
        slots: &mut usize,
    ) -> std::result::Result<&mut Node, Blocked> {
        if matches!(self, Node::Vacant) {
            *self = match segment {
                Segment::Field(_) => Node::Object(BTreeMap::new()),
                Segment::Index(_) => Node::Array(Vec::new()),
            };
        }

        match (self, segment) {
            (Node::Object(children), Segment::Field(name)) => {
                Ok(children.entry(name.clone()).or_default())
            }
            (Node::Array(items), Segment::Index(index)) => {
                if items.len() <= *index {
                    let growth = *index + 1 - items.len();
                    if growth > *slots {
                        return Err(Blocked::Slots(growth));
                    }
                    *slots -= growth;
                    items.resize(*index + 1, Node::Vacant);
                }
                Ok(&mut items[*index])
            }
            (node, _) => Err(Blocked::Kind(node.kind())),
        }
    }

    /// Renders the node as JSON. Vacant slots become `null`.
    pub fn into_json(self) -> Value {
        match self {
            Node::Vacant => Value::Null,
            Node::Object(children) => Value::Object(
                children
                    .into_iter()
                    .map(|(name, child)| (name, child.into_json()))
                    .collect::<Map<_, _>>(),
            ),
            Node::Array(items) => Value::Array(items.into_iter().map(Node::into_json).collect()),
            Node::Leaf(value) => value,
        }
    }
}

/// Builds the composite tree one flat entry at a time.
///
/// Every entry either merges into the tree or aborts the build. The order of
/// entries does not change a successful result, but when several entries
/// conflict, which conflict is reported depends on the order.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: Node,
    limits: Limits,
    slots_left: usize,
    entries: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl TreeBuilder {
    pub fn new(limits: Limits) -> Self {
        Self {
            root: Node::Vacant,
            limits,
            slots_left: limits.max_slots,
            entries: 0,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Parses `key`, coerces `value` by the key's directive and stores the
    /// result at the location the key addresses.
    ///
    /// # Errors
    /// * [`JpathError::MalformedPath`] if the key does not parse.
    /// * [`JpathError::PathTooDeep`] if the key has too many segments.
    /// * [`JpathError::IndexOutOfBounds`] if an index exceeds the maximum.
    /// * [`JpathError::ArraySlotsExhausted`] if the document would hold too
    ///   many array slots.
    /// * [`JpathError::CoercionError`] if the directive cannot be applied.
    /// * [`JpathError::StructuralConflict`] if the key addresses a location
    ///   as a different kind than an earlier entry established.
    pub fn insert(&mut self, key: &str, value: FlatValue) -> Result<()> {
        let path = Path::parse(key)?;
        let limits = self.limits;

        if path.depth() > limits.max_depth {
            return Err(JpathError::PathTooDeep {
                path: key.to_string(),
                depth: path.depth(),
                max: limits.max_depth,
            });
        }

        if let Some(index) = path.iter().find_map(|segment| match segment {
            Segment::Index(index) if *index > limits.max_index => Some(*index),
            _ => None,
        }) {
            return Err(JpathError::IndexOutOfBounds {
                path: key.to_string(),
                index,
                max: limits.max_index,
            });
        }

        let leaf = coerce(key, value, path.directive())?;

        let mut node = &mut self.root;
        for (depth, segment) in path.iter().enumerate() {
            node = match node.child(segment, &mut self.slots_left) {
                Ok(child) => child,
                Err(Blocked::Slots(requested)) => {
                    return Err(JpathError::ArraySlotsExhausted {
                        path: key.to_string(),
                        requested,
                        max: limits.max_slots,
                    });
                }
                Err(Blocked::Kind(found)) => {
                    let expected = match segment {
                        Segment::Field(_) => NodeKind::Object,
                        Segment::Index(_) => NodeKind::Array,
                    };
                    return Err(conflict(key, &path, depth, expected, found));
                }
            };
        }

        if !matches!(node, Node::Vacant) {
            let found = node.kind();
            return Err(conflict(key, &path, path.depth(), NodeKind::Vacant, found));
        }
        *node = Node::Leaf(leaf);

        self.entries += 1;
        tracing::trace!(path = key, depth = path.depth(), "merged flat entry");
        Ok(())
    }

    /// Count of entries merged so far.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Consumes the builder and returns the assembled document. A tree
    /// without entries is an empty object.
    pub fn finish(self) -> Value {
        match self.root {
            Node::Vacant => Value::Object(Map::new()),
            root => root.into_json(),
        }
    }
}

fn conflict(
    key: &str,
    path: &Path,
    depth: usize,
    expected: NodeKind,
    found: NodeKind,
) -> JpathError {
    JpathError::StructuralConflict {
        path: key.to_string(),
        location: path.prefix(depth).to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
