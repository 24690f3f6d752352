use std::collections::BTreeMap;
use std::ops::Range;

use crate::contacts::ContactRecord;

use super::category::RelationshipCategory;
use super::transform::Point;

/// Fixed layout parameters, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub center_x: f32,
    pub base_y: f32,
    pub tier_spacing: f32,
    pub node_spacing: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            center_x: 540.0,
            base_y: 150.0,
            tier_spacing: 250.0,
            node_spacing: 200.0,
        }
    }
}

impl LayoutParams {
    pub fn tier_y(&self, level: i32) -> f32 {
        self.base_y + level as f32 * self.tier_spacing
    }

    /// Position of the implicit root every tier-1 node hangs from.
    pub fn root_position(&self) -> Point {
        Point::new(self.center_x, self.base_y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub position: Point,
    pub level: i32,
    pub category: RelationshipCategory,
    pub tags: Vec<String>,
    pub connected_to: Vec<String>,
}

/// An inferred parent -> child link between adjacent tiers, as node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TierEdge {
    pub parent: usize,
    pub child: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tier {
    pub level: i32,
    pub category: RelationshipCategory,
    pub y: f32,
    pub nodes: Range<usize>,
}

impl Tier {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn label(&self) -> String {
        self.category.label(self.level)
    }
}

/// Output of one layout pass.
///
/// Nodes are ordered by tier (ascending level), then by input order within
/// the tier; each tier's nodes are contiguous.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<TierEdge>,
    pub tiers: Vec<Tier>,
    pub params: LayoutParams,
}

pub fn compute_layout(contacts: &[ContactRecord]) -> TreeLayout {
    compute_layout_with(contacts, &LayoutParams::default())
}

pub fn compute_layout_with(contacts: &[ContactRecord], params: &LayoutParams) -> TreeLayout {
    let mut by_level: BTreeMap<i32, Vec<&ContactRecord>> = BTreeMap::new();
    for contact in contacts {
        by_level
            .entry(contact.relationship_level)
            .or_default()
            .push(contact);
    }

    let mut nodes = Vec::with_capacity(contacts.len());
    let mut tiers = Vec::with_capacity(by_level.len());

    for (level, members) in by_level {
        let category = RelationshipCategory::from_level(level);
        let y = params.tier_y(level);
        let total_width = (members.len() - 1) as f32 * params.node_spacing;
        let start_x = params.center_x - total_width / 2.0;
        let first = nodes.len();

        for (index, contact) in members.into_iter().enumerate() {
            nodes.push(GraphNode {
                id: contact.id.clone(),
                name: contact.name.clone(),
                photo_url: contact.photo_url.clone(),
                position: Point::new(start_x + index as f32 * params.node_spacing, y),
                level,
                category,
                tags: contact.tags.clone(),
                connected_to: contact.connected_to.clone(),
            });
        }

        tiers.push(Tier {
            level,
            category,
            y,
            nodes: first..nodes.len(),
        });
    }

    let edges = infer_edges(&nodes, &tiers);

    TreeLayout {
        nodes,
        edges,
        tiers,
        params: *params,
    }
}

/// Links every node of tier `L >= 2` to the horizontally nearest node of
/// tier `L - 1`. Equidistant parents resolve to the earliest one.
fn infer_edges(nodes: &[GraphNode], tiers: &[Tier]) -> Vec<TierEdge> {
    let mut edges = Vec::new();

    for pair in tiers.windows(2) {
        let [parents, children] = pair else {
            continue;
        };
        if children.level < 2 || parents.level != children.level - 1 || parents.is_empty() {
            continue;
        }

        for child in children.nodes.clone() {
            let child_x = nodes[child].position.x;
            let mut best: Option<(usize, f32)> = None;
            for parent in parents.nodes.clone() {
                let distance = (nodes[parent].position.x - child_x).abs();
                if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                    best = Some((parent, distance));
                }
            }

            if let Some((parent, _)) = best {
                edges.push(TierEdge { parent, child });
            }
        }
    }

    edges
}

impl TreeLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_position(&self) -> Point {
        self.params.root_position()
    }

    /// Indices of tier-1 nodes, which attach to the implicit root.
    pub fn root_links(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiers
            .iter()
            .filter(|tier| tier.level == 1)
            .flat_map(|tier| tier.nodes.clone())
    }

    /// First node carrying `id`. Duplicate ids are kept as separate nodes.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    pub fn tier_of(&self, index: usize) -> Option<&Tier> {
        self.tiers.iter().find(|tier| tier.nodes.contains(&index))
    }

    pub fn same_tier_count(&self, index: usize) -> usize {
        self.tier_of(index).map_or(0, Tier::len)
    }

    pub fn parent_of(&self, child: usize) -> Option<usize> {
        self.edges
            .iter()
            .find(|edge| edge.child == child)
            .map(|edge| edge.parent)
    }

    /// True for the selected node itself and every node it lists as connected.
    pub fn is_connected(&self, selected: usize, index: usize) -> bool {
        if selected == index {
            return true;
        }
        let (Some(selected_node), Some(node)) = (self.nodes.get(selected), self.nodes.get(index))
        else {
            return false;
        };
        selected_node.connected_to.iter().any(|id| id == &node.id)
    }

    pub fn edge_touches(&self, edge: &TierEdge, index: usize) -> bool {
        edge.parent == index || edge.child == index
    }

    /// Order-sensitive fingerprint of the node placement, for change detection.
    pub fn same_placement(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.edges == other.edges
            && self.nodes.iter().zip(&other.nodes).all(|(a, b)| {
                a.id == b.id && a.level == b.level && a.position == b.position
            })
    }
}
