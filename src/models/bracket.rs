//! Bracket trees as arenas of labeled nodes.
//!
//! Topology is fixed at construction; only a node's assigned player mutates,
//! exactly once, when its dependent match resolves. Nodes are stored in
//! preorder, so searching by index order matches document order and keeps
//! loser routing deterministic.

use serde::Serialize;

/// One slot in a bracket tree. `player` indexes into the tourney's player
/// list; `contestant` is the assigned player's name (for read-only views).
#[derive(Clone, Debug, Serialize)]
pub struct BracketNode {
    pub label: String,
    pub contestant: Option<String>,
    pub player: Option<usize>,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
}

/// An arena-allocated bracket tree, root at index 0.
#[derive(Clone, Debug, Serialize)]
pub struct Bracket {
    nodes: Vec<BracketNode>,
}

impl Bracket {
    /// Upper bracket: a complete binary tree with `stage_count + 1` levels.
    /// Leaves are labeled `Stage1`, internal nodes `Stage{s}` up to the root
    /// `Stage{stage_count + 1}`. For `stage_count == 0` the root is the sole
    /// leaf.
    pub fn upper(stage_count: u32) -> Self {
        let mut bracket = Bracket { nodes: Vec::new() };
        let root = bracket.push(format!("Stage{}", stage_count + 1), None);
        if stage_count > 0 {
            bracket.grow_upper(root, stage_count);
        }
        bracket
    }

    fn grow_upper(&mut self, parent: usize, stage: u32) {
        for _ in 0..2 {
            let child = self.push(format!("Stage{stage}"), Some(parent));
            if stage > 1 {
                self.grow_upper(child, stage - 1);
            }
        }
    }

    /// Lower bracket: alternating minor/major slots per stage. Each level
    /// holds a `Stage{s+1}-Minor` leaf (an upper-bracket loser slot) and a
    /// `Stage{s}-Major` subtree whose `Stage{s}-Major-Sub` children are leaf
    /// slots at the innermost level and nested subtrees elsewhere. For
    /// `stage_count <= 1` the whole bracket degenerates to the single
    /// placeholder node `Stage0`.
    pub fn lower(stage_count: u32) -> Self {
        let mut bracket = Bracket { nodes: Vec::new() };
        if stage_count <= 1 {
            bracket.push("Stage0".to_string(), None);
        } else {
            let root = bracket.push(format!("Stage{stage_count}-Major"), None);
            bracket.grow_lower(root, stage_count - 1);
        }
        bracket
    }

    fn grow_lower(&mut self, parent: usize, stage: u32) {
        self.push(format!("Stage{}-Minor", stage + 1), Some(parent));
        let major = self.push(format!("Stage{stage}-Major"), Some(parent));
        if stage == 1 {
            self.push("Stage1-Major-Sub".to_string(), Some(major));
            self.push("Stage1-Major-Sub".to_string(), Some(major));
        } else {
            let sub_1 = self.push(format!("Stage{stage}-Major-Sub"), Some(major));
            self.grow_lower(sub_1, stage - 1);
            let sub_2 = self.push(format!("Stage{stage}-Major-Sub"), Some(major));
            self.grow_lower(sub_2, stage - 1);
        }
    }

    fn push(&mut self, label: String, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(BracketNode {
            label,
            contestant: None,
            player: None,
            children: Vec::new(),
            parent,
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(index);
        }
        index
    }

    /// Read-only view of all nodes (root at index 0), for presentation.
    pub fn nodes(&self) -> &[BracketNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &BracketNode {
        &self.nodes[index]
    }

    /// Indices of all nodes with this label, in document order.
    pub fn find_all(&self, label: &str) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].label == label)
            .collect()
    }

    /// First node with this label that has no player assigned yet.
    pub fn first_unfilled(&self, label: &str) -> Option<usize> {
        (0..self.nodes.len())
            .find(|&i| self.nodes[i].label == label && self.nodes[i].player.is_none())
    }

    /// Assign a player to a slot. Assignment happens exactly once per node.
    pub fn assign(&mut self, index: usize, player: usize, name: &str) {
        debug_assert!(self.nodes[index].player.is_none(), "slot assigned twice");
        self.nodes[index].player = Some(player);
        self.nodes[index].contestant = Some(name.to_string());
    }

    /// Player assigned to the root slot (the bracket champion), if resolved.
    pub fn root_player(&self) -> Option<usize> {
        self.nodes[0].player
    }

    /// Leaf slots (no children), in document order.
    pub fn leaves(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| self.nodes[i].children.is_empty())
            .collect()
    }
}
