//! Clause tableaux proof state and its move rules
//!
//! ## Tree
//!
//! The tree is an arena of [`TableauxNode`]s. Index 0 is the synthetic root
//! spelled `true`; it has no parent and can never serve as the partner of a
//! close. Children are appended, so every node's index exceeds its parent's.
//!
//! ## Moves
//!
//! - **Expand** `(leaf, clause)`: append one child per atom of the clause,
//!   in atom order, below an open leaf.
//! - **Close** `(leaf, ancestor)`: mark an open leaf closed against a strict
//!   ancestor carrying the complementary literal.
//! - **Backtrack**: undo the most recent expand or close.
//!
//! Every move is validated completely before the tree is touched, so a
//! rejected move leaves the state exactly as it was.
//!
//! ## Parameters
//!
//! - **Regular**: no literal may occur twice on a branch. An expansion is
//!   rejected if any of its atoms already sits on the path from the root
//!   (exclusive) to the leaf (inclusive).
//! - **Weak connectedness**: the clause must mention the leaf's variable.
//! - **Strong connectedness**: the clause must contain the leaf's complement.
//!
//! Connectedness does not constrain the expansion of the root.

use super::moves::{MoveRecord, TableauxMove};
use super::node::{TableauxNode, ROOT};
use crate::config::{Connectedness, TableauxParams};
use crate::error::{KernelError, Result};
use crate::logic::{Atom, Clause, ClauseSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauxState {
    clause_set: ClauseSet,
    nodes: Vec<TableauxNode>,
    params: TableauxParams,
    history: Vec<MoveRecord>,
}

impl TableauxState {
    /// Fresh proof: the given clauses and a lone open root
    pub fn new(clause_set: ClauseSet, params: TableauxParams) -> Self {
        TableauxState {
            clause_set,
            nodes: vec![TableauxNode::root()],
            params,
            history: Vec::new(),
        }
    }

    pub fn clause_set(&self) -> &ClauseSet {
        &self.clause_set
    }

    pub fn nodes(&self) -> &[TableauxNode] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&TableauxNode> {
        self.nodes.get(id)
    }

    pub fn params(&self) -> &TableauxParams {
        &self.params
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn leaves(&self) -> impl Iterator<Item = (usize, &TableauxNode)> {
        self.nodes.iter().enumerate().filter(|(_, n)| n.is_leaf())
    }

    pub fn open_leaf_count(&self) -> usize {
        self.leaves().filter(|(_, n)| !n.is_closed).count()
    }

    /// True once every leaf is closed. A tree that is only the root is open.
    pub fn is_closed(&self) -> bool {
        self.open_leaf_count() == 0
    }

    /// Node ids from `id` up to the root, both inclusive
    pub fn path_to_root(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(id), move |&n| self.nodes.get(n).and_then(|node| node.parent))
    }

    /// True if `ancestor` lies strictly above `id`
    pub fn is_ancestor(&self, ancestor: usize, id: usize) -> bool {
        self.path_to_root(id).skip(1).any(|n| n == ancestor)
    }

    pub fn apply(&mut self, mv: TableauxMove) -> Result<()> {
        match mv {
            TableauxMove::Expand { leaf, clause } => self.expand(leaf, clause),
            TableauxMove::Close { leaf, ancestor } => self.close(leaf, ancestor),
            TableauxMove::Backtrack => self.backtrack(),
        }
    }

    pub fn expand(&mut self, leaf: usize, clause: usize) -> Result<()> {
        let atoms: Vec<Atom> = self.check_expand(leaf, clause)?.atoms().cloned().collect();

        for atom in &atoms {
            let id = self.nodes.len();
            self.nodes.push(TableauxNode::new(leaf, atom));
            self.nodes[leaf].children.push(id);
        }
        self.history.push(MoveRecord::Expand { leaf, clause });

        debug!(leaf, clause, added = atoms.len(), "expanded");
        Ok(())
    }

    pub fn close(&mut self, leaf: usize, ancestor: usize) -> Result<()> {
        self.check_close(leaf, ancestor)?;

        let node = &mut self.nodes[leaf];
        node.is_closed = true;
        node.close_ref = Some(ancestor);
        self.history.push(MoveRecord::Close { leaf, ancestor });

        debug!(leaf, ancestor, "closed branch");
        Ok(())
    }

    pub fn backtrack(&mut self) -> Result<()> {
        if !self.params.backtracking {
            return Err(KernelError::illegal_move(
                "Backtracking is not enabled for this proof",
            ));
        }
        let record = self
            .history
            .pop()
            .ok_or_else(|| KernelError::illegal_move("Nothing to undo: no move has been made yet"))?;

        match record {
            MoveRecord::Expand { leaf, .. } => {
                // Later moves have been undone already, so the leaf's
                // children are the newest nodes
                let added = self.nodes[leaf].children.len();
                self.nodes.truncate(self.nodes.len() - added);
                self.nodes[leaf].children.clear();
            }
            MoveRecord::Close { leaf, .. } => {
                let node = &mut self.nodes[leaf];
                node.is_closed = false;
                node.close_ref = None;
            }
        }

        debug!(undone = %record, "backtracked");
        Ok(())
    }

    /// Apply a recorded move without touching the backtracking gate
    pub(crate) fn replay(&mut self, record: MoveRecord) -> Result<()> {
        match record {
            MoveRecord::Expand { leaf, clause } => self.expand(leaf, clause),
            MoveRecord::Close { leaf, ancestor } => self.close(leaf, ancestor),
        }
    }

    fn open_leaf(&self, id: usize) -> Result<&TableauxNode> {
        let node = self.node(id).ok_or_else(|| {
            KernelError::illegal_move(format!("Node with ID {} does not exist", id))
        })?;
        if !node.is_leaf() {
            return Err(KernelError::illegal_move(format!(
                "Node '{}' (ID {}) is not a leaf",
                node, id
            )));
        }
        if node.is_closed {
            return Err(KernelError::illegal_move(format!(
                "Node '{}' (ID {}) is already closed",
                node, id
            )));
        }
        Ok(node)
    }

    fn check_expand(&self, leaf: usize, clause_id: usize) -> Result<&Clause> {
        let node = self.open_leaf(leaf)?;
        let clause = self.clause_set.clause(clause_id).ok_or_else(|| {
            KernelError::illegal_move(format!("Clause with ID {} does not exist", clause_id))
        })?;

        if self.params.regular {
            self.check_regular(leaf, clause)?;
        }
        if leaf != ROOT {
            check_connected(self.params.connectedness, node, clause)?;
        }
        Ok(clause)
    }

    fn check_regular(&self, leaf: usize, clause: &Clause) -> Result<()> {
        let on_branch = self
            .path_to_root(leaf)
            .filter(|&id| id != ROOT)
            .filter_map(|id| self.nodes.get(id));

        for node in on_branch {
            if let Some(atom) = clause.atoms().find(|atom| node.carries(atom)) {
                return Err(KernelError::illegal_move(format!(
                    "Expanding this clause would introduce a duplicate node '{}' on the branch, making the tree irregular",
                    atom
                )));
            }
        }
        Ok(())
    }

    fn check_close(&self, leaf: usize, ancestor: usize) -> Result<()> {
        let leaf_node = self.open_leaf(leaf)?;
        let ancestor_node = self.node(ancestor).ok_or_else(|| {
            KernelError::illegal_move(format!("Node with ID {} does not exist", ancestor))
        })?;

        if ancestor == ROOT {
            return Err(KernelError::illegal_move(
                "The root node cannot be used for branch closure",
            ));
        }
        if !self.is_ancestor(ancestor, leaf) {
            return Err(KernelError::illegal_move(format!(
                "Node '{}' (ID {}) is not an ancestor of leaf '{}' (ID {})",
                ancestor_node, ancestor, leaf_node, leaf
            )));
        }
        if !leaf_node.is_complement_of(ancestor_node) {
            return Err(KernelError::illegal_move(format!(
                "Leaf '{}' is not the negation of ancestor '{}'",
                leaf_node, ancestor_node
            )));
        }
        Ok(())
    }
}

fn check_connected(mode: Connectedness, leaf: &TableauxNode, clause: &Clause) -> Result<()> {
    let connected = match mode {
        Connectedness::Unconnected => return Ok(()),
        Connectedness::Weak => clause.atoms().any(|atom| atom.lit == leaf.spelling),
        Connectedness::Strong => {
            let complement = leaf.atom().complement();
            clause.contains(&complement)
        }
    };

    if connected {
        Ok(())
    } else {
        Err(KernelError::illegal_move(format!(
            "Expanding clause {} below '{}' would violate {} connectedness",
            clause,
            leaf,
            mode.as_str()
        )))
    }
}
