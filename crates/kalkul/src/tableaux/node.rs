//! Nodes of the tableaux proof tree

use crate::logic::Atom;
use std::fmt;

/// Index of the synthetic root node
pub const ROOT: usize = 0;

/// Spelling of the synthetic root node
pub const ROOT_SPELLING: &str = "true";

/// One node of the proof tree.
///
/// Nodes live in an arena owned by the state; `parent` and `children`
/// are indices into it and a parent always has a smaller index than its
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauxNode {
    pub(crate) parent: Option<usize>,
    pub(crate) spelling: String,
    pub(crate) negated: bool,
    pub(crate) children: Vec<usize>,
    pub(crate) is_closed: bool,
    pub(crate) close_ref: Option<usize>,
}

impl TableauxNode {
    pub fn root() -> Self {
        TableauxNode {
            parent: None,
            spelling: ROOT_SPELLING.to_string(),
            negated: false,
            children: Vec::new(),
            is_closed: false,
            close_ref: None,
        }
    }

    pub fn new(parent: usize, atom: &Atom) -> Self {
        TableauxNode {
            parent: Some(parent),
            spelling: atom.lit.clone(),
            negated: atom.negated,
            children: Vec::new(),
            is_closed: false,
            close_ref: None,
        }
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn close_ref(&self) -> Option<usize> {
        self.close_ref
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The literal this node carries
    pub fn atom(&self) -> Atom {
        Atom::new(self.spelling.clone(), self.negated)
    }

    pub fn carries(&self, atom: &Atom) -> bool {
        self.spelling == atom.lit && self.negated == atom.negated
    }

    pub fn is_complement_of(&self, other: &TableauxNode) -> bool {
        self.spelling == other.spelling && self.negated != other.negated
    }

    /// Canonical fragment used by the state encoding:
    /// `spelling;polarity;parent;closeRef;leaf;closed;(children)`
    pub fn info(&self) -> String {
        let children: Vec<String> = self.children.iter().map(ToString::to_string).collect();
        format!(
            "{};{};{};{};{};{};({})",
            self.spelling,
            if self.negated { "n" } else { "p" },
            index_or_dash(self.parent),
            index_or_dash(self.close_ref),
            if self.is_leaf() { "l" } else { "i" },
            if self.is_closed { "c" } else { "o" },
            children.join(",")
        )
    }
}

fn index_or_dash(idx: Option<usize>) -> String {
    idx.map_or_else(|| "-".to_string(), |i| i.to_string())
}

impl fmt::Display for TableauxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.spelling)
    }
}
