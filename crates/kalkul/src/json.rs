//! JSON view of tableaux states for clients that draw the proof tree

use crate::config::TableauxParams;
use crate::logic::Atom;
use crate::tableaux::{encode, TableauxNode, TableauxState};
use serde::{Deserialize, Serialize};

/// JSON representation of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeJson {
    pub id: usize,
    pub parent: Option<usize>,
    pub spelling: String,
    pub negated: bool,
    pub children: Vec<usize>,
    pub is_closed: bool,
    pub close_ref: Option<usize>,
}

impl NodeJson {
    pub fn from_node(id: usize, node: &TableauxNode) -> Self {
        NodeJson {
            id,
            parent: node.parent(),
            spelling: node.spelling().to_string(),
            negated: node.negated(),
            children: node.children().to_vec(),
            is_closed: node.is_closed(),
            close_ref: node.close_ref(),
        }
    }
}

/// Complete state with its wire encoding attached
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableauxStateJson {
    pub clause_set: Vec<Vec<Atom>>,
    pub nodes: Vec<NodeJson>,
    pub params: TableauxParams,
    pub state: String,
    pub closed: bool,
}

impl TableauxStateJson {
    pub fn from_state(state: &TableauxState) -> Self {
        TableauxStateJson {
            clause_set: state
                .clause_set()
                .clauses()
                .map(|c| c.atoms().cloned().collect())
                .collect(),
            nodes: state
                .nodes()
                .iter()
                .enumerate()
                .map(|(id, node)| NodeJson::from_node(id, node))
                .collect(),
            params: *state.params(),
            state: encode(state),
            closed: state.is_closed(),
        }
    }
}
