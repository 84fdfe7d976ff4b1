//! Text encoding of tableaux states
//!
//! A state travels between requests as a single line:
//!
//! ```text
//! tableauxstate|{a, b, c}, {d}|[true;p;-;-;i;o;(1,2,3)|a;p;0;-;l;o;()|...]|unconnected;irregular;backtracking|[e0.0]
//! ```
//!
//! The sections are the clause set, the node list (see
//! [`TableauxNode::info`]), the proof parameters and the move history. The
//! encoding is deterministic, so equal states always produce equal strings
//! and the string doubles as a fingerprint.
//!
//! The root has no parent, so its parent slot is always `-`. Encoders that
//! write `0` there for the root produce strings this decoder rejects.
//!
//! Decoding rebuilds the tree by replaying the history on a fresh root and
//! rejects the payload unless the result matches the encoded node list. A
//! hand-edited tree therefore cannot smuggle in an illegal proof.

use super::moves::MoveRecord;
use super::node::TableauxNode;
use super::state::TableauxState;
use crate::config::{Connectedness, TableauxParams};
use crate::error::{KernelError, Result};
use crate::logic::{Atom, Clause, ClauseSet};
use crate::parser::clause_set::{atom, identifier};
use crate::parser::describe_error;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, value},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, separated_pair},
    IResult,
};
use tracing::trace;

const PREFIX: &str = "tableauxstate";

pub fn encode(state: &TableauxState) -> String {
    let nodes: Vec<String> = state.nodes().iter().map(TableauxNode::info).collect();
    let history: Vec<String> = state.history().iter().map(ToString::to_string).collect();

    format!(
        "{}|{}|[{}]|{}|[{}]",
        PREFIX,
        state.clause_set(),
        nodes.join("|"),
        encode_params(state.params()),
        history.join("|")
    )
}

fn encode_params(params: &TableauxParams) -> String {
    format!(
        "{};{};{}",
        params.connectedness.as_str(),
        if params.regular { "regular" } else { "irregular" },
        if params.backtracking { "backtracking" } else { "nobacktracking" }
    )
}

pub fn decode(input: &str) -> Result<TableauxState> {
    let (_, encoded) = all_consuming(encoded_state)(input).map_err(|e| {
        KernelError::malformed(format!("Invalid state encoding: {}", describe_error(input, e)))
    })?;

    let clause_set = build_clause_set(encoded.clauses)?;
    let expected = encoded
        .nodes
        .into_iter()
        .enumerate()
        .map(|(id, node)| node.into_node(id))
        .collect::<Result<Vec<_>>>()?;

    let mut state = TableauxState::new(clause_set, encoded.params);
    for record in encoded.history {
        state.replay(record).map_err(|e| {
            KernelError::malformed(format!("Move history does not replay ({}): {}", record, e))
        })?;
    }

    if state.nodes().len() != expected.len() {
        return Err(KernelError::malformed(format!(
            "Encoded tree has {} nodes, its move history yields {}",
            expected.len(),
            state.nodes().len()
        )));
    }
    if let Some(id) = (0..expected.len()).find(|&id| state.nodes()[id] != expected[id]) {
        return Err(KernelError::malformed(format!(
            "Node {} does not match the move history",
            id
        )));
    }

    trace!(nodes = state.nodes().len(), moves = state.history().len(), "decoded state");
    Ok(state)
}

fn build_clause_set(clauses: Vec<Vec<Atom>>) -> Result<ClauseSet> {
    let mut set = ClauseSet::new();
    for atoms in clauses {
        let count = atoms.len();
        let clause = Clause::new(atoms);
        if clause.len() != count {
            return Err(KernelError::malformed(format!("Duplicate atom in clause {}", clause)));
        }
        let shown = clause.to_string();
        if !set.add(clause) {
            return Err(KernelError::malformed(format!("Duplicate clause {}", shown)));
        }
    }
    Ok(set)
}

struct EncodedState {
    clauses: Vec<Vec<Atom>>,
    nodes: Vec<EncodedNode>,
    params: TableauxParams,
    history: Vec<MoveRecord>,
}

struct EncodedNode {
    spelling: String,
    negated: bool,
    parent: Option<usize>,
    close_ref: Option<usize>,
    leaf: bool,
    closed: bool,
    children: Vec<usize>,
}

impl EncodedNode {
    /// Check the redundant flags against the structure they summarize
    fn into_node(self, id: usize) -> Result<TableauxNode> {
        if self.leaf != self.children.is_empty() {
            return Err(KernelError::malformed(format!(
                "Node {} has an inconsistent leaf marker",
                id
            )));
        }
        if self.closed != self.close_ref.is_some() {
            return Err(KernelError::malformed(format!(
                "Node {} has an inconsistent close marker",
                id
            )));
        }
        Ok(TableauxNode {
            parent: self.parent,
            spelling: self.spelling,
            negated: self.negated,
            children: self.children,
            is_closed: self.closed,
            close_ref: self.close_ref,
        })
    }
}

fn index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn optional_index(input: &str) -> IResult<&str, Option<usize>> {
    alt((value(None, char('-')), map(index, Some)))(input)
}

fn flag<'a>(yes: &'static str, no: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, bool> {
    alt((value(true, tag(yes)), value(false, tag(no))))
}

fn encoded_clause(input: &str) -> IResult<&str, Vec<Atom>> {
    delimited(char('{'), separated_list1(tag(", "), atom), char('}'))(input)
}

fn encoded_node(input: &str) -> IResult<&str, EncodedNode> {
    let (input, spelling) = identifier(input)?;
    let (input, negated) = preceded(char(';'), flag("n", "p"))(input)?;
    let (input, parent) = preceded(char(';'), optional_index)(input)?;
    let (input, close_ref) = preceded(char(';'), optional_index)(input)?;
    let (input, leaf) = preceded(char(';'), flag("l", "i"))(input)?;
    let (input, closed) = preceded(char(';'), flag("c", "o"))(input)?;
    let (input, children) = preceded(
        char(';'),
        delimited(char('('), separated_list0(char(','), index), char(')')),
    )(input)?;

    Ok((
        input,
        EncodedNode {
            spelling: spelling.to_string(),
            negated,
            parent,
            close_ref,
            leaf,
            closed,
            children,
        },
    ))
}

fn encoded_params(input: &str) -> IResult<&str, TableauxParams> {
    let (input, connectedness) = alt((
        value(Connectedness::Unconnected, tag("unconnected")),
        value(Connectedness::Weak, tag("weak")),
        value(Connectedness::Strong, tag("strong")),
    ))(input)?;
    let (input, regular) = preceded(char(';'), flag("regular", "irregular"))(input)?;
    let (input, backtracking) = preceded(char(';'), flag("backtracking", "nobacktracking"))(input)?;

    Ok((input, TableauxParams { connectedness, regular, backtracking }))
}

fn encoded_record(input: &str) -> IResult<&str, MoveRecord> {
    alt((
        map(
            preceded(char('e'), separated_pair(index, char('.'), index)),
            |(leaf, clause)| MoveRecord::Expand { leaf, clause },
        ),
        map(
            preceded(char('c'), separated_pair(index, char('.'), index)),
            |(leaf, ancestor)| MoveRecord::Close { leaf, ancestor },
        ),
    ))(input)
}

fn encoded_state(input: &str) -> IResult<&str, EncodedState> {
    let (input, _) = tag(PREFIX)(input)?;
    let (input, clauses) = preceded(char('|'), separated_list1(tag(", "), encoded_clause))(input)?;
    let (input, nodes) = delimited(tag("|["), separated_list1(char('|'), encoded_node), char(']'))(input)?;
    let (input, params) = preceded(char('|'), encoded_params)(input)?;
    let (input, history) = delimited(tag("|["), separated_list0(char('|'), encoded_record), char(']'))(input)?;

    Ok((input, EncodedState { clauses, nodes, params, history }))
}
