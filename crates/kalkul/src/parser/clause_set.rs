//! Parser for the clause set notation
//!
//! `a,!b;c` is the set of clauses `{a, !b}` and `{c}`: commas separate
//! literals, semicolons separate clauses, `!` negates a variable. The
//! notation has no room for whitespace, not even at the ends.

use super::describe_error;
use crate::error::{KernelError, Result};
use crate::logic::{Atom, Clause, ClauseSet};
use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    sequence::pair,
    IResult,
};

/// Variable names: ASCII letters, digits and underscores
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// A literal: variable name with an optional `!` directly in front
pub(crate) fn atom(input: &str) -> IResult<&str, Atom> {
    map(pair(opt(char('!')), identifier), |(bang, name)| {
        Atom::new(name, bang.is_some())
    })(input)
}

fn clause(input: &str) -> IResult<&str, Clause> {
    map(separated_list1(char(','), atom), Clause::new)(input)
}

fn clause_set(input: &str) -> IResult<&str, ClauseSet> {
    map(separated_list1(char(';'), clause), |clauses| {
        clauses.into_iter().collect()
    })(input)
}

/// Parse a clause set such as `a,b;!a,c`.
///
/// Empty clauses, dangling separators, whitespace and anything that is not
/// a literal are rejected.
pub fn parse_clause_set(input: &str) -> Result<ClauseSet> {
    if input.is_empty() {
        return Err(KernelError::invalid_formula("Empty formula"));
    }

    all_consuming(clause_set)(input)
        .map(|(_, set)| set)
        .map_err(|e| KernelError::invalid_formula(describe_error(input, e)))
}
