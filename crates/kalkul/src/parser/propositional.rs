//! Parser for infix propositional formulas
//!
//! Binding strength, tightest first: `!`, `&`, `|`, `->` (also `=>`),
//! `<->` (also `<=>`). Implication associates to the right, everything else
//! to the left.

use super::clause_set::identifier;
use super::{describe_error, ws};
use crate::error::{KernelError, Result};
use crate::logic::Formula;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, opt},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::preceded,
    IResult,
};

/// Deepest recursion the parser enters: parentheses, negations and
/// right-nested implications
pub const MAX_NESTING: usize = 128;

/// Greatest height of a parsed formula tree. Operator chains such as
/// `a & b & c` only grow the tree, not the recursion of the parser.
pub const MAX_HEIGHT: usize = 500;

/// A parsed sub-formula together with its height
type Nested = (Formula, usize);

fn too_deep(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))
}

fn build<'a>(input: &'a str, formula: Formula, height: usize) -> IResult<&'a str, Nested> {
    if height > MAX_HEIGHT {
        return Err(too_deep(input));
    }
    Ok((input, (formula, height)))
}

fn fold_left<'a>(
    input: &'a str,
    first: Nested,
    rest: Vec<Nested>,
    op: fn(Formula, Formula) -> Formula,
) -> IResult<&'a str, Nested> {
    let mut acc = first;
    for (right, height) in rest {
        let height = acc.1.max(height) + 1;
        acc = build(input, op(acc.0, right), height)?.1;
    }
    Ok((input, acc))
}

fn equivalence(input: &str, depth: usize) -> IResult<&str, Nested> {
    let (input, first) = implication(input, depth)?;
    let (input, rest) = many0(preceded(ws(alt((tag("<->"), tag("<=>")))), |i| {
        implication(i, depth)
    }))(input)?;
    fold_left(input, first, rest, Formula::equiv)
}

fn implication(input: &str, depth: usize) -> IResult<&str, Nested> {
    if depth > MAX_NESTING {
        return Err(too_deep(input));
    }
    let (input, (left, left_height)) = disjunction(input, depth)?;
    let (input, right) = opt(preceded(ws(alt((tag("->"), tag("=>")))), |i| {
        implication(i, depth + 1)
    }))(input)?;
    match right {
        Some((right, right_height)) => build(
            input,
            Formula::implies(left, right),
            left_height.max(right_height) + 1,
        ),
        None => Ok((input, (left, left_height))),
    }
}

fn disjunction(input: &str, depth: usize) -> IResult<&str, Nested> {
    let (input, first) = conjunction(input, depth)?;
    let (input, rest) = many0(preceded(ws(char('|')), |i| conjunction(i, depth)))(input)?;
    fold_left(input, first, rest, Formula::or)
}

fn conjunction(input: &str, depth: usize) -> IResult<&str, Nested> {
    let (input, first) = unary(input, depth)?;
    let (input, rest) = many0(preceded(ws(char('&')), |i| unary(i, depth)))(input)?;
    fold_left(input, first, rest, Formula::and)
}

fn unary(input: &str, depth: usize) -> IResult<&str, Nested> {
    if depth > MAX_NESTING {
        return Err(too_deep(input));
    }
    if let Ok((rest, _)) = ws(char('!'))(input) {
        let (rest, (inner, height)) = unary(rest, depth + 1)?;
        return build(rest, Formula::not(inner), height + 1);
    }
    if let Ok((rest, _)) = ws(char('('))(input) {
        let (rest, inner) = equivalence(rest, depth + 1)?;
        let (rest, _) = ws(char(')'))(rest)?;
        return Ok((rest, inner));
    }
    let (rest, name) = ws(identifier)(input)?;
    Ok((rest, (Formula::var(name), 0)))
}

/// Parse an infix formula such as `!(a & b) -> c`
pub fn parse_formula(input: &str) -> Result<Formula> {
    if input.trim().is_empty() {
        return Err(KernelError::invalid_formula("Empty formula"));
    }

    match all_consuming(ws(|i| equivalence(i, 0)))(input) {
        Ok((_, (formula, _))) => Ok(formula),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(KernelError::invalid_formula(format!(
                "Formula is nested too deeply at position {}",
                input.len() - e.input.len()
            )))
        }
        Err(e) => Err(KernelError::invalid_formula(describe_error(input, e))),
    }
}
