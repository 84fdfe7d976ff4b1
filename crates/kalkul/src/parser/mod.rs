//! Input parsers and CNF conversion

pub mod clause_set;
pub mod cnf_conversion;
pub mod propositional;

pub use clause_set::parse_clause_set;
pub use cnf_conversion::{formula_to_cnf, naive_cnf, tseytin_cnf, CnfConversionError};
pub use propositional::parse_formula;

use crate::config::CnfStrategy;
use crate::error::Result;
use crate::logic::ClauseSet;
use nom::{character::complete::multispace0, sequence::delimited, IResult};
use tracing::debug;

/// Wrap a parser so it skips surrounding whitespace
pub(crate) fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Turn a nom error into a message pointing at the offending input
pub(crate) fn describe_error(input: &str, err: nom::Err<nom::error::Error<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let position = input.len() - e.input.len();
            let found: String = e.input.chars().take(10).collect();
            if found.is_empty() {
                format!("Unexpected end of input at position {}", position)
            } else {
                format!("Unexpected '{}' at position {}", found, position)
            }
        }
        nom::Err::Incomplete(_) => "Unexpected end of input".to_string(),
    }
}

fn has_formula_syntax(input: &str) -> bool {
    input
        .chars()
        .any(|c| matches!(c, '&' | '|' | '(' | ')' | '>'))
}

/// Parse either clause set notation or an infix formula.
///
/// Clause set notation is tried first; anything else goes through the
/// formula parser and the given CNF strategy.
pub fn parse_flexible(
    input: &str,
    strategy: CnfStrategy,
    limit: Option<usize>,
) -> Result<ClauseSet> {
    let clause_err = match parse_clause_set(input) {
        Ok(clauses) => return Ok(clauses),
        Err(e) => e,
    };

    if !has_formula_syntax(input) {
        return Err(clause_err);
    }

    let formula = parse_formula(input)?;
    debug!(formula = %formula, ?strategy, "parsed infix formula");
    Ok(formula_to_cnf(&formula, strategy, limit)?)
}
