//! Conversion from propositional formulas to CNF
//!
//! Two strategies are available:
//! - naive: De Morgan plus distribution of Or over And. Logically equivalent
//!   to the input, exponential in the worst case.
//! - Tseytin: one fresh variable per compound sub-formula. Equisatisfiable
//!   with the input, linear in size.

use crate::config::CnfStrategy;
use crate::error::KernelError;
use crate::logic::{Atom, Clause, ClauseSet, Formula};
use indexmap::IndexSet;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Error during CNF conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CnfConversionError {
    #[error("naive CNF transformation would produce more than {limit} clauses")]
    Blowup { limit: usize },
}

impl From<CnfConversionError> for KernelError {
    fn from(e: CnfConversionError) -> Self {
        KernelError::InvalidFormulaFormat(e.to_string())
    }
}

/// Convert a formula to a clause set with the given strategy.
///
/// `limit` bounds the number of clauses the naive strategy may produce at
/// any intermediate step. `Optimal` falls back to Tseytin when it is hit.
pub fn formula_to_cnf(
    formula: &Formula,
    strategy: CnfStrategy,
    limit: Option<usize>,
) -> Result<ClauseSet, CnfConversionError> {
    let clauses = match strategy {
        CnfStrategy::Naive => naive_cnf(formula, limit)?,
        CnfStrategy::Tseytin => tseytin_cnf(formula),
        CnfStrategy::Optimal => match naive_cnf(formula, limit) {
            Ok(clauses) => clauses,
            Err(CnfConversionError::Blowup { limit }) => {
                debug!(limit, "naive CNF exceeded limit, using Tseytin");
                tseytin_cnf(formula)
            }
        },
    };
    debug!(
        ?strategy,
        clauses = clauses.len(),
        variables = clauses.variable_count(),
        "converted formula to CNF"
    );
    Ok(clauses)
}

// =============================================================================
// Naive
// =============================================================================

/// Naive CNF transformation.
///
/// Negations are pushed inwards while descending, disjunctions are
/// distributed with the left operand's clauses as the outer loop.
/// Implications and equivalences are expanded on the operands' clause sets,
/// and each sub-formula is translated at most once per polarity.
pub fn naive_cnf(formula: &Formula, limit: Option<usize>) -> Result<ClauseSet, CnfConversionError> {
    NaiveEncoder::new(limit).distribute(formula, false)
}

/// Translated sub-formulas, keyed by node address and polarity
type Translations = HashMap<(*const Formula, bool), Result<ClauseSet, CnfConversionError>>;

struct NaiveEncoder {
    limit: Option<usize>,
    done: Translations,
}

impl NaiveEncoder {
    fn new(limit: Option<usize>) -> Self {
        NaiveEncoder { limit, done: HashMap::new() }
    }

    fn distribute(
        &mut self,
        formula: &Formula,
        negated: bool,
    ) -> Result<ClauseSet, CnfConversionError> {
        let key = (formula as *const Formula, negated);
        if let Some(done) = self.done.get(&key) {
            return done.clone();
        }
        let result = self.translate(formula, negated);
        self.done.insert(key, result.clone());
        result
    }

    fn translate(
        &mut self,
        formula: &Formula,
        negated: bool,
    ) -> Result<ClauseSet, CnfConversionError> {
        match (formula, negated) {
            (Formula::Var(name), negated) => {
                let mut set = ClauseSet::new();
                set.add(Clause::unit(Atom::new(name.clone(), negated)));
                Ok(set)
            }
            (Formula::Not(inner), negated) => self.distribute(inner, !negated),
            // ~(A | B) = ~A & ~B
            (Formula::And(l, r), false) | (Formula::Or(l, r), true) => {
                let left = self.distribute(l, negated)?;
                let right = self.distribute(r, negated)?;
                self.conjoin(left, right)
            }
            // ~(A & B) = ~A | ~B
            (Formula::Or(l, r), false) | (Formula::And(l, r), true) => {
                let left = self.distribute(l, negated)?;
                let right = self.distribute(r, negated)?;
                self.disjoin(&left, &right)
            }
            // A -> B = ~A | B
            (Formula::Impl(l, r), false) => {
                let left = self.distribute(l, true)?;
                let right = self.distribute(r, false)?;
                self.disjoin(&left, &right)
            }
            // ~(A -> B) = A & ~B
            (Formula::Impl(l, r), true) => {
                let left = self.distribute(l, false)?;
                let right = self.distribute(r, true)?;
                self.conjoin(left, right)
            }
            // A <-> B = (A & B) | (~A & ~B)
            (Formula::Equiv(l, r), false) => {
                let (l_pos, r_pos) = (self.distribute(l, false)?, self.distribute(r, false)?);
                let both = self.conjoin(l_pos, r_pos)?;
                let (l_neg, r_neg) = (self.distribute(l, true)?, self.distribute(r, true)?);
                let neither = self.conjoin(l_neg, r_neg)?;
                self.disjoin(&both, &neither)
            }
            // ~(A <-> B) = (~A | ~B) & (A | B)
            (Formula::Equiv(l, r), true) => {
                let (l_neg, r_neg) = (self.distribute(l, true)?, self.distribute(r, true)?);
                let not_both = self.disjoin(&l_neg, &r_neg)?;
                let (l_pos, r_pos) = (self.distribute(l, false)?, self.distribute(r, false)?);
                let either = self.disjoin(&l_pos, &r_pos)?;
                self.conjoin(not_both, either)
            }
        }
    }

    fn conjoin(
        &self,
        mut left: ClauseSet,
        right: ClauseSet,
    ) -> Result<ClauseSet, CnfConversionError> {
        check_limit(left.len() + right.len(), self.limit)?;
        left.add_all(right);
        Ok(left)
    }

    fn disjoin(
        &self,
        left: &ClauseSet,
        right: &ClauseSet,
    ) -> Result<ClauseSet, CnfConversionError> {
        check_limit(left.len().saturating_mul(right.len()), self.limit)?;
        let mut result = ClauseSet::new();
        for l in left.clauses() {
            for r in right.clauses() {
                result.add(l.merge(r));
            }
        }
        Ok(result)
    }
}

fn check_limit(size: usize, limit: Option<usize>) -> Result<(), CnfConversionError> {
    match limit {
        Some(limit) if size > limit => Err(CnfConversionError::Blowup { limit }),
        _ => Ok(()),
    }
}

// =============================================================================
// Tseytin
// =============================================================================

/// Tseytin transformation.
///
/// Auxiliary variables are numbered in post-order, left before right, and
/// only compound sub-formulas get one. The first clause asserts the root.
pub fn tseytin_cnf(formula: &Formula) -> ClauseSet {
    let mut encoder = TseytinEncoder::new(formula.variables());
    let root = encoder.encode(formula);

    let mut clauses = ClauseSet::new();
    clauses.add(Clause::unit(Atom::positive(root)));
    clauses.add_all(encoder.clauses);
    clauses
}

struct TseytinEncoder {
    counter: usize,
    /// Names of the input's own variables, never handed out as auxiliaries
    reserved: IndexSet<String>,
    clauses: Vec<Clause>,
}

impl TseytinEncoder {
    fn new(reserved: IndexSet<String>) -> Self {
        TseytinEncoder {
            counter: 0,
            reserved,
            clauses: Vec::new(),
        }
    }

    fn fresh(&mut self, tag: &str) -> String {
        loop {
            let name = format!("{}{}", tag, self.counter);
            self.counter += 1;
            if !self.reserved.contains(&name) {
                trace!(name = %name, "allocated Tseytin variable");
                return name;
            }
        }
    }

    fn emit(&mut self, atoms: Vec<Atom>) {
        self.clauses.push(Clause::new(atoms));
    }

    /// Encode a sub-formula and return the variable that stands for it
    fn encode(&mut self, formula: &Formula) -> String {
        match formula {
            Formula::Var(name) => name.clone(),
            Formula::Not(inner) => {
                let c = self.encode(inner);
                let n = self.fresh("not");
                self.emit(vec![neg(&c), neg(&n)]);
                self.emit(vec![pos(&c), pos(&n)]);
                n
            }
            Formula::And(l, r) => {
                let l = self.encode(l);
                let r = self.encode(r);
                let n = self.fresh("and");
                self.emit(vec![pos(&l), neg(&n)]);
                self.emit(vec![pos(&r), neg(&n)]);
                self.emit(vec![neg(&l), neg(&r), pos(&n)]);
                n
            }
            Formula::Or(l, r) => {
                let l = self.encode(l);
                let r = self.encode(r);
                let n = self.fresh("or");
                self.emit(vec![neg(&l), pos(&n)]);
                self.emit(vec![neg(&r), pos(&n)]);
                self.emit(vec![pos(&l), pos(&r), neg(&n)]);
                n
            }
            Formula::Impl(l, r) => {
                let l = self.encode(l);
                let r = self.encode(r);
                let n = self.fresh("impl");
                self.emit(vec![pos(&l), pos(&n)]);
                self.emit(vec![neg(&r), pos(&n)]);
                self.emit(vec![neg(&l), pos(&r), neg(&n)]);
                n
            }
            Formula::Equiv(l, r) => {
                let l = self.encode(l);
                let r = self.encode(r);
                let n = self.fresh("equiv");
                self.emit(vec![pos(&l), neg(&r), neg(&n)]);
                self.emit(vec![neg(&l), pos(&r), neg(&n)]);
                self.emit(vec![neg(&l), neg(&r), pos(&n)]);
                self.emit(vec![pos(&l), pos(&r), pos(&n)]);
                n
            }
        }
    }
}

fn pos(name: &str) -> Atom {
    Atom::positive(name)
}

fn neg(name: &str) -> Atom {
    Atom::negative(name)
}
