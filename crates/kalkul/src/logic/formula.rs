//! Propositional formula representation

use indexmap::IndexSet;
use std::fmt;

/// Propositional formula
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// Propositional variable
    Var(String),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Impl(Box<Formula>, Box<Formula>),
    /// Biconditional
    Equiv(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(f: Formula) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn and(l: Formula, r: Formula) -> Self {
        Formula::And(Box::new(l), Box::new(r))
    }

    pub fn or(l: Formula, r: Formula) -> Self {
        Formula::Or(Box::new(l), Box::new(r))
    }

    pub fn implies(l: Formula, r: Formula) -> Self {
        Formula::Impl(Box::new(l), Box::new(r))
    }

    pub fn equiv(l: Formula, r: Formula) -> Self {
        Formula::Equiv(Box::new(l), Box::new(r))
    }

    /// Rewrite implications and biconditionals into negation, conjunction and
    /// disjunction
    pub fn to_basic_ops(&self) -> Formula {
        match self {
            Formula::Var(name) => Formula::Var(name.clone()),
            Formula::Not(f) => Formula::not(f.to_basic_ops()),
            Formula::And(l, r) => Formula::and(l.to_basic_ops(), r.to_basic_ops()),
            Formula::Or(l, r) => Formula::or(l.to_basic_ops(), r.to_basic_ops()),
            // A -> B  =  !A | B
            Formula::Impl(l, r) => Formula::or(Formula::not(l.to_basic_ops()), r.to_basic_ops()),
            // A <-> B  =  (A & B) | (!A & !B)
            Formula::Equiv(l, r) => {
                let l = l.to_basic_ops();
                let r = r.to_basic_ops();
                Formula::or(
                    Formula::and(l.clone(), r.clone()),
                    Formula::and(Formula::not(l), Formula::not(r)),
                )
            }
        }
    }

    /// Variable names in order of first occurrence (left to right)
    pub fn variables(&self) -> IndexSet<String> {
        let mut vars = IndexSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut IndexSet<String>) {
        match self {
            Formula::Var(name) => {
                vars.insert(name.clone());
            }
            Formula::Not(f) => f.collect_variables(vars),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Impl(l, r)
            | Formula::Equiv(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }

    /// Number of nodes in the syntax tree
    pub fn size(&self) -> usize {
        match self {
            Formula::Var(_) => 1,
            Formula::Not(f) => 1 + f.size(),
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Impl(l, r)
            | Formula::Equiv(l, r) => 1 + l.size() + r.size(),
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Formula::Var(_))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Var(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "!{}", inner),
            Formula::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Formula::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Formula::Impl(l, r) => write!(f, "({} → {})", l, r),
            Formula::Equiv(l, r) => write!(f, "({} ↔ {})", l, r),
        }
    }
}
