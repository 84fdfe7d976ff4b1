//! Atoms, clauses and clause sets

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A propositional variable with a negation flag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    pub lit: String,
    pub negated: bool,
}

impl Atom {
    pub fn new(lit: impl Into<String>, negated: bool) -> Self {
        Atom {
            lit: lit.into(),
            negated,
        }
    }

    /// Create a positive atom
    pub fn positive(lit: impl Into<String>) -> Self {
        Atom::new(lit, false)
    }

    /// Create a negative atom
    pub fn negative(lit: impl Into<String>) -> Self {
        Atom::new(lit, true)
    }

    /// Get the complement of this atom
    pub fn complement(&self) -> Atom {
        Atom {
            lit: self.lit.clone(),
            negated: !self.negated,
        }
    }

    /// Same variable, opposite polarity
    pub fn is_complement_of(&self, other: &Atom) -> bool {
        self.lit == other.lit && self.negated != other.negated
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}", self.lit)
    }
}

/// A clause (disjunction of atoms).
///
/// Duplicate atoms collapse, insertion order is kept for rendering and for
/// the order in which an expansion creates child nodes. Equality ignores
/// order. Tautological clauses are kept as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clause {
    atoms: IndexSet<Atom>,
}

impl Clause {
    pub fn new(atoms: impl IntoIterator<Item = Atom>) -> Self {
        Clause {
            atoms: atoms.into_iter().collect(),
        }
    }

    pub fn unit(atom: Atom) -> Self {
        Clause::new([atom])
    }

    pub fn atoms(&self) -> impl ExactSizeIterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn atom(&self, idx: usize) -> Option<&Atom> {
        self.atoms.get_index(idx)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.atoms.len() == 1
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.contains(atom)
    }

    /// Returns false if the atom was already present
    pub fn add(&mut self, atom: Atom) -> bool {
        self.atoms.insert(atom)
    }

    /// Disjunction of two clauses: own atoms first, then the other's new ones
    pub fn merge(&self, other: &Clause) -> Clause {
        let mut merged = self.clone();
        for atom in other.atoms() {
            merged.add(atom.clone());
        }
        merged
    }

    /// Check for a pair of complementary atoms
    pub fn is_tautology(&self) -> bool {
        self.atoms
            .iter()
            .any(|a| a.negated && self.atoms.contains(&a.complement()))
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        // IndexSet equality is order-insensitive
        self.atoms == other.atoms
    }
}

impl Eq for Clause {}

impl Hash for Clause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sorted: Vec<&Atom> = self.atoms.iter().collect();
        sorted.sort();
        sorted.hash(state);
    }
}

impl FromIterator<Atom> for Clause {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", atom)?;
        }
        write!(f, "}}")
    }
}

/// A set of clauses in insertion order.
///
/// Structurally equal clauses collapse into the first occurrence, so clause
/// indices are stable for everything that refers to them. Equality compares
/// clauses position by position since moves address clauses by index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClauseSet {
    clauses: IndexSet<Clause>,
}

impl ClauseSet {
    pub fn new() -> Self {
        ClauseSet::default()
    }

    /// Returns false if an equal clause was already present
    pub fn add(&mut self, clause: Clause) -> bool {
        self.clauses.insert(clause)
    }

    pub fn add_all(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.add(clause);
        }
    }

    pub fn clause(&self, idx: usize) -> Option<&Clause> {
        self.clauses.get_index(idx)
    }

    pub fn clauses(&self) -> impl ExactSizeIterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of distinct variable names
    pub fn variable_count(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|c| c.atoms())
            .map(|a| a.lit.as_str())
            .collect::<IndexSet<_>>()
            .len()
    }

    pub fn unit_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(|c| c.is_unit())
    }
}

impl PartialEq for ClauseSet {
    fn eq(&self, other: &Self) -> bool {
        self.clauses.iter().eq(other.clauses.iter())
    }
}

impl Eq for ClauseSet {}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut set = ClauseSet::new();
        set.add_all(iter);
        set
    }
}

impl IntoIterator for ClauseSet {
    type Item = Clause;
    type IntoIter = indexmap::set::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
