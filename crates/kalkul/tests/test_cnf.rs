//! CNF conversion from formula text, checked against truth tables

use kalkul::{
    formula_to_cnf, naive_cnf, parse_flexible, parse_formula, tseytin_cnf, ClauseSet, CnfStrategy,
    Formula, KernelError,
};
use std::collections::HashMap;

fn eval(formula: &Formula, env: &HashMap<String, bool>) -> bool {
    match formula {
        Formula::Var(name) => env[name],
        Formula::Not(f) => !eval(f, env),
        Formula::And(l, r) => eval(l, env) && eval(r, env),
        Formula::Or(l, r) => eval(l, env) || eval(r, env),
        Formula::Impl(l, r) => !eval(l, env) || eval(r, env),
        Formula::Equiv(l, r) => eval(l, env) == eval(r, env),
    }
}

fn satisfies(clauses: &ClauseSet, env: &HashMap<String, bool>) -> bool {
    clauses
        .clauses()
        .all(|c| c.atoms().any(|a| env[&a.lit] != a.negated))
}

/// Every assignment over `vars`
fn assignments(vars: &[String]) -> impl Iterator<Item = HashMap<String, bool>> + '_ {
    (0..1u32 << vars.len()).map(move |bits| {
        vars.iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), bits & (1 << i) != 0))
            .collect()
    })
}

fn clause_vars(clauses: &ClauseSet) -> Vec<String> {
    let mut vars: Vec<String> = clauses
        .clauses()
        .flat_map(|c| c.atoms().map(|a| a.lit.clone()))
        .collect();
    vars.sort();
    vars.dedup();
    vars
}

const FORMULAS: [&str; 8] = [
    "a",
    "!(!!b <-> a)",
    "!((a | !a) & !c)",
    "!a & (b & (b -> a))",
    "(a | !b) | (a <-> b)",
    "!(a & b) | !(b -> !b)",
    "(a -> b) -> c",
    "(a & b) | (c & !a) <=> b",
];

#[test]
fn test_naive_cnf_is_equivalent() {
    for input in FORMULAS {
        let formula = parse_formula(input).unwrap();
        let clauses = naive_cnf(&formula, None).unwrap();
        let vars: Vec<String> = formula.variables().into_iter().collect();
        for env in assignments(&vars) {
            assert_eq!(
                eval(&formula, &env),
                satisfies(&clauses, &env),
                "{} disagrees with {} under {:?}",
                input,
                clauses,
                env
            );
        }
    }
}

#[test]
fn test_tseytin_cnf_is_equisatisfiable() {
    for input in FORMULAS.iter().chain(["a & !a", "(a <-> b) & (a <-> !b)"].iter()) {
        let formula = parse_formula(input).unwrap();
        let clauses = tseytin_cnf(&formula);
        let formula_vars: Vec<String> = formula.variables().into_iter().collect();
        let formula_sat = assignments(&formula_vars).any(|env| eval(&formula, &env));
        let cnf_vars = clause_vars(&clauses);
        let cnf_sat = assignments(&cnf_vars).any(|env| satisfies(&clauses, &env));
        assert_eq!(formula_sat, cnf_sat, "{} vs {}", input, clauses);
    }
}

#[test]
fn test_known_clause_sets() {
    let naive = |input: &str| naive_cnf(&parse_formula(input).unwrap(), None).unwrap().to_string();
    assert_eq!(naive("MyT35tV4r"), "{MyT35tV4r}");
    assert_eq!(naive("!a"), "{!a}");
    assert_eq!(naive("!((a | !a) & !c)"), "{!a, c}, {a, c}");
    assert_eq!(naive("!a & (b & (b -> a))"), "{!a}, {b}, {!b, a}");
    assert_eq!(naive("a & !a"), "{a}, {!a}");
    assert_eq!(naive("(a | !a) & b"), "{a, !a}, {b}");

    let tseytin = |input: &str| tseytin_cnf(&parse_formula(input).unwrap()).to_string();
    assert_eq!(tseytin("a"), "{a}");
    assert_eq!(tseytin("!a"), "{not0}, {!a, !not0}, {a, not0}");
    assert_eq!(
        tseytin("a & !a"),
        "{and1}, {!a, !not0}, {a, not0}, {a, !and1}, {not0, !and1}, {!a, !not0, and1}"
    );
}

#[test]
fn test_tseytin_stays_small() {
    // (a1 <-> b1) | ((a2 <-> b2) | ...) explodes under distribution
    let mut input = String::from("(a7 <-> b7)");
    for i in (0..7).rev() {
        input = format!("(a{i} <-> b{i}) | ({input})");
    }
    let formula = parse_formula(&input).unwrap();

    assert!(matches!(
        formula_to_cnf(&formula, CnfStrategy::Naive, Some(1000)),
        Err(kalkul::CnfConversionError::Blowup { limit: 1000 })
    ));

    let tseytin = formula_to_cnf(&formula, CnfStrategy::Tseytin, Some(1000)).unwrap();
    assert!(tseytin.len() < 4 * formula.size() + 1);
    assert_eq!(tseytin.unit_clauses().count(), 1);

    let optimal = formula_to_cnf(&formula, CnfStrategy::Optimal, Some(1000)).unwrap();
    assert_eq!(optimal, tseytin);
}

#[test]
fn test_flexible_input() {
    let clauses = parse_flexible("a,b;!a", CnfStrategy::Naive, None).unwrap();
    assert_eq!(clauses.to_string(), "{a, b}, {!a}");

    let clauses = parse_flexible("(a -> b) & a", CnfStrategy::Naive, None).unwrap();
    assert_eq!(clauses.to_string(), "{!a, b}, {a}");

    for input in ["", "a;;b", "a, b; !a", "a & ", "(a | b", "a -> -> b"] {
        assert!(
            matches!(
                parse_flexible(input, CnfStrategy::Optimal, Some(5000)),
                Err(KernelError::InvalidFormulaFormat(_))
            ),
            "expected rejection of {:?}",
            input
        );
    }
}

#[test]
fn test_deep_equivalence_chain_uses_tseytin() {
    // (a39 <-> (a38 <-> ... (a0 <-> x)))
    let mut input = String::from("x");
    for i in 0..40 {
        input = format!("(a{} <-> {})", i, input);
    }
    let formula = parse_formula(&input).unwrap();

    let clauses = parse_flexible(&input, CnfStrategy::Optimal, Some(5000)).unwrap();
    assert_eq!(clauses, tseytin_cnf(&formula));
    assert_eq!(clauses.len(), 4 * 40 + 1);
}

#[test]
fn test_deep_nesting_is_rejected() {
    let input = format!("{}a{} & b", "(".repeat(200_000), ")".repeat(200_000));
    assert!(matches!(
        parse_flexible(&input, CnfStrategy::Optimal, Some(5000)),
        Err(KernelError::InvalidFormulaFormat(_))
    ));
}
