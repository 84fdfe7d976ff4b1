//! Property-based tests for the tableaux state machine and its encoding.

use super::{decode, encode, TableauxMove, TableauxState};
use crate::config::{Connectedness, TableauxParams};
use crate::logic::Formula;
use crate::parser::{naive_cnf, parse_clause_set, tseytin_cnf};
use proptest::prelude::*;

const VARS: [&str; 4] = ["a", "b", "c", "d"];

/// Clause set notation over four variables, e.g. `a,!b;c`
fn arb_clause_input() -> impl Strategy<Value = String> {
    let literal = (0..4usize, any::<bool>()).prop_map(|(v, neg)| {
        if neg {
            format!("!{}", VARS[v])
        } else {
            VARS[v].to_string()
        }
    });
    let clause = proptest::collection::vec(literal, 1..=3).prop_map(|lits| lits.join(","));
    proptest::collection::vec(clause, 1..=4).prop_map(|clauses| clauses.join(";"))
}

fn arb_params() -> impl Strategy<Value = TableauxParams> {
    (0..3u8, any::<bool>(), any::<bool>()).prop_map(|(c, regular, backtracking)| TableauxParams {
        connectedness: match c {
            0 => Connectedness::Unconnected,
            1 => Connectedness::Weak,
            _ => Connectedness::Strong,
        },
        regular,
        backtracking,
    })
}

/// Moves with small ids so that a fair share of them is legal
fn arb_move() -> impl Strategy<Value = TableauxMove> {
    prop_oneof![
        4 => (0..8usize, 0..5usize).prop_map(|(leaf, clause)| TableauxMove::Expand { leaf, clause }),
        4 => (0..8usize, 0..8usize).prop_map(|(leaf, ancestor)| TableauxMove::Close { leaf, ancestor }),
        1 => Just(TableauxMove::Backtrack),
    ]
}

fn arb_formula(depth: u32) -> BoxedStrategy<Formula> {
    let leaf = (0..4usize).prop_map(|v| Formula::var(VARS[v]));
    if depth == 0 {
        return leaf.boxed();
    }
    let sub = arb_formula(depth - 1);
    prop_oneof![
        1 => leaf,
        1 => sub.clone().prop_map(Formula::not),
        3 => (sub.clone(), sub.clone(), 0..4u8).prop_map(|(l, r, op)| match op {
            0 => Formula::and(l, r),
            1 => Formula::or(l, r),
            2 => Formula::implies(l, r),
            _ => Formula::equiv(l, r),
        }),
    ]
    .boxed()
}

/// Apply moves in order, skipping the ones that are rejected
fn play(input: &str, params: TableauxParams, moves: &[TableauxMove]) -> TableauxState {
    let mut state = TableauxState::new(parse_clause_set(input).unwrap(), params);
    for mv in moves {
        let _ = state.apply(*mv);
    }
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_codec_round_trip(
        input in arb_clause_input(),
        params in arb_params(),
        moves in proptest::collection::vec(arb_move(), 0..16),
    ) {
        let state = play(&input, params, &moves);
        let encoded = encode(&state);
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(&decoded, &state);
        prop_assert_eq!(encode(&decoded), encoded);
    }

    #[test]
    fn prop_rejected_move_keeps_encoding(
        input in arb_clause_input(),
        params in arb_params(),
        moves in proptest::collection::vec(arb_move(), 0..16),
        candidate in arb_move(),
    ) {
        let mut state = play(&input, params, &moves);
        let before = encode(&state);
        if state.apply(candidate).is_err() {
            prop_assert_eq!(encode(&state), before);
        }
    }

    #[test]
    fn prop_tree_shape_invariants(
        input in arb_clause_input(),
        params in arb_params(),
        moves in proptest::collection::vec(arb_move(), 0..16),
    ) {
        let state = play(&input, params, &moves);
        let nodes = state.nodes();
        let mut seen = vec![0usize; nodes.len()];
        for (id, node) in nodes.iter().enumerate() {
            match node.parent() {
                None => prop_assert_eq!(id, 0),
                Some(parent) => prop_assert!(parent < id),
            }
            for &child in node.children() {
                prop_assert!(child < nodes.len());
                prop_assert_eq!(nodes[child].parent(), Some(id));
                seen[child] += 1;
            }
            if let Some(partner) = node.close_ref() {
                prop_assert!(node.is_leaf());
                prop_assert!(state.is_ancestor(partner, id));
                prop_assert!(node.is_complement_of(&nodes[partner]));
            }
        }
        prop_assert!(seen.iter().skip(1).all(|&count| count == 1));
        prop_assert_eq!(seen[0], 0);
    }

    #[test]
    fn prop_check_close_is_pure(
        input in arb_clause_input(),
        moves in proptest::collection::vec(arb_move(), 0..16),
    ) {
        let state = play(&input, TableauxParams::default(), &moves);
        let before = encode(&state);
        let first = state.is_closed();
        let second = state.is_closed();
        prop_assert_eq!(first, second);
        prop_assert_eq!(encode(&state), before);
    }

    #[test]
    fn prop_backtrack_undoes_last_move(
        input in arb_clause_input(),
        moves in proptest::collection::vec(arb_move(), 0..16),
        candidate in arb_move(),
    ) {
        let mut state = play(&input, TableauxParams::default(), &moves);
        let before = encode(&state);
        if !matches!(candidate, TableauxMove::Backtrack) && state.apply(candidate).is_ok() {
            state.apply(TableauxMove::Backtrack).unwrap();
            prop_assert_eq!(encode(&state), before);
        }
    }

    #[test]
    fn prop_tseytin_is_linear(formula in arb_formula(4)) {
        let clauses = tseytin_cnf(&formula);
        let size = formula.size();
        prop_assert!(clauses.len() <= 4 * size + 1);
        prop_assert!(clauses.variable_count() <= size + VARS.len());
        prop_assert_eq!(clauses.unit_clauses().count(), 1);
    }

    #[test]
    fn prop_naive_cnf_has_no_auxiliaries(formula in arb_formula(3)) {
        let clauses = naive_cnf(&formula, None).unwrap();
        for clause in clauses.clauses() {
            for atom in clause.atoms() {
                prop_assert!(VARS.contains(&atom.lit.as_str()));
            }
        }
    }
}
