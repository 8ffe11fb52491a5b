//! Property-based tests over commands generated from the SCAN grammar.
//!
//! Each generated command carries the action sequence the grammar assigns
//! it, built directly from the production rules, so the parser and
//! evaluator are checked against an independent derivation.

use proptest::prelude::*;
use scan_core::{evaluate, interpret, normalize, parse, parse_symbols, Action, Symbol};

type Derivation = (Vec<&'static str>, Vec<&'static str>);

fn action_word() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("walk", "I_WALK")),
        Just(("look", "I_LOOK")),
        Just(("run", "I_RUN")),
        Just(("jump", "I_JUMP")),
    ]
}

fn direction() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("left", "I_TURN_LEFT")),
        Just(("right", "I_TURN_RIGHT")),
    ]
}

/// Directed unit: `U`, `U dir`, `U opposite dir`, `U around dir`, and the
/// `turn` forms.
fn directed() -> impl Strategy<Value = Derivation> {
    (action_word(), direction(), 0..7usize).prop_map(|((word, act), (dir, turn), form)| {
        match form {
            0 => (vec![word], vec![act]),
            1 => (vec![word, dir], vec![turn, act]),
            2 => (vec![word, "opposite", dir], vec![turn, turn, act]),
            3 => (vec![word, "around", dir], [turn, act].repeat(4)),
            4 => (vec!["turn", dir], vec![turn]),
            5 => (vec!["turn", "opposite", dir], vec![turn, turn]),
            _ => (vec!["turn", "around", dir], vec![turn; 4]),
        }
    })
}

fn repeated() -> impl Strategy<Value = Derivation> {
    (directed(), 1..4usize).prop_map(|((mut words, acts), times)| {
        match times {
            2 => words.push("twice"),
            3 => words.push("thrice"),
            _ => {}
        }
        (words, acts.repeat(times))
    })
}

fn command() -> impl Strategy<Value = Derivation> {
    (repeated(), repeated(), 0..3usize).prop_map(|((mut x, xa), (y, ya), form)| match form {
        0 => (x, xa),
        1 => {
            x.push("and");
            x.extend(y);
            (x, [xa, ya].concat())
        }
        _ => {
            x.push("after");
            x.extend(y);
            (x, [ya, xa].concat())
        }
    })
}

/// Evaluate by replaying the parser's two stacks, applying each operator to
/// its operands in the order they were popped. Shares no code with the
/// head-array evaluator.
fn stack_order_eval(tokens: &[Symbol]) -> Option<Vec<Action>> {
    fn reduce(tokens: &[Symbol], values: &mut Vec<Vec<Action>>, op: usize) -> Option<()> {
        let arity = tokens[op].arity();
        if values.len() < arity {
            return None;
        }
        let args = values.split_off(values.len() - arity);
        values.push(tokens[op].apply(op, &args).ok()?);
        Some(())
    }

    let mut values: Vec<Vec<Action>> = Vec::new();
    let mut operators: Vec<usize> = Vec::new();
    for (i, sym) in tokens.iter().enumerate() {
        let Some(prec) = sym.precedence() else {
            values.push(sym.apply(i, &[]).ok()?);
            continue;
        };
        while let Some(&top) = operators.last() {
            if tokens[top].precedence().unwrap_or(0) < prec {
                break;
            }
            operators.pop();
            reduce(tokens, &mut values, top)?;
        }
        operators.push(i);
    }
    while let Some(op) = operators.pop() {
        reduce(tokens, &mut values, op)?;
    }
    match values.len() {
        1 => values.pop(),
        _ => None,
    }
}

fn tokens_of(actions: &[Action]) -> Vec<&'static str> {
    actions.iter().map(|a| a.token()).collect()
}

proptest! {
    #[test]
    fn interpretation_matches_grammar((words, expected) in command()) {
        let actions = interpret(&parse_symbols(&words).unwrap()).unwrap();
        prop_assert_eq!(tokens_of(&actions), expected);
    }

    #[test]
    fn trees_span_all_positions_with_one_root((words, _) in command()) {
        let tokens = normalize(&parse_symbols(&words).unwrap());
        let tree = parse(&tokens).unwrap();
        prop_assert_eq!(tree.len(), tokens.len());
        prop_assert_eq!(tree.as_slice().iter().filter(|h| h.is_none()).count(), 1);

        // Walking up from any position reaches the root within n steps.
        let root = tree.root().unwrap();
        for start in 0..tokens.len() {
            let mut at = start;
            let mut steps = 0;
            while let Some(h) = tree.head(at) {
                at = h;
                steps += 1;
                prop_assert!(steps <= tokens.len(), "cycle from {}", start);
            }
            prop_assert_eq!(at, root);
        }
    }

    #[test]
    fn arity_is_conserved((words, _) in command()) {
        let tokens = normalize(&parse_symbols(&words).unwrap());
        let tree = parse(&tokens).unwrap();
        for (position, kids) in tree.children().iter().enumerate() {
            prop_assert_eq!(kids.len(), tokens[position].arity());
        }
    }

    #[test]
    fn normalize_is_idempotent((words, _) in command()) {
        let once = normalize(&parse_symbols(&words).unwrap());
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert_eq!(once.len(), words.len());
    }

    #[test]
    fn parse_and_evaluate_are_deterministic((words, _) in command()) {
        let tokens = normalize(&parse_symbols(&words).unwrap());
        let first = parse(&tokens).unwrap();
        let second = parse(&tokens).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(evaluate(&tokens, &first).unwrap(), evaluate(&tokens, &second).unwrap());
    }

    #[test]
    fn accepted_sequences_evaluate_in_stack_order(
        idx in proptest::collection::vec(0..Symbol::ALL.len(), 0..12)
    ) {
        let tokens: Vec<Symbol> = idx.into_iter().map(|i| Symbol::ALL[i]).collect();
        if let Ok(tree) = parse(&tokens) {
            let from_tree = evaluate(&tokens, &tree).unwrap();
            let from_stacks = stack_order_eval(&tokens);
            prop_assert_eq!(Some(from_tree), from_stacks);
        }
    }

    #[test]
    fn grammar_commands_evaluate_in_stack_order((words, _) in command()) {
        let tokens = normalize(&parse_symbols(&words).unwrap());
        let tree = parse(&tokens).unwrap();
        prop_assert_eq!(Some(evaluate(&tokens, &tree).unwrap()), stack_order_eval(&tokens));
    }
}
