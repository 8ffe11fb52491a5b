//! Program evaluator over a dependency tree.
//!
//! Each position's symbol is applied to the results of its children, in
//! post-order, and the root's result is the action sequence of the whole
//! command.
//!
//! Children are recovered from the head array by one ascending pass over
//! positions. That order is the parser's argument order, since the parser
//! only accepts reductions whose operands tile a contiguous span left to
//! right (see [`crate::parser`]).

use crate::dataset::ParsedExample;
use crate::error::ScanError;
use crate::grammar::{action_tokens, Action, Symbol};
use crate::normalize::normalize;
use crate::parser::parse;
use crate::tree::DependencyTree;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Open,
    Done,
}

/// Evaluate `tokens` along `tree`, returning the root's action sequence.
pub fn evaluate(tokens: &[Symbol], tree: &DependencyTree) -> Result<Vec<Action>, ScanError> {
    let n = tokens.len();
    if tree.len() != n {
        return Err(ScanError::orphan(
            n.min(tree.len()),
            format!("head array has {} entries for {} tokens", tree.len(), n),
        ));
    }
    for (i, head) in tree.as_slice().iter().enumerate() {
        if let Some(h) = *head {
            if h >= n {
                return Err(ScanError::orphan(i, format!("head {} is out of range", h)));
            }
            if h == i {
                return Err(ScanError::orphan(i, "position is its own head"));
            }
        }
    }

    let mut roots = tree
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, h)| h.is_none())
        .map(|(i, _)| i);
    let root = roots
        .next()
        .ok_or_else(|| ScanError::orphan(0, "no root position"))?;
    if let Some(second) = roots.next() {
        return Err(ScanError::orphan(second, format!("second root besides {}", root)));
    }

    let children = tree.children();
    for (position, kids) in children.iter().enumerate() {
        let expected = tokens[position].arity();
        if kids.len() != expected {
            return Err(ScanError::ArityMismatch {
                position,
                expected,
                found: kids.len(),
            });
        }
    }

    let mut marks = vec![Mark::Unvisited; n];
    let mut results: Vec<Option<Vec<Action>>> = vec![None; n];
    // (position, children already scheduled)
    let mut stack: Vec<(usize, bool)> = vec![(root, false)];

    while let Some((position, expanded)) = stack.pop() {
        if expanded {
            let args = children[position]
                .iter()
                .map(|&c| {
                    results[c]
                        .take()
                        .ok_or_else(|| ScanError::orphan(c, "child evaluated out of order"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            results[position] = Some(tokens[position].apply(position, &args)?);
            marks[position] = Mark::Done;
            continue;
        }
        match marks[position] {
            Mark::Unvisited => {}
            Mark::Open => return Err(ScanError::orphan(position, "cycle in head array")),
            Mark::Done => return Err(ScanError::orphan(position, "node reached twice")),
        }
        marks[position] = Mark::Open;
        stack.push((position, true));
        for &child in children[position].iter().rev() {
            if marks[child] != Mark::Unvisited {
                return Err(ScanError::orphan(child, "cycle in head array"));
            }
            stack.push((child, false));
        }
    }

    if let Some(orphan) = marks.iter().position(|m| *m != Mark::Done) {
        return Err(ScanError::orphan(orphan, "not reachable from the root"));
    }
    results[root]
        .take()
        .ok_or_else(|| ScanError::orphan(root, "root produced no result"))
}

/// [`evaluate`], rendered as output tokens.
pub fn evaluate_tokens(tokens: &[Symbol], tree: &DependencyTree) -> Result<Vec<String>, ScanError> {
    evaluate(tokens, tree).map(|actions| action_tokens(&actions))
}

/// Normalize, parse and evaluate a raw command.
pub fn interpret(command: &[Symbol]) -> Result<Vec<Action>, ScanError> {
    let tokens = normalize(command);
    let tree = parse(&tokens)?;
    evaluate(&tokens, &tree)
}

/// True when evaluating the example's tree reproduces its expected output.
pub fn verify(example: &ParsedExample) -> Result<bool, ScanError> {
    let produced = evaluate_tokens(&example.input, &example.head)?;
    Ok(produced == example.output)
}
