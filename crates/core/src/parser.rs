//! Operator-precedence dependency parser.
//!
//! A shift-reduce pass with two explicit stacks over token positions.
//! Reducing an operator records dependency edges from its operands to it
//! and pushes the operator back as a completed value standing in for its
//! subtree, so the head array is built without any intermediate AST.
//!
//! Every completed value covers a contiguous span of positions. A reduction
//! is accepted only when its operands' spans and the operator itself tile one
//! contiguous span, with the operands in left-to-right order. Children sorted
//! by position are then exactly the operator's arguments in stack order,
//! which is what lets the head array stand alone as the tree.

use crate::error::ScanError;
use crate::grammar::{parse_symbols, Symbol};
use crate::tree::DependencyTree;

struct Parser<'a> {
    tokens: &'a [Symbol],
    heads: Vec<Option<usize>>,
    values: Vec<usize>,
    operators: Vec<usize>,
    /// Inclusive span covered by the subtree rooted at each position.
    spans: Vec<(usize, usize)>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Symbol]) -> Self {
        Parser {
            tokens,
            heads: vec![None; tokens.len()],
            values: Vec::with_capacity(tokens.len()),
            operators: Vec::with_capacity(tokens.len()),
            spans: (0..tokens.len()).map(|i| (i, i)).collect(),
        }
    }

    fn precedence_at(&self, position: usize) -> u8 {
        self.tokens[position].precedence().unwrap_or(0)
    }

    /// Pop the top operator, attach its arity-many operands, and push it as
    /// a completed value.
    fn reduce(&mut self) -> Result<(), ScanError> {
        let Some(op) = self.operators.pop() else {
            return Ok(());
        };
        let sym = self.tokens[op];
        let arity = sym.arity();
        if self.values.len() < arity {
            return Err(ScanError::malformed(format!(
                "'{}' at position {} expects {} operand(s)",
                sym, op, arity
            )));
        }
        // Stack order: the first argument was pushed first.
        let args = self.values.split_off(self.values.len() - arity);
        self.check_adjacent(op, &args)?;

        let (mut lo, mut hi) = (op, op);
        for &arg in &args {
            self.heads[arg] = Some(op);
            lo = lo.min(self.spans[arg].0);
            hi = hi.max(self.spans[arg].1);
        }
        self.spans[op] = (lo, hi);
        self.values.push(op);
        Ok(())
    }

    fn check_adjacent(&self, op: usize, args: &[usize]) -> Result<(), ScanError> {
        let mut pieces: Vec<(usize, usize)> = args.iter().map(|&a| self.spans[a]).collect();
        let in_order = pieces.windows(2).all(|w| w[0].1 < w[1].0);
        pieces.push((op, op));
        pieces.sort_unstable();
        let contiguous = pieces.windows(2).all(|w| w[0].1 + 1 == w[1].0);
        if in_order && contiguous {
            Ok(())
        } else {
            Err(ScanError::malformed(format!(
                "'{}' at position {} takes operands that are not adjacent to it",
                self.tokens[op], op
            )))
        }
    }

    fn run(mut self) -> Result<DependencyTree, ScanError> {
        let tokens = self.tokens;
        for (i, sym) in tokens.iter().enumerate() {
            let Some(prec) = sym.precedence() else {
                self.values.push(i);
                continue;
            };
            // Equal precedence reduces the pending operator first.
            while let Some(&top) = self.operators.last() {
                if self.precedence_at(top) < prec {
                    break;
                }
                self.reduce()?;
            }
            self.operators.push(i);
        }

        while !self.operators.is_empty() {
            self.reduce()?;
        }

        let root = self
            .values
            .pop()
            .ok_or_else(|| ScanError::malformed("no value left after parsing"))?;
        if !self.values.is_empty() {
            return Err(ScanError::malformed(format!(
                "{} unattached value(s) left besides the root at position {}",
                self.values.len(),
                root
            )));
        }
        self.heads[root] = None;
        Ok(DependencyTree::new(self.heads))
    }
}

/// Parse a normalized token sequence into its dependency tree.
pub fn parse(tokens: &[Symbol]) -> Result<DependencyTree, ScanError> {
    Parser::new(tokens).run()
}

/// Look up `words` in the grammar table, then [`parse`] them.
pub fn parse_words<S: AsRef<str>>(words: &[S]) -> Result<DependencyTree, ScanError> {
    let tokens = parse_symbols(words)?;
    parse(&tokens)
}
