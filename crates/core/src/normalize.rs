//! Projectivity rewrite for turn-repeat words.
//!
//! `opposite` and `around` precede their direction argument in the source
//! language (`turn around left`), but the precedence parser needs every
//! operator to follow its operands. This pass moves each turn-repeat word
//! one place to the right, behind its argument:
//!
//! ```text
//! turn around left   ->   turn left around
//! ```

use crate::grammar::{Symbol, SymbolClass};

/// Return a copy of `tokens` with every turn-repeat word moved behind its
/// direction argument.
pub fn normalize(tokens: &[Symbol]) -> Vec<Symbol> {
    let mut work = tokens.to_vec();
    normalize_in_place(&mut work);
    work
}

/// In-place variant of [`normalize`].
///
/// Swap decisions read a snapshot of the input, so a word moved by one swap
/// is never examined again.
fn normalize_in_place(tokens: &mut [Symbol]) {
    let original = tokens.to_vec();
    for (i, pair) in original.windows(2).enumerate() {
        if pair[0].class() == SymbolClass::TurnRepeat && pair[1].class() == SymbolClass::Direction
        {
            tokens.swap(i, i + 1);
        }
    }
}

/// True when no turn-repeat word still precedes a direction word.
pub(crate) fn is_normalized(tokens: &[Symbol]) -> bool {
    !tokens.windows(2).any(|pair| {
        pair[0].class() == SymbolClass::TurnRepeat && pair[1].class() == SymbolClass::Direction
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_symbols;

    fn norm(words: &[&str]) -> Vec<String> {
        let tokens = parse_symbols(words).unwrap();
        normalize(&tokens).iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn moves_turn_repeat_behind_direction() {
        assert_eq!(norm(&["opposite", "left"]), ["left", "opposite"]);
        assert_eq!(
            norm(&["turn", "around", "right"]),
            ["turn", "right", "around"]
        );
    }

    #[test]
    fn rewrites_every_occurrence() {
        assert_eq!(
            norm(&["walk", "opposite", "left", "and", "run", "around", "right", "twice"]),
            ["walk", "left", "opposite", "and", "run", "right", "around", "twice"]
        );
    }

    #[test]
    fn leaves_other_sequences_alone() {
        let words = ["jump", "left", "twice", "after", "look"];
        assert_eq!(norm(&words), words);
    }

    #[test]
    fn trailing_turn_repeat_is_left_in_place() {
        assert_eq!(norm(&["walk", "around"]), ["walk", "around"]);
    }

    #[test]
    fn preserves_length() {
        let tokens = parse_symbols(["look", "around", "left", "thrice"]).unwrap();
        assert_eq!(normalize(&tokens).len(), tokens.len());
    }

    #[test]
    fn second_pass_is_a_fixed_point() {
        let tokens = parse_symbols(["run", "opposite", "right", "after", "turn", "around", "left"])
            .unwrap();
        let once = normalize(&tokens);
        assert!(is_normalized(&once));
        assert_eq!(normalize(&once), once);
    }
}
