//! Grammar table for the SCAN command language.
//!
//! Every command word is a [`Symbol`] with a fixed arity, a precedence class
//! and a semantic function over [`Action`] sequences. The table is a plain
//! `match` over the closed enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScanError;

// ──────────────────────────────────────────────
// Output vocabulary
// ──────────────────────────────────────────────

/// Output vocabulary. An action's code is its index here; index 0 is
/// reserved and never produced.
pub const OUTPUT_VOCAB: [&str; 7] = [
    "",
    "I_WALK",
    "I_LOOK",
    "I_RUN",
    "I_JUMP",
    "I_TURN_LEFT",
    "I_TURN_RIGHT",
];

/// Primitive action code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Action {
    Walk = 1,
    Look = 2,
    Run = 3,
    Jump = 4,
    TurnLeft = 5,
    TurnRight = 6,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Walk,
        Action::Look,
        Action::Run,
        Action::Jump,
        Action::TurnLeft,
        Action::TurnRight,
    ];

    /// Index into [`OUTPUT_VOCAB`].
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Output token, e.g. `I_TURN_LEFT`.
    pub fn token(self) -> &'static str {
        OUTPUT_VOCAB[self.code() as usize]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Action {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.token() == s)
            .ok_or_else(|| ScanError::UnknownAction {
                token: s.to_owned(),
            })
    }
}

/// Render an action sequence as output tokens.
pub fn action_tokens(actions: &[Action]) -> Vec<String> {
    actions.iter().map(|a| a.token().to_owned()).collect()
}

// ──────────────────────────────────────────────
// Command symbols
// ──────────────────────────────────────────────

/// Precedence/arity class of a command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// Base action words; values, never operators.
    Action,
    /// `left` / `right`: prepend a turn.
    Direction,
    /// `opposite` / `around`.
    TurnRepeat,
    /// `twice` / `thrice`.
    RepeatCount,
    /// `and` / `after`.
    Connector,
}

impl SymbolClass {
    pub fn arity(self) -> usize {
        match self {
            SymbolClass::Action => 0,
            SymbolClass::Direction | SymbolClass::TurnRepeat | SymbolClass::RepeatCount => 1,
            SymbolClass::Connector => 2,
        }
    }

    /// Lowest binds loosest: connectors < repeat-count < turn-repeat < direction.
    pub fn precedence(self) -> Option<u8> {
        match self {
            SymbolClass::Action => None,
            SymbolClass::Connector => Some(1),
            SymbolClass::RepeatCount => Some(2),
            SymbolClass::TurnRepeat => Some(3),
            SymbolClass::Direction => Some(4),
        }
    }
}

/// A SCAN command word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Turn,
    Walk,
    Look,
    Run,
    Jump,
    Left,
    Right,
    Opposite,
    Around,
    Twice,
    Thrice,
    And,
    After,
}

impl Symbol {
    /// The vocabulary, in index order.
    pub const ALL: [Symbol; 13] = [
        Symbol::Turn,
        Symbol::Walk,
        Symbol::Look,
        Symbol::Run,
        Symbol::Jump,
        Symbol::Left,
        Symbol::Right,
        Symbol::Opposite,
        Symbol::Around,
        Symbol::Twice,
        Symbol::Thrice,
        Symbol::And,
        Symbol::After,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Turn => "turn",
            Symbol::Walk => "walk",
            Symbol::Look => "look",
            Symbol::Run => "run",
            Symbol::Jump => "jump",
            Symbol::Left => "left",
            Symbol::Right => "right",
            Symbol::Opposite => "opposite",
            Symbol::Around => "around",
            Symbol::Twice => "twice",
            Symbol::Thrice => "thrice",
            Symbol::And => "and",
            Symbol::After => "after",
        }
    }

    /// Position in [`Symbol::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn class(self) -> SymbolClass {
        match self {
            Symbol::Turn | Symbol::Walk | Symbol::Look | Symbol::Run | Symbol::Jump => {
                SymbolClass::Action
            }
            Symbol::Left | Symbol::Right => SymbolClass::Direction,
            Symbol::Opposite | Symbol::Around => SymbolClass::TurnRepeat,
            Symbol::Twice | Symbol::Thrice => SymbolClass::RepeatCount,
            Symbol::And | Symbol::After => SymbolClass::Connector,
        }
    }

    pub fn arity(self) -> usize {
        self.class().arity()
    }

    pub fn precedence(self) -> Option<u8> {
        self.class().precedence()
    }

    pub fn is_operator(self) -> bool {
        self.arity() > 0
    }

    /// Apply this symbol's semantic function to its ordered argument results.
    ///
    /// `args` must hold exactly [`Symbol::arity`] results, in left-to-right
    /// argument order. `position` only labels the error.
    pub fn apply(self, position: usize, args: &[Vec<Action>]) -> Result<Vec<Action>, ScanError> {
        if args.len() != self.arity() {
            return Err(ScanError::ArityMismatch {
                position,
                expected: self.arity(),
                found: args.len(),
            });
        }
        let out = match self {
            Symbol::Turn => Vec::new(),
            Symbol::Walk => vec![Action::Walk],
            Symbol::Look => vec![Action::Look],
            Symbol::Run => vec![Action::Run],
            Symbol::Jump => vec![Action::Jump],
            Symbol::Left => prepend(Action::TurnLeft, &args[0]),
            Symbol::Right => prepend(Action::TurnRight, &args[0]),
            // Repeats the first action once: `turn opposite left` is two left turns.
            Symbol::Opposite => match args[0].first() {
                Some(&first) => prepend(first, &args[0]),
                None => Vec::new(),
            },
            Symbol::Around => args[0].repeat(4),
            Symbol::Twice => args[0].repeat(2),
            Symbol::Thrice => args[0].repeat(3),
            Symbol::And => [args[0].as_slice(), args[1].as_slice()].concat(),
            Symbol::After => [args[1].as_slice(), args[0].as_slice()].concat(),
        };
        Ok(out)
    }
}

fn prepend(action: Action, rest: &[Action]) -> Vec<Action> {
    let mut out = Vec::with_capacity(rest.len() + 1);
    out.push(action);
    out.extend_from_slice(rest);
    out
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .iter()
            .copied()
            .find(|sym| sym.name() == s)
            .ok_or_else(|| ScanError::UnknownSymbol {
                symbol: s.to_owned(),
            })
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Look up every word, failing on the first one outside the vocabulary.
pub fn parse_symbols<I, S>(words: I) -> Result<Vec<Symbol>, ScanError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words.into_iter().map(|w| w.as_ref().parse()).collect()
}
