use std::fmt;

use serde::Serialize;

use super::EPSILON;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(String),
    Epsilon,
}

pub type Production = Vec<Symbol>;

impl Symbol {
    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn terminal(&self) -> Option<char> {
        match self {
            Symbol::Terminal(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::NonTerminal(name) => write!(f, "{}", name),
            Symbol::Epsilon => write!(f, "{}", EPSILON),
        }
    }
}

/// The production `[Epsilon]`.
pub fn epsilon_production() -> Production {
    vec![Symbol::Epsilon]
}

pub fn is_epsilon(production: &[Symbol]) -> bool {
    production == [Symbol::Epsilon]
}

/// A unit production is a single nonterminal.
pub fn is_unit(production: &[Symbol]) -> bool {
    production.len() == 1 && production[0].is_non_terminal()
}

/// Renders a production or sentential form the way it is written in grammar files.
/// An empty sentential form renders as the epsilon marker.
pub fn production_to_string(production: &[Symbol]) -> String {
    if production.is_empty() {
        return EPSILON.to_string();
    }
    production.iter().map(|s| s.to_string()).collect()
}

pub fn is_non_terminal_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

pub fn is_terminal_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
}

/// Splits a production body into symbols.
///
/// `eps` is the whole empty production. Otherwise every lowercase letter is a
/// terminal and an uppercase letter together with all digits right after it
/// is one nonterminal, so `T12a` is `[T12, a]`. On failure the offending
/// character is returned.
pub fn tokenize(body: &str) -> Result<Production, char> {
    if body == EPSILON {
        return Ok(epsilon_production());
    }

    let chars: Vec<char> = body.chars().collect();
    let mut production = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_lowercase() {
            production.push(Symbol::Terminal(c));
            i += 1;
        } else if c.is_ascii_uppercase() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            production.push(Symbol::NonTerminal(chars[i..j].iter().collect()));
            i = j;
        } else {
            return Err(c);
        }
    }
    Ok(production)
}
