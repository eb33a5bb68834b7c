use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::symbol::{is_epsilon, Production, Symbol};
use crate::Grammar;

pub const DEFAULT_MAX_STEPS: usize = 50;
pub const DEFAULT_LENGTH_SLACK: usize = 5;

/// Bounds of the derivation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Forms reached after more steps than this are not expanded.
    pub max_steps: usize,
    /// Forms longer than the target by more than this are dropped.
    pub length_slack: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            length_slack: DEFAULT_LENGTH_SLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationStep {
    pub before: Vec<Symbol>,
    pub non_terminal: String,
    pub production: Production,
    pub after: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub target: String,
    pub accepted: bool,
    pub steps: Vec<DerivationStep>,
}

fn matches_target(form: &[Symbol], target: &[char]) -> bool {
    form.len() == target.len()
        && form
            .iter()
            .zip(target)
            .all(|(s, c)| s.terminal() == Some(*c))
}

fn terminal_prefix(form: &[Symbol]) -> Vec<char> {
    form.iter().map_while(Symbol::terminal).collect()
}

impl Grammar {
    /// Searches a leftmost derivation of `target` from `start`, breadth first.
    ///
    /// Forms that outgrow the target by `length_slack`, forms whose terminal
    /// prefix does not prefix the target and forms reached after more than
    /// `max_steps` steps are abandoned, so some words of the language are
    /// reported as not derived.
    pub fn derive(&self, start: &str, target: &str, limits: &SearchLimits) -> Derivation {
        let mut derivation = Derivation {
            target: target.to_string(),
            accepted: false,
            steps: Vec::new(),
        };

        if target.is_empty() {
            derivation.accepted = self.productions(start).any(|p| is_epsilon(p));
            return derivation;
        }

        let target: Vec<char> = target.chars().collect();
        let mut queue: VecDeque<(Vec<Symbol>, Vec<DerivationStep>)> = VecDeque::new();
        let mut visited: HashSet<(Vec<Symbol>, usize)> = HashSet::new();
        queue.push_back((vec![Symbol::NonTerminal(start.to_string())], Vec::new()));

        while let Some((form, trace)) = queue.pop_front() {
            if matches_target(&form, &target) {
                derivation.accepted = true;
                derivation.steps = trace;
                return derivation;
            }

            if form.len() > target.len() + limits.length_slack {
                continue;
            }

            let Some(position) = form.iter().position(Symbol::is_non_terminal) else {
                continue;
            };

            if trace.len() > limits.max_steps || !visited.insert((form.clone(), trace.len())) {
                continue;
            }

            let non_terminal = match &form[position] {
                Symbol::NonTerminal(name) => name.clone(),
                _ => continue,
            };

            for production in self.productions(&non_terminal) {
                let next: Vec<Symbol> = form[..position]
                    .iter()
                    .chain(production.iter().filter(|s| **s != Symbol::Epsilon))
                    .chain(form[position + 1..].iter())
                    .cloned()
                    .collect();

                if !target.starts_with(&terminal_prefix(&next)) {
                    continue;
                }

                let mut next_trace = trace.clone();
                next_trace.push(DerivationStep {
                    before: form.clone(),
                    non_terminal: non_terminal.clone(),
                    production: production.clone(),
                    after: next.clone(),
                });
                queue.push_back((next, next_trace));
            }
        }

        derivation
    }
}
