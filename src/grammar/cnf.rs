use std::collections::{BTreeMap, HashSet};

use super::symbol::{is_epsilon, Production, Symbol};
use crate::Grammar;

pub const TERMINAL_PREFIX: char = 'T';
pub const CONTINUATION_PREFIX: char = 'X';

/// Mints nonterminal names that are not used by the grammar yet.
pub struct FreshNames {
    used: HashSet<String>,
    counters: BTreeMap<char, usize>,
}

impl FreshNames {
    pub fn new(g: &Grammar) -> Self {
        let used = g
            .rules
            .iter()
            .flat_map(|(left, rights)| {
                std::iter::once(left.as_str()).chain(
                    rights
                        .iter()
                        .flatten()
                        .filter_map(|s| s.non_terminal()),
                )
            })
            .chain(std::iter::once(g.start_symbol.as_str()))
            .map(|s| s.to_string())
            .collect();
        Self {
            used,
            counters: BTreeMap::new(),
        }
    }

    pub fn mint(&mut self, prefix: char) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{}{}", prefix, counter);
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }
}

impl Grammar {
    /// Expects a grammar without empty (except at the start symbol), unit and
    /// useless productions.
    pub fn to_cnf(&self) -> Grammar {
        let mut names = FreshNames::new(self);
        let isolated = self.isolate_terminals(&mut names);
        isolated.binarize(&mut names)
    }

    /// Replaces terminals inside productions of length two or more with
    /// nonterminals that derive exactly that terminal.
    fn isolate_terminals(&self, names: &mut FreshNames) -> Grammar {
        let mut replacements: BTreeMap<char, String> = BTreeMap::new();
        let mut g = self.empty_like();

        for (left, rights) in &self.rules {
            g.add_non_terminal(left);
            for production in rights {
                if production.len() < 2 {
                    g.add_production(left, production.clone());
                    continue;
                }
                let right: Production = production
                    .iter()
                    .map(|s| match s {
                        Symbol::Terminal(c) => Symbol::NonTerminal(
                            replacements
                                .entry(*c)
                                .or_insert_with(|| names.mint(TERMINAL_PREFIX))
                                .clone(),
                        ),
                        s => s.clone(),
                    })
                    .collect();
                g.add_production(left, right);
            }
        }

        for (terminal, name) in replacements {
            g.add_production(&name, vec![Symbol::Terminal(terminal)]);
        }

        g
    }

    /// Splits `A -> Y1 Y2 ... Yn` into `A -> Y1 X1`, `X1 -> Y2 X2`, ...,
    /// `Xk -> Y(n-1) Yn`.
    fn binarize(&self, names: &mut FreshNames) -> Grammar {
        let mut g = self.empty_like();

        for (left, rights) in &self.rules {
            g.add_non_terminal(left);
            for production in rights {
                if production.len() <= 2 || is_epsilon(production) {
                    g.add_production(left, production.clone());
                    continue;
                }

                let mut current = left.clone();
                for symbol in &production[..production.len() - 2] {
                    let next = names.mint(CONTINUATION_PREFIX);
                    g.add_production(
                        &current,
                        vec![symbol.clone(), Symbol::NonTerminal(next.clone())],
                    );
                    current = next;
                }
                g.add_production(&current, production[production.len() - 2..].to_vec());
            }
        }

        g
    }

    /// Runs epsilon, unit and useless symbol elimination in that order.
    pub fn clean(&self) -> Grammar {
        self.remove_epsilon()
            .remove_units()
            .drop_epsilon_outside_start()
            .remove_useless()
    }

    pub fn to_chomsky_normal_form(&self) -> Grammar {
        self.clean().to_cnf()
    }

    /// Every production is two nonterminals, one terminal, or `eps` on the
    /// start symbol.
    pub fn is_cnf(&self) -> bool {
        self.production_iter().all(|(left, right)| match right.as_slice() {
            [Symbol::Terminal(_)] => true,
            [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
            [Symbol::Epsilon] => *left == self.start_symbol,
            _ => false,
        })
    }
}
