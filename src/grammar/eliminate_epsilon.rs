use std::collections::BTreeSet;

use itertools::Itertools;

use super::symbol::{epsilon_production, is_epsilon, Production, Symbol};
use crate::Grammar;

impl Grammar {
    /// Nonterminals that derive the empty string.
    pub fn nullable_set(&self) -> BTreeSet<String> {
        let mut nullable: BTreeSet<String> = BTreeSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for (left, rights) in &self.rules {
                if nullable.contains(left) {
                    continue;
                }
                let is_nullable = rights.iter().any(|production| {
                    is_epsilon(production)
                        || production.iter().all(|s| match s {
                            Symbol::NonTerminal(name) => nullable.contains(name),
                            _ => false,
                        })
                });
                if is_nullable {
                    nullable.insert(left.clone());
                    changed = true;
                }
            }
        }
        nullable
    }

    /// Removes every empty production. The start symbol keeps `eps` when it
    /// derives the empty string.
    pub fn remove_epsilon(&self) -> Grammar {
        let nullable = self.nullable_set();
        let mut g = self.empty_like();

        for (left, rights) in &self.rules {
            let is_start = *left == self.start_symbol;
            g.add_non_terminal(left);

            for production in rights {
                if is_epsilon(production) {
                    if is_start {
                        g.add_production(left, epsilon_production());
                    }
                    continue;
                }

                g.add_production(left, production.clone());

                let nullable_positions: Vec<usize> = production
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.non_terminal().map_or(false, |n| nullable.contains(n)))
                    .map(|(i, _)| i)
                    .collect();

                for removed in (1..=nullable_positions.len())
                    .flat_map(|r| nullable_positions.iter().copied().combinations(r))
                {
                    let variant: Production = production
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !removed.contains(i))
                        .map(|(_, s)| s.clone())
                        .collect();

                    if !variant.is_empty() {
                        g.add_production(left, variant);
                    } else if is_start {
                        g.add_production(left, epsilon_production());
                    }
                }
            }
        }

        g
    }

    /// Drops `eps` from every nonterminal except the start symbol.
    ///
    /// Only valid on the output of [`Grammar::remove_epsilon`] followed by
    /// unit elimination, where such an `eps` comes from a unit chain ending at
    /// the start symbol and every use of the nonterminal already has a variant
    /// without it.
    pub fn drop_epsilon_outside_start(&self) -> Grammar {
        let mut g = self.empty_like();
        for (left, rights) in &self.rules {
            g.add_non_terminal(left);
            for right in rights {
                if *left == self.start_symbol || !is_epsilon(right) {
                    g.add_production(left, right.clone());
                }
            }
        }
        g
    }
}
