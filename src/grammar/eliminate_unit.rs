use std::collections::{BTreeMap, BTreeSet};

use super::symbol::{is_unit, Production};
use crate::Grammar;

impl Grammar {
    /// For every nonterminal, the other nonterminals it renames to through one
    /// or more unit productions.
    pub fn unit_closure(&self) -> BTreeMap<String, BTreeSet<String>> {
        let successors = |name: &str| -> Vec<String> {
            self.productions(name)
                .filter(|p| is_unit(p))
                .filter_map(|p| p[0].non_terminal())
                .map(|s| s.to_string())
                .collect()
        };

        let mut closure: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for left in self.non_terminal_iter() {
            let mut reach: BTreeSet<String> =
                successors(left.as_str()).into_iter().filter(|b| b != left).collect();
            let mut changed = true;
            while changed {
                changed = false;
                for b in reach.iter().cloned().collect::<Vec<_>>() {
                    for c in successors(b.as_str()) {
                        if c != *left && reach.insert(c) {
                            changed = true;
                        }
                    }
                }
            }
            closure.insert(left.clone(), reach);
        }
        closure
    }

    /// Replaces unit chains `A -> B -> ... -> C` by the non-unit productions of
    /// every nonterminal on the chain.
    pub fn remove_units(&self) -> Grammar {
        let closure = self.unit_closure();
        let mut g = self.empty_like();

        for (left, reach) in &closure {
            let mut rights: BTreeSet<Production> =
                self.productions(left).filter(|p| !is_unit(p)).cloned().collect();

            for b in reach {
                rights.extend(self.productions(b).filter(|p| !is_unit(p)).cloned());
            }

            g.add_non_terminal(left);
            for right in rights {
                g.add_production(left, right);
            }
        }

        g
    }
}
