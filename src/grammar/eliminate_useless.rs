use std::collections::BTreeSet;

use super::symbol::{is_epsilon, Symbol};
use crate::Grammar;

fn only_uses(production: &[Symbol], allowed: &BTreeSet<String>) -> bool {
    production
        .iter()
        .filter_map(|s| s.non_terminal())
        .all(|name| allowed.contains(name))
}

impl Grammar {
    /// Nonterminals that derive at least one terminal string.
    pub fn generating_set(&self) -> BTreeSet<String> {
        let mut generating: BTreeSet<String> = BTreeSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for (left, rights) in &self.rules {
                if generating.contains(left) {
                    continue;
                }
                if rights
                    .iter()
                    .any(|p| is_epsilon(p) || only_uses(p, &generating))
                {
                    generating.insert(left.clone());
                    changed = true;
                }
            }
        }
        generating
    }

    /// Nonterminals that occur in some sentential form derived from the start
    /// symbol.
    pub fn reachable_set(&self) -> BTreeSet<String> {
        let mut reachable: BTreeSet<String> = BTreeSet::new();
        if !self.contains_non_terminal(&self.start_symbol) {
            return reachable;
        }
        reachable.insert(self.start_symbol.clone());

        let mut stack = vec![self.start_symbol.clone()];
        while let Some(left) = stack.pop() {
            for name in self
                .productions(&left)
                .flatten()
                .filter_map(|s| s.non_terminal())
            {
                if reachable.insert(name.to_string()) {
                    stack.push(name.to_string());
                }
            }
        }
        reachable
    }

    /// Drops non-generating nonterminals first, then the unreachable ones.
    pub fn remove_useless(&self) -> Grammar {
        let generating = self.generating_set();
        let mut productive = self.empty_like();
        for left in generating.iter() {
            productive.add_non_terminal(left);
            for right in self.productions(left).filter(|p| only_uses(p, &generating)) {
                productive.add_production(left, right.clone());
            }
        }

        let reachable = productive.reachable_set();
        let mut g = self.empty_like();
        for (left, rights) in productive.rules {
            if reachable.contains(&left) {
                g.rules.insert(left, rights);
            }
        }
        g
    }
}
