use std::collections::{BTreeMap, BTreeSet};

use super::symbol::{Production, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub start_symbol: String,
    pub terminals: BTreeSet<char>,
    pub rules: BTreeMap<String, BTreeSet<Production>>,
}

impl Grammar {
    pub fn new(start_symbol: &str) -> Self {
        Self {
            start_symbol: start_symbol.to_string(),
            terminals: BTreeSet::new(),
            rules: BTreeMap::new(),
        }
    }

    /// A grammar with the same start symbol and terminals but no rules.
    pub fn empty_like(&self) -> Self {
        Self {
            start_symbol: self.start_symbol.clone(),
            terminals: self.terminals.clone(),
            rules: BTreeMap::new(),
        }
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }

    pub fn productions(&self, non_terminal: &str) -> impl Iterator<Item = &Production> {
        self.rules.get(non_terminal).into_iter().flatten()
    }

    pub fn production_iter(&self) -> impl Iterator<Item = (&String, &Production)> {
        self.rules
            .iter()
            .flat_map(|(left, rights)| rights.iter().map(move |right| (left, right)))
    }

    pub fn contains_non_terminal(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn production_count(&self) -> usize {
        self.rules.values().map(|rights| rights.len()).sum()
    }

    pub fn add_non_terminal(&mut self, name: &str) {
        self.rules.entry(name.to_string()).or_default();
    }

    pub fn add_production(&mut self, left: &str, right: Production) {
        for t in right.iter().filter_map(Symbol::terminal) {
            self.terminals.insert(t);
        }
        self.rules.entry(left.to_string()).or_default().insert(right);
    }

    pub fn has_production(&self, left: &str, right: &[Symbol]) -> bool {
        self.rules
            .get(left)
            .map_or(false, |rights| rights.contains(right))
    }
}
