use std::collections::HashSet;
use std::path::Path;

use super::error::LoadError;
use super::symbol::{is_non_terminal_name, is_terminal_name, tokenize};
use crate::Grammar;

impl Grammar {
    /// Reads a grammar written as
    ///
    /// ```text
    /// S A B        nonterminals
    /// a b          terminals
    /// S            start symbol
    /// S aAb        one production per line
    /// A eps
    /// ```
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(grammar: &str) -> Result<Self, LoadError> {
        let lines: Vec<(usize, &str)> = grammar
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .collect();

        if lines.len() < 3 {
            return Err(LoadError::MissingSections);
        }

        let (line, non_terminal_line) = lines[0];
        let mut declared: HashSet<&str> = HashSet::new();
        let mut non_terminals: Vec<&str> = Vec::new();
        for name in non_terminal_line.split_whitespace() {
            if !is_non_terminal_name(name) {
                return Err(LoadError::InvalidNonTerminalName {
                    line,
                    name: name.to_string(),
                });
            }
            if declared.insert(name) {
                non_terminals.push(name);
            }
        }

        let (line, terminal_line) = lines[1];
        let mut terminals = Vec::new();
        for name in terminal_line.split_whitespace() {
            if !is_terminal_name(name) {
                return Err(LoadError::InvalidTerminalName {
                    line,
                    name: name.to_string(),
                });
            }
            terminals.extend(name.chars());
        }

        let (line, start) = lines[2];
        if !declared.contains(start) {
            return Err(LoadError::StartSymbolNotDeclared {
                line,
                name: start.to_string(),
            });
        }

        let mut g = Self::new(start);
        g.terminals.extend(terminals);
        for name in non_terminals {
            g.add_non_terminal(name);
        }

        for &(line, production_line) in &lines[3..] {
            let (left, body) = match production_line.split_once(char::is_whitespace) {
                Some((left, body)) if !body.trim().is_empty() => (left, body.trim()),
                _ => return Err(LoadError::MissingBody { line }),
            };
            if !declared.contains(left) {
                return Err(LoadError::UndeclaredNonTerminal {
                    line,
                    name: left.to_string(),
                });
            }

            let right = tokenize(body).map_err(|symbol| LoadError::InvalidSymbol { line, symbol })?;
            if let Some(name) = right
                .iter()
                .filter_map(|s| s.non_terminal())
                .find(|name| !declared.contains(name))
            {
                return Err(LoadError::UndeclaredNonTerminal {
                    line,
                    name: name.to_string(),
                });
            }

            g.add_production(left, right);
        }

        Ok(g)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
        Self::parse(&content)
    }
}
