use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LoadError {
    /// The grammar file could not be read
    Io(PathBuf, std::io::Error),
    /// Fewer than the three header lines (nonterminals, terminals, start symbol)
    MissingSections,
    InvalidNonTerminalName { line: usize, name: String },
    InvalidTerminalName { line: usize, name: String },
    StartSymbolNotDeclared { line: usize, name: String },
    /// A production line has a left side but nothing after it
    MissingBody { line: usize },
    UndeclaredNonTerminal { line: usize, name: String },
    InvalidSymbol { line: usize, symbol: char },
}

impl LoadError {
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io(..) | LoadError::MissingSections => None,
            LoadError::InvalidNonTerminalName { line, .. }
            | LoadError::InvalidTerminalName { line, .. }
            | LoadError::StartSymbolNotDeclared { line, .. }
            | LoadError::MissingBody { line }
            | LoadError::UndeclaredNonTerminal { line, .. }
            | LoadError::InvalidSymbol { line, .. } => Some(*line),
        }
    }
}

impl PartialEq for LoadError {
    fn eq(&self, other: &Self) -> bool {
        if let (LoadError::Io(a, e1), LoadError::Io(b, e2)) = (self, other) {
            return a == b && e1.kind() == e2.kind();
        }
        std::mem::discriminant(self) == std::mem::discriminant(other) && self.line() == other.line()
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            LoadError::MissingSections => write!(
                f,
                "expected nonterminals, terminals and start symbol on the first three lines"
            ),
            LoadError::InvalidNonTerminalName { line, name } => {
                write!(f, "Line {}: `{}` is not a valid nonterminal", line, name)
            }
            LoadError::InvalidTerminalName { line, name } => {
                write!(f, "Line {}: `{}` is not a valid terminal", line, name)
            }
            LoadError::StartSymbolNotDeclared { line, name } => write!(
                f,
                "Line {}: start symbol `{}` is not in the nonterminal list",
                line, name
            ),
            LoadError::MissingBody { line } => write!(f, "Line {}: production has no body", line),
            LoadError::UndeclaredNonTerminal { line, name } => {
                write!(f, "Line {}: nonterminal `{}` is not declared", line, name)
            }
            LoadError::InvalidSymbol { line, symbol } => {
                write!(f, "Line {}: unexpected character `{}`", line, symbol)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(_, e) => Some(e),
            _ => None,
        }
    }
}
