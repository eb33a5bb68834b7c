use std::path::Path;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    derivation::{Derivation, DerivationStep},
    symbol::{production_to_string, Symbol},
    Grammar, EPSILON,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<String>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        self.rights
            .iter()
            .map(|right| format!("{} {}", self.left, right.concat()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(s.as_str()).to_string())
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    start: &'a str,
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.productions
            .iter()
            .filter(|p| !p.rights.is_empty())
            .map(|p| p.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(
                self.productions
                    .iter()
                    .filter(|p| !p.rights.is_empty())
                    .map(|p| p.to_latex(true)),
            )
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

fn symbols_to_vec_string(production: &[Symbol]) -> Vec<String> {
    production.iter().map(|s| s.to_string()).collect()
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .rules
            .iter()
            .map(|(left, rights)| ProductionOutput {
                left: left.as_str(),
                rights: rights.iter().map(|r| symbols_to_vec_string(r)).collect(),
            })
            .collect();
        ProductionOutputVec {
            start: self.start_symbol.as_str(),
            productions,
        }
    }

    /// The grammar in the format read by [`Grammar::parse`].
    pub fn to_source(&self) -> String {
        let mut non_terminals: Vec<&str> = self.non_terminal_iter().map(|s| s.as_str()).collect();
        if !self.contains_non_terminal(&self.start_symbol) {
            // an emptied grammar still has to name its start symbol
            non_terminals.insert(0, self.start_symbol.as_str());
        }
        let header = [
            non_terminals.join(" "),
            self.terminals
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            self.start_symbol.clone(),
        ];
        let body = self.to_production_output_vec().to_plaintext();
        let mut source = header.join("\n");
        if !body.is_empty() {
            source.push('\n');
            source.push_str(&body);
        }
        source.push('\n');
        source
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_source())
    }
}

#[derive(Serialize)]
struct DerivationStepOutput {
    before: String,
    rule: String,
    after: String,
}

impl DerivationStepOutput {
    fn new(step: &DerivationStep) -> Self {
        Self {
            before: production_to_string(&step.before),
            rule: format!(
                "{} -> {}",
                step.non_terminal,
                production_to_string(&step.production)
            ),
            after: production_to_string(&step.after),
        }
    }

    fn to_plaintext(&self) -> String {
        format!(
            "Before: {}\nRule:   {}\nAfter:  {}\n",
            self.before, self.rule, self.after
        )
    }
}

#[derive(Serialize)]
pub struct DerivationOutput<'a> {
    target: &'a str,
    accepted: bool,
    steps: Vec<DerivationStepOutput>,
}

impl DerivationOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        if !self.accepted {
            return format!("Rejected: `{}` was not derived", self.target);
        }
        if self.target.is_empty() {
            return format!("Accepted: the empty word ({})", EPSILON);
        }

        let mut output = String::from("Accepted\n\n");
        for step in &self.steps {
            output.push_str(&step.to_plaintext());
            output.push('\n');
        }
        output.push_str(&format!(
            "Result: {} ({} steps)",
            self.target,
            self.steps.len()
        ));
        output
    }

    pub fn to_latex(&self) -> String {
        if !self.accepted || self.steps.is_empty() {
            return format!("\\text{{{}}}", self.to_plaintext());
        }
        let forms = std::iter::once(self.steps[0].before.as_str())
            .chain(self.steps.iter().map(|s| s.after.as_str()))
            .map(|f| escape::tex(f).to_string())
            .collect::<Vec<_>>();
        format!("\\[{}\\]", forms.join(" \\Rightarrow "))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Derivation {
    pub fn to_output(&self) -> DerivationOutput<'_> {
        DerivationOutput {
            target: self.target.as_str(),
            accepted: self.accepted,
            steps: self.steps.iter().map(DerivationStepOutput::new).collect(),
        }
    }
}
