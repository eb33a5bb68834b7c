extern crate wasm_bindgen;

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::derivation::{Derivation, DerivationStep, SearchLimits};
pub use grammar::error::LoadError;
pub use grammar::symbol::{Production, Symbol};
pub use grammar::Grammar;

#[derive(Serialize)]
struct NormalizationOutput<'a> {
    original: grammar::pretty_print::ProductionOutputVec<'a>,
    clean: grammar::pretty_print::ProductionOutputVec<'a>,
    cnf: grammar::pretty_print::ProductionOutputVec<'a>,
}

fn error_to_json(e: &LoadError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn cnf_to_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => {
            let clean = g.clean();
            let cnf = clean.to_cnf();
            let output = NormalizationOutput {
                original: g.to_production_output_vec(),
                clean: clean.to_production_output_vec(),
                cnf: cnf.to_production_output_vec(),
            };
            serde_json::to_string(&output).unwrap()
        }
        Err(e) => error_to_json(&e),
    }
}

#[wasm_bindgen]
pub fn derive_to_json(grammar: &str, word: &str, against_cnf: bool) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => {
            let cnf;
            let searched = if against_cnf {
                cnf = g.to_chomsky_normal_form();
                &cnf
            } else {
                &g
            };
            searched
                .derive(&g.start_symbol, word, &SearchLimits::default())
                .to_output()
                .to_json()
        }
        Err(e) => error_to_json(&e),
    }
}




#[cfg(test)]
mod unit_tests {
    use crate::grammar::symbol::is_unit;
    use crate::test_util::{language, nt, t};
    use crate::{Grammar, Symbol};

    #[test]
    fn unit_chain() {
        let g = Grammar::parse("A B C\nd\nA\nA B\nB C\nC d").unwrap();
        let closure = g.unit_closure();
        assert_eq!(closure["A"].len(), 2);
        assert!(closure["C"].is_empty());

        let u = g.remove_units();
        assert!(u.has_production("A", &[t('d')]));
        assert!(u.has_production("B", &[t('d')]));
        assert!(u.production_iter().all(|(_, right)| !is_unit(right)));
    }

    #[test]
    fn unit_cycle() {
        let g = Grammar::parse("A B\na b\nA\nA B\nA a\nB A\nB b\nB B").unwrap();
        let closure = g.unit_closure();
        assert!(!closure["A"].contains("A"));
        assert!(!closure["B"].contains("B"));

        let u = g.remove_units();
        for left in ["A", "B"] {
            assert!(u.has_production(left, &[t('a')]));
            assert!(u.has_production(left, &[t('b')]));
            assert_eq!(u.productions(left).count(), 2);
        }
    }

    #[test]
    fn non_unit_productions_are_inherited() {
        let g = Grammar::parse("S A\na b\nS\nS A\nS b\nA aA\nA a").unwrap();
        let u = g.remove_units();

        assert!(u.has_production("S", &[t('b')]));
        assert!(u.has_production("S", &[t('a'), nt("A")]));
        assert!(u.has_production("S", &[t('a')]));
        assert_eq!(u.productions("A").count(), 2);
    }

    #[test]
    fn eps_is_inherited_through_unit_chain() {
        let g = Grammar::parse("S A B\na b\nS\nS Aa\nA B\nB eps\nB b").unwrap();
        let u = g.remove_units();

        assert!(u.has_production("A", &[Symbol::Epsilon]));
        assert!(u.has_production("A", &[t('b')]));
        assert!(u.production_iter().all(|(_, right)| !is_unit(right)));
        assert_eq!(language(&u, 4), language(&g, 4));
        assert!(language(&u, 4).contains("a"));
    }

    #[test]
    fn clean_keeps_eps_on_start_only() {
        // A -> S hands S -> eps down to A during unit elimination
        let g = Grammar::parse("S A B\na b\nS\nS AB\nS eps\nA S\nA a\nB b").unwrap();
        assert!(g.remove_epsilon().remove_units().has_production("A", &[Symbol::Epsilon]));

        let clean = g.clean();
        assert!(clean.has_production("S", &[Symbol::Epsilon]));
        assert!(!clean.has_production("A", &[Symbol::Epsilon]));
        assert!(clean.production_iter().all(|(_, right)| !is_unit(right)));
        assert_eq!(language(&clean, 4), language(&g, 4));

        let cnf = clean.to_cnf();
        assert!(cnf.is_cnf());
        assert_eq!(language(&cnf, 4), language(&g, 4));
    }
}


#[cfg(test)]
mod cnf_tests {
    use crate::grammar::cnf::FreshNames;
    use crate::test_util::{language, nt, t};
    use crate::{Grammar, SearchLimits};

    const SAMPLE: &str = "
        S A B C D E
        a b c d
        S
        S AbA
        S B
        S Ea
        A aA
        A eps
        B bB
        B C
        C c
        D d
        E aE
    ";

    #[test]
    fn cnf_shape() {
        let g = Grammar::parse(SAMPLE).unwrap().to_chomsky_normal_form();
        assert!(g.is_cnf());

        let g = Grammar::parse("S A\na b\nS\nS aSb\nS SS\nS eps\nA a")
            .unwrap()
            .to_chomsky_normal_form();
        assert!(g.is_cnf());
        assert!(g.has_production("S", &[crate::Symbol::Epsilon]));
    }

    #[test]
    fn language_is_preserved() {
        let g = Grammar::parse(SAMPLE).unwrap();
        let cnf = g.to_chomsky_normal_form();

        let expected = language(&g, 5);
        assert!(expected.contains("b"));
        assert!(expected.contains("aabaa"));
        assert!(expected.contains("bbbc"));
        assert!(!expected.contains("a"));
        assert_eq!(language(&cnf, 5), expected);

        for word in &expected {
            assert!(
                cnf.derive(&cnf.start_symbol, word, &SearchLimits::default())
                    .accepted,
                "{} not derived",
                word
            );
        }
    }

    #[test]
    fn terminal_shared_by_all_occurrences() {
        let g = Grammar::parse("S\na\nS\nS aa\nS a").unwrap().to_cnf();

        assert!(g.has_production("S", &[nt("T1"), nt("T1")]));
        assert!(g.has_production("S", &[t('a')]));
        assert!(g.has_production("T1", &[t('a')]));
        assert_eq!(g.rules.len(), 2);
    }

    #[test]
    fn continuations_are_not_shared() {
        let g = Grammar::parse("S A B C\na b c\nS\nS ABC\nS CBA\nA a\nB b\nC c")
            .unwrap()
            .to_cnf();

        assert!(g.has_production("S", &[nt("A"), nt("X1")]));
        assert!(g.has_production("X1", &[nt("B"), nt("C")]));
        assert!(g.has_production("S", &[nt("C"), nt("X2")]));
        assert!(g.has_production("X2", &[nt("B"), nt("A")]));
        assert_eq!(g.rules.len(), 6);
    }

    #[test]
    fn fresh_names_avoid_existing_ones() {
        let g = Grammar::parse("S T1 X1\na b\nS\nS aT1X1b\nT1 b\nX1 a")
            .unwrap()
            .to_cnf();

        assert!(g.has_production("T2", &[t('a')]));
        assert!(g.has_production("T3", &[t('b')]));
        assert!(g.has_production("S", &[nt("T2"), nt("X2")]));
        assert!(g.has_production("X2", &[nt("T1"), nt("X3")]));
        assert!(g.has_production("X3", &[nt("X1"), nt("T3")]));
        assert!(g.has_production("T1", &[t('b')]));
        assert!(g.has_production("X1", &[t('a')]));
        assert!(g.is_cnf());
    }

    #[test]
    fn fresh_name_counters_are_per_prefix() {
        let g = Grammar::parse("S T2\na\nS\nS T2\nT2 a").unwrap();
        let mut names = FreshNames::new(&g);

        assert_eq!(names.mint('T'), "T1");
        assert_eq!(names.mint('T'), "T3");
        assert_eq!(names.mint('X'), "X1");
        assert_eq!(names.mint('T'), "T4");
    }
}


#[cfg(test)]
mod pretty_print_tests {
    use crate::{Grammar, SearchLimits};

    #[test]
    fn sorted_plaintext() {
        let g = Grammar::parse("S A\na b\nS\nS aA\nA b\nA eps").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "A b\nA eps\nS aA"
        );
    }

    #[test]
    fn latex_output() {
        let g = Grammar::parse("S\na\nS\nS a\nS eps").unwrap();
        let latex = g.to_production_output_vec().to_latex();
        assert!(latex.contains("S & \\rightarrow &a \\mid \\epsilon"));
    }

    #[test]
    fn saved_grammar_loads_back() {
        let g = Grammar::parse("S A B\na b\nS\nS AbA\nA aA\nA eps\nB b")
            .unwrap()
            .to_chomsky_normal_form();
        assert_eq!(Grammar::parse(&g.to_source()).unwrap(), g);
    }

    #[test]
    fn derivation_plaintext() {
        let g = Grammar::parse("S A B\na b\nS\nS AB\nA a\nB b").unwrap();
        let text = g.derive("S", "ab", &SearchLimits::default()).to_output().to_plaintext();

        assert!(text.starts_with("Accepted"));
        assert!(text.contains("Before: S\nRule:   S -> AB\nAfter:  AB\n"));
        assert!(text.ends_with("Result: ab (3 steps)"));

        let text = g.derive("S", "ba", &SearchLimits::default()).to_output().to_plaintext();
        assert_eq!(text, "Rejected: `ba` was not derived");
    }

    #[test]
    fn derivation_renders_in_every_format() {
        let g = Grammar::parse("S A B\na b\nS\nS AB\nA a\nB b").unwrap();
        let d = g.derive("S", "ab", &SearchLimits::default());
        let t = d.to_output();

        assert!(t.to_plaintext().ends_with("Result: ab (3 steps)"));
        assert_eq!(t.to_latex(), "\\[S \\Rightarrow AB \\Rightarrow aB \\Rightarrow ab\\]");
        let value: serde_json::Value = serde_json::from_str(&t.to_json()).unwrap();
        assert_eq!(value["target"], "ab");
        assert_eq!(value["steps"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn json_output() {
        let json = crate::cnf_to_json("S\na b\nS\nS ab");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cnf"]["start"], "S");
        assert!(value["original"]["productions"].is_array());

        let json = crate::derive_to_json("S\na b\nS\nS ab", "ab", true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["accepted"], true);
        assert_eq!(value["steps"][0]["rule"], "S -> T1T2");

        let json = crate::cnf_to_json("S\na");
        assert!(json.starts_with("{\"error\":"));
    }
}
