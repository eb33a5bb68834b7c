use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cfg_normalizer::{Grammar, SearchLimits};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

/// Grammar that words are tested against
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Against {
    Original,
    Cnf,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File containing the grammar (asked for when missing)
    file: Option<PathBuf>,

    /// Output format of grammars and derivations
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Save the grammar without empty, unit and useless productions
    #[arg(long, value_name = "PATH")]
    clean_out: Option<PathBuf>,

    /// Save the grammar in Chomsky normal form
    #[arg(long, value_name = "PATH")]
    cnf_out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Against::Cnf)]
    against: Against,

    /// Derivations longer than this are abandoned
    #[arg(long, value_name = "N", default_value_t = SearchLimits::default().max_steps)]
    max_steps: usize,

    /// How much longer than the word a sentential form may grow
    #[arg(long, value_name = "N", default_value_t = SearchLimits::default().length_slack)]
    length_slack: usize,

    /// Word to test; repeat for several. Without any, words are read from stdin
    #[arg(short, long = "word", value_name = "WORD")]
    words: Vec<String>,
}

const DEFAULT_GRAMMAR_FILE: &str = "grammar.txt";

fn print_title(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("{}", title);
    println!("{}", "=".repeat(50));
}

fn print_grammar(g: &Grammar, format: OutputFormat) {
    let t = g.to_production_output_vec();
    println!(
        "{}",
        match format {
            OutputFormat::Plain => t.to_plaintext(),
            OutputFormat::Latex => t.to_latex(),
            OutputFormat::Json => t.to_json(),
        }
    );
}

fn save(g: &Grammar, path: &Path) -> Result<(), String> {
    g.save(path)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    println!("[INFO] Saved to {}", path.display());
    Ok(())
}

fn ask_grammar_file() -> Result<PathBuf, String> {
    print!("Grammar file [{}]: ", DEFAULT_GRAMMAR_FILE);
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(match line.trim() {
        "" => PathBuf::from(DEFAULT_GRAMMAR_FILE),
        path => PathBuf::from(path),
    })
}

fn test_word(g: &Grammar, start: &str, word: &str, limits: &SearchLimits, format: OutputFormat) {
    if format == OutputFormat::Plain {
        println!("\nTesting `{}` (start: {})", word, start);
    }
    let d = g.derive(start, word, limits);
    let t = d.to_output();
    println!(
        "{}",
        match format {
            OutputFormat::Plain => t.to_plaintext(),
            OutputFormat::Latex => t.to_latex(),
            OutputFormat::Json => t.to_json(),
        }
    );
}

fn run(cli: Cli) -> Result<(), String> {
    let path = match &cli.file {
        Some(path) => path.clone(),
        None => ask_grammar_file()?,
    };
    let g = Grammar::load(&path).map_err(|e| e.to_string())?;

    println!("[INFO] Start symbol: {}", g.start_symbol);
    println!(
        "[INFO] Nonterminals: {}",
        g.non_terminal_iter().cloned().collect::<Vec<_>>().join(" ")
    );
    println!(
        "[INFO] Terminals: {}",
        g.terminals
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );

    print_title("ORIGINAL");
    print_grammar(&g, cli.format);

    let clean = g.clean();
    print_title("CLEAN (NO EMPTY, UNIT OR USELESS PRODUCTIONS)");
    print_grammar(&clean, cli.format);
    if let Some(path) = &cli.clean_out {
        save(&clean, path)?;
    }

    let cnf = clean.to_cnf();
    print_title("CHOMSKY NORMAL FORM");
    print_grammar(&cnf, cli.format);
    if let Some(path) = &cli.cnf_out {
        save(&cnf, path)?;
    }

    let limits = SearchLimits {
        max_steps: cli.max_steps,
        length_slack: cli.length_slack,
    };
    let searched = match cli.against {
        Against::Original => &g,
        Against::Cnf => &cnf,
    };

    if !cli.words.is_empty() {
        for word in &cli.words {
            test_word(searched, &g.start_symbol, word, &limits, cli.format);
        }
        return Ok(());
    }

    print_title("TEST MODE (type `exit` to quit, an empty line tests the empty word)");
    let stdin = std::io::stdin();
    loop {
        print!("\nWord to test: ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("Failed to read stdin: {}", e)),
        }
        let word = line.trim();
        if ["exit", "quit"].contains(&word.to_lowercase().as_str()) {
            break;
        }
        test_word(searched, &g.start_symbol, word, &limits, cli.format);
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
