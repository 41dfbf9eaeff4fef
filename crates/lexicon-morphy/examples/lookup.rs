use std::env;
use std::process::ExitCode;

use lexicon_morphy::{expression_forms, plural_rule_for};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let words: Vec<String> = match args.first().map(String::as_str) {
        None => {
            eprintln!("usage: cargo run -p lexicon-morphy --example lookup -- [--demo | <term>...]");
            return ExitCode::FAILURE;
        }
        Some("--demo") => vec![
            "despido".into(),
            "ley".into(),
            "juez".into(),
            "comité".into(),
            "convenio colectivo".into(),
        ],
        Some(_) => args,
    };

    for term in words {
        println!("\nTerm: {}", term);
        for word in term.split_whitespace() {
            println!("  {:<14} [{}]", word, plural_rule_for(word));
        }
        for form in expression_forms(&term) {
            println!("    -> {}", form);
        }
    }

    ExitCode::SUCCESS
}
