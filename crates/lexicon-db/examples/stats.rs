use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lexicon_db::{Lexicon, LoadMode};
use lexicon_types::DEFAULT_DOMAIN;

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p lexicon-db --example stats -- <lexicon.json | lexicon-dir>")?;

    let lexicon = Lexicon::load_with_mode(&path, LoadMode::Mmap)
        .with_context(|| format!("loading lexicon from {}", path.display()))?;

    let multiword = lexicon
        .entries()
        .iter()
        .filter(|e| e.name.split_whitespace().nth(1).is_some())
        .count();

    println!("Lexicon      : {}", path.display());
    println!("Entries      : {}", lexicon.entry_count());
    println!("Subterms     : {}", lexicon.subterm_count());
    println!("Multiword names: {}", multiword);
    println!("Domain tags:");
    for (tag, count) in lexicon.domain_counts() {
        println!("  {:<10} {}", tag, count);
    }

    let sample: Vec<&str> = lexicon
        .entries_for_domain(DEFAULT_DOMAIN)
        .take(5)
        .map(|e| e.name.as_str())
        .collect();
    println!("First {} entries: {:?}", DEFAULT_DOMAIN, sample);

    Ok(())
}
