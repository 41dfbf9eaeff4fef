use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lexicon_db::{Lexicon, LoadMode};
use lexicon_types::DEFAULT_DOMAIN;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use legal_annotator::{AppState, DictionaryScanner, annotate_directory, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_LEXICON: &str = "LemasInfo-dje.json";
const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "legal-annotator")]
#[command(about = "Annotate legal terminology in plain-text documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate every .txt document in a directory into .ann files.
    Annotate {
        /// Lexicon JSON file, or a directory holding LemasInfo-dje.json.
        lexicon: PathBuf,
        /// Directory with the .txt documents.
        input_dir: PathBuf,
        /// Directory receiving one .ann file per document.
        output_dir: PathBuf,
        #[command(flatten)]
        opts: LexiconOpts,
    },
    /// Serve annotation over HTTP.
    Serve {
        #[arg(long, env = "LEXICON_PATH", default_value = DEFAULT_LEXICON)]
        lexicon: PathBuf,
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, env = "MAX_TEXT_BYTES", default_value_t = DEFAULT_MAX_TEXT_BYTES)]
        max_text_bytes: usize,
        #[command(flatten)]
        opts: LexiconOpts,
    },
}

#[derive(Args, Debug, Clone)]
struct LexiconOpts {
    /// Domain tag an entry must carry to be annotated.
    #[arg(long, env = "ANNOTATOR_DOMAIN", default_value = DEFAULT_DOMAIN)]
    domain: String,
    /// How to read the lexicon file: mmap or owned.
    #[arg(long, env = "LEXICON_LOAD_MODE", default_value = "mmap", value_parser = parse_load_mode)]
    lexicon_mode: LoadMode,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Annotate {
            lexicon,
            input_dir,
            output_dir,
            opts,
        } => {
            for (idx, path) in [&lexicon, &input_dir, &output_dir].into_iter().enumerate() {
                warn_if_missing(idx + 1, path);
            }
            let scanner = build_scanner(&lexicon, &opts)?;
            let reports = annotate_directory(&scanner, &input_dir, &output_dir)?;
            let total: usize = reports.iter().map(|r| r.annotations).sum();
            info!("wrote {} annotations across {} documents", total, reports.len());
            Ok(())
        }
        Commands::Serve {
            lexicon,
            host,
            port,
            max_text_bytes,
            opts,
        } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("starting tokio runtime")?
            .block_on(serve(lexicon, host, port, max_text_bytes, opts)),
    }
}

async fn serve(
    lexicon_path: PathBuf,
    host: String,
    port: u16,
    max_text_bytes: usize,
    opts: LexiconOpts,
) -> anyhow::Result<()> {
    info!("binding to {}:{}", host, port);
    let lexicon = Arc::new(load_lexicon(&lexicon_path, opts.lexicon_mode)?);
    let scanner = Arc::new(compile_scanner(&lexicon, &opts.domain)?);

    let state = AppState {
        lexicon,
        scanner,
        max_text_bytes,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_scanner(lexicon_path: &Path, opts: &LexiconOpts) -> anyhow::Result<DictionaryScanner> {
    let lexicon = load_lexicon(lexicon_path, opts.lexicon_mode)?;
    compile_scanner(&lexicon, &opts.domain)
}

fn load_lexicon(path: &Path, mode: LoadMode) -> anyhow::Result<Lexicon> {
    info!("using lexicon at {} (mode: {:?})", path.display(), mode);
    let start = Instant::now();
    let lexicon = Lexicon::load_with_mode(path, mode)
        .with_context(|| format!("loading lexicon from {}", path.display()))?;
    info!(
        "lexicon loaded in {} ms: {} entries, {} subterms",
        start.elapsed().as_millis(),
        lexicon.entry_count(),
        lexicon.subterm_count()
    );
    Ok(lexicon)
}

fn compile_scanner(lexicon: &Lexicon, domain: &str) -> anyhow::Result<DictionaryScanner> {
    let start = Instant::now();
    let scanner = DictionaryScanner::new(lexicon, domain)
        .with_context(|| format!("compiling term patterns for domain {domain}"))?;
    if scanner.entry_count() == 0 {
        warn!("no lexicon entries carry domain tag {}", domain);
    }
    info!(
        "domain {}: {} entries, {} terms compiled in {} ms",
        domain,
        scanner.entry_count(),
        scanner.term_count(),
        start.elapsed().as_millis()
    );
    Ok(scanner)
}

fn warn_if_missing(position: usize, path: &Path) {
    if path.exists() {
        info!("path {}: '{}' exists", position, path.display());
    } else {
        warn!("path {}: '{}' does not exist", position, path.display());
    }
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode {other:?} (expected mmap or owned)")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
