//! marksift - HTML to clean Markdown

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use marksift::{Error, ExtractionResult, Options, Result};

#[derive(Parser)]
#[command(name = "marksift")]
#[command(version, about = "Extract the readable content of an HTML page as Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    marksift page.html                  Print Markdown to stdout
    curl -s URL | marksift -o out.md    Read stdin, write a file
    marksift --json --stats page.html   JSON output, counters on stderr")]
struct Cli {
    /// Input HTML file, `-` or absent for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Print `{markdown, stats}` as JSON
    #[arg(long)]
    json: bool,

    /// Print block counters to stderr
    #[arg(long)]
    stats: bool,

    /// Content-root selector, tried before the defaults (repeatable)
    #[arg(long = "root", value_name = "SELECTOR")]
    roots: Vec<String>,

    /// Extra navigation keyword (repeatable)
    #[arg(long = "nav-keyword", value_name = "WORD")]
    nav_keywords: Vec<String>,

    /// Drop every block inside nav/header/footer/aside
    #[arg(long)]
    suppress_chrome: bool,

    /// Drop blocks with fewer characters of text
    #[arg(long, value_name = "N")]
    min_text_len: Option<usize>,

    /// Ignore the page's <style> sheets when deciding visibility
    #[arg(long)]
    no_stylesheets: bool,

    /// JSON options file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = load_options(cli)?;
    let bytes = read_input(cli.input.as_ref())?;
    log::debug!("read {} bytes of input", bytes.len());

    let result = marksift::extract_html_bytes(&bytes, &options)?;
    if cli.stats {
        print_stats(&result);
    }

    let mut rendered = if cli.json {
        serde_json::to_string_pretty(&result)?
    } else {
        result.markdown
    };
    rendered.push('\n');

    match &cli.output {
        Some(path) => fs::write(path, rendered)?,
        None => io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };

    for root in cli.roots.iter().rev() {
        options = options.with_root_selector(root.clone());
    }
    for keyword in &cli.nav_keywords {
        options = options.with_nav_keyword(keyword.clone());
    }
    if cli.suppress_chrome {
        options.suppress_chrome = true;
    }
    if let Some(len) = cli.min_text_len {
        options.min_text_len = len;
    }
    if cli.no_stylesheets {
        options.use_stylesheets = false;
    }

    options.validate()?;
    Ok(options)
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read(path).map_err(|e| {
            Error::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display())))
        }),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn print_stats(result: &ExtractionResult) {
    let stats = &result.stats;
    eprintln!("Headings: {}", stats.headings);
    eprintln!("Paragraphs: {}", stats.paragraphs);
    eprintln!("Code blocks: {}", stats.code_blocks);
    eprintln!("Lists: {}", stats.lists);
    eprintln!("Tables: {}", stats.tables);
    eprintln!("Quotes: {}", stats.quotes);
}
