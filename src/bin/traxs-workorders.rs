//! Traxs work orders CLI tool
//!
//! Downloads every chunk of the work order PDF from a Traxs WordPress site
//! and merges them into a single document.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use traxs_workorders::fetch::{download_chunks, normalize_base_url, FetchOptions};
use traxs_workorders::pdf::{count_pages, merge_pdfs};

/// Fetch and merge Traxs work order PDFs
#[derive(Parser)]
#[command(name = "traxs-workorders")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Fetch with an application password on the command line
    traxs-workorders -u https://shop.example.com -U admin -P app-password

    # Prompt for the password and write to a custom path
    traxs-workorders -u https://shop.example.com -U admin -o today.pdf

    # Ask the server for larger chunks
    traxs-workorders -u https://shop.example.com -U admin -c 16")]
struct Cli {
    /// Base WordPress URL (trailing slash is stripped)
    #[arg(short = 'u', long)]
    url: String,

    /// WordPress username
    #[arg(short = 'U', long)]
    user: String,

    /// Application password for the user; prompted if omitted
    #[arg(short = 'P', long)]
    password: Option<String>,

    /// Chunk size to request
    #[arg(short = 'c', long, default_value_t = 8)]
    chunk_size: u32,

    /// Merged PDF output path
    #[arg(short = 'o', long, default_value = "traxs-workorders.pdf")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let password = match cli.password {
        Some(password) => password,
        None => rpassword::prompt_password("Application password: ")?,
    };

    let options = FetchOptions {
        base_url: normalize_base_url(&cli.url).to_string(),
        username: cli.user,
        password,
        chunk_size: cli.chunk_size,
    };

    eprintln!("Fetching work order chunks from {}...", options.base_url);
    let chunks = download_chunks(&options)?;

    eprintln!("Merging {} chunk files...", chunks.len());
    merge_pdfs(chunks.paths(), &cli.output)?;
    chunks.cleanup()?;

    let pages = count_pages(&cli.output)?;
    eprintln!("Wrote {} ({} pages)", cli.output.display(), pages);

    Ok(())
}
