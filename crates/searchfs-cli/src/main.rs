//! searchfs binary
//!
//! Drives the filesystem adapter from the command line, the same calls a
//! mounted bridge would make.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in sample book catalog
//! searchfs ls /
//! searchfs ls /tags/Fantasy/books
//! searchfs stat "/books/Storm Front/title"
//! searchfs resolve /tags/Fantasy/author/Pratchett
//!
//! # Configured backend
//! searchfs --config searchfs.ron ls /films
//! ```
//!
//! Set `RUST_LOG=searchfs_kernel=debug` to see each backend call.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use searchfs_kernel::{FileAttr, SearchFsConfig, Searcher};

/// Browse a search backend as a filesystem.
#[derive(Parser, Debug)]
#[command(name = "searchfs")]
#[command(about = "Browse a search backend as a filesystem tree")]
struct Args {
    /// RON config file (default: built-in sample book catalog)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a directory (readdir)
    Ls { path: String },
    /// Show attributes (getattr)
    Stat { path: String },
    /// Read a file (always empty)
    Read {
        path: String,
        /// Bytes to request
        #[arg(long, default_value_t = 4096)]
        length: usize,
        /// Offset to read from
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Print how a path is classified, as JSON
    Resolve { path: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => SearchFsConfig::load(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => SearchFsConfig::default(),
    };
    let fs = config.build();
    tracing::debug!(entities = fs.searcher().entities().len(), "backend ready");

    let code = match args.command {
        Command::Ls { path } => {
            let mut out = Err(0);
            fs.readdir(&path, |status, names, _attrs| {
                out = if status == 0 { Ok(names) } else { Err(status) };
            })
            .await;
            match out {
                Ok(names) => {
                    for name in names {
                        println!("{name}");
                    }
                    ExitCode::SUCCESS
                }
                Err(status) => not_found("ls", &path, status),
            }
        }
        Command::Stat { path } => {
            let mut out = None;
            fs.getattr(&path, |status, attr| out = Some((status, attr))).await;
            match out {
                Some((0, Some(attr))) => {
                    print_attr(&path, &attr);
                    ExitCode::SUCCESS
                }
                Some((status, _)) => not_found("stat", &path, status),
                None => ExitCode::FAILURE,
            }
        }
        Command::Read {
            path,
            length,
            offset,
        } => {
            let mut buf = vec![0u8; length];
            let mut bytes = 0;
            fs.read(&path, 0, &mut buf, length, offset, |n| bytes = n);
            println!("{bytes} bytes");
            ExitCode::SUCCESS
        }
        Command::Resolve { path } => match fs.route(&path) {
            Some(route) => {
                println!("{}", serde_json::to_string_pretty(&route)?);
                ExitCode::SUCCESS
            }
            None => not_found("resolve", &path, 0),
        },
    };
    Ok(code)
}

fn not_found(op: &str, path: &str, status: i32) -> ExitCode {
    eprintln!("searchfs: {op}: {path}: No such file or directory");
    tracing::debug!(status, "operation failed");
    ExitCode::FAILURE
}

fn print_attr(path: &str, attr: &FileAttr) {
    println!("  File: {path}");
    println!("  Kind: {}", attr.kind);
    println!("  Size: {}", attr.size);
    println!("  Mode: {:o}", attr.mode);
    println!(" Links: {}", attr.nlink);
    println!("   Uid: {}  Gid: {}", attr.uid, attr.gid);
}
