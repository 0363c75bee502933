//! Write the OpenAPI document as JSON to stdout or a file.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use recipe_box::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Emit the recipe box OpenAPI document",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
    /// Emit compact JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()
    } else {
        doc.to_pretty_json()
    }
    .map_err(io::Error::other)?;

    match args.output {
        Some(path) => std::fs::write(&path, format!("{json}\n")),
        None => writeln!(io::stdout().lock(), "{json}"),
    }
}
