// SPDX-License-Identifier: PMPL-1.0-or-later

//! gettext-json: export compiled gettext catalogs as ordered JSON/YAML
//!
//! `export` turns `<PATH>/<lang>/LC_MESSAGES/<DOMAIN>.mo` into a document
//! keyed by message id. `preprocess` rewrites JavaScript-style sources so a
//! `#`-comment string extractor can read them.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gettext_json::output::OutputFormat;
use gettext_json::{locale, preprocess, ExportConfig};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gettext-json")]
#[command(version)]
#[command(about = "Export compiled gettext catalogs as ordered JSON or YAML documents")]
#[command(long_about = None)]
#[command(after_help = "Catalog export takes its DOMAIN and PATH positionals under the `export` \
subcommand:\n  gettext-json export messages ./locale --lang fr --indent 2")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a compiled catalog as a key-ordered document
    Export {
        /// Catalog domain (the .mo file name without extension)
        #[arg(value_name = "DOMAIN")]
        domain: String,

        /// Directory holding <lang>/LC_MESSAGES/<DOMAIN>.mo trees
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Acceptable language, in preference order (repeatable);
        /// defaults to LANGUAGE, LC_ALL, LC_MESSAGES, LANG
        #[arg(short = 'l', long = "lang", value_name = "LANG")]
        languages: Vec<String>,

        /// Pretty-print JSON with this many spaces per level
        #[arg(short, long, value_name = "N")]
        indent: Option<usize>,

        /// Output format (default: from --output extension, else json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite `+` string continuations and `//` comments for extraction
    Preprocess {
        /// Read from a file instead of stdin
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            domain,
            path,
            languages,
            indent,
            format,
            output,
        } => {
            let format = format
                .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
                .unwrap_or_default();
            let config = ExportConfig::new(domain, path)
                .with_languages(languages)
                .with_fallback_languages(locale::languages_from_env())
                .with_format(format)
                .with_indent(indent);

            let rendered = gettext_json::export(&config)
                .with_context(|| format!("exporting domain `{}`", config.domain))?;

            if let Some(output_path) = output {
                fs::write(&output_path, format!("{}\n", rendered))
                    .with_context(|| format!("writing {}", output_path.display()))?;
                tracing::info!(path = %output_path.display(), "document written");
            } else {
                println!("{}", rendered);
            }
        }

        Commands::Preprocess { input } => {
            let source = match input {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .context("reading stdin")?;
                    buffer
                }
            };
            let rewritten = preprocess::run(&source).context("compiling rewrite patterns")?;
            print!("{}", rewritten);
        }
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
