//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::Parser;

use depscribe_go_handler::Ecosystem;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "depscribe.toml";

/// depscribe-go -- Go manifest/lock metadata extractor.
///
/// Reads a manifest (and optionally its lock file) and prints one line of
/// canonical JSON to stdout. Diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "depscribe-go", version, about, long_about = None)]
pub struct Cli {
    /// Manifest file (Gopkg.toml, glide.yaml, Godeps.json).
    pub manifest: PathBuf,

    /// Lock file matching the manifest (Gopkg.lock, glide.lock).
    pub lock: Option<PathBuf>,

    /// Path to the depscribe.toml configuration file.
    ///
    /// When omitted, `depscribe.toml` in the working directory is used if present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Force the ecosystem instead of detecting it from the manifest file name
    /// (dep, glide, godep).
    #[arg(short, long, value_parser = parse_ecosystem)]
    pub ecosystem: Option<Ecosystem>,
}

fn parse_ecosystem(s: &str) -> Result<Ecosystem, String> {
    Ecosystem::from_str_loose(s)
        .ok_or_else(|| format!("unknown ecosystem '{s}', expected dep, glide or godep"))
}
