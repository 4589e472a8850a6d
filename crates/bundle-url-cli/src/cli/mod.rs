//! CLI for the bundle URL tool.

mod commands;

use anyhow::Result;
use bundle_url_core::config::{self, BundleUrlConfig};
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use commands::{
    run_completions, run_decode, run_encode, run_man, run_product_info, run_quarterly_dates,
    run_release_info, run_releases, run_verify, DecodeOutput,
};

/// Top-level CLI. `bundle-url <ENCODED> <KEY>` decodes directly; the
/// subcommands cover encoding and catalog work.
#[derive(Debug, Parser)]
#[command(name = "bundle-url", version)]
#[command(about = "Decode encoded bundle references into plain download URLs", long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/bundle-url/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Encoded bundle reference.
    #[arg(required = true)]
    pub encoded: Option<String>,

    /// Decode key: the release date, e.g. 05/12/2023 or 2023-05-12.
    #[arg(required = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Decode an encoded bundle reference and print the URL.
    Decode {
        /// Encoded bundle reference.
        encoded: String,
        /// Decode key (release date).
        key: String,
        /// Print `{"url": ..., "metadata": ...}` instead of the bare URL.
        #[arg(long)]
        json: bool,
        /// Print embedded metadata on a second line when present.
        #[arg(long, conflicts_with = "json")]
        with_metadata: bool,
    },

    /// Encode a URL into a bundle reference.
    Encode {
        /// Absolute URL to encode.
        url: String,
        /// Encode key (release date).
        key: String,
        /// Metadata to embed, e.g. a build timestamp (printable ASCII).
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Build derived catalogs from a .product_info.json file.
    ProductInfo {
        /// Path to the product catalog.
        path: PathBuf,
        /// Directory for the derived catalogs (default: config, else current dir).
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Replace encoded bundleUrl/bundleChecksumMD5Url with decoded URLs.
        #[arg(long, env = "DECODE_BUNDLE_URLS", value_parser = FalseyValueParser::new())]
        decode_bundle_urls: bool,
    },

    /// Print the release properties of a release.properties file as JSON.
    ReleaseInfo {
        /// Path to release.properties.
        path: PathBuf,
    },

    /// Write per-edition and per-version release listings from a releases.json file.
    Releases {
        /// Path to releases.json.
        path: PathBuf,
        /// Directory for the listings (default: config, else ./releases).
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Attach <DIR>/<release path>/release.properties to each release.
        #[arg(long, value_name = "DIR")]
        properties_dir: Option<PathBuf>,
    },

    /// Write quarterly release support dates from Docker Hub tag pages.
    QuarterlyDates {
        /// Tag listing pages (JSON), in any order.
        #[arg(required = true)]
        pages: Vec<PathBuf>,
        /// Directory for the CSV and JSON files (default: config, else current dir).
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Take first ship dates from <DIR>/<tag>/release.properties when present.
        #[arg(long, value_name = "DIR")]
        properties_dir: Option<PathBuf>,
    },

    /// Verify a downloaded bundle against bundle.checksum.sha512.
    Verify {
        /// Downloaded bundle archive.
        file: PathBuf,
        /// release.properties carrying the expected checksum.
        properties: PathBuf,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    fn run(self) -> Result<()> {
        let Cli {
            config,
            encoded,
            key,
            command,
        } = self;

        let command = match (command, encoded, key) {
            (Some(command), _, _) => command,
            (None, Some(encoded), Some(key)) => CliCommand::Decode {
                encoded,
                key,
                json: false,
                with_metadata: false,
            },
            _ => anyhow::bail!("expected <ENCODED> <KEY> or a subcommand"),
        };

        match &command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = load_config(config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match command {
            CliCommand::Decode {
                encoded,
                key,
                json,
                with_metadata,
            } => {
                let output = if json {
                    DecodeOutput::Json
                } else if with_metadata {
                    DecodeOutput::WithMetadata
                } else {
                    DecodeOutput::Url
                };
                run_decode(&cfg, &encoded, &key, output)?;
            }
            CliCommand::Encode { url, key, metadata } => {
                run_encode(&cfg, &url, &key, metadata.as_deref())?
            }
            CliCommand::ProductInfo {
                path,
                out_dir,
                decode_bundle_urls,
            } => run_product_info(&cfg, &path, out_dir.as_deref(), decode_bundle_urls)?,
            CliCommand::ReleaseInfo { path } => run_release_info(&path)?,
            CliCommand::Releases {
                path,
                out_dir,
                properties_dir,
            } => run_releases(&cfg, &path, out_dir.as_deref(), properties_dir.as_deref())?,
            CliCommand::QuarterlyDates {
                pages,
                out_dir,
                properties_dir,
            } => run_quarterly_dates(&cfg, &pages, out_dir.as_deref(), properties_dir.as_deref())?,
            CliCommand::Verify { file, properties } => run_verify(&file, &properties)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<BundleUrlConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
