//! wtree CLI - Command line interface for weighted_merkle
//!
//! Builds trees from JSON manifests, prints proofs and verifies them.
//! Output is JSON on stdout; logs go to stderr (set RUST_LOG to see them).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use weighted_merkle::{Entry, Hash, HashAlgorithm, Hasher, MerkleTree, Proof, TreeManifest};

#[derive(Parser)]
#[command(name = "wtree")]
#[command(about = "A probability-weighted merkle tree whose proofs reveal each entry's interval")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Hash function, overriding the manifest (keccak256 or blake3)
    #[arg(long)]
    hash: Option<HashAlgorithm>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the root hash of the tree described by a manifest
    Root {
        /// Path to the JSON manifest
        manifest: PathBuf,
    },

    /// List every leaf with its interval of [0,1)
    Layout {
        /// Path to the JSON manifest
        manifest: PathBuf,
    },

    /// Produce a merkle proof for an entry
    Prove {
        /// Path to the JSON manifest
        manifest: PathBuf,
        /// Hex encoded value of the entry
        value: String,
        /// Weight of the entry (defaults to the first entry with this value)
        #[arg(short, long)]
        weight: Option<f64>,
    },

    /// Verify a proof against a root hash and print the decoded interval
    Verify {
        /// Root hash (hex)
        #[arg(short, long)]
        root: String,
        /// Proof digests (hex), leaf first
        #[arg(required = true)]
        proof: Vec<String>,
    },

    /// Pick the entry whose interval contains a point of [0,1)
    Select {
        /// Path to the JSON manifest
        manifest: PathBuf,
        /// Point in [0,1)
        point: f64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Root { manifest } => {
            let (tree, algorithm) = load_tree(&manifest, cli.hash)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash().to_hex(),
                    "hash": algorithm.as_str(),
                    "entries": tree.entries().len(),
                    "padding": tree.padding().len(),
                    "leaves": tree.leaf_count()
                }),
            )?;
        }

        Commands::Layout { manifest } => {
            let (tree, _) = load_tree(&manifest, cli.hash)?;
            let items: Vec<_> = tree
                .layout()
                .into_iter()
                .map(|(entry, interval)| {
                    serde_json::json!({
                        "value": hex::encode(entry.value()),
                        "weight": entry.weight(),
                        "start": interval.start(),
                        "end": interval.end(),
                        "interval": interval.to_string()
                    })
                })
                .collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash().to_hex(),
                    "count": items.len(),
                    "leaves": items
                }),
            )?;
        }

        Commands::Prove {
            manifest,
            value,
            weight,
        } => {
            let (tree, _) = load_tree(&manifest, cli.hash)?;
            let bytes = hex::decode(value.strip_prefix("0x").unwrap_or(&value))?;
            let entry = match weight {
                Some(w) => Entry::new(bytes, w),
                None => tree
                    .leaves()
                    .find(|e| e.value() == bytes.as_slice())
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("No entry with value {}", value))?,
            };
            let proof = tree.prove(&entry)?;
            let interval = tree.verify(&proof)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "root": tree.root_hash().to_hex(),
                    "proof": proof.to_hex(),
                    "interval": interval.to_string()
                }),
            )?;
        }

        Commands::Verify { root, proof } => {
            let algorithm = cli.hash.unwrap_or_default();
            let root = Hash::from_hex(&root)
                .map_err(|e| anyhow::anyhow!("Invalid root hash {}: {}", root, e))?;
            let proof = Proof::from_hex(&proof)?;
            let interval = proof.verify(&*algorithm.hasher(), &root)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "interval": interval.to_string(),
                    "start": interval.start(),
                    "end": interval.end(),
                    "weight": interval.width().as_f64()
                }),
            )?;
        }

        Commands::Select { manifest, point } => {
            let (tree, _) = load_tree(&manifest, cli.hash)?;
            let entry = tree
                .select(point)
                .ok_or_else(|| anyhow::anyhow!("Point {} is outside [0,1)", point))?;
            output(
                &cli.format,
                &serde_json::json!({
                    "point": point,
                    "value": hex::encode(entry.value()),
                    "weight": entry.weight()
                }),
            )?;
        }
    }

    Ok(())
}

fn load_tree(
    path: &Path,
    hash: Option<HashAlgorithm>,
) -> anyhow::Result<(MerkleTree<Box<dyn Hasher>>, HashAlgorithm)> {
    let manifest = TreeManifest::load(path)?;
    let algorithm = hash.unwrap_or(manifest.hash);
    let tree = MerkleTree::build_with(algorithm.hasher(), manifest.to_entries()?)?;
    Ok((tree, algorithm))
}

fn output(format: &OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
