//! objinv - Compile plain-text object manifests into Sphinx objects.inv inventories
//!
//! This tool reads manifests of documented objects (one record per line),
//! merges them into a single inventory and writes the binary artifact that
//! Sphinx-compatible tooling consumes to resolve cross-references.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use objinv_core::{BodyEncoding, Inventory, InventoryItem};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Compile plain-text object manifests into a Sphinx objects.inv inventory
#[derive(Parser, Debug)]
#[command(name = "objinv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Output path for the inventory artifact
    #[arg(short, long, default_value = "objects.inv")]
    output: PathBuf,

    /// Project name recorded in the artifact header
    #[arg(long, default_value = "project")]
    project: String,

    /// Project version recorded in the artifact header
    #[arg(long, default_value = "0.0.0")]
    project_version: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Body format for the artifact
    #[arg(long, value_enum, default_value = "zlib")]
    format: BodyFormat,

    /// File extension of manifest fragments collected in directory mode
    #[arg(long, default_value = "objects")]
    extension: String,

    /// Dry run - parse and encode but don't write the artifact
    #[arg(long)]
    dry_run: bool,

    /// Overwrite an existing artifact without prompting
    #[arg(long)]
    force: bool,

    /// Only list registered object names without writing
    #[arg(long)]
    list_only: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single manifest file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of manifest fragments to merge
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Body format for the emitted artifact
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BodyFormat {
    /// zlib-compressed body (the standard objects.inv layout)
    Zlib,
    /// Uncompressed body, for inspection
    Plain,
}

impl From<BodyFormat> for BodyEncoding {
    fn from(format: BodyFormat) -> Self {
        match format {
            BodyFormat::Zlib => BodyEncoding::Zlib,
            BodyFormat::Plain => BodyEncoding::Plain,
        }
    }
}

/// Tracks how the inventory was assembled across manifest files
#[derive(Default)]
struct BuildStats {
    files_read: usize,
    records: usize,
    lines_skipped: usize,
    overwritten: usize,
}

impl BuildStats {
    fn print_summary(&self) {
        info!(
            "Summary: {} records from {} files, {} lines skipped, {} names overwritten",
            self.records, self.files_read, self.lines_skipped, self.overwritten
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

/// Build the inventory from a single manifest file
fn process_single_file(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let mut inventory = Inventory::new(&cli.project, &cli.project_version);
    let mut stats = BuildStats::default();
    load_manifest(file, &mut inventory, &mut stats)?;

    finish(cli, &inventory, &stats)
}

/// Build the inventory by merging every manifest fragment under a directory
fn process_directory(cli: &Cli, directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Collecting manifests under: {}", directory.display());

    let extension = cli.extension.trim_start_matches('.');
    let mut inventory = Inventory::new(&cli.project, &cli.project_version);
    let mut stats = BuildStats::default();
    merge_directory(directory, extension, &mut inventory, &mut stats)?;

    if stats.files_read == 0 {
        warn!(
            "No .{} manifests found under {}",
            extension,
            directory.display()
        );
    }

    finish(cli, &inventory, &stats)
}

/// Merge every manifest fragment under a directory into the inventory.
///
/// Fragments are visited in file-name order so the merged output (and which
/// registration wins a cross-file collision) is deterministic across runs.
/// Hidden files and files without the manifest extension are skipped.
fn merge_directory(
    directory: &Path,
    extension: &str,
    inventory: &mut Inventory,
    stats: &mut BuildStats,
) -> Result<()> {
    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        if !is_manifest(path, extension) {
            trace!("Skipping non-manifest: {}", path.display());
            continue;
        }

        debug!("Processing manifest: {}", path.display());
        load_manifest(path, inventory, stats)?;
    }

    Ok(())
}

/// Returns true when the path carries the manifest fragment extension
fn is_manifest(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Read one manifest file and register its records
fn load_manifest(path: &Path, inventory: &mut Inventory, stats: &mut BuildStats) -> Result<()> {
    trace!("Reading {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    register_records(&text, &path.display().to_string(), inventory, stats)?;
    stats.files_read += 1;
    Ok(())
}

/// Register every record in a manifest's text.
///
/// Blank lines and `#` comments are skipped. A malformed record aborts the
/// build with its location; an artifact must not silently lose records.
/// Name collisions are not errors: the later registration wins, matching
/// the inventory contract.
fn register_records(
    text: &str,
    origin: &str,
    inventory: &mut Inventory,
    stats: &mut BuildStats,
) -> Result<()> {
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            stats.lines_skipped += 1;
            continue;
        }

        let item = parse_record(line)
            .with_context(|| format!("{}:{}: invalid record", origin, lineno + 1))?;

        if inventory.get(&item.name).is_some() {
            warn!(
                "{}:{}: '{}' overwrites an earlier registration",
                origin,
                lineno + 1,
                item.name
            );
            stats.overwritten += 1;
        }

        stats.records += 1;
        inventory.insert(item);
    }

    Ok(())
}

/// Parse one manifest record: `name domain:role priority uri dispname`.
///
/// The display name is the rest of the line and may contain spaces.
fn parse_record(line: &str) -> Result<InventoryItem> {
    let mut parts = line.splitn(5, ' ');
    let (Some(name), Some(target), Some(priority), Some(uri), Some(dispname)) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        bail!("expected 'name domain:role priority uri dispname', got '{line}'");
    };

    let Some((domain, role)) = target.split_once(':') else {
        bail!("expected 'domain:role', got '{target}'");
    };

    Ok(InventoryItem::new(name, domain, role, uri)
        .priority(priority)
        .dispname(dispname))
}

/// Encode the assembled inventory and hand it to the requested output mode
fn finish(cli: &Cli, inventory: &Inventory, stats: &BuildStats) -> Result<()> {
    if cli.list_only {
        for item in inventory.items() {
            println!("{}", item.name);
        }
        return Ok(());
    }

    let artifact = inventory
        .format_sphinx_with(cli.format.into())
        .context("Failed to encode inventory")?;

    if cli.dry_run {
        println!(
            "Would write {} bytes ({} objects) to {}",
            artifact.len(),
            inventory.len(),
            cli.output.display()
        );
        stats.print_summary();
        return Ok(());
    }

    write_artifact(&cli.output, &artifact, cli.force)?;
    println!(
        "Wrote {} ({} objects, {} bytes)",
        cli.output.display(),
        inventory.len(),
        artifact.len()
    );
    stats.print_summary();
    Ok(())
}

/// Write the artifact to disk, refusing to clobber without --force
fn write_artifact(output_path: &Path, artifact: &[u8], force: bool) -> Result<()> {
    // Create parent directories
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Check if file exists
    if output_path.exists() && !force {
        bail!(
            "File already exists: {} (use --force to overwrite)",
            output_path.display()
        );
    }

    // Write the file
    let mut file = fs::File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;

    file.write_all(artifact)
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;

    Ok(())
}
