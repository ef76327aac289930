use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use treescribe::services::fs::LocalFsBackend;
use treescribe::services::tracing_setup;
use treescribe::tree::{self, ScanOptions, TreeStore};

/// Render a directory tree as ASCII art or a markdown list
#[derive(Parser, Debug)]
#[command(name = "treescribe")]
#[command(about = "Scan a directory into a tree and print it", long_about = None)]
#[command(version)]
struct Args {
    /// Directory to scan (required unless --load is given)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Exclude entries with this exact name (repeatable)
    #[arg(long, value_name = "NAME")]
    ignore: Vec<String>,

    /// Don't read per-directory ignore files
    #[arg(long)]
    no_ignore_file: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Save the scanned tree as JSON
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Render a previously saved tree instead of scanning
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Path to log file for diagnostics (default: stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    List,
}

async fn obtain_store(args: &Args) -> AnyhowResult<TreeStore> {
    if let Some(load_path) = &args.load {
        let text = std::fs::read_to_string(load_path)
            .with_context(|| format!("Failed to read {}", load_path.display()))?;
        let saved = tree::from_json_str(&text)
            .with_context(|| format!("Failed to load tree from {}", load_path.display()))?;
        return Ok(tree::from_snapshot(&saved));
    }

    let path = args
        .path
        .clone()
        .context("PATH is required unless --load is given")?;

    let options = ScanOptions {
        ignore_names: args.ignore.iter().cloned().collect(),
        use_ignore_file: !args.no_ignore_file,
    };

    let backend = LocalFsBackend::new();
    let store = tree::build(&backend, &path, &options)
        .await
        .with_context(|| format!("Failed to scan {}", path.display()))?;

    tracing::info!(
        "Scanned {} into {} nodes",
        path.display(),
        store.node_count()
    );
    Ok(store)
}

#[tokio::main]
async fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    tracing_setup::init_global(args.log_file.as_deref());

    let store = obtain_store(&args).await?;

    if let Some(save_path) = &args.save {
        let snapshot = tree::to_snapshot(&store);
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize tree")?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        tracing::info!("Saved tree to {}", save_path.display());
    }

    let rendered = match args.format {
        OutputFormat::Ascii => tree::to_ascii_tree(&store, store.root_id()),
        OutputFormat::List => tree::to_list_tree(&store, store.root_id()),
    };
    print!("{rendered}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::parse_from(["treescribe", "/tmp/project"]);

        assert_eq!(args.path, Some(PathBuf::from("/tmp/project")));
        assert!(args.ignore.is_empty());
        assert!(!args.no_ignore_file);
        assert_eq!(args.format, OutputFormat::Ascii);
        assert_eq!(args.save, None);
        assert_eq!(args.load, None);
    }

    #[test]
    fn test_args_parse_repeated_ignore() {
        let args = Args::parse_from([
            "treescribe",
            "/tmp/project",
            "--ignore",
            "node_modules",
            "--ignore",
            "dist",
            "--format",
            "list",
        ]);

        assert_eq!(args.ignore, vec!["node_modules", "dist"]);
        assert_eq!(args.format, OutputFormat::List);
    }

    #[test]
    fn test_args_parse_load_without_path() {
        let args = Args::parse_from(["treescribe", "--load", "tree.json"]);

        assert_eq!(args.path, None);
        assert_eq!(args.load, Some(PathBuf::from("tree.json")));
    }
}
