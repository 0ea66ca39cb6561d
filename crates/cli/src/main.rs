mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uncouple_core::domain::{ReconcileConfig, RunMode};

/// Uncouple removed RAW files from their rendered backing files in a Shotwell catalog
#[derive(Parser, Debug)]
#[command(name = "uncouple", version, about)]
struct Cli {
    /// Uncouple only RAW files whose catalog path starts with this prefix
    #[arg(required = true)]
    paths: Vec<String>,

    /// Show debug info
    #[arg(short, long)]
    debug: bool,

    /// Don't write anything, just simulate
    #[arg(long)]
    dry_run: bool,

    /// Path to the Shotwell catalog database
    #[arg(long, default_value_t = default_catalog_path())]
    catalog: String,

    /// Extension of the RAW files to uncouple
    #[arg(long, default_value = "NEF")]
    raw_ext: String,

    /// Suffix a backing file must end with to replace its RAW file
    #[arg(long, default_value = "JPG")]
    backing_suffix: String,
}

impl Cli {
    fn config(&self) -> ReconcileConfig {
        ReconcileConfig {
            raw_extension: self.raw_ext.clone(),
            backing_suffix: self.backing_suffix.clone(),
        }
    }
}

fn default_catalog_path() -> String {
    data_home()
        .join("shotwell")
        .join("data")
        .join("photo.db")
        .to_string_lossy()
        .to_string()
}

fn data_home() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local").join("share")
    })
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    commands::reconcile::run(
        &PathBuf::from(&cli.catalog),
        &cli.paths,
        cli.config(),
        RunMode::from_dry_run(cli.dry_run),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_a_path() {
        assert!(Cli::try_parse_from(["uncouple"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["uncouple", "/photos/2019"]).unwrap();
        assert_eq!(cli.paths, vec!["/photos/2019"]);
        assert!(!cli.debug);
        assert!(!cli.dry_run);
        assert_eq!(cli.config(), ReconcileConfig::default());
        assert!(cli.catalog.ends_with("photo.db"));
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "uncouple",
            "-d",
            "--dry-run",
            "--catalog",
            "/tmp/photo.db",
            "--raw-ext",
            "CR2",
            "--backing-suffix",
            "TIF",
            "/a",
            "/b/DSC",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(RunMode::from_dry_run(cli.dry_run), RunMode::Simulate);
        assert_eq!(cli.catalog, "/tmp/photo.db");
        assert_eq!(cli.paths, vec!["/a", "/b/DSC"]);
        assert_eq!(cli.config().raw_extension, "CR2");
        assert_eq!(cli.config().backing_suffix, "TIF");
    }

    #[test]
    fn test_default_catalog_under_shotwell_data() {
        let path = PathBuf::from(default_catalog_path());
        assert!(path.ends_with("shotwell/data/photo.db"));
    }
}
