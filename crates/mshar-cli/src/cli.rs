//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use mshar_core::Compression;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mshar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a shell archive from files
    Create(CreateArgs),
    /// List archive members without unpacking
    List(ListArgs),
    /// Unpack an archive without running it
    Extract(ExtractArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Files to archive, in order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Script run before unpacking ("-" for none)
    #[arg(long, value_name = "FILE")]
    pub pre: Option<PathBuf>,

    /// Script run after unpacking ("-" for none)
    #[arg(long, value_name = "FILE")]
    pub post: Option<PathBuf>,

    /// Write the archive here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Fail on the first file that cannot be archived
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Skip unreadable files without reporting them
    #[arg(long)]
    pub lenient: bool,

    /// Payload compression
    #[arg(long, value_enum, default_value_t = CompressArg::None)]
    pub compress: CompressArg,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Strip path prefix from member names
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<PathBuf>,

    /// Maximum single file size in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Do not record file permissions
    #[arg(long)]
    pub no_permissions: bool,

    /// Accept an empty file list (default)
    #[arg(long, conflicts_with = "reject_empty")]
    pub allow_empty: bool,

    /// Treat an empty file list as an error
    #[arg(long)]
    pub reject_empty: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompressArg {
    /// Plain base64
    None,
    /// Always gzip before encoding
    Gzip,
    /// Gzip only when it makes the member smaller
    Auto,
}

impl From<CompressArg> for Compression {
    fn from(arg: CompressArg) -> Self {
        match arg {
            CompressArg::None => Self::None,
            CompressArg::Gzip => Self::Gzip,
            CompressArg::Auto => Self::Auto,
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed file information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Allow absolute names and `..` components
    #[arg(long)]
    pub allow_unsafe_paths: bool,

    /// Restore file permissions recorded in the archive
    #[arg(long)]
    pub preserve_permissions: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (digits, multiplier) = match s.char_indices().last() {
        Some((idx, 'K')) => (&s[..idx], 1024),
        Some((idx, 'M')) => (&s[..idx], 1024_u64.pow(2)),
        Some((idx, 'G')) => (&s[..idx], 1024_u64.pow(3)),
        Some((idx, 'T')) => (&s[..idx], 1024_u64.pow(4)),
        _ => (s, 1),
    };

    digits
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("1T").unwrap(), 1024_u64.pow(4));
        assert!(parse_byte_size("K").is_err());
        assert!(parse_byte_size("").is_err());
        assert!(parse_byte_size("18446744073709551615K").is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_flags() {
        let cli = Cli::try_parse_from([
            "mshar", "create", "--pre", "-", "--compress", "auto", "--strict", "a", "b",
        ])
        .unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.files, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.pre, Some(PathBuf::from("-")));
        assert_eq!(Compression::from(args.compress), Compression::Auto);
        assert!(args.strict);

        assert!(Cli::try_parse_from(["mshar", "create", "--strict", "--lenient", "a"]).is_err());
    }
}
