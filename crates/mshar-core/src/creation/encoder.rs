//! Turns input files into shell blocks.

use std::fs::File;
use std::fs::Metadata;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::ArchiveError;
use crate::Result;
use crate::creation::config::ArchiveConfig;
use crate::creation::config::Compression;
use crate::format;

/// One input file, encoded and ready to be written as a shell block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMember {
    /// Name the block recreates.
    pub name: String,
    /// Base64 payload without line breaks.
    pub payload: String,
    /// Permission bits restored by `chmod`.
    pub mode: Option<u32>,
    /// Whether the payload is gzip data.
    pub compressed: bool,
    /// Size of the input file in bytes.
    pub raw_len: u64,
}

impl EncodedMember {
    /// Appends this member's block to `out`.
    pub fn write_block(&self, out: &mut String, line_width: usize) {
        out.push('\n');
        out.push_str(format::NAME_ASSIGNMENT);
        out.push_str(&format::shell_quote(&self.name));
        out.push('\n');
        out.push_str(format::ANNOUNCE_LINE);
        out.push('\n');
        out.push_str(format::MKDIR_LINE);
        out.push('\n');
        out.push_str(if self.compressed {
            format::DECODE_GZIP_LINE
        } else {
            format::DECODE_LINE
        });
        out.push('\n');
        for line in format::wrap_lines(&self.payload, line_width) {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(format::HEREDOC_END);
        out.push('\n');
        if let Some(mode) = self.mode {
            out.push_str(format::CHMOD_PREFIX);
            out.push_str(&format!("{mode:o}"));
            out.push_str(format::CHMOD_SUFFIX);
            out.push('\n');
        }
    }
}

/// Appends the prologue that precedes the first block.
///
/// Lists every member in a comment and checks for the tools the blocks use.
pub fn write_prologue(out: &mut String, members: &[EncodedMember]) {
    out.push_str(format::SHEBANG);
    out.push('\n');
    out.push_str(format::BANNER);
    out.push('\n');
    out.push_str("# It recreates the following files:\n");
    for member in members {
        out.push_str("#\t");
        out.push_str(&member.name);
        out.push('\n');
    }
    out.push_str("#\n");
    out.push_str(format::DECODER_CHECK);
    if members.iter().any(|m| m.compressed) {
        out.push_str(format::GZIP_CHECK);
    }
}

/// Derives the member name for `path`.
///
/// # Errors
///
/// - [`ArchiveError::InvalidArgument`] for an empty path, or one equal to the
///   stripped prefix
/// - [`ArchiveError::EncodingFailure`] for names that are not UTF-8 or that
///   contain a line break
pub fn member_name(path: &Path, config: &ArchiveConfig) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(ArchiveError::InvalidArgument {
            reason: "empty file path".to_string(),
        });
    }

    let relative = config
        .strip_prefix
        .as_deref()
        .and_then(|prefix| path.strip_prefix(prefix).ok())
        .unwrap_or(path);
    if relative.as_os_str().is_empty() {
        return Err(ArchiveError::InvalidArgument {
            reason: format!("{} names the stripped prefix itself", path.display()),
        });
    }

    let name = relative
        .to_str()
        .ok_or_else(|| ArchiveError::EncodingFailure {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;
    if name.contains(['\n', '\r']) {
        return Err(ArchiveError::EncodingFailure {
            path: path.to_path_buf(),
            reason: "file name contains a line break".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Reads and encodes one input file.
///
/// The file handle is closed before this function returns, on success and
/// on every error path.
///
/// # Errors
///
/// Any per-file error: see [`ArchiveError::is_file_error`].
pub fn encode_file(path: &Path, config: &ArchiveConfig) -> Result<EncodedMember> {
    let name = member_name(path, config)?;

    let mut file = File::open(path).map_err(|e| ArchiveError::from_input_io(path, e))?;
    let metadata = file
        .metadata()
        .map_err(|e| ArchiveError::from_input_io(path, e))?;
    if !metadata.is_file() {
        return Err(ArchiveError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    check_size(path, metadata.len(), config)?;

    let mut data = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut data)
        .map_err(|e| ArchiveError::from_input_io(path, e))?;
    drop(file);
    // the file may have grown between stat and read
    check_size(path, data.len() as u64, config)?;

    let mode = if config.preserve_permissions {
        permission_bits(&metadata)
    } else {
        None
    };
    encode_bytes(path, name, &data, mode, config)
}

/// Encodes in-memory content as a member named `name`.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`ArchiveError::EncodingFailure`] if gzip compression fails.
pub fn encode_bytes(
    path: &Path,
    name: String,
    data: &[u8],
    mode: Option<u32>,
    config: &ArchiveConfig,
) -> Result<EncodedMember> {
    let gzip = || {
        gzip_bytes(data, config.gzip_level()).map_err(|e| ArchiveError::EncodingFailure {
            path: path.to_path_buf(),
            reason: format!("gzip failed: {e}"),
        })
    };

    let compressed = match config.compression {
        Compression::None => None,
        Compression::Gzip => Some(gzip()?),
        Compression::Auto => Some(gzip()?).filter(|packed| packed.len() < data.len()),
    };

    let (payload, is_compressed) = match compressed {
        Some(packed) => (STANDARD.encode(packed), true),
        None => (STANDARD.encode(data), false),
    };

    debug!(
        name = %name,
        bytes = data.len(),
        encoded = payload.len(),
        compressed = is_compressed,
        "encoded member"
    );

    Ok(EncodedMember {
        name,
        payload,
        mode,
        compressed: is_compressed,
        raw_len: data.len() as u64,
    })
}

fn check_size(path: &Path, size: u64, config: &ArchiveConfig) -> Result<()> {
    match config.max_file_size {
        Some(max) if size > max => Err(ArchiveError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max,
        }),
        _ => Ok(()),
    }
}

// gzip headers from flate2 carry mtime 0, so output is reproducible
fn gzip_bytes(data: &[u8], level: flate2::Compression) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), level);
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &Metadata) -> Option<u32> {
    None
}
