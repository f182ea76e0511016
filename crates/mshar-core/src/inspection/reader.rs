//! Parses archive text back into members.
//!
//! The reader understands the layout written by the generator and nothing
//! else: it never evaluates shell code from the pre-script or post-script.

use std::io::Read;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::read::GzDecoder;

use crate::ArchiveError;
use crate::Result;
use crate::format;

/// One file recovered from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Name as written in the archive.
    pub name: String,
    /// Decoded file content.
    pub data: Vec<u8>,
    /// Permission bits restored by the archive, if recorded.
    pub mode: Option<u32>,
    /// Whether the payload was gzip-compressed.
    pub compressed: bool,
}

/// Parses every member of an mshar archive, in archive order.
///
/// Text without the mshar banner has no members; an empty archive (only
/// pre-script and post-script) therefore reads as an empty list.
///
/// Every banner starts a section. An archive embedded in the pre-script
/// contributes its members ahead of the outer ones, the order in which
/// running the script would write them.
///
/// # Errors
///
/// Returns [`ArchiveError::MalformedArchive`] for bad quoting, a missing or
/// unterminated here-document, invalid base64, a corrupt gzip stream or an
/// unparsable mode.
///
/// # Examples
///
/// ```
/// use mshar_core::read_archive;
///
/// let members = read_archive("echo nothing here\n")?;
/// assert!(members.is_empty());
/// # Ok::<(), mshar_core::ArchiveError>(())
/// ```
pub fn read_archive(text: &str) -> Result<Vec<ArchiveMember>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut members = Vec::new();
    let mut idx = 0;

    while let Some(offset) = lines[idx..].iter().position(|line| *line == format::BANNER) {
        idx += offset + 1;
        while idx < lines.len()
            && lines[idx] != format::BANNER
            && !lines[idx].starts_with(format::NAME_ASSIGNMENT)
        {
            idx += 1;
        }

        while idx < lines.len() && lines[idx].starts_with(format::NAME_ASSIGNMENT) {
            let (member, next) = read_member(&lines, idx)?;
            members.push(member);
            idx = next;
            while idx < lines.len() && lines[idx].is_empty() {
                idx += 1;
            }
        }
    }
    Ok(members)
}

/// Parses the member starting at `start`; returns it with the index of the
/// first line after it.
fn read_member(lines: &[&str], start: usize) -> Result<(ArchiveMember, usize)> {
    let quoted = &lines[start][format::NAME_ASSIGNMENT.len()..];
    let name = format::shell_unquote(quoted)
        .ok_or_else(|| malformed(start, format!("cannot unquote member name {quoted}")))?;

    let mut idx = start + 1;
    let compressed = loop {
        let Some(line) = lines.get(idx) else {
            return Err(malformed(start, format!("member '{name}' has no payload")));
        };
        if *line == format::DECODE_LINE {
            break false;
        }
        if *line == format::DECODE_GZIP_LINE {
            break true;
        }
        if line.starts_with(format::NAME_ASSIGNMENT) {
            return Err(malformed(idx, format!("member '{name}' has no payload")));
        }
        idx += 1;
    };
    idx += 1;

    let mut payload = String::new();
    loop {
        let Some(line) = lines.get(idx) else {
            return Err(malformed(
                start,
                format!("unterminated here-document for '{name}'"),
            ));
        };
        idx += 1;
        if *line == format::HEREDOC_END {
            break;
        }
        payload.push_str(line.trim_end());
    }

    let mut mode = None;
    if let Some(line) = lines.get(idx)
        && let Some(rest) = line.strip_prefix(format::CHMOD_PREFIX)
        && let Some(bits) = rest.strip_suffix(format::CHMOD_SUFFIX)
    {
        let parsed = u32::from_str_radix(bits, 8)
            .map_err(|_| malformed(idx, format!("invalid mode '{bits}' for '{name}'")))?;
        mode = Some(parsed);
        idx += 1;
    }

    let raw = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| malformed(start, format!("invalid base64 for '{name}': {e}")))?;
    let data = if compressed {
        let mut decoded = Vec::with_capacity(raw.len() * 2);
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| malformed(start, format!("corrupt gzip data for '{name}': {e}")))?;
        decoded
    } else {
        raw
    };

    Ok((
        ArchiveMember {
            name,
            data,
            mode,
            compressed,
        },
        idx,
    ))
}

fn malformed(idx: usize, reason: String) -> ArchiveError {
    ArchiveError::MalformedArchive {
        line: idx + 1,
        reason,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::creation::ArchiveConfig;
    use crate::creation::Compression;
    use crate::creation::encoder;
    use crate::creation::encoder::EncodedMember;
    use std::path::Path;

    fn archive_of(members: &[EncodedMember]) -> String {
        let mut out = String::from("echo pre\n");
        encoder::write_prologue(&mut out, members);
        for m in members {
            m.write_block(&mut out, 76);
        }
        out.push_str("echo post\n");
        out
    }

    fn encoded(name: &str, data: &[u8], config: &ArchiveConfig) -> EncodedMember {
        encoder::encode_bytes(Path::new(name), name.to_string(), data, Some(0o600), config)
            .unwrap()
    }

    #[test]
    fn test_reads_members_in_order() {
        let config = ArchiveConfig::default();
        let text = archive_of(&[
            encoded("b.txt", b"second", &config),
            encoded("a dir/it's.txt", b"first", &config),
        ]);

        let members = read_archive(&text).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "b.txt");
        assert_eq!(members[0].data, b"second");
        assert_eq!(members[0].mode, Some(0o600));
        assert_eq!(members[1].name, "a dir/it's.txt");
        assert_eq!(members[1].data, b"first");
    }

    #[test]
    fn test_reads_gzip_members() {
        let config = ArchiveConfig::default().with_compression(Compression::Gzip);
        let data = "line\n".repeat(500);
        let text = archive_of(&[encoded("log", data.as_bytes(), &config)]);

        let members = read_archive(&text).unwrap();
        assert!(members[0].compressed);
        assert_eq!(members[0].data, data.as_bytes());
    }

    #[test]
    fn test_reads_empty_member() {
        let text = archive_of(&[encoded("empty", b"", &ArchiveConfig::default())]);
        let members = read_archive(&text).unwrap();
        assert_eq!(members.len(), 1);
        assert!(members[0].data.is_empty());
    }

    #[test]
    fn test_reads_archive_embedded_in_pre_script() {
        let config = ArchiveConfig::default();
        let inner = archive_of(&[encoded("inner.txt", b"nested", &config)]);
        let outer = [encoded("outer.txt", b"top", &config)];

        let mut text = inner;
        encoder::write_prologue(&mut text, &outer);
        outer[0].write_block(&mut text, 76);
        text.push_str("echo post\n");

        let members = read_archive(&text).unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["inner.txt", "outer.txt"]);
        assert_eq!(members[1].data, b"top");
    }

    #[test]
    fn test_banner_without_blocks_before_real_archive() {
        let config = ArchiveConfig::default();
        let real = archive_of(&[encoded("real.txt", b"data", &config)]);
        let text = format!("echo '{}'\n{}\n{real}", format::BANNER, format::BANNER);

        let members = read_archive(&text).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "real.txt");
    }

    #[test]
    fn test_no_banner_means_no_members() {
        assert!(read_archive("").unwrap().is_empty());
        assert!(read_archive("MSHAR_NAME='x'\n").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_heredoc() {
        let text = archive_of(&[encoded("x", b"data", &ArchiveConfig::default())]);
        let cut = text.split("MSHAR_EOF\nchmod").next().unwrap();
        let err = read_archive(cut).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive { .. }));
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_invalid_base64() {
        let text = archive_of(&[encoded("x", b"data", &ArchiveConfig::default())]);
        let broken = text.replace("ZGF0YQ==", "Z!F0YQ==");
        let err = read_archive(&broken).unwrap_err();
        assert!(err.to_string().contains("invalid base64"));
    }

    #[test]
    fn test_bad_name_quoting() {
        let text = archive_of(&[encoded("x", b"data", &ArchiveConfig::default())]);
        let broken = text.replace("MSHAR_NAME='x'", "MSHAR_NAME='x");
        assert!(matches!(
            read_archive(&broken),
            Err(ArchiveError::MalformedArchive { .. })
        ));
    }
}
