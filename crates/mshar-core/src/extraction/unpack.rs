//! Writes parsed archive members to disk.

use std::collections::HashSet;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::ArchiveError;
use crate::Result;
use crate::UnpackConfig;
use crate::inspection::ArchiveMember;
use crate::report::UnpackReport;

/// Writes `members` below `dest`, creating `dest` if needed.
///
/// Each member lands at `dest/./<name>`, the same place the shell script
/// would put it when run from `dest`. A later member with the same name
/// replaces an earlier one, as in the shell. An existing symlink at a
/// member's own path is replaced, never followed, unless
/// `allow_unsafe_paths` is set.
///
/// # Errors
///
/// - [`ArchiveError::PathTraversal`] for absolute names, `..` components or
///   parents that resolve outside `dest` (unless `allow_unsafe_paths`)
/// - [`ArchiveError::AlreadyExists`] when a file exists and `overwrite` is
///   off
/// - [`ArchiveError::Io`] for filesystem failures
pub fn unpack_members(
    members: &[ArchiveMember],
    dest: &Path,
    config: &UnpackConfig,
) -> Result<UnpackReport> {
    let start = Instant::now();
    let mut report = UnpackReport::new();

    fs::create_dir_all(dest)?;
    let canonical_dest = dest.canonicalize()?;
    let mut written: HashSet<PathBuf> = HashSet::new();

    for member in members {
        if member.name.is_empty() {
            return Err(ArchiveError::InvalidArgument {
                reason: "archive member has an empty name".to_string(),
            });
        }
        if !config.allow_unsafe_paths {
            check_member_name(&member.name)?;
        }

        let target = dest.join(format!("./{}", member.name));
        if let Some(parent) = target.parent() {
            if !config.allow_unsafe_paths {
                check_inside(parent, &canonical_dest, &member.name)?;
            }
            if !parent.exists() {
                fs::create_dir_all(parent)?;
                report.directories_created += 1;
            }
        }

        if let Ok(meta) = target.symlink_metadata() {
            if !config.overwrite && !written.contains(&target) {
                return Err(ArchiveError::AlreadyExists { path: target });
            }
            // replace the link itself; writing through it could land outside dest
            if meta.file_type().is_symlink() && !config.allow_unsafe_paths {
                fs::remove_file(&target)?;
            }
        }

        debug!(name = %member.name, bytes = member.data.len(), "x - {}", member.name);
        fs::write(&target, &member.data)?;
        if config.preserve_permissions
            && let Some(mode) = member.mode
        {
            apply_mode(&target, mode)?;
        }

        report.files_written += 1;
        report.bytes_written += member.data.len() as u64;
        written.insert(target);
    }

    report.duration = start.elapsed();
    Ok(report)
}

/// Fails if the nearest existing ancestor of `dir` resolves outside `root`.
///
/// Runs before any directory is created, so a rejected member leaves
/// nothing behind.
fn check_inside(dir: &Path, root: &Path, name: &str) -> Result<()> {
    let existing = dir.ancestors().find(|a| a.exists()).unwrap_or(root);
    if existing.canonicalize()?.starts_with(root) {
        Ok(())
    } else {
        Err(ArchiveError::PathTraversal {
            path: PathBuf::from(name),
        })
    }
}

/// Rejects names that are absolute or climb with `..`.
fn check_member_name(name: &str) -> Result<()> {
    let escapes = Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ArchiveError::PathTraversal {
            path: PathBuf::from(name),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
