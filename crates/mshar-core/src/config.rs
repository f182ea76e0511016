//! Configuration for unpacking archives without a shell.

/// Options for [`unpack_archive`](crate::unpack_archive).
///
/// The defaults are stricter than running the archive with `sh`: member
/// names that would land outside the destination are rejected and existing
/// files are never replaced.
///
/// # Examples
///
/// ```
/// use mshar_core::UnpackConfig;
///
/// let config = UnpackConfig {
///     overwrite: true,
///     ..Default::default()
/// };
/// assert!(!config.allow_unsafe_paths);
/// ```
#[derive(Debug, Clone)]
pub struct UnpackConfig {
    /// Replace files that already exist in the destination.
    ///
    /// Default: `false`.
    pub overwrite: bool,

    /// Accept absolute names and `..` components, resolving them the way the
    /// shell script does (relative to the destination, `..` unchecked).
    ///
    /// Default: `false`.
    pub allow_unsafe_paths: bool,

    /// Apply the permission bits recorded in the archive (unix only).
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            allow_unsafe_paths: false,
            preserve_permissions: true,
        }
    }
}
