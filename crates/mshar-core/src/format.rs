//! Text layout of an mshar archive.
//!
//! The generator and the reader share these constants, so a change to the
//! emitted script must be made here and nowhere else.
//!
//! ```text
//! <pre-script>
//! #!/bin/sh
//! # This is a shell archive (mshar). Unpack it by running "sh FILE".
//! # It recreates the following files:
//! #	docs/readme.txt
//! #
//! MSHAR_B64=$(command -v base64)
//! if test -z "$MSHAR_B64"; then
//! 	echo 'mshar: the base64 utility is required to unpack this archive' >&2
//! 	exit 1
//! fi
//!
//! MSHAR_NAME='docs/readme.txt'
//! echo "x - $MSHAR_NAME"
//! mkdir -p "$(dirname "./$MSHAR_NAME")"
//! "$MSHAR_B64" -d > "./$MSHAR_NAME" <<'MSHAR_EOF'
//! aGVsbG8K
//! MSHAR_EOF
//! chmod 644 "./$MSHAR_NAME"
//! <post-script>
//! ```

/// First line of the prologue.
pub const SHEBANG: &str = "#!/bin/sh";

/// Banner line that marks the start of the generated body.
pub const BANNER: &str = "# This is a shell archive (mshar). Unpack it by running \"sh FILE\".";

/// Prefix of the line that assigns the member name.
pub const NAME_ASSIGNMENT: &str = "MSHAR_NAME=";

/// Announcement printed while unpacking each member.
pub const ANNOUNCE_LINE: &str = "echo \"x - $MSHAR_NAME\"";

/// Creates the member's parent directory.
pub const MKDIR_LINE: &str = "mkdir -p \"$(dirname \"./$MSHAR_NAME\")\"";

/// Opens the here-document of a plain base64 member.
pub const DECODE_LINE: &str = "\"$MSHAR_B64\" -d > \"./$MSHAR_NAME\" <<'MSHAR_EOF'";

/// Opens the here-document of a gzip-compressed member.
pub const DECODE_GZIP_LINE: &str = "\"$MSHAR_B64\" -d <<'MSHAR_EOF' | gzip -dc > \"./$MSHAR_NAME\"";

/// Closes a member's here-document.
pub const HEREDOC_END: &str = "MSHAR_EOF";

/// Prefix of the permission-restoring line.
pub const CHMOD_PREFIX: &str = "chmod ";

/// Suffix of the permission-restoring line.
pub const CHMOD_SUFFIX: &str = " \"./$MSHAR_NAME\"";

/// Default base64 line width (the MIME limit).
pub const DEFAULT_LINE_WIDTH: usize = 76;

/// Locates the base64 decoder and bails out when it is missing.
pub const DECODER_CHECK: &str = "\
MSHAR_B64=$(command -v base64)
if test -z \"$MSHAR_B64\"; then
\techo 'mshar: the base64 utility is required to unpack this archive' >&2
\texit 1
fi
";

/// Emitted after [`DECODER_CHECK`] when any member is gzip-compressed.
pub const GZIP_CHECK: &str = "\
if test -z \"$(command -v gzip)\"; then
\techo 'mshar: gzip is required to unpack this archive' >&2
\texit 1
fi
";

/// Quotes `value` for a POSIX shell using single quotes.
///
/// # Examples
///
/// ```
/// use mshar_core::format::shell_quote;
///
/// assert_eq!(shell_quote("a b"), "'a b'");
/// assert_eq!(shell_quote("it's"), r"'it'\''s'");
/// ```
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Reverses [`shell_quote`].
///
/// Accepts any concatenation of single-quoted runs and backslash escapes.
/// Returns `None` for unterminated quotes or bare unquoted characters.
///
/// # Examples
///
/// ```
/// use mshar_core::format::shell_unquote;
///
/// assert_eq!(shell_unquote(r"'it'\''s'").as_deref(), Some("it's"));
/// assert_eq!(shell_unquote("'open"), None);
/// ```
#[must_use]
pub fn shell_unquote(quoted: &str) -> Option<String> {
    let mut value = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => loop {
                match chars.next()? {
                    '\'' => break,
                    inner => value.push(inner),
                }
            },
            '\\' => value.push(chars.next()?),
            _ => return None,
        }
    }
    Some(value)
}

/// Splits ASCII `text` into lines of at most `width` bytes.
///
/// An empty input yields no lines.
pub fn wrap_lines(text: &str, width: usize) -> impl Iterator<Item = &str> {
    let width = width.max(1);
    let bytes = text.len();
    (0..bytes)
        .step_by(width)
        .map(move |start| &text[start..bytes.min(start + width)])
}
