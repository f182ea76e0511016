//! Property-based tests for archive generation.
//!
//! These tests use proptest to generate arbitrary file contents, names and
//! scripts, and check that the archive always reads back to the inputs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mshar_core::ArchiveConfig;
use mshar_core::Compression;
use mshar_core::ErrorPolicy;
use mshar_core::ShellArchiver;
use mshar_core::creation::encoder;
use mshar_core::format;
use mshar_core::generate_lenient;
use mshar_core::read_archive;
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn compression_strategy() -> impl Strategy<Value = Compression> {
    prop_oneof![
        Just(Compression::None),
        Just(Compression::Gzip),
        Just(Compression::Auto),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every file comes back byte-identical and in input order.
    #[test]
    fn prop_contents_round_trip(
        contents in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2048), 0..6),
        compression in compression_strategy(),
    ) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let paths: Vec<_> = contents
            .iter()
            .enumerate()
            .map(|(i, data)| {
                let path = temp.path().join(format!("f{i}"));
                fs::write(&path, data).expect("failed to write fixture");
                path
            })
            .collect();

        let archive = ShellArchiver::new()
            .files(&paths)
            .compression(compression)
            .strip_prefix(temp.path())
            .policy(ErrorPolicy::Strict)
            .build()
            .expect("generation failed");

        let members = read_archive(&archive.text).expect("archive must parse");
        prop_assert_eq!(members.len(), contents.len());
        for (i, (member, data)) in members.iter().zip(&contents).enumerate() {
            prop_assert_eq!(&member.name, &format!("f{i}"));
            prop_assert_eq!(&member.data, data);
        }
    }

    /// Names with quotes, spaces and shell metacharacters survive quoting.
    #[test]
    fn prop_names_survive_quoting(name in "[a-zA-Z0-9 '\"$`\\\\;&|*?_./-]{1,40}") {
        let config = ArchiveConfig::default();
        let member = encoder::encode_bytes(Path::new(&name), name.clone(), b"x", None, &config)
            .expect("encoding failed");

        let mut text = String::new();
        encoder::write_prologue(&mut text, std::slice::from_ref(&member));
        member.write_block(&mut text, format::DEFAULT_LINE_WIDTH);

        let members = read_archive(&text).expect("archive must parse");
        prop_assert_eq!(members.len(), 1);
        prop_assert_eq!(&members[0].name, &name);
        prop_assert_eq!(format::shell_unquote(&format::shell_quote(&name)), Some(name));
    }

    /// With nothing to archive the output is exactly pre-script then post-script.
    #[test]
    fn prop_empty_list_is_scripts_only(
        pre in proptest::option::of("[ -~\n]{0,80}"),
        post in proptest::option::of("[ -~\n]{0,80}"),
    ) {
        let none: [&str; 0] = [];
        let archive = generate_lenient(pre.as_deref(), post.as_deref(), &none);
        let expected = format!(
            "{}{}",
            pre.as_deref().unwrap_or_default(),
            post.as_deref().unwrap_or_default()
        );
        prop_assert_eq!(archive.text, expected);
    }

    /// Payload lines never exceed the configured width.
    #[test]
    fn prop_payload_lines_respect_width(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        quads in 1usize..40,
    ) {
        let width = quads * 4;
        let config = ArchiveConfig::default().with_line_width(width);
        let member = encoder::encode_bytes(Path::new("w"), "w".to_string(), &data, None, &config)
            .expect("encoding failed");

        let mut block = String::new();
        member.write_block(&mut block, width);
        let payload_lines = block
            .lines()
            .skip_while(|line| *line != format::DECODE_LINE)
            .skip(1)
            .take_while(|line| *line != format::HEREDOC_END);
        for line in payload_lines {
            prop_assert!(line.len() <= width);
        }
    }
}
