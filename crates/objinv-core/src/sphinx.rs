//! Sphinx `objects.inv` encoding.
//!
//! This module serializes an [`Inventory`] into the version-2 objects
//! inventory format understood by Sphinx and intersphinx-compatible
//! tooling.
//!
//! ## Artifact Layout
//!
//! The artifact is a plain-text header immediately followed by the body,
//! with no separator:
//!
//! ```text
//! # Sphinx inventory version 2
//! # Project: {project}
//! # Version: {version}
//! # The remainder of this file is compressed using zlib.
//! <body>
//! ```
//!
//! The four header lines are emitted exactly as shown, each newline
//! terminated, with the project metadata substituted verbatim (no
//! escaping). The body is the newline-joined set of per-item lines (see
//! [`InventoryItem::sphinx_line`]), with no trailing newline, either
//! zlib-compressed at maximum level or left as raw UTF-8 text depending on
//! the chosen [`BodyEncoding`].
//!
//! [`InventoryItem::sphinx_line`]: crate::InventoryItem::sphinx_line

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::{Error, Result};
use crate::inventory::Inventory;

/// Body encoding for a formatted inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// zlib-compressed body at maximum compression; what `objects.inv`
    /// consumers expect
    Zlib,
    /// Raw UTF-8 body; the header is emitted unchanged, so the artifact is
    /// readable as a whole but not loadable by standard consumers
    Plain,
}

/// Encodes an inventory as a complete `objects.inv` artifact.
///
/// The returned bytes are the header followed by the body in the requested
/// encoding. Encoding never mutates the inventory and is deterministic:
/// identical inventory state yields identical bytes.
pub fn encode(inventory: &Inventory, encoding: BodyEncoding) -> Result<Vec<u8>> {
    let body = inventory
        .items()
        .map(|item| item.sphinx_line())
        .collect::<Vec<_>>()
        .join("\n");

    debug!(
        "encoding {} items ({} body bytes) for project '{}'",
        inventory.len(),
        body.len(),
        inventory.project()
    );

    let mut artifact = header(inventory.project(), inventory.version()).into_bytes();
    match encoding {
        BodyEncoding::Zlib => {
            let compressed = compress(body.as_bytes())?;
            debug!("compressed body {} -> {} bytes", body.len(), compressed.len());
            artifact.extend_from_slice(&compressed);
        }
        BodyEncoding::Plain => artifact.extend_from_slice(body.as_bytes()),
    }

    Ok(artifact)
}

/// Renders the fixed four-line preamble with the project metadata
/// substituted.
///
/// Substitution is single pass: metadata containing placeholder-looking
/// text lands in the header verbatim.
fn header(project: &str, version: &str) -> String {
    format!(
        "# Sphinx inventory version 2\n\
         # Project: {project}\n\
         # Version: {version}\n\
         # The remainder of this file is compressed using zlib.\n"
    )
}

/// Compresses body text with zlib at the maximum level (9)
fn compress(body: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(body).map_err(Error::compress)?;
    encoder.finish().map_err(Error::compress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryItem;
    use flate2::read::ZlibDecoder;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .expect("valid zlib stream");
        out
    }

    /// Splits an artifact into its header and body parts.
    fn split_artifact(artifact: &[u8]) -> (&[u8], &[u8]) {
        // The header is exactly four newline-terminated lines.
        let mut offset = 0;
        for _ in 0..4 {
            let nl = artifact[offset..]
                .iter()
                .position(|&b| b == b'\n')
                .expect("four header lines");
            offset += nl + 1;
        }
        artifact.split_at(offset)
    }

    #[test]
    fn test_header_substitution() {
        let inv = Inventory::new("Foo", "1.2.3");
        let artifact = inv.format_sphinx().unwrap();
        let (head, _) = split_artifact(&artifact);
        let head = std::str::from_utf8(head).unwrap();

        assert!(head.contains("# Project: Foo\n"));
        assert!(head.contains("# Version: 1.2.3\n"));
        assert!(head.starts_with("# Sphinx inventory version 2\n"));
    }

    #[test]
    fn test_header_substitution_is_single_pass() {
        // Metadata that looks like a placeholder must land verbatim.
        let inv = Inventory::new("{version}", "1.0");
        let artifact = inv.format_sphinx_with(BodyEncoding::Plain).unwrap();
        let text = String::from_utf8(artifact).unwrap();

        assert!(text.contains("# Project: {version}\n"));
        assert!(text.contains("# Version: 1.0\n"));
    }

    #[test]
    fn test_empty_inventory_plain_is_header_only() {
        let artifact = Inventory::default()
            .format_sphinx_with(BodyEncoding::Plain)
            .unwrap();
        let expected = "# Sphinx inventory version 2\n\
                        # Project: project\n\
                        # Version: 0.0.0\n\
                        # The remainder of this file is compressed using zlib.\n";
        assert_eq!(String::from_utf8(artifact).unwrap(), expected);
    }

    #[test]
    fn test_empty_inventory_zlib_body_inflates_to_nothing() {
        let artifact = Inventory::default().format_sphinx().unwrap();
        let (_, body) = split_artifact(&artifact);

        // A zlib stream of zero input bytes is still a valid stream.
        assert!(!body.is_empty());
        assert_eq!(inflate(body), b"");
    }

    #[test]
    fn test_body_lines_follow_registration_order() {
        let mut inv = Inventory::default();
        inv.register("a", "py", "obj", "a.html");
        inv.register("b", "py", "obj", "b.html");
        inv.register("c", "py", "obj", "c.html");

        let artifact = inv.format_sphinx_with(BodyEncoding::Plain).unwrap();
        let (_, body) = split_artifact(&artifact);
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "a py:obj 1 a.html -\nb py:obj 1 b.html -\nc py:obj 1 c.html -"
        );
    }

    #[test]
    fn test_round_trip_matches_plain_body() {
        let mut inv = Inventory::new("mkdocstrings", "0.18.0");
        inv.register("object_path", "py", "obj", "page_url#object_path");
        inv.register("other_path", "py", "obj", "page_url");
        inv.insert(
            InventoryItem::new("labeled", "std", "label", "usage/#labeled").dispname("Usage notes"),
        );

        let compressed = inv.format_sphinx().unwrap();
        let plain = inv.format_sphinx_with(BodyEncoding::Plain).unwrap();

        let (zlib_head, zlib_body) = split_artifact(&compressed);
        let (plain_head, plain_body) = split_artifact(&plain);

        assert_eq!(zlib_head, plain_head);
        assert_eq!(inflate(zlib_body), plain_body);
    }

    #[test]
    fn test_format_is_idempotent() {
        let mut inv = Inventory::new("Foo", "1.2.3");
        inv.register("object_path", "py", "obj", "page_url#object_path");

        assert_eq!(inv.format_sphinx().unwrap(), inv.format_sphinx().unwrap());
        assert_eq!(inv.len(), 1, "formatting must not mutate the inventory");
    }

    /// Minimal reader standing in for an intersphinx consumer: checks the
    /// header, inflates the body, expands `$` anchors and `-` display
    /// names the way loaders do.
    fn load_artifact(artifact: &[u8]) -> Vec<(String, String, String, String, String, String)> {
        let (head, body) = split_artifact(artifact);
        let head = std::str::from_utf8(head).unwrap();
        let mut lines = head.lines();
        assert_eq!(lines.next(), Some("# Sphinx inventory version 2"));
        assert!(lines.next().unwrap().starts_with("# Project: "));
        assert!(lines.next().unwrap().starts_with("# Version: "));
        assert_eq!(
            lines.next(),
            Some("# The remainder of this file is compressed using zlib.")
        );

        let body = String::from_utf8(inflate(body)).unwrap();
        body.lines()
            .map(|line| {
                let mut parts = line.splitn(5, ' ');
                let name = parts.next().unwrap().to_string();
                let (domain, role) = parts.next().unwrap().split_once(':').unwrap();
                let priority = parts.next().unwrap().to_string();
                let mut uri = parts.next().unwrap().to_string();
                let mut dispname = parts.next().unwrap().to_string();
                if let Some(prefix) = uri.strip_suffix('$') {
                    uri = format!("{prefix}#{name}");
                }
                if dispname == "-" {
                    dispname = name.clone();
                }
                (name, domain.to_string(), role.to_string(), priority, uri, dispname)
            })
            .collect()
    }

    #[test]
    fn test_consumer_can_reconstruct_registered_records() {
        let mut inv = Inventory::new("mkdocstrings", "0.18.0");
        inv.register("object_path", "py", "obj", "page_url#object_path");
        inv.register("plain_path", "py", "obj", "page_url");
        inv.register("other", "py", "obj", "page_url#other_anchor");

        let records = load_artifact(&inv.format_sphinx().unwrap());
        assert_eq!(records.len(), 3);

        let (name, domain, role, priority, uri, dispname) = &records[0];
        assert_eq!(name, "object_path");
        assert_eq!(domain, "py");
        assert_eq!(role, "obj");
        assert_eq!(priority, "1");
        assert_eq!(uri, "page_url#object_path", "anchor expands back from $");
        assert_eq!(dispname, "object_path");

        assert_eq!(records[1].4, "page_url");
        assert_eq!(records[2].4, "page_url#other_anchor");
    }
}
