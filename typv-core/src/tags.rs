//! Axis tags, spoken both ways (made by FontLab https://www.fontlab.com/)
//!
//! Variable font axes introduce themselves with four-byte tags like `wght`
//! or `opsz`. Fonts hand us raw `Tag`s, people hand us strings, and the
//! cache keeps strings so its JSON stays readable.
use anyhow::{anyhow, Result};
use read_fonts::types::Tag;

/// Turn 1-4 printable ASCII characters into a space-padded `Tag`.
pub fn tag4(raw: &str) -> Result<Tag> {
    if raw.is_empty() || raw.len() > 4 {
        return Err(anyhow!("axis tag must be 1-4 printable ASCII chars: {raw:?}"));
    }

    let mut buf = [b' '; 4];
    for (slot, byte) in buf.iter_mut().zip(raw.as_bytes()) {
        if !(0x20..=0x7E).contains(byte) {
            return Err(anyhow!("axis tag byte out of range: {raw:?}"));
        }
        *slot = *byte;
    }

    Ok(Tag::new(&buf))
}

/// Render a `Tag` back into the four characters it was made of.
pub fn tag_to_string(tag: Tag) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).to_string()
}

/// Validate a list of user supplied axis tags and normalise them to their
/// padded four-character form, so a user's `XO` matches a font's `XO  `.
pub fn parse_axis_tags(raw: &[String]) -> Result<Vec<String>> {
    raw.iter()
        .map(|s| tag4(s.trim()).map(tag_to_string))
        .collect()
}
