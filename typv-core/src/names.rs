//! Name table helpers shared by listing and fetching.

use read_fonts::types::NameId;
use read_fonts::FontRef;
use skrifa::MetadataProvider;

/// English (or first available) string for `id`, trimmed; `None` when empty.
pub(crate) fn localized_name(font: &FontRef, id: NameId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.to_string().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First non-empty name among `ids`.
pub(crate) fn first_name(font: &FontRef, ids: &[NameId]) -> Option<String> {
    ids.iter().find_map(|id| localized_name(font, *id))
}
