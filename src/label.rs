use std::borrow::Cow;

/// Index key for a link id: ASCII lower case, everything else verbatim.
pub(crate) fn normalize_label(label: &str) -> Cow<'_, str> {
    if label.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(label.to_ascii_lowercase())
    } else {
        Cow::Borrowed(label)
    }
}
