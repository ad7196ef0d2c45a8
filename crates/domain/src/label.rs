//! Label sanitization — derives stable discovery labels from raw device
//! names.

/// Replace every character that is not a letter or digit with `_`.
///
/// The result is used as a stable discovery label: the function is total and
/// deterministic, so the same raw name always yields the same label. Distinct
/// raw names may sanitize to the same label; the registry deduplicates by
/// key, so such collisions are tolerated rather than rejected.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
