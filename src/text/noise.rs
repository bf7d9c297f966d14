//! Removal of decorative comment banners.
//!
//! Some sector packages ship banner blocks built from full-width spaces
//! (U+3000), semicolons and full-width hashes (U+FF03). Every run of
//! whitespace/semicolons that leads into a full-width hash, together with the
//! hashes and the whitespace/semicolons that follow, is deleted.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s;]*[\x{3000};]*[\x{3000}\s;]*\x{FF03}[\x{FF03}\s;]*[\x{3000}\s;]*")
        .expect("noise pattern is a valid regex")
});

/// Strip every banner match. Borrowed when nothing matched.
pub fn strip_noise(text: &str) -> Cow<'_, str> {
    NOISE.replace_all(text, "")
}
