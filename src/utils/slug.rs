//! Slug helpers for URL and filesystem safe names

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid slug regex"));

/// Fold a character to its ASCII base letter, dropping anything else non-ASCII
fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        _ => return None,
    };
    Some(folded)
}

/// Convert a display name into a lowercase, hyphen-separated ASCII slug.
///
/// Accented Latin letters are folded to their base letter; every other
/// non-ASCII character is dropped.
pub fn slugify(input: &str) -> String {
    let folded: String = input.chars().filter_map(fold_char).collect();
    let lowered = folded.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(cleaned.trim(), "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Build a collision-free stored name for an uploaded file.
///
/// The result is `<random>-<slugified stem>[.<ext>]` and never contains
/// path separators.
pub fn stored_file_name(original: &str) -> String {
    // Browsers may send a full client path
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (base, None),
    };

    let mut stem = slugify(stem);
    if stem.is_empty() {
        stem = "archivo".to_string();
    }

    let prefix = Uuid::new_v4().simple().to_string();
    let prefix = &prefix[..12];

    let extension = extension
        .map(|ext| {
            ext.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) => format!("{}-{}.{}", prefix, stem, ext),
        None => format!("{}-{}", prefix, stem),
    }
}
