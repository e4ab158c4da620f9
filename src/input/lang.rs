//! Line-oriented `key=value` language files.

use crate::types::LanguageData;

/// Parses the contents of a `.lang` file.
///
/// Blank lines and lines starting with `#` are skipped. The first `=` splits key
/// from value, both trimmed; lines without `=` are ignored. A later duplicate key
/// overwrites an earlier one.
///
/// # Examples
/// ```
/// use lang_reconcile::input::parse_lang;
///
/// let data = parse_lang("# comment\ntile.stone.name=Stone\n");
/// assert_eq!(data.get("tile.stone.name").map(String::as_str), Some("Stone"));
/// ```
#[must_use]
pub fn parse_lang(content: &str) -> LanguageData {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
