//! JSON language files.

use serde_json::Value;

use crate::types::LanguageData;

/// Parses a JSON language document into a flat key map.
///
/// # Errors
/// Returns error if the text is not valid JSON.
pub fn parse_json(content: &str) -> Result<LanguageData, serde_json::Error> {
    let json: Value = serde_json::from_str(content)?;
    Ok(flatten_json(&json, ".", None))
}

/// Flatten nested JSON object into dot-separated key map.
///
/// Release files are flat already, so this is the identity for them; nested
/// objects and arrays still resolve to unique keys.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use lang_reconcile::input::flatten_json;
///
/// let json = json!({
///     "block.minecraft.stone": "Stone",
///     "menu": { "quit": "Quit Game" }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("block.minecraft.stone"), Some(&"Stone".to_string()));
/// assert_eq!(flattened.get("menu.quit"), Some(&"Quit Game".to_string()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> LanguageData {
    let mut result = LanguageData::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut LanguageData,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
