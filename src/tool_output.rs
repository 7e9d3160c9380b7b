//! Size-limited tool output for agent prompts.
//!
//! Tool results are fed back into an LLM context. A 200 KB JSON array blows
//! the budget, so oversized values are replaced by a short description:
//!
//! ```text
//! [ {...}, {...}, ... 100 items ]  ->  "Array with 100 elements. First 3: [...]..."
//! { "a": ..., "b": ... }           ->  "Object with keys: a, b"
//! "a very long string ..."         ->  first 500 chars + "..."
//! ```
//!
//! Size is measured on the compact JSON serialization, in characters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::text::char_count;
use crate::Result;

/// Default budget for [`limit_tool_output`].
pub const DEFAULT_TOOL_OUTPUT_SIZE: usize = 4000;

const ARRAY_PREVIEW_ITEMS: usize = 3;
const SCALAR_PREVIEW_CHARS: usize = 500;

/// A value that was either passed through or replaced by a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedOutput<T> {
    /// The value, when it was within budget.
    pub data: Option<T>,
    /// Whether the value was dropped.
    pub truncated: bool,
    /// Description of the dropped value; empty when not truncated.
    pub summary: String,
    /// Serialized size of the value in characters.
    pub original_size: usize,
}

/// Pass `value` through if its JSON form is at most `max_size` characters,
/// otherwise replace it with a summary.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized to JSON.
///
/// ```rust
/// use interlink::limit_tool_output;
///
/// let small = limit_tool_output(vec![1, 2, 3], 100).unwrap();
/// assert!(!small.truncated);
/// assert_eq!(small.data, Some(vec![1, 2, 3]));
///
/// let big = limit_tool_output(vec![0u32; 100], 20).unwrap();
/// assert!(big.truncated);
/// assert!(big.summary.starts_with("Array with 100 elements. First 3: [0,0,0]"));
/// ```
pub fn limit_tool_output<T: Serialize>(value: T, max_size: usize) -> Result<LimitedOutput<T>> {
    let json = serde_json::to_value(&value)?;
    let original_size = char_count(&serde_json::to_string(&json)?);

    if original_size <= max_size {
        return Ok(LimitedOutput {
            data: Some(value),
            truncated: false,
            summary: String::new(),
            original_size,
        });
    }

    Ok(LimitedOutput {
        data: None,
        truncated: true,
        summary: summarize(&json)?,
        original_size,
    })
}

fn summarize(json: &Value) -> Result<String> {
    let summary = match json {
        Value::Array(items) => {
            let preview = &items[..items.len().min(ARRAY_PREVIEW_ITEMS)];
            format!(
                "Array with {} elements. First {ARRAY_PREVIEW_ITEMS}: {}...",
                items.len(),
                serde_json::to_string(preview)?
            )
        }
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("Object with keys: {}", keys.join(", "))
        }
        Value::String(s) => preview_scalar(s),
        other => preview_scalar(&other.to_string()),
    };
    Ok(summary)
}

fn preview_scalar(text: &str) -> String {
    let mut preview: String = text.chars().take(SCALAR_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
