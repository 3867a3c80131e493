//! Turning free-form text-model output into image metadata.
//!
//! Text models asked for JSON do not reliably return only JSON. The raw
//! reply goes through an ordered list of parsers ([`METADATA_PARSERS`]); each
//! one is total and returns `None` when it cannot produce a result. The first
//! `Some` wins, and [`fallback_metadata`] covers the case where none do.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 60;

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?\s*").expect("valid regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"title"\s*:\s*"([^"]*?)""#).expect("valid regex"));

static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"description"\s*:\s*"([^"]*?)""#).expect("valid regex"));

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)"tags"\s*:\s*\[([\s\S]*?)\]"#).expect("valid regex"));

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*?)""#).expect("valid regex"));

/// Title, description and tags for one generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// The image the metadata describes; used for templated defaults.
#[derive(Debug, Clone, Copy)]
pub struct MetadataContext<'a> {
    pub character_id: &'a str,
    pub style: &'a str,
    pub variation: i32,
}

impl MetadataContext<'_> {
    fn default_tags(&self) -> Vec<String> {
        vec![
            self.character_id.to_string(),
            self.style.to_string(),
            "character".to_string(),
            "ai-generated".to_string(),
        ]
    }
}

/// A parser attempt over the raw model reply.
pub type MetadataParser = fn(&str, &MetadataContext<'_>) -> Option<ImageMetadata>;

/// Parsers in order of preference.
pub const METADATA_PARSERS: &[MetadataParser] = &[parse_structured, parse_with_patterns];

/// Parse a model reply into metadata. Never fails.
pub fn parse_metadata(raw: &str, ctx: &MetadataContext<'_>) -> ImageMetadata {
    METADATA_PARSERS
        .iter()
        .find_map(|parser| parser(raw, ctx))
        .unwrap_or_else(|| fallback_metadata(ctx))
}

/// Deterministic metadata used when nothing can be recovered from the model.
pub fn fallback_metadata(ctx: &MetadataContext<'_>) -> ImageMetadata {
    ImageMetadata {
        title: format!("{} - Variation {}", ctx.character_id, ctx.variation),
        description: format!(
            "An AI-generated {} style image of {} with unique artistic interpretation.",
            ctx.style, ctx.character_id
        ),
        tags: ctx.default_tags(),
    }
}

/// Cut a title down to [`MAX_TITLE_CHARS`] characters.
pub fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Stage 1-3: fences, object extraction, JSON
// ---------------------------------------------------------------------------

/// Remove markdown code-fence markers (```` ``` ```` and ```` ```json ````).
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE_RE.replace_all(text, "").into_owned()
}

/// Return the longest balanced `{...}` substring, ignoring braces inside
/// JSON string literals.
pub fn largest_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut best: Option<(usize, usize)> = None;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        match balanced_close(bytes, open) {
            Some(close) => {
                let end = close + 1;
                if best.is_none_or(|(start, stop)| stop - start < end - open) {
                    best = Some((open, end));
                }
                cursor = end;
            }
            None => cursor = open + 1,
        }
    }

    best.map(|(start, end)| &text[start..end])
}

/// Index of the `}` closing the `{` at `open`, if the braces balance.
fn balanced_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the reply as a JSON object and validate each field.
///
/// Fields that are missing or of the wrong type get templated defaults;
/// non-string tags are dropped.
pub fn parse_structured(raw: &str, ctx: &MetadataContext<'_>) -> Option<ImageMetadata> {
    let cleaned = strip_code_fences(raw);
    let candidate = largest_json_object(&cleaned).unwrap_or(cleaned.trim());
    let value: Value = serde_json::from_str(candidate).ok()?;
    let object = value.as_object()?;

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .map(truncate_title)
        .unwrap_or_else(|| format!("{} - Variation {}", ctx.character_id, ctx.variation));

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "A {} style artwork featuring {} in a dynamic pose.",
                ctx.style, ctx.character_id
            )
        });

    let tags = object
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_else(|| ctx.default_tags());

    Some(ImageMetadata {
        title,
        description,
        tags,
    })
}

// ---------------------------------------------------------------------------
// Stage 4: named-field patterns
// ---------------------------------------------------------------------------

/// Pull `"title"`, `"description"` and `"tags"` out of text that is not
/// valid JSON (truncated output, trailing commas, prose around fields).
///
/// Returns `None` when none of the three fields can be found.
pub fn parse_with_patterns(raw: &str, ctx: &MetadataContext<'_>) -> Option<ImageMetadata> {
    let title = TITLE_RE.captures(raw).map(|c| truncate_title(&c[1]));
    let description = DESCRIPTION_RE.captures(raw).map(|c| c[1].to_string());
    let tags_section = TAGS_RE.captures(raw).map(|c| c[1].to_string());

    if title.is_none() && description.is_none() && tags_section.is_none() {
        return None;
    }

    let quoted: Vec<String> = tags_section
        .iter()
        .flat_map(|section| QUOTED_RE.captures_iter(section))
        .map(|c| c[1].trim().to_string())
        .collect();

    // Only quoted-but-blank entries earn the extra "artwork" tag.
    let tags = if quoted.is_empty() {
        ctx.default_tags()
    } else {
        let tags: Vec<String> = quoted.into_iter().filter(|tag| !tag.is_empty()).collect();
        if tags.is_empty() {
            let mut tags = ctx.default_tags();
            tags.push("artwork".to_string());
            tags
        } else {
            tags
        }
    };

    Some(ImageMetadata {
        title: title.unwrap_or_else(|| format!("{} - {} Style", ctx.character_id, ctx.style)),
        description: description.unwrap_or_else(|| {
            format!(
                "A stunning {} style artwork featuring {} with intricate details and dynamic composition.",
                ctx.style, ctx.character_id
            )
        }),
        tags,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
