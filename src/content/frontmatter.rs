//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter metadata from a post file
///
/// Every field is optional in the source; defaults are applied when the
/// post record is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub featured: bool,
    #[serde(rename = "featuredImage")]
    pub featured_image: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split front-matter from content.
    /// Returns (front_matter, remaining_content).
    ///
    /// Total over its input: malformed metadata degrades to defaults and
    /// the body is still returned with the header stripped. Only text
    /// that never formed a header block is returned unmodified.
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        (FrontMatter::default(), content)
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        // Find the closing ---
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        if let Some(end_pos) = rest.find("\n---") {
            let yaml_content = &rest[..end_pos];
            let remaining = &rest[end_pos + 4..]; // Skip \n---
            let remaining = remaining.trim_start_matches(['\n', '\r']);

            // If YAML content is empty or whitespace-only, return default
            if yaml_content.trim().is_empty() {
                return (FrontMatter::default(), remaining);
            }

            // A real header has at least one "key: value" line. A --- pair
            // wrapping prose is a markdown thematic break, not metadata.
            let has_yaml_structure = yaml_content.lines().any(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return false;
                }
                if let Some(colon_pos) = trimmed.find(':') {
                    let before_colon = &trimmed[..colon_pos];
                    // Key should be a simple ASCII identifier and the colon
                    // must not be part of a URL scheme (http:, https:, ...)
                    let is_valid_key = !before_colon.is_empty()
                        && before_colon
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                        && before_colon != "http"
                        && before_colon != "https"
                        && before_colon != "ftp";
                    if is_valid_key {
                        let after_colon = &trimmed[colon_pos + 1..];
                        return after_colon.is_empty() || after_colon.starts_with(' ');
                    }
                }
                false
            });

            if !has_yaml_structure {
                // Not a metadata block; keep the original text intact
                return (FrontMatter::default(), content);
            }

            match serde_yaml::from_str::<FrontMatter>(yaml_content) {
                Ok(fm) => (fm, remaining),
                Err(e) => {
                    // Header exists but does not parse: strip it anyway so
                    // the body never carries metadata text
                    tracing::warn!("failed to parse YAML front-matter, using defaults: {}", e);
                    (FrontMatter::default(), remaining)
                }
            }
        } else {
            // No closing ---, treat as no front-matter
            (FrontMatter::default(), content)
        }
    }

    fn parse_json(content: &str) -> (Self, &str) {
        // JSON front-matter delimited by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = &rest[end_pos + 3..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);

                let fm = serde_json::from_str::<FrontMatter>(json_content).unwrap_or_else(|e| {
                    tracing::warn!("failed to parse JSON front-matter, using defaults: {}", e);
                    FrontMatter::default()
                });
                return (fm, remaining);
            }
        }

        // A bare JSON object at the start of the file
        if content.starts_with('{') {
            // Find matching closing brace
            let mut depth = 0;
            let mut end_pos = 0;
            for (i, c) in content.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end_pos = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if end_pos > 0 {
                let json_content = &content[..end_pos];

                // Without delimiters, only a span that actually parses
                // counts as metadata; a body that merely opens with a
                // brace stays intact
                match serde_json::from_str::<FrontMatter>(json_content) {
                    Ok(fm) => {
                        let remaining = &content[end_pos..];
                        let remaining = remaining.trim_start_matches(['\n', '\r']);
                        return (fm, remaining);
                    }
                    Err(e) => {
                        tracing::debug!("leading brace is not front-matter: {}", e);
                        return (FrontMatter::default(), content);
                    }
                }
            }
        }

        // No closing delimiter; treat the whole text as body
        (FrontMatter::default(), content)
    }
}
