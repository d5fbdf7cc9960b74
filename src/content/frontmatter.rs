//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that accepts tags as a list of strings or as a single
/// comma/whitespace-delimited string.
///
/// A list passes through unchanged; a string is split, trimmed, and emptied
/// of blanks: `"a, b c"` becomes `["a", "b", "c"]`.
fn tags_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct TagsOrString;

    impl<'de> Visitor<'de> for TagsOrString {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of strings or a delimited string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_tags(value))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut tags = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                tags.push(item);
            }
            Ok(tags)
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

    deserializer.deserialize_any(TagsOrString)
}

/// Split a delimited tag string on commas and whitespace.
fn split_tags(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "tags_or_string", default)]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from a document.
    /// Returns `(front_matter, body)`.
    ///
    /// Documents open with a `---` fence, carry a YAML block, and close with
    /// another `---`. A document without a fence is all body. Invalid YAML
    /// inside the fence is an error, not a recoverable condition.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        // Scan from right after the opening fence. Blank lines stay in the
        // block, so an empty block still finds its closing fence.
        let Some(end_pos) = rest.find("\n---") else {
            // No closing fence, treat the whole document as body
            return Ok((FrontMatter::default(), content));
        };

        let yaml = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, body))
    }
}
