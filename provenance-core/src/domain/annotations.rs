use std::collections::BTreeMap;

use crate::{
    AnnotationError,
    annotation_error::{EmptyKeySnafu, MalformedLineSnafu},
};

pub const DEFAULT_LANGUAGE: &str = "und";

/// Key/value pairs grouped by language, parsed from a species description text.
///
/// Grammar, one item per line:
/// ```text
/// [vi]             language sentinel, applies to the following pairs
/// Key: Value       pair, the key is trimmed and may not be empty
///                  blank lines are ignored
/// ```
/// Pairs before the first sentinel belong to [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    languages: BTreeMap<String, Vec<(String, String)>>,
}

impl Annotations {
    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self, language: &str) -> &[(String, String)] {
        self.languages
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

pub fn parse_annotations(text: &str) -> Result<Annotations, AnnotationError> {
    let mut annotations = Annotations::default();
    let mut language = DEFAULT_LANGUAGE.to_string();

    for (idx, raw) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(tag) = line
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
        {
            language = tag.to_ascii_lowercase();
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return MalformedLineSnafu {
                line: line_number,
                content: line,
            }
            .fail();
        };

        let key = key.trim();
        if key.is_empty() {
            return EmptyKeySnafu { line: line_number }.fail();
        }

        annotations
            .languages
            .entry(language.clone())
            .or_default()
            .push((key.to_string(), value.trim().to_string()));
    }

    Ok(annotations)
}
