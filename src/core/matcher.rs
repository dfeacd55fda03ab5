use regex::{Captures, Regex};

use crate::error::Result;
use super::{Category, DeclarationKind, DeclarationMatch};

/// Type-like token run: starts with a word character and ends in
/// whitespace or a pointer/reference sigil so `int* p` and `int *p` both
/// split into type and name. Horizontal whitespace only, so a declaration
/// never spans lines.
const TYPE_PATTERN: &str = r"\w[\w \t*&:<>,]*[ \t*&]";

/// Line-anchored textual recognisers for each declaration category
pub struct DeclarationMatcher {
    function_regex: Regex,
    variable_regex: Regex,
    record_regex: Regex,
}

impl DeclarationMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            function_regex: Regex::new(&format!(
                r"(?m)^(?P<indent>[ \t]*)(?P<type>{TYPE_PATTERN})[ \t]*(?P<name>\w+)[ \t]*\((?P<params>[^)]*)\)[ \t]*(?:(?P<qualifier>const)\b)?[ \t]*\{{?"
            ))?,
            variable_regex: Regex::new(&format!(
                r"(?m)^(?P<indent>[ \t]*)(?P<type>{TYPE_PATTERN})[ \t]*(?P<name>\w+)(?P<array>(?:[ \t]*\[[^\]\n]*\])*)[ \t]*(?:=[ \t]*(?P<init>[^;\n]+))?;"
            ))?,
            record_regex: Regex::new(
                r"(?m)^(?P<indent>[ \t]*)(?P<kind>struct|class)[ \t]+(?P<name>\w+)",
            )?,
        })
    }

    /// All non-overlapping matches for `category`, in ascending start order
    pub fn find(&self, buffer: &str, category: Category) -> Vec<DeclarationMatch> {
        match category {
            Category::Function => self
                .function_regex
                .captures_iter(buffer)
                .map(|caps| Self::function_match(&caps))
                .collect(),
            Category::Variable => self
                .variable_regex
                .captures_iter(buffer)
                .map(|caps| Self::variable_match(&caps))
                .collect(),
            Category::Record => self
                .record_regex
                .captures_iter(buffer)
                .map(|caps| Self::record_match(&caps))
                .collect(),
        }
    }

    fn function_match(caps: &Captures) -> DeclarationMatch {
        let mut found = Self::base_match(caps, DeclarationKind::Function);
        found.declared_type = text(caps, "type").trim().to_string();
        found.params = Some(text(caps, "params").to_string());
        found.const_qualified = caps.name("qualifier").is_some();
        found
    }

    fn variable_match(caps: &Captures) -> DeclarationMatch {
        let mut found = Self::base_match(caps, DeclarationKind::Variable);
        found.declared_type = text(caps, "type").trim().to_string();
        found.array_suffix = text(caps, "array")
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t'))
            .collect();
        found.initializer = caps
            .name("init")
            .map(|m| m.as_str().trim().to_string())
            .filter(|init| !init.is_empty());
        found
    }

    fn record_match(caps: &Captures) -> DeclarationMatch {
        let kind = if text(caps, "kind") == "class" {
            DeclarationKind::Class
        } else {
            DeclarationKind::Struct
        };
        let mut found = Self::base_match(caps, kind);
        found.declared_type = kind.keyword().to_string();
        found
    }

    fn base_match(caps: &Captures, kind: DeclarationKind) -> DeclarationMatch {
        // Group 0 always participates in a match
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));

        DeclarationMatch {
            kind,
            start,
            end,
            indent: text(caps, "indent").to_string(),
            declared_type: String::new(),
            name: text(caps, "name").to_string(),
            params: None,
            array_suffix: String::new(),
            initializer: None,
            const_qualified: false,
        }
    }
}

fn text<'h>(caps: &Captures<'h>, group: &str) -> &'h str {
    caps.name(group).map_or("", |m| m.as_str())
}
