use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Semantic flavour of a variable declaration, derived from its type text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableSubtype {
    Constant,
    PointerOrReference,
    Array,
    Plain,
}

impl VariableSubtype {
    /// Classify declarator text such as `const int[3]` or `char*`.
    ///
    /// Checks run in priority order: `const` qualifier, then pointer or
    /// reference sigil, then array brackets. A `const` array is `Constant`.
    pub fn classify(declarator: &str) -> Self {
        if const_regex().is_match(declarator) {
            VariableSubtype::Constant
        } else if declarator.contains('*') || declarator.contains('&') {
            VariableSubtype::PointerOrReference
        } else if array_regex().is_match(declarator) {
            VariableSubtype::Array
        } else {
            VariableSubtype::Plain
        }
    }

    /// Wording used inside generated comments
    pub fn label(&self) -> &'static str {
        match self {
            VariableSubtype::Constant => "constant",
            VariableSubtype::PointerOrReference => "pointer/reference",
            VariableSubtype::Array => "array",
            VariableSubtype::Plain => "plain",
        }
    }
}

impl fmt::Display for VariableSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn const_regex() -> &'static Regex {
    static CONST: OnceLock<Regex> = OnceLock::new();
    CONST.get_or_init(|| Regex::new(r"\bconst\b").expect("Invalid const qualifier regex"))
}

fn array_regex() -> &'static Regex {
    static ARRAY: OnceLock<Regex> = OnceLock::new();
    ARRAY.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("Invalid array bracket regex"))
}
