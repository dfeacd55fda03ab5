use serde::Serialize;
use std::fmt;

/// What a recognised declaration introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Function,
    Variable,
    Struct,
    Class,
}

impl DeclarationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Variable => "variable",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Class => "class",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A group of declaration kinds matched and annotated in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Function,
    Variable,
    /// Structs and classes
    Record,
}

impl Category {
    /// Passes run in this order, each over the previous pass's output
    pub const PASS_ORDER: [Category; 3] = [Category::Function, Category::Variable, Category::Record];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Function => "function",
            Category::Variable => "variable",
            Category::Record => "struct/class",
        };
        f.write_str(label)
    }
}

/// One candidate declaration found by a scan of a buffer.
///
/// Offsets are byte offsets into the exact buffer that was scanned and
/// become meaningless once that buffer is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    pub kind: DeclarationKind,

    /// Start of the declaration's line, including its indentation
    pub start: usize,

    /// End of the matched text
    pub end: usize,

    /// Leading whitespace of the declaration line
    pub indent: String,

    /// Type text preceding the name (`struct`/`class` for records)
    pub declared_type: String,

    pub name: String,

    /// Raw parameter list text, functions only
    pub params: Option<String>,

    /// Bracketed array dimensions following a variable name, e.g. `[10]`
    pub array_suffix: String,

    /// Initializer expression without the `=`, variables only
    pub initializer: Option<String>,

    /// Trailing `const` after a function's parameter list
    pub const_qualified: bool,
}

impl DeclarationMatch {
    /// Type text together with any array suffix, the input to subtype
    /// classification
    pub fn declarator_text(&self) -> String {
        format!("{}{}", self.declared_type, self.array_suffix)
    }
}

/// Literal text to splice in immediately before `offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}
