use tera::{Context, Tera};

use crate::config::TemplateConfig;
use crate::error::Result;
use super::{DeclarationKind, DeclarationMatch, VariableSubtype};

const FUNCTION_TEMPLATE: &str = "function";
const VARIABLE_TEMPLATE: &str = "variable";
const CONSTANT_TEMPLATE: &str = "constant";
const RECORD_TEMPLATE: &str = "record";

/// Renders the comment block for a declaration from the configured templates
pub struct CommentGenerator {
    tera: Tera,
}

impl CommentGenerator {
    /// Compile all four templates, failing fast on syntax errors
    pub fn new(templates: &TemplateConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (FUNCTION_TEMPLATE, templates.function.as_str()),
            (VARIABLE_TEMPLATE, templates.variable.as_str()),
            (CONSTANT_TEMPLATE, templates.constant.as_str()),
            (RECORD_TEMPLATE, templates.record.as_str()),
        ])?;

        Ok(Self { tera })
    }

    /// Text to insert above `declaration`, or an empty string when the
    /// template renders to nothing
    pub fn generate(&self, declaration: &DeclarationMatch) -> Result<String> {
        let (template, context) = match declaration.kind {
            DeclarationKind::Function => (FUNCTION_TEMPLATE, Self::function_context(declaration)),
            DeclarationKind::Variable => {
                let subtype = VariableSubtype::classify(&declaration.declarator_text());
                let template = if subtype == VariableSubtype::Constant {
                    CONSTANT_TEMPLATE
                } else {
                    VARIABLE_TEMPLATE
                };
                (template, Self::variable_context(declaration, subtype))
            }
            DeclarationKind::Struct | DeclarationKind::Class => {
                (RECORD_TEMPLATE, Self::record_context(declaration))
            }
        };

        let rendered = self.tera.render(template, &context)?;
        if rendered.trim().is_empty() {
            return Ok(String::new());
        }

        Ok(indent_block(&rendered, &declaration.indent))
    }

    fn function_context(declaration: &DeclarationMatch) -> Context {
        let mut context = Context::new();
        context.insert("name", &declaration.name);
        context.insert("return_type", &declaration.declared_type);
        context.insert("params", &reduce_params(declaration.params.as_deref().unwrap_or("")));
        context.insert("returns", &describe_return(&declaration.declared_type, &declaration.name));
        context
    }

    fn variable_context(declaration: &DeclarationMatch, subtype: VariableSubtype) -> Context {
        let mut context = Context::new();
        context.insert("name", &declaration.name);
        context.insert("declared_type", &declaration.declarator_text());
        context.insert("subtype", subtype.label());
        context.insert("initializer", &declaration.initializer.clone().unwrap_or_default());
        context
    }

    fn record_context(declaration: &DeclarationMatch) -> Context {
        let mut context = Context::new();
        context.insert("kind", declaration.kind.keyword());
        context.insert("name", &declaration.name);
        context
    }
}

/// Reduce a raw parameter list to its bare names, e.g. `int a, const char* name`
/// becomes `a, name`.
pub fn reduce_params(params: &str) -> String {
    params
        .split(',')
        .filter_map(|param| {
            // Drop default arguments before picking the name
            let declarator = param.split('=').next().unwrap_or(param);
            let token = declarator.split_whitespace().last()?;
            let token = token.trim_start_matches(['*', '&']);
            let token = token.split('[').next().unwrap_or(token);
            if token.is_empty() {
                None
            } else {
                Some(token)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Return-value wording: exact `void` has none, anything else names the function
pub fn describe_return(return_type: &str, function_name: &str) -> String {
    if return_type.trim() == "void" {
        "No return value.".to_string()
    } else {
        format!("The value returned by {}.", function_name)
    }
}

/// Prefix every non-blank line with `indent` and guarantee a trailing newline
fn indent_block(text: &str, indent: &str) -> String {
    let mut block: String = text
        .split_inclusive('\n')
        .map(|line| {
            if indent.is_empty() || line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect();

    if !block.ends_with('\n') {
        block.push('\n');
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, DeclarationMatcher};

    fn generate_for(source: &str, category: Category) -> String {
        let matcher = DeclarationMatcher::new().unwrap();
        let generator = CommentGenerator::new(&TemplateConfig::default()).unwrap();
        let matches = matcher.find(source, category);
        assert_eq!(matches.len(), 1);
        generator.generate(&matches[0]).unwrap()
    }

    #[test]
    fn test_parameter_reduction() {
        assert_eq!(reduce_params("int a, const char* name"), "a, name");
        assert_eq!(reduce_params("char *buf, size_t len"), "buf, len");
        assert_eq!(reduce_params("int values[], int count = 0"), "values, count");
        assert_eq!(reduce_params(""), "");
        assert_eq!(reduce_params("int a, , int b"), "a, b");
    }

    #[test]
    fn test_return_description_branching() {
        let run = generate_for("void run(int a)\n", Category::Function);
        assert!(run.contains("@return No return value."));
        assert!(run.contains("@param[in] a\n"));

        let compute = generate_for("int compute(int a, int b)\n", Category::Function);
        assert!(compute.contains("@return The value returned by compute."));
        assert!(compute.contains("@param[in] a, b\n"));
    }

    #[test]
    fn test_void_must_be_exact() {
        assert_eq!(describe_return("void", "f"), "No return value.");
        assert_eq!(describe_return("void*", "f"), "The value returned by f.");
        assert_eq!(describe_return("static void", "f"), "The value returned by f.");
    }

    #[test]
    fn test_variable_phrasing() {
        let constant = generate_for("const int limit = 5;\n", Category::Variable);
        assert!(constant.contains("@brief Constant limit."));

        let array = generate_for("int arr[10];\n", Category::Variable);
        assert!(array.contains("@brief Brief description of the array variable arr."));

        let pointer = generate_for("int* ptr;\n", Category::Variable);
        assert!(pointer.contains("pointer/reference variable ptr"));
    }

    #[test]
    fn test_record_phrasing() {
        let block = generate_for("class Widget {\n", Category::Record);
        assert!(block.contains("@brief Brief description of the class Widget."));
        assert!(block.contains("Detailed description of the class."));
    }

    #[test]
    fn test_indentation_follows_declaration() {
        let block = generate_for("    int count;\n", Category::Variable);
        let expected = "\n    /**\n     * @brief Brief description of the plain variable count.\n     *\n     * Detailed description of the variable.\n     */\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_for("int add(int a, int b) {\n", Category::Function);
        let second = generate_for("int add(int a, int b) {\n", Category::Function);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_templates() {
        let templates = TemplateConfig {
            function: "/// {{ name }}({{ params }}) -> {{ return_type }}".to_string(),
            ..TemplateConfig::default()
        };
        let generator = CommentGenerator::new(&templates).unwrap();
        let matcher = DeclarationMatcher::new().unwrap();
        let matches = matcher.find("  double scale(double v, double k) {\n", Category::Function);

        assert_eq!(generator.generate(&matches[0]).unwrap(), "  /// scale(v, k) -> double\n");
    }

    #[test]
    fn test_empty_template_inserts_nothing() {
        let templates = TemplateConfig {
            record: String::new(),
            ..TemplateConfig::default()
        };
        let generator = CommentGenerator::new(&templates).unwrap();
        let matcher = DeclarationMatcher::new().unwrap();
        let matches = matcher.find("struct Empty;\n", Category::Record);

        assert_eq!(generator.generate(&matches[0]).unwrap(), "");
    }

    #[test]
    fn test_invalid_template_rejected() {
        let templates = TemplateConfig {
            variable: "{{ name".to_string(),
            ..TemplateConfig::default()
        };
        assert!(CommentGenerator::new(&templates).is_err());
    }
}
