//! Static structural query catalog.
//!
//! One query per grammar-backed language. Capture convention: a capture
//! named `definition.<kind>` tags the node spanning an entire definition
//! block; `name.definition.<kind>` tags the sub-node holding only the
//! identifier. The synthesizer's span resolution relies on this two-tier
//! convention.

use crate::processing::Language;

/// Bumped whenever capture names or patterns change shape.
pub const CATALOG_VERSION: u32 = 1;

/// Get the query text for a language, if the catalog carries one.
pub fn query_source(language: Language) -> Option<&'static str> {
    match language {
        Language::Python => Some(PYTHON_QUERY),
        Language::JavaScript => Some(JAVASCRIPT_QUERY),
        Language::TypeScript => Some(TYPESCRIPT_QUERY),
        Language::TypeScriptReact => Some(TYPESCRIPT_QUERY),
        Language::Go => Some(GO_QUERY),
        Language::Rust => Some(RUST_QUERY),
        Language::Java => Some(JAVA_QUERY),
        Language::C => Some(C_QUERY),
        Language::Cpp => Some(CPP_QUERY),
        Language::Ruby => Some(RUBY_QUERY),
        Language::Markdown | Language::Unknown => None,
    }
}

const PYTHON_QUERY: &str = r#"
(function_definition
  name: (identifier) @name.definition.function) @definition.function

(class_definition
  name: (identifier) @name.definition.class) @definition.class
"#;

const JAVASCRIPT_QUERY: &str = r#"
(function_declaration
  name: (identifier) @name.definition.function) @definition.function

(generator_function_declaration
  name: (identifier) @name.definition.function) @definition.function

(method_definition
  name: (property_identifier) @name.definition.method) @definition.method

(class_declaration
  name: (identifier) @name.definition.class) @definition.class

(lexical_declaration
  (variable_declarator
    name: (identifier) @name.definition.function
    value: (arrow_function))) @definition.function
"#;

const TYPESCRIPT_QUERY: &str = r#"
(function_declaration
  name: (identifier) @name.definition.function) @definition.function

(generator_function_declaration
  name: (identifier) @name.definition.function) @definition.function

(method_definition
  name: (property_identifier) @name.definition.method) @definition.method

(class_declaration
  name: (type_identifier) @name.definition.class) @definition.class

(abstract_class_declaration
  name: (type_identifier) @name.definition.class) @definition.class

(interface_declaration
  name: (type_identifier) @name.definition.interface) @definition.interface

(enum_declaration
  name: (identifier) @name.definition.enum) @definition.enum

(type_alias_declaration
  name: (type_identifier) @name.definition.type) @definition.type

(lexical_declaration
  (variable_declarator
    name: (identifier) @name.definition.function
    value: (arrow_function))) @definition.function
"#;

const GO_QUERY: &str = r#"
(function_declaration
  name: (identifier) @name.definition.function) @definition.function

(method_declaration
  name: (field_identifier) @name.definition.method) @definition.method

(type_declaration
  (type_spec
    name: (type_identifier) @name.definition.type)) @definition.type
"#;

const RUST_QUERY: &str = r#"
(function_item
  name: (identifier) @name.definition.function) @definition.function

(struct_item
  name: (type_identifier) @name.definition.class) @definition.class

(enum_item
  name: (type_identifier) @name.definition.class) @definition.class

(trait_item
  name: (type_identifier) @name.definition.interface) @definition.interface

(impl_item
  type: (_) @name.definition.implementation) @definition.implementation

(mod_item
  name: (identifier) @name.definition.module) @definition.module

(macro_definition
  name: (identifier) @name.definition.macro) @definition.macro
"#;

const JAVA_QUERY: &str = r#"
(class_declaration
  name: (identifier) @name.definition.class) @definition.class

(interface_declaration
  name: (identifier) @name.definition.interface) @definition.interface

(enum_declaration
  name: (identifier) @name.definition.enum) @definition.enum

(method_declaration
  name: (identifier) @name.definition.method) @definition.method

(constructor_declaration
  name: (identifier) @name.definition.method) @definition.method
"#;

const C_QUERY: &str = r#"
(function_definition
  declarator: (function_declarator
    declarator: (identifier) @name.definition.function)) @definition.function

(function_definition
  declarator: (pointer_declarator
    declarator: (function_declarator
      declarator: (identifier) @name.definition.function))) @definition.function

(struct_specifier
  name: (type_identifier) @name.definition.class
  body: (field_declaration_list)) @definition.class

(union_specifier
  name: (type_identifier) @name.definition.class
  body: (field_declaration_list)) @definition.class

(enum_specifier
  name: (type_identifier) @name.definition.enum
  body: (enumerator_list)) @definition.enum

(type_definition
  declarator: (type_identifier) @name.definition.type) @definition.type
"#;

const CPP_QUERY: &str = r#"
(function_definition
  declarator: (function_declarator
    declarator: (_) @name.definition.function)) @definition.function

(class_specifier
  name: (type_identifier) @name.definition.class
  body: (field_declaration_list)) @definition.class

(struct_specifier
  name: (type_identifier) @name.definition.class
  body: (field_declaration_list)) @definition.class

(enum_specifier
  name: (type_identifier) @name.definition.enum) @definition.enum

(namespace_definition
  name: (_) @name.definition.module) @definition.module
"#;

const RUBY_QUERY: &str = r#"
(method
  name: (identifier) @name.definition.method) @definition.method

(singleton_method
  name: (identifier) @name.definition.method) @definition.method

(class
  name: (constant) @name.definition.class) @definition.class

(module
  name: (constant) @name.definition.module) @definition.module
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_languages_have_queries() {
        for language in [
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::TypeScriptReact,
            Language::Go,
            Language::Rust,
            Language::Java,
            Language::C,
            Language::Cpp,
            Language::Ruby,
        ] {
            assert!(query_source(language).is_some(), "{}", language.as_str());
        }
    }

    #[test]
    fn test_fallback_and_unknown_have_none() {
        assert!(query_source(Language::Markdown).is_none());
        assert!(query_source(Language::Unknown).is_none());
    }

    #[test]
    fn test_capture_convention() {
        // Every query tags whole blocks and their identifiers.
        for language in [Language::Rust, Language::Python, Language::Ruby] {
            let text = query_source(language).unwrap();
            assert!(text.contains("@definition."));
            assert!(text.contains("@name.definition."));
        }
    }
}
