//! Declaration surface produced by the parser.
//!
//! The shapes here are deliberately shallow: bodies of functions and
//! accessors are skipped during parsing, and nested type declarations are
//! not represented. Extraction pattern-matches on these variants; nothing
//! downstream touches source text again.

/// One parsed source file: its imports and its top-level type declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    /// Import paths in textual order of appearance.
    pub imports: Vec<String>,
    pub types: Vec<TypeDeclaration>,
}

/// Syntactic shape of a top-level type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Struct,
    Extension,
}

/// A top-level `class`, `struct`, or `extension` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: DeclKind,
    /// Declared name; for extensions, the extended type spelling.
    pub name: String,
    /// Inheritance clause entries in source order.
    pub inherited: Vec<String>,
    pub members: Vec<Member>,
}

/// A member declaration inside a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Variable(VariableDecl),
    Function(FunctionDecl),
}

/// A `var`/`let` declaration with one or more bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub attributes: Vec<Attribute>,
    pub bindings: Vec<Binding>,
}

/// One binding inside a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    /// Explicit type annotation, if present.
    pub annotation: Option<String>,
    pub has_initializer: bool,
}

/// A `func` declaration. The body is not represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub parameters: Vec<ParameterDecl>,
    /// Explicit return clause, if present.
    pub return_type: Option<String>,
}

/// A function parameter. Attributes written in type position are split off
/// the type spelling, so `ty` is always the base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub attributes: Vec<Attribute>,
    /// External label; `_` when the parameter is unlabeled.
    pub label: String,
    pub ty: String,
    /// Source text of the default expression, if present.
    pub default_value: Option<String>,
}

/// An attribute, flattened to its name and first string-literal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub string_arg: Option<String>,
}

impl Attribute {
    /// First attribute whose name contains `token`, yielding its string
    /// argument. Substring matching is the contract, not equality.
    pub fn lookup(token: &str, attributes: &[Attribute]) -> Option<String> {
        attributes
            .iter()
            .find(|attr| attr.name.contains(token))
            .and_then(|attr| attr.string_arg.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, arg: Option<&str>) -> Attribute {
        Attribute {
            name: name.to_string(),
            string_arg: arg.map(str::to_string),
        }
    }

    #[test]
    fn test_attribute_lookup_matches_by_substring() {
        let attrs = vec![attr("objc", None), attr("DI.Named", Some("Production"))];
        assert_eq!(
            Attribute::lookup("Named", &attrs),
            Some("Production".to_string())
        );
    }

    #[test]
    fn test_attribute_lookup_takes_first_match() {
        let attrs = vec![
            attr("Named", Some("First")),
            attr("Named", Some("Second")),
        ];
        assert_eq!(Attribute::lookup("Named", &attrs), Some("First".to_string()));
    }

    #[test]
    fn test_attribute_lookup_without_argument_yields_none() {
        let attrs = vec![attr("Named", None)];
        assert_eq!(Attribute::lookup("Named", &attrs), None);
    }
}
