//! Minimal syntax layer for the Swift declaration subset the extractor
//! consumes: a lexer, a declaration recognizer, and the tagged-variant
//! declaration surface.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    Attribute, Binding, DeclKind, FunctionDecl, Member, ParameterDecl, SourceUnit,
    TypeDeclaration, VariableDecl,
};
pub use parser::parse_source;
