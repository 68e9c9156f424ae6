//! Declaration recognizer over the token stream.
//!
//! This is deliberately not a full Swift parser. It recognizes the two
//! levels the extractor needs (top-level type declarations, then their
//! variable and function members), skips everything else by balanced-brace
//! matching, and never fails: a malformed file simply yields fewer
//! declarations.

use tracing::debug;

use super::ast::{
    Attribute, Binding, DeclKind, FunctionDecl, Member, ParameterDecl, SourceUnit,
    TypeDeclaration, VariableDecl,
};
use super::lexer::{tokenize, Token, TokenKind};

/// Keywords that begin a declaration and therefore terminate a preceding
/// type spelling or initializer expression.
const DECL_KEYWORDS: &[&str] = &[
    "var", "let", "func", "init", "deinit", "subscript", "class", "struct", "enum", "extension",
    "protocol", "typealias", "case", "import", "where",
];

const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "internal",
    "fileprivate",
    "open",
    "package",
    "final",
    "static",
    "override",
    "required",
    "convenience",
    "lazy",
    "weak",
    "unowned",
    "dynamic",
    "mutating",
    "nonmutating",
    "nonisolated",
    "indirect",
    "optional",
];

/// Parse one source file into its declaration surface.
pub fn parse_source(source: &str) -> SourceUnit {
    let mut parser = Parser {
        source,
        tokens: tokenize(source),
        pos: 0,
    };
    let unit = parser.parse_unit();
    debug!(
        imports = unit.imports.len(),
        types = unit.types.len(),
        "parsed source unit"
    );
    unit
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn ident_text(&self) -> Option<&'a str> {
        self.peek()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.text(self.source))
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at_kind(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_unit(&mut self) -> SourceUnit {
        let mut unit = SourceUnit::default();

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::At => {
                    // Top-level declaration attributes carry nothing we need
                    self.parse_attribute();
                }
                TokenKind::LBrace => self.skip_braces(),
                TokenKind::Identifier => {
                    let text = token.text(self.source);
                    match text {
                        "import" => {
                            self.pos += 1;
                            if let Some(path) = self.parse_import_path() {
                                unit.imports.push(path);
                            }
                        }
                        "class" | "struct" | "extension" => {
                            self.pos += 1;
                            let kind = match text {
                                "class" => DeclKind::Class,
                                "struct" => DeclKind::Struct,
                                _ => DeclKind::Extension,
                            };
                            if let Some(decl) = self.parse_type_declaration(kind) {
                                unit.types.push(decl);
                            }
                        }
                        _ => {
                            self.pos += 1;
                        }
                    }
                }
                _ => {
                    self.pos += 1;
                }
            }
        }

        unit
    }

    /// `import Foo.Bar`, optionally with a kind specifier (`import class X.Y`).
    fn parse_import_path(&mut self) -> Option<String> {
        if let Some(text) = self.ident_text() {
            if matches!(
                text,
                "class" | "struct" | "enum" | "protocol" | "func" | "var" | "let" | "typealias"
            ) {
                self.pos += 1;
            }
        }
        self.parse_dotted_name()
    }

    /// A possibly dotted identifier chain, sliced from the source.
    fn parse_dotted_name(&mut self) -> Option<String> {
        let first = self.peek().filter(|t| t.kind == TokenKind::Identifier)?;
        self.pos += 1;
        let mut end = first.end;
        while self.at_kind(TokenKind::Dot) {
            let dot = self.pos;
            self.pos += 1;
            match self.peek().filter(|t| t.kind == TokenKind::Identifier) {
                Some(ident) => {
                    self.pos += 1;
                    end = ident.end;
                }
                None => {
                    self.pos = dot;
                    break;
                }
            }
        }
        Some(self.source[first.start..end].to_string())
    }

    fn parse_type_declaration(&mut self, kind: DeclKind) -> Option<TypeDeclaration> {
        let name = self.parse_dotted_name()?;
        if self.at_kind(TokenKind::Less) {
            self.skip_angles();
        }

        let mut inherited = Vec::new();
        if self.eat_kind(TokenKind::Colon) {
            loop {
                match self.parse_inheritance_entry() {
                    Some(entry) => inherited.push(entry),
                    None => break,
                }
                if !self.eat_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        // Generic constraints add nothing to the conformance list
        if self.ident_text() == Some("where") {
            while let Some(token) = self.peek() {
                if token.kind == TokenKind::LBrace {
                    break;
                }
                self.pos += 1;
            }
        }

        if !self.eat_kind(TokenKind::LBrace) {
            return None;
        }
        let members = self.parse_members();

        Some(TypeDeclaration {
            kind,
            name,
            inherited,
            members,
        })
    }

    fn parse_inheritance_entry(&mut self) -> Option<String> {
        if self.ident_text() == Some("where") {
            return None;
        }
        let name = self.parse_dotted_name()?;
        if self.at_kind(TokenKind::Less) {
            self.skip_angles();
        }
        Some(name)
    }

    /// Members of a type body; the opening brace is already consumed.
    fn parse_members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        let mut attributes: Vec<Attribute> = Vec::new();

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::RBrace => {
                    self.pos += 1;
                    break;
                }
                TokenKind::LBrace => {
                    // Body of an unrecognized member, including any nested
                    // type declaration; never descended into
                    self.skip_braces();
                    attributes.clear();
                }
                TokenKind::At => attributes.push(self.parse_attribute()),
                TokenKind::Identifier => {
                    let text = token.text(self.source);
                    if MODIFIERS.contains(&text) {
                        self.pos += 1;
                    } else if text == "var" || text == "let" {
                        self.pos += 1;
                        if let Some(decl) = self.parse_variable(std::mem::take(&mut attributes)) {
                            members.push(Member::Variable(decl));
                        }
                    } else if text == "func" {
                        self.pos += 1;
                        if let Some(decl) = self.parse_function(std::mem::take(&mut attributes)) {
                            members.push(Member::Function(decl));
                        }
                    } else {
                        self.pos += 1;
                        attributes.clear();
                    }
                }
                _ => {
                    self.pos += 1;
                    attributes.clear();
                }
            }
        }

        members
    }

    /// Bindings of a `var`/`let`; the introducer is already consumed.
    fn parse_variable(&mut self, attributes: Vec<Attribute>) -> Option<VariableDecl> {
        let mut bindings = Vec::new();

        loop {
            let name = match self.ident_text() {
                Some(_) => self.parse_dotted_name()?,
                // Tuple or other non-identifier patterns never provide
                None => return None,
            };

            let mut annotation = None;
            if self.eat_kind(TokenKind::Colon) {
                while self.at_kind(TokenKind::At) {
                    self.parse_attribute();
                }
                annotation = self.parse_type();
            }

            let mut has_initializer = false;
            if self.eat_kind(TokenKind::Equals) {
                has_initializer = true;
                self.skip_expression();
            }

            // Accessor block of a computed property
            if self.at_kind(TokenKind::LBrace) {
                self.skip_braces();
            }

            bindings.push(Binding {
                name,
                annotation,
                has_initializer,
            });

            if !self.eat_kind(TokenKind::Comma) {
                break;
            }
        }

        Some(VariableDecl {
            attributes,
            bindings,
        })
    }

    /// A `func` declaration; the introducer is already consumed.
    fn parse_function(&mut self, attributes: Vec<Attribute>) -> Option<FunctionDecl> {
        let name = match self.ident_text() {
            Some(_) => self.parse_dotted_name()?,
            // Operator declarations never provide
            None => return None,
        };
        if self.at_kind(TokenKind::Less) {
            self.skip_angles();
        }
        if !self.eat_kind(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_parameters();

        while matches!(self.ident_text(), Some("async" | "throws" | "rethrows")) {
            self.pos += 1;
            if self.at_kind(TokenKind::LParen) {
                self.skip_parens();
            }
        }

        let mut return_type = None;
        if self.eat_kind(TokenKind::Arrow) {
            return_type = self.parse_type();
        }

        if self.ident_text() == Some("where") {
            while let Some(token) = self.peek() {
                if token.kind == TokenKind::LBrace {
                    break;
                }
                self.pos += 1;
            }
        }

        if self.at_kind(TokenKind::LBrace) {
            self.skip_braces();
        }

        Some(FunctionDecl {
            attributes,
            name,
            parameters,
            return_type,
        })
    }

    /// Parameter list; the opening paren is already consumed.
    fn parse_parameters(&mut self) -> Vec<ParameterDecl> {
        let mut parameters = Vec::new();

        loop {
            if self.eat_kind(TokenKind::RParen) || self.peek().is_none() {
                break;
            }

            let label = match self.ident_text() {
                Some(text) => {
                    let label = text.to_string();
                    self.pos += 1;
                    label
                }
                None => {
                    self.recover_to_parameter_boundary();
                    continue;
                }
            };
            // Distinct internal name; the call site only uses the label
            if self.ident_text().is_some() {
                self.pos += 1;
            }

            if !self.eat_kind(TokenKind::Colon) {
                self.recover_to_parameter_boundary();
                continue;
            }

            let mut attributes = Vec::new();
            while self.at_kind(TokenKind::At) {
                attributes.push(self.parse_attribute());
            }
            while matches!(self.ident_text(), Some("inout" | "borrowing" | "consuming")) {
                self.pos += 1;
            }

            let ty = match self.parse_type() {
                Some(ty) => ty,
                None => {
                    self.recover_to_parameter_boundary();
                    continue;
                }
            };

            let mut default_value = None;
            if self.eat_kind(TokenKind::Equals) {
                default_value = self.parse_default_value();
            }

            parameters.push(ParameterDecl {
                attributes,
                label,
                ty,
                default_value,
            });

            if !self.eat_kind(TokenKind::Comma) {
                self.eat_kind(TokenKind::RParen);
                break;
            }
        }

        parameters
    }

    /// On a malformed parameter, resynchronize at the next `,` or the
    /// closing `)`.
    fn recover_to_parameter_boundary(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Comma if depth == 0 => return,
                _ => {}
            }
        }
    }

    /// Source text of a default expression, up to the next `,` or `)` at
    /// the parameter's own nesting level.
    fn parse_default_value(&mut self) -> Option<String> {
        let start = self.peek()?.start;
        let mut end = start;
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Comma if depth == 0 => break,
                _ => {}
            }
            end = token.end;
            self.pos += 1;
        }
        let text = self.source[start..end].trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// A type spelling, sliced verbatim from the source. Stops at any token
    /// that cannot continue a type at the current nesting level.
    fn parse_type(&mut self) -> Option<String> {
        let start = self.peek()?.start;
        let mut end = start;
        let mut consumed = false;
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            let stop = match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::Less => {
                    depth += 1;
                    false
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::Greater => {
                    if depth == 0 {
                        true
                    } else {
                        depth -= 1;
                        false
                    }
                }
                TokenKind::Identifier => {
                    depth == 0 && DECL_KEYWORDS.contains(&token.text(self.source))
                }
                TokenKind::Equals
                | TokenKind::Semicolon
                | TokenKind::LBrace
                | TokenKind::RBrace => true,
                TokenKind::Comma | TokenKind::Colon | TokenKind::At | TokenKind::Operator => {
                    depth == 0
                }
                TokenKind::Arrow
                | TokenKind::Dot
                | TokenKind::Question
                | TokenKind::Bang
                | TokenKind::Ampersand => false,
                TokenKind::StringLiteral | TokenKind::Number => depth == 0,
            };
            if stop {
                break;
            }
            end = token.end;
            consumed = true;
            self.pos += 1;
        }

        consumed.then(|| self.source[start..end].trim().to_string())
    }

    /// `@Name` or `@Name(args…)`, capturing the first string argument.
    fn parse_attribute(&mut self) -> Attribute {
        self.pos += 1; // @
        let name = self.parse_dotted_name().unwrap_or_default();
        let mut string_arg = None;

        if self.at_kind(TokenKind::LParen) {
            self.pos += 1;
            let mut depth = 1usize;
            while let Some(token) = self.advance() {
                match token.kind {
                    TokenKind::LParen => depth += 1,
                    TokenKind::RParen => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    TokenKind::StringLiteral if string_arg.is_none() => {
                        string_arg = Some(token.string_value(self.source));
                    }
                    _ => {}
                }
            }
        }

        Attribute { name, string_arg }
    }

    /// An initializer expression, consumed blind. Stops before a `}` closing
    /// the enclosing body, before the next declaration keyword, and before a
    /// binding separator at nesting level zero.
    fn skip_expression(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::At if depth == 0 => return,
                TokenKind::Identifier
                    if depth == 0 && DECL_KEYWORDS.contains(&token.text(self.source)) =>
                {
                    return;
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn skip_braces(&mut self) {
        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
    }

    fn skip_parens(&mut self) {
        self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
    }

    fn skip_angles(&mut self) {
        self.skip_balanced(TokenKind::Less, TokenKind::Greater);
    }

    /// Consume a balanced token pair, opener included.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) {
        debug_assert!(self.at_kind(open));
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }
}
