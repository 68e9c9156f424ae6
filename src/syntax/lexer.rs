//! Token-level scanner for the Swift declaration subset.
//!
//! Tokens carry byte offsets into the source instead of owned text, so the
//! parser can slice exact type spellings and default-value expressions back
//! out of the original file. Comments and whitespace are skipped; string
//! literals are lexed as single tokens so braces inside them never confuse
//! body skipping.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    StringLiteral,
    Number,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Less,
    Greater,
    Colon,
    Semicolon,
    Comma,
    Dot,
    At,
    Equals,
    Arrow,
    Question,
    Bang,
    Ampersand,
    /// Any other punctuation, kept only so offsets stay contiguous.
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Unquoted, unescaped value of a string-literal token.
    pub fn string_value(&self, source: &str) -> String {
        let raw = self.text(source);
        let inner = raw
            .strip_prefix("\"\"\"")
            .and_then(|s| s.strip_suffix("\"\"\""))
            .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
            .unwrap_or(raw);
        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                value.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('0') => value.push('\0'),
                Some(other) => value.push(other),
                None => value.push('\\'),
            }
        }
        value
    }
}

/// Tokenize `source`. The scanner never fails; unrecognizable bytes become
/// `Operator` tokens and are ignored by the parser.
pub fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
            }
            b'"' => {
                let start = i;
                i = scan_string(bytes, i);
                tokens.push(Token {
                    kind: TokenKind::StringLiteral,
                    start,
                    end: i,
                });
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Identifier,
                    start,
                    end: i,
                });
            }
            b'0'..=b'9' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
                {
                    i += 1;
                }
                // A trailing dot belongs to member access, not the number
                if bytes[i - 1] == b'.' {
                    i -= 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Number,
                    start,
                    end: i,
                });
            }
            _ => {
                let (kind, len) = punctuation(bytes, i);
                tokens.push(Token {
                    kind,
                    start: i,
                    end: i + len,
                });
                i += len;
            }
        }
    }

    tokens
}

fn punctuation(bytes: &[u8], i: usize) -> (TokenKind, usize) {
    let next = bytes.get(i + 1).copied();
    match bytes[i] {
        b'{' => (TokenKind::LBrace, 1),
        b'}' => (TokenKind::RBrace, 1),
        b'(' => (TokenKind::LParen, 1),
        b')' => (TokenKind::RParen, 1),
        b'[' => (TokenKind::LBracket, 1),
        b']' => (TokenKind::RBracket, 1),
        b':' => (TokenKind::Colon, 1),
        b';' => (TokenKind::Semicolon, 1),
        b',' => (TokenKind::Comma, 1),
        b'.' => (TokenKind::Dot, 1),
        b'@' => (TokenKind::At, 1),
        b'?' => (TokenKind::Question, 1),
        b'&' if next != Some(b'&') => (TokenKind::Ampersand, 1),
        b'-' if next == Some(b'>') => (TokenKind::Arrow, 2),
        b'<' => (TokenKind::Less, 1),
        b'>' => (TokenKind::Greater, 1),
        b'=' if next == Some(b'=') => (TokenKind::Operator, 2),
        b'=' => (TokenKind::Equals, 1),
        b'!' if next == Some(b'=') => (TokenKind::Operator, 2),
        b'!' => (TokenKind::Bang, 1),
        _ => (TokenKind::Operator, utf8_len(bytes[i])),
    }
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        0xF0..=0xF7 => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    // Block comments nest in Swift
    let mut depth = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                break;
            }
        } else {
            i += 1;
        }
    }
    i
}

fn scan_string(bytes: &[u8], i: usize) -> usize {
    if bytes.get(i + 1) == Some(&b'"') && bytes.get(i + 2) == Some(&b'"') {
        // Multiline literal: scan to the closing triple quote
        let mut j = i + 3;
        while j + 2 < bytes.len() {
            if bytes[j] == b'"' && bytes[j + 1] == b'"' && bytes[j + 2] == b'"' {
                return j + 3;
            }
            j += 1;
        }
        return bytes.len();
    }
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            b'\n' => return j, // unterminated; resynchronize at the newline
            _ => j += 1,
        }
    }
    j
}
