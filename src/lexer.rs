use crate::error::Span;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    Float,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }
}

/// On-demand tokenizer. Positions are character indices so spans line up
/// with what the diagnostic renderer expects.
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
    keywords: HashMap<&'static str, TokenKind>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("fn", TokenKind::Function);
        keywords.insert("let", TokenKind::Let);
        keywords.insert("true", TokenKind::True);
        keywords.insert("false", TokenKind::False);
        keywords.insert("if", TokenKind::If);
        keywords.insert("else", TokenKind::Else);
        keywords.insert("return", TokenKind::Return);

        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            keywords,
        }
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;

        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, "", Span::single(self.current));
        };

        match c {
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                };
                self.make_token(kind)
            }
            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                };
                self.make_token(kind)
            }
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Asterisk),
            '/' => self.make_token(TokenKind::Slash),
            '<' => self.make_token(TokenKind::Lt),
            '>' => self.make_token(TokenKind::Gt),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            '[' => self.make_token(TokenKind::LBracket),
            ']' => self.make_token(TokenKind::RBracket),
            '"' => self.string(),
            c if is_letter(c) => self.identifier(),
            c if is_digit(c) => self.number(),
            _ => self.make_token(TokenKind::Illegal),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.current += 1;
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.source.get(self.current).copied()?;
        self.current += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    // Unterminated strings run to the end of input without an error.
    fn string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            self.current += 1;
        }

        let content: String = self.source[self.start + 1..self.current].iter().collect();

        // Consume the closing quote if there is one
        self.match_char('"');

        Token::new(
            TokenKind::String,
            content,
            Span::new(self.start, self.current),
        )
    }

    fn number(&mut self) -> Token {
        while self.peek().is_some_and(is_digit) {
            self.current += 1;
        }

        let literal = self.text();
        let kind = match literal.matches('.').count() {
            0 => TokenKind::Int,
            1 => TokenKind::Float,
            _ => TokenKind::Illegal,
        };

        Token::new(kind, literal, Span::new(self.start, self.current))
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_some_and(is_letter) {
            self.current += 1;
        }

        let text = self.text();
        let kind = self
            .keywords
            .get(text.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);

        Token::new(kind, text, Span::new(self.start, self.current))
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.text(), Span::new(self.start, self.current))
    }

    fn text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

// '.' counts so that floats lex as a single run
fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Lex `source` completely. The returned tokens always end with one EOF.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}
