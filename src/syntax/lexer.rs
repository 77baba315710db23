//! Logos-based lexer for TypeScript sources.
//!
//! Only declaration-level structure matters to the extractor, so the token
//! set is coarse: identifiers (keywords included), literals, brackets and a
//! handful of punctuation kinds. Comments are kept as trivia tokens because
//! doc blocks are attached to the declaration that follows them.

use logos::Logos;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LineComment,
    BlockComment,
    Ident,
    Number,
    String,
    Template,
    /// Regular expression literal, flags included.
    Regex,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Semicolon,
    Colon,
    Dot,
    OptionalDot,
    Ellipsis,
    Question,
    Bang,
    Eq,
    Arrow,
    At,
    Hash,
    Star,
    Slash,
    Operator,
    Error,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// A token with its kind, text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
    /// A line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }

    /// Doc blocks open with `/**`; `/**/` is an empty plain comment.
    pub fn is_doc_comment(&self) -> bool {
        self.kind == TokenKind::BlockComment && self.text.starts_with("/**") && self.text != "/**/"
    }
}

/// Tokenize `input`, dropping whitespace and recording line breaks on the
/// following token.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = LogosToken::lexer(input);
    let mut tokens = Vec::new();
    let mut newline_before = false;

    while let Some(result) = lexer.next() {
        let mut text = lexer.slice();
        let offset = lexer.span().start;
        let mut kind = match result {
            Ok(LogosToken::Whitespace) => {
                newline_before |= text.contains('\n');
                continue;
            }
            Ok(t) => t.into(),
            Err(()) => TokenKind::Error,
        };
        if kind == TokenKind::Slash && regex_allowed(&tokens, newline_before) {
            if let Some(len) = regex_literal_len(&input[offset..]) {
                lexer.bump(len - 1);
                text = lexer.slice();
                kind = TokenKind::Regex;
            }
        }
        tokens.push(Token {
            kind,
            text,
            offset,
            newline_before,
        });
        // a comment never hides the line break before it
        newline_before = kind.is_trivia()
            && (newline_before || kind == TokenKind::LineComment || text.contains('\n'));
    }

    tokens
}

/// Whether a `/` at this point starts an expression rather than dividing.
fn regex_allowed(tokens: &[Token<'_>], newline_before: bool) -> bool {
    let Some(prev) = tokens.iter().rev().find(|t| !t.kind.is_trivia()) else {
        return true;
    };
    if newline_before {
        return true;
    }
    match prev.kind {
        TokenKind::LParen
        | TokenKind::LBracket
        | TokenKind::LBrace
        | TokenKind::RBrace
        | TokenKind::Comma
        | TokenKind::Semicolon
        | TokenKind::Colon
        | TokenKind::Eq
        | TokenKind::Arrow
        | TokenKind::Bang
        | TokenKind::Question
        | TokenKind::Operator => true,
        TokenKind::Ident => matches!(
            prev.text,
            "return" | "typeof" | "case" | "do" | "else" | "in" | "of" | "new" | "delete"
                | "void" | "throw" | "yield" | "await"
        ),
        _ => false,
    }
}

/// Byte length of the regex literal at the start of `rest`, which begins
/// with `/`. `None` when no closing `/` is found on the same line.
fn regex_literal_len(rest: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = rest.char_indices().skip(1);
    let body_end = loop {
        let (i, c) = chars.next()?;
        match c {
            '\n' | '\r' => return None,
            '\\' => {
                let (_, escaped) = chars.next()?;
                if escaped == '\n' {
                    return None;
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => break i + 1,
            _ => {}
        }
    };
    let flags = rest[body_end..]
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len() - body_end);
    Some(body_end + flags)
}

/// Extend a `/*` match up to and including the closing `*/`.
fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xXbBoO][0-9a-fA-F_]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?.")]
    OptionalDot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("=>")]
    Arrow,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[regex(r"[-+%&|^~]")]
    Operator,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            // filtered out by `tokenize`
            LogosToken::Whitespace => TokenKind::Error,
            LogosToken::LineComment => TokenKind::LineComment,
            LogosToken::BlockComment => TokenKind::BlockComment,
            LogosToken::Ident => TokenKind::Ident,
            LogosToken::Number => TokenKind::Number,
            LogosToken::String => TokenKind::String,
            LogosToken::Template => TokenKind::Template,
            LogosToken::LBrace => TokenKind::LBrace,
            LogosToken::RBrace => TokenKind::RBrace,
            LogosToken::LParen => TokenKind::LParen,
            LogosToken::RParen => TokenKind::RParen,
            LogosToken::LBracket => TokenKind::LBracket,
            LogosToken::RBracket => TokenKind::RBracket,
            LogosToken::Lt => TokenKind::Lt,
            LogosToken::Gt => TokenKind::Gt,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::OptionalDot => TokenKind::OptionalDot,
            LogosToken::Ellipsis => TokenKind::Ellipsis,
            LogosToken::Question => TokenKind::Question,
            LogosToken::Bang => TokenKind::Bang,
            LogosToken::Eq => TokenKind::Eq,
            LogosToken::Arrow => TokenKind::Arrow,
            LogosToken::At => TokenKind::At,
            LogosToken::Hash => TokenKind::Hash,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Operator => TokenKind::Operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn decorator_with_string_argument() {
        assert_eq!(
            kinds("@HostBinding('class.small')"),
            vec![
                TokenKind::At,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::String,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn doc_comment_kept_as_trivia() {
        let tokens = tokenize("/**\n * @group Layout\n */\nclass Foo {}");
        assert!(tokens[0].is_doc_comment());
        assert!(tokens[0].kind.is_trivia());
        assert!(tokens[1].is_ident("class"));
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn plain_block_comment_is_not_doc() {
        let tokens = tokenize("/* license */ /**/");
        assert!(!tokens[0].is_doc_comment());
        assert!(!tokens[1].is_doc_comment());
    }

    #[test]
    fn nested_generics_close_one_angle_at_a_time() {
        assert_eq!(
            kinds("Array<Array<T>>"),
            vec![
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::Gt,
            ]
        );
    }

    #[test]
    fn arrow_is_single_token() {
        assert_eq!(
            kinds("() => x"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn newline_tracking() {
        let tokens = tokenize("a b\nc // note\nd");
        assert!(!tokens[1].newline_before);
        assert!(tokens[2].newline_before);
        assert!(!tokens[3].newline_before);
        assert!(tokens[4].newline_before);
    }

    #[test]
    fn doc_block_is_one_token() {
        let tokens = tokenize("const a = 1;\n/** @component B */\nclass B {}");
        let doc = tokens.iter().find(|t| t.kind == TokenKind::BlockComment).unwrap();
        assert_eq!(doc.text, "/** @component B */");
        assert!(doc.is_doc_comment());
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Error && t.kind != TokenKind::Slash));
    }

    #[test]
    fn multi_line_doc_block_with_stars() {
        let text = "/**\n * @group Layout\n * a ** b\n **/";
        let source = format!("{text}\nclass Foo {{}}");
        let tokens = tokenize(&source);
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].text, text);
        assert!(tokens[1].is_ident("class"));
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert_eq!(tokenize("/** open")[0].kind, TokenKind::Error);
    }

    #[test]
    fn regex_literal_in_call() {
        let tokens = tokenize(r"if (/^https?:\/\//.test(this.href)) {}");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].text, r"/^https?:\/\//");
        assert_eq!(tokens[3].kind, TokenKind::Dot);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::LineComment));
    }

    #[test]
    fn regex_literal_with_brace_and_flags() {
        let tokens = tokenize(r"const re = /[{}\/]+\}/gi;");
        assert_eq!(tokens[3].kind, TokenKind::Regex);
        assert_eq!(tokens[3].text, r"/[{}\/]+\}/gi");
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    }

    #[test]
    fn division_is_not_a_regex() {
        assert_eq!(
            kinds("total / count / 2"),
            vec![
                TokenKind::Ident,
                TokenKind::Slash,
                TokenKind::Ident,
                TokenKind::Slash,
                TokenKind::Number,
            ]
        );
        assert_eq!(kinds("(a) / b")[3], TokenKind::Slash);
    }

    #[test]
    fn template_literal_spans_lines() {
        let tokens = tokenize("template: `\n  <div></div>\n`,");
        assert_eq!(tokens[2].kind, TokenKind::Template);
        assert_eq!(tokens[3].kind, TokenKind::Comma);
    }
}
