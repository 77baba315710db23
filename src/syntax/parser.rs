//! Declaration-level recursive-descent parser.
//!
//! Walks the token stream of one file and keeps only what the documentation
//! engine reads: top-level classes with their decorators, heritage clause and
//! member signatures. Statements, function bodies and initializers are
//! skipped by bracket matching, with a light automatic-semicolon heuristic so
//! unterminated statements do not swallow the next declaration.

use super::ast::*;
use super::lexer::{tokenize, Token, TokenKind};
use crate::error::{DocError, Result};

/// Keywords that can prefix a class member.
const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "readonly",
    "abstract",
    "declare",
    "override",
    "async",
    "accessor",
];

/// Newline-preceded tokens that begin a new top-level statement.
const STATEMENT_STARTS: &[&str] = &["export", "import", "class", "abstract", "declare"];

/// Identifiers that cannot end an expression.
const PREFIX_WORDS: &[&str] = &[
    "new", "typeof", "void", "await", "delete", "in", "instanceof", "of", "as", "satisfies",
];

/// Parse one source file.
pub fn parse_source(name: &str, text: &str) -> Result<SourceFile> {
    let classes = Parser::new(name, text).parse_classes()?;
    Ok(SourceFile {
        name: name.to_string(),
        classes,
    })
}

struct Parser<'a> {
    file: &'a str,
    source: &'a str,
    tokens: Vec<Token<'a>>,
    /// Index of the current significant token (never a comment).
    pos: usize,
    /// End offset of the last consumed token.
    last_end: usize,
}

impl<'a> Parser<'a> {
    fn new(file: &'a str, source: &'a str) -> Self {
        let mut parser = Self {
            file,
            source,
            tokens: tokenize(source),
            pos: 0,
            last_end: 0,
        };
        parser.skip_trivia();
        parser
    }

    // -- cursor ---------------------------------------------------------------

    fn skip_trivia(&mut self) {
        while self.tokens.get(self.pos).is_some_and(|t| t.kind.is_trivia()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    /// The `n`-th significant token after the current one.
    fn peek_nth(&self, n: usize) -> Option<Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.last_end = token.end();
        self.pos += 1;
        self.skip_trivia();
        Some(token)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn at_ident(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(word))
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.source.len(), |t| t.offset)
    }

    fn slice_from(&self, start: usize) -> &'a str {
        self.source[start..self.last_end.max(start)].trim()
    }

    /// Nearest doc block among the comments directly before the current token.
    fn leading_doc(&self) -> Option<String> {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .rev()
            .take_while(|t| t.kind.is_trivia())
            .find(|t| t.is_doc_comment())
            .map(|t| t.text.to_string())
    }

    fn line_of(&self, offset: usize) -> usize {
        self.source[..offset.min(self.source.len())].matches('\n').count() + 1
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> DocError {
        DocError::Syntax {
            file: self.file.to_string(),
            line: self.line_of(offset),
            message: message.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> DocError {
        self.error_at(self.offset(), message)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token<'a>> {
        match self.peek() {
            Some(t) if t.kind == kind => {
                self.bump();
                Ok(t)
            }
            Some(t) => Err(self.error(format!("expected {what}, found `{}`", t.text))),
            None => Err(self.error(format!("expected {what}, found end of file"))),
        }
    }

    // -- bracket skipping -----------------------------------------------------

    /// Consume a bracketed group starting at the current opener.
    fn skip_group(&mut self) -> Result<()> {
        let Some(open) = self.bump() else {
            return Ok(());
        };
        let mut stack = vec![closer_of(open.kind)];
        while let Some(expected) = stack.last().copied() {
            let Some(token) = self.bump() else {
                return Err(self.error_at(open.offset, format!("unclosed `{}`", open.text)));
            };
            match token.kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    stack.push(closer_of(token.kind));
                }
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if token.kind != expected {
                        return Err(self.error_at(
                            token.offset,
                            format!("mismatched `{}`", token.text),
                        ));
                    }
                    stack.pop();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Consume a `<...>` type argument or parameter list.
    fn skip_angle(&mut self) -> Result<()> {
        let start = self.offset();
        self.bump();
        let mut depth = 1usize;
        while depth > 0 {
            let Some(token) = self.peek() else {
                return Err(self.error_at(start, "unclosed `<`"));
            };
            match token.kind {
                TokenKind::Lt => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::Gt => {
                    depth -= 1;
                    self.bump();
                }
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => self.skip_group()?,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket | TokenKind::Semicolon => {
                    return Err(self.error_at(start, "unclosed `<`"));
                }
                _ => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    // -- top level ------------------------------------------------------------

    fn parse_classes(&mut self) -> Result<Vec<ClassDecl>> {
        let mut classes = Vec::new();
        while let Some(start) = self.peek() {
            let doc_comment = self.leading_doc();
            let line = self.line_of(start.offset);
            let mut decorators = self.parse_decorators()?;

            loop {
                if self.at_ident("export") || self.at_ident("default") {
                    self.bump();
                } else if (self.at_ident("declare") || self.at_ident("abstract"))
                    && self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Ident)
                {
                    self.bump();
                } else {
                    break;
                }
            }
            decorators.extend(self.parse_decorators()?);

            if self.at_ident("class") {
                let class = self.parse_class(doc_comment, decorators, line)?;
                classes.extend(class);
            } else {
                self.skip_statement()?;
            }
        }
        Ok(classes)
    }

    /// Skip one top-level statement that is not a class declaration.
    fn skip_statement(&mut self) -> Result<()> {
        let mut first = true;
        while let Some(token) = self.peek() {
            if !first
                && token.newline_before
                && token.kind == TokenKind::Ident
                && STATEMENT_STARTS.contains(&token.text)
            {
                return Ok(());
            }
            if !first && token.newline_before && token.kind == TokenKind::At {
                return Ok(());
            }
            first = false;
            match token.kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::LBrace => {
                    self.skip_group()?;
                    if self.peek().map_or(true, |t| t.newline_before) {
                        return Ok(());
                    }
                }
                TokenKind::LParen | TokenKind::LBracket => self.skip_group()?,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    return Err(self.error(format!("unexpected `{}`", token.text)));
                }
                _ => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    // -- decorators and literal arguments -------------------------------------

    fn parse_decorators(&mut self) -> Result<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.at(TokenKind::At) {
            decorators.push(self.parse_decorator()?);
        }
        Ok(decorators)
    }

    fn parse_decorator(&mut self) -> Result<Decorator> {
        let start = self.offset();
        self.bump();
        let mut segments = Vec::new();
        loop {
            let ident = self.expect(TokenKind::Ident, "decorator name")?;
            segments.push(ident.text);
            if !self.eat(TokenKind::Dot) {
                break;
            }
        }
        let args = if self.at(TokenKind::LParen) {
            self.parse_call_args()?
        } else {
            Vec::new()
        };
        Ok(Decorator {
            name: segments.last().copied().unwrap_or_default().to_string(),
            text: self.slice_from(start).to_string(),
            args,
        })
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>> {
        let open = self.offset();
        self.bump();
        let mut args = Vec::new();
        loop {
            if self.eat(TokenKind::RParen) {
                return Ok(args);
            }
            if self.peek().is_none() {
                return Err(self.error_at(open, "unclosed `(`"));
            }
            args.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RParen) {
                return Err(self.error("expected `,` or `)` in argument list"));
            }
        }
    }

    fn at_expr_end(&self) -> bool {
        self.peek().map_or(true, |t| {
            matches!(
                t.kind,
                TokenKind::Comma | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
            )
        })
    }

    fn skip_expr_rest(&mut self) -> Result<()> {
        while !self.at_expr_end() {
            if self.at(TokenKind::LBrace) || self.at(TokenKind::LParen) || self.at(TokenKind::LBracket) {
                self.skip_group()?;
            } else {
                self.bump();
            }
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let start = self.offset();
        let Some(token) = self.peek() else {
            return Ok(Expr::Other(String::new()));
        };
        let primary = match token.kind {
            TokenKind::LBrace => Some(self.parse_object()?),
            TokenKind::LBracket => Some(self.parse_array()?),
            TokenKind::String => {
                self.bump();
                Some(Expr::Str(unquote(token.text)))
            }
            TokenKind::Template if !token.text.contains("${") => {
                self.bump();
                Some(Expr::Str(unquote(token.text)))
            }
            TokenKind::Ident => {
                self.bump();
                Some(Expr::Ident(token.text.to_string()))
            }
            _ => None,
        };
        match primary {
            Some(expr) if self.at_expr_end() => Ok(expr),
            _ => {
                self.skip_expr_rest()?;
                Ok(Expr::Other(self.slice_from(start).to_string()))
            }
        }
    }

    fn parse_object(&mut self) -> Result<Expr> {
        let open = self.offset();
        self.bump();
        let mut entries = Vec::new();
        loop {
            if self.eat(TokenKind::RBrace) {
                return Ok(Expr::Object(entries));
            }
            let Some(token) = self.peek() else {
                return Err(self.error_at(open, "unclosed `{`"));
            };
            let key = match token.kind {
                TokenKind::Ident | TokenKind::Number => Some(token.text.to_string()),
                TokenKind::String => Some(unquote(token.text)),
                _ => None,
            };
            match key {
                Some(key) => {
                    self.bump();
                    if self.eat(TokenKind::Colon) {
                        let value = self.parse_expr()?;
                        entries.push((key, value));
                    } else if self.at(TokenKind::Comma) || self.at(TokenKind::RBrace) {
                        entries.push((key.clone(), Expr::Ident(key)));
                    } else {
                        // method or accessor shorthand
                        self.skip_expr_rest()?;
                    }
                }
                None => self.skip_expr_rest()?,
            }
            if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RBrace) {
                return Err(self.error("expected `,` or `}` in object literal"));
            }
        }
    }

    fn parse_array(&mut self) -> Result<Expr> {
        let open = self.offset();
        self.bump();
        let mut items = Vec::new();
        loop {
            if self.eat(TokenKind::RBracket) {
                return Ok(Expr::Array(items));
            }
            if self.peek().is_none() {
                return Err(self.error_at(open, "unclosed `[`"));
            }
            if self.at(TokenKind::Ellipsis) {
                self.skip_expr_rest()?;
            } else {
                items.push(self.parse_expr()?);
            }
            if !self.eat(TokenKind::Comma) && !self.at(TokenKind::RBracket) {
                return Err(self.error("expected `,` or `]` in array literal"));
            }
        }
    }

    // -- classes --------------------------------------------------------------

    fn parse_class(
        &mut self,
        doc_comment: Option<String>,
        decorators: Vec<Decorator>,
        line: usize,
    ) -> Result<Option<ClassDecl>> {
        self.bump();
        let name = match self.peek() {
            Some(t) if t.kind == TokenKind::Ident && t.text != "extends" && t.text != "implements" => {
                self.bump();
                Some(t.text.to_string())
            }
            _ => None,
        };
        if self.at(TokenKind::Lt) {
            self.skip_angle()?;
        }

        let extends = if self.at_ident("extends") {
            self.bump();
            self.parse_heritage()?
        } else {
            None
        };

        if self.at_ident("implements") {
            while !self.at(TokenKind::LBrace) && self.peek().is_some() {
                if self.at(TokenKind::Lt) {
                    self.skip_angle()?;
                } else {
                    self.bump();
                }
            }
        }

        let body_start = self.offset();
        self.expect(TokenKind::LBrace, "class body")?;
        let members = self.parse_class_body(body_start)?;

        let Some(name) = name else {
            tracing::debug!(file = self.file, line, "skipping anonymous class");
            return Ok(None);
        };

        Ok(Some(ClassDecl {
            name,
            line,
            doc_comment,
            decorators,
            extends,
            members,
        }))
    }

    /// Name of a plain `extends` target. Computed heritage yields `None`.
    fn parse_heritage(&mut self) -> Result<Option<String>> {
        let mut segments = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Ident {
                break;
            }
            segments.push(token.text);
            self.bump();
            if !self.eat(TokenKind::Dot) {
                break;
            }
        }

        if self.at(TokenKind::Lt) {
            self.skip_angle()?;
        }

        if segments.is_empty() || self.at(TokenKind::LParen) {
            // `extends mixin(Base)` and other computed heritage
            while !self.at(TokenKind::LBrace) && !self.at_ident("implements") && self.peek().is_some() {
                if self.at(TokenKind::LParen) || self.at(TokenKind::LBracket) {
                    self.skip_group()?;
                } else {
                    self.bump();
                }
            }
            tracing::debug!(file = self.file, "heritage is not a plain type reference");
            return Ok(None);
        }

        Ok(segments.last().map(|s| s.to_string()))
    }

    fn parse_class_body(&mut self, body_start: usize) -> Result<Vec<ClassMember>> {
        let mut members = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon) {}
            if self.eat(TokenKind::RBrace) {
                return Ok(members);
            }
            if self.peek().is_none() {
                return Err(self.error_at(body_start, "unterminated class body"));
            }
            if let Some(member) = self.parse_member()? {
                members.push(member);
            }
        }
    }

    /// A modifier keyword followed by one of these is really a member name.
    fn is_name_terminator(token: Option<Token<'_>>) -> bool {
        token.map_or(true, |t| {
            matches!(
                t.kind,
                TokenKind::Colon
                    | TokenKind::LParen
                    | TokenKind::Eq
                    | TokenKind::Semicolon
                    | TokenKind::Question
                    | TokenKind::Bang
                    | TokenKind::Lt
                    | TokenKind::RBrace
            ) || t.newline_before
        })
    }

    fn parse_member(&mut self) -> Result<Option<ClassMember>> {
        let doc_comment = self.leading_doc();
        let decorators = self.parse_decorators()?;

        if self.at_ident("static") && self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::LBrace) {
            self.bump();
            self.skip_group()?;
            return Ok(None);
        }

        let mut modifiers = Modifiers::default();
        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Ident
                || !MEMBER_MODIFIERS.contains(&token.text)
                || Self::is_name_terminator(self.peek_nth(1))
            {
                break;
            }
            match token.text {
                "public" => modifiers.access = Some(AccessModifier::Public),
                "private" => modifiers.access = Some(AccessModifier::Private),
                "protected" => modifiers.access = Some(AccessModifier::Protected),
                "static" => modifiers.is_static = true,
                "readonly" => modifiers.is_readonly = true,
                "abstract" => modifiers.is_abstract = true,
                _ => {}
            }
            self.bump();
        }

        self.eat(TokenKind::Star);

        let mut kind = MemberKind::Property;
        if (self.at_ident("get") || self.at_ident("set")) && !Self::is_name_terminator(self.peek_nth(1)) {
            self.bump();
            kind = MemberKind::Accessor;
        } else if self.at_ident("constructor") && self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::LParen) {
            kind = MemberKind::Constructor;
        }

        let Some(token) = self.peek() else {
            return Err(self.error("expected class member"));
        };
        let name = match token.kind {
            TokenKind::Ident | TokenKind::Number => {
                self.bump();
                token.text.to_string()
            }
            TokenKind::String => {
                self.bump();
                unquote(token.text)
            }
            TokenKind::Hash => {
                self.bump();
                let ident = self.expect(TokenKind::Ident, "private name")?;
                modifiers.is_private_name = true;
                format!("#{}", ident.text)
            }
            TokenKind::LBracket => {
                let is_index = self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Ident)
                    && self.peek_nth(2).is_some_and(|t| t.kind == TokenKind::Colon);
                if is_index && kind == MemberKind::Property {
                    kind = MemberKind::IndexSignature;
                }
                let start = token.offset;
                self.skip_group()?;
                self.slice_from(start).to_string()
            }
            _ => return Err(self.error(format!("expected class member, found `{}`", token.text))),
        };

        if !self.eat(TokenKind::Question) {
            self.eat(TokenKind::Bang);
        }

        if self.at(TokenKind::Lt) || self.at(TokenKind::LParen) {
            if self.at(TokenKind::Lt) {
                self.skip_angle()?;
            }
            if !self.at(TokenKind::LParen) {
                return Err(self.error("expected parameter list"));
            }
            self.skip_group()?;
            if self.eat(TokenKind::Colon) {
                self.skip_type()?;
            }
            if self.at(TokenKind::LBrace) {
                self.skip_group()?;
            } else {
                self.eat(TokenKind::Semicolon);
            }
            if kind == MemberKind::Property {
                kind = MemberKind::Method;
            }
            return Ok(Some(ClassMember {
                kind,
                name,
                modifiers,
                decorators,
                doc_comment,
                type_annotation: None,
            }));
        }

        let type_annotation = if self.eat(TokenKind::Colon) {
            let start = self.offset();
            self.skip_type()?;
            Some(self.slice_from(start).to_string())
        } else {
            None
        };
        if self.eat(TokenKind::Eq) {
            self.skip_initializer()?;
        }
        self.eat(TokenKind::Semicolon);

        Ok(Some(ClassMember {
            kind,
            name,
            modifiers,
            decorators,
            doc_comment,
            type_annotation,
        }))
    }

    // -- types and initializers -----------------------------------------------

    fn at_operator(&self, op: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Operator && t.text == op)
    }

    fn skip_type(&mut self) -> Result<()> {
        if self.at_operator("|") || self.at_operator("&") {
            self.bump();
        }
        loop {
            self.skip_type_primary()?;
            while self.at(TokenKind::LBracket) && !self.peek().is_some_and(|t| t.newline_before) {
                self.skip_group()?;
            }
            if self.at_operator("|") || self.at_operator("&") || self.at(TokenKind::Arrow) {
                self.bump();
                continue;
            }
            return Ok(());
        }
    }

    fn skip_type_primary(&mut self) -> Result<()> {
        let Some(token) = self.peek() else {
            return Err(self.error("expected type"));
        };
        match token.kind {
            TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => self.skip_group(),
            TokenKind::Lt => {
                self.skip_angle()?;
                if self.at(TokenKind::LParen) {
                    self.skip_group()?;
                }
                Ok(())
            }
            TokenKind::Ident => {
                self.bump();
                if matches!(
                    token.text,
                    "keyof" | "typeof" | "readonly" | "unique" | "infer" | "new" | "asserts"
                ) {
                    return self.skip_type_primary();
                }
                while self.eat(TokenKind::Dot) {
                    self.expect(TokenKind::Ident, "type name")?;
                }
                if self.at(TokenKind::Lt) {
                    self.skip_angle()?;
                }
                if self.at_ident("is") {
                    self.bump();
                    return self.skip_type_primary();
                }
                Ok(())
            }
            TokenKind::String | TokenKind::Number | TokenKind::Template => {
                self.bump();
                Ok(())
            }
            TokenKind::Operator if token.text == "-" => {
                self.bump();
                self.skip_type_primary()
            }
            _ => Err(self.error(format!("expected type, found `{}`", token.text))),
        }
    }

    /// Skip a property initializer up to `;`, the end of the class body, or a
    /// line break after a complete expression.
    fn skip_initializer(&mut self) -> Result<()> {
        let mut can_end = false;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Semicolon | TokenKind::RBrace => return Ok(()),
                _ if token.newline_before && can_end && !is_continuation(&token) => return Ok(()),
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    self.skip_group()?;
                    can_end = true;
                }
                TokenKind::RParen | TokenKind::RBracket => {
                    return Err(self.error(format!("unexpected `{}`", token.text)));
                }
                _ => {
                    self.bump();
                    can_end = match token.kind {
                        TokenKind::Ident => !PREFIX_WORDS.contains(&token.text),
                        TokenKind::Number
                        | TokenKind::String
                        | TokenKind::Template
                        | TokenKind::Regex
                        | TokenKind::Bang => true,
                        _ => false,
                    };
                }
            }
        }
        Ok(())
    }
}

fn closer_of(kind: TokenKind) -> TokenKind {
    match kind {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBracket => TokenKind::RBracket,
        _ => TokenKind::RBrace,
    }
}

/// A token on a new line that still belongs to the previous expression.
fn is_continuation(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Dot
        | TokenKind::OptionalDot
        | TokenKind::Arrow
        | TokenKind::Operator
        | TokenKind::Question
        | TokenKind::Colon
        | TokenKind::Eq
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Comma
        | TokenKind::LParen => true,
        TokenKind::Ident => matches!(token.text, "as" | "satisfies" | "instanceof" | "in"),
        _ => false,
    }
}

/// Strip quotes from a string or template literal and resolve simple escapes.
fn unquote(literal: &str) -> String {
    let inner = if literal.len() >= 2 {
        &literal[1..literal.len() - 1]
    } else {
        literal
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
