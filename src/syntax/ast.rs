//! Declaration-level syntax model of a TypeScript source file.

/// One parsed source file: its name and top-level class declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub name: String,
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    /// 1-based line of the first token of the declaration.
    pub line: usize,
    /// Raw text of the doc block directly preceding the declaration.
    pub doc_comment: Option<String>,
    pub decorators: Vec<Decorator>,
    /// Last segment of a plain `extends` reference, type arguments dropped
    /// (`extends ns.Base<T>` gives `Base`).
    pub extends: Option<String>,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Last segment of the callee (`Component` for `@core.Component`).
    pub name: String,
    /// Exact source text, `@` and arguments included.
    pub text: String,
    pub args: Vec<Expr>,
}

impl Decorator {
    pub fn first_arg(&self) -> Option<&Expr> {
        self.args.first()
    }
}

/// Syntactic view of a decorator argument. Only literals are structured;
/// anything else is kept as its source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Ident(String),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Other(String),
}

impl Expr {
    /// Field of an object literal, first occurrence.
    pub fn field(&self, key: &str) -> Option<&Expr> {
        match self {
            Expr::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Expr]> {
        match self {
            Expr::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Expr::Object(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    Accessor,
    Constructor,
    IndexSignature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub access: Option<AccessModifier>,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_abstract: bool,
    /// ECMAScript `#name` member.
    pub is_private_name: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub kind: MemberKind,
    pub name: String,
    pub modifiers: Modifiers,
    pub decorators: Vec<Decorator>,
    pub doc_comment: Option<String>,
    /// Declared type of a property as written.
    pub type_annotation: Option<String>,
}
