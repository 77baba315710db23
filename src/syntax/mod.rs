//! Syntax layer: turns TypeScript source text into the declaration model the
//! documentation engine walks.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use parser::parse_source;

use crate::error::Result;

/// An immutable set of parsed source files, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    files: Vec<SourceFile>,
}

impl Program {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Parse every `(file_name, source_text)` pair, failing on the first
    /// file that is not structurally valid.
    pub fn parse<I, N, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let files = sources
            .into_iter()
            .map(|(name, text)| parse_source(name.as_ref(), text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { files })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }
}
