//! uijar: API documentation extracted from Angular-style TypeScript
//! component sources.
//!
//! ```no_run
//! let program = uijar::Program::parse([("button.component.ts", "class Button {}")])?;
//! let docs = uijar::build(&program)?;
//! # Ok::<(), uijar::DocError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod nav;
pub mod parser;
pub mod render;
pub mod syntax;

pub use config::{Options, OverridePolicy};
pub use error::{DocError, Result};
pub use model::{
    ApiDetails, MethodInfo, ModuleInfo, ProjectSourceDocumentation, PropertyInfo, RawClassInfo,
    SourceDoc,
};
pub use parser::{build, SourceParser};
pub use syntax::Program;
