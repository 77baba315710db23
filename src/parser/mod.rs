//! Documentation engine: registry, resolver and assembler.
//!
//! [`SourceParser`] turns a parsed [`Program`] into
//! [`ProjectSourceDocumentation`]. Each call builds its own registry, so
//! independent analyses never share state.

pub mod members;
pub mod registry;
pub mod resolve;
pub mod tags;

use crate::config::Options;
use crate::error::Result;
use crate::model::{ProjectSourceDocumentation, RawClassInfo, SourceDoc};
use crate::syntax::Program;
use registry::ClassRegistry;
use resolve::InheritanceResolver;

/// Analyzes one program under one set of options.
pub struct SourceParser<'p> {
    options: Options,
    program: &'p Program,
}

impl<'p> SourceParser<'p> {
    pub fn new(options: Options, program: &'p Program) -> Self {
        Self { options, program }
    }

    /// Documented components with their flattened API, plus every other
    /// class of the included files.
    pub fn project_source_documentation(&self) -> Result<ProjectSourceDocumentation> {
        let registry = ClassRegistry::build(self.program, &self.options);
        let mut resolver = InheritanceResolver::new(&registry, self.options.override_policy);
        let mut docs = ProjectSourceDocumentation::default();

        for class in registry.classes() {
            if class.is_documented_component {
                let doc = source_doc(class, &registry, &mut resolver)?;
                docs.classes_with_docs.push(doc);
            } else {
                docs.other_classes.insert(class.name.clone(), class.clone());
            }
        }

        tracing::debug!(
            documented = docs.classes_with_docs.len(),
            other = docs.other_classes.len(),
            "documentation assembled"
        );
        Ok(docs)
    }
}

/// Analyze `program` with default options.
pub fn build(program: &Program) -> Result<ProjectSourceDocumentation> {
    SourceParser::new(Options::default(), program).project_source_documentation()
}

fn source_doc(
    class: &RawClassInfo,
    registry: &ClassRegistry,
    resolver: &mut InheritanceResolver<'_>,
) -> Result<SourceDoc> {
    Ok(SourceDoc {
        component_ref_name: class.name.clone(),
        component_doc_name: class.doc_tags.component().unwrap_or_default().to_string(),
        group_doc_name: class.doc_tags.group().unwrap_or_default().to_string(),
        description: class.doc_tags.description.clone(),
        file_name: class.file_name.clone(),
        selector: class.registration.as_ref().and_then(|r| r.selector.clone()),
        module_details: registry.module_for(&class.name).cloned(),
        extend_classes: class.extends_name.iter().cloned().collect(),
        api_details: resolver.resolve(&class.name)?,
    })
}
