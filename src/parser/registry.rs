//! Class registry: every top-level class of the analyzed files, plus the
//! module-registration classes indexed by the names they declare.

use super::members::classify;
use super::tags::parse_tag_block;
use crate::config::Options;
use crate::model::{ModuleInfo, RawClassInfo, RegistrationConfig};
use crate::syntax::{ClassDecl, Decorator, Expr, Program};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Read-only lookup tables built once per analysis.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: IndexMap<String, RawClassInfo>,
    modules: Vec<ModuleInfo>,
    /// Declared class name → index of the first module declaring it.
    module_index: HashMap<String, usize>,
}

impl ClassRegistry {
    /// Walk every included file of `program` in order.
    pub fn build(program: &Program, options: &Options) -> Self {
        let mut registry = Self::default();

        for file in program.files() {
            if !options.includes(&file.name) {
                tracing::trace!(file = %file.name, "not in file list");
                continue;
            }
            let file_name = options.relative_name(&file.name);

            for class in &file.classes {
                if let Some(existing) = registry.classes.get(&class.name) {
                    tracing::warn!(
                        class = %class.name,
                        file = %file_name,
                        line = class.line,
                        first = %existing.file_name,
                        "duplicate class name, keeping the first declaration"
                    );
                    continue;
                }
                if let Some(module) = module_info(&file_name, class, options) {
                    registry.add_module(module);
                }
                let info = raw_class_info(&file_name, class, options);
                registry.classes.insert(info.name.clone(), info);
            }
        }

        tracing::debug!(
            classes = registry.classes.len(),
            modules = registry.modules.len(),
            "class registry built"
        );
        registry
    }

    fn add_module(&mut self, module: ModuleInfo) {
        let index = self.modules.len();
        for name in &module.declared_component_names {
            self.module_index.entry(name.clone()).or_insert(index);
        }
        self.modules.push(module);
    }

    pub fn get(&self, name: &str) -> Option<&RawClassInfo> {
        self.classes.get(name)
    }

    /// Classes in discovery order.
    pub fn classes(&self) -> impl Iterator<Item = &RawClassInfo> {
        self.classes.values()
    }

    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    /// First module whose `declarations` list names `class_name`.
    pub fn module_for(&self, class_name: &str) -> Option<&ModuleInfo> {
        self.module_index
            .get(class_name)
            .and_then(|&i| self.modules.get(i))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn raw_class_info(file_name: &str, class: &ClassDecl, options: &Options) -> RawClassInfo {
    let members = classify(class);
    let doc_tags = parse_tag_block(class.doc_comment.as_deref());
    let registration = registration(class, options);

    let is_documented_component = registration.is_some() && doc_tags.component().is_some();
    if registration.is_some() && !is_documented_component {
        tracing::debug!(class = %class.name, "component has no @component tag");
    }

    RawClassInfo {
        name: class.name.clone(),
        file_name: file_name.to_string(),
        is_documented_component,
        extends_name: class.extends.clone(),
        own_properties: members.properties,
        own_methods: members.methods,
        doc_tags,
        registration,
    }
}

/// Component-registration config, when the decorator argument is an object
/// literal. A non-literal `selector` is left unset.
fn registration(class: &ClassDecl, options: &Options) -> Option<RegistrationConfig> {
    let decorator = find_decorator(&class.decorators, |n| options.is_component_decorator(n))?;
    let Some(config) = decorator.first_arg().filter(|arg| arg.is_object()) else {
        tracing::debug!(
            class = %class.name,
            decorator = %decorator.text,
            "component configuration is not an object literal"
        );
        return None;
    };

    let selector = config.field("selector").and_then(Expr::as_str);
    if selector.is_none() {
        tracing::debug!(class = %class.name, "selector is not a string literal");
    }

    Some(RegistrationConfig {
        decorator_name: decorator.name.clone(),
        selector: selector.map(str::to_string),
    })
}

fn module_info(file_name: &str, class: &ClassDecl, options: &Options) -> Option<ModuleInfo> {
    let decorator = find_decorator(&class.decorators, |n| options.is_module_decorator(n))?;
    let declarations = decorator
        .first_arg()
        .and_then(|config| config.field("declarations"))
        .and_then(Expr::as_array)?;

    Some(ModuleInfo {
        module_ref_name: class.name.clone(),
        file_name: file_name.to_string(),
        declared_component_names: declarations
            .iter()
            .filter_map(Expr::as_ident)
            .map(str::to_string)
            .collect(),
    })
}

fn find_decorator<'d>(decorators: &'d [Decorator], matches: impl Fn(&str) -> bool) -> Option<&'d Decorator> {
    decorators.iter().find(|d| matches(&d.name))
}
