//! Documentation model produced by the engine, independent of output format.

use indexmap::IndexMap;
use serde::Serialize;

/// Member visibility as written in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    /// No access modifier.
    #[default]
    Default,
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Unmarked and `public` members are part of the documented API.
    pub fn is_documented(self) -> bool {
        matches!(self, Visibility::Default | Visibility::Public)
    }
}

/// A public property of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    #[serde(rename = "propertyName")]
    pub name: String,
    /// Type as written in the declaring class, empty without annotation.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Decorator texts, top of the stack first.
    pub decorator_names: Vec<String>,
    pub description: String,
    #[serde(skip)]
    pub visibility: Visibility,
}

/// A public method of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    /// `name()`; parameters and return type are not shown.
    #[serde(rename = "methodName")]
    pub display_name: String,
    pub description: String,
    #[serde(skip)]
    pub visibility: Visibility,
    pub decorator_names: Vec<String>,
}

/// Tags read from the doc block in front of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTags {
    /// Recognized `@tag value` lines (`group`, `component`), in source order.
    pub tags: IndexMap<String, String>,
    /// Body of `@description`, empty when absent.
    pub description: String,
}

impl CommentTags {
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).map(String::as_str)
    }

    /// `@group`
    pub fn group(&self) -> Option<&str> {
        self.get("group")
    }

    /// `@component`
    pub fn component(&self) -> Option<&str> {
        self.get("component")
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.description.is_empty()
    }
}

/// Configuration captured from a component-registration decorator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationConfig {
    pub decorator_name: String,
    /// `selector` when it is a string literal.
    pub selector: Option<String>,
}

/// Everything the registry knows about one class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassInfo {
    pub name: String,
    pub file_name: String,
    pub is_documented_component: bool,
    /// Bare name of the direct base class, type arguments dropped.
    pub extends_name: Option<String>,
    pub own_properties: Vec<PropertyInfo>,
    pub own_methods: Vec<MethodInfo>,
    pub doc_tags: CommentTags,
    pub registration: Option<RegistrationConfig>,
}

/// A module-registration class and the classes it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub module_ref_name: String,
    pub file_name: String,
    #[serde(skip)]
    pub declared_component_names: Vec<String>,
}

impl ModuleInfo {
    pub fn declares(&self, class_name: &str) -> bool {
        self.declared_component_names.iter().any(|n| n == class_name)
    }
}

/// Flattened public API: own members first, then each ancestor's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiDetails {
    pub properties: Vec<PropertyInfo>,
    pub methods: Vec<MethodInfo>,
}

impl ApiDetails {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }
}

/// Final documentation record of one documented component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDoc {
    pub component_ref_name: String,
    /// `@component`
    pub component_doc_name: String,
    /// `@group`
    pub group_doc_name: String,
    /// `@description`, markup preserved.
    pub description: String,
    pub file_name: String,
    pub selector: Option<String>,
    pub module_details: Option<ModuleInfo>,
    /// Direct parent only; at most one entry.
    pub extend_classes: Vec<String>,
    pub api_details: ApiDetails,
}

/// Result of analyzing one program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSourceDocumentation {
    /// Documented components in discovery order.
    pub classes_with_docs: Vec<SourceDoc>,
    /// Every other class, keyed by name, in discovery order.
    pub other_classes: IndexMap<String, RawClassInfo>,
}

impl ProjectSourceDocumentation {
    pub fn component(&self, ref_name: &str) -> Option<&SourceDoc> {
        self.classes_with_docs
            .iter()
            .find(|doc| doc.component_ref_name == ref_name)
    }

    pub fn other_class(&self, name: &str) -> Option<&RawClassInfo> {
        self.other_classes.get(name)
    }
}
