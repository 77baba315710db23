//! Inheritance resolver: flattens a class and its ancestors into one API.

use super::registry::ClassRegistry;
use crate::config::OverridePolicy;
use crate::error::{DocError, Result};
use crate::model::ApiDetails;
use std::collections::HashMap;

/// Resolves flattened APIs against a registry, memoizing per analysis.
pub struct InheritanceResolver<'r> {
    registry: &'r ClassRegistry,
    policy: OverridePolicy,
    cache: HashMap<String, ApiDetails>,
    /// Classes currently being resolved, outermost first.
    in_progress: Vec<String>,
}

impl<'r> InheritanceResolver<'r> {
    pub fn new(registry: &'r ClassRegistry, policy: OverridePolicy) -> Self {
        Self {
            registry,
            policy,
            cache: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    /// Own public members of `class_name` followed by its ancestors'.
    ///
    /// An unknown class resolves to an empty API. A class that reaches
    /// itself through `extends` is a [`DocError::CyclicInheritance`].
    pub fn resolve(&mut self, class_name: &str) -> Result<ApiDetails> {
        if let Some(api) = self.cache.get(class_name) {
            return Ok(api.clone());
        }
        let registry = self.registry;
        let Some(class) = registry.get(class_name) else {
            tracing::debug!(class = class_name, "ancestor not found, using empty API");
            return Ok(ApiDetails::default());
        };
        if let Some(start) = self.in_progress.iter().position(|n| n == class_name) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(class_name.to_string());
            return Err(DocError::CyclicInheritance { chain });
        }

        let mut api = ApiDetails {
            properties: class.own_properties.clone(),
            methods: class.own_methods.clone(),
        };

        if let Some(parent) = class.extends_name.as_deref() {
            tracing::trace!(class = class_name, parent, "resolving ancestor");
            self.in_progress.push(class_name.to_string());
            let inherited = self.resolve(parent);
            self.in_progress.pop();
            append_inherited(&mut api, inherited?, self.policy);
        }

        self.cache.insert(class_name.to_string(), api.clone());
        Ok(api)
    }
}

fn append_inherited(api: &mut ApiDetails, inherited: ApiDetails, policy: OverridePolicy) {
    match policy {
        OverridePolicy::Concatenate => {
            api.properties.extend(inherited.properties);
            api.methods.extend(inherited.methods);
        }
        OverridePolicy::ChildWins => {
            for property in inherited.properties {
                if !api.properties.iter().any(|p| p.name == property.name) {
                    api.properties.push(property);
                }
            }
            for method in inherited.methods {
                if !api.methods.iter().any(|m| m.display_name == method.display_name) {
                    api.methods.push(method);
                }
            }
        }
    }
}
