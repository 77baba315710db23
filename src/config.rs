//! Analysis options.

/// What to do when a class redeclares a member its ancestor also declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverridePolicy {
    /// Keep every level's members; the ancestor's copy follows the child's.
    #[default]
    Concatenate,
    /// Drop ancestor members whose name the subclass already lists.
    ChildWins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Directory file names are reported relative to.
    pub root_dir: String,
    /// Files to analyze; empty means every file of the program.
    pub files: Vec<String>,
    /// Decorators that register a documentable view component.
    pub component_decorators: Vec<String>,
    /// Decorators that register a module with a `declarations` list.
    pub module_decorators: Vec<String>,
    pub override_policy: OverridePolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_dir: "./".to_string(),
            files: Vec::new(),
            component_decorators: vec!["Component".to_string()],
            module_decorators: vec!["NgModule".to_string()],
            override_policy: OverridePolicy::default(),
        }
    }
}

impl Options {
    pub fn is_component_decorator(&self, name: &str) -> bool {
        self.component_decorators.iter().any(|d| d == name)
    }

    pub fn is_module_decorator(&self, name: &str) -> bool {
        self.module_decorators.iter().any(|d| d == name)
    }

    /// Whether a program file takes part in the analysis.
    pub fn includes(&self, file_name: &str) -> bool {
        if self.files.is_empty() {
            return true;
        }
        let wanted = self.relative_name(file_name);
        self.files.iter().any(|f| self.relative_name(f) == wanted)
    }

    /// `file_name` with `./` and the root directory stripped, `/`-separated.
    pub fn relative_name(&self, file_name: &str) -> String {
        let normalized = file_name.replace('\\', "/");
        let root = self.root_dir.replace('\\', "/");
        let root = root.trim_start_matches("./").trim_end_matches('/');
        let name = normalized.trim_start_matches("./");
        if root.is_empty() || root == "." {
            return name.to_string();
        }
        name.strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(name)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_recognize_angular_decorators() {
        let options = Options::default();
        assert!(options.is_component_decorator("Component"));
        assert!(options.is_module_decorator("NgModule"));
        assert!(!options.is_component_decorator("Directive"));
    }

    #[test]
    fn empty_file_list_includes_everything() {
        assert!(Options::default().includes("anything.ts"));
    }

    #[test]
    fn file_list_filters_relative_to_root() {
        let options = Options {
            root_dir: "./src/app".to_string(),
            files: vec!["button/button.component.ts".to_string()],
            ..Default::default()
        };
        assert!(options.includes("src/app/button/button.component.ts"));
        assert!(options.includes("./src/app/button/button.component.ts"));
        assert!(!options.includes("src/app/card/card.component.ts"));
    }

    #[test]
    fn relative_name_with_default_root() {
        let options = Options::default();
        assert_eq!(options.relative_name("./foobar.component.ts"), "foobar.component.ts");
        assert_eq!(options.relative_name("foobar.component.ts"), "foobar.component.ts");
    }
}
