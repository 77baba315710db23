use uijar::{Options, Program, ProjectSourceDocumentation, SourceParser};

const SOURCE_FILES: &[&str] = &[
    "foobar.component.ts",
    "foobar.module.ts",
    "foobar.component.test.ts",
    "child.component.ts",
    "parent.component.ts",
    "child-generic.component.ts",
    "parent-generic.component.ts",
];

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(path).unwrap()
}

fn documentation() -> ProjectSourceDocumentation {
    let program = Program::parse(SOURCE_FILES.iter().map(|name| (*name, fixture(name)))).unwrap();
    let options = Options {
        root_dir: "./".to_string(),
        files: SOURCE_FILES.iter().map(|f| f.to_string()).collect(),
        ..Default::default()
    };
    SourceParser::new(options, &program)
        .project_source_documentation()
        .unwrap()
}

fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
    items.iter().map(name).collect()
}

#[test]
fn finds_documented_components() {
    let docs = documentation();
    assert_eq!(docs.classes_with_docs.len(), 3);
    assert_eq!(
        names(&docs.classes_with_docs, |d| d.component_ref_name.as_str()),
        vec!["FoobarComponent", "ChildComponent", "ChildGenericComponent"]
    );
}

#[test]
fn foobar_identity() {
    let docs = documentation();
    let foobar = &docs.classes_with_docs[0];
    assert_eq!(foobar.component_ref_name, "FoobarComponent");
    assert_eq!(foobar.component_doc_name, "Foobar");
    assert_eq!(foobar.group_doc_name, "Layout");
    assert_eq!(
        foobar.description,
        "It's possible to use <strong>html</strong> in \nthe description"
    );
    assert_eq!(foobar.file_name, "foobar.component.ts");
    assert_eq!(foobar.selector.as_deref(), Some("x-foobar"));
}

#[test]
fn foobar_module_details() {
    let docs = documentation();
    let module = docs.classes_with_docs[0].module_details.as_ref().unwrap();
    assert_eq!(module.module_ref_name, "FoobarModule");
    assert_eq!(module.file_name, "foobar.module.ts");
    assert!(docs.classes_with_docs[1].module_details.is_none());
}

#[test]
fn foobar_public_properties() {
    let docs = documentation();
    let properties = &docs.classes_with_docs[0].api_details.properties;
    assert_eq!(
        names(properties, |p| p.name.as_str()),
        vec!["title", "options", "changed", "isSmall", "propertyWithDescription"]
    );
    assert_eq!(properties[0].declared_type, "string");
    assert_eq!(properties[1].decorator_names, vec!["@Input()"]);
    assert_eq!(properties[2].decorator_names, vec!["@Output()"]);
    assert_eq!(
        properties[3].decorator_names,
        vec!["@HostBinding('class.small')", "@Input()"]
    );
    assert_eq!(properties[4].declared_type, "number");
    assert_eq!(
        properties[4].description,
        "Description to property should be parsed"
    );
}

#[test]
fn foobar_public_methods() {
    let docs = documentation();
    let methods = &docs.classes_with_docs[0].api_details.methods;
    assert_eq!(
        names(methods, |m| m.display_name.as_str()),
        vec![
            "publicMethod()",
            "methodWithPublicModifierShouldBeVisibleInParse()",
            "publicMethodWithDescription()",
        ]
    );
    assert_eq!(methods[0].description, "");
    assert_eq!(methods[1].description, "");
    assert_eq!(methods[2].description, "Description to method should be parsed");
}

#[test]
fn extend_classes() {
    let docs = documentation();
    assert!(docs.classes_with_docs[0].extend_classes.is_empty());
    assert_eq!(docs.classes_with_docs[1].extend_classes, vec!["ParentComponent"]);
    assert_eq!(
        docs.classes_with_docs[2].extend_classes,
        vec!["ParentGenericComponent"]
    );

    let parent = docs.other_class("ParentComponent").unwrap();
    assert_eq!(parent.extends_name.as_deref(), Some("BaseComponent"));
    let parent_generic = docs.other_class("ParentGenericComponent").unwrap();
    assert_eq!(parent_generic.extends_name, None);
}

#[test]
fn other_classes_in_discovery_order() {
    let docs = documentation();
    assert_eq!(
        docs.other_classes.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "FoobarModule",
            "BaseComponent",
            "ParentComponent",
            "ParentGenericComponent",
        ]
    );
    assert_eq!(
        docs.other_classes.get_index(2).map(|(_, c)| c.file_name.as_str()),
        Some("parent.component.ts")
    );
}

#[test]
fn child_inherits_properties() {
    let docs = documentation();
    let properties = &docs.classes_with_docs[1].api_details.properties;
    assert_eq!(
        names(properties, |p| p.name.as_str()),
        vec!["childTitle", "childOptions", "childIsSmall", "parentTitle", "baseId"]
    );
    assert_eq!(properties[0].declared_type, "string");
    assert_eq!(properties[1].decorator_names, vec!["@Input()"]);
    assert_eq!(
        properties[2].decorator_names,
        vec!["@HostBinding('class.small')", "@Input()"]
    );
    assert_eq!(properties[3].declared_type, "string");
    assert_eq!(properties[3].description, "Parent property description");
    assert_eq!(properties[4].declared_type, "number");
    assert_eq!(properties[4].description, "Base id description");
}

#[test]
fn child_inherits_methods() {
    let docs = documentation();
    let methods = &docs.classes_with_docs[1].api_details.methods;
    assert_eq!(
        names(methods, |m| m.display_name.as_str()),
        vec![
            "publicChildMethod()",
            "childMethodWithPublicModifierShouldBeVisibleInParse()",
            "publicParentMethod()",
            "publicParentMethodWithDescription()",
            "publicBaseMethod()",
        ]
    );
    assert_eq!(methods[0].description, "");
    assert_eq!(methods[1].description, "Description to method should be parsed");
    assert_eq!(methods[2].description, "");
    assert_eq!(methods[3].description, "Parent method description");
    assert_eq!(methods[4].description, "");
}

#[test]
fn generic_child_inherits_unsubstituted_types() {
    let docs = documentation();
    let api = &docs.classes_with_docs[2].api_details;
    assert_eq!(
        names(&api.properties, |p| p.name.as_str()),
        vec!["childTitle", "childOptions", "childIsSmall", "parentTitle", "parentType"]
    );
    assert_eq!(api.properties[3].description, "Parent property description");
    assert_eq!(api.properties[4].declared_type, "T");
    assert_eq!(api.properties[4].description, "");

    assert_eq!(
        names(&api.methods, |m| m.display_name.as_str()),
        vec![
            "publicChildMethod()",
            "childMethodWithPublicModifierShouldBeVisibleInParse()",
            "publicParentMethod()",
            "publicParentMethodWithDescription()",
        ]
    );
    assert_eq!(api.methods[3].description, "Parent method description");
}

#[test]
fn file_list_excludes_unlisted_files() {
    let program = Program::parse(SOURCE_FILES.iter().map(|name| (*name, fixture(name)))).unwrap();
    let options = Options {
        files: vec!["foobar.component.ts".to_string()],
        ..Default::default()
    };
    let docs = SourceParser::new(options, &program)
        .project_source_documentation()
        .unwrap();
    assert_eq!(docs.classes_with_docs.len(), 1);
    assert!(docs.classes_with_docs[0].module_details.is_none());
    assert!(docs.other_classes.is_empty());
}

#[test]
fn repeated_analysis_is_identical() {
    assert_eq!(documentation(), documentation());
}
