//! Member classifier: the public properties and methods of a class body.

use super::tags::member_description;
use crate::model::{MethodInfo, PropertyInfo, Visibility};
use crate::syntax::{AccessModifier, ClassDecl, ClassMember, MemberKind, Modifiers};

/// Public members of one class, in declaration order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassMembers {
    pub properties: Vec<PropertyInfo>,
    pub methods: Vec<MethodInfo>,
}

/// Collect the documented properties and methods of `class`.
///
/// Private, protected and `#private` members are dropped. Constructors,
/// accessors and index signatures are neither properties nor methods.
pub fn classify(class: &ClassDecl) -> ClassMembers {
    let mut members = ClassMembers::default();

    for member in &class.members {
        let visibility = visibility(&member.modifiers);
        if !visibility.is_documented() {
            continue;
        }
        match member.kind {
            MemberKind::Property => members.properties.push(PropertyInfo {
                name: member.name.clone(),
                declared_type: member.type_annotation.clone().unwrap_or_default(),
                decorator_names: decorator_names(member),
                description: member_description(member.doc_comment.as_deref()),
                visibility,
            }),
            MemberKind::Method => members.methods.push(MethodInfo {
                display_name: format!("{}()", member.name),
                description: member_description(member.doc_comment.as_deref()),
                visibility,
                decorator_names: decorator_names(member),
            }),
            MemberKind::Accessor | MemberKind::Constructor | MemberKind::IndexSignature => {}
        }
    }

    members
}

fn visibility(modifiers: &Modifiers) -> Visibility {
    if modifiers.is_private_name {
        return Visibility::Private;
    }
    match modifiers.access {
        None => Visibility::Default,
        Some(AccessModifier::Public) => Visibility::Public,
        Some(AccessModifier::Protected) => Visibility::Protected,
        Some(AccessModifier::Private) => Visibility::Private,
    }
}

fn decorator_names(member: &ClassMember) -> Vec<String> {
    member.decorators.iter().map(|d| d.text.clone()).collect()
}
