use clsview_api::{NavigationTarget, OriginDeclaration, Parameter, TypeRef};
use clsview_core::{
    ClassProjection, FieldProjection, HierarchicalSignature, LightMember, MethodProjection,
    SyntheticMethod,
};
use std::sync::Arc;
use tabled::Tabled;

/// One row per class in `list` output.
#[derive(Tabled)]
pub struct ClassRow {
    pub kind: String,
    pub name: String,
    pub methods: usize,
    pub fields: usize,
    pub origin: String,
}

impl ClassRow {
    pub fn from_class(class: &ClassProjection) -> Self {
        let kind = if class.is_annotation_type() {
            "annotation"
        } else if class.is_interface() {
            "interface"
        } else if class.is_enum() {
            "enum"
        } else {
            "class"
        };
        Self {
            kind: kind.to_string(),
            name: shorten_fqn(class.fq_name().as_str()),
            methods: class.methods().len(),
            fields: class.fields().len(),
            origin: class
                .origin()
                .map(|o| location(&o.navigation_target()))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// One row per member in `inspect` output.
#[derive(Tabled)]
pub struct MemberRow {
    pub kind: String,
    pub signature: String,
    pub origin: String,
    pub flags: String,
}

impl MemberRow {
    pub fn from_method(method: &MethodProjection) -> Self {
        let mut flags = Vec::new();
        if method.is_mangled() {
            flags.push("mangled");
        }
        if method.is_deprecated() {
            flags.push("deprecated");
        }
        Self {
            kind: if method.is_constructor() {
                "constructor"
            } else {
                "method"
            }
            .to_string(),
            signature: method_text(
                &method.modifiers().to_string(),
                method.return_type(),
                method.name(),
                method.parameters(),
            ),
            origin: origin_text(method.origin()),
            flags: join_flags(&flags),
        }
    }

    pub fn from_field(field: &FieldProjection) -> Self {
        let mut signature = format!("{} {} {}", field.modifiers(), field.field_type(), field.name());
        if let Some(value) = field.compute_constant_value() {
            signature.push_str(&format!(" = {value}"));
        }
        let flags: &[&str] = if field.is_deprecated() {
            &["deprecated"]
        } else {
            &[]
        };
        Self {
            kind: if field.is_enum_constant() {
                "enum constant"
            } else {
                "field"
            }
            .to_string(),
            signature: signature.trim_start().to_string(),
            origin: origin_text(field.origin()),
            flags: join_flags(flags),
        }
    }

    pub fn from_synthetic(method: &SyntheticMethod) -> Self {
        Self {
            kind: "synthetic".to_string(),
            signature: method_text(
                &method.modifiers().to_string(),
                method.return_type(),
                method.name(),
                method.parameters(),
            ),
            origin: "-".to_string(),
            flags: "enum".to_string(),
        }
    }

    pub fn from_inner_class(class: &Arc<ClassProjection>) -> Self {
        Self {
            kind: "inner class".to_string(),
            signature: class.fq_name().to_string(),
            origin: origin_text(class.origin().cloned()),
            flags: if class.is_enum() { "enum" } else { "-" }.to_string(),
        }
    }
}

/// One row per signature in `inspect --inherited` output.
#[derive(Tabled)]
pub struct SignatureRow {
    pub signature: String,
    pub declared_in: String,
    pub overrides: String,
}

impl SignatureRow {
    pub fn from_signature(signature: &HierarchicalSignature) -> Self {
        let owner = |m: &MethodProjection| {
            m.containing_class()
                .map(|c| shorten_fqn(c.fq_name().as_str()))
                .unwrap_or_else(|| "-".to_string())
        };
        let overrides: Vec<String> = signature.super_methods.iter().map(|m| owner(&**m)).collect();
        Self {
            signature: signature.signature.to_string(),
            declared_in: owner(&*signature.method),
            overrides: if overrides.is_empty() {
                "-".to_string()
            } else {
                overrides.join(", ")
            },
        }
    }
}

fn method_text(
    modifiers: &str,
    return_type: Option<&TypeRef>,
    name: &str,
    parameters: &[Parameter],
) -> String {
    let params: Vec<String> = parameters
        .iter()
        .map(|p| format!("{} {}", p.type_ref, p.name))
        .collect();
    let mut text = String::new();
    if !modifiers.is_empty() {
        text.push_str(modifiers);
        text.push(' ');
    }
    if let Some(ret) = return_type {
        text.push_str(&format!("{ret} "));
    }
    text.push_str(&format!("{name}({})", params.join(", ")));
    text
}

fn origin_text(origin: Option<Arc<dyn OriginDeclaration>>) -> String {
    origin
        .map(|o| location(&o.navigation_target()))
        .unwrap_or_else(|| "-".to_string())
}

fn location(target: &NavigationTarget) -> String {
    let file = target
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("-");
    match target.range {
        Some(range) => format!("{file}@{}", range.start),
        None => file.to_string(),
    }
}

fn join_flags(flags: &[&str]) -> String {
    if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(",")
    }
}

pub fn shorten_fqn(fqn: &str) -> String {
    let parts: Vec<&str> = fqn.split('.').collect();
    if parts.len() <= 2 {
        return fqn.to_string();
    }
    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i < parts.len() - 2 {
            if let Some(c) = part.chars().next() {
                result.push(c);
                result.push('.');
            }
        } else {
            result.push_str(part);
            if i < parts.len() - 1 {
                result.push('.');
            }
        }
    }
    result
}
