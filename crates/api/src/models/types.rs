use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeRef {
    /// Unresolved or primitive type name (e.g., "int", "void", "List<T>")
    Raw(String),

    /// Resolved reference to a type by FQN
    Id(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    #[default]
    Unknown,
}

impl TypeRef {
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn array_of(element: TypeRef) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element,
                dimensions: dimensions + 1,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions: 1,
            },
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Raw(s) if s == "void")
    }

    /// The erased, textual form used to compare signatures: type arguments are
    /// dropped and `Raw`/`Id` spellings of the same name compare equal.
    pub fn erasure(&self) -> String {
        match self {
            TypeRef::Raw(s) | TypeRef::Id(s) => match s.find('<') {
                Some(idx) => s[..idx].to_string(),
                None => s.clone(),
            },
            TypeRef::Generic { base, .. } => base.erasure(),
            TypeRef::Array {
                element,
                dimensions,
            } => format!("{}{}", element.erasure(), "[]".repeat(*dimensions)),
            TypeRef::Wildcard { bound, .. } => bound
                .as_ref()
                .map(|b| b.erasure())
                .unwrap_or_else(|| "java.lang.Object".to_string()),
            TypeRef::Unknown => "?".to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(s) | TypeRef::Id(s) => f.write_str(s),
            TypeRef::Generic { base, args } => {
                write!(f, "{base}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => write!(f, "{}{}", element, "[]".repeat(*dimensions)),
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound,
            } => {
                let keyword = if *is_upper_bound { "extends" } else { "super" };
                write!(f, "? {keyword} {bound}")
            }
            TypeRef::Wildcard { bound: None, .. } => f.write_str("?"),
            TypeRef::Unknown => f.write_str("<unknown>"),
        }
    }
}

/// Kind of a class-like declaration
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A compile-time constant carried by a field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(v) => write!(f, "{v}"),
            ConstantValue::Float(v) => write!(f, "{v}"),
            ConstantValue::Bool(v) => write!(f, "{v}"),
            ConstantValue::Char(v) => write!(f, "'{v}'"),
            ConstantValue::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// A method parameter
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (may be synthetic like "arg0")
    pub name: String,
    pub type_ref: TypeRef,
    /// True when this parameter is declared with `...` varargs syntax.
    pub is_varargs: bool,
}

/// Name plus erased parameter types; the unit of override and overload comparison.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub parameter_types: Vec<String>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, parameters: &[Parameter]) -> Self {
        Self {
            name: name.into(),
            parameter_types: parameters.iter().map(|p| p.type_ref.erasure()).collect(),
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erasure_ignores_spelling_and_arguments() {
        let raw = TypeRef::raw("java.util.List<String>");
        let generic = TypeRef::Generic {
            base: Box::new(TypeRef::id("java.util.List")),
            args: vec![TypeRef::id("java.lang.String")],
        };
        assert_eq!(raw.erasure(), generic.erasure());
    }

    #[test]
    fn array_of_nests_dimensions() {
        let ty = TypeRef::array_of(TypeRef::array_of(TypeRef::raw("int")));
        assert_eq!(ty.to_string(), "int[][]");
    }
}
