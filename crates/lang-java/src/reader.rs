//! Class-file parsing into plain descriptions of classes and members.

use crate::converter::{JavaModifierConverter, JavaTypeConverter};
use clsview_api::{ClassKind, ConstantValue, Modifiers, Parameter, TypeRef};
use clsview_core::{ClassViewError, Result};
use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{
    ClassAccessFlags, ClassFile, Constant, FieldAccessFlags, MethodAccessFlags,
};
use std::io::Cursor;

/// A class as read from one class file, before nesting is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescription {
    pub internal_name: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    /// Internal name of the superclass; `None` for `java/lang/Object` and interfaces.
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodDescription>,
    pub fields: Vec<FieldDescription>,
    pub synthetic: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescription {
    pub name: String,
    pub descriptor: String,
    pub modifiers: Modifiers,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub synthetic: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescription {
    pub name: String,
    pub modifiers: Modifiers,
    pub field_type: TypeRef,
    pub constant: Option<ConstantValue>,
    pub enum_constant: bool,
    pub synthetic: bool,
    pub deprecated: bool,
}

pub struct ClassFileReader;

impl ClassFileReader {
    pub fn read(bytes: &[u8]) -> Result<ClassDescription> {
        let class = ClassFile::from_bytes(&mut Cursor::new(bytes.to_vec()))
            .map_err(|e| ClassViewError::Parsing(format!("Failed to parse class: {e:?}")))?;
        let pool = &class.constant_pool;

        let internal_name = pool
            .try_get_class(class.this_class)
            .map_err(|e| ClassViewError::Parsing(format!("Failed to read class name: {e:?}")))?
            .to_string();

        let flags = class.access_flags;
        let kind = if flags.contains(ClassAccessFlags::ANNOTATION) {
            ClassKind::Annotation
        } else if flags.contains(ClassAccessFlags::INTERFACE) {
            ClassKind::Interface
        } else if flags.contains(ClassAccessFlags::ENUM) {
            ClassKind::Enum
        } else {
            ClassKind::Class
        };

        let super_class = match class.super_class {
            0 => None,
            index => pool.try_get_class(index).ok().map(|s| s.to_string()),
        }
        .filter(|_| kind == ClassKind::Class || kind == ClassKind::Enum);

        let interfaces = class
            .interfaces
            .iter()
            .filter_map(|index| pool.try_get_class(*index).ok().map(|s| s.to_string()))
            .collect();

        let in_interface = matches!(kind, ClassKind::Interface | ClassKind::Annotation);
        let mut methods = Vec::with_capacity(class.methods.len());
        for method in &class.methods {
            let name = pool
                .try_get_utf8(method.name_index)
                .map_err(|e| ClassViewError::Parsing(format!("Failed to parse method name: {e:?}")))?
                .to_string();
            let descriptor = pool
                .try_get_utf8(method.descriptor_index)
                .map_err(|e| {
                    ClassViewError::Parsing(format!("Failed to parse method descriptor: {e:?}"))
                })?
                .to_string();
            if name == "<clinit>" {
                continue;
            }
            let is_varargs = method.access_flags.contains(MethodAccessFlags::VARARGS);
            let (return_type, parameters) = JavaTypeConverter::convert_method(&descriptor, is_varargs)
                .map_err(|e| {
                    ClassViewError::Parsing(format!("Failed to parse method signature: {e:?}"))
                })?;
            methods.push(MethodDescription {
                modifiers: JavaModifierConverter::parse_method(method.access_flags, in_interface),
                return_type: if name == "<init>" {
                    None
                } else {
                    return_type.or_else(|| Some(TypeRef::raw("void")))
                },
                parameters,
                synthetic: method.access_flags.contains(MethodAccessFlags::SYNTHETIC)
                    || method.access_flags.contains(MethodAccessFlags::BRIDGE),
                deprecated: is_deprecated(&method.attributes),
                name,
                descriptor,
            });
        }

        let mut fields = Vec::with_capacity(class.fields.len());
        for field in &class.fields {
            let name = pool
                .try_get_utf8(field.name_index)
                .map_err(|e| ClassViewError::Parsing(format!("Failed to parse field name: {e:?}")))?
                .to_string();
            let field_type = JavaTypeConverter::convert_field(&field.field_type);
            let constant = constant_value(&class, &field.attributes, &field_type);
            fields.push(FieldDescription {
                name,
                modifiers: JavaModifierConverter::parse_field(field.access_flags),
                field_type,
                constant,
                enum_constant: field.access_flags.contains(FieldAccessFlags::ENUM),
                synthetic: field.access_flags.contains(FieldAccessFlags::SYNTHETIC),
                deprecated: is_deprecated(&field.attributes),
            });
        }

        tracing::trace!(
            class = %internal_name,
            methods = methods.len(),
            fields = fields.len(),
            "read class file"
        );
        Ok(ClassDescription {
            internal_name,
            kind,
            modifiers: JavaModifierConverter::parse_class(flags),
            super_class,
            interfaces,
            methods,
            fields,
            synthetic: flags.contains(ClassAccessFlags::SYNTHETIC),
            deprecated: is_deprecated(&class.attributes),
        })
    }
}

fn is_deprecated(attributes: &[Attribute]) -> bool {
    attributes
        .iter()
        .any(|attribute| matches!(attribute, Attribute::Deprecated { .. }))
}

/// The `ConstantValue` attribute of a static final field.
fn constant_value(
    class: &ClassFile,
    attributes: &[Attribute],
    field_type: &TypeRef,
) -> Option<ConstantValue> {
    let index = attributes.iter().find_map(|attribute| match attribute {
        Attribute::ConstantValue {
            constant_value_index,
            ..
        } => Some(*constant_value_index),
        _ => None,
    })?;
    let pool = &class.constant_pool;
    let value = match pool.get(index)? {
        Constant::Integer(v) => match field_type {
            TypeRef::Raw(ty) if ty == "boolean" => ConstantValue::Bool(*v != 0),
            TypeRef::Raw(ty) if ty == "char" => ConstantValue::Char(char::from_u32(*v as u32)?),
            _ => ConstantValue::Int(i64::from(*v)),
        },
        Constant::Long(v) => ConstantValue::Int(*v),
        Constant::Float(v) => ConstantValue::Float(f64::from(*v)),
        Constant::Double(v) => ConstantValue::Float(*v),
        Constant::String(utf8_index) => {
            ConstantValue::String(pool.try_get_utf8(*utf8_index).ok()?.to_string())
        }
        _ => return None,
    };
    Some(value)
}
