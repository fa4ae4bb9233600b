use clsview_api::{Modifier, Modifiers, Parameter, TypeRef};
use ristretto_classfile::{BaseType, ClassAccessFlags, FieldAccessFlags, FieldType, MethodAccessFlags};

pub struct JavaTypeConverter;

impl JavaTypeConverter {
    pub fn convert_field(ty: &FieldType) -> TypeRef {
        Self::convert_type(ty)
    }

    /// Return type (`None` for `void`) and parameters of a method descriptor.
    pub fn convert_method(
        descriptor: &str,
        is_varargs: bool,
    ) -> Result<(Option<TypeRef>, Vec<Parameter>), ristretto_classfile::Error> {
        let (params, ret) = FieldType::parse_method_descriptor(descriptor)?;
        let return_type = ret.as_ref().map(Self::convert_field);

        let parameters = params
            .iter()
            .enumerate()
            .map(|(i, field_type)| Parameter {
                name: format!("arg{}", i),
                type_ref: Self::convert_field(field_type),
                is_varargs: is_varargs && i == params.len().saturating_sub(1),
            })
            .collect();

        Ok((return_type, parameters))
    }

    pub fn convert_type(ty: &FieldType) -> TypeRef {
        match ty {
            FieldType::Base(BaseType::Byte) => TypeRef::raw("byte"),
            FieldType::Base(BaseType::Char) => TypeRef::raw("char"),
            FieldType::Base(BaseType::Double) => TypeRef::raw("double"),
            FieldType::Base(BaseType::Float) => TypeRef::raw("float"),
            FieldType::Base(BaseType::Int) => TypeRef::raw("int"),
            FieldType::Base(BaseType::Long) => TypeRef::raw("long"),
            FieldType::Base(BaseType::Short) => TypeRef::raw("short"),
            FieldType::Base(BaseType::Boolean) => TypeRef::raw("boolean"),
            FieldType::Object(name) => TypeRef::id(name.replace(['/', '$'], ".")),
            FieldType::Array(component) => {
                let mut dimensions = 1usize;
                let mut current = component.as_ref();
                while let FieldType::Array(inner) = current {
                    dimensions += 1;
                    current = inner.as_ref();
                }

                TypeRef::Array {
                    element: Box::new(Self::convert_type(current)),
                    dimensions,
                }
            }
        }
    }
}

pub struct JavaModifierConverter;

impl JavaModifierConverter {
    pub fn parse_class(flags: ClassAccessFlags) -> Modifiers {
        let mut mods = Modifiers::empty();
        if flags.contains(ClassAccessFlags::PUBLIC) {
            mods.insert(Modifier::Public);
        }
        if flags.contains(ClassAccessFlags::FINAL) {
            mods.insert(Modifier::Final);
        }
        if flags.contains(ClassAccessFlags::ABSTRACT) && !flags.contains(ClassAccessFlags::INTERFACE)
        {
            mods.insert(Modifier::Abstract);
        }
        mods
    }

    pub fn parse_field(flags: FieldAccessFlags) -> Modifiers {
        let mut mods = Modifiers::empty();
        if flags.contains(FieldAccessFlags::PUBLIC) {
            mods.insert(Modifier::Public);
        }
        if flags.contains(FieldAccessFlags::PRIVATE) {
            mods.insert(Modifier::Private);
        }
        if flags.contains(FieldAccessFlags::PROTECTED) {
            mods.insert(Modifier::Protected);
        }
        if flags.contains(FieldAccessFlags::STATIC) {
            mods.insert(Modifier::Static);
        }
        if flags.contains(FieldAccessFlags::FINAL) {
            mods.insert(Modifier::Final);
        }
        if flags.contains(FieldAccessFlags::VOLATILE) {
            mods.insert(Modifier::Volatile);
        }
        if flags.contains(FieldAccessFlags::TRANSIENT) {
            mods.insert(Modifier::Transient);
        }
        mods
    }

    /// `in_interface` turns non-abstract, non-static instance methods into defaults.
    pub fn parse_method(flags: MethodAccessFlags, in_interface: bool) -> Modifiers {
        let mut mods = Modifiers::empty();
        if flags.contains(MethodAccessFlags::PUBLIC) {
            mods.insert(Modifier::Public);
        }
        if flags.contains(MethodAccessFlags::PRIVATE) {
            mods.insert(Modifier::Private);
        }
        if flags.contains(MethodAccessFlags::PROTECTED) {
            mods.insert(Modifier::Protected);
        }
        if flags.contains(MethodAccessFlags::STATIC) {
            mods.insert(Modifier::Static);
        }
        if flags.contains(MethodAccessFlags::FINAL) {
            mods.insert(Modifier::Final);
        }
        if flags.contains(MethodAccessFlags::SYNCHRONIZED) {
            mods.insert(Modifier::Synchronized);
        }
        if flags.contains(MethodAccessFlags::NATIVE) {
            mods.insert(Modifier::Native);
        }
        if flags.contains(MethodAccessFlags::ABSTRACT) {
            mods.insert(Modifier::Abstract);
        }
        if flags.contains(MethodAccessFlags::STRICT) {
            mods.insert(Modifier::Strictfp);
        }
        if in_interface
            && !flags.contains(MethodAccessFlags::ABSTRACT)
            && !flags.contains(MethodAccessFlags::STATIC)
            && !flags.contains(MethodAccessFlags::PRIVATE)
        {
            mods.insert(Modifier::Default);
        }
        mods
    }
}
