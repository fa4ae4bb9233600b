#![allow(dead_code)]

use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{
    ClassAccessFlags, ClassFile, ConstantPool, Field, FieldAccessFlags, FieldType, JAVA_21,
    Method, MethodAccessFlags,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Class files with members but no code, enough for the reader.
pub struct ClassFileBuilder {
    class: ClassFile,
}

impl ClassFileBuilder {
    pub fn new(internal_name: &str, access: ClassAccessFlags) -> Self {
        let mut constant_pool = ConstantPool::default();
        let this_class = constant_pool.add_class(internal_name).unwrap();
        let super_class = constant_pool.add_class("java/lang/Object").unwrap();
        Self {
            class: ClassFile {
                version: JAVA_21,
                constant_pool,
                access_flags: access,
                this_class,
                super_class,
                ..Default::default()
            },
        }
    }

    pub fn class(internal_name: &str) -> Self {
        Self::new(internal_name, ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER)
    }

    pub fn interface(internal_name: &str) -> Self {
        Self::new(
            internal_name,
            ClassAccessFlags::PUBLIC | ClassAccessFlags::INTERFACE | ClassAccessFlags::ABSTRACT,
        )
    }

    pub fn enumeration(internal_name: &str, constants: &[&str]) -> Self {
        let descriptor = format!("L{internal_name};");
        let access = ClassAccessFlags::PUBLIC
            | ClassAccessFlags::FINAL
            | ClassAccessFlags::SUPER
            | ClassAccessFlags::ENUM;
        let mut builder = Self::new(internal_name, access).extends("java/lang/Enum");
        for constant in constants {
            builder = builder.field(
                FieldAccessFlags::PUBLIC
                    | FieldAccessFlags::STATIC
                    | FieldAccessFlags::FINAL
                    | FieldAccessFlags::ENUM,
                constant,
                &descriptor,
            );
        }
        let public_static = MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC;
        builder
            .field(
                FieldAccessFlags::PRIVATE
                    | FieldAccessFlags::STATIC
                    | FieldAccessFlags::FINAL
                    | FieldAccessFlags::SYNTHETIC,
                "$VALUES",
                &format!("[{descriptor}"),
            )
            .method(public_static, "values", &format!("()[{descriptor}"))
            .method(
                public_static,
                "valueOf",
                &format!("(Ljava/lang/String;){descriptor}"),
            )
            .method(MethodAccessFlags::PRIVATE, "<init>", "(Ljava/lang/String;I)V")
            .method(MethodAccessFlags::STATIC, "<clinit>", "()V")
    }

    pub fn extends(mut self, internal_name: &str) -> Self {
        self.class.super_class = self.class.constant_pool.add_class(internal_name).unwrap();
        self
    }

    pub fn implements(mut self, internal_name: &str) -> Self {
        let index = self.class.constant_pool.add_class(internal_name).unwrap();
        self.class.interfaces.push(index);
        self
    }

    pub fn deprecated(mut self) -> Self {
        let name_index = self.class.constant_pool.add_utf8("Deprecated").unwrap();
        self.class.attributes.push(Attribute::Deprecated { name_index });
        self
    }

    pub fn method(mut self, access: MethodAccessFlags, name: &str, descriptor: &str) -> Self {
        let pool = &mut self.class.constant_pool;
        let method = Method {
            access_flags: access,
            name_index: pool.add_utf8(name).unwrap(),
            descriptor_index: pool.add_utf8(descriptor).unwrap(),
            attributes: Vec::new(),
        };
        self.class.methods.push(method);
        self
    }

    pub fn field(self, access: FieldAccessFlags, name: &str, descriptor: &str) -> Self {
        self.field_with(access, name, descriptor, Vec::new())
    }

    pub fn int_constant(mut self, name: &str, value: i32) -> Self {
        let constant = self.class.constant_pool.add_integer(value).unwrap();
        let attribute = self.constant_value(constant);
        self.field_with(constant_access(), name, "I", vec![attribute])
    }

    pub fn string_constant(mut self, name: &str, value: &str) -> Self {
        let constant = self.class.constant_pool.add_string(value).unwrap();
        let attribute = self.constant_value(constant);
        self.field_with(constant_access(), name, "Ljava/lang/String;", vec![attribute])
    }

    fn constant_value(&mut self, constant_value_index: u16) -> Attribute {
        Attribute::ConstantValue {
            name_index: self.class.constant_pool.add_utf8("ConstantValue").unwrap(),
            constant_value_index,
        }
    }

    fn field_with(
        mut self,
        access: FieldAccessFlags,
        name: &str,
        descriptor: &str,
        attributes: Vec<Attribute>,
    ) -> Self {
        let pool = &mut self.class.constant_pool;
        let field = Field {
            access_flags: access,
            name_index: pool.add_utf8(name).unwrap(),
            descriptor_index: pool.add_utf8(descriptor).unwrap(),
            field_type: FieldType::parse(&descriptor.to_string()).unwrap(),
            attributes,
        };
        self.class.fields.push(field);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.class.to_bytes(&mut bytes).unwrap();
        bytes
    }
}

fn constant_access() -> FieldAccessFlags {
    FieldAccessFlags::PUBLIC | FieldAccessFlags::STATIC | FieldAccessFlags::FINAL
}

pub fn write_jar(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap();
}
