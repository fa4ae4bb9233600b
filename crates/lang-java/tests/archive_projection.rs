mod common;

use clsview_api::{ClassKind, ConstantValue, FqName, TypeRef};
use clsview_core::{LightMember, ProjectionConfig};
use clsview_java::JavaProjections;
use clsview_java::reader::ClassFileReader;
use common::*;
use ristretto_classfile::{ClassAccessFlags, FieldAccessFlags, MethodAccessFlags};
use std::path::Path;
use tempfile::tempdir;

const FOO_SOURCE: &str = r#"package p;

public class Foo extends Base implements Runnable {
    public static final int MAX = 10;
    private int count;

    public Foo() {}

    public void run() {}

    public int getCount() { return count; }

    static class Inner {
        void touch() {}
    }
}
"#;

fn foo_class() -> Vec<u8> {
    ClassFileBuilder::class("p/Foo")
        .extends("p/Base")
        .implements("java/lang/Runnable")
        .int_constant("MAX", 10)
        .field(FieldAccessFlags::PRIVATE, "count", "I")
        .method(MethodAccessFlags::PUBLIC, "<init>", "()V")
        .method(MethodAccessFlags::PUBLIC, "run", "()V")
        .method(MethodAccessFlags::PUBLIC, "getCount", "()I")
        .method(
            MethodAccessFlags::STATIC | MethodAccessFlags::SYNTHETIC,
            "access$000",
            "(Lp/Foo;)I",
        )
        .method(MethodAccessFlags::STATIC, "<clinit>", "()V")
        .build()
}

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let jar = dir.join("lib-1.0.jar");
    write_jar(
        &jar,
        &[
            ("p/Foo.class", foo_class()),
            (
                "p/Foo$Inner.class",
                ClassFileBuilder::new("p/Foo$Inner", ClassAccessFlags::SUPER)
                    .method(MethodAccessFlags::empty(), "<init>", "()V")
                    .method(MethodAccessFlags::empty(), "touch", "()V")
                    .build(),
            ),
            (
                "p/Base.class",
                ClassFileBuilder::class("p/Base")
                    .method(MethodAccessFlags::PUBLIC, "<init>", "()V")
                    .method(MethodAccessFlags::PUBLIC, "close", "()V")
                    .build(),
            ),
            (
                "p/Color.class",
                ClassFileBuilder::enumeration("p/Color", &["RED", "GREEN"]).build(),
            ),
            ("p/Broken.class", vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00]),
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0".to_vec()),
        ],
    );
    jar
}

fn write_sources(path: &Path) {
    write_jar(path, &[("p/Foo.java", FOO_SOURCE.as_bytes().to_vec())]);
}

#[test]
fn reader_describes_a_class_file() {
    let description = ClassFileReader::read(&foo_class()).unwrap();
    assert_eq!(description.internal_name, "p/Foo");
    assert_eq!(description.kind, ClassKind::Class);
    assert_eq!(description.super_class.as_deref(), Some("p/Base"));
    assert_eq!(description.interfaces, vec!["java/lang/Runnable"]);

    let methods: Vec<&str> = description.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["<init>", "run", "getCount", "access$000"]);
    assert_eq!(description.methods[0].return_type, None);
    assert_eq!(description.methods[1].return_type, Some(TypeRef::raw("void")));
    assert!(description.methods[3].synthetic);

    let max = &description.fields[0];
    assert_eq!(max.name, "MAX");
    assert_eq!(max.constant, Some(ConstantValue::Int(10)));
    assert_eq!(description.fields[1].constant, None);
}

#[test]
fn reader_handles_interfaces_enums_and_constants() {
    let api = ClassFileReader::read(
        &ClassFileBuilder::interface("p/Api")
            .method(
                MethodAccessFlags::PUBLIC | MethodAccessFlags::ABSTRACT,
                "call",
                "(Ljava/lang/String;)V",
            )
            .method(MethodAccessFlags::PUBLIC, "describe", "()Ljava/lang/String;")
            .deprecated()
            .build(),
    )
    .unwrap();
    assert_eq!(api.kind, ClassKind::Interface);
    assert_eq!(api.super_class, None);
    assert!(api.deprecated);
    assert_eq!(
        api.methods[0].parameters[0].type_ref,
        TypeRef::id("java.lang.String")
    );

    let color =
        ClassFileReader::read(&ClassFileBuilder::enumeration("p/Color", &["RED"]).build()).unwrap();
    assert_eq!(color.kind, ClassKind::Enum);
    assert!(color.fields[0].enum_constant);
    assert!(color.fields[1].synthetic);
    assert!(color.methods.iter().all(|m| m.name != "<clinit>"));

    let greeting = ClassFileReader::read(
        &ClassFileBuilder::class("p/Greeting")
            .string_constant("HELLO", "hi")
            .build(),
    )
    .unwrap();
    assert_eq!(
        greeting.fields[0].constant,
        Some(ConstantValue::String("hi".to_string()))
    );
}

#[test]
fn reader_rejects_truncated_input() {
    assert!(ClassFileReader::read(&[0xCA, 0xFE, 0xBA, 0xBE]).is_err());
}

#[test]
fn opens_an_archive_with_explicit_sources() {
    let dir = tempdir().unwrap();
    let jar = write_fixture(dir.path());
    let sources = dir.path().join("attached.jar");
    write_sources(&sources);

    let projections = JavaProjections::default();
    let files = projections.open_archive(&jar, Some(&sources)).unwrap();
    // Base, Color, Foo; Broken is skipped and Foo$Inner nests under Foo.
    assert_eq!(files.len(), 3);

    let foo = projections.find_class(&FqName::new("p.Foo")).unwrap();
    assert!(foo.origin().is_some());
    assert_eq!(foo.super_class().unwrap().fq_name().as_str(), "p.Base");

    let names: Vec<&str> = foo.methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["<init>", "run", "getCount"]);
    assert!(foo.methods().iter().all(|m| m.origin().is_some()));
    assert!(foo.find_field_by_name("count", false).unwrap().origin().is_some());
    assert_eq!(
        foo.find_field_by_name("MAX", false)
            .unwrap()
            .compute_constant_value(),
        Some(ConstantValue::Int(10))
    );
    assert!(foo.find_methods_by_name("close", true).len() == 1);

    let inner = &foo.inner_classes()[0];
    assert_eq!(inner.fq_name().as_str(), "p.Foo.Inner");
    assert!(inner.origin().is_some());
    assert!(inner.methods().iter().any(|m| m.name() == "touch" && m.origin().is_some()));
}

#[test]
fn enum_archives_synthesize_values_and_value_of() {
    let dir = tempdir().unwrap();
    let jar = write_fixture(dir.path());
    let projections = JavaProjections::default();
    projections.open_archive(&jar, None).unwrap();

    let color = projections.find_class(&FqName::new("p.Color")).unwrap();
    assert!(color.is_enum());
    assert!(color.origin().is_none());
    let fields: Vec<&str> = color.fields().iter().map(|f| f.name()).collect();
    assert_eq!(fields, vec!["RED", "GREEN"]);
    assert!(color.fields()[0].is_enum_constant());

    let values = color.values_method().unwrap();
    assert_eq!(values.name(), "values");
    assert!(values.parameters().is_empty());
    assert_eq!(values.return_type().unwrap().erasure(), "Color[]");

    let value_of = color.value_of_method().unwrap();
    assert_eq!(value_of.parameters().len(), 1);
    assert_eq!(
        value_of.parameters()[0].type_ref,
        TypeRef::id("java.lang.String")
    );
    assert_eq!(
        value_of.throws(),
        &[TypeRef::id("java.lang.IllegalArgumentException")]
    );
}

#[test]
fn sibling_sources_jar_is_attached() {
    let dir = tempdir().unwrap();
    let jar = write_fixture(dir.path());
    write_sources(&dir.path().join("lib-1.0-sources.jar"));

    let projections = JavaProjections::new(ProjectionConfig::default());
    projections.open_archive(&jar, None).unwrap();
    let foo = projections.find_class(&FqName::new("p.Foo")).unwrap();
    let target = foo.navigation_element();
    assert!(target.path.ends_with("p/Foo.java"));
    assert!(target.range.is_some());
}

#[test]
fn closing_an_archive_invalidates_its_projections() {
    let dir = tempdir().unwrap();
    let jar = write_fixture(dir.path());
    let sources = dir.path().join("attached.jar");
    write_sources(&sources);

    let projections = JavaProjections::default();
    projections.open_archive(&jar, Some(&sources)).unwrap();
    let foo = projections.find_class(&FqName::new("p.Foo")).unwrap();
    let run = foo.find_methods_by_name("run", false)[0].clone();
    assert!(foo.is_valid());
    assert!(run.is_valid());

    assert!(projections.close_archive(&jar));
    assert!(!foo.is_valid());
    assert!(!run.is_valid());
    assert!(projections.find_class(&FqName::new("p.Foo")).is_none());
    assert!(!projections.close_archive(&jar));
}

#[test]
fn reopening_replaces_earlier_projections() {
    let dir = tempdir().unwrap();
    let jar = write_fixture(dir.path());
    let projections = JavaProjections::default();

    projections.open_archive(&jar, None).unwrap();
    let first = projections.find_class(&FqName::new("p.Foo")).unwrap();
    projections.open_archive(&jar, None).unwrap();
    let second = projections.find_class(&FqName::new("p.Foo")).unwrap();

    assert!(!first.is_valid());
    assert!(second.is_valid());
    assert_eq!(projections.index().len(), 3);
}
