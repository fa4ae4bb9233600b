//! Origin trees parsed from Java source files.

use crate::syntax;
use clsview_api::{ElementId, FqName, NavigationTarget, OriginDeclaration, OriginKind, TextRange};
use clsview_core::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tree_sitter::Node;
use xxhash_rust::xxh3::xxh3_64;

/// One parsed `.java` file. Dropping it releases every declaration node, and
/// `invalidate` marks them stale while they are still referenced.
#[derive(Debug)]
pub struct SourceOriginFile {
    path: PathBuf,
    package: FqName,
    root: Arc<dyn OriginDeclaration>,
    valid: Arc<AtomicBool>,
}

impl SourceOriginFile {
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Result<Self> {
        let path = path.into();
        let tree = syntax::parse(source)?;
        let program = tree.root_node();
        let valid = Arc::new(AtomicBool::new(true));

        let package = package_name(program, source);
        let mut builder = TreeBuilder {
            source,
            tree_id: xxh3_64(path.to_string_lossy().as_bytes()),
            next: 1,
            path: Arc::from(path.as_path()),
            valid: Arc::clone(&valid),
        };
        let declarations = builder.declarations(program, &package);
        tracing::debug!(
            path = %path.display(),
            package = %package,
            declarations = declarations.len(),
            "parsed source origin"
        );

        let root: Arc<dyn OriginDeclaration> = Arc::new(SourceDeclaration {
            id: ElementId::new(builder.tree_id, 0),
            name: None,
            fq_name: None,
            kind: OriginKind::File,
            range: TextRange::new(0, source.len() as u32),
            children: declarations,
            path: Arc::clone(&builder.path),
            valid: Arc::clone(&valid),
        });
        Ok(Self {
            path,
            package,
            root,
            valid,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &FqName {
        &self.package
    }

    pub fn root(&self) -> Arc<dyn OriginDeclaration> {
        Arc::clone(&self.root)
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
struct SourceDeclaration {
    id: ElementId,
    name: Option<String>,
    fq_name: Option<FqName>,
    kind: OriginKind,
    range: TextRange,
    children: Vec<Arc<dyn OriginDeclaration>>,
    path: Arc<Path>,
    valid: Arc<AtomicBool>,
}

impl OriginDeclaration for SourceDeclaration {
    fn origin_id(&self) -> ElementId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn fq_name(&self) -> Option<FqName> {
        self.fq_name.clone()
    }

    fn kind(&self) -> OriginKind {
        self.kind
    }

    fn declarations(&self) -> Vec<Arc<dyn OriginDeclaration>> {
        self.children.clone()
    }

    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget::at(self.path.to_path_buf(), self.range)
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    tree_id: u64,
    next: u32,
    path: Arc<Path>,
    valid: Arc<AtomicBool>,
}

impl TreeBuilder<'_> {
    /// Declarations directly inside `container` (a program or a type body).
    fn declarations(&mut self, container: Node, scope: &FqName) -> Vec<Arc<dyn OriginDeclaration>> {
        let mut result = Vec::new();
        let mut cursor = container.walk();
        for child in container.named_children(&mut cursor) {
            match child.kind() {
                "class_declaration"
                | "record_declaration"
                | "enum_declaration"
                | "annotation_type_declaration" => {
                    result.extend(self.type_declaration(child, OriginKind::Class, scope));
                }
                "interface_declaration" => {
                    result.extend(self.type_declaration(child, OriginKind::Interface, scope));
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    result.extend(self.member(child, child, OriginKind::Function, scope));
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    result.extend(self.member(child, child, OriginKind::Constructor, scope));
                }
                "field_declaration" | "constant_declaration" => {
                    let mut inner = child.walk();
                    let declarators: Vec<Node> = child
                        .children_by_field_name("declarator", &mut inner)
                        .collect();
                    for declarator in declarators {
                        result.extend(self.member(declarator, child, OriginKind::Property, scope));
                    }
                }
                "enum_constant" => {
                    result.extend(self.member(child, child, OriginKind::EnumEntry, scope));
                }
                "enum_body_declarations" => {
                    result.extend(self.declarations(child, scope));
                }
                _ => {}
            }
        }
        result
    }

    fn type_declaration(
        &mut self,
        node: Node,
        kind: OriginKind,
        scope: &FqName,
    ) -> Option<Arc<dyn OriginDeclaration>> {
        let name = syntax::field_text(node, "name", self.source)?.to_string();
        let fq_name = scope.child(&name);
        let id = self.next_id();
        let children = match node.child_by_field_name("body") {
            Some(body) => self.declarations(body, &fq_name),
            None => vec![],
        };
        Some(Arc::new(SourceDeclaration {
            id,
            name: Some(name),
            fq_name: Some(fq_name),
            kind,
            range: range_of(node),
            children,
            path: Arc::clone(&self.path),
            valid: Arc::clone(&self.valid),
        }))
    }

    /// `named` carries the `name` field; `extent` is the range navigated to.
    fn member(
        &mut self,
        named: Node,
        extent: Node,
        kind: OriginKind,
        scope: &FqName,
    ) -> Option<Arc<dyn OriginDeclaration>> {
        let name = syntax::field_text(named, "name", self.source)?.to_string();
        Some(Arc::new(SourceDeclaration {
            id: self.next_id(),
            fq_name: Some(scope.child(&name)),
            name: Some(name),
            kind,
            range: range_of(extent),
            children: vec![],
            path: Arc::clone(&self.path),
            valid: Arc::clone(&self.valid),
        }))
    }

    fn next_id(&mut self) -> ElementId {
        let id = ElementId::new(self.tree_id, self.next);
        self.next += 1;
        id
    }
}

fn package_name(program: Node, source: &str) -> FqName {
    let mut cursor = program.walk();
    let package = program
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_declaration");
    let Some(package) = package else {
        return FqName::root();
    };
    let mut inner = package.walk();
    package
        .named_children(&mut inner)
        .find(|n| matches!(n.kind(), "scoped_identifier" | "identifier"))
        .map(|n| FqName::new(syntax::text(n, source)))
        .unwrap_or_else(FqName::root)
}

fn range_of(node: Node) -> TextRange {
    TextRange::new(node.start_byte() as u32, node.end_byte() as u32)
}
