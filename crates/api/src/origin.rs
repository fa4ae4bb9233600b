//! The optional origin tree: human-authored (or decompiled) declarations that
//! correspond to compiled nodes by simple name.

use crate::models::{ElementId, FqName, NavigationTarget};
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginKind {
    File,
    Class,
    Interface,
    Object,
    Function,
    Constructor,
    Property,
    EnumEntry,
    Other,
}

impl OriginKind {
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            OriginKind::Class | OriginKind::Interface | OriginKind::Object
        )
    }
}

pub trait OriginDeclaration: Send + Sync + Debug {
    /// Identity of this declaration within its origin tree.
    fn origin_id(&self) -> ElementId;

    fn name(&self) -> Option<&str>;

    fn fq_name(&self) -> Option<FqName>;

    fn kind(&self) -> OriginKind;

    /// Directly nested declarations, in source order.
    fn declarations(&self) -> Vec<Arc<dyn OriginDeclaration>>;

    fn is_valid(&self) -> bool;

    fn navigation_target(&self) -> NavigationTarget;
}
