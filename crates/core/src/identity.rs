//! Identity keys for projections.
//!
//! Projections are compared by what they denote, not by the compiled node they wrap:
//! incremental re-resolution may hand out several compiled nodes for one logical
//! declaration, and all projections over it must collide in host-side caches.

use clsview_api::{ElementId, FqName, OriginDeclaration};
use std::fmt;
use std::sync::Arc;

/// `(fully-qualified name, origin identity)`, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectionKey {
    pub fq_name: FqName,
    pub origin: Option<ElementId>,
}

impl ProjectionKey {
    /// The origin's qualified name wins; the compiled name is the fallback.
    pub fn derive(
        compiled_name: Option<FqName>,
        origin: Option<&Arc<dyn OriginDeclaration>>,
    ) -> Self {
        let fq_name = origin
            .and_then(|o| o.fq_name())
            .or(compiled_name)
            .unwrap_or_default();
        Self {
            fq_name,
            origin: origin.map(|o| o.origin_id()),
        }
    }
}

impl fmt::Display for ProjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            Some(origin) => write!(f, "{} @ {}", self.fq_name, origin),
            None => write!(f, "{}", self.fq_name),
        }
    }
}
