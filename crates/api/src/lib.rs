//! Contracts between the projection layer and its collaborators.
//!
//! The compiled-class tree, the optional origin tree, the declaration factory and the
//! demangling service are all consumed through the traits in this crate, so the core
//! never depends on a concrete artifact format.

pub mod compiled;
pub mod error;
pub mod models;
pub mod origin;
pub mod scope;
pub mod services;

// Re-export commonly used types
pub use compiled::{CompiledArtifact, CompiledClass, CompiledField, CompiledMethod};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use origin::{OriginDeclaration, OriginKind};
pub use scope::{DeclarationKind, ResolveState, ScopeDeclaration, ScopeProcessor};
pub use services::{DeclarationFactory, Demangler, MethodDeclaration};
