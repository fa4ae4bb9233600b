//! Light class projections: read-only class and member views over a compiled-class
//! tree, cross-referenced with an optional origin tree.

pub mod class;
pub mod config;
pub mod context;
pub mod error;
pub mod file;
pub mod hierarchy;
pub mod identity;
pub mod index;
pub mod logging;
pub mod member;
pub mod memo;
pub mod origin;
pub mod synthetic;

pub use class::ClassProjection;
pub use config::ProjectionConfig;
pub use context::ProjectionContext;
pub use error::{ClassViewError, Result};
pub use file::ProjectedFile;
pub use hierarchy::{ClassFinder, HierarchicalSignature};
pub use identity::ProjectionKey;
pub use index::ClassIndex;
pub use member::{FieldProjection, LightMember, MethodProjection};
pub use memo::Memo;
pub use origin::{MemberKind, OriginDescriptor};
pub use synthetic::{SyntheticKind, SyntheticMemberFactory, SyntheticMethod};
