pub mod element;
pub mod fqn;
pub mod modifiers;
pub mod types;
pub mod util;

pub use element::*;
pub use fqn::*;
pub use modifiers::*;
pub use types::*;
