use crate::config::ProjectionConfig;
use crate::hierarchy::ClassFinder;
use clsview_api::{DeclarationFactory, Demangler};
use std::fmt;
use std::sync::{Arc, Weak};

/// Services shared by every projection created from one index.
pub struct ProjectionContext {
    declaration_factory: Arc<dyn DeclarationFactory>,
    demangler: Arc<dyn Demangler>,
    config: ProjectionConfig,
    class_finder: Option<Weak<dyn ClassFinder>>,
}

impl ProjectionContext {
    pub fn new(
        declaration_factory: Arc<dyn DeclarationFactory>,
        demangler: Arc<dyn Demangler>,
        config: ProjectionConfig,
    ) -> Self {
        Self {
            declaration_factory,
            demangler,
            config,
            class_finder: None,
        }
    }

    /// Resolve supertypes through `finder`. The context does not keep it alive.
    pub fn with_class_finder(mut self, finder: Weak<dyn ClassFinder>) -> Self {
        self.class_finder = Some(finder);
        self
    }

    pub fn declaration_factory(&self) -> &dyn DeclarationFactory {
        self.declaration_factory.as_ref()
    }

    pub fn demangler(&self) -> &dyn Demangler {
        self.demangler.as_ref()
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn class_finder(&self) -> Option<Arc<dyn ClassFinder>> {
        self.class_finder.as_ref().and_then(Weak::upgrade)
    }
}

impl fmt::Debug for ProjectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionContext")
            .field("declaration_factory", &self.declaration_factory)
            .field("demangler", &self.demangler)
            .field("config", &self.config)
            .field("has_class_finder", &self.class_finder.is_some())
            .finish()
    }
}
