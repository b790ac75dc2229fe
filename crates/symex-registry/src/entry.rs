//! Substitution entries

use std::fmt;
use symex_core::TypeName;
use symex_model::ModelCollection;
use symex_store::ElementStore;

/// Builds a model instance over an initial store
pub type ModelConstructor = fn(ElementStore) -> Box<dyn ModelCollection>;

/// Who may resolve a substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    /// Only the engine's own modeling code
    Internal,
    /// Any requester, including analyzed programs
    General,
}

impl Usage {
    /// Whether `requester` may resolve an entry with this usage
    #[inline]
    #[must_use]
    pub fn permits(self, requester: Requester) -> bool {
        match self {
            Self::General => true,
            Self::Internal => requester == Requester::Engine,
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Origin of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requester {
    /// Engine modeling code
    Engine,
    /// Code of the program under analysis
    AnalyzedProgram,
}

/// One `target → model` substitution
#[derive(Debug, Clone)]
pub struct SubstitutionEntry {
    target: TypeName,
    model: TypeName,
    usage: Usage,
    constructor: ModelConstructor,
}

impl SubstitutionEntry {
    /// Create entry
    #[must_use]
    pub fn new(target: TypeName, model: TypeName, usage: Usage, constructor: ModelConstructor) -> Self {
        Self {
            target,
            model,
            usage,
            constructor,
        }
    }

    /// Standard type being replaced
    #[inline]
    #[must_use]
    pub fn target(&self) -> &TypeName {
        &self.target
    }

    /// Model replacing it
    #[inline]
    #[must_use]
    pub fn model(&self) -> &TypeName {
        &self.model
    }

    /// Usage flag
    #[inline]
    #[must_use]
    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// Whether only the engine may resolve this entry
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.usage == Usage::Internal
    }

    /// Build a model over `store`
    #[inline]
    #[must_use]
    pub fn construct(&self, store: ElementStore) -> Box<dyn ModelCollection> {
        (self.constructor)(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symex_model::ListModel;

    fn list_entry(usage: Usage) -> SubstitutionEntry {
        SubstitutionEntry::new(
            TypeName::new(["java", "util", "ArrayList"]),
            TypeName::new(["org", "symex", "models", "ArrayList"]),
            usage,
            |store| Box::new(ListModel::from_store(store)),
        )
    }

    #[test]
    fn usage_permits() {
        assert!(Usage::General.permits(Requester::Engine));
        assert!(Usage::General.permits(Requester::AnalyzedProgram));
        assert!(Usage::Internal.permits(Requester::Engine));
        assert!(!Usage::Internal.permits(Requester::AnalyzedProgram));
    }

    #[test]
    fn construct_uses_store() {
        let entry = list_entry(Usage::General);
        let store = ElementStore::from_values([symex_core::SymValue::int(7)]);
        let model = entry.construct(store.clone());
        assert_eq!(model.store(), &store);
        assert_eq!(model.model_name(), entry.model().to_string());
    }

    #[test]
    fn internal_flag() {
        assert!(list_entry(Usage::Internal).is_internal());
        assert!(!list_entry(Usage::General).is_internal());
    }
}
