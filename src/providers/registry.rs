//! The type-indexed provider registry.

use super::{
    ArgumentProvider, ErasedArgumentProvider, ErasedExtraProvider, ErasedProvider, ExtraProvider,
    ProviderKind,
};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of providers, indexed by the `TypeId` of the value they produce.
///
/// Registration does not deduplicate: several providers may be registered
/// for the same type and are kept in registration order. Lookup is
/// **pick-first**: the first provider of the right kind wins, and a
/// conversion failure propagates without falling through to later
/// registrations. There is no supertype fallback - `TypeId` has no
/// assignability; polymorphic sender types are served by extra providers
/// that downcast [`CommandSender::as_any`](crate::context::CommandSender).
///
/// Registries are expected to be populated during startup and read
/// concurrently afterwards; both phases are safe.
#[derive(Default)]
pub struct ProvidersRegistry {
    providers: RwLock<HashMap<TypeId, Vec<Arc<dyn ErasedProvider>>>>,
}

impl ProvidersRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the standard providers: `String`, `i64`,
    /// `u64`, `f64`, `bool` and [`Duration`](std::time::Duration).
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        super::defaults::register_defaults(&registry);
        registry
    }

    /// Register a token provider for type `T`.
    pub fn add_provider<T, P>(&self, provider: P)
    where
        T: Send + 'static,
        P: ArgumentProvider<T> + 'static,
    {
        self.push(TypeId::of::<T>(), Arc::new(ErasedArgumentProvider::new(provider)));
    }

    /// Register a context-only provider for type `T`.
    pub fn add_extra_provider<T, P>(&self, provider: P)
    where
        T: Send + 'static,
        P: ExtraProvider<T> + 'static,
    {
        self.push(TypeId::of::<T>(), Arc::new(ErasedExtraProvider::new(provider)));
    }

    fn push(&self, type_id: TypeId, provider: Arc<dyn ErasedProvider>) {
        self.providers
            .write()
            .entry(type_id)
            .or_default()
            .push(provider);
    }

    /// The first token provider registered for `type_id`.
    pub(crate) fn contextual_for(&self, type_id: TypeId) -> Option<Arc<dyn ErasedProvider>> {
        self.first_of_kind(type_id, ProviderKind::Contextual)
    }

    /// The first context-only provider registered for `type_id`.
    pub(crate) fn extra_for(&self, type_id: TypeId) -> Option<Arc<dyn ErasedProvider>> {
        self.first_of_kind(type_id, ProviderKind::Extra)
    }

    fn first_of_kind(&self, type_id: TypeId, kind: ProviderKind) -> Option<Arc<dyn ErasedProvider>> {
        self.providers
            .read()
            .get(&type_id)?
            .iter()
            .find(|p| p.kind() == kind)
            .cloned()
    }

    /// Whether a token provider exists for `type_id`.
    pub fn has_contextual(&self, type_id: TypeId) -> bool {
        self.contextual_for(type_id).is_some()
    }

    /// Whether a context-only provider exists for `type_id`.
    pub fn has_extra(&self, type_id: TypeId) -> bool {
        self.extra_for(type_id).is_some()
    }

    /// How many providers (of any kind) are registered for `type_id`.
    /// Diagnostic only; lookup never consults more than the first match.
    pub fn provider_count(&self, type_id: TypeId) -> usize {
        self.providers
            .read()
            .get(&type_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CommandContext;
    use crate::error::ProviderError;

    struct Fixed(i64);

    impl ArgumentProvider<i64> for Fixed {
        fn from_string(&self, _token: &str, _ctx: &CommandContext) -> Result<i64, ProviderError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_pick_first_wins() {
        let registry = ProvidersRegistry::new();
        registry.add_provider::<i64, _>(Fixed(1));
        registry.add_provider::<i64, _>(Fixed(2));

        assert_eq!(registry.provider_count(TypeId::of::<i64>()), 2);

        let provider = registry.contextual_for(TypeId::of::<i64>()).unwrap();
        let ctx = CommandContext::for_tests("");
        let value = provider.value_from_string("anything", &ctx).unwrap();
        assert_eq!(*value.downcast::<i64>().unwrap(), 1);
    }

    #[test]
    fn test_kinds_are_separate() {
        struct MarkerProvider;
        impl crate::providers::ExtraProvider<i32> for MarkerProvider {
            fn from_context(&self, _ctx: &CommandContext) -> Result<i32, ProviderError> {
                Ok(7)
            }
        }

        let registry = ProvidersRegistry::new();
        registry.add_extra_provider::<i32, _>(MarkerProvider);
        assert!(registry.has_extra(TypeId::of::<i32>()));
        assert!(!registry.has_contextual(TypeId::of::<i32>()));
    }

    #[test]
    fn test_missing_type_has_no_provider() {
        let registry = ProvidersRegistry::new();
        assert!(!registry.has_contextual(TypeId::of::<String>()));
        assert_eq!(registry.provider_count(TypeId::of::<String>()), 0);
    }
}
