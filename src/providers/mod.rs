//! Typed value providers.
//!
//! A provider converts raw user input (or pure context) into a typed value.
//! Providers are registered in a [`ProvidersRegistry`] under the
//! [`TypeId`](std::any::TypeId) of the value they produce; the resolver
//! looks them up by the target type of each declared argument.
//!
//! Two provider shapes exist, mirroring the two argument families:
//!
//! - [`ArgumentProvider`]: string token in, typed value out. May also offer
//!   completion suggestions.
//! - [`ExtraProvider`]: no input, the value is derived from the
//!   [`CommandContext`] alone (the sender, a host object, the command
//!   line itself).

mod defaults;
mod registry;

pub use defaults::{
    BoolProvider, DecimalProvider, DurationProvider, IntegerProvider, SenderNameProvider,
    StringProvider, UnsignedProvider, parse_duration,
};
pub use registry::ProvidersRegistry;

use crate::context::CommandContext;
use crate::error::ProviderError;
use std::any::Any;
use std::marker::PhantomData;

/// Converts a raw string token into a value of type `T`.
pub trait ArgumentProvider<T: Send + 'static>: Send + Sync {
    /// Convert `token` into a value.
    ///
    /// Failure messages are user-facing; build them from
    /// [`CommandContext::messages`].
    fn from_string(&self, token: &str, ctx: &CommandContext) -> Result<T, ProviderError>;

    /// Completion candidates for a partial token. Defaults to none.
    fn suggest(&self, _partial: &str, _ctx: &CommandContext) -> Vec<String> {
        Vec::new()
    }
}

/// Produces a value of type `T` from the execution context alone.
pub trait ExtraProvider<T: Send + 'static>: Send + Sync {
    /// Derive the value from the context.
    ///
    /// Fails when the value is unavailable in this kind of context, e.g. a
    /// host object that only exists for some front-ends.
    fn from_context(&self, ctx: &CommandContext) -> Result<T, ProviderError>;
}

// ============================================================================
// Type erasure
// ============================================================================

/// Which argument family a registered provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProviderKind {
    /// Converts string tokens ([`ArgumentProvider`]).
    Contextual,
    /// Derives values from context only ([`ExtraProvider`]).
    Extra,
}

/// Object-safe form of a registered provider. Values cross the boundary as
/// `Box<dyn Any + Send>` and are downcast back by
/// [`ResolvedArgs`](crate::command::ResolvedArgs).
pub(crate) trait ErasedProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn type_name(&self) -> &'static str;

    /// Convert a token into a boxed `T`.
    fn value_from_string(
        &self,
        token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError>;

    /// Convert a token into a boxed `Option<T>` holding `Some`.
    fn present_from_string(
        &self,
        token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError>;

    /// A boxed `Option<T>` holding `None`, for optional arguments without
    /// input.
    fn absent(&self) -> Box<dyn Any + Send>;

    /// Derive a boxed `T` from context.
    fn value_from_context(&self, ctx: &CommandContext) -> Result<Box<dyn Any + Send>, ProviderError>;

    /// Completion candidates for a partial token.
    fn suggest(&self, partial: &str, ctx: &CommandContext) -> Vec<String>;
}

pub(crate) struct ErasedArgumentProvider<T, P> {
    provider: P,
    _marker: PhantomData<fn() -> T>,
}

impl<T, P> ErasedArgumentProvider<T, P> {
    pub(crate) fn new(provider: P) -> Self {
        Self {
            provider,
            _marker: PhantomData,
        }
    }
}

impl<T, P> ErasedProvider for ErasedArgumentProvider<T, P>
where
    T: Send + 'static,
    P: ArgumentProvider<T>,
{
    fn kind(&self) -> ProviderKind {
        ProviderKind::Contextual
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn value_from_string(
        &self,
        token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        Ok(Box::new(self.provider.from_string(token, ctx)?))
    }

    fn present_from_string(
        &self,
        token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        Ok(Box::new(Some(self.provider.from_string(token, ctx)?)))
    }

    fn absent(&self) -> Box<dyn Any + Send> {
        Box::new(None::<T>)
    }

    fn value_from_context(
        &self,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        Err(ProviderError::new(
            ctx.messages().unresolved_type(self.type_name()),
        ))
    }

    fn suggest(&self, partial: &str, ctx: &CommandContext) -> Vec<String> {
        self.provider.suggest(partial, ctx)
    }
}

pub(crate) struct ErasedExtraProvider<T, P> {
    provider: P,
    _marker: PhantomData<fn() -> T>,
}

impl<T, P> ErasedExtraProvider<T, P> {
    pub(crate) fn new(provider: P) -> Self {
        Self {
            provider,
            _marker: PhantomData,
        }
    }
}

impl<T, P> ErasedProvider for ErasedExtraProvider<T, P>
where
    T: Send + 'static,
    P: ExtraProvider<T>,
{
    fn kind(&self) -> ProviderKind {
        ProviderKind::Extra
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn value_from_string(
        &self,
        _token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        Err(ProviderError::new(
            ctx.messages().unresolved_type(self.type_name()),
        ))
    }

    fn present_from_string(
        &self,
        token: &str,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        self.value_from_string(token, ctx)
    }

    fn absent(&self) -> Box<dyn Any + Send> {
        Box::new(None::<T>)
    }

    fn value_from_context(
        &self,
        ctx: &CommandContext,
    ) -> Result<Box<dyn Any + Send>, ProviderError> {
        Ok(Box::new(self.provider.from_context(ctx)?))
    }

    fn suggest(&self, _partial: &str, _ctx: &CommandContext) -> Vec<String> {
        Vec::new()
    }
}
