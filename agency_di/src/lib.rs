//! Minimal compile-time dependency injection.
//!
//! A [`Provider`] owns the leaf dependencies (configuration values, connected
//! clients). Every other service derives [`Build`] and is assembled from its
//! fields. Built values are cached per provider, so a service requested twice
//! resolves to clones of the same instance and shares its `#[state]`.

extern crate self as agency_di;

pub use agency_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Cache of the values that have already been built by this provider.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Greeting(&'static str);

    provider! {
        TestProvider {
            greeting: Greeting,
        }
    }

    #[derive(Debug, Clone, Build)]
    struct Greeter {
        greeting: Greeting,
        #[state]
        calls: Arc<AtomicUsize>,
    }

    #[test]
    fn build_from_fields() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hola"),
        };

        let greeter: Greeter = provider.provide();

        assert_eq!(greeter.greeting.0, "hola");
    }

    #[test]
    fn built_services_share_state() {
        let mut provider = TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hello"),
        };

        let a: Greeter = provider.provide();
        let b: Greeter = provider.provide();
        a.calls.fetch_add(1, Ordering::Relaxed);

        assert_eq!(b.calls.load(Ordering::Relaxed), 1);
    }
}
