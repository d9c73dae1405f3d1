//! Capability discovery interface
//!
//! The sweep is handed at most two bindings. How they are found (static
//! linkage, shared-library probing, mocks) lives behind [`CapabilityProvider`].

use crate::binding::StringBinding;

/// The bindings available for one run; fixed before any measurement starts.
#[derive(Default)]
pub struct Capabilities {
    /// Callable-A, the statically-bound path
    pub a: Option<Box<dyn StringBinding>>,
    /// Callable-B, the dynamically-loaded path
    pub b: Option<Box<dyn StringBinding>>,
}

impl Capabilities {
    /// Build from two optional bindings
    pub fn new(a: Option<Box<dyn StringBinding>>, b: Option<Box<dyn StringBinding>>) -> Self {
        Self { a, b }
    }

    /// No binding at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether at least one binding can be measured
    pub fn any(&self) -> bool {
        self.a.is_some() || self.b.is_some()
    }

    /// Whether both bindings can be measured (and compared)
    pub fn both(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("a", &self.a.as_ref().map(|b| b.name()))
            .field("b", &self.b.as_ref().map(|b| b.name()))
            .finish()
    }
}

/// Source of the two bindings under test
pub trait CapabilityProvider {
    /// Probe the environment once and return whatever is available
    fn discover(&self) -> Capabilities;
}

impl<F> CapabilityProvider for F
where
    F: Fn() -> Capabilities,
{
    fn discover(&self) -> Capabilities {
        self()
    }
}
