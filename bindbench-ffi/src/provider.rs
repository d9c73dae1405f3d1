//! Capability discovery for the native routine

use crate::dynamic::DynamicBinding;
use crate::locator::LibraryLocator;
use bindbench_core::{Capabilities, CapabilityProvider, StringBinding};

/// Discovers the static and dynamic bindings to `bindbench-native`
#[derive(Debug, Clone)]
pub struct NativeProvider {
    locator: LibraryLocator,
    enable_static: bool,
    enable_dynamic: bool,
}

impl NativeProvider {
    /// Provider using `locator` for the dynamic library
    pub fn new(locator: LibraryLocator) -> Self {
        Self {
            locator,
            enable_static: true,
            enable_dynamic: true,
        }
    }

    /// Treat the static binding as absent when `false`
    pub fn with_static(mut self, enabled: bool) -> Self {
        self.enable_static = enabled;
        self
    }

    /// Treat the dynamic binding as absent when `false`
    pub fn with_dynamic(mut self, enabled: bool) -> Self {
        self.enable_dynamic = enabled;
        self
    }

    fn discover_static(&self) -> Option<Box<dyn StringBinding>> {
        if !self.enable_static {
            tracing::info!("static binding disabled");
            return None;
        }
        let binding = static_binding();
        if binding.is_none() {
            tracing::warn!("static binding not compiled in (enable the `static-binding` feature)");
        }
        binding
    }

    fn discover_dynamic(&self) -> Option<Box<dyn StringBinding>> {
        if !self.enable_dynamic {
            tracing::info!("dynamic binding disabled");
            return None;
        }
        let loaded = self
            .locator
            .locate()
            .and_then(|path| DynamicBinding::load(&path));
        match loaded {
            Ok(binding) => {
                if let Some(path) = binding.path() {
                    tracing::info!(path = %path.display(), "loaded native library");
                }
                Some(Box::new(binding))
            }
            Err(e) => {
                tracing::warn!("dynamic binding not available: {e}");
                None
            }
        }
    }
}

impl Default for NativeProvider {
    fn default() -> Self {
        Self::new(LibraryLocator::default())
    }
}

impl CapabilityProvider for NativeProvider {
    fn discover(&self) -> Capabilities {
        Capabilities::new(self.discover_static(), self.discover_dynamic())
    }
}

/// The statically-linked binding, when compiled in
pub fn static_binding() -> Option<Box<dyn StringBinding>> {
    #[cfg(feature = "static-binding")]
    {
        Some(Box::new(crate::static_binding::StaticBinding))
    }
    #[cfg(not(feature = "static-binding"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nowhere() -> LibraryLocator {
        LibraryLocator::new(Vec::new()).with_path("/nonexistent/libbindbench_native.so")
    }

    #[test]
    fn test_missing_library_leaves_b_absent() {
        let caps = NativeProvider::new(nowhere()).discover();
        assert!(caps.b.is_none());
        assert_eq!(caps.a.is_some(), cfg!(feature = "static-binding"));
    }

    #[test]
    fn test_disabled_bindings_are_absent() {
        let caps = NativeProvider::new(nowhere())
            .with_static(false)
            .with_dynamic(false)
            .discover();
        assert!(!caps.any());
    }

    #[cfg(feature = "static-binding")]
    #[test]
    fn test_static_binding_is_named() {
        let binding = static_binding().unwrap();
        assert_eq!(binding.name(), "static");
    }
}
