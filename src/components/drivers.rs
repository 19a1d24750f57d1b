use log::debug;

use crate::{
    components::{
        engine::{Engine, DCAP_CREATE, DCAP_CREATECOPY},
        engines::gdal_engine::GdalEngine,
    },
    errors::{RastergridError, Result},
};

fn capability_key(want_copy: bool) -> &'static str {
    if want_copy {
        DCAP_CREATECOPY
    } else {
        DCAP_CREATE
    }
}

/// Capabilities of one driver, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDescriptor {
    pub name: String,
    pub can_create: bool,
    pub can_create_copy: bool,
}

/// View on the engine's driver registry.
///
/// Nothing is cached: drivers can be registered or removed
/// by other code sharing the process, so every query asks the engine.
#[derive(Debug, Clone)]
pub struct Drivers<E: Engine = GdalEngine> {
    engine: E,
}

impl Default for Drivers<GdalEngine> {
    fn default() -> Self {
        Self::new(GdalEngine)
    }
}

impl<E: Engine> Drivers<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Short names in engine order. Duplicates are kept.
    pub fn list_drivers(&self) -> Vec<String> {
        (0..self.engine.driver_count())
            .filter_map(|index| self.engine.driver(index))
            .map(|driver| self.engine.driver_short_name(&driver))
            .collect()
    }

    pub fn supports_driver(&self, name: &str) -> bool {
        self.list_drivers().iter().any(|driver| driver == name)
    }

    /// Whether `name` advertises `DCAP_CREATECOPY` (`want_copy`) or `DCAP_CREATE`.
    ///
    /// An unknown driver is reported as unsupported, never as an error.
    pub fn check_create(&self, name: &str, want_copy: bool) -> bool {
        self.engine
            .driver_by_name(name)
            .is_some_and(|driver| self.has_capability(&driver, want_copy))
    }

    pub fn describe(&self, name: &str) -> Option<DriverDescriptor> {
        self.engine
            .driver_by_name(name)
            .map(|driver| self.descriptor(&driver))
    }

    pub fn descriptors(&self) -> Vec<DriverDescriptor> {
        (0..self.engine.driver_count())
            .filter_map(|index| self.engine.driver(index))
            .map(|driver| self.descriptor(&driver))
            .collect()
    }

    /// Driver for a destructive write, checked before any destination is touched.
    pub(crate) fn require(&self, name: &str, want_copy: bool) -> Result<E::Driver> {
        if !self.supports_driver(name) {
            return Err(RastergridError::DriverNotFound(name.to_string()));
        }
        if !self.check_create(name, want_copy) {
            let (operation, hint) = if want_copy {
                (
                    "create-copy",
                    "Write through `write` with a driver that supports create instead.",
                )
            } else {
                (
                    "create",
                    "Use `copy` instead, the driver may support create-copy.",
                )
            };
            return Err(RastergridError::UnsupportedOperation {
                driver: name.to_string(),
                operation,
                hint,
            });
        }
        debug!("driver {name} supports {}", capability_key(want_copy));
        self.engine
            .driver_by_name(name)
            .ok_or_else(|| RastergridError::DriverNotFound(name.to_string()))
    }

    fn has_capability(&self, driver: &E::Driver, want_copy: bool) -> bool {
        self.engine
            .driver_metadata_item(driver, capability_key(want_copy), "")
            .is_some()
    }

    fn descriptor(&self, driver: &E::Driver) -> DriverDescriptor {
        DriverDescriptor {
            name: self.engine.driver_short_name(driver),
            can_create: self.has_capability(driver, false),
            can_create_copy: self.has_capability(driver, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::engines::memory_engine::MemoryEngine;
    use rstest::{fixture, rstest};

    #[fixture]
    fn drivers() -> Drivers<MemoryEngine> {
        Drivers::new(MemoryEngine::with_drivers(&[
            Some(("GTiff", true, true)),
            None,
            Some(("PNG", false, true)),
            Some(("MEMONLY", true, false)),
            Some(("CEOS", false, false)),
            Some(("PNG", false, true)),
        ]))
    }

    #[rstest]
    fn lists_in_engine_order_keeping_duplicates(drivers: Drivers<MemoryEngine>) {
        assert_eq!(
            drivers.list_drivers(),
            ["GTiff", "PNG", "MEMONLY", "CEOS", "PNG"]
        );
    }

    #[rstest]
    #[case("GTiff", true)]
    #[case("CEOS", true)]
    #[case("gtiff", false)]
    #[case("", false)]
    fn supports_listed_drivers(
        drivers: Drivers<MemoryEngine>,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(drivers.supports_driver(name), expected);
        let listed = drivers.list_drivers();
        assert_eq!(listed.iter().any(|driver| driver == name), expected);
    }

    #[rstest]
    #[case("GTiff", true, true)]
    #[case("PNG", false, true)]
    #[case("MEMONLY", true, false)]
    #[case("CEOS", false, false)]
    #[case("NoSuchDriver", false, false)]
    fn capabilities_are_independent(
        drivers: Drivers<MemoryEngine>,
        #[case] name: &str,
        #[case] create: bool,
        #[case] create_copy: bool,
    ) {
        assert_eq!(drivers.check_create(name, false), create);
        assert_eq!(drivers.check_create(name, true), create_copy);
    }

    #[rstest]
    fn describes_drivers(drivers: Drivers<MemoryEngine>) {
        assert_eq!(
            drivers.describe("PNG"),
            Some(DriverDescriptor {
                name: "PNG".to_string(),
                can_create: false,
                can_create_copy: true,
            })
        );
        assert_eq!(drivers.describe("NoSuchDriver"), None);
        assert_eq!(drivers.descriptors().len(), 5);
    }

    #[rstest]
    fn requires_capability(drivers: Drivers<MemoryEngine>) {
        assert!(drivers.require("GTiff", false).is_ok());
        assert!(matches!(
            drivers.require("NoSuchDriver", false),
            Err(RastergridError::DriverNotFound(name)) if name == "NoSuchDriver"
        ));
        assert!(matches!(
            drivers.require("PNG", false),
            Err(RastergridError::UnsupportedOperation { operation: "create", .. })
        ));
        assert!(matches!(
            drivers.require("MEMONLY", true),
            Err(RastergridError::UnsupportedOperation { operation: "create-copy", .. })
        ));
    }
}
