use std::fmt;

use dashmap::DashMap;
use kidcon_types::{RegistryCode, Result, Status};

/// Opaque handle to a registry entry, resolved from a device name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(pub String);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Device registry collaborator: per-device cumulative byte counters with a
/// single global reset.
pub trait DeviceRegistry: Send + Sync {
    /// Resolve a device name to its registry handle.
    fn find_by_name(&self, name: &str) -> Result<DeviceId>;

    /// Cumulative `(bytes_up, bytes_down)` for a device.
    fn counters(&self, id: &DeviceId) -> Result<(u64, u64)>;

    /// Zero the byte counters of every device. Global, never per-device.
    fn reset_all(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    bytes_up: u64,
    bytes_down: u64,
}

/// In-memory registry, the host-registry stand-in.
///
/// The ingest path feeds it with cumulative counters observed in router log
/// lines; tests drive it directly.
pub struct MemRegistry {
    devices: DashMap<String, Counters>,
}

impl MemRegistry {
    pub fn new() -> Self {
        Self {
            devices: DashMap::new(),
        }
    }

    /// Record the latest cumulative counters for `name`, registering the
    /// device if it is new.
    pub fn observe(&self, name: &str, bytes_up: u64, bytes_down: u64) {
        self.devices.insert(
            name.to_string(),
            Counters {
                bytes_up,
                bytes_down,
            },
        );
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl Default for MemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry for MemRegistry {
    fn find_by_name(&self, name: &str) -> Result<DeviceId> {
        if self.devices.contains_key(name) {
            Ok(DeviceId(name.to_string()))
        } else {
            Err(Status::with_message(
                RegistryCode::DEVICE_NOT_FOUND,
                format!("no device named {}", name),
            ))
        }
    }

    fn counters(&self, id: &DeviceId) -> Result<(u64, u64)> {
        match self.devices.get(&id.0) {
            Some(entry) => Ok((entry.bytes_up, entry.bytes_down)),
            // The entry can vanish between find_by_name and here.
            None => Err(Status::with_message(
                RegistryCode::QUERY_FAILED,
                format!("device {} disappeared from registry", id),
            )),
        }
    }

    fn reset_all(&self) -> Result<()> {
        for mut entry in self.devices.iter_mut() {
            *entry.value_mut() = Counters::default();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_and_query() {
        let registry = MemRegistry::new();
        registry.observe("xiaomi-david", 100, 250);

        let id = registry.find_by_name("xiaomi-david").unwrap();
        assert_eq!(registry.counters(&id).unwrap(), (100, 250));
    }

    #[test]
    fn test_observe_overwrites_cumulative_counters() {
        let registry = MemRegistry::new();
        registry.observe("lenovo-wifi", 10, 20);
        registry.observe("lenovo-wifi", 300, 400);

        let id = registry.find_by_name("lenovo-wifi").unwrap();
        assert_eq!(registry.counters(&id).unwrap(), (300, 400));
        assert_eq!(registry.device_count(), 1);
    }

    #[test]
    fn test_unknown_device() {
        let registry = MemRegistry::new();
        let err = registry.find_by_name("ghost-device").unwrap_err();
        assert_eq!(err.code(), RegistryCode::DEVICE_NOT_FOUND);
    }

    #[test]
    fn test_reset_all_zeroes_every_device() {
        let registry = MemRegistry::new();
        registry.observe("a", 1, 2);
        registry.observe("b", 3, 4);

        registry.reset_all().unwrap();

        for name in ["a", "b"] {
            let id = registry.find_by_name(name).unwrap();
            assert_eq!(registry.counters(&id).unwrap(), (0, 0));
        }
    }

    #[test]
    fn test_reset_keeps_devices_registered() {
        let registry = MemRegistry::new();
        registry.observe("a", 1, 2);
        registry.reset_all().unwrap();
        assert!(registry.find_by_name("a").is_ok());
    }
}
