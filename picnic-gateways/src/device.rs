use std::fs;

use picnic_core::gateways::device::DeviceIdentity;

const MACHINE_ID_FILES: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Identifies the device by a configured id or the id of the host.
#[derive(Debug, Clone, Default)]
pub struct HostDevice {
    configured_id: Option<String>,
}

impl HostDevice {
    pub fn new(configured_id: Option<String>) -> Self {
        let configured_id = configured_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty());
        Self { configured_id }
    }
}

fn read_machine_id() -> Option<String> {
    MACHINE_ID_FILES.iter().find_map(|path| {
        fs::read_to_string(path)
            .map_err(|err| log::debug!("Cannot read {path}: {err}"))
            .ok()
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
    })
}

impl DeviceIdentity for HostDevice {
    fn device_id(&self) -> Option<String> {
        self.configured_id.clone().or_else(read_machine_id)
    }
}
