pub trait DeviceIdentity {
    /// A stable identifier of this installation, if one is available.
    fn device_id(&self) -> Option<String>;
}
