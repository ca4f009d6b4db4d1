//! The host capability interface.
//!
//! The Telegram WebApp object is reached only through this trait, as a
//! single injected capability; the domain core never touches it.

/// Capabilities the hosting WebApp exposes to the storefront.
pub trait HostBridge {
    /// Signal that the app has rendered and is ready to be shown.
    fn ready(&self);

    /// Ask the host to expand the viewport.
    fn expand(&self);

    /// Hand a payload to the host (closes the mini-app on Telegram).
    fn send_data(&self, payload: &str);

    /// Show a host-native alert.
    fn show_alert(&self, message: &str);
}

/// A bridge that ignores every call, for headless or test use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBridge;

impl HostBridge for NoopBridge {
    fn ready(&self) {}
    fn expand(&self) {}
    fn send_data(&self, _payload: &str) {}
    fn show_alert(&self, _message: &str) {}
}
