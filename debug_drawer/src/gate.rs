//! Enable switch and capability check consulted by every entry point.

/// Two independently toggleable conditions, ANDed together.
///
/// - `enabled` is the runtime switch, mutable at any time (default on).
/// - `supported` is the capability flag, fixed when the gate is created
///   (true only in development-configured processes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    enabled: bool,
    supported: bool,
}

impl Gate {
    /// Create a gate with the given switch state and capability.
    pub fn new(enabled: bool, supported: bool) -> Self {
        Self { enabled, supported }
    }

    /// Whether drawing calls may do any work.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.enabled && self.supported
    }

    /// Runtime enable switch.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Capability flag.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Flip the runtime switch. The capability flag is unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
