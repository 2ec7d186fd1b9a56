//! Grab/release haptic pulses

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::HapticsConfig;
use crate::error::Result;
use crate::gate::GrabTransition;
use crate::input::SourceId;

/// A vibration request for one source's actuator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HapticPulse {
    pub source: SourceId,
    /// 0.0 - 1.0
    pub strength: f32,
    #[serde(with = "millis")]
    pub duration: Duration,
}

/// Haptic actuator backend
pub trait HapticBackend: Send {
    /// Fire a pulse on the source's actuator
    fn pulse(&mut self, pulse: &HapticPulse) -> Result<()>;
}

/// Null haptic backend (no-op)
pub struct NullHapticBackend;

impl HapticBackend for NullHapticBackend {
    fn pulse(&mut self, _pulse: &HapticPulse) -> Result<()> {
        Ok(())
    }
}

/// Turns grab edges into pulses and forwards them to a backend
pub struct HapticDispatcher {
    config: HapticsConfig,
    backend: Box<dyn HapticBackend>,
}

impl HapticDispatcher {
    pub fn new(config: HapticsConfig) -> Self {
        Self::with_backend(config, Box::new(NullHapticBackend))
    }

    pub fn with_backend(config: HapticsConfig, backend: Box<dyn HapticBackend>) -> Self {
        Self { config, backend }
    }

    pub fn set_backend(&mut self, backend: Box<dyn HapticBackend>) {
        self.backend = backend;
    }

    pub fn config(&self) -> &HapticsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HapticsConfig) {
        self.config = config;
    }

    /// Pulse for a grab edge, or `None` when haptics are off or the source
    /// has no actuator
    pub fn pulse_for(&self, source: SourceId, has_actuator: bool, transition: GrabTransition) -> Option<HapticPulse> {
        if !self.config.enabled || !has_actuator {
            return None;
        }
        let pulse = match transition {
            GrabTransition::Started => &self.config.grab,
            GrabTransition::Released => &self.config.release,
        };
        Some(HapticPulse {
            source,
            strength: pulse.strength,
            duration: pulse.duration(),
        })
    }

    /// Send a pulse. Backend failures are logged and dropped.
    pub fn dispatch(&mut self, pulse: &HapticPulse) {
        if let Err(e) = self.backend.pulse(pulse) {
            tracing::debug!("Haptic pulse on {} failed: {}", pulse.source, e);
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
