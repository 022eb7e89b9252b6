//! Core Types für die Relais-PWM-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

use crate::logic::DEFAULT_FREQUENCY_HZ;

/// Fehler-Typ für PWM-Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Frequenz ist nicht endlich oder nicht strikt positiv
    InvalidFrequency,
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmError::InvalidFrequency => f.write_str("frequency must be finite and > 0 Hz"),
        }
    }
}

impl core::error::Error for PwmError {}

/// Rundungsmodus für die Einschaltdauer eines Pulses
///
/// Bei hohen Frequenzen (kurze Perioden) ist der Unterschied im
/// Tastverhältnis messbar, deshalb ist er explizit wählbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Abschneiden Richtung Null (`(duty * period) as u32`)
    Truncate,
    /// Kaufmännisch runden auf die nächste Mikrosekunde
    #[default]
    Nearest,
}

/// Ein einzelner PWM-Zyklus: High-Phase gefolgt von Low-Phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// Einschaltdauer in µs
    pub on_us: u32,
    /// Ausschaltdauer in µs
    pub off_us: u32,
}

impl PulseTiming {
    /// Gesamtdauer des Zyklus in µs (entspricht immer der Periode)
    pub fn period_us(&self) -> u32 {
        self.on_us + self.off_us
    }
}

/// Konfiguration eines Software-PWM-Kanals
///
/// Wird vom externen Loader (Firmware-Config) befüllt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PwmConfig {
    pub frequency_hz: f32,
    pub rounding: Rounding,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            rounding: Rounding::default(),
        }
    }
}

/// Relais-Kommando für den PWM-Task
///
/// Wird über einen Channel an den Task gesendet, der den Treiber besitzt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelayCommand {
    /// Neues Tastverhältnis (nominal 0.0 - 1.0, wird geklemmt)
    SetDuty(f32),
    /// Neue PWM-Frequenz in Hz (greift ab dem nächsten Zyklus)
    SetFrequency(f32),
    /// Relais sofort komplett abschalten
    Off,
}

impl RelayCommand {
    /// Tastverhältnis, das nach diesem Kommando gelten soll
    ///
    /// `None` wenn das Kommando das Tastverhältnis nicht verändert.
    pub fn duty(&self) -> Option<f32> {
        match self {
            RelayCommand::SetDuty(duty) => Some(*duty),
            RelayCommand::Off => Some(0.0),
            RelayCommand::SetFrequency(_) => None,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PulseTiming {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PulseTiming {{ on: {}us, off: {}us }}",
            self.on_us,
            self.off_us
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RelayCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RelayCommand::SetDuty(duty) => defmt::write!(fmt, "SetDuty({})", duty),
            RelayCommand::SetFrequency(hz) => defmt::write!(fmt, "SetFrequency({} Hz)", hz),
            RelayCommand::Off => defmt::write!(fmt, "Off"),
        }
    }
}
