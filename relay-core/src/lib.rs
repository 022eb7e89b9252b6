//! Relay Core - Plattformunabhängiger Software-PWM-Treiber
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Capability-Traits, die reine Timing-Logik und den
//! blockierenden Bit-Bang-Treiber.

#![no_std]

mod log;

pub mod driver;
pub mod hal;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use driver::SoftPwm;
pub use hal::{HalDelay, HalOutput};
pub use logic::{DEFAULT_FREQUENCY_HZ, clamp_duty, period_us, pulse_timing};
pub use traits::{DigitalOutput, FloatOutput, MicrosDelay};
pub use types::{PulseTiming, PwmConfig, PwmError, RelayCommand, Rounding};
