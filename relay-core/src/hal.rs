//! embedded-hal Adapter
//!
//! Verbinden beliebige embedded-hal 1.0 Implementierungen (esp-hal,
//! rp-hal, ...) mit den Capability-Traits dieser Crate.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::log::warning;
use crate::traits::{DigitalOutput, MicrosDelay};

/// GPIO-Ausgang auf Basis von `embedded_hal::digital::OutputPin`
///
/// Schreibfehler des Pins werden geloggt und verworfen: für den
/// PWM-Treiber ist ein Pin-Zugriff unfehlbar.
pub struct HalOutput<P> {
    pin: P,
}

impl<P: OutputPin> HalOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Gibt den Pin wieder frei
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn setup(&mut self) {
        // Pin ist bereits als Ausgang konfiguriert (Typ-State der HAL),
        // hier nur definierten Ruhepegel herstellen
        if self.pin.set_low().is_err() {
            warning!("HalOutput: setup failed to drive pin low");
        }
    }

    fn digital_write(&mut self, level: bool) {
        let result = if level {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warning!("HalOutput: write {} failed", level);
        }
    }
}

/// Mikrosekunden-Delay auf Basis von `embedded_hal::delay::DelayNs`
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> MicrosDelay for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        // Ein Delay von 0 µs ist ein No-Op
        if us > 0 {
            self.delay.delay_us(us);
        }
    }
}
