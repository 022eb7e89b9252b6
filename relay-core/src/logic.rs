//! Pure Timing Logic
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::types::{PulseTiming, PwmError, Rounding};

/// Standard-PWM-Frequenz in Hz (ergibt 1000 µs Periode)
pub const DEFAULT_FREQUENCY_HZ: f32 = 1000.0;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Berechnet die Periode in Mikrosekunden: `round(1_000_000 / f)`
///
/// Sehr kleine Frequenzen sättigen bei `u32::MAX`.
///
/// # Fehlerbehandlung
/// Gibt `PwmError::InvalidFrequency` zurück für `f <= 0`, NaN oder unendlich.
///
/// # Beispiele
///
/// ```
/// # use relay_core::period_us;
/// assert_eq!(period_us(1000.0), Ok(1000));
/// assert_eq!(period_us(3.0), Ok(333_333));
/// assert!(period_us(0.0).is_err());
/// ```
pub fn period_us(frequency_hz: f32) -> Result<u32, PwmError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(PwmError::InvalidFrequency);
    }

    // Division in f64: 1e6 / f ist in f32 bei krummen Frequenzen ungenau
    let period = libm::round(MICROS_PER_SECOND / f64::from(frequency_hz));
    Ok(period as u32)
}

/// Klemmt ein Tastverhältnis auf 0.0 - 1.0 (NaN wird zu 0.0)
pub fn clamp_duty(state: f32) -> f32 {
    if state.is_nan() {
        return 0.0;
    }
    state.clamp(0.0, 1.0)
}

/// Berechnet Ein- und Ausschaltdauer eines Zyklus
///
/// Gibt `None` zurück, wenn der Ausgang komplett aus sein soll
/// (`state <= 0.0` oder NaN). Ansonsten gilt immer
/// `on_us + off_us == period_us`.
///
/// # Beispiele
///
/// ```
/// # use relay_core::{pulse_timing, Rounding};
/// let timing = pulse_timing(0.25, 1000, Rounding::Nearest).unwrap();
/// assert_eq!((timing.on_us, timing.off_us), (250, 750));
/// assert_eq!(pulse_timing(0.0, 1000, Rounding::Nearest), None);
/// ```
pub fn pulse_timing(state: f32, period_us: u32, rounding: Rounding) -> Option<PulseTiming> {
    if state.is_nan() || state <= 0.0 {
        return None;
    }

    let duty = clamp_duty(state);
    if duty >= 1.0 {
        return Some(PulseTiming {
            on_us: period_us,
            off_us: 0,
        });
    }

    // Produkt in f64: f32 bildet Perioden über 2^24 µs nicht exakt ab
    let exact = f64::from(duty) * f64::from(period_us);
    let on_us = match rounding {
        Rounding::Truncate => exact as u32,
        Rounding::Nearest => libm::round(exact) as u32,
    }
    .min(period_us);

    Some(PulseTiming {
        on_us,
        off_us: period_us - on_us,
    })
}
