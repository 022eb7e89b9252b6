// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use relay_core::{DEFAULT_FREQUENCY_HZ, PwmConfig, Rounding};

// ============================================================================
// Relais Konfiguration
// ============================================================================

/// GPIO-Pin für das Relais (SSR / MOSFET-Gate)
/// Muss zu `peripherals.GPIO4` in main.rs passen
pub const RELAY_GPIO_PIN: u8 = 4;

/// Standard-PWM-Frequenz in Hz (1 kHz = 1000 µs Periode)
/// Kann zur Build-Zeit über RELAY_PWM_FREQUENCY_HZ überschrieben werden
pub const DEFAULT_PWM_FREQUENCY_HZ: f32 = DEFAULT_FREQUENCY_HZ;

/// Rundung der Einschaltdauer
pub const PWM_ROUNDING: Rounding = Rounding::Nearest;

/// Kapazität des Kommando-Channels zum Relais-Task
pub const COMMAND_QUEUE_DEPTH: usize = 4;

/// Status-Log alle N PWM-Zyklen (bei 1 kHz ≈ alle 10 s)
pub const STATUS_LOG_INTERVAL_CYCLES: u32 = 10_000;

// ============================================================================
// Demo-Profil Konfiguration
// ============================================================================

/// Tastverhältnisse, die der Profil-Task nacheinander setzt
pub const DUTY_PROFILE: [f32; 6] = [0.0, 0.25, 0.5, 0.75, 1.0, 0.1];

/// Haltezeit pro Profil-Stufe in Sekunden
pub const DUTY_STEP_INTERVAL_SECS: u64 = 5;

// ============================================================================
// Laufzeit-Konfiguration
// ============================================================================

/// PWM-Frequenz inklusive optionalem Build-Zeit-Override
///
/// RELAY_PWM_FREQUENCY_HZ wird von build.rs aus der .env übernommen.
/// Ungültige Werte (nicht parsebar, <= 0) fallen auf den Standard zurück.
pub fn pwm_frequency_hz() -> f32 {
    option_env!("RELAY_PWM_FREQUENCY_HZ")
        .and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|hz| hz.is_finite() && *hz > 0.0)
        .unwrap_or(DEFAULT_PWM_FREQUENCY_HZ)
}

/// Vollständige Treiber-Konfiguration für den Relais-Kanal
pub fn pwm_config() -> PwmConfig {
    PwmConfig {
        frequency_hz: pwm_frequency_hz(),
        rounding: PWM_ROUNDING,
    }
}
