//! Software-PWM Treiber
//!
//! Emuliert PWM auf einem beliebigen digitalen Ausgang durch Umschalten
//! mit blockierenden Delays. Jeder `write_state()`-Aufruf erzeugt genau
//! einen Zyklus (High-Phase, dann Low-Phase) und blockiert dabei den
//! aufrufenden Thread bis zu einer vollen Periode.
//!
//! Der Aufrufer muss `write_state()` regelmäßig wiederholen, damit sich
//! ein proportionaler Mittelwert einstellt. Der Treiber selbst "hält"
//! kein Tastverhältnis zwischen zwei Aufrufen.

use crate::log::{debug, trace};
use crate::logic::{period_us, pulse_timing};
use crate::traits::{DigitalOutput, FloatOutput, MicrosDelay};
use crate::types::{PulseTiming, PwmConfig, PwmError, RelayCommand, Rounding};

/// Software-PWM für genau eine Ausgangsleitung
///
/// # Lebensdauer
/// Der Ausgang wird nur ausgeliehen (`&'a mut P`): der Pin gehört dem
/// Aufrufer und muss den Treiber überleben.
///
/// # Trait-basierte Abstraktion
/// - `P: DigitalOutput` - echter GPIO (`HalOutput`) oder Mock
/// - `D: MicrosDelay` - echtes Delay (`HalDelay`) oder aufzeichnender Mock
pub struct SoftPwm<'a, P: DigitalOutput + ?Sized, D: MicrosDelay> {
    output: &'a mut P,
    delay: D,
    config: PwmConfig,
    // Periode zu `config.frequency_hz`, beim Konstruieren berechnet
    config_period_us: u32,
    frequency_hz: f32,
    period_us: u32,
    active: bool,
    zero_means_zero: bool,
    last_timing: Option<PulseTiming>,
}

impl<'a, P: DigitalOutput + ?Sized, D: MicrosDelay> SoftPwm<'a, P, D> {
    /// Erstellt einen Treiber mit Standard-Konfiguration (1 kHz)
    ///
    /// Der Ausgang wird erst in `setup()` angefasst.
    pub fn new(output: &'a mut P, delay: D) -> Self {
        let config = PwmConfig::default();
        Self {
            output,
            delay,
            config,
            config_period_us: 1000,
            frequency_hz: config.frequency_hz,
            period_us: 1000,
            active: false,
            zero_means_zero: false,
            last_timing: None,
        }
    }

    /// Erstellt einen Treiber mit eigener Frequenz / Rundung
    ///
    /// # Fehlerbehandlung
    /// Gibt `PwmError::InvalidFrequency` zurück wenn `config.frequency_hz`
    /// nicht endlich oder nicht positiv ist.
    pub fn with_config(output: &'a mut P, delay: D, config: PwmConfig) -> Result<Self, PwmError> {
        let period_us = period_us(config.frequency_hz)?;
        Ok(Self {
            output,
            delay,
            config,
            config_period_us: period_us,
            frequency_hz: config.frequency_hz,
            period_us,
            active: false,
            zero_means_zero: false,
            last_timing: None,
        })
    }

    /// Initialisiert Ausgang und Zustand
    ///
    /// Leitung vorbereiten und auf Low ziehen, Frequenz auf den
    /// konfigurierten Standard setzen (1 kHz ohne Override), danach ein
    /// initiales `write_state(0.0)`.
    pub fn setup(&mut self) {
        self.output.setup();
        self.output.digital_write(false);

        // Konfigurierte Frequenz wurde in new()/with_config() validiert
        self.frequency_hz = self.config.frequency_hz;
        self.period_us = self.config_period_us;
        debug_assert_eq!(period_us(self.frequency_hz), Ok(self.period_us));
        self.zero_means_zero = true;
        self.active = false;

        debug!(
            "SoftPwm: setup at {} Hz ({} us period)",
            self.frequency_hz, self.period_us
        );

        self.write_state(0.0);
    }

    /// Setzt die PWM-Frequenz und berechnet die Periode neu
    ///
    /// Ändert nur Frequenz und Periode. Da `write_state()` synchron ist,
    /// kann kein laufender Zyklus betroffen sein.
    ///
    /// # Fehlerbehandlung
    /// Gibt `PwmError::InvalidFrequency` zurück für `f <= 0`, NaN oder
    /// unendlich. Frequenz und Periode bleiben dann unverändert.
    pub fn set_frequency(&mut self, frequency_hz: f32) -> Result<(), PwmError> {
        let period_us = period_us(frequency_hz)?;
        self.frequency_hz = frequency_hz;
        self.period_us = period_us;
        debug!(
            "SoftPwm: frequency {} Hz -> {} us period",
            frequency_hz, period_us
        );
        Ok(())
    }

    /// Erzeugt genau einen PWM-Zyklus (blockierend)
    ///
    /// - `state <= 0.0`: Leitung sofort auf Low, kein Delay
    /// - sonst: auf 0.0 - 1.0 klemmen, High für `on_us`, Low für `off_us`
    pub fn write_state(&mut self, state: f32) {
        let Some(timing) = pulse_timing(state, self.period_us, self.config.rounding) else {
            // Schneller Pfad für "aus": kein Warten
            self.output.digital_write(false);
            self.active = false;
            self.last_timing = None;
            return;
        };

        self.active = true;
        self.last_timing = Some(timing);
        trace!("SoftPwm: pulse {}", timing);

        self.output.digital_write(true);
        self.delay.delay_us(timing.on_us);
        self.output.digital_write(false);
        self.delay.delay_us(timing.off_us);
    }

    /// Wendet ein Relais-Kommando auf den Treiber an
    ///
    /// Frequenz-Kommandos wirken direkt auf den Treiber. Zurückgegeben wird
    /// das neue Soll-Tastverhältnis, das der Aufrufer ab jetzt an
    /// `write_state()` übergibt (`None` = unverändert).
    ///
    /// # Fehlerbehandlung
    /// Gibt `PwmError::InvalidFrequency` für ungültige Frequenzen zurück,
    /// die alte Frequenz bleibt dann aktiv.
    pub fn apply_command(&mut self, cmd: RelayCommand) -> Result<Option<f32>, PwmError> {
        if let RelayCommand::SetFrequency(hz) = cmd {
            self.set_frequency(hz)?;
        }
        Ok(cmd.duty())
    }

    /// Aktuelle Frequenz in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency_hz
    }

    /// Aktuelle Periode in µs
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// `true` solange die Leitung mit Tastverhältnis > 0 getrieben wird
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn zero_means_zero(&self) -> bool {
        self.zero_means_zero
    }

    pub fn rounding(&self) -> Rounding {
        self.config.rounding
    }

    /// Timing des letzten erzeugten Zyklus (`None` nach einem "aus")
    pub fn last_timing(&self) -> Option<PulseTiming> {
        self.last_timing
    }

    pub fn config(&self) -> PwmConfig {
        self.config
    }
}

impl<P: DigitalOutput + ?Sized, D: MicrosDelay> FloatOutput for SoftPwm<'_, P, D> {
    fn write_state(&mut self, state: f32) {
        SoftPwm::write_state(self, state)
    }
}
