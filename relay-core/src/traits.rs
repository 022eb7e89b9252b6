//! Capability Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

/// Digitaler Ausgang (ein GPIO-Pin, der das Relais schaltet)
///
/// Der Pin gehört nicht dem Treiber: er wird extern besessen und nur
/// ausgeliehen.
///
/// # Implementierungen
/// - **Production:** `HalOutput` (beliebiger embedded-hal `OutputPin`)
/// - **Testing:** MockOutput (zeichnet Aufrufe auf)
pub trait DigitalOutput {
    /// Bereitet die physische Leitung zum Schreiben vor
    ///
    /// Fehler sind auf dieser Ebene unsichtbar.
    fn setup(&mut self);

    /// Setzt die Leitung auf High (`true`) oder Low (`false`)
    ///
    /// Muss im Vergleich zu den µs-Delays praktisch sofort zurückkehren.
    fn digital_write(&mut self, level: bool);
}

/// Blockierendes Mikrosekunden-Delay
///
/// Ersetzt die globale `delayMicroseconds()`-Funktion des Hosts, damit der
/// Treiber ohne Hardware testbar ist (Mocks zeichnen nur die Dauer auf).
pub trait MicrosDelay {
    fn delay_us(&mut self, us: u32);
}

impl<D: MicrosDelay + ?Sized> MicrosDelay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

/// Proportionaler Ausgang mit Wertebereich 0.0 - 1.0
///
/// Die Schnittstelle, die der Treiber dem Host-Framework anbietet
/// (analog zu jedem anderen analogen Ausgang).
pub trait FloatOutput {
    /// Setzt das gewünschte Tastverhältnis
    ///
    /// Werte außerhalb von 0.0 - 1.0 werden vom Implementierer behandelt.
    fn write_state(&mut self, state: f32);
}
