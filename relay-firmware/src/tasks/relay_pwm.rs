// Relais PWM Task - Erzeugt Software-PWM auf dem Relais-GPIO
use defmt::{debug, info, warn};
use embassy_futures::yield_now;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use relay_core::{DigitalOutput, HalDelay, HalOutput, MicrosDelay};

use crate::config::{RELAY_GPIO_PIN, STATUS_LOG_INTERVAL_CYCLES, pwm_config};
use crate::{RelayCommand, RelayCommandReceiver, SoftPwm};

/// Relais PWM Logic - Generisch über Ausgang und Delay (keine esp-hal Typen)
///
/// Diese Schleife ist der "Scheduler", der das Tastverhältnis aufrecht
/// erhält: `SoftPwm::write_state()` erzeugt pro Aufruf genau einen Zyklus,
/// also wird er hier endlos wiederholt.
///
/// - Empfängt Kommandos (Duty, Frequenz, Aus) vom Profil-Task
/// - Ruft nach jedem Zyklus `yield_now()` auf, damit andere Tasks laufen
/// - Wartet im ausgeschalteten Zustand blockierend auf das nächste Kommando
///
/// # Parameter
/// - `pwm`: SoftPwm Treiber (Hardware oder Mock)
/// - `command_receiver`: Channel Receiver für Relais-Kommandos
pub async fn relay_pwm_logic<P: DigitalOutput, D: MicrosDelay>(
    mut pwm: SoftPwm<'_, P, D>,
    command_receiver: RelayCommandReceiver,
) -> ! {
    pwm.setup();
    info!(
        "Relay: PWM ready at {} Hz ({} us period)",
        pwm.frequency(),
        pwm.period_us()
    );

    let mut duty: f32 = 0.0;
    let mut cycles: u32 = 0;

    loop {
        // Alle anstehenden Kommandos abarbeiten (non-blocking)
        while let Ok(cmd) = command_receiver.try_receive() {
            apply_command(&mut pwm, &mut duty, cmd);
        }

        // Genau ein Zyklus (blockiert bis zu einer Periode)
        pwm.write_state(duty);

        if pwm.is_active() {
            cycles = cycles.wrapping_add(1);
            if cycles % STATUS_LOG_INTERVAL_CYCLES == 0 {
                if let Some(timing) = pwm.last_timing() {
                    debug!("Relay: {} cycles, last {}", cycles, timing);
                }
            }
            yield_now().await;
        } else {
            // Relais ist aus: kein Zyklus nötig bis sich etwas ändert
            let cmd = command_receiver.receive().await;
            apply_command(&mut pwm, &mut duty, cmd);
        }
    }
}

/// Wendet ein Kommando auf Treiber und Soll-Tastverhältnis an
fn apply_command<P: DigitalOutput, D: MicrosDelay>(
    pwm: &mut SoftPwm<'_, P, D>,
    duty: &mut f32,
    cmd: RelayCommand,
) {
    info!("Relay: command {}", cmd);

    match pwm.apply_command(cmd) {
        Ok(Some(target)) => *duty = target,
        Ok(None) => info!("Relay: period now {} us", pwm.period_us()),
        Err(e) => warn!("Relay: {} rejected: {}", cmd, e),
    }
}

/// Relais PWM Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die hardware-unabhängige `relay_pwm_logic()` Funktion auf.
///
/// # Parameter
/// - `relay_pin`: GPIO4 Peripheral für das Relais
/// - `command_receiver`: Channel Receiver für Relais-Kommandos
#[embassy_executor::task]
pub async fn relay_pwm_task(
    relay_pin: esp_hal::peripherals::GPIO4<'static>,
    command_receiver: RelayCommandReceiver,
) {
    info!("Relay: driving GPIO{}", RELAY_GPIO_PIN);

    // Pin gehört dem Task, der Treiber leiht ihn nur aus
    let mut relay = HalOutput::new(Output::new(relay_pin, Level::Low, OutputConfig::default()));
    let delay = HalDelay::new(Delay::new());

    let pwm = SoftPwm::with_config(&mut relay, delay, pwm_config())
        .expect("PWM frequency is validated in config");

    relay_pwm_logic(pwm, command_receiver).await;
}
