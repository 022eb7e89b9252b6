// Duty Profil Task - Fährt ein festes Demo-Profil von Tastverhältnissen ab
use defmt::info;
use embassy_time::{Duration, Timer};

use crate::config::{DUTY_PROFILE, DUTY_STEP_INTERVAL_SECS};
use crate::{RelayCommand, RelayCommandSender};

/// Duty Profil Task - sendet zyklisch `SetDuty` an den Relais-Task
///
/// Ersetzt im Standalone-Betrieb den Host, der sonst die Leistung vorgibt.
///
/// # Parameter
/// - `command_sender`: Channel Sender für Relais-Kommandos
#[embassy_executor::task]
pub async fn duty_profile_task(command_sender: RelayCommandSender) {
    loop {
        for duty in DUTY_PROFILE {
            info!("Profile: duty {}", duty);
            command_sender.send(RelayCommand::SetDuty(duty)).await;
            Timer::after(Duration::from_secs(DUTY_STEP_INTERVAL_SECS)).await;
        }
    }
}
