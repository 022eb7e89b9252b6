// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use defmt::info;
use relay_pwm::RelayCommandChannel;
use relay_pwm::config::pwm_frequency_hz;
use relay_pwm::tasks::{duty_profile_task, relay_pwm_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    // Wichtig für präzise µs-Delays beim Bit-Banging
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("Relay PWM firmware starting ({} Hz)", pwm_frequency_hz());

    // Kommando-Channel erstellen (Profil-Task → Relais-Task)
    static COMMAND_CHANNEL: static_cell::StaticCell<RelayCommandChannel> =
        static_cell::StaticCell::new();
    let command_channel = COMMAND_CHANNEL.init(RelayCommandChannel::new());
    let command_sender = command_channel.sender();
    let command_receiver = command_channel.receiver();

    // Spawn Relais Task (besitzt GPIO4 und den SoftPwm Treiber)
    spawner
        .spawn(relay_pwm_task(peripherals.GPIO4, command_receiver))
        .unwrap();

    // Spawn Profil Task (gibt die Tastverhältnisse vor)
    spawner.spawn(duty_profile_task(command_sender)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
