// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod tasks;

// Re-exports von relay-core
pub use relay_core::{PwmConfig, PwmError, RelayCommand, SoftPwm};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::COMMAND_QUEUE_DEPTH;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Sender<'static, NoopRawMutex, RelayCommand, 4>
// Nutze:  RelayCommandSender

/// Channel für Relais-Kommandos (Profil-Task → Relais-Task)
/// NoopRawMutex reicht: alle Tasks laufen auf demselben Executor
pub type RelayCommandChannel = Channel<NoopRawMutex, RelayCommand, COMMAND_QUEUE_DEPTH>;

/// Sender für Relais-Kommandos
pub type RelayCommandSender = Sender<'static, NoopRawMutex, RelayCommand, COMMAND_QUEUE_DEPTH>;

/// Receiver für Relais-Kommandos (nur der Relais-Task empfängt)
pub type RelayCommandReceiver = Receiver<'static, NoopRawMutex, RelayCommand, COMMAND_QUEUE_DEPTH>;
