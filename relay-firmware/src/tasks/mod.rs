// Task-Modul: Enthält alle Embassy Tasks
//
// Tasks kommunizieren über einen Embassy Channel (Profil → Relais).

pub mod duty_profile;
pub mod relay_pwm;

// Re-export Tasks für einfachen Import
pub use duty_profile::duty_profile_task;
pub use relay_pwm::relay_pwm_task;
