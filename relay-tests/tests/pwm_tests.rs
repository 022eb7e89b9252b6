//! Integration Tests für den SoftPwm Treiber
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen aufzeichnende Mocks
//! für Ausgang und Delay.

use std::cell::RefCell;
use std::rc::Rc;

use relay_core::{
    DigitalOutput, FloatOutput, MicrosDelay, PulseTiming, PwmConfig, PwmError, RelayCommand,
    Rounding, SoftPwm,
};

// ============================================================================
// Mock Output / Mock Delay
// ============================================================================

/// Ein Eintrag in der gemeinsamen Aufzeichnung
#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Setup,
    Write(bool),
    Delay(u32),
}

type Trace = Rc<RefCell<Vec<Event>>>;

struct MockOutput {
    trace: Trace,
    level: bool,
}

impl MockOutput {
    fn new(trace: &Trace) -> Self {
        Self {
            trace: Rc::clone(trace),
            // Undefinierter Startpegel: setup() muss ihn auf Low ziehen
            level: true,
        }
    }
}

impl DigitalOutput for MockOutput {
    fn setup(&mut self) {
        self.trace.borrow_mut().push(Event::Setup);
    }

    fn digital_write(&mut self, level: bool) {
        self.level = level;
        self.trace.borrow_mut().push(Event::Write(level));
    }
}

struct MockDelay {
    trace: Trace,
}

impl MicrosDelay for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Event::Delay(us));
    }
}

fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

fn take(trace: &Trace) -> Vec<Event> {
    trace.borrow_mut().drain(..).collect()
}

fn delays(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Delay(us) => Some(*us),
            _ => None,
        })
        .collect()
}

fn pulse(on_us: u32, off_us: u32) -> Vec<Event> {
    vec![
        Event::Write(true),
        Event::Delay(on_us),
        Event::Write(false),
        Event::Delay(off_us),
    ]
}

// ============================================================================
// Tests: setup()
// ============================================================================

#[test]
fn test_setup_drives_line_low_without_delay() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.setup();

    let events = take(&trace);
    assert_eq!(events[0], Event::Setup);
    assert_eq!(events[1], Event::Write(false));
    assert!(delays(&events).is_empty());
    assert!(!pwm.is_active());
    assert!(pwm.zero_means_zero());
    assert_eq!(pwm.frequency(), 1000.0);
    assert_eq!(pwm.period_us(), 1000);
    drop(pwm);
    assert!(!output.level);
}

#[test]
fn test_setup_resets_frequency_to_configured_default() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.set_frequency(50.0).unwrap();
    assert_eq!(pwm.period_us(), 20_000);

    pwm.setup();
    assert_eq!(pwm.frequency(), 1000.0);
    assert_eq!(pwm.period_us(), 1000);
}

#[test]
fn test_setup_uses_config_override() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let config = PwmConfig {
        frequency_hz: 250.0,
        rounding: Rounding::Truncate,
    };
    let mut pwm = SoftPwm::with_config(&mut output, MockDelay { trace: trace.clone() }, config)
        .unwrap();

    pwm.setup();

    assert_eq!(pwm.period_us(), 4000);
    assert_eq!(pwm.rounding(), Rounding::Truncate);
    assert_eq!(pwm.config(), config);
}

#[test]
fn test_setup_restores_config_override_after_runtime_change() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let config = PwmConfig {
        frequency_hz: 250.0,
        ..PwmConfig::default()
    };
    let mut pwm = SoftPwm::with_config(&mut output, MockDelay { trace: trace.clone() }, config)
        .unwrap();

    pwm.set_frequency(50.0).unwrap();
    assert_eq!(pwm.period_us(), 20_000);

    pwm.setup();
    assert_eq!(pwm.frequency(), 250.0);
    assert_eq!(pwm.period_us(), 4000);
}

#[test]
fn test_with_config_rejects_invalid_frequency() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let config = PwmConfig {
        frequency_hz: 0.0,
        ..PwmConfig::default()
    };

    let result = SoftPwm::with_config(&mut output, MockDelay { trace: trace.clone() }, config);
    assert!(matches!(result, Err(PwmError::InvalidFrequency)));
    assert!(take(&trace).is_empty());
}

// ============================================================================
// Tests: set_frequency()
// ============================================================================

#[test]
fn test_set_frequency_recomputes_period() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.set_frequency(500.0).unwrap();
    assert_eq!(pwm.frequency(), 500.0);
    assert_eq!(pwm.period_us(), 2000);

    pwm.set_frequency(3.0).unwrap();
    assert_eq!(pwm.period_us(), 333_333);

    // Keine Seiteneffekte auf die Leitung
    assert!(take(&trace).is_empty());
}

#[test]
fn test_set_frequency_rejects_non_positive_and_keeps_state() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.set_frequency(200.0).unwrap();

    assert_eq!(pwm.set_frequency(0.0), Err(PwmError::InvalidFrequency));
    assert_eq!(pwm.set_frequency(-10.0), Err(PwmError::InvalidFrequency));
    assert_eq!(pwm.set_frequency(f32::NAN), Err(PwmError::InvalidFrequency));

    assert_eq!(pwm.frequency(), 200.0);
    assert_eq!(pwm.period_us(), 5000);
}

// ============================================================================
// Tests: write_state()
// ============================================================================

#[test]
fn test_write_quarter_duty_at_1khz() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.setup();
    take(&trace);

    pwm.set_frequency(1000.0).unwrap();
    pwm.write_state(0.25);

    assert_eq!(take(&trace), pulse(250, 750));
    assert!(pwm.is_active());
    assert_eq!(
        pwm.last_timing(),
        Some(PulseTiming {
            on_us: 250,
            off_us: 750
        })
    );
    drop(pwm);
    assert!(!output.level);
}

#[test]
fn test_write_full_duty_at_500hz() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.set_frequency(500.0).unwrap();
    pwm.write_state(1.0);

    assert_eq!(take(&trace), pulse(2000, 0));
}

#[test]
fn test_write_zero_is_immediate_off() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.setup();
    pwm.write_state(0.5);
    assert!(pwm.is_active());
    take(&trace);

    pwm.write_state(0.0);

    assert_eq!(take(&trace), vec![Event::Write(false)]);
    assert!(!pwm.is_active());
    assert_eq!(pwm.last_timing(), None);
}

#[test]
fn test_write_negative_behaves_like_zero() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.write_state(0.8);
    take(&trace);

    pwm.write_state(-0.5);

    assert_eq!(take(&trace), vec![Event::Write(false)]);
    assert!(!pwm.is_active());
    drop(pwm);
    assert!(!output.level);
}

#[test]
fn test_write_nan_behaves_like_zero() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.write_state(f32::NAN);

    assert_eq!(take(&trace), vec![Event::Write(false)]);
    assert!(!pwm.is_active());
}

#[test]
fn test_write_above_one_saturates() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.write_state(1.0);
    let full = take(&trace);
    pwm.write_state(2.5);
    let saturated = take(&trace);

    assert_eq!(full, saturated);
    assert_eq!(saturated, pulse(1000, 0));
}

#[test]
fn test_write_tiny_duty_still_emits_cycle() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.write_state(0.0001);

    assert_eq!(take(&trace), pulse(0, 1000));
    assert!(pwm.is_active());
}

#[test]
fn test_write_is_idempotent() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.set_frequency(800.0).unwrap();

    pwm.write_state(0.6);
    let first = take(&trace);
    pwm.write_state(0.6);
    let second = take(&trace);

    assert_eq!(first, second);
    assert_eq!(first, pulse(750, 500));
}

#[test]
fn test_write_truncate_vs_nearest() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let config = PwmConfig {
        frequency_hz: 1000.0,
        rounding: Rounding::Truncate,
    };
    let mut truncating =
        SoftPwm::with_config(&mut output, MockDelay { trace: trace.clone() }, config).unwrap();
    truncating.write_state(0.3337);
    drop(truncating);
    assert_eq!(take(&trace), pulse(333, 667));

    let mut nearest = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    nearest.write_state(0.3337);
    assert_eq!(take(&trace), pulse(334, 666));
}

#[test]
fn test_active_tracks_only_latest_call() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.write_state(0.4);
    assert!(pwm.is_active());
    pwm.write_state(0.0);
    assert!(!pwm.is_active());
    pwm.write_state(0.1);
    assert!(pwm.is_active());
    pwm.write_state(-1.0);
    assert!(!pwm.is_active());
}

#[test]
fn test_frequency_change_applies_to_next_cycle_only() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    pwm.write_state(0.5);
    pwm.set_frequency(100.0).unwrap();
    pwm.write_state(0.5);

    assert_eq!(delays(&take(&trace)), vec![500, 500, 5000, 5000]);
}

#[test]
fn test_float_output_trait_dispatch() {
    fn drive(output: &mut dyn FloatOutput, state: f32) {
        output.write_state(state);
    }

    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    drive(&mut pwm, 0.75);

    assert_eq!(take(&trace), pulse(750, 250));
}

#[test]
fn test_borrowed_delay() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut delay = MockDelay {
        trace: trace.clone(),
    };

    {
        let mut pwm = SoftPwm::new(&mut output, &mut delay);
        pwm.write_state(0.5);
    }

    // Delay ist nach dem Treiber wieder frei verwendbar
    delay.delay_us(42);
    assert_eq!(delays(&take(&trace)), vec![500, 500, 42]);
}

#[test]
fn test_write_full_duty_on_long_period() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    // 0.05 Hz -> 20 s Periode (Zeit-Proportionierung für SSR-Heizungen)
    pwm.set_frequency(0.05).unwrap();
    assert_eq!(pwm.period_us(), 20_000_000);

    pwm.write_state(1.5);
    assert_eq!(take(&trace), pulse(20_000_000, 0));

    pwm.write_state(0.5);
    assert_eq!(take(&trace), pulse(10_000_000, 10_000_000));
}

// ============================================================================
// Tests: apply_command()
// ============================================================================

#[test]
fn test_apply_command_set_duty() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    assert_eq!(pwm.apply_command(RelayCommand::SetDuty(0.4)), Ok(Some(0.4)));
    assert_eq!(pwm.apply_command(RelayCommand::Off), Ok(Some(0.0)));

    // Kommandos alleine schalten die Leitung nicht
    assert!(take(&trace).is_empty());
}

#[test]
fn test_apply_command_set_frequency() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });

    assert_eq!(pwm.apply_command(RelayCommand::SetFrequency(500.0)), Ok(None));
    assert_eq!(pwm.period_us(), 2000);

    pwm.write_state(0.25);
    assert_eq!(take(&trace), pulse(500, 1500));
}

#[test]
fn test_apply_command_rejects_invalid_frequency() {
    let trace = new_trace();
    let mut output = MockOutput::new(&trace);
    let mut pwm = SoftPwm::new(&mut output, MockDelay { trace: trace.clone() });
    pwm.set_frequency(200.0).unwrap();

    assert_eq!(
        pwm.apply_command(RelayCommand::SetFrequency(-1.0)),
        Err(PwmError::InvalidFrequency)
    );
    assert_eq!(pwm.frequency(), 200.0);
    assert_eq!(pwm.period_us(), 5000);
}
