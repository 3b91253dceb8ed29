//! Interactive GPU configuration session.
//!
//! A strictly sequential, blocking operator dialogue: list the rig's GPUs,
//! pick one (1-based), then optionally enter a new memory clock and a new
//! power limit. Each value field is independent and follows a parse-or-keep
//! policy: a blank or unparseable answer means "no change", never "set to
//! zero". Only the device selection aborts the session when invalid.
//!
//! The session reads from and writes to injected handles so every step can
//! be tested without a real terminal, and talks to the driver through
//! [`GpuGateway`] so tests can script it.

use std::fmt;
use std::io::{BufRead, Write};

use thiserror::Error;

use crate::monitor::{GatewayError, GpuGateway};
use crate::utils::format_limit;

/// What happened to one configurable field during the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The operator provided a value and the driver accepted it.
    Applied(u32),
    /// Blank or unparseable input; the existing setting stands.
    Kept,
    /// The operator provided a value and the driver rejected it.
    Rejected(String),
}

/// Structured result of a completed session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub device_index: u32,
    pub device_name: String,
    pub memory_clock: FieldOutcome,
    pub power_limit: FieldOutcome,
}

/// Ways a session can end before reaching the configuration steps.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("no GPUs available to configure")]
    NoDevices,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOutcome::Applied(v) => write!(f, "set to {}", v),
            FieldOutcome::Kept => write!(f, "kept current setting"),
            FieldOutcome::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Run one configuration session against `gateway`, prompting on `output`
/// and reading operator answers from `input`.
///
/// Always starts from a fresh `list_devices` call so the dialogue reflects
/// current driver state, never a stale display snapshot.
pub fn run<G, R, W>(gateway: &mut G, input: &mut R, output: &mut W) -> Result<SessionOutcome, SessionError>
where
    G: GpuGateway + ?Sized,
    R: BufRead,
    W: Write,
{
    let devices = gateway.list_devices()?;
    if devices.is_empty() {
        return Err(SessionError::NoDevices);
    }

    writeln!(output, "Available GPUs:")?;
    for d in &devices {
        writeln!(
            output,
            "  {}. {} ({} MiB, power limit {})",
            d.index + 1,
            d.name,
            d.memory_total_mib,
            format_limit(d.power_limit_watts),
        )?;
    }

    // Step 2: 1-based device selection. No retry loop; bad input aborts.
    let answer = prompt(input, output, "Select GPU to configure (number): ")?;
    let selected = match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= devices.len() => &devices[n - 1],
        Ok(n) => {
            return Err(SessionError::InvalidSelection(format!(
                "{} is out of range (valid: 1-{})",
                n,
                devices.len()
            )))
        }
        Err(_) => {
            return Err(SessionError::InvalidSelection(format!(
                "{:?} is not a number",
                answer
            )))
        }
    };
    let index = selected.index;
    let name = selected.name.clone();

    // Step 3: optional memory clock, independent of the power limit below.
    let answer = prompt(
        input,
        output,
        "Set memory clock in MHz (press Enter to keep current): ",
    )?;
    let memory_clock = apply_field(&answer, output, "memory clock", "MHz", |mhz| {
        gateway.set_memory_clock(index, mhz)
    })?;

    // Step 4: optional power limit, same parse-or-keep policy.
    let answer = prompt(
        input,
        output,
        "Set power limit in W (press Enter to keep current): ",
    )?;
    let power_limit = apply_field(&answer, output, "power limit", "W", |watts| {
        gateway.set_power_limit(index, watts)
    })?;

    writeln!(output, "\nConfiguration complete for {}", name)?;

    Ok(SessionOutcome {
        device_index: index,
        device_name: name,
        memory_clock,
        power_limit,
    })
}

/// Parse one optional field and push it through the gateway.
///
/// Blank input keeps the current setting. Unparseable input reports the
/// problem and keeps the current setting; the session continues. A driver
/// rejection is reported but also does not end the session, so the other
/// field still gets its turn.
fn apply_field<W, F>(
    answer: &str,
    output: &mut W,
    label: &str,
    unit: &str,
    mut write: F,
) -> Result<FieldOutcome, SessionError>
where
    W: Write,
    F: FnMut(u32) -> Result<(), GatewayError>,
{
    if answer.is_empty() {
        writeln!(output, "Keeping current {}.", label)?;
        return Ok(FieldOutcome::Kept);
    }

    let value = match answer.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            writeln!(output, "Invalid {} value. Keeping current setting.", label)?;
            return Ok(FieldOutcome::Kept);
        }
    };

    match write(value) {
        Ok(()) => {
            writeln!(output, "{} updated to {} {}", label, value, unit)?;
            Ok(FieldOutcome::Applied(value))
        }
        Err(e) => {
            writeln!(output, "{} not applied: {}", label, e)?;
            Ok(FieldOutcome::Rejected(e.to_string()))
        }
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> std::io::Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::testing::{device, FakeGateway};

    fn run_session(gw: &mut FakeGateway, answers: &str) -> Result<SessionOutcome, SessionError> {
        let mut input = answers.as_bytes();
        let mut output = Vec::new();
        run(gw, &mut input, &mut output)
    }

    fn three_gpus() -> FakeGateway {
        FakeGateway::new(vec![
            device(0, Some(110.0)),
            device(1, Some(95.5)),
            device(2, None),
        ])
    }

    #[test]
    fn blank_answers_issue_zero_writes() {
        let mut gw = three_gpus();
        let outcome = run_session(&mut gw, "1\n\n\n").unwrap();

        assert_eq!(gw.write_count(), 0);
        assert_eq!(outcome.memory_clock, FieldOutcome::Kept);
        assert_eq!(outcome.power_limit, FieldOutcome::Kept);
    }

    #[test]
    fn applies_both_fields_when_provided() {
        let mut gw = three_gpus();
        let outcome = run_session(&mut gw, "2\n5001\n180\n").unwrap();

        assert_eq!(outcome.device_index, 1);
        assert_eq!(gw.clock_writes, vec![(1, 5001)]);
        assert_eq!(gw.power_writes, vec![(1, 180)]);
        assert_eq!(outcome.memory_clock, FieldOutcome::Applied(5001));
        assert_eq!(outcome.power_limit, FieldOutcome::Applied(180));
    }

    #[test]
    fn selection_zero_is_invalid_and_writes_nothing() {
        // Valid 1-based range for three devices is 1-3.
        let mut gw = three_gpus();
        let err = run_session(&mut gw, "0\n").unwrap_err();

        assert!(matches!(err, SessionError::InvalidSelection(_)));
        assert_eq!(gw.write_count(), 0);
    }

    #[test]
    fn selection_out_of_range_aborts() {
        let mut gw = three_gpus();
        let err = run_session(&mut gw, "4\n").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSelection(_)));
    }

    #[test]
    fn non_numeric_selection_aborts() {
        let mut gw = three_gpus();
        let err = run_session(&mut gw, "first\n").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSelection(_)));
        assert_eq!(gw.write_count(), 0);
    }

    #[test]
    fn non_numeric_power_limit_keeps_setting_and_completes() {
        let mut gw = three_gpus();
        let outcome = run_session(&mut gw, "1\n5001\nlots\n").unwrap();

        // The clock write went through; the bad power value was kept,
        // and the session still reported completion.
        assert_eq!(gw.clock_writes, vec![(0, 5001)]);
        assert!(gw.power_writes.is_empty());
        assert_eq!(outcome.power_limit, FieldOutcome::Kept);
        assert_eq!(outcome.device_name, "GeForce RTX 3070");
    }

    #[test]
    fn bad_memory_clock_does_not_block_power_limit() {
        let mut gw = three_gpus();
        let outcome = run_session(&mut gw, "1\nfast\n200\n").unwrap();

        assert_eq!(outcome.memory_clock, FieldOutcome::Kept);
        assert_eq!(outcome.power_limit, FieldOutcome::Applied(200));
        assert_eq!(gw.power_writes, vec![(0, 200)]);
    }

    #[test]
    fn driver_rejection_is_reported_not_fatal() {
        let mut gw = three_gpus();
        gw.reject_writes = true;
        let outcome = run_session(&mut gw, "3\n6000\n150\n").unwrap();

        assert!(matches!(outcome.memory_clock, FieldOutcome::Rejected(_)));
        assert!(matches!(outcome.power_limit, FieldOutcome::Rejected(_)));
    }

    #[test]
    fn no_devices_ends_the_session() {
        let mut gw = FakeGateway::new(Vec::new());
        let err = run_session(&mut gw, "").unwrap_err();
        assert!(matches!(err, SessionError::NoDevices));
    }

    #[test]
    fn prompts_list_devices_one_based() {
        let mut gw = three_gpus();
        let mut input = "1\n\n\n".as_bytes();
        let mut output = Vec::new();
        run(&mut gw, &mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1. GeForce RTX 3070"));
        assert!(text.contains("3. GeForce RTX 3090"));
        assert!(text.contains("Configuration complete for GeForce RTX 3070"));
    }
}
