//! One-directional hill climbing on a scalar objective.
//!
//! The climber probes `step, 2*step, ...` from the starting position. A
//! probe is accepted only if it lowers `|objective|` and is not blocked.
//! The first rejected probe ends the search and is not counted. Probing is
//! sequential: each decision depends on the previous accepted value.

use log::trace;

use crate::error::Result;

/// Objective value at one probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    /// Objective value, `None` when undefined
    pub value: Option<f64>,
    /// A rejection predicate fired at this position
    pub blocked: bool,
}

/// Climb from `baseline` along `step` for at most `max_steps` probes.
///
/// `evaluate(offset)` returns the objective with the total `offset` applied.
/// Returns the accepted offset (a whole number of steps, possibly zero).
pub fn hill_climb<F>(
    baseline: Option<f64>,
    step: f64,
    max_steps: usize,
    mut evaluate: F,
) -> Result<f64>
where
    F: FnMut(f64) -> Result<Probe>,
{
    let Some(mut best) = baseline.map(f64::abs) else {
        return Ok(0.0);
    };
    let mut accepted = 0usize;
    while accepted < max_steps {
        let offset = (accepted + 1) as f64 * step;
        let probe = evaluate(offset)?;
        match probe.value.map(f64::abs) {
            Some(value) if value < best && !probe.blocked => {
                trace!("[HillClimb] accept offset={offset:.3} |objective|={value:.4}");
                best = value;
                accepted += 1;
            }
            _ => {
                trace!("[HillClimb] stop at offset={offset:.3} probe={probe:?}");
                break;
            }
        }
    }
    Ok(accepted as f64 * step)
}
