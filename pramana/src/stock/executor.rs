//! Execution strategy for independent per-side work.

use serde::{Deserialize, Serialize};

/// How the convex and concave halves of a computation are scheduled.
///
/// Both modes run the same closures and return the same results; only the
/// scheduling differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Both halves on the calling thread, convex first
    Sequential,
    /// Two-way join on the rayon pool
    #[default]
    Parallel,
}

impl ExecutionMode {
    /// Run `a` and `b`, returning both results.
    pub fn join<A, B, RA, RB>(self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        match self {
            ExecutionMode::Sequential => (a(), b()),
            ExecutionMode::Parallel => rayon::join(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_agree() {
        let data: Vec<f64> = (0..1000).map(|i| i as f64 * 0.001).collect();
        let run = |mode: ExecutionMode| {
            mode.join(
                || data.iter().sum::<f64>(),
                || data.iter().map(|v| v * v).sum::<f64>(),
            )
        };
        assert_eq!(run(ExecutionMode::Sequential), run(ExecutionMode::Parallel));
    }

    #[test]
    fn test_serde_names() {
        let mode: ExecutionMode = serde_yaml::from_str("sequential").unwrap();
        assert_eq!(mode, ExecutionMode::Sequential);
    }
}
