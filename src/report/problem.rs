use crate::report::model::{Problem, Step, StepId};

/// Presentation tier of a problem's severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// Tolerable (severity 1 and anything unrecognized).
    Fair,
    /// Needs work (severity 2).
    Poor,
    /// Clear fault (severity 3).
    Fault,
}

impl SeverityTier {
    /// Tier for a raw report severity.
    pub fn from_severity(severity: u32) -> Self {
        match severity {
            2 => SeverityTier::Poor,
            3 => SeverityTier::Fault,
            _ => SeverityTier::Fair,
        }
    }
}

/// Outcome of one step given the problems detected at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// No problem detected.
    Pass,
    /// Exactly one problem detected.
    Miss,
    /// More than one problem detected.
    Fail,
}

/// Per-step outcome row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StepStatus {
    /// Step the row describes.
    pub step: StepId,
    /// Number of problems detected at the step.
    pub problems: usize,
    /// Derived outcome.
    pub outcome: StepOutcome,
}

/// The headline problem: highest severity, ties broken by higher score.
///
/// Severity-0 problems never qualify.
pub fn main_problem(problems: &[Problem]) -> Option<&Problem> {
    problems
        .iter()
        .filter(|p| p.severity != 0)
        .reduce(|best, p| {
            if p.severity > best.severity || (p.severity == best.severity && p.score > best.score)
            {
                p
            } else {
                best
            }
        })
}

/// Pass/Miss/Fail per step, in step-table order.
pub fn step_statuses(steps: &[Step], problems: &[Problem]) -> Vec<StepStatus> {
    steps
        .iter()
        .map(|s| {
            let n = problems.iter().filter(|p| p.step_id == s.id).count();
            let outcome = match n {
                0 => StepOutcome::Pass,
                1 => StepOutcome::Miss,
                _ => StepOutcome::Fail,
            };
            StepStatus {
                step: s.id,
                problems: n,
                outcome,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/report/problem.rs"]
mod tests;
