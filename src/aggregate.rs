//! Summing per-machine answers across a whole input.
//!
//! Machines are independent, so they are solved in parallel; each
//! worker only borrows its own machine.  Totals are reduced once every
//! machine has finished.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    minimum_action_sum_with, minimum_toggle_count_with, Error, Machine, PsResult, SearchLimits,
    SolverConfig,
};

/// What to do when a machine has no answer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Fail the whole run with the first failing machine's error.
    #[default]
    Abort,
    /// Leave the machine out of the total and record a gap.
    Skip,
}

/// Settings shared by both parts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub limits: SearchLimits,
    pub solver: SolverConfig,
    pub policy: FailurePolicy,
}

/// A machine left out of a total.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gap {
    /// Position of the machine in the input.
    pub index: usize,
    pub error: Error,
}

/// The total over all machines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    pub total: u64,
    pub solved: usize,
    pub gaps: Vec<Gap>,
}

fn collect<F>(part: &str, machines: &[Machine], policy: FailurePolicy, solve: F) -> PsResult<Report>
where
    F: Fn(&Machine) -> PsResult<u64> + Sync,
{
    let results: Vec<PsResult<u64>> = machines.par_iter().map(|machine| solve(machine)).collect();

    let mut report = Report::default();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(presses) => {
                debug!(part, index, presses, "machine solved");
                report.total += presses;
                report.solved += 1;
            }
            Err(error) => match policy {
                FailurePolicy::Abort => {
                    warn!(part, index, %error, "machine failed, aborting");
                    return Err(error);
                }
                FailurePolicy::Skip => {
                    warn!(part, index, %error, "machine skipped");
                    report.gaps.push(Gap { index, error });
                }
            },
        }
    }

    info!(
        part,
        total = report.total,
        solved = report.solved,
        gaps = report.gaps.len(),
        "part finished"
    );
    Ok(report)
}

/// Total of the fewest presses lighting each machine's target pattern.
pub fn part_one(machines: &[Machine], options: &Options) -> PsResult<Report> {
    let limits = options.limits;
    collect("one", machines, options.policy, |machine| {
        minimum_toggle_count_with(machine, limits)
    })
}

/// Total of the fewest presses meeting each machine's joltage totals.
pub fn part_two(machines: &[Machine], options: &Options) -> PsResult<Report> {
    let solver = options.solver;
    collect("two", machines, options.policy, |machine| {
        minimum_action_sum_with(machine, &solver)
    })
}

#[cfg(test)]
mod tests {
    use super::{part_one, FailurePolicy, Gap, Options};
    use crate::{parse_machines, Error, SearchLimits};

    #[test]
    fn test_abort_reports_first_failure() {
        let machines = parse_machines("[#] (0)\n[#]\n[#] (0)\n").unwrap();
        let result = part_one(&machines, &Options::default());
        assert_eq!(result, Err(Error::Unreachable));
    }

    #[test]
    fn test_abort_follows_input_order() {
        // Machine 1 runs out of states, machine 2 is unreachable.
        let options = Options {
            limits: SearchLimits {
                max_states: Some(2),
            },
            ..Options::default()
        };
        let machines = parse_machines("[#] (0)\n[##] (0) (1)\n[#]\n").unwrap();
        assert_eq!(
            part_one(&machines, &options),
            Err(Error::Timeout { explored: 2 })
        );

        let machines = parse_machines("[#] (0)\n[#]\n[##] (0) (1)\n").unwrap();
        assert_eq!(part_one(&machines, &options), Err(Error::Unreachable));
    }

    #[test]
    fn test_skip_records_gaps() {
        let machines = parse_machines("[#] (0)\n[#]\n[##] (0) (1)\n").unwrap();
        let options = Options {
            policy: FailurePolicy::Skip,
            ..Options::default()
        };
        let report = part_one(&machines, &options).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.solved, 2);
        assert_eq!(
            report.gaps,
            vec![Gap {
                index: 1,
                error: Error::Unreachable
            }]
        );
    }
}
