//! Fewest presses to light the target pattern.
//!
//! Pressing a button twice restores the previous row, so only the set
//! of pressed buttons matters and the reachable rows form a finite
//! graph of at most 2^N states for N lights.  The search walks that
//! graph breadth-first from the all-off row; the first layer containing
//! the target gives the answer.  Once a layer adds no unseen row the
//! graph is exhausted and the target is unreachable.
//!
//! The visited set grows as O(2^N), so this is only practical for the
//! small light counts machines have.

use std::collections::HashSet;

use crate::{Error, LightState, Machine, PsResult};

/// Bounds on the reachability search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchLimits {
    /// Give up with [`Error::Timeout`] once this many distinct rows have
    /// been visited.  None searches the whole graph.
    pub max_states: Option<usize>,
}

/// Breadth-first search state for one machine.
pub struct ToggleSearch<'a> {
    machine: &'a Machine,
    limits: SearchLimits,

    // Rows already queued; never expanded twice.
    seen: HashSet<LightState>,
}

impl<'a> ToggleSearch<'a> {
    pub fn new(machine: &'a Machine, limits: SearchLimits) -> Self {
        ToggleSearch {
            machine,
            limits,
            seen: HashSet::new(),
        }
    }

    /// Run the search, returning the fewest presses.
    pub fn run(&mut self) -> PsResult<u64> {
        let target = self.machine.target();
        self.seen.clear();
        if target.is_all_off() {
            return Ok(0);
        }

        let start = LightState::off(self.machine.num_lights());

        self.seen.insert(start.clone());
        let mut frontier = vec![start];
        let mut presses = 0;

        while !frontier.is_empty() {
            presses += 1;

            let mut next = Vec::new();
            for state in frontier.iter() {
                for action in self.machine.actions() {
                    let pressed = state.pressed(action);
                    if pressed == *target {
                        return Ok(presses);
                    }

                    if !self.seen.contains(&pressed) {
                        self.check_limits()?;
                        self.seen.insert(pressed.clone());
                        next.push(pressed);
                    }
                }
            }

            frontier = next;
        }

        Err(Error::Unreachable)
    }

    /// The number of distinct rows visited by the last run.
    pub fn states_visited(&self) -> usize {
        self.seen.len()
    }

    fn check_limits(&self) -> PsResult<()> {
        match self.limits.max_states {
            Some(max) if self.seen.len() >= max => Err(Error::Timeout {
                explored: self.seen.len() as u64,
            }),
            _ => Ok(()),
        }
    }
}

/// Find the fewest button presses that turn the all-off row into the
/// machine's target.
///
/// Returns [`Error::Unreachable`] if no combination of buttons produces
/// the target.
///
/// # Examples
///
/// ```
/// use machine_solver::{minimum_toggle_count, Action, LightState, Machine};
///
/// let machine = Machine::new(
///     LightState::from_flags(&[true, true, true]),
///     vec![Action::new([0, 2]).unwrap(), Action::new([1]).unwrap()],
///     vec![],
/// )
/// .unwrap();
/// assert_eq!(minimum_toggle_count(&machine), Ok(2));
/// ```
pub fn minimum_toggle_count(machine: &Machine) -> PsResult<u64> {
    minimum_toggle_count_with(machine, SearchLimits::default())
}

/// As [`minimum_toggle_count`], with an explicit bound on the visited
/// rows.
pub fn minimum_toggle_count_with(machine: &Machine, limits: SearchLimits) -> PsResult<u64> {
    ToggleSearch::new(machine, limits).run()
}

#[cfg(test)]
mod tests {
    use super::{minimum_toggle_count, minimum_toggle_count_with, SearchLimits, ToggleSearch};
    use crate::{Action, Error, LightState, Machine};

    fn machine(target: &[bool], actions: &[&[usize]]) -> Machine {
        let actions = actions
            .iter()
            .map(|lights| Action::new(lights.iter().copied()).unwrap())
            .collect();
        Machine::new(LightState::from_flags(target), actions, vec![]).unwrap()
    }

    #[test]
    fn test_all_off_target_needs_no_presses() {
        let m = machine(&[false, false], &[&[0]]);
        assert_eq!(minimum_toggle_count(&m), Ok(0));
    }

    #[test]
    fn test_two_presses() {
        let m = machine(&[true, true, true], &[&[0, 2], &[1]]);
        assert_eq!(minimum_toggle_count(&m), Ok(2));
    }

    #[test]
    fn test_outside_span_is_unreachable() {
        // [.##] is not a combination of {0,2} and {1}.
        let m = machine(&[false, true, true], &[&[0, 2], &[1]]);
        assert_eq!(minimum_toggle_count(&m), Err(Error::Unreachable));
    }

    #[test]
    fn test_no_buttons_is_unreachable() {
        let m = machine(&[true], &[]);
        assert_eq!(minimum_toggle_count(&m), Err(Error::Unreachable));
    }

    #[test]
    fn test_state_space_is_bounded() {
        // Three buttons over four lights reach at most 2^3 rows.
        let m = machine(&[true, true, true, true], &[&[0, 1], &[1, 2], &[0, 2]]);
        let mut search = ToggleSearch::new(&m, SearchLimits::default());
        assert_eq!(search.run(), Err(Error::Unreachable));
        assert!(search.states_visited() <= 8);
    }

    #[test]
    fn test_state_limit() {
        let m = machine(
            &[true, true, true, true, true],
            &[&[0], &[1], &[2], &[3], &[4]],
        );
        let limits = SearchLimits {
            max_states: Some(4),
        };
        assert!(matches!(
            minimum_toggle_count_with(&m, limits),
            Err(Error::Timeout { .. })
        ));
        assert_eq!(minimum_toggle_count(&m), Ok(5));
    }
}
