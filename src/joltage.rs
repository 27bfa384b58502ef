//! Fewest presses to meet the joltage totals.
//!
//! Every press of a button adds one to the joltage of each light it
//! affects.  With `x_i` presses of button `i`:
//!
//! ```text
//!   minimise   x_0 + x_1 + ...
//!   subject to sum of x_i over buttons affecting p = joltage[p]
//!              x_i >= 0, integer
//! ```

use num_rational::Ratio;

use crate::{Coef, IntegerProgram, LinExpr, Machine, PsResult, SolverConfig, Val, VarToken};

/// Build the integer program for a machine's joltage totals.
///
/// A button can be pressed at most as often as the smallest joltage
/// among the lights it affects; a button affecting no light is never
/// worth pressing.
fn joltage_program(machine: &Machine) -> (IntegerProgram, Vec<VarToken>) {
    let joltage = machine.joltage();
    let mut program = IntegerProgram::new();

    let presses: Vec<VarToken> = machine
        .actions()
        .iter()
        .map(|action| {
            let max = action.lights().map(|light| joltage[light]).min().unwrap_or(0);
            program.new_var(0..=max)
        })
        .collect();

    for (light, buttons) in machine.incidence().iter().enumerate() {
        let total = buttons
            .iter()
            .fold(LinExpr::from(0), |sum, idx| sum + presses[idx]);
        program.equals(total, Coef::from_integer(joltage[light]));
    }

    program.minimize(
        presses
            .iter()
            .fold(LinExpr::from(0), |sum, &var| sum + var),
    );

    (program, presses)
}

/// Find the fewest button presses meeting every joltage total, with
/// the default solver budget.
///
/// A machine without joltage totals needs no presses.
///
/// # Examples
///
/// ```
/// use machine_solver::{minimum_action_sum, Action, LightState, Machine};
///
/// let machine = Machine::new(
///     LightState::off(1),
///     vec![Action::new([0]).unwrap(), Action::new([0]).unwrap()],
///     vec![5],
/// )
/// .unwrap();
/// assert_eq!(minimum_action_sum(&machine), Ok(5));
/// ```
pub fn minimum_action_sum(machine: &Machine) -> PsResult<u64> {
    minimum_action_sum_with(machine, &SolverConfig::default())
}

/// As [`minimum_action_sum`], with an explicit solver budget.
pub fn minimum_action_sum_with(machine: &Machine, config: &SolverConfig) -> PsResult<u64> {
    if machine.joltage().is_empty() {
        return Ok(0);
    }

    let (program, presses) = joltage_program(machine);
    let solution = program.solve(config)?;

    debug_assert_eq!(
        Ratio::from_integer(presses.iter().map(|&var| solution[var]).sum::<Val>()),
        solution.objective()
    );
    Ok(solution.objective().to_integer() as u64)
}
