//! This crate solves light-toggling machines.
//!
//! A [`Machine`] has a row of indicator lights, a set of buttons that
//! each toggle some of the lights, and optionally a joltage total for
//! every light.  Two questions are answered for each machine:
//!
//! * [`minimum_toggle_count`]: the fewest button presses that turn the
//!   all-off light row into the target pattern.
//! * [`minimum_action_sum`]: the fewest button presses such that every
//!   light is affected exactly as many times as its joltage total.
//!
//! The second question is an integer linear program, solved exactly by
//! [`IntegerProgram`] with branch-and-bound over a rational simplex
//! relaxation.

pub mod aggregate;

mod error;
mod joltage;
mod linexpr;
mod machine;
mod parse;
mod program;
mod ranges;
mod search;
mod simplex;

use num_rational::Rational64;
use std::ops;

pub use aggregate::{part_one, part_two, FailurePolicy, Gap, Options, Report};
pub use error::Error;
pub use joltage::{minimum_action_sum, minimum_action_sum_with};
pub use linexpr::LinExpr;
pub use machine::{Action, LightState, Machine};
pub use parse::parse_machines;
pub use program::{IntegerProgram, SolverConfig};
pub use search::{minimum_toggle_count, minimum_toggle_count_with, SearchLimits, ToggleSearch};

/// An integer program variable token.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(usize);

/// The type of an integer program variable's value.
pub type Val = i64;

/// The type of the coefficients in a linear expression.
pub type Coef = Rational64;

/// A result of a machine computation.
pub type PsResult<T> = Result<T, Error>;

/// An optimal assignment found by [`IntegerProgram::solve`].
#[derive(Debug)]
pub struct Solution {
    vars: Vec<Val>,
    objective: Coef,
}

impl Solution {
    /// The value of the objective at this assignment.
    pub fn objective(&self) -> Coef {
        self.objective
    }

    /// All variable values, in allocation order.
    pub fn values(&self) -> &[Val] {
        &self.vars
    }
}

impl ops::Index<VarToken> for Solution {
    type Output = Val;
    fn index(&self, var: VarToken) -> &Val {
        let VarToken(idx) = var;
        &self.vars[idx]
    }
}
