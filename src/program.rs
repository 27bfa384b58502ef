//! Integer programs and their branch-and-bound search.

use num_rational::Ratio;
use std::cell::Cell;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use crate::linexpr::LinExpr;
use crate::ranges::Ranges;
use crate::simplex;
use crate::{Coef, Error, PsResult, Solution, Val, VarToken};

/// Budget for [`IntegerProgram::solve`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// Maximum branch-and-bound nodes to explore.
    pub max_nodes: u64,
    /// Maximum wall-clock time to search.
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
            timeout: None,
        }
    }
}

/// An integer program: bounded integer variables, linear equalities,
/// and a linear objective to minimise.
pub struct IntegerProgram {
    // The number of variables in the program.
    num_vars: usize,

    // The number of nodes explored by the last search.
    num_nodes: Cell<u64>,

    // The candidate values of each variable.
    domains: Vec<Ranges>,

    // Each row is an expression constrained to equal 0.
    rows: Vec<LinExpr>,

    objective: LinExpr,
}

/// The best integral solution found so far.
struct Incumbent {
    objective: Coef,
    vars: Vec<Val>,
}

/*--------------------------------------------------------------*/

impl IntegerProgram {
    /// Allocate a new integer program.
    ///
    /// # Examples
    ///
    /// ```
    /// machine_solver::IntegerProgram::new();
    /// ```
    pub fn new() -> Self {
        IntegerProgram {
            num_vars: 0,
            num_nodes: Cell::new(0),
            domains: Vec::new(),
            rows: Vec::new(),
            objective: LinExpr::from(0),
        }
    }

    /// Allocate a variable taking integer values in the given range.
    pub fn new_var(&mut self, range: RangeInclusive<Val>) -> VarToken {
        let var = VarToken(self.num_vars);
        self.num_vars += 1;
        self.domains.push(range.into());
        var
    }

    /// Allocate a 1d vector of variables, each with the same range.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut program = machine_solver::IntegerProgram::new();
    /// let presses = program.new_vars(4, 0..=10);
    /// assert_eq!(presses.len(), 4);
    /// ```
    pub fn new_vars(&mut self, n: usize, range: RangeInclusive<Val>) -> Vec<VarToken> {
        let mut vars = Vec::with_capacity(n);
        for _ in 0..n {
            vars.push(self.new_var(range.clone()));
        }
        vars
    }

    /// Add an Equality constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut program = machine_solver::IntegerProgram::new();
    /// let vars = program.new_vars(3, 0..=9);
    ///
    /// program.equals(vars[0] + vars[1] + vars[2], 15);
    /// ```
    pub fn equals<L, R>(&mut self, lhs: L, rhs: R)
    where
        L: Into<LinExpr>,
        R: Into<LinExpr>,
    {
        self.rows.push(lhs.into() - rhs.into());
    }

    /// Set the expression to minimise.  Defaults to the constant 0.
    pub fn minimize<E: Into<LinExpr>>(&mut self, objective: E) {
        self.objective = objective.into();
    }

    /// Find an assignment minimising the objective.
    ///
    /// Returns [`Error::Infeasible`] if no integer assignment satisfies
    /// every equality, or [`Error::Timeout`] if the budget ran out
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut program = machine_solver::IntegerProgram::new();
    /// let x = program.new_var(0..=10);
    /// let y = program.new_var(0..=10);
    /// program.equals(x + 2 * y, 7);
    /// program.minimize(x + y);
    ///
    /// let solution = program.solve(&Default::default()).unwrap();
    /// assert_eq!((solution[x], solution[y]), (1, 3));
    /// ```
    pub fn solve(&self, config: &SolverConfig) -> PsResult<Solution> {
        self.num_nodes.set(0);

        let mut search = BranchSearch::new(self, config);
        search.run()?;

        search
            .incumbent
            .map(|best| Solution {
                vars: best.vars,
                objective: best.objective,
            })
            .ok_or(Error::Infeasible)
    }

    /// Get the number of nodes explored by the last solve.
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes.get()
    }

    /// Get the number of variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Check an integer assignment against every equality.
    pub fn is_satisfied_by(&self, values: &[Val]) -> bool {
        values.len() == self.num_vars
            && values
                .iter()
                .zip(self.domains.iter())
                .all(|(&val, domain)| domain.contains(val))
            && self.rows.iter().all(|row| row.eval(values) == Ratio::from_integer(0))
    }
}

impl Default for IntegerProgram {
    fn default() -> Self {
        Self::new()
    }
}

/*--------------------------------------------------------------*/

/// Depth-first branch-and-bound over variable domains.
struct BranchSearch<'a> {
    program: &'a IntegerProgram,
    config: &'a SolverConfig,
    deadline: Option<Instant>,

    // Pending subproblems, each a narrowing of the variable domains.
    stack: Vec<Vec<Ranges>>,

    incumbent: Option<Incumbent>,

    // Whether objective values at integer points are always integers,
    // which lets relaxation bounds be rounded up.
    integral_objective: bool,
}

impl<'a> BranchSearch<'a> {
    fn new(program: &'a IntegerProgram, config: &'a SolverConfig) -> Self {
        BranchSearch {
            program,
            config,
            deadline: config.timeout.map(|t| Instant::now() + t),
            stack: vec![program.domains.clone()],
            incumbent: None,
            integral_objective: program.objective.is_integral(),
        }
    }

    fn run(&mut self) -> PsResult<()> {
        while let Some(domains) = self.stack.pop() {
            self.count_node()?;
            self.expand(domains);
        }

        Ok(())
    }

    fn count_node(&self) -> PsResult<()> {
        let explored = self.program.num_nodes.get() + 1;
        self.program.num_nodes.set(explored);

        let out_of_time = self.deadline.map_or(false, |d| Instant::now() >= d);
        if explored > self.config.max_nodes || out_of_time {
            return Err(Error::Timeout { explored });
        }

        Ok(())
    }

    /// Bound one subproblem, then prune it, accept it, or split it.
    fn expand(&mut self, domains: Vec<Ranges>) {
        let bounds = match domains
            .iter()
            .map(Ranges::get_bounds)
            .collect::<Option<Vec<_>>>()
        {
            Some(bounds) => bounds,
            None => return,
        };

        let program = self.program;
        let relaxation = match simplex::relax(&program.rows, &program.objective, &bounds) {
            Some(relaxation) => relaxation,
            None => return,
        };

        let bound = if self.integral_objective {
            relaxation.objective.ceil()
        } else {
            relaxation.objective
        };
        if let Some(best) = &self.incumbent {
            if bound >= best.objective {
                return;
            }
        }

        match relaxation.values.iter().position(|v| !v.is_integer()) {
            None => {
                let vars = relaxation.values.iter().map(|v| v.to_integer()).collect();
                self.incumbent = Some(Incumbent {
                    objective: relaxation.objective,
                    vars,
                });
            }

            Some(idx) => {
                let split = relaxation.values[idx].floor().to_integer();
                let (below, above) = domains[idx].split_after(split);

                // Explore the lower branch first.
                let mut up = domains.clone();
                up[idx] = above;
                let mut down = domains;
                down[idx] = below;

                self.stack.push(up);
                self.stack.push(down);
            }
        }
    }
}
