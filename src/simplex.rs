//! Exact linear relaxation of an integer program.
//!
//! Solves
//!
//! ```text
//!   minimise   objective(x)
//!   subject to row(x) = 0      for every row
//!              lo_i <= x_i <= hi_i
//! ```
//!
//! over the rationals, with a dense two-phase simplex tableau and
//! Bland's rule.  Every variable is shifted to `y_i = x_i - lo_i` and
//! its upper bound becomes an explicit row `y_i + s_i = hi_i - lo_i`,
//! so the problem is never unbounded.

use num_rational::Ratio;
use num_traits::{Signed, Zero};

use crate::linexpr::LinExpr;
use crate::{Coef, Val, VarToken};

/// An optimal point of the relaxation.
#[derive(Clone, Debug)]
pub(crate) struct Relaxation {
    pub objective: Coef,
    pub values: Vec<Coef>,
}

struct Tableau {
    // One row per constraint: a coefficient per column, then the
    // right-hand side.
    rows: Vec<Vec<Coef>>,

    // The basic column of each row.
    basis: Vec<usize>,

    num_cols: usize,
}

impl Tableau {
    fn rhs(&self, row: usize) -> Coef {
        self.rows[row][self.num_cols]
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let p = self.rows[row][col];
        for v in self.rows[row].iter_mut() {
            *v /= p;
        }

        let pivot_row = self.rows[row].clone();
        for (r, other) in self.rows.iter_mut().enumerate() {
            if r == row {
                continue;
            }

            let factor = other[col];
            if factor.is_zero() {
                continue;
            }

            for (v, &pv) in other.iter_mut().zip(pivot_row.iter()) {
                *v -= factor * pv;
            }
        }

        self.basis[row] = col;
    }

    fn reduced_cost(&self, cost: &[Coef], col: usize) -> Coef {
        self.rows
            .iter()
            .zip(self.basis.iter())
            .fold(cost[col], |sum, (row, &b)| sum - cost[b] * row[col])
    }

    fn objective(&self, cost: &[Coef]) -> Coef {
        (0..self.rows.len()).fold(Ratio::zero(), |sum, r| sum + cost[self.basis[r]] * self.rhs(r))
    }

    /// Minimise `cost` over the tableau, letting only the columns below
    /// `allowed` enter the basis.
    fn minimize(&mut self, cost: &[Coef], allowed: usize) -> Coef {
        loop {
            let entering = (0..allowed).find(|&col| {
                !self.basis.contains(&col) && self.reduced_cost(cost, col).is_negative()
            });

            let col = match entering {
                Some(col) => col,
                None => return self.objective(cost),
            };

            // Ratio test; ties go to the smallest basic column.
            let mut leaving: Option<(usize, Coef)> = None;
            for r in 0..self.rows.len() {
                let a = self.rows[r][col];
                if !a.is_positive() {
                    continue;
                }

                let ratio = self.rhs(r) / a;
                let better = match leaving {
                    None => true,
                    Some((lr, best)) => {
                        ratio < best || (ratio == best && self.basis[r] < self.basis[lr])
                    }
                };
                if better {
                    leaving = Some((r, ratio));
                }
            }

            match leaving {
                Some((row, _)) => self.pivot(row, col),
                None => unreachable!("every column is bounded"),
            }
        }
    }

    /// The value of a column at the current basic solution.
    fn value(&self, col: usize) -> Coef {
        self.basis
            .iter()
            .position(|&b| b == col)
            .map_or_else(Ratio::zero, |r| self.rhs(r))
    }
}

/// Solve the relaxation.  Returns None if it is infeasible.
pub(crate) fn relax(
    rows: &[LinExpr],
    objective: &LinExpr,
    bounds: &[(Val, Val)],
) -> Option<Relaxation> {
    let n = bounds.len();
    if bounds.iter().any(|&(lo, hi)| lo > hi) {
        return None;
    }

    // Columns: n shifted variables, n bound slacks, one artificial per
    // equality row.
    let num_eq = rows.len();
    let slack_start = n;
    let art_start = 2 * n;
    let num_cols = art_start + num_eq;

    let mut tableau = Tableau {
        rows: Vec::with_capacity(num_eq + n),
        basis: Vec::with_capacity(num_eq + n),
        num_cols,
    };

    for (r, expr) in rows.iter().enumerate() {
        // sum a_i x_i + c = 0  =>  sum a_i y_i = -c - sum a_i lo_i
        let mut row = vec![Ratio::zero(); num_cols + 1];
        let mut rhs = -expr.constant;
        for (VarToken(idx), coef) in expr.vars() {
            row[idx] = coef;
            rhs -= coef * Ratio::from_integer(bounds[idx].0);
        }

        if rhs.is_negative() {
            for v in row.iter_mut() {
                *v = -*v;
            }
            rhs = -rhs;
        }

        row[art_start + r] = Ratio::from_integer(1);
        row[num_cols] = rhs;
        tableau.rows.push(row);
        tableau.basis.push(art_start + r);
    }

    for (idx, &(lo, hi)) in bounds.iter().enumerate() {
        let mut row = vec![Ratio::zero(); num_cols + 1];
        row[idx] = Ratio::from_integer(1);
        row[slack_start + idx] = Ratio::from_integer(1);
        row[num_cols] = Ratio::from_integer(hi - lo);
        tableau.rows.push(row);
        tableau.basis.push(slack_start + idx);
    }

    // Phase one: drive the artificials to zero.
    let mut cost = vec![Ratio::zero(); num_cols];
    for c in cost[art_start..].iter_mut() {
        *c = Ratio::from_integer(1);
    }
    if !tableau.minimize(&cost, num_cols).is_zero() {
        return None;
    }

    // Pivot any artificial still basic (at zero) out of the basis, or
    // drop its row if the row is redundant.
    let mut r = 0;
    while r < tableau.rows.len() {
        if tableau.basis[r] >= art_start {
            match (0..art_start).find(|&col| !tableau.rows[r][col].is_zero()) {
                Some(col) => tableau.pivot(r, col),
                None => {
                    tableau.rows.remove(r);
                    tableau.basis.remove(r);
                    continue;
                }
            }
        }
        r += 1;
    }

    // Phase two: the real objective over the non-artificial columns.
    let mut cost = vec![Ratio::zero(); num_cols];
    for (VarToken(idx), coef) in objective.vars() {
        cost[idx] = coef;
    }
    let shifted = tableau.minimize(&cost, art_start);

    let values: Vec<Coef> = bounds
        .iter()
        .enumerate()
        .map(|(idx, &(lo, _))| tableau.value(idx) + Ratio::from_integer(lo))
        .collect();

    // Undo the shift: objective(x) = objective(y) + c + sum c_i lo_i.
    let objective = objective.vars().fold(
        shifted + objective.constant,
        |sum, (VarToken(idx), coef)| sum + coef * Ratio::from_integer(bounds[idx].0),
    );

    Some(Relaxation { objective, values })
}

#[cfg(test)]
mod tests {
    use super::relax;
    use crate::linexpr::LinExpr;
    use crate::IntegerProgram;
    use num_rational::Ratio;

    #[test]
    fn test_fractional_optimum() {
        // x + y = 1, y + z = 1, x + z = 1  =>  x = y = z = 1/2.
        let mut program = IntegerProgram::new();
        let x = program.new_var(0..=1);
        let y = program.new_var(0..=1);
        let z = program.new_var(0..=1);

        let rows = vec![x + y - 1, y + z - 1, x + z - 1];
        let objective = x + y + z;
        let relaxation = relax(&rows, &objective, &[(0, 1), (0, 1), (0, 1)]).unwrap();

        assert_eq!(relaxation.objective, Ratio::new(3, 2));
        for v in relaxation.values.iter() {
            assert_eq!(*v, Ratio::new(1, 2));
        }
    }

    #[test]
    fn test_infeasible() {
        let mut program = IntegerProgram::new();
        let x = program.new_var(0..=3);

        let rows = vec![x - 5];
        assert!(relax(&rows, &LinExpr::from(x), &[(0, 3)]).is_none());
    }

    #[test]
    fn test_lower_bounds_shift() {
        // min x + y  s.t.  x + y = 4, x >= 3.
        let mut program = IntegerProgram::new();
        let x = program.new_var(0..=4);
        let y = program.new_var(0..=4);

        let rows = vec![x + y - 4];
        let relaxation = relax(&rows, &(x + y), &[(3, 4), (0, 4)]).unwrap();
        assert_eq!(relaxation.objective, Ratio::from_integer(4));
        assert!(relaxation.values[0] >= Ratio::from_integer(3));
    }

    #[test]
    fn test_redundant_rows() {
        // The same equation twice leaves an artificial basic at zero.
        let mut program = IntegerProgram::new();
        let x = program.new_var(0..=9);
        let y = program.new_var(0..=9);

        let rows = vec![x + y - 6, x + y - 6, 2 * x - 4];
        let relaxation = relax(&rows, &(x + y), &[(0, 9), (0, 9)]).unwrap();
        assert_eq!(relaxation.objective, Ratio::from_integer(6));
        assert_eq!(relaxation.values, vec![Ratio::from_integer(2), Ratio::from_integer(4)]);
    }
}
