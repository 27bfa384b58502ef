//! Linear expressions.

use num_rational::{Ratio, Rational64};
use num_traits::{One, Signed, Zero};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::convert::From;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::{Coef, Val, VarToken};

/// A linear expression.
///
/// ```text
///   constant + coef1 * var1 + coef2 * var2 + ...
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct LinExpr {
    pub(crate) constant: Coef,

    // The non-zero coefficients in the linear expression, ordered by
    // variable.  A coefficient that cancels to 0 is removed.
    pub(crate) coef: BTreeMap<VarToken, Coef>,
}

impl LinExpr {
    /// Iterate over the variables with a non-zero coefficient.
    pub fn vars(&self) -> impl Iterator<Item = (VarToken, Coef)> + '_ {
        self.coef.iter().map(|(&var, &coef)| (var, coef))
    }

    /// Evaluate the expression at an integer assignment, indexed by
    /// variable.
    pub fn eval(&self, values: &[Val]) -> Coef {
        self.coef
            .iter()
            .fold(self.constant, |sum, (&VarToken(idx), &coef)| {
                sum + coef * Ratio::from_integer(values[idx])
            })
    }

    /// Check whether every coefficient and the constant are integers.
    pub fn is_integral(&self) -> bool {
        self.constant.is_integer() && self.coef.values().all(|c| c.is_integer())
    }
}

impl fmt::Display for LinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constant)?;

        for (tok, coef) in self.coef.iter() {
            if coef.is_negative() {
                if coef.abs().is_one() {
                    write!(f, " - x{}", tok.0)?;
                } else {
                    write!(f, " - {} * x{}", coef.abs(), tok.0)?;
                }
            } else if coef.is_one() {
                write!(f, " + x{}", tok.0)?;
            } else {
                write!(f, " + {} * x{}", coef, tok.0)?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for LinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinExpr {{ {} }}", self)
    }
}

macro_rules! impl_commutative_op {
    ($LHS:ident + $RHS:ident) => {
        impl Add<$RHS> for $LHS {
            type Output = LinExpr;
            fn add(self, rhs: $RHS) -> Self::Output {
                rhs + self
            }
        }
    };
    ($LHS:ident * $RHS:ident) => {
        impl Mul<$RHS> for $LHS {
            type Output = LinExpr;
            fn mul(self, rhs: $RHS) -> Self::Output {
                rhs * self
            }
        }
    };
}

macro_rules! impl_subtract_op {
    ($LHS:ident - $RHS:ident) => {
        impl Sub<$RHS> for $LHS {
            type Output = LinExpr;
            fn sub(self, rhs: $RHS) -> Self::Output {
                self + (-rhs)
            }
        }
    };
}

pub trait IntoCoef: Zero {
    fn into_coef(self) -> Coef;
}

impl IntoCoef for i32 {
    fn into_coef(self) -> Coef {
        Ratio::from_integer(self.into())
    }
}

impl IntoCoef for Rational64 {
    fn into_coef(self) -> Coef {
        self
    }
}

/*--------------------------------------------------------------*/

impl<T: IntoCoef> From<T> for LinExpr {
    fn from(constant: T) -> Self {
        LinExpr {
            constant: constant.into_coef(),
            coef: BTreeMap::new(),
        }
    }
}

impl From<VarToken> for LinExpr {
    fn from(var: VarToken) -> Self {
        let mut coef = BTreeMap::new();
        coef.insert(var, Ratio::one());

        LinExpr {
            constant: Ratio::zero(),
            coef,
        }
    }
}

/*--------------------------------------------------------------*/
/* Var-Coef                                                     */
/*--------------------------------------------------------------*/

impl Neg for VarToken {
    type Output = LinExpr;
    fn neg(self) -> Self::Output {
        -LinExpr::from(self)
    }
}

impl<T: IntoCoef> Add<T> for VarToken {
    type Output = LinExpr;
    fn add(self, rhs: T) -> Self::Output {
        LinExpr::from(self) + rhs
    }
}

impl_commutative_op!(i32 + VarToken);

impl_subtract_op!(VarToken - i32);
impl_subtract_op!(i32 - VarToken);

impl<T: IntoCoef> Mul<T> for VarToken {
    type Output = LinExpr;
    fn mul(self, rhs: T) -> Self::Output {
        LinExpr::from(self) * rhs
    }
}

impl_commutative_op!(i32 * VarToken);

/*--------------------------------------------------------------*/
/* Var-Var                                                      */
/*--------------------------------------------------------------*/

impl Add for VarToken {
    type Output = LinExpr;
    fn add(self, rhs: VarToken) -> Self::Output {
        LinExpr::from(self) + LinExpr::from(rhs)
    }
}

impl_subtract_op!(VarToken - VarToken);

/*--------------------------------------------------------------*/
/* Expr-Coef                                                    */
/*--------------------------------------------------------------*/

impl Neg for LinExpr {
    type Output = LinExpr;
    fn neg(self) -> Self::Output {
        -1 * self
    }
}

impl<T: IntoCoef> Add<T> for LinExpr {
    type Output = LinExpr;
    fn add(mut self, rhs: T) -> Self::Output {
        self.constant += rhs.into_coef();
        self
    }
}

impl_commutative_op!(i32 + LinExpr);

impl_subtract_op!(LinExpr - i32);
impl_subtract_op!(i32 - LinExpr);

impl<T: IntoCoef> Mul<T> for LinExpr {
    type Output = LinExpr;
    fn mul(mut self, rhs: T) -> Self::Output {
        if rhs.is_zero() {
            self.constant = Ratio::zero();
            self.coef = BTreeMap::new();
        } else {
            let rhs = rhs.into_coef();
            if !rhs.is_one() {
                self.constant *= rhs;
                for coef in self.coef.values_mut() {
                    *coef *= rhs;
                }
            }
        }

        self
    }
}

impl_commutative_op!(i32 * LinExpr);

/*--------------------------------------------------------------*/
/* Expr-Var                                                     */
/*--------------------------------------------------------------*/

impl Add<VarToken> for LinExpr {
    type Output = LinExpr;
    fn add(self, rhs: VarToken) -> Self::Output {
        self + LinExpr::from(rhs)
    }
}

impl_commutative_op!(VarToken + LinExpr);

impl_subtract_op!(LinExpr - VarToken);
impl_subtract_op!(VarToken - LinExpr);

/*--------------------------------------------------------------*/
/* Expr-Expr                                                    */
/*--------------------------------------------------------------*/

impl Add for LinExpr {
    type Output = LinExpr;
    fn add(mut self, rhs: LinExpr) -> Self::Output {
        self.constant += rhs.constant;

        for (x2, a2) in rhs.coef {
            match self.coef.entry(x2) {
                Entry::Vacant(e) => {
                    e.insert(a2);
                }
                Entry::Occupied(mut e) => {
                    let new_coef = *e.get() + a2;
                    if new_coef.is_zero() {
                        e.remove();
                    } else {
                        *e.get_mut() = new_coef;
                    }
                }
            }
        }

        self
    }
}

impl_subtract_op!(LinExpr - LinExpr);

/*--------------------------------------------------------------*/
