use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The machine description breaks a data-model invariant.  Only
    /// raised while building a [`Machine`](crate::Machine).
    #[error("malformed machine: {0}")]
    MalformedMachine(String),

    /// Every light pattern reachable from all-off was visited and none
    /// matched the target.
    #[error("target light pattern is unreachable")]
    Unreachable,

    /// No assignment of nonnegative integers satisfies the constraints.
    #[error("constraints have no nonnegative integer solution")]
    Infeasible,

    /// The search budget ran out before feasibility was settled.
    #[error("search budget exhausted after {explored} nodes")]
    Timeout { explored: u64 },
}
