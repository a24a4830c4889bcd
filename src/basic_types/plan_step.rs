/// Why extending a plan fragment with an action was refused.
///
/// A refused mutation leaves the fragment untouched, which is what keeps
/// backtracking in the search cheap and local.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanStepRejected {
    /// The action contradicts the state the fragment has already committed
    /// to: on append, the accumulated consequences falsify the action's
    /// prerequisites; on prepend, the action's consequences falsify the
    /// demanded frontier.
    #[error("the action conflicts with the state established by the plan")]
    Conflict,

    /// Appending the action would demand prerequisites the accumulated
    /// consequences do not cover, and the caller did not allow widening the
    /// global prerequisites.
    #[error("the action introduces prerequisites not covered by the plan")]
    UncoveredPrerequisites,

    /// Prepending the action leaves part of the demanded frontier
    /// unsatisfied, and the caller required full coverage.
    #[error("the action does not satisfy the prerequisites demanded of it")]
    UnsatisfiedPrerequisites,
}
