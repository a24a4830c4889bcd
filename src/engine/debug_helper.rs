use super::plan_fragment::PlanFragment;
use crate::world::WorldStatement;

/// Expensive coherence checks over search state, used behind the higher
/// assert levels.
pub(crate) struct DebugHelper;

impl DebugHelper {
    /// Refold the fragment's actions left to right, starting from its global
    /// prerequisites.
    pub(crate) fn replay(fragment: &PlanFragment) -> WorldStatement {
        fragment
            .actions()
            .iter()
            .fold(fragment.global_prerequisites().clone(), |world, action| {
                action.apply_forward(&world)
            })
    }

    /// The fragment's global consequences match what replaying its actions
    /// produces.
    pub(crate) fn fragment_is_coherent(fragment: &PlanFragment) -> bool {
        Self::replay(fragment) == *fragment.global_consequences()
    }
}
