use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Options for the [`GoalPlanner`](crate::engine::GoalPlanner) which
/// determine how it behaves.
#[derive(Debug)]
pub struct PlannerOptions {
    /// A random generator which is used when candidate shuffling is enabled;
    /// passing it as an option allows seeding of the randomization.
    pub random_generator: SmallRng,

    /// Visit the candidate actions of every node in a seeded-random order
    /// instead of action pool order. The search stays deterministic for a
    /// fixed seed.
    pub shuffle_candidates: bool,

    /// Render the fragment into every `extended` and `goal-reached` trace
    /// record. Costly; intended for post-mortem debugging.
    pub record_fragments: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        PlannerOptions {
            random_generator: SmallRng::seed_from_u64(42),
            shuffle_candidates: false,
            record_fragments: false,
        }
    }
}
