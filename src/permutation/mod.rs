pub mod derangement;
pub mod exclusions;
pub mod permutation;
pub mod sampler;

pub use derangement::generate_derangement;
pub use exclusions::Exclusions;
pub use permutation::Permutation;
pub use sampler::{
    generate_constrained_derangements, DerangementSampler, SampledRounds, SamplerConfig,
    SamplingStats,
};
