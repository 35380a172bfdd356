pub mod config;
pub mod error;
pub mod notify;
pub mod permutation;
pub mod santa;
pub mod utils;

pub use config::DrawConfig;
pub use error::{ConfigError, DeliveryError, DrawError, NotifyError, SantaError};
pub use notify::{deliver, ConsoleNotifier, FileNotifier, Notifier};
pub use permutation::{
	generate_constrained_derangements,
	generate_derangement,
	DerangementSampler,
	Exclusions,
	Permutation,
	SampledRounds,
	SamplerConfig,
	SamplingStats,
};
pub use santa::{compose_message, Assignment, Assignments, Message, Roster, SecretSanta};
pub use utils::serialization::{load_draw_record, save_draw_record, DrawRecord};
