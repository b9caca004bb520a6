pub mod training_record;

pub use training_record::{TrainingRecord, TrainingSubmission};
