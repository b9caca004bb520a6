pub mod prompt;
pub mod providers;
pub mod relay;
pub mod training_store;

pub use relay::RelayService;
pub use training_store::TrainingStore;
