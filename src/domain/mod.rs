//! Domain vocabulary: layers, input, settings and the level bundle format.

pub mod input;
pub mod level;
pub mod mask;
pub mod settings;

pub use input::DirectionalInput;
pub use level::LevelBundle;
pub use mask::CollisionMask;
pub use settings::EngineSettings;
