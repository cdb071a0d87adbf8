pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod field;
pub mod gpu;
pub mod input;
pub mod palette;
pub mod params;
pub mod timeline;
pub mod transform;

pub use camera::*;
pub use clock::*;
pub use config::*;
pub use error::FlowerError;
pub use feed::*;
pub use field::*;
pub use gpu::*;
pub use input::*;
pub use palette::*;
pub use params::*;
pub use timeline::*;
pub use transform::*;

// Shader and project state bundled as string constants
pub static FLOWER_WGSL: &str = include_str!("../shaders/flower.wgsl");
pub static DEFAULT_STATE_JSON: &str = include_str!("../assets/state.json");
