pub mod camera;
pub mod collision;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod layout;
pub mod player;
pub mod renderer;
pub mod scaler;
pub mod world;

/// World and screen space share this vector type.
pub type Vec2 = nalgebra::Vector2<f32>;
