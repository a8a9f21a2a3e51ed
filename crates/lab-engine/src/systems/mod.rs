pub mod animation;
pub mod render;
