pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod loading;
pub mod materials;
pub mod particles;
pub mod render_loop;
pub mod scene;
pub mod systems;
pub mod viewport;
