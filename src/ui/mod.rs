mod renderer;
mod state;
mod theme;
pub mod text;

pub use renderer::render;
pub use state::AppState;
pub use theme::Theme;
