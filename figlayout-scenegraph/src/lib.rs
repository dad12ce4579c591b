pub mod decorations;
pub mod engine;
pub mod error;
pub mod figure;
pub mod gridspec;
pub mod panel;
pub mod renderer;
pub mod ticks;
