pub mod api;
pub mod colorbar;
pub mod context;
pub mod engine;
pub mod error;
pub mod grid;
pub mod measure;
