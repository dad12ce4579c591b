pub mod abc;
pub mod colormap;
pub mod colors;
pub mod cycle;
pub mod dashes;
pub mod error;
pub mod textbox;
pub mod theme;
