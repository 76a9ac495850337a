//! Rendering backends

pub mod headless;
