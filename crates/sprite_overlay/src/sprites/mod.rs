//! Sprite subsystem
//!
//! Sprites are flat textured images addressed by `(group, type)`: a group is
//! a named, ordered set of frames loaded together (an animation, a font, a
//! set of HUD icons) and the type is the frame index inside it.
//!
//! - [`SpriteGroupTable`]: fixed-capacity table of loaded groups
//! - [`loader`]: indexed file naming, decode, RGBA check and texture upload
//! - [`SpriteMaterialRef`]: a render object's reference to one frame
//! - [`SpriteRenderer`]: owns the table and the backend; loads, disposes,
//!   attaches sprites to scene objects and draws them
//!
//! Misuse of `(group, type)` indices is a programmer error and panics with
//! the offending values. Bad asset data is reported as [`SpriteError`].

pub mod types;
pub mod error;
pub mod group_table;
pub mod loader;
pub mod objects;
pub mod renderer;

pub use types::{SpriteRecord, SpriteFlags};
pub use error::{SpriteError, SpriteResult};
pub use group_table::SpriteGroupTable;
pub use objects::SpriteMaterialRef;
pub use renderer::SpriteRenderer;

#[cfg(test)]
mod tests;
