//! Scene objects
//!
//! A bounded pool of positioned render objects. The sprite subsystem only
//! needs a small part of a scene graph: allocate an object from a
//! definition, find it again by key and delete it.

pub mod object;
pub mod object_pool;

pub use object::{NewObjectDefinition, SceneObject, ObjectGenre, StatusFlags};
pub use object_pool::{ObjectPool, ObjectKey};
