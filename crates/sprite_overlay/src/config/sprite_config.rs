//! Sprite subsystem configuration
//!
//! Where sprite images live on disk, how many group slots exist and the
//! logical screen size used by the overlay projection.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// Default number of sprite group slots
pub const DEFAULT_MAX_SPRITE_GROUPS: usize = 32;

/// Default number of live scene objects
pub const DEFAULT_MAX_SCENE_OBJECTS: usize = 1024;

/// Configuration for the sprite subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Root of the game data directory
    pub data_root: PathBuf,
    /// Folder under `data_root` holding one sub-folder per sprite group
    pub sprite_dir: String,
    /// File extension of sprite frames, without the dot
    pub image_extension: String,
    /// Number of group slots in the sprite table
    pub max_groups: usize,
    /// Logical overlay width in screen units
    pub logical_width: f32,
    /// Logical overlay height in screen units
    pub logical_height: f32,
    /// Capacity of the scene object pool
    pub max_scene_objects: usize,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("Data"),
            sprite_dir: "Sprites".to_string(),
            image_extension: "tga".to_string(),
            max_groups: DEFAULT_MAX_SPRITE_GROUPS,
            logical_width: 640.0,
            logical_height: 480.0,
            max_scene_objects: DEFAULT_MAX_SCENE_OBJECTS,
        }
    }
}

impl Config for SpriteConfig {}

impl SpriteConfig {
    /// Create a configuration rooted at `data_root` with default values
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            ..Default::default()
        }
    }

    /// Set the number of group slots
    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }

    /// Set the logical overlay size
    pub fn with_logical_size(mut self, width: f32, height: f32) -> Self {
        self.logical_width = width;
        self.logical_height = height;
        self
    }

    /// Set the scene object pool capacity
    pub fn with_max_scene_objects(mut self, max_objects: usize) -> Self {
        self.max_scene_objects = max_objects;
        self
    }

    /// Folder holding all frames of `group_name`
    pub fn group_dir(&self, group_name: &str) -> PathBuf {
        self.data_root.join(&self.sprite_dir).join(group_name)
    }

    /// Path of frame `index` of `group_name`, e.g. `Data/Sprites/Fire/Fire007.tga`
    pub fn frame_path(&self, group_name: &str, index: usize) -> PathBuf {
        self.group_dir(group_name)
            .join(format!("{group_name}{index:03}.{}", self.image_extension))
    }

    /// Whether `data_root` currently exists
    pub fn data_root_exists(&self) -> bool {
        Path::new(&self.data_root).is_dir()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_groups == 0 {
            return Err(ConfigError::Invalid("max_groups must be at least 1".to_string()));
        }
        if self.image_extension.is_empty() || self.image_extension.starts_with('.') {
            return Err(ConfigError::Invalid(format!(
                "image_extension must be a bare extension, got {:?}",
                self.image_extension
            )));
        }
        if !(self.logical_width > 0.0 && self.logical_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "logical screen size must be positive, got {}x{}",
                self.logical_width, self.logical_height
            )));
        }
        Ok(())
    }
}
