//! Loading and disposing sprite groups

use std::path::Path;
use std::rc::Rc;

use super::{renderer, renderer_with_config, renderer_with_group, ScriptedDecoder};
use crate::config::SpriteConfig;
use crate::render::{HeadlessBackend, PixelFormat};
use crate::scene::NewObjectDefinition;
use crate::sprites::{SpriteError, SpriteRenderer};

fn write_frames(root: &Path, name: &str, count: usize, width: u32, height: u32) {
    let dir = root.join("Sprites").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]))
            .save(dir.join(format!("{name}{i:03}.tga")))
            .unwrap();
    }
}

#[test]
fn test_load_group_fills_every_record() {
    let sprites = renderer_with_group(3, 4, 16, 16);

    assert_eq!(sprites.groups().count(3), 4);
    for record in sprites.groups().group(3).unwrap() {
        assert!(sprites.backend().texture_info(record.material.texture()).is_some());
    }
    assert_eq!(sprites.backend().texture_count(), 4);
}

#[test]
fn test_explosion_frames_requested_in_order() {
    let mut sprites = renderer();
    let mut decoder = ScriptedDecoder::uniform(64, 32);

    sprites.load_group_with(&mut decoder, 0, 3, "Explosion").unwrap();

    let names: Vec<_> = decoder
        .requested
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["Explosion000.tga", "Explosion001.tga", "Explosion002.tga"]);
    assert!(decoder.requested[0].starts_with("Data/Sprites/Explosion"));

    for record in sprites.groups().group(0).unwrap() {
        assert_eq!(record.src_format, PixelFormat::Rgba);
        assert_eq!(record.dest_format, PixelFormat::Rgba);
    }
}

#[test]
fn test_load_group_from_tga_files() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), "Spark", 2, 8, 4);

    let mut sprites = renderer_with_config(SpriteConfig::new(dir.path()));
    sprites.load_group(1, 2, "Spark").unwrap();

    let record = sprites.groups().sprite(1, 1);
    assert_eq!((record.width, record.height), (8, 4));
    assert_eq!(record.aspect_ratio, 0.5);
    assert_eq!(record.material.formats(), (PixelFormat::Rgba, PixelFormat::Rgba));
}

#[test]
fn test_rgb_tga_file_fails_the_whole_group() {
    let dir = tempfile::tempdir().unwrap();
    write_frames(dir.path(), "Smoke", 1, 4, 4);
    image::RgbImage::from_pixel(4, 4, image::Rgb([9, 9, 9]))
        .save(dir.path().join("Sprites/Smoke/Smoke001.tga"))
        .unwrap();

    let mut sprites = renderer_with_config(SpriteConfig::new(dir.path()));
    let err = sprites.load_group(0, 2, "Smoke").unwrap_err();

    assert!(matches!(err, SpriteError::UnsupportedPixelFormat { .. }));
    assert!(err.to_string().contains("Smoke001.tga"));
    assert!(sprites.groups().is_empty(0));
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_missing_frame_reports_path_and_releases_textures() {
    let mut sprites = renderer();
    let mut decoder = ScriptedDecoder::uniform(8, 8).with_missing_frame(2);

    let err = sprites.load_group_with(&mut decoder, 0, 4, "Ghost").unwrap_err();

    assert!(matches!(err, SpriteError::Asset { .. }));
    assert!(err.path().unwrap().ends_with("Ghost002.tga"));
    assert_eq!(decoder.requested.len(), 3);
    assert!(sprites.groups().is_empty(0));
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_texture_creation_failure_aborts_group() {
    let mut sprites = SpriteRenderer::new(
        SpriteConfig::default(),
        HeadlessBackend::new().with_texture_limit(2),
    )
    .unwrap();
    let mut decoder = ScriptedDecoder::uniform(8, 8);

    let err = sprites.load_group_with(&mut decoder, 0, 3, "Big").unwrap_err();

    assert!(matches!(err, SpriteError::Texture { .. }));
    assert!(sprites.groups().is_empty(0));
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_dispose_group_releases_textures_and_is_idempotent() {
    let mut sprites = renderer_with_group(2, 3, 8, 8);

    sprites.dispose_group(2);
    assert_eq!(sprites.groups().count(2), 0);
    assert!(sprites.groups().group(2).is_none());
    assert_eq!(sprites.backend().texture_count(), 0);

    sprites.dispose_group(2);
    sprites.dispose_group(5);
    assert_eq!(sprites.groups().count(2), 0);
}

#[test]
fn test_dispose_all_twice() {
    let mut sprites = renderer_with_group(0, 2, 8, 8);
    let mut decoder = ScriptedDecoder::uniform(4, 4);
    sprites.load_group_with(&mut decoder, 7, 1, "Other").unwrap();

    sprites.dispose_all();
    sprites.dispose_all();

    assert_eq!(sprites.groups().loaded_groups().count(), 0);
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_reload_disposes_previous_content() {
    let mut sprites = renderer_with_group(1, 5, 8, 8);
    let mut decoder = ScriptedDecoder::uniform(4, 4);

    sprites.load_group_with(&mut decoder, 1, 2, "Smaller").unwrap();

    assert_eq!(sprites.groups().count(1), 2);
    assert_eq!(sprites.backend().texture_count(), 2);
}

#[test]
fn test_zero_frames_leaves_slot_empty() {
    let mut sprites = renderer();
    let mut decoder = ScriptedDecoder::uniform(4, 4);

    sprites.load_group_with(&mut decoder, 0, 0, "Empty").unwrap();
    assert!(sprites.groups().is_empty(0));
}

#[test]
fn test_object_keeps_texture_alive_after_dispose() {
    let mut sprites = renderer_with_group(0, 2, 8, 8);
    let mut pool = sprites.create_object_pool();
    let key = sprites
        .make_sprite_object(&mut pool, NewObjectDefinition::sprite(0, 1))
        .unwrap();

    sprites.dispose_group(0);
    assert_eq!(sprites.backend().texture_count(), 1);

    let material = Rc::clone(&pool.get(key).unwrap().sprite.as_ref().unwrap().material);
    assert!(sprites.backend().texture_info(material.texture()).is_some());
    drop(material);

    pool.delete_object(key);
    assert_eq!(sprites.flush_released_textures(), 1);
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_live_materials_tracks_objects_past_dispose() {
    let mut sprites = renderer_with_group(0, 2, 8, 8);
    assert_eq!(sprites.live_materials(), 2);

    let mut pool = sprites.create_object_pool();
    sprites.make_sprite_object(&mut pool, NewObjectDefinition::sprite(0, 1)).unwrap();

    sprites.dispose_all();
    assert_eq!(sprites.live_materials(), 1);
    assert_eq!(sprites.backend().texture_count(), 1);

    // the pool goes first so its textures can still be destroyed
    drop(pool);
    assert_eq!(sprites.live_materials(), 0);
    assert_eq!(sprites.flush_released_textures(), 1);
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
fn test_init_empties_the_table() {
    let mut sprites = renderer_with_group(4, 3, 8, 8);
    sprites.init();

    assert!(sprites.groups().is_empty(4));
    assert_eq!(sprites.backend().texture_count(), 0);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_load_into_missing_slot_panics() {
    let mut sprites = renderer();
    let mut decoder = ScriptedDecoder::uniform(4, 4);
    let capacity = sprites.groups().capacity();
    let _ = sprites.load_group_with(&mut decoder, capacity, 1, "Nowhere");
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = SpriteRenderer::new(SpriteConfig::default().with_max_groups(0), HeadlessBackend::new());
    assert!(matches!(result, Err(SpriteError::Config(_))));
}
