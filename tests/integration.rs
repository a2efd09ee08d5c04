// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios driving the tag reader, the display controller and
//! the media loader together, without a window.

use rfid_display::config::{self, Config};
use rfid_display::display::{DisplayController, Effect, Showing};
use rfid_display::error::Error;
use rfid_display::input::{InputEvent, KeyPress, TagReader};
use rfid_display::media;
use std::path::Path;
use tempfile::tempdir;

const SCREEN: (u32, u32) = (1920, 1080);

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([200, 40, 40, 255]));
    img.save(path).expect("write png");
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = image_rs::RgbImage::from_pixel(width, height, image_rs::Rgb([20, 20, 120]));
    img.save(path).expect("write jpeg");
}

fn type_tag(reader: &mut TagReader, code: &str) -> Option<InputEvent> {
    for c in code.chars() {
        assert_eq!(reader.feed(KeyPress::Char(c)), None);
    }
    reader.feed(KeyPress::Enter)
}

/// Executes the image loads among `effects`, returning the loaded sizes or errors.
fn load_images(effects: &[Effect]) -> Vec<(u64, Result<(u32, u32), Error>)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ShowImage { request, path } => Some((
                *request,
                media::load_fitted(path, SCREEN).map(|data| (data.width, data.height)),
            )),
            _ => None,
        })
        .collect()
}

fn setup(mappings: &[(&str, &str)]) -> (tempfile::TempDir, DisplayController) {
    let dir = tempdir().expect("Failed to create temporary directory");
    let media_dir = dir.path().join("media");
    std::fs::create_dir_all(&media_dir).expect("create media dir");

    let mut config = Config::default();
    for (code, file) in mappings {
        config.map_tag(*code, *file);
    }
    let config_path = dir.path().join("config.json");
    config::save_to_path(&config, &config_path).expect("save config");

    let loaded = config::load_from_path(&config_path).expect("load config");
    assert_eq!(loaded, config);

    (dir, DisplayController::new(loaded, media_dir))
}

#[test]
fn scanned_tag_shows_fitted_image() {
    let (dir, mut controller) = setup(&[("0012345678", "lighthouse.png")]);
    let media_dir = dir.path().join("media");
    write_jpeg(&media_dir.join("welcome.jpg"), 4, 4);
    write_png(&media_dir.join("lighthouse.png"), 800, 600);

    let start = controller.start();
    assert_eq!(*controller.showing(), Showing::Welcome);
    let loaded = load_images(&start);
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].1.as_ref().ok(), Some(&(1080, 1080)));

    let mut reader = TagReader::new();
    let Some(InputEvent::Tag(code)) = type_tag(&mut reader, "0012345678") else {
        panic!("expected a tag");
    };
    let effects = controller.on_tag(&code);
    assert_eq!(*controller.showing(), Showing::Image("lighthouse.png".to_string()));
    assert!(effects.iter().any(|e| matches!(e, Effect::ArmTimer(_))));

    let loaded = load_images(&effects);
    assert_eq!(loaded.len(), 1);
    let (request, result) = &loaded[0];
    assert!(controller.is_current(*request));
    assert_eq!(result.as_ref().ok(), Some(&(1440, 1080)));
}

#[test]
fn unknown_tag_returns_to_welcome() {
    let (_dir, mut controller) = setup(&[("111", "a.png")]);
    controller.start();
    controller.on_tag("111");

    let mut reader = TagReader::new();
    let Some(InputEvent::Tag(code)) = type_tag(&mut reader, "999") else {
        panic!("expected a tag");
    };
    let effects = controller.on_tag(&code);
    assert_eq!(*controller.showing(), Showing::Welcome);
    assert!(matches!(effects.first(), Some(Effect::ShowImage { path, .. }) if path.ends_with("welcome.jpg")));
}

#[test]
fn missing_media_falls_back_to_welcome_then_placeholder() {
    let (_dir, mut controller) = setup(&[("42", "gone.png")]);
    controller.start();

    let effects = controller.on_tag("42");
    let loaded = load_images(&effects);
    let (request, result) = loaded.into_iter().next().expect("image request");
    let error = result.expect_err("file does not exist");
    assert!(error.to_string().contains("gone.png"));

    // mapped file missing: back to the welcome image
    let effects = controller.on_media_failed(request, &error);
    assert_eq!(*controller.showing(), Showing::Welcome);

    // welcome image missing too: text placeholder
    let loaded = load_images(&effects);
    let (request, result) = loaded.into_iter().next().expect("welcome request");
    let error = result.expect_err("welcome image does not exist");
    let effects = controller.on_media_failed(request, error);
    assert_eq!(*controller.showing(), Showing::Placeholder);
    match effects.as_slice() {
        [Effect::ShowPlaceholder { message }] => {
            assert!(message.contains("welcome.jpg not found"));
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn inactivity_returns_to_welcome_once() {
    let (_dir, mut controller) = setup(&[("1", "a.png")]);
    controller.start();

    let effects = controller.on_tag("1");
    let ticket = effects
        .iter()
        .find_map(|e| match e {
            Effect::ArmTimer(ticket) => Some(*ticket),
            _ => None,
        })
        .expect("timer armed");

    let effects = controller.on_inactivity(ticket.generation);
    assert_eq!(*controller.showing(), Showing::Welcome);
    assert_eq!(effects.len(), 1);
    assert!(!controller.is_timer_armed());

    assert!(controller.on_inactivity(ticket.generation).is_empty());
}

#[test]
fn video_suppresses_timer_until_it_finishes() {
    let (_dir, mut controller) = setup(&[("7", "intro.MP4"), ("8", "b.png")]);
    controller.start();

    let effects = controller.on_tag("7");
    let (request, flag) = effects
        .iter()
        .find_map(|e| match e {
            Effect::PlayVideo { request, flag, .. } => Some((*request, flag.clone())),
            _ => None,
        })
        .expect("video requested");
    assert!(flag.is_playing());
    assert!(!controller.is_timer_armed());
    assert!(!effects.iter().any(|e| matches!(e, Effect::ArmTimer(_))));

    let effects = controller.on_video_finished(request);
    assert_eq!(*controller.showing(), Showing::Welcome);
    assert!(effects.iter().any(|e| matches!(e, Effect::ArmTimer(_))));
}

#[test]
fn new_tag_interrupts_video() {
    let (_dir, mut controller) = setup(&[("7", "intro.mp4"), ("8", "b.png")]);
    controller.start();

    let effects = controller.on_tag("7");
    let (old_request, flag) = effects
        .iter()
        .find_map(|e| match e {
            Effect::PlayVideo { request, flag, .. } => Some((*request, flag.clone())),
            _ => None,
        })
        .expect("video requested");

    let effects = controller.on_tag("8");
    assert!(!flag.is_playing());
    assert!(matches!(effects.first(), Some(Effect::StopVideo)));
    assert_eq!(*controller.showing(), Showing::Image("b.png".to_string()));

    // late end-of-stream from the interrupted session is ignored
    assert!(controller.on_video_finished(old_request).is_empty());
    assert_eq!(*controller.showing(), Showing::Image("b.png".to_string()));
}

#[test]
fn escape_quits_and_stops_video() {
    let (_dir, mut controller) = setup(&[("7", "intro.mp4")]);
    controller.start();
    controller.on_tag("7");

    let mut reader = TagReader::new();
    reader.feed(KeyPress::Char('1'));
    assert_eq!(reader.feed(KeyPress::Escape), Some(InputEvent::Quit));

    let effects = controller.shutdown();
    assert!(matches!(effects.as_slice(), [Effect::StopVideo, Effect::Quit]));
    assert!(!controller.is_video_playing());
}
