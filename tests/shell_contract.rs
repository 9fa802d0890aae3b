use std::cell::Cell;
use std::rc::Rc;

use egui::pos2;
use image::RgbaImage;
use stroke_canvas::{
    AssetStore, BundledAssets, CanvasConfig, CanvasMode, Classifier, ClassifyError, Shell,
    ShellConfig,
};

/// Labels a drawing "line" if any pixel is dark, and counts its calls
struct DarkPixelClassifier {
    calls: Rc<Cell<usize>>,
}

impl Classifier for DarkPixelClassifier {
    fn classify(&self, image: &RgbaImage, assets: &dyn AssetStore) -> Result<String, ClassifyError> {
        self.calls.set(self.calls.get() + 1);
        assets.open("moments.csv")?;
        let dark = image.pixels().any(|p| p.0[0] < 128);
        Ok(if dark { "line" } else { "unknown" }.to_owned())
    }
}

fn create_test_shell(assets: BundledAssets) -> (Shell, Rc<Cell<usize>>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let calls = Rc::new(Cell::new(0));
    let classifier = DarkPixelClassifier { calls: Rc::clone(&calls) };
    let shell = Shell::new(ShellConfig::default(), Box::new(classifier), Box::new(assets));
    (shell, calls)
}

fn reference_assets() -> BundledAssets {
    BundledAssets::new().with_asset("moments.csv", "line,1,2,3,4,5,6,7")
}

#[test]
fn test_initial_status_is_prompt() {
    let (shell, _) = create_test_shell(reference_assets());
    assert_eq!(shell.status(), "Draw a figure");
}

#[test]
fn test_classify_without_image_skips_classifier() {
    let (mut shell, calls) = create_test_shell(reference_assets());

    let status = shell.on_classify().to_owned();
    assert_eq!(status, "Error: could not get the drawing.");
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_classify_reports_label() {
    let (mut shell, calls) = create_test_shell(reference_assets());
    let canvas = shell.canvas_mut();
    canvas.on_size_changed(64, 64);
    canvas.on_touch_begin(pos2(10.0, 10.0));
    canvas.on_touch_move(pos2(10.0, 50.0));
    canvas.on_touch_end();

    assert_eq!(shell.on_classify(), "Classification: line");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_classify_blank_drawing() {
    let (mut shell, _) = create_test_shell(reference_assets());
    shell.canvas_mut().on_size_changed(16, 16);

    assert_eq!(shell.on_classify(), "Classification: unknown");
}

#[test]
fn test_classifier_failure_is_shown() {
    let (mut shell, calls) = create_test_shell(BundledAssets::new());
    shell.canvas_mut().on_size_changed(16, 16);

    let status = shell.on_classify().to_owned();
    assert!(status.starts_with("Error: "));
    assert!(status.contains("moments.csv"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_clear_resets_drawing_and_status() {
    let (mut shell, _) = create_test_shell(reference_assets());
    let canvas = shell.canvas_mut();
    canvas.on_size_changed(64, 64);
    canvas.on_touch_begin(pos2(10.0, 10.0));
    canvas.on_touch_move(pos2(10.0, 50.0));
    canvas.on_touch_end();
    shell.on_classify();

    shell.on_clear();
    assert_eq!(shell.status(), "Draw a figure");
    assert_eq!(shell.on_classify(), "Classification: unknown");
}

#[test]
fn test_shell_forces_persistent_canvas() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ShellConfig {
        canvas: CanvasConfig::transient(),
        ..ShellConfig::default()
    };
    let classifier = |_: &RgbaImage, _: &dyn AssetStore| -> Result<String, ClassifyError> {
        Ok("circle".to_owned())
    };
    let mut shell = Shell::new(config, Box::new(classifier), Box::new(BundledAssets::new()));

    assert_eq!(shell.canvas().mode(), CanvasMode::Persistent);
    shell.canvas_mut().on_size_changed(8, 8);
    assert_eq!(shell.on_classify(), "Classification: circle");
}

#[test]
fn test_custom_messages() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ShellConfig::from_json_str(
        r#"{ "messages": { "prompt": "Dibuja una figura", "classification_prefix": "Clasificación: " } }"#,
    )
    .unwrap();
    let classifier = |_: &RgbaImage, _: &dyn AssetStore| -> Result<String, ClassifyError> {
        Ok("triangulo".to_owned())
    };
    let mut shell = Shell::new(config, Box::new(classifier), Box::new(BundledAssets::new()));

    assert_eq!(shell.status(), "Dibuja una figura");
    shell.canvas_mut().on_size_changed(8, 8);
    assert_eq!(shell.on_classify(), "Clasificación: triangulo");
}

#[test]
fn test_zero_width_pen_still_draws_what_classifier_sees() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = ShellConfig::default();
    config.canvas.style.width = 0.0;
    let calls = Rc::new(Cell::new(0));
    let classifier = DarkPixelClassifier { calls: Rc::clone(&calls) };
    let mut shell = Shell::new(config, Box::new(classifier), Box::new(reference_assets()));

    assert_eq!(shell.canvas().style().width, 10.0);
    let canvas = shell.canvas_mut();
    canvas.on_size_changed(32, 32);
    canvas.on_touch_begin(pos2(16.0, 4.0));
    canvas.on_touch_move(pos2(16.0, 28.0));
    canvas.on_touch_end();

    assert_eq!(shell.on_classify(), "Classification: line");
    assert_eq!(calls.get(), 1);
}
