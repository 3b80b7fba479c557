//! Integration tests for neopixel-core.
//!
//! These tests verify the public API works correctly end-to-end.

use neopixel_core::{
    digit_glyph, number_glyphs, Color, ColorFrame, CombineMode, Display, Drawable, FrameError,
    LayerView, MemorySink, OverflowMode,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Frame Integration Tests
// =============================================================================

#[test]
fn test_three_by_three_scenario() {
    let mut frame = ColorFrame::new(3, 3, Color::BLACK).expect("valid dimensions");
    frame
        .set(1, 1, Color::rgb(10, 20, 30), OverflowMode::Error)
        .expect("in bounds");
    frame.draw();

    assert_eq!(
        frame.get(1, 1, OverflowMode::Error),
        Ok(Color::rgb(10, 20, 30))
    );
    assert_eq!(frame.get(0, 0, OverflowMode::Error), Ok(Color::BLACK));
}

#[test]
fn test_error_mode_is_loud() {
    let mut frame = ColorFrame::new(4, 2, Color::BLACK).expect("valid dimensions");
    let err = frame
        .set(4, 0, Color::WHITE, OverflowMode::Error)
        .unwrap_err();
    assert!(matches!(err, FrameError::OutOfBounds { x: 4, y: 0, .. }));
    assert!(err.to_string().contains("(4,2)"));
}

#[test]
fn test_scrolling_glyph_wraps_around_panel() {
    let mut panel = ColorFrame::new(5, 3, Color::BLACK).expect("valid dimensions");
    let glyph = digit_glyph(1, Color::RED, Color::BLACK).expect("digit");

    // Right column of the glyph lands past the edge and wraps to column 0.
    panel
        .combine_rect(4, 0, &glyph, CombineMode::Overwrite, OverflowMode::Wrap)
        .expect("wrap never fails");

    for y in 0..3 {
        assert_eq!(panel.get(0, y, OverflowMode::Error), Ok(Color::RED));
        assert_eq!(panel.get(4, y, OverflowMode::Error), Ok(Color::BLACK));
    }
}

#[test]
fn test_additive_light_sources() {
    let mut panel = ColorFrame::new(3, 1, Color::BLACK).expect("valid dimensions");
    let red = ColorFrame::new(2, 1, Color::rgb(200, 0, 0)).expect("valid dimensions");
    let blue = ColorFrame::new(2, 1, Color::rgb(100, 0, 80)).expect("valid dimensions");

    panel
        .combine_rect(0, 0, &red, CombineMode::Add, OverflowMode::Clip)
        .expect("clip never fails");
    panel
        .combine_rect(1, 0, &blue, CombineMode::Add, OverflowMode::Clip)
        .expect("clip never fails");

    let colors = panel.colors();
    assert_eq!(colors[0], Color::rgb(200, 0, 0));
    assert_eq!(colors[1], Color::rgb(255, 0, 80));
    assert_eq!(colors[2], Color::rgb(100, 0, 80));
}

// =============================================================================
// View Tree Integration Tests
// =============================================================================

#[test]
fn test_layer_change_reaches_sink() {
    let stack = LayerView::new(5, 3, Color::BLACK).expect("valid dimensions");
    let background = stack
        .add_layer(5, 3, 0, 0, CombineMode::OverwriteAll)
        .expect("layer");
    let digits = stack
        .add_layer(5, 3, 0, 0, CombineMode::Overwrite)
        .expect("layer");
    let display = Display::new(MemorySink::with_geometry(5, 3));
    display.attach(stack.clone());

    background.update(|f| f.set_all(Color::rgb(0, 0, 20)));
    let number = number_glyphs(17, Color::WHITE, Color::BLACK).expect("glyphs");
    digits.update(|f| f.set_rect(0, 0, &number, OverflowMode::Error))
        .expect("fits");

    assert_eq!(display.push_count(), 2);
    assert!(display.take_last_error().is_none());

    let sink = display.sink();
    let shown = sink.last().expect("a frame was pushed");
    assert_eq!(shown.get(1, 0, OverflowMode::Error), Ok(Color::WHITE));
    assert_eq!(shown.get(2, 0, OverflowMode::Error), Ok(Color::rgb(0, 0, 20)));
}

#[test]
fn test_sink_geometry_mismatch_is_reported() {
    let stack = LayerView::new(4, 4, Color::BLACK).expect("valid dimensions");
    let display = Display::new(MemorySink::with_geometry(8, 8));
    display.attach(stack.clone());

    stack.draw();

    assert_eq!(display.push_count(), 0);
    assert!(display.take_last_error().is_some());
}

// =============================================================================
// Serialization Integration Tests
// =============================================================================

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Style {
    color: Color,
    overflow: OverflowMode,
    combine: CombineMode,
}

#[test]
fn test_modes_and_colors_in_toml() {
    let style: Style = toml::from_str(
        r##"
        color = "#0a141e"
        overflow = "wrap"
        combine = "set_white"
        "##,
    )
    .expect("valid toml");

    assert_eq!(
        style,
        Style {
            color: Color::rgb(10, 20, 30),
            overflow: OverflowMode::Wrap,
            combine: CombineMode::SetWhite,
        }
    );

    let text = toml::to_string(&style).expect("serializable");
    assert!(text.contains("\"#0a141e\""));
}

#[test]
fn test_bad_color_in_toml() {
    let result: Result<Style, _> = toml::from_str(
        r##"
        color = "#zz0000"
        overflow = "clip"
        combine = "add"
        "##,
    );
    assert!(result.is_err());
}
