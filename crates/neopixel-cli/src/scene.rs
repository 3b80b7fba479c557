//! Scenes the CLI pushes through the view tree.

use crate::config::DisplayConfig;
use neopixel_core::glyph::GLYPH_HEIGHT;
use neopixel_core::{
    number_glyphs, Color, CombineMode, FrameError, FrameView, LayerView, OverflowMode,
};
use std::rc::Rc;

/// Hue steps the rainbow advances per tick.
const HUE_STEP: u32 = 8;

/// Scrolling rainbow with a frame counter drawn over it.
pub(crate) struct DemoScene {
    stack: Rc<LayerView>,
    rainbow: Rc<FrameView>,
    counter: Rc<FrameView>,
    overflow: OverflowMode,
    tick: u32,
}

impl DemoScene {
    /// Build the layer stack for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidDimensions`] for a zero-sized panel.
    pub(crate) fn new(config: &DisplayConfig) -> Result<Self, FrameError> {
        let stack = LayerView::new(config.width, config.height, config.background)?;
        stack.set_overflow(config.overflow);
        let rainbow = stack.add_layer(config.width, 1, 0, 0, CombineMode::OverwriteAll)?;
        let counter = stack.add_layer(config.width, GLYPH_HEIGHT, 0, 1, CombineMode::Overwrite)?;
        Ok(Self {
            stack,
            rainbow,
            counter,
            overflow: config.overflow,
            tick: 0,
        })
    }

    /// Root view to attach to a display.
    pub(crate) fn root(&self) -> Rc<LayerView> {
        Rc::clone(&self.stack)
    }

    /// Frames rendered so far.
    pub(crate) const fn tick(&self) -> u32 {
        self.tick
    }

    /// Advance one frame and push it.
    ///
    /// Both layers are repainted before a single `draw()`, so the display
    /// sees one frame per step.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::OutOfBounds`] under `Error` overflow once the
    /// counter no longer fits the panel, or when a layer does not fit it.
    pub(crate) fn step(&mut self) -> Result<(), FrameError> {
        {
            let mut frame = self.rainbow.frame_mut();
            let width = frame.width() as u64;
            for x in 0..frame.width() {
                // Below 255 because x < width.
                let spread = (x as u64 * 255 / width) as u32;
                let hue = spread.wrapping_add(self.tick.wrapping_mul(HUE_STEP));
                frame.set(x as i32, 0, Color::hue(hue), self.overflow)?;
            }
        }
        {
            let digits = number_glyphs(u64::from(self.tick), Color::WHITE, Color::BLACK)?;
            let mut frame = self.counter.frame_mut();
            frame.set_all(Color::BLACK);
            frame.set_rect(0, 0, &digits, self.overflow)?;
        }
        self.counter.frame().draw();
        if let Some(err) = self.stack.take_last_error() {
            return Err(err);
        }
        self.tick = self.tick.wrapping_add(1);
        tracing::trace!(tick = self.tick, "demo frame drawn");
        Ok(())
    }
}

/// A stack showing `number` centred on a `bg` panel just large enough for it.
///
/// # Errors
///
/// Propagates glyph construction failures.
pub(crate) fn digits_scene(
    number: u64,
    fg: Color,
    bg: Color,
) -> Result<Rc<LayerView>, FrameError> {
    let digits = number_glyphs(number, fg, bg)?;
    let stack = LayerView::new(digits.width() + 2, digits.height() + 2, bg)?;
    let layer = stack.add_layer(
        digits.width(),
        digits.height(),
        1,
        1,
        CombineMode::OverwriteAll,
    )?;
    layer.update(|frame| frame.set_rect(0, 0, &digits, OverflowMode::Error))?;
    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neopixel_core::{Display, FrameSource, MemorySink};

    fn attached(stack: Rc<LayerView>) -> Rc<Display<MemorySink>> {
        let display = Display::new(MemorySink::new());
        display.attach(stack as Rc<dyn FrameSource>);
        display
    }

    #[test]
    fn test_demo_pushes_one_frame_per_step() {
        let mut scene = DemoScene::new(&DisplayConfig::default()).unwrap();
        let display = attached(scene.root());
        for _ in 0..3 {
            scene.step().unwrap();
        }
        assert_eq!(display.push_count(), 3);
        assert_eq!(scene.tick(), 3);
    }

    #[test]
    fn test_demo_top_row_is_lit() {
        let mut scene = DemoScene::new(&DisplayConfig::default()).unwrap();
        let display = attached(scene.root());
        scene.step().unwrap();
        let sink = display.sink();
        let frame = sink.last().unwrap();
        assert!((0..16).all(|x| !frame.get(x, 0, OverflowMode::Error).unwrap().is_black()));
    }

    #[test]
    fn test_demo_counter_overlays_rainbow() {
        let mut scene = DemoScene::new(&DisplayConfig::default()).unwrap();
        let display = attached(scene.root());
        scene.step().unwrap();
        let sink = display.sink();
        let frame = sink.last().unwrap();
        // Tick 0 draws "0": both glyph columns lit on rows 1..=3.
        for y in 1..=3 {
            assert_eq!(frame.get(0, y, OverflowMode::Error), Ok(Color::WHITE));
            assert_eq!(frame.get(1, y, OverflowMode::Error), Ok(Color::WHITE));
        }
        // Black counter pixels are transparent over the background.
        assert_eq!(frame.get(5, 2, OverflowMode::Error), Ok(Color::BLACK));
    }

    #[test]
    fn test_demo_error_overflow_on_narrow_panel() {
        let config = DisplayConfig {
            width: 4,
            overflow: OverflowMode::Error,
            ..DisplayConfig::default()
        };
        let mut scene = DemoScene::new(&config).unwrap();
        for _ in 0..10 {
            scene.step().unwrap();
        }
        // "10" is five columns wide.
        assert!(matches!(scene.step(), Err(FrameError::OutOfBounds { .. })));
    }

    #[test]
    fn test_demo_error_overflow_on_short_panel() {
        let config = DisplayConfig {
            height: 2,
            overflow: OverflowMode::Error,
            ..DisplayConfig::default()
        };
        let mut scene = DemoScene::new(&config).unwrap();
        let display = attached(scene.root());

        // The three-row counter layer starts at row 1 and overhangs row 2.
        assert_eq!(
            scene.step(),
            Err(FrameError::OutOfBounds {
                x: 0,
                y: 2,
                width: 16,
                height: 2
            })
        );
        assert_eq!(display.push_count(), 0);
        assert_eq!(scene.tick(), 0);
    }

    #[test]
    fn test_demo_wide_panel_hue_spread() {
        let config = DisplayConfig {
            width: 300,
            height: 4,
            ..DisplayConfig::default()
        };
        let mut scene = DemoScene::new(&config).unwrap();
        let display = attached(scene.root());
        scene.step().unwrap();
        let sink = display.sink();
        let frame = sink.last().unwrap();
        assert_eq!(frame.get(0, 0, OverflowMode::Error), Ok(Color::hue(0)));
        assert_eq!(frame.get(299, 0, OverflowMode::Error), Ok(Color::hue(254)));
    }

    #[test]
    fn test_digits_scene_layout() {
        let stack = digits_scene(7, Color::RED, Color::BLUE).unwrap();
        let frame = stack.frame();
        assert_eq!((frame.width(), frame.height()), (4, 5));
        assert_eq!(frame.get(0, 0, OverflowMode::Error), Ok(Color::BLUE));
        assert_eq!(frame.get(1, 1, OverflowMode::Error), Ok(Color::RED));
    }
}
