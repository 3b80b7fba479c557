//! Change propagation through a tree of views.
//!
//! A view that lets callers mutate pixels owns a [`ColorFrame`] and makes
//! itself that frame's parent, so `frame.draw()` reaches the view. Each
//! view in turn forwards `draw()` to its own parent until the root
//! [`Display`] pushes the result to a [`PixelSink`].
//!
//! ```text
//! FrameView ─┐
//! FrameView ─┼─► LayerView ──► Display ──► PixelSink
//! FrameView ─┘
//! ```
//!
//! Parent links are [`Weak`]: parents own children, never the reverse.
//! Everything here is single-threaded (`Rc`/`RefCell`).

use crate::{Color, ColorFrame, CombineMode, FrameError, OverflowMode, PixelSink, SinkError};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// Anything that wants to hear that its content may have changed.
pub trait Drawable {
    /// Re-render from current content and notify upward.
    fn draw(&self);
}

/// A view that presents a frame and can be attached under a parent.
pub trait FrameSource: Drawable {
    /// The frame this view presents.
    fn frame_cell(&self) -> &RefCell<ColorFrame>;

    /// Attach the parent that this view's `draw()` forwards to.
    fn set_parent(&self, parent: Weak<dyn Drawable>);
}

fn notify(parent: &RefCell<Option<Weak<dyn Drawable>>>) {
    let parent = parent.borrow().clone();
    if let Some(parent) = parent.and_then(|p| p.upgrade()) {
        parent.draw();
    }
}

/// A directly paintable view.
///
/// The owned frame's parent is the view itself. Prefer
/// [`FrameView::update`]: it releases the mutable borrow before `draw()`
/// runs, so ancestors can read the frame while compositing.
pub struct FrameView {
    frame: RefCell<ColorFrame>,
    parent: RefCell<Option<Weak<dyn Drawable>>>,
}

impl FrameView {
    /// Create a view over a new `width` x `height` frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize, fill: Color) -> Result<Rc<Self>, FrameError> {
        let mut frame = ColorFrame::new(width, height, fill)?;
        Ok(Rc::new_cyclic(|me: &Weak<Self>| {
            let me: Weak<dyn Drawable> = me.clone();
            frame.set_parent(me);
            Self {
                frame: RefCell::new(frame),
                parent: RefCell::new(None),
            }
        }))
    }

    /// Shared access to the frame.
    pub fn frame(&self) -> Ref<'_, ColorFrame> {
        self.frame.borrow()
    }

    /// Mutable access to the frame. Call `draw()` once the borrow is dropped.
    pub fn frame_mut(&self) -> RefMut<'_, ColorFrame> {
        self.frame.borrow_mut()
    }

    /// Mutate the frame, then propagate `draw()`.
    pub fn update<R>(&self, f: impl FnOnce(&mut ColorFrame) -> R) -> R {
        let out = f(&mut self.frame.borrow_mut());
        self.draw();
        out
    }
}

impl Drawable for FrameView {
    fn draw(&self) {
        notify(&self.parent);
    }
}

impl FrameSource for FrameView {
    fn frame_cell(&self) -> &RefCell<ColorFrame> {
        &self.frame
    }

    fn set_parent(&self, parent: Weak<dyn Drawable>) {
        *self.parent.borrow_mut() = Some(parent);
    }
}

struct Layer {
    view: Rc<FrameView>,
    x: i32,
    y: i32,
    combine: CombineMode,
}

/// Stack of [`FrameView`] layers composited into one output frame.
///
/// Layers are blended in insertion order. Any layer's `draw()` recomposites
/// the whole stack and forwards upward.
///
/// Under [`OverflowMode::Error`] a layer that does not fit aborts the
/// composite: nothing is forwarded and the error is kept for
/// [`LayerView::take_last_error`].
pub struct LayerView {
    output: RefCell<ColorFrame>,
    background: Color,
    overflow: Cell<OverflowMode>,
    layers: RefCell<Vec<Layer>>,
    last_error: RefCell<Option<FrameError>>,
    parent: RefCell<Option<Weak<dyn Drawable>>>,
    me: Weak<Self>,
}

impl LayerView {
    /// Create an empty stack with a `width` x `height` output.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize, background: Color) -> Result<Rc<Self>, FrameError> {
        let output = ColorFrame::new(width, height, background)?;
        Ok(Rc::new_cyclic(|me| Self {
            output: RefCell::new(output),
            background,
            overflow: Cell::new(OverflowMode::Clip),
            layers: RefCell::new(Vec::new()),
            last_error: RefCell::new(None),
            parent: RefCell::new(None),
            me: me.clone(),
        }))
    }

    /// Overflow mode used when placing layers (default `Clip`).
    pub fn set_overflow(&self, mode: OverflowMode) {
        self.overflow.set(mode);
    }

    /// Current layer overflow mode.
    pub fn overflow(&self) -> OverflowMode {
        self.overflow.get()
    }

    /// Add a new black layer on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidDimensions`] if either dimension is zero.
    pub fn add_layer(
        &self,
        width: usize,
        height: usize,
        x: i32,
        y: i32,
        combine: CombineMode,
    ) -> Result<Rc<FrameView>, FrameError> {
        let view = FrameView::new(width, height, Color::BLACK)?;
        let me: Weak<dyn Drawable> = self.me.clone();
        view.set_parent(me);
        self.layers.borrow_mut().push(Layer {
            view: Rc::clone(&view),
            x,
            y,
            combine,
        });
        Ok(view)
    }

    /// Move a layer's top-left corner. Returns false if `view` is not a layer here.
    pub fn move_layer(&self, view: &Rc<FrameView>, x: i32, y: i32) -> bool {
        let mut layers = self.layers.borrow_mut();
        match layers.iter_mut().find(|l| Rc::ptr_eq(&l.view, view)) {
            Some(layer) => {
                layer.x = x;
                layer.y = y;
                true
            }
            None => false,
        }
    }

    /// Remove a layer. Returns false if `view` is not a layer here.
    pub fn remove_layer(&self, view: &Rc<FrameView>) -> bool {
        let mut layers = self.layers.borrow_mut();
        let before = layers.len();
        layers.retain(|l| !Rc::ptr_eq(&l.view, view));
        before != layers.len()
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.borrow().len()
    }

    /// The composited output.
    pub fn frame(&self) -> Ref<'_, ColorFrame> {
        self.output.borrow()
    }

    /// Take the most recent composite failure, if any.
    pub fn take_last_error(&self) -> Option<FrameError> {
        self.last_error.borrow_mut().take()
    }

    fn composite(&self) -> Result<(), FrameError> {
        let Ok(mut output) = self.output.try_borrow_mut() else {
            tracing::warn!("layer output is borrowed; skipping composite");
            return Ok(());
        };
        output.set_all(self.background);
        let overflow = self.overflow.get();
        for (index, layer) in self.layers.borrow().iter().enumerate() {
            let Ok(source) = layer.view.frame.try_borrow() else {
                tracing::warn!(index, "layer frame is mutably borrowed; skipping layer");
                continue;
            };
            output
                .combine_rect(layer.x, layer.y, &source, layer.combine, overflow)
                .map_err(|err| {
                    tracing::warn!(index, %err, "layer does not fit the output; frame not forwarded");
                    err
                })?;
        }
        Ok(())
    }
}

impl Drawable for LayerView {
    fn draw(&self) {
        match self.composite() {
            Ok(()) => notify(&self.parent),
            Err(err) => *self.last_error.borrow_mut() = Some(err),
        }
    }
}

impl FrameSource for LayerView {
    fn frame_cell(&self) -> &RefCell<ColorFrame> {
        &self.output
    }

    fn set_parent(&self, parent: Weak<dyn Drawable>) {
        *self.parent.borrow_mut() = Some(parent);
    }
}

/// Root of a view tree: pushes its content to a [`PixelSink`] on every `draw()`.
pub struct Display<S> {
    content: RefCell<Option<Rc<dyn FrameSource>>>,
    sink: RefCell<S>,
    last_error: RefCell<Option<SinkError>>,
    pushes: Cell<usize>,
}

impl<S: PixelSink + 'static> Display<S> {
    /// Create a root over `sink` with no content yet.
    pub fn new(sink: S) -> Rc<Self> {
        Rc::new(Self {
            content: RefCell::new(None),
            sink: RefCell::new(sink),
            last_error: RefCell::new(None),
            pushes: Cell::new(0),
        })
    }

    /// Make `content` the displayed view and parent it to this root.
    pub fn attach(self: &Rc<Self>, content: Rc<dyn FrameSource>) {
        let me: Rc<dyn Drawable> = Rc::clone(self) as Rc<dyn Drawable>;
        content.set_parent(Rc::downgrade(&me));
        *self.content.borrow_mut() = Some(content);
    }

    /// The sink, e.g. to inspect recorded frames.
    pub fn sink(&self) -> Ref<'_, S> {
        self.sink.borrow()
    }

    /// Number of frames successfully pushed.
    pub fn push_count(&self) -> usize {
        self.pushes.get()
    }

    /// Take the most recent sink failure, if any.
    pub fn take_last_error(&self) -> Option<SinkError> {
        self.last_error.borrow_mut().take()
    }

    fn push(&self) -> Result<bool, SinkError> {
        let content = self.content.borrow();
        let Some(content) = content.as_ref() else {
            return Ok(false);
        };
        let Ok(frame) = content.frame_cell().try_borrow() else {
            tracing::warn!("display content is mutably borrowed; frame not pushed");
            return Ok(false);
        };
        self.sink.borrow_mut().show(&frame)?;
        Ok(true)
    }
}

impl<S: PixelSink + 'static> Drawable for Display<S> {
    fn draw(&self) {
        match self.push() {
            Ok(true) => self.pushes.set(self.pushes.get() + 1),
            Ok(false) => {}
            Err(err) => {
                tracing::error!(%err, "failed to push frame to sink");
                *self.last_error.borrow_mut() = Some(err);
            }
        }
    }
}
