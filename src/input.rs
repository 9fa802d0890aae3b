use egui::{Context, PointerButton, Pos2, Rect};

use crate::canvas::StrokeCanvas;

/// Phase of a single-finger touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
}

/// A touch event in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub pos: Pos2,
    pub phase: TouchPhase,
}

impl TouchEvent {
    pub fn started(pos: Pos2) -> Self {
        Self { pos, phase: TouchPhase::Started }
    }

    pub fn moved(pos: Pos2) -> Self {
        Self { pos, phase: TouchPhase::Moved }
    }

    pub fn ended(pos: Pos2) -> Self {
        Self { pos, phase: TouchPhase::Ended }
    }
}

impl StrokeCanvas {
    /// Route a touch event to the matching canvas operation.
    ///
    /// Always returns true: the canvas consumes every touch it is given.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Started => self.on_touch_begin(event.pos),
            TouchPhase::Moved => self.on_touch_move(event.pos),
            TouchPhase::Ended => self.on_touch_end(),
        }
        true
    }
}

/// Primary pointer state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Latest pointer position in screen coordinates
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    pub down: bool,
}

impl PointerSnapshot {
    /// Read the primary button state from egui's input
    pub fn from_egui(ctx: &Context) -> Self {
        ctx.input(|i| Self {
            pos: i.pointer.latest_pos(),
            pressed: i.pointer.button_pressed(PointerButton::Primary),
            released: i.pointer.button_released(PointerButton::Primary),
            down: i.pointer.button_down(PointerButton::Primary),
        })
    }
}

/// Turns per-frame pointer state into canvas-local touch events.
///
/// A gesture starts only when the primary button is pressed inside the canvas
/// rectangle; once started it follows the pointer even outside the rectangle
/// until the button is released.
#[derive(Debug, Clone)]
pub struct TouchTracker {
    canvas_rect: Rect,
    last_pos: Option<Pos2>,
    tracking: bool,
}

impl TouchTracker {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pos: None,
            tracking: false,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate touch events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<TouchEvent> {
        self.update(PointerSnapshot::from_egui(ctx))
    }

    /// Generate the touch events implied by one frame of pointer state
    pub fn update(&mut self, pointer: PointerSnapshot) -> Vec<TouchEvent> {
        let mut events = Vec::new();
        let was_tracking = self.tracking;

        if was_tracking {
            if pointer.down && !pointer.released {
                if let Some(pos) = pointer.pos.filter(|p| Some(*p) != self.last_pos) {
                    events.push(TouchEvent::moved(self.to_local(pos)));
                    self.last_pos = Some(pos);
                }
            }
            if pointer.released || !pointer.down {
                self.end_gesture(pointer.pos, &mut events);
            }
        }

        // A press right after a release in the same frame leaves the button down
        if pointer.pressed && !self.tracking && (!was_tracking || pointer.down) {
            if let Some(pos) = pointer.pos.filter(|p| self.canvas_rect.contains(*p)) {
                events.push(TouchEvent::started(self.to_local(pos)));
                self.tracking = true;
                self.last_pos = Some(pos);

                // Press and release in the same frame
                if !pointer.down {
                    self.end_gesture(pointer.pos, &mut events);
                }
            }
        }

        events
    }

    fn end_gesture(&mut self, pos: Option<Pos2>, events: &mut Vec<TouchEvent>) {
        if let Some(pos) = pos.or(self.last_pos) {
            events.push(TouchEvent::ended(self.to_local(pos)));
        }
        self.tracking = false;
        self.last_pos = None;
    }
}
