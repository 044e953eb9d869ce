//! Pointer / Touch Gesture Recognition
//!
//! Turns raw press / move / release events on the sphere viewport into:
//! - Tap: quick press + release → activate the node under the pointer
//! - Double-tap: two taps within 300ms → go back one level
//! - Long-press: hold > 500ms without dragging → node context panel
//! - Drag: one pointer moved past 10px → orbit the camera
//! - Pinch: two pointers → zoom
//!
//! Every event carries its own timestamp so the recognizer is a pure state
//! machine driven by the frame loop.

use std::time::{Duration, Instant};

/// Touch point
#[derive(Debug, Clone, Copy)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub id: u64,
    pub time: Instant,
}

/// Recognized gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Single tap at position
    Tap { x: f32, y: f32 },
    /// Double-tap at position
    DoubleTap { x: f32, y: f32 },
    /// Long press at position
    LongPress { x: f32, y: f32 },
    /// Drag with delta since the last move
    Drag { dx: f32, dy: f32 },
    /// Pinch with scale relative to the previous move
    Pinch { scale: f32 },
    /// No gesture detected yet
    None,
}

/// Gesture state machine.
pub struct GestureRecognizer {
    /// Current active touches
    touches: Vec<TouchPoint>,
    /// First touch point (for gesture start)
    start_point: Option<TouchPoint>,
    /// Last tap time and position (for double-tap detection)
    last_tap: Option<(Instant, f32, f32)>,
    /// Long press already reported for the current touch
    long_press_fired: bool,
    long_press: Duration,
    double_tap: Duration,
    /// Travel (px) after which a touch becomes a drag
    drag_threshold: f32,
    /// Whether the current touch became a drag
    is_dragging: bool,
    /// Total drag distance (for distinguishing tap from drag)
    drag_distance: f32,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            touches: Vec::with_capacity(4),
            start_point: None,
            last_tap: None,
            long_press_fired: false,
            long_press: Duration::from_millis(500),
            double_tap: Duration::from_millis(300),
            drag_threshold: 10.0,
            is_dragging: false,
            drag_distance: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Process touch start event
    pub fn touch_start(&mut self, x: f32, y: f32, id: u64, now: Instant) {
        let point = TouchPoint { x, y, id, time: now };
        self.touches.retain(|t| t.id != id);
        self.touches.push(point);
        if self.touches.len() == 1 {
            self.start_point = Some(point);
            self.is_dragging = false;
            self.long_press_fired = false;
            self.drag_distance = 0.0;
        }
    }

    /// Process touch move event. Returns Drag or Pinch once movement is significant.
    pub fn touch_move(&mut self, x: f32, y: f32, id: u64) -> Gesture {
        let Some(idx) = self.touches.iter().position(|t| t.id == id) else {
            return Gesture::None;
        };

        // Two-finger pinch: compare finger spread before and after this move
        if self.touches.len() == 2 {
            let other = self.touches[1 - idx];
            let before = self.touches[idx];
            let old_dist = ((before.x - other.x).powi(2) + (before.y - other.y).powi(2)).sqrt();
            let new_dist = ((x - other.x).powi(2) + (y - other.y).powi(2)).sqrt();
            self.touches[idx].x = x;
            self.touches[idx].y = y;
            self.is_dragging = true;
            if old_dist > 1.0 {
                return Gesture::Pinch { scale: new_dist / old_dist };
            }
            return Gesture::None;
        }

        let touch = &mut self.touches[idx];
        let dx = x - touch.x;
        let dy = y - touch.y;
        self.drag_distance += (dx * dx + dy * dy).sqrt();
        touch.x = x;
        touch.y = y;

        if self.drag_distance > self.drag_threshold && !self.long_press_fired {
            self.is_dragging = true;
            return Gesture::Drag { dx, dy };
        }
        Gesture::None
    }

    /// Process touch end event. Returns the recognized gesture.
    pub fn touch_end(&mut self, x: f32, y: f32, id: u64, now: Instant) -> Gesture {
        self.touches.retain(|t| t.id != id);
        if !self.touches.is_empty() {
            return Gesture::None;
        }

        let Some(start) = self.start_point.take() else {
            return Gesture::None;
        };

        if self.is_dragging {
            return Gesture::None;
        }

        let held = now.saturating_duration_since(start.time);
        if held >= self.long_press {
            if self.long_press_fired {
                return Gesture::None;
            }
            return Gesture::LongPress { x, y };
        }

        // Tap: check for a preceding tap close by
        if let Some((last_time, lx, ly)) = self.last_tap {
            let gap = now.saturating_duration_since(last_time);
            let dist = ((x - lx).powi(2) + (y - ly).powi(2)).sqrt();
            if gap < self.double_tap && dist < 50.0 {
                self.last_tap = None;
                return Gesture::DoubleTap { x, y };
            }
        }
        self.last_tap = Some((now, x, y));
        Gesture::Tap { x, y }
    }

    /// Check for a long press on a touch that is still down (called every
    /// frame). Fires once per touch.
    pub fn check_long_press(&mut self, now: Instant) -> Option<(f32, f32)> {
        if self.touches.len() != 1 || self.is_dragging || self.long_press_fired {
            return None;
        }
        let touch = self.touches[0];
        if now.saturating_duration_since(touch.time) >= self.long_press {
            self.long_press_fired = true;
            return Some((touch.x, touch.y));
        }
        None
    }
}
