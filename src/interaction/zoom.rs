use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CoordinateMapper, PlotArea, YearDomain, ZoomWindow};

/// Drags shorter than this many pixels are treated as clicks.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 8.0;

/// In-progress drag over the plot, in clamped viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSelection {
    pub start_px: f64,
    pub end_px: f64,
}

impl DragSelection {
    #[must_use]
    pub fn distance(self) -> f64 {
        (self.end_px - self.start_px).abs()
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.start_px.min(self.end_px)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomGesture {
    Idle,
    Dragging(DragSelection),
}

/// What a finished drag did to the zoom window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomOutcome {
    /// No drag was in progress.
    Ignored,
    /// Drag shorter than the threshold.
    Click,
    /// Resulting window spanned less than one year.
    Rejected,
    /// Pointer left the plot mid-drag; the drag was discarded.
    Cancelled,
    Applied(ZoomWindow),
}

/// Drag-to-zoom state machine over the year axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomSelector {
    gesture: ZoomGesture,
    window: Option<ZoomWindow>,
    threshold_px: f64,
}

impl Default for ZoomSelector {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl ZoomSelector {
    #[must_use]
    pub fn new(threshold_px: f64) -> Self {
        Self {
            gesture: ZoomGesture::Idle,
            window: None,
            threshold_px,
        }
    }

    #[must_use]
    pub fn gesture(self) -> ZoomGesture {
        self.gesture
    }

    #[must_use]
    pub fn selection(self) -> Option<DragSelection> {
        match self.gesture {
            ZoomGesture::Dragging(selection) => Some(selection),
            ZoomGesture::Idle => None,
        }
    }

    #[must_use]
    pub fn window(self) -> Option<ZoomWindow> {
        self.window
    }

    /// Starts a drag when the pointer goes down inside `plot`.
    pub fn pointer_down(&mut self, x: f64, y: f64, plot: PlotArea) {
        if !x.is_finite() || !y.is_finite() || !plot.contains(x, y) {
            trace!(x, y, "pointer down outside plot area");
            return;
        }
        let start_px = plot.clamp_x(x);
        self.gesture = ZoomGesture::Dragging(DragSelection {
            start_px,
            end_px: start_px,
        });
        trace!(start_px, "zoom drag started");
    }

    pub fn pointer_move(&mut self, x: f64, plot: PlotArea) {
        if let ZoomGesture::Dragging(selection) = &mut self.gesture {
            if x.is_finite() {
                selection.end_px = plot.clamp_x(x);
            }
        }
    }

    /// Ends the drag, converting it into a zoom window when it is long
    /// enough. `mapper` must reflect the domain the drag was drawn over.
    pub fn pointer_up(&mut self, mapper: CoordinateMapper, base: YearDomain) -> ZoomOutcome {
        let ZoomGesture::Dragging(selection) = self.gesture else {
            return ZoomOutcome::Ignored;
        };
        self.gesture = ZoomGesture::Idle;

        if selection.distance() < self.threshold_px {
            trace!(distance = selection.distance(), "drag below threshold");
            return ZoomOutcome::Click;
        }

        let start = mapper.from_pixel_x(selection.start_px).round() as i32;
        let end = mapper.from_pixel_x(selection.end_px).round() as i32;
        let window = ZoomWindow::new(start.min(end), start.max(end));
        if self.apply_window(window, base) {
            ZoomOutcome::Applied(window)
        } else {
            ZoomOutcome::Rejected
        }
    }

    /// Leaving the plot mid-drag discards the drag; the current window stays.
    pub fn pointer_leave(&mut self) -> ZoomOutcome {
        let ZoomGesture::Dragging(selection) = self.gesture else {
            return ZoomOutcome::Ignored;
        };
        self.gesture = ZoomGesture::Idle;
        trace!(distance = selection.distance(), "zoom drag cancelled");
        ZoomOutcome::Cancelled
    }

    /// Installs `window` when its span clamped into `base` is at least one
    /// year; otherwise keeps the current window and returns `false`.
    pub fn apply_window(&mut self, window: ZoomWindow, base: YearDomain) -> bool {
        if window.clamp_into(base).is_none() {
            debug!(min = window.min, max = window.max, "zoom window rejected");
            return false;
        }
        debug!(min = window.min, max = window.max, "zoom window installed");
        self.window = Some(window);
        true
    }

    /// Double-click / explicit reset: back to the full year domain.
    pub fn reset(&mut self) {
        self.gesture = ZoomGesture::Idle;
        self.window = None;
    }
}
