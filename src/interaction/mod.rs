mod tooltip;
mod visibility;
mod zoom;

pub use tooltip::{PositionPct, TooltipResolver, TooltipState};
pub use visibility::VisibilitySet;
pub use zoom::{
    DEFAULT_DRAG_THRESHOLD_PX, DragSelection, ZoomGesture, ZoomOutcome, ZoomSelector,
};
