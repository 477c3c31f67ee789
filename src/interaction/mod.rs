// Pointer interaction on the time grid: slot resolution and drag rescheduling

pub mod drag;
pub mod time_slot;

pub use drag::{
    DragContext, DragController, DragError, DragPhase, DragPreview, DragState, DragView,
    DropTarget, RescheduleCommand, TransferPayload,
};
pub use time_slot::{ResolveError, SlotTime, TimeGridMetrics, TimeSlotResolver, SNAP_MINUTES};
