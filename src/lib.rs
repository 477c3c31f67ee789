// Calendar Layout Library
// Day-column event layout and drag rescheduling, independent of any renderer

pub mod cli;
pub mod interaction;
pub mod models;
pub mod services;
pub mod utils;

pub use interaction::{DragController, DropTarget, TimeSlotResolver};
pub use models::event::Event;
pub use models::segment::Segment;
pub use services::layout::{DayLayout, LayoutEngine};
