// Event drag-and-drop rescheduling
//
// One gesture at a time: drag_start -> drag_over* -> drop_on | cancel.
// The controller never touches the event itself; it publishes a preview while
// the pointer moves and produces a single command when the drop resolves.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use egui::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::time_slot::{TimeGridMetrics, TimeSlotResolver};
use crate::models::event::{Event, EventError};
use crate::services::store::EventStore;
use crate::utils::date::{combine, with_date};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragView {
    Day,
    Week,
    WorkWeek,
    Month,
}

/// Data carried with the drag through the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub event_id: String,
    pub is_all_day: bool,
}

impl TransferPayload {
    pub fn to_json(&self) -> String {
        // Two plain fields; serialisation cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(data: &str) -> Result<Self, DragError> {
        serde_json::from_str(data).map_err(|e| DragError::MalformedPayload(e.to_string()))
    }
}

/// Where the pointer currently is.
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget {
    /// A day column of the time grid. `column` is `None` until the column
    /// has been measured.
    TimeSlot {
        date: NaiveDate,
        pointer_y: f32,
        column: Option<Rect>,
    },
    /// A whole-day cell (month grid or all-day strip).
    DayCell { date: NaiveDate },
}

impl DropTarget {
    pub fn date(&self) -> NaiveDate {
        match self {
            DropTarget::TimeSlot { date, .. } | DropTarget::DayCell { date } => *date,
        }
    }
}

/// The event being dragged, captured at drag start.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub event_id: String,
    pub original_start: DateTime<FixedOffset>,
    pub original_end: DateTime<FixedOffset>,
    pub duration: Duration,
    pub all_day: bool,
    pub view: DragView,
}

impl DragContext {
    pub fn from_event(event: &Event, view: DragView) -> Result<Self, DragError> {
        event.validate_interval()?;
        Ok(Self {
            event_id: event.id.clone(),
            original_start: event.start,
            original_end: event.end,
            duration: event.duration(),
            all_day: event.all_day,
            view,
        })
    }
}

/// Uncommitted projection of the dragged event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPreview {
    pub event_id: String,
    pub date: NaiveDate,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub is_all_day: bool,
}

/// Update handed to the event store after a successful drop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleCommand {
    pub event_id: String,
    pub new_start: DateTime<FixedOffset>,
    pub new_end: DateTime<FixedOffset>,
}

impl RescheduleCommand {
    pub fn duration(&self) -> Duration {
        self.new_end - self.new_start
    }

    /// Hand the command to the store. Fire-and-forget.
    pub fn dispatch(&self, store: &mut dyn EventStore) {
        log::info!(
            "Rescheduling event '{}' to {}",
            self.event_id,
            self.new_start.to_rfc3339()
        );
        store.update_event(self);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("A drag of event '{0}' is already in progress")]
    AlreadyDragging(String),

    #[error("Cannot drag event: {0}")]
    InvalidEvent(#[from] EventError),

    #[error("Malformed drag payload: {0}")]
    MalformedPayload(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// State of the current gesture; everything is `None` while idle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    pub dragged: Option<DragContext>,
    pub preview: Option<DragPreview>,
    pub active_column: Option<NaiveDate>,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    resolver: TimeSlotResolver,
}

impl DragController {
    pub fn new(metrics: TimeGridMetrics) -> Self {
        Self {
            state: DragState::default(),
            resolver: TimeSlotResolver::new(metrics),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn phase(&self) -> DragPhase {
        if self.state.dragged.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == DragPhase::Dragging
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.state.preview.as_ref()
    }

    pub fn active_for_view(&self, view: DragView) -> Option<&DragContext> {
        self.state.dragged.as_ref().filter(|ctx| ctx.view == view)
    }

    pub fn drag_start(&mut self, event: &Event, view: DragView) -> Result<TransferPayload, DragError> {
        if let Some(current) = &self.state.dragged {
            return Err(DragError::AlreadyDragging(current.event_id.clone()));
        }

        let context = DragContext::from_event(event, view)?;
        log::debug!("Drag started for event '{}' in {:?} view", event.id, view);

        self.state = DragState {
            dragged: Some(context),
            preview: None,
            active_column: None,
        };
        Ok(TransferPayload {
            event_id: event.id.clone(),
            is_all_day: event.all_day,
        })
    }

    /// Update the preview for the pointer's current target.
    ///
    /// If the target cannot be resolved this frame the previous preview is
    /// kept as is.
    pub fn drag_over(&mut self, target: &DropTarget) -> Option<&DragPreview> {
        let context = self.state.dragged.as_ref()?;

        match self.project(context, target) {
            Some(start) => {
                let preview = DragPreview {
                    event_id: context.event_id.clone(),
                    date: target.date(),
                    start,
                    end: start + context.duration,
                    is_all_day: context.all_day,
                };
                log::trace!("Drag preview for '{}' at {}", preview.event_id, start);
                self.state.active_column = Some(target.date());
                self.state.preview = Some(preview);
            }
            None => log::trace!("Drag target did not resolve; keeping previous preview"),
        }

        self.state.preview.as_ref()
    }

    /// Finish the gesture on `target`.
    ///
    /// The gesture ends whatever happens. A command is returned whenever the
    /// target resolves, including a drop back onto the current start.
    pub fn drop_on(&mut self, target: &DropTarget) -> Option<RescheduleCommand> {
        let context = std::mem::take(&mut self.state).dragged?;

        let Some(new_start) = self.project(&context, target) else {
            log::debug!(
                "Drop of event '{}' did not resolve; no update issued",
                context.event_id
            );
            return None;
        };

        Some(RescheduleCommand {
            event_id: context.event_id,
            new_start,
            new_end: new_start + context.duration,
        })
    }

    /// Drop and dispatch in one step. Returns whether an update was issued.
    pub fn drop_into(&mut self, target: &DropTarget, store: &mut dyn EventStore) -> bool {
        match self.drop_on(target) {
            Some(command) => {
                command.dispatch(store);
                true
            }
            None => false,
        }
    }

    /// Drag end or cancel: discard all gesture state.
    pub fn cancel(&mut self) {
        if let Some(context) = self.state.dragged.take() {
            log::debug!("Drag of event '{}' cancelled", context.event_id);
        }
        self.state = DragState::default();
    }

    fn project(&self, context: &DragContext, target: &DropTarget) -> Option<DateTime<FixedOffset>> {
        match target {
            DropTarget::TimeSlot {
                date,
                pointer_y,
                column,
            } if !context.all_day => {
                let slot = self.resolver.resolve(*pointer_y, *column).ok()?;
                combine(*date, slot.to_naive_time(), *context.original_start.offset())
            }
            _ => with_date(context.original_start, target.date()),
        }
    }
}
