//! Command-line front end over the layout engine and drag controller.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use egui::{pos2, vec2, Rect};
use serde::Serialize;
use serde_json::json;

use crate::interaction::drag::{DragController, DragView, DropTarget, RescheduleCommand};
use crate::interaction::time_slot::{TimeGridMetrics, TimeSlotResolver};
use crate::models::calendar_type::CalendarType;
use crate::models::event::{events_from_records, Event, EventRecord};
use crate::models::settings::LayoutSettings;
use crate::services::layout::LayoutEngine;
use crate::services::settings::SettingsService;
use crate::services::store::EventStore;

#[derive(Debug, Parser)]
#[command(
    name = "calendar-layout",
    about = "Lay out calendar day columns and simulate drag rescheduling",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute segment placement for a list of events.
    Layout(LayoutArgs),

    /// Resolve a pointer position to a snapped time of day.
    Resolve(ResolveArgs),

    /// Drag one event to a new slot and print the resulting update.
    Reschedule(RescheduleArgs),

    /// Print the calendar type colour and icon table.
    Palette,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings file (defaults to layout.toml in the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pixels per hour, overriding the settings file.
    #[arg(long, global = true)]
    pub cell_height: Option<f32>,

    /// Header offset in pixels, overriding the settings file.
    #[arg(long, global = true)]
    pub header_offset: Option<f32>,

    /// Use dark-theme colours.
    #[arg(long, global = true)]
    pub dark: bool,
}

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// JSON file with an array of event records, or `-` for stdin.
    #[arg(long)]
    pub events: PathBuf,

    /// Only lay out timed events starting on this date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct ColumnArgs {
    /// Top edge of the day column in pixels. Without it the column counts as unmeasured.
    #[arg(long, allow_negative_numbers = true)]
    pub column_top: Option<f32>,

    /// Height of the day column in pixels (defaults to the full grid height).
    #[arg(long)]
    pub column_height: Option<f32>,
}

impl ColumnArgs {
    fn rect(&self, settings: &LayoutSettings) -> Option<Rect> {
        let top = self.column_top?;
        let height = self.column_height.unwrap_or_else(|| settings.column_height());
        Some(Rect::from_min_size(pos2(0.0, top), vec2(1.0, height)))
    }
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub pointer_y: f32,

    #[command(flatten)]
    pub column: ColumnArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Day,
    Week,
    WorkWeek,
    Month,
}

impl From<ViewArg> for DragView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Day => DragView::Day,
            ViewArg::Week => DragView::Week,
            ViewArg::WorkWeek => DragView::WorkWeek,
            ViewArg::Month => DragView::Month,
        }
    }
}

#[derive(Debug, Args)]
pub struct RescheduleArgs {
    /// JSON file with an array of event records, or `-` for stdin.
    #[arg(long)]
    pub events: PathBuf,

    #[arg(long)]
    pub event_id: String,

    /// Target day (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    #[arg(long, value_enum, default_value_t = ViewArg::Day)]
    pub view: ViewArg,

    /// Pointer position on drop; required for time-grid views.
    #[arg(long, allow_negative_numbers = true)]
    pub pointer_y: Option<f32>,

    #[command(flatten)]
    pub column: ColumnArgs,

    #[arg(long)]
    pub pretty: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let settings = resolve_settings(&cli.settings)?;
    match cli.command {
        Commands::Layout(args) => run_layout(&args, out),
        Commands::Resolve(args) => run_resolve(&args, &settings, out),
        Commands::Reschedule(args) => run_reschedule(&args, &settings, out),
        Commands::Palette => run_palette(&settings, out),
    }
}

fn resolve_settings(args: &SettingsArgs) -> Result<LayoutSettings> {
    let service = match &args.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location()?,
    };
    let mut settings = service.load()?;

    if let Some(cell_height) = args.cell_height {
        settings.cell_height = cell_height;
    }
    if let Some(header_offset) = args.header_offset {
        settings.header_offset = header_offset;
    }
    if args.dark {
        settings.dark_mode = true;
    }
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read events from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_events(path: &Path) -> Result<(Vec<Event>, Vec<serde_json::Value>)> {
    let text = read_input(path)?;
    let records: Vec<EventRecord> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of event records", path.display()))?;
    let (events, failures) = events_from_records(records);
    let skipped = failures
        .into_iter()
        .map(|(id, err)| json!({ "eventId": id, "reason": err.to_string() }))
        .collect();
    Ok((events, skipped))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_layout(args: &LayoutArgs, out: &mut dyn Write) -> Result<()> {
    let (events, mut rejected) = load_events(&args.events)?;

    let engine = LayoutEngine::new();
    let layout = match args.date {
        Some(date) => engine.layout_day(&events, date),
        None => engine.layout(&events),
    };

    let (segments, errors) = layout.into_parts();
    rejected.extend(errors.iter().map(|err| {
        json!({ "eventId": err.event_id(), "reason": err.to_string() })
    }));

    write_json(
        out,
        &json!({ "segments": segments, "rejected": rejected }),
        args.pretty,
    )
}

fn run_resolve(args: &ResolveArgs, settings: &LayoutSettings, out: &mut dyn Write) -> Result<()> {
    let resolver = TimeSlotResolver::new(TimeGridMetrics::from(settings));
    let slot = resolver.resolve(args.pointer_y, args.column.rect(settings))?;
    write_json(out, &slot, false)
}

/// Writes each update command as one JSON line.
struct JsonCommandWriter<'w> {
    out: &'w mut dyn Write,
    pretty: bool,
    error: Option<anyhow::Error>,
}

impl EventStore for JsonCommandWriter<'_> {
    fn update_event(&mut self, command: &RescheduleCommand) {
        if let Err(err) = write_json(&mut *self.out, command, self.pretty) {
            self.error = Some(err);
        }
    }
}

fn run_reschedule(args: &RescheduleArgs, settings: &LayoutSettings, out: &mut dyn Write) -> Result<()> {
    let (events, _) = load_events(&args.events)?;
    let event = events
        .iter()
        .find(|event| event.id == args.event_id)
        .ok_or_else(|| anyhow!("No event with id '{}'", args.event_id))?;

    let view = DragView::from(args.view);
    let target = match view {
        DragView::Month => DropTarget::DayCell { date: args.date },
        DragView::Day | DragView::Week | DragView::WorkWeek => DropTarget::TimeSlot {
            date: args.date,
            pointer_y: args
                .pointer_y
                .ok_or_else(|| anyhow!("--pointer-y is required for the {:?} view", args.view))?,
            column: args.column.rect(settings),
        },
    };

    let mut controller = DragController::new(TimeGridMetrics::from(settings));
    controller.drag_start(event, view)?;
    controller.drag_over(&target);

    let mut store = JsonCommandWriter {
        out,
        pretty: args.pretty,
        error: None,
    };
    if !controller.drop_into(&target, &mut store) {
        log::info!("Drop produced no update for event '{}'", args.event_id);
    }
    match store.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn run_palette(settings: &LayoutSettings, out: &mut dyn Write) -> Result<()> {
    let rows: Vec<_> = CalendarType::ALL
        .iter()
        .map(|calendar| {
            let style = calendar.style(settings.dark_mode);
            json!({
                "calendar": calendar.tag(),
                "color": calendar.hex_color(settings.dark_mode),
                "rgb": [style.color.r(), style.color.g(), style.color.b()],
                "icon": style.icon,
            })
        })
        .collect();
    write_json(out, &rows, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::parse_instant;
    use tempfile::TempDir;

    fn instant_at(value: &serde_json::Value) -> chrono::DateTime<chrono::FixedOffset> {
        parse_instant(value.as_str().unwrap()).unwrap()
    }

    const EVENTS: &str = r#"[
        {"id":"a","start_time":"2025-03-10T09:00:00Z","end_time":"2025-03-10T12:00:00Z","isAllDay":false,"calendar":"work"},
        {"id":"b","start_time":"2025-03-10T10:00:00Z","end_time":"2025-03-10T10:30:00Z","isAllDay":false,"calendar":"meeting"},
        {"id":"bad","start_time":"2025-03-10T15:00:00Z","end_time":"2025-03-10T14:00:00Z","isAllDay":false,"calendar":"work"},
        {"id":"odd","start_time":"2025-03-10T15:00:00Z","end_time":"2025-03-10T16:00:00Z","isAllDay":false,"calendar":"gym"}
    ]"#;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("events.json"), EVENTS).unwrap();
            Self { dir }
        }

        fn run(&self, args: &[&str]) -> Result<serde_json::Value> {
            let events = self.dir.path().join("events.json");
            let config = self.dir.path().join("layout.toml");
            let mut argv = vec![
                "calendar-layout".to_string(),
                "--config".to_string(),
                config.display().to_string(),
            ];
            for arg in args {
                argv.push(arg.replace("EVENTS", &events.display().to_string()));
            }

            let cli = Cli::try_parse_from(argv)?;
            let mut out = Vec::new();
            run(cli, &mut out)?;
            if out.is_empty() {
                return Ok(serde_json::Value::Null);
            }
            Ok(serde_json::from_slice(&out)?)
        }
    }

    #[test]
    fn test_layout_command() {
        let output = Workspace::new().run(&["layout", "--events", "EVENTS"]).unwrap();

        let segments = output["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0]["eventId"], "a");
        assert_eq!(segments[0]["isContainer"], true);
        assert_eq!(segments[1]["isContained"], true);

        let rejected = output["rejected"].as_array().unwrap();
        let ids: Vec<&str> = rejected.iter().map(|r| r["eventId"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["odd", "bad"]);
    }

    #[test]
    fn test_layout_with_other_date_is_empty() {
        let output = Workspace::new()
            .run(&["layout", "--events", "EVENTS", "--date", "2025-03-11"])
            .unwrap();
        assert!(output["segments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_command() {
        // Default metrics: 60 px/hour, 40 px header. 40 + 16*60 + 7 -> 16:00.
        let output = Workspace::new()
            .run(&["resolve", "--pointer-y", "1007", "--column-top", "0"])
            .unwrap();
        assert_eq!(output, json!({ "hours": 16, "minutes": 0 }));
    }

    #[test]
    fn test_resolve_without_column_fails() {
        let result = Workspace::new().run(&["resolve", "--pointer-y", "500"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cell_height_override() {
        let output = Workspace::new()
            .run(&[
                "--cell-height",
                "120",
                "--header-offset",
                "0",
                "resolve",
                "--pointer-y",
                "300",
                "--column-top",
                "0",
            ])
            .unwrap();
        assert_eq!(output, json!({ "hours": 2, "minutes": 30 }));
    }

    #[test]
    fn test_tiny_cell_height_resolves_to_last_slot() {
        let output = Workspace::new()
            .run(&[
                "--cell-height",
                "1e-15",
                "resolve",
                "--pointer-y",
                "1000",
                "--column-top",
                "0",
            ])
            .unwrap();
        assert_eq!(output, json!({ "hours": 23, "minutes": 45 }));
    }

    #[test]
    fn test_reschedule_command() {
        let output = Workspace::new()
            .run(&[
                "reschedule",
                "--events",
                "EVENTS",
                "--event-id",
                "b",
                "--date",
                "2025-03-12",
                "--pointer-y",
                "1007",
                "--column-top",
                "0",
            ])
            .unwrap();

        assert_eq!(output["eventId"], "b");
        assert_eq!(
            instant_at(&output["newStart"]),
            parse_instant("2025-03-12T16:00:00Z").unwrap()
        );
        assert_eq!(
            instant_at(&output["newEnd"]),
            parse_instant("2025-03-12T16:30:00Z").unwrap()
        );
    }

    #[test]
    fn test_reschedule_unmeasured_column_prints_nothing() {
        let output = Workspace::new()
            .run(&[
                "reschedule",
                "--events",
                "EVENTS",
                "--event-id",
                "b",
                "--date",
                "2025-03-12",
                "--pointer-y",
                "1007",
            ])
            .unwrap();
        assert_eq!(output, serde_json::Value::Null);
    }

    #[test]
    fn test_reschedule_month_view_keeps_time() {
        let output = Workspace::new()
            .run(&[
                "reschedule",
                "--events",
                "EVENTS",
                "--event-id",
                "a",
                "--date",
                "2025-03-20",
                "--view",
                "month",
            ])
            .unwrap();
        assert_eq!(
            instant_at(&output["newStart"]),
            parse_instant("2025-03-20T09:00:00Z").unwrap()
        );
        assert_eq!(
            instant_at(&output["newEnd"]),
            parse_instant("2025-03-20T12:00:00Z").unwrap()
        );
    }

    #[test]
    fn test_reschedule_unknown_event() {
        let result = Workspace::new().run(&[
            "reschedule",
            "--events",
            "EVENTS",
            "--event-id",
            "nope",
            "--date",
            "2025-03-12",
            "--view",
            "month",
        ]);
        assert!(result.unwrap_err().to_string().contains("nope"));
    }

    #[test]
    fn test_palette_dark() {
        let output = Workspace::new().run(&["palette", "--dark"]).unwrap();
        let rows = output.as_array().unwrap();
        assert_eq!(rows.len(), CalendarType::ALL.len());
        assert_eq!(rows[0]["calendar"], "work");
        assert_eq!(rows[0]["color"], CalendarType::Work.hex_color(true));
        // Dark work colour is #60A5FA.
        assert_eq!(rows[0]["rgb"], json!([0x60, 0xA5, 0xFA]));
        assert_eq!(rows[0]["icon"], CalendarType::Work.icon());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = Workspace::new().run(&["--cell-height", "0", "palette"]);
        assert!(result.is_err());
    }
}
