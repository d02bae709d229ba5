//! Replay a selection script against a project fixture.
//!
//! Every script line becomes one or more composition events, posted through
//! the window's event queue and pumped immediately. The calls the recording
//! collaborators log while handling a line are printed under it.

use std::path::Path;

use hfm_core::composition::{
    CallLog, CompositionEvent, ConstructionError, LifecycleCall, LoadOutcome, RecordingFactory,
    RecordingLayout, RecordingOutlineView, SelectionCompositionController, SlotKind, channel,
};
use hfm_core::outline::{ItemId, ItemKind, SharedOutline};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{create_config_manager, load_outline, read_input, to_json};

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// `select <item>`
    Select(String),
    /// `deselect`
    Deselect,
    /// `remove <item>`
    Remove(String),
    /// `rename <item> <new-name>`
    Rename {
        /// Item to rename
        item: String,
        /// New name
        name: String,
    },
    /// `set-kind <item> <kind>`
    SetKind {
        /// Item to change
        item: String,
        /// New kind
        kind: ItemKind,
    },
    /// `refresh`
    Refresh,
    /// `module-loaded <item>`
    ModuleLoaded(String),
    /// `playground on|off`
    Playground(bool),
    /// `loaded editor|playground` or `load-failed editor|playground`
    LoadCompleted {
        /// Slot whose latest construction completes
        slot: SlotKind,
        /// Whether loading succeeded
        ok: bool,
    },
    /// `close`
    Close,
}

/// Parses one script line; blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns a description of the problem for malformed lines.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let command = match (verb, args.as_slice()) {
        ("select", [item]) => ScriptCommand::Select((*item).to_string()),
        ("deselect", []) => ScriptCommand::Deselect,
        ("remove", [item]) => ScriptCommand::Remove((*item).to_string()),
        ("rename", [item, name]) => ScriptCommand::Rename {
            item: (*item).to_string(),
            name: (*name).to_string(),
        },
        ("set-kind", [item, kind]) => ScriptCommand::SetKind {
            item: (*item).to_string(),
            kind: kind.parse()?,
        },
        ("refresh", []) => ScriptCommand::Refresh,
        ("module-loaded", [item]) => ScriptCommand::ModuleLoaded((*item).to_string()),
        ("playground", ["on"]) => ScriptCommand::Playground(true),
        ("playground", ["off"]) => ScriptCommand::Playground(false),
        ("loaded" | "load-failed", [slot]) => ScriptCommand::LoadCompleted {
            slot: parse_slot(slot)?,
            ok: verb == "loaded",
        },
        ("close", []) => ScriptCommand::Close,
        (
            "select" | "deselect" | "remove" | "rename" | "set-kind" | "refresh"
            | "module-loaded" | "playground" | "loaded" | "load-failed" | "close",
            _,
        ) => return Err(format!("wrong arguments for `{verb}`")),
        _ => return Err(format!("unknown command `{verb}`")),
    };
    Ok(Some(command))
}

fn parse_slot(word: &str) -> Result<SlotKind, String> {
    match word {
        "editor" => Ok(SlotKind::Editor),
        "playground" => Ok(SlotKind::Playground),
        other => Err(format!("unknown slot `{other}`, expected editor or playground")),
    }
}

/// Calls logged while handling one script line
#[derive(Debug, Serialize)]
pub struct ReplayStep {
    /// Script line number (1-based); 0 for the final window close
    pub line: usize,
    /// Script text
    pub command: String,
    /// Lifecycle calls, in order
    pub calls: Vec<LifecycleCall>,
}

type Window = SelectionCompositionController<SharedOutline, RecordingFactory, RecordingLayout>;

/// Replays `script` against `outline`, returning the calls for every line.
///
/// The window is torn down after the last line; what that causes is
/// reported as a final step.
///
/// # Errors
///
/// Returns `CliError::UnknownItem` for items missing from the outline and
/// `CliError::Script` for malformed lines.
pub fn replay(
    outline: SharedOutline,
    script: &str,
    playground_enabled: bool,
) -> Result<Vec<ReplayStep>, CliError> {
    let log = CallLog::new();
    let mut window: Window = SelectionCompositionController::new(
        outline.clone(),
        RecordingFactory::new(log.clone()),
        RecordingLayout::new(log.clone()),
    )
    .with_outline_view(Box::new(RecordingOutlineView::new(log.clone())))
    .with_playground_enabled(playground_enabled);
    let (sender, mut receiver) = channel();

    let mut steps = Vec::new();
    for (idx, text) in script.lines().enumerate() {
        let line = idx + 1;
        let command = parse_line(text).map_err(|reason| CliError::Script { line, reason })?;
        let Some(command) = command else {
            continue;
        };
        let _span = tracing::debug_span!("replay.line", line).entered();

        let resolve = |query: &str| -> Result<ItemId, CliError> {
            outline
                .read()
                .lookup(query)
                .ok_or_else(|| CliError::UnknownItem {
                    line,
                    query: query.to_string(),
                })
        };

        match command {
            ScriptCommand::Select(query) => {
                sender.send(CompositionEvent::SelectionChanged(Some(resolve(&query)?)));
            }
            ScriptCommand::Deselect => sender.send(CompositionEvent::SelectionChanged(None)),
            ScriptCommand::Remove(query) => {
                let id = resolve(&query)?;
                outline.update(|o| o.remove_item(id))?;
                sender.send(CompositionEvent::OutlineModelChanged);
            }
            ScriptCommand::Rename { item, name } => {
                let id = resolve(&item)?;
                outline.update(|o| o.rename_item(id, name))?;
                sender.send(CompositionEvent::OutlineModelChanged);
            }
            ScriptCommand::SetKind { item, kind } => {
                let id = resolve(&item)?;
                outline.update(|o| o.set_kind(id, kind))?;
                sender.send(CompositionEvent::OutlineModelChanged);
            }
            ScriptCommand::Refresh => sender.send(CompositionEvent::RefreshOutlineView),
            ScriptCommand::ModuleLoaded(query) => {
                sender.send(CompositionEvent::ModuleLoaded(resolve(&query)?));
            }
            ScriptCommand::Playground(enabled) => {
                sender.send(CompositionEvent::PlaygroundEnabled(enabled));
            }
            ScriptCommand::LoadCompleted { slot, ok } => {
                let ticket = window.factory().last_ticket(slot).ok_or_else(|| {
                    CliError::Script {
                        line,
                        reason: format!("no {slot} has been constructed yet"),
                    }
                })?;
                let outcome = if ok {
                    LoadOutcome::Loaded
                } else {
                    LoadOutcome::Failed(ConstructionError::Failed(format!(
                        "{slot} load failed on script line {line}"
                    )))
                };
                sender.send(CompositionEvent::LoadCompleted { ticket, outcome });
            }
            ScriptCommand::Close => sender.send(CompositionEvent::WindowClosed),
        }

        let handled = window.pump(&mut receiver);
        tracing::debug!(handled, "Script line replayed");
        steps.push(ReplayStep {
            line,
            command: text.trim().to_string(),
            calls: log.take(),
        });
    }

    window.teardown();
    let calls = log.take();
    if !calls.is_empty() {
        steps.push(ReplayStep {
            line: 0,
            command: "(end of script)".to_string(),
            calls,
        });
    }
    Ok(steps)
}

/// Formats replay steps as text
#[must_use]
pub fn format_steps(steps: &[ReplayStep]) -> String {
    let mut lines = Vec::new();
    for step in steps {
        lines.push(format!("> {}", step.command));
        if step.calls.is_empty() {
            lines.push("  (no calls)".to_string());
        }
        lines.extend(step.calls.iter().map(|call| format!("  {call}")));
    }
    lines.join("\n")
}

/// Replay command handler
pub fn cmd_replay(
    config_path: Option<&Path>,
    fixture: &Path,
    script: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let prefs = create_config_manager(config_path)?.load_preferences()?;
    let outline = SharedOutline::new(load_outline(fixture)?);
    let script = read_input(script)?;

    let steps = replay(outline, &script, prefs.playground_enabled)?;
    match format {
        OutputFormat::Text => println!("{}", format_steps(&steps)),
        OutputFormat::Json => println!("{}", to_json(&steps)?),
    }
    Ok(())
}
