//! Recorded editing sessions: the initial intervals plus the input events the
//! surrounding UI delivered, replayed in order against an editor.

use drag::ContainerGeometry;
use editor::{SliderObserver, TimeRangeEditor};
use error::SliderError;
use interval::{ExternalInterval, Handle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Press {
        index: usize,
        handle: Handle,
        #[serde(default = "on_handle_default")]
        on_handle: bool,
    },
    Move {
        x: f64,
        left: Option<f64>,
        width: Option<f64>,
    },
    Release,
    Add {
        from: String,
        until: String,
    },
    Remove {
        index: usize,
    },
    Edit {
        index: usize,
        from: String,
        until: String,
    },
    Save,
}

fn on_handle_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub times: Vec<ExternalInterval>,
    #[serde(default)]
    pub events: Vec<Event>,
}

pub struct Replay<O> {
    pub editor: TimeRangeEditor<O>,
    /// Events the editor refused, by position in the script.
    pub rejected: Vec<(usize, SliderError)>,
}

/// Replays `script` event by event. Refused events leave the editor as it was
/// and are collected rather than stopping the replay.
pub fn replay<O: SliderObserver>(
    script: &SessionScript,
    geometry: ContainerGeometry,
    observer: O,
) -> Result<Replay<O>, SliderError> {
    let mut editor = TimeRangeEditor::new(&script.times, observer)?;
    let mut rejected = Vec::new();

    for (position, event) in script.events.iter().enumerate() {
        trace!("Replaying event #{}: {:?}", position, event);
        if let Err(e) = apply(&mut editor, &geometry, event) {
            warn!("Event #{} rejected: {}", position, e);
            rejected.push((position, e));
        }
    }

    Ok(Replay { editor, rejected })
}

fn apply<O: SliderObserver>(
    editor: &mut TimeRangeEditor<O>,
    geometry: &ContainerGeometry,
    event: &Event,
) -> Result<(), SliderError> {
    match *event {
        Event::Press {
            index,
            handle,
            on_handle,
        } => {
            editor.press(index, handle, on_handle);
        }
        Event::Move { x, left, width } => {
            let geometry = ContainerGeometry::new(
                left.unwrap_or(geometry.left),
                width.unwrap_or(geometry.width),
            );
            editor.pointer_move(x, &geometry)?;
        }
        Event::Release => {
            editor.release()?;
        }
        Event::Add {
            ref from,
            ref until,
        } => {
            editor.add(&ExternalInterval::new(from.as_str(), until.as_str()))?;
        }
        Event::Remove { index } => {
            editor.remove_at(index)?;
        }
        Event::Edit {
            index,
            ref from,
            ref until,
        } => {
            editor.edit(index, from, until)?;
        }
        Event::Save => {
            editor.save()?;
        }
    }

    Ok(())
}
