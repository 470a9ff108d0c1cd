use drag::{ContainerGeometry, DragController, MoveOutcome};
use error::SliderError;
use interval::{ExternalInterval, Handle, TimeInterval};
use interval_set::IntervalSet;

/// Callbacks towards whoever embeds the editor. All of them default to doing
/// nothing.
pub trait SliderObserver {
    /// Live feedback while a handle is dragged or a time is typed in.
    fn on_draft_update(&mut self, _interval: &TimeInterval, _index: usize) {}

    /// The merged, sorted and disjoint list, once per drag end or save.
    fn on_session_saved(&mut self, _intervals: &[ExternalInterval]) {}

    fn on_change_flagged(&mut self, _changed: bool) {}
}

impl SliderObserver for () {}

/// One editing session: the working intervals, the drag in progress if any,
/// and whether there are edits that have not been saved yet.
pub struct TimeRangeEditor<O> {
    set: IntervalSet,
    drag: DragController,
    changed: bool,
    observer: O,
}

impl<O: SliderObserver> TimeRangeEditor<O> {
    pub fn new(initial: &[ExternalInterval], observer: O) -> Result<Self, SliderError> {
        Ok(TimeRangeEditor::with_set(
            IntervalSet::from_external(initial)?,
            observer,
        ))
    }

    pub fn with_set(set: IntervalSet, observer: O) -> Self {
        TimeRangeEditor {
            set,
            drag: DragController::new(),
            changed: false,
            observer,
        }
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        self.set.intervals()
    }

    pub fn interval_set(&self) -> &IntervalSet {
        &self.set
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.changed
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn press(&mut self, index: usize, handle: Handle, on_handle: bool) -> bool {
        self.drag.press(index, handle, on_handle)
    }

    /// Feeds one pointer move into the active drag. A move that would cross
    /// the other handle ends the drag and saves.
    pub fn pointer_move(
        &mut self,
        x: f64,
        geometry: &ContainerGeometry,
    ) -> Result<MoveOutcome, SliderError> {
        let outcome = self.drag.pointer_move(&mut self.set, geometry, x);

        match outcome {
            MoveOutcome::Draft { index, ref interval } => {
                self.flag_change();
                self.observer.on_draft_update(interval, index);
            }
            MoveOutcome::Rejected(_) => {
                self.save()?;
            }
            MoveOutcome::Ignored => {}
        }

        Ok(outcome)
    }

    /// Pointer or touch released. Saves if a drag was in progress, otherwise
    /// does nothing and returns `None`.
    pub fn release(&mut self) -> Result<Option<Vec<ExternalInterval>>, SliderError> {
        match self.drag.release() {
            Some(_) => self.save().map(Some),
            None => Ok(None),
        }
    }

    pub fn add(&mut self, interval: &ExternalInterval) -> Result<TimeInterval, SliderError> {
        let interval = interval.to_interval()?;
        self.set.add(interval);
        self.flag_change();
        Ok(interval)
    }

    /// Removes the interval at `index`. A drag in progress ends without
    /// saving, since the indices it points at shift.
    pub fn remove_at(&mut self, index: usize) -> Result<TimeInterval, SliderError> {
        if index >= self.set.len() {
            return Err(SliderError::IndexOutOfRange {
                index,
                len: self.set.len(),
            });
        }
        if self.drag.release().is_some() {
            debug!("Removing #{} ended the drag in progress", index);
        }

        let removed = self.set.remove_at(index)?;
        self.flag_change();
        Ok(removed)
    }

    /// Replaces the interval at `index` with typed-in times.
    pub fn edit(&mut self, index: usize, from: &str, until: &str) -> Result<TimeInterval, SliderError> {
        let interval = TimeInterval::parse(from, until)?;
        self.set.replace(index, interval)?;
        self.flag_change();
        self.observer.on_draft_update(&interval, index);
        Ok(interval)
    }

    /// Merges the working intervals and hands the result to the observer.
    /// Ends any drag in progress first.
    pub fn save(&mut self) -> Result<Vec<ExternalInterval>, SliderError> {
        self.drag.release();
        self.set.merge()?;
        let saved = self.set.to_external_list();
        info!("Saved {} interval(s)", saved.len());

        self.observer.on_session_saved(&saved);
        self.changed = false;
        self.observer.on_change_flagged(false);

        Ok(saved)
    }

    fn flag_change(&mut self) {
        if !self.changed {
            self.changed = true;
            self.observer.on_change_flagged(true);
        }
    }
}
