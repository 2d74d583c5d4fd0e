//! The command surface a shell drives.
//!
//! A [`Session`] owns the [`Registry`] for one interactive run. Every
//! command either succeeds or returns one [`TimeSyncError`] without having
//! touched the registry. Commands that read (`find_common_window`,
//! `render`) borrow the registry immutably for their whole run, so a
//! mutation can never interleave with them.

use chrono::NaiveDateTime;
use tracing::instrument;

use crate::error::{Result, TimeSyncError};
use crate::intersection::{self, CommonWindow, LocalizedWindow};
use crate::offset::UtcOffset;
use crate::registry::{AddOutcome, Registry};
use crate::timeframe::TimeFrame;
use crate::visualize::{self, Visualization};

/// Frames needed before intersection or visualization is meaningful.
pub const MIN_FRAMES: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct Session {
    registry: Registry,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add a frame under a new id.
    ///
    /// # Errors
    ///
    /// [`TimeSyncError::InvalidInterval`] if `end < start`, and
    /// [`TimeSyncError::DuplicateId`] if `id` is taken. In the latter case
    /// the caller may confirm with the user and then call
    /// [`Session::replace`].
    #[instrument(level = "debug", skip(self))]
    pub fn add(
        &mut self,
        id: &str,
        offset: UtcOffset,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<()> {
        let frame = TimeFrame::new(offset, start, end)?;
        match self.registry.add(id, frame) {
            AddOutcome::Added => Ok(()),
            AddOutcome::Conflict(_) => Err(TimeSyncError::DuplicateId(id.to_string())),
        }
    }

    /// Overwrite the frame stored under an existing id.
    #[instrument(level = "debug", skip(self))]
    pub fn replace(
        &mut self,
        id: &str,
        offset: UtcOffset,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<TimeFrame> {
        let frame = TimeFrame::new(offset, start, end)?;
        self.registry.replace(id, frame)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &str) -> Result<TimeFrame> {
        self.registry.remove(id)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) -> usize {
        self.registry.clear()
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &TimeFrame)> {
        self.registry.list()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// The window shared by every stored frame, or `None` if they do not
    /// all overlap for a positive duration.
    #[instrument(level = "debug", skip(self), fields(frames = self.registry.len()))]
    pub fn find_common_window(&self) -> Result<Option<CommonWindow>> {
        self.ensure_enough_frames()?;
        Ok(intersection::find_common_window(self.registry.frames()))
    }

    /// `window` in each stored frame's local time, in insertion order.
    pub fn localize(&self, window: &CommonWindow) -> Result<Vec<LocalizedWindow>> {
        intersection::localize(window, self.registry.list())
    }

    #[instrument(level = "debug", skip(self), fields(frames = self.registry.len()))]
    pub fn render(&self, max_columns: usize) -> Result<Visualization> {
        self.ensure_enough_frames()?;
        visualize::render(self.registry.list(), max_columns)
    }

    fn ensure_enough_frames(&self) -> Result<()> {
        let found = self.registry.len();
        if found < MIN_FRAMES {
            return Err(TimeSyncError::InsufficientFrames {
                found,
                required: MIN_FRAMES,
            });
        }
        Ok(())
    }
}
