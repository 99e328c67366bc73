use chrono::{DateTime, Utc};
use tracing::info;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::index::{RebuildReport, ReindexSchedule, rebuild_index};

use super::{INDEX_UPDATED_NOTICE, NoteSearch};

impl<C: Corpus> NoteSearch<C> {
    /// Rebuilds the whole index and publishes it in one swap.
    pub fn rebuild_index(&mut self) -> Result<RebuildReport> {
        let excluded = self.settings.excluded_prefixes();
        let (index, report) = rebuild_index(&self.corpus, &excluded)?;
        self.index.publish(index);
        self.notifier.notify(INDEX_UPDATED_NOTICE);
        self.last_rebuild = Some(report.clone());
        Ok(report)
    }

    #[must_use]
    pub fn reindex_schedule(&self) -> ReindexSchedule {
        ReindexSchedule::new(
            self.settings.cache_update_interval,
            self.settings.auto_reindex,
        )
    }

    /// Runs a timer-driven rebuild when one is due at `now`.
    pub fn reindex_if_due(&mut self, now: DateTime<Utc>) -> Result<Option<RebuildReport>> {
        let last = self.index.snapshot().indexed_at();
        if !self.reindex_schedule().is_due(last, now) {
            return Ok(None);
        }
        info!(last = ?last, "scheduled reindex is due");
        self.rebuild_index().map(Some)
    }
}
