//! The update loop: rewrites `progress` and streams the full record to the
//! consumer as back-to-back JSON documents.

use std::{io::Write, thread::sleep, time::Duration};

use eyre::Result;

use crate::types::ProgressRecord;

/// Updates emitted over the lifetime of a run, 10% apiece.
pub(crate) const TOTAL_UPDATES: u64 = 10;

/// Pause after every write, including the last one, so a polling consumer
/// sees the final document before the process goes away.
pub(crate) const UPDATE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub(crate) struct ProgressEmitter {
    interval: Duration,
}

impl Default for ProgressEmitter {
    fn default() -> Self {
        Self {
            interval: UPDATE_INTERVAL,
        }
    }
}

impl ProgressEmitter {
    #[cfg(test)]
    pub(crate) fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }

    /// Walks `progress` from 10 to 100 in steps of 10, writing the whole
    /// record after each step. Every write is flushed immediately so the
    /// consumer observes updates as they happen rather than on process
    /// exit. Writes carry no separator; framing is the consumer's problem.
    ///
    /// Any write or flush failure (e.g. the consumer closed the pipe) is
    /// propagated and fatal.
    pub(crate) fn run(&self, record: &mut ProgressRecord, out: &mut impl Write) -> Result<()> {
        for i in 1..=TOTAL_UPDATES {
            let percent = i * 10;
            record.set_progress(percent);

            let document = record.to_json_string()?;
            out.write_all(document.as_bytes())?;
            out.flush()?;

            tracing::debug!("Emitted update {}/{}: progress={}", i, TOTAL_UPDATES, percent);

            sleep(self.interval);
        }

        Ok(())
    }
}
