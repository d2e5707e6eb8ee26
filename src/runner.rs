//! Background execution of a pipeline run
//!
//! The pipeline itself is synchronous; this module moves one run onto a
//! worker thread and streams its progress back over a channel, so a
//! foreground loop (CLI or otherwise) stays responsive and owns all
//! presentation. One run per spawn; there is no queue and no cancellation.

use std::sync::mpsc;
use std::thread;

use crate::config::JobConfig;
use crate::error::PipelineResult;
use crate::pipeline;

/// Events emitted by a background run, in order: zero or more `Log` lines,
/// then exactly one `Finished`.
#[derive(Debug)]
pub enum RunEvent {
    Log(String),
    Finished(PipelineResult<()>),
}

/// Run the job on a background thread.
///
/// The returned receiver yields the run's events; it disconnects once
/// `Finished` has been delivered and the worker exits.
pub fn spawn(job: JobConfig) -> mpsc::Receiver<RunEvent> {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let log_sender = sender.clone();
        let result = pipeline::run(&job, &mut |line| {
            // The foreground may have stopped listening; nothing useful
            // to do with the line in that case.
            let _ = log_sender.send(RunEvent::Log(line));
        });
        let _ = sender.send(RunEvent::Finished(result));
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn failed_run_ends_with_a_single_finished_event() {
        // Default job has no input path, so validation fails fast.
        let receiver = spawn(JobConfig::default());

        let mut finished = None;
        for event in receiver {
            match event {
                RunEvent::Log(_) => {}
                RunEvent::Finished(result) => {
                    assert!(finished.is_none(), "Finished delivered twice");
                    finished = Some(result);
                }
            }
        }

        match finished {
            Some(Err(PipelineError::Config(_))) => {}
            other => panic!("expected a config error, got {other:?}"),
        }
    }
}
