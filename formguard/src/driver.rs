//! Runs an engine on its own tokio task.
//!
//! The engine is not thread-safe. Multi-threaded hosts hand it to [`spawn`],
//! which owns it on a single task, serializes every call through a channel,
//! sleeps until the next deadline, and publishes repaint passes.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::aggregator::RepaintPass;
use crate::clock::Clock;
use crate::engine::Engine;
use crate::error::DriverError;
use crate::events::{EventResult, FieldEvent};
use crate::field::FieldHandle;
use crate::registry::{FieldId, FormId};
use crate::validation::ValidationResult;

type Command<F> = Box<dyn FnOnce(&mut Engine<F>) + Send>;

/// Clock following tokio's time, including paused test time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Cloneable handle to an engine running on its own task.
#[derive(Debug)]
pub struct EngineHandle<F> {
    tx: mpsc::UnboundedSender<Command<F>>,
}

impl<F> Clone for EngineHandle<F> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<F: FieldHandle + Send + 'static> EngineHandle<F> {
    /// Run `f` on the engine task and return its result.
    pub async fn call<R, C>(&self, f: C) -> Result<R, DriverError>
    where
        C: FnOnce(&mut Engine<F>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let command: Command<F> = Box::new(move |engine| {
            // Caller may have stopped waiting
            let _ = reply_tx.send(f(engine));
        });
        self.tx.send(command).map_err(|_| DriverError::Closed)?;
        reply_rx.await.map_err(|_| DriverError::Closed)
    }

    pub async fn handle_event(&self, id: FieldId, event: FieldEvent) -> Result<EventResult, DriverError> {
        Ok(self.call(move |engine| engine.handle(id, event)).await??)
    }

    pub async fn set_value(&self, id: FieldId, value: impl Into<String>) -> Result<(), DriverError> {
        let value = value.into();
        Ok(self.call(move |engine| engine.set_value(id, &value)).await??)
    }

    pub async fn submit(&self, form: FormId) -> Result<ValidationResult, DriverError> {
        Ok(self.call(move |engine| engine.submit(form)).await??)
    }

    pub async fn reset(&self, form: FormId) -> Result<(), DriverError> {
        Ok(self.call(move |engine| engine.reset(form)).await??)
    }

    pub async fn value(&self, id: FieldId) -> Result<String, DriverError> {
        Ok(self.call(move |engine| engine.value(id)).await??)
    }
}

/// Move `engine` onto a new task.
///
/// Returns the handle, a receiver of repaint passes, and the task, which
/// yields the engine back once every handle is dropped. The engine should
/// use [`TokioClock`] so deadlines follow the runtime's time.
pub fn spawn<F>(
    engine: Engine<F>,
) -> (
    EngineHandle<F>,
    mpsc::UnboundedReceiver<RepaintPass>,
    JoinHandle<Engine<F>>,
)
where
    F: FieldHandle + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (repaint_tx, repaint_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(engine, rx, repaint_tx));
    (EngineHandle { tx }, repaint_rx, task)
}

async fn run<F: FieldHandle>(
    mut engine: Engine<F>,
    mut commands: mpsc::UnboundedReceiver<Command<F>>,
    repaints: mpsc::UnboundedSender<RepaintPass>,
) -> Engine<F> {
    loop {
        let deadline = engine.next_deadline();
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => command(&mut engine),
                None => break,
            },
            _ = sleep_until(deadline) => {}
        }

        if let Some(pass) = engine.tick().repaint {
            if repaints.send(pass).is_err() {
                log::trace!("[driver] repaint receiver dropped");
            }
        }
    }

    log::debug!("[driver] all handles dropped, stopping");
    engine
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
