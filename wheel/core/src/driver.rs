//! Wheel Driver
//!
//! Runs a [`Wheel`] on its own tokio task. The task is the only owner of
//! the session: surfaces talk to it through a [`WheelHandle`] and read
//! [`crate::WheelMessage`]s from the channel the wheel was built with.
//!
//! The task waits on whichever comes first, the next surface event or the
//! sequencer's next deadline, so timers never run while the wheel is idle.

use std::future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::events::WheelEvent;
use crate::wheel::Wheel;

/// Event channel capacity for a driven wheel
const EVENT_BUFFER: usize = 64;

/// Handle to a wheel running on its own task
#[derive(Debug)]
pub struct WheelHandle {
    events: mpsc::Sender<WheelEvent>,
    task: JoinHandle<()>,
}

impl WheelHandle {
    /// Send an event to the wheel
    ///
    /// # Errors
    ///
    /// Returns an error if the wheel task has stopped.
    pub async fn send(&self, event: WheelEvent) -> anyhow::Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| anyhow::anyhow!("wheel task has stopped"))
    }

    /// A sender that can be cloned into other tasks
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<WheelEvent> {
        self.events.clone()
    }

    /// Ask the wheel to quit and wait for its task to end
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        // A closed channel already means the task is on its way out
        let _ = self.events.send(WheelEvent::QuitRequested).await;
        drop(self.events);
        self.task.await?;
        Ok(())
    }
}

/// Move `wheel` onto a new task and return its handle
///
/// The task ends after a [`WheelEvent::QuitRequested`] or once every
/// event sender has been dropped.
pub fn spawn_wheel(wheel: Wheel) -> WheelHandle {
    let (events, rx) = mpsc::channel(EVENT_BUFFER);
    let task = tokio::spawn(run(wheel, rx));
    WheelHandle { events, task }
}

async fn run(mut wheel: Wheel, mut events: mpsc::Receiver<WheelEvent>) {
    tracing::debug!("Wheel driver started");

    loop {
        let deadline = wheel.next_deadline();
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                let quit = matches!(event, WheelEvent::QuitRequested);
                if let Err(e) = wheel.handle_event(event).await {
                    tracing::warn!(error = %e, "Wheel event failed");
                }
                if quit {
                    break;
                }
            }
            () = wait_for(deadline) => {
                wheel.poll(Instant::now()).await;
            }
        }
    }

    tracing::debug!("Wheel driver stopped");
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
