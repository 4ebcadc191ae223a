//! Delivery of container events on a Tokio task or a dedicated thread.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::block_on;
use super::error::{ReactiveError, ReactiveResult};

/// One event delivered through [`Flux::to_channel`](super::Flux::to_channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T> {
    /// Next element in source order.
    Next(T),
    /// Terminal error; nothing follows it.
    Error(ReactiveError),
    /// Terminal completion; nothing follows it.
    Complete,
}

impl<T> Signal<T> {
    /// Whether no further signal follows this one.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Complete)
    }
}

/// How a subscription ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every value was delivered and the source completed.
    Completed,
    /// The source failed and the registered error handler received it.
    ErrorHandled,
    /// The subscription was disposed before the terminal event.
    Cancelled,
}

/// Shared flag checked by the delivery task before every callback.
#[derive(Debug, Clone, Default)]
pub(crate) struct DisposeFlag(Arc<AtomicBool>);

impl DisposeFlag {
    pub(crate) fn dispose(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type PanicPayload = Box<dyn Any + Send + 'static>;

/// Where the delivery of one subscription runs.
#[derive(Debug)]
enum Delivery {
    /// A task on the ambient Tokio runtime.
    Task(JoinHandle<ReactiveResult<Termination>>),
    /// A dedicated thread, used when no runtime is available.
    Thread(oneshot::Receiver<Result<ReactiveResult<Termination>, PanicPayload>>),
}

/// Handle to a running delivery.
///
/// Dropping the handle does not cancel delivery; call [`dispose`](Self::dispose).
#[derive(Debug)]
pub struct Subscription {
    delivery: Delivery,
    flag: DisposeFlag,
}

impl Subscription {
    /// Start `delivery` on the current Tokio runtime, or on a dedicated
    /// thread driven by a local executor when there is none.
    pub(crate) fn spawn<F>(flag: DisposeFlag, delivery: F) -> Self
    where
        F: Future<Output = ReactiveResult<Termination>> + Send + 'static,
    {
        let delivery = match Handle::try_current() {
            Ok(handle) => Delivery::Task(handle.spawn(delivery)),
            Err(_) => Delivery::Thread(spawn_thread(delivery)),
        };
        Self { delivery, flag }
    }

    /// Stop further delivery. Handlers not yet invoked are never invoked.
    pub fn dispose(&self) {
        self.flag.dispose();
        if let Delivery::Task(handle) = &self.delivery {
            handle.abort();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.flag.is_disposed()
    }

    /// Wait for the delivery to finish.
    ///
    /// Returns `Err` only when the source failed and no error handler was
    /// registered; surfacing that error is left to the caller. A panic raised
    /// by a handler is resumed here.
    pub async fn done(self) -> ReactiveResult<Termination> {
        match self.delivery {
            Delivery::Task(handle) => match handle.await {
                Ok(result) => result,
                Err(join_err) if join_err.is_cancelled() => Ok(Termination::Cancelled),
                Err(join_err) => panic::resume_unwind(join_err.into_panic()),
            },
            Delivery::Thread(rx) => match rx.await {
                Ok(Ok(result)) => result,
                Ok(Err(payload)) => panic::resume_unwind(payload),
                Err(oneshot::Canceled) => Err(ReactiveError::upstream(
                    "subscription delivery thread did not start",
                )),
            },
        }
    }

    /// Block the calling thread until the delivery finishes.
    ///
    /// Follows the same runtime rules as [`Mono::block`](super::Mono::block).
    pub fn wait(self) -> ReactiveResult<Termination> {
        block_on(self.done())
    }
}

fn spawn_thread<F>(delivery: F) -> oneshot::Receiver<Result<ReactiveResult<Termination>, PanicPayload>>
where
    F: Future<Output = ReactiveResult<Termination>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let spawned = thread::Builder::new()
        .name("reactive-delivery".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| futures::executor::block_on(delivery)));
            if tx.send(outcome).is_err() {
                debug!("subscription handle dropped before delivery finished");
            }
        });
    if let Err(err) = spawned {
        error!(error = %err, "failed to start subscription delivery thread");
    }
    rx
}

/// Route a terminal error to `on_error`, or report it as unhandled.
pub(crate) fn deliver_error<E>(err: ReactiveError, on_error: Option<E>) -> ReactiveResult<Termination>
where
    E: FnOnce(ReactiveError),
{
    match on_error {
        Some(handler) => {
            handler(err);
            Ok(Termination::ErrorHandled)
        }
        None => {
            error!(error = %err, "subscription terminated with an unhandled error");
            Err(err)
        }
    }
}
