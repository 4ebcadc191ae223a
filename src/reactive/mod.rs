//! Lazy async containers for lookup results.
//!
//! - [`Mono`]: at most one value, observed later (value, empty, or error)
//! - [`Flux`]: zero or more values produced lazily in source order
//!
//! Both containers are cold: nothing is evaluated until a caller blocks,
//! awaits, subscribes, or drains them through a channel.

pub mod error;
pub mod flux;
pub mod mono;
pub mod subscription;

pub use error::{Cardinality, ReactiveError, ReactiveResult};
pub use flux::Flux;
pub use mono::Mono;
pub use subscription::{Signal, Subscription, Termination};

use std::future::Future;

use tokio::runtime::{Handle, RuntimeFlavor};

/// Bound shared by every value carried through a container.
///
/// Observers share one evaluation, so values are cloned out to each of them
/// and must be safe to hand across Tokio worker threads.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// Drive `future` to completion on the calling thread.
///
/// Outside any runtime the future is polled by a local executor. On a
/// multi-thread runtime, including its `spawn_blocking` threads, the worker is
/// handed off with `block_in_place` first. A current-thread runtime has no
/// other worker to make progress while this thread is parked, so blocking
/// there is refused.
pub(crate) fn block_on<F, T>(future: F) -> ReactiveResult<T>
where
    F: Future<Output = ReactiveResult<T>>,
{
    let Ok(handle) = Handle::try_current() else {
        return futures::executor::block_on(future);
    };
    match handle.runtime_flavor() {
        RuntimeFlavor::MultiThread => tokio::task::block_in_place(|| handle.block_on(future)),
        _ => Err(ReactiveError::BlockingInAsyncContext),
    }
}
