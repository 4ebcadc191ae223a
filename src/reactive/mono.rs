//! Single-value async container.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture, FutureExt, Shared};

use super::error::{ReactiveError, ReactiveResult};
use super::subscription::{deliver_error, DisposeFlag, Subscription, Termination};
use super::{block_on, Element};

type Outcome<T> = ReactiveResult<Option<T>>;

/// A lazily evaluated computation producing at most one value.
///
/// The terminal event is one of:
/// - `Ok(Some(value))`: present
/// - `Ok(None)`: empty, which is absence and never an error
/// - `Err(error)`: failed
///
/// Clones share a single evaluation, so every observer sees the same
/// terminal event and side effects registered with `do_on_*` run once.
pub struct Mono<T> {
    source: Shared<BoxFuture<'static, Outcome<T>>>,
}

impl<T> Clone for Mono<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for Mono<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source.peek() {
            Some(outcome) => f.debug_struct("Mono").field("outcome", outcome).finish(),
            None => f.debug_struct("Mono").field("outcome", &"<pending>").finish(),
        }
    }
}

impl<T: Element> Mono<T> {
    /// Build a container from any future yielding the terminal event.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = ReactiveResult<Option<T>>> + Send + 'static,
    {
        Self {
            source: future.boxed().shared(),
        }
    }

    pub fn just(value: T) -> Self {
        Self::from_future(future::ready(Ok(Some(value))))
    }

    pub fn empty() -> Self {
        Self::from_future(future::ready(Ok(None)))
    }

    pub fn error(err: ReactiveError) -> Self {
        Self::from_future(future::ready(Err(err)))
    }

    pub fn just_or_empty(value: Option<T>) -> Self {
        Self::from_future(future::ready(Ok(value)))
    }

    /// Normalize a lookup that may yield no container at all into one that
    /// signals absence with the empty state.
    pub fn or_empty(container: Option<Self>) -> Self {
        container.unwrap_or_else(Self::empty)
    }

    pub fn map<U, F>(self, f: F) -> Mono<U>
    where
        U: Element,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Mono::from_future(self.source.map(move |outcome| outcome.map(|value| value.map(f))))
    }

    /// Like [`map`](Self::map), but an `Err` from `f` becomes
    /// [`ReactiveError::TransformFailure`].
    pub fn try_map<U, E, F>(self, f: F) -> Mono<U>
    where
        U: Element,
        E: fmt::Display,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        Mono::from_future(self.source.map(move |outcome| match outcome {
            Ok(Some(value)) => f(value).map(Some).map_err(ReactiveError::transform),
            Ok(None) => Ok(None),
            Err(err) => Err(err),
        }))
    }

    pub fn flat_map<U, F>(self, f: F) -> Mono<U>
    where
        U: Element,
        F: FnOnce(T) -> Mono<U> + Send + 'static,
    {
        let source = self.source;
        Mono::from_future(async move {
            match source.await? {
                Some(value) => f(value).source.await,
                None => Ok(None),
            }
        })
    }

    /// Turn a present value that fails `predicate` into empty.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool + Send + 'static,
    {
        Self::from_future(self.source.map(move |outcome| outcome.map(|value| value.filter(predicate))))
    }

    pub fn do_on_next<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        Self::from_future(self.source.map(move |outcome| {
            if let Ok(Some(value)) = &outcome {
                f(value);
            }
            outcome
        }))
    }

    /// Observe the error state without changing it.
    pub fn do_on_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&ReactiveError) + Send + 'static,
    {
        Self::from_future(self.source.map(move |outcome| {
            if let Err(err) = &outcome {
                f(err);
            }
            outcome
        }))
    }

    pub fn on_error_return(self, fallback: T) -> Self {
        Self::from_future(self.source.map(move |outcome| match outcome {
            Err(_) => Ok(Some(fallback)),
            other => other,
        }))
    }

    pub fn on_error_resume<F>(self, f: F) -> Self
    where
        F: FnOnce(ReactiveError) -> Self + Send + 'static,
    {
        let source = self.source;
        Self::from_future(async move {
            match source.await {
                Err(err) => f(err).source.await,
                other => other,
            }
        })
    }

    pub fn default_if_empty(self, fallback: T) -> Self {
        Self::from_future(self.source.map(move |outcome| match outcome {
            Ok(None) => Ok(Some(fallback)),
            other => other,
        }))
    }

    /// Continue with `alternative` when this container completes empty.
    ///
    /// `switch_if_empty(Mono::error(ReactiveError::NotFound(..)))` turns
    /// absence into an explicit error for callers that need one.
    pub fn switch_if_empty(self, alternative: Self) -> Self {
        let source = self.source;
        Self::from_future(async move {
            match source.await {
                Ok(None) => alternative.source.await,
                other => other,
            }
        })
    }

    /// Present `true` when a value exists, present `false` when empty.
    pub fn has_element(self) -> Mono<bool> {
        Mono::from_future(self.source.map(|outcome| outcome.map(|value| Some(value.is_some()))))
    }

    /// Deliver a present value to `on_value` on a spawned task.
    ///
    /// Without a Tokio runtime the delivery runs on a dedicated thread, so
    /// this never requires one. Empty completes silently. An error with no handler is logged and
    /// returned from [`Subscription::done`].
    pub fn subscribe<V>(self, on_value: V) -> Subscription
    where
        V: FnOnce(T) + Send + 'static,
    {
        self.spawn_delivery(on_value, None::<fn(ReactiveError)>)
    }

    pub fn subscribe_with<V, E>(self, on_value: V, on_error: E) -> Subscription
    where
        V: FnOnce(T) + Send + 'static,
        E: FnOnce(ReactiveError) + Send + 'static,
    {
        self.spawn_delivery(on_value, Some(on_error))
    }

    fn spawn_delivery<V, E>(self, on_value: V, on_error: Option<E>) -> Subscription
    where
        V: FnOnce(T) + Send + 'static,
        E: FnOnce(ReactiveError) + Send + 'static,
    {
        let flag = DisposeFlag::default();
        let task_flag = flag.clone();
        let source = self.source;

        Subscription::spawn(flag, async move {
            let outcome = source.await;
            if task_flag.is_disposed() {
                return Ok(Termination::Cancelled);
            }
            match outcome {
                Ok(Some(value)) => {
                    on_value(value);
                    Ok(Termination::Completed)
                }
                Ok(None) => Ok(Termination::Completed),
                Err(err) => deliver_error(err, on_error),
            }
        })
    }

    /// Block the calling thread until the terminal event.
    ///
    /// Empty yields `Ok(None)`. Works outside any runtime and on multi-thread
    /// runtime threads, `spawn_blocking` included. On a current-thread runtime
    /// this returns [`ReactiveError::BlockingInAsyncContext`]; await the
    /// container there.
    pub fn block(self) -> ReactiveResult<Option<T>> {
        block_on(self.source)
    }
}

impl<T: Element> IntoFuture for Mono<T> {
    type Output = ReactiveResult<Option<T>>;
    type IntoFuture = Shared<BoxFuture<'static, ReactiveResult<Option<T>>>>;

    fn into_future(self) -> Self::IntoFuture {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_block_states() {
        assert_eq!(Mono::just(7).block(), Ok(Some(7)));
        assert_eq!(Mono::<i32>::empty().block(), Ok(None));
        assert_eq!(
            Mono::<i32>::error(ReactiveError::upstream("boom")).block(),
            Err(ReactiveError::Upstream("boom".to_string()))
        );
    }

    #[test]
    fn test_map_skips_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mapped = Mono::<i32>::empty().map(move |v| {
            counter.fetch_add(1, Ordering::SeqCst);
            v * 2
        });

        assert_eq!(mapped.block(), Ok(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_map_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mapped = Mono::just(2).map(move |v| {
            counter.fetch_add(1, Ordering::SeqCst);
            v + 1
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(mapped.block(), Ok(Some(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_one_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mono = Mono::just("x").do_on_next(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let other = mono.clone();
        assert_eq!(mono.block(), Ok(Some("x")));
        assert_eq!(other.block(), Ok(Some("x")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_map_failure_becomes_error_state() {
        let parsed = Mono::just("12a".to_string()).try_map(|s| s.parse::<i32>());
        assert!(matches!(parsed.block(), Err(ReactiveError::TransformFailure(_))));
    }

    #[test]
    fn test_filter_turns_mismatch_into_empty() {
        assert_eq!(Mono::just(4).filter(|v| v % 2 == 0).block(), Ok(Some(4)));
        assert_eq!(Mono::just(3).filter(|v| v % 2 == 0).block(), Ok(None));
    }

    #[test]
    fn test_do_on_error_keeps_state() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let mono = Mono::<i32>::error(ReactiveError::upstream("boom")).do_on_error(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(mono.block().is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_on_error_return_recovers() {
        let mono = Mono::error(ReactiveError::upstream("boom")).on_error_return(5);
        assert_eq!(mono.block(), Ok(Some(5)));
    }

    #[test]
    fn test_on_error_return_leaves_empty_alone() {
        assert_eq!(Mono::<i32>::empty().on_error_return(5).block(), Ok(None));
    }

    #[test]
    fn test_on_error_resume_switches_source() {
        let mono = Mono::error(ReactiveError::upstream("boom")).on_error_resume(|_| Mono::empty());
        assert_eq!(mono.block(), Ok(None::<i32>));
    }

    #[test]
    fn test_empty_fallbacks() {
        assert_eq!(Mono::empty().default_if_empty(1).block(), Ok(Some(1)));
        assert_eq!(Mono::just(2).default_if_empty(1).block(), Ok(Some(2)));

        let missing = Mono::<i32>::empty()
            .switch_if_empty(Mono::error(ReactiveError::NotFound("id 9".to_string())));
        assert_eq!(missing.block(), Err(ReactiveError::NotFound("id 9".to_string())));
    }

    #[test]
    fn test_flat_map_and_has_element() {
        let chained = Mono::just(2).flat_map(|v| Mono::just(v * 10));
        assert_eq!(chained.block(), Ok(Some(20)));
        assert_eq!(Mono::just(1).has_element().block(), Ok(Some(true)));
        assert_eq!(Mono::<i32>::empty().has_element().block(), Ok(Some(false)));
    }

    #[test]
    fn test_or_empty_normalizes_missing_container() {
        assert_eq!(Mono::<i32>::or_empty(None).block(), Ok(None));
        assert_eq!(Mono::or_empty(Some(Mono::just(1))).block(), Ok(Some(1)));
    }

    #[tokio::test]
    async fn test_block_on_current_thread_runtime_is_refused() {
        assert_eq!(
            Mono::just(1).block(),
            Err(ReactiveError::BlockingInAsyncContext)
        );
    }

    #[tokio::test]
    async fn test_await_yields_terminal_event() {
        assert_eq!(Mono::just(1).await, Ok(Some(1)));
        assert_eq!(Mono::<i32>::empty().await, Ok(None));
    }

    #[tokio::test]
    async fn test_subscribe_delivers_after_return() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let subscription = Mono::just(42).subscribe(move |v| {
            let _ = tx.send(v);
        });

        assert_eq!(subscription.done().await, Ok(Termination::Completed));
        assert_eq!(rx.await.ok(), Some(42));
    }

    #[tokio::test]
    async fn test_subscribe_without_error_handler_surfaces_error() {
        let subscription = Mono::<i32>::error(ReactiveError::upstream("boom")).subscribe(|_| {
            panic!("value handler must not run");
        });
        assert_eq!(
            subscription.done().await,
            Err(ReactiveError::Upstream("boom".to_string()))
        );
    }

    #[tokio::test]
    async fn test_subscribe_with_routes_error() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let subscription = Mono::<i32>::error(ReactiveError::upstream("boom")).subscribe_with(
            |_| panic!("value handler must not run"),
            move |err| {
                let _ = tx.send(err);
            },
        );

        assert_eq!(subscription.done().await, Ok(Termination::ErrorHandled));
        assert_eq!(rx.await.ok(), Some(ReactiveError::Upstream("boom".to_string())));
    }
}
