//! Multi-value lazy sequence container.

use std::fmt;
use std::sync::Arc;

use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::error::{Cardinality, ReactiveError, ReactiveResult};
use super::mono::Mono;
use super::subscription::{deliver_error, DisposeFlag, Signal, Subscription, Termination};
use super::{block_on, Element};

type Source<T> = Arc<dyn Fn() -> BoxStream<'static, ReactiveResult<T>> + Send + Sync>;

/// A cold sequence of zero or more values.
///
/// Every observer gets its own pass over the source, so independent
/// observers never affect each other and always see source order.
/// An error is terminal: nothing is emitted after it.
pub struct Flux<T> {
    source: Source<T>,
}

impl<T> Clone for Flux<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Flux<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flux").finish_non_exhaustive()
    }
}

/// Stop a stream right after its first error.
fn until_error<T: Send + 'static>(
    stream: BoxStream<'static, ReactiveResult<T>>,
) -> BoxStream<'static, ReactiveResult<T>> {
    stream
        .scan(false, |errored, item| {
            if *errored {
                return future::ready(None);
            }
            *errored = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}

impl<T: Element> Flux<T> {
    fn from_source<F>(factory: F) -> Self
    where
        F: Fn() -> BoxStream<'static, ReactiveResult<T>> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(move || until_error(factory())),
        }
    }

    /// Build a sequence whose stream is created anew for each observer.
    pub fn defer<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = ReactiveResult<T>> + Send + 'static,
    {
        Self::from_source(move || factory().boxed())
    }

    /// Emit `values` in order.
    pub fn just<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_shared(values.into_iter().collect())
    }

    /// Emit clones of `values` in order without copying the backing slice.
    pub fn from_shared(values: Arc<[T]>) -> Self {
        Self::from_source(move || {
            let values = Arc::clone(&values);
            let len = values.len();
            stream::iter((0..len).map(move |i| Ok(values[i].clone()))).boxed()
        })
    }

    pub fn empty() -> Self {
        Self::from_source(|| stream::empty().boxed())
    }

    pub fn error(err: ReactiveError) -> Self {
        Self::from_source(move || stream::once(future::ready(Err(err.clone()))).boxed())
    }

    /// Keep only elements matching `predicate`, preserving order.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let parent = self.source;
        let predicate = Arc::new(predicate);
        Self::from_source(move || {
            let predicate = Arc::clone(&predicate);
            parent()
                .filter(move |item| {
                    future::ready(match item {
                        Ok(value) => predicate(value),
                        Err(_) => true,
                    })
                })
                .boxed()
        })
    }

    /// Like [`filter`](Self::filter); an `Err` from `predicate` terminates the
    /// sequence with [`ReactiveError::TransformFailure`].
    pub fn try_filter<E, P>(self, predicate: P) -> Self
    where
        E: fmt::Display,
        P: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
    {
        let parent = self.source;
        let predicate = Arc::new(predicate);
        Self::from_source(move || {
            let predicate = Arc::clone(&predicate);
            parent()
                .filter_map(move |item| {
                    future::ready(match item {
                        Ok(value) => match predicate(&value) {
                            Ok(true) => Some(Ok(value)),
                            Ok(false) => None,
                            Err(err) => Some(Err(ReactiveError::transform(err))),
                        },
                        Err(err) => Some(Err(err)),
                    })
                })
                .boxed()
        })
    }

    pub fn map<U, F>(self, f: F) -> Flux<U>
    where
        U: Element,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let parent = self.source;
        let f = Arc::new(f);
        Flux::from_source(move || {
            let f = Arc::clone(&f);
            parent().map(move |item| item.map(|value| f(value))).boxed()
        })
    }

    pub fn try_map<U, E, F>(self, f: F) -> Flux<U>
    where
        U: Element,
        E: fmt::Display,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let parent = self.source;
        let f = Arc::new(f);
        Flux::from_source(move || {
            let f = Arc::clone(&f);
            parent()
                .map(move |item| item.and_then(|value| f(value).map_err(ReactiveError::transform)))
                .boxed()
        })
    }

    /// Emit at most the first `n` elements.
    pub fn take(self, n: usize) -> Self {
        let parent = self.source;
        Self::from_source(move || parent().take(n).boxed())
    }

    /// First element as a [`Mono`], or empty when there is none.
    ///
    /// Zero elements is not an error here; see [`single`](Self::single).
    pub fn next(self) -> Mono<T> {
        let source = self.source;
        Mono::from_future(async move { source().next().await.transpose() })
    }

    /// The only element as a [`Mono`].
    ///
    /// Fails with [`ReactiveError::AmbiguousOrEmpty`] when the sequence has
    /// no elements or more than one. Stops reading after the second element.
    pub fn single(self) -> Mono<T> {
        let source = self.source;
        Mono::from_future(async move {
            let mut stream = source();
            let first = match stream.next().await {
                Some(item) => item?,
                None => return Err(ReactiveError::AmbiguousOrEmpty(Cardinality::None)),
            };
            match stream.next().await {
                None => Ok(Some(first)),
                Some(Err(err)) => Err(err),
                Some(Ok(_)) => Err(ReactiveError::AmbiguousOrEmpty(Cardinality::Many)),
            }
        })
    }

    /// All elements in source order, emitted once the source completes.
    ///
    /// An empty source yields a present, empty `Vec`.
    pub fn collect_list(self) -> Mono<Vec<T>> {
        let source = self.source;
        Mono::from_future(async move { source().try_collect::<Vec<_>>().await.map(Some) })
    }

    pub fn count(self) -> Mono<usize> {
        let source = self.source;
        Mono::from_future(async move {
            source()
                .try_fold(0usize, |count, _| future::ready(Ok(count + 1)))
                .await
                .map(Some)
        })
    }

    /// Block until the first element, returning `None` for an empty source.
    pub fn block_first(self) -> ReactiveResult<Option<T>> {
        self.next().block()
    }

    /// Block until completion and return the last element.
    pub fn block_last(self) -> ReactiveResult<Option<T>> {
        let source = self.source;
        block_on(source().try_fold(None, |_, value| future::ready(Ok(Some(value)))))
    }

    /// A fresh stream over the source for direct async consumption.
    pub fn into_stream(self) -> BoxStream<'static, ReactiveResult<T>> {
        (self.source)()
    }

    /// Deliver every element to `on_each` in order on a spawned task.
    ///
    /// Without a Tokio runtime the delivery runs on a dedicated thread.
    ///
    /// An error with no handler is logged and returned from
    /// [`Subscription::done`].
    pub fn subscribe<N>(self, on_each: N) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
    {
        self.spawn_delivery(on_each, None::<fn(ReactiveError)>, None::<fn()>)
    }

    pub fn subscribe_with<N, E, C>(self, on_each: N, on_error: E, on_complete: C) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnOnce(ReactiveError) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.spawn_delivery(on_each, Some(on_error), Some(on_complete))
    }

    fn spawn_delivery<N, E, C>(self, mut on_each: N, on_error: Option<E>, on_complete: Option<C>) -> Subscription
    where
        N: FnMut(T) + Send + 'static,
        E: FnOnce(ReactiveError) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let flag = DisposeFlag::default();
        let task_flag = flag.clone();
        let source = self.source;

        Subscription::spawn(flag, async move {
            let mut stream = source();
            while let Some(item) = stream.next().await {
                if task_flag.is_disposed() {
                    return Ok(Termination::Cancelled);
                }
                match item {
                    Ok(value) => on_each(value),
                    Err(err) => return deliver_error(err, on_error),
                }
            }
            if task_flag.is_disposed() {
                return Ok(Termination::Cancelled);
            }
            if let Some(on_complete) = on_complete {
                on_complete();
            }
            Ok(Termination::Completed)
        })
    }

    /// Drain the sequence into a bounded channel from a spawned producer.
    ///
    /// The receiver sees every element as [`Signal::Next`] followed by exactly
    /// one terminal signal. Dropping the receiver stops the producer.
    /// A `capacity` of zero is treated as one.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn to_channel(self, capacity: usize) -> mpsc::Receiver<Signal<T>> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let source = self.source;

        tokio::spawn(async move {
            let mut stream = source();
            while let Some(item) = stream.next().await {
                let signal = match item {
                    Ok(value) => Signal::Next(value),
                    Err(err) => Signal::Error(err),
                };
                let terminal = signal.is_terminal();
                if tx.send(signal).await.is_err() {
                    debug!("channel receiver dropped, stopping delivery");
                    return;
                }
                if terminal {
                    return;
                }
            }
            if tx.send(Signal::Complete).await.is_err() {
                debug!("channel receiver dropped before completion");
            }
        });

        rx
    }
}

impl<T: Element> FromIterator<T> for Flux<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::just(iter)
    }
}
