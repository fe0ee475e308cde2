//! Deferred outputs.
//!
//! An [`Output<T>`] is a single-assignment, asynchronously resolved slot
//! holding an [`OutputData<T>`]. The slot is bound to its producing
//! computation when the output is created and written exactly once; every
//! reader, however many there are, observes the same `Arc<OutputData<T>>`.
//!
//! # Combinators
//!
//! | Combinator | Known | Secret | Dependencies |
//! |------------|-------|--------|--------------|
//! | [`map`](Output::map) / [`try_map`](Output::try_map) | input | input | input |
//! | [`and_then`](Output::and_then) | outer AND inner | outer OR inner | union |
//! | [`apply`](crate::apply) over N | AND | OR | union |
//!
//! Transforms are never invoked on unknown inputs.
//!
//! # Example
//!
//! ```
//! use nimbus_output::{Output, Resource, DependencySet};
//!
//! # futures::executor::block_on(async {
//! let bucket = Resource::new("aws:s3/bucket:Bucket", "logs");
//! let name = Output::create("logs".to_string(), true, false, DependencySet::single(bucket.clone()));
//!
//! let arn = name.map(|name| format!("arn:aws:s3:::{name}"));
//!
//! let data = arn.resolve().await.unwrap();
//! assert_eq!(data.value().map(String::as_str), Some("arn:aws:s3:::logs"));
//! assert!(data.dependencies().contains(&bucket));
//! # });
//! ```

use core::convert::Infallible;
use core::fmt;
use core::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::data::{OutputData, merge_dependencies, merge_known, merge_secret};
use crate::dependencies::DependencySet;
use crate::error::{BoxError, OutputError};

/// Marker trait for types that can flow through an [`Output`].
///
/// Any type that is `Clone + Send + Sync + 'static` automatically implements
/// `OutputValue`.
pub trait OutputValue: Clone + Send + Sync + 'static {}

// Blanket implementation for all compatible types
impl<T: Clone + Send + Sync + 'static> OutputValue for T {}

/// The result every reader of an output observes.
pub type OutputResult<T> = Result<Arc<OutputData<T>>, OutputError>;

/// The shared future backing an output.
pub type OutputFuture<T> = Shared<BoxFuture<'static, OutputResult<T>>>;

/// A value that may not be known yet, along with its secrecy and provenance.
pub struct Output<T> {
    state: OutputFuture<T>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: OutputValue> Output<T> {
    /// Creates an output that is already resolved to `data`.
    #[must_use]
    pub fn new(data: OutputData<T>) -> Self {
        let output = Self::from_future(futures::future::ready(Ok(data)));
        // Drive the ready future so `peek` observes the state straight away.
        let _ = output.state.clone().now_or_never();
        output
    }

    /// Creates an already-resolved output from explicit parts.
    #[must_use]
    pub fn create(value: T, is_known: bool, is_secret: bool, dependencies: DependencySet) -> Self {
        Self::new(OutputData::create(value, is_known, is_secret, dependencies))
    }

    /// Creates a known, non-secret output with no dependencies.
    #[must_use]
    pub fn known(value: T) -> Self {
        Self::new(OutputData::known(value))
    }

    /// Creates a known, secret output with no dependencies.
    #[must_use]
    pub fn secret(value: T) -> Self {
        Self::new(OutputData::known(value).into_secret())
    }

    /// Creates an unknown, non-secret output with no dependencies.
    #[must_use]
    pub fn unknown() -> Self {
        Self::unknown_with(DependencySet::new(), false)
    }

    /// Creates an unknown output with the given provenance and secrecy.
    #[must_use]
    pub fn unknown_with(dependencies: DependencySet, is_secret: bool) -> Self {
        Self::new(OutputData::unknown(is_secret, dependencies))
    }

    /// Creates an output bound to a producing computation.
    ///
    /// The computation runs at most once, the first time any reader polls the
    /// output.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<OutputData<T>, OutputError>> + Send + 'static,
    {
        Self {
            state: future.map(|result| result.map(Arc::new)).boxed().shared(),
        }
    }

    /// Creates an unresolved output together with the only capability to
    /// resolve it.
    ///
    /// # Example
    ///
    /// ```
    /// use nimbus_output::{Output, OutputData};
    ///
    /// # futures::executor::block_on(async {
    /// let (output, resolver) = Output::<u16>::deferred();
    /// assert!(output.peek().is_none());
    ///
    /// resolver.resolve(OutputData::known(8080));
    /// let data = output.resolve().await.unwrap();
    /// assert_eq!(data.value(), Some(&8080));
    /// # });
    /// ```
    #[must_use]
    pub fn deferred() -> (Self, OutputResolver<T>) {
        let (sender, receiver) = oneshot::channel();
        let output = Self::from_future(async move {
            match receiver.await {
                Ok(result) => result,
                Err(oneshot::Canceled) => Err(OutputError::Abandoned),
            }
        });
        (output, OutputResolver { sender })
    }

    /// Waits for the output and returns its resolved state.
    ///
    /// Every call returns the same `Arc`; the producing computation is not
    /// re-run.
    pub fn resolve(&self) -> impl Future<Output = OutputResult<T>> + Send + 'static {
        self.state.clone()
    }

    /// Returns the resolved state if it is already available.
    #[must_use]
    pub fn peek(&self) -> Option<OutputResult<T>> {
        self.state.peek().cloned()
    }

    /// Waits for the output and reports whether its value is known.
    ///
    /// # Errors
    ///
    /// Returns the [`OutputError`] the output resolved to.
    pub async fn is_known(&self) -> Result<bool, OutputError> {
        Ok(self.resolve().await?.is_known())
    }

    /// Waits for the output and reports whether it is secret.
    ///
    /// # Errors
    ///
    /// Returns the [`OutputError`] the output resolved to.
    pub async fn is_secret(&self) -> Result<bool, OutputError> {
        Ok(self.resolve().await?.is_secret())
    }

    /// Waits for the output and returns the resources it depends on.
    ///
    /// # Errors
    ///
    /// Returns the [`OutputError`] the output resolved to.
    pub async fn dependencies(&self) -> Result<DependencySet, OutputError> {
        Ok(self.resolve().await?.dependencies().clone())
    }

    /// Transforms the value once it is known.
    ///
    /// If the input is unknown, `f` is not invoked and the result is unknown
    /// with the input's secrecy and dependencies.
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: OutputValue,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.try_map(move |value| Ok::<_, Infallible>(f(value)))
    }

    /// Transforms the value with a fallible function.
    ///
    /// An `Err` from `f` resolves the result to
    /// [`OutputError::TransformFailure`], which propagates to every output
    /// derived from it.
    pub fn try_map<U, E, F>(&self, f: F) -> Output<U>
    where
        U: OutputValue,
        E: Into<BoxError>,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        let source = self.clone();
        Output::from_future(async move {
            let data = source.resolve().await?;
            let Some(value) = data.value() else {
                tracing::trace!("skipping transform of unknown output");
                return Ok(data.to_unknown());
            };

            match f(value.clone()) {
                Ok(mapped) => Ok(data.with_value(mapped)),
                Err(err) => {
                    let err = OutputError::transform(err);
                    tracing::debug!(error = %err, "output transform failed");
                    Err(err)
                }
            }
        })
    }

    /// Transforms the value into another output and flattens the result.
    ///
    /// The result is known only if both the outer and the inner output are
    /// known; it is secret if either is secret, and depends on both.
    pub fn and_then<U, F>(&self, f: F) -> Output<U>
    where
        U: OutputValue,
        F: FnOnce(T) -> Output<U> + Send + 'static,
    {
        let source = self.clone();
        Output::from_future(async move {
            let outer = source.resolve().await?;
            let Some(value) = outer.value() else {
                tracing::trace!("skipping transform of unknown output");
                return Ok(outer.to_unknown());
            };

            let inner = f(value.clone()).resolve().await?;
            Ok(OutputData::from_parts(
                inner.value().cloned(),
                merge_secret([outer.is_secret(), inner.is_secret()]),
                merge_dependencies([outer.dependencies(), inner.dependencies()]),
            ))
        })
    }

    /// Adds resources to the provenance of this output.
    #[must_use]
    pub fn with_dependencies(&self, dependencies: DependencySet) -> Self {
        self.map_data(move |data| data.with_dependencies(&dependencies))
    }

    /// Returns this output marked as secret.
    #[must_use]
    pub fn as_secret(&self) -> Self {
        self.map_data(OutputData::into_secret)
    }

    /// Returns this output with the secret flag removed.
    ///
    /// This is the only operation that lowers secrecy; use it only for values
    /// that are known to be safe to display.
    #[must_use]
    pub fn unsecret(&self) -> Self {
        self.map_data(|data| {
            let dependencies = data.dependencies().clone();
            OutputData::from_parts(data.into_value(), false, dependencies)
        })
    }

    /// Combines a list of outputs into an output of a list.
    ///
    /// Inputs resolve concurrently. The result is known only if every input
    /// is known, secret if any input is secret, and depends on every input.
    pub fn all_vec(outputs: impl IntoIterator<Item = Output<T>>) -> Output<Vec<T>> {
        let outputs: Vec<_> = outputs.into_iter().collect();
        Output::from_future(async move {
            let resolved =
                futures::future::try_join_all(outputs.iter().map(Output::resolve)).await?;

            let is_known = merge_known(resolved.iter().map(|data| data.is_known()));
            let value = is_known.then(|| {
                resolved
                    .iter()
                    .filter_map(|data| data.value().cloned())
                    .collect()
            });

            Ok(OutputData::from_parts(
                value,
                merge_secret(resolved.iter().map(|data| data.is_secret())),
                merge_dependencies(resolved.iter().map(|data| data.dependencies())),
            ))
        })
    }

    fn map_data<F>(&self, f: F) -> Self
    where
        F: FnOnce(OutputData<T>) -> OutputData<T> + Send + 'static,
    {
        let source = self.clone();
        Self::from_future(async move {
            let data = source.resolve().await?;
            Ok(f((*data).clone()))
        })
    }
}

impl<T: OutputValue> From<T> for Output<T> {
    fn from(value: T) -> Self {
        Self::known(value)
    }
}

impl From<&str> for Output<String> {
    fn from(value: &str) -> Self {
        Self::known(value.to_owned())
    }
}

impl<T> IntoFuture for Output<T> {
    type Output = OutputResult<T>;
    type IntoFuture = OutputFuture<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.state
    }
}

impl<T: fmt::Debug> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.peek() {
            Some(Ok(data)) => f.debug_tuple("Output").field(data).finish(),
            Some(Err(err)) => f.debug_tuple("Output").field(err).finish(),
            None => f.write_str("Output(<pending>)"),
        }
    }
}

/// The single capability to resolve a [deferred](Output::deferred) output.
///
/// Resolving consumes the resolver, so the output's slot is written at most
/// once. Dropping the resolver without resolving makes the output fail with
/// [`OutputError::Abandoned`].
pub struct OutputResolver<T> {
    sender: oneshot::Sender<Result<OutputData<T>, OutputError>>,
}

impl<T> OutputResolver<T> {
    /// Resolves the output to `data`.
    pub fn resolve(self, data: OutputData<T>) {
        self.complete(Ok(data));
    }

    /// Resolves the output to a transform failure.
    pub fn reject(self, err: impl Into<BoxError>) {
        self.complete(Err(OutputError::transform(err)));
    }

    fn complete(self, result: Result<OutputData<T>, OutputError>) {
        if self.sender.send(result).is_err() {
            tracing::trace!("deferred output dropped before it was resolved");
        }
    }
}

impl<T> fmt::Debug for OutputResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputResolver")
            .field("canceled", &self.sender.is_canceled())
            .finish()
    }
}
