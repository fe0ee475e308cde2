//! Combining heterogeneous outputs.
//!
//! [`OutputTuple`] is implemented for tuples of 1 to 12 [`Output`]s. It is the
//! general form of [`Output::map`]: wait for every input concurrently, then
//! merge knowability (AND), secrecy (OR) and dependencies (union) and run the
//! transform only if every input is known.
//!
//! # Example
//!
//! ```
//! use nimbus_output::{Output, apply};
//!
//! # futures::executor::block_on(async {
//! let host = Output::known("db.internal".to_string());
//! let port = Output::secret(5432_u16);
//!
//! let url = apply((host, port), |(host, port)| format!("postgres://{host}:{port}"));
//!
//! let data = url.resolve().await.unwrap();
//! assert!(data.is_secret());
//! assert_eq!(data.value().map(String::as_str), Some("postgres://db.internal:5432"));
//! # });
//! ```

use variadics_please::all_tuples;

use crate::data::{OutputData, merge_dependencies, merge_secret};
use crate::error::BoxError;
use crate::output::{Output, OutputValue};

/// A tuple of outputs that can be combined into one output.
pub trait OutputTuple: Sized {
    /// The tuple of values produced once every input is known.
    type Item: OutputValue;

    /// Combines the inputs into an output of a tuple.
    fn all(self) -> Output<Self::Item>;

    /// Combines the inputs and transforms the tuple of values.
    ///
    /// `f` is invoked only if every input is known.
    fn apply<U, F>(self, f: F) -> Output<U>
    where
        U: OutputValue,
        F: FnOnce(Self::Item) -> U + Send + 'static,
    {
        self.all().map(f)
    }

    /// Combines the inputs and transforms the tuple of values with a fallible
    /// function.
    fn try_apply<U, E, F>(self, f: F) -> Output<U>
    where
        U: OutputValue,
        E: Into<BoxError>,
        F: FnOnce(Self::Item) -> Result<U, E> + Send + 'static,
    {
        self.all().try_map(f)
    }
}

/// Combines a tuple of outputs into an output of a tuple.
pub fn all<O: OutputTuple>(outputs: O) -> Output<O::Item> {
    outputs.all()
}

/// Combines a tuple of outputs and transforms the tuple of values.
///
/// See [`OutputTuple::apply`].
pub fn apply<O, U, F>(outputs: O, f: F) -> Output<U>
where
    O: OutputTuple,
    U: OutputValue,
    F: FnOnce(O::Item) -> U + Send + 'static,
{
    outputs.apply(f)
}

macro_rules! impl_output_tuple {
    ($(($T:ident, $o:ident)),*) => {
        impl<$($T: OutputValue),*> OutputTuple for ($(Output<$T>,)*) {
            type Item = ($($T,)*);

            fn all(self) -> Output<Self::Item> {
                let ($($o,)*) = self;
                Output::from_future(async move {
                    let ($($o,)*) = futures::try_join!($($o.resolve()),*)?;

                    // Any unknown input leaves the tuple unknown.
                    let value = match ($($o.value(),)*) {
                        ($(Some($o),)*) => Some(($($o.clone(),)*)),
                        _ => None,
                    };

                    Ok(OutputData::from_parts(
                        value,
                        merge_secret([$($o.is_secret()),*]),
                        merge_dependencies([$($o.dependencies()),*]),
                    ))
                })
            }
        }
    };
}

// Generate impls for tuples of size 1 to 12
all_tuples!(impl_output_tuple, 1, 12, T, o);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::DependencySet;
    use crate::error::OutputError;
    use crate::resource::Resource;
    use std::sync::{Arc, Mutex};

    fn resource(name: &str) -> Resource {
        Resource::new("test:index:Thing", name)
    }

    #[tokio::test]
    async fn apply_unknown_input_skips_transform() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let unknown = Output::<i32>::unknown();
        let known = Output::known(2);

        let recorder = Arc::clone(&calls);
        let data = (unknown, known)
            .apply(move |(a, b)| {
                recorder.lock().unwrap().push((a, b));
                a + b
            })
            .resolve()
            .await
            .unwrap();

        assert!(!data.is_known());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn apply_secret_input_taints_result() {
        let data = (Output::secret(1), Output::known(2))
            .apply(|(a, b)| a + b)
            .resolve()
            .await
            .unwrap();

        assert!(data.is_secret());
        assert_eq!(data.value(), Some(&3));
    }

    #[tokio::test]
    async fn apply_unions_overlapping_dependencies() {
        let a = resource("a");
        let b = resource("b");
        let c = resource("c");
        let left_deps: DependencySet = [a.clone(), b.clone()].into_iter().collect();
        let right_deps: DependencySet = [b.clone(), c.clone()].into_iter().collect();

        let left = Output::create(1, true, false, left_deps.clone());
        let right = Output::create("x", true, false, right_deps.clone());

        let data = apply((left, right), |(n, s)| format!("{s}{n}"))
            .resolve()
            .await
            .unwrap();

        assert_eq!(data.dependencies(), &left_deps.union(&right_deps));
        assert_eq!(data.dependencies().len(), 3);
    }

    #[tokio::test]
    async fn all_of_single_output() {
        let data = all((Output::known(9),)).resolve().await.unwrap();
        assert_eq!(data.value(), Some(&(9,)));
    }

    #[tokio::test]
    async fn all_of_heterogeneous_outputs() {
        let data = all((
            Output::known(1_u8),
            Output::known("two"),
            Output::known(3.0_f64),
            Output::known(vec![4]),
        ))
        .resolve()
        .await
        .unwrap();

        assert_eq!(data.value(), Some(&(1_u8, "two", 3.0_f64, vec![4])));
    }

    #[tokio::test]
    async fn failed_input_fails_the_tuple() {
        let failed = Output::known(0).try_map(|_| Err::<i32, _>("nope"));
        let err = (failed, Output::known(1))
            .apply(|(a, b)| a + b)
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(err, OutputError::TransformFailure(_)));
    }

    #[tokio::test]
    async fn try_apply_reports_failure() {
        let err = (Output::known(4_i32), Output::known(0_i32))
            .try_apply(|(a, b)| a.checked_div(b).ok_or("division by zero"))
            .resolve()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "transform failed: division by zero");
    }

    #[tokio::test]
    async fn inputs_resolve_in_any_order() {
        let (first, first_resolver) = Output::<i32>::deferred();
        let (second, second_resolver) = Output::<i32>::deferred();
        let sum = (first, second).apply(|(a, b)| a * 10 + b);

        second_resolver.resolve(OutputData::known(2).into_secret());
        first_resolver.resolve(OutputData::known(1));

        let data = sum.resolve().await.unwrap();
        assert_eq!(data.value(), Some(&12));
        assert!(data.is_secret());
    }
}
