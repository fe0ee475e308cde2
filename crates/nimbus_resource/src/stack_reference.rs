//! Stack references.
//!
//! A [`StackReference`] exposes the exported outputs of another stack. The
//! transport fetches the exports and hands them over as an
//! [`Output<StackOutputs>`]; the stack reference adds itself to their
//! provenance and offers typed accessors on top.

use nimbus_output::{DependencySet, Output, OutputTuple, OutputValue, Resource};
use serde_json::Value;

use crate::error::StackReferenceError;

/// Type token of stack reference resources.
pub const STACK_REFERENCE_TYPE: &str = "pulumi:pulumi:StackReference";

/// The exported outputs of a stack, keyed by output name.
pub type StackOutputs = serde_json::Map<String, Value>;

/// A reference to another stack's exported outputs.
///
/// # Example
///
/// ```
/// use nimbus_output::Output;
/// use nimbus_resource::{StackOutputs, StackReference};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let mut exports = StackOutputs::new();
/// exports.insert("vpcId".into(), json!("vpc-0a1b"));
/// exports.insert("subnetCount".into(), json!(3));
///
/// let network = StackReference::new("acme/network/prod", Output::known(exports));
///
/// let vpc_id = network.get_string_output("vpcId").resolve().await.unwrap();
/// assert_eq!(vpc_id.value().map(String::as_str), Some("vpc-0a1b"));
/// assert!(vpc_id.dependencies().contains(network.resource()));
///
/// let count = network.get_i64_output("subnetCount").resolve().await.unwrap();
/// assert_eq!(count.value(), Some(&3));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct StackReference {
    resource: Resource,
    name: Output<String>,
    id: Output<String>,
    outputs: Output<StackOutputs>,
}

impl StackReference {
    /// Creates a stack reference whose stack name is its resource name.
    ///
    /// `name` is in the form `org/project/stack`.
    #[must_use]
    pub fn new(name: &str, outputs: Output<StackOutputs>) -> Self {
        Self::with_stack_name(name, Output::known(name.to_owned()), outputs)
    }

    /// Creates a stack reference named `name` that refers to `stack_name`.
    #[must_use]
    pub fn with_stack_name(
        name: &str,
        stack_name: Output<String>,
        outputs: Output<StackOutputs>,
    ) -> Self {
        let resource = Resource::new(STACK_REFERENCE_TYPE, name);
        let dependencies = DependencySet::single(resource.clone());

        let name = stack_name.with_dependencies(dependencies.clone());
        let id = name.clone();
        let outputs = outputs.with_dependencies(dependencies);

        Self {
            resource,
            name,
            id,
            outputs,
        }
    }

    /// Returns the identity handle of this stack reference.
    #[must_use]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Returns the name of the referenced stack.
    #[must_use]
    pub fn name(&self) -> &Output<String> {
        &self.name
    }

    /// Returns the ID of this stack reference, which is the stack name.
    #[must_use]
    pub fn id(&self) -> &Output<String> {
        &self.id
    }

    /// Returns every exported output of the referenced stack.
    #[must_use]
    pub fn outputs(&self) -> &Output<StackOutputs> {
        &self.outputs
    }

    /// Returns the stack output named `name`, `None` if it is not exported.
    pub fn get_output(&self, name: impl Into<Output<String>>) -> Output<Option<Value>> {
        (name.into(), self.outputs.clone()).apply(|(name, outputs)| outputs.get(&name).cloned())
    }

    /// Returns the stack output named `name` as a string.
    ///
    /// A missing or `null` output yields an empty string. Any other non-string value
    /// fails the output with a [`StackReferenceError::Conversion`].
    pub fn get_string_output(&self, name: impl Into<Output<String>>) -> Output<String> {
        self.typed_output(name, "string", |value| match value {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(s)) => Some(s),
            Some(_) => None,
        })
    }

    /// Returns the stack output named `name` as a resource ID.
    pub fn get_id_output(&self, name: impl Into<Output<String>>) -> Output<String> {
        self.get_string_output(name)
    }

    /// Returns the stack output named `name` as a floating point number.
    ///
    /// Fails the output with a [`StackReferenceError::Conversion`] if the
    /// output is missing or not a number.
    pub fn get_f64_output(&self, name: impl Into<Output<String>>) -> Output<f64> {
        self.typed_output(name, "f64", |value| value.as_ref().and_then(Value::as_f64))
    }

    /// Returns the stack output named `name` as an integer.
    ///
    /// Stack outputs travel as JSON numbers; fractional values are truncated.
    /// Fails the output with a [`StackReferenceError::Conversion`] if the
    /// output is missing or not a number.
    pub fn get_i64_output(&self, name: impl Into<Output<String>>) -> Output<i64> {
        self.typed_output(name, "i64", |value| {
            value.as_ref().and_then(Value::as_f64).map(|number| number as i64)
        })
    }

    fn typed_output<U, F>(
        &self,
        name: impl Into<Output<String>>,
        expected: &'static str,
        convert: F,
    ) -> Output<U>
    where
        U: OutputValue,
        F: FnOnce(Option<Value>) -> Option<U> + Send + 'static,
    {
        (name.into(), self.outputs.clone()).try_apply(move |(name, outputs)| {
            let value = outputs.get(&name).cloned();
            let found = json_kind(value.as_ref());
            convert(value).ok_or(StackReferenceError::Conversion {
                name,
                expected,
                found,
            })
        })
    }
}

fn json_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing output",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
