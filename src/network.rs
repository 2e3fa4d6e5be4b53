//! Guarded construction of `vis.Network` instances.

use std::fmt;

use crate::error::{ConstructionError, Error, NotNetworkError};
use crate::options::{NetworkOption, OptionTree, OptionsBuilder};

/// The host environment that owns foreign values and the `Network` constructor.
///
/// Both fallible methods report host faults as `Err` values; nothing the host
/// throws is allowed to unwind past [`construct`].
pub trait NetworkRuntime {
    /// An opaque value owned by the host
    type Value;
    /// A host callable stored in the options (manipulation hooks)
    type Hook: fmt::Debug;
    /// Whatever the host throws
    type Fault: fmt::Debug + 'static;

    /// Instance-of check against the `Network` constructor
    fn is_network(&self, value: &Self::Value) -> bool;

    /// Turn the applied options into a host options object.
    fn materialize(&self, options: OptionTree<Self::Hook>) -> Result<Self::Value, Self::Fault>;

    /// Invoke `new Network(container, data, options)`.
    fn instantiate(
        &self,
        container: &Self::Value,
        data: &Self::Value,
        options: Self::Value,
    ) -> Result<Self::Value, Self::Fault>;
}

/// A foreign value known to be a `vis.Network` instance.
///
/// Only [`guard`] hands these out.
#[derive(Debug, Clone, PartialEq)]
pub struct Network<V> {
    value: V,
}

impl<V> Network<V> {
    pub fn as_inner(&self) -> &V {
        &self.value
    }

    pub fn into_inner(self) -> V {
        self.value
    }
}

/// Wrap `value` if it is a `Network` instance.
pub fn guard<R: NetworkRuntime>(runtime: &R, value: R::Value) -> Result<Network<R::Value>, NotNetworkError> {
    if runtime.is_network(&value) {
        Ok(Network { value })
    } else {
        Err(NotNetworkError)
    }
}

/// Build options from `options` (applied in order) and construct a `Network`.
///
/// Faults from option application, options materialization or the constructor
/// come back as [`Error::Construction`]. A constructor result that fails the
/// instance check comes back as [`Error::NotNetwork`].
pub fn construct<R, I>(
    runtime: &R,
    container: &R::Value,
    data: &R::Value,
    options: I,
) -> Result<Network<R::Value>, Error<R::Fault>>
where
    R: NetworkRuntime,
    I: IntoIterator<Item = NetworkOption<R::Hook>>,
{
    let builder: OptionsBuilder<R::Hook> = options.into_iter().collect();
    tracing::debug!(overrides = builder.len(), "constructing vis.Network");

    let tree = builder.build()?;

    #[cfg(feature = "debug_log")]
    tracing::debug!(options = %tree.to_json(), "applied network options");

    let options = runtime
        .materialize(tree)
        .map_err(ConstructionError::Materialize)?;
    let value = runtime
        .instantiate(container, data, options)
        .map_err(ConstructionError::Constructor)?;

    let network = guard(runtime, value)?;
    tracing::debug!("vis.Network constructed");
    Ok(network)
}
