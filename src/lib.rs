//! Typed wrapper around the vis-network `Network` constructor for wasm32.
//!
//! [`network::guard`] checks that a foreign value is a `vis.Network`;
//! [`network::construct`] builds the options object from ordered overrides,
//! calls the constructor, and reports every host fault as an error value.
//! [`js`] binds both to the browser.

pub mod error;
pub mod js;
pub mod manipulation;
pub mod network;
pub mod options;
pub mod page;

pub use error::{ConstructionError, Error, NotNetworkError, OptionError};
pub use network::{construct, guard, Network, NetworkRuntime};
pub use options::{NetworkOption, OptionTree, OptionsBuilder};
