//! IO Routing - audio/MIDI routing menus for a device hosted in a Live set
//!
//! A device exposes two dependent menus per IO object: the routing type
//! (source or destination) and the routing channel. This crate keeps them in
//! sync with the host's live object model, applies user selections, and can
//! route a MIDI input to the track the device lives on.

pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod host;
pub mod routing;
pub mod ui;

pub use command::Command;
pub use device::{deliver_pending, RoutingDevice};
pub use error::{Result, RoutingError};
