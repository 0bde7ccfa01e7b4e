//! Routing module - catalogues, selections, menu state and auto-routing
//!
//! Each piece works against a [`LiveHost`](crate::host::LiveHost) passed in by
//! the caller; none of them keeps routing state of its own. The host stays the
//! single source of truth and confirms every write with a notification.

mod auto_route;
mod catalog;
mod context;
mod controller;
pub mod presenter;
mod types;

pub use auto_route::{is_truthy_one, route_to_this_track, AutoRouteOutcome};
pub use catalog::CatalogAccessor;
pub use context::{Axis, DeviceRoutingContext};
pub use controller::{parse_index, RoutingController};
pub use types::{RoutingCatalog, RoutingEntry};
