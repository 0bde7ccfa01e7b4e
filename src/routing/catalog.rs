//! Read access to the available routing types and channels

use super::types::RoutingCatalog;
use crate::host::{LiveHost, LivePath, ObservableHandle, Property};

/// Wraps the two read-only catalogue handles of one IO object.
///
/// Every call is a fresh host read; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAccessor {
    pub types: ObservableHandle,
    pub channels: ObservableHandle,
}

impl CatalogAccessor {
    pub fn new(path: &LivePath) -> Self {
        Self {
            types: ObservableHandle::new(path.clone(), Property::AvailableRoutingTypes),
            channels: ObservableHandle::new(path.clone(), Property::AvailableRoutingChannels),
        }
    }

    pub fn get_types(&self, host: &dyn LiveHost) -> RoutingCatalog {
        RoutingCatalog::from_payload(self.types.read(host).as_ref())
    }

    pub fn get_channels(&self, host: &dyn LiveHost) -> RoutingCatalog {
        RoutingCatalog::from_payload(self.channels.read(host).as_ref())
    }

    pub fn observe(&self, host: &mut dyn LiveHost) {
        self.types.observe(host);
        self.channels.observe(host);
    }
}
