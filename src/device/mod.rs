//! The routing device: one instance per IO menu pair
//!
//! Holds the startup arguments and, once initialised, the bound host handles.
//! Every operation takes the host explicitly; the device keeps no routing
//! state of its own.

use crate::command::Command;
use crate::error::{Result, RoutingError};
use crate::host::{LiveHost, MemoryHost, PropertyEvent};
use crate::routing::{
    self, is_truthy_one, presenter, AutoRouteOutcome, Axis, CatalogAccessor,
    DeviceRoutingContext, RoutingCatalog, RoutingController, RoutingEntry,
};
use crate::ui::{UiSink, UiTarget};
use serde_json::Value;
use tracing::{debug, info};

/// Handles bound by a successful `init`
#[derive(Debug, Clone)]
struct Bound {
    context: DeviceRoutingContext,
    catalog: CatalogAccessor,
    controller: RoutingController,
}

/// Routing menus for one IO object of the hosting device
#[derive(Debug, Clone)]
pub struct RoutingDevice {
    args: Vec<String>,
    bound: Option<Bound>,
}

impl RoutingDevice {
    /// Create an uninitialised device from its startup arguments
    pub fn new(args: Vec<String>) -> Self {
        Self { args, bound: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    pub fn context(&self) -> Option<&DeviceRoutingContext> {
        self.bound.as_ref().map(|b| &b.context)
    }

    /// Validate the startup arguments and start observing the four handles.
    ///
    /// On failure the device stays uninitialised. Each observation makes the
    /// host queue one notification with the current value, which populates
    /// the menus.
    pub fn init(&mut self, host: &mut dyn LiveHost) -> Result<()> {
        let context = DeviceRoutingContext::from_args(&self.args)?;
        let path = context.path();

        let catalog = CatalogAccessor::new(&path);
        let controller = RoutingController::new(&path);
        catalog.observe(host);
        controller.observe(host);

        info!("Routing device initialized for {}", path);
        self.bound = Some(Bound {
            context,
            catalog,
            controller,
        });
        Ok(())
    }

    fn bound(&self, command: &'static str) -> Result<&Bound> {
        self.bound
            .as_ref()
            .ok_or(RoutingError::Uninitialized { command })
    }

    /// Select a routing type by menu index
    pub fn set_type(&self, host: &mut dyn LiveHost, index: &Value) -> Result<RoutingEntry> {
        let bound = self.bound("settype")?;
        bound.controller.set_type(host, &bound.catalog, index)
    }

    /// Select a routing channel by menu index
    pub fn set_channel(&self, host: &mut dyn LiveHost, index: &Value) -> Result<RoutingEntry> {
        let bound = self.bound("setchannel")?;
        bound.controller.set_channel(host, &bound.catalog, index)
    }

    /// Route a MIDI input to the track the device lives on.
    ///
    /// Devices configured for any other IO kind ignore this silently, even
    /// before `init`.
    pub fn route_to_this_track(
        &self,
        host: &mut dyn LiveHost,
        force: &Value,
    ) -> Result<AutoRouteOutcome> {
        let configured_for_midi_in = self.args.first().map(String::as_str)
            == Some(Axis::MidiInputs.as_str());
        if !configured_for_midi_in {
            return Ok(AutoRouteOutcome::NotMidiInput);
        }

        let bound = self.bound("routethistrack")?;
        routing::route_to_this_track(
            host,
            &bound.context,
            &bound.catalog,
            &bound.controller,
            is_truthy_one(force),
        )
    }

    /// Deliver one host notification. Returns false when no handle of this
    /// device produced it.
    pub fn handle_event(
        &self,
        host: &dyn LiveHost,
        event: &PropertyEvent,
        ui: &mut dyn UiSink,
    ) -> bool {
        let Some(bound) = &self.bound else {
            return false;
        };
        if event.value.is_null() {
            // Object id announcements carry no property value
            return true;
        }
        let Bound {
            catalog,
            controller,
            ..
        } = bound;

        if catalog.types.matches(event) {
            debug!("available_routing_types changed");
            presenter::present_types(&RoutingCatalog::from_payload(Some(&event.value)), ui);
            // Item positions may have shifted under the current selection
            if let Some(current) = controller.current_type(host) {
                presenter::present_selection(UiTarget::TypeMenu, &current, ui);
            }
        } else if catalog.channels.matches(event) {
            debug!("available_routing_channels changed");
            let channels = RoutingCatalog::from_payload(Some(&event.value));
            presenter::present_channels(&channels, || catalog.get_types(host), ui);
        } else if controller.routing_type.matches(event) {
            if let Some(current) = RoutingEntry::from_value(&event.value) {
                debug!("routing_type is now {:?}", current.display_name);
                presenter::present_selection(UiTarget::TypeMenu, &current, ui);
            }
        } else if controller.routing_channel.matches(event) {
            if let Some(current) = RoutingEntry::from_value(&event.value) {
                debug!("routing_channel is now {:?}", current.display_name);
                presenter::present_selection(UiTarget::ChannelMenu, &current, ui);
            }
        } else {
            return false;
        }
        true
    }

    /// Run an inbound command
    pub fn dispatch(&mut self, host: &mut dyn LiveHost, command: &Command) -> Result<()> {
        match command {
            Command::Init => self.init(host),
            Command::SetType(index) => {
                let entry = self.set_type(host, index)?;
                info!("Routing type set to {:?}", entry.display_name);
                Ok(())
            }
            Command::SetChannel(index) => {
                let entry = self.set_channel(host, index)?;
                info!("Routing channel set to {:?}", entry.display_name);
                Ok(())
            }
            Command::RouteThisTrack(force) => {
                let outcome = self.route_to_this_track(host, force)?;
                match &outcome {
                    AutoRouteOutcome::Routed(entry) => {
                        info!("Routed to this track via {:?}", entry.display_name)
                    }
                    other => debug!("routethistrack: {:?}", other),
                }
                Ok(())
            }
        }
    }
}

/// Deliver every pending notification of an in-memory host, oldest first
pub fn deliver_pending(device: &RoutingDevice, host: &mut MemoryHost, ui: &mut dyn UiSink) -> usize {
    let mut delivered = 0;
    while let Some(event) = host.poll_event() {
        if !device.handle_event(host, &event, ui) {
            debug!("Unhandled notification: {} {}", event.path, event.property);
        }
        delivered += 1;
    }
    delivered
}
