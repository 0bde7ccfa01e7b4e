//! "Route to this track" for MIDI inputs
//!
//! The device's type catalogue and the owning track's own input types list
//! the same sources in the same order, up to the point where the device can
//! reach something the track cannot. The first entry past that point is the
//! track the device lives on, so selecting it makes the device listen to its
//! own track.

use super::catalog::CatalogAccessor;
use super::context::{Axis, DeviceRoutingContext};
use super::controller::RoutingController;
use super::types::{RoutingCatalog, RoutingEntry};
use crate::error::Result;
use crate::host::path::THIS_DEVICE;
use crate::host::{LiveHost, LivePath, Property};
use serde_json::{json, Value};
use tracing::{debug, info};

/// Why an auto-route request did or did not change the routing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoRouteOutcome {
    /// Only MIDI inputs are auto-routed
    NotMidiInput,
    /// Input is not "No Input" and the request was not forced
    AlreadyAssigned,
    /// The device is not inside a track
    NoOwningTrack,
    /// The owning track does not accept MIDI input
    TrackHasNoMidiInput,
    /// The first unreachable source is already selected
    AlreadyRouted(RoutingEntry),
    /// Routing type switched to this entry and channel reset to the first one
    Routed(RoutingEntry),
    /// Every catalogue entry is reachable from the track itself
    NoDivergence,
}

/// Loose comparison with 1, as the UI sends toggles: `1`, `"1"` or `true`
pub fn is_truthy_one(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => s.trim().parse::<f64>().ok() == Some(1.0),
        Value::Bool(b) => *b,
        _ => false,
    }
}

/// Switch a MIDI input to the first source the owning track cannot reach.
///
/// Unless `force` is set this only acts while the input is on the
/// catalogue's last entry ("No Input").
pub fn route_to_this_track(
    host: &mut dyn LiveHost,
    context: &DeviceRoutingContext,
    catalog: &CatalogAccessor,
    controller: &RoutingController,
    force: bool,
) -> Result<AutoRouteOutcome> {
    if context.axis != Axis::MidiInputs {
        return Ok(AutoRouteOutcome::NotMidiInput);
    }

    let current = controller.current_type(host);
    let types = catalog.get_types(host);

    if !force {
        let on_sentinel = match (&current, types.last()) {
            (Some(current), Some(sentinel)) => current.identifier == sentinel.identifier,
            _ => false,
        };
        if !on_sentinel {
            debug!("Input already assigned, not auto-routing");
            return Ok(AutoRouteOutcome::AlreadyAssigned);
        }
    }

    let Some(track) = host
        .resolve(&LivePath::parse(THIS_DEVICE))
        .and_then(|device| device.owning_track())
    else {
        debug!("Device is not inside a track");
        return Ok(AutoRouteOutcome::NoOwningTrack);
    };

    let accepts_midi = host
        .get(&track, Property::HasMidiInput)
        .map(|v| is_truthy_one(&v))
        .unwrap_or(false);
    if !accepts_midi {
        debug!("Track {} has no MIDI input", track);
        return Ok(AutoRouteOutcome::TrackHasNoMidiInput);
    }

    let track_inputs = RoutingCatalog::from_payload(
        host.get(&track, Property::AvailableInputRoutingTypes).as_ref(),
    );

    for (i, entry) in types.iter().enumerate() {
        let reachable = track_inputs
            .get(i)
            .map(|input| input.identifier == entry.identifier)
            .unwrap_or(false);
        if reachable {
            continue;
        }

        if current.as_ref().map(|c| c.identifier) == Some(entry.identifier) {
            return Ok(AutoRouteOutcome::AlreadyRouted(entry.clone()));
        }

        info!("Routing MIDI input to this track: {:?}", entry.display_name);
        controller.write_type(host, entry);
        controller.set_channel(host, catalog, &json!(0))?;
        return Ok(AutoRouteOutcome::Routed(entry.clone()));
    }

    Ok(AutoRouteOutcome::NoDivergence)
}
