//! Menu state derived from the routing catalogues
//!
//! The channel menu depends on the channel catalogue's length:
//!
//! | channels            | items                  | enabled |
//! |---------------------|------------------------|---------|
//! | none                | `-`, `-`               | no      |
//! | one, blank label    | `-`, `-`               | no      |
//! | one, labelled       | label, `-`             | no      |
//! | two or more         | every label            | yes     |
//!
//! An empty channel catalogue means the upstream source went away, so the
//! type menu falls back to the last type entry ("No Input"/"No Output")
//! even though no type notification arrives.

use super::types::{RoutingCatalog, RoutingEntry};
use crate::ui::{UiMessage, UiSink, UiTarget};

/// Label shown in place of a missing channel
pub const PLACEHOLDER: &str = "-";

/// Replace the type menu items with the catalogue's labels
pub fn present_types(types: &RoutingCatalog, ui: &mut dyn UiSink) {
    ui.send(UiTarget::TypeMenu, UiMessage::UpdateOptionList(types.labels()));
}

/// Update the channel menu (and possibly the type menu) after the channel
/// catalogue changed. `read_types` is only called for an empty catalogue.
pub fn present_channels<F>(channels: &RoutingCatalog, read_types: F, ui: &mut dyn UiSink)
where
    F: FnOnce() -> RoutingCatalog,
{
    match channels.entries() {
        [] => {
            if let Some(sentinel) = read_types().last() {
                ui.send(
                    UiTarget::TypeMenu,
                    UiMessage::SelectByLabel(sentinel.display_name.clone()),
                );
            }
            disable_channels(placeholder_pair(None), ui);
        }
        [only] => {
            let label = (!only.display_name.is_empty()).then_some(only.display_name.as_str());
            disable_channels(placeholder_pair(label), ui);
        }
        _ => {
            ui.send(
                UiTarget::ChannelMenu,
                UiMessage::UpdateOptionList(channels.labels()),
            );
            ui.send(UiTarget::ChannelMenu, UiMessage::SetEnabled(true));
            ui.send(UiTarget::ChannelMenu, UiMessage::SetClickThrough(false));
        }
    }
}

/// Show the current entry as selected in the given menu
pub fn present_selection(target: UiTarget, current: &RoutingEntry, ui: &mut dyn UiSink) {
    ui.send(
        target,
        UiMessage::SelectByLabel(current.display_name.clone()),
    );
}

fn placeholder_pair(first: Option<&str>) -> Vec<String> {
    vec![
        first.unwrap_or(PLACEHOLDER).to_string(),
        PLACEHOLDER.to_string(),
    ]
}

fn disable_channels(labels: Vec<String>, ui: &mut dyn UiSink) {
    ui.send(UiTarget::ChannelMenu, UiMessage::UpdateOptionList(labels));
    ui.send(UiTarget::ChannelMenu, UiMessage::SetClickThrough(true));
    ui.send(UiTarget::ChannelMenu, UiMessage::SetEnabled(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RecordingUi;

    fn types() -> RoutingCatalog {
        RoutingCatalog::new(vec![
            RoutingEntry::new("Ext: All Ins", 1),
            RoutingEntry::new("1-MIDI", 2),
            RoutingEntry::new("No Input", 9),
        ])
    }

    fn dashes() -> Vec<String> {
        vec!["-".to_string(), "-".to_string()]
    }

    #[test]
    fn test_empty_channels_fall_back_to_sentinel_type() {
        let mut ui = RecordingUi::new();
        present_channels(&RoutingCatalog::default(), types, &mut ui);

        assert_eq!(
            ui.for_target(UiTarget::TypeMenu),
            vec![UiMessage::SelectByLabel("No Input".into())]
        );
        assert_eq!(
            ui.for_target(UiTarget::ChannelMenu),
            vec![
                UiMessage::UpdateOptionList(dashes()),
                UiMessage::SetClickThrough(true),
                UiMessage::SetEnabled(false),
            ]
        );
    }

    #[test]
    fn test_empty_channels_with_empty_types() {
        let mut ui = RecordingUi::new();
        present_channels(&RoutingCatalog::default(), RoutingCatalog::default, &mut ui);

        assert!(ui.for_target(UiTarget::TypeMenu).is_empty());
        assert_eq!(ui.for_target(UiTarget::ChannelMenu).len(), 3);
    }

    #[test]
    fn test_single_blank_channel() {
        let mut ui = RecordingUi::new();
        let channels = RoutingCatalog::new(vec![RoutingEntry::new("", 900)]);
        present_channels(
            &channels,
            || panic!("types must not be read for a non-empty channel list"),
            &mut ui,
        );

        assert!(ui.for_target(UiTarget::TypeMenu).is_empty());
        assert_eq!(
            ui.for_target(UiTarget::ChannelMenu),
            vec![
                UiMessage::UpdateOptionList(dashes()),
                UiMessage::SetClickThrough(true),
                UiMessage::SetEnabled(false),
            ]
        );
    }

    #[test]
    fn test_single_named_channel() {
        let mut ui = RecordingUi::new();
        let channels = RoutingCatalog::new(vec![RoutingEntry::new("Track In", 200)]);
        present_channels(&channels, types, &mut ui);

        assert_eq!(
            ui.for_target(UiTarget::ChannelMenu)[0],
            UiMessage::UpdateOptionList(vec!["Track In".into(), "-".into()])
        );
        assert!(ui
            .for_target(UiTarget::ChannelMenu)
            .contains(&UiMessage::SetEnabled(false)));
    }

    #[test]
    fn test_multiple_channels_enable_menu() {
        let mut ui = RecordingUi::new();
        let channels = RoutingCatalog::new(vec![
            RoutingEntry::new("All Channels", 100),
            RoutingEntry::new("Ch. 1", 101),
            RoutingEntry::new("Ch. 1", 102),
        ]);
        present_channels(&channels, types, &mut ui);

        assert!(ui.for_target(UiTarget::TypeMenu).is_empty());
        assert_eq!(
            ui.for_target(UiTarget::ChannelMenu),
            vec![
                UiMessage::UpdateOptionList(vec![
                    "All Channels".into(),
                    "Ch. 1".into(),
                    "Ch. 1".into()
                ]),
                UiMessage::SetEnabled(true),
                UiMessage::SetClickThrough(false),
            ]
        );
    }

    #[test]
    fn test_present_types_and_selection() {
        let mut ui = RecordingUi::new();
        present_types(&types(), &mut ui);
        present_selection(UiTarget::TypeMenu, &RoutingEntry::new("1-MIDI", 2), &mut ui);

        assert_eq!(
            ui.for_target(UiTarget::TypeMenu),
            vec![
                UiMessage::UpdateOptionList(vec![
                    "Ext: All Ins".into(),
                    "1-MIDI".into(),
                    "No Input".into()
                ]),
                UiMessage::SelectByLabel("1-MIDI".into()),
            ]
        );
    }
}
