//! Outbound UI update channel
//!
//! Two menus are driven: the routing type menu and the routing channel menu.
//! The device never reads them back; they only receive these messages.

use colored::*;
use std::fmt;

/// Which menu a message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiTarget {
    TypeMenu,
    ChannelMenu,
}

impl fmt::Display for UiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiTarget::TypeMenu => write!(f, "type"),
            UiTarget::ChannelMenu => write!(f, "channel"),
        }
    }
}

/// Menu update command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    /// Replace the menu items
    UpdateOptionList(Vec<String>),
    /// Show the item with this label as selected
    SelectByLabel(String),
    SetEnabled(bool),
    /// When true the menu lets mouse clicks pass through (it cannot be opened)
    SetClickThrough(bool),
}

impl fmt::Display for UiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiMessage::UpdateOptionList(labels) => {
                let quoted: Vec<String> = labels.iter().map(|l| format!("{:?}", l)).collect();
                write!(f, "options [{}]", quoted.join(", "))
            }
            UiMessage::SelectByLabel(label) => write!(f, "select {:?}", label),
            UiMessage::SetEnabled(on) => write!(f, "enabled {}", on),
            UiMessage::SetClickThrough(on) => write!(f, "click-through {}", on),
        }
    }
}

/// Receiver of menu updates
pub trait UiSink {
    fn send(&mut self, target: UiTarget, message: UiMessage);
}

/// Prints menu updates to the terminal
#[derive(Debug, Default)]
pub struct ConsoleUi;

impl UiSink for ConsoleUi {
    fn send(&mut self, target: UiTarget, message: UiMessage) {
        let target = match target {
            UiTarget::TypeMenu => "type   ".cyan(),
            UiTarget::ChannelMenu => "channel".magenta(),
        };
        println!(
            "{} {} → {}",
            chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
            target,
            message.to_string().green()
        );
    }
}

/// Keeps every message, for tests and scripted sessions
#[derive(Debug, Default, Clone)]
pub struct RecordingUi {
    pub messages: Vec<(UiTarget, UiMessage)>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent to one menu, in order
    pub fn for_target(&self, target: UiTarget) -> Vec<UiMessage> {
        self.messages
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl UiSink for RecordingUi {
    fn send(&mut self, target: UiTarget, message: UiMessage) {
        self.messages.push((target, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_ui_filters_by_target() {
        let mut ui = RecordingUi::new();
        ui.send(UiTarget::TypeMenu, UiMessage::SelectByLabel("No Input".into()));
        ui.send(UiTarget::ChannelMenu, UiMessage::SetEnabled(false));
        ui.send(UiTarget::TypeMenu, UiMessage::SetEnabled(true));

        assert_eq!(
            ui.for_target(UiTarget::TypeMenu),
            vec![
                UiMessage::SelectByLabel("No Input".into()),
                UiMessage::SetEnabled(true)
            ]
        );
        assert_eq!(ui.for_target(UiTarget::ChannelMenu).len(), 1);

        ui.clear();
        assert!(ui.messages.is_empty());
    }

    #[test]
    fn test_message_display() {
        let msg = UiMessage::UpdateOptionList(vec!["-".into(), "-".into()]);
        assert_eq!(msg.to_string(), "options [\"-\", \"-\"]");
        assert_eq!(UiMessage::SetClickThrough(true).to_string(), "click-through true");
    }
}
