//! Inbound commands
//!
//! One message per line: a selector followed by an optional atom, e.g.
//! `settype 2` or `routethistrack 1`. Atoms that read as numbers become JSON
//! numbers, anything else stays a string, so the routing code sees the same
//! loosely typed values a menu would send.

use crate::error::{Result, RoutingError};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init,
    SetType(Value),
    SetChannel(Value),
    RouteThisTrack(Value),
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(selector) = tokens.next() else {
            return Ok(None);
        };
        let atom = tokens.next().map(parse_atom).unwrap_or(Value::Null);

        let command = match selector.to_ascii_lowercase().as_str() {
            "init" => Command::Init,
            "settype" => Command::SetType(atom),
            "setchannel" => Command::SetChannel(atom),
            "routethistrack" => Command::RouteThisTrack(atom),
            _ => return Err(RoutingError::UnknownCommand(selector.to_string())),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::SetType(_) => "settype",
            Command::SetChannel(_) => "setchannel",
            Command::RouteThisTrack(_) => "routethistrack",
        }
    }
}

fn parse_atom(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        return Value::Number(n.into());
    }
    token
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_selectors() {
        assert_eq!(Command::parse("init").unwrap(), Some(Command::Init));
        assert_eq!(
            Command::parse("settype 2").unwrap(),
            Some(Command::SetType(json!(2)))
        );
        assert_eq!(
            Command::parse("  setchannel   0 ").unwrap(),
            Some(Command::SetChannel(json!(0)))
        );
        assert_eq!(
            Command::parse("routethistrack").unwrap(),
            Some(Command::RouteThisTrack(Value::Null))
        );
    }

    #[test]
    fn test_parse_atoms() {
        assert_eq!(parse_atom("3"), json!(3));
        assert_eq!(parse_atom("-1"), json!(-1));
        assert_eq!(parse_atom("1.5"), json!(1.5));
        assert_eq!(parse_atom("foo"), json!("foo"));
        // not representable as a JSON number
        assert_eq!(parse_atom("inf"), json!("inf"));
        assert_eq!(parse_atom("NaN"), json!("NaN"));
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("bang").unwrap_err(),
            RoutingError::UnknownCommand("bang".to_string())
        );
    }
}
