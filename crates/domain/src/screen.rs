//! Navigation destinations.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A screen the navigator can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Login,
    Register,
}

impl Screen {
    /// Route name understood by the host navigation stack.
    pub fn route_name(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Login",
            Screen::Register => "Register",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

impl FromStr for Screen {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Home" => Ok(Screen::Home),
            "Login" => Ok(Screen::Login),
            "Register" => Ok(Screen::Register),
            other => Err(DomainError::parse(format!("Unknown screen: {other}"))),
        }
    }
}
