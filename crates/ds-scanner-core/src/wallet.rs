//! Wallet session state.

use ds_api_types::WalletId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WalletSession {
    #[default]
    Disconnected,
    Connected(WalletId),
}

/// What a connect/disconnect event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    Connected,
    /// Connected to a different identifier than before.
    Switched,
    Disconnected,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletSession::Connected(_))
    }

    pub fn public_id(&self) -> Option<&str> {
        match self {
            WalletSession::Connected(id) => Some(&id.0),
            WalletSession::Disconnected => None,
        }
    }

    pub fn connect(&mut self, public_id: &str) -> SessionChange {
        let change = match self.public_id() {
            Some(current) if current == public_id => return SessionChange::Unchanged,
            Some(_) => SessionChange::Switched,
            None => SessionChange::Connected,
        };
        *self = WalletSession::Connected(WalletId(public_id.to_owned()));
        change
    }

    pub fn disconnect(&mut self) -> SessionChange {
        if !self.is_connected() {
            return SessionChange::Unchanged;
        }
        *self = WalletSession::Disconnected;
        SessionChange::Disconnected
    }
}

/// `ABCD...WXYZ` form of a public identifier for the header.
pub fn short_address(public_id: &str) -> String {
    let chars: Vec<char> = public_id.chars().collect();
    if chars.len() <= 8 {
        return public_id.to_owned();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
