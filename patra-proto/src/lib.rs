//! Patra wire protocol - command tokens and message catalog
//!
//! The channel carries short ASCII messages in both directions. The central
//! writes a command, the peripheral answers with a sequence of notification
//! pages terminated by a zero-length marker, with an `OK` acknowledgment
//! from the central between pages.

pub mod ble;

/// Command token that starts a journal transfer.
pub const CMD_GET: &[u8] = b"get";

/// Acknowledgment token: confirms the last page and requests the next.
pub const ACK: &[u8] = b"OK";

/// Zero-length end-of-transmission marker, sent when no pages remain.
pub const END_OF_TRANSMIT: &[u8] = b"";

/// Sent when an inbound payload matches no known command.
pub const ERR_NO_SUPPORT_CMD: &[u8] = b"ER: No support command";

/// Reserved for malformed command arguments. Part of the message catalog
/// since the first firmware revision, but nothing emits it yet.
pub const ERR_WRONG_DATA: &[u8] = b"ER: Wrong data";

/// One inbound write, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Starts a journal transfer (`get` prefix).
    Get,
    /// Acknowledges the previous page (`OK` prefix).
    Ack,
    /// Anything else, including the empty payload.
    Unknown,
}

/// Classify an inbound write payload.
///
/// Matching is a case-sensitive prefix compare against each token, so
/// trailing bytes are ignored: `getfoo` reads as [`Command::Get`]. A payload
/// shorter than a token never matches it, which puts `""`, `"O"`, and `"ge"`
/// all in [`Command::Unknown`].
pub fn classify(payload: &[u8]) -> Command {
    if payload.starts_with(CMD_GET) {
        Command::Get
    } else if payload.starts_with(ACK) {
        Command::Ack
    } else {
        Command::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tokens() {
        assert_eq!(classify(b"get"), Command::Get);
        assert_eq!(classify(b"OK"), Command::Ack);
        assert_eq!(classify(b"reboot"), Command::Unknown);
    }

    #[test]
    fn classify_matches_by_prefix() {
        assert_eq!(classify(b"get journal"), Command::Get);
        assert_eq!(classify(b"getfoo"), Command::Get);
        assert_eq!(classify(b"OKAY"), Command::Ack);
        assert_eq!(classify(b"OK\r\n"), Command::Ack);
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(classify(b"GET"), Command::Unknown);
        assert_eq!(classify(b"Get"), Command::Unknown);
        assert_eq!(classify(b"ok"), Command::Unknown);
    }

    #[test]
    fn short_payloads_never_match() {
        assert_eq!(classify(b""), Command::Unknown);
        assert_eq!(classify(b"O"), Command::Unknown);
        assert_eq!(classify(b"ge"), Command::Unknown);
    }
}
