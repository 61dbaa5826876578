//! Command dispatcher and paged transmitter
//!
//! One [`JournalService`] instance is owned by whichever component installs
//! the transport's write handler, and every inbound write is fed through
//! [`JournalService::handle_write`]. Dispatch is synchronous and sends at
//! most one notification per write.

use log::{debug, warn};
use patra_proto::{classify, Command, END_OF_TRANSMIT, ERR_NO_SUPPORT_CMD};

use crate::journal::RecordTable;

/// Outbound half of the notification channel.
///
/// Transport bindings implement this on top of their notify primitive.
/// Delivery is fire-and-forget: the transport owns connection state and
/// silently drops sends while no client is subscribed, so there is nothing
/// to report back.
pub trait Notifier {
    fn notify(&mut self, message: &[u8]);
}

/// Which table an active transfer pages through, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferState {
    /// No transfer in progress.
    #[default]
    Idle,
    /// Paging through the journal table.
    StreamingJournal,
    /// Paging through the parameter table. Reserved: the ack path handles
    /// it, but no command token starts a parameter transfer yet.
    StreamingParameters,
}

/// The protocol state machine: transfer state, page cursor, and the record
/// tables they index.
///
/// The cursor stays in `[0, table.len()]`; reaching the upper bound means
/// the next acknowledgment terminates the transfer. While [`TransferState::Idle`]
/// the cursor carries no meaning. At most one transfer is active at a time.
pub struct JournalService {
    journal: RecordTable,
    parameters: RecordTable,
    state: TransferState,
    cursor: usize,
}

impl JournalService {
    pub fn new(journal: RecordTable) -> Self {
        Self {
            journal,
            // Defined by the protocol but never populated in this version.
            parameters: RecordTable::empty(),
            state: TransferState::Idle,
            cursor: 0,
        }
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle one inbound write from the central.
    ///
    /// Runs to completion inside the transport's write callback. Every
    /// unrecognized payload degrades to an error notification; nothing here
    /// aborts the channel.
    pub fn handle_write(&mut self, payload: &[u8], out: &mut impl Notifier) {
        match classify(payload) {
            Command::Get => {
                debug!("journal transfer started");
                self.cursor = 0;
                self.state = TransferState::StreamingJournal;
                send_page(&self.journal, self.cursor, out);
                self.cursor += 1;
            }
            Command::Unknown => {
                warn!(
                    "unsupported command: {:?}",
                    String::from_utf8_lossy(payload)
                );
                out.notify(ERR_NO_SUPPORT_CMD);
            }
            Command::Ack => match self.state {
                // Spurious acknowledgment, nothing to page.
                TransferState::Idle => {}
                TransferState::StreamingJournal | TransferState::StreamingParameters => {
                    let table = match self.state {
                        TransferState::StreamingJournal => &self.journal,
                        _ => &self.parameters,
                    };
                    if self.cursor >= table.len() {
                        debug!("transfer complete after {} pages", self.cursor);
                        out.notify(END_OF_TRANSMIT);
                        self.cursor = 0;
                        self.state = TransferState::Idle;
                    } else {
                        send_page(table, self.cursor, out);
                        self.cursor += 1;
                    }
                }
            },
        }
    }
}

/// Paged transmitter: render the page at `index` and send it as one
/// notification. An out-of-range index renders as the zero-length
/// end-of-transmission marker.
fn send_page(table: &RecordTable, index: usize, out: &mut impl Notifier) {
    match table.record(index) {
        Some(record) => out.notify(record),
        None => out.notify(END_OF_TRANSMIT),
    }
}
