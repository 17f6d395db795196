//! One inbound frame at a time: decode, reduce, publish.

use skribbl_protocol::{Envelope, Inbound, decode_update, update_name};

use crate::{EventPublisher, RoomError, RoomEvent, RoomState};

/// Owns the [`RoomState`] and the [`EventPublisher`] for one connection.
///
/// Frames must be fed in arrival order. The first fatal error halts the
/// mirror; state applied before it is kept.
#[derive(Debug, Default)]
pub struct RoomMirror {
    state: RoomState,
    publisher: EventPublisher,
    halted: bool,
}

impl RoomMirror {
    /// A mirror waiting for the room information message.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored state, as of the last handled frame.
    pub fn state(&self) -> &RoomState {
        &self.state
    }

    /// Subscriptions for the events this mirror publishes.
    pub fn events(&mut self) -> &mut EventPublisher {
        &mut self.publisher
    }

    /// `true` after a fatal error. Every later frame is refused.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Handles a transport frame.
    ///
    /// Returns the published event, `Ok(None)` for messages that change
    /// nothing observable.
    pub fn handle(&mut self, frame: Inbound) -> Result<Option<RoomEvent>, RoomError> {
        if self.halted {
            return Err(RoomError::Halted);
        }
        match frame {
            Inbound::Data(envelope) => self.handle_envelope(envelope),
            Inbound::JoinError(reason) => {
                self.halted = true;
                tracing::warn!(reason, "join rejected");
                Err(RoomError::JoinFailed { reason })
            }
        }
    }

    /// Handles a bare `{ id, data }` message.
    pub fn handle_envelope(&mut self, envelope: Envelope) -> Result<Option<RoomEvent>, RoomError> {
        if self.halted {
            return Err(RoomError::Halted);
        }
        let opcode = envelope.id;
        let update = match decode_update(envelope) {
            Ok(update) => update,
            Err(err) => {
                self.halted = true;
                tracing::warn!(opcode, error = %err, "protocol mismatch, halting");
                return Err(err.into());
            }
        };
        tracing::debug!(opcode, name = update_name(opcode).unwrap_or("?"), "update");

        let event = self.state.reduce(update);
        if let Some(event) = &event {
            let delivered = self.publisher.publish(event, &self.state);
            tracing::trace!(kind = ?event.kind(), delivered, "event published");
        }
        Ok(event)
    }
}
