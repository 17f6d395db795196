//! Drawing through a room.

use skribbl_protocol::{Action, Color, Stroke, fill, line, packets, polygon, rectangle};
use skribbl_transport::Connection;

use crate::{Room, SkribblError};

/// Borrowed drawing handle; see [`Room::canvas`].
///
/// Only the current drawer's strokes are accepted by the server.
pub struct Canvas<'a, C: Connection> {
    room: &'a Room<C>,
}

impl<'a, C: Connection> Canvas<'a, C> {
    pub(crate) fn new(room: &'a Room<C>) -> Self {
        Self { room }
    }

    /// Sends strokes in as many draw messages as needed. Returns the number
    /// of messages.
    pub async fn draw(&self, strokes: &[Stroke]) -> Result<usize, SkribblError> {
        let mut sent = 0;
        for packet in packets(strokes) {
            self.room.send(Action::Draw(packet.to_vec())).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Draws one straight line.
    pub async fn line(
        &self,
        color: Color,
        thickness: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<(), SkribblError> {
        self.draw(&[line(color, thickness, x1, y1, x2, y2)]).await?;
        Ok(())
    }

    /// Draws the outline of an axis-aligned rectangle.
    pub async fn rectangle(
        &self,
        color: Color,
        thickness: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    ) -> Result<(), SkribblError> {
        self.draw(&rectangle(color, thickness, x1, y1, x2, y2)).await?;
        Ok(())
    }

    /// Draws a regular polygon outline and returns how many draw messages
    /// were sent.
    pub async fn polygon(
        &self,
        color: Color,
        thickness: i32,
        center_x: i32,
        center_y: i32,
        radius: i32,
        sides: u32,
    ) -> Result<usize, SkribblError> {
        self.draw(&polygon(color, thickness, center_x, center_y, radius, sides))
            .await
    }

    /// Flood fills from `(x, y)`.
    pub async fn fill(&self, color: Color, x: i32, y: i32) -> Result<(), SkribblError> {
        self.draw(&[fill(color, x, y)]).await?;
        Ok(())
    }

    /// Clears the whole canvas.
    pub async fn clear(&self) -> Result<(), SkribblError> {
        self.room.send(Action::ClearCanvas).await
    }

    /// Rolls the canvas back to `stroke_index`.
    pub async fn undo(&self, stroke_index: u32) -> Result<(), SkribblError> {
        self.room.send(Action::Undo(stroke_index)).await
    }
}
