//! A bot that repeats other players' guesses and scribbles a few shapes
//! when it is its turn to draw.
//!
//! Frames are exchanged as JSON lines on stdin/stdout, so the bot can be
//! wired to a socket bridge or fed a recorded session:
//!
//! ```text
//! echo-bot [name] [room-code] < session.jsonl
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to adjust (default `info`).

use skribbl::prelude::*;
use skribbl::transport::JsonLinesConnection;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SkribblError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "echo-bot".to_string());
    let options = match args.next() {
        Some(code) => RoomOptions::new(name).join_room(code),
        None => RoomOptions::new(name).create_room(),
    };

    let conn = JsonLinesConnection::new(tokio::io::stdin(), tokio::io::stdout());
    let mut room = Room::connect(conn, options).await?;

    while let Some(event) = room.next_event().await? {
        match event {
            RoomEvent::Join(info) => {
                tracing::info!(
                    link = %format!("https://skribbl.io/?{}", info.room_id),
                    users = info.users.len(),
                    "joined room"
                );
            }
            RoomEvent::Guess { author, text } => {
                if Some(author.id()) != room.state().self_id() {
                    room.guess(format!("{} guessed: {text}", author.name())).await?;
                }
            }
            RoomEvent::WordChoices {
                drawer,
                words: Some(words),
            } if Some(drawer.id()) == room.state().self_id() => {
                tracing::info!(word = ?words.first(), "choosing a word");
                room.choose_word(0).await?;
                scribble(&room).await?;
            }
            RoomEvent::EndRound { word, .. } => tracing::info!(%word, "round over"),
            _ => {}
        }
    }

    room.disconnect().await
}

async fn scribble<C: Connection>(room: &Room<C>) -> Result<(), SkribblError> {
    let canvas = room.canvas();
    canvas.rectangle(Color::Black, 4, 32, 64, 128, 192).await?;
    canvas.polygon(Color::Black, 4, 220, 128, 64, 32).await?;
    canvas.fill(Color::Yellow, 220, 128).await?;
    for (i, color) in skribbl::protocol::PALETTE.iter().enumerate() {
        let x = 32 + 16 * i as i32;
        canvas.line(*color, 16, x, 208, x, 320).await?;
    }
    Ok(())
}
