//! Terminal front end for the tableau solver.

pub mod app;
pub mod components;
pub mod layout;
pub mod panels;

use std::{
    io::{stdout, Stdout},
    time::Duration,
};

use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::time::sleep;

use crate::{error::Result, state::Location};

/// Run the interactive workspace until the user quits. Returns the final
/// shareable location.
pub async fn run(mut app: App) -> Result<Location> {
    enable_raw_mode()?;
    stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    stdout()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;

    result.map(|()| app.take_location())
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    while !app.should_exit {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            Some(Ok(event)) = event_stream.next() => {
                app.handle_event(&event);
            }
            () = sleep(Duration::from_millis(50)) => {}
        }

        if app.has_pending_submission() {
            // Show the queued state before the engine blocks.
            terminal.draw(|frame| app.render(frame))?;
            tokio::task::block_in_place(|| app.update());
        }
    }
    Ok(())
}
