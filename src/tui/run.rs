use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::ChatApp;
use super::render::draw_ui;
use crate::interpreter::Interpreter;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run a chat session in the terminal until the user leaves.
pub fn run_tui(interp: &mut Interpreter) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, interp);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    interp.finish();
    result
}

fn event_loop(terminal: &mut Term, interp: &mut Interpreter) -> io::Result<()> {
    terminal.clear()?;

    let mut app = ChatApp::new(interp.greeting());

    loop {
        let status = format!(
            "{} | {} tasks",
            interp.storage().path().display(),
            interp.tasks().len()
        );
        terminal.draw(|f| draw_ui(f, &app, &status))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(line) = app.handle_key(key.code, key.modifiers) {
                        let response = interp.handle(&line);
                        app.push_reply(&response.message);
                        if response.exit {
                            app.finish();
                        }
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.handle_mouse_scroll(true),
                    MouseEventKind::ScrollDown => app.handle_mouse_scroll(false),
                    _ => {}
                },
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
