use std::io::{stdout, Write};
use std::panic;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Mutex;
use std::time::Duration;

use bevy::app::AppExit;
use bevy::prelude::*;
use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use crossterm::{cursor, execute, queue, terminal};
use kitchen_core::controller::Intent;
use kitchen_core::store::{KitchenChanged, KitchenStore};
use kitchen_core::KitchenCoreSet;

use crate::key_map::{KeyAction, KeyMap};
use crate::render::render_lines;

#[derive(Debug)]
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerminalWindow>()
            .init_resource::<TermEventListener>()
            .init_resource::<KeyMap>()
            .add_systems(Startup, sys_render_initial)
            .add_systems(
                Update,
                (
                    sys_term_keys.before(KitchenCoreSet::ProcessIntents),
                    sys_render_changes.after(KitchenCoreSet::Animate),
                ),
            );
    }
}

/// Holds the terminal in raw mode on the alternate screen until dropped.
#[derive(Debug, Resource)]
struct TerminalWindow;

impl TerminalWindow {
    fn new() -> std::io::Result<TerminalWindow> {
        Self::reset_terminal_on_panic();
        execute!(
            stdout(),
            cursor::Hide,
            terminal::EnterAlternateScreen,
            terminal::SetTitle("Slow Cooker")
        )?;
        terminal::enable_raw_mode()?;
        Ok(TerminalWindow)
    }

    fn reset_terminal_state() -> std::io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
        Ok(())
    }

    fn reset_terminal_on_panic() {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            log::error!(
                "Panic occurred\n{:#?}\n\nAttempting to reset terminal",
                panic_info
            );
            if let Err(e) = Self::reset_terminal_state() {
                log::error!("Failure resetting terminal: {:#?}", e)
            }
            default_hook(panic_info)
        }))
    }

    fn draw(&self, lines: &[String]) -> std::io::Result<()> {
        let mut out = stdout();
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            write!(out, "{line}")?;
        }
        out.flush()
    }
}

impl FromWorld for TerminalWindow {
    fn from_world(_world: &mut World) -> Self {
        match TerminalWindow::new() {
            Ok(window) => window,
            Err(e) => {
                log::error!("Could not prepare terminal: {:?}", e);
                TerminalWindow
            },
        }
    }
}

impl Drop for TerminalWindow {
    fn drop(&mut self) {
        match Self::reset_terminal_state() {
            Ok(()) => log::info!("Successfully reset terminal from Drop"),
            Err(e) => log::error!("Failure resetting terminal from Drop: {:#?}", e),
        }
    }
}

/// Key presses read on a background thread, since crossterm blocks.
#[derive(Deref, Resource)]
struct TermEventListener {
    rx: Mutex<Receiver<KeyEvent>>,
}

impl std::fmt::Debug for TermEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermEventListener").finish_non_exhaustive()
    }
}

impl Default for TermEventListener {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let duration = Duration::from_millis(100);
            loop {
                match crossterm::event::poll(duration) {
                    Ok(false) => {},
                    Ok(true) => match crossterm::event::read() {
                        Ok(CrosstermEvent::Key(key_event)) => {
                            if tx.send(key_event).is_err() {
                                // Other end is dead, close this thread
                                break;
                            }
                        },
                        Ok(_) => {},
                        Err(e) => {
                            log::error!("Error occurred reading crossterm events {:?}", e);
                            break;
                        },
                    },
                    Err(e) => {
                        log::error!(
                            "Error occurred in crossterm listening thread while polling: {:?}",
                            e
                        );
                        break;
                    },
                }
            }
        });
        TermEventListener { rx: Mutex::new(rx) }
    }
}

fn sys_term_keys(
    term_listener: Res<TermEventListener>,
    key_map: Res<KeyMap>,
    mut evw_intent: EventWriter<Intent>,
    mut evw_exit: EventWriter<AppExit>,
) {
    let Ok(rx) = term_listener.try_lock() else {
        return;
    };
    loop {
        match rx.try_recv() {
            Ok(KeyEvent { code, .. }) => match key_map.action_for(code) {
                Some(KeyAction::Intent(intent)) => {
                    evw_intent.send(intent);
                },
                Some(KeyAction::Quit) => {
                    evw_exit.send(AppExit::Success);
                },
                None => {},
            },
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                log::error!("Thread sending input events unexpectedly closed");
                evw_exit.send(AppExit::Success);
                break;
            },
        }
    }
}

fn sys_render_initial(window: Res<TerminalWindow>, store: Res<KitchenStore>) {
    if let Err(e) = window.draw(&render_lines(store.state())) {
        log::error!("Error rendering kitchen: {:?}", e);
    }
}

fn sys_render_changes(window: Res<TerminalWindow>, mut evr_changed: EventReader<KitchenChanged>) {
    let Some(changed) = evr_changed.read().last() else {
        return;
    };
    if let Err(e) = window.draw(&render_lines(changed.state())) {
        log::error!("Error rendering kitchen: {:?}", e);
    }
}
