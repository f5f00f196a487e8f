use std::collections::HashMap;

use crossterm::event::KeyCode;
use kitchen_core::controller::Intent;
use kitchen_core::prelude::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAction {
    Intent(Intent),
    Quit,
}

#[derive(Debug, Resource)]
pub struct KeyMap {
    keys: HashMap<KeyCode, KeyAction>,
}

impl KeyMap {
    pub fn action_for(&self, code: KeyCode) -> Option<KeyAction> {
        let code = match code {
            KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
            code => code,
        };
        self.keys.get(&code).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let moves = [
            ('w', Compass::North),
            ('k', Compass::North),
            ('a', Compass::West),
            ('h', Compass::West),
            ('s', Compass::South),
            ('j', Compass::South),
            ('d', Compass::East),
            ('l', Compass::East),
        ]
        .into_iter()
        .map(|(ch, dir)| (KeyCode::Char(ch), Intent::QueueMove(dir)));
        let arrows = [
            (KeyCode::Up, Compass::North),
            (KeyCode::Left, Compass::West),
            (KeyCode::Down, Compass::South),
            (KeyCode::Right, Compass::East),
        ]
        .into_iter()
        .map(|(code, dir)| (code, Intent::QueueMove(dir)));
        let controls = [
            (KeyCode::Tab, Intent::SwitchFocus),
            (KeyCode::Char('f'), Intent::SwitchFocus),
            (KeyCode::Backspace, Intent::Retract),
            (KeyCode::Char('u'), Intent::Retract),
            (KeyCode::Char(' '), Intent::Commit),
            (KeyCode::Char('c'), Intent::Commit),
        ];

        let keys = moves
            .chain(arrows)
            .chain(controls)
            .map(|(code, intent)| (code, KeyAction::Intent(intent)))
            .chain([
                (KeyCode::Char('q'), KeyAction::Quit),
                (KeyCode::Esc, KeyAction::Quit),
            ])
            .collect();
        KeyMap { keys }
    }
}
