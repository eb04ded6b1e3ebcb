//! Single-line text entry backed by `tui-input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::Paragraph,
};
use tui_input::{Input, InputRequest};

/// Translate a key press into an edit request for a text field.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(InputRequest::InsertChar(c))
        }
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

/// Apply `key` to `input`. Returns true when the value changed.
pub fn edit(input: &mut Input, key: KeyEvent) -> bool {
    input_request(key)
        .and_then(|req| input.handle(req))
        .is_some_and(|changed| changed.value)
}

/// Render `input` into a one-line `area`, placing the terminal cursor
/// when `focused`.
pub fn render(frame: &mut Frame, area: Rect, input: &Input, style: Style, focused: bool) {
    let width = usize::from(area.width.max(1));
    let scroll = input.visual_scroll(width);
    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(input.value()).style(style).scroll((0, offset)),
        area,
    );

    if focused && area.width > 0 {
        let column = input.visual_cursor().saturating_sub(scroll);
        let x = area
            .x
            .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace_change_the_value() {
        let mut input = Input::new("SW".into());
        assert!(edit(&mut input, key(KeyCode::Char('1'))));
        assert_eq!(input.value(), "SW1");
        assert!(edit(&mut input, key(KeyCode::Backspace)));
        assert_eq!(input.value(), "SW");
    }

    #[test]
    fn cursor_moves_do_not_count_as_changes() {
        let mut input = Input::new("abc".into());
        assert!(!edit(&mut input, key(KeyCode::Left)));
        assert!(!edit(&mut input, key(KeyCode::Home)));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn control_chords_are_not_inserted() {
        let mut input = Input::new("abc".into());
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(input_request(ctrl_s).is_none());
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(edit(&mut input, ctrl_u));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn shifted_characters_are_inserted() {
        let mut input = Input::default();
        let upper = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert!(edit(&mut input, upper));
        assert_eq!(input.value(), "G");
    }
}
