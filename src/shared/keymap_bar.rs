//! Keymap help bar UI component.

use crate::app::Mode;
use crate::shared::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Key hints for a mode.
pub fn keymap_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Dialog => "Enter/Esc:close",
        Mode::Help => "jk/↑↓:nav | Enter:open | Esc/q:close",
        Mode::Chart => "s:save PNG | y:copy data | c:palette | q/Esc:close",
        Mode::Editing => "Type to edit | Backspace:delete | Enter/Esc:done",
        Mode::FileBrowser => "jk/↑↓:nav | Enter/l:select | h:parent | .:hidden | Esc:back | q:quit",
        Mode::Form => {
            "1-4/Tab:plot | jk/↑↓:field | Enter/i:edit | d/F5:draw | o:open | T:theme | ?:help | q:quit"
        },
    }
}

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, mode: Mode, colors: &ThemeColors) {
    let paragraph =
        Paragraph::new(keymap_text(mode)).style(Style::default().fg(colors.fg0).bg(colors.bg0));

    f.render_widget(paragraph, area);
}
