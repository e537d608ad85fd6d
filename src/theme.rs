use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so widgets never
// hard-code a palette.

pub const DESKTOP_RGB: (u8, u8, u8) = (0, 128, 128);
pub const TITLE_ACTIVE_RGB: (u8, u8, u8) = (0, 0, 128);
pub const CHROME_RGB: (u8, u8, u8) = (192, 192, 192);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

// Desktop
pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn icon_fg() -> Color {
    Color::White
}
pub fn icon_selected_bg() -> Color {
    rgb_to_color(TITLE_ACTIVE_RGB)
}

// Window chrome
pub fn window_bg() -> Color {
    rgb_to_color(CHROME_RGB)
}
pub fn window_fg() -> Color {
    Color::Black
}
pub fn window_border_fg() -> Color {
    Color::White
}
pub fn title_active_bg() -> Color {
    rgb_to_color(TITLE_ACTIVE_RGB)
}
pub fn title_active_fg() -> Color {
    Color::White
}
pub fn title_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn title_inactive_fg() -> Color {
    rgb_to_color(CHROME_RGB)
}
pub fn link_fg() -> Color {
    Color::Blue
}
pub fn error_fg() -> Color {
    Color::Red
}
pub fn input_bg() -> Color {
    Color::White
}
pub fn input_focused_bg() -> Color {
    Color::LightYellow
}

// Taskbar
pub fn panel_bg() -> Color {
    rgb_to_color(CHROME_RGB)
}
pub fn panel_fg() -> Color {
    Color::Black
}
pub fn panel_active_bg() -> Color {
    Color::Gray
}
pub fn panel_active_fg() -> Color {
    Color::Black
}

// Menu
pub fn menu_bg() -> Color {
    rgb_to_color(CHROME_RGB)
}
pub fn menu_fg() -> Color {
    Color::Black
}
pub fn menu_selected_bg() -> Color {
    rgb_to_color(TITLE_ACTIVE_RGB)
}
pub fn menu_selected_fg() -> Color {
    Color::White
}
pub fn menu_disabled_fg() -> Color {
    Color::DarkGray
}

// Dialog / shutdown
pub fn dialog_bg() -> Color {
    rgb_to_color(CHROME_RGB)
}
pub fn dialog_fg() -> Color {
    Color::Black
}
pub fn shutdown_bg() -> Color {
    Color::Black
}
pub fn shutdown_fg() -> Color {
    Color::Rgb(255, 165, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_and_inactive_titles_differ() {
        assert_ne!(title_active_bg(), title_inactive_bg());
        assert_eq!(desktop_bg(), Color::Rgb(0, 128, 128));
    }
}
