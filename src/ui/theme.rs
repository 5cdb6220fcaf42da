use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub selection_bg: Color,
    pub heat_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Rgb(103, 232, 249),
            gauge_unfilled: Color::DarkGray,
            selection_bg: Color::Rgb(51, 65, 85),
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_ok: Color::Rgb(0, 128, 0),
            status_err: Color::Rgb(200, 0, 0),
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Gray,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(235, 235, 235),
            gauge_filled: Color::Rgb(37, 99, 235),
            gauge_unfilled: Color::Rgb(220, 220, 220),
            selection_bg: Color::Rgb(191, 219, 254),
            heat_colors: [
                Color::Rgb(21, 128, 61),
                Color::Rgb(194, 65, 12),
                Color::Rgb(185, 28, 28),
            ],
        }
    }

    /// Color for a usage percentage: calm below 50, warning below 80.
    pub fn heat(&self, percent: f32) -> Color {
        if percent < 50.0 {
            self.heat_colors[0]
        } else if percent < 80.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[2]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_config("solarized").name, "dark");
        assert_eq!(Theme::from_config("LIGHT").name, "light");
    }

    #[test]
    fn heat_bands() {
        let theme = Theme::dark();
        assert_eq!(theme.heat(10.0), theme.heat_colors[0]);
        assert_eq!(theme.heat(65.0), theme.heat_colors[1]);
        assert_eq!(theme.heat(100.0), theme.heat_colors[2]);
    }
}
