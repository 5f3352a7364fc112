//! Color themes for the search widget and the tax year editor.

use iced::Color;

/// A color theme.
#[derive(Debug, Clone)]
pub struct SearchTheme {
    pub name: &'static str,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub subtext: Color,
    pub accent: Color,
    pub border: Color,
    pub selection: Color,
    pub error: Color,
}

impl SearchTheme {
    /// `#rrggbb` to a color. Anything else is mid grey.
    fn from_hex(hex: &str) -> Color {
        let rgb = hex
            .strip_prefix('#')
            .filter(|digits| digits.len() == 6)
            .and_then(|digits| u32::from_str_radix(digits, 16).ok());

        match rgb {
            Some(rgb) => Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
            None => Color::from_rgb(0.5, 0.5, 0.5),
        }
    }

    /// `color` with its alpha replaced.
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        Color { a: alpha, ..color }
    }

    /// Get theme by name.
    pub fn by_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "nord" => Self::nord(),
            _ => Self::light(), // Default
        }
    }

    /// Light theme (default), Material indigo accents.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Self::from_hex("#fafafa"),
            surface: Self::from_hex("#ffffff"),
            text: Self::from_hex("#212121"),
            subtext: Self::from_hex("#757575"),
            accent: Self::from_hex("#3f51b5"),
            border: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
            selection: Self::from_hex("#e8eaf6"),
            error: Self::from_hex("#d32f2f"),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Self::from_hex("#1e1e2e"),
            surface: Self::from_hex("#313244"),
            text: Self::from_hex("#cdd6f4"),
            subtext: Self::from_hex("#6c7086"),
            accent: Self::from_hex("#cba6f7"),
            border: Color::from_rgba(1.0, 1.0, 1.0, 0.1),
            selection: Self::from_hex("#45475a"),
            error: Self::from_hex("#f38ba8"),
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        Self {
            name: "nord",
            background: Self::from_hex("#2e3440"),
            surface: Self::from_hex("#3b4252"),
            text: Self::from_hex("#eceff4"),
            subtext: Self::from_hex("#4c566a"),
            accent: Self::from_hex("#88c0d0"),
            border: Color::from_rgba(1.0, 1.0, 1.0, 0.1),
            selection: Self::from_hex("#434c5e"),
            error: Self::from_hex("#bf616a"),
        }
    }
}

impl Default for SearchTheme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = SearchTheme::from_hex("#ff0000");
        assert_eq!(color, Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(SearchTheme::from_hex("bad"), Color::from_rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_from_hex_rejects_non_ascii() {
        let grey = Color::from_rgb(0.5, 0.5, 0.5);
        assert_eq!(SearchTheme::from_hex("#ééé"), grey);
        assert_eq!(SearchTheme::from_hex("#€€"), grey);
        assert_eq!(SearchTheme::from_hex("ff0000"), grey);
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let accent = SearchTheme::light().accent;
        let faded = SearchTheme::with_alpha(accent, 0.3);
        assert_eq!((faded.r, faded.g, faded.b, faded.a), (accent.r, accent.g, accent.b, 0.3));
    }

    #[test]
    fn test_unknown_theme_is_light() {
        assert_eq!(SearchTheme::by_name("dark").name, "dark");
        assert_eq!(SearchTheme::by_name("solarized").name, "light");
    }
}
