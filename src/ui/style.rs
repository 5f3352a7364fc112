//! Custom styles for the search widget and the editor.

use super::theme::SearchTheme;
use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Vector};

/// Style for the main container.
pub fn main_container(theme: &SearchTheme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.background)),
        text_color: Some(theme.text),
        ..Default::default()
    }
}

/// Style for a card holding a form or a list.
pub fn card(theme: &SearchTheme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.surface)),
        border: Border {
            color: theme.border,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Style for the search input and the editor's text fields.
pub fn search_input(theme: &SearchTheme, focused: bool) -> text_input::Style {
    let border_color = if focused {
        SearchTheme::with_alpha(theme.accent, 0.8)
    } else {
        theme.border
    };

    text_input::Style {
        background: Background::Color(theme.surface),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: 4.0.into(),
        },
        icon: theme.subtext,
        placeholder: theme.subtext,
        value: theme.text,
        selection: SearchTheme::with_alpha(theme.accent, 0.3),
    }
}

/// Style for the dropdown under the input.
pub fn dropdown(theme: &SearchTheme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.surface)),
        border: Border {
            color: theme.border,
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.0, 2.0),
            blur_radius: 6.0,
        },
        ..Default::default()
    }
}

/// Style for a dropdown row.
pub fn result_row(theme: &SearchTheme, selected: bool) -> container::Style {
    container::Style {
        background: selected.then_some(Background::Color(theme.selection)),
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Style for the clear button inside the input.
pub fn clear_button(theme: &SearchTheme, status: button::Status) -> button::Style {
    let color = match status {
        button::Status::Hovered | button::Status::Pressed => theme.text,
        _ => theme.subtext,
    };

    button::Style {
        background: None,
        text_color: color,
        ..Default::default()
    }
}

/// Style for primary action buttons.
pub fn action_button(theme: &SearchTheme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Disabled => SearchTheme::with_alpha(theme.accent, 0.3),
        button::Status::Hovered | button::Status::Pressed => {
            SearchTheme::with_alpha(theme.accent, 0.85)
        }
        button::Status::Active => theme.accent,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
