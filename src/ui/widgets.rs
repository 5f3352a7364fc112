//! iced rendering of a [`SearchView`].

use super::style;
use super::theme::SearchTheme;
use crate::core::view::{Adornment, ResultRow, RowContent, SearchView};

use iced::font::Weight;
use iced::widget::{button, column, container, mouse_area, row, text, text_input, Column};
use iced::{mouse, Alignment, Element, Font, Length};

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// Messages the search box emits, and the input it draws into.
pub struct SearchMapper<'a, Message> {
    pub input_id: text_input::Id,
    pub on_input: Box<dyn Fn(String) -> Message + 'a>,
    pub on_submit: Message,
    pub on_clear: Message,
    /// Called with the row's position in the visible list.
    pub on_row: Box<dyn Fn(usize) -> Message + 'a>,
}

/// Draw the search input, its adornment and the dropdown.
pub fn search_box<'a, Message: Clone + 'a>(
    view: SearchView<Element<'a, Message>>,
    theme: &SearchTheme,
    mapper: SearchMapper<'a, Message>,
) -> Element<'a, Message> {
    let SearchMapper {
        input_id,
        on_input,
        on_submit,
        on_clear,
        on_row,
    } = mapper;

    let input_theme = theme.clone();
    let input = text_input(&view.placeholder, &view.query)
        .id(input_id)
        .on_input(on_input)
        .on_submit(on_submit)
        .padding(10)
        .size(16)
        .style(move |_, status| {
            style::search_input(&input_theme, status == text_input::Status::Focused)
        });

    let adornment: Option<Element<'a, Message>> = match view.adornment {
        Adornment::Spinner => Some(text("…").size(16).color(theme.subtext).into()),
        Adornment::ClearButton => {
            let clear_theme = theme.clone();
            Some(
                button(text("×").size(18))
                    .on_press(on_clear)
                    .padding([0, 8])
                    .style(move |_, status| style::clear_button(&clear_theme, status))
                    .into(),
            )
        }
        Adornment::Hidden => None,
    };

    let input_row = match adornment {
        Some(adornment) => row![input, adornment]
            .spacing(4)
            .align_y(Alignment::Center)
            .into(),
        None => Element::from(input),
    };

    let Some(rows) = view.dropdown else {
        return input_row;
    };

    let rows: Vec<Element<'a, Message>> = rows
        .into_iter()
        .map(|result| {
            let message = on_row(result.index);
            dropdown_row(result, theme, message)
        })
        .collect();

    let dropdown_theme = theme.clone();
    let dropdown = container(Column::with_children(rows).spacing(2))
        .padding(4)
        .width(Length::Fill)
        .style(move |_| style::dropdown(&dropdown_theme));

    column![input_row, dropdown].spacing(4).into()
}

fn dropdown_row<'a, Message: Clone + 'a>(
    result: ResultRow<Element<'a, Message>>,
    theme: &SearchTheme,
    on_press: Message,
) -> Element<'a, Message> {
    let selected = result.selected;

    let content: Element<'a, Message> = match result.content {
        RowContent::Text { text: label, ghost } => {
            let font = if selected { BOLD } else { Font::DEFAULT };
            // Zero-height bold copy keeps the row width fixed when bolded
            let ghost = container(text(ghost).font(BOLD))
                .height(Length::Fixed(0.0))
                .clip(true);
            column![text(label).font(font).color(theme.text), ghost].into()
        }
        RowContent::Rich(rich) => rich,
    };

    let row_theme = theme.clone();
    let body = container(content)
        .padding([6, 10])
        .width(Length::Fill)
        .style(move |_| style::result_row(&row_theme, selected));

    mouse_area(body)
        .on_press(on_press)
        .interaction(mouse::Interaction::Pointer)
        .into()
}
