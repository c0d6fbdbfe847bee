//! Full-screen layout
//!
//! Search box on top, heading and status below it, results and favorites
//! side by side, key hints at the bottom.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Focus, InputMode};
use crate::ui::view::{Card, View};
use crate::ui::Theme;

/// Draw the whole interface for `app`
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let view = View::new(&app.search, &app.favorites);

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(1), // Heading
            Constraint::Min(3),    // Grids
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_box(frame, chunks[0], app);
    draw_heading(frame, chunks[1], &view);

    let grids = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_results(frame, grids[0], app, &view);
    draw_favorites(frame, grids[1], app, &view);
    draw_status_bar(frame, chunks[3], app);
}

fn draw_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let text = if editing {
        let (before, after) = app.input.split();
        format!("⌕ {}│{}", before, after)
    } else if app.input.is_empty() {
        "⌕ Press / to search movies...".to_string()
    } else {
        format!("⌕ {}", app.input.text())
    };

    let search_box = Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if editing {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}

fn draw_heading(frame: &mut Frame, area: Rect, view: &View) {
    let mut spans = vec![Span::styled(format!(" {}", view.heading), Theme::title())];
    if let Some(status) = &view.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.clone(),
            if view.is_error {
                Theme::error()
            } else {
                Theme::loading()
            },
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()))
}

fn card_item(card: &Card) -> ListItem<'static> {
    let marker = if card.is_favorite { "★ " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, Theme::favorite()),
        Span::styled(card.title.clone(), Theme::text()),
    ];
    if !card.year.is_empty() {
        spans.push(Span::styled(format!(" ({})", card.year), Theme::year()));
    }
    if !card.has_poster {
        spans.push(Span::styled(" [no image]", Theme::dimmed()));
    }
    ListItem::new(Line::from(spans))
}

fn draw_cards(
    frame: &mut Frame,
    area: Rect,
    cards: &[Card],
    selected: Option<usize>,
    focused: bool,
) {
    let items: Vec<ListItem> = cards.iter().map(card_item).collect();
    let list = List::new(items)
        .highlight_style(if focused {
            Theme::highlighted()
        } else {
            Theme::text()
        })
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App, view: &View) {
    let focused = app.focus == Focus::Results && app.input_mode == InputMode::Normal;
    let block = panel(format!(" RESULTS ({}) ", view.results.len()), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(status) = &view.status {
        let style = if view.is_error {
            Theme::error()
        } else if app.search.is_loading() {
            Theme::loading()
        } else {
            Theme::dimmed()
        };
        let message = Paragraph::new(status.clone())
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    draw_cards(frame, inner, &view.results, app.results_selection.index(), focused);
}

fn draw_favorites(frame: &mut Frame, area: Rect, app: &App, view: &View) {
    let focused = app.focus == Focus::Favorites && app.input_mode == InputMode::Normal;
    let block = panel(format!(" ★ FAVORITES ({}) ", view.favorites.len()), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(message) = view.favorites_message {
        let empty = Paragraph::new(message)
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    draw_cards(
        frame,
        inner,
        &view.favorites,
        app.favorites_selection.index(),
        focused,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", Theme::highlighted()),
        InputMode::Editing => Span::styled(" INSERT ", Theme::favorite()),
    };

    let hints = match app.input_mode {
        InputMode::Normal => " /:search  f:favorite  tab:switch  r:reload  q:quit ",
        InputMode::Editing => " enter:search now  esc:done ",
    };

    let line = Line::from(vec![
        mode,
        Span::styled(format!(" {} ", app.search.status()), Theme::dimmed()),
        Span::raw("│"),
        Span::styled(hints, Theme::keybind()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
