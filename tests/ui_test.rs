//! UI rendering tests
//!
//! Draws the full screen into a `TestBackend` and checks what ends up in
//! the buffer for each search state.

use ratatui::{backend::TestBackend, Terminal};

use cinefav::app::{App, InputMode};
use cinefav::ui::view::{EMPTY_FAVORITES_TEXT, EMPTY_RESULTS_TEXT, LOADING_TEXT, POPULAR_HEADING};
use cinefav::ui::{Render, TerminalRenderer};
use cinefav::Movie;

fn renderer(width: u16, height: u16) -> TerminalRenderer<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TerminalRenderer::new(terminal)
}

/// Whole buffer as text, one line per row
fn screen_text(renderer: &TerminalRenderer<TestBackend>) -> String {
    let buffer = renderer.terminal().backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::new("tt0113277", "Heat", "1995", "https://img.example/heat.jpg"),
        Movie::new("tt0090605", "Aliens", "1986", "N/A"),
        Movie::new("tt0088247", "The Terminator", "1984", "https://img.example/t.jpg"),
    ]
}

fn loaded_app(query: &str, movies: Vec<Movie>) -> App {
    let mut app = App::new();
    let generation = app.begin_fetch(query);
    app.finish_fetch(generation, Ok(movies));
    app
}

// =============================================================================
// States
// =============================================================================

#[test]
fn test_loading_state_render() {
    let mut app = App::new();
    app.begin_fetch("");

    let mut r = renderer(80, 24);
    r.render(&app);
    let text = screen_text(&r);

    assert!(text.contains(POPULAR_HEADING));
    assert!(text.contains(LOADING_TEXT));
    assert!(text.contains(EMPTY_FAVORITES_TEXT));
}

#[test]
fn test_success_state_render() {
    let app = loaded_app("", sample_movies());

    let mut r = renderer(80, 24);
    r.render(&app);
    let text = screen_text(&r);

    assert!(text.contains(POPULAR_HEADING));
    assert!(text.contains("Heat (1995)"));
    assert!(text.contains("Aliens (1986) [no image]"));
    assert!(text.contains("The Terminator"));
    assert!(text.contains("RESULTS (3)"));
    assert!(!text.contains(LOADING_TEXT));
}

#[test]
fn test_search_heading_render() {
    let app = loaded_app("heat", sample_movies());

    let mut r = renderer(80, 24);
    r.render(&app);

    assert!(screen_text(&r).contains("Results for: \"heat\""));
}

#[test]
fn test_empty_state_render() {
    let app = loaded_app("zzqqxx", Vec::new());

    let mut r = renderer(80, 24);
    r.render(&app);
    let text = screen_text(&r);

    assert!(text.contains(EMPTY_RESULTS_TEXT));
    assert!(text.contains("Results for: \"zzqqxx\""));
}

#[test]
fn test_error_state_render() {
    let mut app = App::new();
    let generation = app.begin_fetch("heat");
    app.finish_fetch(generation, Err("HTTP error! Status: 503".into()));

    let mut r = renderer(100, 24);
    r.render(&app);

    assert!(screen_text(&r).contains("Error: HTTP error! Status: 503"));
}

#[test]
fn test_favorites_panel_render() {
    let mut app = loaded_app("", sample_movies());
    app.set_favorites(vec![sample_movies()[2].clone()]);

    let mut r = renderer(100, 24);
    r.render(&app);
    let text = screen_text(&r);

    assert!(text.contains("FAVORITES (1)"));
    assert!(!text.contains(EMPTY_FAVORITES_TEXT));
    // Once in results, once in favorites
    assert_eq!(text.matches("The Terminator").count(), 2);
}

#[test]
fn test_search_box_shows_typed_query() {
    let mut app = App::new();
    app.input_mode = InputMode::Editing;
    for c in "blade".chars() {
        app.input.insert(c);
    }

    let mut r = renderer(80, 24);
    r.render(&app);
    let text = screen_text(&r);

    assert!(text.contains("blade"));
    assert!(text.contains("INSERT"));
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_layout_renders_at_min_and_large_sizes() {
    let app = loaded_app("", sample_movies());
    for (w, h) in [(80, 24), (200, 50)] {
        let mut r = renderer(w, h);
        r.render(&app);
        let text = screen_text(&r);
        assert!(text.contains("SEARCH"), "{}x{}", w, h);
        assert!(text.contains("Heat"), "{}x{}", w, h);
    }
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let app = loaded_app("", sample_movies());
    let mut r = renderer(10, 4);
    r.render(&app);
}
