//! Rendering tests for the journal screen.
//!
//! Uses ratatui's `TestBackend` to verify drawing without a real terminal.

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use terminal_journal::prompts::PROMPTS;
use terminal_journal::session::Session;
use terminal_journal::ui::{self, ViewState};
use tui_textarea::TextArea;

fn buffer_to_string(buf: &Buffer) -> String {
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

fn render(session: &Session, editor: &TextArea<'_>, quit_overlay: Option<Vec<String>>) -> String {
    let backend = TestBackend::new(120, 32);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal
        .draw(|f| {
            let view = ViewState {
                session,
                editor,
                status: "status line".to_string(),
                quit_overlay,
                anim_frame: 1,
            };
            ui::draw(f, &view);
        })
        .expect("draw");
    buffer_to_string(terminal.backend().buffer())
}

fn test_editor() -> TextArea<'static> {
    let mut editor = TextArea::default();
    ui::configure_editor(&mut editor);
    editor
}

#[test]
fn journal_screen_shows_banner_hint_and_status() {
    let session = Session::new();
    let editor = test_editor();
    let content = render(&session, &editor, None);

    assert!(content.contains("Prompt"), "prompt pane title missing");
    assert!(
        content.contains("Press Ctrl+G to receive a journal prompt."),
        "empty-prompt hint missing"
    );
    assert!(
        content.contains("Write your thoughts here..."),
        "editor placeholder missing"
    );
    assert!(content.contains("status line"), "status footer missing");
    assert!(content.contains("0 words"), "word gauge missing");
}

#[test]
fn current_prompt_is_rendered_in_the_prompt_pane() {
    let mut session = Session::new();
    session.prompt = Some(PROMPTS[0]);
    let editor = test_editor();
    let content = render(&session, &editor, None);

    assert!(
        content.contains("What emotion are you avoiding"),
        "current prompt not shown"
    );
}

#[test]
fn lantern_mode_controls_the_backdrop() {
    let mut session = Session::new();
    let editor = test_editor();

    assert!(session.lantern);
    let lit = render(&session, &editor, None);
    assert!(lit.contains("╭─┴─╮"), "lantern frame missing while lit");

    session.toggle_lantern();
    let dark = render(&session, &editor, None);
    assert!(!dark.contains("╭─┴─╮"), "lantern frame drawn while off");
}

#[test]
fn quit_overlay_renders_on_top() {
    let session = Session::new();
    let editor = test_editor();
    let lines = vec![
        "Quit without saving?".to_string(),
        String::new(),
        "[y] Yes   [n] No".to_string(),
    ];
    let content = render(&session, &editor, Some(lines));

    assert!(content.contains("Confirm quit"), "overlay title missing");
    assert!(content.contains("Quit without saving?"), "overlay body missing");
    assert!(content.contains("[y] Yes   [n] No"), "overlay choices missing");
}

#[test]
fn typed_text_appears_in_the_editor_pane() {
    let session = Session::new();
    let mut editor = TextArea::new(vec!["the lake was still today".to_string()]);
    ui::configure_editor(&mut editor);
    let content = render(&session, &editor, None);

    assert!(content.contains("the lake was still today"));
    assert!(content.contains("5 words"), "word gauge should count entry words");
}
