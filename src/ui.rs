use anyhow::{Result, anyhow};
use arboard::Clipboard;
use ratatui::{
    Frame,
    prelude::*,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tui_textarea::TextArea;

use crate::session::{Session, entry_stats};

const COLOR_PARCHMENT: Color = Color::Rgb(0xEA, 0xDD, 0xC0);
const COLOR_EMBER: Color = Color::Rgb(0xD6, 0x8A, 0x3A);
const COLOR_EMBER_DIM: Color = Color::Rgb(0x6E, 0x4A, 0x22);
const COLOR_PINE: Color = Color::Rgb(0x5F, 0x7A, 0x5A);
const COLOR_NIGHT: Color = Color::Rgb(0x10, 0x12, 0x1A);
const COLOR_LANTERN_NIGHT: Color = Color::Rgb(0x1C, 0x15, 0x0C);

/// Widest column the journal card occupies; anything beyond this is margin
/// where the lantern backdrop stays visible.
const CONTENT_WIDTH: u16 = 84;

#[derive(Clone, Copy)]
struct OverlayTheme {
    border: Color,
    title: Color,
    text: Color,
    bg: Color,
}

fn themed_overlay(title: &str) -> OverlayTheme {
    match title {
        "Confirm quit" => OverlayTheme {
            border: COLOR_EMBER,
            title: COLOR_PARCHMENT,
            text: COLOR_PARCHMENT,
            bg: Color::Rgb(0x24, 0x1A, 0x0E),
        },
        _ => OverlayTheme {
            border: COLOR_PINE,
            title: COLOR_PARCHMENT,
            text: COLOR_PARCHMENT,
            bg: Color::Rgb(0x15, 0x18, 0x10),
        },
    }
}

fn centered_overlay_area(frame_size: Rect, lines: &[String]) -> Rect {
    let maxw = lines.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u16 + 4;
    let maxh = lines.len() as u16 + 2;
    Rect::new(
        (frame_size.width.saturating_sub(maxw)) / 2,
        (frame_size.height.saturating_sub(maxh)) / 2,
        maxw.min(frame_size.width),
        maxh.min(frame_size.height),
    )
}

fn render_overlay(f: &mut Frame<'_>, lines: &[String], title: &str) {
    let area = centered_overlay_area(f.size(), lines);
    let theme = themed_overlay(title);
    let paragraph = Paragraph::new(
        lines
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect::<Vec<Line>>(),
    )
    .style(Style::default().fg(theme.text).bg(theme.bg))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(
                Style::default()
                    .fg(theme.border)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(theme.bg)),
    );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

const ASCII_BANNER: [&str; 6] = [
    "     ██╗ ██████╗ ██╗   ██╗██████╗ ███╗   ██╗ █████╗ ██╗     ",
    "     ██║██╔═══██╗██║   ██║██╔══██╗████╗  ██║██╔══██╗██║     ",
    "     ██║██║   ██║██║   ██║██████╔╝██╔██╗ ██║███████║██║     ",
    "██   ██║██║   ██║██║   ██║██╔══██╗██║╚██╗██║██╔══██║██║     ",
    "╚█████╔╝╚██████╔╝╚██████╔╝██║  ██║██║ ╚████║██║  ██║███████╗",
    " ╚════╝  ╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝╚══════╝",
];

const LANTERN_FRAMES: [&[&str]; 4] = [
    &[
        "    ▄    ",
        "  ╭─┴─╮  ",
        "  │ • │  ",
        "  │ █ │  ",
        "  ╰───╯  ",
        "   ▀▀▀   ",
    ],
    &[
        "    ▄    ",
        "  ╭─┴─╮  ",
        "  │ ● │  ",
        "  │ █ │  ",
        "  ╰───╯  ",
        "   ▀▀▀   ",
    ],
    &[
        "  · ▄ ·  ",
        "  ╭─┴─╮  ",
        "  │ ● │  ",
        "  │ █ │  ",
        "  ╰───╯  ",
        "   ▀▀▀   ",
    ],
    &[
        "    ▄    ",
        "  ╭─┴─╮  ",
        "  │ ● │  ",
        "  │ ▉ │  ",
        "  ╰───╯  ",
        "   ▀▀▀   ",
    ],
];

const SPARK_PATTERNS: [&str; 4] = [
    "     ·          ✦        ·      ",
    "   ·        ·          ✦        ",
    "       ✦       ·     ·          ",
    "  ·          ✦          ·       ",
];

pub struct ViewState<'a> {
    pub session: &'a Session,
    pub editor: &'a TextArea<'a>,
    pub status: String,
    pub quit_overlay: Option<Vec<String>>,
    pub anim_frame: usize,
}

pub fn draw(f: &mut Frame<'_>, state: &ViewState) {
    let area = f.size();
    let bg = if state.session.lantern {
        COLOR_LANTERN_NIGHT
    } else {
        COLOR_NIGHT
    };
    f.render_widget(Block::default().style(Style::default().bg(bg)), area);
    if state.session.lantern {
        render_lantern_backdrop(f, area, state.anim_frame);
    }

    // Center the journal card; margins are left to the backdrop.
    let content_width = area.width.min(CONTENT_WIDTH);
    let content = Rect::new(
        area.x + (area.width.saturating_sub(content_width)) / 2,
        area.y,
        content_width,
        area.height,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // banner
            Constraint::Length(2), // tagline
            Constraint::Length(5), // prompt pane
            Constraint::Min(6),    // editor
            Constraint::Length(3), // footer
        ])
        .split(content);

    let banner_lines: Vec<Line> = ASCII_BANNER
        .iter()
        .map(|l| {
            let spans: Vec<Span> = l
                .chars()
                .map(|ch| {
                    let color = match ch {
                        '█' | '▉' => COLOR_PARCHMENT,
                        '═' => COLOR_EMBER,
                        '║' => COLOR_EMBER_DIM,
                        _ => Color::Reset,
                    };
                    Span::styled(
                        ch.to_string(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let banner = Paragraph::new(banner_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(banner, layout[0]);

    let tagline = Paragraph::new(Span::styled(
        crate::prompts::TAGLINE,
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(tagline, layout[1]);

    let prompt_line = match state.session.prompt {
        Some(prompt) => Span::styled(prompt, Style::default().fg(COLOR_PARCHMENT)),
        None => Span::styled(
            "Press Ctrl+G to receive a journal prompt.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };
    let prompt_pane = Paragraph::new(Line::from(prompt_line))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Prompt")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_EMBER)),
        );
    f.render_widget(prompt_pane, layout[2]);

    f.render_widget(state.editor, layout[3]);

    let stats = entry_stats(&state.editor.lines().join("\n"));
    let footer_line = Line::from(vec![
        Span::raw(state.status.clone()),
        Span::styled(
            format!("  |  {} words, {} chars", stats.words, stats.chars),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let footer = Paragraph::new(footer_line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, layout[4]);

    if let Some(lines) = &state.quit_overlay {
        render_overlay(f, lines, "Confirm quit");
    }
}

/// Ambient backdrop for lantern mode: dim spark rows across the full width
/// and a flickering lantern in each side margin when there is room. Content
/// drawn afterwards covers the center, so on narrow terminals the backdrop
/// simply disappears behind the card.
fn render_lantern_backdrop(f: &mut Frame<'_>, area: Rect, frame: usize) {
    let spark_style = Style::default().fg(COLOR_EMBER_DIM);
    let pattern = SPARK_PATTERNS[frame % SPARK_PATTERNS.len()];
    if area.height > 8 {
        for y in [
            area.y + 1,
            area.y + area.height / 2,
            area.y + area.height.saturating_sub(2),
        ] {
            let row = Rect::new(area.x, y, area.width, 1);
            let line = spark_line(pattern, area.width);
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(line, spark_style))),
                row,
            );
        }
    }

    let lantern = LANTERN_FRAMES[frame % LANTERN_FRAMES.len()];
    let w = lantern.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let h = lantern.len() as u16;
    let margin = area.width.saturating_sub(CONTENT_WIDTH) / 2;
    if margin < w + 2 || area.height < h + 4 {
        return;
    }
    let y = area.y + (area.height - h) / 2;
    let lantern_lines: Vec<Line> = lantern
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(COLOR_EMBER))))
        .collect();
    let left = Rect::new(area.x + (margin - w) / 2, y, w, h);
    let right = Rect::new(
        area.x + area.width - margin + (margin - w) / 2,
        y,
        w,
        h,
    );
    f.render_widget(Paragraph::new(lantern_lines.clone()), left);
    f.render_widget(Paragraph::new(lantern_lines), right);
}

fn spark_line(pattern: &str, width: u16) -> String {
    pattern.chars().cycle().take(width as usize).collect()
}

/// Styling for the entry editor; the widget itself owns the entry text.
pub fn configure_editor(editor: &mut TextArea<'_>) {
    editor.set_placeholder_text("Write your thoughts here...");
    editor.set_cursor_line_style(Style::default());
    editor.set_block(
        Block::default().borders(Borders::ALL).title(Span::styled(
            "Entry",
            Style::default()
                .fg(COLOR_PARCHMENT)
                .add_modifier(Modifier::BOLD),
        )),
    );
}

pub fn copy_entry_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {e}"))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| anyhow!("Failed to set clipboard: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spark_line_matches_requested_width() {
        assert_eq!(spark_line(SPARK_PATTERNS[0], 12).chars().count(), 12);
        assert_eq!(spark_line(SPARK_PATTERNS[1], 0).chars().count(), 0);
    }

    #[test]
    fn overlay_area_fits_inside_frame() {
        let lines = vec![
            "Quit without saving?".to_string(),
            String::new(),
            "[y] Yes   [n] No".to_string(),
        ];
        let area = centered_overlay_area(Rect::new(0, 0, 80, 24), &lines);
        assert!(area.width <= 80);
        assert!(area.height <= 24);
    }
}
