//! Terminal host for the journal editor using ratatui.
//!
//! The [`Host`] owns the collaborators the editor drives; [`draw`] renders
//! what the editor last pushed into them.

mod album;
mod host;
mod input;
mod keys;
mod list;
mod text_input;
mod theme;

pub use album::{DirectoryAlbum, PhotoChooser};
pub use host::{Host, TerminalHost};
pub use input::{HostCommand, InputPump, apply_event, handle_events};
pub use keys::KeyboardPoll;
pub use list::TerminalList;
pub use text_input::{DraftText, TerminalTextInput};
pub use theme::{Glyphs, Palette, UiOptions, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use journal_engine::{
    DurableStore, EditorOptions, EditorState, JournalEditor, ListDisplay, ListRow, Mode, PhotoView,
    TextTarget,
};
use journal_types::{BlockKind, truncate_with_ellipsis};

/// Snapshot of the editor state the host needs for routing keys and drawing.
#[derive(Debug, Clone, Copy)]
pub struct EditorStatus {
    pub state: EditorState,
    pub options: EditorOptions,
    pub allow_cancel: bool,
    pub show_prompts: bool,
    pub save_pending: bool,
}

impl EditorStatus {
    #[must_use]
    pub fn of<D: DurableStore>(editor: &JournalEditor<D>) -> Self {
        Self {
            state: editor.state(),
            options: editor.options(),
            allow_cancel: editor.allow_cancel(),
            show_prompts: editor.show_prompts(),
            save_pending: editor.save_pending(),
        }
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, status: &EditorStatus, host: &Host, options: UiOptions) {
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Journal
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // The list closes while the chooser is up; keep it visible behind the modal.
    if host.list.is_open() || host.album.chooser().is_some() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(chunks[0]);
        draw_entry_list(frame, host, panes[0], &palette, &glyphs);
        if host.text.target() == Some(TextTarget::Description) {
            draw_description_editor(frame, host, panes[1], &palette);
        } else {
            draw_description(frame, host, panes[1], &palette, &glyphs);
        }
    } else {
        draw_closed(frame, chunks[0], &palette);
    }

    draw_status_bar(frame, status, host, chunks[1], &palette, &glyphs);

    if host.album.chooser().is_some() {
        draw_photo_chooser(frame, host, &palette, &glyphs);
    }
}

fn draw_closed(frame: &mut Frame, area: Rect, palette: &Palette) {
    let text = Paragraph::new(Line::from(Span::styled(
        "The journal is closed.",
        Style::default().fg(palette.text_muted),
    )))
    .alignment(Alignment::Center);
    let y = area.y + area.height / 2;
    frame.render_widget(text, Rect { y, height: 1, ..area });
}

fn panel_block<'a>(title: &'a str, palette: &Palette, focused: bool) -> Block<'a> {
    let border = if focused {
        palette.primary
    } else {
        palette.bg_border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(palette.bg_panel))
        .title(Line::from(vec![Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )]))
}

fn draw_entry_list(frame: &mut Frame, host: &Host, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = panel_block(host.list.title(), palette, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = host.list.rows();
    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                " No entries yet.",
                Style::default().fg(palette.text_muted),
            )),
        ]);
        frame.render_widget(empty, inner);
        return;
    }

    let selected = host.list.selected_index();
    let visible = usize::from(inner.height).max(1);
    let offset = (selected + 1).saturating_sub(visible);
    let renaming_row = match host.text.target() {
        Some(TextTarget::EntryName { row }) => Some(row),
        _ => None,
    };

    let mut lines = Vec::with_capacity(visible);
    for (i, row) in rows.iter().enumerate().skip(offset).take(visible) {
        if renaming_row == Some(i) {
            let draft = host.text.draft();
            let (_, col) = draft.cursor_line_col();
            let prefix = format!("{} ", glyphs.selected);
            let x = inner.x + prefix.width() as u16 + col as u16;
            let y = inner.y + (i - offset) as u16;
            if x < inner.right() {
                frame.set_cursor_position((x, y));
            }
            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(palette.green)),
                Span::styled(
                    draft.text().to_string(),
                    Style::default()
                        .fg(palette.text_primary)
                        .bg(palette.bg_highlight),
                ),
            ]));
            continue;
        }
        lines.push(entry_line(row, i == selected, usize::from(inner.width), palette, glyphs));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn entry_line(
    row: &ListRow,
    selected: bool,
    width: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Line<'static> {
    let marker = if row.marked_for_deletion {
        glyphs.delete_mark
    } else if selected {
        glyphs.selected
    } else {
        " "
    };

    let mut suffix = String::new();
    if row.more_to_explore {
        suffix.push(' ');
        suffix.push_str(glyphs.more_to_explore);
    }
    if row.has_photo {
        suffix.push(' ');
        suffix.push_str(glyphs.photo);
    }

    let label_width = width.saturating_sub(marker.width() + 1 + suffix.width());
    let label = truncate_with_ellipsis(&row.label, label_width);

    let mut label_style = Style::default().fg(palette.text_secondary);
    if selected {
        label_style = label_style
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD);
    }
    if row.marked_for_deletion {
        label_style = label_style
            .fg(palette.red)
            .add_modifier(Modifier::CROSSED_OUT);
    }

    Line::from(vec![
        Span::styled(format!("{marker} "), Style::default().fg(palette.peach)),
        Span::styled(label, label_style),
        Span::styled(suffix, Style::default().fg(palette.accent)),
    ])
}

fn draw_description(
    frame: &mut Frame,
    host: &Host,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let view = host.list.description();
    let block = panel_block("Description", palette, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let mut lines: Vec<Line> = Vec::new();
    for (i, block) in view.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        match block.kind {
            BlockKind::Fact => {
                for text in block.text.lines() {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", glyphs.bullet),
                            Style::default().fg(palette.primary),
                        ),
                        Span::styled(text.to_string(), Style::default().fg(palette.text_primary)),
                    ]));
                }
            }
            BlockKind::MoreToExplore => {
                lines.push(Line::from(Span::styled(
                    format!("{} {}", glyphs.more_to_explore, block.text),
                    styles::more_to_explore(palette),
                )));
            }
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[0]);

    let photo_line = match &view.photo {
        PhotoView::Hidden => Line::from(""),
        PhotoView::Placeholder => Line::from(Span::styled(
            format!("{} No photo", glyphs.photo_placeholder),
            Style::default().fg(palette.text_muted),
        )),
        PhotoView::Image(image) => Line::from(vec![
            Span::styled(
                format!("{} {}", glyphs.photo, image.reference),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                format!("  {}", format_size(image.size_bytes)),
                Style::default().fg(palette.text_muted),
            ),
        ]),
        PhotoView::Missing { .. } => Line::from(Span::styled(
            format!(
                "{} {}",
                glyphs.photo_missing,
                view.photo.error_message().unwrap_or_default()
            ),
            styles::error(palette),
        )),
    };
    frame.render_widget(Paragraph::new(photo_line), parts[1]);
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn draw_description_editor(frame: &mut Frame, host: &Host, area: Rect, palette: &Palette) {
    let block = panel_block("Editing description", palette, true)
        .border_style(Style::default().fg(palette.green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = host.text.draft();
    let (line, col) = draft.cursor_line_col();
    let scroll_y = (line + 1).saturating_sub(usize::from(inner.height).max(1));
    let scroll_x = (col + 1).saturating_sub(usize::from(inner.width).max(1));

    let lines: Vec<Line> = draft
        .text()
        .split('\n')
        .map(|text| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(palette.text_primary),
            ))
        })
        .collect();
    let editor = Paragraph::new(lines).scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(editor, inner);

    let x = inner.x + (col - scroll_x) as u16;
    let y = inner.y + (line - scroll_y) as u16;
    frame.set_cursor_position((x, y));
}

fn mode_label(state: EditorState, palette: &Palette) -> (&'static str, Style) {
    match state {
        EditorState::Disabled => ("CLOSED", styles::mode_browse(palette)),
        EditorState::Main => ("BROWSE", styles::mode_browse(palette)),
        EditorState::Renaming => ("RENAME", styles::mode_edit(palette)),
        EditorState::EditingDescription => ("DESCRIBE", styles::mode_edit(palette)),
        EditorState::Deleting => ("DELETE", styles::mode_delete(palette)),
        EditorState::ChoosingPhoto => ("PHOTO", styles::mode_photo(palette)),
    }
}

fn key_hints(state: EditorState) -> &'static [(&'static str, &'static str)] {
    match state {
        EditorState::Disabled => &[],
        EditorState::Main => &[
            ("↑↓", "select"),
            ("J/K", "move"),
            ("n", "new"),
            ("e", "describe"),
            ("r", "rename"),
            ("m", "more"),
            ("p/P", "photo/remove"),
            ("d", "delete"),
            ("h", "hide keys"),
            ("q", "close"),
        ],
        EditorState::Deleting => &[("hold d/Enter", "delete"), ("Esc", "keep")],
        EditorState::Renaming => &[("Enter", "save"), ("Esc", "cancel")],
        EditorState::EditingDescription => &[("Ctrl+S", "save"), ("Esc", "cancel")],
        EditorState::ChoosingPhoto => &[("↑↓", "select"), ("Enter", "attach"), ("Esc", "cancel")],
    }
}

fn draw_status_bar(
    frame: &mut Frame,
    status: &EditorStatus,
    host: &Host,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (label, label_style) = mode_label(status.state, palette);
    let mut spans = vec![Span::styled(format!(" {label} "), label_style), Span::raw(" ")];

    if let Some(notice) = host.notice() {
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(palette.yellow),
        ));
    } else if status.show_prompts {
        for (key, hint) in key_hints(status.state) {
            spans.push(Span::styled(*key, styles::key_highlight(palette)));
            spans.push(Span::styled(format!(" {hint}  "), styles::key_hint(palette)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let mut right = Vec::new();
    if host.control.pause_locked() {
        right.push(Span::styled(
            format!("{} ", glyphs.locked),
            Style::default().fg(palette.yellow),
        ));
    }
    if status.save_pending {
        right.push(Span::styled("unsaved ", Style::default().fg(palette.text_muted)));
    }
    if !right.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(right)).alignment(Alignment::Right),
            area,
        );
    }
}

fn draw_photo_chooser(frame: &mut Frame, host: &Host, palette: &Palette, glyphs: &Glyphs) {
    let Some(chooser) = host.album.chooser() else {
        return;
    };
    let area = frame.area();
    let items = chooser.items();

    let width = 50.min(area.width.saturating_sub(4));
    let wanted = u16::try_from(items.len().max(1)).unwrap_or(u16::MAX).saturating_add(4);
    let height = wanted.min(area.height.saturating_sub(2));
    let modal = Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width,
        height,
    };
    frame.render_widget(Clear, modal);

    let mut lines = vec![Line::from("")];
    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  No photos in {}", host.album.dir().display()),
            Style::default().fg(palette.text_muted),
        )));
    } else {
        let visible = usize::from(height.saturating_sub(4)).max(1);
        let offset = (chooser.selected() + 1).saturating_sub(visible);
        for (i, item) in items.iter().enumerate().skip(offset).take(visible) {
            let selected = i == chooser.selected();
            let marker = if selected { glyphs.selected } else { " " };
            let style = if selected {
                Style::default()
                    .fg(palette.text_primary)
                    .bg(palette.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text_secondary)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {marker} "), Style::default().fg(palette.peach)),
                Span::styled(item.clone(), style),
            ]));
        }
    }

    let chooser = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.bg_popup))
            .title(Line::from(vec![Span::styled(
                " Choose a photo ",
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )])),
    );
    frame.render_widget(chooser, modal);
}
