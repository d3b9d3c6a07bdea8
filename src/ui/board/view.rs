use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::board::columns;
use crate::task::Status;

use super::app::{AppState, DeleteConfirmState, StatusKind, SuggestionModalState, SuggestionView};
use super::editor::{EditorKind, EditorState};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_COLUMN: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_HOVER: Color = Color::Rgb(180, 156, 92);
const COLOR_MAGENTA: Color = Color::Rgb(214, 140, 230);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);
    let main = chunks[0];
    let footer = chunks[1];

    render_columns(frame, app, main);
    render_footer(frame, app, footer);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
    if let Some(state) = app.suggestions.as_ref() {
        render_suggestions_modal(frame, area, state);
    }
}

fn render_columns(frame: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);

    let cols = columns(app.repo.tasks());
    for (idx, col) in cols.iter().enumerate() {
        let column_area = chunks[idx];
        let content_width = column_area.width.saturating_sub(2) as usize;
        let hovered = app.hover.is_over(col.status);
        let is_current = idx == app.selected_column;

        let mut lines: Vec<Line<'static>> = Vec::new();
        if col.tasks.is_empty() {
            let hint = if hovered { "Drop here" } else { "No tasks" };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(COLOR_MUTED_DARK),
            )));
        }
        for (row, task) in col.tasks.iter().enumerate() {
            let selected = is_current && row == app.selected_row && !app.drag.is_active();
            let dragged = app.drag.dragged_id() == Some(task.id.as_str());
            lines.push(render_card_title(
                &task.title,
                selected,
                dragged,
                content_width,
            ));
            if !task.description.trim().is_empty() {
                lines.push(Line::from(Span::styled(
                    truncate_text(
                        &task.description.replace('\n', " "),
                        content_width.saturating_sub(2),
                    ),
                    Style::default().fg(COLOR_MUTED),
                )));
            }
            lines.push(Line::from(""));
        }

        let border_style = if hovered {
            Style::default()
                .fg(COLOR_BORDER_HOVER)
                .add_modifier(Modifier::BOLD)
        } else if is_current {
            Style::default().fg(COLOR_ACCENT)
        } else {
            Style::default().fg(COLOR_BORDER_COLUMN)
        };
        let title = format!("{} ({})", status_label(col.status), col.tasks.len());
        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        title,
                        status_title_style(col.status).add_modifier(Modifier::BOLD),
                    ))
                    .border_style(border_style),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(widget, column_area);
    }
}

fn render_card_title(title: &str, selected: bool, dragged: bool, width: usize) -> Line<'static> {
    let marker = if dragged { "> " } else { "" };
    let text = truncate_text(title, width.saturating_sub(marker.len()));
    let mut style = Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD);
    if dragged {
        style = Style::default()
            .fg(COLOR_WARNING)
            .add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let mut spans = Vec::new();
    if dragged {
        spans.push(Span::styled(marker.to_string(), style));
    }
    spans.push(Span::styled(text, style));
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = if app.drag.is_active() {
        "h/l pick column  enter/space drop  esc cancel"
    } else {
        "a add  e edit  d delete  s suggest  space move  h/j/k/l navigate  q quit"
    };
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_message.as_ref() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status.clone(), status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let widget = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(COLOR_BORDER_COLUMN)),
    );
    frame.render_widget(widget, area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let height = 10u16.min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let value_width = (content_width as usize).saturating_sub(14);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let is_active = idx == editor.active_index();
        let label = format!("{:<12}", field.label);
        let (value, value_style) = if field.value.is_empty() {
            let placeholder = if field.required {
                "<required>"
            } else {
                "(optional)"
            };
            (placeholder.to_string(), Style::default().fg(COLOR_MUTED))
        } else {
            (
                truncate_text(&field.value, value_width),
                Style::default().fg(COLOR_TEXT),
            )
        };
        let mut spans = vec![
            Span::styled(label, Style::default().fg(COLOR_TEXT)),
            Span::raw(" "),
            Span::styled(value, value_style),
        ];
        if is_active {
            for span in &mut spans {
                span.style = span.style.add_modifier(Modifier::REVERSED);
            }
        }
        lines.push(Line::from(spans));
    }

    if let Some(error) = editor.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "tab next field  enter submit  ctrl+u clear  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let title = match editor.kind() {
        EditorKind::NewTask => "New Task",
        EditorKind::EditTask => "Edit Task",
    };
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(56);
    let height = 8u16.min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title_width = (content_width as usize).saturating_sub(4);
    let lines = vec![
        Line::from(Span::styled(
            "Delete task?",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_text(&state.title, title_width),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "enter/y confirm  esc/n cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn render_suggestions_modal(frame: &mut Frame, area: Rect, state: &SuggestionModalState) {
    let content_width = area.width.saturating_sub(8).min(68);
    let max_height = area.height.saturating_sub(4).max(8);
    let modal = centered_rect(content_width, max_height, area);
    frame.render_widget(Clear, modal);

    let text_width = (content_width as usize).saturating_sub(4);
    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("For: ", Style::default().fg(COLOR_MUTED_DARK)),
        Span::styled(
            truncate_text(&state.task_title, text_width.saturating_sub(5)),
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    match &state.view {
        SuggestionView::Loading => {
            lines.push(Line::from(Span::styled(
                "Generating suggestions...",
                Style::default().fg(COLOR_INFO),
            )));
        }
        SuggestionView::Ready(subtasks) => {
            if subtasks.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No suggestions returned.",
                    Style::default().fg(COLOR_MUTED_DARK),
                )));
            }
            for subtask in subtasks {
                lines.push(Line::from(vec![
                    Span::styled("- ", Style::default().fg(COLOR_SUCCESS)),
                    Span::styled(
                        truncate_text(subtask, text_width.saturating_sub(2)),
                        Style::default().fg(COLOR_TEXT),
                    ),
                ]));
            }
        }
        SuggestionView::Failed(message) => {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default()
                    .fg(COLOR_ERROR)
                    .add_modifier(Modifier::BOLD),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Powered by Gemini",
        Style::default().fg(COLOR_MAGENTA),
    )));
    lines.push(Line::from(Span::styled(
        "enter/esc close",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Subtask Suggestions"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn status_label(status: Status) -> &'static str {
    status.title()
}

fn status_title_style(status: Status) -> Style {
    match status {
        Status::ToDo => Style::default().fg(COLOR_INFO),
        Status::InProgress => Style::default().fg(COLOR_WARNING),
        Status::Done => Style::default().fg(COLOR_SUCCESS),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_text("a very long title", 10), "a very ...");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let modal = centered_rect(60, 10, area);
        assert!(modal.width <= area.width);
        assert!(modal.height <= area.height);
        assert!(modal.x + modal.width <= area.width);
        assert!(modal.y + modal.height <= area.height);
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 4);
        let modal = centered_rect(60, 10, area);
        assert!(modal.width <= area.width);
        assert!(modal.height <= area.height);
    }
}
