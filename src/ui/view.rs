//! Rendering for the task viewer
//!
//! Exactly one of four main views is shown, by precedence: loading,
//! then load error, then the filter's empty state, then the populated
//! list with a detail pane. Modals (editor, delete confirm, action
//! menu) draw on top.

use chrono::NaiveDate;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{Filter, Task};

use super::app::{AppState, DeleteConfirmState, MenuState, StatusKind, MENU_ITEMS};
use super::editor::{EditorFieldId, EditorKind, EditorState};
use super::model;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let tabs = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_tabs(frame, app, tabs);

    if app.is_loading() {
        render_loading(frame, main);
    } else if let Some(message) = app.load_error() {
        render_error(frame, app, message, main);
    } else if app.filtered.is_empty() {
        render_empty(frame, app.active_filter, main);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
            .split(main);
        render_list(frame, app, panes[0]);
        render_detail(frame, app, panes[1]);
    }

    render_footer(frame, app, footer);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(menu) = app.menu.as_ref() {
        render_menu_modal(frame, area, app, menu);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = Vec::new();
    for (idx, filter) in Filter::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let count = model::filter_indices(&app.tasks, *filter, app.today).len();
        let text = format!("{} {} ({count})", idx + 1, filter.label());
        let style = if *filter == app.active_filter {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(text, style));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading tasks...",
            Style::default().fg(COLOR_INFO),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, app: &AppState, message: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Connection Error",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(Span::styled(
            "Please ensure your backend is running.",
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Expected task API at {}/api/tasks", app.base_url),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(Span::styled(
            "Press r to retry.",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_empty(frame: &mut Frame, filter: Filter, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            filter.empty_message(),
            Style::default()
                .fg(COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            filter.empty_hint(),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press n to create a task.",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let list_height = area.height.saturating_sub(2) as usize;
    let selected_pos = app
        .selected
        .and_then(|idx| app.filtered.iter().position(|candidate| *candidate == idx));
    let (start, end) = list_window(app.filtered.len(), selected_pos, list_height);
    let mut lines = Vec::new();
    for idx in &app.filtered[start..end] {
        let Some(task) = app.tasks.get(*idx) else {
            continue;
        };
        let selected = app.selected == Some(*idx);
        lines.push(render_list_row(task, selected, app.today, content_width));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(app.active_filter.label())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}

fn render_list_row(task: &Task, selected: bool, today: NaiveDate, width: usize) -> Line<'static> {
    let row_modifier = if selected {
        Modifier::REVERSED
    } else {
        Modifier::empty()
    };
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let marker_style = if task.completed {
        Style::default().fg(COLOR_SUCCESS)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let overdue = model::is_overdue(task, today);
    let date_text = if overdue {
        format!("{} (overdue)", format_date(task.due_date))
    } else {
        format_date(task.due_date)
    };
    let date_style = if overdue {
        Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD)
    } else if task.completed {
        Style::default().fg(COLOR_MUTED_DARK)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let name_width = width.saturating_sub(marker.len() + date_text.len() + 3);
    let name = pad_text(&task.name, name_width);
    let name_style = if task.completed {
        Style::default()
            .fg(COLOR_MUTED_DARK)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), marker_style.add_modifier(row_modifier)),
        Span::styled(" ".to_string(), Style::default().add_modifier(row_modifier)),
        Span::styled(name, name_style.add_modifier(row_modifier)),
        Span::styled(" ".to_string(), Style::default().add_modifier(row_modifier)),
        Span::styled(date_text, date_style.add_modifier(row_modifier)),
    ])
}

fn render_detail(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    if let Some(task) = app.selected_task() {
        lines.push(Line::from(Span::styled(
            task.name.clone(),
            Style::default()
                .fg(COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        let status = if task.completed {
            Span::styled("completed", Style::default().fg(COLOR_SUCCESS))
        } else if model::is_overdue(task, app.today) {
            Span::styled(
                "overdue",
                Style::default()
                    .fg(COLOR_ERROR)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("active", Style::default().fg(COLOR_INFO))
        };
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(COLOR_MUTED_DARK)),
            status,
        ]));
        lines.push(Line::from(vec![
            Span::styled("Due: ", Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                format_date(task.due_date),
                Style::default().fg(COLOR_WARNING),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            task.description.clone(),
            Style::default().fg(COLOR_TEXT),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "No task selected",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Detail")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint_span = Span::styled(app.footer_hint(), Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let height = (editor.row_count() as u16 + 7).min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title = match editor.kind() {
        EditorKind::NewTask => "Create New Task",
        EditorKind::EditTask => "Edit Task",
    };

    let value_width = (content_width as usize).saturating_sub(16);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let is_active = idx == editor.active_index();
        let label = format!("{:<12}", field.label);
        let shown = if field.value.is_empty() && field.id == EditorFieldId::DueDate {
            "YYYY-MM-DD".to_string()
        } else {
            truncate_text(&field.value, value_width)
        };
        let value_style = if field.value.is_empty() {
            Style::default().fg(COLOR_MUTED_DARK)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let mut value_span = Span::styled(shown, value_style);
        if is_active {
            value_span.style = value_span.style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(COLOR_MUTED)),
            value_span,
        ]));
    }
    if editor.has_completed_row() {
        let is_active = editor.on_completed_row();
        let marker = if editor.completed() { "[x]" } else { "[ ]" };
        let mut span = Span::styled(
            format!("{marker} Mark as completed"),
            Style::default().fg(COLOR_SUCCESS),
        );
        if is_active {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(span));
    }
    lines.push(Line::from(""));
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "tab next  enter save  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn render_menu_modal(frame: &mut Frame, area: Rect, app: &AppState, menu: &MenuState) {
    let content_width = 28u16.min(area.width.saturating_sub(6));
    let height = (MENU_ITEMS.len() as u16 + 4).min(area.height.saturating_sub(4));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title = app
        .selected_task()
        .map(|task| truncate_text(&task.name, content_width as usize - 4))
        .unwrap_or_else(|| "Task".to_string());

    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, item) in MENU_ITEMS.iter().enumerate() {
        let mut span = Span::styled((*item).to_string(), Style::default().fg(COLOR_TEXT));
        if idx == menu.selected {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(span));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter apply  esc close",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

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

    let name_width = (content_width as usize).saturating_sub(8);
    let lines = vec![
        Line::from(Span::styled(
            "Delete task?",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate_text(&state.name, name_width),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y/enter confirm  esc cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete Task"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

/// Visible slice of the filtered list, centered on the selection when
/// the list is taller than the pane.
fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn truncate_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let visible: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{visible}…")
}

fn pad_text(text: &str, width: usize) -> String {
    let truncated = truncate_text(text, width);
    format!("{truncated:<width$}")
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
