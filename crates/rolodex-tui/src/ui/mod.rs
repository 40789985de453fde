use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use rolodex_core::domain::ContactStatus;
use rolodex_core::rules::Field;

use crate::app::{App, ConfirmState, ContactForm, Mode};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_list(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }

    match &app.mode {
        Mode::Form(form) => render_contact_form(frame, size, form),
        Mode::Confirm(state) => render_confirm(frame, size, state),
        _ => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let search_display = if app.search_input.trim().is_empty() {
        "(none)".to_string()
    } else {
        app.search_input.clone()
    };
    let mut title = format!(
        "contacts: {}/{}  search: {}  status: {}",
        app.visible().len(),
        app.contacts.len(),
        search_display,
        app.status_filter
    );
    if app.loading {
        title.push_str("  loading...");
    }

    let mut spans = vec![Span::raw(title)];
    if matches!(app.mode, Mode::SearchEditing) {
        spans.push(Span::styled(
            "  [editing search]",
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("rolodex");
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::List => "j/k move  enter/e edit  a add  d delete  / search  s status  c clear  r reload  ? help  q quit",
        Mode::SearchEditing => "type to search  enter/esc done",
        Mode::Form(_) => "tab next  shift+tab prev  space toggle status  enter select  esc cancel",
        Mode::Confirm(_) => "y confirm  n/esc cancel",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let visible = app.visible();
    if visible.is_empty() {
        let hint = if app.contacts.is_empty() {
            app.empty_hint()
        } else {
            "No matches for the current search and status.".to_string()
        };
        let paragraph = Paragraph::new(hint)
            .block(Block::default().borders(Borders::ALL).title("Contacts"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|contact| {
            let (label, style) = status_badge(contact.status);
            let mut spans = vec![
                Span::styled(
                    contact.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(contact.email.clone()),
                Span::raw("  "),
                Span::raw(contact.phone.clone()),
                Span::raw("  "),
                Span::styled(format!("[{}]", label), style),
            ];
            if let Some(company) = &contact.company {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    company.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Contacts"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_contact_form(frame: &mut Frame<'_>, area: Rect, form: &ContactForm) {
    let modal = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title(form.title());
    let mut lines = vec![
        field_line("Name", &form.draft.name, form.focus == 0),
        error_line(form, Field::Name),
        field_line("Email", &form.draft.email, form.focus == 1),
        error_line(form, Field::Email),
        field_line("Phone", &form.draft.phone, form.focus == 2),
        error_line(form, Field::Phone),
        field_line("Company", &form.draft.company, form.focus == 3),
        field_line("Status", form.draft.status.as_str(), form.is_status_focus()),
        field_line("Notes", &form.draft.notes, form.focus == 5),
        error_line(form, Field::Notes),
        Line::from(""),
    ];

    if form.dirty && !form.submitting {
        lines.push(Line::from(Span::styled(
            "unsaved changes",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let save_style = if !form.is_valid() || form.submitting {
        Style::default().fg(Color::DarkGray)
    } else if form.is_save_focus() {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if form.is_cancel_focus() {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };

    let save_label = if form.submitting { "[Saving...]" } else { "[Save]" };
    lines.push(Line::from(vec![
        Span::styled(save_label, save_style),
        Span::raw("  "),
        Span::styled("[Cancel]", cancel_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: q quit, Ctrl+C quit, ? help"),
        Line::from("List: j/k move, enter/e edit, a add, d delete, / search, s cycle status, c clear search, r reload"),
        Line::from("Search: type to narrow by name or email, enter/esc done"),
        Line::from("Form: tab/shift+tab move, space toggles status, enter on [Save] submits, esc cancels"),
        Line::from("Delete asks for confirmation; y confirms, n cancels"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn error_line(form: &ContactForm, field: Field) -> Line<'static> {
    match form.errors.get(field) {
        Some(message) => Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

fn status_badge(status: ContactStatus) -> (&'static str, Style) {
    match status {
        ContactStatus::Active => ("active", Style::default().fg(Color::Green)),
        ContactStatus::Inactive => ("inactive", Style::default().fg(Color::DarkGray)),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
