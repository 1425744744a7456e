use crate::app::{App, InputMode};
use crate::ui::widgets::charts::{render_dht_chart, render_ir_chart};
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::radar::render_radar;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title area
            Constraint::Min(10),   // Plots
            Constraint::Length(4), // Status / endpoint input
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(app, f, layout[0]);
    render_plots(app, f, layout[1]);
    render_status_section(app, f, layout[2]);
    render_shortcuts(app, f, layout[3]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let endpoint = app.session.target_url().map_or_else(
        || Span::styled("no endpoint", Style::default().fg(Color::Gray)),
        |url| Span::styled(url, Style::default().fg(Color::White)),
    );

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Sensor Radar ",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        endpoint,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightGreen)),
    )
    .alignment(Alignment::Left);

    f.render_widget(title, area);
}

fn render_plots(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_radar(&app.charts, f, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    render_ir_chart(&app.charts, f, right[0]);
    render_dht_chart(&app.charts, f, right[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.input_mode == InputMode::EditingEndpoint {
        render_endpoint_input(app, f, area);
        return;
    }

    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![stats_line(app)];
    if let Some(error) = &app.last_error {
        lines.push(TextLine::from(Span::styled(
            format!("Error fetching data: {error}"),
            Style::default().fg(Color::Red),
        )));
    } else if !app.status_message.is_empty() {
        lines.push(TextLine::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Green),
        )));
    }

    let status_paragraph = Paragraph::new(Text::from(lines))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn stats_line(app: &App) -> TextLine<'static> {
    let updated = app.last_update.map_or_else(
        || "never".to_string(),
        |time| time.format("%H:%M:%S%.3f").to_string(),
    );
    let stats = app.stats;

    TextLine::from(vec![
        Span::styled("Last update: ", Style::default().fg(Color::Gray)),
        Span::styled(updated, Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "  requests {} | applied {} | failed {} | stale {}",
                stats.requested, stats.applied, stats.failed, stats.stale
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            if app.session.is_polling() { "  ●" } else { "" },
            Style::default().fg(Color::LightGreen),
        ),
    ])
}

fn render_endpoint_input(app: &App, f: &mut Frame<'_>, area: Rect) {
    let input_block = Block::default()
        .title(" Sensor endpoint (host[:port]) ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let cursor = cursor_char(app.animation_counter);
    let mut lines = vec![input_line(&app.current_input, cursor)];
    if !app.status_message.is_empty() {
        lines.push(TextLine::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(Paragraph::new(Text::from(lines)).block(input_block), area);
}

fn cursor_char(animation_counter: f64) -> &'static str {
    let blink = (animation_counter * 2.0).sin() > 0.0;
    if blink {
        "█"
    } else {
        " "
    }
}

fn input_line(current_input: &str, cursor: &str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        format!("> {current_input}{cursor}"),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn hint(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn shortcuts_line(mode: InputMode) -> TextLine<'static> {
    match mode {
        InputMode::Normal => TextLine::from(vec![
            key("e"),
            hint(": Edit endpoint | "),
            key("c"),
            hint(": Clear status | "),
            key("F1"),
            hint(": Help | "),
            key("q"),
            hint(": Quit"),
        ]),
        InputMode::EditingEndpoint => TextLine::from(vec![
            key("Enter"),
            hint(": Confirm | "),
            key("Esc"),
            hint(": Cancel | "),
            key("Ctrl-C"),
            hint(": Quit"),
        ]),
    }
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph =
        Paragraph::new(shortcuts_line(app.input_mode)).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let entry = |label: &'static str, text: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {label}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" - {text}")),
        ])
    };

    vec![
        TextLine::from(Span::styled(
            "Sensor Radar",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Polls http://<endpoint>/ four times a second and plots radar, IR and temperature/humidity readings.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        entry("e", "Edit the sensor endpoint"),
        entry("Enter", "Apply the typed endpoint (blank keeps the current one)"),
        entry("Esc", "Cancel editing / close this popup"),
        entry("c", "Clear the status line"),
        entry("F1 / ?", "Toggle this help popup"),
        entry("q / Ctrl-C", "Quit"),
    ]
}
