use crate::application::{App, AppMode, HealthView, HELP_TEXT};
use crate::domain::{Preview, PreviewImage};
use super::layout::{centered, Regions};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

const PLACEHOLDER: &str = "Press o or click to choose an image\nPNG, JPG or BMP";
const IDLE_HINT: &str = "o open | r recognize | c copy | h server | ? help | q quit";

pub fn render_ui(f: &mut Frame, app: &App) {
    let regions = Regions::new(f.area());

    render_header(f, app, regions.header);
    render_drop_zone(f, app, regions.drop_zone);
    render_result(f, app, regions.result, regions.copy_button);
    render_recognize_button(f, app, regions.recognize_button);
    render_status_bar(f, app, regions.status);

    match app.mode {
        AppMode::Picking => render_prompt_popup(f, app),
        AppMode::Alert => render_alert_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let health_color = match app.health {
        HealthView::Ready => Color::Green,
        HealthView::ModelMissing => Color::Yellow,
        HealthView::Unreachable(_) => Color::Red,
        HealthView::Unknown | HealthView::Checking => Color::Cyan,
    };
    let header = Paragraph::new(format!(
        "ocrdesk - Image to Text | {} | {}",
        app.server,
        app.health.label()
    ))
    .style(Style::default().fg(health_color));
    f.render_widget(header, area);
}

fn render_drop_zone(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.selected {
        Some(file) => format!("Image: {}", file.file_name),
        None => "Image".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.preview {
        Some(Preview::Image(image)) => f.render_widget(PreviewView { image }, inner),
        Some(Preview::Undecodable(reason)) => {
            let note = Paragraph::new(format!("No preview available\n{}", reason))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(note, centered(inner, inner.width, 3));
        }
        None => {
            let placeholder = Paragraph::new(PLACEHOLDER)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(placeholder, centered(inner, inner.width, 4));
        }
    }
}

fn render_result(f: &mut Frame, app: &App, area: Rect, copy_area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    if !app.result_visible {
        f.render_widget(block.style(Style::default().fg(Color::DarkGray)), area);
        return;
    }

    let text = Paragraph::new(app.result_text.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(text, area);

    let copy = Paragraph::new(app.copy_label)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Magenta));
    f.render_widget(copy, copy_area);
}

fn render_recognize_button(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.recognize_enabled() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(app.recognize_label)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(button, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => match &app.status_message {
            Some(status) => status.clone(),
            None => IDLE_HINT.to_string(),
        },
        AppMode::Picking => "Enter: open | Esc: cancel".to_string(),
        AppMode::Alert => "Enter/Esc: dismiss".to_string(),
        AppMode::Help => "↑↓/jk scroll | PgUp/PgDn page | Home top | Esc/q close".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Picking => Style::default().fg(Color::Yellow),
            AppMode::Alert => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_prompt_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = centered(area, area.width * 4 / 5, 3);
    f.render_widget(Clear, popup_area);

    let (offset, cursor_col) =
        prompt_view(&app.prompt, app.cursor_position, popup_area.width.saturating_sub(2));
    let prompt = Paragraph::new(app.prompt.as_str())
        .scroll((0, offset))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Open image (path)")
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(prompt, popup_area);

    f.set_cursor_position((popup_area.x + 1 + cursor_col - offset, popup_area.y + 1));
}

/// Horizontal scroll and cursor column, both in display cells, that keep the
/// cursor inside a prompt `width` cells wide.
fn prompt_view(prompt: &str, cursor: usize, width: u16) -> (u16, u16) {
    let before: String = prompt.chars().take(cursor).collect();
    let cursor_col = Line::from(before).width() as u16;
    let offset = cursor_col.saturating_sub(width.saturating_sub(1));
    (offset, cursor_col)
}

fn render_alert_popup(f: &mut Frame, app: &App) {
    let Some(message) = app.current_alert() else {
        return;
    };
    let area = f.area();
    let popup_area = centered(area, area.width * 3 / 5, 7);
    f.render_widget(Clear, popup_area);

    let more = app.alerts.len().saturating_sub(1);
    let footer = if more > 0 {
        format!("\n\n[Enter] OK  ({} more)", more)
    } else {
        "\n\n[Enter] OK".to_string()
    };
    let alert = Paragraph::new(format!("{}{}", message, footer))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Alert")
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(alert, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("ocrdesk Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Draws a preview with half-block characters: two pixel rows per cell.
struct PreviewView<'a> {
    image: &'a PreviewImage,
}

impl Widget for PreviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.image.fit(area.width, area.height);
        if width == 0 || height == 0 {
            return;
        }
        let rows = height.div_ceil(2);
        let x0 = area.x + (area.width - width) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        for cy in 0..rows {
            for cx in 0..width {
                let top = self.image.sample(cx, cy * 2, width, height);
                let bottom = (cy * 2 + 1 < height)
                    .then(|| self.image.sample(cx, cy * 2 + 1, width, height));
                if let Some(cell) = buf.cell_mut((x0 + cx, y0 + cy)) {
                    cell.set_char('▀').set_fg(rgb(top));
                    if let Some(bottom) = bottom {
                        cell.set_bg(rgb(bottom));
                    }
                }
            }
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
