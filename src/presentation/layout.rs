use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Width of the recognize button, borders included.
const RECOGNIZE_WIDTH: u16 = 20;
/// Width of the copy button, borders included.
const COPY_WIDTH: u16 = 12;

/// Screen areas shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub drop_zone: Rect,
    pub result: Rect,
    pub copy_button: Rect,
    pub recognize_button: Rect,
    pub status: Rect,
}

impl Regions {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let result_column = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(body[1]);

        let copy_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(COPY_WIDTH), Constraint::Min(0)])
            .split(result_column[1]);

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(RECOGNIZE_WIDTH), Constraint::Min(0)])
            .split(rows[2]);

        Self {
            header: rows[0],
            drop_zone: body[0],
            result: result_column[0],
            copy_button: copy_row[0],
            recognize_button: footer[0],
            status: footer[1],
        }
    }
}

pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}

/// A rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
