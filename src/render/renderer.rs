use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameStatus, GridModel, Position};
use crate::metrics::GameMetrics;

use super::sprite::FoodSprite;

const SNAKE_GLYPH: &str = "█";
const EMPTY_GLYPH: &str = "·";

/// Draws the game; never mutates what it is given
pub struct Renderer {
    cell_width: u16,
}

impl Renderer {
    pub fn new(cell_width: u16) -> Self {
        Self {
            cell_width: cell_width.max(1),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        model: &GridModel,
        metrics: &GameMetrics,
        sprite: &FoodSprite,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(model, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = self.board_area(chunks[1], model.grid_size());
        frame.render_widget(Clear, board_area);
        frame.render_widget(self.render_grid(model, sprite), board_area);

        // Overlays sit on top of the last frame rather than replacing it
        match model.status() {
            GameStatus::Running => {}
            GameStatus::Paused => {
                let popup = centered(board_area, 24, 5);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_paused(), popup);
            }
            GameStatus::GameOver => {
                let popup = centered(board_area, 36, 8);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(model), popup);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Bordered board rectangle, centered in `area`
    ///
    /// The inner surface is `grid_size * cell_width` columns by `grid_size`
    /// rows.
    pub fn board_area(&self, area: Rect, grid_size: usize) -> Rect {
        let side = grid_size.min(u16::MAX as usize / 4) as u16;
        centered(area, side * self.cell_width + 2, side + 2)
    }

    fn cell(&self, glyph: &str, style: Style) -> Span<'static> {
        let span = Span::styled(glyph.to_string(), style);
        let pad = (self.cell_width as usize).saturating_sub(span.width());
        Span::styled(format!("{}{}", glyph, " ".repeat(pad)), style)
    }

    fn snake_cell(&self, style: Style) -> Span<'static> {
        Span::styled(SNAKE_GLYPH.repeat(self.cell_width as usize), style)
    }

    /// Sprite glyph, or a red block when there is none or it would not fit the cell
    fn food_cell(&self, sprite: &FoodSprite) -> Span<'static> {
        match sprite.glyph() {
            Some(glyph) if Span::raw(glyph).width() <= self.cell_width as usize => {
                self.cell(glyph, Style::default())
            }
            _ => self.snake_cell(Style::default().fg(Color::Red)),
        }
    }

    fn render_grid(&self, model: &GridModel, sprite: &FoodSprite) -> Paragraph<'static> {
        let head = model.snake().head();
        let head_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(Color::Green);
        let empty_style = Style::default().fg(Color::DarkGray);
        let occupied = model.occupied_cells();

        let mut lines = Vec::with_capacity(model.grid_size());

        for y in 0..model.grid_size() {
            let mut spans = Vec::with_capacity(model.grid_size());

            for x in 0..model.grid_size() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    self.snake_cell(head_style)
                } else if occupied.contains(&pos) {
                    self.snake_cell(body_style)
                } else if model.food() == Some(pos) {
                    self.food_cell(sprite)
                } else {
                    self.cell(EMPTY_GLYPH, empty_style)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Score: {} ", model.score())),
        )
    }

    fn render_stats(&self, model: &GridModel, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                model.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(model.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(model.steps().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, model: &GridModel) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    model.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
