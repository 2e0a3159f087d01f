use anyhow::{Context, Result};
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::{PlayFrame, Renderer};
use crate::game::Position;

/// Messages at or above this size are drawn bold
const LARGE_FONT: u16 = 15;

/// Draws the game into a ratatui terminal
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    screen_width: u16,
    screen_height: u16,
    title: String,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, screen_width: u16, screen_height: u16) -> Self {
        Self {
            terminal,
            screen_width,
            screen_height,
            title: "Snake Score: 0 FPS: 0".to_string(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render_play(&mut self, play: &PlayFrame<'_>) -> Result<()> {
        let (width, height) = (self.screen_width, self.screen_height);
        let header = format!("{}  Time: {}", self.title, play.round_clock);

        self.terminal
            .draw(|frame| {
                let surface = centered(frame.area(), width, height);
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1), // Header
                        Constraint::Min(0),    // Game area
                        Constraint::Length(1), // Footer
                    ])
                    .split(surface);

                frame.render_widget(render_header(&header), chunks[0]);
                frame.render_widget(render_grid(play), chunks[1]);
                frame.render_widget(render_controls(), chunks[2]);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn render_message(&mut self, message: &str, font_size: u16) -> Result<()> {
        let (width, height) = (self.screen_width, self.screen_height);
        let header = self.title.clone();

        self.terminal
            .draw(|frame| {
                let surface = centered(frame.area(), width, height);
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Percentage(40),
                        Constraint::Min(3),
                    ])
                    .split(surface);

                frame.render_widget(render_header(&header), chunks[0]);
                frame.render_widget(render_text(message, font_size), chunks[2]);
            })
            .context("Failed to draw message")?;
        Ok(())
    }

    fn update_window_title(&mut self, score: u32, fps: u32) -> Result<()> {
        self.title = format!("Snake Score: {} FPS: {}", score, fps);
        Ok(())
    }
}

/// Clamp a `width` x `height` surface to `area` and centre it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_header(title: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow),
    )))
    .alignment(Alignment::Center)
}

fn render_grid(play: &PlayFrame<'_>) -> Paragraph<'static> {
    let head = play.head();
    let leading = play.leading_cell().filter(|_| play.alive);
    let mut lines = Vec::with_capacity(play.grid_height);

    for y in 0..play.grid_height {
        let mut spans = Vec::with_capacity(play.grid_width);

        for x in 0..play.grid_width {
            let pos = Position::new(x as i32, y as i32);

            let cell = if Some(pos) == head {
                let color = if play.alive { Color::Cyan } else { Color::Red };
                Span::styled(
                    "■ ",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else if play.cells.contains(&pos) {
                Span::styled("□ ", Style::default().fg(Color::Green))
            } else if Some(pos) == leading {
                Span::styled("▪ ", Style::default().fg(Color::Cyan))
            } else if Some(pos) == play.food {
                Span::styled(
                    "O ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(". ", Style::default().fg(Color::DarkGray))
            };

            spans.push(cell);
        }

        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
        .alignment(Alignment::Center)
}

fn render_text(message: &str, font_size: u16) -> Paragraph<'_> {
    let mut style = Style::default().fg(Color::White);
    if font_size >= LARGE_FONT {
        style = style.add_modifier(Modifier::BOLD);
    }

    Paragraph::new(Line::from(Span::styled(message, style)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn render_controls() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ]))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Snake};
    use ratatui::backend::TestBackend;

    fn renderer() -> TerminalRenderer<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        TerminalRenderer::new(terminal, 40, 16)
    }

    fn screen_rows(renderer: &TerminalRenderer<TestBackend>) -> Vec<String> {
        let buffer = renderer.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn screen_text(renderer: &TerminalRenderer<TestBackend>) -> String {
        renderer
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_play_frame_draws_snake_and_food() {
        let mut renderer = renderer();
        let snake = Snake::from_body(
            vec![Position::new(2, 1), Position::new(1, 1)],
            Direction::Right,
            0.1,
            6,
            4,
        ).unwrap();
        let play = PlayFrame::capture(
            &snake,
            Some(Position::new(4, 3)),
            6,
            4,
            0,
            "00:03".to_string(),
        );

        renderer.render_play(&play).unwrap();
        let text = screen_text(&renderer);

        assert!(text.contains('■'));
        assert!(text.contains('□'));
        assert!(text.contains('O'));
        assert!(text.contains("Time: 00:03"));
    }

    #[test]
    fn test_default_surface_shows_every_grid_row() {
        let config = GameConfig::default();
        let terminal =
            Terminal::new(TestBackend::new(config.screen_width, config.screen_height)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal, config.screen_width, config.screen_height);

        let bottom = config.grid_height as i32 - 1;
        let snake = Snake::new(Position::new(16, 16), Direction::Up, 0.1, 32, 32);
        let play = PlayFrame::capture(
            &snake,
            Some(Position::new(5, bottom)),
            config.grid_width,
            config.grid_height,
            0,
            "00:00".to_string(),
        );
        renderer.render_play(&play).unwrap();

        let rows = screen_rows(&renderer);
        // Header, top border, 32 grid rows, bottom border, footer
        assert_eq!(rows.len(), 36);
        assert_eq!(rows.iter().filter(|row| row.contains('O')).count(), 1);
        assert!(rows[2 + bottom as usize].contains('O'));
        assert!(rows[34].contains('╚'));
        assert!(rows[35].contains("WASD"));
    }

    #[test]
    fn test_head_progress_marks_next_cell() {
        let mut renderer = renderer();
        let mut snake = Snake::new(Position::new(2, 1), Direction::Right, 0.6, 6, 4);
        snake.update();
        let play = PlayFrame::capture(&snake, None, 6, 4, 0, "00:00".to_string());

        renderer.render_play(&play).unwrap();
        let rows = screen_rows(&renderer);
        let head_row = rows.iter().find(|row| row.contains('■')).unwrap();
        assert!(head_row.contains("■ ▪"));
    }

    #[test]
    fn test_message_and_title() {
        let mut renderer = renderer();
        renderer.update_window_title(7, 59).unwrap();
        assert_eq!(renderer.title(), "Snake Score: 7 FPS: 59");

        renderer.render_message("Press Enter", 15).unwrap();
        let text = screen_text(&renderer);

        assert!(text.contains("Press Enter"));
        assert!(text.contains("Score: 7"));
    }

    #[test]
    fn test_surface_is_clamped_to_terminal() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 80, 40), area);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
    }
}
