use super::{runner::RunnerEvent, Report, Segment};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).expect("Failed to poll events.") {
                    if let Event::Key(key) = event::read().expect("Failed to read events.") {
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        report: &Report,
        position: usize,
        total: usize,
    ) -> Result<(), io::Error> {
        let title = format!("{} ({}/{})", report.name, position + 1, total);

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(7),
                ])
                .split(f.size());

            let timeline = Paragraph::new(Spans::from(timeline_spans(report)))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_type(BorderType::Rounded),
                );

            f.render_widget(timeline, chunks[0]);

            let items = report.processes.iter().map(|stats| {
                Row::new(vec![
                    Cell::from(format!("P{}", stats.pid))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(stats.arrival.to_string()),
                    Cell::from(stats.burst.to_string()),
                    Cell::from(stats.priority.to_string()),
                    Cell::from(stats.start.to_string()),
                    Cell::from(stats.finish.to_string()),
                    Cell::from(stats.turnaround.to_string()),
                    Cell::from(stats.waiting.to_string()),
                    Cell::from(stats.response.to_string()),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "Arrival", "Burst", "Priority", "Start", "Finish", "TAT",
                        "Waiting", "Response",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(4),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(7),
                    Constraint::Length(6),
                    Constraint::Length(8),
                    Constraint::Length(9),
                ])
                .block(Block::default().title("Processes").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            let metrics = &report.metrics;
            let summary = Paragraph::new(vec![
                Spans::from(format!("Average Turnaround Time: {:.2}", metrics.avg_turnaround)),
                Spans::from(format!("Average Waiting Time: {:.2}", metrics.avg_waiting)),
                Spans::from(format!("Average Response Time: {:.2}", metrics.avg_response)),
                Spans::from(format!(
                    "Makespan: {} | CPU utilization: {:.0}%",
                    metrics.makespan,
                    metrics.utilization * 100.0
                )),
                Spans::from("←/→ switch algorithm | q quit"),
            ])
            .style(Style::default().fg(Color::LightBlue))
            .block(Block::default().title("Metrics").borders(Borders::ALL));

            f.render_widget(summary, chunks[2]);
        })?;

        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // A closed channel means the input thread is gone, nothing more can be browsed
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };

        match event {
            DisplayEvent::Input(key) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return RunnerEvent::Quit,
                        KeyCode::Right | KeyCode::Char('n') => return RunnerEvent::Next,
                        KeyCode::Left | KeyCode::Char('p') => return RunnerEvent::Previous,
                        _ => {}
                    };
                }
            }
            DisplayEvent::Tick => {}
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn timeline_spans(report: &Report) -> Vec<Span<'static>> {
    report
        .timeline
        .segments()
        .into_iter()
        .flat_map(|segment| {
            let style = match segment {
                Segment::Busy(_) => Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
                Segment::Idle { .. } => Style::default().fg(Color::DarkGray),
            };
            [Span::styled(segment.to_string(), style), Span::raw(" ")]
        })
        .collect()
}
