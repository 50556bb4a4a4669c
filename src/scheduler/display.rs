use super::{runner::RunnerEvent, PolicyReport, Schedule};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
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
        crossterm::terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if let Ok(true) = event::poll(timeout) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, report: &PolicyReport, position: usize, total: usize) -> io::Result<()> {
        let schedule = &report.schedule;
        let metrics = &report.metrics;

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(6),
                    Constraint::Length(8),
                    Constraint::Length(5),
                ])
                .split(f.size());

            let header = Paragraph::new(format!(
                "{} ({}/{}) | Completion order: {}",
                report.title(),
                position + 1,
                total,
                completion_order(schedule)
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Policy [n/p: switch, m: makespan, q: quit]")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(header, chunks[0]);

            let items = schedule.processes().iter().map(|process| {
                Row::new(vec![
                    Cell::from(format!("P{}", process.pid()))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.arrival_time().to_string()),
                    Cell::from(process.burst_time().to_string()),
                    Cell::from(process.priority().to_string()),
                    Cell::from(process.completion_time().to_string()),
                    Cell::from(process.turnaround_time().to_string()),
                    Cell::from(process.waiting_time().to_string()),
                    Cell::from(
                        process
                            .response_time()
                            .map_or_else(|| "-".to_owned(), |time| time.to_string()),
                    ),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "Arrival", "Burst", "Priority", "Done", "Turnaround", "Waiting",
                        "Response",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(6),
                    Constraint::Length(11),
                    Constraint::Length(8),
                    Constraint::Length(9),
                ])
                .block(Block::default().title("Processes").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            let summary = Paragraph::new(format!(
                "CPU Utilization: {:.2}%\nSystem Throughput: {:.2}\nAverage Waiting Time: {:.2}\n\
                 Average Turnaround Time: {:.2}\nAverage Response Time: {:.2}\nMakespan: {} ({})",
                metrics.cpu_utilization,
                metrics.throughput,
                metrics.average_waiting_time,
                metrics.average_turnaround_time,
                metrics.average_response_time,
                metrics.makespan,
                metrics.makespan_mode,
            ))
            .block(Block::default().title("Metrics").borders(Borders::ALL));

            f.render_widget(summary, chunks[2]);

            let timeline = Paragraph::new(timeline(schedule))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Timeline").borders(Borders::ALL));

            f.render_widget(timeline, chunks[3]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // A closed channel means the input thread is gone
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };

        if let DisplayEvent::Input(key) = event {
            if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return RunnerEvent::Quit,
                    KeyCode::Char('n') | KeyCode::Right => return RunnerEvent::Next,
                    KeyCode::Char('p') | KeyCode::Left => return RunnerEvent::Previous,
                    KeyCode::Char('m') => return RunnerEvent::ToggleMakespan,
                    _ => {}
                };
            }
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn completion_order(schedule: &Schedule) -> String {
    schedule
        .completion_order()
        .iter()
        .map(|pid| format!("P{pid}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn timeline(schedule: &Schedule) -> String {
    schedule
        .timeline()
        .iter()
        .map(|slice| match slice.pid {
            Some(pid) => format!("[{}-{} P{}]", slice.start, slice.end, pid),
            None => format!("[{}-{} idle]", slice.start, slice.end),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{Process, RoundRobinScheduler, Scheduler};

    #[test]
    fn test_timeline_text() {
        let schedule = RoundRobinScheduler::with_quantum(2)
            .unwrap()
            .schedule(&[Process::new(1, 1, 3), Process::new(2, 1, 1)])
            .unwrap();

        assert_eq!(timeline(&schedule), "[0-1 idle] [1-3 P1] [3-4 P2] [4-5 P1]");
        assert_eq!(completion_order(&schedule), "P2 -> P1");
    }
}
