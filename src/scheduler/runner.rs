use super::{display::DisplayTerminal, Makespan, PolicyReport};
use crate::error::AppError;

pub enum RunnerEvent {
    Quit,
    Next,
    Previous,
    ToggleMakespan,
    None,
}

/// Interactive terminal view over a set of finished policy reports.
pub struct ReportViewer {
    terminal: DisplayTerminal,
    reports: Vec<PolicyReport>,
    selected: usize,
    makespan: Makespan,
}

impl ReportViewer {
    pub fn new(reports: Vec<PolicyReport>, makespan: Makespan) -> Result<Self, AppError> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            reports,
            selected: 0,
            makespan,
        })
    }

    fn toggle_makespan(&mut self) -> Result<(), AppError> {
        let makespan = self.makespan.toggled();
        self.reports = self
            .reports
            .iter()
            .map(|report| report.with_makespan(makespan))
            .collect::<Result<_, _>>()?;
        self.makespan = makespan;
        Ok(())
    }

    // Returns false if the viewer should close
    pub fn run(&mut self) -> Result<bool, AppError> {
        let total = self.reports.len();
        let Some(report) = self.reports.get(self.selected) else {
            return Ok(false);
        };
        self.terminal.draw(report, self.selected, total)?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Next => self.selected = (self.selected + 1) % total,
            RunnerEvent::Previous => self.selected = (self.selected + total - 1) % total,
            RunnerEvent::ToggleMakespan => self.toggle_makespan()?,
            RunnerEvent::None => {}
        }
        Ok(true)
    }
}
