//! Main TUI application state machine.
//!
//! Handles:
//! - Step navigation through the wizard
//! - Input event handling
//! - Service integration
//! - Background analysis via the worker thread

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::GeminiClient;
use crate::application::{export_report, AnalysisService};
use crate::config::Settings;
use crate::domain::{AnalysisFailure, AnalysisStatus, HealthAnalysis, Step, Wizard};
use crate::ports::GenerativeModel;

use super::form::{load_sample_data, Field};
use super::ui::{
    indicator::render_step_indicator,
    labs::render_labs,
    profile::render_profile,
    render_disclaimer,
    results::{max_scroll, render_results, ResultsView},
    symptoms::render_symptoms,
};
use super::worker::{AnalysisProgress, AnalysisWorker, AnalysisWorkerHandle};

/// Progress the loading bar creeps toward while the request is in flight.
const PROGRESS_TARGET: f64 = 0.95;

/// Time constant of the loading animation, in seconds.
const PROGRESS_TAU: f64 = 6.0;

const SCROLL_PAGE: u16 = 10;

const DEFAULT_VIEWPORT_WIDTH: u16 = 80;

/// Main application state
pub struct App<M>
where
    M: GenerativeModel + 'static,
{
    /// Form values, current step and analysis status
    wizard: Wizard,

    /// Whether the app should quit
    should_quit: bool,

    /// Analysis service shared with worker threads
    service: Arc<AnalysisService<M>>,

    /// Where exported reports are written
    report_dir: PathBuf,

    /// Whether exported reports are opened in the browser
    open_reports: bool,

    /// Focused input, an index into `Field::for_step(step)`
    focus: usize,

    /// Validation message for the current step
    error_message: Option<String>,

    /// Results step presentation state
    results_view: ResultsView,

    /// Pending analysis worker (if running)
    pending_worker: Option<AnalysisWorkerHandle>,

    /// When the current request started (for UI animation)
    loading_started_at: Option<Instant>,

    /// Terminal width at the last draw, bounds result scrolling
    viewport_width: u16,
}

impl App<GeminiClient> {
    /// Create a new application talking to the Gemini API.
    ///
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be initialized.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = GeminiClient::new(settings)?;
        let service = Arc::new(AnalysisService::new(Arc::new(client)));
        Ok(Self::with_dependencies(service, settings.report_dir.clone()))
    }
}

impl<M> App<M>
where
    M: GenerativeModel + 'static,
{
    /// Create application with injected dependencies.
    ///
    /// Lets tests substitute a canned model for the network client.
    pub fn with_dependencies(service: Arc<AnalysisService<M>>, report_dir: PathBuf) -> Self {
        Self {
            wizard: Wizard::new(),
            should_quit: false,
            service,
            report_dir,
            open_reports: true,
            focus: 0,
            error_message: None,
            results_view: ResultsView::default(),
            pending_worker: None,
            loading_started_at: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    /// Enable or disable opening exported reports in the browser.
    #[must_use]
    pub fn open_reports(mut self, open: bool) -> Self {
        self.open_reports = open;
        self
    }

    #[must_use]
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick_progress();

            self.viewport_width = terminal.size()?.width;
            terminal.draw(|f| self.draw(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole screen: indicator, current step, disclaimer.
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        render_step_indicator(f, chunks[0], self.wizard.step());

        let content_area = chunks[1];
        let form = self.wizard.form();
        let error = self.error_message.as_deref();
        match self.wizard.step() {
            Step::Profile => render_profile(f, content_area, &form.profile, self.focus, error),
            Step::Labs => render_labs(f, content_area, form, self.focus),
            Step::Symptoms => render_symptoms(f, content_area, &form.symptoms, error),
            Step::Results => {
                render_results(f, content_area, self.wizard.status(), &self.results_view)
            }
        }

        render_disclaimer(f, chunks[2]);
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let Some(progress) = self
                .pending_worker
                .as_ref()
                .and_then(AnalysisWorkerHandle::try_recv)
            else {
                break;
            };

            match progress {
                AnalysisProgress::Requesting { id } => {
                    tracing::debug!(submission = id, "Analysis request in flight");
                }
                AnalysisProgress::Complete { id, analysis } => {
                    self.finish(id, Ok(analysis));
                    break;
                }
                AnalysisProgress::Failed { id, error } => {
                    tracing::warn!(submission = id, kind = ?error.kind(), "Analysis failed: {}", error);
                    self.finish(id, Err(error.to_failure()));
                    break;
                }
            }
        }
    }

    fn finish(&mut self, id: u64, outcome: std::result::Result<HealthAnalysis, AnalysisFailure>) {
        if !self.wizard.complete(id, outcome) {
            tracing::warn!(submission = id, "Dropping stale analysis result");
        }
        self.pending_worker = None;
        self.loading_started_at = None;
        self.results_view.progress = 0.0;
        self.results_view.scroll = 0;
    }

    fn tick_progress(&mut self) {
        if !self.wizard.is_loading() {
            return;
        }
        let Some(started_at) = self.loading_started_at else {
            return;
        };

        let elapsed = Instant::now()
            .saturating_duration_since(started_at)
            .as_secs_f64();

        // Smooth, monotonic fake progress: asymptotically approaches the target.
        let k = 1.0 - (-elapsed / PROGRESS_TAU).exp();
        let desired = (PROGRESS_TARGET * k).clamp(0.0, PROGRESS_TARGET);
        self.results_view.progress = desired.max(self.results_view.progress);
    }

    /// Process one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        let step = self.wizard.step();
        if key == KeyCode::F(2) && step != Step::Results {
            load_sample_data(&mut self.wizard, step);
            self.error_message = None;
            return;
        }

        match step {
            Step::Profile | Step::Labs | Step::Symptoms => self.handle_form_key(key),
            Step::Results => self.handle_results_key(key),
        }
    }

    fn focused_field(&self) -> Option<Field> {
        Field::for_step(self.wizard.step()).get(self.focus).copied()
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let field_count = Field::for_step(self.wizard.step()).len();
        let field = self.focused_field();

        match key {
            KeyCode::Esc => self.go_back(),
            KeyCode::Down | KeyCode::Tab => {
                self.focus = (self.focus + 1) % field_count;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = (self.focus + field_count - 1) % field_count;
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = field {
                    field.cycle(&mut self.wizard, key == KeyCode::Right);
                }
            }
            KeyCode::Enter => {
                if self.wizard.step() == Step::Symptoms {
                    self.submit();
                } else {
                    self.advance();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = field {
                    if field.input_char(&mut self.wizard, c) {
                        self.error_message = None;
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = field {
                    field.delete_char(&mut self.wizard);
                }
            }
            KeyCode::Delete => {
                if let Some(field) = field {
                    field.clear(&mut self.wizard);
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        let last_row = self
            .wizard
            .analysis()
            .map_or(0, |analysis| max_scroll(analysis, self.viewport_width));

        match self.wizard.status() {
            AnalysisStatus::Loading => {}
            AnalysisStatus::Failed(_) => match key {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => self.start_over(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            },
            AnalysisStatus::Ready(_) => match key {
                KeyCode::Char('r') | KeyCode::Char('R') => self.start_over(),
                KeyCode::Char('d') | KeyCode::Char('D') => self.download_report(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Down => {
                    self.results_view.scroll =
                        self.results_view.scroll.saturating_add(1).min(last_row);
                }
                KeyCode::Up => {
                    self.results_view.scroll = self.results_view.scroll.saturating_sub(1);
                }
                KeyCode::PageDown => {
                    self.results_view.scroll = self
                        .results_view
                        .scroll
                        .saturating_add(SCROLL_PAGE)
                        .min(last_row);
                }
                KeyCode::PageUp => {
                    self.results_view.scroll =
                        self.results_view.scroll.saturating_sub(SCROLL_PAGE);
                }
                KeyCode::Home => self.results_view.scroll = 0,
                _ => {}
            },
            AnalysisStatus::Idle => match key {
                KeyCode::Char('r') | KeyCode::Char('R') => self.start_over(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn advance(&mut self) {
        match self.wizard.next() {
            Ok(step) => {
                tracing::debug!(step = step.number(), "Advanced");
                self.focus = 0;
                self.error_message = None;
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn go_back(&mut self) {
        match self.wizard.back() {
            Ok(_) => {
                self.focus = 0;
                self.error_message = None;
            }
            Err(e) => tracing::debug!("Back ignored: {}", e),
        }
    }

    fn submit(&mut self) {
        match self.wizard.submit() {
            Ok(submission) => {
                tracing::info!(submission = submission.id, "Submitting analysis request");
                self.error_message = None;
                self.results_view = ResultsView::default();
                self.loading_started_at = Some(Instant::now());

                // Spawn background worker so the UI keeps drawing
                let worker = AnalysisWorker::spawn(self.service.clone(), submission);
                self.pending_worker = Some(worker);
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// Full reset. An in-flight request is abandoned, not cancelled.
    fn start_over(&mut self) {
        if let Some(worker) = self.pending_worker.take() {
            tracing::info!(submission = worker.id(), "Abandoning in-flight analysis");
        }
        self.wizard.reset();
        self.focus = 0;
        self.error_message = None;
        self.results_view = ResultsView::default();
        self.loading_started_at = None;
        tracing::info!("Wizard reset");
    }

    fn download_report(&mut self) {
        let Some(analysis) = self.wizard.analysis() else {
            return;
        };

        match export_report(analysis, &self.report_dir) {
            Ok(path) => {
                let shown = path.display().to_string();
                if self.open_reports {
                    if let Err(e) = webbrowser::open(&shown) {
                        tracing::warn!("Could not open report in browser: {}", e);
                    }
                }
                self.results_view.notice = Some(format!("Report saved to {shown}"));
            }
            Err(e) => {
                tracing::error!("Report export failed: {}", e);
                self.results_view.notice = Some(format!("Could not save report: {e}"));
            }
        }
    }
}
