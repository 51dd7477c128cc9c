//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::api::client::Backend;
use crate::api::models::{AutopilotResponse, ExtractionResult};
use crate::core::config::Config;
use crate::error::{Result, ScoutError};
use crate::tui::event::{is_quit_key, AppEvent, EventHandler};
use crate::tui::panels::Panels;
use crate::tui::ui;

/// Message type for async operation results
///
/// Every message carries the generation it was spawned under; responses
/// from superseded requests are discarded on arrival.
#[derive(Debug)]
pub enum AsyncMessage {
    /// Extraction loaded successfully
    ExtractLoaded {
        generation: u64,
        result: Box<ExtractionResult>,
    },
    /// Extraction failed
    ExtractFailed { generation: u64, message: String },
    /// Autopilot response loaded
    AutopilotLoaded {
        generation: u64,
        response: Box<AutopilotResponse>,
    },
    /// Autopilot failed
    AutopilotFailed { generation: u64, message: String },
    /// Summary lines loaded (already defaulted to empty when absent)
    SummaryLoaded { generation: u64, lines: Vec<String> },
    /// Summarize failed
    SummaryFailed { generation: u64, message: String },
}

/// Focusable content regions, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Text,
    Headings,
    Links,
    Prices,
    Summary,
}

impl Region {
    pub fn next(self) -> Self {
        match self {
            Region::Text => Region::Headings,
            Region::Headings => Region::Links,
            Region::Links => Region::Prices,
            Region::Prices => Region::Summary,
            Region::Summary => Region::Text,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Region::Text => Region::Summary,
            Region::Headings => Region::Text,
            Region::Links => Region::Headings,
            Region::Prices => Region::Links,
            Region::Summary => Region::Prices,
        }
    }
}

/// Error popup for failures that require user acknowledgment
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    /// Title of the error popup (e.g., "Fetch Failed")
    pub title: String,
    /// The full error message to display
    pub message: String,
}

/// Main TUI application
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Status message to display
    pub status_message: Option<String>,
    /// Error popup to display (requires user dismissal)
    pub error_popup: Option<ErrorPopup>,
    /// Tick counter for spinner animation
    pub tick_counter: u64,

    /// URL input buffer
    pub url_input: String,
    /// Whether keystrokes go to the URL bar
    pub url_input_mode: bool,
    /// Whether keystrokes go to the text region
    pub text_edit_mode: bool,
    /// Currently focused region (for scrolling)
    pub focus: Region,

    /// Content regions
    pub panels: Panels,

    /// Scroll offsets per region
    pub text_scroll: usize,
    pub headings_scroll: usize,
    pub links_scroll: usize,
    pub prices_scroll: usize,
    pub summary_scroll: usize,

    // ─────────────────────────────────────────────────────────────────────────
    // Per-action request state
    // ─────────────────────────────────────────────────────────────────────────
    /// Generation of the latest-issued fetch request
    pub fetch_generation: u64,
    pub fetch_loading: bool,
    pub autopilot_generation: u64,
    pub autopilot_loading: bool,
    pub summarize_generation: u64,
    pub summarize_loading: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Async communication
    // ─────────────────────────────────────────────────────────────────────────
    /// Sender for async messages (cloned into tasks)
    async_tx: mpsc::Sender<AsyncMessage>,
    /// Receiver for async messages
    async_rx: mpsc::Receiver<AsyncMessage>,

    /// Backend the actions run against
    backend: Arc<dyn Backend>,
}

impl App {
    /// Create a new app instance against the given backend
    pub fn new(backend: Arc<dyn Backend>, config: &Config) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);

        Self {
            running: true,
            show_help: false,
            status_message: None,
            error_popup: None,
            tick_counter: 0,

            url_input: String::new(),
            url_input_mode: true,
            text_edit_mode: false,
            focus: Region::Text,

            panels: Panels::new(config.link_display_cap),

            text_scroll: 0,
            headings_scroll: 0,
            links_scroll: 0,
            prices_scroll: 0,
            summary_scroll: 0,

            fetch_generation: 0,
            fetch_loading: false,
            autopilot_generation: 0,
            autopilot_loading: false,
            summarize_generation: 0,
            summarize_loading: false,

            async_tx,
            async_rx,

            backend,
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| ScoutError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| ScoutError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| ScoutError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| ScoutError::Terminal(e.to_string()))?;
        execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )
        .map_err(|e| ScoutError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| ScoutError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let mut events = EventHandler::new(Duration::from_millis(250));

        // Main event loop
        while self.running {
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| ScoutError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            if let Some(event) = events.next().await {
                match event {
                    AppEvent::Key(key) => self.handle_key_event(key),
                    AppEvent::Paste(text) => self.handle_paste(text),
                    AppEvent::Resize(_, _) => {
                        // Handled automatically by ratatui
                    }
                    AppEvent::Tick => {
                        self.tick_counter = self.tick_counter.wrapping_add(1);
                    }
                }
            }
        }

        Self::restore_terminal(&mut terminal)?;
        Ok(())
    }

    /// True while any request is in flight
    pub fn any_loading(&self) -> bool {
        self.fetch_loading || self.autopilot_loading || self.summarize_loading
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action triggers
    // ─────────────────────────────────────────────────────────────────────────

    /// Require a non-empty URL before any network call
    fn validated_url(&mut self) -> Option<String> {
        let url = self.url_input.trim().to_string();
        if url.is_empty() {
            self.error_popup = Some(ErrorPopup {
                title: "URL Required".to_string(),
                message: "Enter a URL first.\n\nPress [u] to edit the URL bar.".to_string(),
            });
            return None;
        }
        Some(url)
    }

    /// Spawn a fetch/extract request for the current URL
    pub fn trigger_fetch(&mut self) {
        let url = match self.validated_url() {
            Some(u) => u,
            None => return,
        };

        // A new trigger supersedes any in-flight request for this action
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.fetch_loading = true;
        self.status_message = Some(format!("Fetching {url}..."));

        let backend = Arc::clone(&self.backend);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            match backend.fetch_extract(&url).await {
                Ok(result) => {
                    let _ = tx
                        .send(AsyncMessage::ExtractLoaded {
                            generation,
                            result: Box::new(result),
                        })
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(AsyncMessage::ExtractFailed {
                            generation,
                            message: e.to_string(),
                        })
                        .await;
                }
            }
        });
    }

    /// Spawn an autopilot request for the current URL
    pub fn trigger_autopilot(&mut self) {
        let url = match self.validated_url() {
            Some(u) => u,
            None => return,
        };

        self.autopilot_generation += 1;
        let generation = self.autopilot_generation;
        self.autopilot_loading = true;
        self.status_message = Some(format!("Autopilot on {url}..."));

        let backend = Arc::clone(&self.backend);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            match backend.autopilot(&url).await {
                Ok(response) => {
                    let _ = tx
                        .send(AsyncMessage::AutopilotLoaded {
                            generation,
                            response: Box::new(response),
                        })
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(AsyncMessage::AutopilotFailed {
                            generation,
                            message: e.to_string(),
                        })
                        .await;
                }
            }
        });
    }

    /// Spawn a summarize request for the current text region content
    ///
    /// No emptiness precondition: the original contract sends whatever the
    /// text region holds, defaulting to the empty string.
    pub fn trigger_summarize(&mut self) {
        self.summarize_generation += 1;
        let generation = self.summarize_generation;
        self.summarize_loading = true;
        self.status_message = Some("Summarizing...".to_string());

        let text = self.panels.text.clone();
        let backend = Arc::clone(&self.backend);
        let tx = self.async_tx.clone();

        tokio::spawn(async move {
            match backend.summarize(&text).await {
                Ok(response) => {
                    let _ = tx
                        .send(AsyncMessage::SummaryLoaded {
                            generation,
                            lines: response.summary.unwrap_or_default(),
                        })
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(AsyncMessage::SummaryFailed {
                            generation,
                            message: e.to_string(),
                        })
                        .await;
                }
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Async message handling
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::ExtractLoaded { generation, result } => {
                if generation != self.fetch_generation {
                    tracing::debug!(generation, "discarding stale extraction response");
                    return;
                }
                self.fetch_loading = false;
                self.panels.apply_extraction(&result);
                self.reset_extraction_scrolls();
                self.status_message = Some(format!("Extracted {}", result.url));
            }
            AsyncMessage::ExtractFailed {
                generation,
                message,
            } => {
                if generation != self.fetch_generation {
                    tracing::debug!(generation, "discarding stale extraction error");
                    return;
                }
                self.fetch_loading = false;
                self.status_message = Some("Fetch failed".to_string());
                self.error_popup = Some(ErrorPopup {
                    title: "Fetch Failed".to_string(),
                    message,
                });
            }
            AsyncMessage::AutopilotLoaded {
                generation,
                response,
            } => {
                if generation != self.autopilot_generation {
                    tracing::debug!(generation, "discarding stale autopilot response");
                    return;
                }
                self.autopilot_loading = false;

                // Each field renders independently; absent fields leave
                // their regions unchanged
                if let Some(meta) = &response.meta {
                    self.panels.apply_extraction(meta);
                    self.reset_extraction_scrolls();
                }
                if let Some(summary) = &response.summary {
                    self.panels.apply_summary(summary);
                    self.summary_scroll = 0;
                }
                self.status_message = Some(match (&response.meta, &response.summary) {
                    (Some(_), Some(_)) => "Autopilot complete".to_string(),
                    (Some(_), None) => "Autopilot: extraction only".to_string(),
                    (None, Some(_)) => "Autopilot: summary only".to_string(),
                    (None, None) => "Autopilot returned nothing".to_string(),
                });
            }
            AsyncMessage::AutopilotFailed {
                generation,
                message,
            } => {
                if generation != self.autopilot_generation {
                    tracing::debug!(generation, "discarding stale autopilot error");
                    return;
                }
                self.autopilot_loading = false;
                self.status_message = Some("Autopilot failed".to_string());
                self.error_popup = Some(ErrorPopup {
                    title: "Autopilot Failed".to_string(),
                    message,
                });
            }
            AsyncMessage::SummaryLoaded { generation, lines } => {
                if generation != self.summarize_generation {
                    tracing::debug!(generation, "discarding stale summary response");
                    return;
                }
                self.summarize_loading = false;
                // Absent summary was already defaulted to empty: the region
                // clears rather than going stale
                let count = lines.len();
                self.panels.apply_summary(&lines);
                self.summary_scroll = 0;
                self.status_message = Some(format!("Summary: {count} lines"));
            }
            AsyncMessage::SummaryFailed {
                generation,
                message,
            } => {
                if generation != self.summarize_generation {
                    tracing::debug!(generation, "discarding stale summary error");
                    return;
                }
                self.summarize_loading = false;
                self.status_message = Some("Summarize failed".to_string());
                self.error_popup = Some(ErrorPopup {
                    title: "Summarize Failed".to_string(),
                    message,
                });
            }
        }
    }

    fn reset_extraction_scrolls(&mut self) {
        self.text_scroll = 0;
        self.headings_scroll = 0;
        self.links_scroll = 0;
        self.prices_scroll = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input handling
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) {
        // If help is shown, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Error popup blocks all input except dismissal
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                self.error_popup = None;
            }
            return;
        }

        // Input modes bypass global handlers
        if self.url_input_mode {
            self.handle_url_input_key(key);
            return;
        }
        if self.text_edit_mode {
            self.handle_text_edit_key(key);
            return;
        }

        // Global key handlers
        if key.code == KeyCode::Char('?') {
            self.show_help = true;
            return;
        }

        if is_quit_key(&key) {
            self.running = false;
            return;
        }

        match key.code {
            KeyCode::Char('u') | KeyCode::Char('/') => {
                self.url_input_mode = true;
            }
            KeyCode::Char('e') | KeyCode::Char('i') => {
                self.focus = Region::Text;
                self.text_edit_mode = true;
            }
            KeyCode::Char('f') => self.trigger_fetch(),
            KeyCode::Char('a') => self.trigger_autopilot(),
            KeyCode::Char('s') => self.trigger_summarize(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_focused(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_focused(-1),
            _ => {}
        }
    }

    fn handle_url_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.url_input_mode = false;
                self.trigger_fetch();
            }
            // Ctrl+a from the URL bar runs autopilot instead of plain fetch
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.url_input_mode = false;
                self.trigger_autopilot();
            }
            KeyCode::Esc => {
                self.url_input_mode = false;
            }
            KeyCode::Backspace => {
                self.url_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.url_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_text_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.text_edit_mode = false;
            }
            KeyCode::Enter => {
                self.panels.text.push('\n');
            }
            KeyCode::Backspace => {
                self.panels.text.pop();
            }
            // Ctrl+s summarizes the edited text without leaving edit mode
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.trigger_summarize();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.panels.text.push(c);
            }
            _ => {}
        }
    }

    /// Pasted text goes to whichever input is active; defaults to the URL bar
    fn handle_paste(&mut self, text: String) {
        if self.error_popup.is_some() || self.show_help {
            return;
        }
        if self.text_edit_mode {
            self.panels.text.push_str(&text);
        } else {
            // Strip the newline a terminal paste of a URL usually carries
            self.url_input.push_str(text.trim_end_matches(['\r', '\n']));
            self.url_input_mode = true;
        }
    }

    fn scroll_focused(&mut self, delta: i64) {
        let slot = match self.focus {
            Region::Text => &mut self.text_scroll,
            Region::Headings => &mut self.headings_scroll,
            Region::Links => &mut self.links_scroll,
            Region::Prices => &mut self.prices_scroll,
            Region::Summary => &mut self.summary_scroll,
        };
        if delta < 0 {
            *slot = slot.saturating_sub(delta.unsigned_abs() as usize);
        } else {
            *slot = slot.saturating_add(delta as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockBackend;
    use crate::api::models::SummaryResponse;

    fn test_app(backend: MockBackend) -> App {
        App::new(Arc::new(backend), &Config::default())
    }

    fn sample_extraction() -> ExtractionResult {
        ExtractionResult {
            url: "https://a".into(),
            title: "T".into(),
            text: "hi".into(),
            headings: vec!["H1".into()],
            links: vec!["l1".into(), "l2".into()],
            prices: vec!["$1".into()],
        }
    }

    #[test]
    fn empty_url_aborts_fetch_before_any_request() {
        // No expectations on the mock: a backend call would panic
        let mut app = test_app(MockBackend::new());
        app.url_input = "   ".into();

        app.trigger_fetch();

        assert!(app.error_popup.is_some());
        assert!(!app.fetch_loading);
        assert_eq!(app.fetch_generation, 0);
    }

    #[test]
    fn empty_url_aborts_autopilot_before_any_request() {
        let mut app = test_app(MockBackend::new());
        app.url_input.clear();

        app.trigger_autopilot();

        assert!(app.error_popup.is_some());
        assert!(!app.autopilot_loading);
        assert_eq!(app.autopilot_generation, 0);
    }

    #[test]
    fn stale_extraction_response_is_discarded() {
        let mut app = test_app(MockBackend::new());
        app.fetch_generation = 2;

        app.handle_async_message(AsyncMessage::ExtractLoaded {
            generation: 1,
            result: Box::new(sample_extraction()),
        });

        assert!(app.panels.meta.is_empty());
        assert!(app.panels.headings.is_empty());
    }

    #[test]
    fn current_extraction_response_is_applied() {
        let mut app = test_app(MockBackend::new());
        app.fetch_generation = 2;
        app.fetch_loading = true;

        app.handle_async_message(AsyncMessage::ExtractLoaded {
            generation: 2,
            result: Box::new(sample_extraction()),
        });

        assert!(!app.fetch_loading);
        assert_eq!(app.panels.text, "hi");
        assert_eq!(app.panels.headings.items(), ["H1"]);
    }

    #[test]
    fn stale_error_does_not_raise_popup() {
        let mut app = test_app(MockBackend::new());
        app.fetch_generation = 3;

        app.handle_async_message(AsyncMessage::ExtractFailed {
            generation: 2,
            message: "connection refused".into(),
        });

        assert!(app.error_popup.is_none());
    }

    #[test]
    fn autopilot_summary_only_leaves_extraction_regions() {
        let mut app = test_app(MockBackend::new());
        app.panels.apply_extraction(&sample_extraction());
        app.autopilot_generation = 1;

        app.handle_async_message(AsyncMessage::AutopilotLoaded {
            generation: 1,
            response: Box::new(AutopilotResponse {
                meta: None,
                summary: Some(vec!["s1".into()]),
            }),
        });

        // Extraction regions keep their prior state
        assert_eq!(app.panels.text, "hi");
        assert_eq!(app.panels.headings.items(), ["H1"]);
        assert_eq!(app.panels.summary.items(), ["s1"]);
    }

    #[test]
    fn summary_response_replaces_prior_items() {
        let mut app = test_app(MockBackend::new());
        app.panels.apply_summary(&["old1".into(), "old2".into(), "old3".into()]);
        app.summarize_generation = 1;

        app.handle_async_message(AsyncMessage::SummaryLoaded {
            generation: 1,
            lines: vec!["a".into(), "b".into()],
        });

        assert_eq!(app.panels.summary.items(), ["a", "b"]);
    }

    #[test]
    fn missing_summary_clears_rather_than_staying_stale() {
        let mut app = test_app(MockBackend::new());
        app.panels.apply_summary(&["old".into()]);
        app.summarize_generation = 1;

        app.handle_async_message(AsyncMessage::SummaryLoaded {
            generation: 1,
            lines: Vec::new(),
        });

        assert!(app.panels.summary.is_empty());
    }

    #[tokio::test]
    async fn fetch_round_trip_through_the_backend_seam() {
        let mut mock = MockBackend::new();
        mock.expect_fetch_extract()
            .withf(|url| url == "https://a")
            .returning(|_| Ok(sample_extraction()));

        let mut app = test_app(mock);
        app.url_input = "  https://a  ".into();

        app.trigger_fetch();
        assert!(app.fetch_loading);
        assert_eq!(app.fetch_generation, 1);

        let msg = app.async_rx.recv().await.expect("task result");
        app.handle_async_message(msg);

        assert!(!app.fetch_loading);
        assert_eq!(app.panels.links.items(), ["l1", "l2"]);
    }

    #[tokio::test]
    async fn retrigger_supersedes_in_flight_request() {
        let mut mock = MockBackend::new();
        mock.expect_summarize()
            .returning(|_| Ok(SummaryResponse {
                summary: Some(vec!["first".into()]),
            }));

        let mut app = test_app(mock);
        app.panels.text = "some text".into();

        app.trigger_summarize();
        let first = app.async_rx.recv().await.expect("first result");

        // Second trigger bumps the generation before the first response
        // is handled; the first response must be dropped
        app.trigger_summarize();
        app.handle_async_message(first);
        assert!(app.panels.summary.is_empty());
        assert!(app.summarize_loading);

        let second = app.async_rx.recv().await.expect("second result");
        app.handle_async_message(second);
        assert_eq!(app.panels.summary.items(), ["first"]);
        assert!(!app.summarize_loading);
    }
}
