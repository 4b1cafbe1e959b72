use crate::analysis::{FrequencyTable, SUGGESTION_LIMIT};
use crate::config::StudioConfig;
use crate::document::{self, Document, FileDetails};
use crate::error::Result as StudioResult;
use crate::event::{AppEvent, Event, EventHandler};
use crate::session::Session;
use crate::util::image::ImageRenderer;
use color_eyre::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
};
use ratatui_image::picker::Picker;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Main,
    OpenPrompt,
}

/// Everything shown for the current document, recomputed after each
/// interaction.
#[derive(Debug, Clone, Default)]
pub struct DocumentView {
    pub details: FileDetails,
    pub preview: String,
    pub suggestions: Vec<String>,
    pub frequencies: FrequencyTable,
}

impl DocumentView {
    /// Extracts the document once and derives every part from that text.
    pub fn build(session: &Session) -> StudioResult<Self> {
        let text = session.text()?;
        let analysis = session.analyze_text(&text);
        Ok(Self {
            details: session.details(),
            preview: document::preview(&text),
            suggestions: analysis.suggestions,
            frequencies: analysis.frequencies,
        })
    }
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Current app mode/screen
    pub mode: AppMode,
    pub config: StudioConfig,
    /// The uploaded document and the user's controls.
    pub session: Option<Session>,
    pub view: Option<DocumentView>,
    /// Highlighted row in the suggestion list.
    pub selected_suggestion: usize,
    /// First visible row of the word count table.
    pub table_offset: usize,
    /// Path typed into the open prompt.
    pub prompt_input: String,
    pub status: String,
    /// Terminal graphics support, detected once at startup.
    pub picker: Option<Picker>,
    pub cloud_preview: Option<ImageRenderer>,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: StudioConfig, picker: Option<Picker>) -> Self {
        Self {
            running: true,
            mode: AppMode::Main,
            config,
            session: None,
            view: None,
            selected_suggestion: 0,
            table_offset: 0,
            prompt_input: String::new(),
            status: "Press 'o' to open a PDF, text or Word document".to_string(),
            picker,
            cloud_preview: None,
            events: EventHandler::new(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.events.listen();
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                // save power
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {}
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event)?;
                    }
                    needs_redraw = true;
                }
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.events.send(AppEvent::Quit);
            return Ok(());
        }

        if self.mode == AppMode::OpenPrompt {
            match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::PromptCancel),
                KeyCode::Enter => self.events.send(AppEvent::PromptSubmit),
                KeyCode::Backspace => self.events.send(AppEvent::PromptBackspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::PromptInput(ch)),
                _ => {}
            }
            return Ok(());
        }

        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('o') => self.events.send(AppEvent::OpenPrompt),
            KeyCode::Char('s') => self.events.send(AppEvent::ToggleStandardStopwords),
            KeyCode::Left | KeyCode::Char('-') => self.events.send(AppEvent::ResolutionDown),
            KeyCode::Right | KeyCode::Char('+') => self.events.send(AppEvent::ResolutionUp),
            KeyCode::Char('f') => self.events.send(AppEvent::CycleFormat),
            KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::SuggestionUp),
            KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::SuggestionDown),
            KeyCode::Char(' ') | KeyCode::Enter => self.events.send(AppEvent::ToggleSuggestion),
            KeyCode::PageUp => self.events.send(AppEvent::ScrollTableUp),
            KeyCode::PageDown => self.events.send(AppEvent::ScrollTableDown),
            KeyCode::Char('g') => self.events.send(AppEvent::GenerateCloud),
            KeyCode::Char('d') => self.events.send(AppEvent::DownloadCsv),
            _ => {}
        }
        Ok(())
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::OpenPrompt => {
                self.prompt_input.clear();
                self.mode = AppMode::OpenPrompt;
            }
            AppEvent::PromptInput(ch) => self.prompt_input.push(ch),
            AppEvent::PromptBackspace => {
                self.prompt_input.pop();
            }
            AppEvent::PromptCancel => {
                self.prompt_input.clear();
                self.mode = AppMode::Main;
            }
            AppEvent::PromptSubmit => {
                self.mode = AppMode::Main;
                let input = std::mem::take(&mut self.prompt_input);
                let input = input.trim();
                if !input.is_empty() {
                    self.open(PathBuf::from(input), None);
                }
            }
            AppEvent::ToggleStandardStopwords => self.update_settings(|session| {
                let settings = &mut session.settings;
                settings.use_standard_stopwords = !settings.use_standard_stopwords;
            }),
            AppEvent::ResolutionUp => self.update_settings(|session| {
                session.settings.increase_resolution();
            }),
            AppEvent::ResolutionDown => self.update_settings(|session| {
                session.settings.decrease_resolution();
            }),
            AppEvent::CycleFormat => self.update_settings(|session| {
                session.settings.format = session.settings.format.next();
            }),
            AppEvent::SuggestionUp => {
                self.selected_suggestion = self.selected_suggestion.saturating_sub(1);
            }
            AppEvent::SuggestionDown => {
                let count = self.suggestion_count();
                if count > 0 && self.selected_suggestion + 1 < count {
                    self.selected_suggestion += 1;
                }
            }
            AppEvent::ToggleSuggestion => self.toggle_selected_suggestion(),
            AppEvent::ScrollTableUp => {
                self.table_offset = self.table_offset.saturating_sub(10);
            }
            AppEvent::ScrollTableDown => {
                let rows = self.view.as_ref().map_or(0, |view| view.frequencies.len());
                self.table_offset = (self.table_offset + 10).min(rows.saturating_sub(1));
            }
            AppEvent::GenerateCloud => self.generate_cloud(),
            AppEvent::DownloadCsv => self.download_csv(),
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Load a document from disk and make it the current upload. Settings
    /// start from the configured defaults.
    pub fn open(&mut self, path: PathBuf, mime: Option<&str>) {
        let document = match Document::open(&path, mime) {
            Ok(document) => document,
            Err(e) => {
                error!("Failed to open {}: {}", path.display(), e);
                self.status = format!("Failed to open {}: {}", path.display(), e);
                return;
            }
        };

        self.session = Some(Session::new(document, self.config.defaults.clone()));
        self.selected_suggestion = 0;
        self.table_offset = 0;
        self.cloud_preview = None;
        self.refresh_view();

        if let (Some(view), true) = (&self.view, self.status.is_empty()) {
            self.status = format!(
                "Opened {} ({} words, {} distinct)",
                view.details.filename,
                view.frequencies.total(),
                view.frequencies.len()
            );
        }
    }

    /// Recompute the document view from the session.
    fn refresh_view(&mut self) {
        self.status.clear();
        let Some(session) = &self.session else {
            self.view = None;
            return;
        };

        match DocumentView::build(session) {
            Ok(view) => {
                let count = view.suggestions.len();
                if self.selected_suggestion >= count {
                    self.selected_suggestion = count.saturating_sub(1);
                }
                self.view = Some(view);
            }
            Err(e) => {
                error!("Failed to read {}: {}", session.document.name, e);
                self.status = format!("Failed to read {}: {}", session.document.name, e);
                self.view = None;
            }
        }
    }

    fn update_settings(&mut self, change: impl FnOnce(&mut Session)) {
        let Some(session) = self.session.as_mut() else {
            self.status = "Open a document first".to_string();
            return;
        };
        change(session);
        self.refresh_view();
    }

    fn suggestion_count(&self) -> usize {
        self.view
            .as_ref()
            .map_or(0, |view| view.suggestions.len().min(SUGGESTION_LIMIT))
    }

    fn toggle_selected_suggestion(&mut self) {
        let Some(word) = self
            .view
            .as_ref()
            .and_then(|view| view.suggestions.get(self.selected_suggestion))
            .cloned()
        else {
            return;
        };

        let mut excluded = false;
        self.update_settings(|session| {
            excluded = session.settings.toggle_stopword(&word);
        });
        if self.status.is_empty() {
            self.status = if excluded {
                format!("Excluding '{}'", word)
            } else {
                format!("Including '{}'", word)
            };
        }
    }

    pub fn generate_cloud(&mut self) {
        let Some(session) = &self.session else {
            self.status = "Open a document first".to_string();
            return;
        };

        let saved = session
            .generate_cloud(&self.config.cloud)
            .and_then(|output| {
                let path = output.download.save(&self.config.output_dir)?;
                Ok((output, path))
            });

        match saved {
            Ok((output, path)) => {
                self.cloud_preview = self
                    .picker
                    .as_ref()
                    .map(|picker| ImageRenderer::from_rgb(picker, &output.image));
                self.status = format!(
                    "Saved {} ({} words drawn)",
                    path.display(),
                    output.layout.len()
                );
            }
            Err(e) => {
                error!("Cloud generation failed: {}", e);
                self.status = format!("Cloud generation failed: {}", e);
            }
        }
    }

    pub fn download_csv(&mut self) {
        let Some(session) = &self.session else {
            self.status = "Open a document first".to_string();
            return;
        };

        match session
            .frequency_csv()
            .and_then(|download| download.save(&self.config.output_dir))
        {
            Ok(path) => {
                info!("Saved word counts to {}", path.display());
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                error!("CSV export failed: {}", e);
                self.status = format!("CSV export failed: {}", e);
            }
        }
    }
}
