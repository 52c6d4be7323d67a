use crate::actions::{apply_action, AppAction};
use crate::config::Config;
use crate::state::AppState;
use crate::store::DefinitionStore;
use crate::tasks::{AppEvent, TaskRunner};
use crate::types::{InputMode, Notification};
use crate::ui::{self, draw};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// How long a footer status message stays up
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub struct App {
    state: AppState,
    list_state: ListState,
    tasks: TaskRunner,
    events: UnboundedReceiver<AppEvent>,
    event_handler: ui::EventHandler,
    config: Config,
    spinner_index: usize,
    last_tick: Instant,
    /// Name the last background load was started for
    loaded_for: Option<String>,
    /// Status message on screen and when it first appeared
    status_shown: Option<(String, Instant)>,
    listed_once: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = DefinitionStore::new(&config.storage.apis_dir);
        let (tasks, events) = TaskRunner::new(store);

        let mut state = AppState {
            prettify: config.ui.prettify,
            ..Default::default()
        };
        if let Some(name) = config.ui.last_selected.clone() {
            apply_action(AppAction::SelectByName(name), &mut state);
        }

        Self {
            state,
            list_state: ListState::default(),
            tasks,
            events,
            event_handler: ui::EventHandler::new(),
            config,
            spinner_index: 0,
            last_tick: Instant::now(),
            loaded_for: None,
            status_shown: None,
            listed_once: false,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        tracing::info!(
            "starting with store at {}",
            self.tasks.store().dir().display()
        );
        apply_action(AppAction::StartLoadingList, &mut self.state);
        self.tasks.refresh_list();

        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % draw::SPINNER.len();
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            while let Ok(event) = self.events.try_recv() {
                self.handle_app_event(event);
            }

            self.event_handler
                .handle_events(&mut self.state, &self.tasks)?;

            self.sync_selection();
            self.expire_status();
        }

        self.config.ui.last_selected = self.state.selected_name().map(str::to_string);
        if let Err(e) = self.config.save() {
            tracing::warn!("could not save config: {e}");
        }
        tracing::info!("exiting");

        Ok(())
    }

    fn apply(&mut self, action: AppAction) {
        apply_action(action, &mut self.state);
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DefinitionsListed(Ok(names)) => {
                let empty = names.is_empty();
                self.apply(AppAction::SetDefinitions(names));

                if empty && !self.listed_once && self.state.input_mode == InputMode::Normal {
                    tracing::info!("store is empty, opening add form");
                    self.apply(AppAction::OpenAddForm);
                }
                self.listed_once = true;
            }
            AppEvent::DefinitionsListed(Err(e)) => {
                self.apply(AppAction::SetListError(e.to_string()));
                self.apply(AppAction::Notify(Notification::from(&e)));
            }
            AppEvent::DefinitionLoaded {
                result: Ok(definition),
                ..
            } => {
                self.apply(AppAction::SetCurrentDefinition(definition));
            }
            AppEvent::DefinitionLoaded {
                name,
                result: Err(e),
            } => {
                if self.state.selected_name() == Some(name.as_str()) {
                    self.apply(AppAction::Notify(Notification::from(&e)));
                }
            }
            AppEvent::DefinitionSaved {
                name,
                mode,
                result: Ok(()),
            } => {
                tracing::info!("saved {name} ({mode:?})");
                self.apply(AppAction::CloseForm);
                self.apply(AppAction::SelectByName(name.clone()));
                self.apply(AppAction::StartLoadingList);
                self.tasks.refresh_list();

                // Same name is still selected, so the selection sync won't reload it
                if self.loaded_for.as_deref() == Some(name.as_str()) {
                    self.tasks.load(name.clone());
                }
                self.apply(AppAction::SetStatus(format!("✓ Saved {name}")));
            }
            AppEvent::DefinitionSaved {
                result: Err(e), ..
            } => {
                self.apply(AppAction::Notify(Notification::from(&e)));
            }
            AppEvent::ResponseReceived {
                request_id,
                name,
                result,
            } => {
                if !self.state.is_pending(request_id) {
                    tracing::debug!("dropping stale completion #{request_id} for {name}");
                    return;
                }
                match result {
                    Ok(response) => {
                        if !response.is_success() {
                            tracing::warn!("{name} answered {}", response.status);
                        }
                        self.apply(AppAction::ResponseReceived {
                            request_id,
                            name,
                            response,
                        });
                    }
                    Err(e) => {
                        self.apply(AppAction::RequestFailed(request_id));
                        self.apply(AppAction::Notify(Notification::from(&e)));
                    }
                }
            }
            AppEvent::ResponseSaved(Ok(path)) => {
                self.apply(AppAction::SetStatus(format!(
                    "✓ Response saved to {}",
                    path.display()
                )));
            }
            AppEvent::ResponseSaved(Err(e)) => {
                self.apply(AppAction::Notify(Notification::from(&e)));
            }
        }
    }

    /// Start a background load whenever the selected name changes
    fn sync_selection(&mut self) {
        let selected = self.state.selected_name().map(str::to_string);
        if selected != self.loaded_for {
            if let Some(name) = &selected {
                tracing::debug!("selection moved to {name}");
                self.tasks.load(name.clone());
            }
            self.loaded_for = selected;
        }

        let index = (!self.state.definitions.is_empty()).then_some(self.state.selected_index);
        self.list_state.select(index);
    }

    fn expire_status(&mut self) {
        let Some(message) = self.state.status_message.clone() else {
            self.status_shown = None;
            return;
        };

        let since = match &self.status_shown {
            Some((shown, since)) if *shown == message => Some(*since),
            _ => None,
        };
        match since {
            Some(since) if since.elapsed() >= STATUS_TIMEOUT => {
                self.apply(AppAction::ClearStatus);
                self.status_shown = None;
            }
            Some(_) => {}
            None => self.status_shown = Some((message, Instant::now())),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        // Create main layout: Header, Body, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[1]);

        draw::render_header(
            frame,
            main_chunks[0],
            self.tasks.store().dir(),
            &self.state,
            self.spinner_index,
        );

        draw::render_definitions_panel(
            frame,
            body_chunks[0],
            &self.state,
            self.spinner_index,
            &mut self.list_state,
        );

        draw::render_details_panel(frame, body_chunks[1], &self.state, self.spinner_index);

        draw::render_footer(frame, main_chunks[2], &self.state);

        // Render modals LAST; notifications sit above everything
        match self.state.input_mode {
            InputMode::Form => draw::render_form_modal(frame, &self.state),
            InputMode::SavingResponse => draw::render_save_modal(frame, &self.state),
            InputMode::Normal | InputMode::EditingParams => {}
        }
        if let Some(notification) = &self.state.notification {
            draw::render_notification_modal(frame, notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DoctorError;
    use crate::types::{ApiResponse, FormMode};
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn test_app() -> (TempDir, App) {
        let root = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.apis_dir = root.path().to_path_buf();
        (root, App::new(config))
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn response(body: &str) -> ApiResponse {
        ApiResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string(),
            duration: Duration::from_millis(3),
        }
    }

    /// Receive the next worker event and feed it back into the app
    async fn pump(app: &mut App) {
        let event = app.events.recv().await.expect("worker event");
        app.handle_app_event(event);
    }

    #[test]
    fn test_empty_store_opens_add_form_once() {
        let (_root, mut app) = test_app();

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(Vec::new())));
        assert_eq!(app.state.input_mode, InputMode::Form);
        assert!(app.state.form.is_some());

        app.apply(AppAction::CloseForm);
        app.handle_app_event(AppEvent::DefinitionsListed(Ok(Vec::new())));
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_stored_definitions_do_not_open_form() {
        let (_root, mut app) = test_app();

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha"]))));
        assert_eq!(app.state.input_mode, InputMode::Normal);
        assert_eq!(app.state.selected_name(), Some("alpha"));
    }

    #[test]
    fn test_last_selected_is_restored() {
        let root = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.apis_dir = root.path().to_path_buf();
        config.ui.last_selected = Some("beta".to_string());
        let mut app = App::new(config);

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha", "beta"]))));
        assert_eq!(app.state.selected_name(), Some("beta"));
    }

    #[test]
    fn test_list_error_notifies() {
        let (_root, mut app) = test_app();
        let error = DoctorError::Io(std::io::Error::other("disk gone"));

        app.handle_app_event(AppEvent::DefinitionsListed(Err(error)));
        assert!(matches!(app.state.loading_state, crate::types::LoadingState::Error(_)));
        assert!(app.state.notification.as_ref().is_some_and(|n| n.is_error));
    }

    #[tokio::test]
    async fn test_saved_definition_is_selected_and_loaded() {
        let (_root, mut app) = test_app();
        app.tasks.store().save("alpha", "", "", "https://a.test").unwrap();

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha"]))));
        app.sync_selection();
        pump(&mut app).await;
        assert_eq!(app.state.current_definition().map(|d| d.name.as_str()), Some("alpha"));

        app.apply(AppAction::OpenAddForm);
        app.tasks.store().save("beta", "beta help", "", "https://b.test").unwrap();
        app.handle_app_event(AppEvent::DefinitionSaved {
            name: "beta".to_string(),
            mode: FormMode::Add,
            result: Ok(()),
        });
        assert!(app.state.form.is_none());
        assert_eq!(app.state.input_mode, InputMode::Normal);
        assert_eq!(app.state.status_message.as_deref(), Some("✓ Saved beta"));

        // The refreshed listing brings the new name in and selects it
        pump(&mut app).await;
        assert_eq!(app.state.selected_name(), Some("beta"));

        app.sync_selection();
        pump(&mut app).await;
        let current = app.state.current_definition().expect("beta loaded");
        assert_eq!(current.name, "beta");
        assert_eq!(current.help.as_deref(), Some("beta help"));
    }

    #[tokio::test]
    async fn test_edit_save_reloads_selected_definition() {
        let (_root, mut app) = test_app();
        app.tasks.store().save("alpha", "", "", "https://a.test").unwrap();

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha"]))));
        app.sync_selection();
        pump(&mut app).await;

        app.tasks.store().save("alpha", "", "", "https://a2.test").unwrap();
        app.handle_app_event(AppEvent::DefinitionSaved {
            name: "alpha".to_string(),
            mode: FormMode::Edit,
            result: Ok(()),
        });

        // Listing and reload both arrive, in either order
        pump(&mut app).await;
        pump(&mut app).await;
        assert_eq!(
            app.state.current_definition().map(|d| d.url.as_str()),
            Some("https://a2.test")
        );
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let (_root, mut app) = test_app();
        app.apply(AppAction::OpenAddForm);

        app.handle_app_event(AppEvent::DefinitionSaved {
            name: ".hidden".to_string(),
            mode: FormMode::Add,
            result: Err(DoctorError::Validation("bad name".to_string())),
        });
        assert_eq!(app.state.input_mode, InputMode::Form);
        assert!(app.state.notification.as_ref().is_some_and(|n| n.is_error));
    }

    #[test]
    fn test_failed_load_notifies_only_for_selection() {
        let (_root, mut app) = test_app();
        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha", "beta"]))));

        app.handle_app_event(AppEvent::DefinitionLoaded {
            name: "beta".to_string(),
            result: Err(DoctorError::NotFound("beta".to_string())),
        });
        assert!(app.state.notification.is_none());

        app.handle_app_event(AppEvent::DefinitionLoaded {
            name: "alpha".to_string(),
            result: Err(DoctorError::Parse {
                name: "alpha".to_string(),
                message: "expected a JSON object".to_string(),
            }),
        });
        let notification = app.state.notification.clone().expect("notification");
        assert!(notification.is_error);
        assert_eq!(notification.title, "Parse Error");
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let (_root, mut app) = test_app();
        app.apply(AppAction::RequestStarted(1));
        app.apply(AppAction::RequestStarted(2));

        app.handle_app_event(AppEvent::ResponseReceived {
            request_id: 1,
            name: "alpha".to_string(),
            result: Ok(response("old")),
        });
        app.handle_app_event(AppEvent::ResponseReceived {
            request_id: 1,
            name: "alpha".to_string(),
            result: Err(DoctorError::Network("late".to_string())),
        });
        assert!(app.state.response.is_none());
        assert!(app.state.notification.is_none());
        assert_eq!(app.state.pending_request, Some(2));

        app.handle_app_event(AppEvent::ResponseReceived {
            request_id: 2,
            name: "alpha".to_string(),
            result: Ok(response("new")),
        });
        assert_eq!(app.state.response.as_ref().map(|v| v.text.as_str()), Some("new"));
        assert!(app.state.pending_request.is_none());
    }

    #[test]
    fn test_failed_request_notifies() {
        let (_root, mut app) = test_app();
        app.apply(AppAction::RequestStarted(1));

        app.handle_app_event(AppEvent::ResponseReceived {
            request_id: 1,
            name: "alpha".to_string(),
            result: Err(DoctorError::Network("connection refused".to_string())),
        });
        assert!(app.state.pending_request.is_none());
        let notification = app.state.notification.clone().expect("notification");
        assert_eq!(notification.title, "Network Error");
    }

    #[test]
    fn test_response_saved_events() {
        let (_root, mut app) = test_app();

        app.handle_app_event(AppEvent::ResponseSaved(Ok(PathBuf::from("out.txt"))));
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("✓ Response saved to out.txt")
        );

        let error = DoctorError::Io(std::io::Error::other("read-only"));
        app.handle_app_event(AppEvent::ResponseSaved(Err(error)));
        assert!(app.state.notification.as_ref().is_some_and(|n| n.is_error));
    }

    #[tokio::test]
    async fn test_sync_selection_follows_selected_index() {
        let (_root, mut app) = test_app();
        app.sync_selection();
        assert_eq!(app.list_state.selected(), None);
        assert_eq!(app.loaded_for, None);

        app.handle_app_event(AppEvent::DefinitionsListed(Ok(names(&["alpha", "beta"]))));
        app.sync_selection();
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.loaded_for.as_deref(), Some("alpha"));

        app.apply(AppAction::SelectNext);
        app.sync_selection();
        assert_eq!(app.list_state.selected(), Some(1));
        assert_eq!(app.loaded_for.as_deref(), Some("beta"));
    }

    #[test]
    fn test_status_expires_after_timeout() {
        let (_root, mut app) = test_app();
        app.apply(AppAction::SetStatus("hello".to_string()));

        app.expire_status();
        assert_eq!(app.state.status_message.as_deref(), Some("hello"));

        let long_ago = Instant::now() - STATUS_TIMEOUT - Duration::from_millis(10);
        app.status_shown = Some(("hello".to_string(), long_ago));
        app.expire_status();
        assert!(app.state.status_message.is_none());
        assert!(app.status_shown.is_none());
    }

    #[test]
    fn test_new_status_restarts_timer() {
        let (_root, mut app) = test_app();
        let long_ago = Instant::now() - STATUS_TIMEOUT - Duration::from_millis(10);
        app.status_shown = Some(("old".to_string(), long_ago));
        app.apply(AppAction::SetStatus("new".to_string()));

        app.expire_status();
        assert_eq!(app.state.status_message.as_deref(), Some("new"));
        assert_eq!(app.status_shown.as_ref().map(|(m, _)| m.as_str()), Some("new"));
    }
}
