// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the stores, the drawer,
//! and the mutation channel.
//!
//! `App::update` is the single synchronous mutation point for both stores.
//! Because Iced runs it on one thread with no suspension inside a handler,
//! multi-write actions like clearing filters commit atomically as far as any
//! render can observe. The only asynchronous work is the signal update, which
//! runs as a `Task` and reports back through [`Message::Bridge`].

use crate::api::{ApiClient, SignalCache};
use crate::config;
use crate::error::ApiError;
use crate::filters::{FilterState, SavedFilter};
use crate::signal::Signal;
use crate::stores::{FilterStore, SignalDraft};
use crate::ui::clear_filters;
use crate::ui::filters_drawer::{self, Effect as DrawerEffect};
use crate::ui::signal_filters::{self, Effect as BridgeEffect};
use iced::widget::{button, scrollable, Column, Row, Text};
use iced::{window, Element, Length, Task, Theme};

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 620;

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional server base URL override (otherwise taken from the config file).
    pub server: Option<String>,
}

/// Root application state wiring the stores, cache, and UI components.
pub struct App {
    api: ApiClient,
    cache: SignalCache,
    signals: Vec<Signal>,
    selected_signal_id: Option<String>,
    saved_filters: Vec<SavedFilter>,
    filter_store: FilterStore,
    draft: SignalDraft,
    drawer: filters_drawer::State,
    bridge: signal_filters::State,
    load_error: Option<ApiError>,
    /// Saved-filter selection restored from the config file, held until the
    /// initial signal load decides whether it still applies.
    restored_selection: Option<String>,
    /// Where to persist preferences. `None` (the test default) disables
    /// persistence entirely.
    config_path: Option<std::path::PathBuf>,
}

/// Top-level messages consumed by [`App::update`]. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    SignalsLoaded(Result<Vec<Signal>, ApiError>),
    SavedFiltersLoaded(Result<Vec<SavedFilter>, ApiError>),
    SignalSelected(String),
    SavedFilterSelected(String),
    OpenDrawer,
    Drawer(filters_drawer::Message),
    Bridge(signal_filters::Message),
    ClearFilters(clear_filters::Message),
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(|state: &App| state.title())
        .theme(App::theme)
        .window(window_settings())
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            api: ApiClient::new(config::DEFAULT_SERVER_URL),
            cache: SignalCache::new(),
            signals: Vec::new(),
            selected_signal_id: None,
            saved_filters: Vec::new(),
            filter_store: FilterStore::new(),
            draft: SignalDraft::new(),
            drawer: filters_drawer::State::new(),
            bridge: signal_filters::State::new(),
            load_error: None,
            restored_selection: None,
            config_path: None,
        }
    }
}

impl App {
    /// Initializes application state and kicks off the initial fetches.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let server = flags
            .server
            .or(config.server_url)
            .unwrap_or_else(|| config::DEFAULT_SERVER_URL.to_string());

        let mut app = App {
            api: ApiClient::new(server),
            restored_selection: config.selected_saved_filter_id,
            config_path: config::default_config_path(),
            ..Self::default()
        };

        let signals_api = app.api.clone();
        let saved_api = app.api.clone();
        let task = Task::batch([
            Task::perform(
                async move { signals_api.fetch_signals().await },
                Message::SignalsLoaded,
            ),
            Task::perform(
                async move { saved_api.fetch_saved_filters().await },
                Message::SavedFiltersLoaded,
            ),
        ]);

        (app, task)
    }

    fn title(&self) -> String {
        "Signal Desk".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn selected_signal(&self) -> Option<&Signal> {
        let id = self.selected_signal_id.as_deref()?;
        self.cache.get(id)
    }

    /// Loads a signal's stored filter state into the editing stores.
    fn load_signal_filters(&mut self, filters: &FilterState) {
        self.draft
            .set_applied_filters_name(filters.applied_filter_name.clone());
        self.filter_store
            .set_selected_saved_filter_id(filters.selected_saved_filter_id.clone());
        self.filter_store.apply_filters(filters.clone());
    }

    fn persist_selection(&self) {
        let Some(path) = &self.config_path else {
            return;
        };

        let config = config::Config {
            server_url: Some(self.api.base_url().to_string()),
            selected_saved_filter_id: self
                .filter_store
                .selected_saved_filter_id()
                .map(str::to_string),
        };
        if let Err(err) = config::save_to_path(&config, path) {
            eprintln!("Failed to save config: {err}");
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SignalsLoaded(Ok(signals)) => {
                self.load_error = None;
                self.cache.replace_all(signals.clone());
                if self.selected_signal_id.is_none() {
                    if let Some(first) = signals.first() {
                        self.selected_signal_id = Some(first.id.clone());
                        let filters = first.filters.clone();
                        self.load_signal_filters(&filters);

                        // A selection remembered from the last session wins
                        // over a signal that carries none of its own.
                        let restored = self.restored_selection.take();
                        if filters.selected_saved_filter_id.is_none() {
                            if let Some(id) = restored {
                                self.filter_store.set_selected_saved_filter_id(Some(id));
                            }
                        }
                    }
                }
                self.signals = signals;
                Task::none()
            }
            Message::SignalsLoaded(Err(err)) => {
                eprintln!("Failed to fetch signals: {err}");
                self.load_error = Some(err);
                Task::none()
            }
            Message::SavedFiltersLoaded(Ok(saved)) => {
                self.saved_filters = saved;
                Task::none()
            }
            Message::SavedFiltersLoaded(Err(err)) => {
                // Saved sets are an enhancement; the editing flow works without them.
                eprintln!("Failed to fetch saved filters: {err}");
                Task::none()
            }
            Message::SignalSelected(id) => {
                if let Some(signal) = self.cache.get(&id) {
                    let filters = signal.filters.clone();
                    self.selected_signal_id = Some(id);
                    self.load_signal_filters(&filters);
                    self.drawer.close();
                }
                Task::none()
            }
            Message::SavedFilterSelected(id) => {
                let Some(saved) = self.saved_filters.iter().find(|s| s.id == id).cloned() else {
                    return Task::none();
                };

                // Selection only prefills the drawer; the name and id reach
                // the stores together with the criteria once the apply is
                // confirmed, so cancelling leaves both stores untouched.
                let prefill = FilterState {
                    criteria: saved.state.criteria,
                    applied_filter_name: Some(saved.name),
                    selected_saved_filter_id: Some(saved.id),
                };
                self.drawer.handle(filters_drawer::Message::Open(prefill));
                Task::none()
            }
            Message::OpenDrawer => {
                let current = self.filter_store.filters().clone();
                self.drawer.handle(filters_drawer::Message::Open(current));
                Task::none()
            }
            Message::Drawer(msg) => match self.drawer.handle(msg) {
                DrawerEffect::Apply(next) => self.apply_confirmed_filters(next),
                DrawerEffect::None => Task::none(),
            },
            Message::Bridge(msg) => {
                if let signal_filters::Message::Completed(Err(err)) = &msg {
                    eprintln!("Signal update failed: {err}");
                }
                match self.bridge.handle(msg) {
                    BridgeEffect::Dispatch(request) => {
                        let api = self.api.clone();
                        Task::perform(
                            async move { api.update_signal(&request).await },
                            |result| Message::Bridge(signal_filters::Message::Completed(result)),
                        )
                    }
                    BridgeEffect::Applied(signal) => {
                        self.commit_confirmed_signal(signal);
                        Task::none()
                    }
                    BridgeEffect::None => Task::none(),
                }
            }
            Message::ClearFilters(clear_filters::Message::Clear) => {
                clear_filters::clear(&mut self.filter_store, &mut self.draft);
                self.persist_selection();
                Task::none()
            }
        }
    }

    /// Routes a confirmed drawer state: through the mutation channel when a
    /// server-side signal is selected, or straight into the store during the
    /// creation flow where no signal exists yet.
    fn apply_confirmed_filters(&mut self, next: FilterState) -> Task<Message> {
        match self.selected_signal() {
            Some(signal) => {
                let msg = signal_filters::Message::Apply {
                    signal: signal.clone(),
                    next,
                };
                self.update(Message::Bridge(msg))
            }
            None => {
                self.load_signal_filters(&next);
                self.persist_selection();
                self.drawer.close();
                Task::none()
            }
        }
    }

    /// Commits a server-confirmed update: invalidate the stale cache entry,
    /// store the fresh signal, and only now move the confirmed filters into
    /// the store (commit-after-confirmation).
    fn commit_confirmed_signal(&mut self, signal: Signal) {
        self.cache.invalidate(&signal.id);
        self.cache.insert(signal.clone());
        if let Some(entry) = self.signals.iter_mut().find(|s| s.id == signal.id) {
            *entry = signal.clone();
        }

        if self.selected_signal_id.as_deref() == Some(signal.id.as_str()) {
            self.load_signal_filters(&signal.filters);
            self.persist_selection();
        }
        self.drawer.close();
    }

    fn view(&self) -> Element<'_, Message> {
        let mut signal_list = Column::new().spacing(4).push(Text::new("Signals").size(20));
        for signal in &self.signals {
            let selected = self.selected_signal_id.as_deref() == Some(signal.id.as_str());
            let label = format!("{} ({})", signal.name, signal.schedule);
            let mut entry = button(Text::new(label)).width(Length::Fill);
            if !selected {
                entry = entry
                    .style(button::secondary)
                    .on_press(Message::SignalSelected(signal.id.clone()));
            }
            signal_list = signal_list.push(entry);
        }

        let mut saved_row = Row::new().spacing(4);
        for saved in &self.saved_filters {
            let selected = self.filter_store.selected_saved_filter_id() == Some(saved.id.as_str());
            let mut entry = button(Text::new(saved.name.clone()));
            if selected {
                entry = entry.style(button::primary);
            } else {
                entry = entry
                    .style(button::secondary)
                    .on_press(Message::SavedFilterSelected(saved.id.clone()));
            }
            saved_row = saved_row.push(entry);
        }

        let filters = self.filter_store.filters();
        let mut summary = Column::new().spacing(4).push(Text::new("Applied filters").size(20));
        if let Some(name) = self.draft.applied_filters_name() {
            summary = summary.push(Text::new(format!("Saved set: {name}")));
        }
        if filters.criteria.is_empty() {
            summary = summary.push(Text::new("No filters applied"));
        }
        for criterion in &filters.criteria {
            summary = summary.push(Text::new(format!(
                "{} {} {}",
                criterion.field,
                criterion.operator,
                criterion.value.display()
            )));
        }

        let mut actions = Row::new()
            .spacing(8)
            .push(button(Text::new("Edit filters")).on_press(Message::OpenDrawer));
        if let Some(clear) = clear_filters::view(filters) {
            actions = actions.push(clear.map(Message::ClearFilters));
        }

        let mut content = Column::new()
            .spacing(16)
            .padding(16)
            .push(signal_list)
            .push(Text::new("Saved filter sets").size(20))
            .push(saved_row)
            .push(summary)
            .push(actions);

        if let Some(err) = &self.load_error {
            content = content.push(Text::new(format!("Failed to load signals: {err}")));
        }

        if self.drawer.is_open() {
            let confirm_enabled = !self.bridge.is_in_flight();
            content = content.push(self.drawer.view(confirm_enabled).map(Message::Drawer));
        }

        if let Some(status) = self.bridge.status_view() {
            content = content.push(status);
        }

        scrollable(content).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterCriterion, FilterOperator, FilterValue};
    use crate::signal::Schedule;
    use chrono::{TimeZone, Utc};

    fn sample_signal() -> Signal {
        Signal {
            id: "sig-1".to_string(),
            name: "Daily Brief".to_string(),
            schedule: Schedule::Daily,
            updated_at: Utc.with_ymd_and_hms(2026, 8, 1, 6, 0, 0).unwrap(),
            filters: FilterState::default(),
        }
    }

    fn topic_filter() -> FilterState {
        FilterState {
            criteria: vec![FilterCriterion::new(
                "topic",
                FilterOperator::Eq,
                FilterValue::Scalar("AI".to_string()),
            )],
            ..FilterState::default()
        }
    }

    fn app_with_signal() -> App {
        let mut app = App::default();
        let _ = app.update(Message::SignalsLoaded(Ok(vec![sample_signal()])));
        app
    }

    #[test]
    fn signals_loaded_selects_first_and_seeds_store() {
        let app = app_with_signal();
        assert_eq!(app.selected_signal_id.as_deref(), Some("sig-1"));
        assert!(app.filter_store.filters().is_default());
    }

    #[test]
    fn drawer_apply_goes_through_bridge_without_committing() {
        let mut app = app_with_signal();
        let _ = app.update(Message::OpenDrawer);

        let before = app.filter_store.filters().clone();
        let _ = app.update(Message::Drawer(filters_drawer::Message::FieldChanged {
            row: 0,
            field: "topic".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::OperatorSelected {
            row: 0,
            operator: FilterOperator::Eq,
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::ValueChanged {
            row: 0,
            value: "AI".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::Confirm));

        // Commit-after-confirmation: nothing lands in the store until the
        // mutation resolves.
        assert!(app.bridge.is_in_flight());
        assert_eq!(*app.filter_store.filters(), before);
        assert!(app.drawer.is_open());
    }

    #[test]
    fn confirmed_mutation_commits_store_and_closes_drawer() {
        let mut app = app_with_signal();
        let _ = app.update(Message::OpenDrawer);
        let _ = app.update(Message::Drawer(filters_drawer::Message::FieldChanged {
            row: 0,
            field: "topic".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::OperatorSelected {
            row: 0,
            operator: FilterOperator::Eq,
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::ValueChanged {
            row: 0,
            value: "AI".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::Confirm));

        let mut confirmed = sample_signal();
        confirmed.filters = topic_filter();
        let _ = app.update(Message::Bridge(signal_filters::Message::Completed(Ok(
            confirmed.clone(),
        ))));

        assert_eq!(app.filter_store.filters().criteria, confirmed.filters.criteria);
        assert!(!app.drawer.is_open());
        assert_eq!(
            app.cache.get("sig-1").map(|s| s.filters.clone()),
            Some(topic_filter())
        );
    }

    #[test]
    fn failed_mutation_leaves_store_and_drawer_untouched() {
        let mut app = app_with_signal();
        let _ = app.update(Message::OpenDrawer);
        let _ = app.update(Message::Drawer(filters_drawer::Message::FieldChanged {
            row: 0,
            field: "topic".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::OperatorSelected {
            row: 0,
            operator: FilterOperator::Eq,
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::ValueChanged {
            row: 0,
            value: "AI".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::Confirm));

        let before = app.filter_store.filters().clone();
        let _ = app.update(Message::Bridge(signal_filters::Message::Completed(Err(
            ApiError::Unreachable("connection refused".to_string()),
        ))));

        assert_eq!(*app.filter_store.filters(), before);
        assert!(app.drawer.is_open());
        assert!(matches!(
            app.bridge.mutation(),
            signal_filters::MutationState::Failed(_)
        ));
    }

    #[test]
    fn clear_resets_stores_synchronously() {
        let mut app = app_with_signal();
        app.filter_store.apply_filters(topic_filter());
        app.filter_store
            .set_selected_saved_filter_id(Some("abc123".to_string()));
        app.draft
            .set_applied_filters_name(Some("My Filter".to_string()));

        let _ = app.update(Message::ClearFilters(clear_filters::Message::Clear));

        assert_eq!(*app.filter_store.filters(), FilterState::default());
        assert!(app.draft.applied_filters_name().is_none());
        assert!(app.filter_store.selected_saved_filter_id().is_none());
    }

    fn app_with_saved_filter() -> App {
        let mut app = app_with_signal();
        let _ = app.update(Message::SavedFiltersLoaded(Ok(vec![SavedFilter {
            id: "abc123".to_string(),
            name: "My Filter".to_string(),
            state: topic_filter(),
        }])));
        app
    }

    #[test]
    fn selecting_saved_filter_only_prefills_drawer() {
        let mut app = app_with_saved_filter();

        let _ = app.update(Message::SavedFilterSelected("abc123".to_string()));

        // Selection prefills the drawer; the stores commit nothing until the
        // apply is confirmed.
        assert!(app.drawer.is_open());
        assert!(app.draft.applied_filters_name().is_none());
        assert!(app.filter_store.selected_saved_filter_id().is_none());
    }

    #[test]
    fn cancelling_saved_filter_selection_leaves_stores_untouched() {
        let mut app = app_with_saved_filter();
        let _ = app.update(Message::SavedFilterSelected("abc123".to_string()));

        let _ = app.update(Message::Drawer(filters_drawer::Message::Close));

        assert!(!app.drawer.is_open());
        assert!(app.draft.applied_filters_name().is_none());
        assert!(app.filter_store.selected_saved_filter_id().is_none());
        assert!(app.filter_store.filters().is_default());
    }

    #[test]
    fn confirmed_saved_filter_commits_bookkeeping() {
        let mut app = app_with_saved_filter();
        let _ = app.update(Message::SavedFilterSelected("abc123".to_string()));
        let _ = app.update(Message::Drawer(filters_drawer::Message::Confirm));

        let mut confirmed = sample_signal();
        confirmed.filters = FilterState {
            criteria: topic_filter().criteria,
            applied_filter_name: Some("My Filter".to_string()),
            selected_saved_filter_id: Some("abc123".to_string()),
        };
        let _ = app.update(Message::Bridge(signal_filters::Message::Completed(Ok(
            confirmed,
        ))));

        assert_eq!(app.draft.applied_filters_name(), Some("My Filter"));
        assert_eq!(app.filter_store.selected_saved_filter_id(), Some("abc123"));
        assert_eq!(app.filter_store.filters().criteria.len(), 1);
        assert!(!app.drawer.is_open());
    }

    #[test]
    fn restored_selection_survives_initial_signal_load() {
        let mut app = App::default();
        app.restored_selection = Some("abc123".to_string());

        let _ = app.update(Message::SignalsLoaded(Ok(vec![sample_signal()])));

        assert_eq!(app.filter_store.selected_saved_filter_id(), Some("abc123"));
        assert!(app.restored_selection.is_none());
    }

    #[test]
    fn signal_with_own_selection_overrides_restored_one() {
        let mut app = App::default();
        app.restored_selection = Some("stale".to_string());

        let mut signal = sample_signal();
        signal.filters.selected_saved_filter_id = Some("abc123".to_string());
        let _ = app.update(Message::SignalsLoaded(Ok(vec![signal])));

        assert_eq!(app.filter_store.selected_saved_filter_id(), Some("abc123"));
        assert!(app.restored_selection.is_none());
    }

    #[test]
    fn creation_flow_applies_locally_without_signal() {
        let mut app = App::default();
        let _ = app.update(Message::OpenDrawer);
        let _ = app.update(Message::Drawer(filters_drawer::Message::FieldChanged {
            row: 0,
            field: "topic".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::OperatorSelected {
            row: 0,
            operator: FilterOperator::Eq,
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::ValueChanged {
            row: 0,
            value: "AI".to_string(),
        }));
        let _ = app.update(Message::Drawer(filters_drawer::Message::Confirm));

        assert_eq!(app.filter_store.filters().criteria.len(), 1);
        assert!(!app.drawer.is_open());
        assert!(!app.bridge.is_in_flight());
    }
}
