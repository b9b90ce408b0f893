use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use uuid::Uuid;

use api_types::{
    CategoryType,
    category::{CategoryNew, CategoryView},
    entry::EntryUpdate,
    event::EventView,
};
use engine::{
    BudgetEntry, CategoryFilter, EditField, EditLocus, EditState, EntryPatch, Money, SortField,
    TableView, TypeFilter, visible_entries,
};

use crate::{
    client::{Client, ClientError, message_for_error},
    config::AppConfig,
    error::{AppError, Result},
    local_state::{LocalState, default_state_path},
    mappers, ui,
    ui::keymap::AppAction,
    upload,
};

pub mod forms;

use forms::{CategoryStep, EntryField, EntryForm, EventField, EventForm};

/// Static client-side deletion gate. Not an auth mechanism; it only guards
/// against accidental deletes from the UI.
const DELETE_PASSWORD: &str = "oatside-pepero";

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Events,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Entries,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Entries => "Entries",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventsMode {
    List,
    CreateDetails,
    CreateCategories,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Basic,
    Categories,
    Danger,
}

impl SettingsTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Categories => "Categories",
            Self::Danger => "Danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntriesMode {
    List,
    Search,
    PickField,
    Edit,
    Add,
    ConfirmDelete,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct EventsState {
    pub items: Vec<EventView>,
    pub selected: usize,
    pub sort_by_status: bool,
    pub mode: EventsMode,
    pub create_form: EventForm,
    pub create_categories: CategoryStep,
    pub settings: SettingsState,
    pub error: Option<String>,
}

impl Default for EventsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            sort_by_status: false,
            mode: EventsMode::List,
            create_form: EventForm::default(),
            create_categories: CategoryStep::default(),
            settings: SettingsState::default(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct SettingsState {
    pub event_id: Option<Uuid>,
    pub tab: SettingsTab,
    pub form: EventForm,
    pub categories: Vec<CategoryView>,
    pub selected_category: usize,
    pub category_input: String,
    pub category_kind: CategoryType,
    pub delete_password: String,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            event_id: None,
            tab: SettingsTab::Basic,
            form: EventForm::default(),
            categories: Vec::new(),
            selected_category: 0,
            category_input: String::new(),
            category_kind: CategoryType::Income,
            delete_password: String::new(),
        }
    }
}

/// The open event's snapshot: the wire categories (for forms that need the
/// raw views) plus the engine-side mapping the aggregation runs on.
#[derive(Debug)]
pub struct EventData {
    pub event: EventView,
    pub categories_raw: Vec<CategoryView>,
    pub categories: Vec<engine::Category>,
    pub entries: Vec<BudgetEntry>,
}

#[derive(Debug)]
pub struct EntriesState {
    pub mode: EntriesMode,
    pub view: TableView,
    pub selected: usize,
    pub edit: EditState,
    pub form: EntryForm,
    pub upload_path: String,
}

impl EntriesState {
    fn new(today: NaiveDate) -> Self {
        Self {
            mode: EntriesMode::List,
            view: TableView::default(),
            selected: 0,
            edit: EditState::default(),
            form: EntryForm::new(today),
            upload_path: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub events: EventsState,
    pub data: Option<EventData>,
    pub entries_ui: EntriesState,
    pub toast: Option<ToastState>,
    pub last_refresh: Option<String>,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    timezone: Tz,
    local_state: LocalState,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.api_key)?;
        let timezone: Tz = config.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %config.timezone, "unknown timezone, falling back to UTC");
            Tz::UTC
        });
        let local_state = LocalState::load(default_state_path()).unwrap_or_else(|err| {
            tracing::warn!("could not load local state: {err}");
            LocalState::default()
        });
        let today = Utc::now().with_timezone(&timezone).date_naive();
        let state = AppState {
            screen: Screen::Events,
            section: Section::Overview,
            events: EventsState::default(),
            data: None,
            entries_ui: EntriesState::new(today),
            toast: None,
            last_refresh: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            timezone,
            local_state,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.refresh_events().await;

        while !self.should_quit {
            self.expire_toast();
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Events => self.handle_events_key(action).await,
            Screen::Event => self.handle_event_key(action).await,
        }
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    fn now_display(&self) -> String {
        Utc::now()
            .with_timezone(&self.timezone)
            .format("%H:%M:%S")
            .to_string()
    }

    // --- toasts ---------------------------------------------------------

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn toast_success(&mut self, message: impl Into<String>) {
        self.toast(ToastLevel::Success, message);
    }

    fn toast_info(&mut self, message: impl Into<String>) {
        self.toast(ToastLevel::Info, message);
    }

    fn toast_error(&mut self, message: impl Into<String>) {
        self.toast(ToastLevel::Error, message);
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.state.toast
            && toast.expires_at <= Instant::now()
        {
            self.state.toast = None;
        }
    }

    /// Collaborator failure: log the raw error, surface a toast, keep the
    /// last-known-good view.
    fn persistence_failure(&mut self, context: &str, err: &ClientError) {
        tracing::warn!("{context}: {err:?}");
        self.toast_error(message_for_error(err));
    }

    // --- events screen --------------------------------------------------

    async fn handle_events_key(&mut self, action: AppAction) {
        match self.state.events.mode {
            EventsMode::List => self.events_list_key(action).await,
            EventsMode::CreateDetails => self.events_create_details_key(action).await,
            EventsMode::CreateCategories => self.events_create_categories_key(action).await,
            EventsMode::Settings => self.events_settings_key(action).await,
        }
    }

    async fn events_list_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up => self.events_select_prev(),
            AppAction::Down => self.events_select_next(),
            AppAction::Submit => self.open_selected_event().await,
            AppAction::Input('k') => self.events_select_prev(),
            AppAction::Input('j') => self.events_select_next(),
            AppAction::Input('a') => {
                self.state.events.create_form = EventForm::default();
                self.state.events.create_categories = CategoryStep::default();
                self.state.events.mode = EventsMode::CreateDetails;
            }
            AppAction::Input('g') => self.open_settings_for_selected().await,
            AppAction::Input('s') => {
                self.state.events.sort_by_status = !self.state.events.sort_by_status;
                self.refresh_events().await;
            }
            AppAction::Input('r') => self.refresh_events().await,
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn events_create_details_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.events.mode = EventsMode::List,
            AppAction::NextField => self.state.events.create_form.next_focus(),
            AppAction::Up | AppAction::Left => {
                if self.state.events.create_form.focus == EventField::Status {
                    self.state.events.create_form.cycle_status(false);
                }
            }
            AppAction::Down | AppAction::Right => {
                if self.state.events.create_form.focus == EventField::Status {
                    self.state.events.create_form.cycle_status(true);
                }
            }
            AppAction::Backspace => {
                if let Some(text) = self.state.events.create_form.focused_text_mut() {
                    text.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(text) = self.state.events.create_form.focused_text_mut() {
                    text.push(ch);
                }
            }
            AppAction::Submit => {
                if self.state.events.create_form.name.trim().is_empty() {
                    self.toast_error("Please enter an event name");
                } else {
                    self.state.events.mode = EventsMode::CreateCategories;
                }
            }
            _ => {}
        }
    }

    async fn events_create_categories_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.events.mode = EventsMode::CreateDetails,
            AppAction::NextField => self.state.events.create_categories.toggle_kind(),
            AppAction::Backspace => {
                let step = &mut self.state.events.create_categories;
                if step.input.is_empty() {
                    step.remove_last();
                } else {
                    step.input.pop();
                }
            }
            AppAction::Input(ch) => self.state.events.create_categories.input.push(ch),
            AppAction::Submit => {
                if self.state.events.create_categories.input.trim().is_empty() {
                    self.submit_event_create().await;
                } else {
                    self.state.events.create_categories.add_current();
                }
            }
            _ => {}
        }
    }

    async fn events_settings_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => {
                self.state.events.settings = SettingsState::default();
                self.state.events.mode = EventsMode::List;
            }
            AppAction::Left => self.settings_switch_tab(false),
            AppAction::Right => self.settings_switch_tab(true),
            AppAction::NextField => match self.state.events.settings.tab {
                SettingsTab::Basic => self.state.events.settings.form.next_focus(),
                SettingsTab::Categories => {
                    let settings = &mut self.state.events.settings;
                    settings.category_kind = match settings.category_kind {
                        CategoryType::Income => CategoryType::Expense,
                        CategoryType::Expense => CategoryType::Income,
                    };
                }
                SettingsTab::Danger => {}
            },
            AppAction::Up | AppAction::Down => {
                let forward = action == AppAction::Down;
                match self.state.events.settings.tab {
                    SettingsTab::Basic => {
                        if self.state.events.settings.form.focus == EventField::Status {
                            self.state.events.settings.form.cycle_status(forward);
                        }
                    }
                    SettingsTab::Categories => {
                        let settings = &mut self.state.events.settings;
                        if settings.categories.is_empty() {
                            settings.selected_category = 0;
                        } else if forward {
                            settings.selected_category = (settings.selected_category + 1)
                                .min(settings.categories.len() - 1);
                        } else {
                            settings.selected_category =
                                settings.selected_category.saturating_sub(1);
                        }
                    }
                    SettingsTab::Danger => {}
                }
            }
            AppAction::Backspace => {
                let settings = &mut self.state.events.settings;
                match settings.tab {
                    SettingsTab::Basic => {
                        if let Some(text) = settings.form.focused_text_mut() {
                            text.pop();
                        }
                    }
                    SettingsTab::Categories => {
                        settings.category_input.pop();
                    }
                    SettingsTab::Danger => {
                        settings.delete_password.pop();
                    }
                }
            }
            AppAction::Input(ch) => {
                let settings = &mut self.state.events.settings;
                match settings.tab {
                    SettingsTab::Basic => {
                        if let Some(text) = settings.form.focused_text_mut() {
                            text.push(ch);
                        }
                    }
                    SettingsTab::Categories => settings.category_input.push(ch),
                    SettingsTab::Danger => settings.delete_password.push(ch),
                }
            }
            AppAction::Delete => {
                if self.state.events.settings.tab == SettingsTab::Categories {
                    self.settings_delete_category().await;
                }
            }
            AppAction::Submit => match self.state.events.settings.tab {
                SettingsTab::Basic => self.save_event_settings().await,
                SettingsTab::Categories => self.settings_add_category().await,
                SettingsTab::Danger => self.delete_event_from_settings().await,
            },
            _ => {}
        }
    }

    fn settings_switch_tab(&mut self, forward: bool) {
        let tabs = [
            SettingsTab::Basic,
            SettingsTab::Categories,
            SettingsTab::Danger,
        ];
        let idx = tabs
            .iter()
            .position(|t| *t == self.state.events.settings.tab)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % tabs.len()
        } else {
            (idx + tabs.len() - 1) % tabs.len()
        };
        self.state.events.settings.tab = tabs[next];
    }

    fn events_select_prev(&mut self) {
        self.state.events.selected = self.state.events.selected.saturating_sub(1);
    }

    fn events_select_next(&mut self) {
        if self.state.events.items.is_empty() {
            return;
        }
        self.state.events.selected =
            (self.state.events.selected + 1).min(self.state.events.items.len() - 1);
    }

    async fn refresh_events(&mut self) {
        match self
            .client
            .events_list(self.state.events.sort_by_status)
            .await
        {
            Ok(items) => {
                self.state.events.items = items;
                self.state.events.error = None;
                if let Some(last) = self.local_state.last_event_for(&self.state.base_url)
                    && let Some(idx) = self.state.events.items.iter().position(|e| e.id == last)
                {
                    self.state.events.selected = idx;
                }
                if !self.state.events.items.is_empty() {
                    self.state.events.selected = self
                        .state
                        .events
                        .selected
                        .min(self.state.events.items.len() - 1);
                }
                self.state.last_refresh = Some(self.now_display());
            }
            Err(err) => {
                self.state.events.error = Some(message_for_error(&err));
                self.persistence_failure("failed to fetch events", &err);
            }
        }
    }

    async fn open_selected_event(&mut self) {
        let Some(event) = self
            .state
            .events
            .items
            .get(self.state.events.selected)
            .cloned()
        else {
            return;
        };

        if self.load_event_data(event.clone()).await {
            self.state.screen = Screen::Event;
            self.state.section = Section::Overview;
            self.state.entries_ui = EntriesState::new(self.today());
            self.local_state.set_last_event(&self.state.base_url, event.id);
            if let Err(err) = self.local_state.save(default_state_path()) {
                tracing::warn!("could not save local state: {err}");
            }
        }
    }

    /// Fetches the full `(categories, entries)` snapshot for an event.
    /// Returns `false` (keeping the previous view) on any failure.
    async fn load_event_data(&mut self, event: EventView) -> bool {
        let categories_raw = match self.client.categories_list(event.id).await {
            Ok(categories) => categories,
            Err(err) => {
                self.persistence_failure("failed to fetch categories", &err);
                return false;
            }
        };
        let entry_views = match self.client.entries_list(event.id).await {
            Ok(entries) => entries,
            Err(err) => {
                self.persistence_failure("failed to fetch entries", &err);
                return false;
            }
        };

        let categories = categories_raw
            .iter()
            .cloned()
            .map(mappers::category_from_view)
            .collect();
        let entries = entry_views.into_iter().map(mappers::entry_from_view).collect();

        self.state.data = Some(EventData {
            event,
            categories_raw,
            categories,
            entries,
        });
        self.state.last_refresh = Some(self.now_display());
        true
    }

    /// Full refetch after every mutation; the view is stale until this
    /// resolves.
    async fn refresh_event_data(&mut self) {
        let Some(event_id) = self.state.data.as_ref().map(|data| data.event.id) else {
            return;
        };
        let event = match self.client.event_get(event_id).await {
            Ok(event) => event,
            Err(err) => {
                self.persistence_failure("failed to refresh event", &err);
                return;
            }
        };
        self.load_event_data(event).await;
        self.clamp_entry_selection();
    }

    // --- event screen ---------------------------------------------------

    async fn handle_event_key(&mut self, action: AppAction) {
        match self.state.section {
            Section::Overview => self.overview_key(action).await,
            Section::Entries => match self.state.entries_ui.mode {
                EntriesMode::List => self.entries_list_key(action).await,
                EntriesMode::Search => self.entries_search_key(action),
                EntriesMode::PickField => self.entries_pick_field_key(action),
                EntriesMode::Edit => self.entries_edit_key(action).await,
                EntriesMode::Add => self.entries_add_key(action).await,
                EntriesMode::ConfirmDelete => self.entries_confirm_delete_key(action).await,
                EntriesMode::Upload => self.entries_upload_key(action).await,
            },
        }
    }

    async fn overview_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel | AppAction::Input('b') => self.back_to_events().await,
            AppAction::Input('e') => self.state.section = Section::Entries,
            AppAction::Input('a') => {
                self.state.section = Section::Entries;
                self.open_add_entry_form();
            }
            AppAction::Input('r') => self.refresh_event_data().await,
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn back_to_events(&mut self) {
        self.state.screen = Screen::Events;
        self.state.data = None;
        self.refresh_events().await;
    }

    fn open_add_entry_form(&mut self) {
        self.state.entries_ui.form = EntryForm::new(self.today());
        self.state.entries_ui.mode = EntriesMode::Add;
    }

    async fn entries_list_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up => self.entries_select_prev(),
            AppAction::Down => self.entries_select_next(),
            AppAction::Input('k') => self.entries_select_prev(),
            AppAction::Input('j') => self.entries_select_next(),
            AppAction::Cancel | AppAction::Input('b') => self.back_to_events().await,
            AppAction::Input('o') => self.state.section = Section::Overview,
            AppAction::Input('/') => self.state.entries_ui.mode = EntriesMode::Search,
            AppAction::Input('c') => self.cycle_category_filter(),
            AppAction::Input('y') => self.cycle_type_filter(),
            AppAction::Input('1') => self.toggle_sort(SortField::EntryDate),
            AppAction::Input('2') => self.toggle_sort(SortField::CategoryName),
            AppAction::Input('3') => self.toggle_sort(SortField::ItemName),
            AppAction::Input('4') => self.toggle_sort(SortField::Amount),
            AppAction::Input('e') => {
                if self.selected_entry().is_some() {
                    self.state.entries_ui.mode = EntriesMode::PickField;
                }
            }
            AppAction::Input('t') => self.toggle_reimbursement_selected().await,
            AppAction::Input('u') => {
                if self.selected_entry().is_some() {
                    self.state.entries_ui.upload_path.clear();
                    self.state.entries_ui.mode = EntriesMode::Upload;
                }
            }
            AppAction::Input('x') | AppAction::Delete => {
                if self.selected_entry().is_some() {
                    self.state.entries_ui.mode = EntriesMode::ConfirmDelete;
                }
            }
            AppAction::Input('a') => self.open_add_entry_form(),
            AppAction::Input('r') => self.refresh_event_data().await,
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn entries_search_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => {
                self.state.entries_ui.view.search.push(ch);
                self.clamp_entry_selection();
            }
            AppAction::Backspace => {
                self.state.entries_ui.view.search.pop();
                self.clamp_entry_selection();
            }
            AppAction::Submit => self.state.entries_ui.mode = EntriesMode::List,
            AppAction::Cancel => {
                self.state.entries_ui.view.search.clear();
                self.state.entries_ui.mode = EntriesMode::List;
            }
            _ => {}
        }
    }

    fn entries_pick_field_key(&mut self, action: AppAction) {
        let field = match action {
            AppAction::Cancel => {
                self.state.entries_ui.mode = EntriesMode::List;
                return;
            }
            AppAction::Input('d') => EditField::EntryDate,
            AppAction::Input('i') => EditField::ItemName,
            AppAction::Input('a') => EditField::Amount,
            AppAction::Input('p') => EditField::PaymentMethod,
            _ => return,
        };

        let Some(entry) = self.selected_entry() else {
            self.state.entries_ui.mode = EntriesMode::List;
            return;
        };

        let current = match field {
            EditField::EntryDate => entry.entry_date.format("%Y-%m-%d").to_string(),
            EditField::ItemName => entry.item_name.clone(),
            EditField::Amount => {
                let minor = entry.amount_minor;
                format!("{}.{:02}", minor / 100, minor % 100)
            }
            EditField::PaymentMethod => entry.payment_method.clone().unwrap_or_default(),
        };

        self.state.entries_ui.edit.begin(
            EditLocus {
                entry_id: entry.id,
                field,
            },
            &current,
        );
        self.state.entries_ui.mode = EntriesMode::Edit;
    }

    async fn entries_edit_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.entries_ui.edit.push(ch),
            AppAction::Backspace => self.state.entries_ui.edit.pop(),
            AppAction::Cancel => {
                self.state.entries_ui.edit.cancel();
                self.state.entries_ui.mode = EntriesMode::List;
            }
            AppAction::Submit => self.commit_inline_edit().await,
            _ => {}
        }
    }

    async fn entries_add_key(&mut self, action: AppAction) {
        let category_count = self
            .state
            .data
            .as_ref()
            .map(|data| data.categories_raw.len())
            .unwrap_or(0);

        match action {
            AppAction::Cancel => self.state.entries_ui.mode = EntriesMode::List,
            AppAction::NextField => self.state.entries_ui.form.next_focus(),
            AppAction::Up | AppAction::Down => {
                let forward = action == AppAction::Down;
                let form = &mut self.state.entries_ui.form;
                match form.focus {
                    EntryField::Category => form.cycle_category(category_count, forward),
                    EntryField::Reimbursed => form.toggle_reimbursed(),
                    EntryField::ReimbursementStatus => form.toggle_status(),
                    _ => {}
                }
            }
            AppAction::Backspace => {
                if let Some(text) = self.state.entries_ui.form.focused_text_mut() {
                    text.pop();
                }
            }
            AppAction::Input(ch) => {
                let form = &mut self.state.entries_ui.form;
                if form.focus == EntryField::Reimbursed && ch == ' ' {
                    form.toggle_reimbursed();
                } else if let Some(text) = form.focused_text_mut() {
                    text.push(ch);
                }
            }
            AppAction::Submit => self.submit_entry_form().await,
            _ => {}
        }
    }

    async fn entries_confirm_delete_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y') => self.delete_selected_entry().await,
            AppAction::Input('n') | AppAction::Cancel => {
                self.state.entries_ui.mode = EntriesMode::List;
            }
            _ => {}
        }
    }

    async fn entries_upload_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.entries_ui.upload_path.push(ch),
            AppAction::Backspace => {
                self.state.entries_ui.upload_path.pop();
            }
            AppAction::Cancel => self.state.entries_ui.mode = EntriesMode::List,
            AppAction::Submit => self.upload_receipt_for_selected().await,
            _ => {}
        }
    }

    // --- entries helpers ------------------------------------------------

    fn visible_rows(&self) -> Vec<&BudgetEntry> {
        match &self.state.data {
            Some(data) => visible_entries(&data.entries, &data.categories, &self.state.entries_ui.view),
            None => Vec::new(),
        }
    }

    fn selected_entry(&self) -> Option<BudgetEntry> {
        self.visible_rows()
            .get(self.state.entries_ui.selected)
            .map(|entry| (*entry).clone())
    }

    fn clamp_entry_selection(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            self.state.entries_ui.selected = 0;
        } else {
            self.state.entries_ui.selected = self.state.entries_ui.selected.min(count - 1);
        }
    }

    fn entries_select_prev(&mut self) {
        self.state.entries_ui.selected = self.state.entries_ui.selected.saturating_sub(1);
    }

    fn entries_select_next(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            return;
        }
        self.state.entries_ui.selected = (self.state.entries_ui.selected + 1).min(count - 1);
    }

    fn cycle_category_filter(&mut self) {
        let Some(data) = &self.state.data else { return };
        let ids: Vec<Uuid> = data.categories.iter().map(|cat| cat.id).collect();
        let view = self.state.entries_ui.view.clone();
        let next = match view.category_filter {
            CategoryFilter::All => match ids.first() {
                Some(first) => CategoryFilter::One(*first),
                None => CategoryFilter::All,
            },
            CategoryFilter::One(current) => match ids.iter().position(|id| *id == current) {
                Some(idx) if idx + 1 < ids.len() => CategoryFilter::One(ids[idx + 1]),
                _ => CategoryFilter::All,
            },
        };
        self.state.entries_ui.view = view.with_category_filter(next);
        self.clamp_entry_selection();
    }

    fn cycle_type_filter(&mut self) {
        let view = self.state.entries_ui.view.clone();
        let next = match view.type_filter {
            TypeFilter::All => TypeFilter::Income,
            TypeFilter::Income => TypeFilter::Expense,
            TypeFilter::Expense => TypeFilter::All,
        };
        self.state.entries_ui.view = view.with_type_filter(next);
        self.clamp_entry_selection();
    }

    fn toggle_sort(&mut self, field: SortField) {
        let view = self.state.entries_ui.view.clone();
        self.state.entries_ui.view = view.toggle_sort(field);
    }

    // --- mutations ------------------------------------------------------

    async fn commit_inline_edit(&mut self) {
        let mutation = match self.state.entries_ui.edit.commit() {
            Ok(mutation) => mutation,
            Err(err) => {
                // Validation failure: nothing dispatched, locus stays open.
                self.toast_error(err.to_string());
                return;
            }
        };

        let update = mappers::update_from_patch(mutation.patch);
        match self.client.entry_update(mutation.entry_id, &update).await {
            Ok(()) => {
                self.toast_success("Entry updated successfully");
                self.state.entries_ui.mode = EntriesMode::List;
                self.refresh_event_data().await;
                self.state.entries_ui.edit.finish();
            }
            Err(err) => {
                self.persistence_failure("failed to update entry", &err);
                self.state.entries_ui.edit.cancel();
                self.state.entries_ui.mode = EntriesMode::List;
            }
        }
    }

    async fn toggle_reimbursement_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if !entry.to_be_reimbursed {
            self.toast_info("Entry is not flagged for reimbursement");
            return;
        }

        let mutation = engine::toggle_reimbursement(&entry);
        let new_status = match &mutation.patch {
            EntryPatch::ReimbursementStatus(status) => status.as_str(),
            _ => "pending",
        };
        let update = mappers::update_from_patch(mutation.patch.clone());
        match self.client.entry_update(mutation.entry_id, &update).await {
            Ok(()) => {
                self.toast_success(format!("Reimbursement marked as {new_status}"));
                self.refresh_event_data().await;
            }
            Err(err) => self.persistence_failure("failed to update reimbursement status", &err),
        }
    }

    async fn delete_selected_entry(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.state.entries_ui.mode = EntriesMode::List;
            return;
        };

        match self.client.entry_delete(entry.id).await {
            Ok(()) => {
                self.toast_success("Entry deleted successfully");
                self.state.entries_ui.mode = EntriesMode::List;
                self.refresh_event_data().await;
            }
            Err(err) => {
                self.persistence_failure("failed to delete entry", &err);
                self.state.entries_ui.mode = EntriesMode::List;
            }
        }
    }

    /// Validates the add-entry form, uploads the optional receipt, inserts
    /// the entry, and refetches.
    ///
    /// A failed upload never blocks the insert: the entry is written without
    /// a receipt and the failure gets its own toast.
    async fn submit_entry_form(&mut self) {
        let (event_id, categories_raw) = match &self.state.data {
            Some(data) => (data.event.id, data.categories_raw.clone()),
            None => return,
        };

        let mut payload = match self
            .state
            .entries_ui
            .form
            .to_new(event_id, &categories_raw)
        {
            Ok(payload) => payload,
            Err(message) => {
                self.toast_error(message);
                return;
            }
        };

        let receipt_path = self.state.entries_ui.form.receipt_path.trim().to_string();
        if !receipt_path.is_empty() {
            match upload::load_receipt(&receipt_path) {
                Ok(file) => {
                    let object_path = upload::receipt_object_path(
                        &event_id.to_string(),
                        &file.extension,
                        Utc::now(),
                    );
                    match self
                        .client
                        .upload_receipt(&object_path, file.bytes, file.content_type)
                        .await
                    {
                        Ok(uploaded) => {
                            payload.receipt_photo_url = Some(uploaded.url);
                            payload.receipt_filename = Some(file.filename);
                        }
                        Err(err) => {
                            tracing::warn!("receipt upload failed: {err:?}");
                            self.toast_error(format!(
                                "Receipt upload failed: {}",
                                message_for_error(&err)
                            ));
                        }
                    }
                }
                Err(err) => self.toast_error(format!("Receipt rejected: {err}")),
            }
        }

        match self.client.entry_insert(&payload).await {
            Ok(_) => {
                self.toast_success("Budget entry added successfully");
                self.state.entries_ui.mode = EntriesMode::List;
                self.refresh_event_data().await;
            }
            Err(err) => self.persistence_failure("failed to add entry", &err),
        }
    }

    async fn upload_receipt_for_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.state.entries_ui.mode = EntriesMode::List;
            return;
        };
        let path = self.state.entries_ui.upload_path.trim().to_string();

        let file = match upload::load_receipt(&path) {
            Ok(file) => file,
            Err(err) => {
                self.toast_error(format!("Receipt rejected: {err}"));
                self.state.entries_ui.mode = EntriesMode::List;
                return;
            }
        };

        let object_path = upload::receipt_object_path(
            &format!("receipts/{}", entry.id),
            &file.extension,
            Utc::now(),
        );
        match self
            .client
            .upload_receipt(&object_path, file.bytes, file.content_type)
            .await
        {
            Ok(uploaded) => {
                let update = EntryUpdate {
                    receipt_photo_url: Some(uploaded.url),
                    receipt_filename: Some(file.filename),
                    ..EntryUpdate::default()
                };
                match self.client.entry_update(entry.id, &update).await {
                    Ok(()) => {
                        self.toast_success("Receipt uploaded successfully");
                        self.refresh_event_data().await;
                    }
                    Err(err) => self.persistence_failure("failed to attach receipt", &err),
                }
            }
            Err(err) => {
                tracing::warn!("receipt upload failed: {err:?}");
                self.toast_error(format!(
                    "Receipt upload failed: {}",
                    message_for_error(&err)
                ));
            }
        }
        self.state.entries_ui.mode = EntriesMode::List;
    }

    // --- event mutations ------------------------------------------------

    /// Creates the event, then its seed categories, in two steps.
    ///
    /// There is no rollback: if a category insert fails after the event was
    /// created, the event stays (with a toast saying so).
    async fn submit_event_create(&mut self) {
        let payload = match self.state.events.create_form.to_new() {
            Ok(payload) => payload,
            Err(message) => {
                self.toast_error(message);
                return;
            }
        };

        let event = match self.client.event_insert(&payload).await {
            Ok(event) => event,
            Err(err) => {
                self.persistence_failure("failed to create event", &err);
                return;
            }
        };

        let drafts = self.state.events.create_categories.drafts.clone();
        for draft in drafts {
            let category = CategoryNew {
                event_id: event.id,
                name: draft.name,
                kind: draft.kind,
            };
            if let Err(err) = self.client.category_insert(&category).await {
                tracing::warn!("failed to seed category: {err:?}");
                self.toast_error(format!(
                    "Event created, but adding categories failed: {}",
                    message_for_error(&err)
                ));
                self.state.events.mode = EventsMode::List;
                self.refresh_events().await;
                return;
            }
        }

        self.toast_success("Event created successfully");
        self.state.events.mode = EventsMode::List;
        self.refresh_events().await;
    }

    async fn open_settings_for_selected(&mut self) {
        let Some(event) = self
            .state
            .events
            .items
            .get(self.state.events.selected)
            .cloned()
        else {
            return;
        };

        let categories = match self.client.categories_list(event.id).await {
            Ok(categories) => categories,
            Err(err) => {
                self.persistence_failure("failed to fetch categories", &err);
                return;
            }
        };

        self.state.events.settings = SettingsState {
            event_id: Some(event.id),
            tab: SettingsTab::Basic,
            form: EventForm::from_event(&event),
            categories,
            selected_category: 0,
            category_input: String::new(),
            category_kind: CategoryType::Income,
            delete_password: String::new(),
        };
        self.state.events.mode = EventsMode::Settings;
    }

    async fn save_event_settings(&mut self) {
        let Some(event_id) = self.state.events.settings.event_id else {
            return;
        };
        let update = match self.state.events.settings.form.to_update() {
            Ok(update) => update,
            Err(message) => {
                self.toast_error(message);
                return;
            }
        };

        match self.client.event_update(event_id, &update).await {
            Ok(()) => {
                self.toast_success("Event updated successfully");
                self.state.events.mode = EventsMode::List;
                self.refresh_events().await;
            }
            Err(err) => self.persistence_failure("failed to update event", &err),
        }
    }

    async fn settings_add_category(&mut self) {
        let Some(event_id) = self.state.events.settings.event_id else {
            return;
        };
        let name = self.state.events.settings.category_input.trim().to_string();
        if name.is_empty() {
            return;
        }

        let payload = CategoryNew {
            event_id,
            name,
            kind: self.state.events.settings.category_kind,
        };
        match self.client.category_insert(&payload).await {
            Ok(_) => {
                self.toast_success("Category added successfully");
                self.state.events.settings.category_input.clear();
                self.reload_settings_categories(event_id).await;
            }
            Err(err) => self.persistence_failure("failed to add category", &err),
        }
    }

    /// Deletes the selected category. Entries keep a dangling reference and
    /// drop out of totals as unclassified.
    async fn settings_delete_category(&mut self) {
        let Some(event_id) = self.state.events.settings.event_id else {
            return;
        };
        let Some(category) = self
            .state
            .events
            .settings
            .categories
            .get(self.state.events.settings.selected_category)
            .cloned()
        else {
            return;
        };

        match self.client.category_delete(category.id).await {
            Ok(()) => {
                self.toast_success("Category deleted successfully");
                self.reload_settings_categories(event_id).await;
            }
            Err(err) => self.persistence_failure("failed to delete category", &err),
        }
    }

    async fn reload_settings_categories(&mut self, event_id: Uuid) {
        match self.client.categories_list(event_id).await {
            Ok(categories) => {
                let settings = &mut self.state.events.settings;
                settings.categories = categories;
                if settings.categories.is_empty() {
                    settings.selected_category = 0;
                } else {
                    settings.selected_category =
                        settings.selected_category.min(settings.categories.len() - 1);
                }
            }
            Err(err) => self.persistence_failure("failed to fetch categories", &err),
        }
    }

    async fn delete_event_from_settings(&mut self) {
        let Some(event_id) = self.state.events.settings.event_id else {
            return;
        };
        if self.state.events.settings.delete_password != DELETE_PASSWORD {
            self.toast_error("Invalid password: enter the admin password to confirm deletion");
            return;
        }

        match self.client.event_delete(event_id).await {
            Ok(()) => {
                self.toast_success("Event and all associated data have been permanently deleted");
                self.state.events.settings = SettingsState::default();
                self.state.events.mode = EventsMode::List;
                self.refresh_events().await;
            }
            Err(err) => self.persistence_failure("failed to delete event", &err),
        }
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Formats an amount in centavos for display.
pub fn format_amount(minor: i64) -> String {
    Money::new(minor).format(engine::Currency::Php)
}
