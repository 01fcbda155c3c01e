use crate::model::{Item, ItemId, Targets, WidgetConfig};
use crate::render::{Surface, SyncRenderer};

use super::catalog::{OptionRows, OptionsCatalog};
use super::creation::{PendingCreation, Resolution, generate_temp_id};
use super::dropdown::DropdownState;
use super::filter::{self, VisibleOption};
use super::keys::{Command, Key, NavContext, navigate};
use super::selection::SelectionStore;

/// Input to the widget, whatever the event source
#[derive(Debug)]
pub enum WidgetEvent {
    Focus,
    /// New full text of the search input
    Input(String),
    Key(Key),
    ClickOption(ItemId),
    ClickCreate,
    /// Pointer entered the visible option at this index
    Hover(usize),
    ClickOutside,
    /// The remove control of a badge was clicked
    RemoveBadge(ItemId),
    Resolved {
        temp_id: ItemId,
        resolution: Resolution,
    },
}

/// Result of feeding a server resolution back into the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Temporary id replaced everywhere by the server id
    Applied(ItemId),
    /// The temporary item was deselected before the response arrived
    Stale,
    /// Request failed or timed out; the temporary id stays
    KeptTemporary,
}

/// Complete widget state, independent of any presentation surface.
#[derive(Debug, Clone)]
pub struct Picker {
    config: WidgetConfig,
    targets: Targets,
    selection: SelectionStore,
    catalog: OptionsCatalog,
    rows: OptionRows,
    dropdown: DropdownState,
    query: String,
}

impl Picker {
    pub fn new(config: WidgetConfig, targets: Targets) -> Self {
        Picker {
            config,
            targets,
            selection: SelectionStore::new(),
            catalog: OptionsCatalog::new(),
            rows: OptionRows::new(),
            dropdown: DropdownState::new(),
            query: String::new(),
        }
    }

    /// Seed state once from server-rendered markup: `selected` from badges,
    /// `options` from the option list.
    pub fn hydrate(&mut self, selected: Vec<Item>, options: Vec<Item>) {
        for item in selected {
            self.selection.add(item.id, item.name);
        }
        for item in options {
            self.rows.push(item.id.clone(), item.name.clone());
            self.catalog.register(item.id, item.name);
        }
        tracing::debug!(
            selected = self.selection.len(),
            options = self.catalog.len(),
            "hydrated"
        );
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn catalog(&self) -> &OptionsCatalog {
        &self.catalog
    }

    pub fn rows(&self) -> &OptionRows {
        &self.rows
    }

    pub fn dropdown(&self) -> &DropdownState {
        &self.dropdown
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_options(&self) -> Vec<VisibleOption> {
        if !self.targets.options_list {
            return Vec::new();
        }
        filter::visible_options(&self.rows)
    }

    /// Apply one event. Returns a creation that still has to be sent to the server.
    pub fn handle(&mut self, event: WidgetEvent) -> Option<PendingCreation> {
        match event {
            WidgetEvent::Focus => self.open(),
            WidgetEvent::Input(text) => self.set_query(text),
            WidgetEvent::Key(key) => return self.key(key),
            WidgetEvent::ClickOption(id) => self.click_option(&id),
            WidgetEvent::ClickCreate => {
                if self.rows.create.visible {
                    let query = self.rows.create.query.clone();
                    return self.create(&query);
                }
            }
            WidgetEvent::Hover(index) => self.hover(index),
            WidgetEvent::ClickOutside => self.close(),
            WidgetEvent::RemoveBadge(id) => {
                self.selection.remove(&id);
            }
            WidgetEvent::Resolved {
                temp_id,
                resolution,
            } => {
                self.reconcile(&temp_id, resolution);
            }
        }
        None
    }

    pub fn open(&mut self) {
        if !self.targets.dropdown {
            return;
        }
        if self.dropdown.open() {
            tracing::debug!("dropdown opened");
            self.run_filter();
        }
    }

    pub fn close(&mut self) {
        if self.dropdown.close() {
            tracing::debug!("dropdown closed");
            self.query.clear();
            filter::reset(&mut self.rows);
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        if !self.targets.input {
            return;
        }
        self.query = text.into();
        self.run_filter();
    }

    fn run_filter(&mut self) {
        if self.targets.options_list {
            filter::apply(
                &self.query,
                &mut self.rows,
                &self.catalog,
                self.config.allow_create,
            );
        }
        self.dropdown.clear_highlight();
    }

    pub fn key(&mut self, key: Key) -> Option<PendingCreation> {
        let visible = self.visible_options();
        let ctx = NavContext {
            visible: visible.len(),
            highlighted: self.dropdown.valid_highlight(visible.len()),
            input_empty: self.query.is_empty(),
        };
        match navigate(self.dropdown.phase(), key, ctx) {
            Command::Open => self.open(),
            Command::Close => self.close(),
            Command::HighlightNext => self.dropdown.highlight_next(visible.len()),
            Command::HighlightPrev => self.dropdown.highlight_prev(visible.len()),
            Command::Activate(index) => {
                if let Some(option) = visible.into_iter().nth(index) {
                    return self.activate(option);
                }
            }
            Command::Submit => return self.submit(),
            Command::RemoveLast => {
                if let Some((id, _)) = self.selection.remove_last() {
                    tracing::debug!(%id, "removed last selection");
                }
            }
            Command::Ignore => {}
        }
        None
    }

    fn activate(&mut self, option: VisibleOption) -> Option<PendingCreation> {
        match option {
            VisibleOption::Existing(item) => {
                self.toggle(item.id, item.name);
                None
            }
            VisibleOption::Create(query) => self.create(&query),
        }
    }

    /// Enter with nothing highlighted: an exact catalog match wins over creating
    fn submit(&mut self) -> Option<PendingCreation> {
        let query = self.query.trim().to_string();
        if let Some(item) = self.catalog.lookup_exact_name_match(&query) {
            self.toggle(item.id, item.name);
            return None;
        }
        if self.config.allow_create && !query.is_empty() {
            return self.create(&query);
        }
        None
    }

    fn click_option(&mut self, id: &ItemId) {
        if let Some(row) = self.rows.get(id) {
            let name = row.name.clone();
            self.toggle(id.clone(), name);
        }
    }

    fn hover(&mut self, index: usize) {
        let visible = self.visible_options().len();
        self.dropdown.hover(index, visible);
    }

    pub fn toggle(&mut self, id: ItemId, name: impl Into<String>) {
        if self.selection.contains(&id) {
            self.selection.remove(&id);
        } else {
            self.add(id, name);
        }
    }

    /// Select an item, then clear the search so the full list comes back
    pub fn add(&mut self, id: ItemId, name: impl Into<String>) {
        self.selection.add(id, name);
        if self.targets.input {
            self.query.clear();
        }
        self.run_filter();
    }

    /// Optimistically create and select `name` under a temporary id.
    ///
    /// Local state changes immediately. The returned record is Some only when
    /// an endpoint is configured and the server should be asked for a real id.
    pub fn create(&mut self, name: &str) -> Option<PendingCreation> {
        if !self.config.allow_create {
            return None;
        }
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let catalog = &self.catalog;
        let temp_id = generate_temp_id(|id| catalog.contains(id));
        self.catalog.register(temp_id.clone(), name);
        self.rows.push(temp_id.clone(), name);
        self.add(temp_id.clone(), name);
        self.rows.create.visible = false;
        tracing::debug!(%temp_id, name, "created item locally");

        self.config.api_endpoint.as_ref().map(|_| PendingCreation {
            temp_id,
            name: name.to_string(),
        })
    }

    /// Swap a temporary id for the server-issued one across selection, catalog
    /// and option row in one step. Preconditions are checked before anything
    /// is touched, so a stale or failed resolution leaves state as it was.
    pub fn reconcile(&mut self, temp_id: &ItemId, resolution: Resolution) -> Reconciled {
        let real_id = match resolution {
            Resolution::Created(id) => id,
            Resolution::Failed(err) => {
                tracing::warn!(%temp_id, error = %err, "creation failed, keeping temporary id");
                return Reconciled::KeptTemporary;
            }
        };
        if !self.selection.contains(temp_id) || !self.catalog.contains(temp_id) {
            tracing::warn!(%temp_id, %real_id, "temporary item no longer selected, ignoring server id");
            return Reconciled::Stale;
        }
        if &real_id != temp_id {
            // An id the catalog already knows keeps its catalog name everywhere
            let folded_name = self.catalog.name(&real_id).map(str::to_string);
            self.selection.rename(temp_id, real_id.clone());
            self.catalog.rename(temp_id, real_id.clone());
            self.rows.rename(temp_id, real_id.clone());
            if let Some(name) = folded_name {
                self.selection.set_name(&real_id, name);
            }
        }
        // A folded row leaves the visible list shorter
        self.dropdown.clear_highlight();
        tracing::info!(%temp_id, %real_id, "reconciled created item");
        Reconciled::Applied(real_id)
    }
}

/// A [`Picker`] wired to a presentation surface. Every event is followed by
/// a full re-projection through the [`SyncRenderer`].
pub struct Controller<S: Surface> {
    picker: Picker,
    renderer: SyncRenderer,
    surface: S,
}

impl<S: Surface> Controller<S> {
    /// Take over a surface that already shows server-rendered markup.
    /// Existing badges are kept; hidden inputs and rows are re-projected.
    pub fn connect(picker: Picker, mut surface: S) -> Self {
        let mut renderer = SyncRenderer::new();
        renderer.render_hidden_inputs(&picker, &mut surface);
        renderer.reflect_selection_on_catalog_rows(&picker, &mut surface);
        renderer.mark_hydrated();
        Controller {
            picker,
            renderer,
            surface,
        }
    }

    pub fn dispatch(&mut self, event: WidgetEvent) -> Option<PendingCreation> {
        let pending = self.picker.handle(event);
        self.renderer.sync(&self.picker, &mut self.surface);
        pending
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear down, handing back the surface
    pub fn disconnect(self) -> S {
        self.surface
    }
}
