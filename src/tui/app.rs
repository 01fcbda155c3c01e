use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::io::client::{CreationClient, HttpCreationClient, resolve_creation};
use crate::model::{ItemId, Settings};
use crate::ops::creation::{PendingCreation, Resolution};
use crate::ops::widget::{Controller, Picker, WidgetEvent};
use crate::render::{self as projection, HiddenInput, Snapshot};

use super::input;
use super::render;
use super::theme::Theme;

/// Screen regions from the last draw, used to hit-test mouse events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Badges plus input
    pub field: Rect,
    /// The open dropdown, if drawn
    pub dropdown: Option<Rect>,
    /// Remove control of each drawn badge
    pub remove_buttons: Vec<(Rect, ItemId)>,
    /// Each drawn row, tagged with its index among the visible options
    pub rows: Vec<(Rect, usize)>,
}

impl HitMap {
    /// Whether the point is on the widget at all
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let inside = |r: &Rect| x >= r.x && x < r.right() && y >= r.y && y < r.bottom();
        inside(&self.field) || self.dropdown.as_ref().is_some_and(inside)
    }
}

/// Application state for the terminal driver
pub struct App {
    pub controller: Controller<Snapshot>,
    pub theme: Theme,
    pub hits: HitMap,
    /// Last creation outcome, shown in the status row
    pub status: Option<String>,
    pub in_flight: usize,
    pub should_quit: bool,
    outbox: Vec<PendingCreation>,
}

impl App {
    /// Take over a hydrated picker. The surface starts out showing what the
    /// server rendered: one badge per selected item.
    pub fn new(picker: Picker) -> Self {
        let config = picker.config();
        let mut surface = Snapshot::default();
        if picker.targets().selected_items {
            surface.badges =
                projection::badges(picker.selection(), &config.badge_class, config.theme);
        }
        if picker.targets().input && picker.selection().is_empty() {
            surface.placeholder = config.placeholder.clone();
        }
        let theme = Theme::for_mode(config.theme);
        App {
            controller: Controller::connect(picker, surface),
            theme,
            hits: HitMap::default(),
            status: None,
            in_flight: 0,
            should_quit: false,
            outbox: Vec::new(),
        }
    }

    pub fn picker(&self) -> &Picker {
        self.controller.picker()
    }

    pub fn surface(&self) -> &Snapshot {
        self.controller.surface()
    }

    pub fn dispatch(&mut self, event: WidgetEvent) {
        if let Some(pending) = self.controller.dispatch(event) {
            self.in_flight += 1;
            self.outbox.push(pending);
        }
    }

    /// Creations waiting to be sent
    pub fn take_outbox(&mut self) -> Vec<PendingCreation> {
        std::mem::take(&mut self.outbox)
    }

    /// A creation that will never be sent keeps its temporary id
    pub fn abandon(&mut self, pending: &PendingCreation) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status = Some(format!("\"{}\" kept as {} (no server)", pending.name, pending.temp_id));
    }

    /// Feed a server answer back into the widget
    pub fn resolve(&mut self, temp_id: ItemId, resolution: Resolution) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status = Some(match &resolution {
            Resolution::Created(id) => format!("saved {temp_id} as {id}"),
            Resolution::Failed(e) => format!("could not save {temp_id}: {e}"),
        });
        self.dispatch(WidgetEvent::Resolved {
            temp_id,
            resolution,
        });
    }

    /// What the form would submit right now
    pub fn submission(&self) -> Vec<HiddenInput> {
        self.surface().hidden_inputs.clone()
    }

    /// Detach from the widget, keeping what the form would submit
    pub fn finish(self) -> Vec<HiddenInput> {
        self.controller.disconnect().hidden_inputs
    }
}

/// Runs creation round trips off the UI thread. Results come back over a
/// channel that the event loop drains between frames.
struct Creator {
    runtime: tokio::runtime::Runtime,
    client: Arc<dyn CreationClient>,
    item_type: String,
    timeout: Duration,
    tx: mpsc::UnboundedSender<(ItemId, Resolution)>,
}

impl Creator {
    fn submit(&self, pending: PendingCreation) {
        let client = Arc::clone(&self.client);
        let item_type = self.item_type.clone();
        let timeout = self.timeout;
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let resolution = resolve_creation(client.as_ref(), &item_type, &pending, timeout).await;
            // Receiver gone means the UI already exited
            let _ = tx.send((pending.temp_id, resolution));
        });
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Runs `before` ahead of the previous panic hook. The previous hook is put
/// back on drop.
struct PanicHookGuard {
    previous: Option<Arc<PanicHook>>,
}

impl PanicHookGuard {
    fn install(before: impl Fn() + Sync + Send + 'static) -> Self {
        let previous = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |info| {
            before();
            (**chained)(info);
        }));
        PanicHookGuard {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        // Dropping our hook releases its handle on the previous one
        drop(std::panic::take_hook());
        if let Some(hook) = self.previous.take().and_then(|p| Arc::try_unwrap(p).ok()) {
            std::panic::set_hook(hook);
        }
    }
}

fn build_creator(
    picker: &Picker,
    settings: &Settings,
    tx: mpsc::UnboundedSender<(ItemId, Resolution)>,
) -> Result<Option<Creator>, Box<dyn std::error::Error>> {
    let timeout = Duration::from_millis(settings.network.timeout_ms);
    let config = picker.config();
    let client = match HttpCreationClient::from_config(
        config,
        settings.network.base_url.as_deref(),
        timeout,
    ) {
        None => return Ok(None),
        Some(Ok(client)) => client,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "creation endpoint unusable, new items keep temporary ids");
            return Ok(None);
        }
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    Ok(Some(Creator {
        runtime,
        client: Arc::new(client),
        item_type: config.item_type.clone(),
        timeout,
        tx,
    }))
}

/// Run the picker interactively. Returns the hidden inputs at exit.
pub fn run(picker: Picker, settings: &Settings) -> Result<Vec<HiddenInput>, Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let creator = build_creator(&picker, settings, tx)?;
    let mut app = App::new(picker);

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    // Restore the terminal before the panic message prints
    let hook = PanicHookGuard::install(|| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    });

    let result = run_event_loop(&mut terminal, &mut app, creator.as_ref(), &mut rx);
    drop(hook);

    terminal.show_cursor()?;
    drop(guard);
    // Outstanding requests are abandoned with the runtime
    if let Some(creator) = creator {
        creator.runtime.shutdown_background();
    }

    result?;
    Ok(app.finish())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    creator: Option<&Creator>,
    rx: &mut mpsc::UnboundedReceiver<(ItemId, Resolution)>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        for pending in app.take_outbox() {
            match creator {
                Some(creator) => creator.submit(pending),
                None => app.abandon(&pending),
            }
        }
        while let Ok((temp_id, resolution)) = rx.try_recv() {
            app.resolve(temp_id, resolution);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
