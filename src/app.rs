use ratatui::widgets::ListState;

use newsreel::store::StoreSnapshot;
use newsreel::worker::Command;

/// How close to the end of the list the selection may get before the next
/// page is requested.
const PREFETCH_MARGIN: usize = 3;

pub struct App {
    /// Latest view of the store, as sent by the worker.
    pub snapshot: StoreSnapshot,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the detail pane is showing instead of the list.
    pub detail: bool,
    /// Commands sent to the worker that have not produced a snapshot yet.
    pub pending: usize,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            snapshot: StoreSnapshot::default(),
            list_state: ListState::default(),
            detail: false,
            pending: 0,
            quit: false,
        }
    }

    /// Take a snapshot from the worker, keeping the selection in range.
    pub fn apply(&mut self, snapshot: StoreSnapshot) {
        self.pending = self.pending.saturating_sub(1);
        self.snapshot = snapshot;

        let len = self.snapshot.articles.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0 || self.snapshot.state.is_loading()
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        if self.is_busy() {
            return "Loading…".into();
        }
        if let Some(err) = &self.snapshot.error {
            return format!("Error: {err}");
        }
        let more = if self.snapshot.has_more { "+" } else { "" };
        format!("{}{more} articles", self.snapshot.articles.len())
    }

    // -- navigation ----------------------------------------------------------

    /// Move down, asking for the next page when the end comes into view.
    pub fn select_next(&mut self) -> Option<Command> {
        let len = self.snapshot.articles.len();
        if len == 0 {
            return None;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.more_if_near_end(i)
    }

    pub fn select_previous(&mut self) {
        if self.snapshot.articles.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.snapshot.articles.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) -> Option<Command> {
        let len = self.snapshot.articles.len();
        if len == 0 {
            return None;
        }
        self.list_state.select(Some(len - 1));
        self.more_if_near_end(len - 1)
    }

    fn more_if_near_end(&self, selected: usize) -> Option<Command> {
        let len = self.snapshot.articles.len();
        let near_end = selected + PREFETCH_MARGIN >= len;
        (near_end && self.snapshot.has_more && self.pending == 0)
            .then_some(Command::LoadPage { reset: false })
    }

    // -- actions -------------------------------------------------------------

    /// Open the selected article in the detail pane.
    pub fn open_selected(&mut self) -> Option<Command> {
        let selected = self.list_state.selected()?;
        let id = self.snapshot.articles.get(selected)?.id.clone();
        self.detail = true;
        self.snapshot.current = None;
        Some(Command::Open(id))
    }

    pub fn close_detail(&mut self) {
        self.detail = false;
    }

    /// Start over from the first page.
    pub fn reload(&mut self) -> Command {
        self.detail = false;
        self.list_state.select(None);
        Command::LoadPage { reset: true }
    }
}
