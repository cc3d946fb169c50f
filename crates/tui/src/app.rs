use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recall_core::{CounterStore, MemoryRecord, SearchResult};
use tracing::{debug, warn};

use crate::request::{Command, RequestId, RequestSeq};
use crate::router::{Route, Router};
use crate::views::SearchView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Counter,
    Vector,
    Limit,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Counter => Focus::Vector,
            Focus::Vector => Focus::Limit,
            Focus::Limit => Focus::Results,
            Focus::Results => Focus::Counter,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Counter => Focus::Results,
            Focus::Vector => Focus::Counter,
            Focus::Limit => Focus::Vector,
            Focus::Results => Focus::Limit,
        }
    }
}

/// Results of background network tasks, delivered back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    SearchFinished {
        request: RequestId,
        outcome: Result<Vec<SearchResult>, String>,
    },
    MemoryLoaded {
        request: RequestId,
        outcome: Result<MemoryRecord, String>,
    },
}

pub struct App {
    pub router: Router,
    pub counter: CounterStore,
    /// Mounted while the Home route is active.
    pub search: Option<SearchView>,
    pub focus: Focus,
    pub should_quit: bool,
    pub last_activity: String,
    seq: RequestSeq,
}

impl App {
    pub fn new(counter: CounterStore, initial_path: &str) -> Self {
        let mut app = Self {
            router: Router::new(initial_path),
            counter,
            search: None,
            focus: Focus::Vector,
            should_quit: false,
            last_activity: String::from("No recent activity"),
            seq: RequestSeq::default(),
        };
        app.sync_mounts();
        app
    }

    pub fn navigate(&mut self, path: &str) {
        if self.router.navigate(path) {
            self.sync_mounts();
        }
    }

    fn sync_mounts(&mut self) {
        match self.router.current() {
            Route::Home => {
                if self.search.is_none() {
                    self.search = Some(SearchView::new());
                    self.focus = Focus::Vector;
                }
            }
            _ => {
                if self.search.take().is_some() {
                    debug!("Search view unmounted");
                }
            }
        }
    }

    pub fn increment(&mut self) {
        let count = self.counter.increment();
        self.last_activity = format!("Count is {}", count);
    }

    pub fn submit_search(&mut self) -> Option<Command> {
        let search = self.search.as_mut()?;
        match search.submit(&mut self.seq) {
            Ok(cmd) => {
                self.last_activity = String::from("Searching...");
                Some(cmd)
            }
            Err(e) => {
                self.last_activity = e.to_string();
                None
            }
        }
    }

    pub fn select_result(&mut self, index: usize) -> Option<Command> {
        self.search.as_mut()?.select(index, &mut self.seq)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            KeyCode::F(1) => {
                self.navigate("/");
                None
            }
            KeyCode::F(2) => {
                self.navigate("/about");
                None
            }
            // Everything below is the Home page form.
            _ if self.search.is_none() => None,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Enter => match self.focus {
                Focus::Counter => {
                    self.increment();
                    None
                }
                Focus::Vector | Focus::Limit => self.submit_search(),
                Focus::Results => {
                    let search = self.search.as_mut()?;
                    search.select_highlighted(&mut self.seq)
                }
            },
            KeyCode::Up if self.focus == Focus::Results => {
                self.search.as_mut()?.move_highlight(-1);
                None
            }
            KeyCode::Down if self.focus == Focus::Results => {
                self.search.as_mut()?.move_highlight(1);
                None
            }
            KeyCode::Char('+') if self.focus == Focus::Counter => {
                self.increment();
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
                None
            }
            _ => None,
        }
    }

    pub fn paste(&mut self, text: &str) {
        let normalized = text.replace(['\r', '\n'], "");
        if let Some(input) = self.focused_input() {
            input.push_str(&normalized);
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        let search = self.search.as_mut()?;
        match self.focus {
            Focus::Vector => Some(&mut search.vector_input),
            Focus::Limit => Some(&mut search.limit_input),
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        let Some(search) = self.search.as_mut() else {
            debug!("Dropping {:?}: search view not mounted", event);
            return;
        };

        match event {
            AppEvent::SearchFinished { request, outcome } => {
                if let Err(e) = &outcome {
                    warn!("Search failed: {}", e);
                }
                let summary = match &outcome {
                    Ok(results) => format!("{} results", results.len()),
                    Err(e) => format!("Search failed: {}", e),
                };
                if search.apply_search(request, outcome) {
                    self.last_activity = summary;
                }
            }
            AppEvent::MemoryLoaded { request, outcome } => {
                if let Err(e) = &outcome {
                    warn!("Memory fetch failed: {}", e);
                }
                search.apply_memory(request, outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn counter_increments_through_keys() {
        let counter = CounterStore::new();
        let mut app = App::new(counter.clone(), "/");
        app.focus = Focus::Counter;
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Enter));
        }
        assert_eq!(counter.count(), 3);
        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(counter.count(), 4);
    }

    #[test]
    fn typing_and_enter_submits_the_form() {
        let mut app = App::new(CounterStore::new(), "/");
        type_text(&mut app, "0.1,0.2");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "5");

        let cmd = app.handle_key(key(KeyCode::Enter)).unwrap();
        match cmd {
            Command::Search { query, .. } => {
                assert_eq!(query.vector, vec![0.1, 0.2]);
                assert_eq!(query.limit, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_limit_surfaces_validation_error() {
        let mut app = App::new(CounterStore::new(), "/");
        app.focus = Focus::Limit;
        type_text(&mut app, "x");
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert!(app.search.as_ref().unwrap().form_error.is_some());
        assert!(app.last_activity.contains("limit must be a whole number"));
    }

    #[test]
    fn results_flow_into_detail_fetch() {
        let mut app = App::new(CounterStore::new(), "/");
        let Some(Command::Search { request, .. }) = app.submit_search() else {
            panic!("search not issued");
        };
        app.handle_event(AppEvent::SearchFinished {
            request,
            outcome: Ok(vec![SearchResult { id: 7, score: 0.83 }]),
        });

        app.focus = Focus::Results;
        let Some(Command::FetchMemory { request, id }) = app.handle_key(key(KeyCode::Enter)) else {
            panic!("detail fetch not issued");
        };
        assert_eq!(id, 7);

        app.handle_event(AppEvent::MemoryLoaded {
            request,
            outcome: Ok(MemoryRecord {
                id: 7,
                user_id: 3,
                content: "hello".into(),
                created_at: "2024-05-01".into(),
            }),
        });
        let detail = app.search.as_ref().and_then(|s| s.detail()).unwrap();
        assert!(matches!(&detail.record, Resource::Loaded(r) if r.content == "hello"));
    }

    #[test]
    fn leaving_home_resets_the_form() {
        let counter = CounterStore::new();
        let mut app = App::new(counter.clone(), "/");
        type_text(&mut app, "1,2");
        counter.increment();

        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(app.router.current(), &Route::About);
        assert!(app.search.is_none());

        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.search.as_ref().unwrap().vector_input, "");
        assert_eq!(app.counter.count(), 1);
    }

    #[test]
    fn responses_after_unmount_are_dropped() {
        let mut app = App::new(CounterStore::new(), "/");
        let Some(Command::Search { request, .. }) = app.submit_search() else {
            panic!("search not issued");
        };
        app.navigate("/about");
        app.navigate("/");
        app.handle_event(AppEvent::SearchFinished { request, outcome: Ok(vec![]) });
        assert_eq!(app.search.as_ref().unwrap().results, Resource::Idle);
    }

    #[test]
    fn about_page_ignores_form_keys() {
        let mut app = App::new(CounterStore::new(), "/about");
        assert!(app.search.is_none());
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_instead_of_typing() {
        let mut app = App::new(CounterStore::new(), "/");
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.search.as_ref().unwrap().vector_input, "");

        // Plain 'c' is still text.
        let mut app = App::new(CounterStore::new(), "/");
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
        assert_eq!(app.search.as_ref().unwrap().vector_input, "c");
    }

    #[test]
    fn paste_goes_to_focused_field() {
        let mut app = App::new(CounterStore::new(), "/");
        app.paste("0.5,\r\n0.25");
        assert_eq!(app.search.as_ref().unwrap().vector_input, "0.5,0.25");
    }
}
