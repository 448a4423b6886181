//! Viewer application state and event loop
//!
//! `AppState` is the authoritative view state: the in-memory mirror of
//! the backend task list, the active filter, the load phase, and any
//! open modal. All network I/O happens on a dedicated worker thread
//! that owns a tokio runtime and services `LoadRequest`s from an mpsc
//! channel, so the UI thread never blocks. Every successful mutation
//! is followed by a full reload; the client never patches the list
//! locally.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::{Error, Result};
use crate::task::{Filter, Task, TaskDraft};
use crate::transport::TaskClient;

use super::editor::{EditorAction, EditorKind, EditorState};
use super::model;
use super::view;

const EVENT_POLL_MS: u64 = 120;

/// Requests serviced by the worker thread, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadRequest {
    Reload,
    Create(TaskDraft),
    Update(i64, TaskDraft),
    Toggle(i64),
    Delete(i64),
}

/// Messages from the worker back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiMsg {
    TasksLoaded(Vec<Task>),
    LoadError(String),
    MutationDone(&'static str),
    MutationError(String),
}

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// Load state machine for the full-list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadPhase {
    Loading,
    Ready,
    Error(String),
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: i64,
    pub(crate) name: String,
}

pub(crate) const MENU_ITEMS: [&str; 3] = ["Toggle status", "Edit", "Delete"];

/// Per-entry contextual action menu; at most one is open at a time.
pub(crate) struct MenuState {
    pub(crate) selected: usize,
}

pub struct AppState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) filtered: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) active_filter: Filter,
    pub(crate) phase: LoadPhase,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) menu: Option<MenuState>,
    pub(crate) notice: Option<(String, StatusKind)>,
    pub(crate) today: NaiveDate,
    pub(crate) base_url: String,
}

impl AppState {
    fn new(base_url: String, filter: Filter) -> Self {
        Self {
            tasks: Vec::new(),
            filtered: Vec::new(),
            selected: None,
            active_filter: filter,
            phase: LoadPhase::Loading,
            editor: None,
            delete_confirm: None,
            menu: None,
            notice: None,
            today: Local::now().date_naive(),
            base_url,
        }
    }

    pub(crate) fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|idx| self.tasks.get(idx))
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub(crate) fn load_error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        self.notice
            .as_ref()
            .map(|(message, kind)| (message.clone(), *kind))
    }

    pub(crate) fn count_summary(&self) -> String {
        let count = self.filtered.len();
        let noun = if count == 1 { "task" } else { "tasks" };
        format!("{count} {noun}")
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y/enter confirm delete  esc cancel".to_string();
        }
        if self.editor.is_some() {
            return "tab next field  space toggle done  enter save  esc cancel".to_string();
        }
        if self.menu.is_some() {
            return "j/k move  enter apply  esc close".to_string();
        }
        "j/k move  1-5 filter  space toggle  n new  e edit  d delete  r reload  q quit".to_string()
    }

    fn set_error(&mut self, message: String) {
        self.notice = Some((message, StatusKind::Error));
    }

    fn set_info(&mut self, message: String) {
        self.notice = Some((message, StatusKind::Info));
    }

    fn apply_filter(&mut self, previous_id: Option<i64>) {
        self.filtered = model::filter_indices(&self.tasks, self.active_filter, self.today);
        self.selected = model::select_by_id(&self.tasks, &self.filtered, previous_id);
    }

    fn set_filter(&mut self, filter: Filter) {
        self.active_filter = filter;
        self.today = Local::now().date_naive();
        let previous = self.selected_task().and_then(|task| task.id);
        self.apply_filter(previous);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let current_pos = self
            .selected
            .and_then(|idx| self.filtered.iter().position(|candidate| *candidate == idx))
            .unwrap_or(0);
        let max = self.filtered.len().saturating_sub(1);
        let next = (current_pos as isize + delta).clamp(0, max as isize) as usize;
        self.selected = Some(self.filtered[next]);
    }

    fn request_reload(&mut self, req_tx: &Sender<LoadRequest>) {
        self.phase = LoadPhase::Loading;
        let _ = req_tx.send(LoadRequest::Reload);
    }
}

/// Start the viewer: spawn the worker, queue the initial load, and
/// enter the terminal loop.
pub fn run(client: TaskClient, filter: Filter) -> Result<()> {
    let base_url = client.base_url().to_string();
    let (ui_tx, ui_rx) = mpsc::channel();
    let (req_tx, req_rx) = mpsc::channel();

    spawn_worker(client, req_rx, ui_tx);

    if req_tx.send(LoadRequest::Reload).is_err() {
        return Err(Error::OperationFailed(
            "failed to start task loader".to_string(),
        ));
    }

    let mut app = AppState::new(base_url, filter);
    run_terminal(&mut app, ui_rx, req_tx)
}

fn run_terminal(
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<LoadRequest>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, ui_rx, req_tx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<LoadRequest>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(msg) = ui_rx.try_recv() {
            handle_ui_msg(app, msg, &req_tx);
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key, &req_tx) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_ui_msg(app: &mut AppState, msg: UiMsg, req_tx: &Sender<LoadRequest>) {
    match msg {
        UiMsg::TasksLoaded(tasks) => {
            let previous_id = app.selected_task().and_then(|task| task.id);
            app.tasks = tasks;
            app.today = Local::now().date_naive();
            app.phase = LoadPhase::Ready;
            app.apply_filter(previous_id);
        }
        UiMsg::LoadError(message) => {
            app.phase = LoadPhase::Error(message);
        }
        UiMsg::MutationDone(message) => {
            app.set_info(message.to_string());
            app.request_reload(req_tx);
        }
        UiMsg::MutationError(message) => {
            app.set_error(format!("{message}. Please try again."));
        }
    }
}

/// Handle a key event; returns true when the app should quit.
fn handle_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<LoadRequest>) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // Any interaction acknowledges the previous notice.
    app.notice = None;

    if app.delete_confirm.is_some() {
        let confirm = match app.delete_confirm.take() {
            Some(confirm) => confirm,
            None => return false,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let _ = req_tx.send(LoadRequest::Delete(confirm.task_id));
            }
            KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                app.set_info("cancelled".to_string());
            }
            _ => {
                app.delete_confirm = Some(confirm);
            }
        }
        return false;
    }

    if app.editor.is_some() {
        let mut editor = match app.editor.take() {
            Some(editor) => editor,
            None => return false,
        };
        match editor.handle_key(key) {
            EditorAction::None => {
                app.editor = Some(editor);
            }
            EditorAction::Cancel => {
                app.set_info("cancelled".to_string());
            }
            EditorAction::Submit => match editor.build_submit() {
                Ok(draft) => {
                    // The modal closes no matter how the async
                    // mutation turns out; a failure surfaces as a
                    // notice afterwards.
                    let request = match editor.kind() {
                        EditorKind::NewTask => Some(LoadRequest::Create(draft)),
                        EditorKind::EditTask => editor
                            .task_id()
                            .map(|task_id| LoadRequest::Update(task_id, draft)),
                    };
                    match request {
                        Some(request) => {
                            let _ = req_tx.send(request);
                        }
                        None => app.set_error("missing task id for edit".to_string()),
                    }
                }
                Err(err) => {
                    editor.set_error(err);
                    app.editor = Some(editor);
                }
            },
        }
        return false;
    }

    if app.menu.is_some() {
        let mut menu = match app.menu.take() {
            Some(menu) => menu,
            None => return false,
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {}
            KeyCode::Char('j') | KeyCode::Down => {
                menu.selected = (menu.selected + 1) % MENU_ITEMS.len();
                app.menu = Some(menu);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                menu.selected = (menu.selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
                app.menu = Some(menu);
            }
            KeyCode::Enter => match menu.selected {
                0 => toggle_selected(app, req_tx),
                1 => edit_selected(app),
                2 => confirm_delete_selected(app),
                _ => {}
            },
            _ => {
                app.menu = Some(menu);
            }
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Char(ch @ '1'..='5') => {
            let idx = (ch as u8 - b'1') as usize;
            app.set_filter(Filter::ALL[idx]);
            false
        }
        KeyCode::Tab => {
            let current = Filter::ALL
                .iter()
                .position(|filter| *filter == app.active_filter)
                .unwrap_or(0);
            app.set_filter(Filter::ALL[(current + 1) % Filter::ALL.len()]);
            false
        }
        KeyCode::Char('r') => {
            app.request_reload(req_tx);
            false
        }
        KeyCode::Char('n') => {
            app.editor = Some(EditorState::new_task());
            false
        }
        KeyCode::Char('e') => {
            edit_selected(app);
            false
        }
        KeyCode::Char('d') => {
            confirm_delete_selected(app);
            false
        }
        KeyCode::Char(' ') => {
            toggle_selected(app, req_tx);
            false
        }
        KeyCode::Char('m') | KeyCode::Enter => {
            if app.selected_task().is_some() {
                app.menu = Some(MenuState { selected: 0 });
            } else {
                app.set_error("no task selected".to_string());
            }
            false
        }
        _ => false,
    }
}

fn toggle_selected(app: &mut AppState, req_tx: &Sender<LoadRequest>) {
    match app.selected_task().and_then(|task| task.id) {
        Some(id) => {
            let _ = req_tx.send(LoadRequest::Toggle(id));
        }
        None => app.set_error("no task selected".to_string()),
    }
}

fn edit_selected(app: &mut AppState) {
    match app.selected_task() {
        Some(task) => {
            app.editor = Some(EditorState::edit_task(task));
        }
        None => app.set_error("no task selected".to_string()),
    }
}

fn confirm_delete_selected(app: &mut AppState) {
    let Some(task) = app.selected_task() else {
        app.set_error("no task selected".to_string());
        return;
    };
    let Some(task_id) = task.id else {
        app.set_error("no task selected".to_string());
        return;
    };
    app.delete_confirm = Some(DeleteConfirmState {
        task_id,
        name: task.name.clone(),
    });
}

/// Worker thread: owns a tokio runtime and serializes all transport
/// calls. Because requests are serviced strictly in order, reloads
/// queued by concurrent mutations cannot overtake each other; the
/// last reload in request order determines the displayed list.
fn spawn_worker(client: TaskClient, req_rx: Receiver<LoadRequest>, ui_tx: Sender<UiMsg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiMsg::LoadError(format!("failed to start runtime: {err}")));
                return;
            }
        };

        while let Ok(req) = req_rx.recv() {
            let msg = match req {
                LoadRequest::Reload => match runtime.block_on(client.list_tasks()) {
                    Ok(tasks) => UiMsg::TasksLoaded(tasks),
                    Err(err) => UiMsg::LoadError(err.to_string()),
                },
                LoadRequest::Create(draft) => {
                    mutation_msg(runtime.block_on(client.create_task(&draft)), "task created")
                }
                LoadRequest::Update(id, draft) => mutation_msg(
                    runtime.block_on(client.update_task(id, &draft)),
                    "task updated",
                ),
                LoadRequest::Toggle(id) => mutation_msg(
                    runtime.block_on(client.toggle_task(id)),
                    "task status updated",
                ),
                LoadRequest::Delete(id) => {
                    mutation_msg(runtime.block_on(client.delete_task(id)), "task deleted")
                }
            };
            if ui_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn mutation_msg<T>(result: Result<T>, done: &'static str) -> UiMsg {
    match result {
        Ok(_) => UiMsg::MutationDone(done),
        Err(err) => UiMsg::MutationError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("date")
    }

    fn task(id: i64, name: &str, due: NaiveDate, completed: bool) -> Task {
        Task {
            id: Some(id),
            name: name.to_string(),
            description: format!("{name} description"),
            due_date: due,
            completed,
        }
    }

    fn app_with(filter: Filter) -> (AppState, Sender<LoadRequest>, Receiver<LoadRequest>) {
        let (req_tx, req_rx) = mpsc::channel();
        let app = AppState::new("http://localhost:8080".to_string(), filter);
        (app, req_tx, req_rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tasks_loaded_replaces_list_wholesale_and_clears_error() {
        let (mut app, req_tx, _req_rx) = app_with(Filter::All);
        app.tasks = vec![task(99, "stale", app.today, false)];
        app.phase = LoadPhase::Error("Failed to fetch tasks".to_string());

        let fresh = vec![
            task(1, "one", app.today, false),
            task(2, "two", app.today, true),
        ];
        handle_ui_msg(&mut app, UiMsg::TasksLoaded(fresh.clone()), &req_tx);

        assert_eq!(app.tasks, fresh);
        assert_eq!(app.phase, LoadPhase::Ready);
        assert_eq!(app.filtered, vec![0, 1]);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn load_error_keeps_previous_tasks_and_enters_error_state() {
        // First load failure: the list was empty and stays empty, and
        // the error view takes precedence over the empty view.
        let (mut app, req_tx, _req_rx) = app_with(Filter::All);
        handle_ui_msg(
            &mut app,
            UiMsg::LoadError("Failed to fetch tasks".to_string()),
            &req_tx,
        );

        assert!(app.tasks.is_empty());
        assert_eq!(app.load_error(), Some("Failed to fetch tasks"));
        assert!(!app.is_loading());
    }

    #[test]
    fn mutation_done_triggers_full_reload() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        app.phase = LoadPhase::Ready;

        handle_ui_msg(&mut app, UiMsg::MutationDone("task created"), &req_tx);

        assert_eq!(req_rx.try_recv(), Ok(LoadRequest::Reload));
        assert!(app.is_loading());
        assert!(matches!(app.notice, Some((_, StatusKind::Info))));
    }

    #[test]
    fn mutation_error_leaves_tasks_untouched() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        let tasks = vec![task(1, "keep", app.today, false)];
        handle_ui_msg(&mut app, UiMsg::TasksLoaded(tasks.clone()), &req_tx);

        handle_ui_msg(
            &mut app,
            UiMsg::MutationError("Failed to delete task".to_string()),
            &req_tx,
        );

        assert_eq!(app.tasks, tasks);
        assert_eq!(app.phase, LoadPhase::Ready);
        assert!(req_rx.try_recv().is_err());
        match &app.notice {
            Some((message, StatusKind::Error)) => {
                assert_eq!(message, "Failed to delete task. Please try again.");
            }
            _ => panic!("expected error notice"),
        }
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        let today = app.today;
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![task(7, "doomed", today, false)]),
            &req_tx,
        );

        handle_key(&mut app, key(KeyCode::Char('d')), &req_tx);
        assert!(app.delete_confirm.is_some());
        assert!(req_rx.try_recv().is_err());

        handle_key(&mut app, key(KeyCode::Char('y')), &req_tx);
        assert!(app.delete_confirm.is_none());
        assert_eq!(req_rx.try_recv(), Ok(LoadRequest::Delete(7)));
    }

    #[test]
    fn delete_confirm_can_be_cancelled() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        let today = app.today;
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![task(7, "spared", today, false)]),
            &req_tx,
        );

        handle_key(&mut app, key(KeyCode::Char('d')), &req_tx);
        handle_key(&mut app, key(KeyCode::Esc), &req_tx);
        assert!(app.delete_confirm.is_none());
        assert!(req_rx.try_recv().is_err());
    }

    #[test]
    fn toggle_sends_request_for_selected_task() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        let today = app.today;
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![
                task(1, "a", today, false),
                task(2, "b", today, false),
            ]),
            &req_tx,
        );
        handle_key(&mut app, key(KeyCode::Char('j')), &req_tx);
        handle_key(&mut app, key(KeyCode::Char(' ')), &req_tx);
        assert_eq!(req_rx.try_recv(), Ok(LoadRequest::Toggle(2)));
    }

    #[test]
    fn editor_submit_closes_modal_and_sends_create() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        app.phase = LoadPhase::Ready;

        handle_key(&mut app, key(KeyCode::Char('n')), &req_tx);
        assert!(app.editor.is_some());

        for ch in "Groceries".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)), &req_tx);
        }
        handle_key(&mut app, key(KeyCode::Tab), &req_tx);
        for ch in "Milk and eggs".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)), &req_tx);
        }
        handle_key(&mut app, key(KeyCode::Tab), &req_tx);
        for ch in "2026-09-01".chars() {
            handle_key(&mut app, key(KeyCode::Char(ch)), &req_tx);
        }
        handle_key(&mut app, key(KeyCode::Enter), &req_tx);

        assert!(app.editor.is_none());
        match req_rx.try_recv() {
            Ok(LoadRequest::Create(draft)) => {
                assert_eq!(draft.name, "Groceries");
                assert_eq!(draft.description, "Milk and eggs");
                assert_eq!(draft.due_date, date(2026, 9, 1));
                assert!(!draft.completed);
            }
            other => panic!("expected create request, got {other:?}"),
        }
    }

    #[test]
    fn editor_stays_open_on_validation_error() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        handle_key(&mut app, key(KeyCode::Char('n')), &req_tx);
        // Submit the blank form from the last row.
        handle_key(&mut app, key(KeyCode::BackTab), &req_tx);
        handle_key(&mut app, key(KeyCode::Enter), &req_tx);
        assert!(app.editor.is_some());
        assert!(req_rx.try_recv().is_err());
    }

    #[test]
    fn edit_submit_targets_the_editing_task() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![task(5, "rename me", date(2026, 9, 2), false)]),
            &req_tx,
        );

        handle_key(&mut app, key(KeyCode::Char('e')), &req_tx);
        assert!(app.editor.is_some());
        // Jump to the checkbox row and submit the prefilled form.
        handle_key(&mut app, key(KeyCode::BackTab), &req_tx);
        handle_key(&mut app, key(KeyCode::Char(' ')), &req_tx);
        handle_key(&mut app, key(KeyCode::Enter), &req_tx);

        assert!(app.editor.is_none());
        match req_rx.try_recv() {
            Ok(LoadRequest::Update(5, draft)) => {
                assert_eq!(draft.name, "rename me");
                assert!(draft.completed);
            }
            other => panic!("expected update request, got {other:?}"),
        }
    }

    #[test]
    fn filter_keys_switch_the_active_filter() {
        let (mut app, req_tx, _req_rx) = app_with(Filter::All);
        let yesterday = app.today.pred_opt().expect("yesterday");
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![
                task(1, "open", yesterday, false),
                task(2, "done", yesterday, true),
            ]),
            &req_tx,
        );

        handle_key(&mut app, key(KeyCode::Char('3')), &req_tx);
        assert_eq!(app.active_filter, Filter::Completed);
        assert_eq!(app.filtered, vec![1]);

        handle_key(&mut app, key(KeyCode::Char('2')), &req_tx);
        assert_eq!(app.active_filter, Filter::Active);
        assert_eq!(app.filtered, vec![0]);
    }

    #[test]
    fn menu_opens_for_one_entry_and_applies_actions() {
        let (mut app, req_tx, req_rx) = app_with(Filter::All);
        let today = app.today;
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![task(3, "menu target", today, false)]),
            &req_tx,
        );

        handle_key(&mut app, key(KeyCode::Enter), &req_tx);
        assert!(app.menu.is_some());

        // Choosing an action closes the menu.
        handle_key(&mut app, key(KeyCode::Enter), &req_tx);
        assert!(app.menu.is_none());
        assert_eq!(req_rx.try_recv(), Ok(LoadRequest::Toggle(3)));
    }

    #[test]
    fn notice_clears_on_next_interaction() {
        let (mut app, req_tx, _req_rx) = app_with(Filter::All);
        handle_ui_msg(
            &mut app,
            UiMsg::MutationError("Failed to toggle task status".to_string()),
            &req_tx,
        );
        assert!(app.notice.is_some());
        handle_key(&mut app, key(KeyCode::Char('j')), &req_tx);
        assert!(app.notice.is_none());
    }

    #[test]
    fn reload_preserves_selection_by_id() {
        let (mut app, req_tx, _req_rx) = app_with(Filter::All);
        let today = app.today;
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![
                task(1, "a", today, false),
                task(2, "b", today, false),
            ]),
            &req_tx,
        );
        handle_key(&mut app, key(KeyCode::Char('j')), &req_tx);
        assert_eq!(app.selected_task().and_then(|t| t.id), Some(2));

        // Server returns the list in a different order.
        handle_ui_msg(
            &mut app,
            UiMsg::TasksLoaded(vec![
                task(2, "b", today, false),
                task(1, "a", today, false),
            ]),
            &req_tx,
        );
        assert_eq!(app.selected_task().and_then(|t| t.id), Some(2));
    }
}
