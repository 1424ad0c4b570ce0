// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive demo shell (ratatui + crossterm): a fake multi-page app with
//! an in-memory DOM per page, a router with simulated navigation latency, and the full
//! tour experience on top — selection modal, onboarding checklist, step overlay.

use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::dom::{Bounds, Document, DomQuery, Element, ElementHandle, Selector};
use crate::model::{
    ChecklistItemId, Difficulty, HighlightGeometry, PreferredSide, Tour, TourCatalog, TourId,
    TourStep,
};
use crate::onboarding::OnboardingChecklist;
use crate::runner::{LocateTicket, Router, RunnerConfig, RunnerPhase, StartOutcome, TourRunner};
use crate::select::{CategoryFilter, ExternalTourMap, SelectionModel, TourSummary};
use crate::store::{ProgressStore, StorageBackend};

mod overlay;

use overlay::CardAnchor;

const HIGHLIGHT_COLOR: Color = Color::LightGreen;
const PAGE_BOX_COLOR: Color = Color::DarkGray;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅲 🅸 🅲 🅴 🆁 🅾 🅽 🅴 ";
const CARD_WIDTH: u16 = 40;
const NAVIGATION_LATENCY: Duration = Duration::from_millis(150);

/// Demo pages reachable with the number keys, in key order.
const PAGES: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/dashboard/content", "Content"),
    ("/dashboard/social", "Social"),
    ("/dashboard/affiliates", "Affiliates"),
    ("/dashboard/analytics", "Analytics"),
    ("/dashboard/settings", "Settings"),
];

/// Runs the interactive demo shell on top of the given progress store.
pub fn run<S: StorageBackend>(
    progress: ProgressStore<S>,
    config: RunnerConfig,
) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(progress, config)?;

    while !app.should_quit {
        app.tick(&runtime);
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, &runtime);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Multi-page in-memory DOM; the [`DomQuery`] seam only ever sees the current page.
#[derive(Debug, Clone, Default)]
pub struct ShellDom {
    inner: Arc<Mutex<ShellDomInner>>,
}

#[derive(Debug, Default)]
struct ShellDomInner {
    pages: BTreeMap<String, Document>,
    current: String,
}

impl ShellDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_page(&self, path: impl Into<String>, document: Document) {
        let mut inner = self.lock();
        inner.pages.insert(path.into(), document);
    }

    pub fn set_current(&self, path: &str) {
        let mut inner = self.lock();
        inner.current = path.to_owned();
    }

    pub fn current(&self) -> String {
        self.lock().current.clone()
    }

    pub fn with_current<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Option<T> {
        let mut inner = self.lock();
        let current = inner.current.clone();
        inner.pages.get_mut(&current).map(f)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ShellDomInner> {
        self.inner.lock().expect("shell dom lock poisoned")
    }
}

impl DomQuery for ShellDom {
    fn query_selector(&self, selector: &Selector) -> Option<ElementHandle> {
        self.with_current(|doc| doc.query(selector)).flatten()
    }

    fn bounds_of(&self, handle: &ElementHandle) -> Option<Bounds> {
        self.with_current(|doc| doc.bounds(handle)).flatten()
    }

    fn scroll_into_view(&self, handle: &ElementHandle) {
        let _ = self.with_current(|doc| doc.record_scroll(handle));
    }

    fn apply_highlight(&self, handle: &ElementHandle) {
        let _ = self.with_current(|doc| doc.set_highlight(handle));
    }

    fn clear_highlight(&self) {
        let _ = self.with_current(Document::clear_highlight);
    }
}

/// History-style router with simulated latency: `navigate_to` schedules the route
/// change, and the shell observes it settling via [`ShellRouter::take_settled`].
#[derive(Debug, Clone)]
pub struct ShellRouter {
    inner: Arc<Mutex<RouterInner>>,
}

#[derive(Debug)]
struct RouterInner {
    current: String,
    pending: Option<PendingNavigation>,
    latency: Duration,
}

#[derive(Debug)]
struct PendingNavigation {
    target: String,
    settles_at: Instant,
}

impl ShellRouter {
    pub fn new(initial: &str, latency: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RouterInner {
                current: initial.to_owned(),
                pending: None,
                latency,
            })),
        }
    }

    /// Completes a scheduled navigation whose latency has elapsed.
    pub fn take_settled(&self) -> Option<String> {
        let mut inner = self.lock();
        let settled = match &inner.pending {
            Some(pending) if Instant::now() >= pending.settles_at => pending.target.clone(),
            _ => return None,
        };
        inner.pending = None;
        inner.current = settled.clone();
        Some(settled)
    }

    pub fn pending_target(&self) -> Option<String> {
        self.lock().pending.as_ref().map(|pending| pending.target.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterInner> {
        self.inner.lock().expect("shell router lock poisoned")
    }
}

impl Router for ShellRouter {
    fn current_path(&self) -> String {
        self.lock().current.clone()
    }

    fn navigate_to(&mut self, path: &str) {
        let mut inner = self.lock();
        debug!(path, "navigation scheduled");
        let settles_at = Instant::now() + inner.latency;
        inner.pending = Some(PendingNavigation { target: path.to_owned(), settles_at });
    }
}

#[derive(Debug, Default)]
struct TourSelectState {
    search: String,
    category: Option<String>,
    cursor: usize,
}

#[derive(Debug, Default)]
struct ChecklistState {
    cursor: usize,
}

#[derive(Debug, Default)]
enum Modal {
    #[default]
    None,
    TourSelect(TourSelectState),
    Checklist(ChecklistState),
}

enum ModalCommand {
    None,
    Close,
    StartSelected,
    ToggleSelected,
    CycleCategory,
}

struct Toast {
    message: String,
    expires_at: Instant,
}

struct App<S: StorageBackend> {
    runner: TourRunner<ShellDom, ShellRouter, S>,
    dom: ShellDom,
    router: ShellRouter,
    selection: SelectionModel,
    checklist: OnboardingChecklist,
    modal: Modal,
    navigation_deadline: Option<Instant>,
    toast: Option<Toast>,
    should_quit: bool,
}

impl<S: StorageBackend> App<S> {
    fn new(progress: ProgressStore<S>, config: RunnerConfig) -> Result<Self, Box<dyn Error>> {
        let catalog = Arc::new(demo_catalog());
        let external = demo_external_map(&catalog)?;
        let dom = demo_dom();
        let router = ShellRouter::new(PAGES[0].0, NAVIGATION_LATENCY);
        dom.set_current(PAGES[0].0);

        let runner = TourRunner::new(catalog.clone(), dom.clone(), router.clone(), progress, config);
        let selection = SelectionModel::new(catalog, external);

        Ok(Self {
            runner,
            dom,
            router,
            selection,
            checklist: OnboardingChecklist::with_default_items(),
            modal: Modal::None,
            navigation_deadline: None,
            toast: None,
            should_quit: false,
        })
    }

    /// Per-frame housekeeping: settle navigations, fire timeouts, drain one-shot events.
    fn tick(&mut self, runtime: &Runtime) {
        if let Some(path) = self.router.take_settled() {
            self.dom.set_current(&path);
            let ticket = self.runner.route_changed(&path);
            // A user navigation can settle on some other page first; the timeout stays
            // armed until the runner actually leaves AwaitingNavigation.
            if self.runner.phase() != RunnerPhase::AwaitingNavigation {
                self.navigation_deadline = None;
            }
            self.drive(runtime, ticket);
        } else if let Some(deadline) = self.navigation_deadline {
            if Instant::now() >= deadline {
                self.navigation_deadline = None;
                let ticket = self.runner.navigation_timed_out();
                self.drive(runtime, ticket);
            }
        }

        if self.runner.take_selection_request() {
            self.modal = Modal::TourSelect(TourSelectState::default());
        }

        if self.checklist.take_completed_event() {
            let default_tour = self.selection.external().default_tour().clone();
            self.set_toast("Setup complete! Starting the dashboard tour");
            self.modal = Modal::None;
            self.start_tour(&default_tour, runtime);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, runtime: &Runtime) {
        let command = match &mut self.modal {
            Modal::None => {
                self.handle_global_key(key, runtime);
                return;
            }
            Modal::TourSelect(state) => tour_select_key(state, key),
            Modal::Checklist(state) => checklist_key(state, key),
        };

        match command {
            ModalCommand::Close => self.modal = Modal::None,
            ModalCommand::StartSelected => {
                if let Some(tour_id) = self.selected_tour_in_modal() {
                    self.modal = Modal::None;
                    self.start_tour(&tour_id, runtime);
                }
            }
            ModalCommand::ToggleSelected => self.toggle_selected_checklist_item(),
            ModalCommand::CycleCategory => {
                if let Modal::TourSelect(state) = &mut self.modal {
                    state.category = cycle_category(self.selection.catalog(), &state.category);
                    state.cursor = 0;
                }
            }
            ModalCommand::None => {}
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent, runtime: &Runtime) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.modal = Modal::TourSelect(TourSelectState::default()),
            KeyCode::Char('o') => self.modal = Modal::Checklist(ChecklistState::default()),
            KeyCode::Char('n') | KeyCode::Right => {
                let ticket = self.runner.next();
                self.drive(runtime, ticket);
            }
            KeyCode::Char('p') | KeyCode::Left => {
                let ticket = self.runner.previous();
                self.drive(runtime, ticket);
            }
            KeyCode::Char('b') => {
                if self.runner.phase() != RunnerPhase::Idle {
                    self.runner.jump_to_selection();
                }
            }
            KeyCode::Esc => {
                if self.runner.phase() != RunnerPhase::Idle {
                    self.runner.cancel();
                    self.navigation_deadline = None;
                    self.set_toast("Tour ended");
                }
            }
            KeyCode::Char(digit @ '1'..='6') => {
                let index = (digit as usize) - ('1' as usize);
                if let Some((path, _)) = PAGES.get(index) {
                    self.user_navigate(path);
                }
            }
            _ => {}
        }
    }

    fn user_navigate(&mut self, path: &str) {
        if self.router.current_path() == path && self.router.pending_target().is_none() {
            return;
        }
        self.router.navigate_to(path);
    }

    fn start_tour(&mut self, tour_id: &TourId, runtime: &Runtime) {
        match self.runner.start(tour_id) {
            Ok(StartOutcome::Started { ticket }) => self.drive(runtime, ticket),
            Ok(StartOutcome::AwaitingNavigation { .. }) => {
                self.navigation_deadline =
                    Some(Instant::now() + self.runner.config().navigation_timeout);
            }
            Err(err) => self.set_toast(format!("Cannot start tour: {err}")),
        }
    }

    fn drive(&mut self, runtime: &Runtime, ticket: Option<LocateTicket>) {
        if let Some(ticket) = ticket {
            runtime.block_on(self.runner.resolve(ticket));
        }
    }

    fn visible_summaries(&self, state: &TourSelectState) -> Vec<TourSummary> {
        let filter = match &state.category {
            None => CategoryFilter::All,
            Some(category) => CategoryFilter::Category(category.as_str()),
        };
        self.selection.filtered_tours(self.runner.progress(), filter, &state.search)
    }

    fn selected_tour_in_modal(&self) -> Option<TourId> {
        let Modal::TourSelect(state) = &self.modal else {
            return None;
        };
        let summaries = self.visible_summaries(state);
        if summaries.is_empty() {
            return None;
        }
        let index = state.cursor.min(summaries.len() - 1);
        Some(summaries[index].tour_id.clone())
    }

    fn toggle_selected_checklist_item(&mut self) {
        let Modal::Checklist(state) = &self.modal else {
            return;
        };
        let item_id: Option<ChecklistItemId> = self
            .checklist
            .items()
            .get(state.cursor.min(self.checklist.items().len().saturating_sub(1)))
            .map(|item| item.id().clone());
        if let Some(item_id) = item_id {
            self.checklist.toggle(&item_id);
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast =
            Some(Toast { message: message.into(), expires_at: Instant::now() + Duration::from_secs(2) });
    }
}

/// `All` -> first category -> ... -> last category -> back to `All`.
fn cycle_category(catalog: &TourCatalog, current: &Option<String>) -> Option<String> {
    let categories = catalog.categories();
    match current {
        None => categories.first().map(|c| (*c).to_owned()),
        Some(active) => {
            let position = categories.iter().position(|c| *c == active.as_str())?;
            categories.get(position + 1).map(|c| (*c).to_owned())
        }
    }
}

fn tour_select_key(state: &mut TourSelectState, key: KeyEvent) -> ModalCommand {
    match key.code {
        KeyCode::Esc => return ModalCommand::Close,
        KeyCode::Enter => return ModalCommand::StartSelected,
        KeyCode::Up => state.cursor = state.cursor.saturating_sub(1),
        KeyCode::Down => state.cursor = state.cursor.saturating_add(1),
        KeyCode::Backspace => {
            state.search.pop();
            state.cursor = 0;
        }
        KeyCode::Tab => return ModalCommand::CycleCategory,
        KeyCode::Char(ch) => {
            state.search.push(ch);
            state.cursor = 0;
        }
        _ => {}
    }
    ModalCommand::None
}

fn checklist_key(state: &mut ChecklistState, key: KeyEvent) -> ModalCommand {
    match key.code {
        KeyCode::Esc => ModalCommand::Close,
        KeyCode::Enter | KeyCode::Char(' ') => ModalCommand::ToggleSelected,
        KeyCode::Up => {
            state.cursor = state.cursor.saturating_sub(1);
            ModalCommand::None
        }
        KeyCode::Down => {
            state.cursor = state.cursor.saturating_add(1);
            ModalCommand::None
        }
        _ => ModalCommand::None,
    }
}

fn draw<S: StorageBackend>(frame: &mut Frame<'_>, app: &mut App<S>) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let tabs_area = layout[0];
    let page_area = layout[1];
    let status_area = layout[2];

    draw_tabs(frame, tabs_area, &app.dom.current());
    draw_page(frame, page_area, app);
    draw_overlay(frame, page_area, app);

    match &app.modal {
        Modal::TourSelect(state) => draw_tour_selection(frame, page_area, app, state),
        Modal::Checklist(state) => draw_checklist(frame, page_area, app, state),
        Modal::None => {}
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if Instant::now() < expires_at => Some(message),
        Some(_) => {
            app.toast = None;
            None
        }
        None => None,
    };
    frame.render_widget(Paragraph::new(footer_line(app, toast_suffix.as_deref())), status_area);
}

fn draw_tabs(frame: &mut Frame<'_>, area: Rect, current: &str) {
    let mut spans = Vec::new();
    for (index, (path, title)) in PAGES.iter().enumerate() {
        let style = if *path == current {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} {title} ", index + 1), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_page<S: StorageBackend>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) {
    let boxes: Vec<(Bounds, Option<String>, bool)> = app
        .dom
        .with_current(|doc| {
            let highlighted = doc.highlighted();
            doc.handles()
                .map(|handle| {
                    let bounds = doc.bounds(&handle).unwrap_or_default();
                    let label = doc.label(&handle).map(str::to_owned);
                    let is_highlighted = highlighted.as_ref() == Some(&handle);
                    (bounds, label, is_highlighted)
                })
                .collect()
        })
        .unwrap_or_default();

    for (bounds, label, is_highlighted) in boxes {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            continue;
        }
        let offset = Bounds::new(
            bounds.top + f64::from(area.y),
            bounds.left + f64::from(area.x),
            bounds.width,
            bounds.height,
        );
        let Some(rect) = overlay::highlight_rect(area, offset) else {
            continue;
        };
        let style = if is_highlighted {
            Style::default().fg(HIGHLIGHT_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(PAGE_BOX_COLOR)
        };
        let mut block = Block::default().borders(Borders::ALL).border_style(style);
        if let Some(label) = label {
            block = block.title(label);
        }
        frame.render_widget(block, rect);
    }
}

fn draw_overlay<S: StorageBackend>(frame: &mut Frame<'_>, area: Rect, app: &App<S>) {
    let Some(card) = app.runner.current_card() else {
        return;
    };
    let Some(state) = app.runner.state() else {
        return;
    };
    if !state.visible() {
        return;
    }

    let anchor = if card.step_index.is_none() || card.preferred_side == PreferredSide::Center {
        CardAnchor::Centered
    } else {
        match state.highlight() {
            Some(HighlightGeometry::Resolved(bounds)) => CardAnchor::Element(Bounds::new(
                bounds.top + f64::from(area.y),
                bounds.left + f64::from(area.x),
                bounds.width,
                bounds.height,
            )),
            Some(HighlightGeometry::NotFound) => CardAnchor::Detached,
            // Locate still in flight; park the card until geometry arrives.
            None => CardAnchor::Detached,
        }
    };

    let body_width = usize::from(CARD_WIDTH.saturating_sub(4)).max(1);
    let body_lines = (card.body.chars().count() / body_width + 1) as u16;
    let height = body_lines + 4;
    let rect = overlay::place_card(area, anchor, card.preferred_side, CARD_WIDTH, height);

    let progress = match card.step_index {
        Some(index) => format!("Step {} of {}", index + 1, card.step_count),
        None => "Finished".to_owned(),
    };
    let hints = if card.step_index.is_some() {
        "n next · p back · Esc end"
    } else {
        "b browse tours · Esc close"
    };

    let text = Text::from(vec![
        Line::from(Span::raw(card.body.clone())),
        Line::from(""),
        Line::from(vec![
            Span::styled(progress, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(hints, Style::default().fg(FOOTER_KEY_COLOR)),
        ]),
    ]);
    let widget = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(card.title.clone())
            .border_style(Style::default().fg(HIGHLIGHT_COLOR)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn draw_tour_selection<S: StorageBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App<S>,
    state: &TourSelectState,
) {
    let rect = centered_rect(area, 80, 80);
    let summaries = app.visible_summaries(state);
    let stats = app.selection.completion_stats(app.runner.progress());
    let cursor = if summaries.is_empty() { 0 } else { state.cursor.min(summaries.len() - 1) };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(FOOTER_LABEL_COLOR)),
            Span::raw(state.search.clone()),
            Span::styled("▏", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!(
                "Category: {}   ·   {}/{} tours completed ({}%)",
                state.category.as_deref().unwrap_or("All"),
                stats.completed,
                stats.total,
                stats.percent
            ),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )),
        Line::from(""),
    ];

    if summaries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tours match the current filters",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (index, summary) in summaries.iter().enumerate() {
        let marker = if summary.completed { "✓" } else { " " };
        let style = if index == cursor {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker} {}  — {} · {} steps · {} min · {}",
                summary.title,
                summary.category,
                summary.step_count,
                summary.estimated_minutes,
                summary.difficulty.label()
            ),
            style,
        )));
        if index == cursor && !summary.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", summary.description),
                Style::default().fg(Color::Gray),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select · Enter start · type to search · Esc close",
        Style::default().fg(FOOTER_KEY_COLOR),
    )));

    let widget = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Choose a Tour")
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn draw_checklist<S: StorageBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &App<S>,
    state: &ChecklistState,
) {
    let rect = centered_rect(area, 70, 70);
    let items = app.checklist.items();
    let cursor = state.cursor.min(items.len().saturating_sub(1));

    let mut list_items = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let marker = if item.done() { "◼" } else { "◻" };
        let mut style = Style::default().fg(Color::White);
        if index == cursor {
            style = style.add_modifier(Modifier::BOLD).bg(Color::DarkGray);
        }
        list_items.push(ListItem::new(Line::from(Span::styled(
            format!("{marker} {} — {}", item.title(), item.description()),
            style,
        ))));
    }

    let title = format!(
        "Getting Started ({}/{} · {}%)",
        app.checklist.done_count(),
        items.len(),
        app.checklist.completion_percentage()
    );
    let widget = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::White)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn footer_line<S: StorageBackend>(app: &App<S>, toast: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::styled(FOOTER_BRAND, Style::default().fg(FOOTER_BRAND_COLOR))];
    let keys: &[(&str, &str)] = match app.runner.phase() {
        RunnerPhase::Idle => {
            &[("t", "tours"), ("o", "setup"), ("1-6", "pages"), ("q", "quit")]
        }
        RunnerPhase::AwaitingNavigation => &[("Esc", "cancel")],
        RunnerPhase::Active(_) => {
            &[("n", "next"), ("p", "back"), ("1-6", "pages"), ("Esc", "end")]
        }
        RunnerPhase::Completed => &[("b", "tours"), ("Esc", "close")],
    };
    for (key, label) in keys {
        spans.push(Span::styled(format!(" {key} "), Style::default().fg(FOOTER_KEY_COLOR)));
        spans.push(Span::styled((*label).to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    if let Some(toast) = toast {
        spans.push(Span::styled(
            format!("  ▸ {toast}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn owned(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| (*s).to_owned()).collect()
}

fn step(selectors: &[&str], title: &str, body: &str, side: PreferredSide) -> TourStep {
    TourStep::new(owned(selectors), title, body, side).expect("demo step is well-formed")
}

/// The built-in demo catalog: five tours over the fake affiliate-marketing dashboard.
pub fn demo_catalog() -> TourCatalog {
    let tid = |value: &str| TourId::new(value).expect("demo tour id");

    let dashboard = Tour::new(
        tid("dashboard"),
        "Dashboard Tour",
        "/dashboard",
        vec![
            step(
                &[
                    "[data-testid='stats-cards']",
                    ".stats-cards",
                    ".grid.grid-cols-1.md\\:grid-cols-2.xl\\:grid-cols-4",
                ],
                "Overview Cards",
                "These cards show your key performance metrics at a glance - revenue, \
                 visitors, content count, and conversion rates.",
                PreferredSide::Bottom,
            ),
            step(
                &[".bg-gradient-to-br.from-green-50", "[class*='from-green-50']"],
                "Revenue Tracking",
                "Monitor your affiliate earnings and revenue trends. This shows your total \
                 earnings and percentage growth.",
                PreferredSide::Bottom,
            ),
            step(
                &[".bg-gradient-to-br.from-blue-50", "[class*='from-blue-50']"],
                "Visitor Analytics",
                "Track how many people are visiting your content and engaging with your \
                 affiliate links.",
                PreferredSide::Left,
            ),
            step(
                &[".recent-activities", "[class*='activity']", "[class*='from-purple-50']"],
                "Recent Activity",
                "Stay updated with your latest affiliate activities, clicks, and conversions.",
                PreferredSide::Top,
            ),
        ],
    )
    .expect("demo tour")
    .with_description("Learn how to navigate your dashboard and understand key metrics")
    .with_category("Getting Started")
    .with_difficulty(Difficulty::Beginner)
    .with_estimated_minutes(3);

    let content_generator = Tour::new(
        tid("content-generator"),
        "Content Generator Tour",
        "/dashboard/content",
        vec![
            step(
                &["[data-tour-id='content-type']"],
                "Choose Content Type",
                "Select what type of content you want to create - blog posts, social media \
                 posts, emails, or product reviews.",
                PreferredSide::Bottom,
            ),
            step(
                &["[data-tour-id='topic']"],
                "Content Topic",
                "Enter the main topic or subject for your content. Be specific to get better \
                 AI-generated results.",
                PreferredSide::Right,
            ),
            step(
                &["[data-tour-id='audience']"],
                "Target Audience",
                "Define who you're writing for. This helps the AI tailor the tone and style \
                 of the content.",
                PreferredSide::Left,
            ),
            step(
                &["[data-tour-id='generate-button']"],
                "Generate Content",
                "Click here to let AI create your affiliate marketing content based on your \
                 inputs.",
                PreferredSide::Top,
            ),
        ],
    )
    .expect("demo tour")
    .with_description("Master the AI content generator from topic to finished draft")
    .with_category("Content Creation")
    .with_difficulty(Difficulty::Intermediate)
    .with_estimated_minutes(5);

    let social_media = Tour::new(
        tid("social-media"),
        "Social Media Manager Tour",
        "/dashboard/social",
        vec![
            step(
                &[".social-accounts", "[class*='social-account']"],
                "Connect Your Accounts",
                "Link your social media accounts (Facebook, Instagram, Twitter, LinkedIn) to \
                 manage them all from one place.",
                PreferredSide::Bottom,
            ),
            step(
                &[".post-scheduler", "[class*='schedule']"],
                "Schedule Posts",
                "Plan and schedule your content to be posted automatically at optimal times \
                 for maximum engagement.",
                PreferredSide::Left,
            ),
            step(
                &[".analytics", "[class*='analytic']"],
                "Performance Analytics",
                "Track engagement, clicks, and performance across all your social media \
                 platforms.",
                PreferredSide::Top,
            ),
        ],
    )
    .expect("demo tour")
    .with_description("Manage, schedule, and measure posts across your social accounts")
    .with_category("Social Media")
    .with_difficulty(Difficulty::Intermediate)
    .with_estimated_minutes(4);

    let affiliate_links = Tour::new(
        tid("affiliate-links"),
        "Affiliate Links Tour",
        "/dashboard/affiliates",
        vec![
            step(
                &[".affiliate-programs", "[class*='program']"],
                "Affiliate Programs",
                "Manage all your affiliate programs and partnerships in one centralized \
                 location.",
                PreferredSide::Bottom,
            ),
            step(
                &[".link-generator", "[class*='link']"],
                "Link Management",
                "Create, track, and optimize your affiliate links for better conversion \
                 rates.",
                PreferredSide::Right,
            ),
            step(
                &[".performance-metrics", "[class*='performance']"],
                "Performance Tracking",
                "Monitor clicks, conversions, and earnings for each affiliate link and \
                 program.",
                PreferredSide::Top,
            ),
        ],
    )
    .expect("demo tour")
    .with_description("Create, track, and optimize your affiliate links and programs")
    .with_category("Affiliate Marketing")
    .with_difficulty(Difficulty::Intermediate)
    .with_estimated_minutes(4);

    let analytics = Tour::new(
        tid("analytics"),
        "Analytics Tour",
        "/dashboard/analytics",
        vec![
            step(
                &[".analytics-overview", "[class*='overview']"],
                "Analytics Overview",
                "Get comprehensive insights into your affiliate marketing performance across \
                 all channels.",
                PreferredSide::Bottom,
            ),
            step(
                &[".conversion-funnel", "[class*='funnel']"],
                "Conversion Funnel",
                "Analyze your customer journey from first click to final conversion.",
                PreferredSide::Left,
            ),
            step(
                &[".revenue-breakdown", "[class*='revenue']"],
                "Revenue Analysis",
                "Deep dive into your earnings by source, time period, and affiliate program.",
                PreferredSide::Top,
            ),
        ],
    )
    .expect("demo tour")
    .with_description("Understand your performance metrics and key analytics")
    .with_category("Analytics")
    .with_difficulty(Difficulty::Beginner)
    .with_estimated_minutes(4);

    TourCatalog::new(vec![dashboard, content_generator, social_media, affiliate_links, analytics])
        .expect("demo catalog ids are unique")
}

/// Mapping from the legacy selection-card vocabulary onto catalog ids, verified at
/// startup. Unlisted ids fall back to the dashboard tour.
pub fn demo_external_map(
    catalog: &TourCatalog,
) -> Result<ExternalTourMap, crate::select::SelectError> {
    let tid = |value: &str| TourId::new(value).expect("demo tour id");
    let entries = [
        ("dashboard-overview", "dashboard"),
        ("onboarding-basics", "dashboard"),
        ("content-generator", "content-generator"),
        ("content-optimization", "content-generator"),
        ("email-campaigns", "content-generator"),
        ("affiliate-links", "affiliate-links"),
        ("list-management", "affiliate-links"),
        ("social-posting", "social-media"),
        ("engagement-tracking", "social-media"),
        ("conversion-tracking", "analytics"),
        ("analytics-setup", "analytics"),
        ("performance-tracking", "analytics"),
        ("account-settings", "dashboard"),
        ("notification-setup", "dashboard"),
    ]
    .into_iter()
    .map(|(external, tour)| (external.to_owned(), tid(tour)));
    ExternalTourMap::verified(entries, tid("dashboard"), catalog)
}

/// The fake dashboard pages, one [`Document`] per route.
pub fn demo_dom() -> ShellDom {
    let dom = ShellDom::new();

    let mut dashboard = Document::new();
    let root = dashboard.append(Element::new("div").class("page"), None);
    dashboard.append(
        Element::new("div")
            .class("stats-cards")
            .attr("data-testid", "stats-cards")
            .bounds(1.0, 1.0, 76.0, 5.0)
            .label("Overview"),
        Some(&root),
    );
    dashboard.append(
        Element::new("div")
            .class("bg-gradient-to-br")
            .class("from-green-50")
            .bounds(7.0, 1.0, 25.0, 6.0)
            .label("Revenue"),
        Some(&root),
    );
    dashboard.append(
        Element::new("div")
            .class("bg-gradient-to-br")
            .class("from-blue-50")
            .bounds(7.0, 28.0, 25.0, 6.0)
            .label("Visitors"),
        Some(&root),
    );
    dashboard.append(
        Element::new("div")
            .class("recent-activities")
            .bounds(14.0, 1.0, 52.0, 7.0)
            .label("Recent Activity"),
        Some(&root),
    );
    dom.insert_page("/dashboard", dashboard);

    let mut content = Document::new();
    let root = content.append(Element::new("div").class("page"), None);
    content.append(
        Element::new("select")
            .attr("data-tour-id", "content-type")
            .bounds(1.0, 1.0, 30.0, 4.0)
            .label("Content Type"),
        Some(&root),
    );
    content.append(
        Element::new("input")
            .attr("data-tour-id", "topic")
            .bounds(6.0, 1.0, 30.0, 4.0)
            .label("Topic"),
        Some(&root),
    );
    content.append(
        Element::new("input")
            .attr("data-tour-id", "audience")
            .bounds(11.0, 1.0, 30.0, 4.0)
            .label("Audience"),
        Some(&root),
    );
    content.append(
        Element::new("button")
            .attr("data-tour-id", "generate-button")
            .bounds(16.0, 1.0, 22.0, 3.0)
            .label("Generate"),
        Some(&root),
    );
    dom.insert_page("/dashboard/content", content);

    let mut social = Document::new();
    let root = social.append(Element::new("div").class("page"), None);
    social.append(
        Element::new("div")
            .class("social-accounts")
            .bounds(1.0, 1.0, 40.0, 5.0)
            .label("Connected Accounts"),
        Some(&root),
    );
    social.append(
        Element::new("div")
            .class("post-scheduler")
            .bounds(7.0, 1.0, 40.0, 6.0)
            .label("Post Scheduler"),
        Some(&root),
    );
    social.append(
        Element::new("div").class("analytics").bounds(14.0, 1.0, 40.0, 6.0).label("Engagement"),
        Some(&root),
    );
    dom.insert_page("/dashboard/social", social);

    let mut affiliates = Document::new();
    let root = affiliates.append(Element::new("div").class("page"), None);
    affiliates.append(
        Element::new("div")
            .class("affiliate-programs")
            .bounds(1.0, 1.0, 45.0, 5.0)
            .label("Programs"),
        Some(&root),
    );
    affiliates.append(
        Element::new("div")
            .class("link-generator")
            .bounds(7.0, 1.0, 45.0, 6.0)
            .label("Link Generator"),
        Some(&root),
    );
    affiliates.append(
        Element::new("div")
            .class("performance-metrics")
            .bounds(14.0, 1.0, 45.0, 6.0)
            .label("Performance"),
        Some(&root),
    );
    dom.insert_page("/dashboard/affiliates", affiliates);

    let mut analytics = Document::new();
    let root = analytics.append(Element::new("div").class("page"), None);
    analytics.append(
        Element::new("div")
            .class("analytics-overview")
            .bounds(1.0, 1.0, 60.0, 5.0)
            .label("Overview"),
        Some(&root),
    );
    analytics.append(
        Element::new("div")
            .class("conversion-funnel")
            .bounds(7.0, 1.0, 35.0, 8.0)
            .label("Conversion Funnel"),
        Some(&root),
    );
    analytics.append(
        Element::new("div")
            .class("revenue-breakdown")
            .bounds(7.0, 38.0, 35.0, 8.0)
            .label("Revenue Breakdown"),
        Some(&root),
    );
    dom.insert_page("/dashboard/analytics", analytics);

    let mut settings = Document::new();
    let root = settings.append(Element::new("div").class("page"), None);
    settings.append(
        Element::new("div").class("settings-panel").bounds(1.0, 1.0, 40.0, 6.0).label("Settings"),
        Some(&root),
    );
    dom.insert_page("/dashboard/settings", settings);

    dom
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
