// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{Router, RunnerConfig, RunnerPhase, StartError, StartOutcome, TourRunner};
use crate::dom::{Document, Element, ElementHandle, SharedDocument};
use crate::locator::{ElementLocator, LocateOutcome};
use crate::model::{fixtures, HighlightGeometry, PreferredSide, TourCatalog, TourId};
use crate::store::{MemoryStorage, ProgressStore};

/// Scripted router: records navigations and lets tests move the "current" path.
#[derive(Debug, Default)]
struct TestRouter {
    current: String,
    navigations: Vec<String>,
}

impl TestRouter {
    fn at(path: &str) -> Self {
        Self { current: path.to_owned(), navigations: Vec::new() }
    }
}

impl Router for TestRouter {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn navigate_to(&mut self, path: &str) {
        self.navigations.push(path.to_owned());
        self.current = path.to_owned();
    }
}

fn tid(value: &str) -> TourId {
    TourId::new(value).unwrap()
}

/// Page with every target the fixture dashboard tour references.
fn dashboard_document() -> SharedDocument {
    let mut doc = Document::new();
    let root = doc.append(Element::new("div").class("page"), None);
    doc.append(
        Element::new("div").attr("data-testid", "stats-cards").bounds(2.0, 4.0, 60.0, 8.0),
        Some(&root),
    );
    doc.append(
        Element::new("div").class("revenue-card").bounds(12.0, 4.0, 28.0, 6.0),
        Some(&root),
    );
    doc.append(
        Element::new("div").class("visitors-card").bounds(12.0, 36.0, 28.0, 6.0),
        Some(&root),
    );
    doc.append(
        Element::new("div").class("recent-activity").bounds(20.0, 4.0, 60.0, 10.0),
        Some(&root),
    );
    SharedDocument::new(doc)
}

type Runner = TourRunner<SharedDocument, TestRouter, MemoryStorage>;

struct Ctx {
    runner: Runner,
    dom: SharedDocument,
}

impl Ctx {
    fn new(dom: SharedDocument, router: TestRouter, config: RunnerConfig) -> Self {
        let runner = TourRunner::new(
            Arc::new(fixtures::two_tour_catalog()),
            dom.clone(),
            router,
            ProgressStore::new(MemoryStorage::new()),
            config,
        );
        Self { runner, dom }
    }

    /// Resolves the ticket's selectors directly against the backing document.
    fn find(&self, selectors: &[String]) -> ElementHandle {
        ElementLocator::new(self.dom.clone()).find_first(selectors).expect("target present")
    }

    fn highlighted(&self) -> Option<ElementHandle> {
        self.dom.with(|doc| doc.highlighted())
    }
}

#[fixture]
fn on_dashboard() -> Ctx {
    Ctx::new(dashboard_document(), TestRouter::at("/dashboard"), RunnerConfig::default())
}

#[rstest]
fn start_on_matching_page_enters_step_zero(mut on_dashboard: Ctx) {
    let outcome = on_dashboard.runner.start(&tid("dashboard")).unwrap();

    let ticket = match outcome {
        StartOutcome::Started { ticket: Some(ticket) } => ticket,
        other => panic!("expected an immediate start with a ticket, got {other:?}"),
    };
    assert_eq!(ticket.step_index(), 0);
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Active(0));

    let state = on_dashboard.runner.state().unwrap();
    assert!(state.visible());
    assert!(state.highlight().is_none());
}

#[rstest]
fn resolving_a_ticket_highlights_and_records_geometry(mut on_dashboard: Ctx) {
    let outcome = on_dashboard.runner.start(&tid("dashboard")).unwrap();
    let StartOutcome::Started { ticket: Some(ticket) } = outcome else {
        panic!("expected ticket");
    };

    let found = on_dashboard.find(ticket.selectors());
    on_dashboard.runner.apply_located(&ticket, LocateOutcome::Found(found.clone()));

    let state = on_dashboard.runner.state().unwrap();
    assert!(matches!(state.highlight(), Some(HighlightGeometry::Resolved(_))));
    assert_eq!(on_dashboard.highlighted(), Some(found.clone()));
    assert_eq!(on_dashboard.dom.with(|doc| doc.scrolled_to()), Some(found));
}

#[rstest]
fn missing_target_renders_unanchored(mut on_dashboard: Ctx) {
    let outcome = on_dashboard.runner.start(&tid("dashboard")).unwrap();
    let StartOutcome::Started { ticket: Some(ticket) } = outcome else {
        panic!("expected ticket");
    };

    on_dashboard.runner.apply_located(&ticket, LocateOutcome::TimedOut);

    // The tour keeps going; the step simply has no anchor to point at.
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Active(0));
    let state = on_dashboard.runner.state().unwrap();
    assert!(state.visible());
    assert_eq!(state.highlight(), Some(HighlightGeometry::NotFound));
}

#[tokio::test(start_paused = true)]
async fn resolve_times_out_against_an_empty_document() {
    let mut ctx = Ctx::new(
        SharedDocument::new(Document::new()),
        TestRouter::at("/dashboard"),
        RunnerConfig::default(),
    );
    let outcome = ctx.runner.start(&tid("dashboard")).unwrap();
    let StartOutcome::Started { ticket: Some(ticket) } = outcome else {
        panic!("expected ticket");
    };

    ctx.runner.resolve(ticket).await;

    assert_eq!(ctx.runner.state().unwrap().highlight(), Some(HighlightGeometry::NotFound));
}

#[rstest]
fn next_walks_to_completion_and_marks_progress_once(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("dashboard")).unwrap();

    assert!(runner.next().is_some());
    assert_eq!(runner.phase(), RunnerPhase::Active(1));
    assert!(runner.next().is_some());
    assert!(runner.next().is_some());
    assert_eq!(runner.phase(), RunnerPhase::Active(3));

    // Past the last step: completed, marked durable, overlay still visible.
    assert!(runner.next().is_none());
    assert_eq!(runner.phase(), RunnerPhase::Completed);
    assert!(runner.state().unwrap().visible());
    assert!(runner.progress().is_complete(&tid("dashboard")));

    // Further next (and previous) on the completion card are no-ops.
    assert!(runner.next().is_none());
    assert!(runner.previous().is_none());
    assert_eq!(runner.phase(), RunnerPhase::Completed);
    assert_eq!(runner.progress().all_completed().len(), 1);
}

#[rstest]
fn previous_is_a_no_op_at_step_zero(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("dashboard")).unwrap();

    assert!(runner.previous().is_none());
    assert_eq!(runner.phase(), RunnerPhase::Active(0));

    runner.next();
    let back = runner.previous().expect("relocate ticket");
    assert_eq!(back.step_index(), 0);
    assert_eq!(runner.phase(), RunnerPhase::Active(0));
}

#[rstest]
fn unknown_tour_id_is_rejected_and_leaves_idle(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    let err = runner.start(&tid("bogus")).unwrap_err();
    assert_eq!(err, StartError::UnknownTourId { tour_id: tid("bogus") });
    assert_eq!(runner.phase(), RunnerPhase::Idle);
    assert!(runner.current_card().is_none());
    assert!(runner.progress().all_completed().is_empty());
}

#[rstest]
fn stale_locate_results_are_discarded(mut on_dashboard: Ctx) {
    let outcome = on_dashboard.runner.start(&tid("dashboard")).unwrap();
    let StartOutcome::Started { ticket: Some(first) } = outcome else {
        panic!("expected ticket");
    };

    // Rapid next before the first locate resolves.
    let second = on_dashboard.runner.next().expect("ticket for step 1");
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Active(1));

    let found = on_dashboard.find(first.selectors());
    on_dashboard.runner.apply_located(&first, LocateOutcome::Found(found));
    assert!(
        on_dashboard.runner.state().unwrap().highlight().is_none(),
        "stale result must not land"
    );

    let found = on_dashboard.find(second.selectors());
    on_dashboard.runner.apply_located(&second, LocateOutcome::Found(found));
    assert!(matches!(
        on_dashboard.runner.state().unwrap().highlight(),
        Some(HighlightGeometry::Resolved(_))
    ));
}

#[rstest]
fn cancel_clears_everything_and_invalidates_pending_locates(mut on_dashboard: Ctx) {
    let outcome = on_dashboard.runner.start(&tid("dashboard")).unwrap();
    let StartOutcome::Started { ticket: Some(ticket) } = outcome else {
        panic!("expected ticket");
    };
    let found = on_dashboard.find(ticket.selectors());
    on_dashboard.runner.apply_located(&ticket, LocateOutcome::Found(found.clone()));
    assert!(on_dashboard.highlighted().is_some());

    on_dashboard.runner.cancel();
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Idle);
    assert!(on_dashboard.runner.current_card().is_none());
    assert_eq!(on_dashboard.highlighted(), None);
    assert!(!on_dashboard.runner.progress().is_complete(&tid("dashboard")));

    // A locate that resolves after cancel is ignored.
    on_dashboard.runner.apply_located(&ticket, LocateOutcome::Found(found));
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Idle);
    assert_eq!(on_dashboard.highlighted(), None);
}

#[rstest]
fn starting_while_active_is_last_writer_wins(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("dashboard")).unwrap();
    runner.next();
    assert_eq!(runner.phase(), RunnerPhase::Active(1));

    // Analytics lives on another page, so the new run awaits navigation.
    let outcome = runner.start(&tid("analytics")).unwrap();
    assert_eq!(
        outcome,
        StartOutcome::AwaitingNavigation { page: "/dashboard/analytics".to_owned() }
    );
    assert_eq!(runner.phase(), RunnerPhase::AwaitingNavigation);
    assert_eq!(runner.state().unwrap().tour_id(), &tid("analytics"));
    assert_eq!(runner.router().current_path(), "/dashboard/analytics");
    assert_eq!(runner.router().navigations, vec!["/dashboard/analytics".to_owned()]);
}

#[rstest]
fn awaiting_navigation_enters_step_zero_once_the_page_arrives(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("analytics")).unwrap();
    assert_eq!(runner.phase(), RunnerPhase::AwaitingNavigation);
    assert!(runner.current_card().is_none());
    assert!(runner.next().is_none(), "transitions are inert while awaiting navigation");

    // An unrelated route settling first changes nothing.
    assert!(runner.route_changed("/dashboard/content").is_none());
    assert_eq!(runner.phase(), RunnerPhase::AwaitingNavigation);

    let ticket = runner.route_changed("/dashboard/analytics").expect("step 0 ticket");
    assert_eq!(ticket.step_index(), 0);
    assert_eq!(runner.phase(), RunnerPhase::Active(0));
}

#[rstest]
fn navigation_timeout_proceeds_best_effort(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("analytics")).unwrap();

    let ticket = runner.navigation_timed_out().expect("step 0 ticket");
    assert_eq!(ticket.step_index(), 0);
    assert_eq!(runner.phase(), RunnerPhase::Active(0));

    // Only meaningful while actually awaiting.
    assert!(runner.navigation_timed_out().is_none());
}

#[rstest]
fn leaving_mid_tour_pauses_and_returning_resumes_the_same_step(mut on_dashboard: Ctx) {
    on_dashboard.runner.start(&tid("dashboard")).unwrap();
    on_dashboard.runner.next();
    assert_eq!(on_dashboard.runner.phase(), RunnerPhase::Active(1));

    assert!(on_dashboard.runner.route_changed("/dashboard/settings").is_none());
    let state = on_dashboard.runner.state().unwrap();
    assert!(!state.visible());
    assert!(state.highlight().is_none());
    assert_eq!(
        on_dashboard.runner.phase(),
        RunnerPhase::Active(1),
        "cursor survives the detour"
    );
    assert_eq!(on_dashboard.highlighted(), None);

    let ticket = on_dashboard.runner.route_changed("/dashboard").expect("relocate ticket");
    assert_eq!(ticket.step_index(), 1);
    assert!(on_dashboard.runner.state().unwrap().visible());
}

#[test]
fn cancel_on_leave_policy_tears_the_run_down() {
    let mut ctx = Ctx::new(
        dashboard_document(),
        TestRouter::at("/dashboard"),
        RunnerConfig { resume_on_return: false, ..RunnerConfig::default() },
    );
    ctx.runner.start(&tid("dashboard")).unwrap();
    ctx.runner.next();

    assert!(ctx.runner.route_changed("/dashboard/settings").is_none());
    assert_eq!(ctx.runner.phase(), RunnerPhase::Idle);

    // Coming back does not resurrect anything.
    assert!(ctx.runner.route_changed("/dashboard").is_none());
    assert_eq!(ctx.runner.phase(), RunnerPhase::Idle);
}

#[test]
fn informational_steps_need_no_ticket() {
    let minimal = fixtures::minimal_tour("welcome");
    let catalog = Arc::new(TourCatalog::new(vec![minimal]).unwrap());
    let mut runner = TourRunner::new(
        catalog,
        SharedDocument::new(Document::new()),
        TestRouter::at("/dashboard"),
        ProgressStore::new(MemoryStorage::new()),
        RunnerConfig::default(),
    );

    let outcome = runner.start(&tid("welcome")).unwrap();
    assert_eq!(outcome, StartOutcome::Started { ticket: None });
    assert_eq!(runner.phase(), RunnerPhase::Active(0));

    let card = runner.current_card().expect("card");
    assert_eq!(card.preferred_side, PreferredSide::Center);
    assert_eq!(card.step_index, Some(0));
    assert_eq!(card.step_count, 1);
}

#[rstest]
fn completion_card_replaces_the_step_card(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("dashboard")).unwrap();

    let step_card = runner.current_card().expect("step card");
    assert_eq!(step_card.title, "Overview Cards");
    assert_eq!(step_card.step_index, Some(0));
    assert_eq!(step_card.step_count, 4);

    for _ in 0..4 {
        runner.next();
    }
    let done_card = runner.current_card().expect("completion card");
    assert_eq!(done_card.title, "Tour complete!");
    assert!(done_card.body.contains("Dashboard Overview"));
    assert_eq!(done_card.preferred_side, PreferredSide::Center);
    assert_eq!(done_card.step_index, None);
}

#[rstest]
fn jump_to_selection_cancels_and_raises_a_one_shot_request(mut on_dashboard: Ctx) {
    let runner = &mut on_dashboard.runner;
    runner.start(&tid("dashboard")).unwrap();
    runner.jump_to_selection();

    assert_eq!(runner.phase(), RunnerPhase::Idle);
    assert!(runner.take_selection_request());
    assert!(!runner.take_selection_request());
}

#[test]
fn completing_a_single_step_tour_marks_it() {
    let mut doc = Document::new();
    doc.append(
        Element::new("div").class("conversion-funnel").bounds(4.0, 4.0, 40.0, 10.0),
        None,
    );
    let mut ctx = Ctx::new(
        SharedDocument::new(doc),
        TestRouter::at("/dashboard/analytics"),
        RunnerConfig::default(),
    );

    ctx.runner.start(&tid("analytics")).unwrap();
    assert!(ctx.runner.next().is_none());
    assert_eq!(ctx.runner.phase(), RunnerPhase::Completed);
    assert!(ctx.runner.progress().is_complete(&tid("analytics")));
}
