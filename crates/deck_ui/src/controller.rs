//! # Page Controller
//!
//! Owns every piece of page behaviour and the subscriptions that feed it.
//!
//! ## Lifecycle
//!
//! ```text
//!  new() ──► handle(Ready) ──► handle(event)* / frame(now)* ──► teardown()
//!              │                     │               │
//!        stylesheet, metric     nav, tabs,     metric ticks,
//!        animations, reveal     swipe, hover   delayed classes,
//!                                              debounced highlight
//! ```
//!
//! The host calls [`PageController::frame`] once per display refresh while
//! [`PageController::has_pending_work`] is true, and stops requesting frames
//! once it turns false.

use deck_core::{DeckError, DeckResult, MetricAnimation, MetricSpec};

use crate::command::{CommandBuffer, DomCommand};
use crate::config::PageConfig;
use crate::input::{EventOutcome, PageEvent, SwipeTracker};
use crate::layout::{Rect, Viewport};
use crate::navigation::{self, NavHighlighter, Section, Step};
use crate::page::{ElementId, PageModel};
use crate::reveal::RevealObserver;
use crate::schedule::{Debouncer, DelayQueue};
use crate::style;
use crate::subscription::{EventSource, Subscription, SubscriptionRegistry};
use crate::tabs;

/// Drives one presentation page.
#[derive(Debug)]
pub struct PageController {
    /// Validated configuration.
    config: PageConfig,
    /// Elements and geometry.
    page: PageModel,
    /// Current window.
    viewport: Viewport,
    /// Live listeners.
    subscriptions: SubscriptionRegistry,
    /// Scroll-spy state.
    nav: NavHighlighter,
    /// Trailing highlight pass after scrolling stops.
    scroll_debounce: Debouncer,
    /// Touch swipe state.
    swipe: SwipeTracker,
    /// Card reveal state.
    cards: RevealObserver,
    /// Feature bar fill state.
    bars: RevealObserver,
    /// Running metric counters.
    metrics: Vec<(ElementId, MetricAnimation)>,
    /// Commands waiting for a timestamp.
    delayed: DelayQueue,
    /// `Ready` has been handled.
    ready: bool,
    /// `Load` has been handled.
    loaded: bool,
    /// `teardown` has run.
    torn_down: bool,
}

impl PageController {
    /// Creates a controller and subscribes to every page event source.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] if the configuration is out of range.
    pub fn new(config: PageConfig, page: PageModel) -> DeckResult<Self> {
        config.validate()?;

        let mut subscriptions = SubscriptionRegistry::new();
        for source in EventSource::ALL {
            subscriptions.subscribe(source);
        }

        Ok(Self {
            scroll_debounce: Debouncer::new(config.navigation.debounce_ms),
            swipe: SwipeTracker::new(config.navigation.swipe_threshold),
            cards: RevealObserver::new(config.reveal.card_threshold, config.reveal.card_bottom_margin),
            bars: RevealObserver::new(config.reveal.bar_threshold, 0.0),
            config,
            page,
            viewport: Viewport::default(),
            subscriptions,
            nav: NavHighlighter::new(),
            metrics: Vec::new(),
            delayed: DelayQueue::new(),
            ready: false,
            loaded: false,
            torn_down: false,
        })
    }

    /// Sets the initial viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Returns the page model.
    #[must_use]
    pub fn page(&self) -> &PageModel {
        &self.page
    }

    /// Returns the current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the subscription registry.
    #[must_use]
    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    /// Removes one subscription; its events are ignored from now on.
    pub fn unsubscribe(&mut self, source: EventSource) -> bool {
        let ids: Vec<_> = self
            .subscriptions
            .live()
            .iter()
            .filter(|s| s.source == source)
            .map(|s| s.id)
            .collect();
        ids.into_iter()
            .fold(false, |removed, id| self.subscriptions.unsubscribe(id) || removed)
    }

    /// Returns the anchor of the highlighted nav section.
    #[must_use]
    pub fn highlighted_section(&self) -> Option<&str> {
        self.nav.highlighted()
    }

    /// Returns the number of metric counters still running.
    #[must_use]
    pub fn running_animations(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true while frames are needed.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.metrics.is_empty() || !self.delayed.is_empty() || self.scroll_debounce.is_pending()
    }

    /// Updates the document-space bounds of a section, card or feature bar.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::UnknownElement`] if `id` has no tracked geometry.
    pub fn update_geometry(&mut self, id: ElementId, rect: Rect) -> DeckResult<()> {
        let slot = self
            .page
            .rect_mut(id)
            .ok_or(DeckError::UnknownElement(id.raw()))?;
        *slot = rect;
        Ok(())
    }

    /// Handles one page event.
    pub fn handle(&mut self, event: PageEvent, now_ms: f64, out: &mut CommandBuffer) -> EventOutcome {
        if self.torn_down {
            return EventOutcome::PASS;
        }
        if let Some(source) = event.source() {
            if !self.subscriptions.is_subscribed(source) {
                tracing::trace!(?source, "event from unsubscribed source ignored");
                return EventOutcome::PASS;
            }
        }

        match event {
            PageEvent::Ready => {
                self.on_ready(now_ms, out);
                EventOutcome::PASS
            }
            PageEvent::Load => {
                if !self.loaded {
                    self.loaded = true;
                    out.push(DomCommand::add_class(ElementId::BODY, style::LOADED));
                }
                EventOutcome::PASS
            }
            PageEvent::Scroll { scroll_y } => {
                self.viewport.scroll_y = scroll_y;
                self.nav
                    .update(&self.page.sections, &self.page.nav_links, scroll_y, out);
                self.scroll_debounce.trigger(now_ms);
                self.reveal_pass(out);
                EventOutcome::PASS
            }
            PageEvent::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.reveal_pass(out);
                EventOutcome::PASS
            }
            PageEvent::KeyDown(key) => match key.step() {
                Some(step) => {
                    self.step_section(step, out);
                    EventOutcome::PREVENT
                }
                None => EventOutcome::PASS,
            },
            PageEvent::TouchStart { screen_y } => {
                self.swipe.touch_start(screen_y);
                EventOutcome::PASS
            }
            PageEvent::TouchEnd { screen_y } => {
                if let Some(step) = self.swipe.touch_end(screen_y) {
                    self.step_section(step, out);
                }
                EventOutcome::PASS
            }
            PageEvent::Click(id) => self.on_click(id, out),
            PageEvent::PointerEnter(id) => {
                if let Some(target) = self.page.hover_targets.iter().find(|t| t.id == id) {
                    out.push(target.effect.enter(id, &self.config.hover));
                }
                EventOutcome::PASS
            }
            PageEvent::PointerLeave(id) => {
                if let Some(target) = self.page.hover_targets.iter().find(|t| t.id == id) {
                    out.push(target.effect.leave(id));
                }
                EventOutcome::PASS
            }
        }
    }

    /// Advances time-driven work to `now_ms`.
    pub fn frame(&mut self, now_ms: f64, out: &mut CommandBuffer) {
        if self.torn_down {
            return;
        }

        out.extend(self.delayed.drain_due(now_ms));

        for (id, anim) in &mut self.metrics {
            if let Some(text) = anim.tick(now_ms).text() {
                out.push(DomCommand::set_text(*id, text));
            }
        }
        self.metrics.retain(|(_, anim)| !anim.is_complete());

        if self.scroll_debounce.poll(now_ms) {
            self.nav.update(
                &self.page.sections,
                &self.page.nav_links,
                self.viewport.scroll_y,
                out,
            );
        }
    }

    /// Stops everything and releases every subscription.
    ///
    /// Running counters are cancelled and their original text restored.
    /// Returns the released subscriptions so the host can detach listeners.
    pub fn teardown(&mut self, out: &mut CommandBuffer) -> Vec<Subscription> {
        for (id, anim) in &mut self.metrics {
            if let Some(text) = anim.cancel() {
                out.push(DomCommand::set_text(*id, text));
            }
        }
        self.metrics.clear();
        self.delayed.clear();
        self.scroll_debounce.cancel();
        self.torn_down = true;

        let released = self.subscriptions.teardown();
        tracing::info!(subscriptions = released.len(), "page controller torn down");
        released
    }

    fn on_ready(&mut self, now_ms: f64, out: &mut CommandBuffer) {
        if self.ready {
            tracing::warn!("ready delivered twice, ignoring");
            return;
        }
        self.ready = true;

        out.push(DomCommand::InjectStylesheet {
            css: style::ANIMATION_STYLESHEET.to_string(),
        });

        let stagger = self.config.metrics.stagger_ms;
        for (index, card) in self.page.metric_cards.iter().enumerate() {
            let due = now_ms + index as f64 * stagger;
            self.delayed
                .schedule(due, DomCommand::add_class(*card, style::METRIC_COUNTER));
        }

        let metric_config = &self.config.metrics;
        let mut skipped = 0;
        for display in &self.page.metrics {
            let spec = MetricSpec::parse(&display.text);
            match MetricAnimation::start(spec, now_ms, metric_config.duration_ms, metric_config.easing) {
                Some(anim) => self.metrics.push((display.id, anim)),
                None => skipped += 1,
            }
        }
        tracing::info!(
            started = self.metrics.len(),
            skipped,
            "metric animations started"
        );

        self.nav.update(
            &self.page.sections,
            &self.page.nav_links,
            self.viewport.scroll_y,
            out,
        );
        self.reveal_pass(out);
    }

    fn on_click(&mut self, id: ElementId, out: &mut CommandBuffer) -> EventOutcome {
        if let Some(link) = self.page.nav_links.iter().find(|l| l.id == id) {
            match self.page.section_by_anchor(link.target()) {
                Some(section) => {
                    let top = navigation::scroll_target(section, self.config.navigation.nav_offset);
                    tracing::debug!(section = %section.anchor, top, "nav link scroll");
                    out.push(DomCommand::ScrollTo { top, smooth: true });
                }
                None => tracing::debug!(href = %link.href, "nav link has no target section"),
            }
            return EventOutcome::PREVENT;
        }

        if let Some(button) = self.page.tab_buttons.iter().find(|b| b.id == id) {
            tabs::activate(button, &self.page.tab_buttons, &self.page.tab_contents, out);
        }
        EventOutcome::PASS
    }

    fn step_section(&self, step: Step, out: &mut CommandBuffer) {
        let sections = &self.page.sections;
        let Some(current) =
            navigation::current_section(sections, &self.viewport, self.config.navigation.focus_line)
        else {
            return;
        };
        let Some(target) = navigation::step_from(current, step, sections.len()) else {
            return;
        };
        self.scroll_to(&sections[target], out);
    }

    fn scroll_to(&self, section: &Section, out: &mut CommandBuffer) {
        let top = navigation::scroll_target(section, self.config.navigation.nav_offset);
        tracing::debug!(section = %section.anchor, top, "section step");
        out.push(DomCommand::ScrollTo { top, smooth: true });
    }

    fn reveal_pass(&mut self, out: &mut CommandBuffer) {
        self.cards
            .observe_cards(&self.page.reveal_targets, &self.viewport, out);
        self.bars
            .observe_bars(&self.page.feature_bars, &self.viewport, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::{HoverEffect, HoverTarget};
    use crate::input::Key;
    use crate::navigation::NavLink;
    use crate::page::MetricDisplay;

    fn page() -> PageModel {
        PageModel {
            sections: (0..3)
                .map(|i| Section {
                    id: ElementId(i),
                    anchor: format!("s{i}"),
                    rect: Rect::new(0.0, i as f32 * 1000.0, 1280.0, 1000.0),
                })
                .collect(),
            nav_links: (0..3)
                .map(|i| NavLink {
                    id: ElementId(10 + i),
                    href: format!("#s{i}"),
                })
                .collect(),
            metrics: vec![
                MetricDisplay {
                    id: ElementId(30),
                    text: "42%".to_string(),
                },
                MetricDisplay {
                    id: ElementId(31),
                    text: "N/A".to_string(),
                },
            ],
            metric_cards: vec![ElementId(40), ElementId(41)],
            hover_targets: vec![HoverTarget {
                id: ElementId(50),
                effect: HoverEffect::Highlight,
            }],
            ..PageModel::default()
        }
    }

    fn ready_controller() -> (PageController, CommandBuffer) {
        let mut controller = PageController::new(PageConfig::default(), page()).unwrap();
        let mut out = CommandBuffer::new();
        controller.handle(PageEvent::Ready, 0.0, &mut out);
        (controller, out)
    }

    #[test]
    fn test_ready_starts_only_parseable_metrics() {
        let (controller, out) = ready_controller();

        assert_eq!(controller.running_animations(), 1);
        assert!(matches!(out.commands()[0], DomCommand::InjectStylesheet { .. }));
        assert_eq!(controller.highlighted_section(), Some("s0"));
    }

    #[test]
    fn test_ready_twice_is_ignored() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();
        controller.handle(PageEvent::Ready, 5.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(controller.running_animations(), 1);
    }

    #[test]
    fn test_frames_run_metric_to_completion() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        let mut now = 0.0;
        while controller.has_pending_work() {
            controller.frame(now, &mut out);
            now += 16.0;
        }

        let last_text = out
            .commands()
            .iter()
            .rev()
            .find_map(|c| match c {
                DomCommand::SetText { element, text } if *element == ElementId(30) => Some(text.clone()),
                _ => None,
            });
        assert_eq!(last_text.as_deref(), Some("42%"));
        assert_eq!(controller.running_animations(), 0);
        // N/A display never written
        assert!(out.commands().iter().all(|c| c.element() != Some(ElementId(31))));
    }

    #[test]
    fn test_metric_cards_are_staggered() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        controller.frame(0.0, &mut out);
        assert!(out.commands().contains(&DomCommand::add_class(ElementId(40), style::METRIC_COUNTER)));
        assert!(!out.commands().contains(&DomCommand::add_class(ElementId(41), style::METRIC_COUNTER)));

        out.begin_frame();
        controller.frame(200.0, &mut out);
        assert!(out.commands().contains(&DomCommand::add_class(ElementId(41), style::METRIC_COUNTER)));
    }

    #[test]
    fn test_keyboard_steps_and_prevents_default() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        let outcome = controller.handle(PageEvent::KeyDown(Key::ArrowDown), 0.0, &mut out);
        assert_eq!(outcome, EventOutcome::PREVENT);
        assert_eq!(
            out.commands(),
            &[DomCommand::ScrollTo {
                top: 920.0,
                smooth: true
            }]
        );

        out.begin_frame();
        let outcome = controller.handle(PageEvent::KeyDown(Key::ArrowUp), 0.0, &mut out);
        assert_eq!(outcome, EventOutcome::PREVENT);
        assert!(out.is_empty());

        let outcome = controller.handle(PageEvent::KeyDown(Key::Other), 0.0, &mut out);
        assert_eq!(outcome, EventOutcome::PASS);
    }

    #[test]
    fn test_hover_enter_leave() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        controller.handle(PageEvent::PointerEnter(ElementId(50)), 0.0, &mut out);
        controller.handle(PageEvent::PointerLeave(ElementId(50)), 0.0, &mut out);
        controller.handle(PageEvent::PointerEnter(ElementId(99)), 0.0, &mut out);

        assert_eq!(
            out.commands(),
            &[
                DomCommand::set_style(ElementId(50), "background-color", "rgba(37, 99, 235, 0.05)"),
                DomCommand::clear_style(ElementId(50), "background-color"),
            ]
        );
    }

    #[test]
    fn test_unsubscribed_source_is_ignored() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        assert!(controller.unsubscribe(EventSource::Load));
        controller.handle(PageEvent::Load, 0.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_teardown_restores_text_and_stops() {
        let (mut controller, mut out) = ready_controller();
        controller.frame(500.0, &mut out);
        out.begin_frame();

        let released = controller.teardown(&mut out);

        assert_eq!(released.len(), EventSource::ALL.len());
        assert_eq!(out.commands(), &[DomCommand::set_text(ElementId(30), "42%")]);
        assert!(!controller.has_pending_work());

        out.begin_frame();
        controller.frame(600.0, &mut out);
        controller.handle(PageEvent::Load, 600.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_update_geometry() {
        let (mut controller, _) = ready_controller();

        controller
            .update_geometry(ElementId(1), Rect::new(0.0, 1200.0, 1280.0, 800.0))
            .unwrap();
        assert_eq!(controller.page().sections[1].rect.y, 1200.0);

        let err = controller
            .update_geometry(ElementId(30), Rect::ZERO)
            .unwrap_err();
        assert!(matches!(err, DeckError::UnknownElement(30)));
    }

    #[test]
    fn test_load_is_applied_once() {
        let (mut controller, mut out) = ready_controller();
        out.begin_frame();

        controller.handle(PageEvent::Load, 0.0, &mut out);
        controller.handle(PageEvent::Load, 10.0, &mut out);
        assert_eq!(out.commands(), &[DomCommand::add_class(ElementId::BODY, style::LOADED)]);
    }

    #[test]
    fn test_steps_follow_remeasured_sections() {
        let (mut controller, mut out) = ready_controller();

        controller
            .update_geometry(ElementId(1), Rect::new(0.0, 1600.0, 1280.0, 1000.0))
            .unwrap();
        controller
            .update_geometry(ElementId(2), Rect::new(0.0, 2600.0, 1280.0, 1000.0))
            .unwrap();
        out.begin_frame();

        controller.handle(PageEvent::KeyDown(Key::ArrowDown), 0.0, &mut out);
        controller.handle(PageEvent::Click(ElementId(12)), 0.0, &mut out);
        assert_eq!(
            out.commands(),
            &[
                DomCommand::ScrollTo {
                    top: 1520.0,
                    smooth: true
                },
                DomCommand::ScrollTo {
                    top: 2520.0,
                    smooth: true
                },
            ]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PageConfig::default();
        config.reveal.card_threshold = -1.0;
        assert!(PageController::new(config, page()).is_err());
    }
}
