//! Browser host.
//!
//! Scans the document into a [`PageModel`], installs one DOM listener per
//! subscription, applies emitted [`DomCommand`]s and keeps a
//! `requestAnimationFrame` chain alive while the controller has pending work.
//!
//! ```js
//! import init, { start } from "./deck.js";
//! await init();
//! const deck = start();        // or start(configToml)
//! // later
//! deck.teardown();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, TouchEvent, Window,
};

use deck_core::{DeckError, DeckResult};
use deck_ui::{
    CommandBuffer, DomCommand, ElementId, EventOutcome, EventSource, FeatureBar, HoverEffect,
    HoverTarget, Key, MetricDisplay, NavLink, PageConfig, PageController, PageEvent, PageModel,
    Rect, RevealTarget, Section, Subscription, TabButton, TabContent, Viewport,
};

/// Cards that slide in when scrolled into view.
const REVEAL_SELECTOR: &str =
    ".overview-card, .technical-card, .impact-card, .segment, .phase, .infra-item, .evaluation-item";

type Shared = Rc<RefCell<Host>>;

/// A DOM listener backing one subscription.
struct Listener {
    source: EventSource,
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Elements found by scanning the document.
struct Scan {
    elements: Vec<Element>,
    page: PageModel,
    measured: Vec<ElementId>,
}

impl Scan {
    fn register(&mut self, element: Element) -> DeckResult<ElementId> {
        let raw = u32::try_from(self.elements.len())
            .map_err(|_| DeckError::Dom("too many elements".to_string()))?;
        self.elements.push(element);
        Ok(ElementId::new(raw))
    }
}

struct Host {
    window: Window,
    document: Document,
    elements: Vec<Element>,
    measured: Vec<ElementId>,
    controller: PageController,
    commands: CommandBuffer,
    listeners: Vec<Listener>,
    frame_loop: Option<Closure<dyn FnMut(f64)>>,
    frame_request: Option<i32>,
}

/// Handle returned to JavaScript.
#[wasm_bindgen]
pub struct DeckHandle {
    host: Shared,
}

#[wasm_bindgen]
impl DeckHandle {
    /// Detaches every listener, stops the frame loop and restores metric text.
    pub fn teardown(&self) {
        match self.host.try_borrow_mut() {
            Ok(mut host) => host.teardown(),
            Err(_) => tracing::warn!("teardown requested while the host is busy"),
        }
    }
}

/// Binds the page controller to the current document.
///
/// # Errors
///
/// Returns the error message if the configuration is invalid or the
/// document cannot be scanned.
#[wasm_bindgen]
pub fn start(config_toml: Option<String>) -> Result<DeckHandle, JsValue> {
    console_error_panic_hook::set_once();
    start_host(config_toml.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn start_host(config_toml: Option<&str>) -> DeckResult<DeckHandle> {
    let config = match config_toml {
        Some(text) => PageConfig::from_toml_str(text)?,
        None => PageConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| dom("no window"))?;
    let document = window.document().ok_or_else(|| dom("no document"))?;
    let viewport = viewport(&window);
    let scan = scan_document(&document, viewport.scroll_y)?;
    tracing::info!(
        elements = scan.elements.len(),
        metrics = scan.page.metrics.len(),
        "document scanned"
    );

    let controller = PageController::new(config, scan.page)?.with_viewport(viewport);
    let host: Shared = Rc::new(RefCell::new(Host {
        window,
        document,
        elements: scan.elements,
        measured: scan.measured,
        controller,
        commands: CommandBuffer::new(),
        listeners: Vec::new(),
        frame_loop: None,
        frame_request: None,
    }));

    let weak = Rc::downgrade(&host);
    let frame_loop = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
        with_host(&weak, |host| host.on_frame(timestamp));
    });

    let listeners = install_listeners(&host)?;
    {
        let mut host = host.borrow_mut();
        host.frame_loop = Some(frame_loop);
        host.listeners = listeners;
        host.dispatch(PageEvent::Ready);
        if host.document.ready_state() == "complete" {
            tracing::debug!("document already loaded");
            host.dispatch(PageEvent::Load);
        }
    }

    Ok(DeckHandle { host })
}

fn with_host(weak: &Weak<RefCell<Host>>, f: impl FnOnce(&mut Host)) {
    let Some(host) = weak.upgrade() else {
        return;
    };
    match host.try_borrow_mut() {
        Ok(mut host) => f(&mut host),
        Err(_) => tracing::warn!("re-entrant DOM callback dropped"),
    };
}

fn dom(message: &str) -> DeckError {
    DeckError::Dom(message.to_string())
}

fn js_error(err: &JsValue) -> DeckError {
    DeckError::Dom(format!("{err:?}"))
}

#[allow(clippy::cast_possible_truncation)]
fn viewport(window: &Window) -> Viewport {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
    let fallback = Viewport::default();
    Viewport {
        scroll_y: window.scroll_y().unwrap_or(0.0) as f32,
        width: read(window.inner_width()).map_or(fallback.width, |w| w as f32),
        height: read(window.inner_height()).map_or(fallback.height, |h| h as f32),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn document_rect(element: &Element, scroll_y: f32) -> Rect {
    let bounds = element.get_bounding_client_rect();
    Rect::new(
        bounds.left() as f32,
        bounds.top() as f32 + scroll_y,
        bounds.width() as f32,
        bounds.height() as f32,
    )
}

fn select(root: &Document, selector: &str) -> DeckResult<Vec<Element>> {
    let nodes = root.query_selector_all(selector).map_err(|e| js_error(&e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn scan_document(document: &Document, scroll_y: f32) -> DeckResult<Scan> {
    let mut scan = Scan {
        elements: Vec::new(),
        page: PageModel::default(),
        measured: Vec::new(),
    };

    for element in select(document, ".section")? {
        let anchor = element.id();
        let rect = document_rect(&element, scroll_y);
        let id = scan.register(element)?;
        scan.page.sections.push(Section { id, anchor, rect });
        scan.measured.push(id);
    }

    for element in select(document, ".nav-link")? {
        let href = element.get_attribute("href").unwrap_or_default();
        let id = scan.register(element)?;
        scan.page.nav_links.push(NavLink { id, href });
    }

    for element in select(document, ".tab-button")? {
        let target = element.get_attribute("data-tab").unwrap_or_default();
        let id = scan.register(element)?;
        scan.page.tab_buttons.push(TabButton { id, target });
    }

    for element in select(document, ".tab-content")? {
        let anchor = element.id();
        let id = scan.register(element)?;
        scan.page.tab_contents.push(TabContent { id, anchor });
    }

    for element in select(document, REVEAL_SELECTOR)? {
        let rect = document_rect(&element, scroll_y);
        let id = scan.register(element)?;
        scan.page.reveal_targets.push(RevealTarget { id, rect });
        scan.measured.push(id);
    }

    for element in select(document, ".feature-bar")? {
        let Some(value) = element
            .query_selector(".feature-value")
            .map_err(|e| js_error(&e))?
        else {
            tracing::debug!("feature bar without a value element skipped");
            continue;
        };
        let style = value.get_attribute("style").unwrap_or_default();
        let rect = document_rect(&element, scroll_y);
        let id = scan.register(element)?;
        let value = scan.register(value)?;
        scan.page.feature_bars.push(FeatureBar {
            id,
            value,
            style,
            rect,
        });
        scan.measured.push(id);
    }

    for element in select(document, ".metric-value")? {
        let text = element.text_content().unwrap_or_default();
        let id = scan.register(element)?;
        scan.page.metrics.push(MetricDisplay { id, text });
    }

    for element in select(document, ".metric")? {
        let id = scan.register(element)?;
        scan.page.metric_cards.push(id);
    }

    for (selector, effect) in [
        (".phase-circle", HoverEffect::Glow),
        (".performance-table tbody tr", HoverEffect::Highlight),
    ] {
        for element in select(document, selector)? {
            let id = scan.register(element)?;
            scan.page.hover_targets.push(HoverTarget { id, effect });
        }
    }

    Ok(scan)
}

fn install_listeners(shared: &Shared) -> DeckResult<Vec<Listener>> {
    let host = shared.borrow();
    let window: EventTarget = host.window.clone().into();
    let document: EventTarget = host.document.clone().into();
    let page = host.controller.page();
    let mut listeners = Vec::new();

    for subscription in host.controller.subscriptions().live() {
        let source = subscription.source;
        for &event in source.dom_events() {
            match source {
                EventSource::Scroll => {
                    let win = host.window.clone();
                    listeners.push(listen(shared, source, &window, event, move |_| {
                        #[allow(clippy::cast_possible_truncation)]
                        let scroll_y = win.scroll_y().unwrap_or(0.0) as f32;
                        Some(PageEvent::Scroll { scroll_y })
                    })?);
                }
                EventSource::Resize => {
                    let win = host.window.clone();
                    listeners.push(listen(shared, source, &window, event, move |_| {
                        let v = viewport(&win);
                        Some(PageEvent::Resize {
                            width: v.width,
                            height: v.height,
                        })
                    })?);
                }
                EventSource::KeyDown => {
                    listeners.push(listen(shared, source, &document, event, |e| {
                        let key = e.dyn_ref::<KeyboardEvent>()?.key();
                        Some(PageEvent::KeyDown(Key::from_dom(&key)))
                    })?);
                }
                EventSource::TouchStart => {
                    listeners.push(listen(shared, source, &document, event, |e| {
                        touch_y(e).map(|screen_y| PageEvent::TouchStart { screen_y })
                    })?);
                }
                EventSource::TouchEnd => {
                    listeners.push(listen(shared, source, &document, event, |e| {
                        touch_y(e).map(|screen_y| PageEvent::TouchEnd { screen_y })
                    })?);
                }
                EventSource::Load => {
                    listeners.push(listen(shared, source, &window, event, |_| Some(PageEvent::Load))?);
                }
                EventSource::Pointer => {
                    let entering = event == "mouseenter";
                    for target in &page.hover_targets {
                        let id = target.id;
                        let element = host.element_target(id)?;
                        listeners.push(listen(shared, source, &element, event, move |_| {
                            Some(if entering {
                                PageEvent::PointerEnter(id)
                            } else {
                                PageEvent::PointerLeave(id)
                            })
                        })?);
                    }
                }
                EventSource::Click => {
                    let clickable = page
                        .nav_links
                        .iter()
                        .map(|l| l.id)
                        .chain(page.tab_buttons.iter().map(|b| b.id));
                    for id in clickable {
                        let element = host.element_target(id)?;
                        listeners.push(listen(shared, source, &element, event, move |_| {
                            Some(PageEvent::Click(id))
                        })?);
                    }
                }
            }
        }
    }

    tracing::debug!(listeners = listeners.len(), "listeners installed");
    Ok(listeners)
}

#[allow(clippy::cast_precision_loss)]
fn touch_y(event: &Event) -> Option<f32> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(touch.screen_y() as f32)
}

fn listen(
    shared: &Shared,
    source: EventSource,
    target: &EventTarget,
    event: &'static str,
    translate: impl Fn(&Event) -> Option<PageEvent> + 'static,
) -> DeckResult<Listener> {
    let weak = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
        let Some(page_event) = translate(&dom_event) else {
            return;
        };
        with_host(&weak, |host| {
            if host.dispatch(page_event).prevent_default {
                dom_event.prevent_default();
            }
        });
    });
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|e| js_error(&e))?;

    Ok(Listener {
        source,
        target: target.clone(),
        event,
        callback,
    })
}

impl Host {
    fn now(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    fn element(&self, id: ElementId) -> DeckResult<Element> {
        if id == ElementId::BODY {
            return self
                .document
                .body()
                .map(Element::from)
                .ok_or_else(|| dom("no body"));
        }
        usize::try_from(id.raw())
            .ok()
            .and_then(|index| self.elements.get(index))
            .cloned()
            .ok_or(DeckError::UnknownElement(id.raw()))
    }

    fn element_target(&self, id: ElementId) -> DeckResult<EventTarget> {
        self.element(id).map(EventTarget::from)
    }

    /// Hands one event to the controller and applies what it emits.
    ///
    /// Layout is read at event time: clicks and late content reflow the
    /// document, so positions measured at `Ready` go stale.
    fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        if event.reads_layout() {
            self.measure();
        }
        let now = self.now();
        let outcome = self.controller.handle(event, now, &mut self.commands);
        self.flush();
        self.request_frame();
        outcome
    }

    fn on_frame(&mut self, timestamp: f64) {
        self.frame_request = None;
        self.controller.frame(timestamp, &mut self.commands);
        self.flush();
        self.request_frame();
    }

    fn request_frame(&mut self) {
        if self.frame_request.is_some() || !self.controller.has_pending_work() {
            return;
        }
        let Some(callback) = &self.frame_loop else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => self.frame_request = Some(handle),
            Err(err) => tracing::warn!(?err, "requestAnimationFrame failed"),
        }
    }

    /// Re-reads document geometry of sections, cards and bars.
    fn measure(&mut self) {
        let scroll_y = viewport(&self.window).scroll_y;
        for index in 0..self.measured.len() {
            let id = self.measured[index];
            let rect = match self.element(id) {
                Ok(element) => document_rect(&element, scroll_y),
                Err(err) => {
                    tracing::warn!(%err, "cannot measure element");
                    continue;
                }
            };
            if let Err(err) = self.controller.update_geometry(id, rect) {
                tracing::warn!(%err, "geometry update rejected");
            }
        }
    }

    fn flush(&mut self) {
        let mut commands = std::mem::take(&mut self.commands);
        for command in commands.drain() {
            if let Err(err) = self.apply(&command) {
                tracing::warn!(%err, ?command, "command failed");
            }
        }
        self.commands = commands;
    }

    fn apply(&self, command: &DomCommand) -> DeckResult<()> {
        match command {
            DomCommand::SetText { element, text } => {
                self.element(*element)?.set_text_content(Some(text));
            }
            DomCommand::AddClass { element, class } => {
                self.element(*element)?
                    .class_list()
                    .add_1(class)
                    .map_err(|e| js_error(&e))?;
            }
            DomCommand::RemoveClass { element, class } => {
                self.element(*element)?
                    .class_list()
                    .remove_1(class)
                    .map_err(|e| js_error(&e))?;
            }
            DomCommand::SetStyle {
                element,
                property,
                value,
            } => {
                let element = self.element(*element)?;
                let style = element
                    .dyn_ref::<HtmlElement>()
                    .ok_or_else(|| dom("styled element is not an HtmlElement"))?
                    .style();
                if value.is_empty() {
                    style.remove_property(property).map_err(|e| js_error(&e))?;
                } else {
                    style.set_property(property, value).map_err(|e| js_error(&e))?;
                }
            }
            DomCommand::ScrollTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(f64::from(*top));
                options.set_behavior(if *smooth {
                    ScrollBehavior::Smooth
                } else {
                    ScrollBehavior::Instant
                });
                self.window.scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::InjectStylesheet { css } => {
                let head = self.document.head().ok_or_else(|| dom("no head"))?;
                let style = self
                    .document
                    .create_element("style")
                    .map_err(|e| js_error(&e))?;
                style.set_text_content(Some(css));
                head.append_child(&style).map_err(|e| js_error(&e))?;
            }
        }
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(handle) = self.frame_request.take() {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                tracing::warn!(?err, "cancelAnimationFrame failed");
            }
        }

        let released = self.controller.teardown(&mut self.commands);
        self.flush();
        self.detach(&released);
        self.frame_loop = None;
        tracing::info!("deck host torn down");
    }

    fn detach(&mut self, released: &[Subscription]) {
        let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|l| released.iter().any(|s| s.source == l.source));
        for listener in gone {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                tracing::warn!(?err, event = listener.event, "listener removal failed");
            }
        }
        self.listeners = kept;
    }
}
