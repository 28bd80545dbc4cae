//! Event subscriptions owned by the page controller.
//!
//! Every listener the page needs is a [`Subscription`] held in one
//! [`SubscriptionRegistry`]. Events from a source without a live
//! subscription are dropped, and tearing the registry down hands every
//! subscription back so a host can detach the matching listeners.

/// A source of page events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    /// Window scroll.
    Scroll,
    /// Window resize.
    Resize,
    /// Document keydown.
    KeyDown,
    /// Document touchstart.
    TouchStart,
    /// Document touchend.
    TouchEnd,
    /// Window load.
    Load,
    /// Pointer enter/leave on hover targets.
    Pointer,
    /// Clicks on nav links and tab buttons.
    Click,
}

impl EventSource {
    /// Every source a full page subscribes to.
    pub const ALL: [Self; 8] = [
        Self::Scroll,
        Self::Resize,
        Self::KeyDown,
        Self::TouchStart,
        Self::TouchEnd,
        Self::Load,
        Self::Pointer,
        Self::Click,
    ];

    /// DOM event names delivered by this source.
    #[must_use]
    pub const fn dom_events(self) -> &'static [&'static str] {
        match self {
            Self::Scroll => &["scroll"],
            Self::Resize => &["resize"],
            Self::KeyDown => &["keydown"],
            Self::TouchStart => &["touchstart"],
            Self::TouchEnd => &["touchend"],
            Self::Load => &["load"],
            Self::Pointer => &["mouseenter", "mouseleave"],
            Self::Click => &["click"],
        }
    }
}

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// A live listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    /// Registration id.
    pub id: SubscriptionId,
    /// Subscribed source.
    pub source: EventSource,
}

/// Owns every subscription of one page.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    /// Live subscriptions, in registration order.
    live: Vec<Subscription>,
    /// Next id to hand out.
    next_id: u64,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `source`.
    pub fn subscribe(&mut self, source: EventSource) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.live.push(Subscription { id, source });
        tracing::trace!(?source, id = id.0, "subscribed");
        id
    }

    /// Removes one subscription. Returns false if it was not live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.live.len();
        self.live.retain(|s| s.id != id);
        self.live.len() != before
    }

    /// Returns true if any live subscription covers `source`.
    #[must_use]
    pub fn is_subscribed(&self, source: EventSource) -> bool {
        self.live.iter().any(|s| s.source == source)
    }

    /// Returns the live subscriptions.
    #[must_use]
    pub fn live(&self) -> &[Subscription] {
        &self.live
    }

    /// Removes every subscription and returns them for detaching.
    pub fn teardown(&mut self) -> Vec<Subscription> {
        std::mem::take(&mut self.live)
    }
}
