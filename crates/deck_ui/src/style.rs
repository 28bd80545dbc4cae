//! Class names and the injected animation stylesheet.

/// Active nav link, tab button or tab panel.
pub const ACTIVE: &str = "active";
/// Card that has scrolled into view.
pub const ANIMATE_IN: &str = "animate-in";
/// Metric card whose count-up animation has started.
pub const METRIC_COUNTER: &str = "metric-counter";
/// Body class set once the page has finished loading.
pub const LOADED: &str = "loaded";

/// Keyframes for revealed cards and counting metric cards.
pub const ANIMATION_STYLESHEET: &str = r"
.animate-in {
    animation: slideInUp 0.6s ease-out forwards;
}

@keyframes slideInUp {
    from {
        opacity: 0;
        transform: translateY(30px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

.metric-counter {
    animation: countUp 2s ease-out forwards;
}

@keyframes countUp {
    from {
        opacity: 0;
        transform: scale(0.8);
    }
    to {
        opacity: 1;
        transform: scale(1);
    }
}
";
