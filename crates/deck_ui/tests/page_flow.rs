//! Integration test for a full page session.

use deck_ui::{
    CommandBuffer, DomCommand, ElementId, EventOutcome, EventSource, Key, PageConfig,
    PageController, PageEvent, PageModel, Viewport,
};

const PAGE: &str = r##"
    metric_cards = [70, 71]

    [[sections]]
    id = 1
    anchor = "overview"
    rect = { y = 0.0, height = 900.0 }

    [[sections]]
    id = 2
    anchor = "model"
    rect = { y = 900.0, height = 900.0 }

    [[sections]]
    id = 3
    anchor = "results"
    rect = { y = 1800.0, height = 900.0 }

    [[nav_links]]
    id = 10
    href = "#overview"

    [[nav_links]]
    id = 11
    href = "#model"

    [[nav_links]]
    id = 12
    href = "#results"

    [[tab_buttons]]
    id = 20
    target = "business"

    [[tab_buttons]]
    id = 21
    target = "data"

    [[tab_contents]]
    id = 22
    anchor = "business"

    [[tab_contents]]
    id = 23
    anchor = "data"

    [[reveal_targets]]
    id = 40
    rect = { y = 200.0, height = 200.0 }

    [[reveal_targets]]
    id = 41
    rect = { y = 1500.0, height = 200.0 }

    [[feature_bars]]
    id = 50
    value = 51
    style = "width: 85%"
    rect = { y = 2000.0, height = 20.0 }

    [[metrics]]
    id = 60
    text = "42%"

    [[metrics]]
    id = 61
    text = "$3.2M"

    [[metrics]]
    id = 62
    text = "4.5:1"

    [[metrics]]
    id = 63
    text = "N/A"

    [[hover_targets]]
    id = 80
    effect = "glow"
"##;

fn controller() -> PageController {
    let page = PageModel::from_toml_str(PAGE).unwrap();
    PageController::new(PageConfig::default(), page)
        .unwrap()
        .with_viewport(Viewport::new(1280.0, 800.0))
}

fn last_text(out: &CommandBuffer, id: u32) -> Option<String> {
    out.commands().iter().rev().find_map(|c| match c {
        DomCommand::SetText { element, text } if *element == ElementId(id) => Some(text.clone()),
        _ => None,
    })
}

#[test]
fn test_ready_then_frames_restore_every_metric() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();

    controller.handle(PageEvent::Ready, 0.0, &mut out);

    assert!(matches!(out.commands()[0], DomCommand::InjectStylesheet { .. }));
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(10), "active")));
    assert!(out.commands().contains(&DomCommand::remove_class(ElementId(11), "active")));
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(40), "animate-in")));
    assert!(!out.commands().contains(&DomCommand::add_class(ElementId(41), "animate-in")));
    assert_eq!(controller.running_animations(), 3);

    let mut now = 0.0;
    let mut frames = 0;
    while controller.has_pending_work() {
        now += 16.0;
        controller.frame(now, &mut out);
        frames += 1;
        assert!(frames < 1000, "animation never settled");
    }

    assert_eq!(last_text(&out, 60).as_deref(), Some("42%"));
    assert_eq!(last_text(&out, 61).as_deref(), Some("$3.2M"));
    assert_eq!(last_text(&out, 62).as_deref(), Some("4.5:1"));
    assert_eq!(last_text(&out, 63), None);
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(70), "metric-counter")));
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(71), "metric-counter")));
}

#[test]
fn test_intermediate_frames_use_metric_format() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);

    out.begin_frame();
    controller.frame(1000.0, &mut out);

    // quartic ease-out at t = 0.5 is 0.9375
    assert_eq!(last_text(&out, 60).as_deref(), Some("39.4%"));
    assert_eq!(last_text(&out, 61).as_deref(), Some("$3.0M"));
    assert_eq!(last_text(&out, 62).as_deref(), Some("4.2:1"));
}

#[test]
fn test_scrolling_highlights_and_reveals() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);

    out.begin_frame();
    controller.handle(PageEvent::Scroll { scroll_y: 1200.0 }, 100.0, &mut out);

    assert_eq!(controller.highlighted_section(), Some("model"));
    assert!(out.commands().contains(&DomCommand::remove_class(ElementId(10), "active")));
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(11), "active")));
    assert!(out.commands().contains(&DomCommand::add_class(ElementId(41), "animate-in")));
    assert!(out.commands().iter().all(|c| c.element() != Some(ElementId(51))));

    out.begin_frame();
    controller.handle(PageEvent::Scroll { scroll_y: 1400.0 }, 120.0, &mut out);
    assert_eq!(
        out.commands(),
        &[DomCommand::set_style(ElementId(51), "width", "85%")]
    );

    // scrolling back never hides anything
    out.begin_frame();
    controller.handle(PageEvent::Scroll { scroll_y: 1300.0 }, 140.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_nav_and_tab_clicks() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);

    out.begin_frame();
    let outcome = controller.handle(PageEvent::Click(ElementId(12)), 10.0, &mut out);
    assert_eq!(outcome, EventOutcome::PREVENT);
    assert_eq!(
        out.commands(),
        &[DomCommand::ScrollTo {
            top: 1720.0,
            smooth: true
        }]
    );

    out.begin_frame();
    let outcome = controller.handle(PageEvent::Click(ElementId(21)), 20.0, &mut out);
    assert_eq!(outcome, EventOutcome::PASS);
    assert_eq!(
        out.commands(),
        &[
            DomCommand::remove_class(ElementId(20), "active"),
            DomCommand::remove_class(ElementId(21), "active"),
            DomCommand::remove_class(ElementId(22), "active"),
            DomCommand::remove_class(ElementId(23), "active"),
            DomCommand::add_class(ElementId(21), "active"),
            DomCommand::add_class(ElementId(23), "active"),
        ]
    );
}

#[test]
fn test_keyboard_and_swipe_navigation() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);

    out.begin_frame();
    let outcome = controller.handle(PageEvent::KeyDown(Key::ArrowDown), 10.0, &mut out);
    assert_eq!(outcome, EventOutcome::PREVENT);
    assert_eq!(
        out.commands(),
        &[DomCommand::ScrollTo {
            top: 820.0,
            smooth: true
        }]
    );

    out.begin_frame();
    controller.handle(PageEvent::TouchStart { screen_y: 500.0 }, 20.0, &mut out);
    controller.handle(PageEvent::TouchEnd { screen_y: 300.0 }, 30.0, &mut out);
    assert_eq!(
        out.commands(),
        &[DomCommand::ScrollTo {
            top: 820.0,
            smooth: true
        }]
    );

    // short drag is not a swipe
    out.begin_frame();
    controller.handle(PageEvent::TouchStart { screen_y: 500.0 }, 40.0, &mut out);
    controller.handle(PageEvent::TouchEnd { screen_y: 470.0 }, 50.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_load_and_hover() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();

    controller.handle(PageEvent::Load, 0.0, &mut out);
    controller.handle(PageEvent::PointerEnter(ElementId(80)), 5.0, &mut out);
    controller.handle(PageEvent::PointerLeave(ElementId(80)), 6.0, &mut out);

    assert_eq!(
        out.commands(),
        &[
            DomCommand::add_class(ElementId::BODY, "loaded"),
            DomCommand::set_style(ElementId(80), "box-shadow", "0 0 20px rgba(37, 99, 235, 0.3)"),
            DomCommand::clear_style(ElementId(80), "box-shadow"),
        ]
    );
}

#[test]
fn test_teardown_mid_animation() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);
    controller.frame(300.0, &mut out);

    out.begin_frame();
    let released = controller.teardown(&mut out);

    assert_eq!(released.len(), EventSource::ALL.len());
    assert!(controller.subscriptions().live().is_empty());
    assert_eq!(last_text(&out, 60).as_deref(), Some("42%"));
    assert_eq!(last_text(&out, 61).as_deref(), Some("$3.2M"));
    assert_eq!(last_text(&out, 62).as_deref(), Some("4.5:1"));
    assert!(!controller.has_pending_work());

    out.begin_frame();
    controller.handle(PageEvent::Scroll { scroll_y: 2000.0 }, 400.0, &mut out);
    controller.frame(400.0, &mut out);
    assert!(out.is_empty());
}

#[test]
fn test_unsubscribed_scroll_is_dropped() {
    let mut controller = controller();
    let mut out = CommandBuffer::new();
    controller.handle(PageEvent::Ready, 0.0, &mut out);

    assert!(controller.unsubscribe(EventSource::Scroll));
    assert!(!controller.unsubscribe(EventSource::Scroll));

    out.begin_frame();
    controller.handle(PageEvent::Scroll { scroll_y: 1200.0 }, 10.0, &mut out);

    assert!(out.is_empty());
    assert_eq!(controller.viewport().scroll_y, 0.0);
    assert_eq!(controller.highlighted_section(), Some("overview"));
}
