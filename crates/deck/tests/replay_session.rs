//! Integration test replaying the bundled fixtures.

use std::path::PathBuf;

use deck::ui::{DomCommand, ElementId, PageConfig, PageController, PageModel};
use deck::{Recorded, Replay, Script};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn run_session() -> Vec<Recorded> {
    let page = PageModel::load(fixture("page.toml")).unwrap();
    let config = PageConfig::load(fixture("deck.toml")).unwrap();
    let script = Script::load(fixture("session.toml")).unwrap();

    let controller = PageController::new(config, page).unwrap();
    Replay::new(controller).run(&script)
}

fn emitted_at(log: &[Recorded], at_ms: f64) -> Vec<&DomCommand> {
    log.iter()
        .filter(|r| r.at_ms == at_ms)
        .map(|r| &r.command)
        .collect()
}

#[test]
fn test_fixture_config_is_the_default() {
    let config = PageConfig::load(fixture("deck.toml")).unwrap();
    assert_eq!(config, PageConfig::default());
}

#[test]
fn test_every_metric_ends_on_its_raw_text() {
    let log = run_session();

    for (id, raw) in [
        (60, "94.2%"),
        (61, "$3.2M"),
        (62, "4.5:1"),
        (63, "0.857"),
        (64, "120"),
    ] {
        let last = log
            .iter()
            .rev()
            .find_map(|r| match &r.command {
                DomCommand::SetText { element, text } if *element == ElementId(id) => {
                    Some(text.as_str())
                }
                _ => None,
            });
        assert_eq!(last, Some(raw), "metric #{id}");
    }

    assert!(log.iter().all(|r| r.command.element() != Some(ElementId(65))));
}

#[test]
fn test_navigation_through_the_session() {
    let log = run_session();

    assert_eq!(
        emitted_at(&log, 2500.0),
        vec![&DomCommand::ScrollTo {
            top: 820.0,
            smooth: true
        }]
    );
    assert!(emitted_at(&log, 2600.0).contains(&&DomCommand::add_class(ElementId(11), "active")));
    assert!(emitted_at(&log, 3000.0).contains(&&DomCommand::add_class(ElementId(26), "active")));
    assert_eq!(
        emitted_at(&log, 3500.0),
        vec![&DomCommand::ScrollTo {
            top: 2020.0,
            smooth: true
        }]
    );

    let at_results = emitted_at(&log, 3600.0);
    assert!(at_results.contains(&&DomCommand::add_class(ElementId(12), "active")));
    assert!(at_results.contains(&&DomCommand::set_style(ElementId(51), "width", "85%")));
    assert!(at_results.contains(&&DomCommand::set_style(ElementId(53), "width", "62%")));

    assert_eq!(
        emitted_at(&log, 4500.0),
        vec![&DomCommand::ScrollTo {
            top: 3020.0,
            smooth: true
        }]
    );
}

#[test]
fn test_load_and_hover() {
    let log = run_session();

    assert_eq!(
        emitted_at(&log, 120.0),
        vec![&DomCommand::add_class(ElementId::BODY, "loaded")]
    );
    assert_eq!(
        emitted_at(&log, 4000.0),
        vec![&DomCommand::set_style(
            ElementId(81),
            "background-color",
            "rgba(37, 99, 235, 0.05)"
        )]
    );
    assert_eq!(
        emitted_at(&log, 4200.0),
        vec![&DomCommand::clear_style(ElementId(81), "background-color")]
    );
}
