mod common;

use common::{node, runtime, LANDING_PAGE};
use pretty_assertions::assert_eq;
use reveal_core::{class, CounterState, STYLE_MARKER_ATTR};
use reveal_engine::{build_ticker, Dom, FlowLayout, PageRuntime, RuntimeOptions};

fn landing() -> PageRuntime {
    let mut page = runtime(LANDING_PAGE, FlowLayout::default());
    page.init();
    page
}

#[test]
fn init_reports_each_feature() {
    let mut page = runtime(LANDING_PAGE, FlowLayout::default());
    let report = page.init().unwrap();

    assert!(report.styles_injected);
    assert_eq!(report.hydration_fixed, 1);
    assert!(report.icon_wrapped);
    assert_eq!(report.hero, 3);
    assert_eq!(report.sections, 1);
    assert_eq!(report.cards, 2);
    assert!(report.ticker.is_some());
    assert_eq!(report.dates_hidden, 4);
    assert_eq!(report.counters.len(), 1);
    assert_eq!(report.panels_filled, 1);
    assert_eq!(report.tabs_wired, 2);
}

#[test]
fn stylesheet_is_injected_once() {
    let page = landing();
    let html = page.html();
    assert_eq!(html.matches(STYLE_MARKER_ATTR).count(), 1);

    // A page that was already enhanced keeps its single stylesheet.
    let mut again = runtime(&html, FlowLayout::default());
    let report = again.init().unwrap();
    assert!(!report.styles_injected);
    assert_eq!(again.html().matches(STYLE_MARKER_ATTR).count(), 1);
}

#[test]
fn ticker_doubles_items_exactly_once() {
    let page = landing();
    let items = node(&page, "items");
    let dom = page.dom();
    assert_eq!(dom.element_children(items).len(), 6);
    assert!(dom.has_class(items, class::TICKER));
    assert_eq!(dom.element(items).unwrap().style_property("transform"), None);

    let mut rerun = dom.clone();
    let outcome = build_ticker(&mut rerun);
    assert!(outcome.handle.is_none());
    assert_eq!(rerun.element_children(items).len(), 6);
}

#[test]
fn only_short_dates_are_hidden() {
    let page = landing();
    let dom = page.dom();
    let hidden: Vec<String> = dom
        .elements()
        .into_iter()
        .filter(|&id| dom.has_class(id, class::DATE_HIDDEN))
        .map(|id| dom.text_content(id))
        .collect();
    assert_eq!(hidden, vec!["Jan 5, 2024", "Feb 14, 2024", "Jan 5, 2024", "Feb 14, 2024"]);
}

#[test]
fn stopping_the_ticker_removes_the_animation() {
    let mut page = runtime(LANDING_PAGE, FlowLayout::default());
    let handle = page.init().unwrap().ticker.unwrap();
    assert!(page.stop_ticker(handle));
    assert!(!page.dom().has_class(handle.wrapper(), class::TICKER));
    assert!(!page.stop_ticker(handle));
}

#[test]
fn markup_without_an_activity_widget_is_left_alone() {
    let mut dom = Dom::parse_document("<html><body><h3>Activity</h3><p class=\"xl:flex\">Jan 5, 2024</p></body></html>");
    let before = dom.to_html();
    let outcome = build_ticker(&mut dom);
    assert!(outcome.handle.is_none());
    // The heading was found, so dates are still hidden.
    assert_eq!(outcome.dates_hidden, 1);
    assert_ne!(dom.to_html(), before);
}

#[test]
fn counter_drift_is_bounded_and_always_two_decimals() {
    let mut page = landing();
    let profit = node(&page, "profit");
    for tick in 1..=25u32 {
        page.advance(2_000);
        let text = page.dom().text_content(profit);
        let state = CounterState::parse(&text).unwrap_or_else(|| panic!("bad display {text}"));
        assert!((state.baseline() - 120.5).abs() <= f64::from(tick) + 0.005);
        assert_eq!(text.starts_with('-'), state.baseline() < 0.0);
    }
}

#[test]
fn counters_are_reproducible_per_seed() {
    let run = |seed| {
        common::init_logging();
        let mut page = PageRuntime::new(
            LANDING_PAGE,
            FlowLayout::default(),
            RuntimeOptions {
                seed,
                ..RuntimeOptions::default()
            },
        );
        page.init();
        page.advance(20_000);
        page.counter_values()
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
}

#[test]
fn cancelled_counter_never_ticks() {
    let mut page = runtime(LANDING_PAGE, FlowLayout::default());
    let report = page.init().unwrap();
    assert!(page.cancel_timer(report.counters[0]));

    page.advance(60_000);
    assert_eq!(page.counter_values(), vec![120.5]);
    assert_eq!(page.dom().text_content(node(&page, "profit")), "$120.50");
}

#[test]
fn empty_panel_is_filled_and_rendered_panel_is_kept() {
    let page = landing();
    let dom = page.dom();
    let filled = node(&page, "panel-b");
    let kept = node(&page, "panel-a");

    let html = dom.inner_html(filled);
    assert!(html.contains("Usage Billing"));
    assert!(html.contains("Meter &amp; bill by usage"));
    assert!(html.contains("Ingest events"));
    assert!(html.contains("const meter = &lt;Meter id=\"x\" /&gt;;"));
    assert_eq!(dom.inner_html(kept), "<p>Already rendered</p>");
}

#[test]
fn clicking_a_tab_selects_it_and_shows_only_its_panel() {
    let mut page = landing();
    let tab_a = node(&page, "tab-a");
    let tab_b = node(&page, "tab-b");

    assert!(page.click(tab_b));
    let dom = page.dom();
    assert_eq!(dom.attr(tab_b, "aria-selected"), Some("true"));
    assert_eq!(dom.attr(tab_b, "data-state"), Some("active"));
    assert_eq!(dom.attr(tab_a, "aria-selected"), Some("false"));
    assert_eq!(dom.attr(tab_a, "data-state"), Some("inactive"));
    assert_eq!(dom.attr(node(&page, "panel-a"), "hidden"), Some(""));
    assert_eq!(dom.attr(node(&page, "panel-b"), "hidden"), None);

    // Clicks inside a tab bubble up to it.
    assert!(page.click(node(&page, "tab-a-label")));
    assert_eq!(page.dom().attr(tab_a, "aria-selected"), Some("true"));
    assert_eq!(page.dom().attr(node(&page, "panel-b"), "hidden"), Some(""));

    assert!(!page.click(node(&page, "profit")));
}

#[test]
fn hydration_leftovers_and_icon_are_fixed() {
    let page = landing();
    let dom = page.dom();
    let lead = dom.element(node(&page, "lead")).unwrap();
    assert_eq!(lead.style_property("opacity").as_deref(), Some("1"));
    assert_eq!(lead.style_property("transform").as_deref(), Some("translateY(0)"));

    let slot = node(&page, "icon-slot");
    let wrapper = dom.element_children(slot)[0];
    assert!(dom.has_class(wrapper, class::ICON_WRAPPER));
    assert_eq!(dom.element(dom.element_children(wrapper)[0]).unwrap().name(), "img");
}
