mod common;

use common::{node, runtime};
use pretty_assertions::assert_eq;
use reveal_core::{class, Role};
use reveal_engine::{FixedLayout, FlowLayout};

const HERO_PAGE: &str = r#"<html><head></head><body>
<div class="relative flex flex-col items-center justify-center gap-4">
  <h1 id="h0">One</h1><p id="h1">Two</p><div id="h2">Three</div>
</div></body></html>"#;

const SECTIONS_PAGE: &str = r#"<html><head></head><body>
<section id="top">Top</section>
<section id="edge">Edge</section>
<section id="far">Far</section>
</body></html>"#;

const CARDS_PAGE: &str = r#"<html><head></head><body>
<a id="c0" class="rounded-2xl" href="/0">0</a>
<a id="c1" class="rounded-2xl" href="/1">1</a>
<a id="c2" class="rounded-2xl" href="/2">2</a>
<a id="c3" class="rounded-2xl" href="/3">3</a>
</body></html>"#;

#[test]
fn hero_children_reveal_on_their_stagger_not_sooner() {
    let mut page = runtime(HERO_PAGE, FixedLayout::new());
    let report = page.init().unwrap();
    assert_eq!(report.hero, 3);

    let h0 = node(&page, "h0");
    let h1 = node(&page, "h1");
    assert!(page.dom().has_class(h0, class::ANIMATE));
    assert!(!page.is_visible(h0));

    page.advance(49);
    assert!(!page.is_visible(h0));
    page.advance(1);
    assert!(page.is_visible(h0));
    assert!(!page.is_visible(h1));

    page.advance(99);
    assert!(!page.is_visible(h1));
    page.advance(1_000);

    let times: Vec<u64> = page.reveal_log().iter().map(|event| event.at_ms).collect();
    assert_eq!(times, vec![50, 150, 250]);
    assert!(page.reveal_log().iter().all(|event| event.role == Role::HeroChild));
}

#[test]
fn section_in_view_at_load_reveals_without_scrolling() {
    let layout = FixedLayout::new()
        .with_rect("top", 100.0, 200.0)
        .with_rect("edge", 760.0, 100.0)
        .with_rect("far", 2_000.0, 300.0);
    let mut page = runtime(SECTIONS_PAGE, layout);
    page.init();

    assert!(page.is_visible(node(&page, "top")));
    // Below the 50px bottom margin.
    assert!(!page.is_visible(node(&page, "edge")));
    assert!(!page.is_visible(node(&page, "far")));
    assert_eq!(page.reveal_log()[0].at_ms, 0);

    page.scroll_to(100.0);
    assert!(page.is_visible(node(&page, "edge")));
    assert!(!page.is_visible(node(&page, "far")));

    page.scroll_to(1_600.0);
    assert!(page.is_visible(node(&page, "far")));
    assert_eq!(page.scheduler_view().observing, 0);
}

#[test]
fn barely_visible_section_waits_for_the_threshold() {
    // 10% of the section inside the trimmed viewport: below the 0.15 threshold.
    let layout = FixedLayout::new().with_rect("top", 650.0, 1_000.0);
    let mut page = runtime(SECTIONS_PAGE, layout);
    page.init();
    let top = node(&page, "top");
    assert!(!page.is_visible(top));

    page.scroll_to(60.0);
    assert!(page.is_visible(top));
}

#[test]
fn cards_revealed_together_cascade_by_batch_index() {
    let layout = FixedLayout::new()
        .with_rect("c0", 0.0, 100.0)
        .with_rect("c1", 100.0, 100.0)
        .with_rect("c2", 200.0, 100.0)
        .with_rect("c3", 5_000.0, 100.0);
    let mut page = runtime(CARDS_PAGE, layout);
    page.init();

    let c0 = node(&page, "c0");
    assert!(page.dom().has_class(c0, class::ANIMATE_SCALE));
    assert!(!page.is_visible(c0));

    page.advance(0);
    assert!(page.is_visible(c0));
    assert!(!page.is_visible(node(&page, "c1")));

    page.advance(100);
    assert!(page.is_visible(node(&page, "c1")));
    page.advance(100);
    assert!(page.is_visible(node(&page, "c2")));
    assert!(!page.is_visible(node(&page, "c3")));

    page.scroll_to(4_500.0);
    page.advance(0);
    let last = page.reveal_log().last().unwrap();
    assert_eq!((last.at_ms, last.label.as_str()), (200, "a#c3"));
}

#[test]
fn every_target_turns_visible_at_most_once() {
    let mut page = runtime(SECTIONS_PAGE, FlowLayout::default());
    page.init();
    let height = page.document_height();
    for step in 0..10 {
        page.scroll_to(height * f64::from(step) / 10.0);
        page.advance(100);
    }
    page.scroll_to(0.0);
    page.advance(1_000);

    let log = page.reveal_log();
    assert_eq!(log.len(), 3);
    let mut nodes: Vec<_> = log.iter().map(|event| event.node).collect();
    nodes.dedup();
    assert_eq!(nodes.len(), 3);
    assert!(page.scheduler_view().all_visible());
}

#[test]
fn second_init_changes_nothing() {
    let mut page = runtime(common::LANDING_PAGE, FlowLayout::default());
    assert!(page.init().is_some());
    let html = page.html();

    assert!(page.init().is_none());
    assert_eq!(page.html(), html);
}

#[test]
fn growing_the_viewport_reveals_what_comes_into_view() {
    let layout = FixedLayout::new().with_rect("far", 1_000.0, 100.0);
    let mut page = runtime(SECTIONS_PAGE, layout);
    page.init();
    let far = node(&page, "far");
    assert_eq!(page.role_of(far), Some(Role::Section));
    assert!(!page.is_visible(far));

    page.resize(1_200.0);
    assert!(page.is_visible(far));
}

#[test]
fn reveal_all_leaves_no_target_hidden() {
    let body: String = (0..20)
        .map(|i| format!("<section id=\"s{i}\"><p>a</p><p>b</p><p>c</p><p>d</p><p>e</p><p>f</p></section>"))
        .collect();
    let html = format!("<html><head></head><body>{body}</body></html>");
    let mut page = runtime(&html, FlowLayout::default());
    page.init();
    page.advance(10_000);
    let shown_by_scroll = page.reveal_log().len();
    assert!(shown_by_scroll < 20);

    assert_eq!(page.reveal_all(), 20 - shown_by_scroll);
    let dom = page.dom();
    let still_hidden = dom
        .elements()
        .into_iter()
        .filter(|&id| dom.has_class(id, class::ANIMATE) && !dom.has_class(id, class::VISIBLE))
        .count();
    assert_eq!(still_hidden, 0);

    page.scroll_to(page.document_height());
    page.advance(1_000);
    assert_eq!(page.reveal_log().len(), 20);
    assert_eq!(page.reveal_all(), 0);
}
