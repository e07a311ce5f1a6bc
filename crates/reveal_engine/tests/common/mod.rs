#![allow(dead_code)]

use std::sync::Once;

use reveal_core::{TabPanelCatalog, TabPanelSpec};
use reveal_engine::{Layout, NodeId, PageRuntime, RuntimeOptions};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub const LANDING_PAGE: &str = r#"<!DOCTYPE html><html><head><title>Polar</title></head><body>
<div id="hero" class="relative flex flex-col items-center justify-center gap-4">
  <h1 id="headline">Monetize your software</h1>
  <p id="lead" style="opacity:0;transform:translateY(20px)">Payments made simple</p>
  <div id="icon-slot"><img alt="App Icon" src="icon.png"></div>
</div>
<section id="pricing"><h2>Pricing</h2></section>
<div id="activity-box">
  <div><h3>Activity</h3></div>
  <div class="relative h-[356px] overflow-hidden">
    <div id="items" class="flex flex-col gap-2" style="transform: translateY(-40px)">
      <div class="item"><span>Order placed</span><p class="hidden xl:flex">Jan 5, 2024</p></div>
      <div class="item"><span>Refund</span><p class="hidden xl:flex">Feb 14, 2024</p></div>
      <div class="item"><span>Payout</span><p class="hidden xl:flex">January 5, 2024</p></div>
    </div>
  </div>
</div>
<div class="stats"><span>Profit</span><span id="profit">$120.50</span></div>
<div role="tablist">
  <button id="tab-a" role="tab" aria-selected="true" data-state="active" aria-controls="panel-a"><span id="tab-a-label">Checkout</span></button>
  <button id="tab-b" role="tab" aria-selected="false" data-state="inactive" aria-controls="panel-b">Usage</button>
</div>
<div id="panel-a" role="tabpanel"><p>Already rendered</p></div>
<div id="panel-b" role="tabpanel" hidden>  </div>
<a id="card-0" class="rounded-2xl border" href="/a">A</a>
<a id="card-1" class="rounded-2xl border" href="/b">B</a>
</body></html>"#;

pub fn usage_panel() -> TabPanelSpec {
    TabPanelSpec {
        title: "Usage Billing".to_string(),
        description: "Meter & bill by usage".to_string(),
        features: vec!["Ingest events".to_string(), "Credits".to_string()],
        learn_more_url: "docs/usage.html".to_string(),
        code: "const meter = <Meter id=\"x\" />;".to_string(),
    }
}

pub fn landing_catalog() -> TabPanelCatalog {
    TabPanelCatalog::new()
        .with_panel("panel-a", usage_panel())
        .with_panel("panel-b", usage_panel())
}

pub fn runtime(html: &str, layout: impl Layout + 'static) -> PageRuntime {
    init_logging();
    PageRuntime::new(
        html,
        layout,
        RuntimeOptions {
            catalog: landing_catalog(),
            ..RuntimeOptions::default()
        },
    )
}

pub fn node(runtime: &PageRuntime, id: &str) -> NodeId {
    runtime
        .dom()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}
