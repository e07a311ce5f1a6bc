//! Headless host for the page enhancements.
//!
//! `PageRuntime` plays the browser's part: it owns the document, a virtual
//! clock with timers, one intersection observer per observed role, and click
//! dispatch. The reveal scheduler in `reveal_core` decides what happens; the
//! runtime applies its effects to the tree.

use std::collections::{BTreeMap, HashMap};

use ego_tree::NodeId;
use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn, set_page_clock_ms};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reveal_core::{
    class, update, Effect, IntersectionEntry, Msg, RevealConfig, Role, SchedulerState,
    SchedulerView, TabPanelCatalog, TargetId,
};

use crate::classify::classify;
use crate::dom::Dom;
use crate::features::counter::{find_counters, LiveCounter};
use crate::features::styles::inject_styles;
use crate::features::tabs::{synthesize_panels, TabController};
use crate::features::ticker::{build_ticker, TickerHandle};
use crate::features::touchups::{fix_hydration_opacity, wrap_app_icon};
use crate::layout::{Layout, Viewport};
use crate::observer::{IntersectionObserver, ObserverOptions};
use crate::timer::{TimerHandle, TimerQueue};
use crate::types::{InitReport, RevealEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Reveal(TargetId),
    CounterTick(usize),
}

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub config: RevealConfig,
    pub viewport: Viewport,
    /// Seed for counter jitter.
    pub seed: u64,
    pub catalog: TabPanelCatalog,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: RevealConfig::DEFAULT,
            viewport: Viewport::default(),
            seed: 0,
            catalog: TabPanelCatalog::builtin(),
        }
    }
}

pub struct PageRuntime {
    dom: Dom,
    config: RevealConfig,
    catalog: TabPanelCatalog,
    layout: Box<dyn Layout>,
    viewport: Viewport,
    now_ms: u64,
    timers: TimerQueue<Task>,
    scheduler: SchedulerState,
    nodes: Vec<NodeId>,
    target_ids: HashMap<NodeId, TargetId>,
    observers: BTreeMap<Role, IntersectionObserver>,
    counters: Vec<LiveCounter>,
    tabs: TabController,
    rng: StdRng,
    initialized: bool,
    reveal_log: Vec<RevealEvent>,
}

impl PageRuntime {
    pub fn new(html: &str, layout: impl Layout + 'static, options: RuntimeOptions) -> Self {
        Self::from_dom(Dom::parse_document(html), layout, options)
    }

    pub fn from_dom(dom: Dom, layout: impl Layout + 'static, options: RuntimeOptions) -> Self {
        let config = options.config;
        let observers = [Role::Section, Role::Card]
            .into_iter()
            .map(|role| {
                let options = ObserverOptions {
                    threshold: config.threshold_for(role),
                    margin_bottom: config.margin_bottom_for(role),
                };
                (role, IntersectionObserver::new(options))
            })
            .collect();
        set_page_clock_ms(0);
        Self {
            dom,
            config,
            catalog: options.catalog,
            layout: Box::new(layout),
            viewport: options.viewport,
            now_ms: 0,
            timers: TimerQueue::new(),
            scheduler: SchedulerState::new(config),
            nodes: Vec::new(),
            target_ids: HashMap::new(),
            observers,
            counters: Vec::new(),
            tabs: TabController::default(),
            rng: StdRng::seed_from_u64(options.seed),
            initialized: false,
            reveal_log: Vec::new(),
        }
    }

    /// Runs every enhancement once. A second call does nothing and returns `None`.
    pub fn init(&mut self) -> Option<InitReport> {
        if self.initialized {
            engine_warn!("init called again; ignored");
            return None;
        }
        self.initialized = true;
        engine_info!("initializing page enhancements");

        let mut report = InitReport {
            styles_injected: inject_styles(&mut self.dom, &self.config).is_some(),
            hydration_fixed: fix_hydration_opacity(&mut self.dom),
            icon_wrapped: wrap_app_icon(&mut self.dom).is_some(),
            ..InitReport::default()
        };

        let found = classify(&self.dom);
        report.hero = found.hero.len();
        report.sections = found.sections.len();
        report.cards = found.cards.len();
        engine_debug!(
            "classified {} hero children, {} sections, {} cards",
            report.hero,
            report.sections,
            report.cards
        );
        let msg = Msg::Classified {
            hero: self.register_all(&found.hero),
            sections: self.register_all(&found.sections),
            cards: self.register_all(&found.cards),
        };
        self.dispatch(msg);

        let ticker = build_ticker(&mut self.dom);
        report.ticker = ticker.handle;
        report.dates_hidden = ticker.dates_hidden;

        self.counters = find_counters(&self.dom);
        report.counters = (0..self.counters.len())
            .map(|index| {
                self.timers
                    .set_interval(self.now_ms, self.config.counter_interval_ms, Task::CounterTick(index))
            })
            .collect();

        report.panels_filled = synthesize_panels(&mut self.dom, &self.catalog);
        self.tabs = TabController::wire(&self.dom);
        report.tabs_wired = self.tabs.tabs().len();

        self.deliver_intersections();
        Some(report)
    }

    /// Moves the clock forward, firing every timer that comes due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.now_ms.saturating_add(ms);
        while let Some((due, handle, task)) = self.timers.pop_due(until) {
            self.set_clock(due);
            engine_trace!("timer {handle:?} fired: {task:?}");
            self.run_task(task);
        }
        self.set_clock(until);
        if self.scheduler.consume_dirty() {
            let view = self.scheduler.view();
            engine_debug!("{}/{} targets visible", view.visible, view.tracked);
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y.max(0.0);
        self.deliver_intersections();
    }

    pub fn resize(&mut self, height: f64) {
        self.viewport.height = height.max(0.0);
        self.deliver_intersections();
    }

    /// Reveals every target still hidden at the current time and stops
    /// observing them. Returns how many targets were revealed.
    pub fn reveal_all(&mut self) -> usize {
        let before = self.reveal_log.len();
        self.dispatch(Msg::RevealAll);
        let revealed = self.reveal_log.len() - before;
        if revealed > 0 {
            engine_info!("revealed {revealed} targets that were still hidden");
        }
        revealed
    }

    /// Dispatches a click on `node`. Returns true if it activated a tab.
    pub fn click(&mut self, node: NodeId) -> bool {
        self.tabs.handle_click(&mut self.dom, node)
    }

    pub fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    pub fn stop_ticker(&mut self, handle: TickerHandle) -> bool {
        handle.cancel(&mut self.dom)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn html(&self) -> String {
        self.dom.to_html()
    }

    pub fn document_height(&self) -> f64 {
        self.layout.measure(&self.dom).document_height()
    }

    pub fn next_timer_due(&mut self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn role_of(&self, node: NodeId) -> Option<Role> {
        let id = self.target_ids.get(&node)?;
        self.scheduler.target(*id).map(|target| target.role)
    }

    pub fn is_visible(&self, node: NodeId) -> bool {
        self.target_ids
            .get(&node)
            .and_then(|id| self.scheduler.target(*id))
            .is_some_and(|target| target.is_visible())
    }

    pub fn reveal_log(&self) -> &[RevealEvent] {
        &self.reveal_log
    }

    pub fn scheduler_view(&self) -> SchedulerView {
        self.scheduler.view()
    }

    pub fn counter_values(&self) -> Vec<f64> {
        self.counters
            .iter()
            .map(|counter| counter.state().current())
            .collect()
    }

    fn set_clock(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        set_page_clock_ms(now_ms);
    }

    fn register_all(&mut self, nodes: &[NodeId]) -> Vec<TargetId> {
        nodes.iter().map(|&node| self.register(node)).collect()
    }

    fn register(&mut self, node: NodeId) -> TargetId {
        if let Some(&id) = self.target_ids.get(&node) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.target_ids.insert(node, id);
        id
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.scheduler);
        let (state, effects) = update(state, msg);
        self.scheduler = state;
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::AddClass { target, class: name } => {
                let Some(&node) = self.nodes.get(target) else {
                    return;
                };
                self.dom.add_class(node, name);
                if name == class::VISIBLE {
                    self.record_reveal(target, node);
                }
            }
            Effect::Observe { role, target } => {
                if let (Some(&node), Some(observer)) =
                    (self.nodes.get(target), self.observers.get_mut(&role))
                {
                    observer.observe(node);
                }
            }
            Effect::Unobserve { role, target } => {
                if let (Some(&node), Some(observer)) =
                    (self.nodes.get(target), self.observers.get_mut(&role))
                {
                    observer.unobserve(node);
                }
            }
            Effect::ScheduleReveal { target, delay_ms } => {
                self.timers
                    .set_timeout(self.now_ms, delay_ms, Task::Reveal(target));
            }
        }
    }

    fn record_reveal(&mut self, target: TargetId, node: NodeId) {
        let Some(role) = self.scheduler.target(target).map(|t| t.role) else {
            return;
        };
        let label = self.dom.describe(node);
        engine_debug!("revealed {} {label}", role.as_str());
        self.reveal_log.push(RevealEvent {
            at_ms: self.now_ms,
            node,
            role,
            label,
        });
    }

    /// Hands every pending observer notification to the scheduler, one batch per role.
    fn deliver_intersections(&mut self) {
        if self.observers.values().all(IntersectionObserver::is_empty) {
            return;
        }
        let snapshot = self.layout.measure(&self.dom);
        let roles: Vec<Role> = self.observers.keys().copied().collect();
        for role in roles {
            let Some(observer) = self.observers.get_mut(&role) else {
                continue;
            };
            let entries: Vec<IntersectionEntry> = observer
                .collect(&snapshot, self.viewport)
                .into_iter()
                .filter_map(|(node, ratio)| {
                    self.target_ids
                        .get(&node)
                        .map(|&target| IntersectionEntry { target, ratio })
                })
                .collect();
            if !entries.is_empty() {
                engine_trace!("{} {} intersection entries", entries.len(), role.as_str());
                self.dispatch(Msg::Intersections { role, entries });
            }
        }
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Reveal(target) => self.dispatch(Msg::RevealDue { target }),
            Task::CounterTick(index) => {
                let delta = self.jitter();
                if let Some(counter) = self.counters.get_mut(index) {
                    let text = counter.tick(&mut self.dom, delta);
                    engine_trace!("counter {index} -> {text}");
                }
            }
        }
    }

    fn jitter(&mut self) -> f64 {
        let magnitude = self.config.counter_jitter;
        if magnitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-magnitude..magnitude)
    }
}
