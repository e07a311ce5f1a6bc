use crate::effect::class;
use crate::{Effect, IntersectionEntry, Msg, Observation, Role, SchedulerState, TargetId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SchedulerState, msg: Msg) -> (SchedulerState, Vec<Effect>) {
    let effects = match msg {
        Msg::Classified {
            hero,
            sections,
            cards,
        } => {
            let mut effects = Vec::with_capacity(2 * (hero.len() + sections.len() + cards.len()));
            classify_hero(&mut state, &hero, &mut effects);
            classify_observed(&mut state, Role::Section, &sections, &mut effects);
            classify_observed(&mut state, Role::Card, &cards, &mut effects);
            effects
        }
        Msg::Intersections { role, entries } => intersections(&mut state, role, &entries),
        Msg::RevealDue { target } => {
            if state.reveal(target) {
                vec![Effect::AddClass {
                    target,
                    class: class::VISIBLE,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RevealAll => reveal_all(&mut state),
    };

    (state, effects)
}

fn classify_hero(state: &mut SchedulerState, hero: &[TargetId], effects: &mut Vec<Effect>) {
    for (index, &target) in hero.iter().enumerate() {
        if !state.track(target, Role::HeroChild, Observation::Unobserved) {
            continue;
        }
        let stagger = state.config().stagger_ms * index as u64;
        let delay_ms = state.config().hero_delay_ms(index);
        if let Some(entry) = state.target_mut(target) {
            entry.delay_ms = Some(stagger);
        }
        effects.push(Effect::AddClass {
            target,
            class: class::ANIMATE,
        });
        effects.push(Effect::ScheduleReveal { target, delay_ms });
    }
}

fn classify_observed(
    state: &mut SchedulerState,
    role: Role,
    targets: &[TargetId],
    effects: &mut Vec<Effect>,
) {
    let hidden_class = match role {
        Role::Card => class::ANIMATE_SCALE,
        Role::HeroChild | Role::Section => class::ANIMATE,
    };
    for &target in targets {
        if !state.track(target, role, Observation::Pending) {
            continue;
        }
        effects.push(Effect::AddClass {
            target,
            class: hidden_class,
        });
        effects.push(Effect::Observe { role, target });
    }
}

fn intersections(
    state: &mut SchedulerState,
    role: Role,
    entries: &[IntersectionEntry],
) -> Vec<Effect> {
    let threshold = state.config().threshold_for(role);
    let stagger_ms = state.config().stagger_ms;
    let mut effects = Vec::new();

    // Cards cascade by their position in this batch, including entries that did not fire.
    for (index, entry) in entries.iter().enumerate() {
        if !meets_threshold(entry.ratio, threshold) {
            continue;
        }
        let Some(target) = state.target_mut(entry.target) else {
            continue;
        };
        if target.role != role || target.observation != Observation::Pending {
            continue;
        }
        target.observation = Observation::Fired;
        effects.push(Effect::Unobserve {
            role,
            target: entry.target,
        });

        match role {
            Role::Card => {
                let delay_ms = stagger_ms * index as u64;
                target.delay_ms = Some(delay_ms);
                state.mark_dirty();
                effects.push(Effect::ScheduleReveal {
                    target: entry.target,
                    delay_ms,
                });
            }
            Role::Section | Role::HeroChild => {
                if state.reveal(entry.target) {
                    effects.push(Effect::AddClass {
                        target: entry.target,
                        class: class::VISIBLE,
                    });
                }
            }
        }
    }

    effects
}

fn reveal_all(state: &mut SchedulerState) -> Vec<Effect> {
    let hidden: Vec<(TargetId, Role)> = state
        .targets()
        .filter(|target| !target.is_visible())
        .map(|target| (target.id, target.role))
        .collect();
    let mut effects = Vec::with_capacity(2 * hidden.len());
    for (target, role) in hidden {
        if let Some(entry) = state.target_mut(target) {
            if entry.observation == Observation::Pending {
                entry.observation = Observation::Fired;
                effects.push(Effect::Unobserve { role, target });
            }
        }
        if state.reveal(target) {
            effects.push(Effect::AddClass {
                target,
                class: class::VISIBLE,
            });
        }
    }
    effects
}

fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

#[cfg(test)]
mod tests {
    use super::meets_threshold;

    #[test]
    fn zero_ratio_never_meets_a_zero_threshold() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(0.15, 0.15));
        assert!(!meets_threshold(0.149, 0.15));
    }
}
