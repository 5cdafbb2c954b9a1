//! Registration progress indicator.
//!
//! Fill bars and step markers come in duplicated desktop/mobile variants, so
//! every widget is driven as a list; markers are numbered by their position
//! in the combined list. The step math is pure and host-testable; only
//! `apply` touches the DOM.

use crate::dom::{self, ProgressElements};
use crate::events::on_click;
use crate::notify::{self, Level};
use std::cell::RefCell;

pub const TOTAL_STEPS: u32 = 4;

thread_local! {
    static CURRENT_STEP: RefCell<u32> = const { RefCell::new(1) };
}

fn current_step() -> u32 {
    CURRENT_STEP.with(|s| *s.borrow())
}

fn set_current_step(step: u32) {
    CURRENT_STEP.with(|s| *s.borrow_mut() = step.clamp(1, TOTAL_STEPS));
}

/// Fill-bar width for a step: 0% at the first step, 100% at the last.
/// Out-of-range steps are clamped into `[1, total]`.
pub fn fill_percent(step: u32, total: u32) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    ((step.clamp(1, total) - 1) as f64 / (total - 1) as f64) * 100.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPhase {
    Pending,
    Active,
    Completed,
}

impl StepPhase {
    pub fn of(step: u32, current: u32) -> StepPhase {
        if step < current {
            StepPhase::Completed
        } else if step == current {
            StepPhase::Active
        } else {
            StepPhase::Pending
        }
    }
}

fn apply(els: &ProgressElements, step: u32) {
    let width = format!("{}%", fill_percent(step, TOTAL_STEPS));
    for fill in &els.fills {
        dom::set_style(fill, "width", &width);
    }

    for (index, marker) in els.steps.iter().enumerate() {
        dom::remove_class(marker, "active");
        dom::remove_class(marker, "completed");
        match StepPhase::of(index as u32 + 1, step) {
            StepPhase::Active => dom::add_class(marker, "active"),
            StepPhase::Completed => dom::add_class(marker, "completed"),
            StepPhase::Pending => {}
        }
    }

    if let Some(next) = &els.next {
        next.set_text_content(Some(if step == TOTAL_STEPS { "Complete" } else { "Next" }));
    }
    if let Some(prev) = &els.prev {
        prev.set_disabled(step == 1);
    }
}

pub fn init() {
    let els = ProgressElements::bind();
    if !els.is_present() {
        return;
    }

    apply(&els, current_step());

    if let Some(next) = &els.next {
        let els2 = els.clone();
        on_click!(next, move |_: web_sys::MouseEvent| {
            let step = current_step();
            if step == TOTAL_STEPS {
                notify::show("Registration completed!", Level::Success);
                return;
            }
            set_current_step(step + 1);
            apply(&els2, current_step());
        });
    }

    if let Some(prev) = &els.prev {
        let els2 = els.clone();
        on_click!(prev, move |_: web_sys::MouseEvent| {
            let step = current_step();
            if step > 1 {
                set_current_step(step - 1);
                apply(&els2, current_step());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_percent_spans_the_track() {
        assert_eq!(fill_percent(1, 4), 0.0);
        assert_eq!(fill_percent(2, 4), (1.0 / 3.0) * 100.0);
        assert_eq!(fill_percent(3, 4), (2.0 / 3.0) * 100.0);
        assert_eq!(fill_percent(4, 4), 100.0);
    }

    #[test]
    fn fill_percent_is_clamped_and_total_safe() {
        assert_eq!(fill_percent(9, 4), 100.0);
        assert_eq!(fill_percent(0, 4), 0.0);
        assert_eq!(fill_percent(1, 1), 0.0);
        assert_eq!(fill_percent(1, 0), 0.0);
    }

    #[test]
    fn phases_partition_around_the_current_step() {
        assert_eq!(StepPhase::of(1, 3), StepPhase::Completed);
        assert_eq!(StepPhase::of(2, 3), StepPhase::Completed);
        assert_eq!(StepPhase::of(3, 3), StepPhase::Active);
        assert_eq!(StepPhase::of(4, 3), StepPhase::Pending);
    }
}
