/// Aggregate counts over every tracked reveal target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulerView {
    pub tracked: usize,
    pub hidden: usize,
    pub visible: usize,
    pub observing: usize,
    pub dirty: bool,
}

impl SchedulerView {
    pub fn all_visible(&self) -> bool {
        self.hidden == 0
    }
}
