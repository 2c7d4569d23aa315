use crate::{
    compose::Hook,
    event::{Done, Event, Log, ModuleDone, ModuleStart, TestDone, TestStart},
};

/// One hook per lifecycle notification.
///
/// The reporter calls a hook after it has recorded the notification, so
/// handlers can already query the registry state it produced.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Listeners {
    pub test_start: Hook<TestStart>,
    pub test_done: Hook<TestDone>,
    pub module_start: Hook<ModuleStart>,
    pub module_done: Hook<ModuleDone>,
    pub log: Hook<Log>,
    pub done: Hook<Done>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer every hook of `other` onto the matching hook of `self`.
    pub fn compose(&mut self, other: Listeners) -> &mut Self {
        self.test_start.compose(other.test_start);
        self.test_done.compose(other.test_done);
        self.module_start.compose(other.module_start);
        self.module_done.compose(other.module_done);
        self.log.compose(other.log);
        self.done.compose(other.done);
        self
    }

    pub fn dispatch(&self, event: &Event) {
        match event {
            Event::TestStart(args) => self.test_start.call(args),
            Event::TestDone(args) => self.test_done.call(args),
            Event::ModuleStart(args) => self.module_start.call(args),
            Event::ModuleDone(args) => self.module_done.call(args),
            Event::Log(args) => self.log.call(args),
            Event::Done(args) => self.done.call(args),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.test_start.is_empty()
            && self.test_done.is_empty()
            && self.module_start.is_empty()
            && self.module_done.is_empty()
            && self.log.is_empty()
            && self.done.is_empty()
    }
}
