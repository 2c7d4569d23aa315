//! The six lifecycle notifications a test engine sends.
//!
//! Each notification has its own payload type, which is also the argument type
//! of the matching listener hook.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestStart {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDone {
    pub name: String,
    pub failures: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStart {
    /// `None` leaves the current module scope.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDone {
    pub failures: u64,
    pub total: u64,
}

/// A single assertion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    pub result: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Done {
    pub failures: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TestStart(TestStart),
    TestDone(TestDone),
    ModuleStart(ModuleStart),
    ModuleDone(ModuleDone),
    Log(Log),
    Done(Done),
}

impl Event {
    pub fn test_start(name: impl Into<String>) -> Self {
        Self::TestStart(TestStart { name: name.into() })
    }

    pub fn test_done(name: impl Into<String>, failures: u64, total: u64) -> Self {
        Self::TestDone(TestDone {
            name: name.into(),
            failures,
            total,
        })
    }

    pub fn module_start(name: Option<&str>) -> Self {
        Self::ModuleStart(ModuleStart {
            name: name.map(str::to_owned),
        })
    }

    pub fn module_done(failures: u64, total: u64) -> Self {
        Self::ModuleDone(ModuleDone { failures, total })
    }

    pub fn log(result: bool, message: impl Into<String>) -> Self {
        Self::Log(Log {
            result,
            message: message.into(),
        })
    }

    pub fn done(failures: u64, total: u64) -> Self {
        Self::Done(Done { failures, total })
    }

    /// The notification name as the engine spells it.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TestStart(_) => "testStart",
            Event::TestDone(_) => "testDone",
            Event::ModuleStart(_) => "moduleStart",
            Event::ModuleDone(_) => "moduleDone",
            Event::Log(_) => "log",
            Event::Done(_) => "done",
        }
    }
}
