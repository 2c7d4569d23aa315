//! A result ledger for test lifecycles.
//!
//! A test engine reports what it does through six notifications: `moduleStart`,
//! `testStart`, `log`, `testDone`, `moduleDone` and `done`. A [`Reporter`]
//! records them in a [`Registry`](registry::Registry) of modules and tests,
//! writes progress and result lines to a [`LineSink`](formatter::LineSink), and
//! lets any number of independently written listeners hook into each
//! notification through [`Hook`](compose::Hook)s. Once the run is done, the
//! [`export`] module turns the registry into JUnit XML or plain text files.
//!
//! ```
//! use testledger::{ReporterConfig, formatter::BufferSink};
//!
//! let mut reporter = testledger::reporter()
//!     .with_sink(BufferSink::new())
//!     .with_config(ReporterConfig::new().with_prefix("[suite]"));
//!
//! reporter.module_start(Some("Suite")).unwrap();
//! reporter.test_start("t1").unwrap();
//! reporter.test_done("t1", 0, 4).unwrap();
//! reporter.module_done(0, 4).unwrap();
//! let report = reporter.done(0, 4).unwrap();
//!
//! assert!(report.passed());
//! assert_eq!(
//!     reporter.sink().lines(),
//!     [
//!         "[suite] Starting test: t1",
//!         "[suite] Test 't1' finished: No failures, 4 total",
//!     ]
//! );
//! ```

pub mod compose;
pub mod error;
pub mod event;
pub mod export;
pub mod formatter;
pub mod module;
pub mod outcome;
pub mod registry;

mod config;
pub use config::*;

mod report;
pub use report::*;

mod reporter;
pub use reporter::*;

pub mod prelude {
    pub use crate::{
        Listeners, Reporter, ReporterConfig, RunReport,
        compose::{Hook, Next, Surface},
        error::{RegistryError, ReportError},
        event::Event,
        export::{JunitReport, PlainReport},
        formatter::{LineSink, format_results},
        module::Module,
        outcome::Completion,
        registry::Registry,
        test::Test,
    };
}
