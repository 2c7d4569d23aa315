//! Report files built from the registry once a run is done.
//!
//! Both exporters only read the registry, so they can be written any time after
//! `done`, as often as needed:
//!
//! ```
//! use testledger::{export::JunitReport, formatter::NoSink, Reporter};
//!
//! let mut reporter = Reporter::new(NoSink);
//! reporter.module_start(Some("Suite")).unwrap();
//! reporter.test_start("t1").unwrap();
//! reporter.test_done("t1", 0, 2).unwrap();
//! reporter.module_done(0, 2).unwrap();
//! reporter.done(0, 2).unwrap();
//!
//! let xml = JunitReport::new(reporter.registry()).to_xml().unwrap();
//! assert!(xml.contains(r#"<testcase name="t1" classname="Suite""#));
//! ```

mod junit;
pub use junit::JunitReport;

mod plain;
pub use plain::PlainReport;
