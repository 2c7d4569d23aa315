use std::{
    cell::RefCell,
    io::Write,
    process::ExitCode,
    rc::Rc,
};

use pretty_assertions::assert_eq;
use testledger::{
    event::{Done, Log, TestDone},
    formatter::{ChannelSink, NoSink, TeeSink},
    prelude::*,
};

mod lib;
use lib::{Buffer, init_tracing, run, sanitize_timings};

#[test]
fn single_module_run_reports_its_test() {
    init_tracing();

    let output = Buffer::default();
    let mut reporter = testledger::reporter().with_sink(output.sink());
    let report = run(
        &mut reporter,
        [
            Event::module_start(Some("Suite")),
            Event::test_start("t1"),
            Event::test_done("t1", 0, 4),
            Event::module_done(0, 4),
            Event::done(0, 4),
        ],
    )
    .unwrap()
    .unwrap();

    let output = output.try_to_string().unwrap();
    let finished: Vec<_> = output
        .lines()
        .filter(|line| line.contains("finished"))
        .collect();
    assert_eq!(finished, ["Test 't1' finished: No failures, 4 total"]);
    assert_eq!(
        output,
        "Starting test: t1\nTest 't1' finished: No failures, 4 total\n"
    );
    assert_eq!(report.exit_code(), ExitCode::SUCCESS);
}

#[test]
fn final_report_follows_creation_order() {
    init_tracing();

    let output = Buffer::default();
    let mut reporter = Reporter::new(output.sink());
    run(
        &mut reporter,
        [
            Event::test_start("loose"),
            Event::test_done("loose", 0, 1),
            Event::module_start(Some("Beta")),
            Event::test_start("b2"),
            Event::test_done("b2", 1, 2),
            Event::test_start("b1"),
            Event::test_done("b1", 0, 0),
            Event::module_done(1, 2),
            Event::module_start(Some("Alpha")),
            Event::test_start("a1"),
            Event::test_done("a1", 3, 3),
            Event::module_done(3, 3),
            Event::done(4, 6),
        ],
    )
    .unwrap();

    let output = output.try_to_string().unwrap();
    let finished: Vec<_> = output
        .lines()
        .filter(|line| line.starts_with("Test "))
        .collect();
    assert_eq!(
        finished,
        [
            "Test 'b2' finished: 1 failure, 2 total",
            "Test 'b1' finished: No failures, No tests to run",
            "Test 'a1' finished: 3 failures, 3 total",
        ]
    );
}

#[test]
fn duplicate_module_ends_the_run() {
    let mut reporter = Reporter::new(NoSink);
    let err = run(
        &mut reporter,
        [
            Event::module_start(Some("Suite")),
            Event::module_done(0, 0),
            Event::module_start(Some("Suite")),
            Event::test_start("never"),
        ],
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "a module 'Suite' already exists in this test suite"
    );
    assert_eq!(reporter.registry().module_count(), 1);
    assert!(reporter.registry().test("never").is_none());
}

#[test]
fn orphaned_module_keeps_its_tests() {
    let mut reporter = Reporter::new(NoSink);
    run(
        &mut reporter,
        [
            Event::module_start(Some("first")),
            Event::test_start("t1"),
            Event::test_done("t1", 0, 1),
            Event::module_start(Some("second")),
            Event::test_start("t2"),
            Event::test_done("t2", 0, 1),
            Event::module_done(0, 1),
        ],
    )
    .unwrap();

    let registry = reporter.registry();
    let first = registry.module("first").unwrap();
    assert_eq!(first.total(), 0);
    assert!(first.has_test("t1"));
    assert_eq!(registry.module("second").unwrap().total(), 1);
    assert_eq!(registry.current_module_name(), None);
}

#[test]
fn lookup_prefers_top_level_over_module_tests() {
    let mut reporter = Reporter::new(NoSink);
    run(
        &mut reporter,
        [
            Event::module_start(Some("M")),
            Event::test_start("shared"),
            Event::module_start(None),
            Event::test_start("shared"),
            Event::test_done("shared", 2, 5),
        ],
    )
    .unwrap();

    let registry = reporter.registry();
    let found = registry.test("shared").unwrap();
    assert_eq!(found.module(), None);
    assert_eq!((found.failures(), found.total()), (2, 5));
    assert_eq!(registry.module("M").unwrap().test("shared").unwrap().total(), 0);
}

#[test]
fn independent_listeners_share_hooks() {
    init_tracing();

    let log = Rc::new(RefCell::new(Vec::new()));

    let mut counting = Listeners::new();
    let asserted = Rc::new(RefCell::new((0u32, 0u32)));
    counting.log.observe({
        let asserted = Rc::clone(&asserted);
        move |args: &Log| {
            let mut asserted = asserted.borrow_mut();
            match args.result {
                true => asserted.0 += 1,
                false => asserted.1 += 1,
            }
        }
    });

    let mut tracing_listener = Listeners::new();
    tracing_listener.test_done.observe({
        let log = Rc::clone(&log);
        move |args: &TestDone| log.borrow_mut().push(format!("done {}", args.name))
    });
    tracing_listener.done.layer({
        let log = Rc::clone(&log);
        move |next, args: &Done| {
            log.borrow_mut().push(String::from("before done"));
            next.call(args);
        }
    });

    let mut reporter = Reporter::new(NoSink)
        .with_listeners(counting)
        .with_listeners(tracing_listener);
    reporter.listeners_mut().done.observe({
        let log = Rc::clone(&log);
        move |args: &Done| log.borrow_mut().push(format!("finished {}", args.total))
    });

    run(
        &mut reporter,
        [
            Event::test_start("t1"),
            Event::log(true, "a"),
            Event::log(false, "b"),
            Event::log(true, "c"),
            Event::test_done("t1", 1, 3),
            Event::done(1, 3),
        ],
    )
    .unwrap();

    assert_eq!(*asserted.borrow(), (2, 1));
    assert_eq!(*log.borrow(), ["done t1", "before done", "finished 3"]);
}

#[test]
fn completion_hooks_see_timings() {
    let timings = Buffer::default();
    let mut reporter = Reporter::new(NoSink);

    reporter.module_start(Some("Suite")).unwrap();
    reporter
        .registry_mut()
        .module_mut("Suite")
        .unwrap()
        .on_done()
        .observe({
            let timings = timings.clone();
            move |done: &Completion| {
                let _ = writeln!(
                    timings.clone(),
                    "Module '{}' took {}ms",
                    done.name,
                    done.total_time.as_millis()
                );
            }
        });

    for name in ["t1", "t2"] {
        reporter.test_start(name).unwrap();
        reporter
            .registry_mut()
            .test_mut(name)
            .unwrap()
            .on_done()
            .observe({
                let timings = timings.clone();
                move |done: &Completion| {
                    let _ = writeln!(
                        timings.clone(),
                        "Test '{}' in {:?} took {}ms",
                        done.name,
                        done.module,
                        done.total_time.as_millis()
                    );
                }
            });
        reporter.test_done(name, 0, 1).unwrap();
    }
    reporter.module_done(0, 2).unwrap();

    let timings = timings.try_to_string().unwrap();
    assert_eq!(
        sanitize_timings(&timings),
        "Test 't1' in Some(\"Suite\") took <n>ms\n\
         Test 't2' in Some(\"Suite\") took <n>ms\n\
         Module 'Suite' took <n>ms\n"
    );
}

#[test]
fn lines_can_travel_to_another_thread() {
    let (sink, rx) = ChannelSink::bounded(4);
    let collector = std::thread::spawn(move || rx.iter().collect::<Vec<_>>());

    let mut reporter = Reporter::new(sink)
        .with_config(ReporterConfig::new().with_prefix("[ci]").with_summary(true));
    let report = run(
        &mut reporter,
        [
            Event::module_start(Some("Suite")),
            Event::test_start("t1"),
            Event::test_done("t1", 1, 1),
            Event::module_done(1, 1),
            Event::done(1, 1),
        ],
    )
    .unwrap()
    .unwrap();
    drop(reporter);

    let lines = collector.join().unwrap();
    assert_eq!(
        lines,
        [
            "[ci] Starting test: t1",
            "[ci] Test 't1' finished: 1 failure, 1 total",
            "[ci] Run finished with errors",
        ]
    );
    assert_eq!(report.exit_code(), ExitCode::FAILURE);
}

#[test]
fn surface_composition_layers_named_hooks() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let base: Surface<&str, String> = Surface::new()
        .with_data("name", "console")
        .with_hook(
            "testStart",
            Hook::new().with_layer({
                let seen = Rc::clone(&seen);
                move |_, name: &String| seen.borrow_mut().push(format!("console {name}"))
            }),
        );
    let mut merged = base;
    merged.compose(
        Surface::new().with_data("name", "file").with_hook(
            "testStart",
            Hook::new().with_layer({
                let seen = Rc::clone(&seen);
                move |next, name: &String| {
                    next.call(name);
                    seen.borrow_mut().push(format!("file {name}"));
                }
            }),
        ),
    );

    assert_eq!(merged.data("name"), Some(&"console"));
    assert!(merged.call("testStart", &String::from("t1")));
    assert_eq!(*seen.borrow(), ["console t1", "file t1"]);
}

#[test]
fn ci_run_writes_console_and_report_files() {
    init_tracing();

    let console = Buffer::default();
    let (mirror, rx) = ChannelSink::unbounded();
    let sink = TeeSink::new().with_sink(console.sink()).with_sink(mirror);
    let config = ReporterConfig::new()
        .with_prefix("[qunit]")
        .with_module_lines(true)
        .with_summary(true);
    let mut reporter = Reporter::new(sink).with_config(config);

    let report = run(
        &mut reporter,
        [
            Event::module_start(Some("Suite")),
            Event::test_start("t1"),
            Event::test_done("t1", 0, 2),
            Event::test_start("t2"),
            Event::test_done("t2", 1, 1),
            Event::module_done(1, 3),
            Event::done(1, 3),
        ],
    )
    .unwrap()
    .unwrap();
    assert_eq!(report.exit_code(), ExitCode::FAILURE);

    let console = console.try_to_string().unwrap();
    assert_eq!(
        console,
        "[qunit] Module started: Suite\n\
         [qunit] Starting test: t1\n\
         [qunit] Starting test: t2\n\
         [qunit] Module completed: Suite(3 total, 1 failed, 2 passed) 0 secs. <<<<<<<<<< FAILED!\n\
         [qunit] Test 't1' finished: No failures, 2 total\n\
         [qunit] Test 't2' finished: 1 failure, 1 total\n\
         [qunit] Run finished with errors\n"
    );
    let mirrored: Vec<_> = rx.try_iter().collect();
    assert_eq!(mirrored.join("\n") + "\n", console);

    let xml = reporter.junit_report().to_xml().unwrap();
    assert!(xml.contains(r#"<testsuites tests="2" failures="1">"#));
    assert!(xml.contains(r#"<failure message="1 failure, 1 total"/>"#));

    let dir = tempfile::tempdir().unwrap();
    let written = reporter.plain_report().write_dir(dir.path()).unwrap();
    assert_eq!(written, [dir.path().join("TEST-Suite.txt")]);
    let plain = std::fs::read_to_string(&written[0]).unwrap();
    assert!(plain.starts_with("Module started: Suite\n"));
    assert!(plain.ends_with("<<<<<<<<<< FAILED!\n"));
}
