use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use serde_json;
use structopt::StructOpt;

use stacesg::catalog::FileCatalog;
use stacesg::cliopt::CliOpt;
use stacesg::filter::{ExtentPolicy, Query};
use stacesg::output::{Encoder, HumanReadableEncoder, JsonEncoder, LineWriter, Writer};
use stacesg::runner::Runner;

#[test]
fn e2e() -> Result<(), Box<dyn std::error::Error>> {
    let root_test_dir = Path::new(file!()).parent().unwrap().join("scenarios");

    for test_dir in fs::read_dir(&root_test_dir)? {
        let test_dir = test_dir?.path();

        if let Ok(filter) = std::env::var("E2E_CASE") {
            if !test_dir.as_os_str().to_string_lossy().ends_with(&filter) {
                continue;
            }
        }

        let cli_args: Vec<String> =
            serde_json::from_str(&fs::read_to_string(test_dir.join("args.json"))?)?;

        let actual = search(&test_dir.join("catalog.json"), &cli_args);

        if test_dir.join("error").exists() {
            let expected_kind = fs::read_to_string(test_dir.join("error"))?;
            match actual {
                Ok(output) => panic!(
                    "\nExpected {} in '{}' but the search succeeded with:\n{}",
                    expected_kind.trim(),
                    test_dir.display(),
                    String::from_utf8_lossy(&output),
                ),
                Err(e) => assert_eq!(
                    expected_kind.trim(),
                    format!("{:?}", e.kind()),
                    "\nUnexpected error in '{}': {}",
                    test_dir.display(),
                    e,
                ),
            }
            continue;
        }

        let actual_output = actual?;
        let expected_output = fs::read(test_dir.join("output"))?;

        assert_eq!(
            expected_output,
            actual_output,
            "\nUnexpected search result in '{}'.\nExpected:\n{}\nActual:\n{}",
            test_dir.display(),
            String::from_utf8_lossy(&expected_output),
            String::from_utf8_lossy(&actual_output),
        );
    }

    Ok(())
}

fn search(catalog: &Path, cli_args: &[String]) -> stacesg::error::Result<Vec<u8>> {
    let opt = CliOpt::from_iter(cli_args);
    assert!(opt.no_insight, "e2e scenarios can't call the chat API");

    let query = Query::parse(&opt.bbox, &opt.dates)?;

    let encoder: Box<dyn Encoder> = match opt.encode.as_deref() {
        Some("json") => Box::new(JsonEncoder::new()),
        _ => Box::new(HumanReadableEncoder::new()),
    };

    let policy = if opt.skip_incomplete {
        ExtentPolicy::Skip
    } else {
        ExtentPolicy::Fail
    };

    let writer = Rc::new(RefCell::new(LineWriter::new(Vec::new())));

    struct TestWriter<W>(Rc<RefCell<W>>);

    impl<W: Writer> Writer for TestWriter<W> {
        fn write(&mut self, buf: &[u8]) -> io::Result<()> {
            self.0.borrow_mut().write(buf)
        }
    }

    let mut runner = Runner::new(
        Box::new(FileCatalog::new(catalog)),
        None,
        encoder,
        Box::new(TestWriter(Rc::clone(&writer))),
        opt.limit,
        policy,
    );

    runner.run(query)?;

    // To make Rc::try_unwrap(writer) work.
    drop(runner);

    let writer = match Rc::try_unwrap(writer) {
        Ok(writer) => writer,
        _ => unreachable!(),
    };

    Ok(writer.into_inner().into_inner())
}
