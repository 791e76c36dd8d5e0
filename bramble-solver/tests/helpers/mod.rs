//! Crate to run integration tests for the solver.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

#[derive(Debug)]
pub(crate) struct Files {
    pub(crate) instance_file: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) err_file: PathBuf,
    pub(crate) search_log_file: PathBuf,
    pub(crate) exit_status: ExitStatus,
}

impl Files {
    pub(crate) fn log(&self) -> String {
        std::fs::read_to_string(&self.log_file).expect("Failed to read the log file.")
    }

    pub(crate) fn cleanup(self) -> std::io::Result<()> {
        std::fs::remove_file(self.log_file)?;
        std::fs::remove_file(self.err_file)?;

        if self.search_log_file.is_file() {
            std::fs::remove_file(self.search_log_file)?;
        }

        Ok(())
    }
}

pub(crate) fn instance(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("instances")
        .join(name)
}

pub(crate) fn run_solver(instance_path: impl AsRef<Path>) -> Files {
    run_solver_with_options(instance_path, false, std::iter::empty(), None)
}

/// Runs the solver binary on the instance; the output goes to files next to the instance, named
/// after the instance with the optional `prefix` added to the extension.
pub(crate) fn run_solver_with_options(
    instance_path: impl AsRef<Path>,
    with_search_log: bool,
    args: impl IntoIterator<Item = String>,
    prefix: Option<&str>,
) -> Files {
    let args = args.into_iter().collect::<Vec<_>>();

    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let instance_path = instance_path.as_ref();

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_bramble-solver"));

    let add_extension = |extension: &str| -> PathBuf {
        if let Some(prefix) = prefix {
            instance_path.with_extension(format!("{prefix}.{extension}"))
        } else {
            instance_path.with_extension(extension)
        }
    };

    let log_file_path = add_extension("log");
    let err_file_path = add_extension("err");
    let search_log_file_path = add_extension("tree");

    let mut command = Command::new(solver);

    if with_search_log {
        let _ = command.arg("--search-log").arg(&search_log_file_path);
    }

    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let exit_status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    Files {
        instance_file: instance_path.to_path_buf(),
        log_file: log_file_path,
        err_file: err_file_path,
        search_log_file: search_log_file_path,
        exit_status,
    }
}
