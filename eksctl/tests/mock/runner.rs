use eksctl_provider::{EksctlCommand, Error, Run};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::sync::Mutex;

/// Answers `eksctl` subcommands with canned output and records every command it is given.
///
/// `utils write-kubeconfig` is answered unless it was made to fail; it writes a small file at the
/// `--kubeconfig` path the way `eksctl` would. Failing subcommands report a spawn error.
#[derive(Debug, Default)]
pub(crate) struct MockRunner {
    outputs: HashMap<String, String>,
    failures: HashSet<String>,
    commands: Mutex<Vec<EksctlCommand>>,
}

impl MockRunner {
    pub(crate) fn with_output<S1, S2>(mut self, subcommand: S1, output: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.outputs.insert(subcommand.into(), output.into());
        self
    }

    pub(crate) fn with_failure<S: Into<String>>(mut self, subcommand: S) -> Self {
        self.failures.insert(subcommand.into());
        self
    }

    pub(crate) fn commands(&self) -> Vec<EksctlCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn subcommands(&self) -> Vec<String> {
        self.commands()
            .iter()
            .map(EksctlCommand::subcommand)
            .collect()
    }
}

impl Run for MockRunner {
    fn run(&self, command: &EksctlCommand) -> Result<String, Error> {
        self.commands.lock().unwrap().push(command.clone());
        let subcommand = command.subcommand();
        if self.failures.contains(&subcommand) {
            return Err(Error::CommandSpawn {
                command: command.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "eksctl: not found"),
            });
        }
        if subcommand == "utils write-kubeconfig" {
            let args = command.get_args();
            let path = args
                .iter()
                .position(|arg| arg == "--kubeconfig")
                .and_then(|i| args.get(i + 1))
                .expect("write-kubeconfig without --kubeconfig");
            fs::write(path, "apiVersion: v1\nkind: Config\n").unwrap();
            return Ok(String::new());
        }
        Ok(self
            .outputs
            .get(&subcommand)
            .unwrap_or_else(|| panic!("unexpected command '{}'", command))
            .clone())
    }
}

/// Lets a test hand the runner to a `Manager` and still inspect the recorded commands.
impl Run for &MockRunner {
    fn run(&self, command: &EksctlCommand) -> Result<String, Error> {
        (*self).run(command)
    }
}
