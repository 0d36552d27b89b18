//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning anything.
//! Responses are registered per program + argument list; every invocation
//! is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use appversion::shell::{CommandResult, CommandRunner, CommandSpec, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond("rrdtool", &["--version"], CommandResult::success("RRDtool 1.8.0 ...", ""));
//!
//! let spec = CommandSpec::new("rrdtool").args(["--version"]);
//! let result = runner.run(&spec).unwrap();
//!
//! assert!(result.stdout.starts_with("RRDtool 1.8.0"));
//! assert_eq!(runner.count("rrdtool", &["--version"]), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, VersionError};

use super::command::{CommandResult, CommandRunner, CommandSpec};

type Key = (String, Vec<String>);

/// Command runner returning pre-registered results.
///
/// Multiple responses registered for the same command are returned in
/// order; the last one repeats once the queue is down to it. Commands with
/// no registered response fail to spawn, like a missing binary.
///
/// Meant as a test double; it never spawns a process.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<Key, VecDeque<CommandResult>>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `program args...`.
    pub fn respond(&self, program: &str, args: &[&str], result: CommandResult) {
        let key = (
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        );
        lock(&self.responses)
            .entry(key)
            .or_default()
            .push_back(result);
    }

    /// All invocations so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        lock(&self.calls).clone()
    }

    /// Number of invocations of `program args...`.
    pub fn count(&self, program: &str, args: &[&str]) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|spec| spec.program == program && spec.args == args)
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        lock(&self.calls).push(spec.clone());

        let key = (spec.program.clone(), spec.args.clone());
        let mut responses = lock(&self.responses);
        let queue = responses.get_mut(&key);

        match queue {
            Some(queue) if queue.len() > 1 => {
                Ok(queue.pop_front().unwrap_or_else(CommandResult::not_run))
            }
            Some(queue) if !queue.is_empty() => Ok(queue[0].clone()),
            _ => Err(VersionError::CommandFailed {
                command: spec.display(),
                code: None,
            }),
        }
    }
}

/// Lock `mutex`, taking over the data if a panicking test poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
