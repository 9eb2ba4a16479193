//! Command queue execution.
//!
//! Commands run first in, first out. Each [`ScriptRunner::step`] executes one
//! command, so a host can pace a script one command per frame.

use std::collections::VecDeque;

use tracing::info;

use crate::command::Command;
use crate::context::GameContext;

/// Runs a loaded script against a [`GameContext`].
#[derive(Debug)]
pub struct ScriptRunner {
    queue: VecDeque<Box<dyn Command>>,
    context: GameContext,
    executed: usize,
    completed: bool,
}

impl ScriptRunner {
    /// Queue `commands` against an empty stage.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self::with_context(commands, GameContext::new())
    }

    /// Queue `commands` against an existing stage.
    pub fn with_context(commands: Vec<Box<dyn Command>>, context: GameContext) -> Self {
        Self {
            queue: commands.into(),
            context,
            executed: 0,
            completed: false,
        }
    }

    /// Commands still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Commands executed so far.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Whether the queue is drained.
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// The stage.
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Take the stage back.
    pub fn into_context(self) -> GameContext {
        self.context
    }

    /// Execute the next command. Returns `false` once the queue is empty;
    /// the first such call logs completion.
    pub fn step(&mut self) -> bool {
        match self.queue.pop_front() {
            Some(command) => {
                info!(command = command.name(), "executing_command");
                command.execute(&mut self.context);
                self.executed += 1;
                true
            }
            None => {
                if !self.completed {
                    self.completed = true;
                    info!(executed = self.executed, "execution_complete");
                }
                false
            }
        }
    }

    /// Execute everything left. Returns how many commands ran in this call.
    pub fn run(&mut self) -> usize {
        let before = self.executed;
        while self.step() {}
        self.executed - before
    }
}
