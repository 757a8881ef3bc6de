use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::commands::{ConnectCommand, PathPrompt};
use crate::host::HostShell;
use crate::tree::TreeProvider;

/// Host shell of the terminal binary: keeps whatever gets registered.
#[derive(Default)]
pub struct TerminalShell {
    command: Option<Rc<ConnectCommand>>,
    provider: Option<Rc<TreeProvider>>,
}

impl TerminalShell {
    pub fn command(&self) -> Option<Rc<ConnectCommand>> {
        self.command.clone()
    }

    pub fn provider(&self) -> Option<Rc<TreeProvider>> {
        self.provider.clone()
    }
}

impl HostShell for TerminalShell {
    fn register_command(&mut self, command_id: &'static str, command: Rc<ConnectCommand>) {
        debug!("Registering command '{}'", command_id);
        self.command = Some(command);
    }

    fn register_tree_data_provider(&mut self, view_id: &'static str, provider: Rc<TreeProvider>) {
        debug!("Registering tree view '{}'", view_id);
        self.provider = Some(provider);
    }
}

/// Answers connect prompts with the base paths given on the command line.
pub struct ArgumentPrompt {
    answers: RefCell<VecDeque<String>>,
}

impl ArgumentPrompt {
    pub fn new(answers: impl IntoIterator<Item = String>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl PathPrompt for ArgumentPrompt {
    fn prompt_base_path(&self) -> LocalBoxFuture<'_, Option<String>> {
        let answer = self.answers.borrow_mut().pop_front();
        futures::future::ready(answer).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_answers_in_order_then_dismisses() {
        let prompt = ArgumentPrompt::new(["/a".to_string(), "b".to_string()]);

        futures::executor::block_on(async {
            assert_eq!(prompt.prompt_base_path().await.as_deref(), Some("/a"));
            assert_eq!(prompt.remaining(), 1);
            assert_eq!(prompt.prompt_base_path().await.as_deref(), Some("b"));
            assert_eq!(prompt.prompt_base_path().await, None);
        });
    }

    #[test]
    fn empty_shell_has_nothing_registered() {
        let shell = TerminalShell::default();

        assert!(shell.command().is_none());
        assert!(shell.provider().is_none());
    }
}
