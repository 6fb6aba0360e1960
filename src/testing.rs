//! Test Doubles
//!
//! An in-memory [`Bridge`] that answers from scripted responses and records
//! every call in order.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use serde_json::Value;

use crate::commands::{Api, Bridge};
use crate::errors::BackendError;

type Reply = Result<Value, BackendError>;

#[derive(Default)]
pub struct FakeBridge {
    queued: RefCell<HashMap<String, VecDeque<Reply>>>,
    sticky: RefCell<HashMap<String, Reply>>,
    calls: RefCell<Vec<(String, Value)>>,
    hook: RefCell<Option<Box<dyn Fn(&str)>>>,
}

impl FakeBridge {
    /// Answer every call to `cmd` with `value`
    pub fn respond(&self, cmd: &str, value: impl Serialize) -> &Self {
        let value = serde_json::to_value(value).expect("serializable response");
        self.sticky.borrow_mut().insert(cmd.to_string(), Ok(value));
        self
    }

    /// Answer the next call to `cmd` with `value`, ahead of any sticky response
    pub fn respond_once(&self, cmd: &str, value: impl Serialize) -> &Self {
        let value = serde_json::to_value(value).expect("serializable response");
        self.queued.borrow_mut().entry(cmd.to_string()).or_default().push_back(Ok(value));
        self
    }

    /// Reject every call to `cmd` with `message`
    pub fn reject(&self, cmd: &str, message: &str) -> &Self {
        self.sticky
            .borrow_mut()
            .insert(cmd.to_string(), Err(BackendError::Rejected(message.to_string())));
        self
    }

    /// Run `f` with the command name before each call is answered
    pub fn on_call(&self, f: impl Fn(&str) + 'static) {
        *self.hook.borrow_mut() = Some(Box::new(f));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn command_names(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(cmd, _)| cmd.clone()).collect()
    }

    pub fn count(&self, cmd: &str) -> usize {
        self.calls.borrow().iter().filter(|(c, _)| c == cmd).count()
    }

    /// Arguments of every call to `cmd`, oldest first
    pub fn args_of(&self, cmd: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(c, _)| c == cmd)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

impl Bridge for FakeBridge {
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, BackendError> {
        self.calls.borrow_mut().push((cmd.to_string(), args));
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(cmd);
        }
        if let Some(reply) = self.queued.borrow_mut().get_mut(cmd).and_then(|q| q.pop_front()) {
            return reply;
        }
        self.sticky
            .borrow()
            .get(cmd)
            .cloned()
            .unwrap_or_else(|| Err(BackendError::Rejected(format!("no response scripted for {}", cmd))))
    }
}

pub fn fake_api() -> Api<FakeBridge> {
    Api::new(FakeBridge::default())
}
