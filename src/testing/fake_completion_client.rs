use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{CompletionClient, CompletionClientFactory, CompletionRequest};

#[derive(Clone)]
pub struct FakeCompletionClient {
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub reply: Result<String, String>,
}

impl FakeCompletionClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self { requests: Arc::new(Mutex::new(vec![])), reply: Ok(reply.into()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { requests: Arc::new(Mutex::new(vec![])), reply: Err(message.into()) }
    }

    pub fn received(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .clone()
            .map_err(|message| AppError::CompletionApi { message, status: Some(502) })
    }
}

impl CompletionClientFactory for FakeCompletionClient {
    fn create(&self) -> Result<Box<dyn CompletionClient>, AppError> {
        Ok(Box::new(self.clone()))
    }
}
