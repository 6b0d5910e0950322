//! Mock providers and project fixtures for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use clapper_config::PipelineConfig;
use clapper_core::ProjectLayout;
use clapper_error::{ClapperResult, GeminiError, GeminiErrorKind, OpenAiError, OpenAiErrorKind};
use clapper_interface::{
    ChatRequest, ChatResponse, TextGenerator, TokenUsage, VideoArtifact, VideoGenerator,
    VideoRequest,
};
use clapper_pipeline::Project;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Project rooted at `dir` with bundled configuration and no batch delay.
pub fn project(dir: &Path) -> Project {
    let mut config = PipelineConfig::bundled().expect("bundled config");
    config.generation.batch_delay_secs = 0;
    Project::new(ProjectLayout::new(dir), config)
}

/// How a mock responds.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed
    Success,
    /// Always fail
    Error,
    /// Fail this many times, then succeed
    FailThenSucceed(usize),
}

/// Video generator returning fixed bytes and recording requests.
#[derive(Clone)]
pub struct MockVideoGenerator {
    behavior: MockBehavior,
    bytes: Vec<u8>,
    calls: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<VideoRequest>>>,
}

impl MockVideoGenerator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            bytes: b"mock mp4 bytes".to_vec(),
            calls: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn success() -> Self {
        Self::new(MockBehavior::Success)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Error)
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<VideoRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl VideoGenerator for MockVideoGenerator {
    async fn generate_video(&self, request: &VideoRequest) -> ClapperResult<VideoArtifact> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.requests.lock().unwrap().push(request.clone());

        let fail = match self.behavior {
            MockBehavior::Success => false,
            MockBehavior::Error => true,
            MockBehavior::FailThenSucceed(n) => call <= n,
        };
        if fail {
            return Err(GeminiError::new(GeminiErrorKind::OperationFailed(
                "mock failure".to_string(),
            ))
            .into());
        }
        Ok(VideoArtifact::mp4(
            self.bytes.clone(),
            Some(format!("operations/mock-{call}")),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "veo-3.0-generate-preview"
    }
}

/// Chat model replaying scripted responses; the last one repeats.
#[derive(Clone)]
pub struct MockTextGenerator {
    responses: Vec<String>,
    fail: bool,
    calls: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockTextGenerator {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|r| r.to_string()).collect(),
            fail: false,
            calls: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn chat(&self, request: &ChatRequest) -> ClapperResult<ChatResponse> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.requests.lock().unwrap().push(request.clone());

        if self.fail {
            return Err(OpenAiError::new(OpenAiErrorKind::Api {
                status: 401,
                message: "mock auth failure".to_string(),
            })
            .into());
        }
        let content = self
            .responses
            .get(call - 1)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or_default();
        Ok(ChatResponse {
            content,
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 50,
            },
            model: "gpt-4o-mini".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "gpt-4o-mini"
    }
}
