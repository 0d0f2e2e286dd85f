use std::sync::Mutex;

use super::Recommender;
use crate::envelope::{ItemId, Message};
use crate::utils::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Update(Option<ItemId>),
    Recommend(Option<ItemId>),
    Impression(Option<ItemId>),
    Click(Option<ItemId>),
}

/// Engine double that records every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<Call>>,
    recommendations: Vec<ItemId>,
    fail: bool,
}

impl RecordingEngine {
    pub fn recommending(items: Vec<ItemId>) -> Self {
        Self {
            recommendations: items,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(EngineError::Internal("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Recommender for RecordingEngine {
    fn update(&self, message: &Message) -> Result<(), EngineError> {
        self.record(Call::Update(message.item_id()))
    }

    fn recommend(&self, message: &Message) -> Result<Vec<ItemId>, EngineError> {
        self.record(Call::Recommend(message.item_id()))?;
        Ok(self.recommendations.clone())
    }

    fn impression(&self, message: &Message) -> Result<(), EngineError> {
        self.record(Call::Impression(message.item_id()))
    }

    fn click(&self, message: &Message) -> Result<(), EngineError> {
        self.record(Call::Click(message.item_id()))
    }
}
