//! Process turn use case.
//!
//! One player input in, one narration out. The sequence is strictly
//! load → roll → prompt → generate → record → save; each step needs the
//! previous one's output.
//!
//! Two concurrent turns for the same session key are not coordinated: both
//! load the same prior state and the later save overwrites the earlier one,
//! dropping its exchange from the history.

use std::sync::Arc;

use duskcrawl_domain::{ContextMessage, DiceRoll, GameState};

use crate::infrastructure::ports::{FinishReason, LlmPort, LlmRequest, RandomPort};
use crate::repositories::GameStateStore;

use super::error::TurnError;
use super::prompt::build_system_prompt;

/// Result of a played turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Narration returned by the model (may be empty)
    pub narration: String,
    /// The roll embedded in this turn's prompt
    pub dice_roll: DiceRoll,
    /// State after the turn, as persisted
    pub state: GameState,
}

/// Process turn use case.
///
/// Orchestrates: state load, dice roll, prompt build, LLM call,
/// context window update, state save.
pub struct ProcessTurn {
    llm: Arc<dyn LlmPort>,
    states: Arc<GameStateStore>,
    random: Arc<dyn RandomPort>,
}

impl ProcessTurn {
    pub fn new(
        llm: Arc<dyn LlmPort>,
        states: Arc<GameStateStore>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            llm,
            states,
            random,
        }
    }

    /// Play one turn for `session_key`.
    ///
    /// # Returns
    /// * `Ok(TurnOutcome)` - Narration generated and state saved
    /// * `Err(TurnError::Generation)` - LLM call failed, nothing was saved
    /// * `Err(TurnError::Persistence)` - Narration generated but the save failed
    pub async fn execute(
        &self,
        session_key: &str,
        player_input: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let turn_id = self.random.gen_uuid();
        tracing::info!(turn_id = %turn_id, session_key = %session_key, "Processing turn");

        let mut state = self.states.load(session_key).await;
        tracing::debug!(
            turn_id = %turn_id,
            health = state.health,
            inventory_len = state.inventory.len(),
            history_len = state.context_window.len(),
            "Loaded game state"
        );

        let dice_roll = DiceRoll::roll(|min, max| self.random.gen_range(min, max))?;
        tracing::debug!(turn_id = %turn_id, dice_roll = %dice_roll, "Rolled dice");

        let mut messages: Vec<ContextMessage> = state.history().cloned().collect();
        messages.push(ContextMessage::user(player_input));
        let request =
            LlmRequest::new(messages).with_system_prompt(build_system_prompt(&state, dice_roll));

        let response = match self.llm.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(turn_id = %turn_id, error = %e, "Error in AI call");
                return Err(TurnError::Generation(e));
            }
        };
        tracing::debug!(
            turn_id = %turn_id,
            narration_len = response.content.len(),
            finish_reason = ?response.finish_reason,
            prompt_tokens = response.usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens = response.usage.as_ref().map(|u| u.completion_tokens),
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "AI response generated"
        );
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(turn_id = %turn_id, "Narration was cut off at the token limit");
        }
        let narration = response.content;

        state.record_exchange(player_input, narration.clone());
        self.states.save(session_key, &state).await?;
        tracing::info!(turn_id = %turn_id, session_key = %session_key, "Turn saved");

        Ok(TurnOutcome {
            narration,
            dice_roll,
            state,
        })
    }
}
