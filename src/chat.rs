use crate::error::AppError;
use crate::models::{ChatMessage, ChatRole, CostPoint, ServicePoint, UsageRow};
use async_trait::async_trait;
use serde::Serialize;

/// Opening assistant message shown before the first question.
pub const GREETING: &str = "Hello! I can help you analyze cloud costs and provide \
optimization recommendations. What would you like to know?";

/// Assistant-visible reply appended when the chat backend cannot be reached.
pub const UNREACHABLE_REPLY: &str =
    "I was unable to reach the analysis service. Please try again in a moment.";

/// Snapshot of the visible dataset bundled into every outbound question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext<'a> {
    pub cost_data: &'a [CostPoint],
    pub aws_service_data: &'a [ServicePoint],
    pub api_usage: &'a [UsageRow],
}

/// Transport seam for the chat endpoint, mockable in tests.
#[async_trait]
pub trait ChatTransport {
    async fn send(&self, payload: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Append-only transcript plus the request/response cycle around it.
///
/// The transcript is only ever appended to, strictly in call order: the user
/// message lands synchronously on submit, the assistant reply (or failure
/// notice) after the transport resolves. A second submission while one is
/// outstanding is rejected, so replies cannot interleave.
#[derive(Debug, Clone)]
pub struct ChatOrchestrator {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
}

impl Default for ChatOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatOrchestrator {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                content: GREETING.to_string(),
            }],
            phase: ChatPhase::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == ChatPhase::AwaitingResponse
    }

    /// Start a submission. Returns the outbound payload, or `None` when the
    /// trimmed question is empty or another request is still in flight; in
    /// both cases the transcript is left untouched.
    pub fn begin_submit(&mut self, question: &str, ctx: &ChatContext<'_>) -> Option<String> {
        let question = question.trim();
        if question.is_empty() || self.phase == ChatPhase::AwaitingResponse {
            return None;
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: question.to_string(),
        });
        self.phase = ChatPhase::AwaitingResponse;
        Some(Self::payload(question, ctx))
    }

    /// Record a successful reply and return to idle.
    pub fn complete(&mut self, reply: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply,
        });
        self.phase = ChatPhase::Idle;
    }

    /// Record a transport failure as a visible assistant message. The
    /// transcript never goes silently unresponsive.
    pub fn fail(&mut self) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: UNREACHABLE_REPLY.to_string(),
        });
        self.phase = ChatPhase::Idle;
    }

    /// Run one full submit cycle against a transport. Used by the one-shot
    /// CLI path; the TUI drives `begin_submit`/`complete`/`fail` itself so
    /// the reply can land on a later tick.
    pub async fn submit<T: ChatTransport + ?Sized>(
        &mut self,
        transport: &T,
        question: &str,
        ctx: &ChatContext<'_>,
    ) -> bool {
        let Some(payload) = self.begin_submit(question, ctx) else {
            return false;
        };

        match transport.send(&payload).await {
            Ok(reply) => self.complete(reply),
            Err(_) => self.fail(),
        }
        true
    }

    fn payload(question: &str, ctx: &ChatContext<'_>) -> String {
        // The context rides inside the question string itself; the backend
        // receives a single flat payload.
        let context_json =
            serde_json::to_string(ctx).unwrap_or_else(|_| "{}".to_string());
        format!("{question}\n\nDashboard context: {context_json}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn empty_ctx() -> ChatContext<'static> {
        ChatContext {
            cost_data: &[],
            aws_service_data: &[],
            api_usage: &[],
        }
    }

    struct CannedTransport {
        reply: Result<String, ()>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for CannedTransport {
        async fn send(&self, payload: &str) -> Result<String, AppError> {
            self.seen.lock().expect("lock").push(payload.to_string());
            self.reply
                .clone()
                .map_err(|_| AppError::Config("unreachable".into()))
        }
    }

    #[test]
    fn starts_with_greeting() {
        let chat = ChatOrchestrator::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, ChatRole::Assistant);
        assert_eq!(chat.messages()[0].content, GREETING);
    }

    #[test]
    fn empty_and_whitespace_questions_are_ignored() {
        let mut chat = ChatOrchestrator::new();
        assert!(chat.begin_submit("", &empty_ctx()).is_none());
        assert!(chat.begin_submit("   ", &empty_ctx()).is_none());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.phase(), ChatPhase::Idle);
    }

    #[test]
    fn begin_submit_appends_user_message_and_embeds_context() {
        let mut chat = ChatOrchestrator::new();
        let cost = vec![CostPoint {
            timestamp: "d1".into(),
            aws: 1.0,
            gcp: 2.0,
            azure: 3.0,
            utilization: 50.0,
        }];
        let ctx = ChatContext {
            cost_data: &cost,
            aws_service_data: &[],
            api_usage: &[],
        };

        let payload = chat.begin_submit("  why so costly?  ", &ctx).expect("payload");
        assert!(payload.starts_with("why so costly?"));
        assert!(payload.contains("\"costData\""));
        assert!(payload.contains("\"awsServiceData\""));
        assert!(payload.contains("\"apiUsage\""));

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].role, ChatRole::User);
        assert_eq!(chat.messages()[1].content, "why so costly?");
        assert!(chat.is_awaiting());
    }

    #[test]
    fn second_submission_is_rejected_while_awaiting() {
        let mut chat = ChatOrchestrator::new();
        chat.begin_submit("first", &empty_ctx()).expect("payload");
        assert!(chat.begin_submit("second", &empty_ctx()).is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[tokio::test]
    async fn submit_appends_user_then_assistant_in_order() {
        let transport = CannedTransport::ok("spend less");
        let mut chat = ChatOrchestrator::new();

        assert!(chat.submit(&transport, "hello", &empty_ctx()).await);

        let roles: Vec<ChatRole> = chat.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
        );
        assert_eq!(chat.messages()[2].content, "spend less");
        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert_eq!(transport.seen.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_assistant_message() {
        let transport = CannedTransport::failing();
        let mut chat = ChatOrchestrator::new();

        assert!(chat.submit(&transport, "hello", &empty_ctx()).await);

        let last = chat.messages().last().expect("messages");
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, UNREACHABLE_REPLY);
        assert_eq!(chat.phase(), ChatPhase::Idle);
    }

    #[tokio::test]
    async fn submit_with_blank_question_is_a_no_op() {
        let transport = CannedTransport::ok("ignored");
        let mut chat = ChatOrchestrator::new();

        assert!(!chat.submit(&transport, "  ", &empty_ctx()).await);
        assert_eq!(chat.messages().len(), 1);
        assert!(transport.seen.lock().expect("lock").is_empty());
    }
}
