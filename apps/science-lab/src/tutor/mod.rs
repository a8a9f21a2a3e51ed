//! AI tutor chat.
//!
//! A [`TutorSession`] owns the conversation log and talks to a
//! [`ChatService`]. Sending is split into [`TutorSession::submit`] and
//! [`TutorSession::complete`] so the wasm layer can await the reply without
//! holding a borrow of the session.

#[cfg(feature = "gemini")]
pub mod gemini;
pub mod js;

#[cfg(feature = "gemini")]
pub use gemini::GeminiService;
pub use js::JsChatService;

use std::rc::Rc;
use futures::future::LocalBoxFuture;
use serde::Serialize;
use crate::error::ChatError;

/// Persona fixed for every session.
pub const SYSTEM_PROMPT: &str = "You are a friendly science tutor inside an interactive learning lab. \
Only help with the lab's five topics: Ohm's law and simple circuits, electromagnetic waves, \
the solar system, the structure of DNA, and the neon atom. Give short, clear explanations \
suitable for a secondary school student. If asked about anything else, politely steer the \
conversation back to these topics.";

/// Shown as the assistant turn when the service fails.
pub const ERROR_REPLY: &str = "Sorry, I couldn't reach the tutor right now. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

/// Everything a service needs to produce the next reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub system_prompt: String,
    /// Full log, ending with the user turn being answered.
    pub history: Vec<ChatTurn>,
}

/// Reply text once the service answers.
pub type PendingReply = LocalBoxFuture<'static, Result<String, ChatError>>;

/// The boundary to whatever model produces replies.
pub trait ChatService {
    fn send_message(&self, request: ChatRequest) -> PendingReply;
}

pub struct TutorSession {
    service: Rc<dyn ChatService>,
    system_prompt: String,
    turns: Vec<ChatTurn>,
    busy: bool,
}

impl TutorSession {
    pub fn new(service: Rc<dyn ChatService>) -> Self {
        Self {
            service,
            system_prompt: SYSTEM_PROMPT.to_string(),
            turns: Vec::new(),
            busy: false,
        }
    }

    /// Append the user turn and start the request.
    ///
    /// Rejected while a reply is outstanding; the caller must pass the
    /// eventual result to [`complete`](Self::complete).
    pub fn submit(&mut self, prompt: &str) -> Result<PendingReply, ChatError> {
        if self.busy {
            return Err(ChatError::Busy);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        self.turns.push(ChatTurn {
            sender: Sender::User,
            text: prompt.to_string(),
        });
        self.busy = true;

        Ok(self.service.send_message(ChatRequest {
            system_prompt: self.system_prompt.clone(),
            history: self.turns.clone(),
        }))
    }

    /// Record the reply (or the error message) and accept input again.
    pub fn complete(&mut self, result: Result<String, ChatError>) -> &ChatTurn {
        let text = match result {
            Ok(text) => text,
            Err(err) => {
                log::warn!("tutor: {}", err);
                ERROR_REPLY.to_string()
            }
        };
        self.busy = false;
        self.turns.push(ChatTurn {
            sender: Sender::Assistant,
            text,
        });
        &self.turns[self.turns.len() - 1]
    }

    pub async fn send(&mut self, prompt: &str) -> Result<&ChatTurn, ChatError> {
        let pending = self.submit(prompt)?;
        let result = pending.await;
        Ok(self.complete(result))
    }

    /// Question asked when the student clicks an object in a 3D model.
    pub fn prompt_for_pick(name: &str, model_title: &str) -> String {
        format!(
            "I just clicked on the \"{name}\" in the {model_title} model. \
             What is it, and what role does it play?"
        )
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use futures::executor::block_on;
    use futures::FutureExt;

    /// Replies from a fixed script and records every request.
    #[derive(Default)]
    struct Scripted {
        replies: RefCell<VecDeque<Result<String, ChatError>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl Scripted {
        fn with(replies: Vec<Result<String, ChatError>>) -> Rc<Self> {
            Rc::new(Self {
                replies: RefCell::new(replies.into()),
                requests: RefCell::default(),
            })
        }
    }

    impl ChatService for Scripted {
        fn send_message(&self, request: ChatRequest) -> PendingReply {
            self.requests.borrow_mut().push(request);
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ChatError::Service("script exhausted".into())));
            futures::future::ready(reply).boxed_local()
        }
    }

    #[test]
    fn send_appends_both_turns_in_order() {
        let service = Scripted::with(vec![Ok("Electrons orbit the nucleus.".into())]);
        let mut session = TutorSession::new(service.clone());

        let reply = block_on(session.send("What is an electron?")).unwrap();
        assert_eq!(reply.text, "Electrons orbit the nucleus.");

        let turns = session.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].sender, Sender::User);
        assert_eq!(turns[0].text, "What is an electron?");
        assert_eq!(turns[1].sender, Sender::Assistant);
        assert!(!session.is_busy());

        let requests = service.requests.borrow();
        assert_eq!(requests[0].system_prompt, SYSTEM_PROMPT);
        assert_eq!(requests[0].history.len(), 1);
    }

    #[test]
    fn failure_becomes_an_error_turn_and_session_continues() {
        let service = Scripted::with(vec![
            Err(ChatError::Service("HTTP 503".into())),
            Ok("Ohm's law relates V, I and R.".into()),
        ]);
        let mut session = TutorSession::new(service.clone());

        assert_eq!(block_on(session.send("hello")).unwrap().text, ERROR_REPLY);
        assert!(!session.is_busy());

        block_on(session.send("Explain Ohm's law")).unwrap();
        assert_eq!(session.turns().len(), 4);
        // The second request carries the whole log so far.
        assert_eq!(service.requests.borrow()[1].history.len(), 3);
    }

    #[test]
    fn only_one_request_in_flight() {
        let service = Scripted::with(vec![Ok("first".into())]);
        let mut session = TutorSession::new(service);

        let pending = session.submit("one").unwrap();
        assert!(session.is_busy());
        assert!(matches!(session.submit("two"), Err(ChatError::Busy)));
        assert_eq!(session.turns().len(), 1);

        let result = block_on(pending);
        session.complete(result);
        assert!(!session.is_busy());
        assert!(session.submit("two").is_ok());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let mut session = TutorSession::new(Scripted::with(vec![]));
        assert!(matches!(session.submit("   "), Err(ChatError::EmptyPrompt)));
        assert!(session.turns().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn pick_prompt_names_object_and_model() {
        let prompt = TutorSession::prompt_for_pick("Saturn's Rings", "Solar System");
        assert!(prompt.contains("\"Saturn's Rings\""));
        assert!(prompt.contains("Solar System model"));
    }

    #[test]
    fn history_serializes_lowercase_senders() {
        let mut session = TutorSession::new(Scripted::with(vec![Ok("hi".into())]));
        block_on(session.send("hey")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&session.history_json().unwrap()).unwrap();
        assert_eq!(json[0]["sender"], "user");
        assert_eq!(json[1]["sender"], "assistant");
    }
}
