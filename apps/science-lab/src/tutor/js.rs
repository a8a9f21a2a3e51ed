use futures::FutureExt;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use super::{ChatRequest, ChatService, PendingReply};
use crate::error::ChatError;

/// Chat service backed by a host JS function.
///
/// The function receives the request as a JSON string
/// (`{system_prompt, history: [{sender, text}]}`) and returns the reply
/// text, or a Promise of it.
pub struct JsChatService {
    send: js_sys::Function,
}

impl JsChatService {
    pub fn new(send: js_sys::Function) -> Self {
        Self { send }
    }
}

fn js_error(value: JsValue) -> ChatError {
    ChatError::Service(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl ChatService for JsChatService {
    fn send_message(&self, request: ChatRequest) -> PendingReply {
        let called = serde_json::to_string(&request)
            .map_err(|e| ChatError::Service(e.to_string()))
            .and_then(|payload| {
                self.send
                    .call1(&JsValue::NULL, &JsValue::from_str(&payload))
                    .map_err(js_error)
            });

        async move {
            // Plain return values resolve immediately.
            let promise = js_sys::Promise::resolve(&called?);
            let reply = JsFuture::from(promise).await.map_err(js_error)?;
            reply
                .as_string()
                .ok_or_else(|| ChatError::MalformedResponse("reply is not a string".into()))
        }
        .boxed_local()
    }
}
