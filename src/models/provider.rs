use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One decoded `data:` payload of an OpenAI-compatible chat completion stream
///
/// Every field is optional: `null` and absence decode to the same thing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderChunk {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    /// `None` and an empty array are both "no choices"
    #[serde(default)]
    pub choices: Option<Vec<ProviderChoice>>,

    #[serde(default)]
    pub usage: Option<ProviderUsage>,
}

impl ProviderChunk {
    /// The only choice this crate looks at
    pub fn first_choice(&self) -> Option<&ProviderChoice> {
        self.choices.as_ref().and_then(|choices| choices.first())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderChoice {
    #[serde(default)]
    pub index: Option<u32>,

    #[serde(default)]
    pub delta: Option<ProviderDelta>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderDelta {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    /// Reasoning models (e.g. DeepSeek R1 and Claude thinking on Databricks)
    /// stream their thinking here
    #[serde(default)]
    pub reasoning_content: Option<Value>,

    #[serde(default)]
    pub tool_calls: Option<Vec<ProviderToolCall>>,

    /// Extension bag some gateways attach to the delta verbatim
    #[serde(default)]
    pub provider_specific_fields: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderToolCall {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "type")]
    pub call_type: Option<String>,

    #[serde(default)]
    pub function: Option<ProviderFunction>,

    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderFunction {
    /// Usually only present on the first fragment of a call
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,

    #[serde(default)]
    pub completion_tokens: Option<u32>,

    #[serde(default)]
    pub total_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_decode_like_absence() {
        let chunk: ProviderChunk = serde_json::from_str(
            r#"{"choices":[{"delta":{"content":null,"tool_calls":null},"finish_reason":null}],"usage":null}"#,
        )
        .unwrap();

        let choice = chunk.first_choice().unwrap();
        let delta = choice.delta.as_ref().unwrap();
        assert!(delta.content.is_none());
        assert!(delta.tool_calls.is_none());
        assert!(choice.finish_reason.is_none());
        assert!(chunk.usage.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let chunk: ProviderChunk = serde_json::from_str(
            r#"{"object":"chat.completion.chunk","created":1,"choices":[{"delta":{"content":"x","logprobs":null}}]}"#,
        )
        .unwrap();
        assert_eq!(
            chunk.first_choice().unwrap().delta.as_ref().unwrap().content.as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_empty_object_has_no_choice() {
        let chunk: ProviderChunk = serde_json::from_str("{}").unwrap();
        assert!(chunk.first_choice().is_none());

        let chunk: ProviderChunk = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(chunk.first_choice().is_none());
    }

    #[test]
    fn test_tool_call_type_field() {
        let call: ProviderToolCall = serde_json::from_str(
            r#"{"id":"call_1","type":"function","index":2,"function":{"name":"f","arguments":""}}"#,
        )
        .unwrap();
        assert_eq!(call.call_type.as_deref(), Some("function"));
        assert_eq!(call.index, Some(2));
        assert_eq!(call.function.unwrap().arguments.as_deref(), Some(""));
    }
}
