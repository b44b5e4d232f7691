//! DingTalk robot message types

use serde::{Deserialize, Serialize};

/// Optional mention targets for one message.
#[derive(Debug, Clone, Default)]
pub struct Mention {
    pub user_ids: Vec<String>,
    pub mobiles: Vec<String>,
    pub at_all: bool,
}

/// Wire shape of one markdown robot message.
#[derive(Debug, Clone, Serialize)]
pub struct RobotMessage {
    pub at: At,
    pub markdown: MarkdownBody,
    pub msgtype: String,
}

/// The `at` block. `isAtAll` is a lowercase boolean rendered as a string,
/// which is what the robot endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct At {
    #[serde(rename = "isAtAll")]
    pub is_at_all: String,
    #[serde(rename = "atUserIds")]
    pub at_user_ids: Vec<String>,
    #[serde(rename = "atMobiles")]
    pub at_mobiles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkdownBody {
    pub title: String,
    pub text: String,
}

impl RobotMessage {
    pub fn markdown(title: String, text: String, mention: &Mention) -> Self {
        Self {
            at: At {
                is_at_all: mention.at_all.to_string(),
                at_user_ids: mention.user_ids.clone(),
                at_mobiles: mention.mobiles.clone(),
            },
            markdown: MarkdownBody { title, text },
            msgtype: "markdown".to_string(),
        }
    }
}

/// Response body returned by the robot endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotResponse {
    pub errcode: i64,
    pub errmsg: String,
}

impl RobotResponse {
    pub fn is_ok(&self) -> bool {
        self.errcode == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let mention = Mention {
            user_ids: vec!["u1".to_string()],
            mobiles: vec!["13800000000".to_string()],
            at_all: false,
        };
        let message = RobotMessage::markdown(
            "JIRA REPORT".to_string(),
            "**body**".to_string(),
            &mention,
        );

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["msgtype"], "markdown");
        assert_eq!(value["markdown"]["title"], "JIRA REPORT");
        assert_eq!(value["markdown"]["text"], "**body**");
        // String "false", not a JSON boolean.
        assert_eq!(value["at"]["isAtAll"], "false");
        assert_eq!(value["at"]["atUserIds"][0], "u1");
        assert_eq!(value["at"]["atMobiles"][0], "13800000000");
    }

    #[test]
    fn test_at_all_renders_as_string_true() {
        let mention = Mention {
            at_all: true,
            ..Mention::default()
        };
        let message =
            RobotMessage::markdown("t".to_string(), "x".to_string(), &mention);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["at"]["isAtAll"], "true");
    }

    #[test]
    fn test_response_ok_flag() {
        let ok: RobotResponse = serde_json::from_str(r#"{"errcode":0,"errmsg":"ok"}"#).unwrap();
        assert!(ok.is_ok());

        let rejected: RobotResponse =
            serde_json::from_str(r#"{"errcode":310000,"errmsg":"keywords not in content"}"#)
                .unwrap();
        assert!(!rejected.is_ok());
    }
}
