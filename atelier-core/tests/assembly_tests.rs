//! Tests for request assembly from text and attachments

use atelier_core::media::{Attachment, MediaKind};
use atelier_core::protocol::{
    build_content, ContentPart, Conversation, Message, MessageContent, MessageRole,
};
use serde_json::json;

fn image_attachment() -> Attachment {
    Attachment::from_data_url(MediaKind::Image, "data:image/png;base64,AAAA")
}

fn audio_attachment() -> Attachment {
    Attachment::from_data_url(MediaKind::Audio, "data:audio/wav;base64,QUJD")
}

#[test]
fn text_without_media_stays_a_plain_string() {
    let content = build_content("hello", &[]);
    assert_eq!(content, MessageContent::Text("hello".to_string()));
}

#[test]
fn empty_text_without_media_stays_a_plain_string() {
    let content = build_content("", &[]);
    assert_eq!(content, MessageContent::Text(String::new()));
}

#[test]
fn empty_text_with_image_yields_one_part() {
    let content = build_content("", &[image_attachment()]);
    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!([
            {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
        ])
    );
}

#[test]
fn audio_data_url_is_split_into_payload_and_format() {
    let content = build_content("", &[audio_attachment()]);
    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!([
            {"type": "input_audio", "input_audio": {"data": "QUJD", "format": "wav"}}
        ])
    );
}

#[test]
fn parts_keep_attachment_order_with_text_first() {
    let content = build_content("describe", &[image_attachment(), audio_attachment()]);
    let MessageContent::Parts(parts) = content else {
        panic!("Expected parts content");
    };

    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[0], ContentPart::Text { text } if text == "describe"));
    assert!(matches!(&parts[1], ContentPart::ImageUrl { .. }));
    assert!(matches!(&parts[2], ContentPart::InputAudio { .. }));
}

#[test]
fn malformed_audio_url_drops_the_part_silently() {
    // A remote URL is not inline base64 audio; the part is omitted, the
    // rest of the message survives.
    let remote = Attachment::from_data_url(MediaKind::Audio, "https://cdn.example/clip.wav");
    let content = build_content("listen", &[remote, image_attachment()]);

    let MessageContent::Parts(parts) = content else {
        panic!("Expected parts content");
    };
    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[0], ContentPart::Text { .. }));
    assert!(matches!(&parts[1], ContentPart::ImageUrl { .. }));
}

#[test]
fn video_is_sent_as_an_image_reference() {
    let video = Attachment::from_data_url(MediaKind::Video, "data:video/mp4;base64,BBBB");
    let content = build_content("", &[video]);
    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!([
            {"type": "image_url", "image_url": {"url": "data:video/mp4;base64,BBBB"}}
        ])
    );
}

#[test]
fn conversation_prepends_system_prompt_and_appends_current_input() {
    let mut conversation = Conversation::new().with_system_prompt("Be terse.");
    conversation.push_user("hi", vec![]);
    conversation.push_assistant("hello");

    let messages = conversation.request_messages("what now", &[]);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], Message::system("Be terse."));
    assert_eq!(messages[1], Message::user("hi"));
    assert_eq!(messages[2], Message::assistant("hello"));
    assert_eq!(messages[3], Message::user("what now"));
}

#[test]
fn conversation_skips_empty_system_prompt() {
    let conversation = Conversation::new().with_system_prompt("");
    let messages = conversation.request_messages("hi", &[]);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::User);
}

#[test]
fn conversation_windows_history_to_most_recent_turns() {
    let mut conversation = Conversation::new().with_history_window(4);
    for i in 0..6 {
        conversation.push_user(format!("question {}", i), vec![]);
        conversation.push_assistant(format!("answer {}", i));
    }

    let messages = conversation.request_messages("final", &[]);
    // 4 windowed turns plus the new input; no system prompt configured.
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].content.as_text(), Some("question 4"));
    assert_eq!(messages[3].content.as_text(), Some("answer 5"));
    assert_eq!(messages[4].content.as_text(), Some("final"));
}

#[test]
fn conversation_reassembles_user_turns_with_attachments() {
    let mut conversation = Conversation::new();
    conversation.push_user("look", vec![image_attachment()]);
    conversation.push_assistant("a png");

    let messages = conversation.request_messages("and this", &[audio_attachment()]);
    assert_eq!(messages.len(), 3);

    let MessageContent::Parts(parts) = &messages[0].content else {
        panic!("Expected the prior user turn to be multimodal");
    };
    assert_eq!(parts.len(), 2);

    let MessageContent::Parts(parts) = &messages[2].content else {
        panic!("Expected the current input to be multimodal");
    };
    assert!(matches!(&parts[0], ContentPart::Text { .. }));
    assert!(matches!(&parts[1], ContentPart::InputAudio { .. }));
}

#[test]
fn conversation_clear_keeps_system_prompt() {
    let mut conversation = Conversation::new().with_system_prompt("Be terse.");
    conversation.push_user("hi", vec![]);
    conversation.clear();

    assert!(conversation.is_empty());
    let messages = conversation.request_messages("again", &[]);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::System);
}
