//! TwiML response documents.
//!
//! The reply to an inbound Twilio webhook is an XML document with one
//! `<Message>` element per outbound message. Uses `quick-xml`'s writer API;
//! writing into an in-memory cursor cannot fail.

use std::io::Cursor;

use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

/// Separator used when the cost optimizer folds segments into one message.
const SEGMENT_SEPARATOR: &str = "\n\n";

/// An outbound messaging response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingResponse {
  messages: Vec<String>,
}

impl MessagingResponse {
  /// Build a response from reply segments. With `cost_optimizer` set, all
  /// segments are concatenated into a single outbound message to reduce
  /// transport cost.
  pub fn new(segments: Vec<String>, cost_optimizer: bool) -> Self {
    let messages = if cost_optimizer && !segments.is_empty() {
      vec![segments.join(SEGMENT_SEPARATOR)]
    } else {
      segments
    };
    Self { messages }
  }

  /// Serialise to the XML document the transport expects.
  pub fn to_xml(&self) -> String {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
      .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
      .unwrap();
    writer
      .write_event(Event::Start(BytesStart::new("Response")))
      .unwrap();

    for message in &self.messages {
      writer
        .write_event(Event::Start(BytesStart::new("Message")))
        .unwrap();
      writer
        .write_event(Event::Text(BytesText::new(message)))
        .unwrap();
      writer
        .write_event(Event::End(BytesEnd::new("Message")))
        .unwrap();
    }

    writer
      .write_event(Event::End(BytesEnd::new("Response")))
      .unwrap();

    String::from_utf8(writer.into_inner().into_inner())
      .expect("writer emits UTF-8")
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
