use crate::ExpansionOutcome;
use crate::ExpansionService;
use crate::ModeHost;
use crate::POINT_MARKER;
use crate::TextBuffer;

/// A host that records every registration call.
#[derive(Debug, Default)]
pub struct RecordingHost {
	pub hooks: usize,
	pub registered: Vec<String>,
	pub unregistered: Vec<String>,
}

impl ModeHost for RecordingHost {
	fn install_hook(&mut self) {
		self.hooks += 1;
	}

	fn remove_hook(&mut self) {
		self.hooks -= 1;
	}

	fn register_trigger(&mut self, trigger: &str) {
		self.registered.push(trigger.to_string());
	}

	fn unregister_trigger(&mut self, trigger: &str) {
		self.unregistered.push(trigger.to_string());
	}
}

/// Build a buffer from text where `|` marks point.
pub fn buffer(input: &str) -> TextBuffer {
	TextBuffer::from_marked(input, POINT_MARKER)
}

/// A service with the default abbreviations, already active.
pub fn active_service() -> ExpansionService {
	let mut service = ExpansionService::default();
	service.activate(&mut RecordingHost::default());
	service
}

/// Type `key` at the end of `text`, which is taken literally.
pub fn type_key_at_end(text: &str, key: char) -> (TextBuffer, ExpansionOutcome) {
	let service = active_service();
	let mut buffer = TextBuffer::from_text(text);
	let outcome = service.self_insert(&mut buffer, key);
	(buffer, outcome)
}

/// Type `key` into the marked `input` with the default abbreviations and
/// return the buffer and the outcome.
pub fn type_key(input: &str, key: char) -> (TextBuffer, ExpansionOutcome) {
	let service = active_service();
	let mut buffer = buffer(input);
	let outcome = service.self_insert(&mut buffer, key);
	(buffer, outcome)
}
