use crate::AbbrevTable;
use crate::EditorContext;
use crate::ExpansionEngine;
use crate::ExpansionOutcome;
use crate::Rejection;
use crate::Template;
use crate::default_abbrevs;

/// The host-side registration points the expansion feature plugs into.
pub trait ModeHost {
	/// Attach the expansion hook to buffers of the target language.
	fn install_hook(&mut self);

	/// Detach the expansion hook.
	fn remove_hook(&mut self);

	/// Make `trigger` known to the host's abbreviation machinery.
	fn register_trigger(&mut self, trigger: &str);

	/// Forget a single trigger.
	fn unregister_trigger(&mut self, trigger: &str);
}

/// A host with no registration side effects, for driving the service
/// directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl ModeHost for DetachedHost {
	fn install_hook(&mut self) {}

	fn remove_hook(&mut self) {}

	fn register_trigger(&mut self, _trigger: &str) {}

	fn unregister_trigger(&mut self, _trigger: &str) {}
}

/// Owns the abbreviation table and the activation state of the feature.
#[derive(Debug, Clone)]
pub struct ExpansionService {
	defaults: Vec<(String, Template)>,
	table: AbbrevTable,
	engine: ExpansionEngine,
	active: bool,
}

impl Default for ExpansionService {
	fn default() -> Self {
		Self::new(default_abbrevs())
	}
}

impl ExpansionService {
	/// Create an inactive service which loads `defaults`, in order, when
	/// activated.
	pub fn new<I, T>(defaults: I) -> Self
	where
		I: IntoIterator<Item = (T, Template)>,
		T: Into<String>,
	{
		Self {
			defaults: defaults
				.into_iter()
				.map(|(trigger, template)| (trigger.into(), template))
				.collect(),
			table: AbbrevTable::new(),
			engine: ExpansionEngine::new(),
			active: false,
		}
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn table(&self) -> &AbbrevTable {
		&self.table
	}

	pub fn engine(&self) -> &ExpansionEngine {
		&self.engine
	}

	/// Install the feature. The table is built in full before it replaces the
	/// live one, so a lookup never observes a partially loaded list. Returns
	/// `false` without side effects when already active.
	pub fn activate<H>(&mut self, host: &mut H) -> bool
	where
		H: ModeHost + ?Sized,
	{
		if self.active {
			return false;
		}

		let table: AbbrevTable = self.defaults.iter().cloned().collect();
		self.table = table;

		for trigger in self.table.triggers() {
			host.register_trigger(trigger);
		}
		host.install_hook();
		self.active = true;

		tracing::info!(abbrevs = self.table.len(), "lisp abbrevs activated");
		true
	}

	/// Tear the feature down, unregistering every trigger individually.
	/// Returns `false` without side effects when already inactive.
	pub fn deactivate<H>(&mut self, host: &mut H) -> bool
	where
		H: ModeHost + ?Sized,
	{
		if !self.active {
			return false;
		}

		host.remove_hook();
		let erased = self.table.erase_all();
		for trigger in &erased {
			host.unregister_trigger(trigger);
		}
		self.active = false;

		tracing::info!(abbrevs = erased.len(), "lisp abbrevs deactivated");
		true
	}

	/// Define an extra abbreviation on the live table. While inactive only the
	/// defaults change, so the entry appears on the next activation.
	pub fn define<H>(&mut self, host: &mut H, trigger: impl Into<String>, template: Template)
	where
		H: ModeHost + ?Sized,
	{
		let trigger = trigger.into();
		if self.active {
			if !self.table.contains(&trigger) {
				host.register_trigger(&trigger);
			}
			self.table.define(trigger.clone(), template.clone());
		}
		self.defaults.push((trigger, template));
	}

	/// Attempt an expansion before `typed` is inserted.
	pub fn expand<C>(&self, ctx: &mut C, typed: char) -> ExpansionOutcome
	where
		C: EditorContext + ?Sized,
	{
		if !self.active {
			return ExpansionOutcome::Rejected(Rejection::Inactive);
		}

		self.engine.expand(&self.table, ctx, typed)
	}

	/// Handle a typed key the way a self-inserting command does: attempt an
	/// expansion, then insert the key unless the expansion consumed it.
	///
	/// After an expansion the key goes at the end of the inserted text. Point
	/// then returns to the first stop, or stays after the key when the
	/// template has no stops.
	pub fn self_insert<C>(&self, ctx: &mut C, typed: char) -> ExpansionOutcome
	where
		C: EditorContext + ?Sized,
	{
		let outcome = self.expand(ctx, typed);
		let mut buf = [0; 4];
		let key = typed.encode_utf8(&mut buf);

		match &outcome {
			ExpansionOutcome::Rejected(_) => ctx.insert(key),
			ExpansionOutcome::Expanded(expansion) if !expansion.suppress_insert => {
				ctx.set_point(expansion.end());
				ctx.insert(key);
				if !expansion.stops.is_empty() {
					ctx.set_point(expansion.point);
				}
			}
			ExpansionOutcome::Expanded(_) => {}
		}

		outcome
	}
}
