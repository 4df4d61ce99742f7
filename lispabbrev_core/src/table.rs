use std::collections::BTreeMap;

use crate::Template;

/// Case-sensitive mapping from trigger to template for a single editing
/// mode. Defining an existing trigger replaces its template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbrevTable {
	entries: BTreeMap<String, Template>,
}

impl AbbrevTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or overwrite the entry for `trigger`, returning the template it
	/// replaced.
	pub fn define(&mut self, trigger: impl Into<String>, template: Template) -> Option<Template> {
		self.entries.insert(trigger.into(), template)
	}

	/// Remove exactly this trigger. Other triggers are unaffected.
	pub fn erase(&mut self, trigger: &str) -> Option<Template> {
		self.entries.remove(trigger)
	}

	/// Erase every tracked trigger one by one and return them in table order.
	/// An empty table yields an empty list.
	pub fn erase_all(&mut self) -> Vec<String> {
		let triggers: Vec<String> = self.entries.keys().cloned().collect();
		for trigger in &triggers {
			self.erase(trigger);
		}

		triggers
	}

	/// Define every pair in list order. Later pairs sharing a trigger
	/// overwrite earlier ones.
	pub fn load_defaults<I, T>(&mut self, list: I)
	where
		I: IntoIterator<Item = (T, Template)>,
		T: Into<String>,
	{
		for (trigger, template) in list {
			self.define(trigger, template);
		}
	}

	pub fn get(&self, trigger: &str) -> Option<&Template> {
		self.entries.get(trigger)
	}

	pub fn contains(&self, trigger: &str) -> bool {
		self.entries.contains_key(trigger)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Triggers in sorted order.
	pub fn triggers(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
		self.entries
			.iter()
			.map(|(trigger, template)| (trigger.as_str(), template))
	}
}

impl<T: Into<String>> FromIterator<(T, Template)> for AbbrevTable {
	fn from_iter<I: IntoIterator<Item = (T, Template)>>(iter: I) -> Self {
		let mut table = Self::new();
		table.load_defaults(iter);
		table
	}
}
