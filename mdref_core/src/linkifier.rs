use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Deref;

use regex::Regex;
use serde::Serialize;

use crate::MdrefError;
use crate::MdrefResult;

/// Compiled linkifier pattern.
///
/// Two patterns are equal when their source text is equal, which makes the
/// pattern usable as a mapping key.
#[derive(Clone)]
pub struct LinkifierPattern(Regex);

impl LinkifierPattern {
	pub fn new(pattern: &str) -> MdrefResult<Self> {
		Regex::new(pattern)
			.map(Self)
			.map_err(|e| MdrefError::InvalidLinkifier {
				pattern: pattern.to_string(),
				reason: e.to_string(),
			})
	}
}

impl Deref for LinkifierPattern {
	type Target = Regex;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for LinkifierPattern {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for LinkifierPattern {}

impl Hash for LinkifierPattern {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.as_str().hash(state);
	}
}

impl fmt::Debug for LinkifierPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("LinkifierPattern")
			.field(&self.0.as_str())
			.finish()
	}
}

impl fmt::Display for LinkifierPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0.as_str())
	}
}

/// What a matching span is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkifierRule {
	/// RFC 6570 style template, e.g. `https://github.com/org/repo/issues/{id}`.
	pub url_template: String,
	/// Capture group index to the template variable it fills.
	pub group_number_to_name: BTreeMap<usize, String>,
}

/// Compile a linkifier definition into its map entry.
///
/// Every variable the template references must be a named group of the
/// pattern.
pub fn compile_linkifier(
	pattern: &str,
	url_template: &str,
) -> MdrefResult<(LinkifierPattern, LinkifierRule)> {
	let compiled = LinkifierPattern::new(pattern)?;
	let group_number_to_name: BTreeMap<usize, String> = compiled
		.capture_names()
		.enumerate()
		.filter_map(|(index, name)| name.map(|name| (index, name.to_string())))
		.collect();

	for variable in template_variables(url_template) {
		if !group_number_to_name.values().any(|name| name == variable) {
			return Err(MdrefError::InvalidLinkifier {
				pattern: pattern.to_string(),
				reason: format!("url template references unknown group `{variable}`"),
			});
		}
	}

	Ok((
		compiled,
		LinkifierRule {
			url_template: url_template.to_string(),
			group_number_to_name,
		},
	))
}

/// Variable names inside `{…}` expressions, without operators or modifiers.
fn template_variables(template: &str) -> Vec<&str> {
	let mut variables = Vec::new();
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		let after = &rest[open + 1..];
		let Some(close) = after.find('}') else {
			break;
		};
		let expression = after[..close].trim_start_matches(['+', '#', '.', '/', ';', '?', '&']);
		for variable in expression.split(',') {
			let variable = variable.trim_end_matches('*');
			let variable = variable.split(':').next().unwrap_or(variable);
			if !variable.is_empty() {
				variables.push(variable);
			}
		}
		rest = &after[close + 1..];
	}

	variables
}
