use crate::Variables;
use crate::tokens::scan_keys;

/// Upper bound on replacement passes for a single variable.
pub const MAX_SUBSTITUTION_PASSES: usize = 64;

/// A key paired with a number of replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCount {
	pub key: String,
	pub count: usize,
}

impl KeyCount {
	pub fn new(key: impl Into<String>, count: usize) -> Self {
		Self {
			key: key.into(),
			count,
		}
	}
}

/// Result of substituting variables into a single template.
#[derive(Debug, Clone)]
pub struct Substitution {
	/// The template text with every known placeholder replaced.
	pub text: String,
	/// Replacements made for each declared variable, in declaration order.
	pub replacements: Vec<KeyCount>,
	/// Placeholder keys found in the original template, in first-seen
	/// order, with the number of times each was satisfied.
	pub referenced: Vec<KeyCount>,
}

impl Substitution {
	/// Keys referenced by the template that no variable satisfied.
	pub fn unresolved(&self) -> impl Iterator<Item = &str> {
		self.referenced
			.iter()
			.filter(|entry| entry.count == 0)
			.map(|entry| entry.key.as_str())
	}

	/// Total number of replacements made in this template.
	pub fn total_replacements(&self) -> usize {
		self.replacements.iter().map(|entry| entry.count).sum()
	}
}

/// Substitute every declared variable into `template`.
///
/// Variables are applied in declaration order. Each one is replaced pass
/// after pass until its `${KEY}` no longer occurs in the text, since an
/// inserted value can join with its surroundings to form a new placeholder.
/// A value containing its own placeholder stops after the first pass, and no
/// variable runs more than [`MAX_SUBSTITUTION_PASSES`] passes.
pub fn substitute(template: &str, variables: &Variables) -> Substitution {
	let mut referenced: Vec<KeyCount> = scan_keys(template)
		.into_iter()
		.map(|key| KeyCount::new(key, 0))
		.collect();
	let mut replacements = Vec::with_capacity(variables.len());
	let mut text = template.to_string();

	for variable in variables.iter() {
		let token = variable.token();
		let self_referencing = variable.value.contains(&token);
		let mut count = 0;

		for pass in 1..=MAX_SUBSTITUTION_PASSES {
			let (replaced, found) = replace_token(&text, &token, &variable.value);
			if found == 0 {
				break;
			}

			text = replaced;
			count += found;

			if self_referencing {
				tracing::warn!(key = %variable.key, "value contains its own placeholder");
				break;
			}

			if pass == MAX_SUBSTITUTION_PASSES && text.contains(&token) {
				tracing::warn!(
					key = %variable.key,
					passes = MAX_SUBSTITUTION_PASSES,
					"placeholder still present after maximum substitution passes"
				);
			}
		}

		if let Some(entry) = referenced.iter_mut().find(|entry| entry.key == variable.key) {
			entry.count += count;
		}

		tracing::trace!(key = %variable.key, count, "substituted variable");
		replacements.push(KeyCount::new(variable.key.clone(), count));
	}

	Substitution {
		text,
		replacements,
		referenced,
	}
}

/// Replace every non-overlapping occurrence of `token` in `text` with `value`
/// in a single left-to-right pass. Returns the new text and the number of
/// replacements.
pub fn replace_token(text: &str, token: &str, value: &str) -> (String, usize) {
	if token.is_empty() {
		return (text.to_string(), 0);
	}

	let mut result = String::with_capacity(text.len());
	let mut last = 0;
	let mut count = 0;
	for (start, matched) in text.match_indices(token) {
		result.push_str(&text[last..start]);
		result.push_str(value);
		last = start + matched.len();
		count += 1;
	}
	result.push_str(&text[last..]);

	(result, count)
}
