/// The literal text in a template name that is swapped for the environment
/// name, matched case-insensitively.
pub const ENVIRONMENT_PLACEHOLDER: &str = ".env.";

/// Case style requested by the environment marker in a template file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentMarker {
	/// `.Env.` — the environment name in `PascalCase`.
	Pascal,
	/// `.env.` — the environment name in lowercase.
	Lower,
	/// `.ENV.` — the environment name in uppercase.
	Upper,
}

impl EnvironmentMarker {
	/// Markers in detection order.
	pub const ALL: [Self; 3] = [Self::Pascal, Self::Lower, Self::Upper];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Pascal => ".Env.",
			Self::Lower => ".env.",
			Self::Upper => ".ENV.",
		}
	}

	/// Find the marker in a file name. The first marker in [`Self::ALL`]
	/// that appears wins.
	pub fn detect(file_name: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|marker| file_name.contains(marker.as_str()))
	}

	/// Render the environment name in this marker's case style.
	pub fn apply(self, environment_name: &str) -> String {
		match self {
			Self::Pascal => to_pascal_case(environment_name),
			Self::Lower => environment_name.to_lowercase(),
			Self::Upper => environment_name.to_uppercase(),
		}
	}
}

/// Convert `my-env_name` style text to `MyEnvName`.
///
/// `-` and `_` separate words and any other non-word character is dropped.
/// Every word that follows a separator and has at least two characters is
/// capitalized with the remainder lowercased. Other words keep their casing
/// apart from the leading letter of the result.
pub fn to_pascal_case(input: &str) -> String {
	let spaced: String = input
		.chars()
		.map(|c| if c == '-' || c == '_' { ' ' } else { c })
		.filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
		.collect();
	let leading_separator = spaced.starts_with(char::is_whitespace);

	let mut result = String::with_capacity(spaced.len());
	for (index, word) in spaced.split_whitespace().enumerate() {
		let follows_separator = index > 0 || leading_separator;
		let mut chars = word.chars();
		match chars.next() {
			Some(first) if follows_separator && !chars.as_str().is_empty() => {
				result.push(first.to_ascii_uppercase());
				result.push_str(&chars.as_str().to_ascii_lowercase());
			}
			_ => result.push_str(word),
		}
	}

	capitalize_first(&result)
}

fn capitalize_first(input: &str) -> String {
	let mut chars = input.chars();
	match chars.next() {
		Some(first) => {
			let mut result = String::with_capacity(input.len());
			result.push(first.to_ascii_uppercase());
			result.push_str(chars.as_str());
			result
		}
		None => String::new(),
	}
}

/// Replace every ASCII case-insensitive occurrence of `needle` in `haystack`.
///
/// Matches are found left to right and never overlap.
pub fn replace_all_case_insensitive(haystack: &str, needle: &str, replacement: &str) -> String {
	if needle.is_empty() {
		return haystack.to_string();
	}

	// ASCII lowercasing keeps byte offsets identical to the original.
	let folded_haystack = haystack.to_ascii_lowercase();
	let folded_needle = needle.to_ascii_lowercase();

	let mut result = String::with_capacity(haystack.len());
	let mut last = 0;
	for (start, _) in folded_haystack.match_indices(&folded_needle) {
		result.push_str(&haystack[last..start]);
		result.push_str(replacement);
		last = start + needle.len();
	}
	result.push_str(&haystack[last..]);

	result
}

/// Compute the output file name for a template.
///
/// The template suffix is removed first so that a suffix containing the
/// placeholder text is never rewritten. When the name carries an environment
/// marker, every `.env.` (any case) is then replaced with the environment
/// name in the marker's case style.
pub fn output_file_name(template_name: &str, environment_name: &str, template_suffix: &str) -> String {
	let marker = EnvironmentMarker::detect(template_name);
	let stripped = template_name
		.strip_suffix(template_suffix)
		.unwrap_or(template_name);

	let Some(marker) = marker else {
		return stripped.to_string();
	};

	let resolved = marker.apply(environment_name);
	replace_all_case_insensitive(stripped, ENVIRONMENT_PLACEHOLDER, &format!(".{resolved}."))
}
