use std::ops::Range;

use logos::Logos;

/// Raw tokens produced by logos for flat tokenization of template text.
///
/// The variants never share a prefix longer than one character, so the
/// longest-match rule is enough to split any input without backtracking.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("${")]
	PlaceholderOpen,
	#[token("}")]
	BraceClose,
	#[regex(r"[A-Z_]+")]
	Key,
	#[token("$")]
	Dollar,
	#[regex(r"[^$A-Z_}]+")]
	Text,
}

/// A `${KEY}` placeholder found in template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
	/// The name between the braces.
	pub key: &'a str,
	/// Byte range of the whole placeholder, including `${` and `}`.
	pub span: Range<usize>,
}

/// Find every `${KEY}` placeholder in `text`, in source order.
///
/// Keys are restricted to ASCII uppercase letters and underscores. Anything
/// else between the braces means the text is not a placeholder.
pub fn placeholders(text: &str) -> Vec<Placeholder<'_>> {
	let raw_tokens: Vec<_> = RawToken::lexer(text).spanned().collect();
	let mut found = Vec::new();

	for (index, (token, span)) in raw_tokens.iter().enumerate() {
		if token != &Ok(RawToken::PlaceholderOpen) {
			continue;
		}

		let Some((Ok(RawToken::Key), key_span)) = raw_tokens.get(index + 1) else {
			continue;
		};
		let Some((Ok(RawToken::BraceClose), close_span)) = raw_tokens.get(index + 2) else {
			continue;
		};

		found.push(Placeholder {
			key: &text[key_span.clone()],
			span: span.start..close_span.end,
		});
	}

	found
}

/// The distinct placeholder keys in `text`, in the order they first appear.
pub fn scan_keys(text: &str) -> Vec<String> {
	let mut keys: Vec<String> = Vec::new();
	for placeholder in placeholders(text) {
		if !keys.iter().any(|key| key == placeholder.key) {
			keys.push(placeholder.key.to_string());
		}
	}
	keys
}
