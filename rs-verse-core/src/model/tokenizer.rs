/// Punctuation marks split out as standalone tokens.
pub const PUNCTUATION: [char; 4] = [',', '.', ';', ':'];

/// Splits raw corpus text into tokens.
///
/// The corpus is handled as one continuous stream:
/// - line breaks become spaces
/// - double quotes are dropped
/// - every mark of [`PUNCTUATION`] is padded with spaces
/// - the text is split on spaces and empty pieces are discarded
///
/// Word case is kept as is. Only the space character is a separator,
/// so tabs or `\r` stay glued to the word they follow.
pub fn tokenize(corpus: &str) -> Vec<String> {
	let mut text = corpus.replace('\n', " ").replace('"', "");
	for symbol in PUNCTUATION {
		text = text.replace(symbol, &format!(" {symbol} "));
	}

	text.split(' ')
		.filter(|token| !token.is_empty())
		.map(str::to_owned)
		.collect()
}
