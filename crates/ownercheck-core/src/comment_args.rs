//! Decoder for the Atlantis `COMMENT_ARGS` environment variable
//!
//! Atlantis escapes every character of every extra comment argument with a
//! backslash and joins the arguments with commas, so
//! `atlantis plan -- arg1 arg2` arrives as `COMMENT_ARGS=\a\r\g\1,\a\r\g\2`.
//!
//! A comma is an argument separator unless it is preceded by a backslash
//! that is not itself preceded by another backslash. That lookback lets a
//! literal backslash sit right before a separator (`\a\\,\b` decodes to
//! `["a\\", "b"]`).

use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

const ESCAPE: char = '\\';
const SEPARATOR: char = ',';
const ESCAPED_SEPARATOR: &str = "\\,";

/// Failure to decode an escaped argument string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input is made only of escaped commas and cannot be split
    #[error("ambiguous string: {input}")]
    Ambiguous {
        /// Raw `COMMENT_ARGS` value
        input: String,
    },

    /// An argument is not a sequence of backslash/literal pairs
    #[error("unable to unescape \"{input}\": improperly escaped arg: {arg}")]
    ImproperlyEscaped {
        /// Raw `COMMENT_ARGS` value
        input: String,
        /// The escaped argument that failed to decode
        arg: String,
    },
}

/// Decoded comment arguments, in the order they appeared in the comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentArgs(Vec<String>);

impl CommentArgs {
    /// Decode an escaped, comma-separated argument string.
    ///
    /// An empty string decodes to no arguments. Nothing is returned on
    /// failure, either every argument decodes or the call errors.
    ///
    /// ```
    /// use ownercheck_core::CommentArgs;
    ///
    /// let args = CommentArgs::decode(r"\a\r\g\1,\a\r\g\2").unwrap();
    /// assert_eq!(&*args, ["arg1", "arg2"]);
    /// ```
    pub fn decode(value: &str) -> Result<Self, DecodeError> {
        if value.is_empty() {
            return Ok(Self::default());
        }

        if value.matches(ESCAPED_SEPARATOR).count() * 2 == value.len() {
            return Err(DecodeError::Ambiguous {
                input: value.to_string(),
            });
        }

        // Trailing separator so the last argument closes like every other one
        let escaped: Vec<char> = value.chars().chain([SEPARATOR]).collect();

        let mut args = Vec::new();
        let mut start = 0;
        for (i, &c) in escaped.iter().enumerate() {
            if c != SEPARATOR || !is_separator(&escaped, i) {
                continue;
            }

            let arg = &escaped[start..i];
            let decoded = unescape(arg).ok_or_else(|| DecodeError::ImproperlyEscaped {
                input: value.to_string(),
                arg: arg.iter().collect(),
            })?;
            args.push(decoded);
            start = i + 1;
        }

        // A dangling backslash escapes the trailing separator
        if start < escaped.len() {
            return Err(DecodeError::ImproperlyEscaped {
                input: value.to_string(),
                arg: escaped[start..escaped.len() - 1].iter().collect(),
            });
        }

        Ok(Self(args))
    }

    /// Consume into the underlying argument list
    #[inline]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Whether the comma at `i` splits arguments.
fn is_separator(escaped: &[char], i: usize) -> bool {
    match i.checked_sub(1).map(|prev| escaped[prev]) {
        Some(ESCAPE) => i >= 2 && escaped[i - 2] == ESCAPE,
        _ => true,
    }
}

/// Keep the odd-indexed half of `(backslash, literal)` pairs.
///
/// `None` when the argument has odd length or a pair does not start with
/// a backslash.
fn unescape(arg: &[char]) -> Option<String> {
    if arg.len() % 2 != 0 {
        return None;
    }

    arg.chunks_exact(2)
        .map(|pair| (pair[0] == ESCAPE).then_some(pair[1]))
        .collect()
}

impl FromStr for CommentArgs {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Deref for CommentArgs {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<CommentArgs> for Vec<String> {
    fn from(args: CommentArgs) -> Self {
        args.0
    }
}

impl IntoIterator for CommentArgs {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommentArgs {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
