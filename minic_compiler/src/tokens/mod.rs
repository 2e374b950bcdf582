//! Token model shared by the scanner and the parser
//!
//! [`Token`] pairs a closed [`TokenKind`] with the raw lexeme and, for
//! numeric literals, the decoded value. A [`TokenStream`] is the scanner's
//! finished output: read-only, with a forward-only cursor for the parser.

pub mod token;
pub mod token_stream;

pub use token::{
    classify_operator_symbol, classify_punctuation, classify_word, Token, TokenClass, TokenKind,
};
pub use token_stream::{SpannedToken, TokenStream};
