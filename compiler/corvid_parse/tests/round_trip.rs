//! Lossless parsing: the tree always spells out its input.

use corvid_parse::{lexer, parse};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_preserves_text(source in "[a-z0-9 {}();=+*/<>!&|\"'#.,:?\\[\\]\n\t-]{0,200}") {
        let parse = parse(&source);
        prop_assert_eq!(parse.text(), source);
    }

    #[test]
    fn lexer_covers_every_byte(source in "[a-zA-Z0-9 {}();=+*/\"'#\n]{0,200}") {
        let lexed = lexer::lex(&source);
        let mut text = String::new();
        for token in &lexed.tokens {
            for trivia in &token.leading {
                trivia.write_text(&mut text);
            }
            text.push_str(token.text);
            for trivia in &token.trailing {
                trivia.write_text(&mut text);
            }
        }
        prop_assert_eq!(text, source);
    }
}

#[test]
fn unicode_round_trips() {
    let source = "string s = \"héllo → wörld\"; // ünïcode\nchar c = 'é';";
    assert_eq!(parse(source).text(), source);
}
