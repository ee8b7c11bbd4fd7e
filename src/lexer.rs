use std::fmt;

type Name = String;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // literal text is kept so the renderer can print it as written
    Number(String),
    Ident(Name),
    OpenParen,
    CloseParen,
    Separator,
    Add,
    Subtract,
    Multiply,
    Divide,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => write!(f, "number `{text}`"),
            Token::Ident(name) => write!(f, "identifier `{name}`"),
            Token::OpenParen => f.write_str("`(`"),
            Token::CloseParen => f.write_str("`)`"),
            Token::Separator => f.write_str("`,`"),
            Token::Add => f.write_str("`+`"),
            Token::Subtract => f.write_str("`-`"),
            Token::Multiply => f.write_str("`*`"),
            Token::Divide => f.write_str("`/`"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

trait SmartChar {
    fn starts_ident(self) -> bool;
    fn continues_ident(self) -> bool;
}

impl SmartChar for char {
    fn starts_ident(self) -> bool {
        self.is_alphabetic() || self == '_'
    }

    // dots are allowed so `Double.pi` lexes as one name
    fn continues_ident(self) -> bool {
        self.is_alphanumeric() || self == '_' || self == '.'
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub(crate) fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn get_char(&self) -> Option<char> {
        tracing::trace!("getting char at {}", self.pos);
        self.chars.get(self.pos).copied()
    }

    fn parse_number(&mut self) -> Token {
        let mut number = String::new();
        let mut seen_point = false;
        while let Some(c) = self.get_char() {
            if c == '.' && !seen_point {
                seen_point = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            number.push(c);
            self.pos += 1;
        }
        Token::Number(number)
    }

    fn parse_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(c) = self.get_char().filter(|c| c.continues_ident()) {
            identifier.push(c);
            self.pos += 1;
        }
        Token::Ident(identifier)
    }

    pub(crate) fn get_token(&mut self) -> Token {
        loop {
            let Some(c) = self.get_char() else {
                return Token::Eof;
            };
            if c.is_ascii_digit() || c == '.' {
                return self.parse_number();
            }
            if c.starts_ident() {
                return self.parse_identifier();
            }
            self.pos += 1;
            let token = match c {
                '(' => Token::OpenParen,
                ')' => Token::CloseParen,
                ',' => Token::Separator,
                '+' => Token::Add,
                '-' => Token::Subtract,
                '*' => Token::Multiply,
                '/' => Token::Divide,
                c if c.is_whitespace() => continue,
                c => {
                    tracing::debug!("dropping unrecognised character {c:?} at {}", self.pos - 1);
                    continue;
                }
            };
            return token;
        }
    }

    /// Lexes the whole input, always ending with [`Token::Eof`].
    pub(crate) fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.get_token();
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::lexer::Token;
    use test_case::test_case;

    use super::Lexer;

    fn num(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test_case("12", num("12"); "integer")]
    #[test_case("2.50", num("2.50"); "decimal")]
    #[test_case(".5", num(".5"); "leading point")]
    #[test_case("1.2.3", num("1.2"); "stops at second point")]
    fn number_lexing(input: &'static str, correct: Token) {
        assert_eq!(Lexer::new(input).get_token(), correct)
    }

    #[test_case("ident with other stuff", Some("ident"); "when only letters")]
    #[test_case("id3nt with a number", Some("id3nt"); "when there is a number")]
    #[test_case("Double.pi*2", Some("Double.pi"); "when there is a dot")]
    #[test_case("_tmp_1", Some("_tmp_1"); "when it starts with an underscore")]
    #[test_case("ιδεντ in greek", Some("ιδεντ"); "when there are funky letters")]
    #[test_case("", None; "no ident when there is no input")]
    fn identifier_lexing(input: &'static str, identifier: Option<&'static str>) {
        let mut lexer = Lexer::new(input);
        match identifier {
            Some(id) => {
                assert_eq!(lexer.get_token(), ident(id));
                assert_eq!(lexer.pos, id.chars().count());
            }
            None => assert_eq!(lexer.get_token(), Token::Eof),
        }
    }

    #[test]
    fn operators_and_whitespace() {
        assert_eq!(
            Lexer::new(" pow( a ,\t2 ) - 1/x*y+z").tokenize(),
            vec![
                ident("pow"),
                Token::OpenParen,
                ident("a"),
                Token::Separator,
                num("2"),
                Token::CloseParen,
                Token::Subtract,
                num("1"),
                Token::Divide,
                ident("x"),
                Token::Multiply,
                ident("y"),
                Token::Add,
                ident("z"),
                Token::Eof,
            ]
        );
    }

    #[test_case("1 ^ 2", vec![num("1"), num("2"), Token::Eof]; "caret")]
    #[test_case("$x#", vec![ident("x"), Token::Eof]; "symbols around ident")]
    #[test_case("@@@", vec![Token::Eof]; "only garbage")]
    fn unknown_characters_are_dropped(input: &'static str, correct: Vec<Token>) {
        assert_eq!(Lexer::new(input).tokenize(), correct)
    }
}
