use super::token::*;

pub fn lex(s: &str) -> Vec<Token> {
    HocLexer::lex(s)
}

fn is_hoc_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_hoc_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hoc_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_hoc_whitespace(*pk) {
                break;
            }
            self.chars().next();
        }
    }

    fn comment(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if *pk == '\n' {
                break;
            }
            self.chars().next();
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        let mut digits = 0;
        let mut decimal = false;
        let mut exp = false;
        while let Some(&ch) = self.chars().peek() {
            if is_hoc_digit(ch) {
                digits += 1;
            } else if ch == '.' && !decimal && !exp {
                decimal = true;
            } else if (ch == 'e' || ch == 'E') && digits > 0 && !exp {
                exp = true;
                s.push(ch);
                self.chars().next();
                if let Some(&sign) = self.chars().peek() {
                    if sign == '+' || sign == '-' {
                        s.push(sign);
                        self.chars().next();
                    }
                }
                continue;
            } else {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        match s.parse::<f64>() {
            Ok(n) if digits > 0 => Some(Token::Number(n)),
            _ => Some(Token::Unknown(s)),
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(&ch) = self.chars().peek() {
            if !is_hoc_alphabetic(ch) && !is_hoc_digit(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        match Word::from_str(&s) {
            Some(word) => Some(Token::Word(word)),
            None => Some(Token::Ident(s)),
        }
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        let token = match ch {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '\n' => Token::Newline,
            ';' => Token::Semicolon,
            _ => {
                let mut s = ch.to_string();
                if let Some(&pk) = self.chars().peek() {
                    s.push(pk);
                    if let Some(op) = Operator::from_str(&s) {
                        self.chars().next();
                        return Some(Token::Operator(op));
                    }
                    s.pop();
                }
                match Operator::from_str(&s) {
                    Some(op) => Token::Operator(op),
                    None => Token::Unknown(s),
                }
            }
        };
        Some(token)
    }
}

struct HocLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for HocLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> HocLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut lexer = HocLexer {
            chars: s.chars().peekable(),
        };
        let mut tokens: Vec<Token> = vec![];
        while let Some(t) = lexer.next() {
            tokens.push(t);
        }
        tokens
    }

    fn next(&mut self) -> Option<Token> {
        loop {
            let pk = *self.chars.peek()?;
            if is_hoc_whitespace(pk) {
                self.whitespace();
                continue;
            }
            if pk == '#' {
                self.comment();
                continue;
            }
            if is_hoc_digit(pk) || pk == '.' {
                return self.number();
            }
            if is_hoc_alphabetic(pk) {
                return self.alphabetic();
            }
            return self.minutia();
        }
    }
}
