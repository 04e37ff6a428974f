//! The Script Scanner
//!
//! A [`Scanner`] turns script text into a lazy sequence of lexical [`Event`]s: words,
//! variable references, the opening and closing of `( … )` groups, and command
//! separators.  It doesn't evaluate anything; the interpreter pulls events one at a time
//! and evaluates each command as soon as its terminator arrives, so that a command can
//! see the effects of the commands before it.
//!
//! The scanner looks ahead rather than backing up: a `$name` reference ends at the first
//! character that can't be part of an identifier, and that character is left unconsumed
//! for the next event.
//!
//! ```
//! use mitcl::scanner::{Event, Scanner};
//!
//! let events: Vec<Event> = Scanner::new("print (add $x 1)")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::Word("print".into()),
//!         Event::OpenGroup,
//!         Event::Word("add".into()),
//!         Event::VarRef("x".into()),
//!         Event::Word("1".into()),
//!         Event::CloseGroup,
//!     ]
//! );
//! ```

use crate::types::ErrorKind;
use crate::types::Exception;
use alloc::string::String;
use log::trace;

/// A lexical event produced by the [`Scanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A complete word: a bare token, the contents of a quoted string (escapes decoded),
    /// or the verbatim contents of a brace block.
    Word(String),

    /// A `$name` variable reference; the string is the name.
    VarRef(String),

    /// A `(` opening a nested command.
    OpenGroup,

    /// The `)` closing the innermost open group.
    CloseGroup,

    /// A `;` or newline.
    EndCommand,
}

/// A lazy, restartable tokenizer over a script.  Cloning a scanner yields an independent
/// scanner at the same position.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of the input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            done: false,
        }
    }

    /// Returns the number of `( … )` groups currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the unscanned remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn next_event(&mut self) -> Result<Option<Event>, Exception> {
        loop {
            let Some(ch) = self.next_char() else {
                if self.depth > 0 {
                    return Err(Exception::new(ErrorKind::Unterminated("close-paren")));
                }
                return Ok(None);
            };

            let event = match ch {
                ch if is_blank(ch) => continue,
                ';' | '\n' => Event::EndCommand,
                '(' => {
                    self.depth += 1;
                    Event::OpenGroup
                }
                ')' if self.depth > 0 => {
                    self.depth -= 1;
                    Event::CloseGroup
                }
                '"' => Event::Word(self.quoted()?),
                '{' => Event::Word(self.braced()?),
                '$' if self.peek().is_some_and(is_ident_char) => Event::VarRef(self.ident()),
                _ => Event::Word(self.bare(ch)),
            };

            return Ok(Some(event));
        }
    }

    /// Scans the remainder of a bare word whose first character is `first`.
    fn bare(&mut self, first: char) -> String {
        let mut word = String::new();
        word.push(first);

        while let Some(ch) = self.peek() {
            let ends_word = match ch {
                ';' | '\n' | '(' | '"' | '{' => true,
                ')' => self.depth > 0,
                '$' => self.peek_second().is_some_and(is_ident_char),
                ch => is_blank(ch),
            };

            if ends_word {
                break;
            }

            word.push(ch);
            self.next_char();
        }

        word
    }

    /// Scans a variable name; the `$` has been consumed.
    fn ident(&mut self) -> String {
        let mut name = String::new();

        while let Some(ch) = self.peek().filter(|&ch| is_ident_char(ch)) {
            name.push(ch);
            self.next_char();
        }

        name
    }

    /// Scans a quoted string; the opening `"` has been consumed.
    fn quoted(&mut self) -> Result<String, Exception> {
        let mut text = String::new();

        loop {
            match self.next_char() {
                Some('"') => return Ok(text),
                Some('\\') => match self.next_char() {
                    Some(ch) => text.push(decode_escape(ch)),
                    None => break,
                },
                Some(ch) => text.push(ch),
                None => break,
            }
        }

        Err(Exception::new(ErrorKind::Unterminated("\"")))
    }

    /// Scans a brace block; the opening `{` has been consumed.  The text is returned
    /// verbatim, including nested braces and any quoted sections; braces inside quoted
    /// sections don't count toward the nesting.
    fn braced(&mut self) -> Result<String, Exception> {
        let mut text = String::new();
        let mut nesting = 1;

        while let Some(ch) = self.next_char() {
            match ch {
                '{' => nesting += 1,
                '}' => {
                    nesting -= 1;
                    if nesting == 0 {
                        return Ok(text);
                    }
                }
                '"' => {
                    text.push(ch);
                    self.verbatim_quoted(&mut text)?;
                    continue;
                }
                _ => (),
            }

            text.push(ch);
        }

        Err(Exception::new(ErrorKind::Unterminated("close-brace")))
    }

    /// Copies a quoted section inside a brace block, up to and including its closing `"`,
    /// without decoding escapes.
    fn verbatim_quoted(&mut self, text: &mut String) -> Result<(), Exception> {
        while let Some(ch) = self.next_char() {
            text.push(ch);

            match ch {
                '"' => return Ok(()),
                '\\' => match self.next_char() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                },
                _ => (),
            }
        }

        Err(Exception::new(ErrorKind::Unterminated("\"")))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Event, Exception>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_event() {
            Ok(Some(event)) => {
                trace!("scanned {:?} at depth {}", event, self.depth);
                Some(Ok(event))
            }
            Ok(None) => {
                trace!("end of input at offset {}", self.pos);
                self.done = true;
                None
            }
            Err(exception) => {
                self.done = true;
                Some(Err(exception))
            }
        }
    }
}

/// Determines whether the script is syntactically complete, i.e., has no unterminated
/// quoted string, brace block, or `( … )` group.
///
/// ```
/// use mitcl::scanner::is_complete;
///
/// assert!(is_complete("if 1 {print {a}}"));
/// assert!(!is_complete("if 1 {print {a}"));
/// assert!(!is_complete("add (mul 2 2"));
/// ```
pub fn is_complete(script: &str) -> bool {
    Scanner::new(script).all(|event| event.is_ok())
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\r'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn decode_escape(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'e' => '\x1b',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn scan(input: &str) -> Vec<Event> {
        Scanner::new(input)
            .collect::<Result<_, _>>()
            .expect("scan error")
    }

    fn word(text: &str) -> Event {
        Event::Word(text.into())
    }

    fn var(name: &str) -> Event {
        Event::VarRef(name.into())
    }

    fn scan_err(input: &str) -> ErrorKind {
        match Scanner::new(input).find_map(|event| event.err()) {
            Some(exception) => exception.kind().clone(),
            None => panic!("expected scan error for {:?}", input),
        }
    }

    #[test]
    fn test_bare_words() {
        assert_eq!(scan(""), vec![]);
        assert_eq!(scan("a"), vec![word("a")]);
        assert_eq!(scan("  a\tbc  d "), vec![word("a"), word("bc"), word("d")]);
        assert_eq!(
            scan("a; b\nc"),
            vec![
                word("a"),
                Event::EndCommand,
                word("b"),
                Event::EndCommand,
                word("c")
            ]
        );
        assert_eq!(scan("a\r\nb"), vec![word("a"), Event::EndCommand, word("b")]);
    }

    #[test]
    fn test_delimiters_split_bare_words() {
        assert_eq!(
            scan("ab\"cd\"ef"),
            vec![word("ab"), word("cd"), word("ef")]
        );
        assert_eq!(scan("ab{cd}"), vec![word("ab"), word("cd")]);
        assert_eq!(
            scan("ab(cd)"),
            vec![word("ab"), Event::OpenGroup, word("cd"), Event::CloseGroup]
        );
    }

    #[test]
    fn test_close_paren_outside_group() {
        assert_eq!(scan("a)b )"), vec![word("a)b"), word(")")]);
    }

    #[test]
    fn test_groups() {
        assert_eq!(
            scan("add (mul 2 2) (mul 3 (add 1 1))"),
            vec![
                word("add"),
                Event::OpenGroup,
                word("mul"),
                word("2"),
                word("2"),
                Event::CloseGroup,
                Event::OpenGroup,
                word("mul"),
                word("3"),
                Event::OpenGroup,
                word("add"),
                word("1"),
                word("1"),
                Event::CloseGroup,
                Event::CloseGroup,
            ]
        );
        assert_eq!(scan("()"), vec![Event::OpenGroup, Event::CloseGroup]);
    }

    #[test]
    fn test_group_depth() {
        let mut scanner = Scanner::new("a (b (c");
        assert_eq!(scanner.depth(), 0);
        scanner.next();
        scanner.next();
        assert_eq!(scanner.depth(), 1);
        scanner.next();
        scanner.next();
        assert_eq!(scanner.depth(), 2);
        assert_eq!(scanner.rest(), "c");
    }

    #[test]
    fn test_quoted() {
        assert_eq!(scan("\"a b\""), vec![word("a b")]);
        assert_eq!(scan("\"\""), vec![word("")]);
        assert_eq!(scan("\"a;b\nc\""), vec![word("a;b\nc")]);
        assert_eq!(scan("\"(x) {y} $z\""), vec![word("(x) {y} $z")]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            scan(r#""1\n2\r3\t4\e5""#),
            vec![word("1\n2\r3\t4\x1b5")]
        );
        assert_eq!(scan(r#""a\"b\\c\qd""#), vec![word("a\"b\\cqd")]);
    }

    #[test]
    fn test_braced() {
        assert_eq!(scan("{}"), vec![word("")]);
        assert_eq!(scan("{a b}"), vec![word("a b")]);
        assert_eq!(
            scan("if $a {curly test {test} test} else { not wrong too }"),
            vec![
                word("if"),
                var("a"),
                word("curly test {test} test"),
                word("else"),
                word(" not wrong too "),
            ]
        );
        assert_eq!(scan("{a; (b)\n$c}"), vec![word("a; (b)\n$c")]);
    }

    #[test]
    fn test_quotes_in_braces() {
        assert_eq!(scan(r#"{print "}"}"#), vec![word(r#"print "}""#)]);
        assert_eq!(scan(r#"{print "{"}"#), vec![word(r#"print "{""#)]);
        assert_eq!(
            scan(r#"{print "a\nb\"c"}"#),
            vec![word(r#"print "a\nb\"c""#)]
        );
    }

    #[test]
    fn test_var_refs() {
        assert_eq!(scan("$x"), vec![var("x")]);
        assert_eq!(scan("$foo_1 $bar"), vec![var("foo_1"), var("bar")]);
        assert_eq!(
            scan("print $x;print"),
            vec![word("print"), var("x"), Event::EndCommand, word("print")]
        );
        assert_eq!(
            scan("(eq $n 0)"),
            vec![
                Event::OpenGroup,
                word("eq"),
                var("n"),
                word("0"),
                Event::CloseGroup
            ]
        );
        assert_eq!(scan("$x{y}"), vec![var("x"), word("y")]);
        assert_eq!(scan("$x-y"), vec![var("x"), word("-y")]);
        assert_eq!(scan("a$x"), vec![word("a"), var("x")]);
    }

    #[test]
    fn test_lone_dollar() {
        assert_eq!(scan("$"), vec![word("$")]);
        assert_eq!(scan("$ a"), vec![word("$"), word("a")]);
        assert_eq!(scan("a$ $-"), vec![word("a$"), word("$-")]);
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(scan_err("print \"abc"), ErrorKind::Unterminated("\""));
        assert_eq!(scan_err("print \"abc\\"), ErrorKind::Unterminated("\""));
        assert_eq!(scan_err("if 1 {abc"), ErrorKind::Unterminated("close-brace"));
        assert_eq!(scan_err("if 1 {a {b}"), ErrorKind::Unterminated("close-brace"));
        assert_eq!(scan_err("{\"}"), ErrorKind::Unterminated("\""));
        assert_eq!(scan_err("add (mul 1 2"), ErrorKind::Unterminated("close-paren"));
    }

    #[test]
    fn test_stops_after_error() {
        let mut scanner = Scanner::new("\"abc");
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete("abc"));
        assert!(is_complete("a {bc} (def) \"ghi\" xyz"));
        assert!(is_complete("a )"));

        assert!(!is_complete("a {bc"));
        assert!(!is_complete("a (bc"));
        assert!(!is_complete("a \"bc"));
    }
}
