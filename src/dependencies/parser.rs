// src/dependencies/parser.rs

//! Tokenizer and matcher for dependency fields
//!
//! Whitespace is tolerated anywhere around names, parentheses, relations and
//! versions. The relation token is not validated here; anything made of
//! `<`, `>` and `=` (or missing entirely inside the parentheses) is carried
//! through as a [`Relation`] and only rejected when a constraint is checked.

use super::{DependencyGroup, PackageConstraint, Relation};
use thiserror::Error;

/// A dependency entry that could not be matched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed dependency `{entry}': {msg}")]
pub struct ParseError {
    pub entry: String,
    pub msg: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Op(&'a str),
    Open,
    Close,
}

fn is_op(c: char) -> bool {
    matches!(c, '<' | '>' | '=')
}

fn is_delim(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')') || is_op(c)
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Consume a run of characters matching `pred`, starting at the cursor
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = &self.src[self.pos..];
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.take_while(char::is_whitespace);
        let c = self.src[self.pos..].chars().next()?;
        match c {
            '(' => {
                self.pos += 1;
                Some(Token::Open)
            }
            ')' => {
                self.pos += 1;
                Some(Token::Close)
            }
            c if is_op(c) => Some(Token::Op(self.take_while(is_op))),
            _ => Some(Token::Word(self.take_while(|c| !is_delim(c)))),
        }
    }
}

/// Strip a multi-arch qualifier such as `:any` or `:amd64`
fn bare_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(bare, _)| bare)
}

/// Match one `name [(relation version)]` alternative
fn parse_alternative(src: &str) -> Result<PackageConstraint, ParseError> {
    let err = |msg| ParseError {
        entry: src.to_string(),
        msg,
    };
    let mut tokens = Tokenizer::new(src);

    let name = match tokens.next() {
        Some(Token::Word(name)) => bare_name(name),
        _ => return Err(err("expected package name")),
    };

    match tokens.next() {
        None => return Ok(PackageConstraint::any(name)),
        Some(Token::Open) => {}
        Some(_) => return Err(err("unexpected text after package name")),
    }

    let mut relation = None;
    let mut version = None;
    loop {
        match tokens.next() {
            Some(Token::Op(op)) if relation.is_none() && version.is_none() => {
                relation = Some(Relation::parse(op));
            }
            Some(Token::Word(word)) if version.is_none() => version = Some(word.to_string()),
            Some(Token::Close) => break,
            None => return Err(err("missing closing ')'")),
            Some(_) => return Err(err("unexpected token inside version restriction")),
        }
    }

    if tokens.next().is_some() {
        return Err(err("unexpected text after version restriction"));
    }

    // A bare version inside the parentheses keeps an empty relation so the
    // checker can reject it
    let relation = match (relation, &version) {
        (None, Some(_)) => Some(Relation::Unrecognized(String::new())),
        (relation, _) => relation,
    };

    Ok(PackageConstraint {
        name: name.to_string(),
        relation,
        version,
    })
}

/// Parse one comma-delimited entry of a dependency field
///
/// Returns `Ok(None)` for an entry with nothing in it (e.g. a trailing comma).
pub fn parse_entry(entry: &str) -> Result<Option<DependencyGroup>, ParseError> {
    let alternatives = entry
        .split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(parse_alternative)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DependencyGroup::new(alternatives))
}

/// Parse a whole `Depends`-style field into dependency groups
pub fn parse_depends(field: &str) -> Result<Vec<DependencyGroup>, ParseError> {
    let mut groups = Vec::new();
    for entry in field.split(',') {
        if let Some(group) = parse_entry(entry)? {
            groups.push(group);
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(entry: &str) -> PackageConstraint {
        let group = parse_entry(entry).unwrap().unwrap();
        assert!(!group.is_alternation());
        group.preferred().clone()
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(single("bash"), PackageConstraint::any("bash"));
        assert_eq!(single("  bash  "), PackageConstraint::any("bash"));
    }

    #[test]
    fn test_versioned() {
        assert_eq!(
            single("libc6 (>= 2.7-1)"),
            PackageConstraint::versioned("libc6", Relation::LaterOrEqual, "2.7-1")
        );
    }

    #[test]
    fn test_tolerates_whitespace() {
        let expected = PackageConstraint::versioned("perl", Relation::StrictlyEarlier, "5.9");
        assert_eq!(single("perl(<<5.9)"), expected);
        assert_eq!(single("perl  (  <<   5.9 )"), expected);
        assert_eq!(single("\tperl (<< 5.9)\n"), expected);
    }

    #[test]
    fn test_relation_not_validated() {
        let c = single("foo (=> 1.0)");
        assert_eq!(c.relation, Some(Relation::Unrecognized("=>".to_string())));
        assert_eq!(c.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_bare_version_in_parens() {
        let c = single("foo (1.0)");
        assert_eq!(c.relation, Some(Relation::Unrecognized(String::new())));
        assert_eq!(c.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_strips_arch_qualifier() {
        assert_eq!(single("python3:any (>= 3.9)").name, "python3");
    }

    #[test]
    fn test_alternatives_keep_order() {
        let group = parse_entry("exim4 | mail-transport-agent (>= 1) |postfix")
            .unwrap()
            .unwrap();
        let names: Vec<_> = group.alternatives().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["exim4", "mail-transport-agent", "postfix"]);
        assert_eq!(group.alternatives()[1].relation, Some(Relation::LaterOrEqual));
        assert_eq!(group.alternatives()[2].relation, None);
    }

    #[test]
    fn test_parse_depends_field() {
        let groups =
            parse_depends("libc6 (>= 2.3.6-6~), libncurses5 (>= 5.6+20071006-3), debconf | debconf-2.0")
                .unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].preferred().version.as_deref(), Some("5.6+20071006-3"));
        assert!(groups[2].is_alternation());
    }

    #[test]
    fn test_empty_entries_skipped() {
        assert!(parse_depends("").unwrap().is_empty());
        assert_eq!(parse_depends("a, , b,").unwrap().len(), 2);
        assert!(parse_entry(" | ").unwrap().is_none());
    }

    #[test]
    fn test_malformed_entries() {
        assert!(parse_entry("foo (>= 1.0").is_err());
        assert!(parse_entry("foo bar").is_err());
        assert!(parse_entry("(>= 1.0)").is_err());
        assert!(parse_entry("foo (>= 1.0) extra").is_err());
    }
}
