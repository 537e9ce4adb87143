//! Qualified relation names
//!
//! Follows SQL identifier rules:
//! - Unquoted parts are folded to lower case
//! - Double-quoted parts keep their case; `""` inside quotes is a literal quote
//! - Parts are separated by `.`, surrounding whitespace is ignored

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Reasons a token is not a valid relation name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameSyntaxError {
    #[error("name is empty")]
    Empty,

    #[error("zero-length name part")]
    EmptyPart,

    #[error("unterminated quoted identifier")]
    UnterminatedQuote,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("too many dotted names ({0} parts, at most 3 allowed)")]
    TooManyParts(usize),
}

/// A relation name with optional database and schema qualifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl QualifiedName {
    /// Unqualified name, used verbatim (no case folding)
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            database: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Schema-qualified name, used verbatim (no case folding)
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: None,
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Parses a name token such as `orders`, `sales."OrderItems"` or
    /// `db.public.orders`.
    pub fn parse(input: &str) -> Result<Self, NameSyntaxError> {
        if input.trim().is_empty() {
            return Err(NameSyntaxError::Empty);
        }

        let mut parts = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            skip_whitespace(&mut chars);
            let part = match chars.peek() {
                Some('"') => {
                    chars.next();
                    quoted_part(&mut chars)?
                }
                _ => unquoted_part(&mut chars)?,
            };
            parts.push(part);

            skip_whitespace(&mut chars);
            match chars.next() {
                None => break,
                Some('.') => continue,
                Some(c) => return Err(NameSyntaxError::UnexpectedCharacter(c)),
            }
        }

        let mut parts = parts.into_iter();
        match parts.len() {
            1 => Ok(Self {
                database: None,
                schema: None,
                name: parts.next().unwrap_or_default(),
            }),
            2 => Ok(Self {
                database: None,
                schema: parts.next(),
                name: parts.next().unwrap_or_default(),
            }),
            3 => Ok(Self {
                database: parts.next(),
                schema: parts.next(),
                name: parts.next().unwrap_or_default(),
            }),
            n => Err(NameSyntaxError::TooManyParts(n)),
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn quoted_part(chars: &mut Peekable<Chars<'_>>) -> Result<String, NameSyntaxError> {
    let mut part = String::new();
    loop {
        match chars.next() {
            None => return Err(NameSyntaxError::UnterminatedQuote),
            Some('"') => {
                if chars.next_if_eq(&'"').is_some() {
                    part.push('"');
                } else {
                    break;
                }
            }
            Some(c) => part.push(c),
        }
    }
    if part.is_empty() {
        return Err(NameSyntaxError::EmptyPart);
    }
    Ok(part)
}

fn unquoted_part(chars: &mut Peekable<Chars<'_>>) -> Result<String, NameSyntaxError> {
    let mut part = String::new();
    while let Some(c) = chars.next_if(|c| *c != '.' && *c != '"' && !c.is_whitespace()) {
        part.push(c.to_ascii_lowercase());
    }
    if part.is_empty() {
        return Err(NameSyntaxError::EmptyPart);
    }
    Ok(part)
}

/// Writes one name part, quoting it when it would not survive case folding
fn write_part(f: &mut fmt::Formatter<'_>, part: &str) -> fmt::Result {
    let plain = part
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_lowercase() || c == '_')
        && part
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$');
    if plain {
        f.write_str(part)
    } else {
        write!(f, "\"{}\"", part.replace('"', "\"\""))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref database) = self.database {
            write_part(f, database)?;
            f.write_str(".")?;
        }
        if let Some(ref schema) = self.schema {
            write_part(f, schema)?;
            f.write_str(".")?;
        }
        write_part(f, &self.name)
    }
}
