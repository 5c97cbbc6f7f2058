//! parse task document with structure like
//! ```text
//! settings
//!   loglevel: info
//!   plots: true
//! ```
//! i.e. titles followed by pairs key: value1, value2 into HashMap<title, HashMap<key, Vec<Value>>>.
//! Lines starting with //, # or % are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type SectionMap = HashMap<String, Vec<Value>>;
pub type DocumentMap = HashMap<String, SectionMap>;

/// value of a key in the task document
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// section titles and keys: letters, digits and underscores, not starting with a digit
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    let raw = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    map_res(raw, |s: &str| -> Result<Value, String> {
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    })
    .parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let comma = delimited(space0, tag(","), space0);
    separated_list1(comma, parse_value).parse(input)
}

fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon = delimited(space0, tag(":"), space0);
    let (input, result) = separated_pair(parse_identifier, colon, parse_value_list).parse(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, result))
}

fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    let section = pairs.into_iter().collect::<SectionMap>();
    Ok((input, (title, section)))
}

fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.is_empty()
        })
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parse the whole task document. Trailing unparsed text is an error.
pub fn parse_task_document(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parser = many0(delimited(multispace0, parse_section, multispace0));
    match parser.parse(filtered.as_str()) {
        Ok((remaining, sections)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            let mut document = DocumentMap::new();
            for (title, section) in sections {
                document.entry(title).or_default().extend(section);
            }
            Ok(document)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

/// single value of `key` in `section`, None if the key is absent
pub fn single_value<'a>(
    document: &'a DocumentMap,
    section: &str,
    key: &str,
) -> Result<Option<&'a Value>, String> {
    match document.get(section).and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(values.first()),
        Some(values) => Err(format!(
            "{}.{} expects one value, got {}",
            section,
            key,
            values.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let input = "settings\nloglevel: info\nplots: true\nstep: 7.05\ncount: 21\n";
        let doc = parse_task_document(input).unwrap();
        let settings = &doc["settings"];
        assert_eq!(settings["loglevel"], vec![Value::String("info".to_string())]);
        assert_eq!(settings["plots"], vec![Value::Boolean(true)]);
        assert_eq!(settings["step"], vec![Value::Float(7.05)]);
        assert_eq!(settings["count"], vec![Value::Integer(21)]);
    }

    #[test]
    fn test_parse_lists_comments_and_sections() {
        let input = "
            # survey run
            settings
              output_dir: app_plots
              // comment
            references
              street: 134.4333
              areas: 5777.0648, 5779.1772 ,5803.2647
        ";
        let doc = parse_task_document(input).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc["settings"]["output_dir"][0].as_string().unwrap(),
            "app_plots"
        );
        assert_eq!(
            doc["references"]["areas"],
            vec![
                Value::Float(5777.0648),
                Value::Float(5779.1772),
                Value::Float(5803.2647)
            ]
        );
    }

    #[test]
    fn test_key_without_section_is_error() {
        assert!(parse_task_document("loglevel: info").is_err());
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_task_document("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_single_value() {
        let doc = parse_task_document("settings\nplots: false\ndirs: a, b\n").unwrap();
        assert_eq!(
            single_value(&doc, "settings", "plots").unwrap(),
            Some(&Value::Boolean(false))
        );
        assert_eq!(single_value(&doc, "settings", "csv").unwrap(), None);
        assert_eq!(single_value(&doc, "other", "plots").unwrap(), None);
        assert!(single_value(&doc, "settings", "dirs").is_err());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::Boolean(true).as_boolean(), Some(true));
        assert_eq!(Value::Integer(1).as_boolean(), None);
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("x".into()).as_string().map(String::as_str), Some("x"));
    }
}
