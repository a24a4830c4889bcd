use nom::branch::alt;
use nom::character::complete::alpha1;
use nom::character::complete::alphanumeric1;
use nom::character::complete::char;
use nom::character::complete::multispace1;
use nom::character::complete::not_line_ending;
use nom::combinator::all_consuming;
use nom::combinator::map;
use nom::combinator::opt;
use nom::combinator::recognize;
use nom::combinator::value;
use nom::error::Error;
use nom::error::ErrorKind;
use nom::multi::many0;
use nom::multi::many0_count;
use nom::multi::separated_list0;
use nom::sequence::delimited;
use nom::sequence::pair;
use nom::sequence::preceded;
use nom::sequence::separated_pair;
use nom::sequence::terminated;
use nom::sequence::tuple;
use nom::IResult;

use crate::ActionDeclaration;
use crate::ActionLibrary;
use crate::LiteralSpec;
use crate::PredicateDeclaration;
use crate::UsageTag;
use crate::WorldDeclaration;
use crate::WorldPart;

/// The input could not be parsed as a scenario file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed scenario input near `{fragment}`")]
pub struct ParseError {
    /// The start of the input that could not be consumed.
    pub fragment: String,
}

impl ParseError {
    fn at(input: &str) -> ParseError {
        ParseError {
            fragment: input.chars().take(40).collect(),
        }
    }

    fn from_nom(input: &str, error: nom::Err<Error<&str>>) -> ParseError {
        match error {
            nom::Err::Error(inner) | nom::Err::Failure(inner) => ParseError::at(inner.input),
            nom::Err::Incomplete(_) => ParseError::at(input),
        }
    }
}

/// Parse the contents of an action library file: any number of `predicate`
/// and `action` declarations, in any order.
pub fn parse_action_library(input: &str) -> Result<ActionLibrary, ParseError> {
    let items = all_consuming(terminated(many0(library_item), whitespace))(input)
        .map_err(|error| ParseError::from_nom(input, error))?
        .1;

    let mut library = ActionLibrary::default();
    for item in items {
        match item {
            LibraryItem::Predicate(declaration) => library.predicates.push(declaration),
            LibraryItem::Action(declaration) => library.actions.push(declaration),
        }
    }

    Ok(library)
}

/// Parse the contents of a world statement file: any number of
/// `(<source>, <target>): <literals>;` parts.
pub fn parse_world_statement(input: &str) -> Result<WorldDeclaration, ParseError> {
    let parts = all_consuming(terminated(many0(world_part), whitespace))(input)
        .map_err(|error| ParseError::from_nom(input, error))?
        .1;

    Ok(WorldDeclaration { parts })
}

enum LibraryItem {
    Predicate(PredicateDeclaration),
    Action(ActionDeclaration),
}

fn library_item(input: &str) -> IResult<&str, LibraryItem> {
    alt((
        map(predicate_declaration, LibraryItem::Predicate),
        map(action_declaration, LibraryItem::Action),
    ))(input)
}

/// Skips whitespace and `%` line comments.
fn whitespace(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0_count(alt((
            value((), multispace1),
            value((), pair(char('%'), not_line_ending)),
        ))),
    )(input)
}

/// Wraps a parser so that it skips leading whitespace and comments.
fn token<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(whitespace, inner)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, recognize(char('_')))),
        many0_count(alt((alphanumeric1, recognize(char('_'))))),
    ))(input)
}

/// Matches `word` as a whole identifier, so that e.g. `pretend` is not
/// accepted where `pre` is expected.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (rest, matched) = identifier(input)?;

        if matched == word {
            Ok((rest, matched))
        } else {
            Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
        }
    }
}

fn boolean(input: &str) -> IResult<&str, bool> {
    alt((value(true, keyword("true")), value(false, keyword("false"))))(input)
}

fn usage_tag(input: &str) -> IResult<&str, UsageTag> {
    alt((
        value(UsageTag::Source, keyword("source")),
        value(UsageTag::Target, keyword("target")),
        value(UsageTag::Both, keyword("both")),
    ))(input)
}

fn literal_spec(input: &str) -> IResult<&str, LiteralSpec> {
    map(
        separated_pair(token(identifier), token(char('=')), token(boolean)),
        |(predicate, value)| LiteralSpec {
            predicate: predicate.to_owned(),
            value,
        },
    )(input)
}

fn literal_list(input: &str) -> IResult<&str, Vec<LiteralSpec>> {
    separated_list0(token(char('&')), literal_spec)(input)
}

/// `predicate <name> : <usage>;`
fn predicate_declaration(input: &str) -> IResult<&str, PredicateDeclaration> {
    map(
        preceded(
            token(keyword("predicate")),
            terminated(
                separated_pair(token(identifier), token(char(':')), token(usage_tag)),
                token(char(';')),
            ),
        ),
        |(name, usage)| PredicateDeclaration {
            name: name.to_owned(),
            usage,
        },
    )(input)
}

/// `action <name> (<source>[, <target>]) { pre: <literals>; con: <literals>; }`
fn action_declaration(input: &str) -> IResult<&str, ActionDeclaration> {
    let entity_pair = delimited(
        token(char('(')),
        pair(
            token(identifier),
            opt(preceded(token(char(',')), token(identifier))),
        ),
        token(char(')')),
    );

    let body = delimited(
        token(char('{')),
        pair(literal_section("pre"), literal_section("con")),
        token(char('}')),
    );

    map(
        preceded(
            token(keyword("action")),
            tuple((token(identifier), entity_pair, body)),
        ),
        |(name, (source, target), (prerequisites, consequences))| ActionDeclaration {
            name: name.to_owned(),
            source: source.to_owned(),
            target: target.map(str::to_owned),
            prerequisites,
            consequences,
        },
    )(input)
}

/// `<label>: <literals>;` inside an action body.
fn literal_section<'a>(
    label: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<LiteralSpec>> {
    preceded(
        pair(token(keyword(label)), token(char(':'))),
        terminated(literal_list, token(char(';'))),
    )
}

/// `(<source or '-'>, <target or '-'>): <literals>;`
fn world_part(input: &str) -> IResult<&str, WorldPart> {
    let optional_entity = |input| {
        alt((
            value(None, token(char('-'))),
            map(token(identifier), |name: &str| Some(name.to_owned())),
        ))(input)
    };

    let entity_pair = delimited(
        token(char('(')),
        separated_pair(optional_entity, token(char(',')), optional_entity),
        token(char(')')),
    );

    map(
        pair(
            entity_pair,
            preceded(
                token(char(':')),
                terminated(literal_list, token(char(';'))),
            ),
        ),
        |((source, target), literals)| WorldPart {
            source,
            target,
            literals,
        },
    )(input)
}
